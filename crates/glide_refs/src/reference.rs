//! # Lazy References
//!
//! An [`ObjectReference`] names another object by [`Identity`] and caches a
//! live handle to it once the object can be found:
//!
//! ```text
//!             lookup(id) finds a valid handle
//! Unresolved ───────────────────────────────▶ Resolved(handle)
//!      ▲                                             │
//!      └──────── handle.is_valid() == false ─────────┘
//!                      (on next resolve)
//! ```
//!
//! Equality and hashing only look at the identity, so a reference is a
//! stable map key whether or not it is resolved.

use std::hash::{Hash, Hasher};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::identity::Identity;

/// A handle to a loaded object.
pub trait LiveHandle {
    /// Identity of the object behind the handle.
    fn identity(&self) -> Identity;

    /// Whether the object is still loaded. Once `false`, never `true` again.
    fn is_valid(&self) -> bool;
}

/// Finds loaded objects by identity. Supplied by the host.
pub trait IdentityLookup {
    /// Handle type the lookup produces. May be broader than the kind a
    /// reference expects.
    type Handle;

    /// The loaded object with `identity`, if any.
    fn lookup(&self, identity: Identity) -> Option<Self::Handle>;
}

impl<F, H> IdentityLookup for F
where
    F: Fn(Identity) -> Option<H>,
{
    type Handle = H;

    fn lookup(&self, identity: Identity) -> Option<H> {
        self(identity)
    }
}

/// A reference to an object that may not be loaded.
#[derive(Clone, Debug)]
pub enum ObjectReference<H> {
    /// Only the identity is known.
    Unresolved(Identity),
    /// A live handle is cached.
    Resolved(H),
}

impl<H: LiveHandle> ObjectReference<H> {
    /// A reference that resolves on first access.
    #[must_use]
    pub const fn unresolved(identity: Identity) -> Self {
        Self::Unresolved(identity)
    }

    /// A reference with `handle` already cached.
    #[must_use]
    pub const fn resolved(handle: H) -> Self {
        Self::Resolved(handle)
    }

    /// Identity of the referenced object. Always available.
    #[must_use]
    pub fn identity(&self) -> Identity {
        match self {
            Self::Unresolved(identity) => *identity,
            Self::Resolved(handle) => handle.identity(),
        }
    }

    /// Whether a handle is cached. The handle may have gone stale since.
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    /// Whether `handle` is the referenced object.
    #[must_use]
    pub fn matches(&self, handle: &H) -> bool {
        self.identity() == handle.identity()
    }

    /// Returns a live handle, consulting `lookup` only when nothing valid is
    /// cached.
    ///
    /// A stale cached handle is dropped first. The lookup result is
    /// converted to `H`; a failed conversion counts as "not found".
    pub fn resolve<L>(&mut self, lookup: &L) -> Option<&H>
    where
        L: IdentityLookup + ?Sized,
        H: TryFrom<L::Handle>,
    {
        if matches!(self, Self::Resolved(handle) if !handle.is_valid()) {
            let identity = self.identity();
            tracing::debug!(%identity, "Cached handle went stale, demoting reference");
            *self = Self::Unresolved(identity);
        }

        if let Self::Unresolved(identity) = *self {
            let handle = lookup
                .lookup(identity)
                .and_then(|found| H::try_from(found).ok())
                .filter(|handle| handle.is_valid() && handle.identity() == identity)?;
            *self = Self::Resolved(handle);
        }

        match self {
            Self::Resolved(handle) => Some(handle),
            Self::Unresolved(_) => None,
        }
    }
}

impl<H: LiveHandle> PartialEq for ObjectReference<H> {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl<H: LiveHandle> Eq for ObjectReference<H> {}

impl<H: LiveHandle> Hash for ObjectReference<H> {
    fn hash<S: Hasher>(&self, state: &mut S) {
        self.identity().hash(state);
    }
}

impl<H: LiveHandle> From<Identity> for ObjectReference<H> {
    fn from(identity: Identity) -> Self {
        Self::Unresolved(identity)
    }
}

impl<H: LiveHandle> Serialize for ObjectReference<H> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.identity().serialize(serializer)
    }
}

impl<'de, H: LiveHandle> Deserialize<'de> for ObjectReference<H> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Identity::deserialize(deserializer).map(Self::Unresolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::collections::HashSet;
    use std::rc::Rc;

    #[derive(Clone, Debug)]
    struct TestHandle {
        identity: Identity,
        alive: Rc<Cell<bool>>,
    }

    impl TestHandle {
        fn new(identity: Identity) -> Self {
            Self {
                identity,
                alive: Rc::new(Cell::new(true)),
            }
        }
    }

    impl LiveHandle for TestHandle {
        fn identity(&self) -> Identity {
            self.identity
        }

        fn is_valid(&self) -> bool {
            self.alive.get()
        }
    }

    const ID: Identity = Identity::from_u128(7);

    #[test]
    fn test_resolve_caches_until_invalid() {
        let target = TestHandle::new(ID);
        let calls = Cell::new(0);
        let lookup = |identity: Identity| {
            calls.set(calls.get() + 1);
            (identity == ID).then(|| target.clone())
        };

        let mut reference = ObjectReference::<TestHandle>::unresolved(ID);
        assert!(reference.resolve(&lookup).is_some());
        assert!(reference.resolve(&lookup).is_some());
        assert!(reference.resolve(&lookup).is_some());
        assert_eq!(calls.get(), 1);

        target.alive.set(false);
        assert!(reference.resolve(&lookup).is_none());
        assert_eq!(calls.get(), 2);
        assert!(!reference.is_resolved());
        assert_eq!(reference.identity(), ID);
    }

    #[test]
    fn test_missing_target_stays_unresolved() {
        let lookup = |_: Identity| None::<TestHandle>;
        let mut reference = ObjectReference::<TestHandle>::unresolved(ID);
        assert!(reference.resolve(&lookup).is_none());
        assert!(!reference.is_resolved());
    }

    #[test]
    fn test_reresolves_replacement_object() {
        let first = TestHandle::new(ID);
        let mut reference = ObjectReference::resolved(first.clone());
        first.alive.set(false);

        let second = TestHandle::new(ID);
        let lookup = |_: Identity| Some(second.clone());
        let resolved = reference.resolve(&lookup).map(|h| Rc::ptr_eq(&h.alive, &second.alive));
        assert_eq!(resolved, Some(true));
    }

    #[derive(Clone, Debug)]
    enum AnyHandle {
        Wanted(TestHandle),
        Other,
    }

    impl TryFrom<AnyHandle> for TestHandle {
        type Error = ();

        fn try_from(value: AnyHandle) -> Result<Self, ()> {
            match value {
                AnyHandle::Wanted(handle) => Ok(handle),
                AnyHandle::Other => Err(()),
            }
        }
    }

    #[test]
    fn test_wrong_kind_is_not_found() {
        let lookup = |_: Identity| Some(AnyHandle::Other);
        let mut reference = ObjectReference::<TestHandle>::unresolved(ID);
        assert!(reference.resolve(&lookup).is_none());

        let wanted = TestHandle::new(ID);
        let lookup = |_: Identity| Some(AnyHandle::Wanted(wanted.clone()));
        assert!(reference.resolve(&lookup).is_some());
    }

    #[test]
    fn test_equality_ignores_resolution() {
        let unresolved = ObjectReference::<TestHandle>::unresolved(ID);
        let resolved = ObjectReference::resolved(TestHandle::new(ID));
        assert_eq!(unresolved, resolved);

        let mut set = HashSet::new();
        set.insert(unresolved);
        assert!(set.contains(&resolved));
        assert!(resolved.matches(&TestHandle::new(ID)));
        assert!(!resolved.matches(&TestHandle::new(Identity::from_u128(8))));
    }
}
