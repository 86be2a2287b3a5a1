//! # Object Registry
//!
//! Thread-safe identity → handle map. Handles are reference counted and
//! carry an atomic removed flag:
//!
//! ```text
//! ObjectRegistry ── RwLock<HashMap<Identity, Handle<T>>>
//!                                              │ Arc
//!                                              ▼
//!                        Slot { identity, removed: AtomicBool, value: RwLock<T> }
//!                                              ▲ Arc
//!           ObjectReference::Resolved(Handle) ─┘
//! ```
//!
//! Removing an object flips the flag before the map entry is dropped, so a
//! handle cached anywhere, on any thread, reports itself invalid from then
//! on and the owning reference demotes on its next resolve.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::identity::Identity;
use crate::reference::{IdentityLookup, LiveHandle};

struct Slot<T> {
    identity: Identity,
    removed: AtomicBool,
    value: RwLock<T>,
}

/// Shared handle to a registered object.
pub struct Handle<T> {
    slot: Arc<Slot<T>>,
}

impl<T> Handle<T> {
    fn new(identity: Identity, value: T) -> Self {
        Self {
            slot: Arc::new(Slot {
                identity,
                removed: AtomicBool::new(false),
                value: RwLock::new(value),
            }),
        }
    }

    /// Read access to the object.
    pub fn read(&self) -> RwLockReadGuard<'_, T> {
        self.slot.value.read()
    }

    /// Write access to the object.
    pub fn write(&self) -> RwLockWriteGuard<'_, T> {
        self.slot.value.write()
    }

    /// Whether both handles point at the same registration.
    #[must_use]
    pub fn same_object(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.slot, &other.slot)
    }

    fn mark_removed(&self) {
        self.slot.removed.store(true, Ordering::Release);
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self {
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> LiveHandle for Handle<T> {
    fn identity(&self) -> Identity {
        self.slot.identity
    }

    fn is_valid(&self) -> bool {
        !self.slot.removed.load(Ordering::Acquire)
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("identity", &self.slot.identity)
            .field("valid", &self.is_valid())
            .finish_non_exhaustive()
    }
}

/// Identity-keyed registry of live objects.
pub struct ObjectRegistry<T> {
    objects: RwLock<HashMap<Identity, Handle<T>>>,
}

impl<T> ObjectRegistry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Registers `value` under `identity`.
    ///
    /// An object already registered under `identity` is removed: handles to
    /// it go invalid and references re-resolve to the new object.
    pub fn insert(&self, identity: Identity, value: T) -> Handle<T> {
        let handle = Handle::new(identity, value);
        let previous = self.objects.write().insert(identity, handle.clone());
        if let Some(previous) = previous {
            previous.mark_removed();
            tracing::debug!(%identity, "Replaced registered object");
        } else {
            tracing::debug!(%identity, "Registered object");
        }
        handle
    }

    /// Registers `value` under a fresh random identity.
    pub fn spawn(&self, value: T) -> Handle<T> {
        self.insert(Identity::random(), value)
    }

    /// Unregisters `identity`. The returned handle is already invalid.
    pub fn remove(&self, identity: Identity) -> Option<Handle<T>> {
        let removed = self.objects.write().remove(&identity)?;
        removed.mark_removed();
        tracing::debug!(%identity, "Removed object");
        Some(removed)
    }

    /// Handle to the object registered under `identity`.
    #[must_use]
    pub fn get(&self, identity: Identity) -> Option<Handle<T>> {
        self.objects.read().get(&identity).cloned()
    }

    /// Whether `identity` is registered.
    #[must_use]
    pub fn contains(&self, identity: Identity) -> bool {
        self.objects.read().contains_key(&identity)
    }

    /// Number of registered objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    /// Whether nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// Identities of every registered object, in no particular order.
    #[must_use]
    pub fn identities(&self) -> Vec<Identity> {
        self.objects.read().keys().copied().collect()
    }

    /// Replaces the contents of `out` with a handle to every registered
    /// object, in no particular order. Reuses the capacity of `out`.
    pub fn collect_handles(&self, out: &mut Vec<Handle<T>>) {
        out.clear();
        out.extend(self.objects.read().values().cloned());
    }
}

impl<T> Default for ObjectRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ObjectRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectRegistry")
            .field("len", &self.len())
            .finish()
    }
}

impl<T> IdentityLookup for ObjectRegistry<T> {
    type Handle = Handle<T>;

    fn lookup(&self, identity: Identity) -> Option<Handle<T>> {
        self.get(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ObjectReference;

    #[test]
    fn test_insert_get_remove() {
        let registry = ObjectRegistry::new();
        let handle = registry.spawn(5u32);
        let id = handle.identity();

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id).map(|h| *h.read()), Some(5));

        *handle.write() = 6;
        assert_eq!(registry.get(id).map(|h| *h.read()), Some(6));

        let removed = registry.remove(id);
        assert!(removed.is_some_and(|h| !h.is_valid()));
        assert!(!handle.is_valid());
        assert!(registry.is_empty());
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn test_reinsert_invalidates_previous() {
        let registry = ObjectRegistry::new();
        let id = Identity::from_u128(1);
        let old = registry.insert(id, "old");
        let new = registry.insert(id, "new");

        assert!(!old.is_valid());
        assert!(new.is_valid());
        assert_eq!(registry.len(), 1);
        assert!(registry.get(id).is_some_and(|h| h.same_object(&new)));
    }

    #[test]
    fn test_reference_through_registry() {
        let registry = ObjectRegistry::new();
        let handle = registry.spawn(1.5f32);
        let mut reference = ObjectReference::<Handle<f32>>::unresolved(handle.identity());

        assert!(reference.resolve(&registry).is_some());
        registry.remove(handle.identity());
        assert!(reference.resolve(&registry).is_none());
        assert_eq!(reference.identity(), handle.identity());
    }

    #[test]
    fn test_collect_handles_reuses_buffer() {
        let registry = ObjectRegistry::new();
        let first = registry.spawn(1u8);
        registry.spawn(2u8);

        let mut buffer = Vec::with_capacity(8);
        registry.collect_handles(&mut buffer);
        assert_eq!(buffer.len(), 2);
        let capacity = buffer.capacity();

        registry.remove(first.identity());
        registry.collect_handles(&mut buffer);
        assert_eq!(buffer.len(), 1);
        assert_eq!(*buffer[0].read(), 2);
        assert_eq!(buffer.capacity(), capacity);
    }

    #[test]
    fn test_removal_visible_across_threads() {
        let registry = Arc::new(ObjectRegistry::new());
        let handle = registry.spawn(0u8);
        let id = handle.identity();

        let remote = Arc::clone(&registry);
        std::thread::spawn(move || {
            remote.remove(id);
        })
        .join()
        .unwrap();

        assert!(!handle.is_valid());
    }
}
