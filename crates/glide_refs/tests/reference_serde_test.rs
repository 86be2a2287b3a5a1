//! References persist as bare identities and come back unresolved.

use glide_refs::{Handle, Identity, LiveHandle, ObjectReference, ObjectRegistry};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
struct Anchor {
    target: ObjectReference<Handle<String>>,
}

#[test]
fn test_reference_serializes_as_identity() {
    let registry = ObjectRegistry::new();
    let id = Identity::from_u128(0x42);
    let handle = registry.insert(id, String::from("crate"));

    let anchor = Anchor {
        target: ObjectReference::resolved(handle),
    };
    let text = toml::to_string(&anchor).unwrap();
    assert_eq!(text.trim(), format!("target = \"{id}\""));

    let mut back: Anchor = toml::from_str(&text).unwrap();
    assert!(!back.target.is_resolved());
    assert_eq!(back.target.identity(), id);

    let resolved = back.target.resolve(&registry).map(|h| h.read().clone());
    assert_eq!(resolved.as_deref(), Some("crate"));
}

#[test]
fn test_stale_identity_round_trips() {
    let registry: ObjectRegistry<String> = ObjectRegistry::new();
    let handle = registry.spawn(String::from("gone"));
    let id = handle.identity();
    registry.remove(id);

    let anchor = Anchor {
        target: ObjectReference::resolved(handle),
    };
    let text = toml::to_string(&anchor).unwrap();
    let mut back: Anchor = toml::from_str(&text).unwrap();
    assert_eq!(back.target.identity(), id);
    assert!(back.target.resolve(&registry).is_none());
}
