//! # GLIDE Refs
//!
//! References between objects that outlive the objects themselves.
//!
//! A display can follow another object that is unloaded and reloaded many
//! times. Holding the handle directly would dangle; holding only the
//! identity means a lookup every frame. [`ObjectReference`] keeps the
//! identity and caches the handle until it goes stale.
//!
//! ## Example
//!
//! ```rust
//! use glide_refs::{Handle, LiveHandle, ObjectReference, ObjectRegistry};
//!
//! let registry = ObjectRegistry::new();
//! let target = registry.spawn("anchor");
//! let mut reference = ObjectReference::<Handle<&str>>::unresolved(target.identity());
//!
//! assert!(reference.resolve(&registry).is_some());
//! registry.remove(target.identity());
//! assert!(reference.resolve(&registry).is_none());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod identity;
pub mod reference;
pub mod registry;

pub use identity::Identity;
pub use reference::{IdentityLookup, LiveHandle, ObjectReference};
pub use registry::{Handle, ObjectRegistry};
