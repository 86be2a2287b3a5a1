//! # GLIDE
//!
//! Client-side state smoothing: authoritative state arrives once per tick,
//! frames are drawn far more often, and everything in between is
//! interpolated.
//!
//! ## Crates
//!
//! | Crate | Role |
//! |-------|------|
//! | `glide_shared` | math, colors, relative mask, wire layouts |
//! | `glide_motion` | relative-update resolver, motion interpolation |
//! | `glide_render` | value interpolators, render-state controller |
//! | `glide_refs` | identities, lazy references, registry |
//! | `glide` | config, errors, [`ClientWorld`] |
//!
//! ## Example
//!
//! ```rust
//! use glide::{ClientWorld, GlideConfig};
//! use glide::shared::{AbsoluteTransform, DVec3, Pose, RelativeMovePacket, RelativeUpdateMask};
//! use glide::refs::Identity;
//!
//! let mut world = ClientWorld::new(GlideConfig::default());
//! let id = Identity::random();
//! world.spawn_body(id, Pose::default());
//!
//! let step = AbsoluteTransform::absolute(DVec3::new(3.0, 0.0, 0.0), 0.0, 0.0);
//! let packet = RelativeMovePacket::new(step, RelativeUpdateMask::POSITION);
//! world.apply_move(id, &packet.to_bytes())?;
//!
//! world.tick();
//! assert_eq!(world.pose(id)?.position.x, 1.0);
//! # Ok::<(), glide::GlideError>(())
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod body;
pub mod config;
pub mod error;
pub mod world;

pub use body::SimBody;
pub use config::{DisplayConfig, GlideConfig, MotionConfig};
pub use error::{GlideError, GlideResult};
pub use world::{BodyHandle, ClientWorld, ObjectFrame, StaticColliders, WorldObject};

/// Re-export of `glide_shared`.
pub use glide_shared as shared;
/// Re-export of `glide_motion`.
pub use glide_motion as motion;
/// Re-export of `glide_render`.
pub use glide_render as render;
/// Re-export of `glide_refs`.
pub use glide_refs as refs;
