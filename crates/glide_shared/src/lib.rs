//! # GLIDE Shared
//!
//! Value types used by every other GLIDE crate.
//!
//! ## CRITICAL RULE
//!
//! This crate must stay free of state. Everything here is a plain value
//! (`Copy` where possible) or a pure function over values:
//!
//! - [`math`]: vectors, quaternions, rigid transformations, bounding boxes
//! - [`color`]: packed `0xAARRGGBB` colors and sRGB conversion
//! - [`relative`]: the relative/absolute update mask (wire-stable bit order)
//! - [`wire`]: the absolute-transform and relative-move wire layouts

#![deny(missing_docs)]
#![deny(unsafe_code)]

pub mod color;
pub mod constants;
pub mod math;
pub mod relative;
pub mod wire;

pub use color::Argb;
pub use constants::{DEFAULT_INTERPOLATION_STEPS, PITCH_LIMIT, TICK_RATE};
pub use math::{Aabb, DVec3, Pose, Quaternion, Transformation, Vec3};
pub use relative::{RelativeFlag, RelativeUpdateMask};
pub use wire::{AbsoluteTransform, RelativeMovePacket, WireError, WireResult};
