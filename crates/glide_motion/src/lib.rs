//! # GLIDE Motion
//!
//! Turns once-per-tick authoritative pose updates into smooth per-tick motion.
//!
//! ## Architecture
//!
//! ```text
//! RelativeMovePacket ──▶ resolver::combine(base, delta, mask)
//!                                 │ AbsoluteTransform
//!                                 ▼
//!                   MotionInterpolator::set_target(pose)
//!                                 │
//!            tick ──▶ MotionInterpolator::advance(body, oracle)
//!                                 │
//!                                 ▼
//!                        MotionBody::set_pose
//! ```
//!
//! Collision checks are the host's business: the interpolator only asks a
//! [`CollisionOracle`] whether a candidate volume is free.
//!
//! ## Example
//!
//! ```rust,ignore
//! use glide_motion::{combine, MotionInterpolator, OpenSpace};
//!
//! let mut motion = MotionInterpolator::default(); // 3 steps
//! let next = combine(&base, &packet.transform, packet.mask);
//! motion.set_target(&mut body, next.pose());
//! motion.advance(&mut body, &OpenSpace); // once per tick
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod interpolation;
pub mod resolver;

pub use interpolation::{
    CollisionOracle, InterpolationTarget, MotionBody, MotionInterpolator, MotionPhase, OpenSpace,
};
pub use resolver::combine;
