//! # Smoothing Constants
//!
//! Defaults shared by the motion and render crates. The runtime values come
//! from configuration; these are what an unconfigured client uses.

/// Authoritative simulation ticks per second.
///
/// At 20Hz each tick is 50ms. Everything in GLIDE is measured in ticks, this
/// value only matters when converting to wall-clock time.
pub const TICK_RATE: u32 = 20;

/// Default number of ticks a motion update is spread over.
///
/// Three steps hides one dropped update without visibly lagging behind.
pub const DEFAULT_INTERPOLATION_STEPS: u32 = 3;

/// Pitch is clamped to `[-PITCH_LIMIT, PITCH_LIMIT]` degrees.
pub const PITCH_LIMIT: f32 = 90.0;
