//! # Relative-Update Resolver
//!
//! Folds an incoming update into a base state. Each field of the update is
//! either an offset (its [`RelativeFlag`] is set) or a replacement.
//!
//! ```text
//! base:   pos (1, 2, 3)     mask: { Y }
//! delta:  pos (10, 20, 30)
//!                     │
//!                     ▼
//! result: pos (10, 22, 30)     X, Z replaced; Y offset
//! ```

use glide_shared::math::clamp_pitch;
use glide_shared::{AbsoluteTransform, DVec3, RelativeFlag, RelativeUpdateMask};

/// Combines `base` with `delta` according to `mask`.
///
/// Pure and total over finite inputs. Pitch is clamped to ±90° after
/// combining. With [`RelativeFlag::RotateVelocity`] the base velocity is
/// first rotated by the orientation change (pitch, then yaw) so that a
/// relative velocity keeps pointing the same way relative to the object.
#[must_use]
pub fn combine(
    base: &AbsoluteTransform,
    delta: &AbsoluteTransform,
    mask: RelativeUpdateMask,
) -> AbsoluteTransform {
    let anchor = DVec3::new(
        relative_or_zero(base.position.x, mask, RelativeFlag::X),
        relative_or_zero(base.position.y, mask, RelativeFlag::Y),
        relative_or_zero(base.position.z, mask, RelativeFlag::Z),
    );
    let position = anchor + delta.position;

    let yaw = relative_or_zero(base.yaw, mask, RelativeFlag::Yaw) + delta.yaw;
    let pitch = clamp_pitch(relative_or_zero(base.pitch, mask, RelativeFlag::Pitch) + delta.pitch);

    let mut velocity = base.velocity;
    if mask.contains(RelativeFlag::RotateVelocity) {
        let yaw_change = base.yaw - yaw;
        let pitch_change = base.pitch - pitch;
        velocity = velocity
            .x_rot(pitch_change.to_radians())
            .y_rot(yaw_change.to_radians());
    }

    let velocity = DVec3::new(
        combine_axis(velocity.x, delta.velocity.x, mask, RelativeFlag::VelocityX),
        combine_axis(velocity.y, delta.velocity.y, mask, RelativeFlag::VelocityY),
        combine_axis(velocity.z, delta.velocity.z, mask, RelativeFlag::VelocityZ),
    );

    AbsoluteTransform::new(position, velocity, yaw, pitch)
}

#[inline]
fn relative_or_zero<T: Default>(base: T, mask: RelativeUpdateMask, flag: RelativeFlag) -> T {
    if mask.contains(flag) {
        base
    } else {
        T::default()
    }
}

#[inline]
fn combine_axis(base: f64, delta: f64, mask: RelativeUpdateMask, flag: RelativeFlag) -> f64 {
    if mask.contains(flag) {
        base + delta
    } else {
        delta
    }
}
