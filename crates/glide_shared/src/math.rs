//! Mathematical types shared by the motion and render crates.
//!
//! Positions and velocities are double precision (`DVec3`) because they come
//! straight off the wire as `f64`. Render-side values (`Vec3`, `Quaternion`,
//! `Transformation`) are single precision. Angles are degrees unless a
//! function says otherwise.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::constants::PITCH_LIMIT;

/// 3D vector - render-space translation, scale, axes
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Vec3 {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Vec3 {
    /// Creates a new Vec3
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// All ones (unit scale)
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit X vector
    pub const X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit Y vector
    pub const Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit Z vector
    pub const Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Converts to array
    #[must_use]
    pub const fn to_array(self) -> [f32; 3] {
        [self.x, self.y, self.z]
    }

    /// Dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Length
    #[must_use]
    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Component-wise linear interpolation. `t` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self::new(
            lerp(t, self.x, other.x),
            lerp(t, self.y, other.y),
            lerp(t, self.z, other.z),
        )
    }
}

impl std::ops::Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Double precision 3D vector - world positions and velocities
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct DVec3 {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl DVec3 {
    /// Creates a new DVec3
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Zero vector
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Length squared (avoids sqrt)
    #[must_use]
    pub fn length_squared(self) -> f64 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Distance to another point
    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length_squared().sqrt()
    }

    /// Component-wise linear interpolation. `t` is not clamped.
    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Self::new(
            lerp_f64(t, self.x, other.x),
            lerp_f64(t, self.y, other.y),
            lerp_f64(t, self.z, other.z),
        )
    }

    /// Rotates about the X axis by `radians` (pitch).
    #[must_use]
    pub fn x_rot(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        let (sin, cos) = (f64::from(sin), f64::from(cos));
        Self::new(
            self.x,
            self.y * cos + self.z * sin,
            self.z * cos - self.y * sin,
        )
    }

    /// Rotates about the Y axis by `radians` (yaw).
    #[must_use]
    pub fn y_rot(self, radians: f32) -> Self {
        let (sin, cos) = radians.sin_cos();
        let (sin, cos) = (f64::from(sin), f64::from(cos));
        Self::new(
            self.x * cos + self.z * sin,
            self.y,
            self.z * cos - self.x * sin,
        )
    }
}

impl std::ops::Add for DVec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for DVec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::ops::Mul<f64> for DVec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

/// Quaternion for rotations
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Quaternion {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
    /// W component
    pub w: f32,
}

impl Quaternion {
    /// Creates a new quaternion
    #[must_use]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Identity rotation
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Rotation of `radians` about a unit `axis`.
    #[must_use]
    pub fn from_axis_angle(axis: Vec3, radians: f32) -> Self {
        let (sin, cos) = (radians * 0.5).sin_cos();
        Self::new(axis.x * sin, axis.y * sin, axis.z * sin, cos)
    }

    /// 4D dot product
    #[must_use]
    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Returns the unit quaternion, or identity for a zero quaternion.
    #[must_use]
    pub fn normalize(self) -> Self {
        let len = self.dot(self).sqrt();
        if len <= f32::EPSILON {
            return Self::IDENTITY;
        }
        let inv = len.recip();
        Self::new(self.x * inv, self.y * inv, self.z * inv, self.w * inv)
    }

    /// Shortest-arc spherical interpolation towards `target`.
    ///
    /// Falls back to a linear blend when the two rotations are nearly equal,
    /// where `sin(omega)` would lose precision.
    #[must_use]
    pub fn slerp(self, target: Self, alpha: f32) -> Self {
        let cos_omega = self.dot(target);
        let abs_cos = cos_omega.abs();
        let (scale0, mut scale1) = if 1.0 - abs_cos > 1e-6 {
            let sin_sqr = 1.0 - abs_cos * abs_cos;
            let inv_sin = sin_sqr.sqrt().recip();
            let omega = (sin_sqr * inv_sin).atan2(abs_cos);
            (
                ((1.0 - alpha) * omega).sin() * inv_sin,
                (alpha * omega).sin() * inv_sin,
            )
        } else {
            (1.0 - alpha, alpha)
        };
        // Take the short way round the hypersphere.
        if cos_omega < 0.0 {
            scale1 = -scale1;
        }
        Self::new(
            scale0 * self.x + scale1 * target.x,
            scale0 * self.y + scale1 * target.y,
            scale0 * self.z + scale1 * target.z,
            scale0 * self.w + scale1 * target.w,
        )
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Rigid render transformation: `translate * left_rotation * scale * right_rotation`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Transformation {
    /// Translation
    pub translation: Vec3,
    /// Rotation applied before scaling
    pub left_rotation: Quaternion,
    /// Non-uniform scale
    pub scale: Vec3,
    /// Rotation applied after scaling
    pub right_rotation: Quaternion,
}

impl Transformation {
    /// Creates a new transformation
    #[must_use]
    pub const fn new(
        translation: Vec3,
        left_rotation: Quaternion,
        scale: Vec3,
        right_rotation: Quaternion,
    ) -> Self {
        Self {
            translation,
            left_rotation,
            scale,
            right_rotation,
        }
    }

    /// Identity transformation
    pub const IDENTITY: Self = Self::new(Vec3::ZERO, Quaternion::IDENTITY, Vec3::ONE, Quaternion::IDENTITY);

    /// Interpolates translation and scale linearly and both rotations
    /// spherically.
    #[must_use]
    pub fn slerp(self, other: Self, alpha: f32) -> Self {
        Self {
            translation: self.translation.lerp(other.translation, alpha),
            left_rotation: self.left_rotation.slerp(other.left_rotation, alpha),
            scale: self.scale.lerp(other.scale, alpha),
            right_rotation: self.right_rotation.slerp(other.right_rotation, alpha),
        }
    }
}

impl Default for Transformation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A position plus orientation (yaw, pitch in degrees).
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Pose {
    /// World position
    pub position: DVec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
}

impl Pose {
    /// Creates a new pose
    #[must_use]
    pub const fn new(position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
        }
    }

    /// Interpolates position and pitch linearly and yaw along the shortest arc.
    #[must_use]
    pub fn lerp(self, other: Self, t: f32) -> Self {
        Self {
            position: self.position.lerp(other.position, f64::from(t)),
            yaw: rot_lerp(t, self.yaw, other.yaw),
            pitch: lerp(t, self.pitch, other.pitch),
        }
    }
}

/// Axis-aligned bounding box in world space.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Aabb {
    /// Creates a new AABB.
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Creates an AABB standing on `feet` with the given footprint width and height.
    #[must_use]
    pub fn from_feet(feet: DVec3, width: f64, height: f64) -> Self {
        let half_w = width / 2.0;
        Self {
            min: DVec3::new(feet.x - half_w, feet.y, feet.z - half_w),
            max: DVec3::new(feet.x + half_w, feet.y + height, feet.z + half_w),
        }
    }

    /// Checks if this AABB intersects another. Touching faces do not count.
    #[must_use]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Moves the AABB by delta.
    #[must_use]
    pub fn translate(&self, delta: DVec3) -> Self {
        Self {
            min: self.min + delta,
            max: self.max + delta,
        }
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }
}

/// Linear interpolation.
#[inline]
#[must_use]
pub fn lerp(delta: f32, start: f32, end: f32) -> f32 {
    start + delta * (end - start)
}

/// Linear interpolation in double precision.
#[inline]
#[must_use]
pub fn lerp_f64(delta: f64, start: f64, end: f64) -> f64 {
    start + delta * (end - start)
}

/// Wraps an angle in degrees into `[-180, 180)`.
#[must_use]
pub fn wrap_degrees(degrees: f32) -> f32 {
    let mut wrapped = degrees % 360.0;
    if wrapped >= 180.0 {
        wrapped -= 360.0;
    }
    if wrapped < -180.0 {
        wrapped += 360.0;
    }
    wrapped
}

/// Angle interpolation that never turns more than 180 degrees.
///
/// The result is not wrapped: going from 170 towards -170 yields values
/// above 180.
#[inline]
#[must_use]
pub fn rot_lerp(delta: f32, start: f32, end: f32) -> f32 {
    start + delta * wrap_degrees(end - start)
}

/// Clamps a pitch to the legal range.
#[inline]
#[must_use]
pub fn clamp_pitch(pitch: f32) -> f32 {
    pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);

        let sum = a + b;
        assert_eq!(sum, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a.dot(b), 32.0); // 1*4 + 2*5 + 3*6
        assert_eq!(a.lerp(b, 0.5), Vec3::new(2.5, 3.5, 4.5));
    }

    #[test]
    fn test_pod_sizes() {
        assert_eq!(bytemuck::bytes_of(&Vec3::ZERO).len(), 12);
        assert_eq!(bytemuck::bytes_of(&DVec3::ZERO).len(), 24);
        assert_eq!(bytemuck::bytes_of(&Pose::default()).len(), 32);
        assert_eq!(bytemuck::bytes_of(&Transformation::IDENTITY).len(), 56);
    }

    #[test]
    fn test_wrap_degrees() {
        assert!((wrap_degrees(190.0) - -170.0).abs() < 1e-4);
        assert!((wrap_degrees(-190.0) - 170.0).abs() < 1e-4);
        assert!((wrap_degrees(720.0 + 45.0) - 45.0).abs() < 1e-4);
        assert_eq!(wrap_degrees(180.0), -180.0);
    }

    #[test]
    fn test_rot_lerp_takes_short_way() {
        // 170 -> -170 is a 20 degree turn through 180, not 340 back through 0
        let halfway = rot_lerp(0.5, 170.0, -170.0);
        assert!((halfway - 180.0).abs() < 1e-4);
    }

    #[test]
    fn test_velocity_rotation_quarter_turn() {
        let v = DVec3::new(1.0, 0.0, 0.0).y_rot(-std::f32::consts::FRAC_PI_2);
        assert!(v.x.abs() < 1e-6);
        assert!((v.z - 1.0).abs() < 1e-6);

        let v = DVec3::new(0.0, 1.0, 0.0).x_rot(std::f32::consts::FRAC_PI_2);
        assert!(v.y.abs() < 1e-6);
        assert!((v.z - -1.0).abs() < 1e-6);
    }

    #[test]
    fn test_slerp_midpoint_is_half_angle() {
        let a = Quaternion::IDENTITY;
        let b = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_2);
        let mid = a.slerp(b, 0.5);
        let expected = Quaternion::from_axis_angle(Vec3::Y, std::f32::consts::FRAC_PI_4);
        assert!((mid.dot(expected) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_slerp_takes_shortest_arc() {
        let a = Quaternion::IDENTITY;
        // Same rotation as identity, opposite hemisphere
        let b = Quaternion::new(0.0, 0.0, 0.0, -1.0);
        let mid = a.slerp(b, 0.5);
        assert!((mid.dot(Quaternion::IDENTITY).abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_aabb_intersection() {
        let a = Aabb::from_feet(DVec3::ZERO, 1.0, 2.0);
        let b = a.translate(DVec3::new(0.5, 0.0, 0.0));
        let c = a.translate(DVec3::new(1.0, 0.0, 0.0));

        assert!(a.intersects(&b));
        assert!(!a.intersects(&c), "touching faces are not a collision");
        assert_eq!(a.center(), DVec3::new(0.0, 1.0, 0.0));
    }
}
