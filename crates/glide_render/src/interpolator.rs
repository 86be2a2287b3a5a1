//! # Value Interpolators
//!
//! Immutable `(previous, current)` pairs that map a progress in `[0, 1]` to
//! a value. One enum per value type, so a color field can only ever hold a
//! color interpolator:
//!
//! | Type | Variants |
//! |------|----------|
//! | `f32` | constant, linear |
//! | `i32` | constant, linear (floored) |
//! | [`Argb`] | constant, color (linear light) |
//! | [`Transformation`] | constant, spherical |
//!
//! `Constant` is what a value gets the first time it is seen, so the first
//! frame after creation is never interpolated.

use glide_shared::math::lerp;
use glide_shared::{Argb, Transformation};

/// Maps interpolation progress to a value.
pub trait ValueInterpolator {
    /// The interpolated type.
    type Value;

    /// Value at `progress`. Out-of-range progress is clamped.
    fn get(&self, progress: f32) -> Self::Value;
}

/// Interpolator for `f32` attributes (shadow radius, shadow strength).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FloatInterpolator {
    /// Always the same value.
    Constant(f32),
    /// `previous + (current - previous) * progress`.
    Linear {
        /// Value at progress 0.
        previous: f32,
        /// Value at progress 1.
        current: f32,
    },
}

impl FloatInterpolator {
    /// A constant interpolator.
    #[must_use]
    pub const fn constant(value: f32) -> Self {
        Self::Constant(value)
    }

    /// A linear interpolator.
    #[must_use]
    pub const fn linear(previous: f32, current: f32) -> Self {
        Self::Linear { previous, current }
    }
}

impl ValueInterpolator for FloatInterpolator {
    type Value = f32;

    fn get(&self, progress: f32) -> f32 {
        match *self {
            Self::Constant(value) => value,
            Self::Linear { previous, current } => lerp(progress.clamp(0.0, 1.0), previous, current),
        }
    }
}

/// Interpolator for integer attributes (line width, text opacity).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntInterpolator {
    /// Always the same value.
    Constant(i32),
    /// `previous + floor((current - previous) * progress)`.
    Linear {
        /// Value at progress 0.
        previous: i32,
        /// Value at progress 1.
        current: i32,
    },
}

impl IntInterpolator {
    /// A constant interpolator.
    #[must_use]
    pub const fn constant(value: i32) -> Self {
        Self::Constant(value)
    }

    /// A linear interpolator.
    #[must_use]
    pub const fn linear(previous: i32, current: i32) -> Self {
        Self::Linear { previous, current }
    }
}

impl ValueInterpolator for IntInterpolator {
    type Value = i32;

    fn get(&self, progress: f32) -> i32 {
        match *self {
            Self::Constant(value) => value,
            Self::Linear { previous, current } => {
                let span = f64::from(current) - f64::from(previous);
                let value = f64::from(previous) + (f64::from(progress.clamp(0.0, 1.0)) * span).floor();
                value.clamp(f64::from(i32::MIN), f64::from(i32::MAX)) as i32
            }
        }
    }
}

/// Interpolator for packed `0xAARRGGBB` colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorInterpolator {
    /// Always the same color.
    Constant(Argb),
    /// Blend in linear light, see [`Argb::blend`].
    Color {
        /// Color at progress 0.
        previous: Argb,
        /// Color at progress 1.
        current: Argb,
    },
}

impl ColorInterpolator {
    /// A constant interpolator.
    #[must_use]
    pub const fn constant(value: Argb) -> Self {
        Self::Constant(value)
    }

    /// A color-space interpolator.
    #[must_use]
    pub const fn color(previous: Argb, current: Argb) -> Self {
        Self::Color { previous, current }
    }
}

impl ValueInterpolator for ColorInterpolator {
    type Value = Argb;

    fn get(&self, progress: f32) -> Argb {
        match *self {
            Self::Constant(value) => value,
            Self::Color { previous, current } => previous.blend(current, progress),
        }
    }
}

/// Interpolator for rigid render transformations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TransformInterpolator {
    /// Always the same transformation.
    Constant(Transformation),
    /// Translation and scale lerp, rotations slerp.
    Spherical {
        /// Transformation at progress 0.
        previous: Transformation,
        /// Transformation at progress 1.
        current: Transformation,
    },
}

impl TransformInterpolator {
    /// A constant interpolator.
    #[must_use]
    pub const fn constant(value: Transformation) -> Self {
        Self::Constant(value)
    }

    /// A spherical interpolator.
    #[must_use]
    pub const fn spherical(previous: Transformation, current: Transformation) -> Self {
        Self::Spherical { previous, current }
    }
}

impl ValueInterpolator for TransformInterpolator {
    type Value = Transformation;

    fn get(&self, progress: f32) -> Transformation {
        match *self {
            Self::Constant(value) => value,
            // Exact at completion, trig blending leaves residue otherwise
            Self::Spherical { current, .. } if progress >= 1.0 => current,
            Self::Spherical { previous, current } => previous.slerp(current, progress.max(0.0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glide_shared::{Quaternion, Vec3};

    #[test]
    fn test_constant_ignores_progress() {
        let c = FloatInterpolator::constant(4.0);
        assert_eq!(c.get(0.0), 4.0);
        assert_eq!(c.get(0.7), 4.0);
        assert_eq!(IntInterpolator::constant(-3).get(1.0), -3);
    }

    #[test]
    fn test_linear_float_clamps() {
        let l = FloatInterpolator::linear(2.0, 6.0);
        assert_eq!(l.get(0.0), 2.0);
        assert_eq!(l.get(0.25), 3.0);
        assert_eq!(l.get(1.0), 6.0);
        assert_eq!(l.get(-1.0), 2.0);
        assert_eq!(l.get(5.0), 6.0);
    }

    #[test]
    fn test_linear_int_floors() {
        let l = IntInterpolator::linear(0, 10);
        assert_eq!(l.get(0.55), 5);
        assert_eq!(l.get(1.0), 10);

        let down = IntInterpolator::linear(10, 0);
        assert_eq!(down.get(0.55), 4); // 10 + floor(-5.5)
    }

    #[test]
    fn test_linear_int_full_range() {
        let wide = IntInterpolator::linear(-100, i32::MAX);
        assert_eq!(wide.get(0.0), -100);
        assert_eq!(wide.get(0.5), 1_073_741_773);
        assert_eq!(wide.get(1.0), i32::MAX);

        let extremes = IntInterpolator::linear(i32::MAX, i32::MIN);
        assert_eq!(extremes.get(1.0), i32::MIN);
        assert_eq!(extremes.get(0.0), i32::MAX);
    }

    #[test]
    fn test_color_boundaries_and_monotonic() {
        let prev = Argb(0xFF00_0000);
        let curr = Argb(0xFFFF_FFFF);
        let c = ColorInterpolator::color(prev, curr);

        assert_eq!(c.get(0.0), prev);
        assert_eq!(c.get(1.0), curr);

        let mut last = c.get(0.0);
        for step in 1..=100 {
            let value = c.get(step as f32 / 100.0);
            assert!(value.red() >= last.red());
            assert!(value.green() >= last.green());
            assert!(value.blue() >= last.blue());
            assert!(value.alpha() >= last.alpha());
            last = value;
        }
    }

    #[test]
    fn test_spherical_exact_at_completion() {
        let a = Transformation::IDENTITY;
        let b = Transformation::new(
            Vec3::new(0.1, 2.7, -3.3),
            Quaternion::from_axis_angle(Vec3::Y, 1.234),
            Vec3::new(2.0, 0.5, 1.5),
            Quaternion::from_axis_angle(Vec3::X, -0.77),
        );
        let s = TransformInterpolator::spherical(a, b);

        let done = s.get(1.0);
        assert_eq!(bytemuck::bytes_of(&done), bytemuck::bytes_of(&b));
        assert_eq!(s.get(3.0), b);
    }

    #[test]
    fn test_spherical_midpoint() {
        let a = Transformation::IDENTITY;
        let b = Transformation::new(
            Vec3::new(4.0, 0.0, 0.0),
            Quaternion::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_2),
            Vec3::new(3.0, 3.0, 3.0),
            Quaternion::IDENTITY,
        );
        let mid = TransformInterpolator::spherical(a, b).get(0.5);

        assert!((mid.translation.x - 2.0).abs() < 1e-6);
        assert!((mid.scale.y - 2.0).abs() < 1e-6);
        let expected = Quaternion::from_axis_angle(Vec3::Z, std::f32::consts::FRAC_PI_4);
        assert!((mid.left_rotation.dot(expected) - 1.0).abs() < 1e-5);
    }
}
