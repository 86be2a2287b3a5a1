//! # Relative Update Mask
//!
//! Nine flags, one per transform field, saying whether the incoming value is
//! an offset from the base (flag set) or a replacement (flag clear).
//!
//! ## Wire Layout
//!
//! ```text
//! bit:   8               7     6     5     4      3    2   1   0
//!        ROTATE_VELOCITY VEL_Z VEL_Y VEL_X PITCH  YAW  Z   Y   X
//! ```
//!
//! Bits 9..31 are ignored on decode and always zero on encode.

use serde::{Deserialize, Serialize};

/// A single relative-update flag. The discriminant is the wire bit index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum RelativeFlag {
    /// X position is relative
    X = 0,
    /// Y position is relative
    Y = 1,
    /// Z position is relative
    Z = 2,
    /// Yaw is relative
    Yaw = 3,
    /// Pitch is relative
    Pitch = 4,
    /// X velocity is relative
    VelocityX = 5,
    /// Y velocity is relative
    VelocityY = 6,
    /// Z velocity is relative
    VelocityZ = 7,
    /// Rotate the base velocity into the new orientation before combining
    RotateVelocity = 8,
}

impl RelativeFlag {
    /// Every flag, in wire bit order.
    pub const ALL: [Self; 9] = [
        Self::X,
        Self::Y,
        Self::Z,
        Self::Yaw,
        Self::Pitch,
        Self::VelocityX,
        Self::VelocityY,
        Self::VelocityZ,
        Self::RotateVelocity,
    ];

    /// The bit this flag occupies in the packed mask.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u32 {
        1 << self as u32
    }
}

/// Fixed-size set of [`RelativeFlag`]s.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct RelativeUpdateMask(u32);

impl RelativeUpdateMask {
    /// Bits that carry a flag.
    pub const VALID_BITS: u32 = 0x1FF;

    /// Everything absolute.
    pub const NONE: Self = Self(0);

    /// Everything relative.
    pub const ALL: Self = Self(Self::VALID_BITS);

    /// X, Y and Z relative.
    pub const POSITION: Self =
        Self(RelativeFlag::X.bit() | RelativeFlag::Y.bit() | RelativeFlag::Z.bit());

    /// Yaw and pitch relative.
    pub const ROTATION: Self = Self(RelativeFlag::Yaw.bit() | RelativeFlag::Pitch.bit());

    /// All three velocity axes relative.
    pub const VELOCITY: Self = Self(
        RelativeFlag::VelocityX.bit() | RelativeFlag::VelocityY.bit() | RelativeFlag::VelocityZ.bit(),
    );

    /// Decodes a packed mask. Unused bits are dropped.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits & Self::VALID_BITS)
    }

    /// The packed wire value.
    #[inline]
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Checks whether `flag` is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, flag: RelativeFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    /// Returns a copy with `flag` set.
    #[inline]
    #[must_use]
    pub const fn with(self, flag: RelativeFlag) -> Self {
        Self(self.0 | flag.bit())
    }

    /// Returns a copy with `flag` cleared.
    #[inline]
    #[must_use]
    pub const fn without(self, flag: RelativeFlag) -> Self {
        Self(self.0 & !flag.bit())
    }

    /// Set union.
    #[inline]
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// True when every field is absolute.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Iterates the set flags in bit order.
    pub fn iter(self) -> impl Iterator<Item = RelativeFlag> {
        RelativeFlag::ALL.into_iter().filter(move |flag| self.contains(*flag))
    }
}

impl From<u32> for RelativeUpdateMask {
    fn from(bits: u32) -> Self {
        Self::from_bits(bits)
    }
}

impl From<RelativeUpdateMask> for u32 {
    fn from(mask: RelativeUpdateMask) -> Self {
        mask.bits()
    }
}

impl FromIterator<RelativeFlag> for RelativeUpdateMask {
    fn from_iter<I: IntoIterator<Item = RelativeFlag>>(iter: I) -> Self {
        iter.into_iter().fold(Self::NONE, Self::with)
    }
}

impl std::ops::BitOr for RelativeUpdateMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl std::ops::BitOr<RelativeFlag> for RelativeUpdateMask {
    type Output = Self;
    fn bitor(self, rhs: RelativeFlag) -> Self {
        self.with(rhs)
    }
}
