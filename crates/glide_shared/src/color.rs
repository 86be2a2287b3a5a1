//! Packed `0xAARRGGBB` colors.
//!
//! Color channels are stored sRGB-encoded. Blending them as integers darkens
//! the midpoint (a black/white blend lands on 0x7F instead of 0xBC), so
//! [`Argb::blend`] decodes to linear light first. Alpha is already linear
//! coverage and is blended as-is.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A packed `0xAARRGGBB` color.
#[repr(transparent)]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Argb(pub u32);

impl Argb {
    /// Opaque white
    pub const WHITE: Self = Self(0xFFFF_FFFF);

    /// Opaque black
    pub const BLACK: Self = Self(0xFF00_0000);

    /// Fully transparent
    pub const TRANSPARENT: Self = Self(0);

    /// Packs four channels.
    #[must_use]
    pub const fn from_channels(alpha: u8, red: u8, green: u8, blue: u8) -> Self {
        Self(((alpha as u32) << 24) | ((red as u32) << 16) | ((green as u32) << 8) | blue as u32)
    }

    /// Alpha channel
    #[must_use]
    pub const fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    /// Red channel
    #[must_use]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    /// Green channel
    #[must_use]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    /// Blue channel
    #[must_use]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Blends towards `other` in linear light.
    ///
    /// `t` is clamped to `[0, 1]`; the endpoints return the inputs exactly.
    #[must_use]
    pub fn blend(self, other: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        if t <= 0.0 {
            return self;
        }
        if t >= 1.0 {
            return other;
        }
        let alpha = f32::from(self.alpha()) + (f32::from(other.alpha()) - f32::from(self.alpha())) * t;
        Self::from_channels(
            alpha.round() as u8,
            blend_channel(self.red(), other.red(), t),
            blend_channel(self.green(), other.green(), t),
            blend_channel(self.blue(), other.blue(), t),
        )
    }
}

impl From<u32> for Argb {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Argb> for u32 {
    fn from(value: Argb) -> Self {
        value.0
    }
}

fn blend_channel(from: u8, to: u8, t: f32) -> u8 {
    let a = srgb_to_linear(from);
    let b = srgb_to_linear(to);
    linear_to_srgb(a + (b - a) * t)
}

/// Decodes an sRGB channel to linear light in `[0, 1]`.
#[must_use]
pub fn srgb_to_linear(channel: u8) -> f32 {
    let c = f32::from(channel) / 255.0;
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Encodes linear light in `[0, 1]` back to an sRGB channel, rounding.
#[must_use]
pub fn linear_to_srgb(linear: f32) -> u8 {
    let l = linear.clamp(0.0, 1.0);
    let c = if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    };
    (c * 255.0).round().clamp(0.0, 255.0) as u8
}
