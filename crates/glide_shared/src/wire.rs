//! # Wire Layouts
//!
//! Fixed-size little-endian layouts for authoritative transform updates.
//!
//! ```text
//! AbsoluteTransform (56 bytes)
//! ┌──────────────────────────┬──────────────────────────┬──────┬───────┐
//! │ position f64 x3 (24)     │ velocity f64 x3 (24)     │ yaw  │ pitch │
//! └──────────────────────────┴──────────────────────────┴──────┴───────┘
//!
//! RelativeMovePacket (60 bytes)
//! ┌──────────────────────────────────────────────┬──────────────┐
//! │ AbsoluteTransform (56)                       │ mask u32 (4) │
//! └──────────────────────────────────────────────┴──────────────┘
//! ```
//!
//! Trailing bytes after a complete layout are ignored.

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::math::{DVec3, Pose};
use crate::relative::RelativeUpdateMask;

/// Errors produced while decoding a wire layout.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// The buffer ended before the layout was complete.
    #[error("truncated payload: need {expected} bytes, have {actual}")]
    Truncated {
        /// Bytes the layout needs.
        expected: usize,
        /// Bytes available.
        actual: usize,
    },
}

/// Result type for wire decoding.
pub type WireResult<T> = Result<T, WireError>;

/// Authoritative pose plus velocity for one tick.
///
/// Used both as the base state and as the `delta` operand of a relative
/// update. With a field's relative flag clear, `delta` carries the full
/// value; with it set, `delta` carries an offset.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
pub struct AbsoluteTransform {
    /// World position
    pub position: DVec3,
    /// Velocity in blocks per tick
    pub velocity: DVec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees
    pub pitch: f32,
}

impl AbsoluteTransform {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = 56;

    /// Creates a transform from all four fields.
    #[must_use]
    pub const fn new(position: DVec3, velocity: DVec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            velocity,
            yaw,
            pitch,
        }
    }

    /// A stationary transform at `position` with the given orientation.
    #[must_use]
    pub const fn absolute(position: DVec3, yaw: f32, pitch: f32) -> Self {
        Self::new(position, DVec3::ZERO, yaw, pitch)
    }

    /// Combines a pose with a velocity.
    #[must_use]
    pub const fn with_pose(pose: Pose, velocity: DVec3) -> Self {
        Self::new(pose.position, velocity, pose.yaw, pose.pitch)
    }

    /// The positional and rotational part.
    #[must_use]
    pub const fn pose(&self) -> Pose {
        Pose::new(self.position, self.yaw, self.pitch)
    }

    /// Encodes to the 56-byte little-endian layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        let mut writer = WireWriter::new(&mut out);
        writer.write_dvec3(self.position);
        writer.write_dvec3(self.velocity);
        writer.write_f32(self.yaw);
        writer.write_f32(self.pitch);
        out
    }

    /// Decodes from the 56-byte little-endian layout.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Truncated`] if `bytes` is shorter than
    /// [`Self::ENCODED_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> WireResult<Self> {
        let mut reader = WireReader::new(bytes, Self::ENCODED_LEN)?;
        Ok(Self::read(&mut reader))
    }

    fn read(reader: &mut WireReader<'_>) -> Self {
        let position = reader.read_dvec3();
        let velocity = reader.read_dvec3();
        let yaw = reader.read_f32();
        let pitch = reader.read_f32();
        Self::new(position, velocity, yaw, pitch)
    }
}

/// A transform update plus the mask saying which fields are relative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RelativeMovePacket {
    /// The `delta` operand.
    pub transform: AbsoluteTransform,
    /// Which fields of `transform` are offsets.
    pub mask: RelativeUpdateMask,
}

impl RelativeMovePacket {
    /// Encoded size in bytes.
    pub const ENCODED_LEN: usize = AbsoluteTransform::ENCODED_LEN + 4;

    /// Creates a packet.
    #[must_use]
    pub const fn new(transform: AbsoluteTransform, mask: RelativeUpdateMask) -> Self {
        Self { transform, mask }
    }

    /// Encodes to the 60-byte little-endian layout.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; Self::ENCODED_LEN] {
        let mut out = [0u8; Self::ENCODED_LEN];
        out[..AbsoluteTransform::ENCODED_LEN].copy_from_slice(&self.transform.to_bytes());
        out[AbsoluteTransform::ENCODED_LEN..].copy_from_slice(&self.mask.bits().to_le_bytes());
        out
    }

    /// Decodes from the 60-byte little-endian layout.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::Truncated`] if `bytes` is shorter than
    /// [`Self::ENCODED_LEN`].
    pub fn from_bytes(bytes: &[u8]) -> WireResult<Self> {
        let mut reader = WireReader::new(bytes, Self::ENCODED_LEN)?;
        let transform = AbsoluteTransform::read(&mut reader);
        let mask = RelativeUpdateMask::from_bits(reader.read_u32());
        Ok(Self::new(transform, mask))
    }
}

/// Cursor over a buffer whose length has already been checked.
struct WireReader<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> WireReader<'a> {
    fn new(bytes: &'a [u8], required: usize) -> WireResult<Self> {
        if bytes.len() < required {
            return Err(WireError::Truncated {
                expected: required,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes, position: 0 })
    }

    fn take<const N: usize>(&mut self) -> [u8; N] {
        let mut out = [0u8; N];
        out.copy_from_slice(&self.bytes[self.position..self.position + N]);
        self.position += N;
        out
    }

    fn read_u32(&mut self) -> u32 {
        u32::from_le_bytes(self.take())
    }

    fn read_f32(&mut self) -> f32 {
        f32::from_le_bytes(self.take())
    }

    fn read_f64(&mut self) -> f64 {
        f64::from_le_bytes(self.take())
    }

    fn read_dvec3(&mut self) -> DVec3 {
        let x = self.read_f64();
        let y = self.read_f64();
        let z = self.read_f64();
        DVec3::new(x, y, z)
    }
}

/// Writes little-endian fields into a fixed buffer.
struct WireWriter<'a> {
    buffer: &'a mut [u8],
    position: usize,
}

impl<'a> WireWriter<'a> {
    fn new(buffer: &'a mut [u8]) -> Self {
        Self { buffer, position: 0 }
    }

    fn put(&mut self, bytes: &[u8]) {
        self.buffer[self.position..self.position + bytes.len()].copy_from_slice(bytes);
        self.position += bytes.len();
    }

    fn write_f32(&mut self, value: f32) {
        self.put(&value.to_le_bytes());
    }

    fn write_f64(&mut self, value: f64) {
        self.put(&value.to_le_bytes());
    }

    fn write_dvec3(&mut self, value: DVec3) {
        self.write_f64(value.x);
        self.write_f64(value.y);
        self.write_f64(value.z);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relative::RelativeFlag;

    #[test]
    fn test_layout_size_matches_pod() {
        assert_eq!(
            std::mem::size_of::<AbsoluteTransform>(),
            AbsoluteTransform::ENCODED_LEN
        );
    }

    #[test]
    fn test_field_order_and_endianness() {
        let t = AbsoluteTransform::new(
            DVec3::new(1.0, 2.0, 3.0),
            DVec3::new(4.0, 5.0, 6.0),
            7.0,
            8.0,
        );
        let bytes = t.to_bytes();

        assert_eq!(&bytes[0..8], &1.0f64.to_le_bytes());
        assert_eq!(&bytes[16..24], &3.0f64.to_le_bytes());
        assert_eq!(&bytes[24..32], &4.0f64.to_le_bytes());
        assert_eq!(&bytes[48..52], &7.0f32.to_le_bytes());
        assert_eq!(&bytes[52..56], &8.0f32.to_le_bytes());
    }

    #[test]
    fn test_packet_mask_trails_transform() {
        let mask = RelativeUpdateMask::NONE | RelativeFlag::Y | RelativeFlag::RotateVelocity;
        let packet = RelativeMovePacket::new(AbsoluteTransform::default(), mask);
        let bytes = packet.to_bytes();

        assert_eq!(&bytes[56..60], &0x102u32.to_le_bytes());
        assert_eq!(RelativeMovePacket::from_bytes(&bytes), Ok(packet));
    }

    #[test]
    fn test_packet_decode_drops_unused_mask_bits() {
        let mut bytes = RelativeMovePacket::default().to_bytes();
        bytes[56..60].copy_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
        let decoded = RelativeMovePacket::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.mask, RelativeUpdateMask::ALL);
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = [0u8; 40];
        assert_eq!(
            AbsoluteTransform::from_bytes(&bytes),
            Err(WireError::Truncated { expected: 56, actual: 40 })
        );
        assert_eq!(
            RelativeMovePacket::from_bytes(&[0u8; 59]),
            Err(WireError::Truncated { expected: 60, actual: 59 })
        );
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let t = AbsoluteTransform::absolute(DVec3::new(-1.5, 64.0, 9.25), 90.0, -30.0);
        let mut bytes = t.to_bytes().to_vec();
        bytes.extend_from_slice(&[0xAB; 7]);
        assert_eq!(AbsoluteTransform::from_bytes(&bytes), Ok(t));
    }
}
