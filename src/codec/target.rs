//! Fixed-size encoding of one tracked target

use super::WireCodec;
use crate::geometry::{Rotation2d, Transform2d, Translation2d};
use crate::packet::PacketBuffer;
use crate::types::TrackedTarget;
use crate::Result;

/// Encoded size of a [`TrackedTarget`]: seven f64 fields.
pub const TARGET_SIZE: usize = 7 * PacketBuffer::DOUBLE_SIZE;

impl WireCodec for TrackedTarget {
    fn encoded_len(&self) -> usize {
        TARGET_SIZE
    }

    fn encode(&self, packet: &mut PacketBuffer) -> Result<()> {
        let transform = self.camera_to_target();
        // Field order is part of the wire contract
        packet.encode_f64(self.yaw())?;
        packet.encode_f64(self.pitch())?;
        packet.encode_f64(self.area())?;
        packet.encode_f64(self.skew())?;
        packet.encode_f64(transform.translation.x)?;
        packet.encode_f64(transform.translation.y)?;
        packet.encode_f64(transform.rotation.degrees())?;
        Ok(())
    }

    fn decode(packet: &mut PacketBuffer) -> Result<Self> {
        let yaw = packet.decode_f64()?;
        let pitch = packet.decode_f64()?;
        let area = packet.decode_f64()?;
        let skew = packet.decode_f64()?;
        let x = packet.decode_f64()?;
        let y = packet.decode_f64()?;
        let rotation_deg = packet.decode_f64()?;

        let transform =
            Transform2d::new(Translation2d::new(x, y), Rotation2d::from_degrees(rotation_deg));
        Ok(TrackedTarget::new(yaw, pitch, area, skew, transform))
    }
}
