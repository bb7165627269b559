//! Variable-length encoding of a pipeline result

use tracing::debug;

use super::{TARGET_SIZE, WireCodec};
use crate::packet::PacketBuffer;
use crate::types::{PipelineResult, TrackedTarget};
use crate::{Result, VisionError};

/// Latency (f64) + has-targets flag (u8) + target count (u8).
pub const RESULT_HEADER_SIZE: usize =
    PacketBuffer::DOUBLE_SIZE + PacketBuffer::BOOL_SIZE + PacketBuffer::BYTE_SIZE;

/// Largest target count the one-byte count field can carry.
pub const MAX_TARGETS: usize = u8::MAX as usize;

impl WireCodec for PipelineResult {
    fn encoded_len(&self) -> usize {
        RESULT_HEADER_SIZE + self.target_count() * TARGET_SIZE
    }

    fn encode(&self, packet: &mut PacketBuffer) -> Result<()> {
        let count = u8::try_from(self.target_count())
            .map_err(|_| VisionError::TargetCountOverflow { count: self.target_count() })?;

        packet.encode_f64(self.latency_millis())?;
        packet.encode_bool(self.has_targets())?;
        packet.encode_u8(count)?;
        for target in self.targets() {
            target.encode(packet)?;
        }
        Ok(())
    }

    fn decode(packet: &mut PacketBuffer) -> Result<Self> {
        let latency_millis = packet.decode_f64()?;
        let has_targets = packet.decode_bool()?;
        let target_count = packet.decode_u8()?;

        if has_targets != (target_count > 0) {
            debug!(has_targets, target_count, "Rejecting inconsistent pipeline result header");
            return Err(VisionError::InconsistentResult { has_targets, target_count });
        }

        let needed = usize::from(target_count) * TARGET_SIZE;
        if packet.remaining() < needed {
            return Err(VisionError::truncated(
                "Pipeline result decoding",
                format!(
                    "Header announces {} targets ({} bytes) but only {} bytes remain",
                    target_count,
                    needed,
                    packet.remaining()
                ),
            ));
        }

        let mut targets = Vec::with_capacity(usize::from(target_count));
        for _ in 0..target_count {
            targets.push(TrackedTarget::decode(packet)?);
        }

        Ok(PipelineResult::new(latency_millis, targets))
    }
}
