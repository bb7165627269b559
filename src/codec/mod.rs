//! Wire codec for pipeline results.
//!
//! ## Layout
//!
//! All fields are big-endian with no padding:
//!
//! ```text
//! TrackedTarget (56 bytes)
//!   yaw f64 | pitch f64 | area f64 | skew f64 | x f64 | y f64 | rotation_deg f64
//!
//! PipelineResult (10 + 56 * N bytes)
//!   latency_millis f64 | has_targets u8 (0/1) | target_count u8 | TrackedTarget * N
//! ```
//!
//! [`WireFormat::Legacy`] is exactly that layout. [`WireFormat::Versioned`]
//! prefixes it with a single version tag byte so the body can evolve without
//! silently breaking readers. Both sides of a link must agree on the format.
//!
//! ## Example
//!
//! ```rust
//! use sightline::codec::{WireFormat, decode_result, encode_result};
//! use sightline::types::PipelineResult;
//!
//! let result = PipelineResult::new(4.0, vec![]);
//! let bytes = encode_result(&result, WireFormat::Legacy).unwrap();
//! assert_eq!(bytes.len(), 10);
//!
//! let decoded = decode_result(bytes, WireFormat::Legacy).unwrap();
//! assert_eq!(decoded, result);
//! ```

mod pipeline;
mod target;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::packet::PacketBuffer;
use crate::types::PipelineResult;
use crate::{Result, VisionError};

pub use pipeline::{MAX_TARGETS, RESULT_HEADER_SIZE};
pub use target::TARGET_SIZE;

/// Tag byte written by [`WireFormat::Versioned`] for the current body layout.
pub const FORMAT_VERSION_1: u8 = 1;

/// Trait for types with a fixed-order binary representation.
pub trait WireCodec: Sized {
    /// Number of bytes `encode` will write.
    fn encoded_len(&self) -> usize;

    /// Append this value at the packet's write cursor.
    fn encode(&self, packet: &mut PacketBuffer) -> Result<()>;

    /// Read a value from the packet's read cursor.
    fn decode(packet: &mut PacketBuffer) -> Result<Self>;
}

/// Framing used for an encoded [`PipelineResult`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WireFormat {
    /// Unversioned layout understood by every existing vision process
    #[default]
    Legacy,
    /// Legacy body behind a one-byte version tag
    Versioned,
}

impl WireFormat {
    /// Bytes before the target list.
    pub const fn header_size(self) -> usize {
        match self {
            WireFormat::Legacy => RESULT_HEADER_SIZE,
            WireFormat::Versioned => RESULT_HEADER_SIZE + 1,
        }
    }

    /// Total encoded size of `result` in this format.
    pub fn encoded_len(self, result: &PipelineResult) -> usize {
        self.header_size() - RESULT_HEADER_SIZE + result.encoded_len()
    }
}

/// Encode `result` into a buffer sized exactly to its encoded length.
pub fn encode_result(result: &PipelineResult, format: WireFormat) -> Result<Vec<u8>> {
    if result.target_count() > MAX_TARGETS {
        return Err(VisionError::TargetCountOverflow { count: result.target_count() });
    }

    let mut packet = PacketBuffer::new(format.encoded_len(result));
    if format == WireFormat::Versioned {
        packet.encode_u8(FORMAT_VERSION_1)?;
    }
    result.encode(&mut packet)?;

    trace!(
        format = ?format,
        targets = result.target_count(),
        bytes = packet.len(),
        "Encoded pipeline result"
    );
    Ok(packet.into_inner())
}

/// Decode a result from raw bytes.
///
/// A payload shorter than the format's header decodes to an empty result:
/// an unwritten table slot is normal before the first publish.
pub fn decode_result(bytes: Vec<u8>, format: WireFormat) -> Result<PipelineResult> {
    let mut packet = PacketBuffer::from_bytes(bytes);
    decode_from_packet(&mut packet, format)
}

/// Decode a result starting at the packet's read cursor.
pub fn decode_from_packet(packet: &mut PacketBuffer, format: WireFormat) -> Result<PipelineResult> {
    if packet.remaining() < format.header_size() {
        trace!(
            available = packet.remaining(),
            required = format.header_size(),
            "Payload shorter than header, treating as empty result"
        );
        return Ok(PipelineResult::empty());
    }

    if format == WireFormat::Versioned {
        let found = packet.decode_u8()?;
        if found != FORMAT_VERSION_1 {
            return Err(VisionError::UnsupportedVersion { expected: FORMAT_VERSION_1, found });
        }
    }

    PipelineResult::decode(packet)
}
