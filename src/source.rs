//! Result source and sink traits

use crate::codec::{self, WireFormat};
use crate::packet::PacketBuffer;
use crate::types::PipelineResult;
use crate::Result;

/// Anything encoded pipeline results can be read from.
///
/// Sources abstract over where the bytes live (a broadcast-table slot, an
/// in-process buffer). Decoding is shared and happens in
/// [`read_result`](ResultSource::read_result).
pub trait ResultSource {
    /// Latest raw payload. An unwritten slot reads as an empty vector.
    fn read_raw(&self) -> Result<Vec<u8>>;

    /// Read and decode the latest payload into `scratch`.
    ///
    /// `scratch` is cleared first and then reused; it must not be shared
    /// between concurrent readers.
    fn read_result(&self, scratch: &mut PacketBuffer, format: WireFormat) -> Result<PipelineResult> {
        scratch.clear();
        scratch.set_data(self.read_raw()?);
        if scratch.is_empty() {
            return Ok(PipelineResult::empty());
        }
        codec::decode_from_packet(scratch, format)
    }
}

/// Anything encoded pipeline results can be written to.
pub trait ResultSink {
    /// Replace the published payload with `bytes`.
    fn write_raw(&self, bytes: &[u8]) -> Result<()>;
}
