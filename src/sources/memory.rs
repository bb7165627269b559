//! In-process source for simulation without a table

use std::sync::{Arc, Mutex};

use crate::source::{ResultSink, ResultSource};
use crate::{Result, VisionError};

/// Shared in-memory payload slot.
///
/// Clones share the same slot, so a publisher holding one clone and a camera
/// holding another see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Source preloaded with `bytes`.
    pub fn with_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes: Arc::new(Mutex::new(bytes)) }
    }
}

impl ResultSource for MemorySource {
    fn read_raw(&self) -> Result<Vec<u8>> {
        let bytes = self
            .bytes
            .lock()
            .map_err(|_| VisionError::table_error("<memory>", "payload lock poisoned"))?;
        Ok(bytes.clone())
    }
}

impl ResultSink for MemorySource {
    fn write_raw(&self, bytes: &[u8]) -> Result<()> {
        let mut slot = self
            .bytes
            .lock()
            .map_err(|_| VisionError::table_error("<memory>", "payload lock poisoned"))?;
        slot.clear();
        slot.extend_from_slice(bytes);
        Ok(())
    }
}
