//! Broadcast-table backed source

use tracing::trace;

use crate::Result;
use crate::source::{ResultSink, ResultSource};
use crate::table::TableHandle;

/// Reads and writes the raw-bytes entry of one camera.
#[derive(Clone)]
pub struct TableSource {
    table: TableHandle,
    key: String,
}

impl TableSource {
    pub fn new(table: TableHandle, key: impl Into<String>) -> Self {
        Self { table, key: key.into() }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

impl std::fmt::Debug for TableSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableSource").field("key", &self.key).finish_non_exhaustive()
    }
}

impl ResultSource for TableSource {
    fn read_raw(&self) -> Result<Vec<u8>> {
        let bytes = self.table.get_raw(&self.key)?.unwrap_or_default();
        trace!(key = %self.key, bytes = bytes.len(), "Read raw result entry");
        Ok(bytes)
    }
}

impl ResultSink for TableSource {
    fn write_raw(&self, bytes: &[u8]) -> Result<()> {
        trace!(key = %self.key, bytes = bytes.len(), "Writing raw result entry");
        self.table.set_raw(&self.key, bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::{WireFormat, encode_result};
    use crate::packet::PacketBuffer;
    use crate::table::MemoryTable;
    use crate::test_utils::sample_result;

    #[test]
    fn unwritten_entry_reads_empty() {
        let source = TableSource::new(MemoryTable::shared(), "photonvision/cam/rawBytes");
        assert!(source.read_raw().unwrap().is_empty());

        let mut scratch = PacketBuffer::new(1);
        let result = source.read_result(&mut scratch, WireFormat::Legacy).unwrap();
        assert!(!result.has_targets());
    }

    #[test]
    fn writes_are_visible_to_other_sources_on_the_same_key() {
        let table = MemoryTable::shared();
        let writer = TableSource::new(table.clone(), "photonvision/cam/rawBytes");
        let reader = TableSource::new(table, "photonvision/cam/rawBytes");

        let result = sample_result(2);
        writer.write_raw(&encode_result(&result, WireFormat::Legacy).unwrap()).unwrap();

        let mut scratch = PacketBuffer::new(1);
        assert_eq!(reader.read_result(&mut scratch, WireFormat::Legacy).unwrap(), result);
    }
}
