//! Publishing simulated results to a camera's table slot

use tracing::{debug, trace};

use crate::codec::{WireFormat, encode_result};
use crate::config::CameraConfig;
use crate::source::ResultSink;
use crate::sources::TableSource;
use crate::table::{CameraEntries, TableHandle};
use crate::types::{PipelineResult, TrackedTarget};
use crate::Result;

/// What a call to [`SimulatedPublisher::publish`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    /// The encoded result replaced the slot contents
    Published { bytes: usize },
    /// The camera is in driver mode; the slot was left untouched
    SkippedDriverMode,
}

/// Writes pipeline results the way the vision process would.
pub struct SimulatedPublisher<K: ResultSink = TableSource> {
    name: String,
    table: TableHandle,
    entries: CameraEntries,
    sink: K,
    format: WireFormat,
}

impl SimulatedPublisher<TableSource> {
    /// Publisher writing to the camera's `rawBytes` entry of `table`.
    ///
    /// `config` is used as given; run [`CameraConfig::validate`] first.
    /// [`SimVisionSystem::from_scenario`](super::SimVisionSystem::from_scenario)
    /// does this for scenario files.
    pub fn new(table: TableHandle, config: &CameraConfig) -> Self {
        let entries = CameraEntries::from_config(config);
        let sink = TableSource::new(table.clone(), entries.raw_bytes.clone());
        Self::with_sink(table, config, sink)
    }
}

impl<K: ResultSink> SimulatedPublisher<K> {
    /// Publisher writing to `sink`; the driver-mode flag is still read from `table`.
    pub fn with_sink(table: TableHandle, config: &CameraConfig, sink: K) -> Self {
        Self {
            name: config.camera_name.clone(),
            table,
            entries: CameraEntries::from_config(config),
            sink,
            format: config.wire_format,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &CameraEntries {
        &self.entries
    }

    pub fn driver_mode(&self) -> Result<bool> {
        self.entries.driver_mode(self.table.as_ref())
    }

    /// Encode `targets` with `latency_millis` and write them to the sink.
    pub fn publish(&self, latency_millis: f64, targets: &[TrackedTarget]) -> Result<PublishOutcome> {
        if self.driver_mode()? {
            debug!(camera = %self.name, "Driver mode enabled, not publishing");
            return Ok(PublishOutcome::SkippedDriverMode);
        }

        let result = PipelineResult::new(latency_millis, targets.to_vec());
        let bytes = encode_result(&result, self.format)?;
        self.sink.write_raw(&bytes)?;

        trace!(camera = %self.name, targets = targets.len(), bytes = bytes.len(), "Published result");
        Ok(PublishOutcome::Published { bytes: bytes.len() })
    }
}

impl<K: ResultSink> std::fmt::Debug for SimulatedPublisher<K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimulatedPublisher")
            .field("name", &self.name)
            .field("entries", &self.entries)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::decode_result;
    use crate::sources::MemorySource;
    use crate::source::ResultSource;
    use crate::table::MemoryTable;
    use crate::test_utils::sample_target;
    use crate::VisionError;

    #[test]
    fn publishes_exactly_sized_payload() {
        let table = MemoryTable::shared();
        let publisher = SimulatedPublisher::new(table.clone(), &CameraConfig::new("front"));

        let outcome = publisher.publish(5.0, &[sample_target(), sample_target()]).unwrap();
        assert_eq!(outcome, PublishOutcome::Published { bytes: 10 + 2 * 56 });

        let bytes = table.get_raw("photonvision/front/rawBytes").unwrap().unwrap();
        let result = decode_result(bytes, WireFormat::Legacy).unwrap();
        assert_eq!(result.latency_millis(), 5.0);
        assert_eq!(result.target_count(), 2);
    }

    #[test]
    fn driver_mode_leaves_slot_untouched() {
        let table = MemoryTable::shared();
        let publisher = SimulatedPublisher::new(table.clone(), &CameraConfig::new("front"));

        publisher.publish(1.0, &[sample_target()]).unwrap();
        let before = table.get_raw("photonvision/front/rawBytes").unwrap();

        table.set_bool("photonvision/front/driverMode", true).unwrap();
        assert_eq!(publisher.publish(2.0, &[]).unwrap(), PublishOutcome::SkippedDriverMode);
        assert_eq!(table.get_raw("photonvision/front/rawBytes").unwrap(), before);
    }

    #[test]
    fn overflow_is_reported_and_nothing_is_written() {
        let table = MemoryTable::shared();
        let sink = MemorySource::new();
        let publisher = SimulatedPublisher::with_sink(table, &CameraConfig::new("front"), sink.clone());

        let err = publisher.publish(0.0, &vec![sample_target(); 256]).unwrap_err();
        assert!(matches!(err, VisionError::TargetCountOverflow { count: 256 }));
        assert!(sink.read_raw().unwrap().is_empty());
    }
}
