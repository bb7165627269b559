//! Robot-side camera handle.
//!
//! [`VisionCamera`] reads the latest pipeline result published for one
//! camera and exposes the camera's control entries (driver mode, pipeline
//! index, LED mode). Every getter reads the table afresh; nothing is cached
//! between calls.

use tracing::{debug, trace, warn};

use crate::codec::WireFormat;
use crate::config::CameraConfig;
use crate::packet::PacketBuffer;
use crate::source::ResultSource;
use crate::sources::TableSource;
use crate::table::{CameraEntries, TableHandle};
use crate::types::{LedMode, PipelineResult, TrackedTarget};
use crate::Result;

/// Initial scratch capacity; the buffer is replaced by each payload anyway.
const SCRATCH_CAPACITY: usize = 512;

/// Handle to one named camera.
///
/// Reads reuse a private scratch buffer, which is why they take `&mut self`.
/// Use one handle per thread.
///
/// ```rust
/// use sightline::{CameraConfig, MemoryTable, VisionCamera};
///
/// let table = MemoryTable::shared();
/// let mut camera = VisionCamera::new(table, &CameraConfig::new("front"));
///
/// // Nothing published yet
/// assert!(!camera.has_targets().unwrap());
/// assert_eq!(camera.best_target_yaw().unwrap(), None);
/// ```
pub struct VisionCamera<S: ResultSource = TableSource> {
    name: String,
    table: TableHandle,
    entries: CameraEntries,
    source: S,
    format: WireFormat,
    scratch: PacketBuffer,
}

impl VisionCamera<TableSource> {
    /// Camera reading its payload from the `rawBytes` entry of `table`.
    ///
    /// `config` is used as given; run [`CameraConfig::validate`] first, or open
    /// the camera through [`Sightline::camera`](crate::Sightline::camera).
    pub fn new(table: TableHandle, config: &CameraConfig) -> Self {
        let entries = CameraEntries::from_config(config);
        let source = TableSource::new(table.clone(), entries.raw_bytes.clone());
        Self::with_source(table, config, source)
    }
}

impl<S: ResultSource> VisionCamera<S> {
    /// Camera reading its payload from `source`; control entries still live in `table`.
    pub fn with_source(table: TableHandle, config: &CameraConfig, source: S) -> Self {
        debug!(
            camera = %config.camera_name,
            root = %config.root_table,
            format = ?config.wire_format,
            "Opening camera handle"
        );
        Self {
            name: config.camera_name.clone(),
            table,
            entries: CameraEntries::from_config(config),
            source,
            format: config.wire_format,
            scratch: PacketBuffer::new(SCRATCH_CAPACITY),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &CameraEntries {
        &self.entries
    }

    pub fn wire_format(&self) -> WireFormat {
        self.format
    }

    /// Decode the most recently published result.
    ///
    /// An unwritten or shorter-than-header payload is an empty result.
    pub fn latest_result(&mut self) -> Result<PipelineResult> {
        let result = self
            .source
            .read_result(&mut self.scratch, self.format)
            .inspect_err(|e| warn!(camera = %self.name, error = %e, "Failed to decode pipeline result"))?;
        trace!(
            camera = %self.name,
            targets = result.target_count(),
            latency_ms = result.latency_millis(),
            "Read pipeline result"
        );
        Ok(result)
    }

    pub fn has_targets(&mut self) -> Result<bool> {
        Ok(self.latest_result()?.has_targets())
    }

    /// First target of the latest result.
    pub fn best_target(&mut self) -> Result<Option<TrackedTarget>> {
        Ok(self.latest_result()?.best_target().copied())
    }

    pub fn best_target_yaw(&mut self) -> Result<Option<f64>> {
        Ok(self.best_target()?.map(|t| t.yaw()))
    }

    pub fn best_target_pitch(&mut self) -> Result<Option<f64>> {
        Ok(self.best_target()?.map(|t| t.pitch()))
    }

    pub fn best_target_area(&mut self) -> Result<Option<f64>> {
        Ok(self.best_target()?.map(|t| t.area()))
    }

    pub fn best_target_skew(&mut self) -> Result<Option<f64>> {
        Ok(self.best_target()?.map(|t| t.skew()))
    }

    pub fn latency_millis(&mut self) -> Result<f64> {
        Ok(self.latest_result()?.latency_millis())
    }

    pub fn driver_mode(&self) -> Result<bool> {
        self.entries.driver_mode(self.table.as_ref())
    }

    pub fn set_driver_mode(&self, enabled: bool) -> Result<()> {
        debug!(camera = %self.name, enabled, "Setting driver mode");
        self.table.set_bool(&self.entries.driver_mode, enabled)
    }

    pub fn pipeline_index(&self) -> Result<i32> {
        self.entries.pipeline_index(self.table.as_ref())
    }

    pub fn set_pipeline_index(&self, index: i32) -> Result<()> {
        debug!(camera = %self.name, index, "Selecting pipeline");
        self.table.set_number(&self.entries.pipeline_index, f64::from(index))
    }

    /// LED mode shared by every camera under the same root.
    pub fn led_mode(&self) -> Result<LedMode> {
        self.entries.led_mode(self.table.as_ref())
    }

    pub fn set_led_mode(&self, mode: LedMode) -> Result<()> {
        debug!(camera = %self.name, ?mode, "Setting LED mode");
        self.table.set_number(&self.entries.led_mode, f64::from(mode.value()))
    }
}

impl<S: ResultSource> std::fmt::Debug for VisionCamera<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionCamera")
            .field("name", &self.name)
            .field("entries", &self.entries)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::encode_result;
    use crate::sources::MemorySource;
    use crate::table::MemoryTable;
    use crate::test_utils::{sample_result, sample_target};
    use crate::VisionError;

    fn publish(table: &TableHandle, config: &CameraConfig, result: &PipelineResult) {
        let entries = CameraEntries::from_config(config);
        table.set_raw(&entries.raw_bytes, &encode_result(result, config.wire_format).unwrap()).unwrap();
    }

    #[test]
    fn reads_published_result() {
        let table = MemoryTable::shared();
        let config = CameraConfig::new("front");
        let mut camera = VisionCamera::new(table.clone(), &config);

        let result = PipelineResult::new(12.5, vec![sample_target()]);
        publish(&table, &config, &result);

        assert_eq!(camera.latest_result().unwrap(), result);
        assert!(camera.has_targets().unwrap());
        assert_eq!(camera.best_target_yaw().unwrap(), Some(3.0));
        assert_eq!(camera.best_target_pitch().unwrap(), Some(-4.0));
        assert_eq!(camera.best_target_area().unwrap(), Some(9.0));
        assert_eq!(camera.best_target_skew().unwrap(), Some(4.0));
        assert_eq!(camera.latency_millis().unwrap(), 12.5);
    }

    #[test]
    fn best_target_is_first_in_list() {
        let table = MemoryTable::shared();
        let config = CameraConfig::new("front");
        let mut camera = VisionCamera::new(table.clone(), &config);

        let result = sample_result(3);
        publish(&table, &config, &result);
        assert_eq!(camera.best_target().unwrap(), Some(result.targets()[0]));
    }

    #[test]
    fn every_read_sees_the_latest_payload() {
        let table = MemoryTable::shared();
        let config = CameraConfig::new("front");
        let mut camera = VisionCamera::new(table.clone(), &config);

        publish(&table, &config, &sample_result(2));
        assert!(camera.has_targets().unwrap());

        publish(&table, &config, &PipelineResult::new(1.0, vec![]));
        assert!(!camera.has_targets().unwrap());
        assert_eq!(camera.best_target().unwrap(), None);
    }

    #[test]
    fn cameras_do_not_see_each_others_results() {
        let table = MemoryTable::shared();
        let front = CameraConfig::new("front");
        let mut rear = VisionCamera::new(table.clone(), &CameraConfig::new("rear"));

        publish(&table, &front, &sample_result(1));
        assert!(!rear.has_targets().unwrap());
    }

    #[test]
    fn versioned_camera_rejects_legacy_payload() {
        let table = MemoryTable::shared();
        let config = CameraConfig::new("front").with_wire_format(WireFormat::Versioned);
        let mut camera = VisionCamera::new(table.clone(), &config);

        let entries = CameraEntries::from_config(&config);
        let legacy = encode_result(&sample_result(1), WireFormat::Legacy).unwrap();
        table.set_raw(&entries.raw_bytes, &legacy).unwrap();

        // Legacy payloads start with the latency's high byte
        assert!(matches!(camera.latest_result(), Err(VisionError::UnsupportedVersion { .. })));
    }

    #[test]
    fn control_entries_round_trip() {
        let table = MemoryTable::shared();
        let camera = VisionCamera::new(table.clone(), &CameraConfig::new("front"));

        assert!(!camera.driver_mode().unwrap());
        camera.set_driver_mode(true).unwrap();
        assert!(camera.driver_mode().unwrap());
        assert_eq!(table.get_bool("photonvision/front/driverMode").unwrap(), Some(true));

        camera.set_pipeline_index(3).unwrap();
        assert_eq!(camera.pipeline_index().unwrap(), 3);

        camera.set_led_mode(LedMode::Off).unwrap();
        assert_eq!(camera.led_mode().unwrap(), LedMode::Off);
        assert_eq!(table.get_number("photonvision/ledMode").unwrap(), Some(0.0));
    }

    #[test]
    fn custom_source_supplies_the_payload() {
        let table = MemoryTable::shared();
        let config = CameraConfig::new("front");
        let result = sample_result(2);
        let source = MemorySource::with_bytes(encode_result(&result, WireFormat::Legacy).unwrap());

        let mut camera = VisionCamera::with_source(table, &config, source);
        assert_eq!(camera.latest_result().unwrap(), result);
    }
}
