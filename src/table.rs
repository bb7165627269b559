//! Broadcast table boundary.
//!
//! The key-value table that connects the vision process to the robot
//! controller lives outside this crate. [`BroadcastTable`] is the slice of it
//! the crate needs: raw byte blobs, booleans and numbers under string keys,
//! with last-writer-wins semantics per key. [`MemoryTable`] is an in-process
//! implementation for simulation and tests.
//!
//! Tables are passed around explicitly as a [`TableHandle`]; nothing in the
//! crate looks one up from global state.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::trace;

use crate::config::CameraConfig;
use crate::types::LedMode;
use crate::{Result, VisionError};

/// Shared reference to a broadcast table.
pub type TableHandle = Arc<dyn BroadcastTable>;

/// Typed access to named entries of a broadcast table.
///
/// `get_*` returns `Ok(None)` for a key nobody has written yet.
pub trait BroadcastTable: Send + Sync {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>>;
    fn set_raw(&self, key: &str, value: &[u8]) -> Result<()>;
    fn get_bool(&self, key: &str) -> Result<Option<bool>>;
    fn set_bool(&self, key: &str, value: bool) -> Result<()>;
    fn get_number(&self, key: &str) -> Result<Option<f64>>;
    fn set_number(&self, key: &str, value: f64) -> Result<()>;
}

/// A value stored in a [`MemoryTable`].
#[derive(Debug, Clone, PartialEq)]
pub enum TableValue {
    Raw(Vec<u8>),
    Bool(bool),
    Number(f64),
}

impl TableValue {
    fn kind(&self) -> &'static str {
        match self {
            TableValue::Raw(_) => "raw",
            TableValue::Bool(_) => "boolean",
            TableValue::Number(_) => "number",
        }
    }
}

/// In-process broadcast table.
///
/// Like the networked table it stands in for, an entry keeps the type it was
/// first written with; writing a different type to the same key is an error.
#[derive(Debug, Default)]
pub struct MemoryTable {
    entries: Mutex<HashMap<String, TableValue>>,
}

impl MemoryTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience for the common case of sharing a fresh table.
    pub fn shared() -> TableHandle {
        Arc::new(Self::new())
    }

    pub fn contains_key(&self, key: &str) -> Result<bool> {
        Ok(self.lock(key)?.contains_key(key))
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock("<all>")?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn lock(&self, key: &str) -> Result<MutexGuard<'_, HashMap<String, TableValue>>> {
        self.entries.lock().map_err(|_| VisionError::table_error(key, "table lock poisoned"))
    }

    fn get(&self, key: &str) -> Result<Option<TableValue>> {
        Ok(self.lock(key)?.get(key).cloned())
    }

    fn set(&self, key: &str, value: TableValue) -> Result<()> {
        let mut entries = self.lock(key)?;
        if let Some(existing) = entries.get(key) {
            if std::mem::discriminant(existing) != std::mem::discriminant(&value) {
                return Err(VisionError::table_error(
                    key,
                    format!("cannot overwrite {} entry with {}", existing.kind(), value.kind()),
                ));
            }
        }
        trace!(key, kind = value.kind(), "Table entry updated");
        entries.insert(key.to_string(), value);
        Ok(())
    }
}

fn type_mismatch(key: &str, expected: &str, found: &TableValue) -> VisionError {
    VisionError::table_error(key, format!("expected {} entry, found {}", expected, found.kind()))
}

impl BroadcastTable for MemoryTable {
    fn get_raw(&self, key: &str) -> Result<Option<Vec<u8>>> {
        match self.get(key)? {
            None => Ok(None),
            Some(TableValue::Raw(bytes)) => Ok(Some(bytes)),
            Some(other) => Err(type_mismatch(key, "raw", &other)),
        }
    }

    fn set_raw(&self, key: &str, value: &[u8]) -> Result<()> {
        self.set(key, TableValue::Raw(value.to_vec()))
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.get(key)? {
            None => Ok(None),
            Some(TableValue::Bool(value)) => Ok(Some(value)),
            Some(other) => Err(type_mismatch(key, "boolean", &other)),
        }
    }

    fn set_bool(&self, key: &str, value: bool) -> Result<()> {
        self.set(key, TableValue::Bool(value))
    }

    fn get_number(&self, key: &str) -> Result<Option<f64>> {
        match self.get(key)? {
            None => Ok(None),
            Some(TableValue::Number(value)) => Ok(Some(value)),
            Some(other) => Err(type_mismatch(key, "number", &other)),
        }
    }

    fn set_number(&self, key: &str, value: f64) -> Result<()> {
        self.set(key, TableValue::Number(value))
    }
}

/// Table keys used by one camera.
///
/// The per-camera entries live under `<root>/<camera>/`; the LED mode is
/// shared by every camera under `<root>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CameraEntries {
    pub raw_bytes: String,
    pub driver_mode: String,
    pub pipeline_index: String,
    pub led_mode: String,
}

impl CameraEntries {
    pub fn new(root_table: &str, camera_name: &str) -> Self {
        let camera = format!("{}/{}", root_table, camera_name);
        Self {
            raw_bytes: format!("{}/rawBytes", camera),
            driver_mode: format!("{}/driverMode", camera),
            pipeline_index: format!("{}/pipelineIndex", camera),
            led_mode: format!("{}/ledMode", root_table),
        }
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        Self::new(&config.root_table, &config.camera_name)
    }

    /// Driver mode flag; unset reads as `false`.
    pub fn driver_mode(&self, table: &dyn BroadcastTable) -> Result<bool> {
        Ok(table.get_bool(&self.driver_mode)?.unwrap_or(false))
    }

    /// Active pipeline index; unset reads as 0.
    pub fn pipeline_index(&self, table: &dyn BroadcastTable) -> Result<i32> {
        let value = table.get_number(&self.pipeline_index)?.unwrap_or(0.0);
        if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
            return Err(VisionError::Parse {
                context: "Pipeline index".to_string(),
                details: format!("'{}' holds non-integer value {}", self.pipeline_index, value),
            });
        }
        Ok(value as i32)
    }

    /// Shared LED mode; unset reads as [`LedMode::Default`].
    pub fn led_mode(&self, table: &dyn BroadcastTable) -> Result<LedMode> {
        match table.get_number(&self.led_mode)? {
            None => Ok(LedMode::Default),
            Some(value) => LedMode::try_from(value),
        }
    }
}
