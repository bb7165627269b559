//! Error types for vision telemetry processing.
//!
//! Every fallible operation in the crate returns [`VisionError`]. The variants
//! follow the failure modes of the wire format and the simulator:
//!
//! ## Error Categories
//!
//! - **Buffer Errors**: a cursor would leave the backing byte array
//! - **Payload Errors**: truncated target lists, inconsistent headers, unknown versions
//! - **Encoding Errors**: more targets than the one-byte count can carry
//! - **Configuration Errors**: impossible camera geometry or unreadable scenario files
//! - **Table Errors**: broadcast-table entries holding the wrong kind of value
//!
//! ## Recovery
//!
//! ```rust
//! use sightline::VisionError;
//!
//! let error = VisionError::buffer_overrun(56, 8, 60);
//! assert!(!error.is_retryable());
//! for suggestion in error.recovery_suggestions() {
//!     println!("  - {}", suggestion);
//! }
//! ```

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for vision telemetry operations.
pub type Result<T, E = VisionError> = std::result::Result<T, E>;

/// Main error type for vision telemetry operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum VisionError {
    #[error("Buffer overrun at offset {offset:#x}: need {needed} bytes, buffer holds {len}")]
    BufferOverrun { offset: usize, needed: usize, len: usize },

    #[error("Truncated payload in {context}: {details}")]
    Truncated { context: String, details: String },

    #[error("Cannot encode {count} targets: the count field holds at most 255")]
    TargetCountOverflow { count: usize },

    #[error("Inconsistent pipeline result: has_targets={has_targets} but target count is {target_count}")]
    InconsistentResult { has_targets: bool, target_count: u8 },

    #[error("Wire format version mismatch: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u8, found: u8 },

    #[error("Invalid configuration: {reason}")]
    Config { reason: String },

    #[error("Parse error in {context}: {details}")]
    Parse { context: String, details: String },

    #[error("Scenario file error: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Broadcast table entry '{key}': {reason}")]
    Table { key: String, reason: String },
}

impl VisionError {
    /// Returns whether this error is potentially recoverable through retry.
    ///
    /// Payload errors are retryable because the publisher overwrites the slot
    /// on its next frame.
    pub fn is_retryable(&self) -> bool {
        match self {
            VisionError::Truncated { .. } => true,
            VisionError::InconsistentResult { .. } => true,
            VisionError::Table { .. } => true,
            VisionError::BufferOverrun { .. } => false,
            VisionError::TargetCountOverflow { .. } => false,
            VisionError::UnsupportedVersion { .. } => false,
            VisionError::Config { .. } => false,
            VisionError::Parse { .. } => false,
            VisionError::File { .. } => false,
        }
    }

    /// Returns suggested recovery actions for this error.
    pub fn recovery_suggestions(&self) -> Vec<&'static str> {
        match self {
            VisionError::BufferOverrun { .. } => vec![
                "Size the packet buffer from the result's encoded length",
                "Check that reads and writes use the same wire format",
            ],
            VisionError::Truncated { .. } => vec![
                "Read the entry again after the publisher's next frame",
                "Verify the publisher writes the whole packet in one entry update",
            ],
            VisionError::TargetCountOverflow { .. } => vec![
                "Report at most 255 targets per frame",
                "Filter or rank targets before publishing",
            ],
            VisionError::InconsistentResult { .. } => vec![
                "Treat the frame as corrupt and wait for the next one",
                "Check the publisher derives has_targets from the target count",
            ],
            VisionError::UnsupportedVersion { .. } => vec![
                "Match the reader's wire format to the publisher's",
                "Update the library on the older side of the link",
            ],
            VisionError::Config { .. } => vec![
                "Use a positive field of view and non-zero sensor resolution",
                "Check scenario values are finite",
            ],
            VisionError::Parse { .. } => vec![
                "Check data format compatibility",
                "Verify source data integrity",
            ],
            VisionError::File { .. } => vec![
                "Check file exists and is readable",
                "Check file permissions",
            ],
            VisionError::Table { .. } => vec![
                "Check no other process writes a different type to the same key",
                "Verify the camera name matches the vision process configuration",
            ],
        }
    }

    /// Helper constructor for bounds violations on the packet buffer.
    pub fn buffer_overrun(offset: usize, needed: usize, len: usize) -> Self {
        VisionError::BufferOverrun { offset, needed, len }
    }

    /// Helper constructor for truncated payloads.
    pub fn truncated(context: impl Into<String>, details: impl Into<String>) -> Self {
        VisionError::Truncated { context: context.into(), details: details.into() }
    }

    /// Helper constructor for configuration errors.
    pub fn config_error(reason: impl Into<String>) -> Self {
        VisionError::Config { reason: reason.into() }
    }

    /// Helper constructor for file errors with path context.
    pub fn file_error(path: PathBuf, source: std::io::Error) -> Self {
        VisionError::File { path, source }
    }

    /// Helper constructor for broadcast-table errors.
    pub fn table_error(key: impl Into<String>, reason: impl Into<String>) -> Self {
        VisionError::Table { key: key.into(), reason: reason.into() }
    }
}

impl From<std::io::Error> for VisionError {
    fn from(err: std::io::Error) -> Self {
        VisionError::File { path: PathBuf::from("<unknown>"), source: err }
    }
}
