//! Vision-target telemetry for robot controllers.
//!
//! Sightline carries the results of an off-board vision pipeline to robot
//! code: a compact big-endian wire format for detected targets, a camera
//! handle that decodes the latest result from a shared broadcast table, and
//! a geometric simulator that publishes the results a real camera would see.
//!
//! # Features
//!
//! - **Wire codec**: fixed 56-byte targets behind a 10-byte result header,
//!   with an optional version-tagged envelope
//! - **Explicit tables**: every camera and publisher is handed its table,
//!   nothing is looked up from global state
//! - **Simulation**: field-of-view, LED range and pixel-area visibility from
//!   robot poses, deterministic per frame
//!
//! # Quick Start
//!
//! ```rust
//! use sightline::geometry::Pose2d;
//! use sightline::sim::SimScenario;
//! use sightline::{MemoryTable, Sightline};
//!
//! # fn main() -> sightline::Result<()> {
//! let scenario = SimScenario::from_yaml_str(
//!     r#"
//! camera:
//!   camera_name: front
//!   diagonal_fov_deg: 80.0
//!   camera_height_m: 0.5
//!   max_led_range_m: 20.0
//!   resolution_px: [320, 240]
//! targets:
//!   - pose: { translation: { x: 6.0, y: 0.0 }, rotation: 0.0 }
//!     height_above_ground_m: 0.5
//!     width_m: 0.5
//!     height_m: 0.5
//! "#,
//! )?;
//!
//! let table = MemoryTable::shared();
//! let sim = Sightline::simulate(table.clone(), &scenario)?;
//! let mut camera = Sightline::camera(table, &scenario.camera_config())?;
//!
//! sim.process_frame(Pose2d::default())?;
//! assert_eq!(camera.best_target_yaw()?, Some(0.0));
//! # Ok(())
//! # }
//! ```

mod error;
pub mod packet;
#[cfg_attr(any(test, feature = "benchmark"), path = "test_utils.rs")]
#[cfg(any(test, feature = "benchmark"))]
pub mod test_utils;
pub mod types;

// Wire format
pub mod codec;
pub mod geometry;

// Table boundary and result transport
pub mod config;
pub mod source;
pub mod sources;
pub mod table;

// Robot-side API and simulation
pub mod camera;
pub mod estimation;
pub mod sim;

// Core exports
pub use error::*;
pub use types::*;

pub use camera::VisionCamera;
pub use codec::{WireCodec, WireFormat};
pub use config::CameraConfig;
pub use packet::PacketBuffer;
pub use source::{ResultSink, ResultSource};
pub use sources::{MemorySource, TableSource};
pub use table::{BroadcastTable, CameraEntries, MemoryTable, TableHandle};

/// Unified entry point for cameras and simulators sharing a table.
///
/// # Examples
///
/// ```rust
/// use sightline::{CameraConfig, MemoryTable, Sightline};
///
/// let table = MemoryTable::shared();
/// let camera = Sightline::camera(table.clone(), &CameraConfig::new("front")).unwrap();
/// assert_eq!(camera.name(), "front");
///
/// // "a/b" would read another camera's entries
/// assert!(Sightline::camera(table, &CameraConfig::new("a/b")).is_err());
/// ```
pub struct Sightline;

impl Sightline {
    /// Open a camera handle reading from `table`.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Config`] if the root table or camera name is
    /// empty or the camera name contains `/`.
    pub fn camera(table: TableHandle, config: &CameraConfig) -> Result<VisionCamera> {
        config.validate()?;
        Ok(VisionCamera::new(table, config))
    }

    /// Build a simulator publishing into `table`.
    ///
    /// # Errors
    ///
    /// Returns [`VisionError::Config`] if the scenario describes an impossible
    /// camera or malformed targets.
    pub fn simulate(table: TableHandle, scenario: &sim::SimScenario) -> Result<sim::SimVisionSystem> {
        sim::SimVisionSystem::from_scenario(scenario, table)
    }
}
