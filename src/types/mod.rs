//! Core types for vision telemetry.
//!
//! - [`TrackedTarget`] is one detected target: yaw, pitch, area, skew and the
//!   camera-to-target transform
//! - [`PipelineResult`] is one processed frame: latency plus the ordered
//!   target list
//! - [`LedMode`] is the shared illumination selector
//!
//! Wire encoding for the first two lives in [`crate::codec`].
//!
//! ## Usage Example
//!
//! ```rust
//! use sightline::geometry::Transform2d;
//! use sightline::types::{PipelineResult, TrackedTarget};
//!
//! let target = TrackedTarget::new(3.0, 4.0, 9.0, -5.0, Transform2d::from_xy_degrees(1.0, 2.0, 30.0));
//! let result = PipelineResult::new(12.5, vec![target]);
//!
//! assert!(result.has_targets());
//! assert_eq!(result.best_target().map(|t| t.yaw()), Some(3.0));
//! ```

mod led_mode;
mod result;
mod target;

pub use led_mode::LedMode;
pub use result::PipelineResult;
pub use target::TrackedTarget;
