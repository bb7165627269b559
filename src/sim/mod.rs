//! Simulated vision process.
//!
//! [`SimVisionSystem`] stands in for a camera and its vision coprocessor: it
//! projects known field targets through a pinhole camera model and publishes
//! the visible ones through a [`SimulatedPublisher`], so robot code reading a
//! [`VisionCamera`](crate::VisionCamera) cannot tell it apart from the real
//! thing.

mod config;
mod publisher;
mod system;
mod target;

pub use config::{SimCameraConfig, SimScenario};
pub use publisher::{PublishOutcome, SimulatedPublisher};
pub use system::{SimVisionSystem, TargetObservation};
pub use target::{SimTargetConfig, SimVisionTarget};
