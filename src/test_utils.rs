//! Test utilities shared by unit tests and benchmarks
//!
//! Sample targets and results, the golden byte pack emitted by the vision
//! process for a known target, and proptest strategies for codec tests.

#![cfg(any(test, feature = "benchmark"))]

use crate::geometry::{Pose2d, Transform2d};
use crate::sim::{SimCameraConfig, SimVisionTarget};
use crate::types::{PipelineResult, TrackedTarget};

/// Bytes the vision process writes for target
/// `(yaw 3, pitch 4, area 9, skew -5, x 1, y 2, rotation 1.5 rad)`.
pub const GOLDEN_TARGET_BYTES: [u8; 56] = [
    64, 8, 0, 0, 0, 0, 0, 0, // yaw
    64, 16, 0, 0, 0, 0, 0, 0, // pitch
    64, 34, 0, 0, 0, 0, 0, 0, // area
    192, 20, 0, 0, 0, 0, 0, 0, // skew
    63, 240, 0, 0, 0, 0, 0, 0, // x
    64, 0, 0, 0, 0, 0, 0, 0, // y
    64, 85, 124, 101, 19, 202, 209, 122, // rotation (degrees)
];

/// A representative target with every field populated.
pub fn sample_target() -> TrackedTarget {
    TrackedTarget::new(3.0, -4.0, 9.0, 4.0, Transform2d::from_xy_degrees(1.0, 2.0, 85.9))
}

/// A result with `count` distinguishable targets.
pub fn sample_result(count: usize) -> PipelineResult {
    let targets = (0..count)
        .map(|i| {
            let i = i as f64;
            TrackedTarget::new(
                3.0 + i,
                -4.0,
                9.0 + i / 10.0,
                6.7,
                Transform2d::from_xy_degrees(1.0, 2.0 + i, 85.9),
            )
        })
        .collect();
    PipelineResult::new(2.0, targets)
}

/// 320x240 camera with an 80° diagonal FOV, level, at the robot origin,
/// one meter off the floor, unlimited LED range and no minimum area.
pub fn basic_camera_config() -> SimCameraConfig {
    SimCameraConfig {
        camera_name: "Test".to_string(),
        diagonal_fov_deg: 80.0,
        camera_pitch_deg: 0.0,
        robot_to_camera: Transform2d::default(),
        camera_height_m: 1.0,
        max_led_range_m: 99_999.0,
        resolution_px: (320, 240),
        min_target_area_px: 0.0,
    }
}

/// Half-meter square target at ground level.
pub fn ground_target(pose: Pose2d) -> SimVisionTarget {
    SimVisionTarget::new(pose, 0.0, 0.5, 0.5)
}

/// Route `tracing` output through the test harness.
#[cfg(test)]
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
pub use strategies::*;
