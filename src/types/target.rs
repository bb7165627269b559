//! Detected target geometry

use crate::geometry::Transform2d;

/// One target reported by a vision pipeline.
///
/// Angles are in degrees relative to the camera's optical axis. The transform
/// carries the camera-to-target relationship in meters and degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrackedTarget {
    yaw: f64,
    pitch: f64,
    area: f64,
    skew: f64,
    camera_to_target: Transform2d,
}

impl TrackedTarget {
    pub fn new(yaw: f64, pitch: f64, area: f64, skew: f64, camera_to_target: Transform2d) -> Self {
        Self { yaw, pitch, area, skew, camera_to_target }
    }

    /// Target yaw in degrees, positive when the target is right of the
    /// optical axis.
    pub fn yaw(&self) -> f64 {
        self.yaw
    }

    /// Target pitch in degrees (positive up).
    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    /// Apparent target area. Real pipelines report percent of the image
    /// (0-100); the simulator reports pixels.
    pub fn area(&self) -> f64 {
        self.area
    }

    /// Target skew in degrees (counter-clockwise positive).
    pub fn skew(&self) -> f64 {
        self.skew
    }

    pub fn camera_to_target(&self) -> Transform2d {
        self.camera_to_target
    }
}
