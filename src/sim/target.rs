//! Simulated field target

use serde::{Deserialize, Serialize};

use crate::geometry::Pose2d;

/// A flat rectangular target placed on the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimVisionTarget {
    pose: Pose2d,
    height_above_ground_m: f64,
    width_m: f64,
    height_m: f64,
}

impl SimVisionTarget {
    /// Target centred at `pose`, raised `height_above_ground_m` off the field,
    /// with physical size `width_m` x `height_m`.
    pub fn new(pose: Pose2d, height_above_ground_m: f64, width_m: f64, height_m: f64) -> Self {
        Self { pose, height_above_ground_m, width_m, height_m }
    }

    pub fn pose(&self) -> Pose2d {
        self.pose
    }

    pub fn height_above_ground_m(&self) -> f64 {
        self.height_above_ground_m
    }

    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    /// Face area in square meters.
    pub fn area_m2(&self) -> f64 {
        self.width_m * self.height_m
    }
}

/// Serializable description of a [`SimVisionTarget`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimTargetConfig {
    pub pose: Pose2d,
    #[serde(default)]
    pub height_above_ground_m: f64,
    pub width_m: f64,
    pub height_m: f64,
}

impl From<SimTargetConfig> for SimVisionTarget {
    fn from(config: SimTargetConfig) -> Self {
        SimVisionTarget::new(config.pose, config.height_above_ground_m, config.width_m, config.height_m)
    }
}
