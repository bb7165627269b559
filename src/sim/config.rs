//! Simulated camera and scenario configuration

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::target::SimTargetConfig;
use crate::codec::WireFormat;
use crate::config::{CameraConfig, default_root_table};
use crate::geometry::Transform2d;
use crate::{Result, VisionError};

/// Physical description of a simulated camera.
///
/// `camera_pitch_deg` is subtracted from each target's elevation angle, so a
/// camera configured with pitch `p` reports a level target at `-p`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimCameraConfig {
    pub camera_name: String,
    pub diagonal_fov_deg: f64,
    #[serde(default)]
    pub camera_pitch_deg: f64,
    #[serde(default)]
    pub robot_to_camera: Transform2d,
    pub camera_height_m: f64,
    pub max_led_range_m: f64,
    /// Sensor width and height in pixels.
    pub resolution_px: (u32, u32),
    #[serde(default)]
    pub min_target_area_px: f64,
}

impl SimCameraConfig {
    /// Reject geometry the simulator cannot project through.
    pub fn validate(&self) -> Result<()> {
        if !(self.diagonal_fov_deg > 0.0 && self.diagonal_fov_deg < 180.0) {
            return Err(VisionError::config_error(format!(
                "diagonal FOV must be in (0, 180) degrees, got {}",
                self.diagonal_fov_deg
            )));
        }
        let (width, height) = self.resolution_px;
        if width == 0 || height == 0 {
            return Err(VisionError::config_error(format!(
                "resolution must be non-zero, got {}x{}",
                width, height
            )));
        }
        let finite = [
            ("camera pitch", self.camera_pitch_deg),
            ("camera height", self.camera_height_m),
            ("robot-to-camera x", self.robot_to_camera.translation.x),
            ("robot-to-camera y", self.robot_to_camera.translation.y),
            ("robot-to-camera rotation", self.robot_to_camera.rotation.degrees()),
            ("minimum target area", self.min_target_area_px),
        ];
        if let Some((name, value)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(VisionError::config_error(format!("{} must be finite, got {}", name, value)));
        }
        // Infinite range is allowed: it disables the range check
        if self.max_led_range_m.is_nan() || self.max_led_range_m <= 0.0 {
            return Err(VisionError::config_error(format!(
                "LED range must be positive, got {}",
                self.max_led_range_m
            )));
        }
        Ok(())
    }

    /// Horizontal and vertical FOV split from the diagonal by the sensor aspect ratio.
    pub fn split_fov_deg(&self) -> (f64, f64) {
        let (width, height) = (f64::from(self.resolution_px.0), f64::from(self.resolution_px.1));
        let diagonal_px = width.hypot(height);
        (
            self.diagonal_fov_deg * width / diagonal_px,
            self.diagonal_fov_deg * height / diagonal_px,
        )
    }
}

/// A camera plus the targets it can see, loadable from YAML.
///
/// ```yaml
/// camera:
///   camera_name: front
///   diagonal_fov_deg: 80.0
///   camera_height_m: 1.0
///   max_led_range_m: 20.0
///   resolution_px: [320, 240]
/// targets:
///   - pose: { translation: { x: 5.0, y: 0.0 }, rotation: 0.0 }
///     width_m: 0.5
///     height_m: 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimScenario {
    #[serde(default = "default_root_table")]
    pub root_table: String,
    #[serde(default)]
    pub wire_format: WireFormat,
    pub camera: SimCameraConfig,
    #[serde(default)]
    pub targets: Vec<SimTargetConfig>,
}

impl SimScenario {
    /// Parse and validate a scenario.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let scenario: SimScenario = serde_yaml_ng::from_str(yaml).map_err(|e| VisionError::Parse {
            context: "Scenario YAML".to_string(),
            details: e.to_string(),
        })?;
        scenario.validate()?;
        debug!(
            camera = %scenario.camera.camera_name,
            targets = scenario.targets.len(),
            "Loaded simulation scenario"
        );
        Ok(scenario)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| VisionError::file_error(path.to_path_buf(), e))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn validate(&self) -> Result<()> {
        self.camera_config().validate()?;
        self.camera.validate()?;
        for (index, target) in self.targets.iter().enumerate() {
            let dims = [target.width_m, target.height_m, target.height_above_ground_m];
            if dims.iter().any(|v| !v.is_finite()) || target.width_m < 0.0 || target.height_m < 0.0 {
                return Err(VisionError::config_error(format!(
                    "target {} has invalid dimensions",
                    index
                )));
            }
        }
        Ok(())
    }

    /// Table location of the simulated camera.
    pub fn camera_config(&self) -> CameraConfig {
        CameraConfig {
            root_table: self.root_table.clone(),
            camera_name: self.camera.camera_name.clone(),
            wire_format: self.wire_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::basic_camera_config;
    use approx::assert_relative_eq;

    const SCENARIO: &str = r#"
camera:
  camera_name: front
  diagonal_fov_deg: 80.0
  camera_pitch_deg: 15.0
  camera_height_m: 1.0
  max_led_range_m: 20.0
  resolution_px: [320, 240]
targets:
  - pose: { translation: { x: 5.0, y: 0.0 }, rotation: 0.0 }
    height_above_ground_m: 2.0
    width_m: 0.5
    height_m: 0.5
  - pose: { translation: { x: 8.0, y: 1.0 }, rotation: 180.0 }
    width_m: 1.0
    height_m: 0.25
"#;

    #[test]
    fn fov_split_follows_aspect_ratio() {
        let (horizontal, vertical) = basic_camera_config().split_fov_deg();
        // 320x240 has a 3-4-5 diagonal
        assert_relative_eq!(horizontal, 64.0, epsilon = 1e-12);
        assert_relative_eq!(vertical, 48.0, epsilon = 1e-12);
    }

    #[test]
    fn rejects_impossible_cameras() {
        let mut config = basic_camera_config();
        config.diagonal_fov_deg = 0.0;
        assert!(matches!(config.validate(), Err(VisionError::Config { .. })));

        let mut config = basic_camera_config();
        config.diagonal_fov_deg = -10.0;
        assert!(config.validate().is_err());

        let mut config = basic_camera_config();
        config.resolution_px = (0, 240);
        assert!(config.validate().is_err());

        let mut config = basic_camera_config();
        config.camera_height_m = f64::NAN;
        assert!(config.validate().is_err());

        let mut config = basic_camera_config();
        config.max_led_range_m = f64::INFINITY;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parses_scenario_yaml() {
        let scenario = SimScenario::from_yaml_str(SCENARIO).unwrap();

        assert_eq!(scenario.root_table, "photonvision");
        assert_eq!(scenario.wire_format, WireFormat::Legacy);
        assert_eq!(scenario.camera.camera_pitch_deg, 15.0);
        assert_eq!(scenario.camera.robot_to_camera, Transform2d::default());
        assert_eq!(scenario.targets.len(), 2);
        assert_eq!(scenario.targets[0].height_above_ground_m, 2.0);
        assert_eq!(scenario.targets[1].height_above_ground_m, 0.0);
        assert_eq!(scenario.targets[1].pose.rotation.degrees(), 180.0);

        let camera = scenario.camera_config();
        assert_eq!(camera.camera_name, "front");
    }

    #[test]
    fn invalid_scenario_is_rejected_on_load() {
        let yaml = SCENARIO.replace("diagonal_fov_deg: 80.0", "diagonal_fov_deg: 0.0");
        assert!(matches!(SimScenario::from_yaml_str(&yaml), Err(VisionError::Config { .. })));

        assert!(matches!(SimScenario::from_yaml_str("camera: ["), Err(VisionError::Parse { .. })));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SimScenario::from_path("/nonexistent/scenario.yaml").unwrap_err();
        match err {
            VisionError::File { path, .. } => assert!(path.ends_with("scenario.yaml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
