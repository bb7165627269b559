//! Camera connection configuration

use serde::{Deserialize, Serialize};

use crate::codec::WireFormat;
use crate::{Result, VisionError};

/// Root table the vision process publishes under unless told otherwise.
pub const DEFAULT_ROOT_TABLE: &str = "photonvision";

pub(crate) fn default_root_table() -> String {
    DEFAULT_ROOT_TABLE.to_string()
}

/// Where one camera's entries live and how its payload is framed.
///
/// ```rust
/// use sightline::config::CameraConfig;
///
/// let config: CameraConfig = serde_yaml_ng::from_str("camera_name: front").unwrap();
/// assert_eq!(config.root_table, "photonvision");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CameraConfig {
    #[serde(default = "default_root_table")]
    pub root_table: String,
    pub camera_name: String,
    #[serde(default)]
    pub wire_format: WireFormat,
}

impl CameraConfig {
    /// Config for `camera_name` under the default root with the legacy format.
    pub fn new(camera_name: impl Into<String>) -> Self {
        Self {
            root_table: default_root_table(),
            camera_name: camera_name.into(),
            wire_format: WireFormat::default(),
        }
    }

    pub fn with_root_table(mut self, root_table: impl Into<String>) -> Self {
        self.root_table = root_table.into();
        self
    }

    pub fn with_wire_format(mut self, wire_format: WireFormat) -> Self {
        self.wire_format = wire_format;
        self
    }

    /// Names must be non-empty and free of the `/` key separator.
    pub fn validate(&self) -> Result<()> {
        if self.root_table.is_empty() || self.camera_name.is_empty() {
            return Err(VisionError::config_error("root table and camera name must be non-empty"));
        }
        if self.camera_name.contains('/') {
            return Err(VisionError::config_error(format!(
                "camera name '{}' must not contain '/'",
                self.camera_name
            )));
        }
        Ok(())
    }
}
