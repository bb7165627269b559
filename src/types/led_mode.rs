//! Illumination mode selector

use serde::{Deserialize, Serialize};

use crate::VisionError;

/// LED mode shared by every camera under one root table.
///
/// Discriminants are the numeric values written to the table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LedMode {
    /// Let the vision process pick per pipeline
    #[default]
    Default = -1,
    Off = 0,
    On = 1,
    Blink = 2,
}

impl LedMode {
    /// Value stored in the broadcast table.
    pub const fn value(self) -> i32 {
        self as i32
    }
}

impl TryFrom<i32> for LedMode {
    type Error = VisionError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(LedMode::Default),
            0 => Ok(LedMode::Off),
            1 => Ok(LedMode::On),
            2 => Ok(LedMode::Blink),
            other => Err(VisionError::Parse {
                context: "LED mode".to_string(),
                details: format!("Unknown LED mode value {}", other),
            }),
        }
    }
}

impl TryFrom<f64> for LedMode {
    type Error = VisionError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if value.fract() != 0.0 || !value.is_finite() {
            return Err(VisionError::Parse {
                context: "LED mode".to_string(),
                details: format!("LED mode must be an integer, got {}", value),
            });
        }
        LedMode::try_from(value as i32)
    }
}
