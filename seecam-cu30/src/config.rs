//! Camera-side configuration
//!
//! Ranges the host enforces before a value is sent to the camera.

use serde::{Deserialize, Serialize};

/// Inclusive bounds for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub min: u32,
    pub max: u32,
}

impl Range {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Exposure compensation limits in microseconds
pub const EXPOSURE_COMPENSATION_MIN: u32 = 8000;
pub const EXPOSURE_COMPENSATION_MAX: u32 = 1_000_000;

fn default_exposure_compensation() -> Range {
    Range::new(EXPOSURE_COMPENSATION_MIN, EXPOSURE_COMPENSATION_MAX)
}

/// Host-side limits for a CU30
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Accepted exposure compensation values
    #[serde(default = "default_exposure_compensation")]
    pub exposure_compensation: Range,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            exposure_compensation: default_exposure_compensation(),
        }
    }
}
