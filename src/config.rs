//! CLI configuration file
//!
//! Stored as TOML at `~/.config/seecam/seecam.toml`. Every table is optional;
//! a missing file means defaults.

use seecam_cu30::CameraConfig;
use seecam_transport::protocol::{device, timing};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Which camera to open and how long to wait for it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// hidraw node; when unset the first vid:pid match is used
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_vid")]
    pub vid: u16,
    #[serde(default = "default_pid")]
    pub pid: u16,
    /// Reply timeout in milliseconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_ms: i32,
}

fn default_vid() -> u16 {
    device::VENDOR_ID
}
fn default_pid() -> u16 {
    device::PID_SEE3CAM_CU30
}
fn default_read_timeout() -> i32 {
    timing::DEFAULT_READ_TIMEOUT_MS
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: None,
            vid: default_vid(),
            pid: default_pid(),
            read_timeout_ms: default_read_timeout(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub device: DeviceConfig,
}

impl AppConfig {
    /// Get the default config file path
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("seecam")
            .join("seecam.toml")
    }

    /// Load config from a file, or return default if not found
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_gives_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.device.vid, device::VENDOR_ID);
        assert_eq!(config.device.pid, device::PID_SEE3CAM_CU30);
        assert_eq!(config.device.read_timeout_ms, 2000);
        assert!(config.device.path.is_none());
        assert_eq!(config.camera.exposure_compensation.min, 8000);
    }

    #[test]
    fn test_parse_full_file() {
        let config: AppConfig = toml::from_str(
            r#"
[camera.exposure_compensation]
min = 100
max = 50000

[device]
path = "/dev/hidraw4"
read_timeout_ms = 500
"#,
        )
        .unwrap();
        assert_eq!(config.camera.exposure_compensation.max, 50_000);
        assert_eq!(config.device.path.as_deref(), Some("/dev/hidraw4"));
        assert_eq!(config.device.read_timeout_ms, 500);
        assert_eq!(config.device.vid, device::VENDOR_ID);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = AppConfig::load(Path::new("/nonexistent/seecam.toml")).unwrap();
        assert_eq!(config.device.pid, device::PID_SEE3CAM_CU30);
    }
}
