//! Common types for transport layer

use serde::Serialize;

/// Device identification information
#[derive(Debug, Clone, Default, Serialize)]
pub struct TransportDeviceInfo {
    /// USB Vendor ID
    pub vid: u16,
    /// USB Product ID
    pub pid: u16,
    /// hidraw path or other transport-specific identifier
    pub device_path: String,
    /// Serial number if available
    pub serial: Option<String>,
    /// Product name if available
    pub product_name: Option<String>,
}

impl TransportDeviceInfo {
    /// Human-readable product name, falling back to vid:pid
    pub fn display_name(&self) -> String {
        match &self.product_name {
            Some(name) => name.clone(),
            None => format!("{:04x}:{:04x}", self.vid, self.pid),
        }
    }
}
