//! Camera command error types

use seecam_transport::TransportError;
use thiserror::Error;

/// Errors from camera operations
///
/// Every variant is terminal for the operation that produced it; nothing in
/// this crate retries.
#[derive(Error, Debug)]
pub enum CameraError {
    /// Parameter outside its configured range; the device was never touched
    #[error("Invalid {parameter}: {value} outside [{min}, {max}]")]
    Validation {
        parameter: &'static str,
        value: u32,
        min: u32,
        max: u32,
    },

    /// Handle closed or invalid at call time
    #[error("Camera handle is not open")]
    TransportUnavailable,

    /// The report exchange itself failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// Device answered with the failure status for this operation
    #[error("{command} rejected by device (status 0x{status:02X})")]
    DeviceRejected { command: &'static str, status: u8 },

    /// Reply could not be trusted
    #[error("{command}: {mismatch}")]
    ProtocolMismatch {
        command: &'static str,
        mismatch: Mismatch,
    },
}

/// Why a reply was not accepted
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    #[error("control group echo 0x{actual:02X}, expected 0x{expected:02X}")]
    ControlGroup { expected: u8, actual: u8 },

    #[error("operation code echo 0x{actual:02X}, expected 0x{expected:02X}")]
    OperationCode { expected: u8, actual: u8 },

    #[error("ambiguous status byte 0x{actual:02X} (success is 0x{expected:02X})")]
    Status { expected: u8, actual: u8 },
}

impl CameraError {
    /// True for failures reported by the camera itself rather than the link
    pub fn is_device_failure(&self) -> bool {
        matches!(
            self,
            Self::DeviceRejected { .. } | Self::ProtocolMismatch { .. }
        )
    }
}
