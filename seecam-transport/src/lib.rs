//! Transport layer for e-con See3CAM camera control
//!
//! The camera's extension controls are driven over a vendor HID interface
//! with a strict request/response discipline: one fixed-length output report
//! in, one fixed-length input report back. This crate owns that exchange and
//! nothing else; encoding and validation of the report contents live in the
//! device crates.
//!
//! - [`HidTransport`]: hidapi-backed transport for a real camera
//! - [`mock::MockTransport`]: scripted transport for tests (feature `mock`)

pub mod error;
pub mod protocol;
pub mod types;

mod hid;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use error::TransportError;
pub use hid::HidTransport;
pub use protocol::{Report, BUFFER_LENGTH};
pub use types::TransportDeviceInfo;

/// The core transport trait - all backends implement this
///
/// Exchanges are blocking and strictly one request to one reply. Callers
/// must not overlap exchanges on the same handle; backends serialize
/// internally so a reply is never paired with another caller's request.
pub trait Transport: Send + Sync {
    /// Check whether the handle is still usable
    fn is_open(&self) -> bool;

    /// Send one report and wait for the device's reply
    ///
    /// # Returns
    /// The full input report, zero-padded to [`BUFFER_LENGTH`]
    fn transfer(&self, request: &Report) -> Result<Report, TransportError>;

    /// Get device information
    fn device_info(&self) -> &TransportDeviceInfo;

    /// Release the handle; `is_open` reports false afterwards
    fn close(&self) -> Result<(), TransportError>;
}
