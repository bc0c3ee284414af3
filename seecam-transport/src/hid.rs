//! hidapi transport for cameras attached over USB
//!
//! The camera exposes a vendor HID interface next to its UVC video interface.
//! Commands go out as 65-byte output reports (report ID 0 at byte 0) and the
//! reply comes back as an input report; hidraw strips the report ID, so the
//! echoed control group lands at offset 0 of the returned buffer.

use std::ffi::CString;

use hidapi::{HidApi, HidDevice};
use parking_lot::Mutex;
use tracing::debug;

use crate::error::TransportError;
use crate::protocol::{self, timing, Report, BUFFER_LENGTH, DUMP_LEN};
use crate::types::TransportDeviceInfo;
use crate::Transport;

/// HID transport for a camera's vendor interface
pub struct HidTransport {
    /// `None` once the handle has been closed
    device: Mutex<Option<HidDevice>>,
    info: TransportDeviceInfo,
    read_timeout_ms: i32,
}

impl HidTransport {
    /// Wrap an already opened HID device
    pub fn new(device: HidDevice, info: TransportDeviceInfo) -> Self {
        Self {
            device: Mutex::new(Some(device)),
            info,
            read_timeout_ms: timing::DEFAULT_READ_TIMEOUT_MS,
        }
    }

    /// Open a hidraw node by path (e.g. `/dev/hidraw3`)
    pub fn open_path(path: &str) -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        let c_path = CString::new(path)
            .map_err(|e| TransportError::Internal(format!("invalid device path: {e}")))?;
        let device = api.open_path(&c_path).map_err(|e| match e {
            hidapi::HidError::HidApiError { .. } => TransportError::DeviceNotFound(path.into()),
            other => other.into(),
        })?;
        let mut info = describe(&device);
        info.device_path = path.to_string();
        Ok(Self::new(device, info))
    }

    /// Open the first interface matching vendor/product ID
    pub fn open(vid: u16, pid: u16) -> Result<Self, TransportError> {
        let api = HidApi::new()?;
        let device = api.open(vid, pid).map_err(|_| {
            TransportError::DeviceNotFound(format!("{vid:04x}:{pid:04x}"))
        })?;
        let mut info = describe(&device);
        info.vid = vid;
        info.pid = pid;
        Ok(Self::new(device, info))
    }

    /// Set how long `transfer` waits for the reply (default 2000 ms)
    pub fn set_read_timeout(&mut self, ms: i32) {
        self.read_timeout_ms = ms;
    }
}

/// Collect identification strings from an open device
fn describe(device: &HidDevice) -> TransportDeviceInfo {
    let mut info = TransportDeviceInfo::default();
    if let Ok(dev) = device.get_device_info() {
        info.vid = dev.vendor_id();
        info.pid = dev.product_id();
        info.device_path = dev.path().to_string_lossy().into_owned();
    }
    info.product_name = device.get_product_string().ok().flatten();
    info.serial = device.get_serial_number_string().ok().flatten();
    info
}

impl Transport for HidTransport {
    fn is_open(&self) -> bool {
        self.device.lock().is_some()
    }

    fn transfer(&self, request: &Report) -> Result<Report, TransportError> {
        // Hold the lock across write and read so replies pair with requests
        let guard = self.device.lock();
        let device = guard.as_ref().ok_or(TransportError::Disconnected)?;

        debug!("HID write: {:02X?}", &request[..DUMP_LEN]);
        let written = device.write(request)?;
        if written < BUFFER_LENGTH - 1 {
            return Err(TransportError::ShortWrite {
                expected: BUFFER_LENGTH,
                written,
            });
        }

        let mut response = protocol::zeroed();
        let read = device.read_timeout(&mut response, self.read_timeout_ms)?;
        if read == 0 {
            return Err(TransportError::Timeout(self.read_timeout_ms));
        }
        debug!("HID read ({read} bytes): {:02X?}", &response[..DUMP_LEN]);
        Ok(response)
    }

    fn device_info(&self) -> &TransportDeviceInfo {
        &self.info
    }

    fn close(&self) -> Result<(), TransportError> {
        if self.device.lock().take().is_some() {
            debug!("Closed {}", self.info.display_name());
        }
        Ok(())
    }
}
