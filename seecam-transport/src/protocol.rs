//! Report framing constants shared by every See3CAM HID command

/// Length of every report exchanged with the camera (report ID + 64 data bytes)
pub const BUFFER_LENGTH: usize = 65;

/// A single fixed-length HID report
pub type Report = [u8; BUFFER_LENGTH];

/// Allocate a zero-filled report
#[inline]
pub const fn zeroed() -> Report {
    [0u8; BUFFER_LENGTH]
}

/// Number of leading bytes shown in debug dumps; the protocol never uses more
pub const DUMP_LEN: usize = 8;

/// Transport timing
pub mod timing {
    /// Default time to wait for the input report after a write (ms)
    pub const DEFAULT_READ_TIMEOUT_MS: i32 = 2000;
}

/// Device identification constants
pub mod device {
    /// e-con Systems vendor ID
    pub const VENDOR_ID: u16 = 0x2560;

    /// See3CAM_CU30 product ID
    pub const PID_SEE3CAM_CU30: u16 = 0xC130;
}
