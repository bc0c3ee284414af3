//! Protocol constants for See3CAM_CU30 extension controls

/// Control group byte identifying the CU30 command set
pub const CAMERA_CONTROL_CU30: u8 = 0x76;

/// Request offsets (byte 0 is the HID report ID and stays zero)
pub mod request {
    pub const GROUP: usize = 1;
    pub const OPCODE: usize = 2;
    /// First parameter byte
    pub const PARAMS: usize = 3;
}

/// Response offsets
pub mod response {
    pub const GROUP: usize = 0;
    pub const OPCODE: usize = 1;
    /// First result payload byte
    pub const PAYLOAD: usize = 2;
    pub const STATUS: usize = 6;
}

/// Status byte values
pub mod status {
    pub const SET_FAIL: u8 = 0x00;
    pub const SET_SUCCESS: u8 = 0x01;
    pub const GET_FAIL: u8 = 0x00;
    pub const GET_SUCCESS: u8 = 0x01;
}

/// Operation codes within `CAMERA_CONTROL_CU30`
pub mod cmd {
    pub const GET_SCENE_MODE: u8 = 0x01;
    pub const SET_SCENE_MODE: u8 = 0x02;
    pub const GET_SPECIAL_EFFECT: u8 = 0x03;
    pub const SET_SPECIAL_EFFECT: u8 = 0x04;
    pub const GET_DENOISE: u8 = 0x05;
    pub const SET_DENOISE: u8 = 0x06;
    pub const GET_EXP_ROI_MODE: u8 = 0x07;
    pub const SET_EXP_ROI_MODE: u8 = 0x08;
    pub const GET_BURST_LENGTH: u8 = 0x0A;
    pub const SET_BURST_LENGTH: u8 = 0x0B;
    pub const GET_Q_FACTOR: u8 = 0x0C;
    pub const SET_Q_FACTOR: u8 = 0x0D;
    pub const GET_ORIENTATION: u8 = 0x0E;
    pub const SET_ORIENTATION: u8 = 0x0F;
    pub const GET_FRAME_RATE: u8 = 0x10;
    pub const SET_FRAME_RATE: u8 = 0x11;
    pub const GET_EXPOSURE_COMPENSATION: u8 = 0x12;
    pub const SET_EXPOSURE_COMPENSATION: u8 = 0x13;
    pub const GET_FACE_DETECT_RECT: u8 = 0x14;
    pub const SET_FACE_DETECT_RECT: u8 = 0x15;
    pub const GET_SMILE_DETECTION: u8 = 0x16;
    pub const SET_SMILE_DETECTION: u8 = 0x17;
    pub const ENABLE_DISABLE_FACE_RECTANGLE: u8 = 0x18;
    pub const GET_FLICKER_DETECTION: u8 = 0x19;
    pub const SET_FLICKER_DETECTION: u8 = 0x1A;
    pub const GET_FLASH_STATUS: u8 = 0x1B;
    pub const SET_FLASH_STATUS: u8 = 0x1C;
    pub const SET_TO_DEFAULT: u8 = 0xFF;

    /// Get human-readable name for an operation code
    pub const fn name(op: u8) -> &'static str {
        match op {
            GET_SCENE_MODE => "GET_SCENE_MODE",
            SET_SCENE_MODE => "SET_SCENE_MODE",
            GET_SPECIAL_EFFECT => "GET_SPECIAL_EFFECT",
            SET_SPECIAL_EFFECT => "SET_SPECIAL_EFFECT",
            GET_DENOISE => "GET_DENOISE",
            SET_DENOISE => "SET_DENOISE",
            GET_EXP_ROI_MODE => "GET_EXP_ROI_MODE",
            SET_EXP_ROI_MODE => "SET_EXP_ROI_MODE",
            GET_BURST_LENGTH => "GET_BURST_LENGTH",
            SET_BURST_LENGTH => "SET_BURST_LENGTH",
            GET_Q_FACTOR => "GET_Q_FACTOR",
            SET_Q_FACTOR => "SET_Q_FACTOR",
            GET_ORIENTATION => "GET_ORIENTATION",
            SET_ORIENTATION => "SET_ORIENTATION",
            GET_FRAME_RATE => "GET_FRAME_RATE",
            SET_FRAME_RATE => "SET_FRAME_RATE",
            GET_EXPOSURE_COMPENSATION => "GET_EXPOSURE_COMPENSATION",
            SET_EXPOSURE_COMPENSATION => "SET_EXPOSURE_COMPENSATION",
            GET_FACE_DETECT_RECT => "GET_FACE_DETECT_RECT",
            SET_FACE_DETECT_RECT => "SET_FACE_DETECT_RECT",
            GET_SMILE_DETECTION => "GET_SMILE_DETECTION",
            SET_SMILE_DETECTION => "SET_SMILE_DETECTION",
            ENABLE_DISABLE_FACE_RECTANGLE => "ENABLE_DISABLE_FACE_RECTANGLE",
            GET_FLICKER_DETECTION => "GET_FLICKER_DETECTION",
            SET_FLICKER_DETECTION => "SET_FLICKER_DETECTION",
            GET_FLASH_STATUS => "GET_FLASH_STATUS",
            SET_FLASH_STATUS => "SET_FLASH_STATUS",
            SET_TO_DEFAULT => "SET_TO_DEFAULT",
            _ => "UNKNOWN",
        }
    }
}

/// Enable/disable codes for the boolean sub-fields
pub mod flag {
    pub const ENABLE_FACE_RECT: u8 = 0x01;
    pub const DISABLE_FACE_RECT: u8 = 0x00;
    pub const ENABLE_EMBED_DATA: u8 = 0x01;
    pub const DISABLE_EMBED_DATA: u8 = 0x00;
    pub const ENABLE_OVERLAY_RECT: u8 = 0x01;
    pub const DISABLE_OVERLAY_RECT: u8 = 0x00;
    pub const ENABLE_SMILE_DETECT: u8 = 0x01;
    pub const DISABLE_SMILE_DETECT: u8 = 0x00;
    /// Face rectangle drawn on the preview (toggled around still capture)
    pub const ENABLE_FACE_RECTANGLE: u8 = 0x01;
    pub const DISABLE_FACE_RECTANGLE: u8 = 0x00;
}

/// Flip codes for SET/GET_ORIENTATION
pub mod orientation {
    pub const BOTH_FLIP_DISABLE: u8 = 0x00;
    pub const HORIZONTAL_FLIP: u8 = 0x01;
    pub const VERTICAL_FLIP: u8 = 0x02;
    pub const BOTH_FLIP_ENABLE: u8 = 0x03;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmd_names() {
        assert_eq!(cmd::name(cmd::SET_EXPOSURE_COMPENSATION), "SET_EXPOSURE_COMPENSATION");
        assert_eq!(cmd::name(0xEE), "UNKNOWN");
    }
}
