//! Camera settings types
//!
//! Typed values for the extension controls and their wire codes. Each enum
//! mirrors one byte in the request/reply; composite settings convert to and
//! from the positional values used by [`crate::codec`].
//!
//! The camera is the authority on which codes exist. A byte outside the
//! tables below decodes to `Unknown(byte)` and can be sent back unchanged.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::codec::Payload;
use crate::protocol::{flag, orientation};

/// Parse a raw code given as decimal or `0x`-prefixed hex
fn parse_code(s: &str) -> Option<u8> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// One-byte enumerated setting with an escape hatch for unlisted codes
macro_rules! code_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $text:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
            /// Code not in the table, as reported by the camera
            Unknown(u8),
        }

        impl $name {
            /// Every listed code
            pub const ALL: &'static [$name] = &[$($name::$variant),*];

            pub fn as_u8(self) -> u8 {
                match self {
                    $($name::$variant => $code,)*
                    $name::Unknown(v) => v,
                }
            }

            pub fn from_u8(v: u8) -> Self {
                match v {
                    $($code => $name::$variant,)*
                    other => $name::Unknown(other),
                }
            }

            pub fn is_known(self) -> bool {
                !matches!(self, $name::Unknown(_))
            }

            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)*
                    $name::Unknown(_) => "unknown",
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self {
                    $name::Unknown(v) => write!(f, "unknown (0x{v:02X})"),
                    known => f.write_str(known.as_str()),
                }
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let lower = s.to_ascii_lowercase();
                if let Some(v) = Self::ALL.iter().copied().find(|v| v.as_str() == lower) {
                    return Ok(v);
                }
                parse_code(&lower).map(Self::from_u8).ok_or_else(|| {
                    let names: Vec<_> = Self::ALL.iter().map(|v| v.as_str()).collect();
                    format!(
                        "unknown value \"{s}\". Use one of: {} or a raw code",
                        names.join(", ")
                    )
                })
            }
        }
    };
}

code_enum! {
    /// Special effect applied by the ISP
    pub enum SpecialEffect {
        Normal = 0x01 => "normal",
        BlackWhite = 0x04 => "black-white",
        Grayscale = 0x07 => "grayscale",
        Negative = 0x08 => "negative",
        Sketch = 0x10 => "sketch",
    }
}

code_enum! {
    /// Scene preset
    pub enum SceneMode {
        Normal = 0x01 => "normal",
        Document = 0x0C => "document",
    }
}

code_enum! {
    /// Region used by auto exposure metering
    pub enum RoiExposureMode {
        /// Meter over the full frame
        Full = 0x01 => "full",
        /// Meter around a user-selected point
        Manual = 0x02 => "manual",
        Disabled = 0x03 => "disabled",
    }
}

code_enum! {
    /// Mains flicker compensation
    pub enum FlickerMode {
        Auto = 0x00 => "auto",
        Hz50 = 0x01 => "50hz",
        Hz60 = 0x02 => "60hz",
        Disabled = 0x03 => "disabled",
    }
}

code_enum! {
    /// Flash output
    pub enum FlashMode {
        Off = 0x00 => "off",
        Torch = 0x01 => "torch",
        Strobe = 0x02 => "strobe",
    }
}

// =============================================================================
// Orientation
// =============================================================================

/// Horizontal / vertical flip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Orientation {
    #[default]
    Unflipped,
    Horizontal,
    Vertical,
    Both,
    /// Flip code not in the table, as reported by the camera
    Unknown(u8),
}

impl Orientation {
    /// Orientation for a pair of flip switches
    pub const fn new(horizontal: bool, vertical: bool) -> Self {
        match (horizontal, vertical) {
            (true, true) => Self::Both,
            (true, false) => Self::Horizontal,
            (false, true) => Self::Vertical,
            (false, false) => Self::Unflipped,
        }
    }

    /// Flip code sent to the camera
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::Both => orientation::BOTH_FLIP_ENABLE,
            Self::Horizontal => orientation::HORIZONTAL_FLIP,
            Self::Vertical => orientation::VERTICAL_FLIP,
            Self::Unflipped => orientation::BOTH_FLIP_DISABLE,
            Self::Unknown(v) => v,
        }
    }

    pub const fn from_u8(code: u8) -> Self {
        match code {
            orientation::BOTH_FLIP_ENABLE => Self::Both,
            orientation::HORIZONTAL_FLIP => Self::Horizontal,
            orientation::VERTICAL_FLIP => Self::Vertical,
            orientation::BOTH_FLIP_DISABLE => Self::Unflipped,
            other => Self::Unknown(other),
        }
    }

    /// Mirrored left/right; false for unknown codes
    pub const fn horizontal(self) -> bool {
        matches!(self, Self::Horizontal | Self::Both)
    }

    /// Upside down; false for unknown codes
    pub const fn vertical(self) -> bool {
        matches!(self, Self::Vertical | Self::Both)
    }

    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unknown(v) => write!(f, "unknown (0x{v:02X})"),
            o => write!(
                f,
                "horizontal={} vertical={}",
                if o.horizontal() { "on" } else { "off" },
                if o.vertical() { "on" } else { "off" }
            ),
        }
    }
}

// =============================================================================
// Face / smile detection
// =============================================================================

/// Face detection switches, read and written together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FaceDetection {
    /// Face detection rectangle
    pub rectangle: bool,
    /// Embed detection data in the frame
    pub embed_data: bool,
    /// Overlay the rectangle on the video
    pub overlay_rect: bool,
}

impl FaceDetection {
    pub fn to_params(self) -> [u32; 3] {
        [
            pick(self.rectangle, flag::ENABLE_FACE_RECT, flag::DISABLE_FACE_RECT),
            pick(self.embed_data, flag::ENABLE_EMBED_DATA, flag::DISABLE_EMBED_DATA),
            pick(
                self.overlay_rect,
                flag::ENABLE_OVERLAY_RECT,
                flag::DISABLE_OVERLAY_RECT,
            ),
        ]
    }

    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            rectangle: payload.byte(0) == flag::ENABLE_FACE_RECT,
            embed_data: payload.byte(1) == flag::ENABLE_EMBED_DATA,
            overlay_rect: payload.byte(2) == flag::ENABLE_OVERLAY_RECT,
        }
    }
}

/// Smile detection switches, read and written together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SmileDetection {
    pub enabled: bool,
    pub embed_data: bool,
}

impl SmileDetection {
    pub fn to_params(self) -> [u32; 2] {
        [
            pick(
                self.enabled,
                flag::ENABLE_SMILE_DETECT,
                flag::DISABLE_SMILE_DETECT,
            ),
            pick(self.embed_data, flag::ENABLE_EMBED_DATA, flag::DISABLE_EMBED_DATA),
        ]
    }

    pub fn from_payload(payload: &Payload) -> Self {
        Self {
            enabled: payload.byte(0) == flag::ENABLE_SMILE_DETECT,
            embed_data: payload.byte(1) == flag::ENABLE_EMBED_DATA,
        }
    }
}

fn pick(on: bool, enable: u8, disable: u8) -> u32 {
    u32::from(if on { enable } else { disable })
}

// =============================================================================
// ROI auto exposure
// =============================================================================

/// Preview frame dimensions in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameSize {
    pub width: u32,
    pub height: u32,
}

impl FrameSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Map a preview coordinate onto the camera's 0-255 grid
///
/// `value / (extent - 1) * 255`, truncated. Values past the frame edge
/// saturate at 255; a frame of one pixel or less maps everything to 0.
pub fn map_coordinate(value: u32, extent: u32) -> u8 {
    if extent <= 1 {
        return 0;
    }
    let scaled = f64::from(value) / f64::from(extent - 1) * 255.0;
    // float-to-int `as` saturates
    scaled as u8
}

/// Parse the window size as typed by the user
///
/// Un-parseable input becomes 0 and values above 255 keep their low byte,
/// the same as the integer-to-byte assignment the camera firmware expects.
pub fn parse_window_size(text: &str) -> u8 {
    match text.trim().parse::<u32>() {
        Ok(v) => v as u8,
        Err(_) => {
            warn!("Window size {text:?} is not a number; sending 0");
            0
        }
    }
}

/// A request to change the ROI auto-exposure mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoiSelection {
    pub mode: RoiExposureMode,
    pub frame: FrameSize,
    /// Selected point in preview pixels
    pub x: u32,
    pub y: u32,
    /// Window size as entered (decimal)
    pub window_size: String,
}

impl RoiSelection {
    /// Non-manual mode; coordinates and window stay zero on the wire
    pub fn mode_only(mode: RoiExposureMode) -> Self {
        Self {
            mode,
            frame: FrameSize::new(0, 0),
            x: 0,
            y: 0,
            window_size: String::new(),
        }
    }

    /// Manual metering around `(x, y)` in a preview of `frame`
    pub fn manual(frame: FrameSize, x: u32, y: u32, window_size: impl Into<String>) -> Self {
        Self {
            mode: RoiExposureMode::Manual,
            frame,
            x,
            y,
            window_size: window_size.into(),
        }
    }

    /// Positional values for mode, x, y, window size
    pub fn to_params(&self) -> [u32; 4] {
        let mode = u32::from(self.mode.as_u8());
        if self.mode != RoiExposureMode::Manual {
            return [mode, 0, 0, 0];
        }
        [
            mode,
            u32::from(map_coordinate(self.x, self.frame.width)),
            u32::from(map_coordinate(self.y, self.frame.height)),
            u32::from(parse_window_size(&self.window_size)),
        ]
    }
}

/// ROI auto-exposure state as reported by the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoiAutoExposure {
    pub mode: RoiExposureMode,
    pub window_size: u8,
}

/// Outcome of a status-reporting command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome {
    Success,
    Failure,
}

impl Outcome {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Failure => "Failure",
        }
    }
}

/// Human-readable status for UI display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandStatus {
    pub outcome: Outcome,
    pub message: String,
}

impl CommandStatus {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            outcome: Outcome::Failure,
            message: message.into(),
        }
    }
}

impl fmt::Display for CommandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.outcome.as_str(), self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_coordinate_corners() {
        assert_eq!(map_coordinate(639, 640), 255);
        assert_eq!(map_coordinate(479, 480), 255);
        assert_eq!(map_coordinate(0, 640), 0);
        assert_eq!(map_coordinate(0, 480), 0);
    }

    #[test]
    fn test_map_coordinate_truncates() {
        // 320 / 639 * 255 = 127.7, 240 / 479 * 255 = 127.8
        assert_eq!(map_coordinate(320, 640), 127);
        assert_eq!(map_coordinate(240, 480), 127);
    }

    #[test]
    fn test_map_coordinate_degenerate_frames() {
        assert_eq!(map_coordinate(5, 1), 0);
        assert_eq!(map_coordinate(5, 0), 0);
        assert_eq!(map_coordinate(10_000, 640), 255);
    }

    #[test]
    fn test_parse_window_size() {
        assert_eq!(parse_window_size("4"), 4);
        assert_eq!(parse_window_size(" 8 "), 8);
        assert_eq!(parse_window_size("abc"), 0);
        assert_eq!(parse_window_size(""), 0);
        assert_eq!(parse_window_size("-1"), 0);
        assert_eq!(parse_window_size("300"), 44);
    }

    #[test]
    fn test_roi_non_manual_leaves_coordinates_zero() {
        let mut sel = RoiSelection::manual(FrameSize::new(640, 480), 639, 479, "5");
        sel.mode = RoiExposureMode::Full;
        assert_eq!(sel.to_params(), [u32::from(RoiExposureMode::Full.as_u8()), 0, 0, 0]);
    }

    #[test]
    fn test_roi_manual_params() {
        let sel = RoiSelection::manual(FrameSize::new(640, 480), 639, 479, "5");
        assert_eq!(
            sel.to_params(),
            [u32::from(RoiExposureMode::Manual.as_u8()), 255, 255, 5]
        );
    }

    #[test]
    fn test_orientation_truth_table() {
        let codes = [
            Orientation::new(true, true).as_u8(),
            Orientation::new(true, false).as_u8(),
            Orientation::new(false, true).as_u8(),
            Orientation::new(false, false).as_u8(),
        ];
        assert_eq!(
            codes,
            [
                orientation::BOTH_FLIP_ENABLE,
                orientation::HORIZONTAL_FLIP,
                orientation::VERTICAL_FLIP,
                orientation::BOTH_FLIP_DISABLE,
            ]
        );
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
        for code in codes {
            let o = Orientation::from_u8(code);
            assert!(o.is_known());
            assert_eq!(o.as_u8(), code);
            assert_eq!(Orientation::new(o.horizontal(), o.vertical()), o);
        }
    }

    #[test]
    fn test_orientation_unlisted_code_kept() {
        let o = Orientation::from_u8(0x42);
        assert_eq!(o, Orientation::Unknown(0x42));
        assert_eq!(o.as_u8(), 0x42);
        assert!(!o.horizontal() && !o.vertical());
        assert_eq!(o.to_string(), "unknown (0x42)");
    }

    #[test]
    fn test_enum_codes() {
        assert_eq!(SpecialEffect::from_u8(0x07), SpecialEffect::Grayscale);
        assert_eq!(FlickerMode::from_u8(0x00), FlickerMode::Auto);
        assert_eq!(FlashMode::from_u8(0x02), FlashMode::Strobe);
        assert_eq!(SceneMode::from_u8(0x0C), SceneMode::Document);
        assert_eq!(RoiExposureMode::from_u8(0x02), RoiExposureMode::Manual);
        for e in SpecialEffect::ALL {
            assert_eq!(SpecialEffect::from_u8(e.as_u8()), *e);
        }
    }

    #[test]
    fn test_unlisted_codes_round_trip() {
        let effect = SpecialEffect::from_u8(0x03);
        assert_eq!(effect, SpecialEffect::Unknown(0x03));
        assert!(!effect.is_known());
        assert_eq!(effect.as_u8(), 0x03);
        assert_eq!(effect.to_string(), "unknown (0x03)");
        assert_eq!(FlashMode::from_u8(0x03), FlashMode::Unknown(0x03));
        assert_eq!(FlickerMode::from_u8(0xFF).as_u8(), 0xFF);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("Sketch".parse::<SpecialEffect>(), Ok(SpecialEffect::Sketch));
        assert_eq!("60hz".parse::<FlickerMode>(), Ok(FlickerMode::Hz60));
        assert_eq!("0x10".parse::<SpecialEffect>(), Ok(SpecialEffect::Sketch));
        assert_eq!("3".parse::<FlashMode>(), Ok(FlashMode::Unknown(3)));
        assert!("sepia".parse::<SpecialEffect>().is_err());
        assert!("0x1FF".parse::<SpecialEffect>().is_err());
    }

    #[test]
    fn test_face_detection_params() {
        let face = FaceDetection {
            rectangle: true,
            embed_data: false,
            overlay_rect: true,
        };
        assert_eq!(
            face.to_params(),
            [
                u32::from(flag::ENABLE_FACE_RECT),
                u32::from(flag::DISABLE_EMBED_DATA),
                u32::from(flag::ENABLE_OVERLAY_RECT)
            ]
        );
    }
}
