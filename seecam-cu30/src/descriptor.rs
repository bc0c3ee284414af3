//! Command descriptor table for See3CAM_CU30
//!
//! One entry per supported operation. Parameter offsets are absolute
//! request offsets (the first parameter byte is 3); payload offsets are
//! absolute reply offsets (payload bytes are 2..=5, status is 6).

use crate::codec::{Descriptor, Field};
use crate::protocol::cmd;

pub const SET_SPECIAL_EFFECT: Descriptor =
    Descriptor::set(cmd::SET_SPECIAL_EFFECT, &[Field::u8("effect", 3)]);
pub const GET_SPECIAL_EFFECT: Descriptor =
    Descriptor::get(cmd::GET_SPECIAL_EFFECT, &[Field::u8("effect", 2)]);

pub const SET_DENOISE: Descriptor = Descriptor::set(cmd::SET_DENOISE, &[Field::u8("denoise", 3)]);
pub const GET_DENOISE: Descriptor = Descriptor::get(cmd::GET_DENOISE, &[Field::u8("denoise", 2)]);

pub const SET_SCENE_MODE: Descriptor =
    Descriptor::set(cmd::SET_SCENE_MODE, &[Field::u8("scene", 3)]);
pub const GET_SCENE_MODE: Descriptor =
    Descriptor::get(cmd::GET_SCENE_MODE, &[Field::u8("scene", 2)]);

/// Coordinates and window size are only meaningful in manual mode
pub const SET_EXP_ROI_MODE: Descriptor = Descriptor::set(
    cmd::SET_EXP_ROI_MODE,
    &[
        Field::u8("mode", 3),
        Field::u8("x", 4),
        Field::u8("y", 5),
        Field::u8("window_size", 6),
    ],
);
pub const GET_EXP_ROI_MODE: Descriptor = Descriptor::get(
    cmd::GET_EXP_ROI_MODE,
    &[Field::u8("mode", 2), Field::u8("window_size", 5)],
);

pub const SET_BURST_LENGTH: Descriptor =
    Descriptor::set(cmd::SET_BURST_LENGTH, &[Field::u8("burst_length", 3)]);
pub const GET_BURST_LENGTH: Descriptor =
    Descriptor::get(cmd::GET_BURST_LENGTH, &[Field::u8("burst_length", 2)]);

pub const SET_Q_FACTOR: Descriptor =
    Descriptor::set(cmd::SET_Q_FACTOR, &[Field::u8("q_factor", 3)]);
pub const GET_Q_FACTOR: Descriptor =
    Descriptor::get(cmd::GET_Q_FACTOR, &[Field::u8("q_factor", 2)]);

pub const SET_ORIENTATION: Descriptor =
    Descriptor::set(cmd::SET_ORIENTATION, &[Field::u8("flip", 3)]);
pub const GET_ORIENTATION: Descriptor =
    Descriptor::get(cmd::GET_ORIENTATION, &[Field::u8("flip", 2)]);

pub const SET_FRAME_RATE: Descriptor =
    Descriptor::set(cmd::SET_FRAME_RATE, &[Field::u8("frame_rate", 3)]);
pub const GET_FRAME_RATE: Descriptor =
    Descriptor::get(cmd::GET_FRAME_RATE, &[Field::u8("frame_rate", 2)]);

pub const SET_EXPOSURE_COMPENSATION: Descriptor = Descriptor::set(
    cmd::SET_EXPOSURE_COMPENSATION,
    &[Field::u32_be("exposure_compensation", 3)],
);
pub const GET_EXPOSURE_COMPENSATION: Descriptor = Descriptor::get(
    cmd::GET_EXPOSURE_COMPENSATION,
    &[Field::u32_be("exposure_compensation", 2)],
);

pub const SET_FACE_DETECT_RECT: Descriptor = Descriptor::set(
    cmd::SET_FACE_DETECT_RECT,
    &[
        Field::u8("face_rect", 3),
        Field::u8("embed_data", 4),
        Field::u8("overlay_rect", 5),
    ],
);
pub const GET_FACE_DETECT_RECT: Descriptor = Descriptor::get(
    cmd::GET_FACE_DETECT_RECT,
    &[
        Field::u8("face_rect", 2),
        Field::u8("embed_data", 3),
        Field::u8("overlay_rect", 4),
    ],
);

/// Offset 4 is unused in both directions
pub const SET_SMILE_DETECTION: Descriptor = Descriptor::set(
    cmd::SET_SMILE_DETECTION,
    &[Field::u8("smile_detect", 3), Field::u8("embed_data", 5)],
);
pub const GET_SMILE_DETECTION: Descriptor = Descriptor::get(
    cmd::GET_SMILE_DETECTION,
    &[Field::u8("smile_detect", 2), Field::u8("embed_data", 4)],
);

pub const SET_FLICKER_DETECTION: Descriptor =
    Descriptor::set(cmd::SET_FLICKER_DETECTION, &[Field::u8("flicker", 3)]);
pub const GET_FLICKER_DETECTION: Descriptor =
    Descriptor::get(cmd::GET_FLICKER_DETECTION, &[Field::u8("flicker", 2)]);

pub const SET_TO_DEFAULT: Descriptor = Descriptor::set(cmd::SET_TO_DEFAULT, &[]);

pub const ENABLE_DISABLE_FACE_RECTANGLE: Descriptor = Descriptor::set(
    cmd::ENABLE_DISABLE_FACE_RECTANGLE,
    &[Field::u8("face_rectangle", 3)],
);

pub const SET_FLASH_STATUS: Descriptor =
    Descriptor::set(cmd::SET_FLASH_STATUS, &[Field::u8("flash", 3)]);
pub const GET_FLASH_STATUS: Descriptor =
    Descriptor::get(cmd::GET_FLASH_STATUS, &[Field::u8("flash", 2)]);

/// Every supported operation
pub const ALL: &[Descriptor] = &[
    SET_SPECIAL_EFFECT,
    GET_SPECIAL_EFFECT,
    SET_DENOISE,
    GET_DENOISE,
    SET_SCENE_MODE,
    GET_SCENE_MODE,
    SET_EXP_ROI_MODE,
    GET_EXP_ROI_MODE,
    SET_BURST_LENGTH,
    GET_BURST_LENGTH,
    SET_Q_FACTOR,
    GET_Q_FACTOR,
    SET_ORIENTATION,
    GET_ORIENTATION,
    SET_FRAME_RATE,
    GET_FRAME_RATE,
    SET_EXPOSURE_COMPENSATION,
    GET_EXPOSURE_COMPENSATION,
    SET_FACE_DETECT_RECT,
    GET_FACE_DETECT_RECT,
    SET_SMILE_DETECTION,
    GET_SMILE_DETECTION,
    SET_FLICKER_DETECTION,
    GET_FLICKER_DETECTION,
    SET_TO_DEFAULT,
    ENABLE_DISABLE_FACE_RECTANGLE,
    SET_FLASH_STATUS,
    GET_FLASH_STATUS,
];

const _: () = {
    let mut i = 0;
    while i < ALL.len() {
        assert!(ALL[i].is_well_formed());
        i += 1;
    }
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::OpKind;
    use std::collections::HashSet;

    #[test]
    fn test_opcodes_unique() {
        let codes: HashSet<u8> = ALL.iter().map(|d| d.opcode()).collect();
        assert_eq!(codes.len(), ALL.len());
    }

    #[test]
    fn test_names_resolved() {
        assert!(ALL.iter().all(|d| d.name() != "UNKNOWN"));
    }

    #[test]
    fn test_kinds_match_shape() {
        for d in ALL {
            match d.kind() {
                OpKind::Set => assert!(d.payload().is_empty(), "{}", d.name()),
                OpKind::Get => assert!(d.params().is_empty(), "{}", d.name()),
            }
        }
    }
}
