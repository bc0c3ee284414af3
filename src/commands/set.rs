//! Setting command handlers.

use super::CommandResult;
use crate::cli::{SetCommands, Toggle};
use seecam_cu30::{
    CameraError, Cu30Camera, FaceDetection, FrameSize, Orientation, RoiSelection, SmileDetection,
};

/// Apply one `set` subcommand and return a confirmation line
pub fn apply(camera: &Cu30Camera, setting: &SetCommands) -> Result<String, CameraError> {
    let msg = match setting {
        SetCommands::Effect { effect } => {
            camera.set_special_effect(*effect)?;
            format!("Special effect set to {effect}")
        }
        SetCommands::Denoise { level } => {
            camera.set_denoise(*level)?;
            format!("Denoise set to {level}")
        }
        SetCommands::Scene { scene } => {
            camera.set_scene_mode(*scene)?;
            format!("Scene mode set to {scene}")
        }
        SetCommands::Roi {
            mode,
            width,
            height,
            x,
            y,
            window,
        } => {
            let roi = RoiSelection {
                mode: *mode,
                frame: FrameSize::new(*width, *height),
                x: *x,
                y: *y,
                window_size: window.clone(),
            };
            camera.set_roi_auto_exposure(&roi)?;
            format!("ROI exposure set to {mode}")
        }
        SetCommands::Burst { length } => {
            camera.set_burst_length(*length)?;
            format!("Burst length set to {length}")
        }
        SetCommands::Qfactor { q } => {
            camera.set_q_factor(*q)?;
            format!("Q factor set to {q}")
        }
        SetCommands::Orientation {
            horizontal,
            vertical,
        } => {
            camera.set_orientation(Orientation::new(*horizontal, *vertical))?;
            format!("Orientation set (horizontal={horizontal}, vertical={vertical})")
        }
        SetCommands::Framerate { rate } => {
            camera.set_frame_rate(*rate)?;
            format!("Frame rate set to {rate}")
        }
        SetCommands::Exposure { value } => {
            camera.set_exposure_compensation(*value)?;
            format!("Exposure compensation set to {value} us")
        }
        SetCommands::Face {
            rect,
            embed,
            overlay,
        } => {
            camera.set_face_detection(FaceDetection {
                rectangle: rect.enabled(),
                embed_data: embed.enabled(),
                overlay_rect: overlay.enabled(),
            })?;
            "Face detection updated".to_string()
        }
        SetCommands::Smile { state, embed } => {
            camera.set_smile_detection(SmileDetection {
                enabled: state.enabled(),
                embed_data: embed.enabled(),
            })?;
            "Smile detection updated".to_string()
        }
        SetCommands::Flicker { mode } => {
            camera.set_flicker_mode(*mode)?;
            format!("Flicker mode set to {mode}")
        }
        SetCommands::Flash { mode } => {
            camera.set_flash_mode(*mode)?;
            format!("Flash set to {mode}")
        }
    };
    Ok(msg)
}

/// `set <control> ...`
pub fn set(camera: &Cu30Camera, setting: &SetCommands, json: bool) -> CommandResult {
    let msg = apply(camera, setting)?;
    if !json {
        println!("{msg}");
    }
    Ok(())
}

/// `reset`
pub fn reset(camera: &Cu30Camera, json: bool) -> CommandResult {
    camera.set_to_default()?;
    if !json {
        println!("Camera restored to factory defaults");
    }
    Ok(())
}

/// `face-rect <on|off>`
pub fn face_rect(camera: &Cu30Camera, state: Toggle, json: bool) -> CommandResult {
    camera.enable_face_rectangle(state.enabled())?;
    if !json {
        println!("Face rectangle {}", if state.enabled() { "shown" } else { "hidden" });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock_camera;
    use seecam_cu30::protocol::{cmd, status};
    use seecam_cu30::RoiExposureMode;
    use seecam_transport::mock::MockTransport;

    #[test]
    fn test_apply_roi_manual() {
        let (mock, camera) = mock_camera(MockTransport::echoing(status::SET_SUCCESS));
        let setting = SetCommands::Roi {
            mode: RoiExposureMode::Manual,
            width: 640,
            height: 480,
            x: 639,
            y: 0,
            window: "3".into(),
        };
        apply(&camera, &setting).unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(req[2], cmd::SET_EXP_ROI_MODE);
        assert_eq!(&req[3..7], &[RoiExposureMode::Manual.as_u8(), 255, 0, 3]);
    }

    #[test]
    fn test_apply_smile_offsets() {
        let (mock, camera) = mock_camera(MockTransport::echoing(status::SET_SUCCESS));
        let setting = SetCommands::Smile {
            state: Toggle::On,
            embed: Toggle::On,
        };
        apply(&camera, &setting).unwrap();
        let req = mock.last_request().unwrap();
        assert_eq!(&req[3..6], &[0x01, 0x00, 0x01]);
    }

    #[test]
    fn test_apply_exposure_out_of_range() {
        let (mock, camera) = mock_camera(MockTransport::echoing(status::SET_SUCCESS));
        let err = apply(&camera, &SetCommands::Exposure { value: 10 }).unwrap_err();
        assert!(matches!(err, CameraError::Validation { value: 10, .. }));
        assert_eq!(mock.transfer_count(), 0);
    }

    #[test]
    fn test_apply_rejected() {
        let (_, camera) = mock_camera(MockTransport::echoing(status::SET_FAIL));
        let err = apply(&camera, &SetCommands::Denoise { level: 3 }).unwrap_err();
        assert!(matches!(err, CameraError::DeviceRejected { .. }));
    }
}
