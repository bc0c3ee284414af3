//! Query (read-only) command handlers.

use super::{print_readings, CommandResult, Reading};
use crate::cli::Control;
use seecam_cu30::Cu30Camera;
use seecam_transport::Transport;
use tracing::warn;

fn on_off(b: bool) -> &'static str {
    if b {
        "on"
    } else {
        "off"
    }
}

/// Read one control
pub fn read(camera: &Cu30Camera, control: Control) -> anyhow::Result<Reading> {
    let reading = match control {
        Control::Effect => {
            let v = camera.get_special_effect()?;
            Reading::new("effect", v, format!("Special effect: {v}"))?
        }
        Control::Denoise => {
            let v = camera.get_denoise()?;
            Reading::new("denoise", v, format!("Denoise:        {v}"))?
        }
        Control::Scene => {
            let v = camera.get_scene_mode()?;
            Reading::new("scene", v, format!("Scene mode:     {v}"))?
        }
        Control::Roi => {
            let v = camera.get_roi_auto_exposure()?;
            Reading::new(
                "roi",
                v,
                format!("ROI exposure:   {} (window {})", v.mode, v.window_size),
            )?
        }
        Control::Burst => {
            let v = camera.get_burst_length()?;
            Reading::new("burst", v, format!("Burst length:   {v}"))?
        }
        Control::Qfactor => {
            let v = camera.get_q_factor()?;
            Reading::new("qfactor", v, format!("Q factor:       {v}"))?
        }
        Control::Orientation => {
            let v = camera.get_orientation()?;
            Reading::new("orientation", v, format!("Orientation:    {v}"))?
        }
        Control::Framerate => {
            let v = camera.get_frame_rate()?;
            Reading::new("framerate", v, format!("Frame rate:     {v}"))?
        }
        Control::Exposure => {
            let v = camera.get_exposure_compensation()?;
            Reading::new("exposure", v, format!("Exposure comp:  {v} us"))?
        }
        Control::Face => {
            let v = camera.get_face_detection()?;
            Reading::new(
                "face",
                v,
                format!(
                    "Face detect:    rect={} embed={} overlay={}",
                    on_off(v.rectangle),
                    on_off(v.embed_data),
                    on_off(v.overlay_rect)
                ),
            )?
        }
        Control::Smile => {
            let v = camera.get_smile_detection()?;
            Reading::new(
                "smile",
                v,
                format!(
                    "Smile detect:   {} embed={}",
                    on_off(v.enabled),
                    on_off(v.embed_data)
                ),
            )?
        }
        Control::Flicker => {
            let v = camera.get_flicker_mode()?;
            Reading::new("flicker", v, format!("Flicker:        {v}"))?
        }
        Control::Flash => {
            let v = camera.get_flash_mode()?;
            Reading::new("flash", v, format!("Flash:          {v}"))?
        }
        Control::All => anyhow::bail!("`all` is not a single control"),
    };
    Ok(reading)
}

/// Read every control, skipping the ones that fail
pub fn read_all(camera: &Cu30Camera) -> Vec<Reading> {
    Control::EACH
        .iter()
        .filter_map(|&control| match read(camera, control) {
            Ok(r) => Some(r),
            Err(e) => {
                warn!("{control:?}: {e}");
                None
            }
        })
        .collect()
}

/// `get <control>`
pub fn get(camera: &Cu30Camera, control: Control, json: bool) -> CommandResult {
    let readings = if control == Control::All {
        read_all(camera)
    } else {
        vec![read(camera, control)?]
    };
    print_readings(&readings, json)
}

/// `info`
pub fn info(camera: &Cu30Camera, json: bool) -> CommandResult {
    let info = camera.transport().device_info();
    if json {
        println!("{}", serde_json::to_string_pretty(info)?);
    } else {
        println!("Camera:  {}", info.display_name());
        println!("ID:      {:04x}:{:04x}", info.vid, info.pid);
        println!("Path:    {}", info.device_path);
        if let Some(serial) = &info.serial {
            println!("Serial:  {serial}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::mock_camera;
    use seecam_cu30::protocol::status;
    use seecam_transport::mock::MockTransport;

    #[test]
    fn test_read_exposure() {
        let (_, camera) = mock_camera(MockTransport::echoing_with_payload(
            status::GET_SUCCESS,
            [0x00, 0x01, 0x86, 0xA0],
        ));
        let r = read(&camera, Control::Exposure).unwrap();
        assert_eq!(r.control, "exposure");
        assert_eq!(r.value, serde_json::json!(100_000));
        assert!(r.text.contains("100000"));
    }

    #[test]
    fn test_read_face_composite() {
        let (mock, camera) = mock_camera(MockTransport::echoing_with_payload(
            status::GET_SUCCESS,
            [0x01, 0x00, 0x01, 0x00],
        ));
        let r = read(&camera, Control::Face).unwrap();
        assert_eq!(
            r.value,
            serde_json::json!({"rectangle": true, "embed_data": false, "overlay_rect": true})
        );
        assert_eq!(mock.transfer_count(), 1);
    }

    #[test]
    fn test_read_all_skips_failures() {
        // Unlisted codes are readings too
        let (mock, camera) = mock_camera(MockTransport::echoing_with_payload(
            status::GET_SUCCESS,
            [0x55; 4],
        ));
        let readings = read_all(&camera);
        assert_eq!(readings.len(), Control::EACH.len());
        assert_eq!(mock.transfer_count(), Control::EACH.len());
        let effect = readings.iter().find(|r| r.control == "effect").unwrap();
        assert_eq!(effect.text, "Special effect: unknown (0x55)");

        let (_, camera) = mock_camera(MockTransport::echoing(status::GET_FAIL));
        assert!(read_all(&camera).is_empty());
    }

    #[test]
    fn test_all_is_not_single() {
        let (mock, camera) = mock_camera(MockTransport::echoing(status::GET_SUCCESS));
        assert!(read(&camera, Control::All).is_err());
        assert_eq!(mock.transfer_count(), 0);
    }
}
