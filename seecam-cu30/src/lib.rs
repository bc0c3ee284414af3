//! High-level control interface for the e-con See3CAM_CU30
//!
//! Every extension control is a single report exchange described by a
//! [`codec::Descriptor`]. [`Cu30Camera`] wraps any [`Transport`] and exposes
//! one typed method per control; all of them funnel through
//! [`Cu30Camera::execute`].

pub mod codec;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod protocol;
pub mod settings;

pub use codec::{Descriptor, Payload};
pub use config::{CameraConfig, Range};
pub use error::{CameraError, Mismatch};
pub use settings::{
    CommandStatus, FaceDetection, FlashMode, FlickerMode, FrameSize, Orientation, Outcome,
    RoiAutoExposure, RoiExposureMode, RoiSelection, SceneMode, SmileDetection, SpecialEffect,
};

use std::sync::Arc;

use seecam_transport::Transport;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::protocol::flag;

const EXPOSURE_INVALID: &str = "Given exposure compensation value is invalid";
const EXPOSURE_SET_FAILED: &str = "Failed to set exposure compensation value";
const EXPOSURE_SET_OK: &str = "Exposure compensation value is set successfully";

/// See3CAM_CU30 extension controls over any transport
///
/// Calls block until the camera answers. The transport serializes
/// exchanges, so a shared camera never pairs a reply with the wrong request.
pub struct Cu30Camera {
    transport: Arc<dyn Transport>,
    config: CameraConfig,
    status_tx: Option<UnboundedSender<CommandStatus>>,
}

impl Cu30Camera {
    /// Create a camera interface with default limits
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self::with_config(transport, CameraConfig::default())
    }

    pub fn with_config(transport: Arc<dyn Transport>, config: CameraConfig) -> Self {
        Self {
            transport,
            config,
            status_tx: None,
        }
    }

    /// Deliver human-readable status events to `tx`
    pub fn with_status_sender(mut self, tx: UnboundedSender<CommandStatus>) -> Self {
        self.status_tx = Some(tx);
        self
    }

    /// Get the underlying transport
    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Run one operation: encode, exchange, validate, decode
    ///
    /// A closed handle fails before any report is built.
    pub fn execute(&self, desc: &Descriptor, params: &[u32]) -> Result<Payload, CameraError> {
        if !self.transport.is_open() {
            return Err(CameraError::TransportUnavailable);
        }
        let request = codec::encode(desc, params);
        debug!("{} params={:?}", desc.name(), params);
        let reply = self.transport.transfer(&request)?;
        let payload = codec::decode(desc, &reply)?;
        if !payload.is_empty() {
            debug!("{} -> {:?}", desc.name(), payload.values());
        }
        Ok(payload)
    }

    fn set(&self, desc: &Descriptor, params: &[u32]) -> Result<(), CameraError> {
        self.execute(desc, params).map(|_| ())
    }

    fn get_byte(&self, desc: &Descriptor) -> Result<u8, CameraError> {
        self.execute(desc, &[]).map(|p| p.byte(0))
    }

    fn notify(&self, status: CommandStatus) {
        if let Some(tx) = &self.status_tx {
            // receiver may be gone; status is advisory
            let _ = tx.send(status);
        }
    }

    // === Image ===

    pub fn set_special_effect(&self, effect: SpecialEffect) -> Result<(), CameraError> {
        self.set(&descriptor::SET_SPECIAL_EFFECT, &[u32::from(effect.as_u8())])
    }

    pub fn get_special_effect(&self) -> Result<SpecialEffect, CameraError> {
        self.get_byte(&descriptor::GET_SPECIAL_EFFECT)
            .map(SpecialEffect::from_u8)
    }

    pub fn set_denoise(&self, level: u8) -> Result<(), CameraError> {
        self.set(&descriptor::SET_DENOISE, &[u32::from(level)])
    }

    pub fn get_denoise(&self) -> Result<u8, CameraError> {
        self.get_byte(&descriptor::GET_DENOISE)
    }

    pub fn set_scene_mode(&self, scene: SceneMode) -> Result<(), CameraError> {
        self.set(&descriptor::SET_SCENE_MODE, &[u32::from(scene.as_u8())])
    }

    pub fn get_scene_mode(&self) -> Result<SceneMode, CameraError> {
        self.get_byte(&descriptor::GET_SCENE_MODE)
            .map(SceneMode::from_u8)
    }

    pub fn set_orientation(&self, orientation: Orientation) -> Result<(), CameraError> {
        self.set(
            &descriptor::SET_ORIENTATION,
            &[u32::from(orientation.as_u8())],
        )
    }

    pub fn get_orientation(&self) -> Result<Orientation, CameraError> {
        self.get_byte(&descriptor::GET_ORIENTATION)
            .map(Orientation::from_u8)
    }

    // === Exposure ===

    /// Set the auto-exposure metering region
    ///
    /// In manual mode the point is mapped onto the camera's 0-255 grid and
    /// the window size is parsed from its text form; other modes send zeros.
    pub fn set_roi_auto_exposure(&self, roi: &RoiSelection) -> Result<(), CameraError> {
        self.set(&descriptor::SET_EXP_ROI_MODE, &roi.to_params())
    }

    pub fn get_roi_auto_exposure(&self) -> Result<RoiAutoExposure, CameraError> {
        let payload = self.execute(&descriptor::GET_EXP_ROI_MODE, &[])?;
        Ok(RoiAutoExposure {
            mode: RoiExposureMode::from_u8(payload.byte(0)),
            window_size: payload.byte(1),
        })
    }

    /// Set exposure compensation
    ///
    /// The value is checked against the configured range before the handle
    /// is looked at. Status events report the range check, a device
    /// rejection, and success.
    pub fn set_exposure_compensation(&self, value: u32) -> Result<(), CameraError> {
        let range = self.config.exposure_compensation;
        if !range.contains(value) {
            self.notify(CommandStatus::failure(EXPOSURE_INVALID));
            return Err(CameraError::Validation {
                parameter: "exposure compensation",
                value,
                min: range.min,
                max: range.max,
            });
        }

        let result = self.set(&descriptor::SET_EXPOSURE_COMPENSATION, &[value]);
        match &result {
            Ok(()) => self.notify(CommandStatus::success(EXPOSURE_SET_OK)),
            Err(CameraError::DeviceRejected { .. }) => {
                self.notify(CommandStatus::failure(EXPOSURE_SET_FAILED))
            }
            Err(_) => {}
        }
        result
    }

    pub fn get_exposure_compensation(&self) -> Result<u32, CameraError> {
        self.execute(&descriptor::GET_EXPOSURE_COMPENSATION, &[])
            .map(|p| p.value(0))
    }

    pub fn set_flicker_mode(&self, mode: FlickerMode) -> Result<(), CameraError> {
        self.set(&descriptor::SET_FLICKER_DETECTION, &[u32::from(mode.as_u8())])
    }

    pub fn get_flicker_mode(&self) -> Result<FlickerMode, CameraError> {
        self.get_byte(&descriptor::GET_FLICKER_DETECTION)
            .map(FlickerMode::from_u8)
    }

    // === Capture ===

    pub fn set_burst_length(&self, length: u8) -> Result<(), CameraError> {
        self.set(&descriptor::SET_BURST_LENGTH, &[u32::from(length)])
    }

    pub fn get_burst_length(&self) -> Result<u8, CameraError> {
        self.get_byte(&descriptor::GET_BURST_LENGTH)
    }

    /// JPEG quality factor
    pub fn set_q_factor(&self, q: u8) -> Result<(), CameraError> {
        self.set(&descriptor::SET_Q_FACTOR, &[u32::from(q)])
    }

    pub fn get_q_factor(&self) -> Result<u8, CameraError> {
        self.get_byte(&descriptor::GET_Q_FACTOR)
    }

    /// Frame rate control value, interpreted by the camera
    pub fn set_frame_rate(&self, rate: u8) -> Result<(), CameraError> {
        self.set(&descriptor::SET_FRAME_RATE, &[u32::from(rate)])
    }

    pub fn get_frame_rate(&self) -> Result<u8, CameraError> {
        self.get_byte(&descriptor::GET_FRAME_RATE)
    }

    pub fn set_flash_mode(&self, mode: FlashMode) -> Result<(), CameraError> {
        self.set(&descriptor::SET_FLASH_STATUS, &[u32::from(mode.as_u8())])
    }

    pub fn get_flash_mode(&self) -> Result<FlashMode, CameraError> {
        self.get_byte(&descriptor::GET_FLASH_STATUS)
            .map(FlashMode::from_u8)
    }

    // === Detection ===

    pub fn set_face_detection(&self, face: FaceDetection) -> Result<(), CameraError> {
        self.set(&descriptor::SET_FACE_DETECT_RECT, &face.to_params())
    }

    /// Read all three face detection switches in one exchange
    pub fn get_face_detection(&self) -> Result<FaceDetection, CameraError> {
        self.execute(&descriptor::GET_FACE_DETECT_RECT, &[])
            .map(|p| FaceDetection::from_payload(&p))
    }

    pub fn set_smile_detection(&self, smile: SmileDetection) -> Result<(), CameraError> {
        self.set(&descriptor::SET_SMILE_DETECTION, &smile.to_params())
    }

    pub fn get_smile_detection(&self) -> Result<SmileDetection, CameraError> {
        self.execute(&descriptor::GET_SMILE_DETECTION, &[])
            .map(|p| SmileDetection::from_payload(&p))
    }

    /// Show or hide the face rectangle overlay
    ///
    /// Hosts turn it off around still capture so it is not burned into the image.
    pub fn enable_face_rectangle(&self, enable: bool) -> Result<(), CameraError> {
        let code = if enable {
            flag::ENABLE_FACE_RECTANGLE
        } else {
            flag::DISABLE_FACE_RECTANGLE
        };
        self.set(&descriptor::ENABLE_DISABLE_FACE_RECTANGLE, &[u32::from(code)])
    }

    // === Device ===

    /// Restore factory defaults for every extension control
    pub fn set_to_default(&self) -> Result<(), CameraError> {
        self.set(&descriptor::SET_TO_DEFAULT, &[])
    }

    /// Release the camera handle
    pub fn close(&self) -> Result<(), CameraError> {
        self.transport.close().map_err(CameraError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seecam_transport::mock::MockTransport;

    #[test]
    fn test_execute_writes_header() {
        let mock = Arc::new(MockTransport::echoing(protocol::status::SET_SUCCESS));
        let cam = Cu30Camera::new(mock.clone());
        cam.set_denoise(9).unwrap();

        let req = mock.last_request().unwrap();
        assert_eq!(req[0], 0);
        assert_eq!(req[1], protocol::CAMERA_CONTROL_CU30);
        assert_eq!(req[2], protocol::cmd::SET_DENOISE);
        assert_eq!(req[3], 9);
    }

    #[test]
    fn test_unlisted_code_passes_through() {
        let mock = Arc::new(MockTransport::echoing_with_payload(
            protocol::status::GET_SUCCESS,
            [0x55, 0, 0, 0],
        ));
        let cam = Cu30Camera::new(mock);
        assert_eq!(
            cam.get_special_effect().unwrap(),
            SpecialEffect::Unknown(0x55)
        );
        assert_eq!(cam.get_flash_mode().unwrap(), FlashMode::Unknown(0x55));
        assert_eq!(cam.get_orientation().unwrap(), Orientation::Unknown(0x55));
        assert_eq!(
            cam.get_roi_auto_exposure().unwrap().mode,
            RoiExposureMode::Unknown(0x55)
        );
    }

    #[test]
    fn test_face_rectangle_toggle() {
        let mock = Arc::new(MockTransport::echoing(protocol::status::SET_SUCCESS));
        let cam = Cu30Camera::new(mock.clone());
        cam.enable_face_rectangle(true).unwrap();
        assert_eq!(mock.last_request().unwrap()[3], flag::ENABLE_FACE_RECTANGLE);
        cam.enable_face_rectangle(false).unwrap();
        assert_eq!(mock.last_request().unwrap()[3], flag::DISABLE_FACE_RECTANGLE);
    }
}
