//! Command handlers for the CLI application.
//!
//! - `query`: read-only commands (get, info)
//! - `set`: setting commands (set, reset, face-rect)

pub mod query;
pub mod set;

use crate::cli::Cli;
use crate::config::AppConfig;
use anyhow::Context;
use seecam_cu30::{CommandStatus, Cu30Camera};
use seecam_transport::HidTransport;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tracing::info;

/// Result type for command handlers
pub type CommandResult = anyhow::Result<()>;

/// One rendered result
#[derive(Debug, Serialize)]
pub struct Reading {
    pub control: &'static str,
    pub value: serde_json::Value,
    #[serde(skip)]
    pub text: String,
}

impl Reading {
    pub fn new(control: &'static str, value: impl Serialize, text: String) -> anyhow::Result<Self> {
        Ok(Self {
            control,
            value: serde_json::to_value(value)?,
            text,
        })
    }
}

/// Open the camera named by flags or config
///
/// Status events from the camera are returned alongside it so handlers can
/// print them after the command finishes.
pub fn open_camera(
    cli: &Cli,
    config: &AppConfig,
) -> anyhow::Result<(Cu30Camera, UnboundedReceiver<CommandStatus>)> {
    let path = cli.device.as_deref().or(config.device.path.as_deref());
    let mut transport = match path {
        Some(path) => HidTransport::open_path(path)
            .with_context(|| format!("Failed to open camera at {path}"))?,
        None => HidTransport::open(config.device.vid, config.device.pid).with_context(|| {
            format!(
                "No camera {:04x}:{:04x} found",
                config.device.vid, config.device.pid
            )
        })?,
    };
    transport.set_read_timeout(cli.timeout_ms.unwrap_or(config.device.read_timeout_ms));
    info!("Using {}", transport_label(&transport));

    let (tx, rx) = mpsc::unbounded_channel();
    let camera =
        Cu30Camera::with_config(Arc::new(transport), config.camera.clone()).with_status_sender(tx);
    Ok((camera, rx))
}

fn transport_label(transport: &HidTransport) -> String {
    use seecam_transport::Transport;
    let info = transport.device_info();
    format!("{} ({})", info.display_name(), info.device_path)
}

/// Print readings as text lines or one JSON document
pub fn print_readings(readings: &[Reading], json: bool) -> CommandResult {
    if json {
        let doc = if let [single] = readings {
            serde_json::to_string_pretty(single)?
        } else {
            serde_json::to_string_pretty(readings)?
        };
        println!("{doc}");
    } else {
        for r in readings {
            println!("{}", r.text);
        }
    }
    Ok(())
}

/// Print every status event the camera emitted
pub fn drain_status(rx: &mut UnboundedReceiver<CommandStatus>, json: bool) -> CommandResult {
    while let Ok(status) = rx.try_recv() {
        if json {
            println!("{}", serde_json::to_string(&status)?);
        } else {
            println!("{status}");
        }
    }
    Ok(())
}

/// Release the camera after a command
///
/// The command's own error is reported first; a close failure only surfaces
/// when the command succeeded.
pub fn finish(camera: &Cu30Camera, result: CommandResult) -> CommandResult {
    let closed = camera.close().context("Failed to close camera");
    result.and(closed)
}

/// Camera over a scripted transport for handler tests
#[cfg(test)]
pub(crate) fn mock_camera(
    mock: seecam_transport::mock::MockTransport,
) -> (Arc<seecam_transport::mock::MockTransport>, Cu30Camera) {
    let mock = Arc::new(mock);
    let camera = Cu30Camera::new(mock.clone());
    (mock, camera)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seecam_cu30::protocol::status;
    use seecam_transport::mock::MockTransport;
    use seecam_transport::TransportError;

    #[test]
    fn test_finish_keeps_command_error() {
        let (mock, camera) = mock_camera(MockTransport::echoing(status::SET_SUCCESS));
        mock.fail_next_close(TransportError::Disconnected);
        let err = finish(&camera, Err(anyhow::anyhow!("set failed"))).unwrap_err();
        assert_eq!(err.to_string(), "set failed");
        assert!(!camera.is_open());
    }

    #[test]
    fn test_finish_reports_close_failure() {
        let (mock, camera) = mock_camera(MockTransport::echoing(status::SET_SUCCESS));
        mock.fail_next_close(TransportError::Disconnected);
        let err = finish(&camera, Ok(())).unwrap_err();
        assert_eq!(err.to_string(), "Failed to close camera");
    }

    #[test]
    fn test_finish_ok() {
        let (_, camera) = mock_camera(MockTransport::echoing(status::SET_SUCCESS));
        finish(&camera, Ok(())).unwrap();
        assert!(!camera.is_open());
    }
}
