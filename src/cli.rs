// CLI definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use seecam_cu30::{FlashMode, FlickerMode, RoiExposureMode, SceneMode, SpecialEffect};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "seecam")]
#[command(author, version, about = "See3CAM_CU30 extension control")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file path (default: ~/.config/seecam/seecam.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// hidraw node of the camera (overrides config)
    #[arg(short, long, global = true, value_name = "PATH")]
    pub device: Option<String>,

    /// Reply timeout in milliseconds (overrides config)
    #[arg(long, global = true, value_name = "MS")]
    pub timeout_ms: Option<i32>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the camera that would be used
    Info,

    /// Read a setting from the camera
    #[command(visible_alias = "g")]
    Get {
        #[arg(value_enum)]
        control: Control,
    },

    /// Change a setting
    #[command(visible_alias = "s")]
    Set {
        #[command(subcommand)]
        setting: SetCommands,
    },

    /// Restore factory defaults
    Reset,

    /// Show or hide the face rectangle overlay
    FaceRect {
        #[arg(value_enum)]
        state: Toggle,
    },
}

/// Readable controls
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Control {
    Effect,
    Denoise,
    Scene,
    Roi,
    Burst,
    Qfactor,
    Orientation,
    Framerate,
    Exposure,
    Face,
    Smile,
    Flicker,
    Flash,
    /// Every control above
    All,
}

impl Control {
    /// Every single control, in display order
    pub const EACH: &'static [Control] = &[
        Control::Effect,
        Control::Denoise,
        Control::Scene,
        Control::Roi,
        Control::Burst,
        Control::Qfactor,
        Control::Orientation,
        Control::Framerate,
        Control::Exposure,
        Control::Face,
        Control::Smile,
        Control::Flicker,
        Control::Flash,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    pub fn enabled(self) -> bool {
        self == Toggle::On
    }
}

#[derive(Subcommand)]
pub enum SetCommands {
    /// Special effect (normal, black-white, grayscale, negative, sketch)
    Effect { effect: SpecialEffect },

    /// Denoise level
    Denoise { level: u8 },

    /// Scene mode (normal, document)
    Scene { scene: SceneMode },

    /// Auto-exposure metering region (full, manual, disabled)
    Roi {
        mode: RoiExposureMode,
        /// Preview width in pixels
        #[arg(long, default_value_t = 640)]
        width: u32,
        /// Preview height in pixels
        #[arg(long, default_value_t = 480)]
        height: u32,
        /// Selected point, preview pixels
        #[arg(long, default_value_t = 0)]
        x: u32,
        #[arg(long, default_value_t = 0)]
        y: u32,
        /// Metering window size
        #[arg(long, default_value = "1")]
        window: String,
    },

    /// Burst length
    Burst { length: u8 },

    /// JPEG quality factor
    Qfactor { q: u8 },

    /// Image flip
    Orientation {
        /// Mirror left/right
        #[arg(long)]
        horizontal: bool,
        /// Flip upside down
        #[arg(long)]
        vertical: bool,
    },

    /// Frame rate control value
    Framerate { rate: u8 },

    /// Exposure compensation (microseconds)
    Exposure { value: u32 },

    /// Face detection switches
    Face {
        #[arg(value_enum)]
        rect: Toggle,
        /// Embed detection data in the frame
        #[arg(long, value_enum, default_value = "off")]
        embed: Toggle,
        /// Draw the rectangle on the video
        #[arg(long, value_enum, default_value = "off")]
        overlay: Toggle,
    },

    /// Smile detection switches
    Smile {
        #[arg(value_enum)]
        state: Toggle,
        /// Embed detection data in the frame
        #[arg(long, value_enum, default_value = "off")]
        embed: Toggle,
    },

    /// Flicker compensation (auto, 50hz, 60hz, disabled)
    Flicker { mode: FlickerMode },

    /// Flash output (off, torch, strobe)
    Flash { mode: FlashMode },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_set_roi() {
        let cli = Cli::try_parse_from([
            "seecam", "set", "roi", "manual", "--x", "320", "--y", "240", "--window", "4",
        ])
        .unwrap();
        match cli.command {
            Commands::Set {
                setting: SetCommands::Roi { mode, x, y, window, width, .. },
            } => {
                assert_eq!(mode, RoiExposureMode::Manual);
                assert_eq!((x, y, width), (320, 240, 640));
                assert_eq!(window, "4");
            }
            _ => panic!("expected set roi"),
        }
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["seecam", "get", "flash", "--json", "--device", "/dev/hidraw2"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.device.as_deref(), Some("/dev/hidraw2"));
        assert!(matches!(cli.command, Commands::Get { control: Control::Flash }));
    }

    #[test]
    fn test_rejects_unknown_effect() {
        assert!(Cli::try_parse_from(["seecam", "set", "effect", "sepia"]).is_err());
    }

    #[test]
    fn test_parse_raw_code() {
        let cli = Cli::try_parse_from(["seecam", "set", "flash", "0x03"]).unwrap();
        match cli.command {
            Commands::Set {
                setting: SetCommands::Flash { mode },
            } => assert_eq!(mode, FlashMode::Unknown(0x03)),
            _ => panic!("expected set flash"),
        }
    }
}
