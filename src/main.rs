//! See3CAM_CU30 control CLI
//!
//! Reads and changes the camera's extension controls over its HID interface.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

// CLI definitions
mod cli;
use cli::{Cli, Commands};

mod commands;
mod config;

use config::AppConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; RUST_LOG wins over --log-level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.clone().unwrap_or_else(AppConfig::default_path);
    debug!("Loading config from {:?}", config_path);
    let config = AppConfig::load(&config_path)?;

    let (camera, mut status_rx) = commands::open_camera(&cli, &config)?;

    let result = match &cli.command {
        Commands::Info => commands::query::info(&camera, cli.json),
        Commands::Get { control } => commands::query::get(&camera, *control, cli.json),
        Commands::Set { setting } => commands::set::set(&camera, setting, cli.json),
        Commands::Reset => commands::set::reset(&camera, cli.json),
        Commands::FaceRect { state } => commands::set::face_rect(&camera, *state, cli.json),
    };

    let drained = commands::drain_status(&mut status_rx, cli.json);
    commands::finish(&camera, result.and(drained))
}
