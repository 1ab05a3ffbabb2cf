// Copyright (c) 2026 homeguard
// Licensed under the MIT License. See LICENSE file in the project root.
// https://github.com/homeguard-sim/homeguard

//! HomeGuard - Simulated Home Security System
//!
//! Builds the security system from configuration, starts sensor monitoring,
//! and hands the main thread to the console event loop.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use homeguard::{Config, SecuritySystem, VERSION};

/// HomeGuard - Simulated Home Security System
#[derive(Parser, Debug)]
#[command(name = "homeguard")]
#[command(author = "HomeGuard Project")]
#[command(version = VERSION)]
#[command(about = "Simulated home security system with observer-based alerting")]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data output directory
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Enable trace-level logging
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration loads before logging so its log_level can seed the
    // subscriber when no CLI flag overrides it
    let config_path = args.config.clone().unwrap_or_else(Config::default_path);
    let mut config = Config::load_or_create(&config_path)?;

    // Override with command line args
    if let Some(data_dir) = args.data_dir {
        config.data_dir = data_dir;
    }

    let log_level = resolve_log_level(args.trace, args.debug, &config.log_level);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(args.debug)
        .with_line_number(args.debug)
        .with_ansi(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("HomeGuard v{} - simulated home security system", VERSION);
    info!("Configuration loaded from {:?}", config_path);

    let system = SecuritySystem::from_config(&config)?;
    system.start()?;

    homeguard::ui::run_console(&system)?;

    system.stop()?;
    Ok(())
}

/// CLI flags win; otherwise the configured level, falling back to INFO
fn resolve_log_level(trace: bool, debug: bool, configured: &str) -> Level {
    if trace {
        Level::TRACE
    } else if debug {
        Level::DEBUG
    } else {
        configured.parse().unwrap_or(Level::INFO)
    }
}
