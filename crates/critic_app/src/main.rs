mod platform;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use critic_core::Language;

use platform::config::{self, AppConfig};

/// Photograph an artwork, optionally its museum label, and get an AI critique.
#[derive(Debug, Parser)]
#[command(name = "artl", version, about)]
struct Args {
    /// Configuration file (RON). Defaults to the user config directory.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Output language: en, zh-TW or zh-CN.
    #[arg(long)]
    language: Option<Language>,
    /// Directory for saved photos and analysis images.
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Log level: off, error, warn, info, debug, trace.
    #[arg(long)]
    log: Option<String>,
    /// Write a configuration file with default values and exit.
    #[arg(long)]
    write_config: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config_path = args
        .config
        .clone()
        .or_else(config::default_config_path)
        .unwrap_or_else(|| PathBuf::from(config::CONFIG_FILENAME));

    if args.write_config {
        config::write_default(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let mut config = AppConfig::load(&config_path)
        .with_context(|| format!("loading configuration from {}", config_path.display()))?;
    config.apply_env(|name| std::env::var(name).ok());
    if let Some(language) = args.language {
        config.language = language.tag().to_string();
    }
    if let Some(output_dir) = args.output_dir {
        config.output_dir = output_dir;
    }
    if let Some(level) = args.log {
        config.log_level = level;
    }

    platform::run_app(config)
}
