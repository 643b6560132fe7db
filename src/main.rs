//! crushplays - Entry Point

use clap::Parser;
use crushplays::config::{self, CliOverrides};
use crushplays::state::AppOptions;
use std::path::PathBuf;
use tracing::info;

/// crushplays - a swipeable stack of song cards in your terminal
#[derive(Parser, Debug)]
#[command(name = "crushplays")]
#[command(version)]
#[command(about = "Terminal greeting card with a swipeable stack of song cards")]
pub struct Args {
    /// Initial volume between 0 and 1
    #[arg(long, value_parser = parse_volume)]
    pub volume: Option<f64>,

    /// Start with sound on
    #[arg(long)]
    pub unmuted: bool,

    /// Allow audible playback before the first key press or click
    #[arg(long)]
    pub autoplay: bool,

    /// Seconds each compliment stays on screen (must be positive)
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

fn parse_volume(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("volume must be between 0 and 1, got {value}"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let resolved = {
        let config_file = config::load_config_with_precedence(args.config.clone())?;
        let merged = config::merge_config(config_file);
        let with_env = config::apply_env_overrides(merged);
        let overrides = CliOverrides {
            volume: args.volume,
            unmuted: args.unmuted,
            autoplay: args.autoplay,
            interval_secs: args.interval,
        };
        config::apply_cli_overrides(with_env, &overrides)
    };

    crushplays::logging::init(&resolved.log_file_path)?;

    info!(config = ?resolved, "Configuration loaded and resolved");

    let options = AppOptions {
        volume: resolved.volume,
        muted: resolved.muted,
        compliment_interval: resolved.compliment_interval,
        ..AppOptions::default()
    };
    let cli_args = crushplays::view::CliArgs::new(
        resolved.audio_base_url,
        resolved.autoplay,
        args.no_color,
        options,
    );

    crushplays::view::run(cli_args)?;

    Ok(())
}
