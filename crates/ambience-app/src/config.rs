//! Command-line arguments and the resolved startup configuration.

use ambience_core::{clamp_volume, defaults};
use clap::Parser;
use std::path::PathBuf;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ambience")]
#[command(version, about = "Ambient sound mixer", long_about = None)]
pub struct Cli {
    /// Directory the catalog's sound files are resolved against
    #[arg(long, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Initial master volume (0 to 1)
    #[arg(long, value_name = "LEVEL", default_value_t = defaults::MASTER_VOLUME)]
    pub master: f32,

    /// Settings file holding the theme preference
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

/// Startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub asset_root: PathBuf,
    pub master_volume: f32,
    pub settings_path: PathBuf,
}

impl AppConfig {
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            asset_root: cli.assets.unwrap_or_else(|| PathBuf::from(".")),
            master_volume: clamp_volume(cli.master),
            settings_path: cli.settings.unwrap_or_else(default_settings_path),
        }
    }
}

/// `<config dir>/ambience/settings.json`, or `./settings.json` when the
/// platform has no config directory.
pub fn default_settings_path() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join("ambience"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join("settings.json")
}
