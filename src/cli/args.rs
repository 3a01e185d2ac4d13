//! CLI argument definitions using Clap

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Environment variable naming an alternative config file
pub const ENV_CONFIG: &str = "SERIAL_CHIME_CONFIG";

/// serial-chime - play sounds on serial trigger events
#[derive(Parser, Debug)]
#[command(name = "serial-chime")]
#[command(version)]
#[command(about = "Play sound files when a serial device reports trigger events")]
#[command(long_about = None)]
pub struct Cli {
    /// Config file to use instead of the XDG location
    #[arg(short = 'c', long, value_name = "PATH", env = ENV_CONFIG, global = true)]
    pub config: Option<PathBuf>,

    /// Serial port to open (skips device discovery)
    #[arg(short = 'p', long, value_name = "PORT")]
    pub port: Option<String>,

    /// Baud rate of the serial link (e.g., 115200, 9600)
    #[arg(short = 'b', long, value_name = "RATE")]
    pub baud: Option<String>,

    /// Number of sounds that may play at the same time
    #[arg(long, value_name = "N")]
    pub pool_size: Option<usize>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Play one sound file to the end and exit
    Play {
        /// Audio file (WAV, MP3, FLAC, Ogg Vorbis)
        file: PathBuf,
    },
    /// List serial devices and show which one would be used
    Ports,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "baud_rate",
    "read_timeout",
    "backoff",
    "restart_delay",
    "pool_size",
    "device.port",
    "device.keywords",
    "device.path_fragments",
    "sounds.ready",
    "sounds.default",
    "sounds.team_template",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
