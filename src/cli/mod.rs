//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! and the composition root that wires adapters into the bridge.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod play_cmd;
pub mod ports_cmd;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_bridge, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction};
pub use presenter::Presenter;
