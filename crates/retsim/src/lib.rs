//! Command-line front end for the return simulation engine
//!
//! Loads defaults from a YAML config file, applies command-line overrides,
//! and renders simulation outcomes as text or JSON.

pub mod config;
pub mod format;
pub mod logging;
pub mod presenter;
pub mod repl;

pub use config::{ConfigError, RetsimConfig};
pub use logging::init_logging;
pub use presenter::{CliPresenter, OutputFormat};
