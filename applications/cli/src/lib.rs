//! Spotify CLI library: configuration and command implementations shared
//! with the `spotify-cli` binary.

pub mod commands;
pub mod config;
pub mod error;

pub use commands::App;
pub use config::CliConfig;
pub use error::{CliError, Result};
