/// Error types.
///
/// Game rules never fail; only the terminal and the config file can.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal: the frame loop stops and `main` reports it after restoring the terminal.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O failed: {0}")]
    Terminal(#[from] io::Error),
}

/// Never fatal: config loading falls back to defaults.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("config.toml parse error: {0}")]
    Parse(#[from] toml::de::Error),
}
