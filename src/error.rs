//! Configuration error types.
//!
//! The game logic itself is total over a validated configuration, so the
//! only fallible step is loading and checking that configuration.

use std::fmt;
use std::path::PathBuf;

/// Errors raised while loading or validating a [`crate::GameConfig`].
#[derive(Debug)]
pub enum ConfigError {
    /// The config file exists but could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The config file is not valid TOML for `GameConfig`.
    Parse {
        path: PathBuf,
        message: String,
    },

    /// A value breaks one of the static invariants the game relies on.
    Invalid {
        /// Name of the offending field (for logging).
        name: &'static str,
        /// The rejected value, formatted.
        value: String,
        /// Human-readable description of what is required.
        requirement: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io { path, source } => {
                write!(f, "failed to read config '{}': {}", path.display(), source)
            }
            ConfigError::Parse { path, message } => {
                write!(f, "failed to parse config '{}': {}", path.display(), message)
            }
            ConfigError::Invalid {
                name,
                value,
                requirement,
            } => write!(
                f,
                "config value '{}' = {} is invalid: {}",
                name, value, requirement
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `ConfigError` as the error type.
pub type ConfigResult<T> = Result<T, ConfigError>;
