//! Kitten Shooter - a lane-based falling-enemy arcade game
//!
//! Core modules:
//! - `entities`: plain game data (player, enemies, projectile, state)
//! - `clock`: millisecond frame deltas for the host loop
//! - `compute`: pure per-frame logic (spawning, motion, collisions, death)
//! - `render`: drawing-surface abstraction and recorded frames
//! - `input`: key bindings and player commands
//! - `config`: the immutable game configuration and its TOML loader
//! - `error`: configuration errors

pub mod clock;
pub mod compute;
pub mod config;
pub mod entities;
pub mod error;
pub mod input;
pub mod render;

pub use config::GameConfig;
pub use entities::{GameState, GameStatus};
pub use error::{ConfigError, ConfigResult};
