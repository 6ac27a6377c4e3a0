//! Game configuration loaded from an optional TOML file.
//!
//! [`GameConfig`] is built once at startup and shared by reference with every
//! game-logic function.  Missing keys fall back to the compiled defaults, so a
//! config file only needs the values it changes:
//!
//! ```toml
//! max_enemies = 2
//! projectile_speed = 0.35
//!
//! [keys]
//! shoot = ["space"]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::input::KeyBindings;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "kitten_shooter.toml";

/// Upper bound for every pixel size in the config.  Keeps the derived
/// geometry (`3 * player_height` and friends) well inside `i32`.
pub const MAX_DIMENSION: i32 = 100_000;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // ── Arena ─────────────────────────────────────────────────────────────────
    pub arena_width: i32,
    pub arena_height: i32,

    // ── Enemies ───────────────────────────────────────────────────────────────
    /// Also the lane width.
    pub enemy_width: i32,
    pub enemy_height: i32,
    /// Live enemies kept on screen.  Must stay below the lane count.
    pub max_enemies: usize,
    pub enemy_speed_min: f64,
    pub enemy_speed_max: f64,

    // ── Player ────────────────────────────────────────────────────────────────
    pub player_width: i32,
    pub player_height: i32,
    /// Gap between the player sprite and the bottom edge.
    pub player_margin: i32,

    // ── Projectile & collisions ───────────────────────────────────────────────
    pub projectile_speed: f64,
    /// An enemy is hit when it is lower than `projectile.y - kill_band`.
    pub kill_band: f64,
    /// Top of the death band, measured up from the player's top edge.
    pub death_band_reach: i32,

    // ── Host ──────────────────────────────────────────────────────────────────
    /// Target time between frames (≈60 Hz).
    pub frame_interval_ms: u64,
    /// Ring the terminal bell when an enemy is shot.
    pub audio: bool,
    pub keys: KeyBindings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            arena_width: 375,
            arena_height: 500,

            enemy_width: 75,
            enemy_height: 156,
            max_enemies: 3,
            enemy_speed_min: 0.25,
            enemy_speed_max: 0.75,

            player_width: 75,
            player_height: 54,
            player_margin: 10,

            projectile_speed: 0.2,
            kill_band: 100.0,
            death_band_reach: 50,

            frame_interval_ms: 16,
            audio: true,
            keys: KeyBindings::default(),
        }
    }
}

impl GameConfig {
    // ── Derived geometry ─────────────────────────────────────────────────────

    /// Number of equal-width lanes the arena is split into.
    pub fn lane_count(&self) -> usize {
        if self.enemy_width <= 0 {
            return 0;
        }
        (self.arena_width / self.enemy_width).max(0) as usize
    }

    /// Left edge of `lane`.
    pub fn lane_x(&self, lane: usize) -> i32 {
        lane as i32 * self.enemy_width
    }

    /// Rightmost x the player may occupy.
    pub fn max_player_x(&self) -> i32 {
        self.arena_width.saturating_sub(self.player_width)
    }

    /// The player starts in the third lane (or the last one, on narrow arenas).
    pub fn player_start_x(&self) -> i32 {
        self.player_width.saturating_mul(2).min(self.max_player_x()).max(0)
    }

    pub fn player_y(&self) -> f64 {
        self.arena_height as f64 - self.player_height as f64 - self.player_margin as f64
    }

    pub fn enemy_start_y(&self) -> f64 {
        -self.enemy_height as f64
    }

    pub fn projectile_start_y(&self) -> f64 {
        self.enemy_height as f64
    }

    /// Height a freshly fired shot starts from.
    pub fn firing_height(&self) -> f64 {
        self.arena_height as f64 - 3.0 * self.player_height as f64
    }

    /// Inclusive `(top, bottom)` y-range in which an enemy sharing the
    /// player's lane is lethal.
    pub fn death_band(&self) -> (f64, f64) {
        let top = self.arena_height as f64
            - self.player_height as f64
            - self.death_band_reach as f64;
        let bottom = self.arena_height as f64 - self.player_height as f64 / 2.0;
        (top, bottom)
    }

    // ── Loading ──────────────────────────────────────────────────────────────

    /// Read, parse and validate the config at `path`.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.to_path_buf(),
                message,
            },
            other => other,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> ConfigResult<Self> {
        let config: GameConfig = toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: PathBuf::new(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from an explicit path, or from [`DEFAULT_CONFIG_FILE`] if it
    /// exists, or fall back to the defaults.
    ///
    /// An explicit path that cannot be read is an error; a missing default
    /// file is not.
    pub fn resolve(explicit: Option<&Path>) -> ConfigResult<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = Path::new(DEFAULT_CONFIG_FILE);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            log::info!("No {} found; using compiled defaults", DEFAULT_CONFIG_FILE);
            Ok(Self::default())
        }
    }

    // ── Validation ───────────────────────────────────────────────────────────

    /// Check the invariants the game logic depends on.
    ///
    /// Most importantly `max_enemies < lane_count`: the spawner re-samples
    /// lanes until it finds an empty one.
    pub fn validate(&self) -> ConfigResult<()> {
        dimension("arena_width", self.arena_width, 1)?;
        dimension("arena_height", self.arena_height, 1)?;
        dimension("enemy_width", self.enemy_width, 1)?;
        dimension("enemy_height", self.enemy_height, 1)?;
        dimension("player_width", self.player_width, 1)?;
        dimension("player_height", self.player_height, 1)?;
        dimension("player_margin", self.player_margin, 0)?;
        dimension("death_band_reach", self.death_band_reach, 0)?;

        finite("enemy_speed_min", self.enemy_speed_min)?;
        finite("enemy_speed_max", self.enemy_speed_max)?;
        finite("projectile_speed", self.projectile_speed)?;
        finite("kill_band", self.kill_band)?;

        if self.arena_width < self.enemy_width {
            return Err(ConfigError::Invalid {
                name: "arena_width",
                value: self.arena_width.to_string(),
                requirement: "must fit at least one lane (>= enemy_width)",
            });
        }
        if self.player_width != self.enemy_width {
            return Err(ConfigError::Invalid {
                name: "player_width",
                value: self.player_width.to_string(),
                requirement: "must equal enemy_width so the player moves lane by lane",
            });
        }
        if self.max_enemies >= self.lane_count() {
            return Err(ConfigError::Invalid {
                name: "max_enemies",
                value: self.max_enemies.to_string(),
                requirement: "must be less than the lane count (arena_width / enemy_width)",
            });
        }
        if !(self.enemy_speed_min > 0.0 && self.enemy_speed_min < self.enemy_speed_max) {
            return Err(ConfigError::Invalid {
                name: "enemy_speed_min",
                value: format!("{} (max {})", self.enemy_speed_min, self.enemy_speed_max),
                requirement: "must satisfy 0 < enemy_speed_min < enemy_speed_max",
            });
        }
        if self.projectile_speed < 0.0 {
            return Err(ConfigError::Invalid {
                name: "projectile_speed",
                value: self.projectile_speed.to_string(),
                requirement: "must be >= 0",
            });
        }
        if self.frame_interval_ms == 0 {
            return Err(ConfigError::Invalid {
                name: "frame_interval_ms",
                value: "0".to_string(),
                requirement: "must be > 0",
            });
        }
        Ok(())
    }
}

/// `value` must lie in `min..=MAX_DIMENSION`.
fn dimension(name: &'static str, value: i32, min: i32) -> ConfigResult<()> {
    if (min..=MAX_DIMENSION).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            requirement: if min > 0 {
                "must be in 1..=100000"
            } else {
                "must be in 0..=100000"
            },
        })
    }
}

fn finite(name: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            name,
            value: value.to_string(),
            requirement: "must be a finite number",
        })
    }
}
