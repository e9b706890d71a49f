//! Gameplay rules and runtime options.
//!
//! Everything can come from a JSON file; any field left out keeps its
//! default, so `{}` is a valid settings file.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const PLAYFIELD_WIDTH: f32 = 800.0;
pub const PLAYFIELD_HEIGHT: f32 = 640.0;

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_FLASH_MS: u64 = 400;
const HIGH_SCORE_FILE_NAME: &str = ".space_adventure_score";

/// Numbers that shape a session.  Sizes are `[w, h]` in playfield units,
/// speeds are units per frame.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Rules {
    pub initial_health: u32,
    pub player_speed: f32,
    pub player_size: (f32, f32),
    pub player_bullet_speed: f32,
    pub player_bullet_size: (f32, f32),
    pub enemy_speed: f32,
    /// Upper bound of the lateral drift rolled for each enemy.
    pub enemy_drift: f32,
    pub enemy_size: (f32, f32),
    /// Inclusive range, in frames, for an enemy's shoot interval.
    pub enemy_shoot_interval: (u32, u32),
    pub enemy_bullet_speed: f32,
    pub enemy_bullet_size: (f32, f32),
    pub spawn_interval: u32,
    pub spawn_margin: f32,
    pub spawn_y: f32,
    pub score_per_kill: u32,
    pub explosion_frame_time: u32,
    /// Zero disables invulnerability after a hit.
    pub invulnerability_ms: u64,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            initial_health: 10,
            player_speed: 5.0,
            player_size: (64.0, 64.0),
            player_bullet_speed: -8.0,
            player_bullet_size: (8.0, 16.0),
            enemy_speed: 2.0,
            enemy_drift: 1.5,
            enemy_size: (48.0, 48.0),
            enemy_shoot_interval: (90, 180),
            enemy_bullet_speed: 5.0,
            enemy_bullet_size: (4.0, 10.0),
            spawn_interval: 40,
            spawn_margin: 30.0,
            spawn_y: -50.0,
            score_per_kill: 100,
            explosion_frame_time: 4,
            invulnerability_ms: 0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub fps: u32,
    pub assets_dir: PathBuf,
    /// Where the best score is kept; `$HOME/.space_adventure_score` if unset.
    pub high_score_file: Option<PathBuf>,
    pub skip_story: bool,
    /// Ring the terminal bell for sound effects.
    pub bell: bool,
    pub flash_ms: u64,
    pub rules: Rules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            assets_dir: PathBuf::from("assets"),
            high_score_file: None,
            skip_story: false,
            bell: false,
            flash_ms: DEFAULT_FLASH_MS,
            rules: Rules::default(),
        }
    }
}

#[derive(Debug)]
pub enum SettingsError {
    Io { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: serde_json::Error },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read settings file {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "invalid settings file {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let raw = fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let settings: Self = serde_json::from_str(&raw).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn high_score_path(&self) -> PathBuf {
        self.high_score_file.clone().unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(HIGH_SCORE_FILE_NAME)
        })
    }

    /// Replace values the game cannot run with, warning about each one.
    pub fn sanitized(mut self) -> Self {
        let defaults = Rules::default();

        if self.fps == 0 {
            tracing::warn!("fps must be positive. Falling back to {}.", DEFAULT_FPS);
            self.fps = DEFAULT_FPS;
        }

        let rules = &mut self.rules;
        if rules.initial_health == 0 {
            tracing::warn!(
                "initial_health must be positive. Falling back to {}.",
                defaults.initial_health
            );
            rules.initial_health = defaults.initial_health;
        }
        if rules.spawn_interval == 0 {
            tracing::warn!(
                "spawn_interval must be positive. Falling back to {}.",
                defaults.spawn_interval
            );
            rules.spawn_interval = defaults.spawn_interval;
        }
        if rules.explosion_frame_time == 0 {
            tracing::warn!(
                "explosion_frame_time must be positive. Falling back to {}.",
                defaults.explosion_frame_time
            );
            rules.explosion_frame_time = defaults.explosion_frame_time;
        }
        let (lo, hi) = rules.enemy_shoot_interval;
        if lo == 0 || lo > hi {
            tracing::warn!(
                "enemy_shoot_interval ({}, {}) is not a valid range. Falling back to defaults.",
                lo,
                hi
            );
            rules.enemy_shoot_interval = defaults.enemy_shoot_interval;
        }
        if rules.enemy_drift < 0.0 {
            rules.enemy_drift = -rules.enemy_drift;
        }

        self
    }
}
