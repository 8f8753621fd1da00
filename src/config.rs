//! External configuration loader.
//!
//! Reads `config.toml` from the executable's directory (or CWD).
//! Falls back to defaults if the file is missing or incomplete.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::ROLL_FRAMES;

pub const CONFIG_FILE: &str = "config.toml";

/// Strip kept free under the grid, in pixels. Unstarted tokens are parked there.
pub const BOARD_OFFSET: u32 = 100;

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub animation: AnimationConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Cosmetic faces flashed before the die settles.
    pub dice_frames: usize,
    pub dice_frame_ms: u64,
    /// Delay per cell while a token walks.
    pub step_ms: u64,
    pub victory_hold_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        WindowConfig { width: 700, height: 800, cell_size: 60 }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        AnimationConfig {
            dice_frames: ROLL_FRAMES,
            dice_frame_ms: 50,
            step_ms: 150,
            victory_hold_ms: 4000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig { filter: "info".to_string() }
    }
}

impl AnimationConfig {
    pub fn dice_frame(&self) -> Duration {
        Duration::from_millis(self.dice_frame_ms)
    }

    pub fn step(&self) -> Duration {
        Duration::from_millis(self.step_ms)
    }

    pub fn victory_hold(&self) -> Duration {
        Duration::from_millis(self.victory_hold_ms)
    }
}

impl GameConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        GameConfig::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Looks for `config.toml` next to the executable, then in the CWD.
    /// Returns `Ok(None)` when no file exists; callers fall back to the defaults.
    pub fn discover() -> Result<Option<Self>, ConfigError> {
        GameConfig::discover_in(&candidate_dirs())
    }

    pub fn discover_in(dirs: &[PathBuf]) -> Result<Option<Self>, ConfigError> {
        dirs.iter()
            .map(|dir| dir.join(CONFIG_FILE))
            .find(|path| path.exists())
            .map(|path| GameConfig::load(&path))
            .transpose()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let window = &self.window;
        if window.width == 0 || window.height == 0 {
            return Err(ConfigError::Validation("window size must be > 0".to_string()));
        }
        if window.cell_size == 0 {
            return Err(ConfigError::Validation("cell_size must be > 0".to_string()));
        }
        let board = window.cell_size.saturating_mul(10);
        if board > window.width || board.saturating_add(BOARD_OFFSET) > window.height {
            return Err(ConfigError::Validation(format!(
                "a 10x10 board of cell_size {} plus a {}px parking strip does not fit a {}x{} window",
                window.cell_size, BOARD_OFFSET, window.width, window.height
            )));
        }
        let animation = &self.animation;
        if animation.dice_frame_ms == 0 || animation.step_ms == 0 {
            return Err(ConfigError::Validation("frame delays must be > 0".to_string()));
        }
        Ok(())
    }
}

/// Candidate directories to search: exe dir then CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    dirs
}
