//! Game configuration
//!
//! Grid dimensions, room bounds and view radius, loaded from a RON file
//! with built-in defaults.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::world::GridSize;

/// Config file looked up in the working directory when none is given
pub const DEFAULT_CONFIG_PATH: &str = "delve.ron";

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Immutable settings for level generation and the observer's view
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Grid width in tiles
    pub width: i32,
    /// Grid height in tiles
    pub height: i32,
    pub min_room_size: i32,
    pub max_room_size: i32,
    /// Rooms requested; the generator makes one extra placement attempt
    pub max_rooms: u32,
    /// View radius in tiles
    pub fov_radius: i32,
    /// Fixed RNG seed, random per run when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 80,
            height: 50,
            min_room_size: 6,
            max_room_size: 10,
            max_rooms: 30,
            fov_radius: 8,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn grid_size(&self) -> GridSize {
        GridSize::new(self.width, self.height)
    }

    /// Number of room placements the generator attempts.
    ///
    /// `max_rooms + 1`, except that zero rooms means zero attempts.
    pub fn room_attempts(&self) -> u32 {
        if self.max_rooms == 0 {
            0
        } else {
            self.max_rooms + 1
        }
    }

    /// Check the values the generator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width <= 0 || self.height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "grid must be non-empty, got {}x{}",
                self.width, self.height
            )));
        }
        if self.min_room_size < 1 {
            return Err(ConfigError::Invalid(format!(
                "min_room_size must be at least 1, got {}",
                self.min_room_size
            )));
        }
        if self.min_room_size > self.max_room_size {
            return Err(ConfigError::Invalid(format!(
                "min_room_size {} exceeds max_room_size {}",
                self.min_room_size, self.max_room_size
            )));
        }
        if self.max_room_size >= self.width || self.max_room_size >= self.height {
            return Err(ConfigError::Invalid(format!(
                "max_room_size {} does not fit a {}x{} grid",
                self.max_room_size, self.width, self.height
            )));
        }
        if self.fov_radius < 0 {
            return Err(ConfigError::Invalid(format!(
                "fov_radius must not be negative, got {}",
                self.fov_radius
            )));
        }
        Ok(())
    }

    /// Parse and validate a config from RON text
    pub fn from_ron(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file that must exist
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_ron(&text, path)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if given, otherwise the default file, falling back to
    /// built-in defaults only when the default file is absent
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::load(path);
        }

        let default_path = Path::new(DEFAULT_CONFIG_PATH);
        if default_path.exists() {
            Self::load(default_path)
        } else {
            log::info!("No {} found, using built-in defaults", DEFAULT_CONFIG_PATH);
            Ok(Self::default())
        }
    }
}
