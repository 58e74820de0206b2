//! Game settings and difficulty selection
//!
//! Persisted as JSON next to the high scores. The chosen difficulty is handed
//! to the chain controller explicitly; nothing here is global.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::SpriteSize;
use crate::consts::*;
use crate::persistence;
use crate::platform;

/// Movement difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    /// Free continuous movement
    #[default]
    Easy,
    /// Slower discrete steps with a deeper input buffer
    Medium,
    /// Quick discrete steps
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Seconds between discrete steps (None for continuous movement)
    pub fn step_interval(&self) -> Option<f32> {
        match self {
            Difficulty::Easy => None,
            Difficulty::Medium => Some(MEDIUM_STEP_INTERVAL),
            Difficulty::Hard => Some(HARD_STEP_INTERVAL),
        }
    }

    /// How many turns can be queued ahead of the step timer
    pub fn buffer_capacity(&self) -> usize {
        match self {
            Difficulty::Easy => 0,
            Difficulty::Medium => MEDIUM_BUFFER_CAPACITY,
            Difficulty::Hard => HARD_BUFFER_CAPACITY,
        }
    }

    pub fn is_continuous(&self) -> bool {
        self.step_interval().is_none()
    }

    /// Prey speed multiplier for this difficulty
    pub fn prey_speed_multiplier(&self) -> f32 {
        match self {
            Difficulty::Hard => 2.0,
            _ => 1.0,
        }
    }

    /// Number of prey roaming the room
    pub fn prey_count(&self) -> usize {
        match self {
            Difficulty::Easy => 2,
            _ => 1,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Last selected difficulty
    pub difficulty: Difficulty,
    /// Name recorded with new high scores
    pub player_name: String,

    // === Play field ===
    /// Tile edge length in pixels (also the discrete stride)
    pub tile_size: f32,
    /// Tilemap columns, walls included
    pub columns: u32,
    /// Tilemap rows, walls included
    pub rows: u32,

    // === Sprites ===
    pub slime_sprite: SpriteSize,
    pub prey_sprite: SpriteSize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            difficulty: Difficulty::Easy,
            player_name: "Anonymous".to_string(),

            // 20x11 tiles of 16px scaled 4x
            tile_size: 64.0,
            columns: 20,
            rows: 11,

            slime_sprite: SpriteSize::new(64.0, 64.0),
            prey_sprite: SpriteSize::new(64.0, 64.0),
        }
    }
}

impl Settings {
    const FILE_NAME: &'static str = "settings.json";

    /// Settings with a different difficulty, everything else default
    pub fn with_difficulty(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            ..Self::default()
        }
    }

    /// Screen size implied by the tilemap
    pub fn screen_size(&self) -> (f32, f32) {
        (
            self.columns as f32 * self.tile_size,
            self.rows as f32 * self.tile_size,
        )
    }

    /// Default settings file location
    pub fn default_path() -> Option<PathBuf> {
        platform::data_file(Self::FILE_NAME)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::info!("No data directory, using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        match persistence::load_json(path) {
            Ok(Some(settings)) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Ok(None) => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(err) => {
                log::warn!("Ignoring unreadable settings: {err:#}");
                Self::default()
            }
        }
    }

    /// Save settings to the default location (best effort)
    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            self.save_to(&path);
        }
    }

    /// Save settings to `path` (best effort)
    pub fn save_to(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("Settings saved"),
            Err(err) => log::warn!("Could not save settings: {err:#}"),
        }
    }
}
