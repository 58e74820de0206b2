//! Slime Chain - the locomotion and collision core of a dungeon slime game
//!
//! Core modules:
//! - `sim`: Segment chain, movement policies, controller and the headless scene
//! - `highscores`: Per-difficulty leaderboard
//! - `settings`: Difficulty and play-field configuration
//! - `persistence`: JSON save/load helpers
//! - `platform`: Per-user data directory lookup

pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod settings;
pub mod sim;

pub use highscores::HighScores;
pub use settings::{Difficulty, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Reference frame time (60 Hz), used by the headless runner
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Discrete step interval in Hard mode (seconds)
    pub const HARD_STEP_INTERVAL: f32 = 0.2;
    /// Discrete step interval in Medium mode (seconds)
    pub const MEDIUM_STEP_INTERVAL: f32 = 0.3;

    /// Pending-direction capacity in Hard mode
    pub const HARD_BUFFER_CAPACITY: usize = 2;
    /// Pending-direction capacity in Medium mode
    pub const MEDIUM_BUFFER_CAPACITY: usize = 3;

    /// Easy mode head speed (pixels/s, 7 px per 60 Hz frame)
    pub const EASY_SPEED: f32 = 420.0;
    /// Distance trailing segments keep from their predecessor in Easy mode
    pub const FOLLOW_SPACING: f32 = 48.0;

    /// Tolerance for treating two segment positions as the same cell
    pub const POSITION_EPSILON: f32 = 1e-3;

    /// Prey base speed (pixels/s, 5 px per 60 Hz frame)
    pub const PREY_SPEED: f32 = 300.0;
    /// Speed multiplier while a prey is golden
    pub const GOLDEN_SPEED_MULTIPLIER: f32 = 2.0;
    /// How long a golden prey stays golden (seconds)
    pub const GOLDEN_DURATION: f32 = 5.0;
    /// Chance a respawned prey turns golden
    pub const GOLDEN_CHANCE: f32 = 0.2;

    /// Points for a regular prey
    pub const PREY_POINTS: u32 = 100;
    /// Points for a golden prey
    pub const GOLDEN_PREY_POINTS: u32 = 200;
}

/// Unit vector for "up" in screen space (+Y points down)
pub const UP: Vec2 = Vec2::new(0.0, -1.0);
/// Unit vector for "down" in screen space
pub const DOWN: Vec2 = Vec2::new(0.0, 1.0);
/// Unit vector for "left"
pub const LEFT: Vec2 = Vec2::new(-1.0, 0.0);
/// Unit vector for "right"
pub const RIGHT: Vec2 = Vec2::new(1.0, 0.0);

/// Width/height pair of a sprite, supplied by whoever draws it
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SpriteSize {
    pub width: f32,
    pub height: f32,
}

impl SpriteSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Offset from a sprite's top-left corner to its center
    #[inline]
    pub fn half_extent(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}
