//! Game state for one run in the dungeon room
//!
//! Holds the slime controller, the prey, the room bounds and the score. All
//! randomness comes from a seeded RNG so a run can be replayed.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::controller::ChainController;
use super::prey::Prey;
use crate::SpriteSize;
use crate::settings::{Difficulty, Settings};

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Slime is moving
    Playing,
    /// Frozen until unpaused
    Paused,
    /// Run ended, waiting for retry or quit
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Head ran into the body
    SelfCollision,
    /// Head left the room
    Wall,
}

/// Complete state of a run
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u32,
    pub game_over_reason: Option<GameOverReason>,
    /// Slime body and movement
    pub slime: ChainController,
    pub prey: Vec<Prey>,
    /// Walkable floor (screen minus one tile of wall per side)
    pub room: Rect,
    /// Where the slime starts each run
    pub start: Vec2,
    /// Discrete step length (one tile)
    pub stride: f32,
    pub slime_sprite: SpriteSize,
    pub prey_sprite: SpriteSize,
    rng: Pcg32,
}

impl GameState {
    /// Create a fresh run for the given settings
    pub fn new(settings: &Settings, seed: u64) -> Self {
        let tile = settings.tile_size;
        let (screen_w, screen_h) = settings.screen_size();
        let room = Rect::new(0.0, 0.0, screen_w, screen_h).deflate(tile, tile);
        let start = Vec2::new(
            (settings.columns / 2) as f32 * tile,
            (settings.rows / 2) as f32 * tile,
        );

        let mut state = Self {
            seed,
            difficulty: settings.difficulty,
            phase: GamePhase::Playing,
            score: 0,
            game_over_reason: None,
            slime: ChainController::new(start, tile, settings.difficulty),
            prey: Vec::new(),
            room,
            start,
            stride: tile,
            slime_sprite: settings.slime_sprite,
            prey_sprite: settings.prey_sprite,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.new_game();
        state
    }

    /// Reset slime, prey and score (retry)
    pub fn new_game(&mut self) {
        self.slime.initialize(self.start, self.stride, self.difficulty);

        let multiplier = self.difficulty.prey_speed_multiplier();
        self.prey = (0..self.difficulty.prey_count())
            .map(|_| Prey::new(multiplier))
            .collect();
        for i in 0..self.prey.len() {
            self.respawn_prey(i);
        }

        self.score = 0;
        self.game_over_reason = None;
        self.phase = GamePhase::Playing;
    }

    /// Switch difficulty and start over
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.new_game();
    }

    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            GamePhase::GameOver => GamePhase::GameOver,
        };
    }

    pub fn end_run(&mut self, reason: GameOverReason) {
        log::debug!("Run over ({:?}) with score {}", reason, self.score);
        self.phase = GamePhase::GameOver;
        self.game_over_reason = Some(reason);
    }

    /// Put prey `index` against the wall farthest from the slime and give it
    /// a new heading
    pub fn respawn_prey(&mut self, index: usize) {
        let slime_center = self.slime.bounds(self.slime_sprite).center;
        let center_to_slime = slime_center - self.room.center();
        let padding = self.prey_sprite.width * 0.25 * 2.0;
        let room = self.room;

        let pos = if center_to_slime.x.abs() > center_to_slime.y.abs() {
            let y = self.random_between(room.min.y + padding, room.max.y - padding);
            let x = if center_to_slime.x > 0.0 {
                room.min.x + padding
            } else {
                room.max.x - padding * 2.0
            };
            Vec2::new(x, y)
        } else {
            let x = self.random_between(room.min.x + padding, room.max.x - padding);
            let y = if center_to_slime.y > 0.0 {
                room.min.y + padding
            } else {
                room.max.y - padding * 2.0
            };
            Vec2::new(x, y)
        };

        let prey = &mut self.prey[index];
        prey.pos = pos;
        prey.randomize_velocity(&mut self.rng);
    }

    fn random_between(&mut self, lo: f32, hi: f32) -> f32 {
        if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        }
    }
}
