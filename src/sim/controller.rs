//! Chain controller
//!
//! Owns the segment chain and the active movement policy for one run. The
//! owning scene calls [`ChainController::tick`] once per frame and reads the
//! outcome; there are no callbacks.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::chain::{SegmentChain, Step};
use super::collision::Circle;
use super::policy::{ChainInput, MovementPolicy};
use crate::SpriteSize;
use crate::settings::Difficulty;

/// What happened to the chain during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The chain moved (or waited for its step timer) without incident
    Moved,
    /// The head ran into its own body
    SelfCollision,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChainController {
    difficulty: Difficulty,
    stride: f32,
    chain: SegmentChain,
    policy: MovementPolicy,
}

impl ChainController {
    pub fn new(start: Vec2, stride: f32, difficulty: Difficulty) -> Self {
        let chain = Self::fresh_chain(start, stride, difficulty);
        let policy = MovementPolicy::for_difficulty(difficulty, chain.head().direction);
        Self {
            difficulty,
            stride,
            chain,
            policy,
        }
    }

    /// Start a new run: one head at `start`, empty input buffer, zeroed timer
    pub fn initialize(&mut self, start: Vec2, stride: f32, difficulty: Difficulty) {
        *self = Self::new(start, stride, difficulty);
    }

    fn fresh_chain(start: Vec2, stride: f32, difficulty: Difficulty) -> SegmentChain {
        if difficulty.is_continuous() {
            SegmentChain::new_continuous(start)
        } else {
            SegmentChain::new_discrete(start, stride)
        }
    }

    /// Switch movement policy, keeping the body where it is.
    ///
    /// Queued turns are dropped; a discrete policy resumes along the head's
    /// current direction, with the head re-aimed one stride ahead.
    pub fn set_mode(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.policy = MovementPolicy::for_difficulty(difficulty, self.chain.head().direction);
        if !self.policy.is_continuous() {
            self.chain.aim(self.stride);
        }
    }

    /// Advance one frame
    pub fn tick(&mut self, dt: f32, input: &ChainInput) -> TickOutcome {
        match self.policy.update(&mut self.chain, self.stride, dt, input) {
            Step::Clear => TickOutcome::Moved,
            Step::SelfCollision { segment } => {
                log::debug!(
                    "Head hit segment {} of {} at {:?}",
                    segment,
                    self.chain.len(),
                    self.chain.head().at
                );
                TickOutcome::SelfCollision
            }
        }
    }

    /// Add one segment at the tail
    pub fn grow(&mut self) {
        if self.policy.is_continuous() {
            self.chain.grow_continuous();
        } else {
            self.chain.grow_discrete(self.stride);
        }
    }

    /// Head bounds at an explicit interpolation progress.
    ///
    /// Centered on the sprite drawn at the interpolated head position, with
    /// half the sprite width as radius.
    pub fn bounds_for_collision(&self, progress: f32, sprite: SpriteSize) -> Circle {
        let pos = self.chain.visual_head_position(progress);
        Circle::new(pos + sprite.half_extent(), sprite.width * 0.5)
    }

    /// Head bounds at the current progress
    pub fn bounds(&self, sprite: SpriteSize) -> Circle {
        self.bounds_for_collision(self.progress(), sprite)
    }

    /// Current interpolation progress (always 0 in continuous mode)
    pub fn progress(&self) -> f32 {
        self.policy.progress()
    }

    /// Where each segment should be drawn this frame, head first
    pub fn segment_positions(&self) -> Vec<Vec2> {
        self.chain.visual_positions(self.progress()).collect()
    }

    pub fn mode(&self) -> Difficulty {
        self.difficulty
    }

    pub fn stride(&self) -> f32 {
        self.stride
    }

    pub fn chain(&self) -> &SegmentChain {
        &self.chain
    }

    pub fn policy(&self) -> &MovementPolicy {
        &self.policy
    }

    pub fn len(&self) -> usize {
        self.chain.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chain.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::policy::DirectionKeys;
    use crate::consts::FRAME_DT;
    use crate::{DOWN, RIGHT, UP};

    const STRIDE: f32 = 32.0;
    const SPRITE: SpriteSize = SpriteSize::new(64.0, 64.0);

    fn press(keys: DirectionKeys) -> ChainInput {
        ChainInput::keys(keys)
    }

    #[test]
    fn test_hard_buffer_scenario() {
        // Head at (100,100) moving +X: Up accepted, Down rejected
        let mut controller = ChainController::new(Vec2::new(100.0, 100.0), STRIDE, Difficulty::Hard);
        controller.tick(0.0, &press(DirectionKeys::up()));
        controller.tick(0.0, &press(DirectionKeys::down()));

        match controller.policy() {
            MovementPolicy::Discrete(stepper) => {
                assert_eq!(stepper.buffer().iter().collect::<Vec<_>>(), vec![UP]);
            }
            MovementPolicy::Continuous(_) => panic!("hard must step"),
        }
    }

    #[test]
    fn test_tick_reports_self_collision() {
        let mut controller = ChainController::new(Vec2::ZERO, STRIDE, Difficulty::Hard);
        for _ in 0..4 {
            controller.grow();
        }
        assert_eq!(controller.len(), 5);

        let idle = ChainInput::default();
        assert_eq!(controller.tick(0.0, &press(DirectionKeys::down())), TickOutcome::Moved);
        assert_eq!(controller.tick(0.2, &idle), TickOutcome::Moved);
        assert_eq!(controller.tick(0.0, &press(DirectionKeys::left())), TickOutcome::Moved);
        assert_eq!(controller.tick(0.2, &idle), TickOutcome::Moved);
        assert_eq!(controller.tick(0.0, &press(DirectionKeys::up())), TickOutcome::Moved);
        assert_eq!(controller.tick(0.2, &idle), TickOutcome::Moved);
        assert_eq!(controller.tick(0.0, &press(DirectionKeys::right())), TickOutcome::Moved);
        assert_eq!(controller.tick(0.2, &idle), TickOutcome::SelfCollision);
    }

    #[test]
    fn test_grow_keeps_length_through_steps() {
        let mut controller = ChainController::new(Vec2::ZERO, STRIDE, Difficulty::Medium);
        controller.grow();
        controller.grow();
        for _ in 0..5 {
            controller.tick(0.3, &ChainInput::default());
        }
        assert_eq!(controller.len(), 3);
    }

    #[test]
    fn test_bounds_follow_interpolated_head() {
        let mut controller = ChainController::new(Vec2::new(100.0, 100.0), STRIDE, Difficulty::Hard);
        controller.tick(0.1, &ChainInput::default());
        assert!((controller.progress() - 0.5).abs() < 1e-5);

        let bounds = controller.bounds(SPRITE);
        assert!((bounds.center - Vec2::new(148.0, 132.0)).length() < 1e-3);
        assert_eq!(bounds.radius, 32.0);

        let at_start = controller.bounds_for_collision(0.0, SPRITE);
        assert_eq!(at_start.center, Vec2::new(132.0, 132.0));
    }

    #[test]
    fn test_easy_bounds_use_head_position() {
        let mut controller = ChainController::new(Vec2::new(100.0, 100.0), STRIDE, Difficulty::Easy);
        controller.tick(0.1, &press(DirectionKeys::down()));
        assert_eq!(controller.progress(), 0.0);
        let head = controller.chain().head().at;
        assert_eq!(controller.bounds(SPRITE).center, head + Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_set_mode_keeps_chain() {
        let mut controller = ChainController::new(Vec2::ZERO, STRIDE, Difficulty::Hard);
        controller.grow();
        controller.tick(0.0, &press(DirectionKeys::down()));
        controller.tick(0.2, &ChainInput::default());
        let head = *controller.chain().head();

        controller.set_mode(Difficulty::Easy);
        assert_eq!(controller.mode(), Difficulty::Easy);
        assert_eq!(controller.len(), 2);
        assert_eq!(*controller.chain().head(), head);
        assert_eq!(controller.progress(), 0.0);

        controller.set_mode(Difficulty::Medium);
        match controller.policy() {
            MovementPolicy::Discrete(stepper) => assert!(stepper.buffer().is_empty()),
            MovementPolicy::Continuous(_) => panic!("medium must step"),
        }
        // Resumes along the current heading
        controller.tick(0.3, &ChainInput::default());
        assert_eq!(controller.chain().head().direction, DOWN);
    }

    #[test]
    fn test_set_mode_after_easy_movement_keeps_stepping() {
        let mut controller = ChainController::new(Vec2::new(640.0, 320.0), 64.0, Difficulty::Easy);
        controller.grow();
        controller.grow();
        let right = press(DirectionKeys::right());
        for _ in 0..30 {
            assert_eq!(controller.tick(FRAME_DT, &right), TickOutcome::Moved);
        }
        let head = controller.chain().head().at;

        controller.set_mode(Difficulty::Hard);
        let ahead = head + RIGHT * 64.0;
        assert!(controller.chain().head().to.abs_diff_eq(ahead, 1e-3));
        assert_eq!(controller.tick(0.2, &ChainInput::default()), TickOutcome::Moved);
        assert!(controller.chain().head().at.abs_diff_eq(ahead, 1e-3));
        assert_eq!(controller.len(), 3);
    }

    #[test]
    fn test_initialize_resets_run() {
        let mut controller = ChainController::new(Vec2::ZERO, STRIDE, Difficulty::Hard);
        controller.grow();
        controller.tick(0.15, &ChainInput::default());

        controller.initialize(Vec2::new(64.0, 64.0), STRIDE, Difficulty::Hard);
        assert_eq!(controller.len(), 1);
        assert_eq!(controller.progress(), 0.0);
        assert_eq!(controller.chain().head().at, Vec2::new(64.0, 64.0));
        assert_eq!(controller.chain().head().direction, RIGHT);
    }

    #[test]
    fn test_segment_positions_head_first() {
        let mut controller = ChainController::new(Vec2::ZERO, STRIDE, Difficulty::Hard);
        controller.grow();
        let positions = controller.segment_positions();
        assert_eq!(positions, vec![Vec2::ZERO, Vec2::new(-32.0, 0.0)]);
    }
}
