//! Movement policies
//!
//! Hard and Medium step the chain one tile at a time on a timer, taking turns
//! from a [`DirectionBuffer`]. Easy slides the head continuously along the
//! held direction. The policy is picked from the [`Difficulty`] once and never
//! re-checked inside the update path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::buffer::DirectionBuffer;
use super::chain::{SegmentChain, Step};
use crate::consts::EASY_SPEED;
use crate::settings::Difficulty;
use crate::{DOWN, LEFT, RIGHT, UP};

/// State of the four directional actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectionKeys {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl DirectionKeys {
    pub const fn up() -> Self {
        Self {
            up: true,
            down: false,
            left: false,
            right: false,
        }
    }

    pub const fn down() -> Self {
        Self {
            up: false,
            down: true,
            left: false,
            right: false,
        }
    }

    pub const fn left() -> Self {
        Self {
            up: false,
            down: false,
            left: true,
            right: false,
        }
    }

    pub const fn right() -> Self {
        Self {
            up: false,
            down: false,
            left: false,
            right: true,
        }
    }

    /// Single turn for the discrete modes.
    ///
    /// Vertical beats horizontal: up, then down, then left, then right.
    pub fn turn(&self) -> Option<Vec2> {
        if self.up {
            Some(UP)
        } else if self.down {
            Some(DOWN)
        } else if self.left {
            Some(LEFT)
        } else if self.right {
            Some(RIGHT)
        } else {
            None
        }
    }

    /// Unit-length (or zero) movement axis for continuous movement
    pub fn axis(&self) -> Vec2 {
        let y = if self.up {
            -1.0
        } else if self.down {
            1.0
        } else {
            0.0
        };
        let x = if self.left {
            -1.0
        } else if self.right {
            1.0
        } else {
            0.0
        };
        Vec2::new(x, y).normalize_or_zero()
    }
}

/// Input for one controller tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainInput {
    /// Actions pressed this tick (discrete modes)
    pub pressed: DirectionKeys,
    /// Actions currently held (continuous mode)
    pub held: DirectionKeys,
}

impl ChainInput {
    /// Input with the same keys pressed and held
    pub fn keys(keys: DirectionKeys) -> Self {
        Self {
            pressed: keys,
            held: keys,
        }
    }
}

/// Timer-driven tile stepping (Hard / Medium)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscreteStepper {
    interval: f32,
    timer: f32,
    progress: f32,
    next_direction: Vec2,
    buffer: DirectionBuffer,
}

impl DiscreteStepper {
    pub fn new(interval: f32, capacity: usize, heading: Vec2) -> Self {
        Self {
            interval,
            timer: 0.0,
            progress: 0.0,
            next_direction: heading,
            buffer: DirectionBuffer::new(capacity),
        }
    }

    pub fn interval(&self) -> f32 {
        self.interval
    }

    pub fn buffer(&self) -> &DirectionBuffer {
        &self.buffer
    }

    /// Offer a turn, validated against the queue tail or the head direction
    pub fn queue_turn(&mut self, direction: Vec2, head_direction: Vec2) -> bool {
        self.buffer.try_enqueue(direction, head_direction)
    }

    fn update(
        &mut self,
        chain: &mut SegmentChain,
        stride: f32,
        dt: f32,
        input: &ChainInput,
    ) -> Step {
        if let Some(turn) = input.pressed.turn() {
            self.queue_turn(turn, chain.head().direction);
        }

        self.timer += dt;

        // One step per tick at most; leftover time rolls into the next step
        let mut step = Step::Clear;
        if self.timer >= self.interval {
            self.timer -= self.interval;
            if let Some(direction) = self.buffer.dequeue() {
                self.next_direction = direction;
            }
            step = chain.advance(self.next_direction, stride);
        }

        self.progress = (self.timer / self.interval).clamp(0.0, 1.0);
        step
    }
}

/// Free movement (Easy)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousMover {
    speed: f32,
}

impl ContinuousMover {
    pub fn new(speed: f32) -> Self {
        Self { speed }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    fn update(&mut self, chain: &mut SegmentChain, dt: f32, input: &ChainInput) {
        let axis = input.held.axis();
        chain.advance_continuous(axis * self.speed * dt);
    }
}

/// Movement policy chosen for a run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum MovementPolicy {
    Discrete(DiscreteStepper),
    Continuous(ContinuousMover),
}

impl MovementPolicy {
    /// Build the policy for `difficulty`, with the chain currently heading
    /// along `heading`
    pub fn for_difficulty(difficulty: Difficulty, heading: Vec2) -> Self {
        match difficulty.step_interval() {
            Some(interval) => MovementPolicy::Discrete(DiscreteStepper::new(
                interval,
                difficulty.buffer_capacity(),
                heading,
            )),
            None => MovementPolicy::Continuous(ContinuousMover::new(EASY_SPEED)),
        }
    }

    /// Apply one tick of input and time to the chain
    pub fn update(
        &mut self,
        chain: &mut SegmentChain,
        stride: f32,
        dt: f32,
        input: &ChainInput,
    ) -> Step {
        match self {
            MovementPolicy::Discrete(stepper) => stepper.update(chain, stride, dt, input),
            MovementPolicy::Continuous(mover) => {
                mover.update(chain, dt, input);
                Step::Clear
            }
        }
    }

    /// Interpolation fraction between the head's `at` and `to`
    pub fn progress(&self) -> f32 {
        match self {
            MovementPolicy::Discrete(stepper) => stepper.progress,
            MovementPolicy::Continuous(_) => 0.0,
        }
    }

    pub fn is_continuous(&self) -> bool {
        matches!(self, MovementPolicy::Continuous(_))
    }
}
