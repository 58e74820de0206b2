//! Deterministic slime simulation
//!
//! Leaves first: direction buffer, segment chain, movement policies, the
//! chain controller, then the room scene that drives it.

pub mod buffer;
pub mod chain;
pub mod collision;
pub mod controller;
pub mod policy;
pub mod prey;
pub mod state;
pub mod tick;

pub use buffer::DirectionBuffer;
pub use chain::{Segment, SegmentChain, Step};
pub use collision::{Circle, Rect, circle_leaves_room, reflect_velocity, wall_contacts};
pub use controller::{ChainController, TickOutcome};
pub use policy::{ChainInput, ContinuousMover, DirectionKeys, DiscreteStepper, MovementPolicy};
pub use prey::Prey;
pub use state::{GameOverReason, GamePhase, GameState};
pub use tick::{GameEvent, TickInput, tick};
