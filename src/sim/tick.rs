//! Per-frame scene update
//!
//! Moves the slime and the prey, resolves eating, wall bounces and game over.
//! Returns the events of the frame so a front end can play sounds or update
//! the HUD.

use super::collision::{circle_leaves_room, wall_contacts};
use super::controller::TickOutcome;
use super::policy::ChainInput;
use super::state::{GameOverReason, GamePhase, GameState};
use crate::consts::{GOLDEN_PREY_POINTS, PREY_POINTS};

/// Input commands for a single frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Directional input for the slime
    pub chain: ChainInput,
    /// Pause toggle
    pub pause: bool,
}

/// Something noteworthy that happened during a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Paused,
    Resumed,
    /// Slime ate prey `index`
    PreyEaten { index: usize, golden: bool, points: u32 },
    /// Prey `index` bounced off a wall
    PreyBounced { index: usize },
    GameOver { reason: GameOverReason, score: u32 },
}

/// Advance the scene by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) -> Vec<GameEvent> {
    let mut events = Vec::new();

    if state.phase == GamePhase::GameOver {
        return events;
    }

    if input.pause {
        state.toggle_pause();
        events.push(match state.phase {
            GamePhase::Paused => GameEvent::Paused,
            _ => GameEvent::Resumed,
        });
    }

    if state.phase == GamePhase::Paused {
        return events;
    }

    if state.slime.tick(dt, &input.chain) == TickOutcome::SelfCollision {
        state.end_run(GameOverReason::SelfCollision);
        events.push(GameEvent::GameOver {
            reason: GameOverReason::SelfCollision,
            score: state.score,
        });
        return events;
    }

    for prey in &mut state.prey {
        prey.update(dt);
    }

    collision_checks(state, &mut events);

    events
}

fn collision_checks(state: &mut GameState, events: &mut Vec<GameEvent>) {
    for index in 0..state.prey.len() {
        let slime_bounds = state.slime.bounds(state.slime_sprite);

        if slime_bounds.intersects(&state.prey[index].bounds(state.prey_sprite)) {
            let golden = state.prey[index].golden;
            state.respawn_prey(index);

            let points = if golden {
                state.slime.grow();
                state.slime.grow();
                GOLDEN_PREY_POINTS
            } else {
                state.slime.grow();
                PREY_POINTS
            };
            state.score += points;
            events.push(GameEvent::PreyEaten {
                index,
                golden,
                points,
            });
        }

        let prey_bounds = state.prey[index].bounds(state.prey_sprite);
        let (vertical, horizontal) = wall_contacts(&prey_bounds, &state.room);
        let mut bounced = false;
        for normal in [vertical, horizontal].into_iter().flatten() {
            state.prey[index].bounce(normal, state.prey_sprite);
            bounced = true;
        }
        if bounced {
            events.push(GameEvent::PreyBounced { index });
        }
    }

    // Touching the wall ends the run
    let slime_bounds = state.slime.bounds(state.slime_sprite);
    if circle_leaves_room(&slime_bounds, &state.room) {
        state.end_run(GameOverReason::Wall);
        events.push(GameEvent::GameOver {
            reason: GameOverReason::Wall,
            score: state.score,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::settings::{Difficulty, Settings};
    use crate::sim::policy::DirectionKeys;
    use glam::Vec2;

    fn hard_state() -> GameState {
        let mut state = GameState::new(&Settings::with_difficulty(Difficulty::Hard), 5);
        // Park the prey in a corner, motionless, away from the slime
        for prey in &mut state.prey {
            prey.pos = Vec2::new(100.0, 100.0);
            prey.vel = Vec2::ZERO;
            prey.golden = false;
        }
        state
    }

    #[test]
    fn test_pause_freezes_slime() {
        let mut state = hard_state();
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };

        let events = tick(&mut state, &pause, FRAME_DT);
        assert_eq!(events, vec![GameEvent::Paused]);

        let head = *state.slime.chain().head();
        tick(&mut state, &TickInput::default(), 1.0);
        assert_eq!(*state.slime.chain().head(), head);

        let events = tick(&mut state, &pause, 0.0);
        assert_eq!(events, vec![GameEvent::Resumed]);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = hard_state();
        let head = state.slime.chain().head().at;
        state.prey[0].pos = head;

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::PreyEaten {
            index: 0,
            golden: false,
            points: 100,
        }));
        assert_eq!(state.score, 100);
        assert_eq!(state.slime.len(), 2);
        // Respawned elsewhere
        assert_ne!(state.prey[0].pos, head);
    }

    #[test]
    fn test_golden_prey_grows_twice() {
        let mut state = hard_state();
        state.prey[0].pos = state.slime.chain().head().at;
        state.prey[0].golden = true;
        state.prey[0].golden_timer = 5.0;

        tick(&mut state, &TickInput::default(), 0.0);
        assert_eq!(state.score, 200);
        assert_eq!(state.slime.len(), 3);
    }

    #[test]
    fn test_prey_bounces_off_wall() {
        let mut state = hard_state();
        state.prey[0].pos = Vec2::new(state.room.max.x - 40.0, 300.0);
        state.prey[0].vel = Vec2::new(300.0, 0.0);

        let events = tick(&mut state, &TickInput::default(), 0.0);
        assert!(events.contains(&GameEvent::PreyBounced { index: 0 }));
        assert!(state.prey[0].vel.x < 0.0);
    }

    #[test]
    fn test_running_into_wall_ends_run() {
        let mut state = hard_state();
        let right = TickInput {
            chain: ChainInput::keys(DirectionKeys::right()),
            ..Default::default()
        };

        let mut over = None;
        for _ in 0..200 {
            for event in tick(&mut state, &right, FRAME_DT) {
                if let GameEvent::GameOver { reason, .. } = event {
                    over = Some(reason);
                }
            }
            if over.is_some() {
                break;
            }
        }

        assert_eq!(over, Some(GameOverReason::Wall));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.game_over_reason, Some(GameOverReason::Wall));

        // Further ticks are ignored
        assert!(tick(&mut state, &right, FRAME_DT).is_empty());
    }

    #[test]
    fn test_self_collision_ends_run() {
        let mut state = hard_state();
        for _ in 0..4 {
            state.slime.grow();
        }

        let steps = [
            DirectionKeys::down(),
            DirectionKeys::left(),
            DirectionKeys::up(),
            DirectionKeys::right(),
        ];
        let mut events = Vec::new();
        for keys in steps {
            let press = TickInput {
                chain: ChainInput::keys(keys),
                ..Default::default()
            };
            events.extend(tick(&mut state, &press, 0.0));
            events.extend(tick(&mut state, &TickInput::default(), 0.2));
        }

        assert_eq!(
            events,
            vec![GameEvent::GameOver {
                reason: GameOverReason::SelfCollision,
                score: 0,
            }]
        );
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_retry_after_game_over() {
        let mut state = hard_state();
        state.end_run(GameOverReason::Wall);
        state.new_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert!(state.game_over_reason.is_none());
    }
}
