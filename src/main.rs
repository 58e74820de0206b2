//! Slime Chain entry point
//!
//! Headless runner: plays one run with a simple prey-chasing autopilot at a
//! fixed 60 Hz frame time, then records the score.
//!
//! Usage: `slime-chain [easy|medium|hard] [seed]`

use glam::Vec2;

use slime_chain::consts::FRAME_DT;
use slime_chain::highscores::{self, HighScores};
use slime_chain::sim::{ChainInput, DirectionKeys, GameEvent, GameState, TickInput, tick};
use slime_chain::{Difficulty, Settings};

/// Give up after two minutes of play
const MAX_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut settings = Settings::load();
    if let Some(arg) = args.next() {
        match Difficulty::from_str(&arg) {
            Some(difficulty) => settings.difficulty = difficulty,
            None => log::warn!("Unknown difficulty {:?}, using {}", arg, settings.difficulty.as_str()),
        }
    }
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x51_1e);

    log::info!(
        "Slime Chain starting: {} mode, seed {}",
        settings.difficulty.as_str(),
        seed
    );

    let mut state = GameState::new(&settings, seed);
    let mut frames = 0;
    while frames < MAX_FRAMES {
        let input = TickInput {
            chain: ChainInput::keys(autopilot(&state)),
            pause: false,
        };
        for event in tick(&mut state, &input, FRAME_DT) {
            match event {
                GameEvent::PreyEaten { golden, points, .. } => {
                    log::info!("Ate {} prey (+{})", if golden { "golden" } else { "a" }, points);
                }
                GameEvent::GameOver { reason, score } => {
                    log::info!("Game over: {:?}, score {}", reason, score);
                }
                _ => {}
            }
        }
        if state.game_over_reason.is_some() {
            break;
        }
        frames += 1;
    }

    let mut scores = HighScores::load();
    let made_board = scores.add_score(
        state.score,
        settings.difficulty,
        &settings.player_name,
        highscores::now_millis(),
    );
    scores.save();

    println!(
        "{} run: score {}, length {}, {:.1}s{}",
        settings.difficulty.as_str(),
        state.score,
        state.slime.len(),
        frames as f32 * FRAME_DT,
        if made_board { " - new high score!" } else { "" }
    );
    for (rank, entry) in scores.scores(settings.difficulty).iter().enumerate() {
        println!(
            "{:>2}. {:<12} {:>6}  {}",
            rank + 1,
            entry.player_name,
            entry.score,
            highscores::format_date(entry.timestamp)
        );
    }
}

/// Steer toward the nearest prey along the dominant axis
fn autopilot(state: &GameState) -> DirectionKeys {
    let head = state.slime.bounds(state.slime_sprite).center;
    let target = state
        .prey
        .iter()
        .map(|p| p.bounds(state.prey_sprite).center)
        .min_by(|a, b| {
            a.distance_squared(head)
                .partial_cmp(&b.distance_squared(head))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .unwrap_or(state.room.center());

    let to_target: Vec2 = target - head;
    if to_target.x.abs() > to_target.y.abs() {
        if to_target.x > 0.0 {
            DirectionKeys::right()
        } else {
            DirectionKeys::left()
        }
    } else if to_target.y > 0.0 {
        DirectionKeys::down()
    } else {
        DirectionKeys::up()
    }
}
