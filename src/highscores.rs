//! High score leaderboard system
//!
//! Top 10 scores per difficulty, persisted as JSON in the user data
//! directory. Loading and saving never fail the game: a missing or broken
//! file means an empty board, a failed save is logged and forgotten.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::persistence;
use crate::platform;
use crate::settings::Difficulty;

/// Maximum number of high scores kept per difficulty
pub const MAX_HIGH_SCORES: usize = 10;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub player_name: String,
    pub score: u32,
    pub difficulty: Difficulty,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// High score leaderboard, one list per difficulty (best first)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct HighScores {
    #[serde(default)]
    pub easy: Vec<HighScoreEntry>,
    #[serde(default)]
    pub medium: Vec<HighScoreEntry>,
    #[serde(default)]
    pub hard: Vec<HighScoreEntry>,
}

impl HighScores {
    const FILE_NAME: &'static str = "highscores.json";

    /// Create empty leaderboard
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores for one difficulty, best first
    pub fn scores(&self, difficulty: Difficulty) -> &[HighScoreEntry] {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Medium => &self.medium,
            Difficulty::Hard => &self.hard,
        }
    }

    fn scores_mut(&mut self, difficulty: Difficulty) -> &mut Vec<HighScoreEntry> {
        match difficulty {
            Difficulty::Easy => &mut self.easy,
            Difficulty::Medium => &mut self.medium,
            Difficulty::Hard => &mut self.hard,
        }
    }

    /// Check if a score would make the board
    pub fn qualifies(&self, score: u32, difficulty: Difficulty) -> bool {
        self.potential_rank(score, difficulty).is_some()
    }

    /// Get the rank a score would achieve (1-indexed, None if it doesn't qualify).
    /// Equal scores already on the board stay ahead.
    pub fn potential_rank(&self, score: u32, difficulty: Difficulty) -> Option<usize> {
        let entries = self.scores(difficulty);
        let rank = entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(entries.len());
        (rank < MAX_HIGH_SCORES).then_some(rank + 1)
    }

    /// Record a finished run. Returns true if it made the top 10.
    pub fn add_score(
        &mut self,
        score: u32,
        difficulty: Difficulty,
        player_name: &str,
        timestamp: f64,
    ) -> bool {
        let Some(rank) = self.potential_rank(score, difficulty) else {
            return false;
        };

        let entries = self.scores_mut(difficulty);
        entries.insert(
            rank - 1,
            HighScoreEntry {
                player_name: player_name.to_string(),
                score,
                difficulty,
                timestamp,
            },
        );
        entries.truncate(MAX_HIGH_SCORES);
        true
    }

    /// Check if a difficulty's board is empty
    pub fn is_empty(&self, difficulty: Difficulty) -> bool {
        self.scores(difficulty).is_empty()
    }

    /// Get the top score for a difficulty (if any)
    pub fn top_score(&self, difficulty: Difficulty) -> Option<u32> {
        self.scores(difficulty).first().map(|e| e.score)
    }

    /// Wipe every board
    pub fn clear(&mut self) {
        *self = Self::new();
    }

    /// Default save file location
    pub fn default_path() -> Option<PathBuf> {
        platform::data_file(Self::FILE_NAME)
    }

    /// Load high scores from the user data directory
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => {
                log::info!("No data directory, starting with empty high scores");
                Self::new()
            }
        }
    }

    /// Load high scores from `path`; any failure yields an empty board
    pub fn load_from(path: &Path) -> Self {
        match persistence::load_json::<HighScores>(path) {
            Ok(Some(mut scores)) => {
                scores.sanitize();
                log::info!(
                    "Loaded {} high scores",
                    scores.easy.len() + scores.medium.len() + scores.hard.len()
                );
                scores
            }
            Ok(None) => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(err) => {
                log::warn!("Discarding unreadable high scores: {err:#}");
                Self::new()
            }
        }
    }

    /// Save high scores to the user data directory (best effort)
    pub fn save(&self) {
        if let Some(path) = Self::default_path() {
            self.save_to(&path);
        }
    }

    /// Save high scores to `path` (best effort)
    pub fn save_to(&self, path: &Path) {
        match persistence::save_json(path, self) {
            Ok(()) => log::info!("High scores saved to {}", path.display()),
            Err(err) => log::warn!("Could not save high scores: {err:#}"),
        }
    }

    /// Re-sort and trim lists edited by hand; entries take the difficulty of
    /// the list they sit in
    fn sanitize(&mut self) {
        for difficulty in Difficulty::ALL {
            let entries = self.scores_mut(difficulty);
            for entry in entries.iter_mut() {
                entry.difficulty = difficulty;
            }
            entries.sort_by(|a, b| b.score.cmp(&a.score));
            entries.truncate(MAX_HIGH_SCORES);
        }
    }
}

/// Current time as a Unix timestamp in milliseconds
pub fn now_millis() -> f64 {
    Utc::now().timestamp_millis() as f64
}

/// Format a timestamp relative to now
pub fn format_date(timestamp: f64) -> String {
    format_date_relative(timestamp, now_millis())
}

/// Format `timestamp` as seen at time `now` (both Unix ms)
pub fn format_date_relative(timestamp: f64, now: f64) -> String {
    let diff_secs = (now - timestamp) / 1000.0;
    let diff_mins = diff_secs / 60.0;
    let diff_hours = diff_mins / 60.0;
    let diff_days = diff_hours / 24.0;

    if diff_days >= 1.0 {
        let days = diff_days.floor() as i64;
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            DateTime::<Utc>::from_timestamp_millis(timestamp as i64)
                .map(|date| date.format("%-m/%-d/%y").to_string())
                .unwrap_or_else(|| "Long ago".to_string())
        }
    } else if diff_hours >= 1.0 {
        let hours = diff_hours.floor() as i64;
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if diff_mins >= 1.0 {
        let mins = diff_mins.floor() as i64;
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
