//! Platform abstraction layer
//!
//! Resolves the per-user application-data directory where scores and
//! settings live:
//! - Windows: `%APPDATA%`
//! - macOS: `~/Library/Application Support`
//! - Other unix: `$XDG_DATA_HOME`, else `~/.local/share`

use std::env;
use std::path::PathBuf;

/// Directory name under the platform data directory
pub const APP_DIR: &str = "slime-chain";

/// Per-user application-data directory for this game
pub fn data_dir() -> Option<PathBuf> {
    base_data_dir().map(|base| base.join(APP_DIR))
}

/// Full path of a file inside [`data_dir`]
pub fn data_file(name: &str) -> Option<PathBuf> {
    data_dir().map(|dir| dir.join(name))
}

#[cfg(target_os = "windows")]
fn base_data_dir() -> Option<PathBuf> {
    non_empty_var("APPDATA").map(PathBuf::from)
}

#[cfg(target_os = "macos")]
fn base_data_dir() -> Option<PathBuf> {
    non_empty_var("HOME").map(|home| PathBuf::from(home).join("Library/Application Support"))
}

#[cfg(not(any(target_os = "windows", target_os = "macos")))]
fn base_data_dir() -> Option<PathBuf> {
    non_empty_var("XDG_DATA_HOME")
        .map(PathBuf::from)
        .or_else(|| non_empty_var("HOME").map(|home| PathBuf::from(home).join(".local/share")))
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.is_empty())
}
