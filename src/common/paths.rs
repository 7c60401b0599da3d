//! Configuration file locations
//!
//! Uses the directories crate for platform-appropriate locations:
//! - Linux: `~/.config/kv-harness/`
//! - macOS: `~/Library/Application Support/kv-harness/`
//! - Windows: `%APPDATA%\kv-harness\`

use std::path::{Path, PathBuf};

/// Application name used for per-user directories
const APP_NAME: &str = "kv-harness";

/// Get the configuration directory path
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the configuration file
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("config.toml"))
}

/// Whether `path` is a bare program name such as `redis-runner`
///
/// Bare names are looked up on `PATH` when they do not exist relative
/// to the working directory.
pub fn is_bare_program_name(path: &Path) -> bool {
    let mut components = path.components();
    matches!(
        (components.next(), components.next()),
        (Some(std::path::Component::Normal(_)), None)
    )
}
