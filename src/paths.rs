//! XDG-style path utilities for configuration and state directories.
//!
//! XDG Base Directory conventions are preferred over OS-specific locations
//! on every platform.

use std::path::PathBuf;

/// Returns the configuration directory for quip.
///
/// Resolution order:
/// 1. `$XDG_CONFIG_HOME/quip` if `XDG_CONFIG_HOME` is set
/// 2. `~/.config/quip` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn config_dir() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME").map_or_else(
        |_| home_dir().join(".config").join("quip"),
        |xdg| PathBuf::from(xdg).join("quip"),
    )
}

/// Returns the data directory holding persisted client state.
///
/// Resolution order:
/// 1. `$XDG_DATA_HOME/quip` if `XDG_DATA_HOME` is set
/// 2. `~/.local/share/quip` otherwise
///
/// # Panics
///
/// Panics if the home directory cannot be determined.
pub fn data_dir() -> PathBuf {
    std::env::var("XDG_DATA_HOME").map_or_else(
        |_| home_dir().join(".local").join("share").join("quip"),
        |xdg| PathBuf::from(xdg).join("quip"),
    )
}

#[allow(clippy::expect_used)]
fn home_dir() -> PathBuf {
    dirs::home_dir().expect("Failed to determine home directory")
}
