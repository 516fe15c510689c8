//! Filesystem location helpers.
//!
//! Resolves where propfolio keeps its store and trace files, and expands
//! `~`-prefixed paths from configuration.

use std::path::PathBuf;

/// Environment variable that overrides the data directory.
pub const DATA_DIR_ENV: &str = "PROPFOLIO_DATA_DIR";

/// Returns the data directory for propfolio storage.
///
/// Resolution order:
/// 1. `$PROPFOLIO_DATA_DIR` if set and non-empty
/// 2. `~/.local/share/propfolio`
/// 3. `./propfolio-data` when no home directory is known
#[must_use]
pub fn default_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return PathBuf::from(dir);
    }

    home_dir().map_or_else(
        || PathBuf::from("propfolio-data"),
        |home| home.join(".local").join("share").join("propfolio"),
    )
}

fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or with no known home directory, are returned
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let Some(home) = home_dir() else {
        return PathBuf::from(path);
    };

    if path == "~" {
        home
    } else if let Some(rest) = path.strip_prefix("~/") {
        home.join(rest)
    } else {
        PathBuf::from(path)
    }
}
