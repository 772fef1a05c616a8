//! Filesystem locations used by the store, the session slot and the span log.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "CARLOT_DATA_DIR";

/// Returns the directory holding the catalog, the session slot and trace files.
///
/// `$CARLOT_DATA_DIR` when set and non-empty, otherwise
/// `$HOME/.local/share/carlot`, falling back to `./.carlot` without a home
/// directory.
#[must_use]
pub fn get_data_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return PathBuf::from(expand_tilde(&dir.to_string_lossy()));
    }
    std::env::var_os("HOME")
        .filter(|h| !h.is_empty())
        .map_or_else(
            || PathBuf::from(".carlot"),
            |home| PathBuf::from(home).join(".local").join("share").join("carlot"),
        )
}

/// Default location of the JSON session slot.
#[must_use]
pub fn default_session_file() -> PathBuf {
    get_data_dir().join("session.json")
}

/// Expands a leading `~` to `$HOME`.
///
/// Paths without a leading tilde, and any path when `HOME` is unset, are
/// returned unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> String {
    let Some(home) = std::env::var_os("HOME").filter(|h| !h.is_empty()) else {
        return path.to_string();
    };
    let home = home.to_string_lossy();

    if path == "~" {
        home.into_owned()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{}/{rest}", home.trim_end_matches('/'))
    } else {
        path.to_string()
    }
}
