//! Filesystem utilities.

use std::path::{Path, PathBuf};

/// Expand path with tilde.
pub fn expand_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();

    if let Ok(stripped) = path.strip_prefix("~") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }

    path.to_path_buf()
}

/// Make a path absolute against the current directory without touching the
/// filesystem, so it works for paths that do not exist.
pub fn absolutize(path: impl AsRef<Path>) -> PathBuf {
    let path = expand_path(path);
    if path.is_absolute() {
        return path;
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path,
    }
}
