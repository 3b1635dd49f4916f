use std::path::{Path, PathBuf};

use tracing::debug;

pub use crate::path::*;

mod path;

/// Remove the file or directory tree at `path`, if it exists.
///
/// Returns `true` if anything was removed.
pub fn remove_tree(path: impl AsRef<Path>) -> std::io::Result<bool> {
    let path = path.as_ref();
    let metadata = match fs_err::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(false),
        Err(err) => return Err(err),
    };

    debug!("Removing: {}", path.user_display());
    let result = if metadata.is_dir() {
        fs_err::remove_dir_all(path)
    } else {
        fs_err::remove_file(path)
    };
    match result {
        Ok(()) => Ok(true),
        // Lost a race with another remover.
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(err),
    }
}

/// Find the first unused backup location for `dir`.
///
/// Tries `{dir}.bak`, then `{dir}.bak2`, `{dir}.bak3`, and so on.
pub fn backup_dir(dir: impl AsRef<Path>) -> PathBuf {
    let dir = dir.as_ref();
    let mut n = 1;
    loop {
        let extension = if n == 1 {
            ".bak".to_string()
        } else {
            format!(".bak{n}")
        };
        let mut candidate = dir.as_os_str().to_owned();
        candidate.push(extension);
        let candidate = PathBuf::from(candidate);
        if !candidate.exists() {
            return candidate;
        }
        n += 1;
    }
}

/// Move `from` to `to`, creating the parent directory of `to` if necessary.
pub fn rename_with_parents(from: impl AsRef<Path>, to: impl AsRef<Path>) -> std::io::Result<()> {
    let to = to.as_ref();
    if let Some(parent) = to.parent() {
        fs_err::create_dir_all(parent)?;
    }
    fs_err::rename(from.as_ref(), to)
}
