use std::path::{Component, Path, PathBuf};
use std::sync::LazyLock;

use url::Url;

/// The current working directory.
pub static CWD: LazyLock<PathBuf> =
    LazyLock::new(|| std::env::current_dir().expect("The current directory must exist"));

pub trait Simplified {
    /// Simplify a [`Path`].
    ///
    /// On Windows, this will strip the `\\?\` prefix from paths. On other platforms, it's a no-op.
    fn simplified(&self) -> &Path;

    /// Render a [`Path`] for display.
    ///
    /// On Windows, this will strip the `\\?\` prefix from paths. On other platforms, it's
    /// equivalent to [`std::path::Display`].
    fn simplified_display(&self) -> std::path::Display<'_>;

    /// Render a [`Path`] for user-facing display.
    ///
    /// Like [`Simplified::simplified_display`], but relativizes the path against the current
    /// working directory.
    fn user_display(&self) -> std::path::Display<'_>;
}

impl<T: AsRef<Path>> Simplified for T {
    fn simplified(&self) -> &Path {
        dunce::simplified(self.as_ref())
    }

    fn simplified_display(&self) -> std::path::Display<'_> {
        dunce::simplified(self.as_ref()).display()
    }

    fn user_display(&self) -> std::path::Display<'_> {
        let path = dunce::simplified(self.as_ref());

        // If current working directory is root, display the path as-is.
        if CWD.ancestors().nth(1).is_none() {
            return path.display();
        }

        // Attempt to strip the current working directory, then the canonicalized current working
        // directory, in case they differ.
        let path = path.strip_prefix(CWD.simplified()).unwrap_or(path);

        path.display()
    }
}

/// Normalize a path, removing things like `.` and `..`.
///
/// Source: <https://github.com/rust-lang/cargo/blob/b48c41aedbd69ee3990d62a0e2006edbb506a480/crates/cargo-util/src/paths.rs#L76C1-L109C2>
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let mut components = path.as_ref().components().peekable();
    let mut ret = if let Some(c @ Component::Prefix(..)) = components.peek().copied() {
        components.next();
        PathBuf::from(c.as_os_str())
    } else {
        PathBuf::new()
    };

    for component in components {
        match component {
            Component::Prefix(..) => unreachable!(),
            Component::RootDir => {
                ret.push(component.as_os_str());
            }
            Component::CurDir => {}
            Component::ParentDir => {
                ret.pop();
            }
            Component::Normal(c) => {
                ret.push(c);
            }
        }
    }
    ret
}

/// Make `path` absolute (relative to the current working directory) and normalized.
pub fn absolutize_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(CWD.join(path))
    }
}

/// Convert a local filesystem path into a `file://` URL.
///
/// Relative paths are resolved against the current working directory.
pub fn path_to_url(path: impl AsRef<Path>) -> std::io::Result<Url> {
    let path = absolutize_path(path);
    Url::from_file_path(&path).map_err(|()| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            format!("Path cannot be converted to a URL: {}", path.display()),
        )
    })
}

/// Returns `true` if `location` names a path on the local filesystem rather than a remote URL.
///
/// A location is local if it is an absolute path or, on Windows, starts with a drive letter.
pub fn is_local_path(location: &str) -> bool {
    if location.starts_with('/') || location.starts_with(std::path::MAIN_SEPARATOR) {
        return true;
    }
    if cfg!(windows) {
        let bytes = location.as_bytes();
        return bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';
    }
    false
}

#[cfg(test)]
mod tests;
