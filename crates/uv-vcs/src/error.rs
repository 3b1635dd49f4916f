use std::path::PathBuf;

use uv_fs::Simplified;
use uv_vcs_types::VcsUrlParseError;

use crate::process::CommandError;

#[derive(Debug, thiserror::Error)]
pub enum VcsError {
    #[error(transparent)]
    MalformedUrl(#[from] VcsUrlParseError),
    #[error("No VCS backend named `{0}` is registered")]
    UnknownBackend(String),
    #[error(transparent)]
    CommandFailed(#[from] CommandError),
    #[error("Unable to determine the remote URL of the checkout at `{}`", _0.user_display())]
    UnknownOrigin(PathBuf),
    #[error("Revision `{revision}` is ambiguous; it matches: {}", candidates.join(", "))]
    AmbiguousRevision {
        revision: String,
        candidates: Vec<String>,
    },
    #[error("Destination `{}` already exists", _0.user_display())]
    DestinationExists(PathBuf),
    #[error("`{command}` did not produce any output")]
    EmptyOutput { command: String },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
