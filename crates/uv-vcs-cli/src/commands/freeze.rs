use std::fmt::Write;
use std::path::Path;

use anyhow::{Result, bail};
use tracing::debug;

use uv_fs::Simplified;
use uv_vcs::{VCS, VcsError};

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// Print a pinned requirement URL that reproduces the working copy at `location`.
pub(crate) fn freeze(location: &Path, name: &str, printer: Printer) -> Result<ExitStatus> {
    let Some(backend) = VCS.backend_for_location(location) else {
        bail!(
            "`{}` is not a working copy of any supported VCS (looked for: {})",
            location.user_display(),
            VCS.dirnames().collect::<Vec<_>>().join(", ")
        );
    };
    debug!("Using the `{}` backend", backend.name());

    let Some(requirement) = backend.get_src_requirement(name, location)? else {
        return Err(VcsError::UnknownOrigin(location.to_path_buf()).into());
    };
    writeln!(printer.stdout(), "{requirement}")?;

    Ok(ExitStatus::Success)
}
