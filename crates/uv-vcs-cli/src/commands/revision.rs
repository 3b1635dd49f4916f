use std::fmt::Write;
use std::path::Path;

use anyhow::{Result, bail};

use uv_fs::Simplified;
use uv_vcs::VCS;

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// Print the current revision of the working copy at `location`.
pub(crate) fn revision(location: &Path, printer: Printer) -> Result<ExitStatus> {
    let Some(backend) = VCS.backend_for_location(location) else {
        bail!(
            "`{}` is not a working copy of any supported VCS",
            location.user_display()
        );
    };
    let revision = backend.get_revision(location)?;
    writeln!(printer.stdout(), "{revision}")?;

    Ok(ExitStatus::Success)
}
