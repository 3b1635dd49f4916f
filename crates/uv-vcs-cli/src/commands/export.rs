use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use uv_fs::Simplified;
use uv_vcs::VCS;

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// Export a clean tree, without VCS metadata, into `location`.
pub(crate) fn export(url: &str, location: &Path, printer: Printer) -> Result<ExitStatus> {
    let url = VCS.parse(url)?;
    let backend = VCS.backend_for_url(&url)?;

    backend
        .export(location, &url)
        .with_context(|| format!("Failed to export `{url}`"))?;

    writeln!(
        printer.stderr(),
        "Exported {} to {}",
        url.bold(),
        location.user_display().cyan()
    )?;

    Ok(ExitStatus::Success)
}
