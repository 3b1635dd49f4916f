use std::fmt::Write;
use std::path::Path;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;

use uv_fs::Simplified;
use uv_vcs::{ExistingCheckout, Obtained, VCS};

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// Check out a requirement URL into `dest`, reconciling an existing checkout.
pub(crate) fn obtain(
    url: &str,
    dest: &Path,
    on_existing: ExistingCheckout,
    printer: Printer,
) -> Result<ExitStatus> {
    let url = VCS.parse(url)?;
    let backend = VCS.backend_for_url(&url)?;

    let obtained = backend
        .obtain(dest, &url, on_existing)
        .with_context(|| format!("Failed to obtain `{url}`"))?;

    let dest = dest.user_display();
    let message = match obtained {
        Obtained::Fetched => format!("Checked out {} to {}", url.bold(), dest.cyan()),
        Obtained::Updated => format!("Updated {} at {}", url.bold(), dest.cyan()),
        Obtained::UpToDate => format!("{} is already up-to-date", dest.cyan()),
        Obtained::Switched => format!("Switched {} to {}", dest.cyan(), url.bold()),
        Obtained::Ignored => format!("Left {} untouched", dest.cyan()),
        Obtained::BackedUp(backup) => format!(
            "Moved the existing {} to {} and checked out {}",
            dest.cyan(),
            backup.user_display().cyan(),
            url.bold()
        ),
    };
    writeln!(printer.stderr(), "{message}")?;

    Ok(ExitStatus::Success)
}
