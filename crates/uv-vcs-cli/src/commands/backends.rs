use std::fmt::Write;

use anyhow::Result;

use uv_vcs::VCS;

use crate::commands::ExitStatus;
use crate::printer::Printer;

/// List the registered backends and the URL schemes they claim.
pub(crate) fn backends(printer: Printer) -> Result<ExitStatus> {
    let mut stdout = printer.stdout();
    for name in VCS.names() {
        let Some(backend) = VCS.get(name) else {
            continue;
        };
        writeln!(
            stdout,
            "{name} ({}): {}",
            backend.dirname(),
            backend.schemes().join(", ")
        )?;
    }
    Ok(ExitStatus::Success)
}
