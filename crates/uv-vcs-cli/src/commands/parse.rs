use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use uv_redacted::DisplaySafeUrl;
use uv_vcs::VCS;

use crate::OutputFormat;
use crate::commands::ExitStatus;
use crate::printer::Printer;

/// The parts of a requirement URL, with credentials masked.
#[derive(Debug, Serialize)]
struct ParsedUrl<'a> {
    backend: &'a str,
    scheme: &'a str,
    url: &'a DisplaySafeUrl,
    command_url: String,
    revision: Option<&'a str>,
    revision_args: Vec<String>,
    credentials: bool,
    egg: Option<&'a str>,
    subdirectory: Option<&'a str>,
    requirement: String,
}

/// Split a requirement URL into its parts.
pub(crate) fn parse(url: &str, format: OutputFormat, printer: Printer) -> Result<ExitStatus> {
    let url = VCS.parse(url)?;
    let backend = VCS.backend_for_url(&url)?;
    let (command_url, rev_options) = backend.get_url_rev_options(&url);

    let parsed = ParsedUrl {
        backend: url.backend(),
        scheme: url.scheme(),
        url: url.url(),
        command_url: command_url.to_string(),
        revision: url.revision(),
        revision_args: rev_options.to_args(),
        credentials: url.credentials().is_some(),
        egg: url.egg(),
        subdirectory: url.subdirectory(),
        requirement: url.to_string(),
    };

    let mut stdout = printer.stdout();
    match format {
        OutputFormat::Json => {
            writeln!(stdout, "{}", serde_json::to_string_pretty(&parsed)?)?;
        }
        OutputFormat::Text => {
            writeln!(stdout, "backend: {}", parsed.backend)?;
            writeln!(stdout, "scheme: {}", parsed.scheme)?;
            writeln!(stdout, "url: {}", parsed.url)?;
            writeln!(stdout, "command url: {}", parsed.command_url)?;
            writeln!(stdout, "revision: {}", parsed.revision.unwrap_or("-"))?;
            writeln!(stdout, "revision args: {}", parsed.revision_args.join(" "))?;
            writeln!(
                stdout,
                "credentials: {}",
                if parsed.credentials { "yes" } else { "no" }
            )?;
            writeln!(stdout, "egg: {}", parsed.egg.unwrap_or("-"))?;
            writeln!(
                stdout,
                "subdirectory: {}",
                parsed.subdirectory.unwrap_or("-")
            )?;
            writeln!(stdout, "requirement: {}", parsed.requirement)?;
        }
    }

    Ok(ExitStatus::Success)
}
