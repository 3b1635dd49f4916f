use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};

use uv_static::EnvVars;
use uv_vcs::{ExistingCheckout, VcsError};

use crate::commands::ExitStatus;
use crate::printer::Printer;

mod commands;
mod logging;
mod printer;

#[derive(Parser)]
#[command(name = "uv-vcs", author, version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Do not print any output.
    #[arg(global = true, long, short, conflicts_with = "verbose")]
    quiet: bool,

    /// Use verbose output.
    #[arg(global = true, long, short, conflicts_with = "quiet")]
    verbose: bool,

    /// Control colors in output.
    #[arg(global = true, long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    /// Enables colored output only when the output is going to a terminal or TTY with support.
    #[default]
    Auto,
    /// Enables colored output regardless of the detected environment.
    Always,
    /// Disables colored output.
    Never,
}

impl From<ColorChoice> for anstream::ColorChoice {
    fn from(value: ColorChoice) -> Self {
        match value {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Split a VCS requirement URL into its parts.
    Parse(ParseArgs),
    /// Check out a VCS requirement URL, reconciling any existing checkout.
    Obtain(ObtainArgs),
    /// Export a clean tree, without VCS metadata.
    Export(ExportArgs),
    /// Print a pinned requirement URL for a working copy.
    Freeze(FreezeArgs),
    /// Print the current revision of a working copy.
    Revision(RevisionArgs),
    /// List the supported backends and their URL schemes.
    Backends,
}

#[derive(Args)]
struct ParseArgs {
    /// The requirement URL (e.g., `bzr+https://example.com/repo@42#egg=project`).
    url: String,

    /// The format in which to print the parts of the URL.
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    output_format: OutputFormat,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// One `key: value` line per part.
    #[default]
    Text,
    /// A JSON object.
    Json,
}

#[derive(Args)]
struct ObtainArgs {
    /// The requirement URL to check out.
    url: String,

    /// The directory to check out into.
    dest: PathBuf,

    /// What to do when the destination exists and is not a checkout of the requested URL.
    #[arg(
        long,
        value_enum,
        env = EnvVars::UV_VCS_EXISTING_ACTION,
        default_value_t = ExistingCheckout::Abort
    )]
    on_existing: ExistingCheckout,
}

#[derive(Args)]
struct ExportArgs {
    /// The requirement URL to export.
    url: String,

    /// The directory to export into. Anything already there is removed.
    location: PathBuf,
}

#[derive(Args)]
struct FreezeArgs {
    /// The working copy to describe.
    location: PathBuf,

    /// The name of the project in the working copy, used for the `#egg=` fragment.
    #[arg(long)]
    name: String,
}

#[derive(Args)]
struct RevisionArgs {
    /// The working copy to inspect.
    location: PathBuf,
}

fn inner() -> Result<ExitStatus> {
    let cli = Cli::parse();

    // `NO_COLOR` and `FORCE_COLOR` take precedence over `--color`.
    let color = if std::env::var_os(EnvVars::NO_COLOR).is_some_and(|value| !value.is_empty()) {
        ColorChoice::Never
    } else if std::env::var_os(EnvVars::FORCE_COLOR).is_some_and(|value| !value.is_empty()) {
        ColorChoice::Always
    } else {
        cli.color
    };
    anstream::ColorChoice::write_global(color.into());

    logging::setup_logging(if cli.verbose {
        logging::Level::Verbose
    } else {
        logging::Level::Default
    })?;

    let printer = if cli.quiet {
        Printer::Quiet
    } else if cli.verbose {
        Printer::Verbose
    } else {
        Printer::Default
    };

    if !cli.quiet {
        uv_warnings::enable();
    }

    match cli.command {
        Commands::Parse(args) => commands::parse(&args.url, args.output_format, printer),
        Commands::Obtain(args) => {
            commands::obtain(&args.url, &args.dest, args.on_existing, printer)
        }
        Commands::Export(args) => commands::export(&args.url, &args.location, printer),
        Commands::Freeze(args) => commands::freeze(&args.location, &args.name, printer),
        Commands::Revision(args) => commands::revision(&args.location, printer),
        Commands::Backends => commands::backends(printer),
    }
}

fn main() -> ExitCode {
    match inner() {
        Ok(code) => code.into(),
        Err(err) => {
            let mut output = String::new();
            if uv_warnings::write_error_chain(err.as_ref(), &mut output).is_ok() {
                #[allow(clippy::print_stderr)]
                {
                    anstream::eprint!("{output}");
                }
            }

            // Errors in user input exit with 1.
            let status = match err.downcast_ref::<VcsError>() {
                Some(VcsError::MalformedUrl(_) | VcsError::DestinationExists(_)) => {
                    ExitStatus::Failure
                }
                _ => ExitStatus::Error,
            };
            status.into()
        }
    }
}
