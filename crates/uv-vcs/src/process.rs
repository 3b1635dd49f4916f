use std::ffi::OsString;
use std::fmt::{Debug, Write};
use std::io;
use std::path::{Path, PathBuf};

use cargo_util::{ProcessBuilder, ProcessError};
use tracing::debug;

use uv_fs::Simplified;
use uv_redacted::DisplaySafeUrl;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("`{program}` executable not found. Ensure that it is installed and available.")]
    NotFound {
        program: String,
        #[source]
        source: which::Error,
    },
    #[error("Failed to run `{command}`{}", display_cwd(cwd.as_deref()))]
    Spawn {
        command: String,
        cwd: Option<PathBuf>,
        #[source]
        source: io::Error,
    },
    #[error(
        "Command `{command}` failed{}{}{}",
        display_cwd(cwd.as_deref()),
        display_code(*code),
        display_stderr(stderr)
    )]
    Failed {
        command: String,
        cwd: Option<PathBuf>,
        code: Option<i32>,
        stderr: String,
    },
    #[error("Command `{command}` produced output that is not valid UTF-8")]
    NonUtf8 {
        command: String,
        #[source]
        source: std::string::FromUtf8Error,
    },
}

fn display_cwd(cwd: Option<&Path>) -> String {
    cwd.map(|cwd| format!(" in `{}`", cwd.user_display()))
        .unwrap_or_default()
}

fn display_code(code: Option<i32>) -> String {
    code.map(|code| format!(" (exit status: {code})"))
        .unwrap_or_default()
}

fn display_stderr(stderr: &str) -> String {
    let stderr = stderr.trim();
    if stderr.is_empty() {
        String::new()
    } else {
        format!("\n--- stderr\n{stderr}")
    }
}

/// What to do with the standard output of an external command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StdoutMode {
    /// Capture standard output and return it to the caller.
    Capture,
    /// Let the command write to the parent's standard output.
    Inherit,
}

/// Runs external VCS tools.
///
/// Every backend operation goes through this seam, so tests can substitute a fake tool.
pub trait CommandRunner: Debug + Send + Sync {
    /// Run `program` with `args` in `cwd`, blocking until it exits.
    ///
    /// Returns the captured standard output, or an empty string with [`StdoutMode::Inherit`].
    /// A non-zero exit status is an error.
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
        stdout: StdoutMode,
    ) -> Result<String, CommandError>;
}

/// A [`CommandRunner`] that spawns real processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessRunner;

impl CommandRunner for ProcessRunner {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
        stdout: StdoutMode,
    ) -> Result<String, CommandError> {
        let command = display_command(program, args);
        debug!("Running `{command}`{}", display_cwd(cwd));

        let mut process = ProcessBuilder::new(program);
        process.args(args);
        if let Some(cwd) = cwd {
            process.cwd(cwd);
        }

        let result: anyhow::Result<Vec<u8>> = match stdout {
            StdoutMode::Capture => process.exec_with_output().map(|output| output.stdout),
            StdoutMode::Inherit => process.exec().map(|()| Vec::new()),
        };

        match result {
            Ok(output) => String::from_utf8(output)
                .map_err(|source| CommandError::NonUtf8 { command, source }),
            Err(err) => {
                let cwd = cwd.map(Path::to_path_buf);
                // `ProcessError` renders the full command line, which may carry credentials, so
                // only its exit code and standard error are kept.
                match err.downcast::<ProcessError>() {
                    Ok(process_error) => Err(CommandError::Failed {
                        command,
                        cwd,
                        code: process_error.code,
                        stderr: process_error
                            .stderr
                            .map(|stderr| String::from_utf8_lossy(&stderr).into_owned())
                            .unwrap_or_default(),
                    }),
                    Err(err) => {
                        let root = err.root_cause();
                        let source = match root.downcast_ref::<io::Error>() {
                            Some(source) => io::Error::new(source.kind(), source.to_string()),
                            None => io::Error::other(root.to_string()),
                        };
                        Err(CommandError::Spawn {
                            command,
                            cwd,
                            source,
                        })
                    }
                }
            }
        }
    }
}

/// Locate an executable, preferring the path in the `env_var` environment variable.
pub fn find_executable(name: &str, env_var: &str) -> Result<PathBuf, which::Error> {
    if let Some(path) = std::env::var_os(env_var).filter(|path| !path.is_empty()) {
        debug!(
            "Using `{name}` from `{env_var}`: {}",
            Path::new(&path).user_display()
        );
        return which::which(path);
    }
    which::which(name)
}

/// Render a command line for display, redacting credentials in any URL argument.
pub fn display_command(program: &Path, args: &[OsString]) -> String {
    let mut command = program
        .file_name()
        .unwrap_or(program.as_os_str())
        .to_string_lossy()
        .into_owned();
    for arg in args {
        let arg = arg.to_string_lossy();
        match DisplaySafeUrl::parse(&arg) {
            Ok(url) if url.has_credentials() => {
                let _ = write!(command, " {url}");
            }
            _ => {
                let _ = write!(command, " {arg}");
            }
        }
    }
    command
}
