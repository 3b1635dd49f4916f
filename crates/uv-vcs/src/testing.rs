//! A stand-in for the `bzr` executable.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::Bazaar;
use crate::process::{CommandError, CommandRunner, StdoutMode, display_command};

/// A single invocation of the tool.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Call {
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) stdout: StdoutMode,
}

/// Records every invocation and mimics the effect of `checkout` and `export` on disk.
#[derive(Debug, Default)]
pub(crate) struct FakeBzr {
    calls: Mutex<Vec<Call>>,
    info: Mutex<String>,
    revno: Mutex<String>,
    failing: Mutex<Option<&'static str>>,
}

impl FakeBzr {
    /// A [`Bazaar`] backend wired to a new fake.
    pub(crate) fn new() -> (Bazaar, Arc<Self>) {
        let fake = Arc::new(Self::default());
        let bazaar = Bazaar::with_runner(fake.clone()).with_executable("bzr");
        (bazaar, fake)
    }

    /// Set the output of `bzr info`.
    pub(crate) fn set_info(&self, output: &str) {
        *self.info.lock().unwrap() = output.to_string();
    }

    /// Set the output of `bzr revno`.
    pub(crate) fn set_revno(&self, output: &str) {
        *self.revno.lock().unwrap() = output.to_string();
    }

    /// Make the given subcommand exit with an error.
    pub(crate) fn fail_on(&self, subcommand: &'static str) {
        *self.failing.lock().unwrap() = Some(subcommand);
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// The arguments of every invocation, joined with spaces.
    pub(crate) fn commands(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .map(|call| call.args.join(" "))
            .collect()
    }
}

impl CommandRunner for FakeBzr {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        cwd: Option<&Path>,
        stdout: StdoutMode,
    ) -> Result<String, CommandError> {
        let args = args
            .iter()
            .map(|arg| arg.to_string_lossy().into_owned())
            .collect::<Vec<_>>();
        self.calls.lock().unwrap().push(Call {
            args: args.clone(),
            cwd: cwd.map(Path::to_path_buf),
            stdout,
        });

        let subcommand = args.first().map(String::as_str).unwrap_or_default();
        if *self.failing.lock().unwrap() == Some(subcommand) {
            let args = args.iter().map(OsString::from).collect::<Vec<_>>();
            return Err(CommandError::Failed {
                command: display_command(program, &args),
                cwd: cwd.map(Path::to_path_buf),
                code: Some(3),
                stderr: "bzr: ERROR: simulated failure".to_string(),
            });
        }

        match subcommand {
            "checkout" => {
                let dest = Path::new(args.last().unwrap());
                fs_err::create_dir_all(dest.join(".bzr")).unwrap();
                Ok(String::new())
            }
            "export" => {
                let location = Path::new(&args[1]);
                assert!(!location.exists(), "`bzr export` target already exists");
                fs_err::create_dir_all(location).unwrap();
                fs_err::write(location.join("setup.py"), "").unwrap();
                Ok(String::new())
            }
            "info" => Ok(self.info.lock().unwrap().clone()),
            "revno" => Ok(self.revno.lock().unwrap().clone()),
            _ => Ok(String::new()),
        }
    }
}
