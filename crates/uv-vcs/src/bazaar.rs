use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use tracing::{debug, info, instrument};

use uv_fs::{Simplified, is_local_path, path_to_url, remove_tree};
use uv_redacted::DisplaySafeUrl;
use uv_static::EnvVars;
use uv_vcs_types::{Credentials, RevOptions, VcsUrl};

use crate::process::{CommandError, CommandRunner, ProcessRunner, StdoutMode, find_executable};
use crate::{Backend, VcsError};

/// A global cache of the result of `which bzr`.
pub static BZR: LazyLock<Result<PathBuf, which::Error>> =
    LazyLock::new(|| find_executable("bzr", EnvVars::UV_BZR_EXECUTABLE));

/// The labels in `bzr info` output that precede the origin of a working copy, in order of
/// preference.
const URL_LABELS: [&str; 2] = ["checkout of branch:", "parent branch:"];

/// The Bazaar backend, driving the `bzr` command-line tool.
#[derive(Debug, Clone)]
pub struct Bazaar {
    /// An explicit path to `bzr`; when unset, `bzr` is located on first use.
    executable: Option<PathBuf>,
    runner: Arc<dyn CommandRunner>,
}

impl Default for Bazaar {
    fn default() -> Self {
        Self {
            executable: None,
            runner: Arc::new(ProcessRunner),
        }
    }
}

impl Bazaar {
    /// Run `bzr` commands through the given runner.
    pub fn with_runner(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            executable: None,
            runner,
        }
    }

    /// Use the `bzr` executable at `path`.
    #[must_use]
    pub fn with_executable(mut self, path: impl Into<PathBuf>) -> Self {
        self.executable = Some(path.into());
        self
    }

    fn executable(&self) -> Result<&Path, CommandError> {
        if let Some(executable) = &self.executable {
            return Ok(executable);
        }
        BZR.as_deref().map_err(|err| CommandError::NotFound {
            program: "bzr".to_string(),
            source: *err,
        })
    }

    fn run(
        &self,
        args: Vec<OsString>,
        cwd: Option<&Path>,
        stdout: StdoutMode,
    ) -> Result<String, VcsError> {
        let program = self.executable()?;
        Ok(self.runner.run(program, &args, cwd, stdout)?)
    }
}

fn rev_args(rev_options: &RevOptions) -> impl Iterator<Item = OsString> {
    rev_options.to_args().into_iter().map(OsString::from)
}

fn command_arg(url: &DisplaySafeUrl) -> OsString {
    OsString::from(url.displayable_with_credentials().to_string())
}

impl Backend for Bazaar {
    fn name(&self) -> &'static str {
        "bzr"
    }

    fn dirname(&self) -> &'static str {
        ".bzr"
    }

    fn repo_name(&self) -> &'static str {
        "branch"
    }

    fn schemes(&self) -> &'static [&'static str] {
        &[
            "bzr",
            "bzr+http",
            "bzr+https",
            "bzr+ssh",
            "bzr+sftp",
            "bzr+ftp",
            "bzr+lp",
            "bzr+file",
        ]
    }

    fn get_base_rev_args(&self, rev: &str) -> Vec<String> {
        vec!["-r".to_string(), rev.to_string()]
    }

    /// Bazaar addresses SSH remotes as `bzr+ssh://`, so the prefix stripped during parsing is
    /// restored.
    fn get_url_rev_and_auth(
        &self,
        url: &VcsUrl,
    ) -> (DisplaySafeUrl, Option<String>, Option<Credentials>) {
        let transport = if url.url().scheme() == "ssh" {
            match DisplaySafeUrl::parse(&format!("bzr+{}", url.url().as_str())) {
                Ok(transport) => transport,
                Err(err) => {
                    debug!("Failed to restore `bzr+` prefix on {}: {err}", url.url());
                    url.url().clone()
                }
            }
        } else {
            url.url().clone()
        };
        (
            transport,
            url.revision().map(ToString::to_string),
            url.credentials().cloned(),
        )
    }

    #[instrument(skip_all, fields(location = %location.user_display()))]
    fn export(&self, location: &Path, url: &VcsUrl) -> Result<(), VcsError> {
        // `bzr export` refuses to write into an existing directory.
        if remove_tree(location)? {
            debug!("Removed existing export target");
        }

        let (command_url, rev_options) = self.get_url_rev_options(url);
        let mut args = vec![
            OsString::from("export"),
            OsString::from(location),
            command_arg(&command_url),
        ];
        args.extend(rev_args(&rev_options));
        self.run(args, None, StdoutMode::Capture)?;
        Ok(())
    }

    fn fetch_new(
        &self,
        dest: &Path,
        url: &DisplaySafeUrl,
        rev_options: &RevOptions,
    ) -> Result<(), VcsError> {
        info!(
            "Checking out {url}{} to {}",
            rev_options.to_display(),
            dest.user_display()
        );
        let mut args = vec![
            OsString::from("checkout"),
            OsString::from("--lightweight"),
            OsString::from("-q"),
        ];
        args.extend(rev_args(rev_options));
        args.push(command_arg(url));
        args.push(OsString::from(dest));
        self.run(args, None, StdoutMode::Inherit)?;
        Ok(())
    }

    fn switch(
        &self,
        dest: &Path,
        url: &DisplaySafeUrl,
        _rev_options: &RevOptions,
    ) -> Result<(), VcsError> {
        let args = vec![OsString::from("switch"), command_arg(url)];
        self.run(args, Some(dest), StdoutMode::Inherit)?;
        Ok(())
    }

    fn update(
        &self,
        dest: &Path,
        _url: &DisplaySafeUrl,
        rev_options: &RevOptions,
    ) -> Result<(), VcsError> {
        let mut args = vec![OsString::from("update"), OsString::from("-q")];
        args.extend(rev_args(rev_options));
        self.run(args, Some(dest), StdoutMode::Inherit)?;
        Ok(())
    }

    fn get_url(&self, location: &Path) -> Result<Option<String>, VcsError> {
        let output = self.run(vec![OsString::from("info")], Some(location), StdoutMode::Capture)?;
        let Some(repo) = parse_info_url(&output) else {
            debug!(
                "No branch location in `bzr info` for {}",
                location.user_display()
            );
            return Ok(None);
        };
        if is_local_path(repo) {
            return Ok(Some(path_to_url(repo)?.to_string()));
        }
        Ok(Some(repo.to_string()))
    }

    fn get_revision(&self, location: &Path) -> Result<String, VcsError> {
        let output = self.run(
            vec![OsString::from("revno")],
            Some(location),
            StdoutMode::Capture,
        )?;
        parse_revno(&output)
            .map(ToString::to_string)
            .ok_or_else(|| VcsError::EmptyOutput {
                command: "bzr revno".to_string(),
            })
    }

    /// Bazaar revision numbers are relative to a branch, so they can't be compared cheaply.
    fn is_commit_id_equal(&self, _dest: &Path, _name: Option<&str>) -> Result<bool, VcsError> {
        Ok(false)
    }
}

/// Extract the origin of a working copy from `bzr info` output.
///
/// A `checkout of branch:` line is preferred over a `parent branch:` line, wherever each
/// appears.
pub fn parse_info_url(output: &str) -> Option<&str> {
    URL_LABELS.iter().find_map(|label| {
        output.lines().find_map(|line| {
            line.trim()
                .strip_prefix(label)
                .map(str::trim)
                .filter(|value| !value.is_empty())
        })
    })
}

/// Extract the revision number from `bzr revno` output, which may be preceded by warnings.
pub fn parse_revno(output: &str) -> Option<&str> {
    output
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !line.is_empty())
}
