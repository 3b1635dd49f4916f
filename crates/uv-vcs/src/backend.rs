use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};
use std::str::FromStr;

use percent_encoding::percent_decode_str;
use tracing::{debug, info, warn};

use uv_fs::{Simplified, backup_dir, remove_tree, rename_with_parents};
use uv_redacted::DisplaySafeUrl;
use uv_vcs_types::{Credentials, RevOptions, VcsUrl, make_vcs_requirement_url};
use uv_warnings::warn_user;

use crate::VcsError;

/// What to do when the destination of a checkout already exists and does not match the
/// requested URL.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ExistingCheckout {
    /// Point the existing checkout at the new URL.
    Switch,
    /// Leave the destination untouched.
    Ignore,
    /// Delete the destination and check out afresh.
    Wipe,
    /// Move the destination aside and check out afresh.
    Backup,
    /// Fail without touching the destination.
    #[default]
    Abort,
}

impl FromStr for ExistingCheckout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "s" | "switch" => Ok(Self::Switch),
            "i" | "ignore" => Ok(Self::Ignore),
            "w" | "wipe" => Ok(Self::Wipe),
            "b" | "backup" => Ok(Self::Backup),
            "a" | "abort" => Ok(Self::Abort),
            _ => Err(format!(
                "unknown action `{s}` (expected one of: switch, ignore, wipe, backup, abort)"
            )),
        }
    }
}

impl Display for ExistingCheckout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Switch => f.write_str("switch"),
            Self::Ignore => f.write_str("ignore"),
            Self::Wipe => f.write_str("wipe"),
            Self::Backup => f.write_str("backup"),
            Self::Abort => f.write_str("abort"),
        }
    }
}

/// The action [`Backend::obtain`] took.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Obtained {
    /// A new checkout was created.
    Fetched,
    /// The existing checkout was updated to the requested revision.
    Updated,
    /// The existing checkout already matched the requested URL and revision.
    UpToDate,
    /// The existing checkout was switched to the requested URL.
    Switched,
    /// The existing destination was left as-is.
    Ignored,
    /// The existing destination was moved to the given path before checking out.
    BackedUp(PathBuf),
}

/// A version control system that can check out, export, and describe working copies by running
/// its command-line tool.
///
/// Implementors supply the tool-specific operations. Parsing, checkout reconciliation, and
/// requirement reconstruction are shared.
pub trait Backend: Debug + Send + Sync {
    /// The short name of the backend, e.g., `bzr`. Also the requirement URL prefix.
    fn name(&self) -> &'static str;

    /// The metadata directory that marks a working copy, e.g., `.bzr`.
    fn dirname(&self) -> &'static str;

    /// A human-readable name for a working copy, used in log messages.
    fn repo_name(&self) -> &'static str;

    /// The URL schemes this backend claims.
    fn schemes(&self) -> &'static [&'static str];

    /// The arguments that pin the tool to `rev`.
    fn get_base_rev_args(&self, rev: &str) -> Vec<String>;

    /// Extra arguments that authenticate the tool, passed in addition to any credentials
    /// embedded in the URL.
    fn make_rev_args(&self, _credentials: Option<&Credentials>) -> Vec<String> {
        Vec::new()
    }

    /// Build the [`RevOptions`] for `revision`.
    fn make_rev_options(&self, revision: Option<String>, extra_args: Vec<String>) -> RevOptions {
        match revision {
            Some(revision) => {
                let rev_args = self.get_base_rev_args(&revision);
                RevOptions::pinned(self.name(), revision, rev_args, extra_args)
            }
            None => RevOptions::unpinned(self.name(), extra_args),
        }
    }

    /// Parse a requirement URL using only the schemes of this backend.
    fn parse_url(&self, raw: &str) -> Result<VcsUrl, VcsError> {
        let url = VcsUrl::parse_with(raw, |scheme| {
            self.schemes()
                .iter()
                .any(|candidate| *candidate == scheme)
                .then_some(self.name())
        })?;
        Ok(url)
    }

    /// Split a parsed URL into the transport URL the tool expects, the revision, and the
    /// credentials.
    fn get_url_rev_and_auth(
        &self,
        url: &VcsUrl,
    ) -> (DisplaySafeUrl, Option<String>, Option<Credentials>) {
        (
            url.url().clone(),
            url.revision().map(ToString::to_string),
            url.credentials().cloned(),
        )
    }

    /// The URL to pass on the command line, with credentials restored, and the revision
    /// options.
    fn get_url_rev_options(&self, url: &VcsUrl) -> (DisplaySafeUrl, RevOptions) {
        let (transport, revision, credentials) = self.get_url_rev_and_auth(url);
        let extra_args = self.make_rev_args(credentials.as_ref());
        let rev_options = self.make_rev_options(revision, extra_args);
        let url = match &credentials {
            Some(credentials) => credentials.apply_to(&transport),
            None => transport,
        };
        (url, rev_options)
    }

    /// Export a clean copy of the tree, without VCS metadata, into `location`.
    ///
    /// Anything already at `location` is removed first.
    fn export(&self, location: &Path, url: &VcsUrl) -> Result<(), VcsError>;

    /// Create a new working copy of `url` at `dest`.
    fn fetch_new(
        &self,
        dest: &Path,
        url: &DisplaySafeUrl,
        rev_options: &RevOptions,
    ) -> Result<(), VcsError>;

    /// Point the working copy at `dest` to `url`.
    fn switch(
        &self,
        dest: &Path,
        url: &DisplaySafeUrl,
        rev_options: &RevOptions,
    ) -> Result<(), VcsError>;

    /// Bring the working copy at `dest` to the requested revision.
    fn update(
        &self,
        dest: &Path,
        url: &DisplaySafeUrl,
        rev_options: &RevOptions,
    ) -> Result<(), VcsError>;

    /// The URL the working copy at `location` was checked out from, if it can be determined.
    fn get_url(&self, location: &Path) -> Result<Option<String>, VcsError>;

    /// The current revision of the working copy at `location`.
    fn get_revision(&self, location: &Path) -> Result<String, VcsError>;

    /// Whether the working copy at `dest` is already at revision `name`.
    ///
    /// Returning `false` when unsure is always safe: it only costs an update.
    fn is_commit_id_equal(&self, dest: &Path, name: Option<&str>) -> Result<bool, VcsError>;

    /// A requirement URL that reproduces the working copy at `location`, e.g.,
    /// `bzr+ssh://example.com/repo@42#egg=project`.
    ///
    /// Returns `None` if the origin of the working copy can't be determined.
    fn get_src_requirement(
        &self,
        project_name: &str,
        location: &Path,
    ) -> Result<Option<String>, VcsError> {
        let Some(repo) = self.get_url(location)? else {
            return Ok(None);
        };
        let revision = self.get_revision(location)?;
        Ok(Some(make_vcs_requirement_url(
            self.name(),
            &repo,
            &revision,
            project_name,
            None,
        )))
    }

    /// Whether this backend manages the working copy at `location`.
    fn controls_location(&self, location: &Path) -> bool {
        self.is_repository_directory(location)
    }

    fn is_repository_directory(&self, path: &Path) -> bool {
        let marker = path.join(self.dirname());
        debug!("Checking in {} for {}", path.user_display(), self.dirname());
        marker.exists()
    }

    /// Compare two URLs, ignoring percent-encoding and trailing slashes.
    fn compare_urls(&self, a: &str, b: &str) -> bool {
        normalize_url(a) == normalize_url(b)
    }

    /// Ensure `dest` holds a working copy of `url` at the requested revision, reconciling an
    /// existing destination according to `on_existing`.
    fn obtain(
        &self,
        dest: &Path,
        url: &VcsUrl,
        on_existing: ExistingCheckout,
    ) -> Result<Obtained, VcsError> {
        let (command_url, rev_options) = self.get_url_rev_options(url);

        if !dest.exists() {
            self.fetch_new(dest, &command_url, &rev_options)?;
            return Ok(Obtained::Fetched);
        }

        let rev_display = rev_options.to_display();
        let is_checkout = self.is_repository_directory(dest);
        if is_checkout {
            let existing_url = self.get_url(dest)?;
            let requested = command_url.without_credentials();
            if existing_url
                .as_deref()
                .is_some_and(|existing| self.compare_urls(existing, requested.as_str()))
            {
                debug!(
                    "{} in {} exists, and has correct URL ({command_url})",
                    capitalize(self.repo_name()),
                    dest.user_display(),
                );
                if self.is_commit_id_equal(dest, rev_options.revision())? {
                    info!("Skipping because already up-to-date.");
                    return Ok(Obtained::UpToDate);
                }
                info!(
                    "Updating {} {}{rev_display}",
                    dest.user_display(),
                    self.repo_name(),
                );
                self.update(dest, &command_url, &rev_options)?;
                return Ok(Obtained::Updated);
            }
            warn_user!(
                "{} {} in {} exists with URL {}",
                self.name(),
                self.repo_name(),
                dest.user_display(),
                existing_url.as_deref().unwrap_or("<unknown>"),
            );
        } else {
            warn_user!(
                "Directory {} already exists, and is not a {} {}",
                dest.user_display(),
                self.name(),
                self.repo_name(),
            );
        }

        match on_existing {
            ExistingCheckout::Switch if is_checkout => {
                info!(
                    "Switching {} {} to {command_url}{rev_display}",
                    self.repo_name(),
                    dest.user_display(),
                );
                self.switch(dest, &command_url, &rev_options)?;
                Ok(Obtained::Switched)
            }
            ExistingCheckout::Switch | ExistingCheckout::Abort => {
                Err(VcsError::DestinationExists(dest.to_path_buf()))
            }
            ExistingCheckout::Ignore => Ok(Obtained::Ignored),
            ExistingCheckout::Wipe => {
                warn!("Deleting {}", dest.user_display());
                remove_tree(dest)?;
                self.fetch_new(dest, &command_url, &rev_options)?;
                Ok(Obtained::Fetched)
            }
            ExistingCheckout::Backup => {
                let backup = backup_dir(dest);
                warn!(
                    "Backing up {} to {}",
                    dest.user_display(),
                    backup.user_display()
                );
                rename_with_parents(dest, &backup)?;
                self.fetch_new(dest, &command_url, &rev_options)?;
                Ok(Obtained::BackedUp(backup))
            }
        }
    }

    /// Replace whatever is at `location` with a fresh working copy of `url`.
    fn unpack(&self, location: &Path, url: &VcsUrl) -> Result<(), VcsError> {
        if remove_tree(location)? {
            debug!("Removed existing {}", location.user_display());
        }
        self.obtain(location, url, ExistingCheckout::Abort)?;
        Ok(())
    }
}

fn normalize_url(url: &str) -> String {
    percent_decode_str(url)
        .decode_utf8_lossy()
        .trim_end_matches('/')
        .to_string()
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_checkout_from_str() {
        assert_eq!(
            "switch".parse::<ExistingCheckout>(),
            Ok(ExistingCheckout::Switch)
        );
        assert_eq!("B".parse::<ExistingCheckout>(), Ok(ExistingCheckout::Backup));
        assert_eq!(
            "Abort".parse::<ExistingCheckout>(),
            Ok(ExistingCheckout::Abort)
        );
        assert!("delete".parse::<ExistingCheckout>().is_err());
    }

    #[test]
    fn normalize() {
        assert_eq!(
            normalize_url("bzr+ssh://example.com/my%20repo/"),
            "bzr+ssh://example.com/my repo"
        );
        assert_eq!(
            normalize_url("https://example.com/repo"),
            "https://example.com/repo"
        );
    }

    #[test]
    fn capitalize_repo_name() {
        assert_eq!(capitalize("branch"), "Branch");
        assert_eq!(capitalize(""), "");
    }
}
