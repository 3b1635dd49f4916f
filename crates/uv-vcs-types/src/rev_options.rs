use std::fmt::Display;

/// The revision to check out, rendered for one specific backend.
///
/// A [`RevOptions`] is created by (and only meaningful to) the backend named by
/// [`RevOptions::backend`]: the revision selector and any extra arguments are already in that
/// backend's command-line syntax.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RevOptions {
    /// The name of the owning backend.
    backend: &'static str,
    /// The revision to check out, or `None` for the backend's default.
    revision: Option<String>,
    /// The revision selector, e.g., `["-r", "42"]`. Empty when `revision` is `None`.
    rev_args: Vec<String>,
    /// Additional arguments, e.g., for authentication.
    extra_args: Vec<String>,
}

impl RevOptions {
    /// Options that check out the backend's default revision.
    pub fn unpinned(backend: &'static str, extra_args: Vec<String>) -> Self {
        Self {
            backend,
            revision: None,
            rev_args: Vec::new(),
            extra_args,
        }
    }

    /// Options that check out `revision`, selected with `rev_args`.
    pub fn pinned(
        backend: &'static str,
        revision: String,
        rev_args: Vec<String>,
        extra_args: Vec<String>,
    ) -> Self {
        Self {
            backend,
            revision: Some(revision),
            rev_args,
            extra_args,
        }
    }

    /// The name of the backend these options were rendered for.
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn revision(&self) -> Option<&str> {
        self.revision.as_deref()
    }

    pub fn extra_args(&self) -> &[String] {
        &self.extra_args
    }

    /// The command-line arguments that select this revision, followed by any extra arguments.
    pub fn to_args(&self) -> Vec<String> {
        self.rev_args
            .iter()
            .chain(&self.extra_args)
            .cloned()
            .collect()
    }

    /// A suffix for log messages, e.g., ` (to revision 42)`, or the empty string.
    pub fn to_display(&self) -> String {
        match &self.revision {
            Some(revision) => format!(" (to revision {revision})"),
            None => String::new(),
        }
    }
}

impl Display for RevOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.revision {
            Some(revision) => write!(f, "<RevOptions {}: rev={revision}>", self.backend),
            None => write!(f, "<RevOptions {}>", self.backend),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RevOptions;

    #[test]
    fn unpinned() {
        let options = RevOptions::unpinned("bzr", Vec::new());
        assert!(options.to_args().is_empty());
        assert_eq!(options.to_display(), "");
        assert_eq!(options.revision(), None);
    }

    #[test]
    fn pinned() {
        let options = RevOptions::pinned(
            "bzr",
            "42".to_string(),
            vec!["-r".to_string(), "42".to_string()],
            Vec::new(),
        );
        assert_eq!(options.to_args(), ["-r", "42"]);
        assert_eq!(options.to_display(), " (to revision 42)");
        assert_eq!(options.to_string(), "<RevOptions bzr: rev=42>");
    }

    #[test]
    fn extra_args_follow_revision() {
        let options = RevOptions::pinned(
            "svn",
            "7".to_string(),
            vec!["-r".to_string(), "7".to_string()],
            vec!["--username".to_string(), "user".to_string()],
        );
        assert_eq!(options.to_args(), ["-r", "7", "--username", "user"]);
    }
}
