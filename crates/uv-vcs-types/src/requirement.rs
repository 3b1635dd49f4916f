use std::borrow::Cow;
use std::fmt::Write;

/// Convert a project name into the form used in an `#egg=` fragment.
///
/// Runs of characters other than ASCII letters, digits, and `.` become a single `_`, so
/// `my-project` becomes `my_project`.
pub fn to_egg_fragment(project_name: &str) -> String {
    let mut egg = String::with_capacity(project_name.len());
    let mut in_separator = false;
    for c in project_name.chars() {
        if c.is_ascii_alphanumeric() || c == '.' {
            egg.push(c);
            in_separator = false;
        } else if !in_separator {
            egg.push('_');
            in_separator = true;
        }
    }
    egg
}

/// Build a pinned requirement URL, e.g., `bzr+ssh://example.com/repo@42#egg=project`.
///
/// The `<backend>+` prefix is added unless `repo_url` already starts with the backend's own
/// scheme (`bzr://...`) or a prefixed scheme (`bzr+ssh://...`).
pub fn make_vcs_requirement_url(
    backend: &str,
    repo_url: &str,
    revision: &str,
    project_name: &str,
    subdirectory: Option<&str>,
) -> String {
    let repo_url = with_backend_prefix(backend, repo_url);
    let egg = to_egg_fragment(project_name);
    let mut requirement = format!("{repo_url}@{revision}#egg={egg}");
    if let Some(subdirectory) = subdirectory {
        let _ = write!(requirement, "&subdirectory={subdirectory}");
    }
    requirement
}

/// Prefix `url` with `<backend>+`, unless it already names the backend in its scheme.
pub(crate) fn with_backend_prefix<'a>(backend: &str, url: &'a str) -> Cow<'a, str> {
    let scheme = url
        .split_once(':')
        .map(|(scheme, _)| scheme.to_ascii_lowercase());
    let prefixed = scheme.as_deref().is_some_and(|scheme| {
        scheme == backend
            || scheme
                .strip_prefix(backend)
                .is_some_and(|rest| rest.starts_with('+'))
    });
    if prefixed {
        Cow::Borrowed(url)
    } else {
        Cow::Owned(format!("{backend}+{url}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn egg_fragment() {
        assert_eq!(to_egg_fragment("myproj"), "myproj");
        assert_eq!(to_egg_fragment("my-project"), "my_project");
        assert_eq!(to_egg_fragment("zope.interface"), "zope.interface");
        assert_eq!(to_egg_fragment("odd -- name"), "odd_name");
    }

    #[test]
    fn prefixes_plain_transport() {
        assert_eq!(
            make_vcs_requirement_url("bzr", "ssh://example.com/repo", "42", "myproj", None),
            "bzr+ssh://example.com/repo@42#egg=myproj"
        );
        assert_eq!(
            make_vcs_requirement_url(
                "bzr",
                "https://example.com/repo",
                "7",
                "my-proj",
                Some("python")
            ),
            "bzr+https://example.com/repo@7#egg=my_proj&subdirectory=python"
        );
    }

    #[test]
    fn does_not_double_prefix() {
        assert_eq!(
            make_vcs_requirement_url("bzr", "bzr+ssh://example.com/repo", "42", "myproj", None),
            "bzr+ssh://example.com/repo@42#egg=myproj"
        );
        assert_eq!(
            make_vcs_requirement_url("bzr", "BZR+SSH://example.com/repo", "42", "myproj", None),
            "BZR+SSH://example.com/repo@42#egg=myproj"
        );
        assert_eq!(
            make_vcs_requirement_url("bzr", "bzr://example.com/repo", "3", "myproj", None),
            "bzr://example.com/repo@3#egg=myproj"
        );
    }

    #[test]
    fn similar_scheme_is_still_prefixed() {
        // `bzrx` is not the `bzr` scheme.
        assert_eq!(
            with_backend_prefix("bzr", "bzrx://example.com/repo"),
            "bzr+bzrx://example.com/repo"
        );
    }
}
