use std::error::Error;
use std::iter;
use std::sync::atomic::AtomicBool;

// macro hygiene: The user might not have direct dependencies on those crates
#[doc(hidden)]
pub use anstream;
#[doc(hidden)]
pub use owo_colors;
use owo_colors::DynColor;

/// Whether user-facing warnings are enabled.
pub static ENABLED: AtomicBool = AtomicBool::new(false);

/// Enable user-facing warnings.
pub fn enable() {
    ENABLED.store(true, std::sync::atomic::Ordering::Relaxed);
}

/// Warn a user, if warnings are enabled.
#[macro_export]
macro_rules! warn_user {
    ($($arg:tt)*) => {{
        use $crate::anstream::eprintln;
        use $crate::owo_colors::OwoColorize;

        if $crate::ENABLED.load(std::sync::atomic::Ordering::Relaxed) {
            let message = format!("{}", format_args!($($arg)*));
            let formatted = message.bold();
            eprintln!("{}{} {formatted}", "warning".yellow().bold(), ":".bold());
        }
    }};
}

/// Format an error chain, one cause per line.
///
/// # Example
///
/// ```text
/// error: Failed to obtain `bzr+ssh://example.com/repo@42`
///   Caused by: Command `bzr checkout --lightweight -q -r 42 bzr+ssh://example.com/repo src` failed (exit status: 3)
///              --- stderr
///              bzr: ERROR: Connection closed: Unexpected end of message.
/// ```
pub fn write_error_chain_with_options(
    err: &dyn Error,
    mut stream: impl std::fmt::Write,
    level: impl AsRef<str>,
    color: impl DynColor + Copy,
) -> std::fmt::Result {
    use owo_colors::OwoColorize;

    writeln!(
        &mut stream,
        "{}{} {}",
        level.as_ref().color(color).bold(),
        ":".bold(),
        err.to_string().trim()
    )?;

    for source in iter::successors(err.source(), |&err| err.source()) {
        let message = source.to_string();
        let mut lines = message.lines();
        if let Some(first) = lines.next() {
            writeln!(
                &mut stream,
                "  {}: {}",
                "Caused by".color(color).bold(),
                first.trim()
            )?;
            // Continuation lines line up with the text after `Caused by: `.
            for line in lines {
                let line = line.trim_end();
                if line.is_empty() {
                    writeln!(&mut stream)?;
                } else {
                    writeln!(&mut stream, "             {line}")?;
                }
            }
        }
    }

    Ok(())
}

/// Format an error chain with default options (error level, red color).
pub fn write_error_chain(err: &dyn Error, stream: impl std::fmt::Write) -> std::fmt::Result {
    write_error_chain_with_options(err, stream, "error", owo_colors::AnsiColors::Red)
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;

    #[test]
    fn error_chain_with_cause() {
        #[derive(Debug, thiserror::Error)]
        #[error("Permission denied")]
        struct Inner;

        #[derive(Debug, thiserror::Error)]
        #[error("Failed to remove `checkout`")]
        struct Outer {
            #[source]
            source: Inner,
        }

        let error = Outer { source: Inner };
        let mut output = String::new();
        write_error_chain(&error, &mut output).unwrap();
        let output = anstream::adapter::strip_str(&output);

        assert_snapshot!(output, @r"
        error: Failed to remove `checkout`
          Caused by: Permission denied
        ");
    }

    #[test]
    fn error_chain_multiline_cause() {
        #[derive(Debug, thiserror::Error)]
        #[error("bzr: ERROR: Not a branch\n\nCheck the URL")]
        struct Inner;

        #[derive(Debug, thiserror::Error)]
        #[error("Failed to update checkout")]
        struct Outer {
            #[source]
            source: Inner,
        }

        let error = Outer { source: Inner };
        let mut output = String::new();
        write_error_chain(&error, &mut output).unwrap();
        let output = anstream::adapter::strip_str(&output);

        assert_snapshot!(output, @r"
        error: Failed to update checkout
          Caused by: bzr: ERROR: Not a branch

                     Check the URL
        ");
    }
}
