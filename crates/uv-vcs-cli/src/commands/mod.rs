use std::process::ExitCode;

pub(crate) use backends::backends;
pub(crate) use export::export;
pub(crate) use freeze::freeze;
pub(crate) use obtain::obtain;
pub(crate) use parse::parse;
pub(crate) use revision::revision;

mod backends;
mod export;
mod freeze;
mod obtain;
mod parse;
mod revision;

#[derive(Copy, Clone)]
pub(crate) enum ExitStatus {
    /// The command succeeded.
    Success,

    /// The command failed due to an error in the user input.
    Failure,

    /// The command failed with an unexpected error.
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => Self::from(0),
            ExitStatus::Failure => Self::from(1),
            ExitStatus::Error => Self::from(2),
        }
    }
}
