pub use crate::backend::{Backend, ExistingCheckout, Obtained};
pub use crate::bazaar::{BZR, Bazaar, parse_info_url, parse_revno};
pub use crate::error::VcsError;
pub use crate::process::{
    CommandError, CommandRunner, ProcessRunner, StdoutMode, display_command, find_executable,
};
pub use crate::registry::{VCS, VcsRegistry};

pub use uv_vcs_types::{
    Credentials, RevOptions, VcsUrl, VcsUrlParseError, make_vcs_requirement_url, to_egg_fragment,
};

mod backend;
mod bazaar;
mod error;
mod process;
mod registry;
#[cfg(test)]
mod testing;
