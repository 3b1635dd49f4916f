pub use crate::credentials::Credentials;
pub use crate::requirement::{make_vcs_requirement_url, to_egg_fragment};
pub use crate::rev_options::RevOptions;
pub use crate::vcs_url::{VcsUrl, VcsUrlParseError};

mod credentials;
mod requirement;
mod rev_options;
mod vcs_url;
