#![allow(dead_code)]

use assert_cmd::Command;

use uv_static::EnvVars;

pub(crate) const BIN_NAME: &str = "uv-vcs";

/// A `uv-vcs` command with a predictable environment: no colors, no log filters, and no
/// `bzr` executable.
pub(crate) fn uv_vcs_command() -> Command {
    let mut command = Command::cargo_bin(BIN_NAME).unwrap();
    command
        .env(EnvVars::NO_COLOR, "1")
        .env_remove(EnvVars::FORCE_COLOR)
        .env_remove(EnvVars::RUST_LOG)
        .env_remove(EnvVars::UV_VCS_EXISTING_ACTION)
        .env(EnvVars::UV_BZR_EXECUTABLE, "/nonexistent/bin/bzr");
    command
}
