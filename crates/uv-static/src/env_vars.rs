/// Declares all environment variable used throughout the VCS crates.
pub struct EnvVars;

impl EnvVars {
    /// Path to the Bazaar executable.
    ///
    /// When unset, `bzr` is located on the `PATH`.
    pub const UV_BZR_EXECUTABLE: &'static str = "UV_BZR_EXECUTABLE";

    /// Equivalent to the `--on-existing` command-line argument. Controls what happens when the
    /// destination of a checkout already exists and is not an up-to-date checkout of the
    /// requested URL. Accepts `switch`, `ignore`, `wipe`, `backup`, or `abort`.
    pub const UV_VCS_EXISTING_ACTION: &'static str = "UV_VCS_EXISTING_ACTION";

    /// If set, this value is used as the log level for `--verbose` output. Accepts
    /// any filter compatible with the `tracing_subscriber` crate.
    ///
    /// For example:
    ///
    /// * `RUST_LOG=uv_vcs=debug` is the equivalent of adding `--verbose` to the command line
    /// * `RUST_LOG=trace` will enable trace-level logging.
    ///
    /// See the [tracing documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html#example-syntax)
    /// for more.
    pub const RUST_LOG: &'static str = "RUST_LOG";

    /// Disables colored output (takes precedence over `FORCE_COLOR`).
    ///
    /// See [no-color.org](https://no-color.org).
    pub const NO_COLOR: &'static str = "NO_COLOR";

    /// Forces colored output regardless of terminal support.
    ///
    /// See [force-color.org](https://force-color.org).
    pub const FORCE_COLOR: &'static str = "FORCE_COLOR";
}
