//! Command-line layer shared by the `install_snippets` and `snippet_from_file` binaries.
//!
//! Argument structs live here (not in the binaries) so the commands can be driven
//! from tests without spawning a process.

use env_logger::{Builder, Env};

pub mod generate;
pub mod install;

pub use generate::{cmd_generate, GenerateArgs};
pub use install::{cmd_install, InstallArgs, InstallSummary};

/// Logs go to stderr; level from RUST_LOG, default `warn`.
/// Example: RUST_LOG=debug install_snippets ./dsu.json
pub fn init_logger() {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .init();
}
