//! Command-line interfaces of the release tools.
//!
//! Each binary parses one command struct from this module and hands it to the
//! library:
//!
//! | Binary                   | Command                        |
//! |--------------------------|--------------------------------|
//! | `fetch-artifact`         | [`FetchArtifactCommand`]       |
//! | `bootstrap-release`      | [`BootstrapReleaseCommand`]    |
//! | `update-plugin-metadata` | [`UpdateMetadataCommand`]      |
//!
//! Command structs read the process environment (through clap's `env`
//! support or explicitly) exactly once, when they build the config struct of
//! their operation.
//!
//! # Logging
//!
//! All commands share [`GlobalArgs`]:
//! - `--verbose` - Enable debug output
//! - `--quiet` - Suppress all output except errors
//!
//! `RUST_LOG`, when set, takes precedence over both. Logs go to stderr so
//! stdout stays free for command output.

pub mod bootstrap;
pub mod fetch;
pub mod metadata;

pub use bootstrap::BootstrapReleaseCommand;
pub use fetch::FetchArtifactCommand;
pub use metadata::UpdateMetadataCommand;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Verbosity flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Enable verbose output for debugging and detailed information.
    ///
    /// Shows every HTTP request, subprocess invocation and the merged
    /// descriptor. Equivalent to `RUST_LOG=debug`.
    #[arg(short, long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl GlobalArgs {
    /// Filter directive implied by the flags.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "error"
        } else {
            "info"
        }
    }
}

/// Installs the global tracing subscriber, writing to stderr.
///
/// Safe to call more than once; later calls are ignored.
pub fn init_logging(args: &GlobalArgs) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_level()));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
