//! `update-plugin-metadata` entry point.

use clap::Parser;
use release_kit::cli::{UpdateMetadataCommand, init_logging};
use release_kit::core::{exit_code, user_friendly_error};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cmd = UpdateMetadataCommand::parse();
    init_logging(&cmd.global);

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cmd.execute().await {
        let code = exit_code(&e);
        user_friendly_error(e).display();
        std::process::exit(code);
    }
}
