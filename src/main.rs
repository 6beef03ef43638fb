//! ccmeta CLI entry point
//!
//! Parses the command line, sets up logging, and runs `generate` or `check`.
//! Any error ends the process with status 1 after a colored report on stderr.

use ccmeta::cli;
use ccmeta::core::user_friendly_error;
use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    let config = cli.build_config();
    config.init_logging();

    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    if let Err(e) = cli.execute_with_config(config) {
        user_friendly_error(e).display();
        std::process::exit(1);
    }
}
