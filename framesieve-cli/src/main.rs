// ============================================================================
// framesieve-cli/src/main.rs
// ============================================================================
//
// FRAMESIEVE CLI: Main Entry Point
//
// Parses the command line, installs logging and dispatches to the selected
// command. Any error that reaches this level is printed to stderr and the
// process exits with status 1.
//
// AI-ASSISTANT-INFO: Binary entry point; argument parsing and exit codes

// ---- Internal crate imports ----
use framesieve_cli::logging::{get_timestamp, init_logging};
use framesieve_cli::{Cli, Commands, run_extract};

// ---- External crate imports ----
use clap::Parser;
use console::style;

// ---- Standard library imports ----
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = init_logging(cli.verbose, cli.log_file.as_deref()) {
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
    log::debug!("Framesieve run {} started", get_timestamp());

    let result = match cli.command {
        Commands::Extract(args) => run_extract(&args).map(|_| ()),
    };

    if let Err(e) = result {
        log::error!("{}", e);
        eprintln!("{} {}", style("Error:").red().bold(), e);
        process::exit(1);
    }
}
