//! ulawkit CLI - Command-line interface for telephony μ-law conversion
//!
//! This binary converts WAV files to raw 8 kHz G.711 μ-law and back.

use clap::Parser;
use std::process::ExitCode;

use ulawkit_cli::cli_args::{Cli, Commands};
use ulawkit_cli::commands;

fn init_logging(verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn
    };
    // RUST_LOG, when set, takes precedence over the flag.
    env_logger::builder()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Commands::Encode(args) => commands::encode::run(args),
        Commands::Decode(args) => commands::decode::run(args),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
