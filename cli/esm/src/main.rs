// Copyright 2025 The Rustux Authors
//
// Use of this source code is governed by a MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT

//! ubuntu-esm - Extended Security Maintenance toggle
//!
//! Enables or disables the Ubuntu ESM archive for the running release.

use clap::{Parser, Subcommand};
use esm::{archive, EsmError, Settings};
use std::process;

/// Manage the Ubuntu Extended Security Maintenance archive
#[derive(Parser, Debug)]
#[command(name = "ubuntu-esm")]
#[command(author = "The Rustux Authors")]
#[command(about = "Enable or disable the Ubuntu ESM archive", long_about = None)]
struct Args {
    /// Increase log verbosity (-v, -vv)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Enable the ESM archive
    EnableEsm {
        /// Access token, "user:password"
        token: Option<String>,
    },

    /// Disable the ESM archive
    DisableEsm,

    /// Exit 0 if the ESM archive is enabled, 1 otherwise
    IsEsmEnabled,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(command: Commands) -> Result<i32, EsmError> {
    let settings = Settings::from_env()?;
    log::debug!("settings: {:?}", settings);

    match command {
        Commands::EnableEsm { token } => archive::enable(&settings, token.as_deref()).map(|_| 0),
        Commands::DisableEsm => archive::disable(&settings).map(|_| 0),
        Commands::IsEsmEnabled => Ok(if archive::is_enabled(&settings)? { 0 } else { 1 }),
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    let code = match run(args.command) {
        Ok(code) => code,
        Err(err) => {
            let message = err.to_string();
            if message.ends_with('\n') {
                eprint!("{}", message);
            } else {
                eprintln!("{}", message);
            }
            err.exit_code()
        }
    };

    process::exit(code);
}
