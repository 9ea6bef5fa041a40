// Copyright 2026 the SVG Snapshot Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `svg-snapshot`: sets up `svg_snapshot` in a Cargo package.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use svg_snapshot_cli::{CRATE_NAME, InitOptions, init};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Add the dev-dependency and create an example snapshot test.
    Init {
        /// Package root to set up.
        #[arg(long, default_value = ".")]
        root: PathBuf,
        /// Skip `cargo add`.
        #[arg(long)]
        no_install: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Init { root, no_install } => {
            if !no_install {
                println!("Installing {CRATE_NAME}...");
            }
            let options = InitOptions {
                root,
                install: !no_install,
            };
            match init(&options) {
                Ok(report) => {
                    println!("{report}");
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    eprintln!("Error during initialization: {err}");
                    ExitCode::FAILURE
                }
            }
        }
    }
}
