// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Paramcodec CLI
//!
//! Command-line tool for PARAM containers and PARAMDEF schemas.
//!
//! ## Usage
//!
//! ```sh
//! # Show container header and record ids
//! paramcodec inspect EquipParamWeapon.param
//!
//! # Decode records with a schema from a Paramdex checkout
//! paramcodec decode EquipParamWeapon.param --game DS3 --paramdex ./Paramdex --names
//!
//! # Export selected fields as CSV
//! paramcodec decode EquipParamWeapon.param --format csv --fields '^(weight|attackBase)'
//!
//! # Show a parsed schema
//! paramcodec schema Paramdex/DS3/Defs/EQUIP_PARAM_WEAPON_ST.xml
//! ```

mod cmd;
mod common;

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser, Subcommand};
use cmd::{DecodeCmd, InspectCmd, SchemaCmd};
use common::{Result, Settings};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Paramcodec - PARAM container toolkit
///
/// Inspect PARAM containers, decode their records with PARAMDEF schemas
/// and render values with the schemas' display formats.
#[derive(Parser, Clone)]
#[command(name = "paramcodec")]
#[command(about = "Decoder for PARAM game-data containers and PARAMDEF schemas", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(author = "ArcheBase")]
struct Cli {
    /// Settings file (defaults to ./paramcodec.toml when present)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// Show container header fields and record ids
    Inspect(InspectCmd),

    /// Decode container records with a PARAMDEF schema
    Decode(DecodeCmd),

    /// Show a parsed PARAMDEF schema
    Schema(SchemaCmd),
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Inspect(cmd) => cmd.run(),
        Commands::Decode(cmd) => cmd.run(&settings),
        Commands::Schema(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
