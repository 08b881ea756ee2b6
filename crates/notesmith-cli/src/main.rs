//! Notesmith CLI - duration-quantized note-sample pack generation
//!
//! This binary derives aligned, duration-exact note clips and their
//! sound-event descriptors from master instrument recordings, and keeps the
//! MIDI asset tree's names normalized.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::process::ExitCode;

// Use modules from the library crate
use notesmith_cli::commands;

/// Notesmith - Note Sample Pack Generator
#[derive(Parser)]
#[command(name = "notesmith")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate every clip and descriptor, plus the MIDI name passes
    Generate {
        /// Directory of instrument folders holding c<octave>.ogg masters
        #[arg(short, long, default_value = "./instruments")]
        instruments: String,

        /// Output pack root directory
        #[arg(short, long, default_value = "./pack")]
        pack: String,

        /// MIDI tree to backfill and normalize (default: <pack>/Server/Melodies)
        #[arg(long)]
        midi_root: Option<String>,

        /// Event-name and audio-category namespace
        #[arg(long, default_value = "Notesmith")]
        namespace: String,

        /// Show a line per generated file instead of progress dots
        #[arg(short, long)]
        verbose: bool,
    },

    /// Run only the MIDI name passes (sidecar backfill, then renames)
    MidiNames {
        /// Root of the MIDI asset tree
        #[arg(short, long)]
        midi_root: String,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            instruments,
            pack,
            midi_root,
            namespace,
            verbose,
        } => commands::generate::run(
            &instruments,
            &pack,
            midi_root.as_deref(),
            &namespace,
            verbose,
        ),
        Commands::MidiNames { midi_root } => commands::midi::run(&midi_root),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "error".red(), e);
            ExitCode::FAILURE
        }
    }
}
