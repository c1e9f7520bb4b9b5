use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "puz")]
#[command(about = "Inspect, verify and create Across Lite .puz crossword files", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Editor settings file (TOML)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show metadata, dimensions and checksums
    Info {
        file: PathBuf,
    },

    /// Check every checksum; exits non-zero on any error
    Verify {
        file: PathBuf,
    },

    /// List the clues with their numbers
    Clues {
        file: PathBuf,
    },

    /// Print the solution grid
    Grid {
        file: PathBuf,
    },

    /// Decode and re-encode, reporting whether the bytes are unchanged
    Roundtrip {
        file: PathBuf,

        /// Also write the re-encoded bytes here
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Write a blank puzzle
    New {
        /// Side length (defaults to the configured size)
        #[arg(short, long)]
        size: Option<usize>,

        /// Output file
        #[arg(short, long)]
        out: PathBuf,

        #[arg(long, default_value = "")]
        title: String,

        #[arg(long, default_value = "")]
        author: String,
    },
}
