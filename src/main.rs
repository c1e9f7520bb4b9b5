mod args;

use std::fs;
use std::path::Path;

use clap::Parser;
use env_logger::Env;
use puz_editor::puz::codec::checksum;
use puz_editor::{
    decode, decode_state, encode_state, EditorConfig, FileStore, Metadata, Orientation,
    PuzzleState, Result, StateStore,
};

use args::{Cli, Commands};

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => EditorConfig::load(path)?,
        None => EditorConfig::default(),
    };

    match cli.command {
        Commands::Info { file } => info(&file),
        Commands::Verify { file } => {
            let record = decode(&fs::read(&file)?)?;
            println!(
                "OK: {} ({}x{}, {} clues, all checksums valid)",
                file.display(),
                record.width,
                record.height,
                record.clues.len()
            );
            Ok(())
        }
        Commands::Clues { file } => clues(&file, &config),
        Commands::Grid { file } => {
            let state = decode_state(&fs::read(&file)?, config.require_square)?;
            print!("{}", state.grid());
            Ok(())
        }
        Commands::Roundtrip { file, out } => {
            let original = fs::read(&file)?;
            let encoded = encode_state(&decode_state(&original, config.require_square)?)?;
            if let Some(out) = out {
                fs::write(&out, &encoded)?;
            }
            if encoded == original {
                println!("IDENTICAL: {} bytes", encoded.len());
                Ok(())
            } else {
                println!(
                    "DIFFERENT: {} bytes in, {} bytes out",
                    original.len(),
                    encoded.len()
                );
                std::process::exit(2);
            }
        }
        Commands::New {
            size,
            out,
            title,
            author,
        } => {
            let size = size.unwrap_or(config.default_size);
            let state = PuzzleState::new(size).set_metadata(Metadata {
                title,
                author,
                ..Metadata::default()
            });
            FileStore::new(&out, &config).save(&state)?;
            println!("Wrote blank {}x{} puzzle to {}", size, size, out.display());
            Ok(())
        }
    }
}

fn info(file: &Path) -> Result<()> {
    let record = decode(&fs::read(file)?)?;
    let sections = checksum::section_checksums(&record)?;

    println!("Puzzle Information:");
    println!("  Title: {}", record.title);
    println!("  Author: {}", record.author);
    println!("  Copyright: {}", record.copyright);
    println!("  Version: {}", record.version_str());
    println!("  Size: {}x{}", record.width, record.height);
    println!("  Clues: {}", record.clues.len());
    if !record.notes.is_empty() {
        println!("  Notes: {}", record.notes);
    }

    println!("\nChecksums:");
    println!("  File: {:04x}", checksum::file_checksum(&record)?);
    println!("  Header: {:04x}", sections.header);
    println!("  Solution: {:04x}", sections.solution);
    println!("  State: {:04x}", sections.state);
    println!("  Text: {:04x}", sections.text);
    println!("  Magic: {}", hex::encode(checksum::magic_checksum(&sections)));

    println!("\nExtra Data:");
    println!("  Preamble: {} bytes", record.preamble.len());
    println!("  Postscript: {} bytes", record.postscript.len());
    Ok(())
}

fn clues(file: &Path, config: &EditorConfig) -> Result<()> {
    let state = decode_state(&fs::read(file)?, config.require_square)?;
    let words = state.word_info()?;
    for orientation in Orientation::ALL {
        println!("{}:", orientation);
        for word in words.words(orientation).iter() {
            println!("  {}. {} ({})", word.index, word.clue, word.len());
        }
    }
    Ok(())
}
