// Declare modules
pub mod cli;
pub mod config;
pub mod formatter;
pub mod models;
pub mod scanner;

use anyhow::{Context, Result};
use clap::Parser;
use std::env;

use self::cli::Cli;
use self::config::{load_presets, presets_path, resolve_config, resolve_root};
use self::formatter::{print_map, write_log, MAP_RULE, MAP_TITLE};
use self::scanner::Scanner;

/// Initializes components and orchestrates data flow.
pub fn run() -> Result<()> {
    // 1. Parse Args
    let args = Cli::parse();
    println!("start");

    // 2. Identify Project Root
    let current_dir = env::current_dir().context("Failed to get current directory")?;
    let root = resolve_root(&current_dir, args.root.as_deref())?;

    // 3. Resolve Configuration
    let presets = load_presets(presets_path().as_deref())?;
    let config = resolve_config(args, root, &presets);
    log::debug!("Resolved configuration: {:?}", config);

    // 4. Build the map (first pass)
    let scanner = Scanner::new(config.root.clone(), config.filter.clone());
    let structure = scanner.build_map()?;

    if structure.is_empty() {
        log::warn!("No files matched the accepted extensions under {}", config.root.display());
    }

    // 5. Write contents and map (second pass)
    let output = config.root.join(&config.output);
    write_log(&scanner, &structure, &output)?;

    // 6. Print to Stdout
    if config.print_map {
        println!("\n{}", MAP_TITLE);
        println!("{}", MAP_RULE);
        print_map(&structure, 0);
    }

    Ok(())
}
