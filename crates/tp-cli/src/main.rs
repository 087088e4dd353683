//! Tutorial Platform block codec CLI
//!
//! Encodes block lists into stored document bodies and decodes them back.

mod cli;
mod commands;
mod error;
mod logging;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{} {}", "warning:".yellow().bold(), e);
    }
    tracing::debug!("Verbose mode enabled");

    let cwd = std::env::current_dir()?;
    let codec = commands::load_codec(cli.config.as_deref(), &cwd)?;

    let output = match cli.command {
        Commands::Encode { input } => {
            let input = commands::read_input(input.as_deref())?;
            // The body already ends with a newline per block
            print!("{}", commands::run_encode(&codec, &input)?);
            return Ok(());
        }
        Commands::Decode {
            input,
            pretty,
            title,
        } => {
            let input = commands::read_input(input.as_deref())?;
            commands::run_decode(&codec, &input, pretty, title.as_deref())?
        }
        Commands::Inspect { input, json } => {
            let input = commands::read_input(input.as_deref())?;
            commands::run_inspect(&codec, &input, json)?
        }
        Commands::Blocks => commands::run_blocks(codec.registry())?,
    };

    println!("{output}");
    Ok(())
}
