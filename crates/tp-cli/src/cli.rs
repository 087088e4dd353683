//! CLI argument parsing using clap derive

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Tutorial Platform block codec - encode and decode ACF block markup
#[derive(Parser, Debug)]
#[command(name = "tp-blocks")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Codec configuration file (.toml, .json, .yaml)
    ///
    /// Defaults to .tutorial/blocks.toml in the working directory or any
    /// parent, or the built-in platform blocks when there is none.
    #[arg(short, long, global = true, env = "TP_BLOCKS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Encode a JSON array of blocks into a document body
    ///
    /// The input may also be a draft object with "title" and "content";
    /// the draft is validated before its content is encoded.
    ///
    /// Examples:
    ///   tp-blocks encode chapter.json
    ///   cat chapter.json | tp-blocks encode
    Encode {
        /// Input file (reads stdin when omitted or "-")
        input: Option<PathBuf>,
    },

    /// Decode a document body into a JSON array of blocks
    Decode {
        /// Input file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// Wrap the blocks in a document view with this title
        #[arg(long)]
        title: Option<String>,
    },

    /// List the block fragments of a document body and how each decodes
    Inspect {
        /// Input file (reads stdin when omitted or "-")
        input: Option<PathBuf>,

        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Show registered blocks, global fields and rewrite rules
    Blocks,
}
