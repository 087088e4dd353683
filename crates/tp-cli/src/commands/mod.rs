//! Command implementations for tp-cli
//!
//! Each command turns its input into the text it prints, so the functions
//! can be tested without capturing stdout.

pub mod blocks;
pub mod decode;
pub mod encode;
pub mod inspect;

pub use blocks::run_blocks;
pub use decode::run_decode;
pub use encode::run_encode;
pub use inspect::run_inspect;

use std::io::Read;
use std::path::Path;

use tp_blocks::BlockCodec;

use crate::error::Result;

/// Read a command input from a file, or stdin for `None` and `-`.
pub fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => {
            tracing::debug!(path = %path.display(), "Reading input file");
            Ok(std::fs::read_to_string(path)?)
        }
        _ => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Build the codec from an explicit config file, a discovered one, or the
/// platform defaults.
pub fn load_codec(config: Option<&Path>, cwd: &Path) -> Result<BlockCodec> {
    let config = tp_meta::load_or_default(config, cwd)?;
    Ok(config.to_codec()?)
}
