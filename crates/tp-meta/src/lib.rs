//! Configuration for the Tutorial Platform block codec.
//!
//! This crate loads [`CodecConfig`] from TOML, JSON or YAML files and turns
//! it into a ready-to-use [`tp_blocks::BlockCodec`].

pub mod config;
pub mod error;
pub mod loader;

pub use config::{BlocksConfig, CodecConfig, ResolverConfig, RewriteConfig};
pub use error::{Error, Result};
pub use loader::{CONFIG_DIR, CONFIG_FILE, discover, load, load_or_default};
