//! Block markup encoding and decoding for Tutorial Platform.
//!
//! Document bodies (tutorials, courses, labs, chapters) are stored as a
//! sequence of self-closing block comments, one per content block:
//!
//! ```text
//! <!-- wp:acf/text_block {"name":"acf/text_block","data":{"text_block_content":"Hi","_text_block_content":"text_block_content"},"mode":"edit"} /-->
//! ```
//!
//! # Layers
//!
//! - [`registry`]: registered block templates, global fields and per-block
//!   repeater rewrite tables.
//! - [`namespace`]: how flat field keys are scoped to a block instance.
//! - [`writer`] / [`reader`]: the encoder and decoder proper. Both skip what
//!   they cannot handle and never fail.
//! - [`parser`]: the comment grammar tokenizer the reader builds on.
//! - [`resolve`]: URL lookups for attachment and link ids during decoding.
//! - [`codec`]: [`BlockCodec`], a shareable bundle of registry and resolver.
//! - [`document`]: draft validation and view construction around the codec.
//!
//! ```
//! use tp_blocks::{BlockCodec, BlockData, ContentBlock};
//!
//! let codec = BlockCodec::default();
//! let blocks = vec![ContentBlock::new("text_block", BlockData::new()).with_field("content", "Hi")];
//!
//! let body = codec.encode(&blocks);
//! assert_eq!(codec.decode(&body), blocks);
//! ```

pub mod block;
pub mod codec;
pub mod document;
pub mod error;
pub mod inspect;
pub mod markup;
pub mod namespace;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod resolve;
pub mod writer;

pub use block::{BlockData, ContentBlock};
pub use codec::BlockCodec;
pub use document::{DocumentDraft, DocumentView};
pub use error::{Error, Result};
pub use inspect::{FragmentReport, FragmentStatus, inspect};
pub use parser::{Fragment, tokenize};
pub use reader::{SkipReason, decode};
pub use registry::{BlockRegistry, RewriteRule};
pub use resolve::{NoopResolver, ReferenceResolver, StaticResolver, TemplateResolver};
pub use writer::encode;
