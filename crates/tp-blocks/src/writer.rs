//! Document body encoding.
//!
//! Each registered block becomes one self-closing fragment followed by a
//! newline:
//!
//! ```text
//! <!-- wp:acf/text_block {"name":"acf/text_block","data":{...},"mode":"edit"} /-->
//! ```

use serde::Serialize;
use tracing::{debug, warn};

use crate::block::{BlockData, ContentBlock};
use crate::markup::to_attribute_json;
use crate::namespace::namespace_fields;
use crate::registry::BlockRegistry;

/// Namespace of every block this system writes.
pub const ACF_NAMESPACE: &str = "acf/";

/// Editor mode carried in the attributes. Readers ignore it.
pub const BLOCK_MODE: &str = "edit";

/// Attribute payload of a written fragment. Field order is the wire order.
#[derive(Debug, Serialize)]
struct BlockAttributes<'a> {
    name: &'a str,
    data: &'a BlockData,
    mode: &'a str,
}

/// Creates the complete fragment for a qualified name and its attribute JSON.
fn format_fragment(name: &str, attrs_json: &str) -> String {
    format!("<!-- wp:{} {} /-->\n", name, attrs_json)
}

/// Encodes one block, or `None` if it produces no markup.
///
/// Blocks with an empty name, no fields, or an unregistered name are skipped.
pub fn encode_block(block: &ContentBlock, registry: &BlockRegistry) -> Option<String> {
    if block.is_empty() {
        debug!(block = %block.block_name, "Skipping empty block");
        return None;
    }
    if !registry.is_registered(&block.block_name) {
        debug!(block = %block.block_name, "Skipping unregistered block");
        return None;
    }

    let name = format!("{ACF_NAMESPACE}{}", block.block_name);
    let data = namespace_fields(registry, &block.block_name, &block.block_data);
    let attrs = BlockAttributes {
        name: &name,
        data: &data,
        mode: BLOCK_MODE,
    };

    match to_attribute_json(&attrs) {
        Ok(json) => Some(format_fragment(&name, &json)),
        Err(e) => {
            warn!(block = %block.block_name, error = %e, "Failed to serialize block attributes");
            None
        }
    }
}

/// Encodes blocks into a document body, in order.
///
/// # Example
/// ```
/// use tp_blocks::block::{BlockData, ContentBlock};
/// use tp_blocks::registry::BlockRegistry;
/// use tp_blocks::writer::encode;
///
/// let registry = BlockRegistry::platform();
/// let blocks = vec![ContentBlock::new("text_block", BlockData::new()).with_field("content", "Hi")];
/// let body = encode(&blocks, &registry);
/// assert!(body.starts_with("<!-- wp:acf/text_block {"));
/// assert!(body.ends_with(" /-->\n"));
/// ```
pub fn encode(blocks: &[ContentBlock], registry: &BlockRegistry) -> String {
    blocks
        .iter()
        .filter_map(|block| encode_block(block, registry))
        .collect()
}
