//! Document body decoding.
//!
//! Reverses the writer: every top-level fragment becomes a [`ContentBlock`]
//! with the `acf/` namespace, shadow keys and block prefixes removed.
//! Attachment and link ids are hydrated with their URLs on the way out.

use serde_json::Value;
use tracing::{debug, warn};

use crate::block::{BlockData, ContentBlock};
use crate::namespace::{is_shadow_key, unprefixed_key};
use crate::parser::{Fragment, tokenize};
use crate::resolve::ReferenceResolver;
use crate::writer::ACF_NAMESPACE;

/// Fields whose integer values are attachment ids.
pub const ATTACHMENT_FIELDS: &[&str] = &["image", "video", "file"];

/// Fields containing this substring with integer values are post ids.
pub const LINK_MARKER: &str = "link";

/// Suffix of the derived URL field.
pub const URL_SUFFIX: &str = "_url";

/// Why a fragment produced no block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The fragment name was empty once the namespace was removed.
    ///
    /// [`tokenize`] only yields non-empty names, so this comes from
    /// fragments built by hand.
    EmptyName,
    /// The attribute payload was not valid JSON
    MalformedAttributes { message: String },
}

/// Decodes a document body into its blocks, in document order.
///
/// Fragments that cannot be read are skipped; the rest of the document is
/// still decoded.
///
/// # Example
/// ```
/// use tp_blocks::reader::decode;
/// use tp_blocks::resolve::NoopResolver;
///
/// let body = r#"<!-- wp:acf/text_block {"name":"acf/text_block","data":{"text_block_content":"Hi","_text_block_content":"text_block_content"},"mode":"edit"} /-->"#;
/// let blocks = decode(body, &NoopResolver);
/// assert_eq!(blocks.len(), 1);
/// assert_eq!(blocks[0].block_name, "text_block");
/// assert_eq!(blocks[0].block_data["content"], "Hi");
/// ```
pub fn decode(document: &str, resolver: &dyn ReferenceResolver) -> Vec<ContentBlock> {
    tokenize(document)
        .iter()
        .filter_map(|fragment| match read_fragment(fragment, resolver) {
            Ok(block) => Some(block),
            Err(SkipReason::EmptyName) => {
                debug!(line = fragment.start_line, "Skipping fragment without a name");
                None
            }
            Err(SkipReason::MalformedAttributes { message }) => {
                warn!(
                    name = %fragment.name,
                    line = fragment.start_line,
                    error = %message,
                    "Skipping fragment with malformed attributes"
                );
                None
            }
        })
        .collect()
}

/// Decodes a single fragment.
pub fn read_fragment(
    fragment: &Fragment,
    resolver: &dyn ReferenceResolver,
) -> Result<ContentBlock, SkipReason> {
    let block_name = fragment
        .name
        .strip_prefix(ACF_NAMESPACE)
        .unwrap_or(&fragment.name);
    if block_name.is_empty() {
        return Err(SkipReason::EmptyName);
    }
    if fragment.malformed {
        return Err(SkipReason::MalformedAttributes {
            message: "attribute payload is not closed before the comment end".to_string(),
        });
    }

    let attrs = match fragment.attrs.as_deref() {
        Some(raw) => serde_json::from_str::<Value>(raw).map_err(|e| {
            SkipReason::MalformedAttributes {
                message: e.to_string(),
            }
        })?,
        None => Value::Null,
    };

    let raw_data = match attrs {
        Value::Object(mut attrs) => match attrs.remove("data") {
            Some(Value::Object(data)) => data,
            _ => BlockData::new(),
        },
        _ => BlockData::new(),
    };

    Ok(ContentBlock::new(
        block_name,
        strip_fields(block_name, raw_data, resolver),
    ))
}

/// Drops shadow keys, removes the block prefix and hydrates reference URLs.
pub fn strip_fields(
    block_name: &str,
    raw: BlockData,
    resolver: &dyn ReferenceResolver,
) -> BlockData {
    let mut data = BlockData::new();

    for (key, value) in raw {
        if is_shadow_key(&key) {
            continue;
        }

        let field = unprefixed_key(block_name, &key).to_string();
        let derived = value.as_u64().and_then(|id| {
            if ATTACHMENT_FIELDS.contains(&field.as_str()) {
                Some(resolver.media_url(id))
            } else if field.contains(LINK_MARKER) {
                Some(resolver.permalink(id))
            } else {
                None
            }
        });

        data.insert(field.clone(), value);
        if let Some(url) = derived {
            data.insert(
                format!("{field}{URL_SUFFIX}"),
                url.map(Value::String).unwrap_or(Value::Null),
            );
        }
    }

    data
}
