//! Content block types

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Flat field mapping carried by a block. Insertion order is preserved.
pub type BlockData = Map<String, Value>;

/// One authored unit of content: a template name plus its flat field values.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ContentBlock {
    /// Template identifier, e.g. `text_block`.
    pub block_name: String,
    /// Field values keyed by their unprefixed names.
    #[serde(default, deserialize_with = "object_or_empty")]
    pub block_data: BlockData,
}

impl ContentBlock {
    /// Create a block from a name and its field mapping
    pub fn new(block_name: impl Into<String>, block_data: BlockData) -> Self {
        Self {
            block_name: block_name.into(),
            block_data,
        }
    }

    /// Append a field, keeping any earlier fields in place
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.block_data.insert(key.into(), value.into());
        self
    }

    /// Look up a field by its unprefixed key
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.block_data.get(key)
    }

    /// A block with no name or no fields produces no markup.
    pub fn is_empty(&self) -> bool {
        self.block_name.is_empty() || self.block_data.is_empty()
    }
}

/// Clients built on PHP send an empty field list as `[]`; anything that is not
/// an object is read as an empty mapping.
fn object_or_empty<'de, D>(deserializer: D) -> Result<BlockData, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(BlockData::new()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_with_field_preserves_order() {
        let block = ContentBlock::new("text_block", BlockData::new())
            .with_field("content", "Hello")
            .with_field("show_chapter_subtitle", true)
            .with_field("alignment", "left");

        let keys: Vec<&str> = block.block_data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["content", "show_chapter_subtitle", "alignment"]);
    }

    #[test]
    fn test_is_empty() {
        assert!(ContentBlock::default().is_empty());
        assert!(ContentBlock::new("text_block", BlockData::new()).is_empty());
        assert!(ContentBlock::new("", BlockData::new()).with_field("x", 1).is_empty());
        assert!(!ContentBlock::new("text_block", BlockData::new()).with_field("x", 1).is_empty());
    }

    #[test]
    fn test_deserialize_array_data_as_empty() {
        let block: ContentBlock =
            serde_json::from_value(json!({"block_name": "text_block", "block_data": []})).unwrap();
        assert_eq!(block.block_name, "text_block");
        assert!(block.block_data.is_empty());
    }

    #[test]
    fn test_deserialize_missing_data() {
        let block: ContentBlock = serde_json::from_value(json!({"block_name": "image_block"})).unwrap();
        assert!(block.block_data.is_empty());
    }
}
