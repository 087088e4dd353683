//! Field key namespacing shared by the writer and the reader.
//!
//! On the way in, every key is scoped to its block instance:
//!
//! | key kind      | stored key                       | shadow entry                       |
//! |---------------|----------------------------------|------------------------------------|
//! | general       | `{block}_{key}`                  | `_{block}_{key}` = `{block}_{key}` |
//! | global field  | `{key}`                          | `_{key}` = `{key}`                 |
//! | repeater row  | `{block}_{key}` with rule applied | none                               |
//!
//! On the way out, shadow entries are dropped and the `{block}_` prefix is
//! removed again.

use serde_json::Value;
use tracing::trace;

use crate::block::BlockData;
use crate::registry::BlockRegistry;

/// Leading character of bookkeeping keys.
pub const SHADOW_PREFIX: char = '_';

/// `{block}_{key}`
pub fn prefixed_key(block_name: &str, key: &str) -> String {
    format!("{block_name}_{key}")
}

/// `_{key}`
pub fn shadow_key(key: &str) -> String {
    format!("{SHADOW_PREFIX}{key}")
}

pub fn is_shadow_key(key: &str) -> bool {
    key.starts_with(SHADOW_PREFIX)
}

/// Remove a leading `{block}_` segment, returning the key unchanged when absent.
pub fn unprefixed_key<'a>(block_name: &str, key: &'a str) -> &'a str {
    if block_name.is_empty() {
        return key;
    }
    key.strip_prefix(block_name)
        .and_then(|rest| rest.strip_prefix('_'))
        .unwrap_or(key)
}

/// Scope every field of one block instance to that block.
pub fn namespace_fields(registry: &BlockRegistry, block_name: &str, fields: &BlockData) -> BlockData {
    let mut data = BlockData::new();

    for (key, value) in fields {
        let mut rules = registry.matching_rewrites(block_name, key).peekable();
        if rules.peek().is_some() {
            let rewritten = rules.fold(key.clone(), |acc, rule| rule.apply(block_name, &acc));
            let stored = prefixed_key(block_name, &rewritten);
            trace!(block = block_name, key = %key, stored = %stored, "Rewrote repeater row key");
            data.insert(stored, value.clone());
        } else if registry.is_global_field(key) {
            data.insert(key.clone(), value.clone());
            data.insert(shadow_key(key), Value::String(key.clone()));
        } else {
            let stored = prefixed_key(block_name, key);
            let shadow = shadow_key(&stored);
            data.insert(stored.clone(), value.clone());
            data.insert(shadow, Value::String(stored));
        }
    }

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields(value: Value) -> BlockData {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_unprefixed_key() {
        assert_eq!(unprefixed_key("text_block", "text_block_content"), "content");
        assert_eq!(unprefixed_key("text_block", "chapter_subtitle"), "chapter_subtitle");
        assert_eq!(unprefixed_key("text_block", "text_blockcontent"), "text_blockcontent");
        assert_eq!(unprefixed_key("", "content"), "content");
    }

    #[test]
    fn test_general_keys_get_prefix_and_shadow() {
        let registry = BlockRegistry::platform();
        let data = namespace_fields(&registry, "text_block", &fields(json!({"content": "Hi"})));

        assert_eq!(
            Value::Object(data),
            json!({
                "text_block_content": "Hi",
                "_text_block_content": "text_block_content",
            })
        );
    }

    #[test]
    fn test_general_key_precedes_its_shadow() {
        let registry = BlockRegistry::platform();
        let data = namespace_fields(&registry, "text_block", &fields(json!({"content": "Hi"})));
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["text_block_content", "_text_block_content"]);
    }

    #[test]
    fn test_global_fields_keep_bare_names() {
        let registry = BlockRegistry::platform();
        let data = namespace_fields(
            &registry,
            "image_block",
            &fields(json!({"show_chapter_subtitle": true, "chapter_subtitle": "Intro"})),
        );

        assert_eq!(
            Value::Object(data),
            json!({
                "show_chapter_subtitle": true,
                "_show_chapter_subtitle": "show_chapter_subtitle",
                "chapter_subtitle": "Intro",
                "_chapter_subtitle": "chapter_subtitle",
            })
        );
    }

    #[test]
    fn test_repeater_keys_have_no_shadow() {
        let registry = BlockRegistry::platform();
        let data = namespace_fields(
            &registry,
            "quiz_block",
            &fields(json!({"questions_0_answers_1_text": "Yes"})),
        );

        assert_eq!(
            Value::Object(data),
            json!({"quiz_block_questions_0_quiz_block_answers_1_text": "Yes"})
        );
    }

    #[test]
    fn test_repeater_marker_ignored_for_other_blocks() {
        let registry = BlockRegistry::platform();
        let data = namespace_fields(&registry, "text_block", &fields(json!({"a_row_b": 1})));
        assert!(data.contains_key("text_block_a_row_b"));
        assert!(data.contains_key("_text_block_a_row_b"));
    }
}
