//! Registered block templates and their key namespacing rules.
//!
//! The registry answers three questions for the encoder:
//!
//! - is a block name known (unknown blocks are dropped),
//! - is a field shared across blocks (global fields are never prefixed),
//! - does a key belong to a repeater row (rewritten through the block's
//!   rewrite table instead of the general prefixing rule).

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use crate::error::{Error, Result};

/// Placeholder expanded to the block name inside a rewrite replacement.
pub const BLOCK_PLACEHOLDER: &str = "{block}";

/// Block templates the platform ships.
pub const PLATFORM_BLOCKS: &[&str] = &[
    "text_block",
    "image_block",
    "video_block",
    "download_block",
    "info_box_block",
    "content_card_block",
    "image_text_block",
    "text_image_block",
    "video_text_block",
    "text_video_block",
    "accordion_block",
    "quiz_block",
];

/// Fields shared by every block that keep their bare names.
pub const PLATFORM_GLOBAL_FIELDS: &[&str] = &["show_chapter_subtitle", "chapter_subtitle"];

/// Block names must survive the comment grammar the decoder reads.
static BLOCK_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z][a-z0-9_-]*$").expect("Invalid block name regex"));

/// One repeater-row key rewrite.
///
/// A key containing `marker` anywhere is rewritten to
/// `{block}_` + key, with every `marker` replaced by `replacement`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRule {
    /// Substring that identifies a repeater-row key
    pub marker: String,
    /// Text substituted for the marker; `{block}` expands to the block name
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(marker: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
            replacement: replacement.into(),
        }
    }

    /// Unanchored containment, so `x_row_y` and `row_row_` both match `_row_`.
    pub fn matches(&self, key: &str) -> bool {
        !self.marker.is_empty() && key.contains(&self.marker)
    }

    /// Replace every marker occurrence in `key`, expanding the block placeholder.
    pub fn apply(&self, block_name: &str, key: &str) -> String {
        let replacement = self.replacement.replace(BLOCK_PLACEHOLDER, block_name);
        key.replace(&self.marker, &replacement)
    }
}

/// Known block templates, global field names and per-block rewrite tables.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BlockRegistry {
    blocks: Vec<String>,
    global_fields: BTreeSet<String>,
    rewrites: BTreeMap<String, Vec<RewriteRule>>,
}

impl BlockRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// The registry used by the tutorial platform out of the box.
    pub fn platform() -> Self {
        let mut registry = Self::new();
        for name in PLATFORM_BLOCKS {
            registry.blocks.push((*name).to_string());
        }
        for field in PLATFORM_GLOBAL_FIELDS {
            registry.global_fields.insert((*field).to_string());
        }
        registry
            .rewrites
            .insert("accordion_block".into(), vec![RewriteRule::new("_row_", "_{block}_row_")]);
        registry.rewrites.insert(
            "quiz_block".into(),
            vec![RewriteRule::new("_answers_", "_{block}_answers_")],
        );
        registry
    }

    /// Register a block template. Registering a name twice is a no-op.
    pub fn register(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if !BLOCK_NAME_REGEX.is_match(&name) {
            return Err(Error::InvalidBlockName { name });
        }
        if !self.is_registered(&name) {
            self.blocks.push(name);
        }
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    pub fn with_block(mut self, name: impl Into<String>) -> Result<Self> {
        self.register(name)?;
        Ok(self)
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.blocks.iter().any(|b| b == name)
    }

    /// Registered names in registration order
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        self.blocks.iter().map(String::as_str)
    }

    pub fn add_global_field(&mut self, field: impl Into<String>) {
        self.global_fields.insert(field.into());
    }

    pub fn is_global_field(&self, key: &str) -> bool {
        self.global_fields.contains(key)
    }

    pub fn global_fields(&self) -> impl Iterator<Item = &str> {
        self.global_fields.iter().map(String::as_str)
    }

    /// Attach a repeater rewrite rule to a registered block.
    ///
    /// # Errors
    /// Returns `Error::InvalidRewriteRule` if the block is not registered or
    /// the marker is empty.
    pub fn add_rewrite(&mut self, block: &str, rule: RewriteRule) -> Result<()> {
        if !self.is_registered(block) {
            return Err(Error::rewrite(block, "block is not registered"));
        }
        if rule.marker.is_empty() {
            return Err(Error::rewrite(block, "marker must not be empty"));
        }
        self.rewrites.entry(block.to_string()).or_default().push(rule);
        Ok(())
    }

    /// Drop every rewrite rule of a block
    pub fn clear_rewrites(&mut self, block: &str) {
        self.rewrites.remove(block);
    }

    pub fn rewrite_rules(&self, block: &str) -> &[RewriteRule] {
        self.rewrites.get(block).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All rewrite tables, keyed by block name
    pub fn rewrites(&self) -> impl Iterator<Item = (&str, &[RewriteRule])> {
        self.rewrites.iter().map(|(b, rules)| (b.as_str(), rules.as_slice()))
    }

    /// Rules of `block` whose marker occurs in `key`, in table order
    pub fn matching_rewrites<'a>(
        &'a self,
        block: &str,
        key: &'a str,
    ) -> impl Iterator<Item = &'a RewriteRule> + 'a {
        self.rewrite_rules(block).iter().filter(move |r| r.matches(key))
    }

    /// Ensure the registry can encode anything at all.
    pub fn validate(&self) -> Result<()> {
        if self.blocks.is_empty() {
            return Err(Error::NoRegisteredBlocks);
        }
        Ok(())
    }
}
