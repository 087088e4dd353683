//! Codec configuration types
//!
//! A configuration file describes which block templates exist, which fields
//! are shared between blocks, how repeater rows are rewritten, and where
//! attachment and link URLs point:
//!
//! ```toml
//! [blocks]
//! registered = ["text_block", "quiz_block"]
//! global_fields = ["show_chapter_subtitle", "chapter_subtitle"]
//!
//! [[blocks.rewrite]]
//! block = "quiz_block"
//! marker = "_answers_"
//! replacement = "_{block}_answers_"
//!
//! [resolver]
//! media_url = "https://example.org/?attachment_id={id}"
//! permalink = "https://example.org/?p={id}"
//! ```
//!
//! Every section is optional; omitted values fall back to the platform
//! defaults.

use serde::{Deserialize, Serialize};
use tp_blocks::registry::{PLATFORM_BLOCKS, PLATFORM_GLOBAL_FIELDS};
use tp_blocks::{BlockCodec, BlockRegistry, RewriteRule, TemplateResolver};

use crate::error::Result;

/// One repeater rewrite rule bound to a block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    pub block: String,
    pub marker: String,
    pub replacement: String,
}

impl RewriteConfig {
    fn rule(&self) -> RewriteRule {
        RewriteRule::new(&self.marker, &self.replacement)
    }
}

/// Block template configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlocksConfig {
    /// Block templates the encoder accepts
    #[serde(default = "default_registered")]
    pub registered: Vec<String>,
    /// Field names written without a block prefix
    #[serde(default = "default_global_fields")]
    pub global_fields: Vec<String>,
    /// Repeater rewrite rules.
    ///
    /// When omitted, the platform rules for whichever registered blocks have
    /// one are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rewrite: Option<Vec<RewriteConfig>>,
}

fn default_registered() -> Vec<String> {
    PLATFORM_BLOCKS.iter().map(|b| b.to_string()).collect()
}

fn default_global_fields() -> Vec<String> {
    PLATFORM_GLOBAL_FIELDS.iter().map(|f| f.to_string()).collect()
}

impl Default for BlocksConfig {
    fn default() -> Self {
        Self {
            registered: default_registered(),
            global_fields: default_global_fields(),
            rewrite: None,
        }
    }
}

/// URL templates for reference hydration. `{id}` is replaced by the id.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolverConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub media_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permalink: Option<String>,
}

/// Complete codec configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CodecConfig {
    #[serde(default)]
    pub blocks: BlocksConfig,
    #[serde(default)]
    pub resolver: ResolverConfig,
}

impl CodecConfig {
    /// Build the block registry this configuration describes.
    ///
    /// # Errors
    /// Fails on invalid block names, an empty registered set, or rewrite
    /// rules that are empty or name an unregistered block.
    pub fn to_registry(&self) -> Result<BlockRegistry> {
        let mut registry = BlockRegistry::new();
        for name in &self.blocks.registered {
            registry.register(name.as_str())?;
        }
        registry.validate()?;

        for field in &self.blocks.global_fields {
            registry.add_global_field(field.as_str());
        }

        match &self.blocks.rewrite {
            Some(rules) => {
                for rule in rules {
                    registry.add_rewrite(&rule.block, rule.rule())?;
                }
            }
            None => {
                let platform = BlockRegistry::platform();
                for (block, rules) in platform.rewrites() {
                    if !registry.is_registered(block) {
                        continue;
                    }
                    for rule in rules {
                        registry.add_rewrite(block, rule.clone())?;
                    }
                }
            }
        }

        Ok(registry)
    }

    pub fn to_resolver(&self) -> TemplateResolver {
        let mut resolver = TemplateResolver::new();
        if let Some(template) = &self.resolver.media_url {
            resolver = resolver.with_media_url(template.as_str());
        }
        if let Some(template) = &self.resolver.permalink {
            resolver = resolver.with_permalink(template.as_str());
        }
        resolver
    }

    /// Registry and resolver bundled as a codec
    pub fn to_codec(&self) -> Result<BlockCodec> {
        Ok(BlockCodec::new(self.to_registry()?).with_resolver(self.to_resolver()))
    }

    /// Check the configuration without keeping the result
    pub fn validate(&self) -> Result<()> {
        self.to_registry().map(|_| ())
    }
}
