//! Error types for tp-blocks

pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while building a registry or validating a document draft.
///
/// Encoding and decoding never fail; malformed input is skipped instead.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Document title is required")]
    EmptyTitle,

    #[error("Document content is required")]
    EmptyContent,

    #[error("No blocks are registered")]
    NoRegisteredBlocks,

    #[error("Invalid block name: {name:?}")]
    InvalidBlockName { name: String },

    #[error("Invalid rewrite rule for {block}: {reason}")]
    InvalidRewriteRule { block: String, reason: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Attribute payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl Error {
    pub fn rewrite(block: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRewriteRule {
            block: block.into(),
            reason: reason.into(),
        }
    }
}
