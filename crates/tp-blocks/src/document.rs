//! Document drafts and views: the write and read paths of a stored body.
//!
//! The content store keeps only the encoded body string. A draft is what a
//! caller submits when creating or replacing a document; a view is what a
//! caller gets back when reading one.

use serde::{Deserialize, Serialize};

use crate::block::ContentBlock;
use crate::codec::BlockCodec;
use crate::error::{Error, Result};

/// Title and content blocks submitted for a tutorial, course or chapter.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentDraft {
    /// Existing document being replaced, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_id: Option<u64>,
    pub title: String,
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

impl DocumentDraft {
    pub fn new(title: impl Into<String>, content: Vec<ContentBlock>) -> Self {
        Self {
            post_id: None,
            title: title.into(),
            content,
        }
    }

    pub fn with_post_id(mut self, post_id: u64) -> Self {
        self.post_id = Some(post_id);
        self
    }

    /// Check the caller supplied what the document needs.
    ///
    /// # Errors
    /// `Error::EmptyTitle` for a blank title, `Error::EmptyContent` when
    /// `require_content` is set and no block was given.
    pub fn validate(&self, require_content: bool) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(Error::EmptyTitle);
        }
        if require_content && self.content.is_empty() {
            return Err(Error::EmptyContent);
        }
        Ok(())
    }

    /// Full replacement body for the document.
    pub fn render_body(&self, codec: &BlockCodec) -> String {
        codec.encode(&self.content)
    }
}

/// A stored document decoded for a reader.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DocumentView {
    pub title: String,
    pub content: Vec<ContentBlock>,
}

impl DocumentView {
    pub fn from_body(title: impl Into<String>, body: &str, codec: &BlockCodec) -> Self {
        Self {
            title: title.into(),
            content: codec.decode(body),
        }
    }
}
