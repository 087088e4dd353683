//! Reference resolution for attachment and link fields.
//!
//! Decoded blocks carry numeric ids for media and linked posts. The reader
//! asks a [`ReferenceResolver`] for the matching URL and stores it next to the
//! id as `{field}_url`.

use std::collections::HashMap;

/// Placeholder replaced by the numeric id in URL templates.
pub const ID_PLACEHOLDER: &str = "{id}";

/// Looks up public URLs for content-store ids.
pub trait ReferenceResolver: Send + Sync {
    /// URL of the attachment with the given id
    fn media_url(&self, attachment_id: u64) -> Option<String>;

    /// Permalink of the post with the given id
    fn permalink(&self, post_id: u64) -> Option<String>;
}

/// Resolves nothing. Derived `_url` fields decode as `null`.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopResolver;

impl ReferenceResolver for NoopResolver {
    fn media_url(&self, _attachment_id: u64) -> Option<String> {
        None
    }

    fn permalink(&self, _post_id: u64) -> Option<String> {
        None
    }
}

/// Builds URLs by substituting `{id}` into fixed templates.
///
/// ```
/// use tp_blocks::resolve::{ReferenceResolver, TemplateResolver};
///
/// let resolver = TemplateResolver::new()
///     .with_media_url("https://example.org/?attachment_id={id}")
///     .with_permalink("https://example.org/?p={id}");
/// assert_eq!(
///     resolver.media_url(42).as_deref(),
///     Some("https://example.org/?attachment_id=42")
/// );
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TemplateResolver {
    media_url: Option<String>,
    permalink: Option<String>,
}

impl TemplateResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media_url(mut self, template: impl Into<String>) -> Self {
        self.media_url = Some(template.into());
        self
    }

    pub fn with_permalink(mut self, template: impl Into<String>) -> Self {
        self.permalink = Some(template.into());
        self
    }

    fn expand(template: Option<&String>, id: u64) -> Option<String> {
        template.map(|t| t.replace(ID_PLACEHOLDER, &id.to_string()))
    }
}

impl ReferenceResolver for TemplateResolver {
    fn media_url(&self, attachment_id: u64) -> Option<String> {
        Self::expand(self.media_url.as_ref(), attachment_id)
    }

    fn permalink(&self, post_id: u64) -> Option<String> {
        Self::expand(self.permalink.as_ref(), post_id)
    }
}

/// Fixed id-to-URL tables.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StaticResolver {
    media: HashMap<u64, String>,
    links: HashMap<u64, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_media(mut self, attachment_id: u64, url: impl Into<String>) -> Self {
        self.media.insert(attachment_id, url.into());
        self
    }

    pub fn with_permalink(mut self, post_id: u64, url: impl Into<String>) -> Self {
        self.links.insert(post_id, url.into());
        self
    }
}

impl ReferenceResolver for StaticResolver {
    fn media_url(&self, attachment_id: u64) -> Option<String> {
        self.media.get(&attachment_id).cloned()
    }

    fn permalink(&self, post_id: u64) -> Option<String> {
        self.links.get(&post_id).cloned()
    }
}
