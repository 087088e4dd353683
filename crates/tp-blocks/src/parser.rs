//! Block comment tokenizer.
//!
//! Splits a document body into its top-level block fragments. Two forms are
//! recognized:
//!
//! ```text
//! <!-- wp:acf/text_block {"name":"acf/text_block","data":{},"mode":"edit"} /-->
//!
//! <!-- wp:acf/text_block {"data":{}} -->
//! inner content
//! <!-- /wp:acf/text_block -->
//! ```
//!
//! Fragments nested inside a paired fragment are part of its inner content and
//! are not reported separately. Text between fragments is ignored.
//!
//! A delimiter ends at the first `-->` after its name, as any HTML comment
//! does. An attribute payload that is not closed before that point is reported
//! as a malformed fragment, and scanning resumes after the `-->`.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Namespace assumed for names written without one.
pub const DEFAULT_NAMESPACE: &str = "core";

/// A top-level block fragment with its position in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
    /// Fully-qualified block name, e.g. `acf/text_block` or `core/paragraph`.
    pub name: String,
    /// Raw attribute JSON, if the opener carried any.
    pub attrs: Option<String>,
    /// Content between opener and closer of a paired fragment.
    pub inner: Option<String>,
    /// Whether the fragment used the `/-->` form.
    pub self_closing: bool,
    /// Byte range of the whole fragment, markers included.
    pub span: Range<usize>,
    /// The 1-based line number where the fragment starts.
    pub start_line: usize,
    /// The 1-based line number where the fragment ends.
    pub end_line: usize,
    /// The attribute payload was not terminated by `}` and whitespace before
    /// the comment end. `attrs` then holds the raw comment text.
    pub malformed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TokenKind {
    Opener,
    Closer,
    Void,
    Malformed,
}

#[derive(Debug)]
struct Token<'a> {
    kind: TokenKind,
    name: &'a str,
    attrs: Option<&'a str>,
    span: Range<usize>,
}

/// Start of any block delimiter, up to and including the whitespace after the name.
static DELIMITER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!--\s+(?P<closer>/)?wp:(?P<name>[a-z][a-z0-9_-]*(?:/[a-z][a-z0-9_-]*)?)\s+")
        .expect("Invalid delimiter regex")
});

/// End of every delimiter.
const COMMENT_END: &str = "-->";

/// Comment text of a delimiter carrying attributes, up to the comment end.
static ATTRS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\A(?P<attrs>\{.*\})\s+(?P<void>/)?\z").expect("Invalid attrs regex")
});

/// Finds the next delimiter at or after `from`.
fn next_token(document: &str, mut from: usize) -> Option<Token<'_>> {
    loop {
        let caps = DELIMITER_REGEX.captures_at(document, from)?;
        let head = caps.get(0)?;
        let name = caps.name("name")?.as_str();
        let is_closer = caps.name("closer").is_some();

        // Without a comment end nothing after this point can be a delimiter.
        let comment_len = document[head.end()..].find(COMMENT_END)?;
        let comment = &document[head.end()..head.end() + comment_len];
        let end = head.end() + comment_len + COMMENT_END.len();

        let (attrs, is_void, malformed) = match comment {
            "" => (None, false, false),
            "/" => (None, true, false),
            _ if comment.starts_with('{') => match ATTRS_REGEX.captures(comment) {
                Some(attr_caps) => (
                    attr_caps.name("attrs").map(|m| m.as_str()),
                    attr_caps.name("void").is_some(),
                    false,
                ),
                None => (Some(comment), comment.ends_with('/'), true),
            },
            _ => {
                debug!(
                    name = name,
                    offset = head.start(),
                    "Skipping comment that is not a block delimiter"
                );
                from = end;
                continue;
            }
        };

        let kind = match (is_closer, malformed, is_void) {
            (true, _, _) => TokenKind::Closer,
            (false, true, _) => TokenKind::Malformed,
            (false, false, true) => TokenKind::Void,
            (false, false, false) => TokenKind::Opener,
        };

        return Some(Token {
            kind,
            name,
            attrs,
            span: head.start()..end,
        });
    }
}

/// `paragraph` becomes `core/paragraph`; namespaced names are kept.
fn qualified_name(name: &str) -> String {
    if name.contains('/') {
        name.to_string()
    } else {
        format!("{DEFAULT_NAMESPACE}/{name}")
    }
}

/// 1-based line lookup for offsets visited in increasing order.
struct LineCounter<'a> {
    document: &'a str,
    offset: usize,
    line: usize,
}

impl<'a> LineCounter<'a> {
    fn new(document: &'a str) -> Self {
        Self {
            document,
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, offset: usize) -> usize {
        if offset > self.offset {
            self.line += self.document.as_bytes()[self.offset..offset]
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            self.offset = offset;
        }
        self.line
    }
}

/// Tokenizes a document into its top-level fragments, in order of appearance.
///
/// An opener without a matching closer extends to the end of the document.
/// Stray closers are ignored.
///
/// # Example
/// ```
/// use tp_blocks::parser::tokenize;
///
/// let body = "<!-- wp:acf/text_block {\"data\":{}} /-->\n";
/// let fragments = tokenize(body);
/// assert_eq!(fragments.len(), 1);
/// assert_eq!(fragments[0].name, "acf/text_block");
/// assert!(fragments[0].self_closing);
/// ```
pub fn tokenize(document: &str) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    let mut lines = LineCounter::new(document);
    let mut cursor = 0;

    while let Some(token) = next_token(document, cursor) {
        match token.kind {
            TokenKind::Void | TokenKind::Malformed => {
                cursor = token.span.end;
                let malformed = token.kind == TokenKind::Malformed;
                let self_closing = !malformed || token.attrs.is_some_and(|raw| raw.ends_with('/'));
                fragments.push(Fragment {
                    name: qualified_name(token.name),
                    attrs: token.attrs.map(str::to_string),
                    inner: None,
                    self_closing,
                    start_line: lines.line_at(token.span.start),
                    end_line: lines.line_at(token.span.end),
                    span: token.span,
                    malformed,
                });
            }
            TokenKind::Opener => {
                let (inner, end) = match find_closer(document, token.span.end) {
                    Some(close) => (&document[token.span.end..close.start], close.end),
                    None => {
                        warn!(
                            name = token.name,
                            offset = token.span.start,
                            "Block opener has no closer, taking the rest of the document"
                        );
                        (&document[token.span.end..], document.len())
                    }
                };
                cursor = end;
                fragments.push(Fragment {
                    name: qualified_name(token.name),
                    attrs: token.attrs.map(str::to_string),
                    inner: Some(inner.to_string()),
                    self_closing: false,
                    start_line: lines.line_at(token.span.start),
                    end_line: lines.line_at(end),
                    span: token.span.start..end,
                    malformed: false,
                });
            }
            TokenKind::Closer => {
                debug!(name = token.name, offset = token.span.start, "Ignoring stray block closer");
                cursor = token.span.end;
            }
        }
    }

    fragments
}

/// Span of the closer balancing an opener that ends at `from`.
fn find_closer(document: &str, from: usize) -> Option<Range<usize>> {
    let mut depth = 1usize;
    let mut cursor = from;

    while let Some(token) = next_token(document, cursor) {
        cursor = token.span.end;
        match token.kind {
            TokenKind::Opener => depth += 1,
            TokenKind::Closer => {
                depth -= 1;
                if depth == 0 {
                    return Some(token.span);
                }
            }
            TokenKind::Void | TokenKind::Malformed => {}
        }
    }

    None
}
