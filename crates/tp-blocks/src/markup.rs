//! Attribute payload serialization.
//!
//! The attribute JSON lives inside an HTML comment, so string contents must
//! never close the comment or be mistaken for markup. Characters that could
//! do so are written as `\u` escapes, which any JSON reader decodes back to
//! the original text.

use serde::Serialize;
use serde_json::ser::{CharEscape, CompactFormatter, Formatter, Serializer};
use std::io;

use crate::error::Result;

/// Compact JSON formatter that escapes `<`, `>`, `&`, `"` and `--` in strings.
#[derive(Debug, Default)]
pub struct MarkupFormatter {
    after_dash: bool,
}

impl Formatter for MarkupFormatter {
    fn begin_string<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.after_dash = false;
        writer.write_all(b"\"")
    }

    fn write_string_fragment<W>(&mut self, writer: &mut W, fragment: &str) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        let bytes = fragment.as_bytes();
        let mut start = 0;

        for (i, &byte) in bytes.iter().enumerate() {
            let escape = match byte {
                b'<' => Some(b"\\u003c"),
                b'>' => Some(b"\\u003e"),
                b'&' => Some(b"\\u0026"),
                b'-' if self.after_dash => Some(b"\\u002d"),
                _ => None,
            };
            self.after_dash = byte == b'-' && escape.is_none();

            if let Some(escape) = escape {
                writer.write_all(&bytes[start..i])?;
                writer.write_all(escape)?;
                start = i + 1;
            }
        }

        writer.write_all(&bytes[start..])
    }

    fn write_char_escape<W>(&mut self, writer: &mut W, char_escape: CharEscape) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        self.after_dash = false;
        match char_escape {
            CharEscape::Quote => writer.write_all(b"\\u0022"),
            other => CompactFormatter.write_char_escape(writer, other),
        }
    }
}

/// Serialize a value as a comment-safe compact JSON string.
pub fn to_attribute_json<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let mut buf = Vec::with_capacity(128);
    let mut serializer = Serializer::with_formatter(&mut buf, MarkupFormatter::default());
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8(buf)?)
}
