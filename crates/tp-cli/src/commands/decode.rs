//! Decode command

use tp_blocks::{BlockCodec, DocumentView};

use crate::error::Result;

/// Run the decode command, returning the blocks (or a document view when a
/// title is given) as JSON.
pub fn run_decode(
    codec: &BlockCodec,
    input: &str,
    pretty: bool,
    title: Option<&str>,
) -> Result<String> {
    let json = match title {
        Some(title) => {
            let view = DocumentView::from_body(title, input, codec);
            to_json(&view, pretty)?
        }
        None => to_json(&codec.decode(input), pretty)?,
    };
    Ok(json)
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}
