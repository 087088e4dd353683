//! Encode command

use serde::Deserialize;
use tp_blocks::{BlockCodec, ContentBlock, DocumentDraft};

use crate::error::{CliError, Result};

/// Accepted encode inputs
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum EncodeInput {
    Blocks(Vec<ContentBlock>),
    Draft(DocumentDraft),
}

/// Run the encode command, returning the document body.
pub fn run_encode(codec: &BlockCodec, input: &str) -> Result<String> {
    let input: EncodeInput = serde_json::from_str(input).map_err(|e| {
        CliError::user(format!(
            "Expected a JSON array of blocks or a draft object: {e}"
        ))
    })?;

    let body = match input {
        EncodeInput::Blocks(blocks) => codec.encode(&blocks),
        EncodeInput::Draft(draft) => {
            draft.validate(true)?;
            draft.render_body(codec)
        }
    };

    Ok(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_encode_block_array() {
        let codec = BlockCodec::default();
        let body = run_encode(
            &codec,
            r#"[{"block_name":"text_block","block_data":{"content":"Hi"}}]"#,
        )
        .unwrap();

        assert_eq!(
            body,
            "<!-- wp:acf/text_block {\"name\":\"acf/text_block\",\"data\":{\"text_block_content\":\"Hi\",\"_text_block_content\":\"text_block_content\"},\"mode\":\"edit\"} /-->\n"
        );
    }

    #[test]
    fn test_encode_empty_array() {
        let codec = BlockCodec::default();
        assert_eq!(run_encode(&codec, "[]").unwrap(), "");
    }

    #[test]
    fn test_encode_draft_requires_title() {
        let codec = BlockCodec::default();
        let result = run_encode(
            &codec,
            r#"{"title":"  ","content":[{"block_name":"text_block","block_data":{"content":"Hi"}}]}"#,
        );
        assert!(matches!(result, Err(CliError::Blocks(tp_blocks::Error::EmptyTitle))));
    }

    #[test]
    fn test_encode_draft_requires_content() {
        let codec = BlockCodec::default();
        let result = run_encode(&codec, r#"{"title":"Intro","content":[]}"#);
        assert!(matches!(result, Err(CliError::Blocks(tp_blocks::Error::EmptyContent))));
    }

    #[test]
    fn test_encode_rejects_other_json() {
        let codec = BlockCodec::default();
        assert!(matches!(run_encode(&codec, "42"), Err(CliError::User { .. })));
    }
}
