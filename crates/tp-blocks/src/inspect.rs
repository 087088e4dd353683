//! Per-fragment diagnostics for stored document bodies.

use serde::Serialize;

use crate::parser::tokenize;
use crate::reader::{SkipReason, read_fragment};
use crate::resolve::ReferenceResolver;

/// What the reader did with a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FragmentStatus {
    Decoded { block_name: String, fields: usize },
    /// The delimiter grammar only accepts non-empty names, so tokenized
    /// documents never report this.
    EmptyName,
    MalformedAttributes { message: String },
}

/// One top-level fragment and its decode outcome.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FragmentReport {
    pub name: String,
    pub start_line: usize,
    pub end_line: usize,
    pub self_closing: bool,
    #[serde(flatten)]
    pub status: FragmentStatus,
}

impl FragmentReport {
    pub fn is_decoded(&self) -> bool {
        matches!(self.status, FragmentStatus::Decoded { .. })
    }
}

/// Reports every top-level fragment of a document, including skipped ones.
pub fn inspect(document: &str, resolver: &dyn ReferenceResolver) -> Vec<FragmentReport> {
    tokenize(document)
        .into_iter()
        .map(|fragment| {
            let status = match read_fragment(&fragment, resolver) {
                Ok(block) => FragmentStatus::Decoded {
                    fields: block.block_data.len(),
                    block_name: block.block_name,
                },
                Err(SkipReason::EmptyName) => FragmentStatus::EmptyName,
                Err(SkipReason::MalformedAttributes { message }) => {
                    FragmentStatus::MalformedAttributes { message }
                }
            };
            FragmentReport {
                name: fragment.name,
                start_line: fragment.start_line,
                end_line: fragment.end_line,
                self_closing: fragment.self_closing,
                status,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::NoopResolver;

    #[test]
    fn test_inspect_reports_skips() {
        let body = concat!(
            "<!-- wp:acf/text_block {\"data\":{\"text_block_content\":\"a\"}} /-->\n",
            "<!-- wp:acf/image_block {broken} /-->\n",
        );
        let reports = inspect(body, &NoopResolver);

        assert_eq!(reports.len(), 2);
        assert_eq!(
            reports[0].status,
            FragmentStatus::Decoded {
                block_name: "text_block".into(),
                fields: 1
            }
        );
        assert!(reports[0].is_decoded());
        assert_eq!(reports[1].start_line, 2);
        assert!(matches!(
            reports[1].status,
            FragmentStatus::MalformedAttributes { .. }
        ));
    }

    #[test]
    fn test_report_serializes_flat() {
        let report = FragmentReport {
            name: "acf/text_block".into(),
            start_line: 1,
            end_line: 1,
            self_closing: true,
            status: FragmentStatus::EmptyName,
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["status"], "empty_name");
        assert_eq!(value["name"], "acf/text_block");
    }
}
