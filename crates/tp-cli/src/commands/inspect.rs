//! Inspect command

use colored::Colorize;
use tp_blocks::{BlockCodec, FragmentReport, FragmentStatus};

use crate::error::Result;

/// Run the inspect command
pub fn run_inspect(codec: &BlockCodec, input: &str, json: bool) -> Result<String> {
    let reports = codec.inspect(input);

    if json {
        return Ok(serde_json::to_string_pretty(&reports)?);
    }

    let mut out = String::new();
    for report in &reports {
        out.push_str(&format_report(report));
        out.push('\n');
    }

    let decoded = reports.iter().filter(|r| r.is_decoded()).count();
    out.push_str(&format!(
        "{} {} fragments, {} decoded, {} skipped",
        "Total:".dimmed(),
        reports.len(),
        decoded,
        reports.len() - decoded
    ));

    Ok(out)
}

fn format_report(report: &FragmentReport) -> String {
    let lines = if report.start_line == report.end_line {
        format!("{}", report.start_line)
    } else {
        format!("{}-{}", report.start_line, report.end_line)
    };

    let status = match &report.status {
        FragmentStatus::Decoded { block_name, fields } => {
            format!("{} {} ({} fields)", "ok".green(), block_name, fields)
        }
        FragmentStatus::EmptyName => format!("{} empty block name", "skipped".yellow()),
        FragmentStatus::MalformedAttributes { message } => {
            format!("{} malformed attributes: {}", "skipped".yellow(), message)
        }
    };

    format!("  {:<8} {:<28} {}", lines, report.name.cyan(), status)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    const BODY: &str = concat!(
        "<!-- wp:acf/text_block {\"data\":{\"text_block_content\":\"a\"}} /-->\n",
        "<!-- wp:acf/image_block {broken} /-->\n",
        "<!-- wp:paragraph -->\n<p>x</p>\n<!-- /wp:paragraph -->\n",
    );

    #[test]
    fn test_inspect_text_output() {
        colored::control::set_override(false);
        let codec = BlockCodec::default();
        let out = run_inspect(&codec, BODY, false).unwrap();

        assert!(out.contains("ok text_block (1 fields)"), "{out}");
        assert!(out.contains("skipped malformed attributes"), "{out}");
        assert!(out.contains("3-5"), "{out}");
        assert!(out.contains("ok core/paragraph (0 fields)"), "{out}");
        assert!(out.ends_with("3 fragments, 2 decoded, 1 skipped"), "{out}");
    }

    #[test]
    fn test_inspect_json_output() {
        let codec = BlockCodec::default();
        let out = run_inspect(&codec, BODY, true).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value[0]["status"], "decoded");
        assert_eq!(value[0]["start_line"], 1);
        assert_eq!(value[1]["status"], "malformed_attributes");
    }
}
