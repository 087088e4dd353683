//! Integration tests for the tp-blocks binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get a Command for the tp-blocks binary, run from an empty directory so no
/// project configuration is picked up.
fn tp_cmd(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tp-blocks").expect("Failed to find tp-blocks binary");
    cmd.current_dir(dir.path()).env_remove("TP_BLOCKS_CONFIG").env_remove("RUST_LOG");
    cmd
}

const TEXT_BLOCK_JSON: &str = r#"[{"block_name":"text_block","block_data":{"chapter_subtitle":"One","content":"Hi"}}]"#;

// ============================================================================
// encode / decode
// ============================================================================

#[test]
fn test_encode_from_stdin() {
    let dir = TempDir::new().unwrap();
    tp_cmd(&dir)
        .arg("encode")
        .write_stdin(TEXT_BLOCK_JSON)
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "<!-- wp:acf/text_block {\"name\":\"acf/text_block\",\"data\":{\"chapter_subtitle\":\"One\"",
        ))
        .stdout(predicate::str::ends_with("\"mode\":\"edit\"} /-->\n"));
}

#[test]
fn test_encode_then_decode_file() {
    let dir = TempDir::new().unwrap();
    let output = tp_cmd(&dir)
        .arg("encode")
        .write_stdin(TEXT_BLOCK_JSON)
        .output()
        .unwrap();
    assert!(output.status.success());
    fs::write(dir.path().join("body.html"), &output.stdout).unwrap();

    tp_cmd(&dir)
        .args(["decode", "body.html"])
        .assert()
        .success()
        .stdout(format!("{TEXT_BLOCK_JSON}\n"));
}

#[test]
fn test_encode_invalid_json_fails() {
    let dir = TempDir::new().unwrap();
    tp_cmd(&dir)
        .arg("encode")
        .write_stdin("not json")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("Expected a JSON array of blocks"));
}

#[test]
fn test_encode_draft_with_blank_title_fails() {
    let dir = TempDir::new().unwrap();
    tp_cmd(&dir)
        .arg("encode")
        .write_stdin(r#"{"title":"","content":[]}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));
}

#[test]
fn test_decode_hydrates_with_configured_resolver() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("blocks.yaml");
    fs::write(
        &config,
        "resolver:\n  media_url: \"https://cdn.example.org/{id}.png\"\n",
    )
    .unwrap();
    let body = r#"<!-- wp:acf/image_block {"name":"acf/image_block","data":{"image_block_image":7,"_image_block_image":"image_block_image"},"mode":"edit"} /-->"#;

    tp_cmd(&dir)
        .args(["--config", "blocks.yaml", "decode"])
        .write_stdin(body)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            r#""image":7,"image_url":"https://cdn.example.org/7.png""#,
        ));
}

#[test]
fn test_decode_skips_malformed_fragment() {
    let dir = TempDir::new().unwrap();
    let body = concat!(
        "<!-- wp:acf/image_block {oops} /-->\n",
        "<!-- wp:acf/text_block {\"data\":{\"text_block_content\":\"Hi\"}} /-->\n",
    );

    tp_cmd(&dir)
        .arg("decode")
        .write_stdin(body)
        .assert()
        .success()
        .stdout(r#"[{"block_name":"text_block","block_data":{"content":"Hi"}}]"#.to_owned() + "\n")
        .stderr(predicate::str::contains("malformed attributes"));
}

// ============================================================================
// inspect / blocks
// ============================================================================

#[test]
fn test_inspect_json() {
    let dir = TempDir::new().unwrap();
    tp_cmd(&dir)
        .args(["inspect", "--json"])
        .write_stdin("<!-- wp:acf/text_block {\"data\":{}} /-->\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"decoded\""))
        .stdout(predicate::str::contains("\"name\": \"acf/text_block\""));
}

#[test]
fn test_inspect_truncated_payload_keeps_next_fragment() {
    let dir = TempDir::new().unwrap();
    let body = concat!(
        "<!-- wp:acf/image_block {\"data\":{\"image_block_image\":1 /-->\n",
        "<!-- wp:acf/text_block {\"data\":{\"text_block_content\":\"Hi\"}} /-->\n",
    );

    tp_cmd(&dir)
        .args(["inspect", "--json"])
        .write_stdin(body)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\": \"malformed_attributes\""))
        .stdout(predicate::str::contains("\"block_name\": \"text_block\""))
        .stdout(predicate::str::contains("\"start_line\": 2"));
}

#[test]
fn test_blocks_lists_defaults() {
    let dir = TempDir::new().unwrap();
    tp_cmd(&dir)
        .arg("blocks")
        .assert()
        .success()
        .stdout(predicate::str::contains("Registered Blocks"))
        .stdout(predicate::str::contains("accordion_block"))
        .stdout(predicate::str::contains("_row_"));
}

#[test]
fn test_blocks_uses_discovered_config() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join(".tutorial")).unwrap();
    fs::write(
        dir.path().join(".tutorial").join("blocks.toml"),
        "[blocks]\nregistered = [\"text_block\"]\nglobal_fields = []\n",
    )
    .unwrap();

    tp_cmd(&dir)
        .arg("blocks")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 blocks registered."))
        .stdout(predicate::str::contains("quiz_block").not());
}

#[test]
fn test_invalid_config_fails() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("bad.toml"), "[blocks]\nregistered = []\n").unwrap();

    tp_cmd(&dir)
        .args(["blocks", "--config", "bad.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid configuration"));
}

#[test]
fn test_help_lists_commands() {
    let dir = TempDir::new().unwrap();
    tp_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encode"))
        .stdout(predicate::str::contains("decode"))
        .stdout(predicate::str::contains("inspect"));
}
