use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn markdown_publish() -> Command {
    Command::cargo_bin("markdown-publish").expect("binary builds")
}

fn write_markdown(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("input.md");
    fs::write(&path, contents).expect("write markdown");
    path
}

#[test]
fn compile_prints_request_batch() {
    let temp = TempDir::new().expect("tempdir");
    let file = write_markdown(&temp, "# Title");

    let output = markdown_publish()
        .arg("compile")
        .arg(&file)
        .current_dir(temp.path())
        .output()
        .expect("run compile");
    assert!(output.status.success());

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout is JSON");
    assert_eq!(
        value,
        serde_json::json!([
            {"insertText": {"location": {"index": 1}, "text": "Title"}},
            {"insertText": {"location": {"index": 6}, "text": "\n"}},
            {"updateParagraphStyle": {
                "range": {"startIndex": 1, "endIndex": 6},
                "paragraphStyle": {"namedStyleType": "HEADING_1"},
                "fields": "namedStyleType"
            }}
        ])
    );
}

#[test]
fn compile_with_start_offset_prepends_separator() {
    let temp = TempDir::new().expect("tempdir");
    let file = write_markdown(&temp, "appended text");

    markdown_publish()
        .arg("compile")
        .arg(&file)
        .arg("--start-offset")
        .arg("10")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(r#"{"index":10},"text":"\n\n"#));
}

#[test]
fn compile_rejects_zero_start_offset() {
    let temp = TempDir::new().expect("tempdir");
    let file = write_markdown(&temp, "text");

    markdown_publish()
        .arg("compile")
        .arg(&file)
        .arg("--start-offset")
        .arg("0")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--start-offset"));
}

#[test]
fn compile_missing_file_reports_path() {
    let temp = TempDir::new().expect("tempdir");

    markdown_publish()
        .arg("compile")
        .arg("does-not-exist.md")
        .current_dir(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.md"));
}

#[test]
fn compile_pretty_output_is_indented() {
    let temp = TempDir::new().expect("tempdir");
    let file = write_markdown(&temp, "plain paragraph");

    markdown_publish()
        .arg("compile")
        .arg(&file)
        .arg("--pretty")
        .current_dir(temp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"insertText\": {"));
}
