//! CLI tests for the `uncomment comments` subcommand and config loading.

use std::fs;
use std::process::Command;

use assert_cmd::cargo;

fn uncomment_cmd() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("uncomment"));
    cmd.env_remove("UNCOMMENT_LOG");
    cmd
}

fn write_temp(name: &str, content: &str) -> (tempfile::TempDir, String) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join(name);
    fs::write(&path, content).expect("write temp file");
    (dir, path.to_string_lossy().to_string())
}

#[test]
fn comments_json_lists_kind_span_and_position() {
    let input = "a(); // one\n/*! two */ b();\n  /* three\n */";
    let (_dir, path) = write_temp("input.js", input);
    let output = uncomment_cmd()
        .args(["comments", &path, "--output", "json"])
        .output()
        .expect("run comments");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    let arr = json.as_array().expect("array of comments");
    assert_eq!(arr.len(), 3);

    assert_eq!(arr[0]["kind"], "line");
    assert_eq!(arr[0]["text"], "// one");
    assert_eq!(arr[0]["line"], 1);
    assert_eq!(arr[0]["column"], 6);
    assert_eq!(arr[0]["start"], 5);
    assert_eq!(arr[0]["end"], 11);
    assert_eq!(arr[0]["preserved"], false);

    assert_eq!(arr[1]["kind"], "block");
    assert_eq!(arr[1]["text"], "/*! two */");
    assert_eq!(arr[1]["line"], 2);
    assert_eq!(arr[1]["preserved"], true);

    assert_eq!(arr[2]["text"], "/* three\n */");
    assert_eq!(arr[2]["line"], 3);
    assert_eq!(arr[2]["column"], 3);
}

#[test]
fn comments_pretty_prints_one_line_per_comment() {
    let (_dir, path) = write_temp("input.js", "x = '/* no */'; // yes\n");
    let output = uncomment_cmd()
        .args(["comments", &path, "--output", "pretty"])
        .output()
        .expect("run comments");
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout={stdout}");
    assert!(lines[0].ends_with(":1:17: line comment (removed): // yes"));
    assert!(!stdout.contains("no */"));
}

#[test]
fn comments_annotate_renders_report_on_stderr() {
    let (_dir, path) = write_temp("input.js", "a(); /* gone */\n/*! kept */\n");
    let output = uncomment_cmd()
        .args(["comments", &path, "--annotate", "--output", "pretty"])
        .output()
        .expect("run comments --annotate");
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("2 comment(s) found"), "stderr={stderr}");
    assert!(stderr.contains("block comment, removed"), "stderr={stderr}");
    assert!(stderr.contains("block comment, preserved"), "stderr={stderr}");
}

#[test]
fn comments_on_clean_file_is_empty_array() {
    let (_dir, path) = write_temp("input.js", "var a = 1 / 2;\n");
    let output = uncomment_cmd()
        .args(["comments", &path, "--output", "json"])
        .output()
        .expect("run comments");
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).expect("valid json");
    assert_eq!(json, serde_json::json!([]));
}

// ── Config files ────────────────────────────────────────────────────────

#[test]
fn explicit_config_file_sets_options() {
    let (dir, input) = write_temp("input.js", "a();\n// c\n\n\n\nb();\n");
    let config = dir.path().join("opts.json");
    fs::write(
        &config,
        "{\n  // one blank line between blocks\n  \"mergeEmptyLines\": true\n}\n",
    )
    .expect("write config");

    let output = uncomment_cmd()
        .args(["strip", &input, "--config", &config.to_string_lossy()])
        .output()
        .expect("run strip --config");
    assert!(
        output.status.success(),
        "stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a();\n\nb();\n");
}

#[test]
fn default_config_file_is_picked_up_from_working_directory() {
    let (dir, input) = write_temp("input.js", "a();\n// c\n\n\nb();\n");
    fs::write(
        dir.path().join(".uncommentrc.json"),
        r#"{ "removeEmptyLines": true }"#,
    )
    .expect("write rc file");

    let output = uncomment_cmd()
        .current_dir(dir.path())
        .args(["strip", &input])
        .output()
        .expect("run strip");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a();\nb();\n");
}

#[test]
fn command_line_policy_overrides_config() {
    let (dir, input) = write_temp("input.js", "a = b /'x/; // c");
    let config = dir.path().join("opts.json");
    fs::write(&config, r#"{ "regexPolicy": "whitespace" }"#).expect("write config");

    let output = uncomment_cmd()
        .args([
            "strip",
            &input,
            "--config",
            &config.to_string_lossy(),
            "--regex-policy",
            "token-context",
        ])
        .output()
        .expect("run strip");
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout), "a = b /'x/; // c");
}

#[test]
fn invalid_config_is_reported() {
    let (dir, input) = write_temp("input.js", "a();");
    let config = dir.path().join("bad.json");
    fs::write(&config, r#"{ "regexPolicy": 3 }"#).expect("write config");

    let output = uncomment_cmd()
        .args(["strip", &input, "--config", &config.to_string_lossy()])
        .output()
        .expect("run strip");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid config file"), "stderr={stderr}");
}
