//! End-to-end tests for the `claude-history` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// Run the binary with an isolated config directory.
fn cmd(config_home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_claude-history"));
    cmd.env("XDG_CONFIG_HOME", config_home.path())
        .env_remove("CLAUDE_HISTORY_CONFIG")
        .env_remove("CLAUDE_HISTORY_JSON")
        .env_remove("CLAUDE_HISTORY_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn detect_reads_stdin() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .arg("detect")
        .write_stdin("#!/bin/bash\necho hi\n")
        .assert()
        .success()
        .stdout("bash\n");

    cmd(&home)
        .arg("detect")
        .write_stdin(r#"{"a": 1}"#)
        .assert()
        .success()
        .stdout("json\n");

    cmd(&home)
        .arg("detect")
        .write_stdin("just some words")
        .assert()
        .success()
        .stdout("none\n");
}

#[test]
fn detect_json_output() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["--json", "detect"])
        .write_stdin("SELECT id FROM users;")
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""language": "sql""#));
}

#[test]
fn highlight_stdin_with_lang() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["highlight", "--lang", "js"])
        .write_stdin(r#"const x = "function() {}";"#)
        .assert()
        .success()
        .stdout(
            "<span class=\"hl-keyword\">const</span> x = \
             <span class=\"hl-string\">\"function() {}\"</span>;\n",
        );
}

#[test]
fn highlight_files_by_extension() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let rust = dir.path().join("main.rs");
    let python = dir.path().join("app.py");
    std::fs::write(&rust, "let x = 1;").unwrap();
    std::fs::write(&python, "pass").unwrap();

    cmd(&home)
        .arg("--json")
        .arg("highlight")
        .arg(&rust)
        .arg(&python)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""language": "rust""#))
        .stdout(predicate::str::contains(r#""language": "python""#))
        .stdout(predicate::str::contains(r#"<span class=\"hl-keyword\">pass</span>"#));
}

#[test]
fn highlight_missing_file_exits_with_not_found() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["highlight", "/definitely/not/here.rs"])
        .assert()
        .failure()
        .code(3)
        .stderr(predicate::str::starts_with("Error: "));
}

#[test]
fn render_message_with_fence() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .arg("render")
        .write_stdin("Run this:\n```sh\necho hi\n```\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("<div class=\"text\">Run this:</div>"))
        .stdout(predicate::str::contains(
            "<code class=\"language-bash\"><span class=\"hl-builtin\">echo</span> hi</code>",
        ));
}

#[test]
fn render_standalone_to_file() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out").join("page.html");

    cmd(&home)
        .args(["--quiet", "render", "--standalone", "--dark", "--title", "Demo", "--out"])
        .arg(&out)
        .write_stdin("hello")
        .assert()
        .success();

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<title>Demo</title>"));
    assert!(html.contains("<body class=\"dark\">"));
}

#[test]
fn languages_lists_aliases() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .arg("languages")
        .assert()
        .success()
        .stdout(predicate::str::contains("javascript"))
        .stdout(predicate::str::contains("rs"))
        .stdout(predicate::str::contains("yaml"));
}

#[test]
fn config_init_then_show() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");

    cmd(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created configuration file"));
    assert!(path.exists());

    cmd(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto_detect = true"));
}

#[test]
fn config_aliases_apply_to_highlight() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[highlight.aliases]\njsonc = \"json\"\n").unwrap();

    cmd(&home)
        .arg("--config")
        .arg(&path)
        .args(["highlight", "--lang", "jsonc"])
        .write_stdin("[true]")
        .assert()
        .success()
        .stdout("[<span class=\"hl-keyword\">true</span>]\n");
}

#[test]
fn explicit_config_only_overrides_keys_it_sets() {
    let home = TempDir::new().unwrap();
    let default_dir = home.path().join("claude-history");
    std::fs::create_dir_all(&default_dir).unwrap();
    std::fs::write(
        default_dir.join("config.toml"),
        "[highlight]\nauto_detect = false\n\n[render]\ndark_theme = true\n",
    )
    .unwrap();

    let dir = TempDir::new().unwrap();
    let overlay = dir.path().join("overlay.toml");
    std::fs::write(&overlay, "[highlight.aliases]\njsonc = \"json\"\n").unwrap();

    cmd(&home)
        .arg("--config")
        .arg(&overlay)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("auto_detect = false"))
        .stdout(predicate::str::contains("dark_theme = true"))
        .stdout(predicate::str::contains("jsonc = \"json\""));
}

#[test]
fn explicit_config_with_unknown_alias_target_fails() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[highlight.aliases]\ntf = \"terraform\"\n").unwrap();

    cmd(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .failure()
        .code(5)
        .stderr(predicate::str::contains("terraform"));
}

#[test]
fn invalid_config_exits_with_config_error() {
    let home = TempDir::new().unwrap();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[highlight\nauto_detect = ").unwrap();

    cmd(&home)
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .failure()
        .code(5);
}

#[test]
fn completions_generate() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("claude-history"));
}

#[test]
fn empty_lang_is_usage_error() {
    let home = TempDir::new().unwrap();

    cmd(&home)
        .args(["highlight", "--lang", " "])
        .write_stdin("x")
        .assert()
        .failure()
        .code(64);
}
