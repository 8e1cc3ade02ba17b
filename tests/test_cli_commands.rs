mod common;

use std::io::Write;

use common::{DEFAULT_TIMEOUT, TypeRushProcess, spawn_command};

fn catalog(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

#[test]
fn version_human_output() {
    let output = spawn_command(&["version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("typerush "), "unexpected output: {stdout}");
}

#[test]
fn version_json_output() {
    let output = spawn_command(&["version", "--format", "json"]);
    assert!(output.status.success());
    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("output should be valid JSON");
    assert_eq!(parsed["name"], "typerush");
    assert!(parsed["version"].is_string());
}

#[test]
fn phrases_json_lists_builtin_catalog() {
    let output = spawn_command(&["phrases", "--format", "json"]);
    assert!(
        output.status.success(),
        "phrases should succeed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let phrases: Vec<String> =
        serde_json::from_slice(&output.stdout).expect("output should be a JSON array");
    assert!(!phrases.is_empty());
    assert!(phrases.iter().any(|p| p == "Winter is coming"));
}

#[test]
fn phrases_reads_custom_catalog() {
    let file = catalog("- Bazinga!\n- Hakuna Matata\n");
    let output = spawn_command(&["phrases", "--catalog", file.path().to_str().unwrap()]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(stdout, "1  Bazinga!\n2  Hakuna Matata\n");
}

#[test]
fn empty_catalog_is_a_config_error() {
    let file = catalog("[]\n");
    let path = file.path().to_str().unwrap();

    for args in [["phrases", "--catalog", path], ["play", "--catalog", path]] {
        let output = spawn_command(&args);
        assert_eq!(output.status.code(), Some(2), "args: {args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("empty"), "stderr: {stderr}");
    }
}

#[test]
fn blank_catalog_entry_is_a_config_error() {
    let file = catalog("- hola\n- ''\n");
    let path = file.path().to_str().unwrap();

    for args in [["phrases", "--catalog", path], ["play", "--catalog", path]] {
        let output = spawn_command(&args);
        assert_eq!(output.status.code(), Some(2), "args: {args:?}");
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("blank"), "stderr: {stderr}");
    }
}

#[test]
fn missing_catalog_is_a_config_error() {
    let output = spawn_command(&[
        "phrases",
        "--catalog",
        "/tmp/nonexistent_typerush_catalog.yaml",
    ]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn malformed_catalog_is_a_config_error() {
    let file = catalog("phrases: {not: [a list\n");
    let output = spawn_command(&["phrases", "--catalog", file.path().to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn unknown_flag_is_a_usage_error() {
    let output = spawn_command(&["play", "--no-such-flag"]);
    assert_eq!(output.status.code(), Some(64));
}

#[test]
fn completions_bash() {
    let output = spawn_command(&["completions", "bash"]);
    assert!(output.status.success());
    assert!(!output.stdout.is_empty());
}

#[tokio::test]
async fn play_correct_answer_then_quit() {
    let file = catalog("- Bazinga!\n");
    let mut game = TypeRushProcess::play_with_catalog(file.path(), &[]);

    game.expect_line("Level 1", DEFAULT_TIMEOUT).await;
    game.send_line("  Bazinga!  ").await;
    game.expect_line("Correct!", DEFAULT_TIMEOUT).await;
    game.expect_line("Level 2", DEFAULT_TIMEOUT).await;

    game.send_line(":q").await;
    let summary = game.expect_line("Game over", DEFAULT_TIMEOUT).await;
    assert!(summary.contains("(quit)"), "summary: {summary}");
    assert!(summary.contains("1 correct"), "summary: {summary}");
    assert_eq!(game.wait().await, Some(0));
}

#[tokio::test]
async fn play_wrong_answer_keeps_level() {
    let file = catalog("- Bazinga!\n");
    let mut game = TypeRushProcess::play_with_catalog(file.path(), &[]);

    game.expect_line("Level 1", DEFAULT_TIMEOUT).await;
    game.send_line("bazinga!").await;
    game.expect_line("Incorrect", DEFAULT_TIMEOUT).await;
    game.expect_line("Level 1", DEFAULT_TIMEOUT).await;

    game.close_stdin();
    let summary = game.expect_line("Game over", DEFAULT_TIMEOUT).await;
    assert!(summary.contains("end of input"), "summary: {summary}");
    assert_eq!(game.wait().await, Some(0));
}

#[tokio::test]
async fn play_restart_returns_to_level_one() {
    let file = catalog("- Bazinga!\n");
    let mut game = TypeRushProcess::play_with_catalog(file.path(), &[]);

    game.expect_line("Level 1", DEFAULT_TIMEOUT).await;
    game.send_line("Bazinga!").await;
    game.expect_line("Level 2", DEFAULT_TIMEOUT).await;

    game.send_line(":restart").await;
    let header = game.expect_line("Level", DEFAULT_TIMEOUT).await;
    assert!(header.contains("Level 1"), "header after restart: {header}");
    assert!(header.contains("20s"), "budget after restart: {header}");

    game.send_line(":q").await;
    game.expect_line("Game over", DEFAULT_TIMEOUT).await;
    assert_eq!(game.wait().await, Some(0));
}

#[tokio::test]
async fn play_seeded_sessions_pick_the_same_phrase() {
    let mut first_phrases = Vec::new();
    for _ in 0..2 {
        let mut game = TypeRushProcess::play(&["--seed", "7"]);
        game.expect_line("Level 1", DEFAULT_TIMEOUT).await;
        let phrase = game.expect_line("    ", DEFAULT_TIMEOUT).await;
        first_phrases.push(phrase);
        game.send_line(":q").await;
        game.expect_line("Game over", DEFAULT_TIMEOUT).await;
        assert_eq!(game.wait().await, Some(0));
    }
    assert_eq!(first_phrases[0], first_phrases[1]);
}
