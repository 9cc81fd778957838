//! Integration tests for the chonk CLI

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Copy a fixture into a fresh directory, since outputs land next to the input
fn fixture_in_temp(name: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let target = temp_dir.path().join(name);
    fs::copy(format!("tests/fixtures/{}", name), &target).unwrap();
    (temp_dir, target)
}

fn chonk() -> Command {
    let mut cmd = Command::cargo_bin("chonk").unwrap();
    cmd.env_remove("CHONK_CONFIG");
    cmd
}

fn read_jsonl(path: &Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn read_json_array(path: &Path) -> Vec<Value> {
    let value: Value = serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap();
    value.as_array().unwrap().clone()
}

#[test]
fn test_process_default_jsonl() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["--chunk-size", "1000"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Saved 2 chunks to"));

    let records = read_jsonl(&temp_dir.path().join("sample.jsonl"));
    assert_eq!(records.len(), 2);
    assert!(records[0]["text"]
        .as_str()
        .unwrap()
        .starts_with("The Lighthouse\n\nThe keeper"));
    assert_eq!(
        records[1]["text"],
        "Chapter Two\n\nMorning brought calm water. The village woke slowly."
    );
}

#[test]
fn test_process_cleaning_options() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "--remove-title", "5", "--skip-prefix", "#"])
        .assert()
        .success();

    let records = read_jsonl(&temp_dir.path().join("sample.jsonl"));
    assert_eq!(records.len(), 2);

    let first = records[0]["text"].as_str().unwrap();
    assert!(first.starts_with("The keeper climbed"));
    assert!(!first.contains("editor note"));
    assert!(first.contains("Storms came often in winter."));
    assert_eq!(
        records[1]["text"],
        "Morning brought calm water. The village woke slowly."
    );
}

#[test]
fn test_process_json_format() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "-f", "json"])
        .assert()
        .success();

    let output = temp_dir.path().join("sample.json");
    let content = fs::read_to_string(&output).unwrap();
    assert!(content.starts_with("[\n    {\n        \"text\""));

    let records = read_json_array(&output);
    assert_eq!(records.len(), 2);
}

#[test]
fn test_process_alpaca_format() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "--format", "alpaca"])
        .assert()
        .success();

    let records = read_json_array(&temp_dir.path().join("sample.alpaca.json"));
    assert_eq!(records.len(), 2);
    for record in &records {
        assert_eq!(record["instruction"], "");
        assert_eq!(record["input"], "");
        assert!(record["output"].as_str().is_some());
    }
}

#[test]
fn test_explicit_output_gets_format_extension() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");
    let requested = temp_dir.path().join("dataset.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "-o"])
        .arg(&requested)
        .assert()
        .success();

    assert!(temp_dir.path().join("dataset.jsonl").exists());
    assert!(!requested.exists());
}

#[test]
fn test_debug_dump() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "--debug"])
        .assert()
        .success();

    let dump = fs::read_to_string(temp_dir.path().join("sample.debug.txt")).unwrap();
    assert!(dump.starts_with("--- CHUNK 1 / 2 | SIZE: "));
    assert!(dump.contains("characters ---\n"));
    assert!(dump.contains("\n\n#####\n\n--- CHUNK 2 / 2 | SIZE: 65 characters ---\n"));
}

#[test]
fn test_token_metric_splits_finer() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["--max-tokens", "12", "-q"])
        .assert()
        .success();

    let records = read_jsonl(&temp_dir.path().join("sample.jsonl"));
    assert!(records.len() > 2);
}

#[test]
fn test_max_size_is_required() {
    let (_temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--chunk-size"));
}

#[test]
fn test_chunk_size_and_max_tokens_conflict() {
    let (_temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "100", "-t", "100"])
        .assert()
        .failure();
}

#[test]
fn test_zero_chunk_size() {
    let (_temp_dir, input) = fixture_in_temp("sample.txt");

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Chunk size must be greater than 0"));
}

#[test]
fn test_missing_input_file() {
    chonk()
        .args(["process", "nonexistent.txt", "-s", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Input file not found"));
}

#[test]
fn test_output_with_multiple_inputs_rejected() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");
    fs::copy(&input, temp_dir.path().join("second.txt")).unwrap();
    let pattern = temp_dir.path().join("*.txt");

    chonk()
        .arg("process")
        .arg(pattern.to_str().unwrap())
        .args(["-s", "100", "-o", "out.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("single input file"));
}

#[test]
fn test_glob_processes_every_match() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");
    fs::copy(&input, temp_dir.path().join("second.txt")).unwrap();
    let pattern = temp_dir.path().join("*.txt");

    chonk()
        .arg("process")
        .arg(pattern.to_str().unwrap())
        .args(["-s", "1000"])
        .assert()
        .success();

    assert!(temp_dir.path().join("sample.jsonl").exists());
    assert!(temp_dir.path().join("second.jsonl").exists());
}

#[test]
fn test_config_file_supplies_defaults() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");
    let config = temp_dir.path().join("chonk.toml");
    fs::write(
        &config,
        "[chunking]\nremove_title = 5\n\n[output]\nformat = \"alpaca\"\n",
    )
    .unwrap();

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "-c"])
        .arg(&config)
        .assert()
        .success();

    let records = read_json_array(&temp_dir.path().join("sample.alpaca.json"));
    assert_eq!(
        records[1]["output"],
        "Morning brought calm water. The village woke slowly."
    );
}

#[test]
fn test_invalid_config_file() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");
    let config = temp_dir.path().join("chonk.toml");
    fs::write(&config, "[chunking]\nunknown_key = 1\n").unwrap();

    chonk()
        .arg("process")
        .arg(&input)
        .args(["-s", "1000", "-c"])
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_list_formats() {
    chonk()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jsonl"))
        .stdout(predicate::str::contains("alpaca"));
}

#[test]
fn test_list_metrics() {
    chonk()
        .args(["list", "metrics"])
        .assert()
        .success()
        .stdout(predicate::str::contains("characters"))
        .stdout(predicate::str::contains("tokens (est.)"));
}

#[test]
fn test_generate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config = temp_dir.path().join("chonk.toml");

    chonk()
        .arg("generate-config")
        .arg("-o")
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Configuration template generated successfully",
        ));

    let content = fs::read_to_string(&config).unwrap();
    assert!(content.contains("[chunking]"));
    assert!(content.contains("[output]"));
}

#[test]
fn test_help() {
    chonk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("generate-config"));
}

#[test]
fn test_version() {
    chonk()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("chonk"));
}

#[test]
fn test_output_refuses_input_under_another_spelling() {
    let (temp_dir, original) = fixture_in_temp("sample.txt");
    let input = temp_dir.path().join("book.jsonl");
    fs::rename(&original, &input).unwrap();
    let before = fs::read_to_string(&input).unwrap();

    chonk()
        .current_dir(temp_dir.path())
        .arg("process")
        .arg(&input)
        .args(["-s", "100", "-o", "book"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would overwrite an input file"));

    assert_eq!(fs::read_to_string(&input).unwrap(), before);
}

#[test]
fn test_inputs_sharing_an_output_are_refused() {
    let (temp_dir, input) = fixture_in_temp("sample.txt");
    fs::copy(&input, temp_dir.path().join("sample.md")).unwrap();
    let pattern = temp_dir.path().join("sample.*");

    chonk()
        .arg("process")
        .arg(pattern.to_str().unwrap())
        .args(["-s", "100"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("would be written for both"));

    assert!(!temp_dir.path().join("sample.jsonl").exists());
}
