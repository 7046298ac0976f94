use std::fs;
use std::process::{Command, Output};

use mapsmith::{LayerKind, MapDocument};
use tempfile::tempdir;

fn run(bin: &str, args: &[&str]) -> Output {
    Command::new(bin).args(args).output().expect("binary should launch")
}

fn mapsmith_tools(args: &[&str]) -> Output {
    run(env!("CARGO_BIN_EXE_mapsmith-tools"), args)
}

#[test]
fn writes_a_document_that_parses_back() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("map.json");
    let output_arg = output.to_str().expect("utf-8 temp path");

    let result = mapsmith_tools(&[
        "--archetype",
        "dungeon",
        "--width",
        "30",
        "--height",
        "30",
        "--spaces",
        "4",
        "--seed",
        "test-1",
        "--output",
        output_arg,
    ]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
    assert!(String::from_utf8_lossy(&result.stdout).contains("fingerprint="));

    let text = fs::read_to_string(&output).expect("output written");
    let document = MapDocument::from_json(&text).expect("valid document JSON");
    assert_eq!(document.metadata.seed.seed, "test-1");
    assert_eq!(document.dimensions.width, 30);
    assert_eq!(document.layers[0].kind, LayerKind::Background);
    assert_eq!(document.layers.len(), 5);
}

#[test]
fn same_seed_prints_the_same_fingerprint() {
    let args = ["--archetype", "cave", "--seed", "echo"];
    let first = mapsmith_tools(&args);
    let second = mapsmith_tools(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn tuning_file_is_loaded_from_toml() {
    let dir = tempdir().expect("temp dir");
    let tuning = dir.path().join("tuning.toml");
    fs::write(&tuning, "placement_attempts = 5\norganic_wobble = 0.0\n").expect("write tuning");

    let result = mapsmith_tools(&[
        "--seed",
        "tuned",
        "--tuning",
        tuning.to_str().expect("utf-8 temp path"),
    ]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));
}

#[test]
fn malformed_tuning_file_fails_with_context() {
    let dir = tempdir().expect("temp dir");
    let tuning = dir.path().join("tuning.toml");
    fs::write(&tuning, "placement_attempts = \"many\"\n").expect("write tuning");

    let result = mapsmith_tools(&["--tuning", tuning.to_str().expect("utf-8 temp path")]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Failed to parse tuning TOML"));
}

#[test]
fn invalid_options_exit_non_zero() {
    let result = mapsmith_tools(&[
        "--width",
        "5",
        "--height",
        "5",
        "--min-size",
        "10",
        "--max-size",
        "12",
    ]);
    assert!(!result.status.success());
    assert!(String::from_utf8_lossy(&result.stderr).contains("Invalid generation options"));
}

#[test]
fn batch_output_is_an_array_of_documents() {
    let dir = tempdir().expect("temp dir");
    let output = dir.path().join("maps.json");

    let result = mapsmith_tools(&[
        "--archetype",
        "town",
        "--seed",
        "market",
        "--count",
        "3",
        "--output",
        output.to_str().expect("utf-8 temp path"),
    ]);
    assert!(result.status.success(), "stderr: {}", String::from_utf8_lossy(&result.stderr));

    let text = fs::read_to_string(&output).expect("output written");
    let documents: Vec<MapDocument> = serde_json::from_str(&text).expect("document array");
    let seeds: Vec<&str> =
        documents.iter().map(|document| document.metadata.seed.seed.as_str()).collect();
    assert_eq!(seeds, ["market", "market-1", "market-2"]);
}

#[test]
fn sweep_passes_on_a_small_run() {
    let result = run(env!("CARGO_BIN_EXE_sweep"), &["--seed", "7", "--runs", "4"]);
    assert!(result.status.success(), "stdout: {}", String::from_utf8_lossy(&result.stdout));
    assert!(String::from_utf8_lossy(&result.stdout).contains("Swept 20 maps"));
}
