//! End-to-end tests of the `sticker-solver` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;
use tempfile::TempDir;

const CATALOG: &str = r#"[
  "Sticker | Ace | Katowice 2019",
  "Sticker | Max (Holo) | Katowice 2019"
]"#;

const PRICES: &str = r#"{
  "Sticker | Ace | Katowice 2019": 1.0,
  "Sticker | Max (Holo) | Katowice 2019": 2.0
}"#;

fn fixtures() -> TempDir {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("catalog.json"), CATALOG).unwrap();
    std::fs::write(dir.path().join("prices.json"), PRICES).unwrap();
    dir
}

fn solver(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("sticker-solver").unwrap();
    cmd.env_remove("STICKER_SOLVER_PRICES")
        .env_remove("STICKER_SOLVER_PRICE_TABLE")
        .env("STICKER_SOLVER_CATALOG", dir.join("catalog.json"));
    cmd
}

#[test]
fn test_generate_with_price_table() {
    let dir = fixtures();
    solver(dir.path())
        .args(["generate", "AceMax", "--prices", "table", "--price-table"])
        .arg(dir.path().join("prices.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("[ace|max]"))
        .stdout(predicate::str::contains("$3.00"));
}

#[test]
fn test_generate_json_output() {
    let dir = fixtures();
    solver(dir.path())
        .args(["--format", "json", "generate", "acemax", "--prices", "fallback"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"total_count\": 1"))
        .stdout(predicate::str::contains("\"fallback\": true"))
        .stdout(predicate::str::contains("\"total_price\": 0.1"));
}

#[test]
fn test_generate_table_requires_path() {
    let dir = fixtures();
    solver(dir.path())
        .args(["generate", "acemax", "--prices", "table"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--price-table is required"));
}

#[test]
fn test_generate_rejects_invalid_names() {
    let dir = fixtures();
    solver(dir.path())
        .args(["generate", "   ", "--prices", "fallback"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Name cannot be empty"));

    solver(dir.path())
        .args(["generate", "abcdefghijklmnopqrstu", "--prices", "fallback"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("between 1 and 20 characters"));
}

#[test]
fn test_generate_no_combinations() {
    let dir = fixtures();
    solver(dir.path())
        .args(["generate", "zzz", "--prices", "fallback"])
        .assert()
        .success()
        .stderr(predicate::str::contains("No sticker combinations"));
}

#[test]
fn test_search_json_output() {
    let dir = fixtures();
    solver(dir.path())
        .args(["--format", "json", "search", "acemax"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"combinations_count\": 1"))
        .stdout(predicate::str::contains("\"input_name\": \"acemax\""));
}

#[test]
fn test_search_tsv_output() {
    let dir = fixtures();
    solver(dir.path())
        .args(["--format", "tsv", "search", "acemax", "--match-mode", "exact"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("index\tsegments\tstickers\texact"))
        .stdout(predicate::str::contains("ace|max"));
}

#[test]
fn test_catalog_list_and_letter() {
    let dir = fixtures();
    solver(dir.path())
        .args(["catalog", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sticker Catalog (2 stickers)"));

    solver(dir.path())
        .args(["catalog", "list", "--rarity", "holo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sticker | Max (Holo) | Katowice 2019"))
        .stdout(predicate::str::contains("Sticker | Ace |").not());

    solver(dir.path())
        .args(["catalog", "letter", "M"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stickers starting with 'M' (1)"));
}

#[test]
fn test_catalog_show_missing_label() {
    let dir = fixtures();
    solver(dir.path())
        .args(["catalog", "show", "Sticker | Nobody | Nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_catalog_export_round_trips() {
    let dir = fixtures();
    let exported = dir.path().join("exported.json");

    solver(dir.path())
        .args(["catalog", "export", "-o"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 2 stickers"));

    Command::cargo_bin("sticker-solver")
        .unwrap()
        .args(["--format", "json", "search", "acemax", "--catalog"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"combinations_count\": 1"));
}

#[test]
fn test_price_fallback() {
    let dir = fixtures();
    solver(dir.path())
        .args([
            "--format",
            "json",
            "price",
            "Sticker | Ace | Katowice 2019",
            "--prices",
            "fallback",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"amount\": 0.05"))
        .stdout(predicate::str::contains("\"currency\": \"USD\""));
}

#[test]
fn test_missing_catalog_is_fatal() {
    Command::cargo_bin("sticker-solver")
        .unwrap()
        .args(["search", "navi", "--catalog", "/nonexistent/catalog.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read catalog"));
}
