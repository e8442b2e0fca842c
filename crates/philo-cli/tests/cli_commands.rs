//! Integration tests for the CLI commands.

#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn philo(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("philo").unwrap();
    cmd.current_dir(dir.path())
        .arg("--data-dir")
        .arg(dir.path().join("data"))
        .arg("--seed")
        .arg("7");
    cmd
}

#[test]
fn units_lists_all_three() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .arg("units")
        .assert()
        .success()
        .stdout(predicate::str::contains("III"))
        .stdout(predicate::str::contains("Objective"));
}

#[test]
fn fresh_stats_are_zero() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("Total score"))
        .stdout(predicate::str::contains("0"));
}

#[test]
fn unit_selection_persists() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["unit", "ii"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Unit II selected"));
    assert!(dir.path().join("data/philosoapp_state_v1.json").exists());

    philo(&dir)
        .arg("stats")
        .assert()
        .success()
        .stdout(predicate::str::contains("II"));
}

#[test]
fn unknown_unit_fails() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["unit", "IV"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: unknown unit: IV"));
}

#[test]
fn play_flashcards_then_export() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["play", "flashcards"])
        .write_stdin("flip 1\nflip 2\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Practice registered"))
        .stdout(predicate::str::contains("Score 70"));

    philo(&dir)
        .arg("portfolio")
        .assert()
        .success()
        .stdout(predicate::str::contains("6 cards, 2 flipped"));

    philo(&dir).arg("export").assert().success();
    let exported = fs::read_to_string(dir.path().join("philosoapp_portfolio.json")).unwrap();
    let doc: serde_json::Value = serde_json::from_str(&exported).unwrap();
    assert_eq!(doc["meta"]["appName"], "PhilosoApp");
    assert_eq!(doc["state"]["totalScore"], 70);
    assert_eq!(doc["portfolio"][0]["module"], "flashcards");
}

#[test]
fn play_story_to_an_ending() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["play", "story"])
        .write_stdin("2\n1\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Achievement: Story completed"))
        .stdout(predicate::str::contains("Score 130"));
}

#[test]
fn leaving_on_eof_keeps_points() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["play", "dilemma"])
        .write_stdin("1\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("Score 20 | 0 activities"));
}

#[test]
fn bad_input_is_reported_and_play_continues() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["play", "reading"])
        .write_stdin("dance\ncontinue\nsave\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("unknown command 'dance'"))
        .stdout(predicate::str::contains("not available here"))
        .stdout(predicate::str::contains("Reflection saved"));
}

#[test]
fn unknown_module_fails() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["play", "chess"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown module"));
}

#[test]
fn import_merges_counters() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("backup.json");
    fs::write(&file, r#"{"portfolio": [], "state": {"totalScore": 50}}"#).unwrap();
    philo(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Portfolio imported"))
        .stdout(predicate::str::contains("Score 50"));
}

#[test]
fn invalid_import_fails_without_changes() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("broken.json");
    fs::write(&file, "{not json").unwrap();
    philo(&dir)
        .arg("import")
        .arg(&file)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Invalid file"));
    assert!(!dir.path().join("data/philosoapp_state_v1.json").exists());
}

#[test]
fn export_to_stdout() {
    let dir = TempDir::new().unwrap();
    philo(&dir)
        .args(["export", "--stdout"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"formatVersion\": \"1.0\""));
}

#[test]
fn legacy_backup_lists_every_entry() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("philosoapp_portafolio.json");
    fs::write(
        &file,
        r#"{
  "meta": {"app": "PhilosoApp", "version": "1.0", "exportedAt": "2025-04-01T12:00:00.000Z"},
  "state": {"totalScore": 50, "gamesCompleted": 2, "achievements": 1},
  "portfolio": [
    {"date": "2025-03-01T10:00:00.000Z", "unit": "I", "module": "cards", "data": {"count": 6}},
    {"date": "2025-03-02T10:00:00.000Z", "unit": "II", "module": "journal", "data": {"text": "notes"}}
  ]
}"#,
    )
    .unwrap();
    philo(&dir).arg("import").arg(&file).assert().success();
    philo(&dir)
        .arg("portfolio")
        .assert()
        .success()
        .stdout(predicate::str::contains("Concept Cards"))
        .stdout(predicate::str::contains("journal"))
        .stdout(predicate::str::contains("2 entries"));
}
