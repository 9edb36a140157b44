//! Integration tests for the habit binary.
//!
//! These tests verify end-to-end behavior including:
//! - Habit create/read/update/delete
//! - Check-ins and cascade deletion
//! - Streak and summary analytics
//! - Not-found exit status and CSV export

use assert_cmd::Command;
use chrono::{Duration, Local, NaiveDate};
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to create a test data directory
fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Helper to get the CLI pointed at an isolated data and config directory
fn cli(data_dir: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("habit"));
    cmd.env("XDG_CONFIG_HOME", data_dir.join("config"))
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir);
    cmd
}

/// Run a command that must succeed and parse its stdout as JSON
fn run_json(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout should be JSON")
}

fn add_habit(data_dir: &Path, name: &str) -> u64 {
    let habit = run_json(cli(data_dir).args([
        "add",
        "--name",
        name,
        "--frequency",
        "daily",
        "--category",
        "health",
        "--start-date",
        "2024-01-01",
    ]));
    habit["id"].as_u64().expect("habit id")
}

fn days_ago(n: i64) -> NaiveDate {
    Local::now().date_naive() - Duration::days(n)
}

#[test]
fn test_cli_help() {
    Command::new(assert_cmd::cargo::cargo_bin!("habit"))
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Habit tracker"));
}

#[test]
fn test_add_then_show_returns_same_fields() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    let created = run_json(cli(data_dir).args([
        "add",
        "--name",
        "Read 10 pages",
        "--frequency",
        "weekly",
        "--category",
        "learning",
        "--start-date",
        "2024-01-05",
    ]));
    let id = created["id"].as_u64().unwrap();

    let shown = run_json(cli(data_dir).args(["show", &id.to_string()]));
    assert_eq!(shown, created);
    assert_eq!(shown["name"], "Read 10 pages");
    assert_eq!(shown["frequency"], "weekly");
    assert_eq!(shown["category"], "learning");
    assert_eq!(shown["start_date"], "2024-01-05");
    assert_eq!(shown["check_ins"], Value::Array(vec![]));

    assert!(data_dir.join("habits.json").exists());
}

#[test]
fn test_add_defaults() {
    let temp_dir = setup_test_dir();

    let created = run_json(cli(temp_dir.path()).args(["add", "--name", "Journal"]));
    assert_eq!(created["frequency"], "daily");
    assert_eq!(created["category"], "learning");
    assert_eq!(
        created["start_date"],
        Local::now().date_naive().to_string()
    );
}

#[test]
fn test_add_blank_name_fails() {
    let temp_dir = setup_test_dir();

    cli(temp_dir.path())
        .args(["add", "--name", "  "])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Missing required field: name"));
}

#[test]
fn test_list_with_skip_and_limit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    for name in ["a", "b", "c"] {
        add_habit(data_dir, name);
    }

    let all = run_json(cli(data_dir).arg("list"));
    assert_eq!(all.as_array().unwrap().len(), 3);

    let page = run_json(cli(data_dir).args(["list", "--skip", "1", "--limit", "1"]));
    let page = page.as_array().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page[0]["name"], "b");

    let beyond = run_json(cli(data_dir).args(["list", "--skip", "10"]));
    assert!(beyond.as_array().unwrap().is_empty());
}

#[test]
fn test_update_replaces_fields() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let id = add_habit(data_dir, "Walk");
    run_json(cli(data_dir).args(["check-in", &id.to_string(), "--date", "2024-01-02"]));

    let updated = run_json(cli(data_dir).args([
        "update",
        &id.to_string(),
        "--name",
        "Run",
        "--frequency",
        "weekly",
        "--category",
        "sport",
        "--start-date",
        "2024-02-01",
    ]));
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "Run");
    assert_eq!(updated["frequency"], "weekly");
    assert_eq!(updated["category"], "sport");
    assert_eq!(updated["start_date"], "2024-02-01");
    assert_eq!(updated["check_ins"].as_array().unwrap().len(), 1);
}

#[test]
fn test_missing_habit_exits_with_not_found() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();

    for args in [
        vec!["show", "42"],
        vec!["delete", "42"],
        vec!["streak", "42"],
        vec!["summary", "42"],
        vec!["check-in", "42"],
    ] {
        cli(data_dir)
            .args(&args)
            .assert()
            .code(2)
            .stderr(predicate::str::contains("Habit not found"));
    }
}

#[test]
fn test_not_found_detail_names_the_habit() {
    let temp_dir = setup_test_dir();

    let output = cli(temp_dir.path())
        .args(["show", "42"])
        .assert()
        .code(2)
        .get_output()
        .stderr
        .clone();
    let stderr = String::from_utf8_lossy(&output);
    let detail_line = stderr
        .lines()
        .find(|l| l.starts_with('{'))
        .expect("JSON detail line on stderr");
    let detail: Value = serde_json::from_str(detail_line).unwrap();
    assert_eq!(detail, serde_json::json!({ "detail": "Habit not found: 42" }));
}

#[test]
fn test_check_in_on_missing_habit_creates_nothing() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let id = add_habit(data_dir, "Stretch");

    cli(data_dir)
        .args(["check-in", "999", "--date", "2024-01-02"])
        .assert()
        .code(2);

    let habit = run_json(cli(data_dir).args(["show", &id.to_string()]));
    assert!(habit["check_ins"].as_array().unwrap().is_empty());

    // The next check-in still gets the first id
    let check_in = run_json(cli(data_dir).args(["check-in", &id.to_string()]));
    assert_eq!(check_in["id"], 1);
}

#[test]
fn test_check_in_defaults_to_today_and_keeps_notes() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let id = add_habit(data_dir, "Meditate");

    let check_in = run_json(cli(data_dir).args([
        "check-in",
        &id.to_string(),
        "--notes",
        "ten minutes",
    ]));
    assert_eq!(check_in["habit_id"], id);
    assert_eq!(check_in["notes"], "ten minutes");
    assert_eq!(check_in["date"], Local::now().date_naive().to_string());
}

#[test]
fn test_delete_cascades_check_ins() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let doomed = add_habit(data_dir, "Doomed");
    let kept = add_habit(data_dir, "Kept");

    for date in ["2024-01-01", "2024-01-02"] {
        run_json(cli(data_dir).args(["check-in", &doomed.to_string(), "--date", date]));
    }
    run_json(cli(data_dir).args(["check-in", &kept.to_string(), "--date", "2024-01-03"]));

    cli(data_dir)
        .args(["delete", &doomed.to_string()])
        .assert()
        .success()
        .stdout(predicate::str::contains("deleted"));

    cli(data_dir)
        .args(["show", &doomed.to_string()])
        .assert()
        .code(2);

    let store = fs::read_to_string(data_dir.join("habits.json")).unwrap();
    let store: Value = serde_json::from_str(&store).unwrap();
    let habits = store["habits"].as_object().unwrap();
    assert_eq!(habits.len(), 1);
    let remaining = habits.values().next().unwrap()["check_ins"]
        .as_array()
        .unwrap()
        .len();
    assert_eq!(remaining, 1);
}

#[test]
fn test_streak_with_grace_day() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let id = add_habit(data_dir, "Floss");

    // Yesterday and the day before, nothing today yet
    for n in [1, 2] {
        run_json(cli(data_dir).args([
            "check-in",
            &id.to_string(),
            "--date",
            &days_ago(n).to_string(),
        ]));
    }

    let report = run_json(cli(data_dir).args(["streak", &id.to_string()]));
    assert_eq!(report, serde_json::json!({ "current_streak": 2 }));
}

#[test]
fn test_summary_counts_duplicates_once_for_streak() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let id = add_habit(data_dir, "Water");

    for n in [0, 0, 1, 3] {
        run_json(cli(data_dir).args([
            "check-in",
            &id.to_string(),
            "--date",
            &days_ago(n).to_string(),
        ]));
    }

    let summary = run_json(cli(data_dir).args(["summary", &id.to_string()]));
    assert_eq!(summary["habit_id"], id);
    assert_eq!(summary["current_streak"], 2);
    assert_eq!(summary["total_check_ins"], 4);
    assert_eq!(summary["checked_in_today"], true);
}

#[test]
fn test_export_writes_csv() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    let id = add_habit(data_dir, "Sketch");
    run_json(cli(data_dir).args(["check-in", &id.to_string(), "--date", "2024-01-02"]));

    cli(data_dir)
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 1 check-ins"));

    let csv = fs::read_to_string(data_dir.join("check_ins.csv")).unwrap();
    assert!(csv.starts_with("habit_id,habit_name,check_in_id,date,notes"));
    assert!(csv.contains("Sketch,1,2024-01-02"));
}

#[test]
fn test_config_file_sets_default_limit() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path();
    for name in ["a", "b", "c"] {
        add_habit(data_dir, name);
    }

    let config_dir = data_dir.join("config").join("habit-hero");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[listing]\ndefault_limit = 2\n",
    )
    .unwrap();

    let listed = run_json(cli(data_dir).arg("list"));
    assert_eq!(listed.as_array().unwrap().len(), 2);
}
