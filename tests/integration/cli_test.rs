//! Integration tests for the hokstats CLI

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

use crate::helpers::{load_fixture, read_sheet, temp_fixture};

/// hokstats running in `dir`, isolated from the user's config file.
fn hokstats(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hokstats"));
    cmd.current_dir(dir)
        .env("HOKSTATS_CONFIG", dir.join("hokstats-test-config.toml"))
        .env_remove("HOKSTATS_LOG")
        .env("NO_COLOR", "1");
    cmd
}

// ============================================================================
// Help Output Tests
// ============================================================================

#[test]
fn help_lists_subcommands() {
    let temp = TempDir::new().unwrap();
    hokstats(temp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recent-stats"))
        .stdout(predicate::str::contains("episode-hp"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn episode_hp_help_mentions_defaults() {
    let temp = TempDir::new().unwrap();
    hokstats(temp.path())
        .args(["episode-hp", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[INPUT]"))
        .stdout(predicate::str::contains("cout.txt"))
        .stdout(predicate::str::contains("--unterminated"));
}

// ============================================================================
// Extraction Tests
// ============================================================================

#[test]
fn episode_hp_writes_csv() {
    let (temp, input) = temp_fixture("cout.txt");
    let output = temp.path().join("hp.csv");

    hokstats(temp.path())
        .arg("episode-hp")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 6 rows"))
        .stdout(predicate::str::contains("hp.csv"));

    let written = std::fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(written.trim_end(), @r"
    Episode,Monster_HP
    0,3100
    1,2480
    2,4000
    3,1200
    4,-1
    5,3000
    ");
}

#[test]
fn recent_stats_writes_csv() {
    let (temp, input) = temp_fixture("cout.txt");
    let output = temp.path().join("stats.csv");

    hokstats(temp.path())
        .arg("recent-stats")
        .arg(&input)
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 2 rows"));

    let written = std::fs::read_to_string(&output).unwrap();
    insta::assert_snapshot!(written.trim_end(), @r"
    Episode,Monster_HP,Grad_Norm,Loss,Return_Mean
    2,2790.0,0.8734,0.0412,12.5
    4,2550.0,0.12,0.22,-3.25
    ");
}

#[test]
fn defaults_read_cout_and_write_xlsx() {
    let (temp, _input) = temp_fixture("cout.txt");

    hokstats(temp.path())
        .arg("episode-hp")
        .assert()
        .success()
        .stdout(predicate::str::contains("monster_hp_summary.xlsx"));

    let written = read_sheet(&temp.path().join("monster_hp_summary.xlsx"));
    insta::assert_snapshot!(written, @r"
    Episode,Monster_HP
    0,3100
    1,2480
    2,4000
    3,1200
    4,-1
    5,3000
    ");
}

#[test]
fn format_flag_overrides_suffix() {
    let (temp, input) = temp_fixture("cout.txt");
    let output = temp.path().join("stats.xlsx");

    hokstats(temp.path())
        .arg("recent-stats")
        .arg(&input)
        .arg(&output)
        .args(["--format", "csv"])
        .assert()
        .success();

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.starts_with("Episode,Monster_HP,Grad_Norm,Loss,Return_Mean\n"));
}

#[test]
fn unterminated_sentinel_flag_keeps_episodes() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("cout.txt"), "Cur episode 5\nCur episode 6\n").unwrap();

    hokstats(temp.path())
        .args(["episode-hp", "cout.txt", "hp.csv", "--unterminated", "sentinel"])
        .assert()
        .success();

    let written = std::fs::read_to_string(temp.path().join("hp.csv")).unwrap();
    assert_eq!(written, "Episode,Monster_HP\n5,-1\n6,-1\n");
}

#[test]
fn config_file_sets_defaults() {
    let (temp, _input) = temp_fixture("cout.txt");
    std::fs::write(
        temp.path().join("hokstats-test-config.toml"),
        "[episode_hp]\noutput = \"from-config.csv\"\n",
    )
    .unwrap();

    hokstats(temp.path()).arg("episode-hp").assert().success();

    let written = std::fs::read_to_string(temp.path().join("from-config.csv")).unwrap();
    assert!(written.starts_with("Episode,Monster_HP\n0,3100\n"));
}

#[test]
fn empty_log_writes_header_only() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("cout.txt"), "").unwrap();

    hokstats(temp.path())
        .args(["recent-stats", "cout.txt", "out.csv"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 0 rows"));

    let written = std::fs::read_to_string(temp.path().join("out.csv")).unwrap();
    assert_eq!(written, "Episode,Monster_HP,Grad_Norm,Loss,Return_Mean\n");
}

// ============================================================================
// Error Handling Tests
// ============================================================================

#[test]
fn missing_default_input_fails_with_path() {
    let temp = TempDir::new().unwrap();

    hokstats(temp.path())
        .arg("recent-stats")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Log file not found"))
        .stderr(predicate::str::contains("cout.txt"));

    assert!(!temp.path().join("recent_stats_summary.xlsx").exists());
}

#[test]
fn missing_explicit_input_reports_absolute_path() {
    let temp = TempDir::new().unwrap();

    let assert = hokstats(temp.path())
        .args(["episode-hp", "logs/run1.txt"])
        .assert()
        .failure()
        .code(1);

    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    let expected = Path::new("logs").join("run1.txt");
    assert!(
        stderr.contains(&expected.display().to_string()),
        "stderr: {}",
        stderr
    );
    assert!(!stderr.contains(" logs/run1.txt"), "path should be absolute: {}", stderr);
}

#[test]
fn unknown_format_is_usage_error() {
    let temp = TempDir::new().unwrap();
    hokstats(temp.path())
        .args(["episode-hp", "--format", "parquet"])
        .assert()
        .failure()
        .code(2);
}

#[test]
fn empty_marker_is_usage_error() {
    let (temp, _input) = temp_fixture("cout.txt");
    hokstats(temp.path())
        .args(["recent-stats", "--marker", ""])
        .assert()
        .failure()
        .code(2);

    assert!(!temp.path().join("recent_stats_summary.xlsx").exists());
}

#[test]
fn empty_terminator_in_config_is_rejected() {
    let (temp, _input) = temp_fixture("cout.txt");
    std::fs::write(
        temp.path().join("hokstats-test-config.toml"),
        "[episode_hp]\nterminator = \"\"\n",
    )
    .unwrap();

    hokstats(temp.path())
        .arg("episode-hp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("episode_hp.terminator must not be empty"));
}

#[test]
fn invalid_config_file_is_reported() {
    let temp = TempDir::new().unwrap();
    std::fs::write(temp.path().join("cout.txt"), load_fixture("cout.txt")).unwrap();
    std::fs::write(temp.path().join("hokstats-test-config.toml"), "[output\n").unwrap();

    hokstats(temp.path())
        .arg("episode-hp")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

// ============================================================================
// Config and Completion Tests
// ============================================================================

#[test]
fn config_init_then_show() {
    let temp = TempDir::new().unwrap();

    hokstats(temp.path())
        .args(["config", "init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("hokstats-test-config.toml"));

    hokstats(temp.path())
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));

    hokstats(temp.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("marker = \"my_main Recent Stats\""))
        .stdout(predicate::str::contains("unterminated = \"drop\""));
}

#[test]
fn config_path_honours_flag() {
    let temp = TempDir::new().unwrap();
    hokstats(temp.path())
        .args(["config", "path", "--config", "elsewhere.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("elsewhere.toml"))
        .stdout(predicate::str::contains("not created"));
}

#[test]
fn completions_generate_for_bash() {
    let temp = TempDir::new().unwrap();
    hokstats(temp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("recent-stats"));
}
