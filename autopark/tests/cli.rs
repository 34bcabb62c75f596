use serde_json::Value;
use std::path::PathBuf;
use std::process::{Command, Output};

fn data(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data").join(name)
}

fn autopark(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_autopark"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to launch autopark")
}

fn summary(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "autopark failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout is not JSON")
}

#[test]
fn headless_run_prints_one_summary_per_episode() {
    let output = autopark(&[
        "--episodes", "3", "--max-steps", "25", "--seed", "7", "--policy", "random",
        "--summary-json", "--log-level", "warn",
    ]);
    let summary = summary(&output);

    let episodes = summary["episodes"].as_array().unwrap();
    assert_eq!(episodes.len(), 3);
    for (i, episode) in episodes.iter().enumerate() {
        assert_eq!(episode["episode"], i);
        assert!(episode["steps"].as_u64().unwrap() <= 25);
        assert!(episode["episode_return"].is_number());
    }
    let ended = summary["parked"].as_u64().unwrap()
        + summary["collided"].as_u64().unwrap()
        + summary["truncated"].as_u64().unwrap();
    assert_eq!(ended, 3);
}

#[test]
fn same_seed_gives_the_same_run() {
    let args = [
        "--episodes", "2", "--max-steps", "30", "--seed", "21", "--policy", "random",
        "--summary-json", "--log-level", "error",
    ];
    assert_eq!(summary(&autopark(&args)), summary(&autopark(&args)));
}

#[test]
fn config_file_sets_the_step_cap() {
    let config = data("short.json");
    let output = autopark(&[
        "--config", config.to_str().unwrap(), "--policy", "idle", "--summary-json",
        "--log-level", "warn",
    ]);
    let summary = summary(&output);
    let episode = &summary["episodes"][0];
    assert!(episode["steps"].as_u64().unwrap() <= 40);
}

#[test]
fn invalid_config_fails_before_running() {
    let config = data("broken.json");
    let output = autopark(&["--config", config.to_str().unwrap(), "--summary-json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn missing_config_file_is_reported() {
    let output = autopark(&["--config", "does/not/exist.json"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("does/not/exist.json"));
}
