use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn temp_path(file_name: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    std::env::temp_dir().join(format!("dayplan-{nanos}-{file_name}"))
}

fn dayplan(store_path: &PathBuf, args: &[&str]) -> std::process::Output {
    let exe = env!("CARGO_BIN_EXE_dayplan");
    Command::new(exe)
        .args(args)
        .env("DAYPLAN_STORE_PATH", store_path)
        .env("DAYPLAN_CONFIG_PATH", temp_path("no-config.json"))
        .output()
        .expect("failed to run dayplan")
}

#[test]
fn done_toggles_completion_and_persists() {
    let store_path = temp_path("cli-done.csv");
    std::fs::write(&store_path, "Standup,09:00,False\n").unwrap();

    let output = dayplan(&store_path, &["done", "1"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Updated: [x] 09:00 - Standup"));

    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();
    assert_eq!(stored, "Standup,09:00,True\n");
}

#[test]
fn done_twice_restores_pending_state() {
    let store_path = temp_path("cli-done-twice.csv");
    std::fs::write(&store_path, "Standup,09:00,False\n").unwrap();

    assert!(dayplan(&store_path, &["done", "1"]).status.success());
    assert!(dayplan(&store_path, &["done", "1"]).status.success());

    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();
    assert_eq!(stored, "Standup,09:00,False\n");
}

#[test]
fn done_follows_sorted_positions() {
    let store_path = temp_path("cli-done-sorted.csv");
    std::fs::write(&store_path, "Meeting,14:00,False\nStandup,09:00,False\n").unwrap();

    let output = dayplan(&store_path, &["done", "1"]);

    assert!(output.status.success());
    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();
    assert_eq!(stored, "Standup,09:00,True\nMeeting,14:00,False\n");
}

#[test]
fn done_rejects_out_of_range_position() {
    let store_path = temp_path("cli-done-range.csv");
    std::fs::write(&store_path, "Standup,09:00,False\n").unwrap();

    let output = dayplan(&store_path, &["done", "5"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR: invalid_input"));
    assert!(stderr.contains("no task at position 5"));

    let stored = std::fs::read_to_string(&store_path).unwrap();
    std::fs::remove_file(&store_path).ok();
    assert_eq!(stored, "Standup,09:00,False\n");
}
