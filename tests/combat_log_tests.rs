//! Unit tests for combat log queries and export
//!
//! These tests verify that the CombatLog correctly:
//! - Records entries with timestamps
//! - Filters and counts by event type
//! - Returns recent entries in order
//! - Serializes to a JSON file with metadata

use parrysim::combat::log::{CombatLog, CombatLogEventType, DuelMetadata};
use regex::Regex;

fn create_test_log() -> CombatLog {
    let mut log = CombatLog::default();
    log.log(CombatLogEventType::Countdown, "Countdown: 5");
    log.elapsed = 5.0;
    log.log(CombatLogEventType::MatchEvent, "Match started");
    log.elapsed = 6.2;
    log.log(CombatLogEventType::WindowOpened, "Up attack incoming");
    log.elapsed = 7.1;
    log.log(CombatLogEventType::Parry, "Perfect parry");
    log.elapsed = 7.1;
    log.log(CombatLogEventType::Life, "Enemy life: 9.0");
    log
}

#[test]
fn test_entries_record_timestamps() {
    let log = create_test_log();
    assert_eq!(log.entries().len(), 5);
    assert_eq!(log.entries()[0].timestamp, 0.0);
    assert_eq!(log.entries()[3].timestamp, 7.1);
}

#[test]
fn test_filter_by_type() {
    let log = create_test_log();
    let parries = log.filter_by_type(CombatLogEventType::Parry);
    assert_eq!(parries.len(), 1);
    assert_eq!(parries[0].message, "Perfect parry");
    assert!(log.filter_by_type(CombatLogEventType::Miss).is_empty());
}

#[test]
fn test_count_of() {
    let log = create_test_log();
    assert_eq!(log.count_of(CombatLogEventType::Countdown), 1);
    assert_eq!(log.count_of(CombatLogEventType::Streak), 0);
}

#[test]
fn test_recent_returns_newest_in_order() {
    let log = create_test_log();
    let recent = log.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].message, "Perfect parry");
    assert_eq!(recent[1].message, "Enemy life: 9.0");

    // Asking for more than exists returns everything
    assert_eq!(log.recent(100).len(), 5);
}

#[test]
fn test_clear_resets_entries_and_clock() {
    let mut log = create_test_log();
    log.clear();
    assert!(log.entries().is_empty());
    assert_eq!(log.elapsed, 0.0);
}

#[test]
fn test_countdown_messages_have_expected_shape() {
    let mut log = CombatLog::default();
    for n in (1..=5).rev() {
        log.log(CombatLogEventType::Countdown, format!("Countdown: {}", n));
    }
    let pattern = Regex::new(r"^Countdown: [1-5]$").unwrap();
    for entry in log.filter_by_type(CombatLogEventType::Countdown) {
        assert!(
            pattern.is_match(&entry.message),
            "unexpected countdown message: {}",
            entry.message
        );
    }
}

#[test]
fn test_save_to_file_writes_metadata_and_entries() {
    let mut log = create_test_log();
    log.metadata = DuelMetadata {
        seed: Some(42),
        duration_seconds: 7.1,
        winner: Some("Player wins".to_string()),
    };

    let path = std::env::temp_dir().join("parrysim_log_test.json");
    let path_str = path.to_str().unwrap();
    let written = log.save_to_file(path_str).unwrap();
    assert_eq!(written, path_str);

    let contents = std::fs::read_to_string(&path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["metadata"]["seed"], 42);
    assert_eq!(parsed["metadata"]["winner"], "Player wins");
    assert_eq!(parsed["entries"].as_array().unwrap().len(), 5);
    assert_eq!(parsed["entries"][2]["message"], "Up attack incoming");

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_save_to_file_rejects_bad_path() {
    let log = create_test_log();
    let result = log.save_to_file("/nonexistent_dir_for_sure/log.json");
    assert!(result.is_err());
}
