//! Integration tests for headless duel execution
//!
//! These tests verify that:
//! - Headless configs load, validate, and apply serde defaults
//! - RON tuning files load and validate
//! - Seeded duels are deterministic tick-for-tick
//! - The scripted defender's profile drives the duel outcome
//! - Duels that never resolve time out with no winner

use std::path::PathBuf;

use parrysim::combat::events::MatchResult;
use parrysim::combat::tuning::{ComboPreset, GameplayTuning};
use parrysim::headless::{
    load_tuning_from_ron, run_headless_duel, DefenderProfile, HeadlessDuelConfig,
};

/// Write a tuning to a RON file in the temp dir and return its path
fn write_tuning(name: &str, tuning: &GameplayTuning) -> PathBuf {
    let path = std::env::temp_dir().join(name);
    let ron = ron::ser::to_string(tuning).unwrap();
    std::fs::write(&path, ron).unwrap();
    path
}

/// A small, fast duel tuning with identical presets at both life endpoints
fn fast_tuning() -> GameplayTuning {
    let preset = ComboPreset {
        attack_count: 1.0,
        interval_between_attacks: 0.1,
        wind_up_duration: 0.4,
        wind_down_duration: 0.2,
    };
    GameplayTuning {
        player_start_life: 3.0,
        enemy_start_life: 2.0,
        full_life_combo: preset,
        empty_life_combo: preset,
        pause_between_combos: 0.2,
        damage_on_parry: 1.0,
        damage_perfect_ratio: 2.0,
        damage_on_combo_parry: 0.0,
    }
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_defender_profile_defaults() {
    let profile = DefenderProfile::default();
    assert_eq!(profile.parry_chance, 0.75);
    assert_eq!(profile.perfect_share, 0.4);
    assert_eq!(profile.wrong_direction_chance, 0.0);
}

#[test]
fn test_config_json_applies_defaults() {
    let path = std::env::temp_dir().join("parrysim_minimal_config.json");
    std::fs::write(&path, r#"{ "random_seed": 9 }"#).unwrap();

    let config = HeadlessDuelConfig::load_from_file(&path).unwrap();
    assert_eq!(config.random_seed, Some(9));
    assert_eq!(config.max_duration_secs, 120.0);
    assert!(config.tuning_path.is_none());
    assert_eq!(config.defender.parry_chance, 0.75);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_config_rejects_out_of_range_chances() {
    let mut config = HeadlessDuelConfig::default();
    config.defender.parry_chance = 1.5;
    assert!(config.validate().is_err());

    let mut config = HeadlessDuelConfig::default();
    config.defender.wrong_direction_chance = -0.1;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_rejects_non_positive_duration() {
    let mut config = HeadlessDuelConfig::default();
    config.max_duration_secs = 0.0;
    assert!(config.validate().is_err());
}

#[test]
fn test_load_tuning_from_shipped_ron() {
    let tuning = load_tuning_from_ron(std::path::Path::new("assets/config/tuning.ron")).unwrap();
    assert_eq!(tuning, GameplayTuning::default());
}

#[test]
fn test_load_tuning_missing_file_errors() {
    let result = load_tuning_from_ron(std::path::Path::new("/no/such/tuning.ron"));
    assert!(result.is_err());
}

#[test]
fn test_load_tuning_rejects_invalid_values() {
    let mut tuning = fast_tuning();
    tuning.enemy_start_life = 0.0;
    let path = write_tuning("parrysim_bad_tuning.ron", &tuning);

    assert!(load_tuning_from_ron(&path).is_err());
    std::fs::remove_file(&path).ok();
}

// =============================================================================
// Duel Execution Tests
// =============================================================================

#[test]
fn test_seeded_duels_are_deterministic() {
    let path = write_tuning("parrysim_determinism_tuning.ron", &fast_tuning());
    let config = HeadlessDuelConfig {
        tuning_path: Some(path.to_str().unwrap().to_string()),
        defender: DefenderProfile {
            parry_chance: 0.6,
            perfect_share: 0.5,
            wrong_direction_chance: 0.1,
        },
        output_path: None,
        max_duration_secs: 60.0,
        random_seed: Some(7),
    };

    let first = run_headless_duel(&config).unwrap();
    let second = run_headless_duel(&config).unwrap();

    assert_eq!(first.winner, second.winner);
    assert_eq!(first.ticks, second.ticks);
    assert_eq!(first.stats.attacks, second.stats.attacks);
    assert_eq!(first.stats.parries, second.stats.parries);
    assert_eq!(first.stats.perfect_parries, second.stats.perfect_parries);
    assert_eq!(first.stats.misses, second.stats.misses);
    assert_eq!(first.final_player_life, second.final_player_life);
    assert_eq!(first.final_enemy_life, second.final_enemy_life);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_flawless_defender_wins() {
    let path = write_tuning("parrysim_flawless_tuning.ron", &fast_tuning());
    let config = HeadlessDuelConfig {
        tuning_path: Some(path.to_str().unwrap().to_string()),
        defender: DefenderProfile {
            parry_chance: 1.0,
            perfect_share: 0.0,
            wrong_direction_chance: 0.0,
        },
        output_path: None,
        max_duration_secs: 60.0,
        random_seed: Some(11),
    };

    let report = run_headless_duel(&config).unwrap();
    assert_eq!(report.winner, Some(MatchResult::PlayerWins));
    // Enemy has 2.0 life, each normal parry deals 1.0, no combo bonus
    assert_eq!(report.stats.parries, 2);
    assert_eq!(report.stats.misses, 0);
    assert_eq!(report.final_enemy_life, 0.0);
    assert_eq!(report.final_player_life, 3.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_passive_defender_loses() {
    let path = write_tuning("parrysim_passive_tuning.ron", &fast_tuning());
    let config = HeadlessDuelConfig {
        tuning_path: Some(path.to_str().unwrap().to_string()),
        defender: DefenderProfile {
            parry_chance: 0.0,
            perfect_share: 0.0,
            wrong_direction_chance: 0.0,
        },
        output_path: None,
        max_duration_secs: 60.0,
        random_seed: Some(13),
    };

    let report = run_headless_duel(&config).unwrap();
    assert_eq!(report.winner, Some(MatchResult::EnemyWins));
    // Player has 3.0 life, each miss costs a fixed 1.0
    assert_eq!(report.stats.misses, 3);
    assert_eq!(report.stats.parries, 0);
    assert_eq!(report.final_player_life, 0.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_wrong_direction_defender_misses() {
    let path = write_tuning("parrysim_wrong_dir_tuning.ron", &fast_tuning());
    let config = HeadlessDuelConfig {
        tuning_path: Some(path.to_str().unwrap().to_string()),
        defender: DefenderProfile {
            parry_chance: 1.0,
            perfect_share: 0.0,
            wrong_direction_chance: 1.0,
        },
        output_path: None,
        max_duration_secs: 60.0,
        random_seed: Some(17),
    };

    // Always answering in the attack's own direction never parries
    let report = run_headless_duel(&config).unwrap();
    assert_eq!(report.winner, Some(MatchResult::EnemyWins));
    assert_eq!(report.stats.parries, 0);
    assert_eq!(report.stats.misses, 3);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_duel_times_out_with_no_winner() {
    let path = write_tuning(
        "parrysim_timeout_tuning.ron",
        &GameplayTuning {
            player_start_life: 1000.0,
            enemy_start_life: 1000.0,
            ..fast_tuning()
        },
    );
    let config = HeadlessDuelConfig {
        tuning_path: Some(path.to_str().unwrap().to_string()),
        defender: DefenderProfile {
            parry_chance: 0.0,
            perfect_share: 0.0,
            wrong_direction_chance: 0.0,
        },
        output_path: None,
        max_duration_secs: 3.0,
        random_seed: Some(19),
    };

    let report = run_headless_duel(&config).unwrap();
    assert_eq!(report.winner, None);
    assert_eq!(report.ticks, 180);
    assert_eq!(report.duration_seconds, 3.0);

    std::fs::remove_file(&path).ok();
}

#[test]
fn test_duel_writes_log_when_requested() {
    let tuning_path = write_tuning("parrysim_logged_tuning.ron", &fast_tuning());
    let log_path = std::env::temp_dir().join("parrysim_duel_log.json");
    let config = HeadlessDuelConfig {
        tuning_path: Some(tuning_path.to_str().unwrap().to_string()),
        defender: DefenderProfile {
            parry_chance: 0.0,
            perfect_share: 0.0,
            wrong_direction_chance: 0.0,
        },
        output_path: Some(log_path.to_str().unwrap().to_string()),
        max_duration_secs: 60.0,
        random_seed: Some(23),
    };

    let report = run_headless_duel(&config).unwrap();
    assert_eq!(report.log_path.as_deref(), log_path.to_str());

    let contents = std::fs::read_to_string(&log_path).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
    assert_eq!(parsed["metadata"]["seed"], 23);
    assert_eq!(parsed["metadata"]["winner"], "Enemy wins");
    assert!(!parsed["entries"].as_array().unwrap().is_empty());

    std::fs::remove_file(&tuning_path).ok();
    std::fs::remove_file(&log_path).ok();
}
