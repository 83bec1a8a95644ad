//! Combat log
//!
//! Records every outbound event the engine emits into a queryable,
//! serializable log. Headless runs dump it as JSON for later analysis;
//! interactive frontends can read it back for a scrolling feed.

use bevy::prelude::*;
use serde::Serialize;

use super::events::{
    AttackEnded, ComboResolved, CountdownTick, LifeChanged, MatchEnded, MatchStarted, ParryMissed,
    ParrySucceeded, ParryWindowClosed, ParryWindowOpened, PerfectStreakChanged, WindDownStarted,
};
use super::match_control::MatchState;

/// Broad category for filtering log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    Countdown,
    WindowOpened,
    WindDown,
    WindowClosed,
    AttackEnd,
    Parry,
    Miss,
    Combo,
    Life,
    Streak,
    MatchEvent,
}

/// One recorded event with the elapsed match time it happened at.
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    pub timestamp: f32,
    pub event_type: CombatLogEventType,
    pub message: String,
}

/// Context written alongside the entries when the log is saved.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DuelMetadata {
    pub seed: Option<u64>,
    pub duration_seconds: f32,
    pub winner: Option<String>,
}

#[derive(Serialize)]
struct SavedLog<'a> {
    metadata: &'a DuelMetadata,
    entries: &'a [CombatLogEntry],
}

/// Append-only event log for the current match.
#[derive(Resource, Debug, Default)]
pub struct CombatLog {
    entries: Vec<CombatLogEntry>,
    /// Seconds elapsed since combat entered its countdown
    pub elapsed: f32,
    pub metadata: DuelMetadata,
}

impl CombatLog {
    pub fn log(&mut self, event_type: CombatLogEventType, message: impl Into<String>) {
        self.entries.push(CombatLogEntry {
            timestamp: self.elapsed,
            event_type,
            message: message.into(),
        });
    }

    pub fn entries(&self) -> &[CombatLogEntry] {
        &self.entries
    }

    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .collect()
    }

    /// Last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> &[CombatLogEntry] {
        let start = self.entries.len().saturating_sub(count);
        &self.entries[start..]
    }

    pub fn count_of(&self, event_type: CombatLogEventType) -> usize {
        self.entries
            .iter()
            .filter(|entry| entry.event_type == event_type)
            .count()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.elapsed = 0.0;
        self.metadata = DuelMetadata::default();
    }

    /// Serialize metadata and entries to pretty JSON and write them to
    /// `path`. Returns the path written on success.
    pub fn save_to_file(&self, path: &str) -> Result<String, String> {
        let saved = SavedLog {
            metadata: &self.metadata,
            entries: &self.entries,
        };
        let json = serde_json::to_string_pretty(&saved)
            .map_err(|e| format!("Failed to serialize combat log: {}", e))?;
        std::fs::write(path, json)
            .map_err(|e| format!("Failed to write combat log to {}: {}", path, e))?;
        Ok(path.to_string())
    }
}

/// Mirror this tick's outbound events into the combat log.
///
/// Runs last in the combat chain so entries land in the same order the
/// events were emitted within the tick.
pub fn record_combat_log(
    time: Res<Time>,
    match_state: Res<MatchState>,
    mut log: ResMut<CombatLog>,
    mut countdown_events: EventReader<CountdownTick>,
    mut started_events: EventReader<MatchStarted>,
    mut opened_events: EventReader<ParryWindowOpened>,
    mut wind_down_events: EventReader<WindDownStarted>,
    mut closed_events: EventReader<ParryWindowClosed>,
    mut attack_ended_events: EventReader<AttackEnded>,
    mut parry_events: EventReader<ParrySucceeded>,
    mut missed_events: EventReader<ParryMissed>,
    mut combo_events: EventReader<ComboResolved>,
    mut life_events: EventReader<LifeChanged>,
    mut streak_events: EventReader<PerfectStreakChanged>,
    mut ended_events: EventReader<MatchEnded>,
) {
    use super::match_control::MatchPhase;
    if match_state.phase != MatchPhase::Idle {
        log.elapsed += time.delta_secs();
    }

    for event in countdown_events.read() {
        log.log(
            CombatLogEventType::Countdown,
            format!("Countdown: {}", event.seconds_remaining),
        );
    }
    for _ in started_events.read() {
        log.log(CombatLogEventType::MatchEvent, "Match started");
    }
    for event in opened_events.read() {
        log.log(
            CombatLogEventType::WindowOpened,
            format!("{} attack incoming", event.direction.name()),
        );
    }
    for _ in wind_down_events.read() {
        log.log(CombatLogEventType::WindDown, "Perfect window open");
    }
    for event in closed_events.read() {
        log.log(
            CombatLogEventType::WindowClosed,
            format!("{} window closed", event.direction.name()),
        );
    }
    for event in attack_ended_events.read() {
        log.log(
            CombatLogEventType::AttackEnd,
            format!("{} attack ended", event.direction.name()),
        );
    }
    for event in parry_events.read() {
        let kind = if event.perfect { "Perfect parry" } else { "Parry" };
        log.log(CombatLogEventType::Parry, kind);
    }
    for _ in missed_events.read() {
        log.log(CombatLogEventType::Miss, "Parry missed");
    }
    for event in combo_events.read() {
        log.log(
            CombatLogEventType::Combo,
            format!("Combo resolved: {}", event.outcome.name()),
        );
    }
    for event in life_events.read() {
        log.log(
            CombatLogEventType::Life,
            format!("{} life: {:.1}", event.side.name(), event.value),
        );
    }
    for event in streak_events.read() {
        log.log(
            CombatLogEventType::Streak,
            format!("Perfect streak: {}", event.count),
        );
    }
    for event in ended_events.read() {
        log.log(
            CombatLogEventType::MatchEvent,
            format!("Match over: {}", event.result.name()),
        );
    }
}
