//! Bout orchestration
//!
//! A bout (combo) is one generated sequence of attacks resolved together.
//! The orchestrator derives the bout's pacing from the enemy's current
//! life, draws attack directions, runs one [`AttackTimeline`] at a time
//! separated by idle intervals, scores misses when windows close, and
//! classifies the finished bout. When either life total reaches zero the
//! bout is truncated immediately so the match controller never waits out
//! dead time.

use bevy::prelude::*;
use smallvec::SmallVec;

use super::difficulty::{scale_pacing, ComboPacing};
use super::direction::Direction;
use super::events::{
    AttackEnded, CombatSide, ComboResolved, LifeChanged, ParryMissed, ParryWindowClosed,
    ParryWindowOpened, PerfectStreakChanged, WindDownStarted,
};
use super::match_control::{MatchPhase, MatchState};
use super::timeline::{AttackTimeline, TimelineSignal};
use super::GameRng;

/// Life the player loses per missed parry. Deliberately a fixed amount
/// independent of tuning, unlike the configurable enemy damage values.
pub const PLAYER_MISS_LIFE_LOSS: f32 = 1.0;

/// The result of one attack within a bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRecord {
    pub direction: Direction,
    pub parried: bool,
    pub perfect: bool,
}

/// Classification of a finished bout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum BoutOutcome {
    /// Every recorded attack was parried (at least one attack)
    AllParried,
    /// Every recorded attack was parried perfectly (implies `AllParried`)
    AllPerfectlyParried,
    /// At least one attack was missed, or nothing was recorded
    AtLeastOneMissed,
}

impl BoutOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            BoutOutcome::AllParried => "all parried",
            BoutOutcome::AllPerfectlyParried => "all perfectly parried",
            BoutOutcome::AtLeastOneMissed => "at least one missed",
        }
    }
}

/// Classify a bout from its recorded attacks.
pub fn classify(records: &[AttackRecord]) -> BoutOutcome {
    if records.is_empty() || records.iter().any(|r| !r.parried) {
        return BoutOutcome::AtLeastOneMissed;
    }
    if records.iter().all(|r| r.perfect) {
        BoutOutcome::AllPerfectlyParried
    } else {
        BoutOutcome::AllParried
    }
}

/// Where the bout loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum BoutPhase {
    /// No bout running; the next tick in Combat starts one
    #[default]
    Idle,
    /// An attack timeline is live
    Attacking,
    /// Idle time between attacks within a bout
    Interval { remaining: f32 },
    /// Rest between bouts
    Pause { remaining: f32 },
}

/// Mutable state of the current bout.
#[derive(Resource, Debug, Default)]
pub struct BoutState {
    pub phase: BoutPhase,
    /// Pacing chosen for this bout at its start
    pub pacing: ComboPacing,
    /// Directions not yet attacked this bout
    queue: Vec<Direction>,
    /// Results of attacks resolved so far this bout
    pub records: SmallVec<[AttackRecord; 8]>,
    /// The in-flight attack, if any
    pub active: Option<AttackTimeline>,
}

impl BoutState {
    /// Direction of the in-flight attack, if one is live.
    pub fn active_direction(&self) -> Option<Direction> {
        self.active.as_ref().map(|attack| attack.direction)
    }
}

/// Advance the bout loop by one tick.
///
/// Runs after input resolution each tick, so a parry that zeroed the
/// enemy this tick truncates the bout here and the aggregate outcome is
/// emitted before the match-end check runs.
pub fn advance_bout(
    time: Res<Time>,
    mut match_state: ResMut<MatchState>,
    mut bout: ResMut<BoutState>,
    mut rng: ResMut<GameRng>,
    mut opened_events: EventWriter<ParryWindowOpened>,
    mut wind_down_events: EventWriter<WindDownStarted>,
    mut closed_events: EventWriter<ParryWindowClosed>,
    mut ended_events: EventWriter<AttackEnded>,
    mut missed_events: EventWriter<ParryMissed>,
    mut combo_events: EventWriter<ComboResolved>,
    mut life_events: EventWriter<LifeChanged>,
    mut streak_events: EventWriter<PerfectStreakChanged>,
) {
    if match_state.phase != MatchPhase::Combat {
        return;
    }

    // A parry earlier this tick (or a miss last tick) may have ended the
    // match. Cancel the in-flight wait and resolve the bout now.
    if match_state.player_life <= 0.0 || match_state.enemy_life <= 0.0 {
        if !matches!(bout.phase, BoutPhase::Idle) {
            if let Some(attack) = bout.active.take() {
                // The window pair stays balanced on cancellation, but an
                // unresolved cancelled attack is not scored as a miss.
                closed_events.send(ParryWindowClosed {
                    direction: attack.direction,
                });
                ended_events.send(AttackEnded {
                    direction: attack.direction,
                });
            }
            bout.queue.clear();
            finish_bout(&mut match_state, &mut bout, &mut combo_events, &mut life_events);
        }
        return;
    }

    let dt = time.delta_secs();
    match bout.phase {
        BoutPhase::Idle => {
            start_bout(&match_state, &mut bout, &mut rng, &mut opened_events);
        }
        BoutPhase::Attacking => {
            let signals = match bout.active.as_mut() {
                Some(active) => active.tick(dt),
                None => {
                    bout.phase = BoutPhase::Idle;
                    return;
                }
            };
            let mut window_closed = false;
            for signal in signals {
                match signal {
                    TimelineSignal::WindDownStarted => {
                        wind_down_events.send(WindDownStarted);
                    }
                    TimelineSignal::Closed => window_closed = true,
                }
            }
            if !window_closed {
                return;
            }
            let Some(attack) = bout.active.take() else {
                return;
            };
            closed_events.send(ParryWindowClosed {
                direction: attack.direction,
            });
            ended_events.send(AttackEnded {
                direction: attack.direction,
            });

            if !attack.is_resolved() {
                // Window closed without a successful parry: this is the
                // authoritative moment the miss is scored.
                bout.records.push(AttackRecord {
                    direction: attack.direction,
                    parried: false,
                    perfect: false,
                });
                match_state.player_life =
                    (match_state.player_life - PLAYER_MISS_LIFE_LOSS).max(0.0);
                missed_events.send(ParryMissed);
                life_events.send(LifeChanged {
                    side: CombatSide::Player,
                    value: match_state.player_life,
                });
                if match_state.perfect_streak != 0 {
                    match_state.perfect_streak = 0;
                    streak_events.send(PerfectStreakChanged { count: 0 });
                }
                info!(
                    "{} attack missed - player life {:.1}",
                    attack.direction.name(),
                    match_state.player_life
                );
            }

            if match_state.player_life <= 0.0 || match_state.enemy_life <= 0.0 {
                bout.queue.clear();
                finish_bout(&mut match_state, &mut bout, &mut combo_events, &mut life_events);
            } else if bout.queue.is_empty() {
                finish_bout(&mut match_state, &mut bout, &mut combo_events, &mut life_events);
            } else {
                bout.phase = BoutPhase::Interval {
                    remaining: bout.pacing.interval_between_attacks,
                };
            }
        }
        BoutPhase::Interval { remaining } => {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                bout.phase = BoutPhase::Interval { remaining };
            } else if !start_next_attack(&mut bout, &mut opened_events) {
                finish_bout(&mut match_state, &mut bout, &mut combo_events, &mut life_events);
            }
        }
        BoutPhase::Pause { remaining } => {
            let remaining = remaining - dt;
            if remaining > 0.0 {
                bout.phase = BoutPhase::Pause { remaining };
            } else {
                start_bout(&match_state, &mut bout, &mut rng, &mut opened_events);
            }
        }
    }
}

/// Begin a new bout: derive pacing from the enemy's current life, draw
/// uniformly-random attack directions and launch the first attack.
fn start_bout(
    match_state: &MatchState,
    bout: &mut BoutState,
    rng: &mut GameRng,
    opened_events: &mut EventWriter<ParryWindowOpened>,
) {
    let pacing = scale_pacing(&match_state.tuning, match_state.enemy_life);
    bout.pacing = pacing;
    bout.records.clear();
    bout.queue.clear();
    for _ in 0..pacing.attack_count {
        let index = rng.random_index(Direction::ATTACKS.len());
        bout.queue.push(Direction::ATTACKS[index]);
    }
    info!(
        "Bout begins: {} attacks (wind-up {:.2}s, wind-down {:.2}s, interval {:.2}s)",
        pacing.attack_count, pacing.wind_up_duration, pacing.wind_down_duration,
        pacing.interval_between_attacks
    );
    if !start_next_attack(bout, opened_events) {
        // Unreachable with validated tuning; stay idle rather than crash.
        warn!("Bout could not start any attack with the current pacing");
        bout.phase = BoutPhase::Idle;
    }
}

/// Launch the next queued attack, skipping any the timeline rejects.
/// Returns false when the queue is exhausted.
fn start_next_attack(
    bout: &mut BoutState,
    opened_events: &mut EventWriter<ParryWindowOpened>,
) -> bool {
    while !bout.queue.is_empty() {
        let direction = bout.queue.remove(0);
        match AttackTimeline::start(
            direction,
            bout.pacing.wind_up_duration,
            bout.pacing.wind_down_duration,
        ) {
            Ok(timeline) => {
                opened_events.send(ParryWindowOpened { direction });
                bout.active = Some(timeline);
                bout.phase = BoutPhase::Attacking;
                return true;
            }
            Err(err) => {
                warn!("Skipping attack: {}", err);
            }
        }
    }
    false
}

/// Classify the bout, apply the combo bonus, emit `ComboResolved` and
/// either rest before the next bout or return to idle if the match is
/// effectively over.
fn finish_bout(
    match_state: &mut MatchState,
    bout: &mut BoutState,
    combo_events: &mut EventWriter<ComboResolved>,
    life_events: &mut EventWriter<LifeChanged>,
) {
    let outcome = classify(&bout.records);
    if matches!(
        outcome,
        BoutOutcome::AllParried | BoutOutcome::AllPerfectlyParried
    ) {
        let bonus = match_state.tuning.damage_on_combo_parry;
        if bonus > 0.0 {
            match_state.enemy_life = (match_state.enemy_life - bonus).max(0.0);
            life_events.send(LifeChanged {
                side: CombatSide::Enemy,
                value: match_state.enemy_life,
            });
        }
    }
    combo_events.send(ComboResolved { outcome });
    info!("Bout complete: {}", outcome.name());

    bout.records.clear();
    bout.queue.clear();
    bout.active = None;
    bout.phase = if match_state.player_life <= 0.0 || match_state.enemy_life <= 0.0 {
        BoutPhase::Idle
    } else {
        BoutPhase::Pause {
            remaining: match_state.tuning.pause_between_combos,
        }
    };
}
