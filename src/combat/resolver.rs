//! Parry resolution
//!
//! Turns directional inputs into outcomes against whatever parry window is
//! currently open. Inputs with no open window, inputs against an already
//! resolved attack, and wrong-direction inputs are all silent no-ops: a
//! wrong guess does not lock the window, and the miss is only scored when
//! the window closes.

use bevy::prelude::*;

use super::events::{CombatSide, LifeChanged, ParrySucceeded, PerfectStreakChanged, SubmitDirection};
use super::match_control::{MatchPhase, MatchState};
use super::orchestrator::{AttackRecord, BoutState};

/// Apply submitted directions to the open parry window.
///
/// On a match (`input == opposite(attack direction)`): the attack's slot is
/// marked parried, perfect iff the attack is in wind-down, the window is
/// closed for further input, and enemy damage is applied immediately
/// rather than deferred to bout end.
pub fn resolve_parry_inputs(
    mut inputs: EventReader<SubmitDirection>,
    mut match_state: ResMut<MatchState>,
    mut bout: ResMut<BoutState>,
    mut parry_events: EventWriter<ParrySucceeded>,
    mut life_events: EventWriter<LifeChanged>,
    mut streak_events: EventWriter<PerfectStreakChanged>,
) {
    for input in inputs.read() {
        if match_state.phase != MatchPhase::Combat {
            continue;
        }
        let Some(attack) = bout.active.as_mut() else {
            continue;
        };
        if !attack.is_open() {
            continue;
        }
        // Neutral never matches: opposite() of an attack direction is
        // always a cardinal direction.
        if Some(input.direction) != attack.direction.opposite() {
            continue;
        }

        attack.resolve();
        let perfect = attack.in_wind_down();
        let direction = attack.direction;
        bout.records.push(AttackRecord {
            direction,
            parried: true,
            perfect,
        });

        let damage = match_state.tuning.damage_on_parry
            * if perfect {
                match_state.tuning.damage_perfect_ratio
            } else {
                1.0
            };
        match_state.enemy_life = (match_state.enemy_life - damage).max(0.0);
        life_events.send(LifeChanged {
            side: CombatSide::Enemy,
            value: match_state.enemy_life,
        });
        parry_events.send(ParrySucceeded { perfect });
        info!(
            "{} attack parried{} for {:.2} damage",
            direction.name(),
            if perfect { " (perfect)" } else { "" },
            damage
        );

        if perfect {
            match_state.perfect_streak += 1;
            match_state.best_streak = match_state.best_streak.max(match_state.perfect_streak);
            streak_events.send(PerfectStreakChanged {
                count: match_state.perfect_streak,
            });
        } else if match_state.perfect_streak != 0 {
            match_state.perfect_streak = 0;
            streak_events.send(PerfectStreakChanged { count: 0 });
        }
    }
}
