//! Rebuilding match state from nothing but its event log.
//!
//! A transport only ever needs to ship `new_events` since a client's
//! last snapshot; this module exists to prove that folding the whole
//! log back up reproduces exactly what the live aggregate already
//! knows, independent of whatever storage carried the events.

use std::collections::BTreeMap;

use crate::events::GameEvent;
use crate::game::PlayerId;

/// The score and winner recoverable purely from a `GameEvent` log.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplayedOutcome {
    pub points: BTreeMap<PlayerId, u8>,
    pub winner: Option<PlayerId>,
}

/// Fold an event log into the score/winner it produced. Every points-
/// bearing event carries the full post-event scoreboard, so the last
/// one observed is authoritative.
pub fn replay(events: &[GameEvent]) -> ReplayedOutcome {
    let mut outcome = ReplayedOutcome::default();
    for event in events {
        match event {
            GameEvent::EnvidoAccepted { points, .. }
            | GameEvent::EnvidoDeclined { points, .. }
            | GameEvent::RoundResult { points, .. } => {
                outcome.points = points.clone();
            }
            GameEvent::Result { points, winner } => {
                outcome.points = points.clone();
                outcome.winner = Some(*winner);
            }
            _ => {}
        }
    }
    outcome
}
