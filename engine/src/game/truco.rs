//! The truco sub-protocol: calling, escalating and answering.

use crate::errors::DomainError;
use crate::events::GameEvent;

use super::state::{Game, PlayerId, TrucoCall, TrucoNegotiation};

pub fn reset_truco() -> TrucoNegotiation {
    TrucoNegotiation::default()
}

fn is_valid_escalation(current_level: Option<TrucoCall>, call: TrucoCall) -> bool {
    match current_level {
        None => true,
        Some(level) => call > level,
    }
}

/// Call truco, retruco or vale cuatro. Only the side not currently
/// holding the last accepted level may escalate, and never while a
/// response to the current level is still pending.
pub fn call_truco(game: &Game, who: PlayerId, call: TrucoCall) -> Result<Game, DomainError> {
    if !game.state.started {
        return Err(DomainError::GameNotStarted);
    }
    if game.state.winner.is_some() {
        return Err(DomainError::GameFinished);
    }
    if game.state.player_turn != who {
        return Err(DomainError::NotYourTurn);
    }
    if game.state.envido.waiting_response || game.state.truco.waiting_response {
        return Err(DomainError::WaitingResponse);
    }
    let players = game.player_pair().ok_or(DomainError::GameNotStarted)?;
    if game.state.truco.caller == Some(who) && game.state.truco.level.is_some() {
        return Err(DomainError::InvalidTrucoCall);
    }
    if !is_valid_escalation(game.state.truco.level, call) {
        return Err(DomainError::InvalidTrucoCall);
    }

    let mut next = game.clone();
    let opponent = next.state.other_player(&players, who);
    next.state.truco.pending = Some(call);
    next.state.truco.caller = Some(who);
    next.state.truco.waiting_response = true;
    next.state.truco.turn_before_call = Some(next.state.player_turn);
    next.state.player_turn = opponent;

    next.events.push(GameEvent::TrucoCall { call, caller: who });
    Ok(next)
}

/// Answer the pending truco call. Declining immediately ends the round
/// in the caller's favour, worth the *previously accepted* level (or
/// one point if no truco had been accepted yet). Accepting raises the
/// round's stake to the new level.
pub fn answer_truco(game: &Game, who: PlayerId, accept: bool) -> Result<Game, DomainError> {
    if game.state.player_turn != who {
        return Err(DomainError::NotYourTurn);
    }
    if !game.state.truco.waiting_response {
        return Err(DomainError::NotWaitingResponse);
    }
    let caller = game.state.truco.caller.ok_or(DomainError::NotWaitingResponse)?;
    let pending = game.state.truco.pending.ok_or(DomainError::NotWaitingResponse)?;
    let turn_before_call = game.state.truco.turn_before_call;

    let mut next = game.clone();
    next.state.truco.waiting_response = false;

    if !accept {
        next.events.push(GameEvent::TrucoDecline {
            declined_by: who,
            call: pending,
        });
        return Ok(super::play::set_round_winner(next, caller));
    }

    next.state.truco.level = Some(pending);
    next.state.truco.pending = None;
    next.state.truco.turn_before_call = None;
    next.state.truco_points = pending.points();
    if let Some(turn) = turn_before_call {
        next.state.player_turn = turn;
    }

    next.events.push(GameEvent::TrucoAccept {
        accepted_by: who,
        call: pending,
    });
    Ok(next)
}
