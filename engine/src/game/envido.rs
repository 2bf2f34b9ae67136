//! The envido sub-protocol: calling, escalating and answering.

use crate::cards::envido_value;
use crate::errors::DomainError;
use crate::events::GameEvent;

use super::play::in_envido_window;
use super::state::{EnvidoCall, EnvidoNegotiation, Game, PlayerId};

pub fn reset_envido() -> EnvidoNegotiation {
    EnvidoNegotiation::default()
}

/// Points awarded to the caller for a declined envido chain: one point
/// per call made on the chain (declining forfeits the last one too).
fn declined_points(calls: &[EnvidoCall]) -> u8 {
    calls.len() as u8
}

/// The escalation chain is valid if `call` strictly escalates over the
/// last call made, except that a lone `Envido` may be followed by exactly
/// one more `Envido` before it must escalate to `RealEnvido`/`FaltaEnvido`.
fn is_valid_escalation(existing: &[EnvidoCall], call: EnvidoCall) -> bool {
    match existing.last() {
        None => true,
        Some(EnvidoCall::Envido) => {
            let envido_count = existing.iter().filter(|c| **c == EnvidoCall::Envido).count();
            match call {
                EnvidoCall::Envido => envido_count < 2,
                EnvidoCall::RealEnvido | EnvidoCall::FaltaEnvido => true,
            }
        }
        Some(EnvidoCall::RealEnvido) => call == EnvidoCall::FaltaEnvido,
        Some(EnvidoCall::FaltaEnvido) => false,
    }
}

/// Call envido, real envido or falta envido. Only legal in the envido
/// window of the first trick, and only as an escalation over any call
/// already on the table.
pub fn call_envido(game: &Game, who: PlayerId, call: EnvidoCall) -> Result<Game, DomainError> {
    if !game.state.started {
        return Err(DomainError::GameNotStarted);
    }
    if game.state.winner.is_some() {
        return Err(DomainError::GameFinished);
    }
    if game.state.player_turn != who {
        return Err(DomainError::NotYourTurn);
    }
    if game.state.truco.waiting_response {
        return Err(DomainError::WaitingResponse);
    }
    if !in_envido_window(game) {
        return Err(DomainError::InvalidStep);
    }
    let players = game.player_pair().ok_or(DomainError::GameNotStarted)?;
    if game.state.envido.waiting_response && game.state.envido.last_caller == Some(who) {
        return Err(DomainError::InvalidEnvidoCall);
    }
    if !is_valid_escalation(&game.state.envido.calls, call) {
        return Err(DomainError::InvalidEnvidoCall);
    }

    let mut next = game.clone();
    next.state.envido.calls.push(call);
    if next.state.envido.first_caller.is_none() {
        next.state.envido.first_caller = Some(who);
    }
    next.state.envido.last_caller = Some(who);
    next.state.envido.waiting_response = true;
    next.state.player_turn = next.state.other_player(&players, who);

    next.events.push(GameEvent::EnvidoCall { call, caller: who });
    Ok(next)
}

/// Answer the pending envido call. `accept = false` awards the caller
/// chain's accumulated points without revealing hands; `accept = true`
/// resolves the envido by comparing both hands' envido values.
pub fn answer_envido(game: &Game, who: PlayerId, accept: bool) -> Result<Game, DomainError> {
    if game.state.player_turn != who {
        return Err(DomainError::NotYourTurn);
    }
    if !game.state.envido.waiting_response {
        return Err(DomainError::NotWaitingResponse);
    }
    let players = game.player_pair().ok_or(DomainError::GameNotStarted)?;
    let caller = game.state.envido.last_caller.ok_or(DomainError::NotWaitingResponse)?;
    let opponent = game.state.other_player(&players, who);
    debug_assert_eq!(opponent, caller);
    let first_caller = game.state.envido.first_caller.unwrap_or(caller);

    let mut next = game.clone();
    next.state.envido.waiting_response = false;
    next.state.envido.answered_by = Some(who);
    next.state.envido.accepted = Some(accept);
    next.state.player_turn = first_caller;

    if !accept {
        let awarded = declined_points(&next.state.envido.calls);
        let entry = next.state.points.entry(caller).or_insert(0);
        *entry = entry.saturating_add(awarded);
        next.state.envido.winner = Some(caller);
        next.state.envido.points_awarded = Some(next.state.points.clone());

        next.events.push(GameEvent::EnvidoDeclined {
            declined_by: who,
            points: next.state.points.clone(),
        });
        return Ok(super::play::with_winner_result(next));
    }

    let total_points = envido_points_for_chain(&next.state.envido.calls);
    let caller_hand = &next.state.cards[&caller];
    let caller_thrown = &next.state.thrown_cards[&caller];
    let opponent_hand = &next.state.cards[&who];
    let opponent_thrown = &next.state.thrown_cards[&who];

    let caller_cards: Vec<_> = caller_hand.iter().chain(caller_thrown).copied().collect();
    let opponent_cards: Vec<_> = opponent_hand.iter().chain(opponent_thrown).copied().collect();

    let caller_value = envido_value(&caller_cards);
    let opponent_value = envido_value(&opponent_cards);

    // Ties favour the mano, per the usual rule.
    let winner = if caller_value > opponent_value {
        caller
    } else if opponent_value > caller_value {
        who
    } else if game.state.first_player == caller {
        caller
    } else {
        who
    };

    let loser = if winner == caller { who } else { caller };
    let awarded = if next.state.envido.calls.contains(&EnvidoCall::FaltaEnvido) {
        falta_envido_points(&next, loser)
    } else {
        total_points
    };
    let entry = next.state.points.entry(winner).or_insert(0);
    *entry = entry.saturating_add(awarded);
    next.state.envido.winner = Some(winner);
    next.state.envido.points_awarded = Some(next.state.points.clone());

    next.events.push(GameEvent::EnvidoAccepted {
        accepted_by: who,
        points: next.state.points.clone(),
    });

    Ok(super::play::with_winner_result(next))
}

/// `FaltaEnvido` is worth however many points the *losing* side of the
/// envido itself is missing to reach twice the match target, counted
/// from its score at the moment the envido is resolved.
fn falta_envido_points(game: &Game, loser: PlayerId) -> u8 {
    let loser_points = *game.state.points.get(&loser).unwrap_or(&0);
    (2 * game.config.max_points).saturating_sub(loser_points)
}

/// Points at stake once the whole chain is accepted and resolved.
/// `FaltaEnvido` is worth however many points the losing side needs to
/// reach the match target.
fn envido_points_for_chain(calls: &[EnvidoCall]) -> u8 {
    calls
        .iter()
        .map(|c| match c {
            EnvidoCall::Envido => 2,
            EnvidoCall::RealEnvido => 3,
            EnvidoCall::FaltaEnvido => 0,
        })
        .sum()
}
