//! Lobby lifecycle: joining a game and dealing the opening round.

use crate::deal::deal_hands;
use crate::errors::DomainError;
use crate::events::GameEvent;

use super::state::{Game, GameState, PlayerId};

/// Whether `who` may join this game as the second player.
pub fn can_join(game: &Game, who: PlayerId) -> bool {
    !game.state.started && game.players.len() == 1 && game.players[0] != who
}

/// Seat a second player. The game stays unstarted until `start` deals the
/// first round.
pub fn join(game: &Game, who: PlayerId) -> Result<Game, DomainError> {
    if game.state.started {
        return Err(DomainError::GameAlreadyStarted);
    }
    if game.players.len() != 1 {
        return Err(DomainError::GameFull);
    }
    if game.players[0] == who {
        return Err(DomainError::GameFull);
    }

    let mut next = game.clone();
    next.players.push(who);
    Ok(next)
}

/// Deal the opening round and mark the game started. The mano (first
/// player of round 1) is whichever player joined first.
pub fn start(game: &Game) -> Result<Game, DomainError> {
    if game.state.started {
        return Err(DomainError::GameAlreadyStarted);
    }
    let [p1, p2] = game.player_pair().ok_or(DomainError::GameNotStarted)?;

    let (hand1, hand2) = deal_hands();
    let mut next = game.clone();
    next.state = GameState::lobby(p1);
    next.state.started = true;
    next.state.points.insert(p1, 0);
    next.state.points.insert(p2, 0);
    next.state.cards.insert(p1, hand1.clone());
    next.state.cards.insert(p2, hand2.clone());
    next.state.thrown_cards.insert(p1, Vec::new());
    next.state.thrown_cards.insert(p2, Vec::new());

    let mut cards = std::collections::BTreeMap::new();
    cards.insert(p1, hand1);
    cards.insert(p2, hand2);

    next.events.push(GameEvent::Start);
    next.events.push(GameEvent::NextRound {
        round: 1,
        cards,
        next_player_id: p1,
    });

    Ok(next)
}
