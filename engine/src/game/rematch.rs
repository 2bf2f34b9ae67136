//! Post-match rematch negotiation: once a winner is set, each player
//! opts in or out of a fresh match with the same two seats.

use crate::errors::DomainError;

use super::state::{Game, GameState, PlayerId, RematchChoice};

/// Record that `who` wants to play again. Once both players have
/// opted in, the game is reset to a fresh lobby-started match.
pub fn play_again(game: &Game, who: PlayerId) -> Result<Game, DomainError> {
    with_rematch_choice(game, who, RematchChoice::Wants)
}

/// Record that `who` declines a rematch.
pub fn no_play_again(game: &Game, who: PlayerId) -> Result<Game, DomainError> {
    with_rematch_choice(game, who, RematchChoice::Refuses)
}

fn with_rematch_choice(game: &Game, who: PlayerId, choice: RematchChoice) -> Result<Game, DomainError> {
    if game.state.winner.is_none() {
        return Err(DomainError::GameNotStarted);
    }
    if !game.players.contains(&who) {
        return Err(DomainError::NotYourTurn);
    }

    let mut next = game.clone();
    next.state.rematch.insert(who, choice);
    Ok(resolve_rematch(next))
}

/// If every seated player wants a rematch, deal it; if any player has
/// refused, the match stays finished. Otherwise wait for more answers.
fn resolve_rematch(mut game: Game) -> Game {
    let players = match game.player_pair() {
        Some(p) => p,
        None => return game,
    };

    let refused = players
        .iter()
        .any(|p| matches!(game.state.rematch.get(p), Some(RematchChoice::Refuses)));
    if refused {
        return game;
    }

    let all_want = players
        .iter()
        .all(|p| matches!(game.state.rematch.get(p), Some(RematchChoice::Wants)));
    if !all_want {
        return game;
    }

    let mano = game.state.first_player;
    let config = game.config;
    let mut fresh = GameState::lobby(mano);
    fresh.started = false;
    game.state = fresh;
    game.config = config;
    game
}
