//! Stateless glue between a transport and the pure `Game` transitions.
//!
//! Nothing in `game` ever logs; every `MatchOrchestrator` method below
//! wraps exactly one transition and logs at its boundary, mirroring how
//! the rest of the stack keeps domain logic free of tracing calls.

use tracing::{debug, info};

use crate::cards::Card;
use crate::errors::DomainError;
use crate::events::GameEvent;
use crate::game::{self, EnvidoCall, Game, PlayerId, TrucoCall};

/// Thin, state-free wrapper around the `game` transition functions. It
/// exists so a transport layer has one call site per player action and
/// one place to hang structured logging, instead of importing every
/// `game::*` function directly.
#[derive(Debug, Default, Clone, Copy)]
pub struct MatchOrchestrator;

impl MatchOrchestrator {
    pub fn join(&self, game: &Game, who: PlayerId) -> Result<Game, DomainError> {
        debug!(game_id = game.id, who, "player joining game");
        game::join(game, who)
    }

    pub fn start(&self, game: &Game) -> Result<Game, DomainError> {
        info!(game_id = game.id, "starting match");
        game::start(game)
    }

    pub fn throw_card(&self, state: &Game, who: PlayerId, card: Card) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, ?card, "throwing card");
        let next = game::throw_card(state, who, card)?;
        log_new_events(state, &next);
        Ok(next)
    }

    pub fn call_envido(&self, state: &Game, who: PlayerId, call: EnvidoCall) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, ?call, "calling envido");
        let next = game::call_envido(state, who, call)?;
        log_new_events(state, &next);
        Ok(next)
    }

    pub fn answer_envido(&self, state: &Game, who: PlayerId, accept: bool) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, accept, "answering envido");
        let next = game::answer_envido(state, who, accept)?;
        log_new_events(state, &next);
        Ok(next)
    }

    pub fn call_truco(&self, state: &Game, who: PlayerId, call: TrucoCall) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, ?call, "calling truco");
        let next = game::call_truco(state, who, call)?;
        log_new_events(state, &next);
        Ok(next)
    }

    pub fn answer_truco(&self, state: &Game, who: PlayerId, accept: bool) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, accept, "answering truco");
        let next = game::answer_truco(state, who, accept)?;
        log_new_events(state, &next);
        Ok(next)
    }

    pub fn go_to_deck(&self, state: &Game, who: PlayerId) -> Result<Game, DomainError> {
        info!(game_id = state.id, who, "player going to the deck");
        let next = game::go_to_deck(state, who)?;
        log_new_events(state, &next);
        Ok(next)
    }

    pub fn play_again(&self, state: &Game, who: PlayerId) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, "player requesting rematch");
        game::play_again(state, who)
    }

    pub fn no_play_again(&self, state: &Game, who: PlayerId) -> Result<Game, DomainError> {
        debug!(game_id = state.id, who, "player declining rematch");
        game::no_play_again(state, who)
    }
}

fn log_new_events(prior: &Game, next: &Game) {
    for event in next.new_events(prior.events.len()) {
        match event {
            GameEvent::Result { winner, .. } => {
                info!(game_id = next.id, winner, "match finished")
            }
            GameEvent::RoundResult { winner, .. } => {
                debug!(game_id = next.id, winner, round = next.state.round, "round resolved")
            }
            other => debug!(game_id = next.id, event = ?other, "event emitted"),
        }
    }
}
