//! The `Game` aggregate: lobby lifecycle, card play, envido, truco and
//! rematch negotiation, all as pure transitions over an immutable
//! value.

pub mod envido;
pub mod lifecycle;
pub mod play;
pub mod rematch;
pub mod state;
pub mod truco;

#[cfg(test)]
mod tests_props;
#[cfg(test)]
mod tests_scenarios;

pub use envido::{answer_envido, call_envido};
pub use lifecycle::{can_join, join, start};
pub use play::{go_to_deck, round_winner, step, throw_card};
pub use rematch::{no_play_again, play_again};
pub use state::{
    EnvidoCall, EnvidoNegotiation, Game, GameState, PlayerId, RematchChoice, TrucoCall,
    TrucoNegotiation,
};
pub use truco::{answer_truco, call_truco};
