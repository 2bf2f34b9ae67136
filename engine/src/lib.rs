#![cfg_attr(not(test), deny(clippy::expect_used, clippy::unwrap_used, clippy::panic, clippy::todo, clippy::unimplemented))]

pub mod cards;
pub mod config;
pub mod deal;
pub mod errors;
pub mod events;
pub mod game;
pub mod orchestration;
pub mod replay;

pub use cards::{card_truco_value, envido_value, Card, Rank, Suit};
pub use config::MatchConfig;
pub use errors::DomainError;
pub use events::GameEvent;
pub use game::{Game, GameState, PlayerId};
pub use orchestration::MatchOrchestrator;
pub use replay::{replay, ReplayedOutcome};
