//! The engine's closed error enumeration.
//!
//! This is the terminal, transport-agnostic error type for every fallible
//! function in the crate. It carries no HTTP status or error code — that
//! mapping belongs to whatever out-of-scope transport wraps the engine.

use std::error::Error;
use std::fmt::{Display, Formatter, Result as FmtResult};

#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    /// The turn precondition failed: `state.playerTurn != userId`.
    NotYourTurn,
    /// A non-answer action was attempted while an envido or truco
    /// sub-protocol is awaiting a response.
    WaitingResponse,
    /// The thrown card is not in the player's remaining hand.
    InvalidCard,
    /// Envido was called outside step 1, or after a card was already
    /// thrown in step 1.
    InvalidStep,
    /// The envido call violates the escalation chain.
    InvalidEnvidoCall,
    /// The truco call violates the escalation chain, or the same side
    /// tried to re-call.
    InvalidTrucoCall,
    /// An answer was given but no call is pending.
    NotWaitingResponse,
    GameAlreadyStarted,
    GameNotStarted,
    GameFull,
    GameFinished,
    /// A card token failed to parse.
    ParseCard(String),
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            DomainError::NotYourTurn => write!(f, "not your turn"),
            DomainError::WaitingResponse => write!(f, "a response is pending"),
            DomainError::InvalidCard => write!(f, "card not in hand"),
            DomainError::InvalidStep => write!(f, "envido cannot be called at this step"),
            DomainError::InvalidEnvidoCall => write!(f, "invalid envido escalation"),
            DomainError::InvalidTrucoCall => write!(f, "invalid truco escalation"),
            DomainError::NotWaitingResponse => write!(f, "no call is awaiting a response"),
            DomainError::GameAlreadyStarted => write!(f, "game already started"),
            DomainError::GameNotStarted => write!(f, "game has not started"),
            DomainError::GameFull => write!(f, "game already has two players"),
            DomainError::GameFinished => write!(f, "game already finished"),
            DomainError::ParseCard(s) => write!(f, "could not parse card token: {s}"),
        }
    }
}

impl Error for DomainError {}
