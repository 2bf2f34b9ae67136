//! The immutable `Game` aggregate and its nested state records.
//!
//! Every transition method elsewhere in this module takes a `&Game` plus
//! arguments and returns a brand new `Game` (or a `DomainError`); nothing
//! here is interior-mutable. The copy-then-mutate-partial idiom below
//! clones into a local binding and mutates that, then returns it — there
//! is no shared, observable mutable state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::config::MatchConfig;
use crate::events::GameEvent;

/// An opaque integer identifying a user. Two distinct ids per game.
pub type PlayerId = i64;

/// Sentinel game id meaning "not yet persisted"; the repository layer
/// assigns a real id on first save.
pub const UNPERSISTED_GAME_ID: i64 = 0;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EnvidoCall {
    Envido,
    RealEnvido,
    FaltaEnvido,
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrucoCall {
    Truco,
    Retruco,
    ValeCuatro,
}

impl TrucoCall {
    /// Round value in points once this call is accepted.
    pub fn points(self) -> u8 {
        match self {
            TrucoCall::Truco => 2,
            TrucoCall::Retruco => 3,
            TrucoCall::ValeCuatro => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum RematchChoice {
    Undecided,
    Wants,
    Refuses,
}

#[derive(Debug, Clone, Default)]
pub struct EnvidoNegotiation {
    /// Ordered list of calls made this round.
    pub calls: Vec<EnvidoCall>,
    /// The player who opened envido this round.
    pub first_caller: Option<PlayerId>,
    /// The most recent caller.
    pub last_caller: Option<PlayerId>,
    /// True iff the last action in this sub-protocol was a call with no
    /// answer yet.
    pub waiting_response: bool,
    /// Who gave the answer, once one has been given.
    pub answered_by: Option<PlayerId>,
    pub accepted: Option<bool>,
    pub winner: Option<PlayerId>,
    pub points_awarded: Option<BTreeMap<PlayerId, u8>>,
}

impl EnvidoNegotiation {
    pub fn is_resolved(&self) -> bool {
        self.winner.is_some()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TrucoNegotiation {
    /// The escalation level of the last *accepted* call; `None` means the
    /// round is still worth its base point value.
    pub level: Option<TrucoCall>,
    /// The call currently awaiting a response, if any.
    pub pending: Option<TrucoCall>,
    /// The player who made the pending call.
    pub caller: Option<PlayerId>,
    pub waiting_response: bool,
    /// Whose turn it was immediately before the pending call shifted the
    /// turn to the answering player; restored on accept.
    pub turn_before_call: Option<PlayerId>,
}

#[derive(Debug, Clone)]
pub struct GameState {
    pub started: bool,
    /// The mano of the current round; alternates each round.
    pub first_player: PlayerId,
    /// Whose action is currently expected.
    pub player_turn: PlayerId,
    pub winner: Option<PlayerId>,
    pub round: u32,
    pub cards: BTreeMap<PlayerId, Vec<Card>>,
    pub thrown_cards: BTreeMap<PlayerId, Vec<Card>>,
    pub truco_points: u8,
    pub points: BTreeMap<PlayerId, u8>,
    pub envido: EnvidoNegotiation,
    pub truco: TrucoNegotiation,
    pub rematch: BTreeMap<PlayerId, RematchChoice>,
}

impl GameState {
    /// A blank state used only before the second player has joined.
    pub fn lobby(first_player: PlayerId) -> Self {
        Self {
            started: false,
            first_player,
            player_turn: first_player,
            winner: None,
            round: 1,
            cards: BTreeMap::new(),
            thrown_cards: BTreeMap::new(),
            truco_points: 1,
            points: BTreeMap::new(),
            envido: EnvidoNegotiation::default(),
            truco: TrucoNegotiation::default(),
            rematch: BTreeMap::new(),
        }
    }

    pub fn other_player(&self, players: &[PlayerId; 2], who: PlayerId) -> PlayerId {
        if players[0] == who {
            players[1]
        } else {
            players[0]
        }
    }
}

#[derive(Debug, Clone)]
pub struct Game {
    pub id: i64,
    /// Display name of the creator.
    pub name: String,
    /// Length 1 before the second player joins, 2 after.
    pub players: Vec<PlayerId>,
    pub state: GameState,
    /// Append-only log of every event this aggregate has ever emitted.
    pub events: Vec<GameEvent>,
    /// Target score for the match (the *partida*); regulation is 15.
    pub config: MatchConfig,
}

impl Game {
    /// Create a lobby game containing only its creator. `id` is the
    /// unpersisted sentinel until a repository assigns a real one.
    pub fn new(creator_name: impl Into<String>, creator: PlayerId) -> Self {
        Self::with_config(creator_name, creator, MatchConfig::default())
    }

    /// Create a lobby game with a non-default match target.
    pub fn with_config(creator_name: impl Into<String>, creator: PlayerId, config: MatchConfig) -> Self {
        Self {
            id: UNPERSISTED_GAME_ID,
            name: creator_name.into(),
            players: vec![creator],
            state: GameState::lobby(creator),
            events: Vec::new(),
            config,
        }
    }

    /// The two player ids once the game has a second player; `None`
    /// before then.
    pub fn player_pair(&self) -> Option<[PlayerId; 2]> {
        if self.players.len() == 2 {
            Some([self.players[0], self.players[1]])
        } else {
            None
        }
    }

    pub fn player_ids(&self) -> &[PlayerId] {
        &self.players
    }

    /// All events appended strictly after `prior_len` events were present.
    /// Used to compute "new events since snapshot" for a transport push.
    pub fn new_events(&self, prior_len: usize) -> &[GameEvent] {
        &self.events[prior_len.min(self.events.len())..]
    }
}
