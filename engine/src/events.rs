//! The closed tagged union of events emitted by every successful
//! transition. Adding a variant is a compile-time break for any
//! exhaustive `match` on `GameEvent`, by design.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{EnvidoCall, PlayerId, TrucoCall};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GameEvent {
    Start,
    NextRound {
        round: u32,
        /// Per-player freshly dealt hand. The transport is responsible
        /// for filtering this down to the addressee before delivery.
        cards: BTreeMap<PlayerId, Vec<Card>>,
        next_player_id: PlayerId,
    },
    ThrowCard {
        player_id: PlayerId,
        card: Card,
        next_player_id: PlayerId,
    },
    EnvidoCall {
        call: EnvidoCall,
        caller: PlayerId,
    },
    EnvidoAccepted {
        accepted_by: PlayerId,
        points: BTreeMap<PlayerId, u8>,
    },
    EnvidoDeclined {
        declined_by: PlayerId,
        points: BTreeMap<PlayerId, u8>,
    },
    TrucoCall {
        call: TrucoCall,
        caller: PlayerId,
    },
    TrucoAccept {
        accepted_by: PlayerId,
        call: TrucoCall,
    },
    TrucoDecline {
        declined_by: PlayerId,
        call: TrucoCall,
    },
    ToDeck {
        player_id: PlayerId,
    },
    RoundResult {
        winner: PlayerId,
        points: BTreeMap<PlayerId, u8>,
    },
    Result {
        winner: PlayerId,
        points: BTreeMap<PlayerId, u8>,
    },
}
