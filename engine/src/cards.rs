//! The 40-card Spanish deck used by Truco, and the two scalar functions
//! derived from it: the trick-taking rank (`card_truco_value`) and the
//! envido score of a set of cards (`envido_value`).

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::DomainError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Suit {
    Clubs,
    Coins,
    Cups,
    Swords,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Rank {
    Four,
    Five,
    Six,
    Seven,
    Ten,
    Eleven,
    Twelve,
    Ace,
    Two,
    Three,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

// Note: Ord/Eq on Card is only for stable sorting (suit order, then the
// declaration order of Rank above). Do not use for trick resolution or
// envido comparisons — those go through card_truco_value/envido_value.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        match self.suit.cmp(&other.suit) {
            std::cmp::Ordering::Equal => self.rank.cmp(&other.rank),
            ord => ord,
        }
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&card_to_token(*self))
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_card_str(&s).map_err(|e| serde::de::Error::custom(e.to_string()))
    }
}

fn card_to_token(card: Card) -> String {
    let rank_str = match card.rank {
        Rank::Ace => "1",
        Rank::Two => "2",
        Rank::Three => "3",
        Rank::Four => "4",
        Rank::Five => "5",
        Rank::Six => "6",
        Rank::Seven => "7",
        Rank::Ten => "10",
        Rank::Eleven => "11",
        Rank::Twelve => "12",
    };
    let suit_char = match card.suit {
        Suit::Swords => 'E',
        Suit::Clubs => 'B',
        Suit::Cups => 'C',
        Suit::Coins => 'O',
    };
    format!("{rank_str}{suit_char}")
}

fn parse_card_str(s: &str) -> Result<Card, DomainError> {
    if s.len() < 2 || s.len() > 3 {
        return Err(DomainError::ParseCard(s.to_string()));
    }
    let (rank_part, suit_part) = s.split_at(s.len() - 1);
    let rank = match rank_part {
        "1" => Rank::Ace,
        "2" => Rank::Two,
        "3" => Rank::Three,
        "4" => Rank::Four,
        "5" => Rank::Five,
        "6" => Rank::Six,
        "7" => Rank::Seven,
        "10" => Rank::Ten,
        "11" => Rank::Eleven,
        "12" => Rank::Twelve,
        _ => return Err(DomainError::ParseCard(s.to_string())),
    };
    let suit = match suit_part {
        "E" => Suit::Swords,
        "B" => Suit::Clubs,
        "C" => Suit::Cups,
        "O" => Suit::Coins,
        _ => return Err(DomainError::ParseCard(s.to_string())),
    };
    Ok(Card { suit, rank })
}

/// Truco trick-taking rank: higher wins. Ties are legal and mean the
/// trick is parda (drawn). Mirrors the traditional hierarchy:
/// 1E > 1B > 7E > 7O > 3s > 2s > (1C = 1O) > 12s > 11s > 10s > (7C = 7B) > 6s > 5s > 4s.
pub fn card_truco_value(card: Card) -> u8 {
    use Rank::*;
    use Suit::*;
    match (card.rank, card.suit) {
        (Ace, Swords) => 14,
        (Ace, Clubs) => 13,
        (Seven, Swords) => 12,
        (Seven, Coins) => 11,
        (Three, _) => 10,
        (Two, _) => 9,
        (Ace, Cups) | (Ace, Coins) => 8,
        (Twelve, _) => 7,
        (Eleven, _) => 6,
        (Ten, _) => 5,
        (Seven, Cups) | (Seven, Clubs) => 4,
        (Six, _) => 3,
        (Five, _) => 2,
        (Four, _) => 1,
    }
}

/// Envido rank of a single card: numbered cards (1-7) count as their face
/// value, face cards (10, 11, 12) count as 0.
fn envido_rank(rank: Rank) -> u8 {
    use Rank::*;
    match rank {
        Ace => 1,
        Two => 2,
        Three => 3,
        Four => 4,
        Five => 5,
        Six => 6,
        Seven => 7,
        Ten | Eleven | Twelve => 0,
    }
}

/// Envido value of an arbitrary set of a player's cards (their own held
/// and already-thrown cards, at most 3 for a single player in this game).
/// Stable under permutation of `cards`.
///
/// If two or more cards share a suit, the value is 20 plus the sum of the
/// two highest envido ranks among cards of that suit (the best suit is
/// chosen if more than one suit repeats). Otherwise it is the highest
/// single envido rank among all the cards.
pub fn envido_value(cards: &[Card]) -> u8 {
    use Suit::*;
    let suits = [Swords, Clubs, Cups, Coins];
    let mut best_pair: Option<u8> = None;
    for suit in suits {
        let mut ranks: Vec<u8> = cards
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| envido_rank(c.rank))
            .collect();
        if ranks.len() < 2 {
            continue;
        }
        ranks.sort_unstable_by(|a, b| b.cmp(a));
        let pair_value = 20 + ranks[0] + ranks[1];
        best_pair = Some(best_pair.map_or(pair_value, |best| best.max(pair_value)));
    }
    if let Some(best) = best_pair {
        return best;
    }
    cards.iter().map(|c| envido_rank(c.rank)).max().unwrap_or(0)
}

pub fn hand_has_card(hand: &[Card], card: Card) -> bool {
    hand.contains(&card)
}

#[cfg(test)]
pub(crate) fn parse_cards(tokens: &[&str]) -> Vec<Card> {
    tokens
        .iter()
        .map(|s| parse_card_str(s).expect("valid card token"))
        .collect()
}
