//! Non-deterministic shuffle and deal: the engine's only source of
//! randomness.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::cards::{Card, Rank, Suit};

fn full_deck() -> Vec<Card> {
    let suits = [Suit::Swords, Suit::Clubs, Suit::Cups, Suit::Coins];
    let ranks = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Ten,
        Rank::Eleven,
        Rank::Twelve,
    ];

    let mut deck = Vec::with_capacity(40);
    for suit in suits {
        for rank in ranks {
            deck.push(Card { suit, rank });
        }
    }
    deck
}

/// Deal two disjoint 3-card hands from a freshly shuffled 40-card deck.
/// Draws from the OS-backed thread-local RNG; consecutive calls are not
/// correlated and do not repeat sequences.
pub fn deal_hands() -> (Vec<Card>, Vec<Card>) {
    deal_hands_with(&mut rand::rng())
}

/// Same as `deal_hands`, but takes the RNG as a parameter so tests (and
/// any future persisted-seed feature) can drive the shuffle
/// deterministically instead of going through the OS RNG.
pub fn deal_hands_with<R: Rng + ?Sized>(rng: &mut R) -> (Vec<Card>, Vec<Card>) {
    let mut deck = full_deck();
    deck.shuffle(rng);
    let hand1 = deck[0..3].to_vec();
    let hand2 = deck[3..6].to_vec();
    (hand1, hand2)
}
