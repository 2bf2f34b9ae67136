//! Card play: throwing a card, trick resolution, and round/match advance.

use std::collections::BTreeMap;

use crate::cards::{card_truco_value, hand_has_card, Card};
use crate::deal::deal_hands;
use crate::errors::DomainError;
use crate::events::GameEvent;

use super::envido::reset_envido;
use super::state::{Game, PlayerId, TrucoNegotiation};

/// Which trick of the round is currently being contested: 1, 2 or 3.
/// Derived from how many tricks both players have already completed.
pub fn step(game: &Game) -> u8 {
    let players = game.player_pair().expect("step requires two seated players");
    let completed = completed_tricks(game, players);
    (completed + 1).min(3) as u8
}

fn completed_tricks(game: &Game, players: [PlayerId; 2]) -> usize {
    let a = game.state.thrown_cards[&players[0]].len();
    let b = game.state.thrown_cards[&players[1]].len();
    a.min(b)
}

/// True while no card has yet been thrown in the first trick, the only
/// window in which envido may be called.
pub fn in_envido_window(game: &Game) -> bool {
    let players = match game.player_pair() {
        Some(p) => p,
        None => return false,
    };
    step(game) == 1
        && game.state.thrown_cards[&players[0]].is_empty()
        && game.state.thrown_cards[&players[1]].is_empty()
}

enum TrickOutcome {
    Won(PlayerId),
    Tied,
}

fn resolve_trick(a: (PlayerId, Card), b: (PlayerId, Card)) -> TrickOutcome {
    let va = card_truco_value(a.1);
    let vb = card_truco_value(b.1);
    if va > vb {
        TrickOutcome::Won(a.0)
    } else if vb > va {
        TrickOutcome::Won(b.0)
    } else {
        TrickOutcome::Tied
    }
}

/// Resolve every trick that both players have completed so far, in
/// order. Tricks not yet played (missing a card from either player)
/// are simply absent from the result.
fn trick_outcomes(game: &Game, players: [PlayerId; 2]) -> Vec<TrickOutcome> {
    let thrown_a = &game.state.thrown_cards[&players[0]];
    let thrown_b = &game.state.thrown_cards[&players[1]];
    let n = thrown_a.len().min(thrown_b.len());
    (0..n)
        .map(|i| resolve_trick((players[0], thrown_a[i]), (players[1], thrown_b[i])))
        .collect()
}

/// Decide the round winner from the tricks completed so far, per the
/// standard two-of-three rule with ties (*pardas*) resolved in favour
/// of the first decisive trick's winner, and the mano winning a round
/// that ties out completely. Returns `None` while the round is still
/// undecided.
pub fn round_winner(game: &Game) -> Option<PlayerId> {
    let players = game.player_pair()?;
    let outcomes = trick_outcomes(game, players);

    let mut wins: BTreeMap<PlayerId, u8> = BTreeMap::new();
    let mut first_decisive: Option<PlayerId> = None;
    for outcome in &outcomes {
        if let TrickOutcome::Won(p) = outcome {
            *wins.entry(*p).or_insert(0) += 1;
            if first_decisive.is_none() {
                first_decisive = Some(*p);
            }
        }
    }

    if let Some((&p, _)) = wins.iter().find(|(_, &c)| c >= 2) {
        return Some(p);
    }

    // A decisive first trick immediately followed by a tied second trick
    // already decides the round: the tie credits neither player, so the
    // side that hasn't won a trick yet can draw level at best but never
    // overtake with only the third trick left to contest.
    if let (Some(winner), Some(TrickOutcome::Won(first_winner)), Some(TrickOutcome::Tied)) =
        (first_decisive, outcomes.first(), outcomes.get(1))
    {
        if winner == *first_winner {
            return Some(winner);
        }
    }

    // No more tricks can be played (both hands exhausted): the round
    // must resolve now, by the same tie-break the third trick would
    // otherwise apply.
    let cards_left = game.state.cards[&players[0]]
        .len()
        .min(game.state.cards[&players[1]].len());
    if outcomes.len() < 3 && cards_left > 0 {
        return None;
    }

    first_decisive.or(Some(game.state.first_player))
}

/// Throw a card from `who`'s hand, advancing turn or resolving the
/// round/match as appropriate.
pub fn throw_card(game: &Game, who: PlayerId, card: Card) -> Result<Game, DomainError> {
    if !game.state.started {
        return Err(DomainError::GameNotStarted);
    }
    if game.state.winner.is_some() {
        return Err(DomainError::GameFinished);
    }
    if game.state.player_turn != who {
        return Err(DomainError::NotYourTurn);
    }
    if game.state.envido.waiting_response || game.state.truco.waiting_response {
        return Err(DomainError::WaitingResponse);
    }
    let players = game.player_pair().ok_or(DomainError::GameNotStarted)?;
    let hand = &game.state.cards[&who];
    if !hand_has_card(hand, card) {
        return Err(DomainError::InvalidCard);
    }

    let mut next = game.clone();
    let hand = next.state.cards.get_mut(&who).expect("seated player has a hand");
    let idx = hand.iter().position(|c| *c == card).expect("card presence checked above");
    hand.remove(idx);
    next.state.thrown_cards.get_mut(&who).expect("seated player").push(card);

    let other = next.state.other_player(&players, who);
    let next_turn = set_next_turn_player(&next, who, other);
    next.state.player_turn = next_turn;
    next.events.push(GameEvent::ThrowCard {
        player_id: who,
        card,
        next_player_id: next_turn,
    });

    with_round_winner_validation(next)
}

/// Who plays next once `who` has just thrown. While the trick `who` just
/// contributed to is still open (the other player hasn't matched it yet),
/// the other player must throw next. Once both have thrown the same
/// count, the trick is complete and its winner leads next; a tied
/// (*parda*) trick simply alternates the turn instead.
fn set_next_turn_player(game: &Game, who: PlayerId, other: PlayerId) -> PlayerId {
    let thrown_who = game.state.thrown_cards[&who].len();
    let thrown_other = game.state.thrown_cards[&other].len();
    if thrown_who != thrown_other {
        return other;
    }
    let idx = thrown_who - 1;
    let card_who = game.state.thrown_cards[&who][idx];
    let card_other = game.state.thrown_cards[&other][idx];
    match resolve_trick((who, card_who), (other, card_other)) {
        TrickOutcome::Won(winner) => winner,
        TrickOutcome::Tied => other,
    }
}

/// If the tricks played so far decide the round, award it and advance
/// the match; otherwise return the state unchanged.
pub fn with_round_winner_validation(game: Game) -> Result<Game, DomainError> {
    match round_winner(&game) {
        Some(winner) => Ok(set_round_winner(game, winner)),
        None => Ok(game),
    }
}

/// Award the round's points to `winner`, log the result, and roll into
/// the next round or the match's end.
pub fn set_round_winner(mut game: Game, winner: PlayerId) -> Game {
    let round_points = game.state.truco_points;
    let entry = game.state.points.entry(winner).or_insert(0);
    *entry = entry.saturating_add(round_points);

    game.events.push(GameEvent::RoundResult {
        winner,
        points: game.state.points.clone(),
    });

    with_next_round_or_win(game)
}

/// A player has gone to the deck (*se va al mazo*), conceding the round
/// to their opponent outright.
pub fn go_to_deck(game: &Game, who: PlayerId) -> Result<Game, DomainError> {
    if !game.state.started {
        return Err(DomainError::GameNotStarted);
    }
    if game.state.winner.is_some() {
        return Err(DomainError::GameFinished);
    }
    if game.state.player_turn != who {
        return Err(DomainError::NotYourTurn);
    }
    if game.state.envido.waiting_response || game.state.truco.waiting_response {
        return Err(DomainError::WaitingResponse);
    }
    let players = game.player_pair().ok_or(DomainError::GameNotStarted)?;
    let opponent = game.state.other_player(&players, who);

    let mut next = game.clone();
    next.events.push(GameEvent::ToDeck { player_id: who });
    Ok(set_round_winner(next, opponent))
}

/// Declare the match winner if `points` reached the configured target
/// (§4.10), emitting `RESULT`. Idempotent and safe to call from any
/// transition that just awarded points: returns the game unchanged if a
/// winner is already set or if neither player has reached the target yet.
pub(crate) fn with_winner_result(mut game: Game) -> Game {
    if game.state.winner.is_some() {
        return game;
    }
    let players = match game.player_pair() {
        Some(p) => p,
        None => return game,
    };
    let p1_points = *game.state.points.get(&players[0]).unwrap_or(&0);
    let p2_points = *game.state.points.get(&players[1]).unwrap_or(&0);
    let reached_target = p1_points >= game.config.max_points || p2_points >= game.config.max_points;
    if !reached_target {
        return game;
    }

    // The player with the higher score wins; ties go to the mano.
    let winner = if p1_points > p2_points {
        players[0]
    } else if p2_points > p1_points {
        players[1]
    } else {
        game.state.first_player
    };
    game.state.winner = Some(winner);
    game.events.push(GameEvent::Result {
        winner,
        points: game.state.points.clone(),
    });
    game
}

/// Declare the match winner if `points` reached the configured target,
/// otherwise deal a fresh round with the mano alternated.
fn with_next_round_or_win(game: Game) -> Game {
    let mut game = with_winner_result(game);
    if game.state.winner.is_some() {
        return game;
    }
    let players = game.player_pair().expect("match in progress has two players");

    let next_mano = game.state.other_player(&players, game.state.first_player);
    let (hand1, hand2) = deal_hands();
    let mut cards = BTreeMap::new();
    cards.insert(players[0], hand1);
    cards.insert(players[1], hand2);

    game.state.round += 1;
    game.state.first_player = next_mano;
    game.state.player_turn = next_mano;
    game.state.truco_points = 1;
    game.state.cards = cards.clone();
    game.state.thrown_cards.insert(players[0], Vec::new());
    game.state.thrown_cards.insert(players[1], Vec::new());
    game.state.envido = reset_envido();
    game.state.truco = TrucoNegotiation::default();

    game.events.push(GameEvent::NextRound {
        round: game.state.round,
        cards,
        next_player_id: next_mano,
    });

    game
}
