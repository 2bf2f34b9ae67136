//! Literal end-to-end scenarios, each driving the aggregate through a
//! specific, named sequence of actions rather than a generated one.

use crate::cards::{Card, Rank, Suit};
use crate::game::envido::{answer_envido, call_envido};
use crate::game::lifecycle::{join, start};
use crate::game::play::{go_to_deck, throw_card};
use crate::game::state::{EnvidoCall, Game, TrucoCall};
use crate::game::truco::{answer_truco, call_truco};

fn two_player_game() -> Game {
    let game = join(&Game::new("alice", 1), 2).unwrap();
    start(&game).unwrap()
}

#[test]
fn happy_path_envido_called_and_declined() {
    let game = two_player_game();
    let caller = game.state.first_player;
    let opponent = if caller == 1 { 2 } else { 1 };

    let called = call_envido(&game, caller, EnvidoCall::Envido).unwrap();
    assert!(called.state.envido.waiting_response);

    let declined = answer_envido(&called, opponent, false).unwrap();
    assert!(!declined.state.envido.waiting_response);
    assert_eq!(declined.state.points[&caller], 1);
    assert_eq!(declined.state.points[&opponent], 0);
}

#[test]
fn envido_escalation_chain_is_accepted_and_resolved_by_hand_value() {
    let mut game = two_player_game();
    let [p1, p2] = game.player_pair().unwrap();
    let caller = game.state.first_player;
    let opponent = if caller == p1 { p2 } else { p1 };

    // Rig the hands so the outcome is unambiguous: p1 holds a 28-point
    // envido (7 and Ace of the same suit), p2 holds nothing better than
    // a single face card (worth 0).
    game.state.cards.insert(
        p1,
        vec![
            Card { suit: Suit::Swords, rank: Rank::Seven },
            Card { suit: Suit::Swords, rank: Rank::Ace },
            Card { suit: Suit::Coins, rank: Rank::Four },
        ],
    );
    game.state.cards.insert(
        p2,
        vec![
            Card { suit: Suit::Cups, rank: Rank::Eleven },
            Card { suit: Suit::Clubs, rank: Rank::Twelve },
            Card { suit: Suit::Coins, rank: Rank::Ten },
        ],
    );

    let called = call_envido(&game, caller, EnvidoCall::Envido).unwrap();
    let escalated = call_envido(&called, opponent, EnvidoCall::RealEnvido).unwrap();
    assert_eq!(escalated.state.envido.last_caller, Some(opponent));

    let accepted = answer_envido(&escalated, caller, true).unwrap();
    assert_eq!(accepted.state.envido.winner, Some(p1));
    assert_eq!(accepted.state.points[&p1], 5); // Envido (2) + RealEnvido (3)
}

#[test]
fn falta_envido_stake_is_set_by_the_losers_points_at_resolution() {
    // The spec's literal scenario: scores 14-10, mano (14) calls falta
    // envido, the opponent accepts and wins it. The stake is fixed by
    // whoever loses the envido, not by whoever is ahead on the scoreboard:
    // here the loser is the mano, so the award is 2*15 - 14 = 16 points.
    let mut game = two_player_game();
    let [p1, p2] = game.player_pair().unwrap();
    let mano = game.state.first_player;
    let opponent = if mano == p1 { p2 } else { p1 };
    game.state.points.insert(mano, 14);
    game.state.points.insert(opponent, 10);
    // Force the opponent's hand to out-envido the mano's so the mano is
    // the one who loses the falta envido, matching the scenario exactly.
    let mano_cards = game.state.cards[&mano].clone();
    let opponent_cards = game.state.cards[&opponent].clone();
    if crate::cards::envido_value(&opponent_cards) <= crate::cards::envido_value(&mano_cards) {
        game.state.cards.insert(mano, opponent_cards.clone());
        game.state.cards.insert(opponent, mano_cards.clone());
    }

    let called = call_envido(&game, mano, EnvidoCall::FaltaEnvido).unwrap();
    let accepted = answer_envido(&called, opponent, true).unwrap();

    assert_eq!(accepted.state.envido.winner, Some(opponent));
    assert_eq!(accepted.state.points[&opponent], 10 + 16);
}

#[test]
fn truco_escalated_to_retruco_then_declined_awards_the_accepted_level() {
    let game = two_player_game();
    let caller = game.state.first_player;
    let opponent = if caller == 1 { 2 } else { 1 };

    let called = call_truco(&game, caller, TrucoCall::Truco).unwrap();
    let mut accepted = answer_truco(&called, opponent, true).unwrap();
    assert_eq!(accepted.state.truco_points, 2);
    assert_eq!(accepted.state.player_turn, caller);

    // Accepting hands the turn back to the original caller; simulate it
    // later becoming the opponent's turn again (e.g. after a card throw)
    // before they escalate to retruco.
    accepted.state.player_turn = opponent;
    let escalated = call_truco(&accepted, opponent, TrucoCall::Retruco).unwrap();
    let declined = answer_truco(&escalated, caller, false).unwrap();

    // Retruco was never accepted, so the round is worth the last
    // accepted level: plain truco, two points, to whoever declined it.
    assert_eq!(declined.state.points[&opponent], 2);
}

#[test]
fn match_ends_once_a_player_reaches_the_regulation_target() {
    let mut game = two_player_game();
    let [p1, p2] = game.player_pair().unwrap();
    game.state.points.insert(p1, 14);
    game.state.points.insert(p2, 0);

    // Give p1 the two strongest cards in the deck so it wins both of
    // the first two tricks outright, deciding the round before a third
    // trick is needed.
    let one_swords = Card { suit: Suit::Swords, rank: Rank::Ace };
    let one_clubs = Card { suit: Suit::Clubs, rank: Rank::Ace };
    let four_coins = Card { suit: Suit::Coins, rank: Rank::Four };
    let four_cups = Card { suit: Suit::Cups, rank: Rank::Four };
    game.state.cards.insert(p1, vec![one_swords, one_clubs]);
    game.state.cards.insert(p2, vec![four_coins, four_cups]);
    game.state.player_turn = p1;

    let g = throw_card(&game, p1, one_swords).unwrap();
    let g = throw_card(&g, p2, four_coins).unwrap();
    let g = throw_card(&g, p1, one_clubs).unwrap();
    let g = throw_card(&g, p2, four_cups).unwrap();

    assert_eq!(g.state.winner, Some(p1));
    assert_eq!(g.state.points[&p1], 15);

    // Scenario 5: further actions on a finished match error with
    // GameFinished, not silently succeed or report the wrong cause.
    assert!(matches!(
        call_envido(&g, g.state.player_turn, EnvidoCall::Envido),
        Err(crate::errors::DomainError::GameFinished)
    ));
    assert!(matches!(
        call_truco(&g, g.state.player_turn, TrucoCall::Truco),
        Err(crate::errors::DomainError::GameFinished)
    ));
}

#[test]
fn going_to_the_deck_mid_round_concedes_it_to_the_opponent() {
    let game = two_player_game();
    let who = game.state.player_turn;
    let [p1, p2] = game.player_pair().unwrap();
    let opponent = if who == p1 { p2 } else { p1 };

    let after = go_to_deck(&game, who).unwrap();
    assert_eq!(after.state.points[&opponent], 1);
    assert_eq!(after.state.round, 2);
}
