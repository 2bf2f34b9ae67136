//! Property-based tests for system-wide consistency invariants.
//! These drive the aggregate through an arbitrary sequence of legal
//! actions and check invariants that must hold no matter which ones
//! were taken.

use proptest::prelude::*;

use crate::game::envido::{answer_envido, call_envido};
use crate::game::lifecycle::{join, start};
use crate::game::play::{in_envido_window, step, throw_card};
use crate::game::state::{EnvidoCall, Game, TrucoCall};
use crate::game::truco::{answer_truco, call_truco};
use crate::replay::replay;

/// Drive the game through at most `decisions.len()` legal actions,
/// picking each action deterministically from the next decision byte.
/// Stops early once the match has a winner.
fn drive(decisions: &[u8]) -> Vec<Game> {
    let mut trace = Vec::new();
    let game = join(&Game::new("alice", 1), 2).unwrap();
    let mut game = start(&game).unwrap();
    trace.push(game.clone());

    for &d in decisions {
        if game.state.winner.is_some() {
            break;
        }

        let next = if game.state.truco.waiting_response {
            let caller = game.state.truco.caller.unwrap();
            let players = game.player_pair().unwrap();
            let who = game.state.other_player(&players, caller);
            answer_truco(&game, who, d % 2 == 0)
        } else if game.state.envido.waiting_response {
            let caller = game.state.envido.last_caller.unwrap();
            let players = game.player_pair().unwrap();
            let who = game.state.other_player(&players, caller);
            answer_envido(&game, who, d % 3 != 0)
        } else {
            let who = game.state.player_turn;
            match d % 5 {
                0 if in_envido_window(&game) && game.state.envido.calls.is_empty() => {
                    call_envido(&game, who, EnvidoCall::Envido)
                }
                1 if game.state.truco.level.is_none() && !game.state.truco.waiting_response => {
                    call_truco(&game, who, TrucoCall::Truco)
                }
                _ => {
                    let hand = &game.state.cards[&who];
                    if hand.is_empty() {
                        Ok(game.clone())
                    } else {
                        let card = hand[d as usize % hand.len()];
                        throw_card(&game, who, card)
                    }
                }
            }
        };

        match next {
            Ok(g) => {
                game = g;
                trace.push(game.clone());
            }
            // An illegal action for the current decision byte: skip it,
            // the state is untouched.
            Err(_) => continue,
        }
    }

    trace
}

proptest! {
    #[test]
    fn hand_size_invariant_holds_at_every_step(decisions in prop::collection::vec(any::<u8>(), 1..60)) {
        for game in drive(&decisions) {
            let [p1, p2] = game.player_pair().unwrap();
            for p in [p1, p2] {
                let total = game.state.cards[&p].len() + game.state.thrown_cards[&p].len();
                prop_assert_eq!(total, 3, "player {} does not hold exactly 3 cards total", p);
            }
        }
    }

    #[test]
    fn event_log_never_shrinks(decisions in prop::collection::vec(any::<u8>(), 1..60)) {
        let trace = drive(&decisions);
        let mut prev_len = 0;
        for game in &trace {
            prop_assert!(game.events.len() >= prev_len);
            prev_len = game.events.len();
        }
    }

    #[test]
    fn step_is_always_one_of_three_tricks(decisions in prop::collection::vec(any::<u8>(), 1..60)) {
        for game in drive(&decisions) {
            let s = step(&game);
            prop_assert!((1..=3).contains(&s));
        }
    }

    #[test]
    fn envido_and_truco_never_wait_on_a_response_simultaneously(
        decisions in prop::collection::vec(any::<u8>(), 1..60)
    ) {
        for game in drive(&decisions) {
            prop_assert!(!(game.state.envido.waiting_response && game.state.truco.waiting_response));
        }
    }

    #[test]
    fn a_set_winner_has_reached_the_match_target(
        decisions in prop::collection::vec(any::<u8>(), 1..80)
    ) {
        for game in drive(&decisions) {
            if let Some(winner) = game.state.winner {
                prop_assert!(game.state.points[&winner] >= game.config.max_points);
            }
        }
    }

    #[test]
    fn replaying_the_event_log_reproduces_the_live_scoreboard(
        decisions in prop::collection::vec(any::<u8>(), 1..80)
    ) {
        let trace = drive(&decisions);
        let last = trace.last().unwrap();
        let replayed = replay(&last.events);
        prop_assert_eq!(replayed.points, last.state.points.clone());
        prop_assert_eq!(replayed.winner, last.state.winner);
    }
}
