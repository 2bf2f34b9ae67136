//! In-memory demo harness for the Truco engine.
//!
//! Drives one or more complete matches between two scripted-random
//! players, logging every emitted event. This is a test harness, not a
//! transport: there is no networking, persistence or authentication
//! here, just the pure engine driven end to end.

use clap::Parser;
use engine::game::play::in_envido_window;
use engine::game::{EnvidoCall, PlayerId, TrucoCall};
use engine::{Game, MatchConfig, MatchOrchestrator};
use rand::Rng;
use tracing::info;

#[derive(Parser)]
#[command(name = "truco-cli")]
#[command(about = "Simulate complete Truco matches against the engine")]
struct Args {
    /// Number of matches to simulate
    #[arg(short, long, default_value = "1")]
    matches: u32,

    /// Target score for each match (the regulation partida is 15)
    #[arg(long, default_value = "15")]
    max_points: u8,

    /// Enable verbose per-event logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let orchestrator = MatchOrchestrator;
    let config = MatchConfig { max_points: args.max_points };

    for match_no in 1..=args.matches {
        info!(match_no, "starting simulated match");
        let final_state = simulate_match(&orchestrator, config);
        let winner = final_state.state.winner.expect("simulation runs to completion");
        info!(
            match_no,
            winner,
            points = ?final_state.state.points,
            "match finished"
        );
    }
}

/// Play one match to completion against two players who act uniformly
/// at random among their legal moves.
fn simulate_match(orchestrator: &MatchOrchestrator, config: MatchConfig) -> Game {
    let mut game = Game::with_config("cli-demo", 1, config);
    game = orchestrator.join(&game, 2).expect("second player can join a fresh lobby");
    game = orchestrator.start(&game).expect("fresh two-player lobby can start");

    let mut rng = rand::rng();

    loop {
        if let Some(_winner) = game.state.winner {
            return game;
        }

        if game.state.truco.waiting_response {
            let who = game.state.other_player(
                &game.player_pair().expect("match in progress"),
                game.state.truco.caller.expect("a pending call has a caller"),
            );
            let accept = rng.random_bool(0.7);
            game = orchestrator
                .answer_truco(&game, who, accept)
                .expect("a pending truco call can always be answered");
            continue;
        }

        if game.state.envido.waiting_response {
            let who = game.state.other_player(
                &game.player_pair().expect("match in progress"),
                game.state.envido.last_caller.expect("a pending call has a caller"),
            );
            let accept = rng.random_bool(0.6);
            game = orchestrator
                .answer_envido(&game, who, accept)
                .expect("a pending envido call can always be answered");
            continue;
        }

        let who: PlayerId = game.state.player_turn;

        if in_envido_window(&game) && game.state.envido.calls.is_empty() && rng.random_bool(0.3) {
            game = orchestrator
                .call_envido(&game, who, EnvidoCall::Envido)
                .expect("envido is legal at the start of the hand");
            continue;
        }

        if game.state.truco.level.is_none() && rng.random_bool(0.15) {
            game = orchestrator
                .call_truco(&game, who, TrucoCall::Truco)
                .expect("truco is legal while no call is pending");
            continue;
        }

        let hand = game.state.cards[&who].clone();
        let card = *hand.first().expect("a player whose turn it is still holds a card");
        game = orchestrator
            .throw_card(&game, who, card)
            .expect("the current player's own card is always legal to throw");
    }
}
