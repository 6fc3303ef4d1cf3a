//! Self-play example
//!
//! Two searchers play a full game on the standard board. The rules engine is the
//! referee: both chosen actions are applied each round, then the round is closed.
//! The second searcher decides on the mirrored state so it plays as `Me`.

use std::sync::Arc;
use std::time::{Duration, Instant};

use canopy_mc::{
    Action, Board, GameResult, GameState, GreedyPolicy, MonteCarloSearch, PlayerId,
    SearchConfig, Tree,
};

fn main() -> canopy_mc::Result<()> {
    // Initialize logging
    env_logger::init();

    println!("Monte Carlo Self-Play");
    println!("=====================");
    println!();

    let mut state = GameState::new(Arc::new(Board::standard()));
    state.nutrients = 20;
    for cell in [20, 24] {
        state.plant(Tree::new(cell, PlayerId::Me, 1))?;
    }
    // Point reflections of the first player's trees through the center
    for cell in [29, 33] {
        state.plant(Tree::new(cell, PlayerId::Opponent, 1))?;
    }
    state.start_day();

    let config = SearchConfig::default()
        .with_turn_budget(Duration::from_millis(20))
        .with_first_turn_budget(Duration::from_millis(100));

    let mut first = MonteCarloSearch::new(config.clone());
    // The second player keeps pushing its own best heuristic line
    let mut second = MonteCarloSearch::new(config).with_searcher_policy(GreedyPolicy::new());

    while state.result == GameResult::Unknown {
        let mine = if state.player(PlayerId::Me).waiting {
            Action::wait()
        } else {
            first.decide(&state, Instant::now())?
        };
        let theirs = if state.player(PlayerId::Opponent).waiting {
            Action::wait()
        } else {
            second.decide(&state.mirrored(), Instant::now())?
        };

        if !mine.is_wait() || !theirs.is_wait() {
            println!("day {:>2}: first {:<14} second {}", state.day, mine, theirs);
        }

        state.apply_action(PlayerId::Me, &mine)?;
        state.apply_action(PlayerId::Opponent, &theirs)?;
        state.end_round();
    }

    println!();
    println!("{}", state);
    match state.result {
        GameResult::Won => println!("First player wins"),
        GameResult::Lost => println!("Second player wins"),
        _ => println!("Draw"),
    }
    Ok(())
}
