//! Game server bot
//!
//! Reads the board once from stdin, then for every turn reads the state, runs the
//! Monte Carlo search and prints exactly one action. Diagnostics go to stderr through
//! `RUST_LOG`.

use std::io::{self, Write};
use std::sync::Arc;
use std::time::Instant;

use canopy_mc::{
    protocol::{read_board, InputReader, TurnUpdate},
    GameState, MonteCarloSearch, PlayerId, SearchConfig,
};
use log::{debug, error};

fn main() {
    // Initialize logging
    env_logger::init();

    if let Err(err) = run() {
        error!("decision aborted: {}", err);
        std::process::exit(1);
    }
}

fn run() -> canopy_mc::Result<()> {
    let stdin = io::stdin();
    let mut input = InputReader::new(stdin.lock());

    let board = Arc::new(read_board(&mut input)?);
    let mut state = GameState::new(board);
    let mut search = MonteCarloSearch::new(SearchConfig::default());

    let mut round = 0;
    while !input.is_exhausted() {
        let turn = TurnUpdate::read(&mut input)?;
        let started = Instant::now();
        turn.apply_to(&mut state, round)?;
        debug!("\n{}", state);

        let candidates = search.generator().generate(&state, PlayerId::Me);
        if candidates.len() != turn.server_actions.len() {
            debug!(
                "generator offers {} actions, server lists {}",
                candidates.len(),
                turn.server_actions.len()
            );
        }

        let action = search.search_since(&state, &candidates, started)?;
        state.player_mut(PlayerId::Me).last_action = action;

        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", action)?;
        stdout.flush()?;
        round += 1;
    }

    Ok(())
}
