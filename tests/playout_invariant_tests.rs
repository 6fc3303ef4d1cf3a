use std::collections::HashSet;
use std::sync::Arc;

use canopy_mc::{
    game_state::MAX_DAY, ActionGenerator, ActionKind, Board, GameResult, GameState, PlayerId,
    RandomPolicy, RolloutPolicy, Tree,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn opening_state() -> GameState {
    let mut state = GameState::new(Arc::new(Board::standard()));
    state.nutrients = 20;
    for cell in [20, 24] {
        state.plant(Tree::new(cell, PlayerId::Me, 1)).unwrap();
    }
    for cell in [29, 33] {
        state.plant(Tree::new(cell, PlayerId::Opponent, 1)).unwrap();
    }
    state.start_day();
    state
}

fn assert_consistent(state: &GameState) {
    let mut cells = HashSet::new();
    let mut counts = [[0u32; 4]; 2];
    for tree in state.trees() {
        assert!(tree.size <= 3, "tree on {} has size {}", tree.cell, tree.size);
        assert!(cells.insert(tree.cell), "two trees on cell {}", tree.cell);
        assert_eq!(state.tree_at(tree.cell), Some(tree));
        counts[tree.owner.index()][tree.size as usize] += 1;
    }
    for id in PlayerId::ALL {
        assert_eq!(
            state.player(id).trees_by_size,
            counts[id.index()],
            "histogram of {:?} out of sync",
            id
        );
    }
}

fn check_generated(state: &GameState, id: PlayerId, kind: &ActionKind) {
    let board = state.board();
    match *kind {
        ActionKind::Seed { source, target } => {
            let tree = state.tree_at(source).expect("seed source exists");
            let distance = board.distance(source, target);
            assert!(tree.size >= 2);
            assert!(distance >= 2 && distance <= tree.size);
            assert!(!state.is_occupied(target));
            assert!(board.richness(target) > 0);
        }
        ActionKind::Grow { cell } | ActionKind::Complete { cell } => {
            let tree = state.tree_at(cell).expect("acting tree exists");
            assert_eq!(tree.owner, id);
            assert!(!tree.dormant);
        }
        ActionKind::Wait => {}
    }
}

fn play_out(seed: u64) -> GameState {
    let mut rng = StdRng::seed_from_u64(seed);
    let generator = ActionGenerator::default();
    let policy = RandomPolicy::new();
    let mut state = opening_state();

    let mut rounds = 0;
    while state.result == GameResult::Unknown {
        rounds += 1;
        assert!(rounds < 10_000, "game did not terminate");

        let mut chosen = Vec::new();
        for id in PlayerId::ALL {
            let actions = generator.generate(&state, id);
            for action in &actions {
                check_generated(&state, id, &action.kind);
            }
            chosen.push((id, policy.choose(&actions, &mut rng)));
        }

        for (id, action) in chosen {
            let before = state.clone();
            state.apply_action(id, &action).unwrap();
            assert_consistent(&state);

            let player = before.player(id);
            let after = state.player(id);
            assert_eq!(after.sun, player.sun - action.cost);
            match action.kind {
                ActionKind::Complete { cell } => {
                    assert_eq!(after.trees_by_size[3], player.trees_by_size[3] - 1);
                    assert!(after.score >= player.score + before.nutrients);
                    assert!(!state.is_occupied(cell));
                    assert_eq!(state.nutrients, before.nutrients.saturating_sub(1));
                }
                ActionKind::Grow { cell } => {
                    let old = before.tree_at(cell).map(|t| t.size);
                    let new = state.tree_at(cell).map(|t| t.size);
                    assert_eq!(new, old.map(|s| s + 1));
                }
                _ => {}
            }
        }

        let day = state.day;
        let both_waiting = state.players.iter().all(|p| p.waiting);
        state.end_round();
        if both_waiting {
            assert_eq!(state.day, day + 1);
        } else {
            assert_eq!(state.day, day);
        }
        assert_consistent(&state);
    }

    state
}

#[test]
fn test_random_games_keep_invariants() {
    for seed in 0..12 {
        let state = play_out(seed);
        assert_eq!(state.day, MAX_DAY);
        assert!(state.is_terminal());
    }
}

#[test]
fn test_random_games_are_reproducible() {
    let a = play_out(5);
    let b = play_out(5);
    assert_eq!(a.result, b.result);
    assert_eq!(a.players, b.players);
}
