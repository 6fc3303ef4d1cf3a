use std::sync::Arc;

use canopy_mc::{
    board::hexagon_layout, evaluate, Action, ActionGenerator, ActionKind, Board, GameState,
    PlayerId, RulesConfig, Tree,
};

fn standard_state() -> GameState {
    GameState::new(Arc::new(Board::standard()))
}

fn setup(state: &mut GameState, trees: &[(usize, PlayerId, u8)], sun: u32, day: u32) {
    for &(cell, owner, size) in trees {
        state.plant(Tree::new(cell, owner, size)).unwrap();
    }
    state.player_mut(PlayerId::Me).sun = sun;
    state.day = day;
    state.update_shadows();
}

fn generate(state: &GameState) -> Vec<Action> {
    ActionGenerator::default().generate(state, PlayerId::Me)
}

fn count(actions: &[Action], pred: impl Fn(&ActionKind) -> bool) -> usize {
    actions.iter().filter(|a| pred(&a.kind)).count()
}

fn is_seed(kind: &ActionKind) -> bool {
    matches!(kind, ActionKind::Seed { .. })
}

fn is_complete(kind: &ActionKind) -> bool {
    matches!(kind, ActionKind::Complete { .. })
}

fn has(actions: &[Action], kind: ActionKind) -> bool {
    actions.iter().any(|a| a.kind == kind)
}

fn seed_sources(actions: &[Action]) -> Vec<usize> {
    let mut sources: Vec<usize> = actions
        .iter()
        .filter_map(|a| match a.kind {
            ActionKind::Seed { source, .. } => Some(source),
            _ => None,
        })
        .collect();
    sources.dedup();
    sources
}

#[test]
fn test_seed_needs_distance_two() {
    // Seven cells: every cell touches the center, so a size 2 tree there has nowhere to seed
    let specs = hexagon_layout(1)
        .into_iter()
        .map(|mut spec| {
            spec.richness = 2;
            spec
        })
        .collect();
    let board = Board::from_cells(specs).unwrap();
    let mut state = GameState::new(Arc::new(board));
    setup(&mut state, &[(0, PlayerId::Me, 2)], 0, 0);

    let actions = generate(&state);
    assert_eq!(actions, vec![Action::wait()], "only WAIT should be offered");
}

#[test]
fn test_wait_always_first() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 1), (19, PlayerId::Me, 2)], 50, 3);

    let actions = generate(&state);
    assert!(actions.len() > 1);
    assert_eq!(actions[0], Action::wait());
    assert_eq!(count(&actions, |k| *k == ActionKind::Wait), 1);
}

#[test]
fn test_waiting_player_only_waits() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 1)], 50, 0);
    state.player_mut(PlayerId::Me).waiting = true;

    assert_eq!(generate(&state), vec![Action::wait()]);
}

#[test]
fn test_dormant_and_foreign_trees_ignored() {
    let mut state = standard_state();
    state
        .plant(Tree::new(0, PlayerId::Me, 2).with_dormant(true))
        .unwrap();
    setup(&mut state, &[(19, PlayerId::Opponent, 2)], 50, 0);

    assert_eq!(generate(&state), vec![Action::wait()]);
}

#[test]
fn test_seed_targets_are_legal() {
    let specs = hexagon_layout(3)
        .into_iter()
        .map(|mut spec| {
            if spec.index == 7 {
                spec.richness = 0;
            }
            spec
        })
        .collect();
    let board = Board::from_cells(specs).unwrap();
    let mut state = GameState::new(Arc::new(board));
    setup(
        &mut state,
        &[(0, PlayerId::Me, 3), (9, PlayerId::Opponent, 1)],
        0,
        0,
    );

    let actions = generate(&state);
    // Rings 2 and 3 minus the unusable cell 7 and the occupied cell 9
    assert_eq!(count(&actions, is_seed), 28);

    for action in &actions {
        if let ActionKind::Seed { source, target } = action.kind {
            let distance = state.board().distance(source, target);
            assert_eq!(source, 0);
            assert!((2..=3).contains(&distance), "seed at distance {}", distance);
            assert!(!state.is_occupied(target));
            assert!(state.board().richness(target) > 0);
            assert_eq!(action.cost, 0);
        }
    }
}

#[test]
fn test_seed_range_follows_size() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 2)], 6, 0);

    let actions = generate(&state);
    assert_eq!(count(&actions, is_seed), 12, "size 2 reaches ring 2 only");
}

#[test]
fn test_seed_cost_and_cutoff() {
    let trees = [(0, PlayerId::Me, 2), (19, PlayerId::Me, 0)];

    let mut state = standard_state();
    setup(&mut state, &trees, 1, 19);
    let actions = generate(&state);
    assert!(count(&actions, is_seed) > 0);
    assert!(actions
        .iter()
        .filter(|a| is_seed(&a.kind))
        .all(|a| a.cost == 1));

    let mut state = standard_state();
    setup(&mut state, &trees, 1, 20);
    assert_eq!(count(&generate(&state), is_seed), 0, "paid seeding stops on day 20");

    let mut state = standard_state();
    setup(&mut state, &trees, 0, 0);
    assert_eq!(count(&generate(&state), is_seed), 0, "seed unaffordable");
}

#[test]
fn test_free_seeds_after_cutoff() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 2)], 0, 22);
    assert_eq!(count(&generate(&state), is_seed), 12);
}

#[test]
fn test_grow_cost_escalates() {
    let mut state = standard_state();
    setup(
        &mut state,
        &[
            (0, PlayerId::Me, 1),
            (19, PlayerId::Me, 2),
            (22, PlayerId::Me, 2),
        ],
        5,
        0,
    );

    let grow = generate(&state)
        .into_iter()
        .find(|a| a.kind == ActionKind::Grow { cell: 0 })
        .expect("GROW 0 should be affordable");
    assert_eq!(grow.cost, 3 + 2);

    state.player_mut(PlayerId::Me).sun = 4;
    assert!(!has(&generate(&state), ActionKind::Grow { cell: 0 }));
}

#[test]
fn test_grow_suppresses_seeding() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 2)], 7, 0);
    let actions = generate(&state);
    assert_eq!(actions.len(), 2);
    assert!(has(&actions, ActionKind::Grow { cell: 0 }));

    state.player_mut(PlayerId::Me).sun = 6;
    let actions = generate(&state);
    assert!(!has(&actions, ActionKind::Grow { cell: 0 }));
    assert_eq!(count(&actions, is_seed), 12);
}

#[test]
fn test_grow_caps() {
    let mut state = standard_state();
    setup(
        &mut state,
        &[
            (0, PlayerId::Me, 0),
            (19, PlayerId::Me, 1),
            (22, PlayerId::Me, 1),
            (25, PlayerId::Me, 1),
        ],
        100,
        0,
    );
    let actions = generate(&state);
    assert!(!has(&actions, ActionKind::Grow { cell: 0 }), "three size 1 trees keep seeds from growing");
    assert!(has(&actions, ActionKind::Grow { cell: 19 }));

    let mut state = standard_state();
    setup(
        &mut state,
        &[
            (0, PlayerId::Me, 1),
            (19, PlayerId::Me, 2),
            (22, PlayerId::Me, 2),
            (25, PlayerId::Me, 2),
            (28, PlayerId::Me, 2),
        ],
        100,
        0,
    );
    assert!(
        !has(&generate(&state), ActionKind::Grow { cell: 0 }),
        "four size 2 trees block smaller trees"
    );
}

#[test]
fn test_grow_day_cutoffs() {
    let trees = [
        (0, PlayerId::Me, 2),
        (19, PlayerId::Me, 1),
        (22, PlayerId::Me, 0),
    ];

    let mut state = standard_state();
    setup(&mut state, &trees, 100, 23);
    let actions = generate(&state);
    assert!(has(&actions, ActionKind::Grow { cell: 0 }));
    assert!(!has(&actions, ActionKind::Grow { cell: 19 }));
    assert!(!has(&actions, ActionKind::Grow { cell: 22 }));

    let mut state = standard_state();
    setup(&mut state, &trees, 100, 22);
    let actions = generate(&state);
    assert!(has(&actions, ActionKind::Grow { cell: 19 }));
    assert!(!has(&actions, ActionKind::Grow { cell: 22 }));

    let mut state = standard_state();
    setup(&mut state, &trees, 100, 21);
    assert!(has(&generate(&state), ActionKind::Grow { cell: 22 }));
}

#[test]
fn test_complete_minimum_by_day() {
    let five: Vec<_> = [0, 19, 22, 25, 28]
        .iter()
        .map(|&cell| (cell, PlayerId::Me, 3))
        .collect();
    let mut state = standard_state();
    setup(&mut state, &five, 4, 5);
    assert_eq!(count(&generate(&state), is_complete), 0, "six trees needed before day 12");

    let mut six = five.clone();
    six.push((31, PlayerId::Me, 3));
    let mut state = standard_state();
    setup(&mut state, &six, 4, 5);
    assert_eq!(count(&generate(&state), is_complete), 6);

    let mut state = standard_state();
    setup(&mut state, &five[..4], 4, 12);
    assert_eq!(count(&generate(&state), is_complete), 4);

    let mut state = standard_state();
    setup(&mut state, &five[..3], 4, 12);
    assert_eq!(count(&generate(&state), is_complete), 0);

    let mut state = standard_state();
    setup(&mut state, &five[..1], 4, 21);
    assert_eq!(count(&generate(&state), is_complete), 1);
}

#[test]
fn test_complete_suppresses_seeding() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 3)], 4, 22);
    let actions = generate(&state);
    assert_eq!(
        actions.iter().map(|a| a.kind).collect::<Vec<_>>(),
        vec![ActionKind::Wait, ActionKind::Complete { cell: 0 }]
    );
    assert_eq!(actions[1].cost, 4);

    // Without the sun to harvest, the same tree seeds rings 2 and 3
    state.player_mut(PlayerId::Me).sun = 3;
    let actions = generate(&state);
    assert_eq!(actions.len(), 1 + 30);
}

#[test]
fn test_first_available_seed_only() {
    let trees = [(0, PlayerId::Me, 2), (19, PlayerId::Me, 2)];
    let mut state = standard_state();
    setup(&mut state, &trees, 0, 0);

    assert_eq!(seed_sources(&generate(&state)), vec![0, 19]);

    let rules = RulesConfig::default().with_first_available_seed_only(true);
    let actions = ActionGenerator::new(rules).generate(&state, PlayerId::Me);
    assert_eq!(seed_sources(&actions), vec![0]);
}

#[test]
fn test_seed_only_if_free() {
    let trees = [(0, PlayerId::Me, 2), (19, PlayerId::Me, 0)];
    let mut state = standard_state();
    setup(&mut state, &trees, 5, 0);
    assert!(count(&generate(&state), is_seed) > 0);

    let rules = RulesConfig::default().with_seed_only_if_free(true);
    let actions = ActionGenerator::new(rules).generate(&state, PlayerId::Me);
    assert_eq!(count(&actions, is_seed), 0);
}

#[test]
fn test_actions_carry_evaluator_values() {
    let mut state = standard_state();
    setup(
        &mut state,
        &[(0, PlayerId::Me, 2), (20, PlayerId::Me, 1), (28, PlayerId::Opponent, 1)],
        20,
        4,
    );

    for action in generate(&state) {
        assert_eq!(
            action.value,
            evaluate(&state, PlayerId::Me, &action.kind),
            "value of {} differs from the evaluator",
            action
        );
    }
}

#[test]
fn test_generation_for_opponent() {
    let mut state = standard_state();
    setup(&mut state, &[(0, PlayerId::Me, 2)], 0, 0);
    state.plant(Tree::new(19, PlayerId::Opponent, 1)).unwrap();
    state.player_mut(PlayerId::Opponent).sun = 3;

    let actions = ActionGenerator::default().generate(&state, PlayerId::Opponent);
    assert_eq!(
        actions.iter().map(|a| a.kind).collect::<Vec<_>>(),
        vec![ActionKind::Wait, ActionKind::Grow { cell: 19 }]
    );
}
