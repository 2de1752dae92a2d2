//! Player tests: random and rollout decision makers, and the game driver.

use tabletop_engine::containers::Position;
use tabletop_engine::core::{GameState, PlayerId};
use tabletop_engine::forward::ForwardModel;
use tabletop_engine::games::kittens::{hand, CardKind, Kittens, KittensAction, KittensBuilder};
use tabletop_engine::players::{play_game, Player, RandomPlayer, RolloutPlayer, SearchBudget};

fn p(seat: u8) -> PlayerId {
    PlayerId::new(seat)
}

/// Two players, empty hands except an Attack for seat 0, and a draw pile
/// holding a single Bomb. Drawing loses; attacking wins.
fn bomb_on_top() -> (ForwardModel<Kittens>, GameState<Kittens>, KittensAction) {
    let (model, mut state) = KittensBuilder::new().build(13).unwrap();
    let layout = state.data().layout.clone();

    for seat in PlayerId::all(2) {
        for card in hand(&state, seat) {
            state
                .containers_mut()
                .move_component(card, layout.discard, Position::Top)
                .unwrap();
        }
    }
    for card in state.containers().contents(layout.draw_pile).unwrap() {
        state
            .containers_mut()
            .move_component(card, layout.discard, Position::Top)
            .unwrap();
    }

    let bomb = state
        .registry_mut()
        .register(CardKind::Bomb.component_type(), "Bomb", CardKind::Bomb);
    state
        .containers_mut()
        .place(bomb, layout.draw_pile, Position::Top)
        .unwrap();
    let card = state
        .registry_mut()
        .register(CardKind::Attack.component_type(), "Attack", CardKind::Attack);
    state
        .containers_mut()
        .place(card, layout.hands[p(0)], Position::Top)
        .unwrap();

    let attack = KittensAction::Attack {
        player: p(0),
        card,
        target: p(1),
    };
    (model, state, attack)
}

// =============================================================================
// Random player
// =============================================================================

#[test]
fn test_random_player_picks_legal_actions() {
    let (model, mut state) = KittensBuilder::new().player_count(3).build(2).unwrap();
    let mut player = RandomPlayer::new(5);

    for _ in 0..50 {
        if state.is_game_over() {
            break;
        }
        let legal = model.compute_available_actions(&state);
        let action = player.decide(&model, &state, &legal);
        assert!(legal.contains(&action));
        model.next(&mut state, action).unwrap();
    }
    assert_eq!(Player::<Kittens>::name(&player), "random");
}

// =============================================================================
// Rollout player
// =============================================================================

#[test]
fn test_rollout_scores_losing_and_winning_moves() {
    let (model, state, attack) = bomb_on_top();
    let legal = model.compute_available_actions(&state);
    assert_eq!(legal, vec![KittensAction::Draw { player: p(0) }, attack.clone()]);

    let mut player = RolloutPlayer::new(SearchBudget::default().with_rollouts(4).with_max_cycles(50));
    let scores = player.evaluate(&model, &state, &legal);

    assert_eq!(scores, vec![Some(0.0), Some(1.0)]);
    assert_eq!(player.stats().simulations, 8);
    assert_eq!(player.stats().failed_samples, 0);
}

#[test]
fn test_rollout_player_takes_the_winning_move() {
    let (model, state, attack) = bomb_on_top();
    let legal = model.compute_available_actions(&state);

    let mut player = RolloutPlayer::new(SearchBudget::default().with_rollouts(4));
    let action = player.decide(&model, &state, &legal);

    assert_eq!(action, attack);
    assert_eq!(player.stats().decisions, 1);
}

#[test]
fn test_threaded_evaluation_matches_candidates() {
    let (model, state, _) = bomb_on_top();
    let legal = model.compute_available_actions(&state);

    let mut player = RolloutPlayer::new(
        SearchBudget::default()
            .with_rollouts(3)
            .with_threads(2),
    );
    let scores = player.evaluate(&model, &state, &legal);

    assert_eq!(scores, vec![Some(0.0), Some(1.0)]);
    assert_eq!(player.stats().simulations, 6);
}

#[test]
fn test_rollout_never_touches_the_real_state() {
    let (model, state) = KittensBuilder::new().player_count(3).build(17).unwrap();
    let snapshot = state.copy();
    let legal = model.compute_available_actions(&state);

    let mut player = RolloutPlayer::new(SearchBudget::default().with_rollouts(2).with_max_cycles(40));
    let action = player.decide(&model, &state, &legal);

    assert!(legal.contains(&action));
    assert_eq!(state, snapshot);
}

#[test]
fn test_single_option_skips_search() {
    let (model, mut state, attack) = bomb_on_top();
    model.next(&mut state, attack).unwrap();
    let legal = model.compute_available_actions(&state);
    assert_eq!(legal, vec![KittensAction::Draw { player: p(1) }]);

    let mut player = RolloutPlayer::new(SearchBudget::default());
    let action = player.decide(&model, &state, &legal);

    assert_eq!(action, legal[0]);
    assert_eq!(player.stats().simulations, 0);
}

// =============================================================================
// Driver
// =============================================================================

#[test]
fn test_rollout_against_random_finishes() {
    let (model, mut state) = KittensBuilder::new().build(23).unwrap();
    let mut seats: Vec<Box<dyn Player<Kittens>>> = vec![
        Box::new(RolloutPlayer::new(
            SearchBudget::default().with_rollouts(2).with_max_cycles(60),
        )),
        Box::new(RandomPlayer::new(23)),
    ];

    let result = play_game(&model, &mut state, &mut seats, 10_000).unwrap();

    assert!(result.is_some());
    assert!(state.is_game_over());
}

#[test]
#[should_panic(expected = "One player per seat required")]
fn test_driver_needs_a_player_per_seat() {
    let (model, mut state) = KittensBuilder::new().player_count(3).build(1).unwrap();
    let mut seats: Vec<Box<dyn Player<Kittens>>> = vec![Box::new(RandomPlayer::new(1))];

    let _ = play_game(&model, &mut state, &mut seats, 10);
}
