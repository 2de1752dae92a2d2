//! Decision sources and game drivers.
//!
//! A `Player` receives the state and the legal action set and returns one
//! action from that set. Two are provided:
//!
//! - `RandomPlayer`: uniform choice
//! - `RolloutPlayer`: flat Monte Carlo over redeterminized copies
//!
//! `play_game` drives a full game through the Forward Model;
//! `random_playout` is the rollout policy search players build on.

pub mod budget;
pub mod random;
pub mod rollout;
pub mod stats;

pub use budget::SearchBudget;
pub use random::RandomPlayer;
pub use rollout::RolloutPlayer;
pub use stats::SearchStats;

use crate::core::error::{EngineError, EngineResult};
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::forward::ForwardModel;
use crate::rules::{GameResult, Rules};

/// Source of decisions for one seat.
pub trait Player<R: Rules> {
    fn name(&self) -> &str;

    /// Choose one action from `legal`, which is never empty.
    fn decide(&mut self, model: &ForwardModel<R>, state: &GameState<R>, legal: &[R::Action]) -> R::Action;
}

/// Outcome of a bounded random playout.
#[derive(Clone, Debug, PartialEq)]
pub struct Playout {
    /// `None` when the cycle limit was hit first.
    pub result: Option<GameResult>,
    /// Forward Model cycles run.
    pub cycles: u32,
}

/// Play uniformly random legal actions until the game ends or
/// `max_cycles` cycles have run.
pub fn random_playout<R: Rules>(
    model: &ForwardModel<R>,
    state: &mut GameState<R>,
    rng: &mut GameRng,
    max_cycles: u32,
) -> EngineResult<Playout> {
    let mut cycles = 0;
    while !state.is_game_over() && cycles < max_cycles {
        let legal = model.compute_available_actions(state);
        if legal.is_empty() {
            return Err(EngineError::NoLegalActions {
                player: state.current_player(),
            });
        }
        let action = RandomPlayer::pick(rng, &legal);
        model.next(state, action)?;
        cycles += 1;
    }
    Ok(Playout {
        result: state.result().cloned(),
        cycles,
    })
}

/// Drive a game with one player per seat until it ends or `max_cycles`
/// cycles have run. Returns the result, if the game ended.
pub fn play_game<R: Rules>(
    model: &ForwardModel<R>,
    state: &mut GameState<R>,
    players: &mut [Box<dyn Player<R>>],
    max_cycles: u32,
) -> EngineResult<Option<GameResult>> {
    assert_eq!(
        players.len(),
        state.player_count(),
        "One player per seat required"
    );

    for _ in 0..max_cycles {
        if state.is_game_over() {
            break;
        }
        let seat = state.current_player();
        let legal = model.compute_available_actions(state);
        if legal.is_empty() {
            return Err(EngineError::NoLegalActions { player: seat });
        }
        let action = players[seat.index()].decide(model, state, &legal);
        model.next(state, action)?;
    }

    if let Some(result) = state.result() {
        tracing::debug!(?result, ticks = state.tick(), "game finished");
    }
    Ok(state.result().cloned())
}
