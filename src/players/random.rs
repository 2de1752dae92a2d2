//! Uniform random player.

use super::Player;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::forward::ForwardModel;
use crate::rules::Rules;

/// Picks uniformly among the legal actions.
#[derive(Clone, Debug)]
pub struct RandomPlayer {
    rng: GameRng,
}

impl RandomPlayer {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
        }
    }

    /// Uniform pick. `legal` must not be empty.
    pub(crate) fn pick<A: Clone>(rng: &mut GameRng, legal: &[A]) -> A {
        legal[rng.gen_index(legal.len())].clone()
    }
}

impl<R: Rules> Player<R> for RandomPlayer {
    fn name(&self) -> &str {
        "random"
    }

    fn decide(&mut self, _model: &ForwardModel<R>, _state: &GameState<R>, legal: &[R::Action]) -> R::Action {
        Self::pick(&mut self.rng, legal)
    }
}
