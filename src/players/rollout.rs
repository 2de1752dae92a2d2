//! Flat Monte Carlo player.
//!
//! Every legal action is scored by the mean reward of random playouts run
//! on redeterminized copies of the state: the deciding player's hidden
//! information is resampled for each playout, so the search never peeks at
//! cards it could not see.
//!
//! With `SearchBudget::threads > 1` the candidates are scored on a rayon
//! pool. Each candidate gets its own RNG fork and its own copies; the only
//! thing shared is the read-only model and root state.

use std::time::Instant;

use rayon::prelude::*;

use super::budget::SearchBudget;
use super::random::RandomPlayer;
use super::stats::SearchStats;
use super::{random_playout, Player};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;
use crate::core::state::GameState;
use crate::forward::ForwardModel;
use crate::rules::Rules;

/// Scores actions by random playouts and plays the best one.
#[derive(Clone, Debug)]
pub struct RolloutPlayer {
    budget: SearchBudget,
    rng: GameRng,
    stats: SearchStats,
}

impl RolloutPlayer {
    #[must_use]
    pub fn new(budget: SearchBudget) -> Self {
        let rng = GameRng::new(budget.seed);
        Self {
            budget,
            rng,
            stats: SearchStats::default(),
        }
    }

    #[must_use]
    pub fn budget(&self) -> &SearchBudget {
        &self.budget
    }

    /// Counters accumulated over every decision so far.
    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    /// Mean reward of each action for `me`. `None` where every sample failed
    /// or the budget ran out before the first one.
    pub fn evaluate<R>(
        &mut self,
        model: &ForwardModel<R>,
        state: &GameState<R>,
        legal: &[R::Action],
    ) -> Vec<Option<f64>>
    where
        R: Rules + Sync,
        R::Action: Send + Sync,
        GameState<R>: Send + Sync,
    {
        let me = state.current_player();
        let deadline = self.budget.time_limit.map(|limit| Instant::now() + limit);
        let threads = self.budget.threads.min(legal.len()).max(1);

        if threads == 1 {
            return self.evaluate_serially(model, state, me, legal, deadline);
        }

        let pool = match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => pool,
            Err(err) => {
                tracing::warn!(%err, "rollout pool unavailable, evaluating serially");
                return self.evaluate_serially(model, state, me, legal, deadline);
            }
        };

        // One stream per candidate, so the result does not depend on scheduling.
        let streams: Vec<GameRng> = legal.iter().map(|_| self.rng.fork()).collect();
        let budget = &self.budget;
        let scored: Vec<(Option<f64>, SearchStats)> = pool.install(|| {
            legal
                .par_iter()
                .zip(streams)
                .map(|(action, mut rng)| {
                    let mut stats = SearchStats::default();
                    let score = score_action(model, state, me, action, budget, deadline, &mut rng, &mut stats);
                    (score, stats)
                })
                .collect()
        });

        scored
            .into_iter()
            .map(|(score, stats)| {
                self.stats.merge(&stats);
                score
            })
            .collect()
    }

    fn evaluate_serially<R: Rules>(
        &mut self,
        model: &ForwardModel<R>,
        state: &GameState<R>,
        me: PlayerId,
        legal: &[R::Action],
        deadline: Option<Instant>,
    ) -> Vec<Option<f64>> {
        legal
            .iter()
            .map(|action| score_action(model, state, me, action, &self.budget, deadline, &mut self.rng, &mut self.stats))
            .collect()
    }
}

impl<R> Player<R> for RolloutPlayer
where
    R: Rules + Sync,
    R::Action: Send + Sync,
    GameState<R>: Send + Sync,
{
    fn name(&self) -> &str {
        "rollout"
    }

    fn decide(&mut self, model: &ForwardModel<R>, state: &GameState<R>, legal: &[R::Action]) -> R::Action {
        let start = Instant::now();
        self.stats.decisions += 1;

        if legal.len() == 1 {
            return legal[0].clone();
        }

        let scores = self.evaluate(model, state, legal);
        let best = scores
            .iter()
            .enumerate()
            .filter_map(|(i, score)| score.map(|s| (i, s)))
            .fold(None, |best: Option<(usize, f64)>, (i, s)| match best {
                Some((_, top)) if top >= s => best,
                _ => Some((i, s)),
            });

        self.stats.time_us += start.elapsed().as_micros() as u64;
        match best {
            Some((index, score)) => {
                tracing::trace!(player = %state.current_player(), index, score, "rollout choice");
                legal[index].clone()
            }
            None => {
                tracing::warn!("no rollout succeeded, picking at random");
                RandomPlayer::pick(&mut self.rng, legal)
            }
        }
    }
}

/// Mean reward of `action` for `me` over the budgeted number of playouts.
#[allow(clippy::too_many_arguments)]
fn score_action<R: Rules>(
    model: &ForwardModel<R>,
    state: &GameState<R>,
    me: PlayerId,
    action: &R::Action,
    budget: &SearchBudget,
    deadline: Option<Instant>,
    rng: &mut GameRng,
    stats: &mut SearchStats,
) -> Option<f64> {
    let mut total = 0.0;
    let mut samples = 0u32;

    for _ in 0..budget.rollouts_per_action {
        if deadline.is_some_and(|d| Instant::now() >= d) {
            break;
        }

        let mut sim = state.copy();
        *sim.rng_mut() = rng.fork();
        sim.redeterminize(me);

        if model.next(&mut sim, action.clone()).is_err() {
            stats.failed_samples += 1;
            continue;
        }
        match random_playout(model, &mut sim, rng, budget.max_cycles) {
            Ok(playout) => {
                total += playout.result.map_or(0.5, |result| result.reward(me));
                samples += 1;
                stats.simulations += 1;
                stats.cycles += u64::from(playout.cycles) + 1;
            }
            Err(_) => stats.failed_samples += 1,
        }
    }

    (samples > 0).then(|| total / f64::from(samples))
}
