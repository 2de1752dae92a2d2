//! The Forward Model: one decision in, one resolved step out.
//!
//! Each call to `next` runs a single cycle:
//!
//! 1. Reject the action unless it is in the legal set for the current decider
//! 2. Record it in the history
//! 3. Inside a reaction window, resolve it as a response
//! 4. Otherwise let the active frame see it, then stage and open a window
//!    (contestable actions) or execute it
//! 5. Install, keep or retire the extended-sequence frame
//! 6. With no frame and no window left, end the turn
//! 7. Check for the end of the game
//!
//! Nothing is retried: an error aborts the cycle and is handed back to the
//! caller, who should abandon the state.

use rustc_hash::FxHashSet;
use tracing::{debug, error, trace};

use crate::actions::{Capability, ExtendedSequence, GameAction, ReactionWindow, Resolution};
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::{GameResult, Rules};

/// What the state is waiting for after a cycle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Step {
    /// The outer turn passed to `next`.
    TurnEnded { next: PlayerId },
    /// An extended sequence needs another decision from `decider`.
    SequenceInProgress { decider: PlayerId },
    /// A reaction window is waiting on `responder`.
    AwaitingResponse { responder: PlayerId },
    /// The game ended with this cycle.
    GameOver(GameResult),
}

/// Orchestrates action resolution for one game's rules.
///
/// Holds no per-game state, so one model can drive any number of states
/// (and state copies) side by side.
#[derive(Clone, Debug, Default)]
pub struct ForwardModel<R: Rules> {
    rules: R,
}

impl<R: Rules> ForwardModel<R> {
    #[must_use]
    pub fn new(rules: R) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    /// Legal actions for the current decider.
    ///
    /// An open reaction window supplies responses, an active frame supplies
    /// its own choices, and otherwise the rules are asked for the turn
    /// player's moves. Duplicates are dropped, first occurrence wins.
    #[must_use]
    pub fn compute_available_actions(&self, state: &GameState<R>) -> Vec<R::Action> {
        if state.is_game_over() {
            return Vec::new();
        }

        let actions = if let Some(window) = state.reaction() {
            match window.responder() {
                Some(responder) => self.rules.response_actions(state, responder, window.pending()),
                None => Vec::new(),
            }
        } else if let Some(frame) = state.action_in_progress() {
            frame.available_actions(state)
        } else {
            self.rules.legal_actions(state, state.turn_order().current())
        };

        dedupe(actions)
    }

    /// Apply `action` for the current decider and advance the state.
    pub fn next(&self, state: &mut GameState<R>, action: R::Action) -> EngineResult<Step> {
        if state.is_game_over() {
            return Err(EngineError::GameOver);
        }

        let player = state.current_player();
        let legal = self.compute_available_actions(state);
        if legal.is_empty() {
            error!(%player, tick = state.tick(), "no legal actions");
            return Err(EngineError::NoLegalActions { player });
        }
        if !legal.contains(&action) {
            error!(%player, ?action, tick = state.tick(), "illegal action");
            return Err(EngineError::IllegalAction {
                player,
                action: format!("{action:?}"),
            });
        }

        trace!(%player, ?action, tick = state.tick(), "applying");
        state.record(player, action.clone());

        let step = if state.reaction.is_some() {
            self.respond(state, player, action)?
        } else {
            self.apply(state, player, action)?
        };

        if let Some(result) = self.check_terminal(state) {
            debug!(?result, tick = state.tick(), "game over");
            state.result = Some(result.clone());
            return Ok(Step::GameOver(result));
        }
        Ok(step)
    }

    fn check_terminal(&self, state: &GameState<R>) -> Option<GameResult> {
        self.rules.is_terminal(state).or_else(|| {
            (state.is_stable() && state.turn_order().is_exhausted()).then_some(GameResult::Draw)
        })
    }

    /// Ordinary resolution path.
    fn apply(&self, state: &mut GameState<R>, player: PlayerId, action: R::Action) -> EngineResult<Step> {
        // The frame is detached while it looks at the state it lives in.
        if let Some(mut frame) = state.action_in_progress.take() {
            frame.after_action(state, &action);
            state.action_in_progress = Some(frame);
        }

        if action.capability() != Capability::Contestable {
            let resolution = action.execute(state)?;
            return self.settle(state, resolution);
        }

        action.stage(state)?;
        let view: &GameState<R> = state;
        let responders: Vec<PlayerId> = player
            .others(view.player_count())
            .filter(|p| view.turn_order().is_active(*p) && self.rules.can_respond(view, *p, &action))
            .collect();

        match ReactionWindow::open(action, player, responders) {
            Ok(window) => {
                let responder = window.responder().ok_or(EngineError::NoActivePlayers)?;
                debug!(%player, %responder, pending = ?window.pending(), "reaction window opened");
                state.reaction = Some(window);
                Ok(Step::AwaitingResponse { responder })
            }
            Err(action) => {
                trace!(%player, "nobody can respond");
                let resolution = action.execute(state)?;
                self.settle(state, resolution)
            }
        }
    }

    /// Resolution path inside a reaction window.
    fn respond(&self, state: &mut GameState<R>, player: PlayerId, action: R::Action) -> EngineResult<Step> {
        let Some(mut window) = state.reaction.take() else {
            return Err(EngineError::IllegalAction {
                player,
                action: format!("{action:?}"),
            });
        };

        if action.capability() == Capability::Cancel {
            debug!(actor = %window.actor(), pending = ?window.pending(), "pending action cancelled");
            let resolution = action.execute(state)?;
            return self.settle(state, resolution);
        }

        // Responses are single-step: only a Cancel may open a frame.
        if !action.execute(state)?.is_committed() {
            error!(%player, ?action, "response returned an extended sequence");
            return Err(EngineError::ExtendedResponse { player });
        }
        window.decline();
        if let Some(responder) = window.responder() {
            state.reaction = Some(window);
            return Ok(Step::AwaitingResponse { responder });
        }

        let pending = window.into_pending();
        debug!(?pending, "reaction window closed, committing");
        let resolution = pending.execute(state)?;
        self.settle(state, resolution)
    }

    /// Install or retire the frame, then end the turn if nothing is pending.
    fn settle(&self, state: &mut GameState<R>, resolution: Resolution<R::Frame>) -> EngineResult<Step> {
        if let Resolution::Extended(frame) = resolution {
            if state.action_in_progress.is_some() {
                trace!(?frame, "frame refreshed");
            } else {
                debug!(initiator = %frame.initiator(), "extended sequence started");
            }
            state.action_in_progress = Some(frame);
        }

        if let Some(frame) = &state.action_in_progress {
            if !frame.is_complete(state) {
                let decider = frame.current_decider(state);
                return Ok(Step::SequenceInProgress { decider });
            }
            state.action_in_progress = None;
            state.turn_order.validate()?;
            debug!("extended sequence complete");
        }

        self.advance(state)
    }

    fn advance(&self, state: &mut GameState<R>) -> EngineResult<Step> {
        let next = state.turn_order_mut().end_player_turn()?;
        self.rules.on_turn_start(state, next)?;
        trace!(%next, turn = state.turn_order().turn(), "turn ended");
        Ok(Step::TurnEnded { next })
    }
}

/// Drop repeated actions, keeping the first of each.
fn dedupe<A: Eq + std::hash::Hash>(actions: Vec<A>) -> Vec<A> {
    let keep: Vec<bool> = {
        let mut seen = FxHashSet::default();
        actions.iter().map(|action| seen.insert(action)).collect()
    };
    actions
        .into_iter()
        .zip(keep)
        .filter_map(|(action, keep)| keep.then_some(action))
        .collect()
}
