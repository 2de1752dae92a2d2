//! Extended action sequences.
//!
//! A frame is installed when an action resolves to
//! `Resolution::Extended`. While it is active it decides who acts and what
//! they may do; the Forward Model retires it as soon as `is_complete` holds,
//! and control returns to the turn order.
//!
//! Only one frame is active at a time. A frame that needs another round of
//! decisions is refreshed by returning a new frame from an action executed
//! inside it.

use std::fmt::Debug;
use std::hash::Hash;

use crate::core::player::PlayerId;
use crate::core::state::GameState;
use crate::rules::Rules;

/// One in-progress multi-decision move.
pub trait ExtendedSequence<R: Rules>: Clone + Debug + Eq + Hash {
    /// Player whose action created the frame.
    fn initiator(&self) -> PlayerId;

    /// Player who makes the next decision. Overrides the turn order.
    fn current_decider(&self, state: &GameState<R>) -> PlayerId;

    /// Legal actions for the current decider.
    fn available_actions(&self, state: &GameState<R>) -> Vec<R::Action>;

    /// Called right before `action` is applied, so the frame can record the
    /// decision and move its own progress along.
    fn after_action(&mut self, state: &GameState<R>, action: &R::Action);

    /// The frame is retired exactly when this returns true.
    fn is_complete(&self, state: &GameState<R>) -> bool;
}

/// Frame type for games without multi-decision moves.
///
/// Uninhabited: no value of it can exist, so no frame is ever installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NoSequence {}

impl<R: Rules> ExtendedSequence<R> for NoSequence {
    fn initiator(&self) -> PlayerId {
        match *self {}
    }

    fn current_decider(&self, _state: &GameState<R>) -> PlayerId {
        match *self {}
    }

    fn available_actions(&self, _state: &GameState<R>) -> Vec<R::Action> {
        match *self {}
    }

    fn after_action(&mut self, _state: &GameState<R>, _action: &R::Action) {
        match *self {}
    }

    fn is_complete(&self, _state: &GameState<R>) -> bool {
        match *self {}
    }
}
