//! The action protocol.
//!
//! Every move of every game is a value implementing `GameAction`. Actions
//! hold ids, never references, so they stay valid as exact copies inside a
//! search tree after the state they were applied to is gone.
//!
//! The Forward Model dispatches on `Capability` instead of on the concrete
//! type:
//!
//! - `Primary`: `execute` runs straight away
//! - `Contestable`: `stage` runs straight away, then a reaction window
//!   opens; `execute` runs only if nobody cancels
//! - `Cancel`: offered inside a reaction window; kills the pending action
//! - `Decline`: offered inside a reaction window; passes to the next responder
//!
//! Multi-decision moves return `Resolution::Extended` with a frame that
//! takes over action generation until it completes (see `sequence`).

pub mod reaction;
pub mod record;
pub mod sequence;

pub use reaction::ReactionWindow;
pub use record::ActionRecord;
pub use sequence::{ExtendedSequence, NoSequence};

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::core::error::EngineResult;
use crate::core::state::GameState;
use crate::rules::Rules;

/// How the Forward Model treats an action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    #[default]
    Primary,
    Contestable,
    Cancel,
    Decline,
}

/// Outcome of `GameAction::execute`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Resolution<F> {
    /// The effect is fully applied.
    Committed,
    /// More decisions are needed; the frame drives them.
    Extended(F),
}

impl<F> Resolution<F> {
    #[must_use]
    pub fn is_committed(&self) -> bool {
        matches!(self, Self::Committed)
    }
}

/// A move: an immutable description plus the logic to apply it.
///
/// `Clone` is the exact copy search trees keep; `Eq` and `Hash` agree with
/// it so transposition tables can dedupe. Effects must touch only the state
/// passed in.
pub trait GameAction<R: Rules>: Clone + Debug + Eq + Hash {
    fn capability(&self) -> Capability {
        Capability::Primary
    }

    /// Immediate part of a contestable action, applied before the reaction
    /// window opens (paying the card). Not undone by a cancel.
    fn stage(&self, _state: &mut GameState<R>) -> EngineResult<()> {
        Ok(())
    }

    /// Apply the effect. Called exactly once per application.
    fn execute(&self, state: &mut GameState<R>) -> EngineResult<Resolution<R::Frame>>;
}
