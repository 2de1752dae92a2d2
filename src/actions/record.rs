//! Action history entries.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// A recorded action with metadata for history tracking.
///
/// Used for:
/// - Replay/debugging
/// - Opponent modelling in search
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionRecord<A> {
    /// The player who took this action.
    pub player: PlayerId,

    /// The action taken.
    pub action: A,

    /// Round when the action was taken.
    pub round: u32,

    /// Turn number when the action was taken.
    pub turn: u32,

    /// Forward Model cycle that applied it.
    pub tick: u64,
}
