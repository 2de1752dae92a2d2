//! Pending changes to the seat rotation.

use serde::{Deserialize, Serialize};

use crate::core::player::PlayerId;

/// A one-shot rule queued by an action and consumed at the next turn end.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnModifier {
    /// The next seat in rotation loses its turn.
    Skip,

    /// Control passes straight to `target`, who then owes `extra_turns`
    /// turns on top of the one it is about to take. Turns still owed by the
    /// attacker are forfeited.
    Attack { target: PlayerId, extra_turns: u32 },

    /// `player` owes `count` additional turns.
    ExtraTurn { player: PlayerId, count: u32 },
}

impl std::fmt::Display for TurnModifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Skip => write!(f, "skip"),
            Self::Attack { target, extra_turns } => {
                write!(f, "attack {target} (+{extra_turns})")
            }
            Self::ExtraTurn { player, count } => write!(f, "{player} +{count} turns"),
        }
    }
}
