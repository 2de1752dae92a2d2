//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - Their component payload, per-game data, action and frame types
//! - What actions are legal on a normal turn and inside a reaction window
//! - Hooks at the start of each turn
//! - Win/loss conditions

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::actions::{ExtendedSequence, GameAction};
use crate::core::config::ContainerId;
use crate::core::error::EngineResult;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    /// Single winner.
    Winner(PlayerId),
    /// Draw (no winner).
    Draw,
    /// Multiple winners (team games, shared victory).
    Winners(Vec<PlayerId>),
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        match self {
            GameResult::Winner(p) => *p == player,
            GameResult::Winners(ps) => ps.contains(&player),
            GameResult::Draw => false,
        }
    }

    /// Reward for `player`: 1 for a win, 0 for a loss, 0.5 for a draw.
    #[must_use]
    pub fn reward(&self, player: PlayerId) -> f64 {
        match self {
            GameResult::Draw => 0.5,
            _ if self.is_winner(player) => 1.0,
            _ => 0.0,
        }
    }

    /// Rewards for every seat, in seat order.
    #[must_use]
    pub fn rewards(&self, player_count: usize) -> Vec<f64> {
        PlayerId::all(player_count).map(|p| self.reward(p)).collect()
    }
}

/// Rules of one game.
///
/// The Forward Model calls these methods during play and search.
///
/// ## Implementation Notes
///
/// - `legal_actions`: only consulted when no frame or reaction window is active
/// - `response_actions`: must include at least one `Decline`-capable action
/// - `is_terminal`: return `None` while the game continues
/// - Everything must be deterministic given the state's RNG
pub trait Rules: Sized {
    /// Game-specific data carried by each component.
    type Payload: Clone + Debug + PartialEq + Eq;

    /// Per-game state beyond containers and turn order.
    type Data: Clone + Debug + PartialEq + Eq;

    type Action: GameAction<Self>;

    /// Frame type for multi-decision moves. Use `NoSequence` if there are none.
    type Frame: ExtendedSequence<Self>;

    /// Moves available to `player` on its own turn.
    fn legal_actions(&self, state: &GameState<Self>, player: PlayerId) -> Vec<Self::Action>;

    /// Moves available to `responder` while `pending` waits to commit.
    fn response_actions(
        &self,
        state: &GameState<Self>,
        responder: PlayerId,
        pending: &Self::Action,
    ) -> Vec<Self::Action>;

    /// Whether `responder` gets a say on `pending` at all.
    ///
    /// Players who could only decline are usually left out of the window.
    fn can_respond(&self, _state: &GameState<Self>, _responder: PlayerId, _pending: &Self::Action) -> bool {
        true
    }

    /// Called after the turn order hands the turn to `player`.
    fn on_turn_start(&self, _state: &mut GameState<Self>, _player: PlayerId) -> EngineResult<()> {
        Ok(())
    }

    /// Whether a hidden component carrying `payload` may be dealt into
    /// `container` when a copy is redeterminized for some viewer.
    ///
    /// Override to keep components out of places the rules never let them
    /// rest in. Copies are made without the rules at hand, hence no `self`.
    fn can_hide_in(_data: &Self::Data, _payload: &Self::Payload, _container: ContainerId) -> bool {
        true
    }

    /// Check if the game is over.
    ///
    /// Returns `Some(result)` if the game has ended, `None` if it continues.
    fn is_terminal(&self, state: &GameState<Self>) -> Option<GameResult>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_result_is_winner() {
        let result = GameResult::Winner(PlayerId::new(1));
        assert!(!result.is_winner(PlayerId::new(0)));
        assert!(result.is_winner(PlayerId::new(1)));

        let draw = GameResult::Draw;
        assert!(!draw.is_winner(PlayerId::new(0)));

        let team = GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(2)]);
        assert!(team.is_winner(PlayerId::new(0)));
        assert!(!team.is_winner(PlayerId::new(1)));
        assert!(team.is_winner(PlayerId::new(2)));
    }

    #[test]
    fn test_rewards() {
        assert_eq!(GameResult::Winner(PlayerId::new(2)).rewards(3), vec![0.0, 0.0, 1.0]);
        assert_eq!(GameResult::Draw.rewards(2), vec![0.5, 0.5]);
        assert_eq!(
            GameResult::Winners(vec![PlayerId::new(0), PlayerId::new(1)]).rewards(3),
            vec![1.0, 1.0, 0.0]
        );
    }
}
