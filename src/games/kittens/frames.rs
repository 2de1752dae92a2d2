//! Multi-decision moves: Favor and Barter.

use serde::{Deserialize, Serialize};

use super::actions::KittensAction;
use super::cards::{hand, representatives};
use super::game::Kittens;
use crate::actions::ExtendedSequence;
use crate::core::player::PlayerId;
use crate::core::state::GameState;

/// The target of a Favor picks a card to hand over.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FavorFrame {
    initiator: PlayerId,
    target: PlayerId,
    resolved: bool,
}

impl FavorFrame {
    #[must_use]
    pub fn new(initiator: PlayerId, target: PlayerId) -> Self {
        Self {
            initiator,
            target,
            resolved: false,
        }
    }
}

impl ExtendedSequence<Kittens> for FavorFrame {
    fn initiator(&self) -> PlayerId {
        self.initiator
    }

    fn current_decider(&self, _state: &GameState<Kittens>) -> PlayerId {
        self.target
    }

    fn available_actions(&self, state: &GameState<Kittens>) -> Vec<KittensAction> {
        representatives(state, self.target)
            .into_iter()
            .map(|(_, card)| KittensAction::Give {
                from: self.target,
                to: self.initiator,
                card,
            })
            .collect()
    }

    fn after_action(&mut self, _state: &GameState<Kittens>, _action: &KittensAction) {
        self.resolved = true;
    }

    fn is_complete(&self, _state: &GameState<Kittens>) -> bool {
        self.resolved
    }
}

/// Starting with the initiator, each eligible player in seat order either
/// passes one card to the next active seat or keeps its hand. Done once the
/// turn to decide comes back to the initiator.
///
/// Eligible means still in the game and holding cards; the initiator is
/// always eligible, so the rotation always finds its way back.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BarterFrame {
    initiator: PlayerId,
    last: Option<PlayerId>,
}

impl BarterFrame {
    #[must_use]
    pub fn new(initiator: PlayerId) -> Self {
        Self {
            initiator,
            last: None,
        }
    }

    /// Player who made the latest decision.
    #[must_use]
    pub fn last(&self) -> Option<PlayerId> {
        self.last
    }

    fn is_eligible(&self, state: &GameState<Kittens>, player: PlayerId) -> bool {
        state.turn_order().is_active(player) && (player == self.initiator || !hand(state, player).is_empty())
    }
}

impl ExtendedSequence<Kittens> for BarterFrame {
    fn initiator(&self) -> PlayerId {
        self.initiator
    }

    fn current_decider(&self, state: &GameState<Kittens>) -> PlayerId {
        match self.last {
            None => self.initiator,
            Some(last) => last
                .others(state.player_count())
                .find(|p| self.is_eligible(state, *p))
                .unwrap_or(self.initiator),
        }
    }

    fn available_actions(&self, state: &GameState<Kittens>) -> Vec<KittensAction> {
        let decider = self.current_decider(state);
        let mut actions = vec![KittensAction::Keep { player: decider }];

        if let Some(left) = state
            .turn_order()
            .next_active_after(decider)
            .filter(|left| *left != decider)
        {
            actions.extend(
                representatives(state, decider)
                    .into_iter()
                    .map(|(_, card)| KittensAction::Give {
                        from: decider,
                        to: left,
                        card,
                    }),
            );
        }
        actions
    }

    fn after_action(&mut self, state: &GameState<Kittens>, _action: &KittensAction) {
        self.last = Some(self.current_decider(state));
    }

    fn is_complete(&self, state: &GameState<Kittens>) -> bool {
        self.last.is_some() && self.current_decider(state) == self.initiator
    }
}

/// The frame types of the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KittensFrame {
    Favor(FavorFrame),
    Barter(BarterFrame),
}

impl ExtendedSequence<Kittens> for KittensFrame {
    fn initiator(&self) -> PlayerId {
        match self {
            Self::Favor(frame) => frame.initiator(),
            Self::Barter(frame) => frame.initiator(),
        }
    }

    fn current_decider(&self, state: &GameState<Kittens>) -> PlayerId {
        match self {
            Self::Favor(frame) => frame.current_decider(state),
            Self::Barter(frame) => frame.current_decider(state),
        }
    }

    fn available_actions(&self, state: &GameState<Kittens>) -> Vec<KittensAction> {
        match self {
            Self::Favor(frame) => frame.available_actions(state),
            Self::Barter(frame) => frame.available_actions(state),
        }
    }

    fn after_action(&mut self, state: &GameState<Kittens>, action: &KittensAction) {
        match self {
            Self::Favor(frame) => frame.after_action(state, action),
            Self::Barter(frame) => frame.after_action(state, action),
        }
    }

    fn is_complete(&self, state: &GameState<Kittens>) -> bool {
        match self {
            Self::Favor(frame) => frame.is_complete(state),
            Self::Barter(frame) => frame.is_complete(state),
        }
    }
}
