//! Card kinds and hand queries.

use serde::{Deserialize, Serialize};

use super::game::Kittens;
use crate::core::config::ContainerId;
use crate::core::entity::{ComponentId, ComponentType};
use crate::core::player::{PlayerId, PlayerMap};
use crate::core::state::GameState;

/// What a card does. Stored as the component payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CardKind {
    /// Drawing it eliminates you unless you hold a Defuse.
    Bomb,
    /// Saves you from a Bomb; the Bomb goes back into the pile.
    Defuse,
    /// End your turn; the next player takes two.
    Attack,
    /// End your turn; the next player in rotation is skipped.
    Skip,
    /// Cancel a pending Attack, Skip, Swap or Favor.
    Nope,
    /// Protect yourself from Swap until your next turn.
    Shield,
    /// Trade hands with another player.
    Swap,
    /// Another player gives you a card of their choice.
    Favor,
    /// Everyone may pass one card to the left, starting with you.
    Barter,
    /// No effect.
    Cat,
}

impl CardKind {
    pub const ALL: [CardKind; 10] = [
        CardKind::Bomb,
        CardKind::Defuse,
        CardKind::Attack,
        CardKind::Skip,
        CardKind::Nope,
        CardKind::Shield,
        CardKind::Swap,
        CardKind::Favor,
        CardKind::Barter,
        CardKind::Cat,
    ];

    #[must_use]
    pub fn component_type(self) -> ComponentType {
        ComponentType::new(self as u16)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            CardKind::Bomb => "Bomb",
            CardKind::Defuse => "Defuse",
            CardKind::Attack => "Attack",
            CardKind::Skip => "Skip",
            CardKind::Nope => "Nope",
            CardKind::Shield => "Shield",
            CardKind::Swap => "Swap",
            CardKind::Favor => "Favor",
            CardKind::Barter => "Barter",
            CardKind::Cat => "Cat",
        }
    }
}

/// Container ids used by the game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KittensLayout {
    pub draw_pile: ContainerId,
    pub discard: ContainerId,
    pub hands: PlayerMap<ContainerId>,
}

/// Per-game data carried in the state.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KittensData {
    pub layout: KittensLayout,
    /// Shielded players. Cleared when their next turn starts.
    pub protected: PlayerMap<bool>,
}

/// Kind of a registered card.
#[must_use]
pub fn kind_of(state: &GameState<Kittens>, card: ComponentId) -> Option<CardKind> {
    state.registry().get(card).map(|c| c.payload)
}

/// Cards in `player`'s hand, bottom to top.
#[must_use]
pub fn hand(state: &GameState<Kittens>, player: PlayerId) -> Vec<ComponentId> {
    let container = state.data().layout.hands[player];
    state
        .containers()
        .get(container)
        .map(|c| c.deck().components().collect())
        .unwrap_or_default()
}

/// Topmost card of `kind` in `player`'s hand.
#[must_use]
pub fn find_in_hand(state: &GameState<Kittens>, player: PlayerId, kind: CardKind) -> Option<ComponentId> {
    hand(state, player)
        .into_iter()
        .rev()
        .find(|card| kind_of(state, *card) == Some(kind))
}

/// One card per kind held, ordered by kind.
///
/// Cards of the same kind are interchangeable, so offering one of each keeps
/// the branching factor down.
#[must_use]
pub fn representatives(state: &GameState<Kittens>, player: PlayerId) -> Vec<(CardKind, ComponentId)> {
    let mut cards: Vec<(CardKind, ComponentId)> = hand(state, player)
        .into_iter()
        .rev()
        .filter_map(|card| kind_of(state, card).map(|kind| (kind, card)))
        .collect();
    cards.sort_by_key(|(kind, _)| *kind);
    cards.dedup_by_key(|(kind, _)| *kind);
    cards
}
