//! Decks with a visibility mask per component.
//!
//! The masks live in a vector parallel to the deck contents: a component
//! has a mask exactly while it is present, and loses it on eviction.

use im::Vector;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::deck::{Deck, Position};
use crate::core::config::{ContainerConfig, ContainerVisibility};
use crate::core::entity::ComponentId;
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// The set of seats allowed to see one component.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Visibility {
    /// Face up.
    Everyone,
    /// Only the listed seats. Empty means nobody.
    Players(SmallVec<[PlayerId; 4]>),
}

impl Visibility {
    /// Nobody may look.
    #[must_use]
    pub fn nobody() -> Self {
        Self::Players(SmallVec::new())
    }

    /// Only `player` may look.
    #[must_use]
    pub fn only(player: PlayerId) -> Self {
        let mut players = SmallVec::new();
        players.push(player);
        Self::Players(players)
    }

    /// The default mask a container gives to new components.
    #[must_use]
    pub fn default_for(visibility: ContainerVisibility, owner: Option<PlayerId>) -> Self {
        match (visibility, owner) {
            (ContainerVisibility::Public, _) => Self::Everyone,
            (ContainerVisibility::OwnerOnly, Some(owner)) => Self::only(owner),
            (ContainerVisibility::OwnerOnly, None) | (ContainerVisibility::Hidden, _) => {
                Self::nobody()
            }
        }
    }

    #[must_use]
    pub fn is_visible_to(&self, player: PlayerId) -> bool {
        match self {
            Self::Everyone => true,
            Self::Players(players) => players.contains(&player),
        }
    }

    /// Add `player` to the set.
    pub fn grant(&mut self, player: PlayerId) {
        if let Self::Players(players) = self {
            if !players.contains(&player) {
                players.push(player);
                players.sort_unstable();
            }
        }
    }

    /// Builder form of `grant`.
    #[must_use]
    pub fn with(mut self, player: PlayerId) -> Self {
        self.grant(player);
        self
    }
}

/// A deck whose components each carry their own `Visibility`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PartialObservableDeck {
    deck: Deck,
    masks: Vector<Visibility>,
}

impl PartialObservableDeck {
    #[must_use]
    pub fn new(config: &ContainerConfig) -> Self {
        Self {
            deck: Deck::new(config),
            masks: Vector::new(),
        }
    }

    /// The underlying ordered contents.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Mask given to components inserted without an explicit one.
    #[must_use]
    pub fn default_visibility(&self) -> Visibility {
        Visibility::default_for(self.deck.visibility(), self.deck.owner())
    }

    /// Mask of the component at `index`.
    #[must_use]
    pub fn visibility_at(&self, index: usize) -> Option<&Visibility> {
        self.masks.get(index)
    }

    /// Mask of a component; `None` when it is not in this deck.
    #[must_use]
    pub fn visibility_of(&self, component: ComponentId) -> Option<&Visibility> {
        self.deck
            .position(component)
            .and_then(|index| self.masks.get(index))
    }

    #[must_use]
    pub fn is_visible(&self, index: usize, viewer: PlayerId) -> bool {
        self.masks
            .get(index)
            .is_some_and(|mask| mask.is_visible_to(viewer))
    }

    /// Read the component at `index` on behalf of `viewer`.
    pub fn get_as(&self, viewer: PlayerId, index: usize) -> EngineResult<ComponentId> {
        let component = self.deck.get(index).ok_or(EngineError::EmptyContainer {
            container: self.deck.id(),
        })?;
        if self.is_visible(index, viewer) {
            Ok(component)
        } else {
            tracing::error!(%viewer, container = %self.deck.id(), index, "masked slot read");
            Err(EngineError::VisibilityViolation {
                viewer,
                container: self.deck.id(),
                index,
            })
        }
    }

    /// What `viewer` sees, bottom to top: `None` for masked slots.
    #[must_use]
    pub fn observe(&self, viewer: PlayerId) -> Vec<Option<ComponentId>> {
        self.deck
            .components()
            .zip(self.masks.iter())
            .map(|(component, mask)| mask.is_visible_to(viewer).then_some(component))
            .collect()
    }

    /// Replace the mask of a present component.
    pub(crate) fn set_visibility(&mut self, component: ComponentId, mask: Visibility) -> EngineResult<()> {
        let index = self
            .deck
            .position(component)
            .ok_or(EngineError::NotInContainer {
                component,
                container: self.deck.id(),
            })?;
        self.masks.set(index, mask);
        Ok(())
    }

    pub(crate) fn insert(
        &mut self,
        component: ComponentId,
        position: Position,
        mask: Option<Visibility>,
    ) -> EngineResult<usize> {
        let index = self.deck.insert(component, position)?;
        let mask = mask.unwrap_or_else(|| self.default_visibility());
        self.masks.insert(index, mask);
        debug_assert_eq!(self.masks.len(), self.deck.len());
        Ok(index)
    }

    pub(crate) fn remove(&mut self, component: ComponentId) -> Option<usize> {
        let index = self.deck.remove(component)?;
        self.masks.remove(index);
        debug_assert_eq!(self.masks.len(), self.deck.len());
        Some(index)
    }

    pub(crate) fn set(&mut self, index: usize, component: ComponentId) {
        self.deck.set(index, component);
    }

    /// Shuffle contents; each mask travels with its component.
    pub(crate) fn shuffle(&mut self, rng: &mut GameRng) {
        let order = self.deck.shuffle(rng);
        let old = self.masks.clone();
        self.masks = order.iter().map(|&i| old[i].clone()).collect();
    }

    pub(crate) fn check_room(&self) -> EngineResult<()> {
        self.deck.check_room()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ContainerId;

    fn hand(owner: u8) -> PartialObservableDeck {
        PartialObservableDeck::new(
            &ContainerConfig::new(ContainerId::new(7), "Hand")
                .with_owner(PlayerId::new(owner))
                .owner_only()
                .partially_observable(),
        )
    }

    #[test]
    fn test_default_mask_is_owner() {
        let mut deck = hand(1);
        deck.insert(ComponentId(3), Position::Top, None).unwrap();

        let mask = deck.visibility_of(ComponentId(3)).unwrap();
        assert!(mask.is_visible_to(PlayerId::new(1)));
        assert!(!mask.is_visible_to(PlayerId::new(0)));
    }

    #[test]
    fn test_masks_follow_insert_and_remove() {
        let mut deck = hand(0);
        deck.insert(ComponentId(1), Position::Top, None).unwrap();
        deck.insert(ComponentId(2), Position::Bottom, Some(Visibility::Everyone))
            .unwrap();

        assert_eq!(deck.visibility_at(0), Some(&Visibility::Everyone));
        assert_eq!(deck.visibility_of(ComponentId(1)), Some(&Visibility::only(PlayerId::new(0))));

        deck.remove(ComponentId(2)).unwrap();
        assert_eq!(deck.visibility_of(ComponentId(2)), None);
        assert_eq!(deck.visibility_at(0), Some(&Visibility::only(PlayerId::new(0))));
        assert_eq!(deck.visibility_at(1), None);
    }

    #[test]
    fn test_get_as_enforces_mask() {
        let mut deck = hand(0);
        deck.insert(ComponentId(5), Position::Top, None).unwrap();

        assert_eq!(deck.get_as(PlayerId::new(0), 0), Ok(ComponentId(5)));
        assert_eq!(
            deck.get_as(PlayerId::new(1), 0),
            Err(EngineError::VisibilityViolation {
                viewer: PlayerId::new(1),
                container: ContainerId::new(7),
                index: 0
            })
        );
    }

    #[test]
    fn test_observe_redacts() {
        let mut deck = hand(0);
        deck.insert(ComponentId(1), Position::Top, None).unwrap();
        deck.insert(ComponentId(2), Position::Top, Some(Visibility::Everyone))
            .unwrap();

        assert_eq!(deck.observe(PlayerId::new(1)), vec![None, Some(ComponentId(2))]);
        assert_eq!(
            deck.observe(PlayerId::new(0)),
            vec![Some(ComponentId(1)), Some(ComponentId(2))]
        );
    }

    #[test]
    fn test_shuffle_moves_masks_with_components() {
        let mut deck = hand(0);
        for i in 0..12 {
            let mask = if i % 3 == 0 { Some(Visibility::Everyone) } else { None };
            deck.insert(ComponentId(i), Position::Top, mask).unwrap();
        }

        deck.shuffle(&mut GameRng::new(11));

        for i in 0..12 {
            let expected = if i % 3 == 0 {
                Visibility::Everyone
            } else {
                Visibility::only(PlayerId::new(0))
            };
            assert_eq!(deck.visibility_of(ComponentId(i)), Some(&expected));
        }
    }

    #[test]
    fn test_grant_keeps_sorted_unique() {
        let mask = Visibility::only(PlayerId::new(2))
            .with(PlayerId::new(0))
            .with(PlayerId::new(2));

        let mut expected = SmallVec::new();
        expected.push(PlayerId::new(0));
        expected.push(PlayerId::new(2));
        assert_eq!(mask, Visibility::Players(expected));

        let mut everyone = Visibility::Everyone;
        everyone.grant(PlayerId::new(1));
        assert_eq!(everyone, Visibility::Everyone);
    }
}
