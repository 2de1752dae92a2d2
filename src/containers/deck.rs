//! Ordered component containers.
//!
//! Index 0 is the bottom, the last index is the top. Mutators are
//! crate-private: moving components goes through `ContainerSet`, which keeps
//! every component in at most one container.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::core::config::{ContainerConfig, ContainerId, ContainerVisibility};
use crate::core::entity::ComponentId;
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// Where to insert into an ordered container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// On top (end of the sequence).
    Top,
    /// At the bottom (start of the sequence).
    Bottom,
    /// At a specific index, clamped to the length.
    Index(usize),
}

/// An ordered sequence of component ids with uniform visibility.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    id: ContainerId,
    name: String,
    owner: Option<PlayerId>,
    visibility: ContainerVisibility,
    capacity: Option<usize>,
    components: Vector<ComponentId>,
}

impl Deck {
    /// Create an empty deck from its configuration.
    #[must_use]
    pub fn new(config: &ContainerConfig) -> Self {
        Self {
            id: config.id,
            name: config.name.clone(),
            owner: config.owner,
            visibility: config.visibility,
            capacity: config.capacity,
            components: Vector::new(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    #[must_use]
    pub fn visibility(&self) -> ContainerVisibility {
        self.visibility
    }

    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Components from bottom to top.
    pub fn components(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.components.iter().copied()
    }

    /// Component at `index` (0 = bottom).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<ComponentId> {
        self.components.get(index).copied()
    }

    /// Top component.
    #[must_use]
    pub fn peek(&self) -> Option<ComponentId> {
        self.components.last().copied()
    }

    #[must_use]
    pub fn contains(&self, component: ComponentId) -> bool {
        self.position(component).is_some()
    }

    /// Index of a component (0 = bottom).
    #[must_use]
    pub fn position(&self, component: ComponentId) -> Option<usize> {
        self.components.index_of(&component)
    }

    /// Whether `viewer` sees the contents under the deck's uniform rule.
    #[must_use]
    pub fn visible_to(&self, viewer: PlayerId) -> bool {
        match self.visibility {
            ContainerVisibility::Public => true,
            ContainerVisibility::OwnerOnly => self.owner == Some(viewer),
            ContainerVisibility::Hidden => false,
        }
    }

    /// Fail with `ContainerFull` if one more component would not fit.
    pub(crate) fn check_room(&self) -> EngineResult<()> {
        match self.capacity {
            Some(capacity) if self.components.len() >= capacity => Err(EngineError::ContainerFull {
                container: self.id,
                capacity,
            }),
            _ => Ok(()),
        }
    }

    /// Insert and return the index the component landed at.
    pub(crate) fn insert(&mut self, component: ComponentId, position: Position) -> EngineResult<usize> {
        self.check_room()?;
        let index = match position {
            Position::Top => self.components.len(),
            Position::Bottom => 0,
            Position::Index(i) => i.min(self.components.len()),
        };
        self.components.insert(index, component);
        Ok(index)
    }

    /// Remove a component and return the index it occupied.
    pub(crate) fn remove(&mut self, component: ComponentId) -> Option<usize> {
        let index = self.position(component)?;
        self.components.remove(index);
        Some(index)
    }

    pub(crate) fn set(&mut self, index: usize, component: ComponentId) {
        self.components.set(index, component);
    }

    /// Shuffle and return the permutation applied: `order[new] = old`.
    pub(crate) fn shuffle(&mut self, rng: &mut GameRng) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.components.len()).collect();
        rng.shuffle(&mut order);
        let old = self.components.clone();
        self.components = order.iter().map(|&i| old[i]).collect();
        order
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pile() -> Deck {
        Deck::new(&ContainerConfig::new(ContainerId::new(0), "Pile"))
    }

    #[test]
    fn test_positions() {
        let mut deck = pile();

        deck.insert(ComponentId(10), Position::Top).unwrap();
        deck.insert(ComponentId(11), Position::Bottom).unwrap();
        deck.insert(ComponentId(12), Position::Top).unwrap();
        deck.insert(ComponentId(13), Position::Index(1)).unwrap();

        let order: Vec<_> = deck.components().collect();
        assert_eq!(
            order,
            vec![ComponentId(11), ComponentId(13), ComponentId(10), ComponentId(12)]
        );
        assert_eq!(deck.peek(), Some(ComponentId(12)));
        assert_eq!(deck.position(ComponentId(10)), Some(2));
    }

    #[test]
    fn test_index_clamps() {
        let mut deck = pile();
        assert_eq!(deck.insert(ComponentId(1), Position::Index(99)).unwrap(), 0);
        assert_eq!(deck.insert(ComponentId(2), Position::Index(99)).unwrap(), 1);
    }

    #[test]
    fn test_capacity() {
        let mut deck = Deck::new(&ContainerConfig::new(ContainerId::new(4), "Slot").with_capacity(1));

        deck.insert(ComponentId(1), Position::Top).unwrap();
        assert_eq!(
            deck.insert(ComponentId(2), Position::Top),
            Err(EngineError::ContainerFull {
                container: ContainerId::new(4),
                capacity: 1
            })
        );
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_remove_reports_index() {
        let mut deck = pile();
        deck.insert(ComponentId(1), Position::Top).unwrap();
        deck.insert(ComponentId(2), Position::Top).unwrap();

        assert_eq!(deck.remove(ComponentId(1)), Some(0));
        assert_eq!(deck.remove(ComponentId(1)), None);
        assert_eq!(deck.len(), 1);
    }

    #[test]
    fn test_shuffle_permutation() {
        let mut deck = pile();
        for i in 0..20 {
            deck.insert(ComponentId(i), Position::Top).unwrap();
        }

        let before: Vec<_> = deck.components().collect();
        let order = deck.shuffle(&mut GameRng::new(3));
        let after: Vec<_> = deck.components().collect();

        assert_ne!(before, after);
        for (new, old) in order.iter().enumerate() {
            assert_eq!(after[new], before[*old]);
        }
    }

    #[test]
    fn test_uniform_visibility() {
        let hand = Deck::new(
            &ContainerConfig::new(ContainerId::new(1), "Hand")
                .with_owner(PlayerId::new(0))
                .owner_only(),
        );
        assert!(hand.visible_to(PlayerId::new(0)));
        assert!(!hand.visible_to(PlayerId::new(1)));

        let draw = Deck::new(&ContainerConfig::new(ContainerId::new(2), "Draw").hidden());
        assert!(!draw.visible_to(PlayerId::new(0)));
    }
}
