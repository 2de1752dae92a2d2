//! Containers: ordered decks, per-component visibility, and the set that
//! keeps every component in at most one place.
//!
//! ## Key Types
//!
//! - `Deck`: ordered ids with a uniform visibility rule
//! - `PartialObservableDeck`: a `Deck` plus one `Visibility` per component
//! - `Container`: either of the above
//! - `ContainerSet`: all containers of a game plus the component → container index

pub mod deck;
pub mod manager;
pub mod partial;

pub use deck::{Deck, Position};
pub use manager::ContainerSet;
pub use partial::{PartialObservableDeck, Visibility};

use serde::{Deserialize, Serialize};

use crate::core::config::{ContainerConfig, ContainerId, ContainerVisibility};
use crate::core::entity::ComponentId;
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// A deck, with or without per-component masks.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Container {
    Standard(Deck),
    PartiallyObservable(PartialObservableDeck),
}

impl Container {
    /// Build the container described by `config`.
    #[must_use]
    pub fn from_config(config: &ContainerConfig) -> Self {
        if config.partially_observable {
            Self::PartiallyObservable(PartialObservableDeck::new(config))
        } else {
            Self::Standard(Deck::new(config))
        }
    }

    /// The ordered contents, regardless of masks.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        match self {
            Self::Standard(deck) => deck,
            Self::PartiallyObservable(partial) => partial.deck(),
        }
    }

    #[must_use]
    pub fn id(&self) -> ContainerId {
        self.deck().id()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.deck().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.deck().is_empty()
    }

    #[must_use]
    pub fn is_partially_observable(&self) -> bool {
        matches!(self, Self::PartiallyObservable(_))
    }

    /// Effective mask of the slot at `index`.
    ///
    /// Standard decks derive it from their uniform rule.
    #[must_use]
    pub fn visibility_at(&self, index: usize) -> Option<Visibility> {
        match self {
            Self::Standard(deck) => (index < deck.len())
                .then(|| Visibility::default_for(deck.visibility(), deck.owner())),
            Self::PartiallyObservable(partial) => partial.visibility_at(index).cloned(),
        }
    }

    #[must_use]
    pub fn is_visible(&self, index: usize, viewer: PlayerId) -> bool {
        match self {
            Self::Standard(deck) => index < deck.len() && deck.visible_to(viewer),
            Self::PartiallyObservable(partial) => partial.is_visible(index, viewer),
        }
    }

    /// Read slot `index` on behalf of `viewer`.
    pub fn get_as(&self, viewer: PlayerId, index: usize) -> EngineResult<ComponentId> {
        match self {
            Self::PartiallyObservable(partial) => partial.get_as(viewer, index),
            Self::Standard(deck) => {
                let component = deck.get(index).ok_or(EngineError::EmptyContainer {
                    container: deck.id(),
                })?;
                if deck.visible_to(viewer) {
                    Ok(component)
                } else {
                    tracing::error!(%viewer, container = %deck.id(), index, "masked slot read");
                    Err(EngineError::VisibilityViolation {
                        viewer,
                        container: deck.id(),
                        index,
                    })
                }
            }
        }
    }

    /// Contents as `viewer` sees them, bottom to top.
    #[must_use]
    pub fn observe(&self, viewer: PlayerId) -> Vec<Option<ComponentId>> {
        match self {
            Self::PartiallyObservable(partial) => partial.observe(viewer),
            Self::Standard(deck) => {
                let visible = deck.visible_to(viewer);
                deck.components().map(|c| visible.then_some(c)).collect()
            }
        }
    }

    pub(crate) fn check_room(&self) -> EngineResult<()> {
        match self {
            Self::Standard(deck) => deck.check_room(),
            Self::PartiallyObservable(partial) => partial.check_room(),
        }
    }

    /// Insert with an explicit mask. Standard decks ignore the mask.
    pub(crate) fn insert(
        &mut self,
        component: ComponentId,
        position: Position,
        mask: Option<Visibility>,
    ) -> EngineResult<usize> {
        match self {
            Self::Standard(deck) => deck.insert(component, position),
            Self::PartiallyObservable(partial) => partial.insert(component, position, mask),
        }
    }

    pub(crate) fn remove(&mut self, component: ComponentId) -> Option<usize> {
        match self {
            Self::Standard(deck) => deck.remove(component),
            Self::PartiallyObservable(partial) => partial.remove(component),
        }
    }

    pub(crate) fn set(&mut self, index: usize, component: ComponentId) {
        match self {
            Self::Standard(deck) => deck.set(index, component),
            Self::PartiallyObservable(partial) => partial.set(index, component),
        }
    }

    pub(crate) fn shuffle(&mut self, rng: &mut GameRng) {
        match self {
            Self::Standard(deck) => {
                deck.shuffle(rng);
            }
            Self::PartiallyObservable(partial) => partial.shuffle(rng),
        }
    }

    pub(crate) fn set_visibility(&mut self, component: ComponentId, mask: Visibility) -> EngineResult<()> {
        match self {
            Self::PartiallyObservable(partial) => partial.set_visibility(component, mask),
            Self::Standard(deck) => {
                if deck.contains(component) {
                    tracing::warn!(container = %deck.id(), "mask ignored by a uniform deck");
                    Ok(())
                } else {
                    Err(EngineError::NotInContainer {
                        component,
                        container: deck.id(),
                    })
                }
            }
        }
    }

    /// Uniform visibility of the underlying deck.
    #[must_use]
    pub fn default_visibility(&self) -> ContainerVisibility {
        self.deck().visibility()
    }
}
