//! Container set for component locations and movement.
//!
//! The `ContainerSet` owns every container of a game and an index from
//! component to the container holding it. It supports:
//! - Placing a component for the first time
//! - Atomic moves between containers (remove + insert, or neither)
//! - Draw, shuffle and removal
//! - Masked reads on behalf of a viewer
//! - Redeterminization of hidden information for a viewer

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::{Container, Position, Visibility};
use crate::core::config::{ContainerConfig, ContainerId};
use crate::core::entity::ComponentId;
use crate::core::error::{EngineError, EngineResult};
use crate::core::player::PlayerId;
use crate::core::rng::GameRng;

/// All containers of a game plus the component → container index.
///
/// ## Usage
///
/// ```
/// use tabletop_engine::containers::{ContainerSet, Position};
/// use tabletop_engine::core::{ComponentId, ContainerConfig, ContainerId};
///
/// let draw = ContainerId::new(0);
/// let discard = ContainerId::new(1);
///
/// let mut containers = ContainerSet::new();
/// containers.add(&ContainerConfig::new(draw, "Draw").hidden());
/// containers.add(&ContainerConfig::new(discard, "Discard"));
///
/// containers.place(ComponentId(10), draw, Position::Top).unwrap();
/// containers.move_component(ComponentId(10), discard, Position::Top).unwrap();
///
/// assert_eq!(containers.location(ComponentId(10)), Some(discard));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerSet {
    containers: OrdMap<ContainerId, Container>,
    locations: OrdMap<ComponentId, ContainerId>,
}

impl ContainerSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build every container a configuration lists.
    #[must_use]
    pub fn from_configs(configs: &[ContainerConfig]) -> Self {
        let mut set = Self::new();
        for config in configs {
            set.add(config);
        }
        set
    }

    /// Add an empty container. Replaces nothing if the id already exists.
    pub fn add(&mut self, config: &ContainerConfig) {
        if !self.containers.contains_key(&config.id) {
            self.containers.insert(config.id, Container::from_config(config));
        }
    }

    #[must_use]
    pub fn get(&self, id: ContainerId) -> Option<&Container> {
        self.containers.get(&id)
    }

    /// Look up a container, failing with `UnknownContainer`.
    pub fn require(&self, id: ContainerId) -> EngineResult<&Container> {
        self.get(id).ok_or(EngineError::UnknownContainer(id))
    }

    fn require_mut(&mut self, id: ContainerId) -> EngineResult<&mut Container> {
        self.containers
            .get_mut(&id)
            .ok_or(EngineError::UnknownContainer(id))
    }

    /// Iterate containers in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Container> {
        self.containers.values()
    }

    /// The container holding a component.
    #[must_use]
    pub fn location(&self, component: ComponentId) -> Option<ContainerId> {
        self.locations.get(&component).copied()
    }

    /// Number of components held across all containers.
    #[must_use]
    pub fn total_components(&self) -> usize {
        self.locations.len()
    }

    /// Number of components in a container; 0 for unknown ids.
    #[must_use]
    pub fn len(&self, container: ContainerId) -> usize {
        self.get(container).map_or(0, Container::len)
    }

    /// Components of a container, bottom to top.
    pub fn contents(&self, container: ContainerId) -> EngineResult<Vec<ComponentId>> {
        Ok(self.require(container)?.deck().components().collect())
    }

    /// Put a component that is not yet held anywhere into `container`.
    pub fn place(&mut self, component: ComponentId, container: ContainerId, position: Position) -> EngineResult<()> {
        self.place_with_visibility(component, container, position, None)
    }

    /// `place` with an explicit mask for partially observable targets.
    pub fn place_with_visibility(
        &mut self,
        component: ComponentId,
        container: ContainerId,
        position: Position,
        mask: Option<Visibility>,
    ) -> EngineResult<()> {
        if let Some(held_by) = self.location(component) {
            return Err(EngineError::AlreadyPlaced {
                component,
                container: held_by,
            });
        }
        self.require_mut(container)?
            .insert(component, position, mask)?;
        self.locations.insert(component, container);
        Ok(())
    }

    /// Move a component to `to`, using the destination's default mask.
    ///
    /// Returns the container it left.
    pub fn move_component(
        &mut self,
        component: ComponentId,
        to: ContainerId,
        position: Position,
    ) -> EngineResult<ContainerId> {
        self.move_with_visibility(component, to, position, None)
    }

    /// Move a component and give it `mask` in the destination.
    ///
    /// Every failure is detected before anything changes, so a failed move
    /// leaves the component where it was.
    pub fn move_with_visibility(
        &mut self,
        component: ComponentId,
        to: ContainerId,
        position: Position,
        mask: Option<Visibility>,
    ) -> EngineResult<ContainerId> {
        let from = self
            .location(component)
            .ok_or(EngineError::UnknownComponent(component))?;
        let destination = self.require(to)?;
        if from != to {
            destination.check_room()?;
        }

        self.require_mut(from)?
            .remove(component)
            .ok_or(EngineError::NotInContainer {
                component,
                container: from,
            })?;
        self.require_mut(to)?.insert(component, position, mask)?;
        self.locations.insert(component, to);

        tracing::trace!(%component, %from, %to, "moved");
        Ok(from)
    }

    /// Move the top component of `from` onto the top of `to`.
    pub fn draw(&mut self, from: ContainerId, to: ContainerId) -> EngineResult<ComponentId> {
        self.draw_with_visibility(from, to, None)
    }

    /// `draw` with an explicit mask for the drawn component.
    pub fn draw_with_visibility(
        &mut self,
        from: ContainerId,
        to: ContainerId,
        mask: Option<Visibility>,
    ) -> EngineResult<ComponentId> {
        let top = self
            .require(from)?
            .deck()
            .peek()
            .ok_or(EngineError::EmptyContainer { container: from })?;
        self.move_with_visibility(top, to, Position::Top, mask)?;
        Ok(top)
    }

    /// Take a component out of play. Returns the container it left.
    pub fn remove(&mut self, component: ComponentId) -> EngineResult<ContainerId> {
        let from = self
            .location(component)
            .ok_or(EngineError::UnknownComponent(component))?;
        self.require_mut(from)?.remove(component);
        self.locations.remove(&component);
        Ok(from)
    }

    /// Shuffle a container. Masks travel with their components.
    pub fn shuffle(&mut self, container: ContainerId, rng: &mut GameRng) -> EngineResult<()> {
        self.require_mut(container)?.shuffle(rng);
        Ok(())
    }

    /// Replace a held component's mask.
    pub fn set_visibility(&mut self, component: ComponentId, mask: Visibility) -> EngineResult<()> {
        let container = self
            .location(component)
            .ok_or(EngineError::UnknownComponent(component))?;
        self.require_mut(container)?.set_visibility(component, mask)
    }

    /// Let one more player see a held component.
    pub fn grant(&mut self, component: ComponentId, player: PlayerId) -> EngineResult<()> {
        let mut mask = self
            .visibility_of(component)
            .ok_or(EngineError::UnknownComponent(component))?;
        mask.grant(player);
        self.set_visibility(component, mask)
    }

    /// Effective mask of a held component.
    #[must_use]
    pub fn visibility_of(&self, component: ComponentId) -> Option<Visibility> {
        let container = self.get(self.location(component)?)?;
        let index = container.deck().position(component)?;
        container.visibility_at(index)
    }

    /// Contents of `container` as `viewer` sees them, bottom to top.
    pub fn observe(&self, container: ContainerId, viewer: PlayerId) -> EngineResult<Vec<Option<ComponentId>>> {
        Ok(self.require(container)?.observe(viewer))
    }

    /// Read one slot on behalf of `viewer`.
    pub fn get_as(&self, container: ContainerId, viewer: PlayerId, index: usize) -> EngineResult<ComponentId> {
        self.require(container)?.get_as(viewer, index)
    }

    /// Shuffle every component `viewer` cannot see among the slots it
    /// cannot see.
    ///
    /// Slot counts per container and every mask stay where they are, so the
    /// result is indistinguishable from the original for `viewer`.
    pub fn redeterminize(&mut self, viewer: PlayerId, rng: &mut GameRng) {
        self.redeterminize_where(viewer, rng, |_, _| true);
    }

    /// Like [`redeterminize`](Self::redeterminize), but a hidden component
    /// only lands in a container for which `allowed(component, container)`
    /// holds.
    ///
    /// Restricted components are dealt first, each to a uniformly chosen
    /// free slot it may occupy; the rest fill what is left. If some
    /// component runs out of slots the containers are left untouched.
    pub fn redeterminize_where<F>(&mut self, viewer: PlayerId, rng: &mut GameRng, allowed: F)
    where
        F: Fn(ComponentId, ContainerId) -> bool,
    {
        let mut slots: Vec<(ContainerId, usize)> = Vec::new();
        let mut hidden: Vec<ComponentId> = Vec::new();

        for (&id, container) in self.containers.iter() {
            for (index, component) in container.deck().components().enumerate() {
                if !container.is_visible(index, viewer) {
                    slots.push((id, index));
                    hidden.push(component);
                }
            }
        }

        if hidden.len() < 2 {
            return;
        }
        rng.shuffle(&mut hidden);
        hidden.sort_by_cached_key(|&component| slots.iter().all(|&(id, _)| allowed(component, id)));

        let mut free: Vec<usize> = (0..slots.len()).collect();
        let mut dealt: Vec<Option<ComponentId>> = vec![None; slots.len()];
        for component in hidden {
            let candidates: Vec<usize> = (0..free.len())
                .filter(|&i| allowed(component, slots[free[i]].0))
                .collect();
            let Some(&pick) = rng.choose(&candidates) else {
                tracing::debug!(%viewer, %component, "no hidden slot fits, keeping layout");
                return;
            };
            dealt[free.swap_remove(pick)] = Some(component);
        }

        for ((id, index), component) in slots.into_iter().zip(dealt) {
            let Some(component) = component else { continue };
            if let Some(container) = self.containers.get_mut(&id) {
                container.set(index, component);
                self.locations.insert(component, id);
            }
        }
        tracing::trace!(%viewer, "redeterminized hidden slots");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DRAW: ContainerId = ContainerId::new(0);
    const DISCARD: ContainerId = ContainerId::new(1);
    const HAND_0: ContainerId = ContainerId::new(2);
    const HAND_1: ContainerId = ContainerId::new(3);

    fn table() -> ContainerSet {
        ContainerSet::from_configs(&[
            ContainerConfig::new(DRAW, "Draw").hidden(),
            ContainerConfig::new(DISCARD, "Discard"),
            ContainerConfig::new(HAND_0, "Hand 0")
                .with_owner(PlayerId::new(0))
                .owner_only()
                .partially_observable(),
            ContainerConfig::new(HAND_1, "Hand 1")
                .with_owner(PlayerId::new(1))
                .owner_only()
                .partially_observable()
                .with_capacity(2),
        ])
    }

    #[test]
    fn test_place_and_locate() {
        let mut set = table();
        set.place(ComponentId(1), DRAW, Position::Top).unwrap();

        assert_eq!(set.location(ComponentId(1)), Some(DRAW));
        assert_eq!(set.total_components(), 1);
        assert_eq!(
            set.place(ComponentId(1), DISCARD, Position::Top),
            Err(EngineError::AlreadyPlaced {
                component: ComponentId(1),
                container: DRAW
            })
        );
    }

    #[test]
    fn test_unknown_container() {
        let mut set = table();
        assert_eq!(
            set.place(ComponentId(1), ContainerId::new(9), Position::Top),
            Err(EngineError::UnknownContainer(ContainerId::new(9)))
        );
        assert_eq!(set.location(ComponentId(1)), None);
    }

    #[test]
    fn test_move_is_atomic_on_full_destination() {
        let mut set = table();
        for i in 0..3 {
            set.place(ComponentId(i), DRAW, Position::Top).unwrap();
        }
        set.move_component(ComponentId(0), HAND_1, Position::Top).unwrap();
        set.move_component(ComponentId(1), HAND_1, Position::Top).unwrap();

        let err = set.move_component(ComponentId(2), HAND_1, Position::Top);
        assert_eq!(
            err,
            Err(EngineError::ContainerFull {
                container: HAND_1,
                capacity: 2
            })
        );
        assert_eq!(set.location(ComponentId(2)), Some(DRAW));
        assert_eq!(set.contents(DRAW).unwrap(), vec![ComponentId(2)]);
    }

    #[test]
    fn test_draw_takes_top() {
        let mut set = table();
        set.place(ComponentId(1), DRAW, Position::Top).unwrap();
        set.place(ComponentId(2), DRAW, Position::Top).unwrap();

        assert_eq!(set.draw(DRAW, HAND_0), Ok(ComponentId(2)));
        assert_eq!(set.location(ComponentId(2)), Some(HAND_0));
        assert_eq!(set.draw(DRAW, HAND_0), Ok(ComponentId(1)));
        assert_eq!(
            set.draw(DRAW, HAND_0),
            Err(EngineError::EmptyContainer { container: DRAW })
        );
    }

    #[test]
    fn test_moved_component_takes_destination_mask() {
        let mut set = table();
        set.place(ComponentId(1), HAND_0, Position::Top).unwrap();
        set.move_component(ComponentId(1), HAND_1, Position::Top).unwrap();

        assert_eq!(
            set.visibility_of(ComponentId(1)),
            Some(Visibility::only(PlayerId::new(1)))
        );
        assert_eq!(
            set.get_as(HAND_1, PlayerId::new(0), 0),
            Err(EngineError::VisibilityViolation {
                viewer: PlayerId::new(0),
                container: HAND_1,
                index: 0
            })
        );
    }

    #[test]
    fn test_grant_and_observe() {
        let mut set = table();
        set.place(ComponentId(1), HAND_0, Position::Top).unwrap();
        set.place(ComponentId(2), HAND_0, Position::Top).unwrap();
        set.grant(ComponentId(2), PlayerId::new(1)).unwrap();

        assert_eq!(
            set.observe(HAND_0, PlayerId::new(1)).unwrap(),
            vec![None, Some(ComponentId(2))]
        );
        assert_eq!(set.get_as(HAND_0, PlayerId::new(1), 1), Ok(ComponentId(2)));
    }

    #[test]
    fn test_hidden_standard_deck() {
        let mut set = table();
        set.place(ComponentId(1), DRAW, Position::Top).unwrap();

        assert_eq!(set.observe(DRAW, PlayerId::new(0)).unwrap(), vec![None]);
        assert!(set.get_as(DRAW, PlayerId::new(0), 0).is_err());
        assert_eq!(set.visibility_of(ComponentId(1)), Some(Visibility::nobody()));
    }

    #[test]
    fn test_remove() {
        let mut set = table();
        set.place(ComponentId(1), DISCARD, Position::Top).unwrap();

        assert_eq!(set.remove(ComponentId(1)), Ok(DISCARD));
        assert_eq!(set.location(ComponentId(1)), None);
        assert_eq!(set.len(DISCARD), 0);
        assert_eq!(
            set.remove(ComponentId(1)),
            Err(EngineError::UnknownComponent(ComponentId(1)))
        );
    }

    #[test]
    fn test_redeterminize_preserves_viewer_knowledge() {
        let mut set = table();
        for i in 0..6 {
            set.place(ComponentId(i), DRAW, Position::Top).unwrap();
        }
        for i in 6..9 {
            set.place(ComponentId(i), HAND_0, Position::Top).unwrap();
        }
        set.place(ComponentId(9), HAND_1, Position::Top).unwrap();
        set.place(ComponentId(10), DISCARD, Position::Top).unwrap();

        let viewer = PlayerId::new(0);
        let before: Vec<_> = set
            .iter()
            .map(|c| (c.id(), c.observe(viewer)))
            .collect();

        set.redeterminize(viewer, &mut GameRng::new(5));

        let after: Vec<_> = set
            .iter()
            .map(|c| (c.id(), c.observe(viewer)))
            .collect();
        assert_eq!(before, after);
        assert_eq!(set.total_components(), 11);
        for container in set.iter() {
            for component in container.deck().components() {
                assert_eq!(set.location(component), Some(container.id()));
            }
        }
    }

    #[test]
    fn test_restricted_components_stay_in_allowed_containers() {
        let pinned = |component: ComponentId| component.0 < 2;

        for seed in 0..40 {
            let mut set = table();
            for i in 0..4 {
                set.place(ComponentId(i), DRAW, Position::Top).unwrap();
            }
            for i in 4..6 {
                set.place(ComponentId(i), HAND_1, Position::Top).unwrap();
            }

            set.redeterminize_where(PlayerId::new(0), &mut GameRng::new(seed), |component, container| {
                !pinned(component) || container == DRAW
            });

            assert_eq!(set.location(ComponentId(0)), Some(DRAW));
            assert_eq!(set.location(ComponentId(1)), Some(DRAW));
            assert_eq!(set.len(DRAW), 4);
            assert_eq!(set.len(HAND_1), 2);
        }
    }

    #[test]
    fn test_unplaceable_component_keeps_layout() {
        let mut set = table();
        for i in 0..3 {
            set.place(ComponentId(i), DRAW, Position::Top).unwrap();
        }
        set.place(ComponentId(3), HAND_1, Position::Top).unwrap();
        let before = set.clone();

        set.redeterminize_where(PlayerId::new(0), &mut GameRng::new(3), |_, container| container == HAND_1);

        assert_eq!(set, before);
    }
}
