//! Component arena.
//!
//! The `ComponentRegistry` owns every component of a game and hands out
//! their ids. Everything else in the state refers to components by id, so
//! copying a state is a copy of this map plus the container index views,
//! with no reference graph to rebuild.

use im::OrdMap;

use crate::core::entity::{Component, ComponentId, ComponentType};
use crate::core::error::{EngineError, EngineResult};

/// Id-indexed store of components.
///
/// Backed by `im::OrdMap`: cloning is O(1) and iteration follows id order,
/// which keeps anything derived from it deterministic.
///
/// ```
/// use tabletop_engine::components::ComponentRegistry;
/// use tabletop_engine::core::ComponentType;
///
/// let mut registry = ComponentRegistry::new();
/// let coin = registry.register(ComponentType::new(0), "Coin", 1u32);
///
/// assert_eq!(registry.get(coin).unwrap().name, "Coin");
/// assert_eq!(registry.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentRegistry<P: Clone> {
    components: OrdMap<ComponentId, Component<P>>,
    next_id: u32,
}

impl<P: Clone> Default for ComponentRegistry<P> {
    fn default() -> Self {
        Self {
            components: OrdMap::new(),
            next_id: 0,
        }
    }
}

impl<P: Clone> ComponentRegistry<P> {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a component and return its newly assigned id.
    pub fn register(
        &mut self,
        component_type: ComponentType,
        name: impl Into<String>,
        payload: P,
    ) -> ComponentId {
        let id = ComponentId(self.next_id);
        self.next_id += 1;

        self.components.insert(
            id,
            Component {
                id,
                component_type,
                name: name.into(),
                payload,
            },
        );
        id
    }

    /// Look up a component.
    #[must_use]
    pub fn get(&self, id: ComponentId) -> Option<&Component<P>> {
        self.components.get(&id)
    }

    /// Look up a component, failing with `UnknownComponent`.
    pub fn require(&self, id: ComponentId) -> EngineResult<&Component<P>> {
        self.get(id).ok_or(EngineError::UnknownComponent(id))
    }

    /// Mutable access to a component's payload.
    ///
    /// Identity and type tag stay fixed.
    pub fn payload_mut(&mut self, id: ComponentId) -> EngineResult<&mut P> {
        self.components
            .get_mut(&id)
            .map(|c| &mut c.payload)
            .ok_or(EngineError::UnknownComponent(id))
    }

    /// Check if an id is registered.
    #[must_use]
    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(&id)
    }

    /// Number of registered components.
    #[must_use]
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// Check if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Iterate over components in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Component<P>> {
        self.components.values()
    }

    /// Components with the given type tag, in id order.
    pub fn find_by_type(&self, component_type: ComponentType) -> impl Iterator<Item = &Component<P>> {
        self.components
            .values()
            .filter(move |c| c.component_type == component_type)
    }
}
