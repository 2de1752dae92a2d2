//! Component identity.
//!
//! Every piece of game content (card, token, pawn) is a `Component` with a
//! `ComponentId` handed out by the state's registry. Containers and actions
//! refer to components by id only; the registry is the single owner of the
//! component values.

use serde::{Deserialize, Serialize};

/// Identity of a component, unique within one simulation run.
///
/// Copies of a state keep allocating from the same counter, so ids stay
/// unique along any line of play.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ComponentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Component({})", self.0)
    }
}

/// Opaque type tag. Games decide what the values mean.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ComponentType(pub u16);

impl ComponentType {
    /// Create a new type tag.
    #[must_use]
    pub const fn new(tag: u16) -> Self {
        Self(tag)
    }
}

/// A game object: identity, type tag, display name and game payload.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Component<P> {
    /// Identity assigned at registration. Never changes.
    pub id: ComponentId,

    /// Type tag (card kind, token kind...).
    pub component_type: ComponentType,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Game-specific data.
    pub payload: P,
}
