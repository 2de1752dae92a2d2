//! Game configuration types.
//!
//! Game content configures the engine at setup time:
//! - `ContainerConfig`: one deck, pile or hand (visibility, owner, capacity)
//! - `GameConfig`: seats, seed, first player, round limit and containers
//!
//! `GameState::new` turns a `GameConfig` into an initial state.

use serde::{Deserialize, Serialize};

use super::PlayerId;

/// Container identifier. Games choose the values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ContainerId(pub u16);

impl ContainerId {
    /// Create a new container ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Container({})", self.0)
    }
}

/// Who may look at a container's contents by default.
///
/// For partially observable decks this is only the mask given to newly
/// inserted components; each component's mask can change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerVisibility {
    /// Everyone sees the contents (discard pile).
    Public,
    /// Only the owner sees the contents (hand).
    OwnerOnly,
    /// Nobody sees the contents (face-down draw pile).
    Hidden,
}

/// Configuration for a single container.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerConfig {
    /// Unique identifier for this container.
    pub id: ContainerId,

    /// Human-readable name (for debugging/display).
    pub name: String,

    /// Owning seat. `None` for shared containers.
    pub owner: Option<PlayerId>,

    /// Default visibility.
    pub visibility: ContainerVisibility,

    /// Track a visibility mask per component.
    pub partially_observable: bool,

    /// Maximum components allowed. `None` for unlimited.
    pub capacity: Option<usize>,
}

impl ContainerConfig {
    /// A public, unbounded, shared container.
    pub fn new(id: ContainerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            owner: None,
            visibility: ContainerVisibility::Public,
            partially_observable: false,
            capacity: None,
        }
    }

    /// Set the owning seat.
    #[must_use]
    pub fn with_owner(mut self, owner: PlayerId) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Only the owner sees the contents.
    #[must_use]
    pub fn owner_only(mut self) -> Self {
        self.visibility = ContainerVisibility::OwnerOnly;
        self
    }

    /// Nobody sees the contents.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visibility = ContainerVisibility::Hidden;
        self
    }

    /// Track per-component visibility masks.
    #[must_use]
    pub fn partially_observable(mut self) -> Self {
        self.partially_observable = true;
        self
    }

    /// Limit the number of components.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }
}

/// Complete setup for one simulation run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of seats (1-255).
    pub player_count: usize,

    /// Seed for the state's RNG stream.
    pub seed: u64,

    /// Seat that takes the first turn.
    pub first_player: PlayerId,

    /// Rounds after which the turn order reports exhaustion.
    pub max_rounds: Option<u32>,

    /// Containers created at setup.
    pub containers: Vec<ContainerConfig>,
}

impl GameConfig {
    /// Create a configuration with no containers.
    pub fn new(player_count: usize) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        Self {
            player_count,
            seed: 0,
            first_player: PlayerId::new(0),
            max_rounds: None,
            containers: Vec::new(),
        }
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the starting seat.
    #[must_use]
    pub fn with_first_player(mut self, player: PlayerId) -> Self {
        assert!(player.index() < self.player_count, "First player must be seated");
        self.first_player = player;
        self
    }

    /// Limit the number of rounds.
    #[must_use]
    pub fn with_max_rounds(mut self, rounds: u32) -> Self {
        self.max_rounds = Some(rounds);
        self
    }

    /// Add a container.
    #[must_use]
    pub fn with_container(mut self, container: ContainerConfig) -> Self {
        self.containers.push(container);
        self
    }

    /// Look up a container config by ID.
    #[must_use]
    pub fn get_container(&self, id: ContainerId) -> Option<&ContainerConfig> {
        self.containers.iter().find(|c| c.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_container_id() {
        let id = ContainerId::new(5);
        assert_eq!(id.raw(), 5);
        assert_eq!(format!("{}", id), "Container(5)");
    }

    #[test]
    fn test_container_config_builder() {
        let hand = ContainerConfig::new(ContainerId::new(0), "Hand")
            .with_owner(PlayerId::new(1))
            .owner_only()
            .partially_observable()
            .with_capacity(7);

        assert_eq!(hand.owner, Some(PlayerId::new(1)));
        assert_eq!(hand.visibility, ContainerVisibility::OwnerOnly);
        assert!(hand.partially_observable);
        assert_eq!(hand.capacity, Some(7));
    }

    #[test]
    fn test_container_config_defaults() {
        let pile = ContainerConfig::new(ContainerId::new(1), "Discard");

        assert_eq!(pile.owner, None);
        assert_eq!(pile.visibility, ContainerVisibility::Public);
        assert!(!pile.partially_observable);
        assert_eq!(pile.capacity, None);
    }

    #[test]
    fn test_game_config() {
        let config = GameConfig::new(3)
            .with_seed(9)
            .with_first_player(PlayerId::new(2))
            .with_max_rounds(10)
            .with_container(ContainerConfig::new(ContainerId::new(0), "Draw").hidden());

        assert_eq!(config.player_count, 3);
        assert_eq!(config.seed, 9);
        assert_eq!(config.first_player, PlayerId::new(2));
        assert_eq!(config.max_rounds, Some(10));
        assert!(config.get_container(ContainerId::new(0)).is_some());
        assert!(config.get_container(ContainerId::new(1)).is_none());
    }

    #[test]
    fn test_game_config_serialization() {
        let config = GameConfig::new(2)
            .with_container(ContainerConfig::new(ContainerId::new(0), "Pile"));
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    #[should_panic(expected = "Must have at least 1 player")]
    fn test_game_config_zero_players() {
        GameConfig::new(0);
    }

    #[test]
    #[should_panic(expected = "First player must be seated")]
    fn test_first_player_out_of_range() {
        let _ = GameConfig::new(2).with_first_player(PlayerId::new(2));
    }
}
