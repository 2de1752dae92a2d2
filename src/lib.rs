//! # tabletop-engine
//!
//! A rules-agnostic engine for turn-based tabletop games, built to be
//! driven by search-based AI.
//!
//! ## Design Principles
//!
//! 1. **Rules-Agnostic**: The engine knows components, containers, turns and
//!    actions. Games supply everything else through the `Rules` trait.
//!
//! 2. **N-Player First**: Every API takes `player_count` as context.
//!    No convenience methods that assume 2 players.
//!
//! 3. **Cheap Copies**: Persistent data structures via `im-rs`, so a search
//!    player can copy the state thousands of times per decision.
//!
//! 4. **Hidden Information**: Partially observable containers track who has
//!    seen each component. `GameState::copy_for_player` reshuffles whatever a
//!    player cannot know.
//!
//! ## Architecture
//!
//! - **Forward Model**: `ForwardModel::next` takes one decision and runs
//!   one resolution cycle, including reaction windows and extended
//!   sequences, then ends the turn when nothing is left pending.
//!
//! - **Deterministic**: All randomness comes from the state's seeded RNG;
//!   the same seed and the same decisions replay the same game.
//!
//! ## Modules
//!
//! - `core`: Ids, players, RNG, configuration, errors, game state
//! - `components`: Component registry
//! - `containers`: Decks, partially observable decks, the container set
//! - `turns`: Turn order and turn modifiers
//! - `actions`: Action contract, extended sequences, reaction windows
//! - `rules`: `Rules` trait and game results
//! - `forward`: The Forward Model
//! - `players`: Random and rollout players, game drivers
//! - `games`: Game implementations

pub mod core;
pub mod components;
pub mod containers;
pub mod turns;
pub mod actions;
pub mod rules;
pub mod forward;
pub mod players;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Component, ComponentId, ComponentType,
    PlayerId, PlayerMap,
    GameRng, GameRngState,
    ContainerConfig, ContainerId, ContainerVisibility, GameConfig,
    EngineError, EngineResult, ErrorSeverity,
    GameState,
};

pub use crate::components::ComponentRegistry;

pub use crate::containers::{
    Container, ContainerSet, Deck, PartialObservableDeck, Position, Visibility,
};

pub use crate::turns::{TurnModifier, TurnOrder};

pub use crate::actions::{
    ActionRecord, Capability, ExtendedSequence, GameAction,
    NoSequence, ReactionWindow, Resolution,
};

pub use crate::rules::{GameResult, Rules};

pub use crate::forward::{ForwardModel, Step};

pub use crate::players::{
    Player, Playout, RandomPlayer, RolloutPlayer, SearchBudget, SearchStats,
    play_game, random_playout,
};
