//! Core engine types: components, players, state, errors, RNG, configuration.
//!
//! This module contains the fundamental building blocks that are game-agnostic.
//! Games configure these via `GameConfig` rather than modifying the core.

pub mod entity;
pub mod player;
pub mod rng;
pub mod config;
pub mod error;
pub mod state;

pub use entity::{Component, ComponentId, ComponentType};
pub use player::{PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use config::{ContainerConfig, ContainerId, ContainerVisibility, GameConfig};
pub use error::{EngineError, EngineResult, ErrorSeverity};
pub use state::GameState;
