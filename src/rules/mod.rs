//! Rules trait for game implementations.
//!
//! Games implement `Rules` to define:
//! - Legal actions for each game state
//! - Who may contest a pending action
//! - Win/loss conditions
//!
//! The Forward Model calls into `Rules` but never interprets
//! game-specific concepts directly.

pub mod engine;

pub use engine::{GameResult, Rules};
