//! The Forward Model: maps (state, action) to the next state.
//!
//! See `model` for the per-cycle algorithm.

pub mod model;

pub use model::{ForwardModel, Step};
