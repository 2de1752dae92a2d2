//! Component registry: the id → component arena owned by the game state.

pub mod registry;

pub use registry::ComponentRegistry;
