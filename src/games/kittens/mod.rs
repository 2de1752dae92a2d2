//! "Kittens": a bomb-dodging card game for testing the engine.
//!
//! Players take turns either playing one card or drawing one. Drawing a
//! Bomb eliminates you unless you hold a Defuse; the last player standing
//! wins. The cards cover every resolution path of the engine:
//!
//! - Attack and Skip queue turn modifiers
//! - Attack, Skip, Swap and Favor can be cancelled with Nope
//! - Favor and Barter run as extended sequences
//! - Hands are partially observable; traded cards become known to both sides
//!
//! Supports 2-5 players.

mod actions;
mod cards;
mod frames;
mod game;

pub use actions::KittensAction;
pub use cards::{find_in_hand, hand, kind_of, representatives, CardKind, KittensData, KittensLayout};
pub use frames::{BarterFrame, FavorFrame, KittensFrame};
pub use game::{Kittens, KittensBuilder};
