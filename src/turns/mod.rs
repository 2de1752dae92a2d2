//! Turn order: whose outer turn it is and who comes next.
//!
//! `TurnOrder` holds the seat, round and turn counters. Actions influence
//! the rotation only through queued `TurnModifier`s, which are consumed the
//! moment they take effect.

pub mod modifier;
pub mod order;

pub use modifier::TurnModifier;
pub use order::TurnOrder;
