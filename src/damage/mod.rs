//! Damage events and their resolution against a defending deck.

pub mod logic;
pub mod types;

pub use logic::*;
pub use types::*;
