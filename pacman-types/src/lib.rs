#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! Game types for the Pacman search agents.
//!
//! The search crate never looks inside a game state. Instead it talks to it through the small
//! capability traits in [types], the same way every other consumer does. [GridGame] is the
//! reference implementation of those traits: a grid maze with food, capsules and ghosts that can
//! be parsed from the classic layout text format or from its JSON wire representation.

pub mod types;

mod position;
pub use position::{Direction, Position};

mod layout;
pub use layout::LayoutError;

mod grid;
pub use grid::{GhostState, GridGame};
