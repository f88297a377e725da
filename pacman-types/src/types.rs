//! Capability traits describing the read-only query surface of a game state.
//!
//! Each trait covers one concern so that consumers can ask for exactly what they need. The tree
//! search only needs the first handful; the greedy evaluator additionally needs the positional
//! getters.

use std::fmt::Debug;

use crate::Position;

/// The index of the single maximizing agent. Ghosts are `1..agent_count()`.
pub const PACMAN_INDEX: usize = 0;

/// A game that knows how many agents take turns in it
pub trait AgentCountableGame {
    /// Total number of agents, including pacman. Always at least 1
    fn agent_count(&self) -> usize;
}

/// A game that can list the legal actions for a given agent
pub trait ActionGeneratableGame {
    /// The action type agents choose between
    type Action: Copy + Debug + PartialEq;

    /// Actions available to `agent_index` in this state. An empty list is valid, and is what a
    /// finished game returns
    fn legal_actions(&self, agent_index: usize) -> Vec<Self::Action>;
}

/// A game that can produce the state that results from an agent taking an action
///
/// This must be a pure transition: `self` is left untouched and a new state is returned.
pub trait SuccessorGeneratableGame: ActionGeneratableGame + Sized {
    /// Apply `action` for `agent_index` and return the resulting state
    fn generate_successor(&self, agent_index: usize, action: Self::Action) -> Self;
}

/// A game that can tell whether it has been decided
pub trait VictorDeterminableGame {
    /// Pacman has won
    fn is_win(&self) -> bool;

    /// Pacman has lost
    fn is_lose(&self) -> bool;

    /// The game is decided one way or the other
    fn is_over(&self) -> bool {
        self.is_win() || self.is_lose()
    }
}

/// A game with an intrinsic cumulative score
pub trait ScoreGettableGame {
    /// The game's own score, as it would be displayed to a player
    fn raw_score(&self) -> f64;
}

/// A game where we can locate pacman
pub trait PacmanPositionGettableGame {
    /// Where pacman currently is
    fn pacman_position(&self) -> Position;
}

/// A game with food left on the board
pub trait FoodGettableGame {
    /// Every cell that still holds food
    fn food_positions(&self) -> Vec<Position>;
}

/// A game with power capsules
pub trait CapsuleGettableGame {
    /// Every cell that still holds a capsule
    fn capsule_positions(&self) -> Vec<Position>;
}

/// A game with ghosts whose positions and scared timers can be queried
pub trait GhostGettableGame {
    /// Ghost positions, ordered by agent index (ghost `i` is agent `i + 1`)
    fn ghost_positions(&self) -> Vec<Position>;

    /// Remaining scared moves for each ghost, in the same order as [Self::ghost_positions]
    fn ghost_scared_timers(&self) -> Vec<u32>;
}
