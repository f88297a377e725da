#![deny(
    warnings,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs
)]
//! This crate implements adversarial search for Pacman. One maximizing agent (pacman, index 0)
//! plays against any number of ghosts that either minimize its score or move uniformly at random.
//!
//! There are two families of decision makers in here:
//!
//! - The [search] engines: minimax, alpha-beta and expectimax. These walk the game tree to a
//!   fixed number of plies and score the leaves with an evaluation function you provide.
//! - The [ReflexAgent], which only looks one move ahead and scores each move with the
//!   [greedy_evaluation] heuristic.
//!
//! We lean on the `pacman-types` crate for the game itself. Nothing in here looks inside a game
//! state; everything goes through its capability traits.
//!
//! ```rust
//! use pacman_minimax::search::{MultiAgentSearch, SearchAlgorithm, SearchOptions};
//! use pacman_minimax::score_evaluation;
//! use pacman_types::{Direction, GridGame};
//!
//! let game: GridGame = "%%%%%\n%P .%\n%%%%%".parse().unwrap();
//!
//! let search = MultiAgentSearch::new(
//!     SearchAlgorithm::AlphaBeta,
//!     score_evaluation::<GridGame>,
//!     SearchOptions::default(),
//! );
//!
//! let outcome = search.search(&game);
//! assert_eq!(outcome.action(), Some(Direction::East));
//! ```

mod error;
pub use error::ConfigurationError;

mod distance;
pub use distance::distance;

pub mod features;

mod greedy;
pub use greedy::{greedy_evaluation, GreedyWeights, GHOST_SAFETY_DISTANCE};

mod score;
pub use score::{better_evaluation, score_evaluation, EvaluationFunction, Scorable};

pub mod search;

mod agent;
pub use agent::{AgentKind, AgentSpec, BoxedAgent, PacmanAgent, ReflexAgent};
