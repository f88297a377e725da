//! Tree search for the single maximizing agent, pacman, against every ghost in the game.
//!
//! There are three variants in here, and they share one recursive walk:
//!
//! - Minimax assumes every ghost is working to minimize pacman's score.
//! - Alpha-Beta returns exactly what minimax returns, but skips subtrees that can't change the
//!   answer.
//! - Expectimax treats each ghost as picking a legal move uniformly at random and propagates the
//!   average instead of the minimum.
//!
//! Scores are always from pacman's point of view. A ply is one full round where pacman and every
//! ghost have each moved once, and `max_depth` counts plies.
//!
//! ```rust
//! use pacman_minimax::search::{ChanceModel, MultiAgentSearch, SearchOptions, SearchAlgorithm};
//! use pacman_minimax::score_evaluation;
//! use pacman_types::GridGame;
//!
//! let game: GridGame = "%%%%%%%\n%P. .G%\n%%%%%%%".parse().unwrap();
//!
//! let options = SearchOptions {
//!     max_depth: 3,
//!     chance_model: ChanceModel::Resampled { seed: Some(42) },
//! };
//! let expectimax = MultiAgentSearch::new(
//!     SearchAlgorithm::Expectimax,
//!     score_evaluation::<GridGame>,
//!     options,
//! );
//!
//! let outcome = expectimax.search(&game);
//! println!("{}", outcome.to_text_tree());
//! ```

mod policy;
pub use policy::{dispatch, next_turn, AdversaryPolicy, ChanceModel, SearchAlgorithm, Step};

mod outcome;
pub use outcome::{SearchOutcome, SearchStats};

mod engine;
pub use engine::{MultiAgentSearch, SearchOptions};
