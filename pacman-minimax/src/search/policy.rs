use std::{fmt::Display, str::FromStr};

use pacman_types::types::{VictorDeterminableGame, PACMAN_INDEX};
use serde::{Deserialize, Serialize};

use crate::ConfigurationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What kind of node a turn in the game tree is
pub enum Step {
    /// Stop here and score the state with the evaluation function
    Leaf,
    /// Pacman's turn, take the best child
    Max,
    /// A ghost's turn. Whether the children are minimized or averaged is up to the
    /// [AdversaryPolicy] of the engine
    Adversary,
}

/// Decide what kind of node `(agent_index, ply)` is
///
/// A node is a leaf once `max_depth` full rounds have been played or the game has been decided.
/// Otherwise pacman maximizes and everybody else is an adversary.
pub fn dispatch<GameType: VictorDeterminableGame>(
    agent_index: usize,
    ply: usize,
    game: &GameType,
    max_depth: usize,
) -> Step {
    if ply >= max_depth || game.is_win() || game.is_lose() {
        Step::Leaf
    } else if agent_index == PACMAN_INDEX {
        Step::Max
    } else {
        Step::Adversary
    }
}

/// Whose turn comes after `agent_index`, and at which ply
///
/// The ply only advances once the last agent of the round has moved and control returns to
/// pacman.
pub fn next_turn(agent_index: usize, ply: usize, agent_count: usize) -> (usize, usize) {
    let next = agent_index + 1;
    if next >= agent_count {
        (PACMAN_INDEX, ply + 1)
    } else {
        (next, ply)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a chance node turns its children into one value
pub enum ChanceModel {
    /// Average over every legal action's own successor, each weighted `1/N`
    Uniform,
    /// For each of the `N` legal actions draw a random legal action, and average over the
    /// successors of the drawn actions. This only approximates the expectation.
    ///
    /// With a seed every search is reproducible; without one the generator is seeded from
    /// entropy.
    Resampled {
        #[allow(missing_docs)]
        seed: Option<u64>,
    },
}

impl Default for ChanceModel {
    fn default() -> Self {
        ChanceModel::Uniform
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// How adversary turns aggregate their children. This is the only thing that differs between
/// the search engines
pub enum AdversaryPolicy {
    /// Take the minimum
    Minimize,
    /// Take the minimum, pruning with alpha-beta bounds. Pacman's turns prune too
    MinimizePruned,
    /// Take the expectation under a uniformly random ghost
    Expectation(ChanceModel),
}

impl AdversaryPolicy {
    /// Whether this policy carries and prunes on alpha-beta bounds
    pub fn prunes(&self) -> bool {
        matches!(self, AdversaryPolicy::MinimizePruned)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The search engines this crate provides
pub enum SearchAlgorithm {
    #[allow(missing_docs)]
    Minimax,
    /// Minimax with alpha-beta pruning. Same answers, less work
    AlphaBeta,
    /// Ghosts move uniformly at random instead of adversarially
    Expectimax,
}

impl SearchAlgorithm {
    /// The adversary policy this algorithm uses. The chance model only matters for
    /// [SearchAlgorithm::Expectimax]
    pub fn adversary_policy(&self, chance_model: ChanceModel) -> AdversaryPolicy {
        match self {
            SearchAlgorithm::Minimax => AdversaryPolicy::Minimize,
            SearchAlgorithm::AlphaBeta => AdversaryPolicy::MinimizePruned,
            SearchAlgorithm::Expectimax => AdversaryPolicy::Expectation(chance_model),
        }
    }
}

impl FromStr for SearchAlgorithm {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "minimax" | "minimaxagent" => Ok(SearchAlgorithm::Minimax),
            "alphabeta" | "alpha-beta" | "alphabetaagent" => Ok(SearchAlgorithm::AlphaBeta),
            "expectimax" | "expectimaxagent" => Ok(SearchAlgorithm::Expectimax),
            _ => Err(ConfigurationError::UnknownAgent(s.to_owned())),
        }
    }
}

impl Display for SearchAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SearchAlgorithm::Minimax => "MinimaxAgent",
            SearchAlgorithm::AlphaBeta => "AlphaBetaAgent",
            SearchAlgorithm::Expectimax => "ExpectimaxAgent",
        };

        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use pacman_types::{types::*, Direction, GridGame};

    use super::*;

    #[test]
    fn test_turns_rotate_and_advance_the_ply() {
        assert_eq!(next_turn(0, 0, 3), (1, 0));
        assert_eq!(next_turn(1, 0, 3), (2, 0));
        assert_eq!(next_turn(2, 0, 3), (0, 1));
        assert_eq!(next_turn(0, 4, 1), (0, 5));
    }

    #[test]
    fn test_dispatch() {
        let game: GridGame = "%%%%%%\n%P. G%\n%%%%%%".parse().unwrap();

        assert_eq!(dispatch(0, 0, &game, 2), Step::Max);
        assert_eq!(dispatch(1, 1, &game, 2), Step::Adversary);
        assert_eq!(dispatch(0, 2, &game, 2), Step::Leaf);
        assert_eq!(dispatch(1, 0, &game, 0), Step::Leaf);
    }

    #[test]
    fn test_decided_games_are_leaves() {
        let game: GridGame = "%%%%%\n%P.G%\n%%%%%".parse().unwrap();
        let won = game.generate_successor(PACMAN_INDEX, Direction::East);

        assert!(won.is_win());
        assert_eq!(dispatch(0, 0, &won, 5), Step::Leaf);
        assert_eq!(dispatch(1, 0, &won, 5), Step::Leaf);
    }

    #[test]
    fn test_algorithm_names() {
        assert_eq!("MinimaxAgent".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::Minimax));
        assert_eq!("alphabeta".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::AlphaBeta));
        assert_eq!("ExpectimaxAgent".parse::<SearchAlgorithm>(), Ok(SearchAlgorithm::Expectimax));
        assert_eq!(
            "GreedyAgent".parse::<SearchAlgorithm>(),
            Err(ConfigurationError::UnknownAgent("GreedyAgent".to_owned()))
        );

        for algorithm in [
            SearchAlgorithm::Minimax,
            SearchAlgorithm::AlphaBeta,
            SearchAlgorithm::Expectimax,
        ] {
            assert_eq!(algorithm.to_string().parse::<SearchAlgorithm>(), Ok(algorithm));
        }
    }

    #[test]
    fn test_only_alpha_beta_prunes() {
        let chance = ChanceModel::default();

        assert!(!SearchAlgorithm::Minimax.adversary_policy(chance).prunes());
        assert!(SearchAlgorithm::AlphaBeta.adversary_policy(chance).prunes());
        assert_eq!(
            SearchAlgorithm::Expectimax.adversary_policy(chance),
            AdversaryPolicy::Expectation(ChanceModel::Uniform)
        );
    }
}
