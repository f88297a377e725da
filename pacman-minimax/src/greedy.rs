use pacman_types::types::{
    CapsuleGettableGame, FoodGettableGame, GhostGettableGame, PacmanPositionGettableGame,
};
use serde::{Deserialize, Serialize};

use crate::features::{capsule_proximity, food_proximity, ghost_proximity, nearest_distance};

/// Beyond this distance to the nearest ghost pacman isn't considered threatened
pub const GHOST_SAFETY_DISTANCE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
/// The constants that make up the [greedy_evaluation] score
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacman_minimax::GreedyWeights;
///
/// let defaults = GreedyWeights::default();
///
/// assert_eq!(defaults.baseline, 100.0);
/// assert_eq!(defaults.food_here_reward, 3.0);
/// assert_eq!(defaults.ghost_collision_penalty, 100.0);
/// ```
pub struct GreedyWeights {
    /// Every move starts from this score
    pub baseline: f64,
    /// Added when pacman lands on a cell that held food
    pub food_here_reward: f64,
    /// Moving closer to the nearest food
    pub closer_to_food_reward: f64,
    /// Not moving closer to the nearest food. Negative
    pub further_from_food_penalty: f64,
    /// Moving closer to the nearest capsule
    pub closer_to_capsule_reward: f64,
    /// Not moving closer to the nearest capsule. Negative
    pub further_from_capsule_penalty: f64,
    /// Moving away from the nearest ghost
    pub further_from_ghost_reward: f64,
    /// Not moving away from the nearest ghost. Negative
    pub closer_to_ghost_penalty: f64,
    /// Subtracted when pacman ends up on a ghost's cell, scared or not
    pub ghost_collision_penalty: f64,
}

impl Default for GreedyWeights {
    fn default() -> Self {
        Self {
            baseline: 100.0,
            food_here_reward: 3.0,
            closer_to_food_reward: 3.0,
            further_from_food_penalty: -3.0,
            closer_to_capsule_reward: 1.0,
            further_from_capsule_penalty: -2.0,
            further_from_ghost_reward: 4.0,
            closer_to_ghost_penalty: -4.0,
            ghost_collision_penalty: 100.0,
        }
    }
}

impl GreedyWeights {
    /// When no ghost is near, stop caring about drifting towards ghosts and chase items twice as
    /// hard
    fn adjusted_for_threat(&self, nearest_ghost: Option<f64>) -> Self {
        let threatened = nearest_ghost.map_or(false, |d| d <= GHOST_SAFETY_DISTANCE);
        if threatened {
            return *self;
        }

        Self {
            closer_to_ghost_penalty: 0.0,
            further_from_food_penalty: self.further_from_food_penalty * 2.0,
            further_from_capsule_penalty: self.further_from_capsule_penalty * 2.0,
            ..*self
        }
    }
}

/// Score a single pacman move by comparing the state before it with the state after it
///
/// This is meant for one-ply decisions, see [crate::ReflexAgent]. Higher is better.
pub fn greedy_evaluation<GameType>(
    current: &GameType,
    successor: &GameType,
    weights: &GreedyWeights,
) -> f64
where
    GameType: PacmanPositionGettableGame + FoodGettableGame + CapsuleGettableGame + GhostGettableGame,
{
    let nearest_ghost = nearest_distance(&current.pacman_position(), &current.ghost_positions());
    let w = weights.adjusted_for_threat(nearest_ghost);

    let new_position = successor.pacman_position();
    let mut score = w.baseline;

    if current.food_positions().contains(&new_position) {
        score += w.food_here_reward;
    }

    score += food_proximity(
        current,
        successor,
        w.closer_to_food_reward,
        w.further_from_food_penalty,
    )
    .unwrap_or_default();

    score += capsule_proximity(
        current,
        successor,
        w.closer_to_capsule_reward,
        w.further_from_capsule_penalty,
    )
    .unwrap_or_default();

    if successor.ghost_positions().contains(&new_position) {
        score -= w.ghost_collision_penalty;
    }

    score += ghost_proximity(
        current,
        successor,
        w.further_from_ghost_reward,
        w.closer_to_ghost_penalty,
    )
    .unwrap_or_default();

    score
}

#[cfg(test)]
mod tests {
    use pacman_types::{types::*, Direction, GridGame};

    use super::*;

    fn game(layout: &str) -> GridGame {
        layout.parse().unwrap()
    }

    fn score_move(game: &GridGame, direction: Direction) -> f64 {
        let successor = game.generate_successor(PACMAN_INDEX, direction);
        greedy_evaluation(game, &successor, &GreedyWeights::default())
    }

    #[test]
    fn test_threat_adjustment_only_applies_when_safe() {
        let weights = GreedyWeights::default();

        assert_eq!(weights.adjusted_for_threat(Some(5.0)), weights);

        let relaxed = weights.adjusted_for_threat(Some(5.01));
        assert_eq!(relaxed.closer_to_ghost_penalty, 0.0);
        assert_eq!(relaxed.further_from_food_penalty, -6.0);
        assert_eq!(relaxed.further_from_capsule_penalty, -4.0);
        assert_eq!(relaxed.further_from_ghost_reward, 4.0);

        assert_eq!(weights.adjusted_for_threat(None), relaxed);
    }

    #[test]
    fn test_food_cell_beats_equidistant_empty_cell() {
        // Pacman sits between a food pellet to the east and an empty cell to the north, both
        // one step away
        let current = game("%%%%\n% %%\n%P.%\n%%%%");

        let eat = score_move(&current, Direction::East);
        let empty = score_move(&current, Direction::North);

        assert!(eat > empty, "{} should beat {}", eat, empty);
    }

    #[test]
    fn test_safe_board_scores() {
        // No ghosts and no capsules: only the food terms matter, penalties doubled
        let current = game("%%%%%%%\n%P  ..%\n%%%%%%%");

        assert_eq!(score_move(&current, Direction::East), 103.0);
        assert_eq!(score_move(&current, Direction::Stop), 94.0);
    }

    #[test]
    fn test_walking_into_a_ghost_is_heavily_penalized() {
        let current = game("%%%%%%\n%GP .%\n%%%%%%");

        let into_ghost = score_move(&current, Direction::West);
        let away = score_move(&current, Direction::East);

        // Threatened: penalties not doubled. Into the ghost: food further (-3), collision
        // (-100), ghost closer (-4)
        assert_eq!(into_ghost, 100.0 - 3.0 - 100.0 - 4.0);
        // Away: food closer (+3), ghost further (+4)
        assert_eq!(away, 100.0 + 3.0 + 4.0);
    }

    #[test]
    fn test_capsule_terms_are_counted() {
        let current = game("%%%%%%%\n%o P .%\n%%%%%%%");

        // Safe board, moving towards the capsule and away from food
        assert_eq!(score_move(&current, Direction::West), 100.0 - 6.0 + 1.0);
        // Towards food, away from the capsule
        assert_eq!(score_move(&current, Direction::East), 100.0 + 3.0 - 4.0);
    }
}
