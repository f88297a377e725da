//! Feature scorers comparing a state with the state one pacman move later.
//!
//! Each scorer answers one question: did this move bring pacman closer to (or further from) the
//! nearest item of some kind? They return `Some(reward)` or `Some(penalty)`, or `None` when there
//! is nothing to compare against, for example once every capsule has been eaten. Callers treat
//! `None` as contributing nothing.

use pacman_types::{
    types::{CapsuleGettableGame, FoodGettableGame, GhostGettableGame, PacmanPositionGettableGame},
    Position,
};

use crate::distance;

/// Minimum distance from `from` to any of `targets`, or `None` if there are no targets
pub fn nearest_distance(from: &Position, targets: &[Position]) -> Option<f64> {
    targets
        .iter()
        .map(|t| distance(from, t))
        .min_by(|a, b| a.total_cmp(b))
}

fn compare_nearest(
    current_pacman: &Position,
    current_targets: &[Position],
    successor_pacman: &Position,
    successor_targets: &[Position],
) -> Option<(f64, f64)> {
    let current = nearest_distance(current_pacman, current_targets)?;
    let successor = nearest_distance(successor_pacman, successor_targets)?;

    Some((current, successor))
}

/// Reward moving towards the nearest food, penalize anything else
pub fn food_proximity<GameType>(
    current: &GameType,
    successor: &GameType,
    reward: f64,
    penalty: f64,
) -> Option<f64>
where
    GameType: PacmanPositionGettableGame + FoodGettableGame,
{
    let (before, after) = compare_nearest(
        &current.pacman_position(),
        &current.food_positions(),
        &successor.pacman_position(),
        &successor.food_positions(),
    )?;

    Some(if before > after { reward } else { penalty })
}

/// Reward moving towards the nearest capsule, penalize anything else
pub fn capsule_proximity<GameType>(
    current: &GameType,
    successor: &GameType,
    reward: f64,
    penalty: f64,
) -> Option<f64>
where
    GameType: PacmanPositionGettableGame + CapsuleGettableGame,
{
    let (before, after) = compare_nearest(
        &current.pacman_position(),
        &current.capsule_positions(),
        &successor.pacman_position(),
        &successor.capsule_positions(),
    )?;

    Some(if before > after { reward } else { penalty })
}

/// Reward moving away from the nearest ghost, penalize anything else
pub fn ghost_proximity<GameType>(
    current: &GameType,
    successor: &GameType,
    reward: f64,
    penalty: f64,
) -> Option<f64>
where
    GameType: PacmanPositionGettableGame + GhostGettableGame,
{
    let (before, after) = compare_nearest(
        &current.pacman_position(),
        &current.ghost_positions(),
        &successor.pacman_position(),
        &successor.ghost_positions(),
    )?;

    Some(if before < after { reward } else { penalty })
}
