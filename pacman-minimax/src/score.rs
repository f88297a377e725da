use std::{fmt::Display, str::FromStr};

use pacman_types::types::{
    FoodGettableGame, GhostGettableGame, PacmanPositionGettableGame, ScoreGettableGame,
};

use crate::{distance, features::nearest_distance, ConfigurationError};

/// This trait is used to control something that can return a score from a game state
///
/// We use this trait so that the search engines can take either a plain function or one of the
/// named [EvaluationFunction]s as their leaf evaluation
pub trait Scorable<GameType, ScoreType> {
    /// Convert the given GameType into a ScoreType
    fn score(&self, game: &GameType) -> ScoreType;
}

impl<GameType, ScoreType, FnLike: Fn(&GameType) -> ScoreType> Scorable<GameType, ScoreType>
    for FnLike
{
    fn score(&self, game: &GameType) -> ScoreType {
        (self)(game)
    }
}

/// The default evaluation: the game's own score
pub fn score_evaluation<GameType: ScoreGettableGame>(game: &GameType) -> f64 {
    game.raw_score()
}

const FOOD_WEIGHT: f64 = 10.0;
const SCARED_GHOST_WEIGHT: f64 = 200.0;
const ACTIVE_GHOST_WEIGHT: f64 = 50.0;
const ACTIVE_GHOST_RADIUS: f64 = 2.0;

/// A state-only heuristic that improves on the raw score for deeper searches
///
/// On top of the game score it pulls pacman towards the nearest food, towards a scared ghost it
/// can still reach before the ghost recovers, and away from any active ghost that is right next
/// to it.
pub fn better_evaluation<GameType>(game: &GameType) -> f64
where
    GameType: ScoreGettableGame + PacmanPositionGettableGame + FoodGettableGame + GhostGettableGame,
{
    let pacman = game.pacman_position();
    let mut score = game.raw_score();

    if let Some(d) = nearest_distance(&pacman, &game.food_positions()) {
        score += FOOD_WEIGHT / (1.0 + d);
    }

    let ghosts = game.ghost_positions();
    let timers = game.ghost_scared_timers();

    let reachable_scared = ghosts
        .iter()
        .zip(timers.iter())
        .map(|(g, t)| (distance(&pacman, g), *t))
        .filter(|(d, t)| f64::from(*t) > *d)
        .map(|(d, _)| d)
        .min_by(|a, b| a.total_cmp(b));
    if let Some(d) = reachable_scared {
        score += SCARED_GHOST_WEIGHT / (1.0 + d);
    }

    for (ghost, timer) in ghosts.iter().zip(timers.iter()) {
        let d = distance(&pacman, ghost);
        if *timer == 0 && d < ACTIVE_GHOST_RADIUS {
            score -= ACTIVE_GHOST_WEIGHT / (1.0 + d);
        }
    }

    score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The evaluation functions that can be looked up by name
///
/// Names are resolved once, when an agent is built, so an unknown name is reported before any
/// search starts.
pub enum EvaluationFunction {
    /// [score_evaluation]
    Score,
    /// [better_evaluation]
    Better,
}

impl Default for EvaluationFunction {
    fn default() -> Self {
        EvaluationFunction::Score
    }
}

impl FromStr for EvaluationFunction {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "score" | "scoreEvaluationFunction" => Ok(EvaluationFunction::Score),
            "better" | "betterEvaluationFunction" => Ok(EvaluationFunction::Better),
            _ => Err(ConfigurationError::UnknownEvaluationFunction(s.to_owned())),
        }
    }
}

impl Display for EvaluationFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EvaluationFunction::Score => write!(f, "scoreEvaluationFunction"),
            EvaluationFunction::Better => write!(f, "betterEvaluationFunction"),
        }
    }
}

impl<GameType> Scorable<GameType, f64> for EvaluationFunction
where
    GameType: ScoreGettableGame + PacmanPositionGettableGame + FoodGettableGame + GhostGettableGame,
{
    fn score(&self, game: &GameType) -> f64 {
        match self {
            EvaluationFunction::Score => score_evaluation(game),
            EvaluationFunction::Better => better_evaluation(game),
        }
    }
}

#[cfg(test)]
mod tests {
    use pacman_types::{types::*, Direction, GridGame};

    use super::*;

    #[test]
    fn test_closures_are_scorable() {
        let game: GridGame = "%%%%\n%P.%\n%%%%".parse().unwrap();
        let constant = |_: &GridGame| 4.0;

        assert_eq!(constant.score(&game), 4.0);
        assert_eq!(Scorable::<GridGame, f64>::score(&score_evaluation::<GridGame>, &game), 0.0);
    }

    #[test]
    fn test_names_resolve() {
        assert_eq!(
            "scoreEvaluationFunction".parse::<EvaluationFunction>(),
            Ok(EvaluationFunction::Score)
        );
        assert_eq!("better".parse::<EvaluationFunction>(), Ok(EvaluationFunction::Better));
        assert_eq!(
            "betterEvaluationFunction".parse::<EvaluationFunction>(),
            Ok(EvaluationFunction::Better)
        );
    }

    #[test]
    fn test_unknown_name_is_a_configuration_error() {
        assert_eq!(
            "nope".parse::<EvaluationFunction>(),
            Err(ConfigurationError::UnknownEvaluationFunction(
                "nope".to_owned()
            ))
        );
    }

    #[test]
    fn test_named_score_matches_raw_score() {
        let game: GridGame = "%%%%%\n%P .%\n%%%%%".parse().unwrap();
        let game = game.generate_successor(PACMAN_INDEX, Direction::East);

        assert_eq!(EvaluationFunction::Score.score(&game), game.raw_score());
    }

    #[test]
    fn test_better_prefers_being_near_food() {
        let near: GridGame = "%%%%%%%\n%   P.%\n%%%%%%%".parse().unwrap();
        let far: GridGame = "%%%%%%%\n%P   .%\n%%%%%%%".parse().unwrap();

        assert!(better_evaluation(&near) > better_evaluation(&far));
        assert_eq!(better_evaluation(&near), 5.0);
    }

    #[test]
    fn test_better_fears_adjacent_active_ghosts() {
        let game: GridGame = "%%%%%%%\n%GP  .%\n%%%%%%%".parse().unwrap();

        // food at distance 3 (+2.5), active ghost at distance 1 (-25)
        assert_eq!(better_evaluation(&game), 2.5 - 25.0);
    }

    #[test]
    fn test_better_chases_reachable_scared_ghosts() {
        let game: GridGame = "%%%%%%%\n%Po G.%\n%%%%%%%".parse().unwrap();
        let scared = game.generate_successor(PACMAN_INDEX, Direction::East);

        // pacman at (2, 1), ghost at (4, 1) scared for 40, food at (5, 1)
        assert_eq!(
            better_evaluation(&scared),
            scared.raw_score() + 10.0 / 4.0 + 200.0 / 3.0
        );
    }
}
