use std::{fmt::Display, str::FromStr};

use itertools::Itertools;
use pacman_types::types::{
    AgentCountableGame, CapsuleGettableGame, FoodGettableGame, GhostGettableGame,
    PacmanPositionGettableGame, ScoreGettableGame, SuccessorGeneratableGame,
    VictorDeterminableGame, PACMAN_INDEX,
};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use tracing::debug;

use crate::{
    greedy_evaluation,
    search::{ChanceModel, MultiAgentSearch, SearchAlgorithm, SearchOptions},
    ConfigurationError, EvaluationFunction, GreedyWeights, Scorable,
};

/// Anything that can pick pacman's next action
pub trait PacmanAgent<GameType: SuccessorGeneratableGame> {
    /// The name this agent goes by, as accepted by [AgentSpec::parse]
    fn name(&self) -> String;

    /// Pick an action for pacman, or `None` if pacman has no legal actions
    fn get_action(&mut self, game: &GameType) -> Option<GameType::Action>;
}

/// A boxed [PacmanAgent], as built by [AgentSpec::build]
pub type BoxedAgent<GameType> = Box<dyn PacmanAgent<GameType>>;

impl<GameType, ScorableType> PacmanAgent<GameType> for MultiAgentSearch<GameType, ScorableType>
where
    GameType: AgentCountableGame + SuccessorGeneratableGame + VictorDeterminableGame,
    GameType::Action: Display,
    ScorableType: Scorable<GameType, f64>,
{
    fn name(&self) -> String {
        self.algorithm().to_string()
    }

    fn get_action(&mut self, game: &GameType) -> Option<GameType::Action> {
        self.search(game).action()
    }
}

#[derive(Debug, Clone)]
/// Looks a single move ahead and takes the move [greedy_evaluation] likes best
///
/// When several moves share the best score one of them is picked at random.
pub struct ReflexAgent {
    weights: GreedyWeights,
    rng: StdRng,
}

impl ReflexAgent {
    /// Build a reflex agent. With a seed the tie-breaks are reproducible
    pub fn new(weights: GreedyWeights, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self { weights, rng }
    }

    /// Every legal pacman action with its greedy score, in the order the game listed them
    pub fn scored_actions<GameType>(&self, game: &GameType) -> Vec<(GameType::Action, f64)>
    where
        GameType: SuccessorGeneratableGame
            + PacmanPositionGettableGame
            + FoodGettableGame
            + CapsuleGettableGame
            + GhostGettableGame,
    {
        game.legal_actions(PACMAN_INDEX)
            .into_iter()
            .map(|action| {
                let successor = game.generate_successor(PACMAN_INDEX, action);
                (action, greedy_evaluation(game, &successor, &self.weights))
            })
            .collect_vec()
    }
}

impl<GameType> PacmanAgent<GameType> for ReflexAgent
where
    GameType: SuccessorGeneratableGame
        + PacmanPositionGettableGame
        + FoodGettableGame
        + CapsuleGettableGame
        + GhostGettableGame,
{
    fn name(&self) -> String {
        "ReflexAgent".to_owned()
    }

    fn get_action(&mut self, game: &GameType) -> Option<GameType::Action> {
        let scored = self.scored_actions(game);
        let best_score = scored
            .iter()
            .map(|(_, score)| *score)
            .fold(f64::NEG_INFINITY, f64::max);

        let best_actions = scored
            .iter()
            .filter(|(_, score)| *score == best_score)
            .map(|(action, _)| *action)
            .collect_vec();

        let chosen = best_actions.choose(&mut self.rng).copied();
        debug!(?chosen, best_score, ties = best_actions.len(), "Reflex agent chose");

        chosen
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Every kind of agent [AgentSpec] knows how to build
pub enum AgentKind {
    /// [ReflexAgent]
    Reflex,
    /// A [MultiAgentSearch] running the given algorithm
    Search(SearchAlgorithm),
}

impl FromStr for AgentKind {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "reflex" | "reflexagent" => Ok(AgentKind::Reflex),
            _ => s.parse().map(AgentKind::Search),
        }
    }
}

impl Display for AgentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentKind::Reflex => write!(f, "ReflexAgent"),
            AgentKind::Search(algorithm) => write!(f, "{}", algorithm),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Everything needed to build an agent, resolved from an agent name and its arguments
///
/// ```
/// use pacman_minimax::{AgentKind, AgentSpec, EvaluationFunction};
/// use pacman_minimax::search::SearchAlgorithm;
///
/// let spec = AgentSpec::parse("AlphaBetaAgent", "depth=3,evalFn=better").unwrap();
///
/// assert_eq!(spec.kind, AgentKind::Search(SearchAlgorithm::AlphaBeta));
/// assert_eq!(spec.options.max_depth, 3);
/// assert_eq!(spec.evaluation, EvaluationFunction::Better);
/// ```
pub struct AgentSpec {
    #[allow(missing_docs)]
    pub kind: AgentKind,
    /// Leaf evaluation for the search agents
    pub evaluation: EvaluationFunction,
    #[allow(missing_docs)]
    pub options: SearchOptions,
    /// Seeds the reflex agent's tie-breaks and resampled expectimax
    pub seed: Option<u64>,
    /// Only used by the reflex agent
    pub weights: GreedyWeights,
}

enum ChanceChoice {
    Uniform,
    Resampled,
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigurationError> {
    value.parse().map_err(|_| ConfigurationError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    })
}

impl AgentSpec {
    /// Resolve an agent name plus comma separated `key=value` arguments
    ///
    /// The keys are `depth`, `evalFn`, `seed` and `chance` (`uniform` or `resampled`). Anything
    /// that doesn't resolve is a [ConfigurationError].
    pub fn parse(name: &str, args: &str) -> Result<Self, ConfigurationError> {
        let kind: AgentKind = name.parse()?;

        let mut evaluation = EvaluationFunction::default();
        let mut max_depth = SearchOptions::default().max_depth;
        let mut seed = None;
        let mut chance = ChanceChoice::Uniform;

        for pair in args.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            let (key, value) = pair
                .split_once('=')
                .ok_or_else(|| ConfigurationError::MalformedArgument(pair.to_owned()))?;
            let (key, value) = (key.trim(), value.trim());

            match key {
                "depth" => max_depth = parse_value(key, value)?,
                "evalFn" => evaluation = value.parse()?,
                "seed" => seed = Some(parse_value(key, value)?),
                "chance" => {
                    chance = match value.to_ascii_lowercase().as_str() {
                        "uniform" => ChanceChoice::Uniform,
                        "resampled" => ChanceChoice::Resampled,
                        _ => return Err(ConfigurationError::UnknownChanceModel(value.to_owned())),
                    }
                }
                _ => return Err(ConfigurationError::UnknownArgument(key.to_owned())),
            }
        }

        let chance_model = match chance {
            ChanceChoice::Uniform => ChanceModel::Uniform,
            ChanceChoice::Resampled => ChanceModel::Resampled { seed },
        };

        Ok(Self {
            kind,
            evaluation,
            options: SearchOptions {
                max_depth,
                chance_model,
            },
            seed,
            weights: GreedyWeights::default(),
        })
    }

    /// Replace the reflex agent's weights
    pub fn with_weights(self, weights: GreedyWeights) -> Self {
        Self { weights, ..self }
    }

    /// Build the search engine this describes, or `None` for [AgentKind::Reflex]
    ///
    /// Unlike [AgentSpec::build] this keeps the concrete type, so callers can get at the whole
    /// [crate::search::SearchOutcome] and not just the chosen action.
    pub fn build_search<GameType>(&self) -> Option<MultiAgentSearch<GameType, EvaluationFunction>>
    where
        GameType: AgentCountableGame
            + SuccessorGeneratableGame
            + VictorDeterminableGame
            + ScoreGettableGame
            + PacmanPositionGettableGame
            + FoodGettableGame
            + GhostGettableGame,
        GameType::Action: Display,
    {
        match self.kind {
            AgentKind::Reflex => None,
            AgentKind::Search(algorithm) => Some(MultiAgentSearch::new(
                algorithm,
                self.evaluation,
                self.options,
            )),
        }
    }

    /// Build a reflex agent with these weights and seed, whatever the kind
    pub fn build_reflex(&self) -> ReflexAgent {
        ReflexAgent::new(self.weights, self.seed)
    }

    /// Build the described agent
    pub fn build<GameType>(&self) -> BoxedAgent<GameType>
    where
        GameType: AgentCountableGame
            + SuccessorGeneratableGame
            + VictorDeterminableGame
            + ScoreGettableGame
            + PacmanPositionGettableGame
            + FoodGettableGame
            + CapsuleGettableGame
            + GhostGettableGame
            + 'static,
        GameType::Action: Display,
    {
        match self.build_search() {
            Some(search) => Box::new(search),
            None => Box::new(self.build_reflex()),
        }
    }
}
