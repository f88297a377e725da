use std::{fmt::Display, marker::PhantomData};

use derivative::Derivative;
use pacman_types::types::{
    AgentCountableGame, SuccessorGeneratableGame, VictorDeterminableGame, PACMAN_INDEX,
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info_span, warn};

use crate::Scorable;

use super::{
    dispatch, next_turn, AdversaryPolicy, ChanceModel, SearchAlgorithm, SearchOutcome,
    SearchStats, Step,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
/// Optional properties that can be defined for a [MultiAgentSearch]
///
/// The defaults (as implemented by [Default]) are as follows:
/// ```
/// use pacman_minimax::search::{ChanceModel, SearchOptions};
///
/// let defaults: SearchOptions = Default::default();
///
/// assert_eq!(defaults.max_depth, 2);
/// assert_eq!(defaults.chance_model, ChanceModel::Uniform);
/// ```
pub struct SearchOptions {
    /// How many full rounds to look ahead. A round is pacman plus every ghost moving once
    ///
    /// Defaults to 2
    pub max_depth: usize,
    /// How expectimax averages over a ghost's moves. Ignored by the other algorithms
    pub chance_model: ChanceModel,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            max_depth: 2,
            chance_model: ChanceModel::default(),
        }
    }
}

#[derive(Derivative)]
#[derivative(Debug(bound = ""), Clone(bound = "ScorableType: Clone"))]
/// This is the struct that wraps a scoring function and can be used to run minimax, alpha-beta
/// or expectimax
///
/// All three share one recursive walk and only differ in their [AdversaryPolicy]. It also
/// outputs traces using the [tracing] crate.
pub struct MultiAgentSearch<GameType, ScorableType> {
    algorithm: SearchAlgorithm,
    #[derivative(Debug = "ignore")]
    score_function: ScorableType,
    options: SearchOptions,
    #[derivative(Debug = "ignore")]
    _phantom: PhantomData<fn(&GameType)>,
}

#[derive(Debug, Clone, Copy)]
struct Turn {
    agent: usize,
    ply: usize,
    call_depth: usize,
}

impl Turn {
    fn root() -> Self {
        Self {
            agent: PACMAN_INDEX,
            ply: 0,
            call_depth: 0,
        }
    }

    fn next(&self, agent_count: usize) -> Self {
        let (agent, ply) = next_turn(self.agent, self.ply, agent_count);

        Self {
            agent,
            ply,
            call_depth: self.call_depth + 1,
        }
    }
}

/// Owned by a single call to [MultiAgentSearch::search]
struct SearchContext {
    rng: Option<StdRng>,
    call_depth_limit: usize,
    stats: SearchStats,
}

impl SearchContext {
    fn new(chance_model: ChanceModel, call_depth_limit: usize) -> Self {
        let rng = match chance_model {
            ChanceModel::Resampled { seed: Some(seed) } => Some(StdRng::seed_from_u64(seed)),
            _ => None,
        };

        Self {
            rng,
            call_depth_limit,
            stats: SearchStats::default(),
        }
    }

    fn rng(&mut self) -> &mut StdRng {
        self.rng.get_or_insert_with(StdRng::from_entropy)
    }
}

impl<GameType, ScorableType> MultiAgentSearch<GameType, ScorableType>
where
    GameType: AgentCountableGame + SuccessorGeneratableGame + VictorDeterminableGame,
    GameType::Action: Display,
    ScorableType: Scorable<GameType, f64>,
{
    /// Construct a new `MultiAgentSearch`
    ///
    /// [SearchOptions] implements [Default] so you can override specific options and rely on
    /// defaults for the rest.
    pub fn new(
        algorithm: SearchAlgorithm,
        score_function: ScorableType,
        options: SearchOptions,
    ) -> Self {
        Self {
            algorithm,
            score_function,
            options,
            _phantom: PhantomData,
        }
    }

    /// Plain minimax to `max_depth` rounds
    pub fn minimax(score_function: ScorableType, max_depth: usize) -> Self {
        Self::new(
            SearchAlgorithm::Minimax,
            score_function,
            SearchOptions {
                max_depth,
                ..Default::default()
            },
        )
    }

    /// Minimax with alpha-beta pruning to `max_depth` rounds
    pub fn alpha_beta(score_function: ScorableType, max_depth: usize) -> Self {
        Self::new(
            SearchAlgorithm::AlphaBeta,
            score_function,
            SearchOptions {
                max_depth,
                ..Default::default()
            },
        )
    }

    /// Expectimax to `max_depth` rounds, averaging ghost moves with the given [ChanceModel]
    pub fn expectimax(
        score_function: ScorableType,
        max_depth: usize,
        chance_model: ChanceModel,
    ) -> Self {
        Self::new(
            SearchAlgorithm::Expectimax,
            score_function,
            SearchOptions {
                max_depth,
                chance_model,
            },
        )
    }

    #[allow(missing_docs)]
    pub fn algorithm(&self) -> SearchAlgorithm {
        self.algorithm
    }

    #[allow(missing_docs)]
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    fn policy(&self) -> AdversaryPolicy {
        self.algorithm.adversary_policy(self.options.chance_model)
    }

    /// Pick pacman's action for the given state
    ///
    /// Every legal pacman action is valued with a fresh walk of the tree below it, starting at
    /// the first ghost's turn with unbounded alpha-beta bounds. The first action with the
    /// strictly greatest value wins, so ties go to whichever action the game listed first.
    pub fn search(&self, game: &GameType) -> SearchOutcome<GameType::Action> {
        let max_depth = self.options.max_depth;

        let span = info_span!(
            "multi_agent_search",
            algorithm = %self.algorithm,
            max_depth,
            chosen_action = tracing::field::Empty,
            chosen_value = tracing::field::Empty,
        );
        let _entered = span.enter();

        if max_depth == 0 {
            warn!("Searching with a depth of 0, every action is scored by its successor alone");
        }

        let agent_count = game.agent_count().max(1);
        let mut context = SearchContext::new(self.options.chance_model, max_depth * agent_count);

        let child_turn = Turn::root().next(agent_count);
        let mut options: Vec<(GameType::Action, f64)> = vec![];
        let mut chosen: Option<usize> = None;

        for action in game.legal_actions(PACMAN_INDEX) {
            let successor = game.generate_successor(PACMAN_INDEX, action);
            let value = self.value(
                &successor,
                child_turn,
                f64::NEG_INFINITY,
                f64::INFINITY,
                &mut context,
            );
            debug!(%action, value, "Scored root action");

            let is_better = match chosen {
                Some(i) => value > options[i].1,
                None => true,
            };
            if is_better {
                chosen = Some(options.len());
            }
            options.push((action, value));
        }

        match chosen {
            Some(i) => {
                let (action, value) = options[i];
                span.record("chosen_action", action.to_string().as_str());
                span.record("chosen_value", value);
            }
            None => warn!("Pacman has no legal actions, there is nothing to choose"),
        }

        SearchOutcome::new(self.algorithm, max_depth, options, chosen, context.stats)
    }

    fn evaluate(&self, game: &GameType, context: &mut SearchContext) -> f64 {
        context.stats.leaf_evaluations += 1;
        self.score_function.score(game)
    }

    fn value(
        &self,
        game: &GameType,
        turn: Turn,
        alpha: f64,
        beta: f64,
        context: &mut SearchContext,
    ) -> f64 {
        let step = dispatch(turn.agent, turn.ply, game, self.options.max_depth);
        if step == Step::Leaf {
            return self.evaluate(game, context);
        }

        if turn.call_depth > context.call_depth_limit {
            context.stats.depth_guard_hits += 1;
            warn!(
                call_depth = turn.call_depth,
                agent = turn.agent,
                ply = turn.ply,
                "Call depth guard hit, the game is not advancing its turns. Scoring as a leaf"
            );
            return self.evaluate(game, context);
        }

        let actions = game.legal_actions(turn.agent);
        if actions.is_empty() {
            return self.evaluate(game, context);
        }

        context.stats.nodes_expanded += 1;
        let child_turn = turn.next(game.agent_count());

        match (step, self.policy()) {
            (Step::Max, policy) => {
                self.max_value(game, turn, child_turn, &actions, alpha, beta, policy, context)
            }
            (_, AdversaryPolicy::Expectation(chance_model)) => self.expected_value(
                game,
                turn,
                child_turn,
                &actions,
                chance_model,
                context,
            ),
            (_, policy) => {
                self.min_value(game, turn, child_turn, &actions, alpha, beta, policy, context)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn max_value(
        &self,
        game: &GameType,
        turn: Turn,
        child_turn: Turn,
        actions: &[GameType::Action],
        mut alpha: f64,
        beta: f64,
        policy: AdversaryPolicy,
        context: &mut SearchContext,
    ) -> f64 {
        let mut best = f64::NEG_INFINITY;

        for action in actions {
            let successor = game.generate_successor(turn.agent, *action);
            best = best.max(self.value(&successor, child_turn, alpha, beta, context));

            if policy.prunes() {
                if best > beta {
                    context.stats.cutoffs += 1;
                    return best;
                }
                alpha = alpha.max(best);
            }
        }

        best
    }

    #[allow(clippy::too_many_arguments)]
    fn min_value(
        &self,
        game: &GameType,
        turn: Turn,
        child_turn: Turn,
        actions: &[GameType::Action],
        alpha: f64,
        mut beta: f64,
        policy: AdversaryPolicy,
        context: &mut SearchContext,
    ) -> f64 {
        let mut worst = f64::INFINITY;

        for action in actions {
            let successor = game.generate_successor(turn.agent, *action);
            worst = worst.min(self.value(&successor, child_turn, alpha, beta, context));

            if policy.prunes() {
                if worst < alpha {
                    context.stats.cutoffs += 1;
                    return worst;
                }
                beta = beta.min(worst);
            }
        }

        worst
    }

    fn expected_value(
        &self,
        game: &GameType,
        turn: Turn,
        child_turn: Turn,
        actions: &[GameType::Action],
        chance_model: ChanceModel,
        context: &mut SearchContext,
    ) -> f64 {
        let mut total = 0.0;

        for action in actions {
            let action = match chance_model {
                ChanceModel::Uniform => *action,
                ChanceModel::Resampled { .. } => {
                    actions[context.rng().gen_range(0..actions.len())]
                }
            };

            let successor = game.generate_successor(turn.agent, action);
            total += self.value(
                &successor,
                child_turn,
                f64::NEG_INFINITY,
                f64::INFINITY,
                context,
            );
        }

        total / actions.len() as f64
    }
}
