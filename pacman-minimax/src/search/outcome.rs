use std::fmt::{Debug, Display};

use text_trees::StringTreeNode;

use super::SearchAlgorithm;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Counters describing how much work a search did
pub struct SearchStats {
    /// Nodes whose children were generated and searched
    pub nodes_expanded: usize,
    /// Times the evaluation function was called
    pub leaf_evaluations: usize,
    /// Times alpha-beta stopped looking at the remaining siblings of a node
    pub cutoffs: usize,
    /// Times the call depth guard forced a leaf. Only a misbehaving game can trigger this
    pub depth_guard_hits: usize,
}

#[derive(Debug, Clone)]
/// This is returned from a search at the root of the game tree
///
/// It keeps every root action with its backed up value, in the order the game enumerated them,
/// so callers can see why an action was picked and not just which one.
pub struct SearchOutcome<Action> {
    algorithm: SearchAlgorithm,
    max_depth: usize,
    options: Vec<(Action, f64)>,
    chosen: Option<usize>,
    stats: SearchStats,
}

impl<Action> SearchOutcome<Action>
where
    Action: Copy + Debug + Display,
{
    pub(crate) fn new(
        algorithm: SearchAlgorithm,
        max_depth: usize,
        options: Vec<(Action, f64)>,
        chosen: Option<usize>,
        stats: SearchStats,
    ) -> Self {
        Self {
            algorithm,
            max_depth,
            options,
            chosen,
            stats,
        }
    }

    /// The action pacman should take. `None` only if pacman had no legal actions
    pub fn action(&self) -> Option<Action> {
        self.chosen.map(|i| self.options[i].0)
    }

    /// The backed up value of the chosen action
    pub fn value(&self) -> Option<f64> {
        self.chosen.map(|i| self.options[i].1)
    }

    /// Every root action with its value, in the order the actions were enumerated
    pub fn options(&self) -> &[(Action, f64)] {
        &self.options
    }

    #[allow(missing_docs)]
    pub fn stats(&self) -> SearchStats {
        self.stats
    }

    /// A visual representation of the root decision
    ///
    /// The chosen action is marked with a `*`
    pub fn to_text_tree(&self) -> String {
        let value = self
            .value()
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "no legal actions".to_owned());
        let mut root = StringTreeNode::new(format!(
            "{} depth {} => {}",
            self.algorithm, self.max_depth, value
        ));

        for (i, (action, value)) in self.options.iter().enumerate() {
            let marker = if Some(i) == self.chosen { "*" } else { " " };
            root.push_node(StringTreeNode::new(format!(
                "{} {} {:.2}",
                marker, action, value
            )));
        }

        let stats = self.stats;
        root.push_node(StringTreeNode::new(format!(
            "expanded {} / evaluated {} / cutoffs {}",
            stats.nodes_expanded, stats.leaf_evaluations, stats.cutoffs
        )));

        format!("{}", root)
    }
}

#[cfg(test)]
mod tests {
    use pacman_types::Direction;

    use super::*;

    #[test]
    fn test_chosen_action_and_value() {
        let outcome = SearchOutcome::new(
            SearchAlgorithm::Minimax,
            2,
            vec![(Direction::East, 3.0), (Direction::Stop, 5.0)],
            Some(1),
            SearchStats::default(),
        );

        assert_eq!(outcome.action(), Some(Direction::Stop));
        assert_eq!(outcome.value(), Some(5.0));
        assert_eq!(outcome.options().len(), 2);
    }

    #[test]
    fn test_text_tree_marks_the_choice() {
        let outcome = SearchOutcome::new(
            SearchAlgorithm::AlphaBeta,
            1,
            vec![(Direction::East, 3.0), (Direction::Stop, 5.0)],
            Some(1),
            SearchStats::default(),
        );

        let tree = outcome.to_text_tree();
        assert!(tree.contains("AlphaBetaAgent depth 1 => 5.00"));
        assert!(tree.contains("* Stop 5.00"));
        assert!(tree.contains("  East 3.00"));
    }

    #[test]
    fn test_empty_outcome() {
        let outcome: SearchOutcome<Direction> = SearchOutcome::new(
            SearchAlgorithm::Expectimax,
            2,
            vec![],
            None,
            SearchStats::default(),
        );

        assert_eq!(outcome.action(), None);
        assert_eq!(outcome.value(), None);
        assert!(outcome.to_text_tree().contains("no legal actions"));
    }
}
