use crate::state::State;

/// Search statistics recorded for one state.
///
/// The reward of a state counts the rollouts won by the player who moved into it, so a parent
/// prefers the child with the highest reward rate.
#[derive(Debug, Default, PartialEq, Eq, Copy, Clone)]
pub struct MctsNode {
    /// Number of backpropagated paths this state appeared on.
    pub visits: u32,
    /// Accumulated reward over those paths.
    pub reward: u32,
}

impl MctsNode {
    /// Average reward per visit, or `None` for an unvisited state.
    pub fn reward_rate(&self) -> Option<f64> {
        if self.visits == 0 {
            None
        } else {
            Some(f64::from(self.reward) / f64::from(self.visits))
        }
    }
}

/// One state of a search tree snapshot, see
/// [`MonteCarloTreeSearch::get_tree`](crate::mcts::MonteCarloTreeSearch::get_tree).
#[derive(Debug, PartialEq, Clone)]
pub struct NodeSnapshot {
    /// The state.
    pub state: State,
    /// Its statistics at the time of the snapshot.
    pub stats: MctsNode,
    /// Whether the successors of the state have been expanded.
    pub expanded: bool,
}
