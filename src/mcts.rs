use crate::config::MctsConfig;
use crate::mcts_node::{MctsNode, NodeSnapshot};
use crate::random::{RandomGenerator, StandardRandomGenerator};
use crate::state::State;
use ego_tree::{NodeMut, Tree};
use std::collections::HashMap;
use tracing::{debug, trace};

/// The main struct for running the Monte Carlo Tree Search algorithm.
///
/// The engine owns its search tree: statistics and expanded successors keyed by [`State`].
/// The tree outlives a single search, so repeated searches within one game reuse what earlier
/// searches learned. Engines never share a tree; concurrent searches need separate instances.
pub struct MonteCarloTreeSearch<K: RandomGenerator = StandardRandomGenerator> {
    nodes: HashMap<State, MctsNode>,
    children: HashMap<State, Vec<State>>,
    random: K,
    config: MctsConfig,
}

/// A builder for creating instances of `MonteCarloTreeSearch`.
pub struct MonteCarloTreeSearchBuilder<K: RandomGenerator> {
    random_generator: K,
    config: MctsConfig,
}

impl<K: RandomGenerator> MonteCarloTreeSearchBuilder<K> {
    /// Sets the random number generator used for selection and rollouts.
    pub fn with_random_generator<R: RandomGenerator>(
        self,
        rg: R,
    ) -> MonteCarloTreeSearchBuilder<R> {
        MonteCarloTreeSearchBuilder {
            random_generator: rg,
            config: self.config,
        }
    }

    /// Replaces the whole configuration.
    pub fn with_config(mut self, config: MctsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the number of rollouts run by [`MonteCarloTreeSearch::search`].
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.config.cycles = cycles;
        self
    }

    /// Sets the weight of the UCT exploration term.
    pub fn with_exploration(mut self, exploration: f64) -> Self {
        self.config.exploration = exploration;
        self
    }

    /// Builds the `MonteCarloTreeSearch` instance with an empty tree.
    pub fn build(self) -> MonteCarloTreeSearch<K> {
        MonteCarloTreeSearch {
            nodes: HashMap::new(),
            children: HashMap::new(),
            random: self.random_generator,
            config: self.config,
        }
    }
}

impl MonteCarloTreeSearch<StandardRandomGenerator> {
    /// Creates an engine with the default configuration and the thread-local generator.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Returns a new builder for `MonteCarloTreeSearch`.
    pub fn builder() -> MonteCarloTreeSearchBuilder<StandardRandomGenerator> {
        MonteCarloTreeSearchBuilder {
            random_generator: StandardRandomGenerator,
            config: MctsConfig::default(),
        }
    }
}

impl Default for MonteCarloTreeSearch<StandardRandomGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RandomGenerator> MonteCarloTreeSearch<K> {
    /// The configuration of this engine.
    pub fn config(&self) -> &MctsConfig {
        &self.config
    }

    /// Runs the configured number of rollouts from `root` and returns the chosen successor.
    pub fn search(&mut self, root: &State) -> Option<State> {
        self.search_with_cycles(root, self.config.cycles)
    }

    /// Runs `cycles` rollouts from `root` and returns the chosen successor.
    ///
    /// Returns `None` only when `root` is terminal. With zero cycles on a root that was never
    /// expanded, a uniformly random successor is returned.
    pub fn search_with_cycles(&mut self, root: &State, cycles: u32) -> Option<State> {
        let perspective = root.player();
        self.iterate_n_times(root, cycles);
        let choice = self.choose(root);
        debug!(
            perspective = %perspective,
            cycles,
            root_visits = self.visits(root),
            tree_size = self.children.len(),
            chosen = ?choice,
            "MCTS search complete"
        );
        choice
    }

    /// Runs `n` iterations from `root` without choosing a move.
    pub fn iterate_n_times(&mut self, root: &State, n: u32) {
        for _ in 0..n {
            self.do_iteration(root);
        }
    }

    /// Performs one full iteration (selection, expansion, simulation, backpropagation).
    /// Returns the path of states that were updated during backpropagation, root first.
    pub fn do_iteration(&mut self, root: &State) -> Vec<State> {
        let path = self.select(root);
        let Some(leaf) = path.last().cloned() else {
            return path;
        };
        self.expand(&leaf);
        let reward = self.simulate(&leaf);
        self.backpropagate(&path, reward);
        trace!(path_len = path.len(), reward, leaf = %leaf, "MCTS iteration complete");
        path
    }

    /// Returns the child of `root` with the best reward rate.
    ///
    /// Unvisited children rank below every visited one. A root that was never expanded gets a
    /// random successor.
    pub fn choose(&mut self, root: &State) -> Option<State> {
        let Some(children) = self.children.get(root) else {
            return self.random.choose(&root.successors()).cloned();
        };

        let mut best: Option<&State> = None;
        let mut best_score = f64::NEG_INFINITY;
        for child in children {
            let score = self
                .node(child)
                .and_then(MctsNode::reward_rate)
                .unwrap_or(f64::NEG_INFINITY);
            if best.is_none() || score > best_score {
                best = Some(child);
                best_score = score;
            }
        }
        best.cloned()
    }

    /// Statistics of `state`, if it was ever visited.
    pub fn node(&self, state: &State) -> Option<&MctsNode> {
        self.nodes.get(state)
    }

    /// Number of backpropagated paths `state` appeared on.
    pub fn visits(&self, state: &State) -> u32 {
        self.node(state).map_or(0, |n| n.visits)
    }

    /// Accumulated reward of `state`.
    pub fn reward(&self, state: &State) -> u32 {
        self.node(state).map_or(0, |n| n.reward)
    }

    /// Whether the successors of `state` have been recorded.
    pub fn is_expanded(&self, state: &State) -> bool {
        self.children.contains_key(state)
    }

    /// The recorded successors of `state`, if it was expanded.
    pub fn children_of(&self, state: &State) -> Option<&[State]> {
        self.children.get(state).map(Vec::as_slice)
    }

    /// Number of expanded states.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// True when nothing has been expanded yet.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Forgets everything learned so far.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.children.clear();
    }

    /// Unfolds the recorded state graph below `root` into a tree, at most `depth` plies deep.
    ///
    /// States reachable along several lines appear once per line.
    pub fn get_tree(&self, root: &State, depth: usize) -> Tree<NodeSnapshot> {
        let mut tree = Tree::new(self.snapshot(root));
        self.append_children(tree.root_mut(), root, depth);
        tree
    }

    fn append_children(
        &self,
        mut parent: NodeMut<'_, NodeSnapshot>,
        state: &State,
        depth: usize,
    ) {
        if depth == 0 {
            return;
        }
        let Some(children) = self.children.get(state) else {
            return;
        };
        for child in children {
            let node = parent.append(self.snapshot(child));
            self.append_children(node, child, depth - 1);
        }
    }

    fn snapshot(&self, state: &State) -> NodeSnapshot {
        NodeSnapshot {
            state: state.clone(),
            stats: self.node(state).copied().unwrap_or_default(),
            expanded: self.is_expanded(state),
        }
    }

    /// Descends from `root` until it reaches an unexpanded or terminal state, or steps into a
    /// child that has never been expanded.
    fn select(&mut self, root: &State) -> Vec<State> {
        let mut path = Vec::new();
        let mut state = root.clone();
        loop {
            path.push(state.clone());
            let Some(children) = self.children.get(&state) else {
                return path;
            };
            if children.is_empty() {
                return path;
            }

            let unexplored: Vec<&State> = children
                .iter()
                .filter(|c| !self.children.contains_key(*c))
                .collect();
            if let Some(&next) = self.random.choose(&unexplored) {
                path.push(next.clone());
                return path;
            }

            state = self.uct(&state, children);
        }
    }

    /// Picks the child maximizing the UCT score.
    fn uct(&self, parent: &State, children: &[State]) -> State {
        let log_parent_visits = f64::from(self.visits(parent)).ln();
        let mut best = &children[0];
        let mut best_score = f64::NEG_INFINITY;
        for child in children {
            let score = match self.node(child) {
                Some(node) if node.visits > 0 => {
                    let visits = f64::from(node.visits);
                    let exploitation = f64::from(node.reward) / visits;
                    let exploration = (log_parent_visits / visits).sqrt();
                    exploitation + self.config.exploration * exploration
                }
                _ => f64::INFINITY,
            };
            if score > best_score {
                best = child;
                best_score = score;
            }
        }
        best.clone()
    }

    fn expand(&mut self, state: &State) {
        if !self.children.contains_key(state) {
            let _ = self.children.insert(state.clone(), state.successors());
        }
    }

    /// Plays uniformly random moves from `leaf` to the end of the game.
    ///
    /// Returns 1 if the player who moved into `leaf` wins the rollout, 0 otherwise. The player
    /// recorded at the empty position did not take the last stick, so that player is the winner.
    fn simulate(&mut self, leaf: &State) -> u32 {
        let mut state = leaf.clone();
        while !state.is_terminal() {
            let successors = state.successors();
            match self.random.choose(&successors) {
                Some(next) => state = next.clone(),
                None => break,
            }
        }
        u32::from(state.player() != leaf.player())
    }

    /// Credits `reward` to the leaf of `path` and alternates it on the way back to the root.
    fn backpropagate(&mut self, path: &[State], mut reward: u32) {
        for state in path.iter().rev() {
            let node = self.nodes.entry(state.clone()).or_default();
            node.visits += 1;
            node.reward += reward;
            reward = 1 - reward;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::mcts::MonteCarloTreeSearch;
    use crate::random::SeededRandomGenerator;
    use crate::state::{Player, State};
    use std::collections::HashMap;

    fn state(piles: &[u32], player: Player) -> State {
        State::from_piles(piles, player).unwrap()
    }

    fn seeded(seed: u64) -> MonteCarloTreeSearch<SeededRandomGenerator> {
        MonteCarloTreeSearch::builder()
            .with_random_generator(SeededRandomGenerator::new(seed))
            .build()
    }

    #[test]
    fn forced_last_stick() {
        // arrange
        let mut mcts = seeded(1);
        let root = state(&[1], Player::One);

        // act
        let chosen = mcts.search_with_cycles(&root, 500);

        // assert
        assert_eq!(chosen, Some(state(&[], Player::Two)));
        assert_eq!(mcts.visits(&root), 500);
        assert_eq!(mcts.reward(&state(&[], Player::Two)), 0);
    }

    #[test]
    fn single_successor_is_returned() {
        let mut mcts = seeded(2);
        let chosen = mcts.search_with_cycles(&state(&[1, 1], Player::One), 50);
        assert_eq!(chosen, Some(state(&[1], Player::Two)));
    }

    #[test]
    fn terminal_root_has_no_move() {
        let mut mcts = seeded(3);
        let root = state(&[], Player::Two);
        assert_eq!(mcts.search_with_cycles(&root, 0), None);
        assert_eq!(mcts.search_with_cycles(&root, 10), None);
        assert!(mcts.is_expanded(&root));
        assert_eq!(mcts.visits(&root), 10);
    }

    #[test]
    fn zero_cycles_returns_random_successor() {
        // arrange
        let mut mcts = seeded(4);
        let root = state(&[3, 2], Player::One);

        // act
        let chosen = mcts.search_with_cycles(&root, 0).unwrap();

        // assert
        assert!(root.successors().contains(&chosen));
        assert!(mcts.is_empty());
    }

    #[test]
    fn finds_winning_move_on_single_pile() {
        // arrange
        let mut mcts = seeded(5);
        let root = state(&[7], Player::One);

        // act
        let chosen = mcts.search_with_cycles(&root, 3000);

        // assert
        assert_eq!(chosen, Some(state(&[5], Player::Two)));
    }

    #[test]
    fn visits_count_backpropagated_paths() {
        // arrange
        let mut mcts = seeded(6);
        let root = state(&[3, 2, 2], Player::Two);
        let mut appearances: HashMap<State, u32> = HashMap::new();

        // act
        for _ in 0..400 {
            for s in mcts.do_iteration(&root) {
                *appearances.entry(s).or_default() += 1;
            }
        }

        // assert
        assert_eq!(mcts.visits(&root), 400);
        assert_eq!(appearances.len(), mcts.nodes.len());
        for (s, count) in &appearances {
            assert_eq!(mcts.visits(s), *count, "{s}");
            assert!(mcts.reward(s) <= *count);
        }
    }

    #[test]
    fn first_iteration_expands_root() {
        let mut mcts = seeded(7);
        let root = state(&[2, 1], Player::One);
        let path = mcts.do_iteration(&root);
        assert_eq!(path, vec![root.clone()]);
        assert_eq!(mcts.children_of(&root), Some(root.successors().as_slice()));

        let path = mcts.do_iteration(&root);
        assert_eq!(path.len(), 2);
        assert!(root.successors().contains(&path[1]));
    }

    #[test]
    fn parent_and_child_rewards_complement() {
        // A root whose only child is terminal: the mover loses every rollout.
        let mut mcts = seeded(8);
        let root = state(&[1], Player::Two);
        mcts.iterate_n_times(&root, 20);
        let terminal = state(&[], Player::One);
        assert_eq!(mcts.visits(&terminal), 19);
        assert_eq!(mcts.reward(&terminal), 0);
        assert_eq!(mcts.reward(&root), 20);
    }

    #[test]
    fn tree_is_reused_across_searches() {
        let mut mcts = seeded(9);
        let root = state(&[4, 3], Player::One);
        let _ = mcts.search_with_cycles(&root, 100);
        let expanded = mcts.len();
        let _ = mcts.search_with_cycles(&root, 100);
        assert_eq!(mcts.visits(&root), 200);
        assert!(mcts.len() >= expanded);

        mcts.clear();
        assert!(mcts.is_empty());
        assert_eq!(mcts.visits(&root), 0);
    }

    #[test]
    fn independent_engines_do_not_share_trees() {
        let root = state(&[2, 2], Player::One);
        let mut first = seeded(10);
        let second = seeded(10);
        let _ = first.search_with_cycles(&root, 30);
        assert_eq!(first.visits(&root), 30);
        assert_eq!(second.visits(&root), 0);
    }

    #[test]
    fn same_seed_same_choice() {
        let root = state(&[5, 3, 2], Player::Two);
        let a = seeded(11).search_with_cycles(&root, 300);
        let b = seeded(11).search_with_cycles(&root, 300);
        assert_eq!(a, b);
    }

    #[test]
    fn snapshot_mirrors_statistics() {
        // arrange
        let mut mcts = seeded(12);
        let root = state(&[2, 1], Player::One);
        mcts.iterate_n_times(&root, 50);

        // act
        let tree = mcts.get_tree(&root, 1);

        // assert
        let snapshot_root = tree.root();
        assert_eq!(snapshot_root.value().state, root);
        assert_eq!(snapshot_root.value().stats.visits, 50);
        assert!(snapshot_root.value().expanded);
        let children: Vec<&State> = snapshot_root.children().map(|c| &c.value().state).collect();
        assert_eq!(children, root.successors().iter().collect::<Vec<_>>());
        for child in snapshot_root.children() {
            assert_eq!(child.value().stats.visits, mcts.visits(&child.value().state));
            assert_eq!(child.children().count(), 0);
        }

        assert_eq!(mcts.get_tree(&root, 0).root().children().count(), 0);
    }

    #[test]
    fn builder_applies_config() {
        let mcts = MonteCarloTreeSearch::builder()
            .with_cycles(42)
            .with_exploration(2.0)
            .build();
        assert_eq!(mcts.config().cycles, 42);
        assert_eq!(mcts.config().exploration, 2.0);
        assert_eq!(MonteCarloTreeSearch::new().config().cycles, 5000);
    }
}
