//! Exact adversarial search with [alpha-beta pruning].
//!
//! Player one maximizes and player two minimizes the terminal utility. The search returns the
//! game-theoretic value of a state together with the principal line of play leading to a
//! terminal state.
//!
//! [alpha-beta pruning]: https://en.wikipedia.org/wiki/Alpha%E2%80%93beta_pruning

use crate::state::{Player, State};
use tracing::debug;

/// Bound larger than any utility. Used as the open alpha-beta window.
pub const INFINITY: i32 = i32::MAX;

/// Result of a minimax search.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Evaluation {
    /// Game-theoretic value: `+1` if player one wins under optimal play, `-1` otherwise.
    pub value: i32,
    /// Optimal continuation, from the first successor to a terminal state.
    pub path: Vec<State>,
}

impl Evaluation {
    /// The state the player to move should transition to, if the game is not over.
    pub fn best_move(&self) -> Option<&State> {
        self.path.first()
    }
}

/// Alpha-beta searcher that counts the states it visits.
#[derive(Debug, Default)]
pub struct Minimax {
    nodes_visited: u64,
}

impl Minimax {
    /// Creates a searcher with a zeroed node counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of states visited by all searches run so far.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes_visited
    }

    /// Searches `state` with a fully open window.
    pub fn evaluate(&mut self, state: &State) -> Evaluation {
        let before = self.nodes_visited;
        let evaluation = self.evaluate_with_window(state, -INFINITY, INFINITY);
        debug!(
            state = %state,
            value = evaluation.value,
            nodes = self.nodes_visited - before,
            "minimax search complete"
        );
        evaluation
    }

    /// Searches `state` inside the `(alpha, beta)` window.
    ///
    /// Among successors of equal value the first one in enumeration order is kept on the path.
    pub fn evaluate_with_window(
        &mut self,
        state: &State,
        mut alpha: i32,
        mut beta: i32,
    ) -> Evaluation {
        self.nodes_visited += 1;
        if state.is_terminal() {
            return Evaluation {
                value: state.utility(),
                path: Vec::new(),
            };
        }

        let maximizing = state.player() == Player::One;
        let mut value = if maximizing { -INFINITY } else { INFINITY };
        let mut best: Option<(State, Vec<State>)> = None;

        for child in state.successors() {
            let Evaluation {
                value: child_value,
                path: child_path,
            } = self.evaluate_with_window(&child, alpha, beta);

            let improves = if maximizing {
                child_value > value
            } else {
                child_value < value
            };
            if improves {
                value = child_value;
                best = Some((child, child_path));
            }

            if maximizing {
                alpha = alpha.max(value);
                if alpha >= beta {
                    break;
                }
            } else {
                beta = beta.min(value);
                if beta <= alpha {
                    break;
                }
            }
        }

        let path = match best {
            Some((child, mut rest)) => {
                rest.insert(0, child);
                rest
            }
            None => Vec::new(),
        };
        Evaluation { value, path }
    }
}

/// Evaluates `state` with a fresh [`Minimax`] searcher.
pub fn minimax_value(state: &State) -> Evaluation {
    Minimax::new().evaluate(state)
}
