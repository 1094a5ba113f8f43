//! Search engines for misère Nim.
//!
//! Piles of sticks are laid out in a row; players alternate taking one to three sticks from a
//! single pile, and whoever has to take the last stick loses. This crate provides two
//! interchangeable ways of choosing a move: an exact minimax search with alpha-beta pruning and
//! a Monte Carlo tree search bounded by a rollout budget. Both share the game rules implemented
//! on [`State`](state::State).
//!
//! # Example
//!
//! ```rust
//! use nim_search::mcts::MonteCarloTreeSearch;
//! use nim_search::minimax::minimax_value;
//! use nim_search::random::SeededRandomGenerator;
//! use nim_search::state::{Player, State};
//!
//! let state = State::from_piles(&[3, 2], Player::One).unwrap();
//!
//! // Exact search: the value is +1 when player one can force a win.
//! let evaluation = minimax_value(&state);
//! let best = evaluation.best_move().unwrap();
//! assert!(state.successors().contains(best));
//!
//! // Statistical search, reproducible thanks to the seeded generator.
//! let mut mcts = MonteCarloTreeSearch::builder()
//!     .with_random_generator(SeededRandomGenerator::new(7))
//!     .with_cycles(1000)
//!     .build();
//! let chosen = mcts.search(&state).unwrap();
//! assert!(state.successors().contains(&chosen));
//! ```

/// Configuration of the Monte Carlo tree search.
pub mod config;
/// Errors raised by checked constructors and move validation.
pub mod error;
/// The Monte Carlo tree search engine.
pub mod mcts;
/// Per-state search statistics and tree snapshots.
pub mod mcts_node;
/// The minimax engine with alpha-beta pruning.
pub mod minimax;
/// Random number generation used by the search engines.
pub mod random;
/// Positions, players, states and moves.
pub mod state;
/// Game rules implemented on [`State`](state::State).
pub mod transition;
