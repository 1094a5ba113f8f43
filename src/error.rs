use thiserror::Error;

/// Errors raised by the checked constructors of the state model.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StateError {
    /// A pile of size zero was supplied. Empty piles are never stored.
    #[error("pile {index} is empty")]
    EmptyPile {
        /// Index of the offending pile.
        index: usize,
    },

    /// The player number was neither 1 nor 2.
    #[error("invalid player {0}, expected 1 or 2")]
    InvalidPlayer(u8),
}

/// Errors raised when validating a move requested by a caller.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum MoveError {
    /// No piles remain, the game is already over.
    #[error("the game is over")]
    GameOver,

    /// The requested pile does not exist.
    #[error("pile {pile} out of range, there are {piles} piles")]
    PileOutOfRange {
        /// Requested pile index.
        pile: usize,
        /// Number of piles in the position.
        piles: usize,
    },

    /// The number of sticks to take is not a legal amount.
    #[error("cannot take {amount} sticks from a pile of {available}")]
    InvalidAmount {
        /// Requested number of sticks.
        amount: u32,
        /// Sticks present in the pile.
        available: u32,
    },
}
