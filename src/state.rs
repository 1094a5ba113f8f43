use crate::error::StateError;
use crate::random::RandomGenerator;
use std::fmt;

/// One of the two players. The numbering matches the order of play: player 1 moves first.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Player {
    /// The maximizing player.
    One = 1,
    /// The minimizing player.
    Two = 2,
}

impl Player {
    /// Returns the opponent of this player.
    pub fn other(self) -> Self {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// Returns the player number, 1 or 2.
    pub fn number(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Player {
    type Error = StateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Player::One),
            2 => Ok(Player::Two),
            other => Err(StateError::InvalidPlayer(other)),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// An ordered sequence of pile sizes.
///
/// Every stored pile holds at least one stick: a pile that runs out is removed and the piles
/// after it shift down by one index. The empty position is the end of the game.
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct Position {
    piles: Vec<u32>,
}

impl Position {
    /// Creates a position from pile sizes, rejecting empty piles.
    pub fn new(piles: Vec<u32>) -> Result<Self, StateError> {
        if let Some(index) = piles.iter().position(|&p| p == 0) {
            return Err(StateError::EmptyPile { index });
        }
        Ok(Self { piles })
    }

    pub(crate) fn from_nonempty_piles(piles: Vec<u32>) -> Self {
        debug_assert!(piles.iter().all(|&p| p > 0));
        Self { piles }
    }

    /// Generates a position with `piles` piles of 1 to `max_sticks` sticks each.
    ///
    /// A `max_sticks` of zero yields the empty position.
    pub fn random<K: RandomGenerator>(piles: usize, max_sticks: u32, rng: &mut K) -> Self {
        if max_sticks == 0 {
            return Self::default();
        }
        let piles = (0..piles)
            .map(|_| rng.next_index(max_sticks as usize) as u32 + 1)
            .collect();
        Self { piles }
    }

    /// Pile sizes in order.
    pub fn piles(&self) -> &[u32] {
        &self.piles
    }

    /// Number of non-empty piles.
    pub fn len(&self) -> usize {
        self.piles.len()
    }

    /// True when no piles remain.
    pub fn is_empty(&self) -> bool {
        self.piles.is_empty()
    }

    /// Total number of sticks across all piles.
    pub fn total_sticks(&self) -> u64 {
        self.piles.iter().map(|&p| u64::from(p)).sum()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.piles)
    }
}

/// A position together with the player whose turn it is.
///
/// States are immutable values: every transition produces a new `State`. Equality and hashing
/// are structural, so states can key the search tree of the MCTS engine directly.
#[derive(Debug, PartialEq, Eq, Hash, Clone)]
pub struct State {
    position: Position,
    player: Player,
}

impl State {
    /// Creates a new state.
    pub fn new(position: Position, player: Player) -> Self {
        Self { position, player }
    }

    /// Shorthand for `State::new(Position::new(piles)?, player)`.
    pub fn from_piles(piles: &[u32], player: Player) -> Result<Self, StateError> {
        Ok(Self::new(Position::new(piles.to_vec())?, player))
    }

    /// The piles of this state.
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// The player recorded as the one to move.
    pub fn player(&self) -> Player {
        self.player
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (player {})", self.position, self.player)
    }
}

/// Taking `amount` sticks from the pile at index `pile`.
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub struct Move {
    /// Zero-based pile index.
    pub pile: usize,
    /// Number of sticks taken.
    pub amount: u32,
}
