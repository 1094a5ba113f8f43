//! Game rules: successor generation, terminal detection and utility.
//!
//! A successor is produced from the opponent's perspective: the state is first toggled to the
//! other player and the move is then applied to the toggled state. The player recorded in a
//! successor is therefore the one who moves next.

use crate::error::MoveError;
use crate::state::{Move, Player, Position, State};

/// Largest number of sticks a player may take in one move.
pub const MAX_TAKE: u32 = 3;

impl State {
    /// Returns the same position with the other player to move.
    pub fn toggled(&self) -> State {
        State::new(self.position().clone(), self.player().other())
    }

    /// Takes `amount` sticks from the pile at `pile`, removing the pile once it runs out.
    ///
    /// The player is left unchanged; use [`State::toggled`] first to produce a successor.
    /// Returns `None` if there is no pile at that index.
    pub fn successor(&self, pile: usize, amount: u32) -> Option<State> {
        let mut piles = self.position().piles().to_vec();
        let sticks = *piles.get(pile)?;
        if amount >= sticks {
            piles.remove(pile);
        } else {
            piles[pile] = sticks - amount;
        }
        Some(State::new(Position::from_nonempty_piles(piles), self.player()))
    }

    /// All distinct states reachable in one move, in pile-then-amount order.
    ///
    /// Moves that empty the same pile collapse into one successor. The order is deterministic,
    /// which makes the tie-breaking of the minimax engine reproducible.
    pub fn successors(&self) -> Vec<State> {
        let toggled = self.toggled();
        let mut successors: Vec<State> = Vec::with_capacity(toggled.position().len() * 3);
        for pile in 0..toggled.position().len() {
            for amount in 1..=MAX_TAKE {
                if let Some(next) = toggled.successor(pile, amount) {
                    if !successors.contains(&next) {
                        successors.push(next);
                    }
                }
            }
        }
        successors
    }

    /// True when no piles remain.
    pub fn is_terminal(&self) -> bool {
        self.position().is_empty()
    }

    /// Value of a terminal state: `+1` if player one is recorded to move, `-1` otherwise.
    ///
    /// The player recorded at an empty position did not take the last stick, so under misère
    /// rules that player has won.
    pub fn utility(&self) -> i32 {
        match self.player() {
            Player::One => 1,
            Player::Two => -1,
        }
    }

    /// Validates and plays a move for the player to move.
    pub fn apply_move(&self, pile: usize, amount: u32) -> Result<State, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }
        let piles = self.position().piles();
        let available = *piles.get(pile).ok_or(MoveError::PileOutOfRange {
            pile,
            piles: piles.len(),
        })?;
        if !(1..=MAX_TAKE).contains(&amount) {
            return Err(MoveError::InvalidAmount { amount, available });
        }
        self.toggled()
            .successor(pile, amount)
            .ok_or(MoveError::PileOutOfRange {
                pile,
                piles: piles.len(),
            })
    }
}

/// Recovers the move that turned `before` into `after`.
///
/// When a pile disappeared, the reported amount is its whole size. Returns `None` if `after`
/// is not reachable from `before` by taking sticks from a single pile.
pub fn describe_move(before: &Position, after: &Position) -> Option<Move> {
    let (old, new) = (before.piles(), after.piles());
    if old.len() == new.len() {
        let mut changed = old.iter().zip(new).enumerate().filter(|(_, (o, n))| o != n);
        let (pile, (&o, &n)) = changed.next()?;
        if changed.next().is_some() || n > o {
            return None;
        }
        return Some(Move {
            pile,
            amount: o - n,
        });
    }
    if old.len() != new.len() + 1 {
        return None;
    }
    let pile = old
        .iter()
        .zip(new)
        .position(|(o, n)| o != n)
        .unwrap_or(new.len());
    if old[pile + 1..] != new[pile..] {
        return None;
    }
    Some(Move {
        pile,
        amount: old[pile],
    })
}
