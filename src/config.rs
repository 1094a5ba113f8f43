//! MCTS configuration parameters.

/// Number of rollouts per search when nothing else is configured.
pub const DEFAULT_CYCLES: u32 = 5000;

/// Configuration for the Monte Carlo tree search.
#[derive(Debug, Clone, PartialEq)]
pub struct MctsConfig {
    /// Number of select-expand-simulate-backpropagate iterations per search.
    pub cycles: u32,

    /// Weight of the exploration term of the UCT formula.
    /// 1.0 gives the plain `sqrt(ln(N) / n)` bonus; larger values explore more.
    pub exploration: f64,
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            cycles: DEFAULT_CYCLES,
            exploration: 1.0,
        }
    }
}

impl MctsConfig {
    /// Returns a copy with a different rollout budget.
    pub fn with_cycles(mut self, cycles: u32) -> Self {
        self.cycles = cycles;
        self
    }
}
