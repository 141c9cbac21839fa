use engine::{Move, Side};

pub const DEFAULT_WORKERS: usize = 8;

/// Search settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// Side the search maximizes for
    pub side: Side,
    /// Plies to expand, counting the root move as 1
    pub depth: u32,
    /// Threads used by the parallel legality filter
    pub workers: usize,
    /// Fixed seed for tie-breaking; OS entropy when `None`
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            side: Side::White,
            depth: 1,
            workers: DEFAULT_WORKERS,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn with_side(mut self, side: Side) -> Self {
        self.side = side;
        self
    }

    pub fn with_depth(mut self, depth: u32) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Outcome of one top-level decision
#[derive(Debug, Clone)]
pub struct SearchReport {
    /// Chosen move, notation filled in
    pub best_move: Move,
    /// Every root move tied at the best score
    pub candidates: Vec<Move>,
    pub evaluation: i32,
    pub depth: u32,
    /// Counter value when the search finished
    pub moves_analyzed: u64,
}
