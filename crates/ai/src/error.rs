//! Error types for the search

use engine::{BoardError, Side};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SearchError {
    /// The searching side has nothing to play
    #[error("No legal moves for {side}")]
    NoLegalMoves { side: Side },

    /// The board reported no legal moves for a position that is neither
    /// checkmate nor stalemate. The score tree cannot be trusted past this.
    #[error("No legal moves at depth {depth} but the position is neither checkmate nor stalemate")]
    InconsistentTerminalState { depth: u32 },

    #[error(transparent)]
    Board(#[from] BoardError),

    #[error("Failed to start search workers: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

pub type SearchResult<T> = Result<T, SearchError>;
