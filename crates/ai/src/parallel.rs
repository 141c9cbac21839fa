//! Legality filtering fanned out over a worker pool. Each task owns a clone
//! of the board, so the shared board is never touched from another thread.

use crate::board::GameBoard;
use crate::error::SearchResult;
use crate::search::SearchEngine;
use engine::{Move, Side};
use rand::Rng;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

/// Legal moves for `side`, in the same order as `all_moves_legal`, checked
/// on `workers` threads
pub fn legal_moves_concurrent<B>(board: &B, side: Side, workers: usize) -> SearchResult<Vec<Move>>
where
    B: GameBoard + Clone + Send,
{
    let pool = ThreadPoolBuilder::new().num_threads(workers).build()?;

    let snapshots: Vec<(Move, B)> = board
        .all_moves_unfiltered(side)
        .into_iter()
        .map(|mv| (mv, board.clone()))
        .collect();

    let legal = pool.install(|| {
        snapshots
            .into_par_iter()
            .filter_map(|(mv, mut snapshot)| snapshot.move_if_legal(mv))
            .collect::<Vec<_>>()
    });

    tracing::debug!(%side, workers, legal = legal.len(), "concurrent legality filter");
    Ok(legal)
}

impl<B, R> SearchEngine<'_, B, R>
where
    B: GameBoard + Clone + Send,
    R: Rng,
{
    pub fn all_moves_legal_concurrent(&self, side: Side) -> SearchResult<Vec<Move>> {
        legal_moves_concurrent(self.board(), side, self.workers)
    }
}
