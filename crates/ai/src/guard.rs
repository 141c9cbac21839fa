use crate::board::GameBoard;
use engine::Move;
use std::ops::{Deref, DerefMut};

/// A move applied to a board for as long as the guard lives. Dropping the
/// guard undoes it, so every exit out of a recursive expansion restores the
/// position, early returns included.
pub struct AppliedMove<'a, B: GameBoard> {
    board: &'a mut B,
}

impl<'a, B: GameBoard> AppliedMove<'a, B> {
    pub fn apply(board: &'a mut B, mv: &Move) -> Self {
        board.make_move(mv);
        Self { board }
    }
}

impl<B: GameBoard> Deref for AppliedMove<'_, B> {
    type Target = B;

    fn deref(&self) -> &B {
        self.board
    }
}

impl<B: GameBoard> DerefMut for AppliedMove<'_, B> {
    fn deref_mut(&mut self) -> &mut B {
        self.board
    }
}

impl<B: GameBoard> Drop for AppliedMove<'_, B> {
    fn drop(&mut self) {
        if let Err(err) = self.board.undo_last_move() {
            tracing::error!(%err, "failed to undo move while leaving search node");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Board, Side};

    #[test]
    fn dropping_the_guard_restores_the_board() {
        let mut board = Board::new();
        let mv = board.all_moves_legal(Side::White).remove(0);
        {
            let applied = AppliedMove::apply(&mut board, &mv);
            assert_eq!(applied.current_side, Side::Black);
            assert_eq!(applied.moves_made(), 1);
        }
        assert_eq!(board, Board::new());
    }

    #[test]
    fn nested_guards_unwind_in_order() {
        let mut board = Board::new();
        let first = board.parse_move("e2e4").unwrap();
        {
            let mut outer = AppliedMove::apply(&mut board, &first);
            let reply = outer.parse_move("e7e5").unwrap();
            let inner = AppliedMove::apply(&mut *outer, &reply);
            assert_eq!(inner.moves_made(), 2);
        }
        assert_eq!(board, Board::new());
    }
}
