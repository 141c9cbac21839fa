use engine::{Board, BoardResult, Move, Side};

/// What the search needs from a position
pub trait GameBoard {
    /// Fully legal moves for `side`; empty when that side cannot move
    fn all_moves_legal(&mut self, side: Side) -> Vec<Move>;

    /// Moves that follow piece movement rules but may leave the king attacked
    fn all_moves_unfiltered(&self, side: Side) -> Vec<Move>;

    fn move_if_legal(&mut self, mv: Move) -> Option<Move>;

    fn make_move(&mut self, mv: &Move);

    /// Exact inverse of the last `make_move`
    fn undo_last_move(&mut self) -> BoardResult<Move>;

    /// Only meaningful once `all_moves_legal` came back empty for the side to move
    fn is_checkmate(&mut self) -> bool;

    fn is_stalemate(&mut self) -> bool;

    /// Material of `side` minus material of its opponent
    fn point_advantage_of_side(&self, side: Side) -> i32;

    fn current_side(&self) -> Side;

    fn last_move(&self) -> Option<&Move>;

    fn notation_for_move(&mut self, mv: &Move) -> String;
}

impl GameBoard for Board {
    fn all_moves_legal(&mut self, side: Side) -> Vec<Move> {
        Board::all_moves_legal(self, side)
    }

    fn all_moves_unfiltered(&self, side: Side) -> Vec<Move> {
        Board::all_moves_unfiltered(self, side)
    }

    fn move_if_legal(&mut self, mv: Move) -> Option<Move> {
        Board::move_if_legal(self, mv)
    }

    fn make_move(&mut self, mv: &Move) {
        Board::make_move(self, mv)
    }

    fn undo_last_move(&mut self) -> BoardResult<Move> {
        Board::undo_last_move(self)
    }

    fn is_checkmate(&mut self) -> bool {
        Board::is_checkmate(self)
    }

    fn is_stalemate(&mut self) -> bool {
        Board::is_stalemate(self)
    }

    fn point_advantage_of_side(&self, side: Side) -> i32 {
        Board::point_advantage_of_side(self, side)
    }

    fn current_side(&self) -> Side {
        self.current_side
    }

    fn last_move(&self) -> Option<&Move> {
        Board::last_move(self)
    }

    fn notation_for_move(&mut self, mv: &Move) -> String {
        Board::notation_for_move(self, mv)
    }
}
