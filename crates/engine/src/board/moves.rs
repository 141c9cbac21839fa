use super::validation::{BISHOP_DIRECTIONS, ROOK_DIRECTIONS};
use super::Board;
use crate::bitboard::{get_king_attacks, get_knight_attacks, iterate_bits};
use crate::types::*;

impl Board {
    /// All fully legal moves for `side`. Empty means the game is over for that side.
    pub fn all_moves_legal(&mut self, side: Side) -> Vec<Move> {
        self.all_moves_unfiltered(side)
            .into_iter()
            .filter_map(|mv| self.move_if_legal(mv))
            .collect()
    }

    /// Returns the move back if playing it does not leave the mover's king attacked
    pub fn move_if_legal(&mut self, mv: Move) -> Option<Move> {
        let side = mv.mover.side;
        self.make_move(&mv);
        let exposes_king = self.is_in_check(side);
        // History cannot be empty right after make_move
        let _ = self.undo_last_move();
        if exposes_king {
            None
        } else {
            Some(mv)
        }
    }

    /// Legal moves of the piece standing on `square`
    pub fn legal_moves_from(&mut self, square: Square) -> Vec<Move> {
        let Some(piece) = self.piece_at(square) else {
            return Vec::new();
        };
        let mut candidates = Vec::new();
        self.piece_moves(square, piece, &mut candidates);
        candidates
            .into_iter()
            .filter_map(|mv| self.move_if_legal(mv))
            .collect()
    }

    /// Pseudo-legal moves for `side`: obey piece movement rules, may leave the king in check
    pub fn all_moves_unfiltered(&self, side: Side) -> Vec<Move> {
        let mut moves = Vec::new();
        for (square, piece) in self.squares_of(side) {
            self.piece_moves(square, piece, &mut moves);
        }
        moves
    }

    fn piece_moves(&self, square: Square, piece: Piece, moves: &mut Vec<Move>) {
        match piece.kind {
            PieceKind::Pawn => self.pawn_moves(square, piece, moves),
            PieceKind::Knight => self.jump_moves(square, piece, get_knight_attacks(square), moves),
            PieceKind::Bishop => self.sliding_moves(square, piece, &BISHOP_DIRECTIONS, moves),
            PieceKind::Rook => self.sliding_moves(square, piece, &ROOK_DIRECTIONS, moves),
            PieceKind::Queen => {
                self.sliding_moves(square, piece, &ROOK_DIRECTIONS, moves);
                self.sliding_moves(square, piece, &BISHOP_DIRECTIONS, moves);
            }
            PieceKind::King => {
                self.jump_moves(square, piece, get_king_attacks(square), moves);
                self.castling_moves(square, piece, moves);
            }
        }
    }

    fn pawn_moves(&self, square: Square, pawn: Piece, moves: &mut Vec<Move>) {
        let side = pawn.side;
        let direction = side.pawn_direction();

        // Single and double pushes
        if let Some(one_up) = square.offset(0, direction) {
            if self.piece_at(one_up).is_none() {
                push_pawn_move(moves, pawn, square, one_up, None);

                if square.rank() == side.pawn_start_rank() {
                    if let Some(two_up) = one_up.offset(0, direction) {
                        if self.piece_at(two_up).is_none() {
                            moves.push(Move::new(pawn, square, two_up));
                        }
                    }
                }
            }
        }

        // Diagonal captures
        for df in [1, -1] {
            let Some(target) = square.offset(df, direction) else {
                continue;
            };
            match self.piece_at(target) {
                Some(victim) if victim.side != side => {
                    push_pawn_move(moves, pawn, square, target, Some(victim));
                }
                _ => {}
            }
        }

        // En passant
        if let Some(target) = self.en_passant_target {
            if target.rank() as i8 == square.rank() as i8 + direction
                && (target.file() as i8 - square.file() as i8).abs() == 1
                && self.piece_at(target).is_none()
            {
                let victim_square = Square::new(target.file(), square.rank());
                if let Some(victim) = self.piece_at(victim_square) {
                    if victim.kind == PieceKind::Pawn && victim.side != side {
                        moves.push(Move::new_en_passant(pawn, square, target, victim));
                    }
                }
            }
        }
    }

    /// Knight and king single steps taken from a precomputed attack mask
    fn jump_moves(&self, square: Square, piece: Piece, attacks: u64, moves: &mut Vec<Move>) {
        for target in iterate_bits(attacks) {
            match self.piece_at(target) {
                None => moves.push(Move::new(piece, square, target)),
                Some(victim) if victim.side != piece.side => {
                    moves.push(Move::with_capture(piece, square, target, victim));
                }
                Some(_) => {}
            }
        }
    }

    fn sliding_moves(&self, square: Square, piece: Piece, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in directions {
            let mut current = square.offset(df, dr);
            while let Some(target) = current {
                match self.piece_at(target) {
                    None => moves.push(Move::new(piece, square, target)),
                    Some(victim) => {
                        if victim.side != piece.side {
                            moves.push(Move::with_capture(piece, square, target, victim));
                        }
                        break;
                    }
                }
                current = target.offset(df, dr);
            }
        }
    }

    fn castling_moves(&self, square: Square, king: Piece, moves: &mut Vec<Move>) {
        let side = king.side;
        let home = Square::new(4, side.back_rank());
        if square != home {
            return;
        }

        for kingside in [true, false] {
            if self.can_castle(side, kingside) {
                let file = if kingside { 6 } else { 2 };
                moves.push(Move::new_castle(king, home, Square::new(file, side.back_rank())));
            }
        }
    }

    /// Castling right held, path empty, rook in place, and the king neither
    /// starts in, passes through, nor lands on an attacked square
    pub fn can_castle(&self, side: Side, kingside: bool) -> bool {
        if !has_castling_right(self.castling_rights, castling_right_for(side, kingside)) {
            return false;
        }

        let rank = side.back_rank();
        let (rook_file, empty_files, king_path): (u8, &[u8], [u8; 3]) = if kingside {
            (7, &[5, 6], [4, 5, 6])
        } else {
            (0, &[1, 2, 3], [4, 3, 2])
        };

        if self.piece_at(Square::new(4, rank)) != Some(Piece::new(PieceKind::King, side))
            || self.piece_at(Square::new(rook_file, rank)) != Some(Piece::new(PieceKind::Rook, side))
        {
            return false;
        }

        if empty_files
            .iter()
            .any(|&file| self.piece_at(Square::new(file, rank)).is_some())
        {
            return false;
        }

        let opponent = side.opposite();
        !king_path
            .iter()
            .any(|&file| self.is_under_threat(Square::new(file, rank), opponent))
    }
}

fn push_pawn_move(moves: &mut Vec<Move>, pawn: Piece, from: Square, to: Square, captured: Option<Piece>) {
    if to.rank() == pawn.side.promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            moves.push(Move::new_promotion(pawn, from, to, captured, kind));
        }
    } else {
        match captured {
            Some(victim) => moves.push(Move::with_capture(pawn, from, to, victim)),
            None => moves.push(Move::new(pawn, from, to)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(text: &str) -> Square {
        Square::from_algebraic(text).unwrap()
    }

    #[test]
    fn starting_position_has_twenty_moves() {
        let mut board = Board::new();
        assert_eq!(board.all_moves_legal(Side::White).len(), 20);
        assert_eq!(board.all_moves_legal(Side::Black).len(), 20);
    }

    #[test]
    fn promotions_enumerate_four_kinds_in_order() {
        let mut board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let promotions: Vec<PieceKind> = board
            .legal_moves_from(square("a7"))
            .iter()
            .filter_map(|mv| mv.promotion)
            .collect();
        assert_eq!(promotions, PieceKind::PROMOTIONS.to_vec());
    }

    #[test]
    fn en_passant_capture_is_generated() {
        let mut board = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 1").unwrap();
        let moves = board.legal_moves_from(square("e5"));
        let en_passant = moves.iter().find(|mv| mv.en_passant).unwrap();
        assert_eq!(en_passant.to, square("d6"));
        assert_eq!(en_passant.captured, Some(Piece::new(PieceKind::Pawn, Side::Black)));
        assert_eq!(en_passant.capture_square(), square("d5"));
    }

    #[test]
    fn pinned_piece_cannot_leave_the_pin_line() {
        // Knight on e2 is pinned by the rook on e8
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        assert!(board.legal_moves_from(square("e2")).is_empty());
    }

    #[test]
    fn castling_blocked_through_attacked_square() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/5r2/R3K2R w KQ - 0 1").unwrap();
        assert!(!board.can_castle(Side::White, true));
        let king_moves = board.legal_moves_from(square("e1"));
        assert!(!king_moves.iter().any(|mv| mv.castle && mv.is_kingside_castle()));

        let mut open = Board::from_fen("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
        let castles = open
            .legal_moves_from(square("e1"))
            .into_iter()
            .filter(|mv| mv.castle)
            .count();
        assert_eq!(castles, 2);
    }

    #[test]
    fn unfiltered_moves_include_moves_into_check() {
        let mut board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").unwrap();
        let unfiltered = board.all_moves_unfiltered(Side::White).len();
        let legal = board.all_moves_legal(Side::White).len();
        assert!(unfiltered > legal);
    }
}
