use super::Board;
use crate::error::{BoardError, BoardResult};
use crate::types::*;

impl Board {
    /// Apply one ply without validating it. `undo_last_move` reverses it exactly.
    pub fn make_move(&mut self, mv: &Move) {
        let record = GameMove {
            mv: mv.clone(),
            previous_castling_rights: self.castling_rights,
            previous_en_passant_target: self.en_passant_target,
            previous_half_move_clock: self.half_move_clock,
            previous_full_move_number: self.full_move_number,
        };

        let moving_piece = self.piece_at(mv.from).unwrap_or(mv.mover);
        self.en_passant_target = None;

        if mv.castle {
            self.execute_castling(mv);
        } else {
            if mv.en_passant {
                self.set_piece(mv.capture_square(), None);
            }
            let placed = match mv.promotion {
                Some(kind) => Piece::new(kind, moving_piece.side),
                None => moving_piece,
            };
            self.set_piece(mv.from, None);
            self.set_piece(mv.to, Some(placed));
            self.update_castling_rights(mv, moving_piece);
            self.setup_en_passant(mv, moving_piece);
        }

        if moving_piece.kind == PieceKind::Pawn || mv.is_capture() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock += 1;
        }
        if moving_piece.side == Side::Black {
            self.full_move_number += 1;
        }

        self.current_side = self.current_side.opposite();
        self.move_history.push(record);
    }

    /// Undo the last move made, returning it
    pub fn undo_last_move(&mut self) -> BoardResult<Move> {
        let record = self.move_history.pop().ok_or(BoardError::NoMoveToUndo)?;
        let mv = &record.mv;

        if mv.castle {
            self.undo_castling(mv);
        } else {
            let moved_piece = match mv.promotion {
                // Restore original pawn, not promoted piece
                Some(_) => Piece::new(PieceKind::Pawn, mv.mover.side),
                None => self.piece_at(mv.to).unwrap_or(mv.mover),
            };
            self.set_piece(mv.to, None);
            self.set_piece(mv.from, Some(moved_piece));
            if let Some(captured) = mv.captured {
                self.set_piece(mv.capture_square(), Some(captured));
            }
        }

        self.castling_rights = record.previous_castling_rights;
        self.en_passant_target = record.previous_en_passant_target;
        self.half_move_clock = record.previous_half_move_clock;
        self.full_move_number = record.previous_full_move_number;
        self.current_side = self.current_side.opposite();

        Ok(record.mv)
    }

    /// King and rook squares for a castling move: (rook_from, rook_to)
    fn castling_rook_squares(mv: &Move) -> (Square, Square) {
        let rank = mv.from.rank();
        if mv.is_kingside_castle() {
            (Square::new(7, rank), Square::new(5, rank))
        } else {
            (Square::new(0, rank), Square::new(3, rank))
        }
    }

    fn execute_castling(&mut self, mv: &Move) {
        let (rook_from, rook_to) = Self::castling_rook_squares(mv);
        let king = self.piece_at(mv.from);
        let rook = self.piece_at(rook_from);

        self.set_piece(mv.from, None);
        self.set_piece(rook_from, None);
        self.set_piece(mv.to, king);
        self.set_piece(rook_to, rook);

        let side = mv.mover.side;
        remove_castling_right(&mut self.castling_rights, castling_right_for(side, true));
        remove_castling_right(&mut self.castling_rights, castling_right_for(side, false));
    }

    fn undo_castling(&mut self, mv: &Move) {
        let (rook_from, rook_to) = Self::castling_rook_squares(mv);
        let king = self.piece_at(mv.to);
        let rook = self.piece_at(rook_to);

        self.set_piece(mv.to, None);
        self.set_piece(rook_to, None);
        self.set_piece(mv.from, king);
        self.set_piece(rook_from, rook);
    }

    fn update_castling_rights(&mut self, mv: &Move, moving_piece: Piece) {
        if moving_piece.kind == PieceKind::King {
            let side = moving_piece.side;
            remove_castling_right(&mut self.castling_rights, castling_right_for(side, true));
            remove_castling_right(&mut self.castling_rights, castling_right_for(side, false));
        }

        // A rook leaving or being captured on its corner loses that right
        for square in [mv.from, mv.to] {
            let right = match (square.file(), square.rank()) {
                (0, 0) => WHITE_QUEENSIDE, // a1
                (7, 0) => WHITE_KINGSIDE,  // h1
                (0, 7) => BLACK_QUEENSIDE, // a8
                (7, 7) => BLACK_KINGSIDE,  // h8
                _ => continue,
            };
            remove_castling_right(&mut self.castling_rights, right);
        }
    }

    /// Set up en passant target after a double pawn push
    fn setup_en_passant(&mut self, mv: &Move, moving_piece: Piece) {
        if moving_piece.kind != PieceKind::Pawn {
            return;
        }
        let rank_diff = mv.to.rank() as i8 - mv.from.rank() as i8;
        if rank_diff.abs() == 2 {
            // The square the pawn jumped over
            let skipped_rank = (mv.from.rank() as i8 + rank_diff / 2) as u8;
            self.en_passant_target = Some(Square::new(mv.from.file(), skipped_rank));
        }
    }
}
