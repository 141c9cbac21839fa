use super::Board;
use crate::bitboard::{get_king_attacks, get_knight_attacks, iterate_bits};
use crate::types::*;

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

impl Board {
    /// Check if a square is attacked by any piece of `by_side`
    pub fn is_under_threat(&self, square: Square, by_side: Side) -> bool {
        self.check_sliding_threats(square, by_side)
            || self.check_knight_threats(square, by_side)
            || self.check_pawn_threats(square, by_side)
            || self.check_king_threats(square, by_side)
    }

    fn check_sliding_threats(&self, square: Square, by_side: Side) -> bool {
        let axial = ROOK_DIRECTIONS.iter().any(|&direction| {
            matches!(
                self.cast_ray(square, direction),
                Some(piece) if piece.side == by_side
                    && matches!(piece.kind, PieceKind::Rook | PieceKind::Queen)
            )
        });

        axial
            || BISHOP_DIRECTIONS.iter().any(|&direction| {
                matches!(
                    self.cast_ray(square, direction),
                    Some(piece) if piece.side == by_side
                        && matches!(piece.kind, PieceKind::Bishop | PieceKind::Queen)
                )
            })
    }

    /// Cast a ray in a direction and return the first piece encountered
    fn cast_ray(&self, start: Square, (df, dr): (i8, i8)) -> Option<Piece> {
        let mut current = start.offset(df, dr);
        while let Some(square) = current {
            if let Some(piece) = self.piece_at(square) {
                return Some(piece);
            }
            current = square.offset(df, dr);
        }
        None
    }

    fn check_knight_threats(&self, square: Square, by_side: Side) -> bool {
        iterate_bits(get_knight_attacks(square)).any(|origin| {
            self.piece_at(origin) == Some(Piece::new(PieceKind::Knight, by_side))
        })
    }

    fn check_pawn_threats(&self, square: Square, by_side: Side) -> bool {
        // Pawn attack direction is opposite of its movement direction
        let attack_direction = -by_side.pawn_direction();
        [-1, 1].into_iter().any(|df| {
            square
                .offset(df, attack_direction)
                .and_then(|origin| self.piece_at(origin))
                == Some(Piece::new(PieceKind::Pawn, by_side))
        })
    }

    fn check_king_threats(&self, square: Square, by_side: Side) -> bool {
        iterate_bits(get_king_attacks(square)).any(|origin| {
            self.piece_at(origin) == Some(Piece::new(PieceKind::King, by_side))
        })
    }

    pub fn is_in_check(&self, side: Side) -> bool {
        match self.find_king(side) {
            Some(king_square) => self.is_under_threat(king_square, side.opposite()),
            None => false,
        }
    }

    /// Side to move has no legal moves and its king is attacked
    pub fn is_checkmate(&mut self) -> bool {
        let side = self.current_side;
        self.is_in_check(side) && self.all_moves_legal(side).is_empty()
    }

    /// Side to move has no legal moves and its king is safe
    pub fn is_stalemate(&mut self) -> bool {
        let side = self.current_side;
        !self.is_in_check(side) && self.all_moves_legal(side).is_empty()
    }

    pub fn game_status(&mut self) -> GameStatus {
        let side = self.current_side;
        let in_check = self.is_in_check(side);
        let can_move = !self.all_moves_legal(side).is_empty();
        match (in_check, can_move) {
            (true, true) => GameStatus::Check(side),
            (true, false) => GameStatus::Checkmate(side),
            (false, true) => GameStatus::InProgress,
            (false, false) => GameStatus::Stalemate,
        }
    }
}
