use crate::error::{BoardError, BoardResult};
use crate::types::*;
use std::fmt;

// Declare submodules
pub mod moves;
pub mod notation;
pub mod state;
pub mod validation;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [Option<Piece>; 64],
    pub current_side: Side,
    pub move_history: Vec<GameMove>,
    pub half_move_clock: u16,
    pub full_move_number: u16,
    pub castling_rights: u8,
    pub en_passant_target: Option<Square>,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.castling_rights = ALL_CASTLING_RIGHTS;
        board.setup_starting_position();
        board
    }

    /// Board with no pieces, White to move
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            current_side: Side::White,
            move_history: Vec::new(),
            half_move_clock: 0,
            full_move_number: 1,
            castling_rights: 0,
            en_passant_target: None,
        }
    }

    fn setup_starting_position(&mut self) {
        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            self.set_piece(Square::new(file, 0), Some(Piece::new(kind, Side::White)));
            self.set_piece(Square::new(file, 1), Some(Piece::new(PieceKind::Pawn, Side::White)));
            self.set_piece(Square::new(file, 6), Some(Piece::new(PieceKind::Pawn, Side::Black)));
            self.set_piece(Square::new(file, 7), Some(Piece::new(kind, Side::Black)));
        }
    }

    // Basic board operations
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.0 as usize]
    }

    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.0 as usize] = piece;
    }

    /// Squares holding pieces of `side`, a1 first
    pub fn squares_of(&self, side: Side) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares.iter().enumerate().filter_map(move |(index, piece)| match piece {
            Some(piece) if piece.side == side => Some((Square(index as u8), *piece)),
            _ => None,
        })
    }

    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.squares_of(side)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(square, _)| square)
    }

    /// Material of `side` minus material of its opponent
    pub fn point_advantage_of_side(&self, side: Side) -> i32 {
        self.squares.iter().flatten().fold(0, |total, piece| {
            if piece.side == side {
                total + piece.value()
            } else {
                total - piece.value()
            }
        })
    }

    pub fn last_move(&self) -> Option<&Move> {
        self.move_history.last().map(|game_move| &game_move.mv)
    }

    pub fn last_piece_moved(&self) -> Option<Piece> {
        self.last_move().map(|mv| mv.mover)
    }

    pub fn moves_made(&self) -> usize {
        self.move_history.len()
    }

    // FEN parsing functionality
    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 {
            return Err(invalid_fen("must have 6 parts"));
        }

        let mut board = Self::empty();
        board.parse_piece_placement(parts[0])?;

        board.current_side = match parts[1] {
            "w" => Side::White,
            "b" => Side::Black,
            _ => return Err(invalid_fen("invalid active color")),
        };

        board.parse_castling_rights(parts[2])?;
        board.parse_en_passant(parts[3])?;

        board.half_move_clock = parts[4]
            .parse()
            .map_err(|_| invalid_fen("invalid halfmove clock"))?;
        board.full_move_number = parts[5]
            .parse()
            .map_err(|_| invalid_fen("invalid fullmove number"))?;

        Ok(board)
    }

    fn parse_piece_placement(&mut self, placement: &str) -> BoardResult<()> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid_fen("piece placement must have 8 ranks"));
        }

        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN starts from rank 8
            let mut file = 0u8;

            for ch in rank_str.chars() {
                if let Some(empty_squares) = ch.to_digit(10) {
                    file += empty_squares as u8;
                } else {
                    if file >= 8 {
                        return Err(invalid_fen("too many pieces in rank"));
                    }
                    let piece = Piece::from_fen_char(ch)
                        .ok_or_else(|| invalid_fen(&format!("unknown piece '{}'", ch)))?;
                    self.set_piece(Square::new(file, rank), Some(piece));
                    file += 1;
                }
            }

            if file != 8 {
                return Err(invalid_fen("incomplete rank"));
            }
        }

        Ok(())
    }

    fn parse_castling_rights(&mut self, castling_str: &str) -> BoardResult<()> {
        self.castling_rights = 0;
        if castling_str == "-" {
            return Ok(());
        }

        for ch in castling_str.chars() {
            self.castling_rights |= match ch {
                'K' => WHITE_KINGSIDE,
                'Q' => WHITE_QUEENSIDE,
                'k' => BLACK_KINGSIDE,
                'q' => BLACK_QUEENSIDE,
                _ => return Err(invalid_fen(&format!("invalid castling right '{}'", ch))),
            };
        }

        Ok(())
    }

    fn parse_en_passant(&mut self, en_passant_str: &str) -> BoardResult<()> {
        if en_passant_str == "-" {
            self.en_passant_target = None;
            return Ok(());
        }

        let target = Square::from_algebraic(en_passant_str)
            .ok_or_else(|| invalid_fen("invalid en passant square"))?;
        self.en_passant_target = Some(target);
        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut placement = String::new();
        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            placement.push_str(&empty.to_string());
                            empty = 0;
                        }
                        placement.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                placement.push_str(&empty.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }

        let side = match self.current_side {
            Side::White => "w",
            Side::Black => "b",
        };

        let mut castling = String::new();
        for (right, ch) in [
            (WHITE_KINGSIDE, 'K'),
            (WHITE_QUEENSIDE, 'Q'),
            (BLACK_KINGSIDE, 'k'),
            (BLACK_QUEENSIDE, 'q'),
        ] {
            if has_castling_right(self.castling_rights, right) {
                castling.push(ch);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        let en_passant = self
            .en_passant_target
            .map(|square| square.to_string())
            .unwrap_or_else(|| "-".to_string());

        format!(
            "{} {} {} {} {} {}",
            placement, side, castling, en_passant, self.half_move_clock, self.full_move_number
        )
    }
}

fn invalid_fen(reason: &str) -> BoardError {
    BoardError::InvalidFen {
        reason: reason.to_string(),
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8 {
                let ch = self
                    .piece_at(Square::new(file, rank))
                    .map(|piece| piece.to_fen_char())
                    .unwrap_or('.');
                write!(f, "{} ", ch)?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
