use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    /// Square reached by stepping `df` files and `dr` ranks, if still on the board
    pub fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Parse "e4" style coordinates
    pub fn from_algebraic(text: &str) -> Option<Square> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Some(Square::new(file, rank))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank delta of a single pawn push
    pub fn pawn_direction(self) -> i8 {
        match self {
            Side::White => 1,
            Side::Black => -1,
        }
    }

    pub fn pawn_start_rank(self) -> u8 {
        match self {
            Side::White => 1,
            Side::Black => 6,
        }
    }

    pub fn promotion_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Side::White => 0,
            Side::Black => 7,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "White"),
            Side::Black => write!(f, "Black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Promotion choices, in the order the generator yields them
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Rook,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Queen,
    ];

    /// Material value used by the point-advantage score
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 1,
            PieceKind::Knight => 3,
            PieceKind::Bishop => 3,
            PieceKind::Rook => 5,
            PieceKind::Queen => 9,
            PieceKind::King => 100,
        }
    }

    /// Upper-case letter used by FEN and algebraic notation
    pub fn letter(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_letter(ch: char) -> Option<PieceKind> {
        match ch.to_ascii_uppercase() {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side) -> Self {
        Self { kind, side }
    }

    pub fn value(&self) -> i32 {
        self.kind.value()
    }

    /// FEN character: upper case for White, lower case for Black
    pub fn to_fen_char(&self) -> char {
        match self.side {
            Side::White => self.kind.letter(),
            Side::Black => self.kind.letter().to_ascii_lowercase(),
        }
    }

    pub fn from_fen_char(ch: char) -> Option<Piece> {
        let kind = PieceKind::from_letter(ch)?;
        let side = if ch.is_ascii_uppercase() { Side::White } else { Side::Black };
        Some(Piece::new(kind, side))
    }
}

/// A single ply. Immutable once generated, apart from the terminal flags and
/// the notation the search fills in.
#[derive(Debug, Clone)]
pub struct Move {
    pub mover: Piece,
    pub from: Square,
    pub to: Square,
    pub captured: Option<Piece>,
    /// Kind the pawn turns into
    pub promotion: Option<PieceKind>,
    pub en_passant: bool,
    pub castle: bool,
    pub checkmate: bool,
    pub stalemate: bool,
    pub notation: Option<String>,
}

impl Move {
    pub fn new(mover: Piece, from: Square, to: Square) -> Self {
        Self {
            mover,
            from,
            to,
            captured: None,
            promotion: None,
            en_passant: false,
            castle: false,
            checkmate: false,
            stalemate: false,
            notation: None,
        }
    }

    pub fn with_capture(mover: Piece, from: Square, to: Square, captured: Piece) -> Self {
        Self {
            captured: Some(captured),
            ..Self::new(mover, from, to)
        }
    }

    pub fn new_promotion(mover: Piece, from: Square, to: Square, captured: Option<Piece>, kind: PieceKind) -> Self {
        Self {
            captured,
            promotion: Some(kind),
            ..Self::new(mover, from, to)
        }
    }

    pub fn new_en_passant(mover: Piece, from: Square, to: Square, captured: Piece) -> Self {
        Self {
            en_passant: true,
            ..Self::with_capture(mover, from, to, captured)
        }
    }

    pub fn new_castle(king: Piece, from: Square, to: Square) -> Self {
        Self {
            castle: true,
            ..Self::new(king, from, to)
        }
    }

    pub fn is_capture(&self) -> bool {
        self.captured.is_some()
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Square of the piece taken by this move, which differs from `to` only for en passant
    pub fn capture_square(&self) -> Square {
        if self.en_passant {
            Square::new(self.to.file(), self.from.rank())
        } else {
            self.to
        }
    }

    pub fn is_kingside_castle(&self) -> bool {
        self.castle && self.to.file() == 6
    }

    /// Coordinate form, e.g. "e7e8q"
    pub fn to_coordinate(&self) -> String {
        match self.promotion {
            Some(kind) => format!("{}{}{}", self.from, self.to, kind.letter().to_ascii_lowercase()),
            None => format!("{}{}", self.from, self.to),
        }
    }
}

// The same logical move may come from different generator calls, so the mover
// and captured piece do not take part in equality.
impl PartialEq for Move {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.promotion == other.promotion
            && self.en_passant == other.en_passant
            && self.castle == other.castle
            && self.checkmate == other.checkmate
            && self.stalemate == other.stalemate
    }
}

impl Eq for Move {}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.notation {
            Some(notation) => write!(f, "{}", notation),
            None => write!(f, "{}", self.to_coordinate()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Side),     // Which side is in check
    Checkmate(Side), // Which side is checkmated (other side wins)
    Stalemate,
}

/// Undo record pushed by `make_move`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    pub previous_castling_rights: u8,
    pub previous_en_passant_target: Option<Square>,
    pub previous_half_move_clock: u16,
    pub previous_full_move_number: u16,
}

// Castling rights bitfield constants
pub const WHITE_KINGSIDE: u8 = 0b0001;
pub const WHITE_QUEENSIDE: u8 = 0b0010;
pub const BLACK_KINGSIDE: u8 = 0b0100;
pub const BLACK_QUEENSIDE: u8 = 0b1000;
pub const ALL_CASTLING_RIGHTS: u8 = 0b1111;

pub fn has_castling_right(castling_rights: u8, right: u8) -> bool {
    castling_rights & right != 0
}

pub fn remove_castling_right(castling_rights: &mut u8, right: u8) {
    *castling_rights &= !right;
}

pub fn castling_right_for(side: Side, kingside: bool) -> u8 {
    match (side, kingside) {
        (Side::White, true) => WHITE_KINGSIDE,
        (Side::White, false) => WHITE_QUEENSIDE,
        (Side::Black, true) => BLACK_KINGSIDE,
        (Side::Black, false) => BLACK_QUEENSIDE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_coordinates_round_trip_through_algebraic() {
        let e4 = Square::from_algebraic("e4").unwrap();
        assert_eq!(e4, Square::new(4, 3));
        assert_eq!(e4.to_string(), "e4");
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
    }

    #[test]
    fn offset_stops_at_board_edge() {
        let h8 = Square::new(7, 7);
        assert_eq!(h8.offset(1, 0), None);
        assert_eq!(h8.offset(-1, -1), Some(Square::new(6, 6)));
    }

    #[test]
    fn move_equality_ignores_mover_and_notation() {
        let white_pawn = Piece::new(PieceKind::Pawn, Side::White);
        let other_pawn = Piece::new(PieceKind::Queen, Side::White);
        let from = Square::new(4, 1);
        let to = Square::new(4, 3);

        let mut a = Move::new(white_pawn, from, to);
        let b = Move::new(other_pawn, from, to);
        a.notation = Some("e4".to_string());
        assert_eq!(a, b);

        let mut flagged = b.clone();
        flagged.checkmate = true;
        assert_ne!(a, flagged);
    }

    #[test]
    fn promotions_to_different_kinds_are_distinct() {
        let pawn = Piece::new(PieceKind::Pawn, Side::White);
        let from = Square::new(0, 6);
        let to = Square::new(0, 7);
        let queen = Move::new_promotion(pawn, from, to, None, PieceKind::Queen);
        let knight = Move::new_promotion(pawn, from, to, None, PieceKind::Knight);
        assert_ne!(queen, knight);
        assert_eq!(queen.to_coordinate(), "a7a8q");
    }
}
