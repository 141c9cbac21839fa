use super::Board;
use crate::error::{BoardError, BoardResult};
use crate::types::*;

impl Board {
    /// Standard algebraic notation for a legal move in the current position
    pub fn notation_for_move(&mut self, mv: &Move) -> String {
        let mut notation = if mv.castle {
            let castle = if mv.is_kingside_castle() { "O-O" } else { "O-O-O" };
            castle.to_string()
        } else {
            let mut text = String::new();
            if mv.mover.kind == PieceKind::Pawn {
                if mv.is_capture() {
                    text.push((b'a' + mv.from.file()) as char);
                }
            } else {
                text.push(mv.mover.kind.letter());
                text.push_str(&self.disambiguation(mv));
            }
            if mv.is_capture() {
                text.push('x');
            }
            text.push_str(&mv.to.to_string());
            if let Some(kind) = mv.promotion {
                text.push('=');
                text.push(kind.letter());
            }
            text
        };

        notation.push_str(self.check_suffix(mv));
        notation
    }

    /// Origin file, rank, or both when another piece of the same kind can reach the same square
    fn disambiguation(&mut self, mv: &Move) -> String {
        let rivals: Vec<Square> = self
            .all_moves_legal(mv.mover.side)
            .into_iter()
            .filter(|other| other.mover.kind == mv.mover.kind && other.to == mv.to && other.from != mv.from)
            .map(|other| other.from)
            .collect();

        if rivals.is_empty() {
            String::new()
        } else if rivals.iter().all(|square| square.file() != mv.from.file()) {
            ((b'a' + mv.from.file()) as char).to_string()
        } else if rivals.iter().all(|square| square.rank() != mv.from.rank()) {
            ((b'1' + mv.from.rank()) as char).to_string()
        } else {
            mv.from.to_string()
        }
    }

    fn check_suffix(&mut self, mv: &Move) -> &'static str {
        let opponent = mv.mover.side.opposite();
        self.make_move(mv);
        let suffix = if !self.is_in_check(opponent) {
            ""
        } else if self.all_moves_legal(opponent).is_empty() {
            "#"
        } else {
            "+"
        };
        let _ = self.undo_last_move();
        suffix
    }

    /// Resolve coordinate ("e7e8q") or algebraic ("Nf3") text against the legal moves of the side to move
    pub fn parse_move(&mut self, text: &str) -> BoardResult<Move> {
        let wanted = text.trim().trim_end_matches(['+', '#']);
        let side = self.current_side;
        let legal = self.all_moves_legal(side);

        if let Some(mv) = legal.iter().find(|mv| mv.to_coordinate() == wanted.to_ascii_lowercase()) {
            return Ok(mv.clone());
        }

        for mv in legal {
            let notation = self.notation_for_move(&mv);
            if notation.trim_end_matches(['+', '#']) == wanted {
                return Ok(mv);
            }
        }

        Err(BoardError::IllegalMove {
            text: text.to_string(),
        })
    }
}
