use crate::{Board, Move};
use std::time::Instant;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }
}

#[derive(Debug)]
pub struct PerftTestCase {
    pub name: &'static str,
    pub fen: &'static str,
    pub expected_results: &'static [(u32, u64)], // (depth, expected_nodes)
}

// Standard perft test positions
pub const PERFT_POSITIONS: &[PerftTestCase] = &[
    PerftTestCase {
        name: "Starting Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_results: &[(1, 20), (2, 400), (3, 8_902), (4, 197_281)],
    },
    PerftTestCase {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_results: &[(1, 48), (2, 2_039), (3, 97_862)],
    },
    PerftTestCase {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_results: &[(1, 14), (2, 191), (3, 2_812), (4, 43_238)],
    },
    PerftTestCase {
        name: "Position 4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        expected_results: &[(1, 6), (2, 264), (3, 9_467)],
    },
];

/// Count leaf nodes of the legal move tree to `depth`
pub fn perft(board: &mut Board, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = board.all_moves_legal(board.current_side);
    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in &moves {
        board.make_move(mv);
        nodes += perft(board, depth - 1);
        let _ = board.undo_last_move();
    }
    nodes
}

/// Perft with a breakdown of the special moves found at the last ply
pub fn perft_detailed(board: &mut Board, depth: u32) -> PerftResult {
    let start = Instant::now();
    let mut result = PerftResult::default();
    perft_detailed_recursive(board, depth, &mut result);
    result.time_ms = start.elapsed().as_millis();
    result
}

fn perft_detailed_recursive(board: &mut Board, depth: u32, result: &mut PerftResult) {
    let moves = board.all_moves_legal(board.current_side);
    for mv in &moves {
        if depth == 1 {
            result.nodes += 1;
            result.captures += mv.is_capture() as u64;
            result.en_passant += mv.en_passant as u64;
            result.castles += mv.castle as u64;
            result.promotions += mv.is_promotion() as u64;
        } else {
            board.make_move(mv);
            perft_detailed_recursive(board, depth - 1, result);
            let _ = board.undo_last_move();
        }
    }
}

/// Node count below each root move
pub fn perft_divide(board: &mut Board, depth: u32) -> Vec<(Move, u64)> {
    let moves = board.all_moves_legal(board.current_side);
    let mut results = Vec::with_capacity(moves.len());
    for mv in moves {
        board.make_move(&mv);
        let nodes = perft(board, depth.saturating_sub(1));
        let _ = board.undo_last_move();
        results.push((mv, nodes));
    }
    results
}

pub fn run_perft_test(board: &mut Board, depth: u32, expected: u64) -> bool {
    let start = Instant::now();
    let nodes = perft(board, depth);
    let elapsed = start.elapsed();

    let passed = nodes == expected;
    tracing::info!(
        depth,
        nodes,
        expected,
        elapsed_ms = elapsed.as_millis() as u64,
        passed,
        "perft"
    );
    passed
}

pub fn run_position_tests(test_case: &PerftTestCase, max_depth: Option<u32>) -> bool {
    let Ok(mut board) = Board::from_fen(test_case.fen) else {
        tracing::error!(name = test_case.name, "could not load perft position");
        return false;
    };

    let mut all_passed = true;
    for &(depth, expected) in test_case.expected_results {
        if max_depth.is_some_and(|max| depth > max) {
            break;
        }
        all_passed &= run_perft_test(&mut board, depth, expected);
    }
    all_passed
}

pub fn run_all_tests(max_depth: Option<u32>) -> bool {
    PERFT_POSITIONS
        .iter()
        .fold(true, |all_passed, test_case| run_position_tests(test_case, max_depth) && all_passed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_perft() {
        let mut board = Board::new();
        assert_eq!(perft(&mut board, 1), 20);
        assert_eq!(perft(&mut board, 2), 400);
        assert_eq!(perft(&mut board, 3), 8_902);
    }

    #[test]
    fn reference_positions_to_shallow_depth() {
        assert!(run_all_tests(Some(2)));
    }

    #[test]
    fn position_3_exercises_en_passant_pins() {
        let mut board = Board::from_fen(PERFT_POSITIONS[2].fen).unwrap();
        assert_eq!(perft(&mut board, 3), 2_812);
    }

    #[test]
    fn detailed_counts_special_moves() {
        let mut board = Board::from_fen(PERFT_POSITIONS[1].fen).unwrap();
        let result = perft_detailed(&mut board, 1);
        assert_eq!(result.nodes, 48);
        assert_eq!(result.captures, 8);
        assert_eq!(result.castles, 2);
        assert_eq!(result.en_passant, 0);
        assert_eq!(result.promotions, 0);
    }

    #[test]
    fn perft_leaves_board_untouched() {
        let mut board = Board::from_fen(PERFT_POSITIONS[1].fen).unwrap();
        let original = board.clone();
        let divide = perft_divide(&mut board, 2);
        assert_eq!(divide.len(), 48);
        assert_eq!(divide.iter().map(|(_, nodes)| nodes).sum::<u64>(), 2_039);
        assert_eq!(board, original);
    }
}
