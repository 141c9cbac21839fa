use engine::{Board, GameStatus};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn undo_retraces_every_position(seed in any::<u64>(), plies in 1usize..40) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        let mut positions = vec![board.clone()];

        for _ in 0..plies {
            let moves = board.all_moves_legal(board.current_side);
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            board.make_move(mv);
            positions.push(board.clone());
        }

        while positions.len() > 1 {
            positions.pop();
            board.undo_last_move().unwrap();
            prop_assert_eq!(&board, positions.last().unwrap());
        }
        prop_assert!(board.undo_last_move().is_err());
    }

    #[test]
    fn fen_round_trips_random_positions(seed in any::<u64>(), plies in 0usize..30) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut board = Board::new();
        for _ in 0..plies {
            let moves = board.all_moves_legal(board.current_side);
            let Some(mv) = moves.choose(&mut rng) else {
                break;
            };
            board.make_move(mv);
        }

        let reloaded = Board::from_fen(&board.to_fen()).unwrap();
        prop_assert_eq!(reloaded.to_fen(), board.to_fen());
        prop_assert_eq!(reloaded.squares, board.squares);
    }
}

#[test]
fn terminal_positions_have_no_moves() {
    let mut mated = Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();
    assert_eq!(mated.game_status(), GameStatus::Checkmate(engine::Side::White));
    assert!(mated.all_moves_legal(mated.current_side).is_empty());
}
