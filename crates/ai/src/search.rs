use crate::board::GameBoard;
use crate::error::{SearchError, SearchResult};
use crate::guard::AppliedMove;
use crate::tree::{MoveTree, NodeId};
use crate::types::{SearchConfig, SearchReport, DEFAULT_WORKERS};
use engine::{Move, Side};
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, trace};

/// Fixed-depth, full-width minimax over material, with random tie-breaking.
///
/// The engine borrows the board mutably for its whole lifetime. Every search
/// applies and undoes moves on that one board and leaves it exactly as it
/// found it.
pub struct SearchEngine<'b, B: GameBoard, R: Rng = StdRng> {
    board: &'b mut B,
    side: Side,
    depth: u32,
    pub(crate) workers: usize,
    moves_analyzed: u64,
    rng: R,
}

impl<'b, B: GameBoard> SearchEngine<'b, B, StdRng> {
    pub fn new(board: &'b mut B, side: Side, depth: u32) -> Self {
        Self::with_rng(board, side, depth, StdRng::from_os_rng())
    }

    pub fn from_config(board: &'b mut B, config: SearchConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut engine = Self::with_rng(board, config.side, config.depth, rng);
        engine.workers = config.workers;
        engine
    }
}

impl<'b, B: GameBoard, R: Rng> SearchEngine<'b, B, R> {
    /// A depth of 0 is treated as 1
    pub fn with_rng(board: &'b mut B, side: Side, depth: u32, rng: R) -> Self {
        Self {
            board,
            side,
            depth: depth.max(1),
            workers: DEFAULT_WORKERS,
            moves_analyzed: 0,
            rng,
        }
    }

    pub fn board(&self) -> &B {
        &*self.board
    }

    pub fn board_mut(&mut self) -> &mut B {
        &mut *self.board
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Non-root moves discovered during expansion, summed over every search
    /// this engine has run
    pub fn moves_analyzed(&self) -> u64 {
        self.moves_analyzed
    }

    /// One root node per legal move of the searching side, each expanded to
    /// the configured depth
    pub fn generate_move_tree(&mut self) -> SearchResult<MoveTree> {
        let mut expansion = Expansion {
            side: self.side,
            depth: self.depth,
            moves_analyzed: &mut self.moves_analyzed,
        };
        expansion.generate_move_tree(&mut *self.board)
    }

    /// Score and expand `node`. The node's move must already be applied to
    /// the board; the board is back in that state when this returns.
    pub fn populate_node_children(&mut self, tree: &mut MoveTree, node: NodeId) -> SearchResult<()> {
        let mut expansion = Expansion {
            side: self.side,
            depth: self.depth,
            moves_analyzed: &mut self.moves_analyzed,
        };
        expansion.populate_node_children(&mut *self.board, tree, node)
    }

    /// Resolve every root's score and return the moves tied at the best one
    pub fn best_moves_with_move_tree(&self, tree: &mut MoveTree) -> Vec<Move> {
        for root in tree.roots().to_vec() {
            tree.optimal_point_advantage(root);
        }
        tree.max_roots()
            .into_iter()
            .map(|id| tree[id].mv.clone())
            .collect()
    }

    /// Build, score and pick, reporting the evaluation alongside the move
    pub fn search(&mut self) -> SearchResult<SearchReport> {
        let side = self.side;
        debug!(%side, depth = self.depth, "🔍 search started");

        let mut tree = self.generate_move_tree()?;
        let candidates = self.best_moves_with_move_tree(&mut tree);
        let evaluation = tree
            .max_roots()
            .first()
            .map(|&id| tree[id].point_advantage)
            .unwrap_or_default();

        let mut best_move = candidates
            .choose(&mut self.rng)
            .cloned()
            .ok_or(SearchError::NoLegalMoves { side })?;
        best_move.notation = Some(self.board.notation_for_move(&best_move));

        debug!(
            %side,
            best = %best_move,
            evaluation,
            tied = candidates.len(),
            nodes = tree.len(),
            moves_analyzed = self.moves_analyzed,
            "✅ search complete"
        );

        Ok(SearchReport {
            best_move,
            candidates,
            evaluation,
            depth: self.depth,
            moves_analyzed: self.moves_analyzed,
        })
    }

    /// One of the best-scoring moves, picked uniformly at random, with its notation set
    pub fn best_move(&mut self) -> SearchResult<Move> {
        self.search().map(|report| report.best_move)
    }

    /// Plays `best_move` on the board
    pub fn make_best_move(&mut self) -> SearchResult<Move> {
        let mv = self.best_move()?;
        self.board.make_move(&mv);
        Ok(mv)
    }

    /// First legal move in enumeration order
    pub fn first_move(&mut self, side: Side) -> SearchResult<Move> {
        self.board
            .all_moves_legal(side)
            .into_iter()
            .next()
            .ok_or(SearchError::NoLegalMoves { side })
    }

    pub fn random_move(&mut self) -> SearchResult<Move> {
        let side = self.side;
        self.board
            .all_moves_legal(side)
            .choose(&mut self.rng)
            .cloned()
            .ok_or(SearchError::NoLegalMoves { side })
    }

    pub fn make_random_move(&mut self) -> SearchResult<Move> {
        let mv = self.random_move()?;
        self.board.make_move(&mv);
        Ok(mv)
    }

    pub fn is_valid_move(&mut self, mv: &Move, side: Side) -> bool {
        self.board.all_moves_legal(side).contains(mv)
    }
}

/// Tree expansion state kept apart from the engine so the board can be
/// handed down the recursion while the counter is updated
struct Expansion<'a> {
    side: Side,
    depth: u32,
    moves_analyzed: &'a mut u64,
}

impl Expansion<'_> {
    fn generate_move_tree<B: GameBoard>(&mut self, board: &mut B) -> SearchResult<MoveTree> {
        let mut tree = MoveTree::new();
        let root_moves = board.all_moves_legal(self.side);
        debug!(side = %self.side, candidates = root_moves.len(), "generating move tree");

        for mv in root_moves {
            let root = tree.add_root(mv);
            let mut applied = AppliedMove::apply(board, &tree[root].mv);
            self.populate_node_children(&mut *applied, &mut tree, root)?;
        }
        Ok(tree)
    }

    fn populate_node_children<B: GameBoard>(
        &mut self,
        board: &mut B,
        tree: &mut MoveTree,
        node: NodeId,
    ) -> SearchResult<()> {
        tree[node].point_advantage = board.point_advantage_of_side(self.side);
        let depth = tree.depth(node);
        if depth >= self.depth {
            return Ok(());
        }

        let to_move = board.current_side();
        let legal_moves = board.all_moves_legal(to_move);
        if legal_moves.is_empty() {
            return if board.is_checkmate() {
                tree[node].mv.checkmate = true;
                Ok(())
            } else if board.is_stalemate() {
                tree[node].mv.stalemate = true;
                tree[node].point_advantage = 0;
                Ok(())
            } else {
                error!(depth, side = %to_move, "board has no legal moves but is neither checkmate nor stalemate");
                Err(SearchError::InconsistentTerminalState { depth })
            };
        }

        for mv in legal_moves {
            *self.moves_analyzed += 1;
            trace!(depth = depth + 1, mv = %mv, "expanding");
            let child = tree.add_child(node, mv);
            let mut applied = AppliedMove::apply(board, &tree[child].mv);
            self.populate_node_children(&mut *applied, tree, child)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{Board, Square};

    fn seeded(board: &mut Board, side: Side, depth: u32) -> SearchEngine<'_, Board> {
        SearchEngine::with_rng(board, side, depth, StdRng::seed_from_u64(7))
    }

    #[test]
    fn depth_one_tree_has_one_leaf_per_legal_move() {
        let mut board = Board::new();
        let mut engine = seeded(&mut board, Side::White, 1);
        let tree = engine.generate_move_tree().unwrap();

        assert_eq!(tree.roots().len(), 20);
        assert_eq!(tree.len(), 20);
        assert!(tree.roots().iter().all(|&root| tree[root].is_leaf()));
        assert_eq!(engine.moves_analyzed(), 0);
    }

    #[test]
    fn depth_two_counts_every_reply() {
        let mut board = Board::new();
        let mut engine = seeded(&mut board, Side::White, 2);
        let tree = engine.generate_move_tree().unwrap();

        assert_eq!(tree.len(), 20 + 400);
        assert_eq!(engine.moves_analyzed(), 400);
        for &root in tree.roots() {
            assert_eq!(tree[root].children.len(), 20);
            assert_eq!(tree.depth(tree[root].children[0]), 2);
        }
    }

    #[test]
    fn counter_accumulates_across_searches() {
        let mut board = Board::new();
        let mut engine = seeded(&mut board, Side::White, 2);
        engine.best_move().unwrap();
        engine.best_move().unwrap();
        assert_eq!(engine.moves_analyzed(), 800);
    }

    #[test]
    fn zero_depth_is_treated_as_one() {
        let mut board = Board::new();
        let engine = seeded(&mut board, Side::White, 0);
        assert_eq!(engine.depth(), 1);
    }

    #[test]
    fn best_move_prefers_winning_material() {
        // Rook on a1 can take the queen on a8
        let mut board = Board::from_fen("q3k3/8/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mut engine = seeded(&mut board, Side::White, 1);
        let report = engine.search().unwrap();

        assert_eq!(report.candidates.len(), 1);
        assert_eq!(report.best_move.to_coordinate(), "a1a8");
        assert_eq!(report.best_move.notation.as_deref(), Some("Rxa8+"));
        assert_eq!(report.evaluation, 5);
    }

    #[test]
    fn depth_two_avoids_hanging_the_rook() {
        // At depth 1 every rook move scores the same; at depth 2 moves that
        // let the queen take the rook are scored by the reply
        let mut board = Board::from_fen("4k3/8/8/8/8/8/3q4/R5K1 w - - 0 1").unwrap();
        let mut engine = seeded(&mut board, Side::White, 2);
        let mut tree = engine.generate_move_tree().unwrap();
        let best = engine.best_moves_with_move_tree(&mut tree);

        let hanging = Square::from_algebraic("d1").unwrap();
        assert!(!best.is_empty());
        assert!(best.iter().all(|mv| mv.to != hanging));
    }

    #[test]
    fn make_best_move_plays_on_the_board() {
        let mut board = Board::new();
        let mv = seeded(&mut board, Side::White, 1).make_best_move().unwrap();
        assert_eq!(board.current_side, Side::Black);
        assert_eq!(board.last_move(), Some(&mv));
    }

    #[test]
    fn auxiliary_moves() {
        let mut board = Board::new();
        let mut engine = seeded(&mut board, Side::White, 1);

        let first = engine.first_move(Side::Black).unwrap();
        assert_eq!(first.mover.side, Side::Black);

        let random = engine.random_move().unwrap();
        assert!(engine.is_valid_move(&random, Side::White));
        assert!(!engine.is_valid_move(&random, Side::Black));

        let played = engine.make_random_move().unwrap();
        assert_eq!(engine.board().last_move(), Some(&played));
    }

    #[test]
    fn no_legal_moves_is_an_error() {
        // Black is checkmated
        let mut board = Board::from_fen("R5k1/5ppp/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let mut engine = seeded(&mut board, Side::Black, 2);

        assert!(matches!(
            engine.first_move(Side::Black),
            Err(SearchError::NoLegalMoves { side: Side::Black })
        ));
        assert!(matches!(engine.random_move(), Err(SearchError::NoLegalMoves { .. })));
        assert!(matches!(engine.best_move(), Err(SearchError::NoLegalMoves { .. })));
    }
}
