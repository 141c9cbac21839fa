use crate::tree::MoveTree;
use crate::types::SearchReport;
use engine::ChessLogger;

/// Search summaries written into the game transcript
pub trait AILoggerExtensions {
    fn log_search_report(&mut self, report: &SearchReport, time_ms: u64);
    fn log_root_scores(&mut self, tree: &MoveTree);
}

impl AILoggerExtensions for ChessLogger {
    fn log_search_report(&mut self, report: &SearchReport, time_ms: u64) {
        self.log_search_start(report.depth, report.candidates.len());
        self.log_search_complete(&report.candidates, report.evaluation);
        self.log_ai_move(&report.best_move, time_ms, report.evaluation, report.moves_analyzed);
    }

    fn log_root_scores(&mut self, tree: &MoveTree) {
        if !self.should_log_advanced() {
            return;
        }

        self.log_with_indent(&format!("🌳 Move tree: {} nodes, {} root moves", tree.len(), tree.roots().len()));
        self.increase_indent();
        for &root in tree.roots() {
            let node = &tree[root];
            let mut flags = String::new();
            if node.mv.checkmate {
                flags.push_str(" [MATE]");
            }
            if node.mv.stalemate {
                flags.push_str(" [STALEMATE]");
            }
            let line = format!("├─ {} → {}{}", node.mv.to_coordinate(), node.point_advantage, flags);
            self.log_with_indent(&line);
        }
        self.decrease_indent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchEngine;
    use engine::{Board, Side};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn report_lands_in_transcript() {
        let mut board = Board::new();
        let mut engine = SearchEngine::with_rng(&mut board, Side::White, 1, StdRng::seed_from_u64(3));
        let report = engine.search().unwrap();

        let mut logger = ChessLogger::new();
        logger.enable_advanced_logging();
        logger.log_search_report(&report, 5);

        assert!(logger.log_buffer.contains("🔍 Search depth 1 | 20 candidate moves"));
        assert!(logger.log_buffer.contains("✅ 20 move(s) tied at score 0"));
        assert!(logger.log_buffer.contains(&format!("1. {} (AI move - 5ms) Eval: 0 | 0 moves analyzed", report.best_move)));
    }

    #[test]
    fn root_scores_need_advanced_logging() {
        let mut board = Board::from_fen("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1").unwrap();
        let mut engine = SearchEngine::with_rng(&mut board, Side::White, 2, StdRng::seed_from_u64(3));
        let mut tree = engine.generate_move_tree().unwrap();
        engine.best_moves_with_move_tree(&mut tree);

        let mut logger = ChessLogger::new();
        logger.log_root_scores(&tree);
        assert!(!logger.log_buffer.contains("Move tree"));

        logger.enable_advanced_logging();
        logger.log_root_scores(&tree);
        assert!(logger.log_buffer.contains("├─ a1a8 → 2 [MATE]"));
    }
}
