use crate::{GameStatus, Move};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Human-readable game transcript. Diagnostics go through `tracing`; this
/// records what was played so a finished game can be saved and reviewed.
#[derive(Debug)]
pub struct ChessLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    move_count: u32,
    indent_level: usize,
}

impl ChessLogger {
    pub fn new() -> Self {
        let mut logger = Self {
            log_buffer: String::with_capacity(64 * 1024),
            advanced_logging: false,
            move_count: 0,
            indent_level: 0,
        };

        logger.log("🎯 === Chess Engine Game Log Started ===");
        logger.log(&format!("📅 Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("🔬 Advanced logging enabled - search summaries recorded");
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        let indent = "  ".repeat(self.indent_level);
        self.log_buffer.push_str(&indent);
        self.log(message);
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn move_count(&self) -> u32 {
        self.move_count
    }

    pub fn log_position(&mut self, fen: &str) {
        self.log(&format!("📋 Position: {}", fen));
    }

    pub fn log_human_move(&mut self, mv: &Move, time_ms: u64) {
        self.move_count += 1;
        self.log(&format!("{}. {} (Human move - {}ms)", self.move_count, mv, time_ms));
    }

    pub fn log_ai_move(&mut self, mv: &Move, time_ms: u64, eval: i32, moves_analyzed: u64) {
        self.move_count += 1;
        self.log(&format!(
            "{}. {} (AI move - {}ms) Eval: {} | {} moves analyzed",
            self.move_count, mv, time_ms, eval, moves_analyzed
        ));
    }

    pub fn log_random_move(&mut self, mv: &Move) {
        self.move_count += 1;
        self.log(&format!("{}. {} (Random move)", self.move_count, mv));
    }

    pub fn log_undo(&mut self, mv: &Move) {
        self.move_count = self.move_count.saturating_sub(1);
        self.log(&format!("↩️ UNDO: {}", mv));
    }

    pub fn log_search_start(&mut self, depth: u32, candidates: usize) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!("🔍 Search depth {} | {} candidate moves", depth, candidates));
            self.increase_indent();
        }
    }

    pub fn log_search_complete(&mut self, best_moves: &[Move], best_score: i32) {
        if self.should_log_advanced() {
            let names: Vec<String> = best_moves.iter().map(Move::to_coordinate).collect();
            self.log_with_indent(&format!(
                "✅ {} move(s) tied at score {}: {}",
                best_moves.len(),
                best_score,
                names.join(", ")
            ));
            self.decrease_indent();
        }
    }

    pub fn log_game_over(&mut self, status: GameStatus) {
        let result = match status {
            GameStatus::Checkmate(loser) => format!("🏁 Checkmate - {} wins", loser.opposite()),
            GameStatus::Stalemate => "🏁 Stalemate - draw".to_string(),
            GameStatus::Check(_) | GameStatus::InProgress => "🛑 Game stopped before the end".to_string(),
        };
        self.log(&result);
    }

    /// Write the transcript to `<dir>/<timestamp>.txt`
    pub fn save_to_file(&mut self, dir: &Path, reason: &str) -> io::Result<PathBuf> {
        fs::create_dir_all(dir)?;

        let now = chrono::Local::now();
        let path = dir.join(format!("{}.txt", now.format("%m_%d_%Y_%H_%M_%S")));

        self.log(&format!("💾 Game ended: {} - Saving log", reason));
        let mut file = File::create(&path)?;
        file.write_all(self.log_buffer.as_bytes())?;
        Ok(path)
    }
}

impl Default for ChessLogger {
    fn default() -> Self {
        Self::new()
    }
}
