use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::board::move_to_algebraic;
use crate::{GameStatus, Move};

/// In-memory game log. Advanced mode adds the search trace written by the AI.
#[derive(Debug)]
pub struct ChessLogger {
    pub log_buffer: String,
    pub advanced_logging: bool,
    game_start_time: Instant,
    move_count: u32,
    indent_level: usize,
}

impl ChessLogger {
    pub fn new() -> Self {
        let mut logger = Self::silent();
        logger.log("🎯 === Chess Engine Game Log Started ===");
        logger.log(&format!("📅 Date: {}", chrono::Local::now().format("%m/%d/%Y %H:%M:%S")));
        logger
    }

    /// A logger without the dated header, for short-lived search sessions.
    pub fn silent() -> Self {
        Self {
            log_buffer: String::new(),
            advanced_logging: false,
            game_start_time: Instant::now(),
            move_count: 0,
            indent_level: 0,
        }
    }

    pub fn should_log_advanced(&self) -> bool {
        self.advanced_logging
    }

    pub fn enable_advanced_logging(&mut self) {
        self.advanced_logging = true;
        self.log("🔬 Advanced logging enabled - search trace active");
    }

    pub fn disable_advanced_logging(&mut self) {
        self.advanced_logging = false;
        self.log("📊 Advanced logging disabled - Basic mode active");
    }

    pub fn log(&mut self, message: &str) {
        self.log_buffer.push_str(message);
        self.log_buffer.push('\n');
    }

    pub fn log_with_indent(&mut self, message: &str) {
        for _ in 0..self.indent_level {
            self.log_buffer.push_str("  ");
        }
        self.log(message);
    }

    pub fn increase_indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn decrease_indent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn elapsed_ms(&self) -> u128 {
        self.game_start_time.elapsed().as_millis()
    }

    // 🎯 MOVE LOGGING
    pub fn log_human_move(&mut self, mv: Move, time_ms: u64) {
        self.move_count += 1;
        self.log(&format!(
            "{}. {} (Human move - {}ms)",
            self.move_count,
            move_to_algebraic(mv),
            time_ms
        ));
    }

    pub fn log_ai_move(&mut self, mv: Move, time_ms: u64, eval: i32) {
        self.move_count += 1;
        self.log(&format!(
            "{}. {} (AI move - {}ms) Eval: {} {}",
            self.move_count,
            move_to_algebraic(mv),
            time_ms,
            eval,
            if eval > 0 { "📈" } else { "📉" }
        ));
    }

    pub fn log_undo(&mut self, mv: Move) {
        self.move_count = self.move_count.saturating_sub(1);
        self.log(&format!("↩️ UNDO: {}", move_to_algebraic(mv)));
    }

    pub fn log_game_status(&mut self, status: GameStatus) {
        if status.is_finished() {
            self.log(&format!("🏁 {}", status));
        }
    }

    pub fn log_game_aborted(&mut self, reason: &str) {
        self.log(&format!("🛑 Game finished abruptly - {}", reason));
    }

    /// Drain the buffer, e.g. to show it in a side panel.
    pub fn take_buffer(&mut self) -> String {
        std::mem::take(&mut self.log_buffer)
    }

    /// Write the buffer to `<dir>/<date>.txt` and return the file path.
    pub fn save_to_file(&mut self, dir: impl AsRef<Path>, reason: &str) -> io::Result<PathBuf> {
        let dir = dir.as_ref();
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Square};

    #[test]
    fn test_indent_and_move_numbers() {
        let mut logger = ChessLogger::silent();
        let e2e4 = Move::new(Square::new(4, 1), Square::new(4, 3));
        let e7e5 = Move::new(Square::new(4, 6), Square::new(4, 4));

        logger.log_human_move(e2e4, 12);
        logger.increase_indent();
        logger.log_with_indent("nested");
        logger.decrease_indent();
        logger.decrease_indent();
        logger.log_ai_move(e7e5, 40, -1);

        let text = logger.take_buffer();
        assert_eq!(
            text,
            "1. e2-e4 (Human move - 12ms)\n  nested\n2. e7-e5 (AI move - 40ms) Eval: -1 📉\n"
        );
        assert!(logger.log_buffer.is_empty());
    }

    #[test]
    fn test_finished_status_is_logged() {
        let mut logger = ChessLogger::silent();
        logger.log_game_status(GameStatus::InProgress);
        logger.log_game_status(GameStatus::Checkmate(Color::Black));
        assert_eq!(logger.log_buffer, "🏁 Checkmate! White wins.\n");
    }

    #[test]
    fn test_save_to_file() {
        let dir = std::env::temp_dir().join(format!("chess_logger_test_{}", std::process::id()));
        let mut logger = ChessLogger::new();
        let path = logger.save_to_file(&dir, "test").unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("🎯 === Chess Engine Game Log Started ==="));
        assert!(written.trim_end().ends_with("💾 Game ended: test - Saving log"));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_advanced_mode_toggle_undo_and_abort() {
        let mut logger = ChessLogger::silent();
        logger.enable_advanced_logging();
        assert!(logger.should_log_advanced());
        logger.disable_advanced_logging();
        assert!(!logger.should_log_advanced());
        logger.take_buffer();

        let e2e4 = Move::new(Square::new(4, 1), Square::new(4, 3));
        logger.log_ai_move(e2e4, 5, 0);
        logger.log_undo(e2e4);
        logger.log_human_move(e2e4, 7);
        logger.log_game_aborted("window closed");
        assert_eq!(
            logger.take_buffer(),
            "1. e2-e4 (AI move - 5ms) Eval: 0 📉\n↩️ UNDO: e2-e4\n1. e2-e4 (Human move - 7ms)\n🛑 Game finished abruptly - window closed\n"
        );
        assert!(logger.elapsed_ms() < 60_000);
    }
}
