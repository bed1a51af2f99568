use engine::{move_to_algebraic, ChessLogger, Move};

use crate::types::Score;

/// Search trace written into the game log when advanced logging is on.
pub trait AILoggerExtensions {
    fn log_search_start(&mut self, depth: i32, alpha: Score, beta: Score, maximizing: bool);
    fn log_node_enter(&mut self, depth: i32, alpha: Score, beta: Score, maximizing: bool, move_count: usize);
    fn log_move_exploration_start(&mut self, mv: Move, move_num: usize, total_moves: usize);
    fn log_move_exploration_result(&mut self, mv: Move, score: Score, alpha: Score, beta: Score, improved: bool);
    fn log_cutoff(&mut self, alpha: Score, beta: Score, pruned: usize);
    fn log_leaf_evaluation(&mut self, depth: i32, eval_score: Score);
    fn log_node_exit(&mut self, depth: i32, best_score: Score, best_move: Option<Move>);
    fn log_search_complete(&mut self, best_move: Option<Move>, best_score: Score, nodes: u64);
}

impl AILoggerExtensions for ChessLogger {
    fn log_search_start(&mut self, depth: i32, alpha: Score, beta: Score, maximizing: bool) {
        if self.should_log_advanced() {
            self.log(&format!(
                "🚀 Search depth {} | α={}, β={} | {}",
                depth,
                alpha,
                beta,
                side_label(maximizing)
            ));
        }
    }

    fn log_node_enter(&mut self, depth: i32, alpha: Score, beta: Score, maximizing: bool, move_count: usize) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!(
                "🔍 Node depth {} | α={}, β={} | {} | {} moves",
                depth,
                alpha,
                beta,
                side_label(maximizing),
                move_count
            ));
            self.increase_indent();
        }
    }

    fn log_move_exploration_start(&mut self, mv: Move, move_num: usize, total_moves: usize) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!("├─ [{}/{}] {}", move_num, total_moves, move_to_algebraic(mv)));
            self.increase_indent();
        }
    }

    fn log_move_exploration_result(&mut self, mv: Move, score: Score, alpha: Score, beta: Score, improved: bool) {
        if self.should_log_advanced() {
            self.decrease_indent();
            self.log_with_indent(&format!(
                "└─ {} → {} (α:{}, β:{}){}",
                move_to_algebraic(mv),
                score,
                alpha,
                beta,
                if improved { " ⭐ NEW BEST" } else { "" }
            ));
        }
    }

    fn log_cutoff(&mut self, alpha: Score, beta: Score, pruned: usize) {
        if self.should_log_advanced() {
            self.log_with_indent(&format!(
                "✂️ CUTOFF! (β:{} ≤ α:{}) pruning {} sibling(s)",
                beta, alpha, pruned
            ));
        }
    }

    fn log_leaf_evaluation(&mut self, depth: i32, eval_score: Score) {
        if self.should_log_advanced() {
            let kind = if depth == 0 { "LEAF" } else { "TERMINAL" };
            self.log_with_indent(&format!("🍃 {} (depth {}) → Evaluation: {}", kind, depth, eval_score));
        }
    }

    fn log_node_exit(&mut self, depth: i32, best_score: Score, best_move: Option<Move>) {
        if self.should_log_advanced() {
            self.decrease_indent();
            self.log_with_indent(&format!(
                "🏁 Node depth {} done | Score: {}, Best: {}",
                depth,
                best_score,
                best_move.map(move_to_algebraic).unwrap_or_else(|| "None".to_string())
            ));
        }
    }

    fn log_search_complete(&mut self, best_move: Option<Move>, best_score: Score, nodes: u64) {
        if self.should_log_advanced() {
            match best_move {
                Some(mv) => self.log(&format!(
                    "🏆 Search complete: {} (Score: {}) | Nodes: {}",
                    move_to_algebraic(mv),
                    best_score,
                    nodes
                )),
                None => self.log(&format!("🏆 Search complete: no move (Score: {}) | Nodes: {}", best_score, nodes)),
            }
        }
    }
}

fn side_label(maximizing: bool) -> &'static str {
    if maximizing {
        "MAX"
    } else {
        "MIN"
    }
}
