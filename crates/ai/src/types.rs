use engine::Move;

/// Position desirability from the maximizing color's point of view.
pub type Score = i32;

/// Search result containing best move and evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult {
    pub best_move: Option<Move>,
    pub evaluation: Score,
    pub depth: i32,
    pub nodes_searched: u64,
}

/// Evaluation constants
pub const MATE_SCORE: Score = 100_000;
pub const DRAW_SCORE: Score = 0;

/// Window sentinels; strictly outside every score `evaluate` can return.
pub const INFINITY: Score = MATE_SCORE + 1;
pub const NEG_INFINITY: Score = -INFINITY;

/// Maximum search depth
pub const MAX_DEPTH: i32 = 8;

/// Default ply budget for the automated player.
pub const DEFAULT_DEPTH: i32 = 3;
