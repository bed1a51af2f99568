use engine::{ChessLogger, Color, Move};

use crate::config::{AiConfig, SearchConfig};
use crate::error::{SearchError, SearchOutcome};
use crate::evaluation::Evaluator;
use crate::guard::MoveGuard;
use crate::logger_extensions::AILoggerExtensions;
use crate::rules::RulesEngine;
use crate::types::*;

/// Two-branch minimax with alpha-beta cut-offs over any [`RulesEngine`].
///
/// Moves are searched in the order the rules engine yields them. Nothing but
/// the node counter and the log survives between calls.
pub struct SearchEngine {
    evaluator: Evaluator,
    config: SearchConfig,
    nodes_searched: u64,
    logger: ChessLogger,
}

impl SearchEngine {
    pub fn new(config: &AiConfig, maximizing: Color) -> Self {
        Self::with_evaluator(
            Evaluator::new(config.evaluation.piece_values, maximizing),
            config.search,
        )
    }

    pub fn with_evaluator(evaluator: Evaluator, config: SearchConfig) -> Self {
        Self {
            evaluator,
            config,
            nodes_searched: 0,
            logger: ChessLogger::silent(),
        }
    }

    pub fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Nodes visited by the most recent call, leaves included.
    pub fn nodes_searched(&self) -> u64 {
        self.nodes_searched
    }

    pub fn logger(&self) -> &ChessLogger {
        &self.logger
    }

    pub fn logger_mut(&mut self) -> &mut ChessLogger {
        &mut self.logger
    }

    pub fn enable_advanced_logging(&mut self) {
        self.logger.enable_advanced_logging();
    }

    /// Search `position` to `depth` plies inside the `(alpha, beta)` window.
    ///
    /// Returns the score from the evaluator's maximizing color and the best
    /// move, which is `None` at depth 0 or on a terminal position. The
    /// position is restored before this returns, on success and on error.
    pub fn search<P: RulesEngine>(
        &mut self,
        position: &mut P,
        depth: i32,
        alpha: Score,
        beta: Score,
        maximizing: bool,
    ) -> SearchOutcome<(Score, Option<Move>)> {
        if depth < 0 {
            return Err(SearchError::NegativeDepth(depth));
        }
        if alpha > beta {
            return Err(SearchError::InvertedWindow { alpha, beta });
        }

        self.nodes_searched = 0;
        self.logger.log_search_start(depth, alpha, beta, maximizing);

        let (score, best_move) = self.minimax(position, depth, alpha, beta, maximizing)?;

        self.logger.log_search_complete(best_move, score, self.nodes_searched);
        Ok((score, best_move))
    }

    /// Pick a move for the side to move. Maximizes when that side is the
    /// evaluator's color, minimizes otherwise.
    pub fn choose_move<P: RulesEngine>(&mut self, position: &mut P, depth: i32) -> SearchOutcome<SearchResult> {
        if depth < 0 {
            return Err(SearchError::NegativeDepth(depth));
        }
        if depth == 0 {
            return Err(SearchError::ZeroDepthRoot);
        }
        if position.is_game_over() {
            return Err(SearchError::GameOver);
        }

        let maximizing = position.side_to_move() == self.evaluator.maximizing_color();
        let (evaluation, best_move) = self.search(position, depth, NEG_INFINITY, INFINITY, maximizing)?;

        Ok(SearchResult {
            best_move,
            evaluation,
            depth,
            nodes_searched: self.nodes_searched,
        })
    }

    fn minimax<P: RulesEngine>(
        &mut self,
        position: &mut P,
        depth: i32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> SearchOutcome<(Score, Option<Move>)> {
        self.nodes_searched += 1;

        if depth == 0 || position.is_game_over() {
            let score = self.evaluator.evaluate(position);
            self.logger.log_leaf_evaluation(depth, score);
            return Ok((score, None));
        }

        let moves = position.legal_moves();
        if moves.is_empty() {
            return Err(SearchError::NoLegalMoves { depth });
        }

        self.logger.log_node_enter(depth, alpha, beta, maximizing, moves.len());

        let mut best_score = if maximizing { NEG_INFINITY } else { INFINITY };
        let mut best_move = None;

        for (i, &mv) in moves.iter().enumerate() {
            self.logger.log_move_exploration_start(mv, i + 1, moves.len());

            let mut guard = MoveGuard::make(position, mv, self.config.verify_unmake)?;
            let (score, _) = self.minimax(guard.position(), depth - 1, alpha, beta, !maximizing)?;
            guard.release()?;

            // Strict comparison: the first move reaching a score keeps it
            let improved = if maximizing { score > best_score } else { score < best_score };
            if improved {
                best_score = score;
                best_move = Some(mv);
            }

            if maximizing {
                alpha = alpha.max(score);
            } else {
                beta = beta.min(score);
            }

            self.logger.log_move_exploration_result(mv, score, alpha, beta, improved);

            if self.config.alpha_beta && beta <= alpha {
                self.logger.log_cutoff(alpha, beta, moves.len() - i - 1);
                break;
            }
        }

        self.logger.log_node_exit(depth, best_score, best_move);
        Ok((best_score, best_move))
    }
}
