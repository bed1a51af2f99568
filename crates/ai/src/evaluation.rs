use engine::{Color, Square};

use crate::config::PieceValues;
use crate::rules::RulesEngine;
use crate::types::*;

/// Material-only evaluator scored from one fixed color's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluator {
    piece_values: PieceValues,
    maximizing: Color,
}

impl Evaluator {
    pub fn new(piece_values: PieceValues, maximizing: Color) -> Self {
        Self { piece_values, maximizing }
    }

    pub fn with_default_values(maximizing: Color) -> Self {
        Self::new(PieceValues::default(), maximizing)
    }

    pub fn maximizing_color(&self) -> Color {
        self.maximizing
    }

    pub fn piece_values(&self) -> &PieceValues {
        &self.piece_values
    }

    /// Positive = good for the maximizing color.
    /// Mate is scored by who is mated, not how far away it is.
    pub fn evaluate<P: RulesEngine>(&self, position: &P) -> Score {
        if position.is_checkmate() {
            return if position.side_to_move() == self.maximizing {
                -MATE_SCORE
            } else {
                MATE_SCORE
            };
        }

        if position.is_stalemate() || position.is_insufficient_material() {
            return DRAW_SCORE;
        }

        self.material_balance(position, self.maximizing)
    }

    /// Material for `color` minus material for the opponent.
    pub fn material_balance<P: RulesEngine>(&self, position: &P, color: Color) -> Score {
        (0..64u8)
            .filter_map(|index| position.piece_at(Square(index)))
            .map(|(kind, owner)| {
                let value = self.piece_values.value(kind);
                if owner == color {
                    value
                } else {
                    -value
                }
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::Board;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_starting_position_is_balanced() {
        let board = Board::new();
        assert_eq!(Evaluator::with_default_values(Color::White).evaluate(&board), 0);
        assert_eq!(Evaluator::with_default_values(Color::Black).evaluate(&board), 0);
    }

    #[test]
    fn test_material_counts_from_maximizing_side() {
        // White is missing the queen, black is missing a knight and a pawn
        let b = board("r1bqkbnr/ppp1pppp/8/8/8/8/PPPPPPPP/RNB1KBNR w KQkq - 0 1");
        let white = Evaluator::with_default_values(Color::White);
        let black = Evaluator::with_default_values(Color::Black);
        assert_eq!(white.evaluate(&b), -5);
        assert_eq!(black.evaluate(&b), 5);
    }

    #[test]
    fn test_checkmate_scores_by_side_to_move() {
        // White is mated (fool's mate)
        let b = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert_eq!(Evaluator::with_default_values(Color::White).evaluate(&b), -MATE_SCORE);
        assert_eq!(Evaluator::with_default_values(Color::Black).evaluate(&b), MATE_SCORE);
    }

    #[test]
    fn test_draws_score_zero_for_both_sides() {
        let stalemate = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        let bare_kings_and_knight = board("8/8/8/4k3/8/8/8/4KN2 w - - 0 1");
        for color in [Color::White, Color::Black] {
            let evaluator = Evaluator::with_default_values(color);
            assert_eq!(evaluator.evaluate(&stalemate), DRAW_SCORE);
            assert_eq!(evaluator.evaluate(&bare_kings_and_knight), DRAW_SCORE);
        }
    }

    #[test]
    fn test_zero_sum_symmetry() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        ];
        for fen in fens {
            let b = board(fen);
            let white = Evaluator::with_default_values(Color::White).evaluate(&b);
            let black = Evaluator::with_default_values(Color::Black).evaluate(&b);
            assert_eq!(white, -black, "{}", fen);
        }
    }

    #[test]
    fn test_custom_weights() {
        let values = PieceValues { pawn: 2, ..PieceValues::default() };
        let b = board("4k3/8/8/8/8/8/PP6/4K3 w - - 0 1");
        assert_eq!(Evaluator::new(values, Color::White).evaluate(&b), 4);
        assert_eq!(Evaluator::with_default_values(Color::White).evaluate(&b), 2);
    }
}
