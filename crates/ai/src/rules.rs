//! The contract the search core needs from a rules engine.
//!
//! The search only ever touches a position through this trait, so any
//! position type that can generate legal moves and make/unmake them in place
//! can be searched.

use engine::{Board, BoardResult, Color, Move, PieceType, Square};

pub trait RulesEngine {
    /// Legal moves for the side to move, in a deterministic order.
    fn legal_moves(&self) -> Vec<Move>;

    /// Apply `mv` in place.
    fn make_move(&mut self, mv: Move) -> BoardResult<()>;

    /// Revert exactly the most recent `make_move`.
    fn unmake_move(&mut self) -> BoardResult<Move>;

    fn is_checkmate(&self) -> bool;

    fn is_stalemate(&self) -> bool;

    fn is_insufficient_material(&self) -> bool;

    /// Checkmate, stalemate or any draw the engine recognises without a claim.
    fn is_game_over(&self) -> bool;

    fn piece_at(&self, square: Square) -> Option<(PieceType, Color)>;

    fn side_to_move(&self) -> Color;

    /// Hash of the complete position state, used to detect make/unmake drift.
    fn position_key(&self) -> u64;
}

impl RulesEngine for Board {
    fn legal_moves(&self) -> Vec<Move> {
        self.get_all_legal_moves()
    }

    fn make_move(&mut self, mv: Move) -> BoardResult<()> {
        Board::make_move(self, mv).map(|_| ())
    }

    fn unmake_move(&mut self) -> BoardResult<Move> {
        self.undo_move().map(|game_move| game_move.mv)
    }

    fn is_checkmate(&self) -> bool {
        Board::is_checkmate(self)
    }

    fn is_stalemate(&self) -> bool {
        Board::is_stalemate(self)
    }

    fn is_insufficient_material(&self) -> bool {
        Board::is_insufficient_material(self)
    }

    fn is_game_over(&self) -> bool {
        Board::is_game_over(self)
    }

    fn piece_at(&self, square: Square) -> Option<(PieceType, Color)> {
        self.get_piece(square).map(|piece| (piece.kind, piece.color))
    }

    fn side_to_move(&self) -> Color {
        self.current_turn
    }

    fn position_key(&self) -> u64 {
        Board::position_key(self)
    }
}
