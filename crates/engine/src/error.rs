//! Error types for the rules engine.

use thiserror::Error;

use crate::types::{Color, Move, Square};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    #[error("Invalid FEN: {0}")]
    InvalidFen(String),

    #[error("Invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("Invalid move text: {0:?}")]
    InvalidMoveText(String),

    #[error("No piece at source square {0}")]
    NoPieceAtSquare(Square),

    #[error("Piece on {square} belongs to {owner:?} but {to_move:?} is to move")]
    WrongSideToMove { square: Square, owner: Color, to_move: Color },

    #[error("Move {0} reaches the last rank without a promotion piece")]
    MissingPromotion(Move),

    #[error("Illegal move {0}")]
    IllegalMove(Move),

    #[error("No moves to undo")]
    NothingToUndo,
}

pub type BoardResult<T> = Result<T, BoardError>;
