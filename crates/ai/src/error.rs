//! Error types for search and configuration.
//!
//! `SearchError` separates caller mistakes (rejected before any node is
//! visited) from rules-engine contract violations (fatal for the call).

use std::path::PathBuf;

use engine::BoardError;
use thiserror::Error;

use crate::types::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    ContractViolation,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("search depth must be non-negative, got {0}")]
    NegativeDepth(i32),

    #[error("search window is inverted: alpha {alpha} > beta {beta}")]
    InvertedWindow { alpha: Score, beta: Score },

    #[error("a move was requested from a depth 0 search")]
    ZeroDepthRoot,

    #[error("the game is already over, no move to choose")]
    GameOver,

    #[error("rules engine returned no legal moves for a non-terminal position at depth {depth}")]
    NoLegalMoves { depth: i32 },

    #[error("position key changed across make/unmake of {mv}: {before:#018x} -> {after:#018x}")]
    Desync { mv: String, before: u64, after: u64 },

    #[error("rules engine failed during search: {0}")]
    Rules(#[from] BoardError),
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SearchError::NegativeDepth(_)
            | SearchError::InvertedWindow { .. }
            | SearchError::ZeroDepthRoot
            | SearchError::GameOver => ErrorKind::InvalidInput,
            SearchError::NoLegalMoves { .. } | SearchError::Desync { .. } | SearchError::Rules(_) => {
                ErrorKind::ContractViolation
            }
        }
    }

    pub fn is_contract_violation(&self) -> bool {
        self.kind() == ErrorKind::ContractViolation
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

pub type SearchOutcome<T> = Result<T, SearchError>;
