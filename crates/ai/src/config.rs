use std::path::Path;

use engine::PieceType;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Score, DEFAULT_DEPTH, MATE_SCORE, MAX_DEPTH};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub evaluation: EvaluationConfig,
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    pub piece_values: PieceValues,
}

/// Material weights per piece type. The king is worth nothing as material;
/// losing it is scored through checkmate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PieceValues {
    pub pawn: Score,
    pub knight: Score,
    pub bishop: Score,
    pub rook: Score,
    pub queen: Score,
    pub king: Score,
}

impl PieceValues {
    pub fn value(&self, kind: PieceType) -> Score {
        match kind {
            PieceType::Pawn => self.pawn,
            PieceType::Knight => self.knight,
            PieceType::Bishop => self.bishop,
            PieceType::Rook => self.rook,
            PieceType::Queen => self.queen,
            PieceType::King => self.king,
        }
    }

    pub fn max_value(&self) -> Score {
        PieceType::ALL.iter().map(|&kind| self.value(kind)).max().unwrap_or(0)
    }
}

impl Default for PieceValues {
    fn default() -> Self {
        Self {
            pawn: 1,
            knight: 3,
            bishop: 3,
            rook: 5,
            queen: 9,
            king: 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Ply budget used by `SearchEngine::choose_move` callers.
    pub depth: i32,
    /// `false` turns off cut-offs, giving plain minimax.
    pub alpha_beta: bool,
    /// Compare position keys around every make/unmake pair.
    pub verify_unmake: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            alpha_beta: true,
            verify_unmake: cfg!(debug_assertions),
        }
    }
}

impl AiConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config_str = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&config_str)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: AiConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Material must never reach mate scores: 64 squares of the heaviest
    /// piece stay below `MATE_SCORE`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let values = &self.evaluation.piece_values;
        if let Some(kind) = PieceType::ALL.iter().find(|&&kind| values.value(kind) < 0) {
            return Err(ConfigError::Invalid(format!(
                "{} value must be non-negative, got {}",
                kind.name(),
                values.value(*kind)
            )));
        }

        let max_value = values.max_value();
        if max_value.checked_mul(64).map_or(true, |total| total >= MATE_SCORE) {
            return Err(ConfigError::Invalid(format!(
                "piece value {} is too large, material could reach the mate score {}",
                max_value, MATE_SCORE
            )));
        }

        if !(1..=MAX_DEPTH).contains(&self.search.depth) {
            return Err(ConfigError::Invalid(format!(
                "search depth must be within 1..={}, got {}",
                MAX_DEPTH, self.search.depth
            )));
        }

        Ok(())
    }
}
