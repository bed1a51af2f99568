pub mod config;
pub mod error;
pub mod evaluation;
mod guard;
pub mod logger_extensions;
pub mod rules;
pub mod search;
pub mod types;

pub use config::{AiConfig, EvaluationConfig, PieceValues, SearchConfig};
pub use error::{ConfigError, ErrorKind, SearchError, SearchOutcome};
pub use evaluation::*;
pub use logger_extensions::AILoggerExtensions;
pub use rules::RulesEngine;
pub use search::*;
pub use types::*;
