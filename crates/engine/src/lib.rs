pub mod board;
pub mod error;
pub mod logger;
pub mod perft;
pub mod types;
pub mod zobrist;

pub use board::*;
pub use error::{BoardError, BoardResult};
pub use logger::ChessLogger;
pub use types::*;
