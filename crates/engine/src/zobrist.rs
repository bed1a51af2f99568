use std::sync::OnceLock;

use crate::types::*;
use crate::Board;

static KEYS: OnceLock<ZobristKeys> = OnceLock::new();

pub fn zobrist_keys() -> &'static ZobristKeys {
    KEYS.get_or_init(ZobristKeys::new)
}

/// Hash keys for position identity (repetition detection and make/unmake checks).
pub struct ZobristKeys {
    pieces: [[u64; 64]; 12], // [color * 6 + piece type][square]
    side_to_move: u64,
    castling_rights: [u64; 16],
    en_passant: [u64; 8], // by file
}

impl ZobristKeys {
    pub fn new() -> Self {
        let mut keys = ZobristKeys {
            pieces: [[0; 64]; 12],
            side_to_move: 0,
            castling_rights: [0; 16],
            en_passant: [0; 8],
        };

        // Fixed seed so keys are identical across runs
        let mut state = 0x9E37_79B9_7F4A_7C15u64;

        for piece in keys.pieces.iter_mut() {
            for key in piece.iter_mut() {
                *key = splitmix64(&mut state);
            }
        }

        keys.side_to_move = splitmix64(&mut state);

        for key in keys.castling_rights.iter_mut() {
            *key = splitmix64(&mut state);
        }

        for key in keys.en_passant.iter_mut() {
            *key = splitmix64(&mut state);
        }

        keys
    }

    pub fn hash_position(&self, board: &Board) -> u64 {
        let mut hash = 0u64;

        for (index, square) in board.squares.iter().enumerate() {
            if let Some(piece) = square {
                let piece_index = piece.color.index() * 6 + piece.kind.index();
                hash ^= self.pieces[piece_index][index];
            }
        }

        if board.current_turn == Color::Black {
            hash ^= self.side_to_move;
        }

        hash ^= self.castling_rights[(board.castling_rights & ALL_CASTLING_RIGHTS) as usize];

        // Only a capturable target changes the position for repetition purposes
        if let Some(target) = board.capturable_en_passant_target() {
            hash ^= self.en_passant[target.file() as usize];
        }

        hash
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        Self::new()
    }
}

fn splitmix64(state: &mut u64) -> u64 {
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_distinct() {
        let keys = ZobristKeys::new();
        let mut seen = std::collections::HashSet::new();
        for piece in keys.pieces.iter() {
            for &key in piece.iter() {
                assert!(seen.insert(key), "duplicate piece key {:#x}", key);
            }
        }
        assert!(seen.insert(keys.side_to_move));
    }

    #[test]
    fn test_hash_tracks_side_to_move() {
        let white = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let black = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        let keys = zobrist_keys();
        assert_ne!(keys.hash_position(&white), keys.hash_position(&black));
        assert_eq!(keys.hash_position(&white), white.position_key());
    }

    #[test]
    fn test_en_passant_hashed_only_when_capturable() {
        let capturable = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").unwrap();
        let no_target = Board::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - - 0 2").unwrap();
        assert_ne!(capturable.position_key(), no_target.position_key());

        let stranded = Board::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - d6 0 2").unwrap();
        let plain = Board::from_fen("4k3/8/8/3p4/8/8/8/4K3 w - - 0 2").unwrap();
        assert_eq!(stranded.capturable_en_passant_target(), None);
        assert_eq!(stranded.position_key(), plain.position_key());
    }
}
