use crate::error::{BoardError, BoardResult};
use crate::types::*;
use crate::zobrist::zobrist_keys;

// Declare submodules
pub mod moves;
pub mod state;
pub mod validation;

pub const STARTING_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Mailbox board; square index is `rank * 8 + file`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub squares: [Option<Piece>; 64],
    pub current_turn: Color,
    pub move_history: Vec<GameMove>,
    pub half_move_clock: u16,
    pub full_move_number: u16,
    pub castling_rights: u8,
    pub en_passant_target: Option<Square>,
    /// Position key after every ply, starting with the initial position.
    pub key_history: Vec<u64>,
}

impl Board {
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.castling_rights = ALL_CASTLING_RIGHTS;
        board.setup_starting_position();
        board.reset_key_history();
        board
    }

    fn empty() -> Self {
        Self {
            squares: [None; 64],
            current_turn: Color::White,
            move_history: Vec::new(),
            half_move_clock: 0,
            full_move_number: 1,
            castling_rights: 0,
            en_passant_target: None,
            key_history: Vec::new(),
        }
    }

    fn setup_starting_position(&mut self) {
        const BACK_RANK: [PieceType; 8] = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (file, &kind) in BACK_RANK.iter().enumerate() {
            let file = file as u8;
            self.set_piece(Square::new(file, 0), Some(Piece::new(kind, Color::White)));
            self.set_piece(Square::new(file, 1), Some(Piece::new(PieceType::Pawn, Color::White)));
            self.set_piece(Square::new(file, 6), Some(Piece::new(PieceType::Pawn, Color::Black)));
            self.set_piece(Square::new(file, 7), Some(Piece::new(kind, Color::Black)));
        }
    }

    // Basic board operations
    pub fn get_piece(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Edits the board outside of make/unmake; the move history is left alone.
    pub fn set_piece(&mut self, square: Square, piece: Option<Piece>) {
        self.squares[square.index()] = piece;
        let key = zobrist_keys().hash_position(self);
        if let Some(last) = self.key_history.last_mut() {
            *last = key;
        }
    }

    pub fn find_king(&self, color: Color) -> Option<Square> {
        self.squares
            .iter()
            .position(|&square| square == Some(Piece::new(PieceType::King, color)))
            .map(|index| Square(index as u8))
    }

    pub fn position_key(&self) -> u64 {
        zobrist_keys().hash_position(self)
    }

    fn reset_key_history(&mut self) {
        self.key_history.clear();
        self.key_history.push(self.position_key());
    }

    // FEN parsing functionality
    /// Accepts full six-field FEN, or four fields with clocks defaulting to `0 1`.
    pub fn from_fen(fen: &str) -> BoardResult<Self> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() != 6 && parts.len() != 4 {
            return Err(BoardError::InvalidFen(format!(
                "expected 4 or 6 fields, found {}",
                parts.len()
            )));
        }

        let mut board = Self::empty();

        // Parse piece placement (part 0)
        board.parse_piece_placement(parts[0])?;

        // Parse active color (part 1)
        board.current_turn = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => return Err(BoardError::InvalidFen(format!("invalid active color {:?}", other))),
        };

        // Parse castling rights (part 2)
        board.parse_castling_rights(parts[2])?;

        // Parse en passant (part 3)
        board.en_passant_target = match parts[3] {
            "-" => None,
            text => Some(
                Square::from_algebraic(text)
                    .map_err(|_| BoardError::InvalidFen(format!("invalid en passant square {:?}", text)))?,
            ),
        };

        if parts.len() == 6 {
            board.half_move_clock = parts[4]
                .parse()
                .map_err(|_| BoardError::InvalidFen(format!("invalid halfmove clock {:?}", parts[4])))?;
            board.full_move_number = parts[5]
                .parse()
                .map_err(|_| BoardError::InvalidFen(format!("invalid fullmove number {:?}", parts[5])))?;
        }

        for color in [Color::White, Color::Black] {
            if board.find_king(color).is_none() {
                return Err(BoardError::InvalidFen(format!("{} has no king", color.name())));
            }
        }

        board.reset_key_history();
        Ok(board)
    }

    fn parse_piece_placement(&mut self, placement: &str) -> BoardResult<()> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(BoardError::InvalidFen(format!("expected 8 ranks, found {}", ranks.len())));
        }

        // FEN lists rank 8 first
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8;
            let mut file = 0u8;

            for symbol in rank_str.chars() {
                if let Some(skip) = symbol.to_digit(10) {
                    if file as u32 + skip > 8 {
                        return Err(BoardError::InvalidFen(format!("rank {} overflows", rank + 1)));
                    }
                    file += skip as u8;
                } else {
                    let piece = Piece::from_symbol(symbol).ok_or_else(|| {
                        BoardError::InvalidFen(format!("invalid piece symbol {:?}", symbol))
                    })?;
                    if file >= 8 {
                        return Err(BoardError::InvalidFen(format!("rank {} overflows", rank + 1)));
                    }
                    self.squares[Square::new(file, rank).index()] = Some(piece);
                    file += 1;
                }
            }

            if file != 8 {
                return Err(BoardError::InvalidFen(format!("rank {} has {} files", rank + 1, file)));
            }
        }

        Ok(())
    }

    fn parse_castling_rights(&mut self, castling: &str) -> BoardResult<()> {
        self.castling_rights = 0;
        if castling == "-" {
            return Ok(());
        }

        for symbol in castling.chars() {
            self.castling_rights |= match symbol {
                'K' => WHITE_KINGSIDE,
                'Q' => WHITE_QUEENSIDE,
                'k' => BLACK_KINGSIDE,
                'q' => BLACK_QUEENSIDE,
                _ => return Err(BoardError::InvalidFen(format!("invalid castling symbol {:?}", symbol))),
            };
        }

        Ok(())
    }

    pub fn to_fen(&self) -> String {
        let mut fen = String::new();

        for rank in (0..8).rev() {
            let mut empty = 0;
            for file in 0..8 {
                match self.get_piece(Square::new(file, rank)) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push_str(&empty.to_string());
                            empty = 0;
                        }
                        fen.push(piece.symbol());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push_str(&empty.to_string());
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.current_turn {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        if self.castling_rights == 0 {
            fen.push('-');
        } else {
            for (right, symbol) in [
                (WHITE_KINGSIDE, 'K'),
                (WHITE_QUEENSIDE, 'Q'),
                (BLACK_KINGSIDE, 'k'),
                (BLACK_QUEENSIDE, 'q'),
            ] {
                if has_castling_right(self.castling_rights, right) {
                    fen.push(symbol);
                }
            }
        }

        match self.en_passant_target {
            Some(square) => fen.push_str(&format!(" {}", square)),
            None => fen.push_str(" -"),
        }

        fen.push_str(&format!(" {} {}", self.half_move_clock, self.full_move_number));
        fen
    }

    pub fn get_last_move(&self) -> Option<&GameMove> {
        self.move_history.last()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Long algebraic with a dash, `e7-e8=Q` for promotions; used by the game log.
pub fn move_to_algebraic(mv: Move) -> String {
    match mv.promotion {
        Some(kind) => format!(
            "{}-{}={}",
            mv.from,
            mv.to,
            kind.symbol().to_ascii_uppercase()
        ),
        None => format!("{}-{}", mv.from, mv.to),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_position_matches_fen() {
        let board = Board::new();
        assert_eq!(board.to_fen(), STARTING_FEN);
        assert_eq!(board, Board::from_fen(STARTING_FEN).unwrap());
        assert_eq!(board.find_king(Color::White), Some(Square::new(4, 0)));
        assert_eq!(board.find_king(Color::Black), Some(Square::new(4, 7)));
    }

    #[test]
    fn test_fen_round_trip() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq e6 0 2",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).unwrap();
            assert_eq!(board.to_fen(), fen);
        }
    }

    #[test]
    fn test_four_field_fen_defaults_clocks() {
        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b -").err();
        assert!(board.is_some(), "three fields must be rejected");

        let board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 b - -").unwrap();
        assert_eq!(board.half_move_clock, 0);
        assert_eq!(board.full_move_number, 1);
        assert_eq!(board.current_turn, Color::Black);
    }

    #[test]
    fn test_invalid_fen_rejected() {
        assert!(Board::from_fen("8/8/8/8/8/8/8/8 w - - 0 1").is_err(), "no kings");
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 x - - 0 1").is_err());
        assert!(Board::from_fen("4k3/9/8/8/8/8/8/4K3 w - - 0 1").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K3 w KX - 0 1").is_err());
        assert!(Board::from_fen("99999999999999999999999999999999/8/8/8/8/8/8/4K3 w - - 0 1").is_err());
        assert!(Board::from_fen("4k3/8/8/8/8/8/8/4K35 w - - 0 1").is_err());
    }

    #[test]
    fn test_set_piece_refreshes_current_key() {
        let mut board = Board::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        board.set_piece(Square::new(0, 1), Some(Piece::new(PieceType::Pawn, Color::White)));
        assert_eq!(board.key_history, vec![board.position_key()]);
        assert_eq!(board, Board::from_fen("4k3/8/8/8/8/8/P7/4K3 w - - 0 1").unwrap());
    }

    #[test]
    fn test_move_to_algebraic() {
        let mv = Move::new_promotion(Square::new(4, 6), Square::new(4, 7), PieceType::Queen);
        assert_eq!(move_to_algebraic(mv), "e7-e8=Q");
        assert_eq!(move_to_algebraic(Move::new(Square::new(6, 0), Square::new(5, 2))), "g1-f3");
    }
}
