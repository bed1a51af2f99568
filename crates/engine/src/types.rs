use std::fmt;

use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square(pub u8);

impl Square {
    pub fn new(file: u8, rank: u8) -> Self {
        Self(rank * 8 + file)
    }

    pub fn file(&self) -> u8 {
        self.0 % 8
    }

    pub fn rank(&self) -> u8 {
        self.0 / 8
    }

    pub fn index(&self) -> usize {
        self.0 as usize
    }

    /// Step by a file/rank delta, `None` when it leaves the board.
    pub fn offset(&self, df: i8, dr: i8) -> Option<Square> {
        let file = self.file() as i8 + df;
        let rank = self.rank() as i8 + dr;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Square::new(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Light squares have odd file + rank (a1 is dark).
    pub fn is_light(&self) -> bool {
        (self.file() + self.rank()) % 2 == 1
    }

    pub fn from_algebraic(text: &str) -> Result<Self, BoardError> {
        let bytes = text.as_bytes();
        if bytes.len() != 2 {
            return Err(BoardError::InvalidSquare(text.to_string()));
        }
        let file = bytes[0].wrapping_sub(b'a');
        let rank = bytes[1].wrapping_sub(b'1');
        if file < 8 && rank < 8 {
            Ok(Square::new(file, rank))
        } else {
            Err(BoardError::InvalidSquare(text.to_string()))
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", (b'a' + self.file()) as char, (b'1' + self.rank()) as char)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    /// Rank direction pawns of this color advance in.
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }

    pub fn home_rank(self) -> u8 {
        match self {
            Color::White => 0,
            Color::Black => 7,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Color::White => "White",
            Color::Black => "Black",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub const ALL: [PieceType; 6] = [
        PieceType::Pawn,
        PieceType::Knight,
        PieceType::Bishop,
        PieceType::Rook,
        PieceType::Queen,
        PieceType::King,
    ];

    /// Promotion choices in generation order.
    pub const PROMOTIONS: [PieceType; 4] = [
        PieceType::Queen,
        PieceType::Rook,
        PieceType::Bishop,
        PieceType::Knight,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase FEN letter.
    pub fn symbol(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<PieceType> {
        match symbol.to_ascii_lowercase() {
            'p' => Some(PieceType::Pawn),
            'n' => Some(PieceType::Knight),
            'b' => Some(PieceType::Bishop),
            'r' => Some(PieceType::Rook),
            'q' => Some(PieceType::Queen),
            'k' => Some(PieceType::King),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            PieceType::Pawn => "Pawn",
            PieceType::Knight => "Knight",
            PieceType::Bishop => "Bishop",
            PieceType::Rook => "Rook",
            PieceType::Queen => "Queen",
            PieceType::King => "King",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceType,
    pub color: Color,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Self {
        Self { kind, color }
    }

    /// FEN letter: uppercase for white.
    pub fn symbol(&self) -> char {
        let symbol = self.kind.symbol();
        match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Piece> {
        let kind = PieceType::from_symbol(symbol)?;
        let color = if symbol.is_ascii_uppercase() { Color::White } else { Color::Black };
        Some(Piece::new(kind, color))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Self {
        Self { from, to, promotion: None }
    }

    pub fn new_promotion(from: Square, to: Square, promotion: PieceType) -> Self {
        Self { from, to, promotion: Some(promotion) }
    }

    pub fn is_promotion(&self) -> bool {
        self.promotion.is_some()
    }

    /// Parse long algebraic notation such as `e2e4` or `a7a8q`.
    pub fn from_uci(text: &str) -> Result<Self, BoardError> {
        if !text.is_ascii() || !(4..=5).contains(&text.len()) {
            return Err(BoardError::InvalidMoveText(text.to_string()));
        }
        let from = Square::from_algebraic(&text[0..2])?;
        let to = Square::from_algebraic(&text[2..4])?;
        match text[4..].chars().next() {
            None => Ok(Move::new(from, to)),
            Some(symbol) => match PieceType::from_symbol(symbol) {
                Some(kind) if PieceType::PROMOTIONS.contains(&kind) => {
                    Ok(Move::new_promotion(from, to, kind))
                }
                _ => Err(BoardError::InvalidMoveText(text.to_string())),
            },
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}

/// Undo record pushed by every make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameMove {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured_piece: Option<Piece>,
    pub captured_square: Square,
    pub is_castling: bool,
    pub is_en_passant: bool,
    pub previous_castling_rights: u8,
    pub previous_en_passant_target: Option<Square>,
    pub previous_half_move_clock: u16,
    pub previous_full_move_number: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InProgress,
    Check(Color),
    /// The color that has been mated.
    Checkmate(Color),
    Stalemate,
    InsufficientMaterial,
    FiftyMoveRule,
    Repetition,
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, GameStatus::InProgress | GameStatus::Check(_))
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress => write!(f, "In progress"),
            GameStatus::Check(color) => write!(f, "{} is in check.", color.name()),
            GameStatus::Checkmate(loser) => {
                write!(f, "Checkmate! {} wins.", loser.opposite().name())
            }
            GameStatus::Stalemate => write!(f, "Stalemate!"),
            GameStatus::InsufficientMaterial => write!(f, "Draw by insufficient material."),
            GameStatus::FiftyMoveRule => write!(f, "Draw by 50-move rule."),
            GameStatus::Repetition => write!(f, "Draw by repetition."),
        }
    }
}

// Castling rights bitfield
pub const WHITE_KINGSIDE: u8 = 0b0001;
pub const WHITE_QUEENSIDE: u8 = 0b0010;
pub const BLACK_KINGSIDE: u8 = 0b0100;
pub const BLACK_QUEENSIDE: u8 = 0b1000;
pub const ALL_CASTLING_RIGHTS: u8 = 0b1111;

pub fn has_castling_right(castling_rights: u8, right: u8) -> bool {
    castling_rights & right != 0
}

pub fn remove_castling_right(castling_rights: &mut u8, right: u8) {
    *castling_rights &= !right;
}

pub fn castling_rights_for_color(color: Color) -> (u8, u8) {
    match color {
        Color::White => (WHITE_KINGSIDE, WHITE_QUEENSIDE),
        Color::Black => (BLACK_KINGSIDE, BLACK_QUEENSIDE),
    }
}
