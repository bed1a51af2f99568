use super::Board;
use crate::types::*;

pub(crate) const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub(crate) const KING_OFFSETS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub(crate) const ROOK_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];
pub(crate) const BISHOP_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Whether `by_color` attacks `square` on the given piece layout.
pub(crate) fn square_attacked_on(squares: &[Option<Piece>; 64], square: Square, by_color: Color) -> bool {
    let holds = |target: Option<Square>, kinds: &[PieceType]| -> bool {
        match target.and_then(|sq| squares[sq.index()]) {
            Some(piece) => piece.color == by_color && kinds.contains(&piece.kind),
            None => false,
        }
    };

    // Pawns capture forward, so an attacking pawn sits one rank behind
    let behind = -by_color.forward();
    if holds(square.offset(-1, behind), &[PieceType::Pawn]) || holds(square.offset(1, behind), &[PieceType::Pawn]) {
        return true;
    }

    if KNIGHT_OFFSETS.iter().any(|&(df, dr)| holds(square.offset(df, dr), &[PieceType::Knight])) {
        return true;
    }

    if KING_OFFSETS.iter().any(|&(df, dr)| holds(square.offset(df, dr), &[PieceType::King])) {
        return true;
    }

    let slides = |directions: &[(i8, i8)], kinds: &[PieceType]| -> bool {
        directions.iter().any(|&(df, dr)| {
            let mut current = square.offset(df, dr);
            while let Some(sq) = current {
                if let Some(piece) = squares[sq.index()] {
                    return piece.color == by_color && kinds.contains(&piece.kind);
                }
                current = sq.offset(df, dr);
            }
            false
        })
    };

    slides(&ROOK_DIRECTIONS, &[PieceType::Rook, PieceType::Queen])
        || slides(&BISHOP_DIRECTIONS, &[PieceType::Bishop, PieceType::Queen])
}

impl Board {
    pub fn is_square_attacked(&self, square: Square, by_color: Color) -> bool {
        square_attacked_on(&self.squares, square, by_color)
    }

    pub fn is_in_check(&self) -> bool {
        self.is_color_in_check(self.current_turn)
    }

    pub fn is_color_in_check(&self, color: Color) -> bool {
        match self.find_king(color) {
            Some(king) => self.is_square_attacked(king, color.opposite()),
            None => false,
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.is_in_check() && !self.has_legal_moves()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.is_in_check() && !self.has_legal_moves()
    }

    /// Neither side can ever mate: no pawns, rooks or queens, and either at
    /// most one minor piece on the board or only bishops, all on one square color.
    pub fn is_insufficient_material(&self) -> bool {
        let mut minors = 0;
        let mut knights = 0;
        let mut light_bishops = 0;
        let mut dark_bishops = 0;

        for (index, square) in self.squares.iter().enumerate() {
            let Some(piece) = square else { continue };
            match piece.kind {
                PieceType::Pawn | PieceType::Rook | PieceType::Queen => return false,
                PieceType::Knight => {
                    minors += 1;
                    knights += 1;
                }
                PieceType::Bishop => {
                    minors += 1;
                    if Square(index as u8).is_light() {
                        light_bishops += 1;
                    } else {
                        dark_bishops += 1;
                    }
                }
                PieceType::King => {}
            }
        }

        minors <= 1 || (knights == 0 && (light_bishops == 0 || dark_bishops == 0))
    }

    pub fn can_claim_fifty_moves(&self) -> bool {
        self.half_move_clock >= 100
    }

    pub fn is_seventyfive_moves(&self) -> bool {
        self.half_move_clock >= 150 && !self.is_checkmate()
    }

    /// How many times the current position has occurred, including now.
    pub fn repetition_count(&self) -> usize {
        match self.key_history.last() {
            Some(&current) => self.key_history.iter().filter(|&&key| key == current).count(),
            None => 1,
        }
    }

    pub fn can_claim_threefold_repetition(&self) -> bool {
        self.repetition_count() >= 3
    }

    pub fn is_fivefold_repetition(&self) -> bool {
        self.repetition_count() >= 5
    }

    /// Game end without any claim: mate, stalemate, dead position,
    /// seventy-five moves or fivefold repetition.
    pub fn is_game_over(&self) -> bool {
        if !self.has_legal_moves() {
            return true;
        }
        self.is_insufficient_material() || self.half_move_clock >= 150 || self.is_fivefold_repetition()
    }

    /// Status as shown to a player; claimable draws count as finished.
    pub fn status(&self) -> GameStatus {
        let in_check = self.is_in_check();
        if !self.has_legal_moves() {
            return if in_check {
                GameStatus::Checkmate(self.current_turn)
            } else {
                GameStatus::Stalemate
            };
        }
        if self.is_insufficient_material() {
            GameStatus::InsufficientMaterial
        } else if self.can_claim_fifty_moves() {
            GameStatus::FiftyMoveRule
        } else if self.can_claim_threefold_repetition() {
            GameStatus::Repetition
        } else if in_check {
            GameStatus::Check(self.current_turn)
        } else {
            GameStatus::InProgress
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        Board::from_fen(fen).unwrap()
    }

    #[test]
    fn test_attacks_by_each_piece() {
        let b = board("4k3/8/8/3q4/8/2N5/3P4/4K3 w - - 0 1");
        let sq = |s: &str| Square::from_algebraic(s).unwrap();
        assert!(b.is_square_attacked(sq("e3"), Color::White), "pawn d2 attacks e3");
        assert!(!b.is_square_attacked(sq("d3"), Color::White), "pawns do not attack forward");
        assert!(b.is_square_attacked(sq("b5"), Color::White), "knight c3 attacks b5");
        assert!(b.is_square_attacked(sq("h1"), Color::Black), "queen d5 attacks h1 on the diagonal");
        assert!(b.is_square_attacked(sq("d3"), Color::Black), "queen d5 attacks down the file");
        assert!(!b.is_square_attacked(sq("d1"), Color::Black), "d2 pawn blocks the file");
        assert!(b.is_square_attacked(sq("f2"), Color::White), "king e1 attacks f2");
    }

    #[test]
    fn test_fools_mate_is_checkmate() {
        let b = board("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3");
        assert!(b.is_in_check());
        assert!(b.is_checkmate());
        assert!(!b.is_stalemate());
        assert!(b.is_game_over());
        assert_eq!(b.status(), GameStatus::Checkmate(Color::White));
        assert_eq!(b.status().to_string(), "Checkmate! Black wins.");
    }

    #[test]
    fn test_stalemate() {
        let b = board("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1");
        assert!(!b.is_in_check());
        assert!(b.is_stalemate());
        assert!(!b.is_checkmate());
        assert!(b.is_game_over());
        assert_eq!(b.status(), GameStatus::Stalemate);
    }

    #[test]
    fn test_insufficient_material_cases() {
        assert!(board("8/8/8/4k3/8/8/8/4K3 w - - 0 1").is_insufficient_material(), "K v K");
        assert!(board("8/8/8/4k3/8/8/8/4KN2 w - - 0 1").is_insufficient_material(), "K+N v K");
        assert!(board("8/8/8/4k3/8/8/8/4KB2 w - - 0 1").is_insufficient_material(), "K+B v K");
        // f1 and c8 are both light squares
        assert!(board("2b5/8/8/4k3/8/8/8/4KB2 w - - 0 1").is_insufficient_material(), "same-colored bishops");
        assert!(!board("1b6/8/8/4k3/8/8/8/4KB2 w - - 0 1").is_insufficient_material(), "opposite bishops");
        assert!(!board("1n6/8/8/4k3/8/8/8/4KN2 w - - 0 1").is_insufficient_material(), "K+N v K+N");
        assert!(!board("8/8/8/4k3/8/8/4P3/4K3 w - - 0 1").is_insufficient_material(), "pawn");
        assert!(!board("8/8/8/4k3/8/8/8/R3K3 w - - 0 1").is_insufficient_material(), "rook");

        let dead = board("8/8/8/4k3/8/8/8/4K3 w - - 0 1");
        assert!(dead.is_game_over());
        assert_eq!(dead.status(), GameStatus::InsufficientMaterial);
    }

    #[test]
    fn test_move_clocks() {
        let b = board("4k3/8/8/8/8/8/8/R3K3 w - - 100 80");
        assert!(b.can_claim_fifty_moves());
        assert!(!b.is_seventyfive_moves());
        assert!(!b.is_game_over());
        assert_eq!(b.status(), GameStatus::FiftyMoveRule);

        let b = board("4k3/8/8/8/8/8/8/R3K3 w - - 150 100");
        assert!(b.is_seventyfive_moves());
        assert!(b.is_game_over());
    }

    #[test]
    fn test_repetition_by_knight_shuffle() {
        let mut b = Board::new();
        let shuffle = ["g1f3", "g8f6", "f3g1", "f6g8"];

        for mv in shuffle {
            b.try_make_move(Move::from_uci(mv).unwrap()).unwrap();
        }
        assert_eq!(b.repetition_count(), 2);
        assert!(!b.can_claim_threefold_repetition());

        for mv in shuffle {
            b.try_make_move(Move::from_uci(mv).unwrap()).unwrap();
        }
        assert_eq!(b.repetition_count(), 3);
        assert_eq!(b.status(), GameStatus::Repetition);
        assert!(!b.is_game_over(), "threefold is only claimable");

        for _ in 0..2 {
            for mv in shuffle {
                b.try_make_move(Move::from_uci(mv).unwrap()).unwrap();
            }
        }
        assert!(b.is_fivefold_repetition());
        assert!(b.is_game_over());
    }

    #[test]
    fn test_repetition_ignores_uncapturable_en_passant() {
        // After 1.e4 the e3 target cannot be used, so the knight round trip repeats it
        let mut b = Board::new();
        for mv in ["e2e4", "g8f6", "g1f3", "f6g8", "f3g1"] {
            b.try_make_move(Move::from_uci(mv).unwrap()).unwrap();
        }
        assert_eq!(b.repetition_count(), 2);
    }
}
