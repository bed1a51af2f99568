use super::validation::{square_attacked_on, BISHOP_DIRECTIONS, KING_OFFSETS, KNIGHT_OFFSETS, ROOK_DIRECTIONS};
use super::Board;
use crate::types::*;

impl Board {
    /// Generate all legal moves for the current player.
    /// Order is fixed: squares a1..h8, then each piece's direction table.
    pub fn get_all_legal_moves(&self) -> Vec<Move> {
        let mut moves = self.get_all_pseudo_legal_moves();
        moves.retain(|&mv| self.leaves_king_safe(mv));
        moves
    }

    pub fn has_legal_moves(&self) -> bool {
        self.get_all_pseudo_legal_moves()
            .into_iter()
            .any(|mv| self.leaves_king_safe(mv))
    }

    /// Target squares for the piece on `square`, promotions collapsed.
    pub fn get_legal_moves(&self, square: Square) -> Vec<Square> {
        let mut targets: Vec<Square> = self
            .get_all_legal_moves()
            .into_iter()
            .filter(|mv| mv.from == square)
            .map(|mv| mv.to)
            .collect();
        targets.dedup();
        targets
    }

    pub fn is_legal_move(&self, mv: Move) -> bool {
        self.get_all_legal_moves().contains(&mv)
    }

    /// The en passant target, if a pawn of the side to move stands next to it.
    pub fn capturable_en_passant_target(&self) -> Option<Square> {
        let target = self.en_passant_target?;
        let us = self.current_turn;
        let pawn = Some(Piece::new(PieceType::Pawn, us));
        [-1, 1]
            .into_iter()
            .filter_map(|df| target.offset(df, -us.forward()))
            .any(|from| self.get_piece(from) == pawn)
            .then_some(target)
    }

    pub fn get_all_pseudo_legal_moves(&self) -> Vec<Move> {
        let mut moves = Vec::with_capacity(48);
        let us = self.current_turn;

        for index in 0..64u8 {
            let square = Square(index);
            let Some(piece) = self.get_piece(square) else { continue };
            if piece.color != us {
                continue;
            }

            match piece.kind {
                PieceType::Pawn => self.push_pawn_moves(square, us, &mut moves),
                PieceType::Knight => self.push_step_moves(square, us, &KNIGHT_OFFSETS, &mut moves),
                PieceType::Bishop => self.push_slide_moves(square, us, &BISHOP_DIRECTIONS, &mut moves),
                PieceType::Rook => self.push_slide_moves(square, us, &ROOK_DIRECTIONS, &mut moves),
                PieceType::Queen => {
                    self.push_slide_moves(square, us, &ROOK_DIRECTIONS, &mut moves);
                    self.push_slide_moves(square, us, &BISHOP_DIRECTIONS, &mut moves);
                }
                PieceType::King => {
                    self.push_step_moves(square, us, &KING_OFFSETS, &mut moves);
                    self.push_castling_moves(square, us, &mut moves);
                }
            }
        }

        moves
    }

    fn push_pawn_moves(&self, square: Square, us: Color, moves: &mut Vec<Move>) {
        let forward = us.forward();
        let start_rank = if us == Color::White { 1 } else { 6 };

        let push = |to: Square, moves: &mut Vec<Move>| {
            if to.rank() == us.opposite().home_rank() {
                for kind in PieceType::PROMOTIONS {
                    moves.push(Move::new_promotion(square, to, kind));
                }
            } else {
                moves.push(Move::new(square, to));
            }
        };

        if let Some(one) = square.offset(0, forward) {
            if self.get_piece(one).is_none() {
                push(one, moves);
                if square.rank() == start_rank {
                    if let Some(two) = one.offset(0, forward) {
                        if self.get_piece(two).is_none() {
                            moves.push(Move::new(square, two));
                        }
                    }
                }
            }
        }

        for df in [-1, 1] {
            let Some(to) = square.offset(df, forward) else { continue };
            match self.get_piece(to) {
                Some(target) if target.color != us => push(to, moves),
                None if self.en_passant_target == Some(to) => moves.push(Move::new(square, to)),
                _ => {}
            }
        }
    }

    fn push_step_moves(&self, square: Square, us: Color, offsets: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in offsets {
            let Some(to) = square.offset(df, dr) else { continue };
            match self.get_piece(to) {
                Some(target) if target.color == us => {}
                _ => moves.push(Move::new(square, to)),
            }
        }
    }

    fn push_slide_moves(&self, square: Square, us: Color, directions: &[(i8, i8)], moves: &mut Vec<Move>) {
        for &(df, dr) in directions {
            let mut current = square.offset(df, dr);
            while let Some(to) = current {
                match self.get_piece(to) {
                    None => moves.push(Move::new(square, to)),
                    Some(target) => {
                        if target.color != us {
                            moves.push(Move::new(square, to));
                        }
                        break;
                    }
                }
                current = to.offset(df, dr);
            }
        }
    }

    /// Castling needs the right, the rook at home, empty squares between,
    /// and the king neither in, through, nor into check.
    fn push_castling_moves(&self, square: Square, us: Color, moves: &mut Vec<Move>) {
        let rank = us.home_rank();
        if square != Square::new(4, rank) {
            return;
        }

        let them = us.opposite();
        let (kingside, queenside) = castling_rights_for_color(us);
        let rook = Some(Piece::new(PieceType::Rook, us));
        let empty = |files: &[u8]| files.iter().all(|&file| self.get_piece(Square::new(file, rank)).is_none());
        let safe = |files: &[u8]| files.iter().all(|&file| !self.is_square_attacked(Square::new(file, rank), them));

        if has_castling_right(self.castling_rights, kingside)
            && self.get_piece(Square::new(7, rank)) == rook
            && empty(&[5, 6])
            && safe(&[4, 5, 6])
        {
            moves.push(Move::new(square, Square::new(6, rank)));
        }

        if has_castling_right(self.castling_rights, queenside)
            && self.get_piece(Square::new(0, rank)) == rook
            && empty(&[1, 2, 3])
            && safe(&[4, 3, 2])
        {
            moves.push(Move::new(square, Square::new(2, rank)));
        }
    }

    /// Play the move on a scratch copy of the squares and test our king.
    fn leaves_king_safe(&self, mv: Move) -> bool {
        let Some(moving) = self.get_piece(mv.from) else { return false };
        let mut squares = self.squares;

        if moving.kind == PieceType::Pawn
            && Some(mv.to) == self.en_passant_target
            && mv.from.file() != mv.to.file()
        {
            squares[Square::new(mv.to.file(), mv.from.rank()).index()] = None;
        }

        squares[mv.from.index()] = None;
        squares[mv.to.index()] = Some(moving);

        let king = if moving.kind == PieceType::King {
            Some(mv.to)
        } else {
            self.find_king(moving.color)
        };

        match king {
            Some(king) => !square_attacked_on(&squares, king, moving.color.opposite()),
            None => true,
        }
    }
}
