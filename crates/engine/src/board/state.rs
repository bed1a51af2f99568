use super::Board;
use crate::error::{BoardError, BoardResult};
use crate::types::*;

impl Board {
    /// Validate a move against the legal move list, then play it.
    /// This is the entry point for moves coming from a player.
    pub fn try_make_move(&mut self, mv: Move) -> BoardResult<GameMove> {
        let moving = self.get_piece(mv.from).ok_or(BoardError::NoPieceAtSquare(mv.from))?;

        if moving.kind == PieceType::Pawn
            && mv.to.rank() == moving.color.opposite().home_rank()
            && mv.promotion.is_none()
        {
            return Err(BoardError::MissingPromotion(mv));
        }

        if !self.is_legal_move(mv) {
            return Err(BoardError::IllegalMove(mv));
        }

        self.make_move(mv)
    }

    /// Play a move produced by the move generator. Only ownership and
    /// promotion completeness are checked; full legality is trusted.
    pub fn make_move(&mut self, mv: Move) -> BoardResult<GameMove> {
        let moving = self.get_piece(mv.from).ok_or(BoardError::NoPieceAtSquare(mv.from))?;
        if moving.color != self.current_turn {
            return Err(BoardError::WrongSideToMove {
                square: mv.from,
                owner: moving.color,
                to_move: self.current_turn,
            });
        }

        let reaches_last_rank = mv.to.rank() == moving.color.opposite().home_rank();
        if moving.kind == PieceType::Pawn && reaches_last_rank && mv.promotion.is_none() {
            return Err(BoardError::MissingPromotion(mv));
        }

        let is_en_passant = moving.kind == PieceType::Pawn
            && Some(mv.to) == self.en_passant_target
            && mv.from.file() != mv.to.file()
            && self.get_piece(mv.to).is_none();
        let is_castling = moving.kind == PieceType::King && mv.from.file().abs_diff(mv.to.file()) == 2;

        let captured_square = if is_en_passant {
            Square::new(mv.to.file(), mv.from.rank())
        } else {
            mv.to
        };
        let captured_piece = self.get_piece(captured_square);

        let game_move = GameMove {
            mv,
            moved_piece: moving,
            captured_piece,
            captured_square,
            is_castling,
            is_en_passant,
            previous_castling_rights: self.castling_rights,
            previous_en_passant_target: self.en_passant_target,
            previous_half_move_clock: self.half_move_clock,
            previous_full_move_number: self.full_move_number,
        };

        self.update_castling_rights(mv, moving, captured_piece);

        // Execute the move
        self.squares[captured_square.index()] = None;
        self.squares[mv.from.index()] = None;
        let placed = match mv.promotion {
            Some(kind) if moving.kind == PieceType::Pawn => Piece::new(kind, moving.color),
            _ => moving,
        };
        self.squares[mv.to.index()] = Some(placed);

        if is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv);
            let rook = self.squares[rook_from.index()].take();
            self.squares[rook_to.index()] = rook;
        }

        self.en_passant_target = if moving.kind == PieceType::Pawn && mv.from.rank().abs_diff(mv.to.rank()) == 2 {
            Some(Square::new(mv.from.file(), (mv.from.rank() + mv.to.rank()) / 2))
        } else {
            None
        };

        if moving.kind == PieceType::Pawn || captured_piece.is_some() {
            self.half_move_clock = 0;
        } else {
            self.half_move_clock = self.half_move_clock.saturating_add(1);
        }

        if self.current_turn == Color::Black {
            self.full_move_number = self.full_move_number.saturating_add(1);
        }
        self.current_turn = self.current_turn.opposite();

        self.move_history.push(game_move.clone());
        self.key_history.push(self.position_key());

        Ok(game_move)
    }

    /// Strip rights when a king or rook leaves home, or a rook is captured at home.
    fn update_castling_rights(&mut self, mv: Move, moving: Piece, captured: Option<Piece>) {
        if moving.kind == PieceType::King {
            let (kingside, queenside) = castling_rights_for_color(moving.color);
            remove_castling_right(&mut self.castling_rights, kingside | queenside);
        }

        for (square, piece) in [(mv.from, Some(moving)), (mv.to, captured)] {
            if !matches!(piece, Some(p) if p.kind == PieceType::Rook) {
                continue;
            }
            match (square.file(), square.rank()) {
                (0, 0) => remove_castling_right(&mut self.castling_rights, WHITE_QUEENSIDE), // a1
                (7, 0) => remove_castling_right(&mut self.castling_rights, WHITE_KINGSIDE),  // h1
                (0, 7) => remove_castling_right(&mut self.castling_rights, BLACK_QUEENSIDE), // a8
                (7, 7) => remove_castling_right(&mut self.castling_rights, BLACK_KINGSIDE),  // h8
                _ => {}
            }
        }
    }

    /// Undo the last move made
    pub fn undo_move(&mut self) -> BoardResult<GameMove> {
        let last_move = self.move_history.pop().ok_or(BoardError::NothingToUndo)?;
        self.key_history.pop();

        let mv = last_move.mv;

        if last_move.is_castling {
            let (rook_from, rook_to) = castling_rook_squares(mv);
            let rook = self.squares[rook_to.index()].take();
            self.squares[rook_from.index()] = rook;
        }

        self.squares[mv.to.index()] = None;
        self.squares[mv.from.index()] = Some(last_move.moved_piece);
        if let Some(captured) = last_move.captured_piece {
            self.squares[last_move.captured_square.index()] = Some(captured);
        }

        // Restore all board state
        self.castling_rights = last_move.previous_castling_rights;
        self.en_passant_target = last_move.previous_en_passant_target;
        self.half_move_clock = last_move.previous_half_move_clock;
        self.full_move_number = last_move.previous_full_move_number;
        self.current_turn = self.current_turn.opposite();

        Ok(last_move)
    }
}

/// Rook (from, to) for a castling king move.
fn castling_rook_squares(mv: Move) -> (Square, Square) {
    let rank = mv.from.rank();
    if mv.to.file() > mv.from.file() {
        (Square::new(7, rank), Square::new(5, rank))
    } else {
        (Square::new(0, rank), Square::new(3, rank))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play_and_undo(fen: &str, uci: &str) -> (Board, Board) {
        let mut board = Board::from_fen(fen).unwrap();
        let before = board.clone();
        let mv = Move::from_uci(uci).unwrap();
        board.try_make_move(mv).unwrap();
        assert_eq!(board.get_last_move().map(|game_move| game_move.mv), Some(mv));
        let after = board.clone();
        board.undo_move().unwrap();
        assert_eq!(board, before, "undo of {} must restore {}", uci, fen);
        (before, after)
    }

    #[test]
    fn test_double_push_sets_en_passant_target() {
        let (_, after) = play_and_undo(crate::board::STARTING_FEN, "e2e4");
        assert_eq!(after.en_passant_target, Some(Square::from_algebraic("e3").unwrap()));
        assert_eq!(after.current_turn, Color::Black);
        assert_eq!(after.to_fen(), "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1");
    }

    #[test]
    fn test_castling_moves_rook_and_clears_rights() {
        let (_, after) = play_and_undo("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10", "e1g1");
        assert_eq!(after.to_fen(), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 4 10");

        let (_, after) = play_and_undo("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 3 10", "e8c8");
        assert_eq!(after.to_fen(), "2kr3r/8/8/8/8/8/8/R3K2R w KQ - 4 11");
    }

    #[test]
    fn test_move_clocks_saturate() {
        let (_, after) = play_and_undo("4k3/8/8/8/8/8/8/4K3 b - - 65535 65535", "e8d8");
        assert_eq!(after.half_move_clock, u16::MAX);
        assert_eq!(after.full_move_number, u16::MAX);
    }

    #[test]
    fn test_en_passant_capture_and_undo() {
        let (_, after) = play_and_undo("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2", "e5d6");
        assert_eq!(after.to_fen(), "4k3/8/3P4/8/8/8/8/4K3 b - - 0 2");
    }

    #[test]
    fn test_promotion_capture_and_undo() {
        let (_, after) = play_and_undo("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1", "a7b8n");
        assert_eq!(after.to_fen(), "1N2k3/8/8/8/8/8/8/4K3 b - - 0 1");
    }

    #[test]
    fn test_rook_capture_strips_castling_right() {
        let (_, after) = play_and_undo("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", "a1a8");
        assert_eq!(after.castling_rights, WHITE_KINGSIDE | BLACK_KINGSIDE);
    }

    #[test]
    fn test_rejected_moves() {
        let mut board = Board::new();
        let e2e5 = Move::from_uci("e2e5").unwrap();
        assert_eq!(board.try_make_move(e2e5), Err(BoardError::IllegalMove(e2e5)));

        let e7e5 = Move::from_uci("e7e5").unwrap();
        assert!(matches!(board.make_move(e7e5), Err(BoardError::WrongSideToMove { .. })));
        assert!(matches!(board.make_move(Move::from_uci("e4e5").unwrap()), Err(BoardError::NoPieceAtSquare(_))));
        assert_eq!(board.undo_move(), Err(BoardError::NothingToUndo));

        let mut promo = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let bare = Move::from_uci("a7a8").unwrap();
        assert_eq!(promo.try_make_move(bare), Err(BoardError::MissingPromotion(bare)));
        assert_eq!(promo, Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap());
    }
}
