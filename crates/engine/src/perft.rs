use std::time::Instant;

use crate::error::BoardResult;
use crate::{Board, Move};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PerftResult {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
    pub time_ms: u128,
}

impl PerftResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn nodes_per_second(&self) -> u64 {
        if self.time_ms == 0 {
            return 0;
        }
        (self.nodes * 1000) / (self.time_ms as u64)
    }

    fn absorb(&mut self, other: &PerftResult) {
        self.nodes += other.nodes;
        self.captures += other.captures;
        self.en_passant += other.en_passant;
        self.castles += other.castles;
        self.promotions += other.promotions;
        self.checks += other.checks;
        self.checkmates += other.checkmates;
    }
}

#[derive(Debug)]
pub struct PerftTestCase {
    pub name: &'static str,
    pub fen: &'static str,
    pub expected_results: &'static [(u32, u64)], // (depth, expected_nodes)
}

// Standard perft test positions
pub const PERFT_POSITIONS: &[PerftTestCase] = &[
    PerftTestCase {
        name: "Starting Position",
        fen: "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
        expected_results: &[(1, 20), (2, 400), (3, 8_902), (4, 197_281), (5, 4_865_609)],
    },
    PerftTestCase {
        name: "Kiwipete",
        fen: "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        expected_results: &[(1, 48), (2, 2_039), (3, 97_862), (4, 4_085_603)],
    },
    PerftTestCase {
        name: "Position 3",
        fen: "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        expected_results: &[(1, 14), (2, 191), (3, 2_812), (4, 43_238), (5, 674_624)],
    },
    PerftTestCase {
        name: "Position 4",
        fen: "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        expected_results: &[(1, 6), (2, 264), (3, 9_467), (4, 422_333)],
    },
    PerftTestCase {
        name: "Position 5",
        fen: "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ - 1 8",
        expected_results: &[(1, 44), (2, 1_486), (3, 62_379), (4, 2_103_487)],
    },
];

/// Count leaf nodes of the legal move tree to `depth`.
pub fn perft(board: &mut Board, depth: u32) -> BoardResult<u64> {
    if depth == 0 {
        return Ok(1);
    }

    let moves = board.get_all_legal_moves();
    if depth == 1 {
        return Ok(moves.len() as u64);
    }

    let mut nodes = 0;
    for mv in moves {
        board.make_move(mv)?;
        nodes += perft(board, depth - 1)?;
        board.undo_move()?;
    }

    Ok(nodes)
}

/// Perft with a breakdown of the moves played at the last ply.
pub fn perft_detailed(board: &mut Board, depth: u32) -> BoardResult<PerftResult> {
    let start_time = Instant::now();
    let mut result = count_detailed(board, depth)?;
    result.time_ms = start_time.elapsed().as_millis();
    Ok(result)
}

fn count_detailed(board: &mut Board, depth: u32) -> BoardResult<PerftResult> {
    let mut result = PerftResult::new();
    if depth == 0 {
        result.nodes = 1;
        return Ok(result);
    }

    for mv in board.get_all_legal_moves() {
        let game_move = board.make_move(mv)?;

        if depth == 1 {
            result.nodes += 1;
            if game_move.captured_piece.is_some() {
                result.captures += 1;
            }
            if game_move.is_en_passant {
                result.en_passant += 1;
            }
            if game_move.is_castling {
                result.castles += 1;
            }
            if mv.is_promotion() {
                result.promotions += 1;
            }
            if board.is_in_check() {
                result.checks += 1;
                if !board.has_legal_moves() {
                    result.checkmates += 1;
                }
            }
        } else {
            let sub_result = count_detailed(board, depth - 1)?;
            result.absorb(&sub_result);
        }

        board.undo_move()?;
    }

    Ok(result)
}

/// Per-root-move node counts, for comparing against a reference engine.
pub fn perft_divide(board: &mut Board, depth: u32) -> BoardResult<Vec<(Move, u64)>> {
    let mut results = Vec::new();
    if depth == 0 {
        return Ok(results);
    }

    for mv in board.get_all_legal_moves() {
        board.make_move(mv)?;
        let nodes = perft(board, depth - 1)?;
        board.undo_move()?;
        results.push((mv, nodes));
    }

    Ok(results)
}

/// Run one test case up to `max_depth`; returns whether every depth matched.
pub fn run_position_tests(test_case: &PerftTestCase, max_depth: Option<u32>) -> BoardResult<bool> {
    let mut board = Board::from_fen(test_case.fen)?;
    let mut all_passed = true;

    println!("🎯 {} ({})", test_case.name, test_case.fen);
    for &(depth, expected) in test_case.expected_results {
        if max_depth.is_some_and(|max| depth > max) {
            break;
        }

        let start_time = Instant::now();
        let nodes = perft(&mut board, depth)?;
        let elapsed = start_time.elapsed();

        let passed = nodes == expected;
        all_passed &= passed;
        println!(
            "   depth {}: {} nodes (expected {}) {} [{:.3}s]",
            depth,
            nodes,
            expected,
            if passed { "✅" } else { "❌" },
            elapsed.as_secs_f64()
        );
    }

    Ok(all_passed)
}

pub fn run_all_tests(max_depth: Option<u32>) -> BoardResult<bool> {
    let mut all_passed = true;
    for test_case in PERFT_POSITIONS {
        all_passed &= run_position_tests(test_case, max_depth)?;
    }
    Ok(all_passed)
}
