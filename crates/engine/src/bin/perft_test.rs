use std::time::Instant;

use engine::perft::{perft_detailed, run_all_tests};
use engine::Board;

fn main() -> Result<(), engine::BoardError> {
    let max_depth = std::env::args().nth(1).and_then(|arg| arg.parse().ok()).unwrap_or(4);

    println!("\n🎯 PERFT SUITE (max depth {})", max_depth);
    println!("{}", "=".repeat(60));

    let start_time = Instant::now();
    let all_passed = run_all_tests(Some(max_depth))?;
    println!("{}", "=".repeat(60));
    println!("Total time: {:.3}s", start_time.elapsed().as_secs_f64());

    let mut board = Board::new();
    let detail = perft_detailed(&mut board, max_depth.min(4))?;
    println!(
        "Starting position breakdown: {} nodes, {} captures, {} checks, {} mates ({} nps)",
        detail.nodes,
        detail.captures,
        detail.checks,
        detail.checkmates,
        detail.nodes_per_second()
    );

    if all_passed {
        println!("🎉 All perft results match");
    } else {
        println!("❌ Some perft results differ");
        std::process::exit(1);
    }
    Ok(())
}
