//! Perft benchmark for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p janggi_core -- [depth] [fen]
//!
//! Examples:
//!   # Default: depth 3 from every formation pair
//!   cargo flamegraph --example perft_bench -p janggi_core
//!
//!   # Custom depth and position, Second to move
//!   cargo flamegraph --example perft_bench -p janggi_core -- 4 "3k5/8R/9/9/9/R8/9/9/4K4/9 b"

use janggi_core::{perft, Board, Formation, GameState, ParseError, Side};
use std::env;
use std::time::{Duration, Instant};

fn main() -> Result<(), ParseError> {
    let args: Vec<String> = env::args().collect();

    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(3);

    // If FEN provided, use single position mode
    if let Some(fen) = args.get(2) {
        run_single_position(fen, depth)?;
    } else {
        run_all_formations(depth);
    }
    Ok(())
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single_position(fen: &str, depth: u8) -> Result<(), ParseError> {
    let state = GameState::from_fen(fen)?;
    let side = state.side_to_move();
    let mut board = state.board().clone();

    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    // Warm-up run at lower depth
    if depth > 2 {
        let _ = perft(&mut board, side, depth.saturating_sub(2));
    }

    let start = Instant::now();
    let nodes = perft(&mut board, side, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
    Ok(())
}

fn run_all_formations(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for first in Formation::ALL {
        for second in Formation::ALL {
            let mut board = Board::startpos(first, second);
            let name = format!("{}/{}", u8::from(first), u8::from(second));

            print!("{name:.<30}");

            let start = Instant::now();
            let nodes = perft(&mut board, Side::First, depth);
            let elapsed = start.elapsed();

            total_nodes += nodes;
            total_time += elapsed;

            println!(
                " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
                nps(nodes, elapsed)
            );
        }
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
