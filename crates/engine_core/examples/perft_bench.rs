//! Perft harness for profiling with cargo-flamegraph.
//!
//! Usage:
//!   cargo flamegraph --example perft_bench -p engine_core -- [depth] [fen]
//!
//! With no FEN the whole standard suite runs at the given depth (default 5),
//! which gives the profiler a realistic mix of middlegame and endgame trees.

use std::env;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use engine_core::{perft, Position};

const TEST_POSITIONS: &[(&str, &str)] = &[
    (
        "Starting position",
        "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    ),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Rook endgame", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Promotion heavy",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Underpromotion",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
    (
        "Symmetrical middlegame",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
];

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let depth: u8 = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(5);

    if let Some(fen) = args.get(2) {
        run_single_position(fen, depth)
    } else {
        run_all_positions(depth)
    }
}

fn run_single_position(fen: &str, depth: u8) -> ExitCode {
    let mut pos = match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    println!("Position: {fen}");
    println!("Depth: {depth}");

    // Warm-up at a lower depth so the timed run starts hot.
    if depth > 2 {
        let _ = perft(&mut pos, depth - 2);
    }

    let start = Instant::now();
    let nodes = perft(&mut pos, depth);
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", rate(nodes, elapsed));
    ExitCode::SUCCESS
}

fn run_all_positions(depth: u8) -> ExitCode {
    println!("=== Perft Suite (depth {depth}) ===");

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in TEST_POSITIONS {
        let mut pos = match Position::from_fen(fen) {
            Ok(pos) => pos,
            Err(e) => {
                eprintln!("{name}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;

        println!(
            "{name:.<26} {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            rate(nodes, elapsed)
        );
    }

    println!(
        "Total: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        rate(total_nodes, total_time)
    );
    ExitCode::SUCCESS
}

fn rate(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}
