//! Perft benchmark and divide tool.
//!
//! Usage:
//!   cargo run --release --example perft_bench -p chess_core -- [depth] [fen] [--divide]
//!
//! Without a FEN, runs the reference suite at `depth` (default 5). With
//! `--divide`, prints the node count below each root move, which is the
//! quickest way to bisect a movegen bug against another engine.

use std::env;
use std::time::{Duration, Instant};

use chess_core::{perft, perft_divide, Position, START_FEN};

const SUITE: &[(&str, &str)] = &[
    ("Starting position", START_FEN),
    (
        "Kiwipete",
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    ),
    ("Position 3", "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -"),
    (
        "Position 4",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq -",
    ),
    (
        "Position 5",
        "rnbq1k1r/pp1Pbppp/2p5/8/2B5/8/PPP1NnPP/RNBQK2R w KQ -",
    ),
    (
        "Position 6",
        "r4rk1/1pp1qppp/p1np1n2/2b1p1B1/2B1P1b1/P1NP1N2/1PP1QPPP/R4RK1 w - -",
    ),
];

fn main() {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let divide = match args.iter().position(|a| a == "--divide") {
        Some(i) => {
            args.remove(i);
            true
        }
        None => false,
    };
    let depth: u8 = args.first().and_then(|s| s.parse().ok()).unwrap_or(5);

    match args.get(1) {
        Some(fen) => run_single(fen, depth, divide),
        None => run_suite(depth),
    }
}

fn nps(nodes: u64, elapsed: Duration) -> f64 {
    if elapsed.as_secs_f64() > 0.0 {
        nodes as f64 / elapsed.as_secs_f64()
    } else {
        0.0
    }
}

fn run_single(fen: &str, depth: u8, divide: bool) {
    let mut pos = match Position::from_fen(fen) {
        Ok(pos) => pos,
        Err(e) => {
            eprintln!("bad FEN: {e}");
            std::process::exit(2);
        }
    };
    println!("Position: {fen}");
    println!("Depth: {depth}");
    println!();

    let start = Instant::now();
    let nodes = if divide {
        let mut total = 0;
        for (mv, n) in perft_divide(&mut pos, depth) {
            println!("{mv}: {n}");
            total += n;
        }
        println!();
        total
    } else {
        perft(&mut pos, depth)
    };
    let elapsed = start.elapsed();

    println!("Nodes: {nodes}");
    println!("Time: {elapsed:.3?}");
    println!("NPS: {:.0}", nps(nodes, elapsed));
}

fn run_suite(depth: u8) {
    println!("=== Perft Benchmark Suite ===");
    println!("Depth: {depth}");
    println!();

    let mut total_nodes = 0u64;
    let mut total_time = Duration::ZERO;

    for (name, fen) in SUITE {
        let Ok(mut pos) = Position::from_fen(fen) else {
            eprintln!("{name}: bad FEN");
            continue;
        };
        print!("{name:.<30}");

        let start = Instant::now();
        let nodes = perft(&mut pos, depth);
        let elapsed = start.elapsed();

        total_nodes += nodes;
        total_time += elapsed;
        println!(
            " {nodes:>12} nodes in {elapsed:>8.3?} ({:>10.0} nps)",
            nps(nodes, elapsed)
        );
    }

    println!();
    println!("{:=<70}", "");
    println!(
        "TOTAL: {total_nodes} nodes in {total_time:.3?} ({:.0} nps)",
        nps(total_nodes, total_time)
    );
}
