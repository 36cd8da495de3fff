//! Searches for rook and bishop magic multipliers and prints them as Rust
//! arrays ready to paste over the embedded tables in `magic.rs`.
//!
//! Usage:
//!   cargo run --release --example find_magics -p chess_core -- [seed]

use std::env;
use std::time::Instant;

use chess_core::magic::{find_magic, Slider};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn main() {
    let seed: u64 = env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0x5EED);
    let mut rng = StdRng::seed_from_u64(seed);

    for (slider, name) in [(Slider::Rook, "ROOK_MAGICS"), (Slider::Bishop, "BISHOP_MAGICS")] {
        let start = Instant::now();
        let magics: Vec<u64> = (0..64u8)
            .map(|sq| find_magic(slider, sq, &mut rng).0)
            .collect();
        eprintln!("{name}: found 64 magics in {:.3?}", start.elapsed());

        println!("pub const {name}: [u64; 64] = [");
        for row in magics.chunks(4) {
            let cells: Vec<String> = row.iter().map(|m| format!("0x{m:016X},")).collect();
            println!("    {}", cells.join(" "));
        }
        println!("];");
    }
}
