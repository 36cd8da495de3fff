//! Pre-computed attack tables for move generation and attack detection.
//!
//! This module contains:
//! - Knight, king and pawn attack sets (built at compile time)
//! - Magic-indexed rook and bishop attacks
//! - The "between" table used for check blocking and pin rays
//!
//! Everything lives in one immutable [`AttackTables`] value. Build it once
//! and share it by reference; [`AttackTables::global`] does that lazily.

use std::sync::OnceLock;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, warn};

use crate::bitboard::Bitboard;
use crate::magic::{self, Slider};
use crate::types::Color;

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const WHITE_PAWN_DELTAS: [(i8, i8); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i8, i8); 2] = [(-1, -1), (1, -1)];

/// Destinations reachable from `sq` by one of `deltas`, dropping any that
/// leave the board.
const fn leaper_attacks(sq: u8, deltas: &[(i8, i8)]) -> Bitboard {
    let file = (sq % 8) as i8;
    let rank = (sq / 8) as i8;
    let mut result = 0u64;
    let mut i = 0;
    while i < deltas.len() {
        let x = file + deltas[i].0;
        let y = rank + deltas[i].1;
        if x >= 0 && x < 8 && y >= 0 && y < 8 {
            result |= 1u64 << (y * 8 + x);
        }
        i += 1;
    }
    Bitboard(result)
}

const fn leaper_table(deltas: &[(i8, i8)]) -> [Bitboard; 64] {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        attacks[sq as usize] = leaper_attacks(sq, deltas);
        sq += 1;
    }
    attacks
}

pub static KNIGHT_ATTACKS: [Bitboard; 64] = leaper_table(&KNIGHT_DELTAS);
pub static KING_ATTACKS: [Bitboard; 64] = leaper_table(&KING_DELTAS);
/// Indexed by `Color::idx()`.
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = [
    leaper_table(&WHITE_PAWN_DELTAS),
    leaper_table(&BLACK_PAWN_DELTAS),
];

/// Magic lookup data for one slider kind.
struct MagicTable {
    masks: [Bitboard; 64],
    magics: [u64; 64],
    bits: u32,
    /// `64 << bits` entries, one block per square.
    attacks: Vec<Bitboard>,
}

impl MagicTable {
    /// Builds the table from the embedded magics. A magic that turns out to
    /// collide is replaced by a fresh search so the table is always exact.
    fn build(slider: Slider) -> Self {
        let size = slider.table_size();
        let mut masks = [Bitboard::EMPTY; 64];
        let mut magics = [0u64; 64];
        let mut attacks = Vec::with_capacity(64 * size);

        for sq in 0..64u8 {
            masks[sq as usize] = magic::blocker_mask(slider, sq);
            let embedded = slider.embedded_magic(sq);
            let (found, table) = match magic::try_magic(slider, sq, embedded) {
                Some(table) => (embedded, table),
                None => {
                    warn!(?slider, sq, "embedded magic collides, searching for a new one");
                    let mut rng = StdRng::seed_from_u64(0x9E37_79B9_7F4A_7C15 ^ sq as u64);
                    magic::find_magic(slider, sq, &mut rng)
                }
            };
            magics[sq as usize] = found;
            attacks.extend(table);
        }

        Self {
            masks,
            magics,
            bits: slider.bits(),
            attacks,
        }
    }

    #[inline(always)]
    fn lookup(&self, sq: u8, occupied: Bitboard) -> Bitboard {
        let blockers = occupied & self.masks[sq as usize];
        let idx = magic::magic_index(self.magics[sq as usize], blockers, self.bits);
        self.attacks[((sq as usize) << self.bits) + idx]
    }
}

/// All attack data the move generator reads.
pub struct AttackTables {
    knight: [Bitboard; 64],
    king: [Bitboard; 64],
    pawn: [[Bitboard; 64]; 2],
    rook: MagicTable,
    bishop: MagicTable,
    /// `between[a][b]`: squares strictly between two aligned squares, empty
    /// otherwise.
    between: Box<[[Bitboard; 64]; 64]>,
}

static TABLES: OnceLock<AttackTables> = OnceLock::new();

impl AttackTables {
    pub fn new() -> Self {
        let rook = MagicTable::build(Slider::Rook);
        let bishop = MagicTable::build(Slider::Bishop);
        let between = build_between(&rook, &bishop);
        debug!(
            rook_entries = rook.attacks.len(),
            bishop_entries = bishop.attacks.len(),
            "attack tables built"
        );
        Self {
            knight: KNIGHT_ATTACKS,
            king: KING_ATTACKS,
            pawn: PAWN_ATTACKS,
            rook,
            bishop,
            between,
        }
    }

    /// Process-wide tables, built on first use.
    pub fn global() -> &'static AttackTables {
        TABLES.get_or_init(AttackTables::new)
    }

    #[inline(always)]
    pub fn knight(&self, sq: u8) -> Bitboard {
        self.knight[sq as usize]
    }

    #[inline(always)]
    pub fn king(&self, sq: u8) -> Bitboard {
        self.king[sq as usize]
    }

    /// Squares a pawn of `color` on `sq` attacks.
    #[inline(always)]
    pub fn pawn(&self, color: Color, sq: u8) -> Bitboard {
        self.pawn[color.idx()][sq as usize]
    }

    #[inline(always)]
    pub fn rook_attacks(&self, sq: u8, occupied: Bitboard) -> Bitboard {
        self.rook.lookup(sq, occupied)
    }

    #[inline(always)]
    pub fn bishop_attacks(&self, sq: u8, occupied: Bitboard) -> Bitboard {
        self.bishop.lookup(sq, occupied)
    }

    #[inline(always)]
    pub fn queen_attacks(&self, sq: u8, occupied: Bitboard) -> Bitboard {
        self.rook_attacks(sq, occupied) | self.bishop_attacks(sq, occupied)
    }

    #[inline(always)]
    pub fn between(&self, a: u8, b: u8) -> Bitboard {
        self.between[a as usize][b as usize]
    }
}

impl Default for AttackTables {
    fn default() -> Self {
        Self::new()
    }
}

/// For aligned squares, the squares between them are where the two rays
/// facing each other overlap (with the other square as the only blocker).
fn build_between(rook: &MagicTable, bishop: &MagicTable) -> Box<[[Bitboard; 64]; 64]> {
    let mut between = Box::new([[Bitboard::EMPTY; 64]; 64]);
    for a in 0..64u8 {
        let a_bb = Bitboard::from_square(a);
        for b in 0..64u8 {
            let b_bb = Bitboard::from_square(b);
            let mut result = Bitboard::EMPTY;
            if rook.lookup(a, Bitboard::EMPTY).contains(b) {
                result = rook.lookup(a, b_bb) & rook.lookup(b, a_bb);
            } else if bishop.lookup(a, Bitboard::EMPTY).contains(b) {
                result = bishop.lookup(a, b_bb) & bishop.lookup(b, a_bb);
            }
            between[a as usize][b as usize] = result;
        }
    }
    between
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
