//! Magic hashing for sliding-piece attacks.
//!
//! For a slider on square `sq`, the pieces that can block it live in a
//! fixed mask (its rays minus the board edge). Multiplying the masked
//! occupancy by the square's magic and keeping the top `bits` bits gives a
//! collision-free index into a table of precomputed attack sets. Two
//! occupancies may share a slot only if they produce the same attacks.
//!
//! The embedded constants below were found offline with [`find_magic`]
//! (see `examples/find_magics.rs`).

use rand::Rng;

use crate::bitboard::Bitboard;

/// Index width for rook tables. Every rook mask has at most 12 squares.
pub const ROOK_BITS: u32 = 12;
/// Index width for bishop tables. Every bishop mask has at most 9 squares.
pub const BISHOP_BITS: u32 = 9;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Slider {
    Rook,
    Bishop,
}

impl Slider {
    pub fn bits(self) -> u32 {
        match self {
            Slider::Rook => ROOK_BITS,
            Slider::Bishop => BISHOP_BITS,
        }
    }

    pub fn table_size(self) -> usize {
        1 << self.bits()
    }

    fn directions(self) -> [(i8, i8); 4] {
        match self {
            Slider::Rook => [(1, 0), (-1, 0), (0, 1), (0, -1)],
            Slider::Bishop => [(1, 1), (1, -1), (-1, 1), (-1, -1)],
        }
    }

    pub fn embedded_magic(self, sq: u8) -> u64 {
        match self {
            Slider::Rook => ROOK_MAGICS[sq as usize],
            Slider::Bishop => BISHOP_MAGICS[sq as usize],
        }
    }
}

/// Squares whose occupancy can change the slider's attacks from `sq`.
///
/// The last square of each ray is left out: a piece there stops the ray
/// exactly where the board edge already would.
pub fn blocker_mask(slider: Slider, sq: u8) -> Bitboard {
    let mut mask = Bitboard::EMPTY;
    let (file, rank) = ((sq % 8) as i8, (sq / 8) as i8);
    for (dx, dy) in slider.directions() {
        let (mut x, mut y) = (file + dx, rank + dy);
        while on_board(x + dx, y + dy) {
            mask.set((y * 8 + x) as u8);
            x += dx;
            y += dy;
        }
    }
    mask
}

/// The `index`-th subset of `mask`: bit `k` of `index` decides whether the
/// `k`-th lowest square of the mask is occupied.
pub fn blocker_subset(mask: Bitboard, index: usize) -> Bitboard {
    let mut subset = Bitboard::EMPTY;
    for (k, sq) in mask.enumerate() {
        if (index >> k) & 1 == 1 {
            subset.set(sq);
        }
    }
    subset
}

/// Attacks by ray casting. Each ray runs up to and including the first
/// occupied square.
pub fn slide_attacks(slider: Slider, sq: u8, blockers: Bitboard) -> Bitboard {
    let mut attacks = Bitboard::EMPTY;
    let (file, rank) = ((sq % 8) as i8, (sq / 8) as i8);
    for (dx, dy) in slider.directions() {
        let (mut x, mut y) = (file + dx, rank + dy);
        while on_board(x, y) {
            let target = (y * 8 + x) as u8;
            attacks.set(target);
            if blockers.contains(target) {
                break;
            }
            x += dx;
            y += dy;
        }
    }
    attacks
}

#[inline(always)]
pub fn magic_index(magic: u64, blockers: Bitboard, bits: u32) -> usize {
    (magic.wrapping_mul(blockers.0) >> (64 - bits)) as usize
}

/// Builds the attack table for one square, or `None` if `magic` maps two
/// occupancies with different attacks onto the same slot.
pub fn try_magic(slider: Slider, sq: u8, magic: u64) -> Option<Vec<Bitboard>> {
    let mask = blocker_mask(slider, sq);
    let bits = slider.bits();
    let mut table = vec![Bitboard::EMPTY; slider.table_size()];
    let mut used = vec![false; slider.table_size()];

    for n in 0..(1usize << mask.popcount()) {
        let blockers = blocker_subset(mask, n);
        let attacks = slide_attacks(slider, sq, blockers);
        let idx = magic_index(magic, blockers, bits);
        if used[idx] && table[idx] != attacks {
            return None;
        }
        used[idx] = true;
        table[idx] = attacks;
    }
    Some(table)
}

/// Searches for a working magic for `sq`. Candidates are the AND of three
/// random words, which keeps them sparse. Retries until one fits.
pub fn find_magic<R: Rng + ?Sized>(slider: Slider, sq: u8, rng: &mut R) -> (u64, Vec<Bitboard>) {
    loop {
        let candidate = rng.gen::<u64>() & rng.gen::<u64>() & rng.gen::<u64>();
        if let Some(table) = try_magic(slider, sq, candidate) {
            return (candidate, table);
        }
    }
}

#[inline(always)]
fn on_board(x: i8, y: i8) -> bool {
    (0..8).contains(&x) && (0..8).contains(&y)
}

#[rustfmt::skip]
pub const ROOK_MAGICS: [u64; 64] = [
    0x0080008011204000, 0x0840002040100008, 0x2080081000042000, 0x0080040800500002,
    0x0100080004060100, 0x0220020100040080, 0x1020008002000040, 0x0080008000402100,
    0x0002400010200040, 0x000040000C201100, 0x0008200008001002, 0x0001040021100008,
    0x0000804800030080, 0x0002000804010210, 0x0000800220010081, 0x00010000408A0100,
    0x0000422000211000, 0x0000114400204000, 0x2020008400801000, 0x0000200200024100,
    0x0001410400080001, 0x0000208002840008, 0x0001010800800040, 0x0010002000408110,
    0x0002002101008000, 0x0002108008200008, 0x0008002108100008, 0x0000050100181000,
    0x0004000102080010, 0x00000A0601000400, 0x00010A0020004020, 0x0001020040002080,
    0x0000202018080080, 0x0008002010200080, 0x0010401002102000, 0x0000202501001000,
    0x0000100201000880, 0x0000500202000108, 0x0082000040400080, 0x0400200040200084,
    0x0010008000920800, 0x0008481040002000, 0x0022001804000800, 0x0008000402808008,
    0x0040100300010800, 0x0000400400008200, 0x0001008008040802, 0x0400002002100208,
    0x0002200800100220, 0x0000100040800910, 0x0400080100100082, 0x0020420004002020,
    0x0002000900800410, 0x0080008400010100, 0x0000009200400404, 0x0011000040012010,
    0x0000800010210041, 0x0000400008801021, 0x0001002000084011, 0x0000020010082042,
    0x0000100800050001, 0x0000020804840001, 0x0000081001020084, 0x0000004020840102,
];
#[rustfmt::skip]
pub const BISHOP_MAGICS: [u64; 64] = [
    0x0020002208001020, 0x0020101200401000, 0x0010040020042080, 0x00804C0008000040,
    0x0001804020040400, 0x0040201A08000000, 0x0804004010040000, 0x0800140804002000,
    0x2000004802001020, 0x0000008208020404, 0x0020080241002000, 0x0001080A00400040,
    0x0800804042001000, 0x0000008410300040, 0x0000042008020180, 0x0000801010080480,
    0x0040002400208020, 0x0201000200140080, 0x0008001040400808, 0x2004001040042000,
    0x0010480010100000, 0x0000400008004000, 0x0010110020802000, 0x0000020200904800,
    0x0000400011040100, 0x000800200A004100, 0x0000110200440400, 0x00400400004100A0,
    0x00008C0020802000, 0x0004001001120080, 0x00000840000C0080, 0x0000410040021010,
    0x0008040200040040, 0x0000288400080020, 0x0000100A00108040, 0x2000200800010810,
    0x2008020400001010, 0x2004001020020800, 0x0200400821000800, 0x0002020200201080,
    0x4000202010002004, 0x00040021080000A0, 0x2000044040401000, 0x0040002008480020,
    0x0000088808400080, 0x0008005040800008, 0x100802000C000200, 0x0000180020080090,
    0x0000104010080001, 0x0020048804008000, 0x0000002110201010, 0x0080000012424000,
    0x0000800840808020, 0x0011400040410000, 0x0210021000200400, 0x0000880010044000,
    0x0000400400809020, 0x0000000200206030, 0x020000080C000801, 0x0000400001008108,
    0x0000000001080210, 0x0000002044006200, 0x0000020128002008, 0x0040010022020040,
];

#[cfg(test)]
#[path = "magic_tests.rs"]
mod magic_tests;
