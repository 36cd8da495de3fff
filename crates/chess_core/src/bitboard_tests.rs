use super::*;

#[test]
fn test_from_square() {
    assert_eq!(Bitboard::from_square(0).0, 1); // a1
    assert_eq!(Bitboard::from_square(7).0, 128); // h1
    assert_eq!(Bitboard::from_square(63).0, 1 << 63); // h8
}

#[test]
fn test_popcount() {
    assert_eq!(Bitboard::EMPTY.popcount(), 0);
    assert_eq!(Bitboard::FILE_A.popcount(), 8);
    assert_eq!(Bitboard::RANK_8.popcount(), 8);
    assert_eq!(Bitboard::ALL.popcount(), 64);
    assert_eq!(Bitboard::LIGHT_SQUARES.popcount(), 32);
}

#[test]
fn test_lsb_every_square() {
    for sq in 0..64u8 {
        assert_eq!(Bitboard::from_square(sq).lsb(), Some(sq));
        // Higher bits never disturb the answer.
        let above = if sq == 63 { 0 } else { !0u64 << (sq + 1) };
        assert_eq!(Bitboard(above | (1 << sq)).lsb(), Some(sq));
    }
    assert_eq!(Bitboard::EMPTY.lsb(), None);
}

#[test]
fn test_pop_lsb_drains_in_order() {
    let mut bb = Bitboard(0x8000_0100_0042_0001);
    let mut seen = Vec::new();
    while let Some(sq) = bb.pop_lsb() {
        seen.push(sq);
    }
    assert_eq!(seen, vec![0, 17, 22, 40, 63]);
    assert!(bb.is_empty());
    assert_eq!(bb.pop_lsb(), None);
}

#[test]
fn test_iterator() {
    let bb = Bitboard(0b1010);
    let squares: Vec<u8> = bb.collect();
    assert_eq!(squares, vec![1, 3]);
}

#[test]
fn test_set_difference() {
    let a = Bitboard::RANK_1;
    let b = Bitboard::FILE_A;
    assert_eq!((a - b).popcount(), 7);
    assert!(!(a - b).contains(0));
    let mut c = a;
    c -= a;
    assert!(c.is_empty());
}

#[test]
fn test_more_than_one() {
    assert!(!Bitboard::EMPTY.more_than_one());
    assert!(!Bitboard::from_square(12).more_than_one());
    assert!(Bitboard(0b101).more_than_one());
}

#[test]
fn test_shifts() {
    let a1 = Bitboard::from_square(0);
    assert_eq!(a1.north(), Bitboard::from_square(8));
    assert_eq!(a1.north_east(), Bitboard::from_square(9));
    assert_eq!(a1.north_west(), Bitboard::EMPTY); // Wraps off board

    let h8 = Bitboard::from_square(63);
    assert_eq!(h8.south(), Bitboard::from_square(55));
    assert_eq!(h8.south_east(), Bitboard::EMPTY); // Wraps off board
    assert_eq!(h8.south_west(), Bitboard::from_square(54));
}
