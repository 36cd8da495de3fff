use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub const ALL: [Color; 2] = [Color::White, Color::Black];

    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
    pub fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Promotion choices, weakest first.
    pub const PROMOTIONS: [PieceKind; 4] = [
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
    ];

    pub fn idx(self) -> usize {
        match self {
            PieceKind::Pawn => 0,
            PieceKind::Knight => 1,
            PieceKind::Bishop => 2,
            PieceKind::Rook => 3,
            PieceKind::Queen => 4,
            PieceKind::King => 5,
        }
    }

    /// Material value in centipawns. The king has none.
    pub fn value(self) -> i32 {
        match self {
            PieceKind::Pawn => 100,
            PieceKind::Knight => 320,
            PieceKind::Bishop => 330,
            PieceKind::Rook => 500,
            PieceKind::Queen => 900,
            PieceKind::King => 0,
        }
    }

    pub fn from_char(c: char) -> Option<PieceKind> {
        match c.to_ascii_lowercase() {
            'p' => Some(PieceKind::Pawn),
            'n' => Some(PieceKind::Knight),
            'b' => Some(PieceKind::Bishop),
            'r' => Some(PieceKind::Rook),
            'q' => Some(PieceKind::Queen),
            'k' => Some(PieceKind::King),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Dense index 0..12: white P N B R Q K, then black.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.color.idx() * 6 + self.kind.idx()
    }

    /// FEN letter: uppercase for white.
    pub fn to_char(self) -> char {
        let c = self.kind.to_char();
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

/// The four castling moves, each tied to fixed king and rook squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Castling {
    WhiteKingside,
    WhiteQueenside,
    BlackKingside,
    BlackQueenside,
}

impl Castling {
    pub const ALL: [Castling; 4] = [
        Castling::WhiteKingside,
        Castling::WhiteQueenside,
        Castling::BlackKingside,
        Castling::BlackQueenside,
    ];

    pub fn idx(self) -> usize {
        match self {
            Castling::WhiteKingside => 0,
            Castling::WhiteQueenside => 1,
            Castling::BlackKingside => 2,
            Castling::BlackQueenside => 3,
        }
    }

    pub fn color(self) -> Color {
        match self {
            Castling::WhiteKingside | Castling::WhiteQueenside => Color::White,
            Castling::BlackKingside | Castling::BlackQueenside => Color::Black,
        }
    }

    /// (king_from, king_to)
    pub fn king_squares(self) -> (u8, u8) {
        match self {
            Castling::WhiteKingside => (4, 6),
            Castling::WhiteQueenside => (4, 2),
            Castling::BlackKingside => (60, 62),
            Castling::BlackQueenside => (60, 58),
        }
    }

    /// (rook_from, rook_to)
    pub fn rook_squares(self) -> (u8, u8) {
        match self {
            Castling::WhiteKingside => (7, 5),
            Castling::WhiteQueenside => (0, 3),
            Castling::BlackKingside => (63, 61),
            Castling::BlackQueenside => (56, 59),
        }
    }

    pub fn right(self) -> CastlingRights {
        CastlingRights(1 << self.idx())
    }

    /// The castling whose rook starts on `sq`, if any.
    pub fn for_rook_home(sq: u8) -> Option<Castling> {
        match sq {
            7 => Some(Castling::WhiteKingside),
            0 => Some(Castling::WhiteQueenside),
            63 => Some(Castling::BlackKingside),
            56 => Some(Castling::BlackQueenside),
            _ => None,
        }
    }
}

/// Set of castling rights, one bit per [`Castling`] in `Castling::idx` order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CastlingRights(pub u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    #[inline(always)]
    pub fn has(self, c: Castling) -> bool {
        self.0 & (1 << c.idx()) != 0
    }

    #[inline(always)]
    pub fn insert(&mut self, c: Castling) {
        self.0 |= 1 << c.idx();
    }

    /// Removes every right in `rights`, returning those that were held.
    #[inline(always)]
    pub fn remove(&mut self, rights: CastlingRights) -> CastlingRights {
        let revoked = CastlingRights(self.0 & rights.0);
        self.0 &= !rights.0;
        revoked
    }

    #[inline(always)]
    pub fn union(self, other: CastlingRights) -> CastlingRights {
        CastlingRights(self.0 | other.0)
    }

    /// Both rights of one color.
    pub fn for_color(color: Color) -> CastlingRights {
        match color {
            Color::White => CastlingRights(0b0011),
            Color::Black => CastlingRights(0b1100),
        }
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn iter(self) -> impl Iterator<Item = Castling> {
        Castling::ALL.into_iter().filter(move |c| self.has(*c))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from: u8, // 0..63
    pub to: u8,   // 0..63
    pub piece: Piece,
    pub promo: Option<PieceKind>,
    pub castle: Option<Castling>,
    pub is_en_passant: bool,
}

impl Move {
    pub fn new(from: u8, to: u8, piece: Piece) -> Self {
        Self {
            from,
            to,
            piece,
            promo: None,
            castle: None,
            is_en_passant: false,
        }
    }

    pub fn promotion(from: u8, to: u8, piece: Piece, promo: PieceKind) -> Self {
        Self {
            promo: Some(promo),
            ..Self::new(from, to, piece)
        }
    }

    pub fn castling(castle: Castling) -> Self {
        let (from, to) = castle.king_squares();
        Self {
            castle: Some(castle),
            ..Self::new(from, to, Piece::new(castle.color(), PieceKind::King))
        }
    }

    pub fn en_passant(from: u8, to: u8, color: Color) -> Self {
        Self {
            is_en_passant: true,
            ..Self::new(from, to, Piece::new(color, PieceKind::Pawn))
        }
    }

    /// Square of the pawn removed by an en-passant capture.
    #[inline(always)]
    pub fn en_passant_victim(&self) -> u8 {
        match self.piece.color {
            Color::White => self.to - 8,
            Color::Black => self.to + 8,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", sq_to_coord(self.from), sq_to_coord(self.to))?;
        if let Some(p) = self.promo {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

/// Outcome of a position from the side to move's point of view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Draw(DrawReason),
    /// The side to move has been mated.
    Checkmate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawReason {
    Stalemate,
    FiftyMoveRule,
    InsufficientMaterial,
    Repetition,
}

// Helpers
pub fn file_of(sq: u8) -> i8 {
    (sq % 8) as i8
}
pub fn rank_of(sq: u8) -> i8 {
    (sq / 8) as i8
}
pub fn sq(file: i8, rank: i8) -> Option<u8> {
    if (0..8).contains(&file) && (0..8).contains(&rank) {
        Some((rank as u8) * 8 + (file as u8))
    } else {
        None
    }
}

pub fn sq_to_coord(sq: u8) -> String {
    let f = (b'a' + (sq % 8)) as char;
    let r = (b'1' + (sq / 8)) as char;
    format!("{f}{r}")
}

pub fn coord_to_sq(c: &str) -> Option<u8> {
    let b = c.as_bytes();
    if b.len() != 2 {
        return None;
    }
    let f = b[0];
    let r = b[1];
    if !(b'a'..=b'h').contains(&f) || !(b'1'..=b'8').contains(&r) {
        return None;
    }
    let file = f - b'a';
    let rank = r - b'1';
    Some(rank * 8 + file)
}

/// Chebyshev (king-step) distance between two squares.
pub fn king_distance(a: u8, b: u8) -> i32 {
    let df = (file_of(a) - file_of(b)).abs();
    let dr = (rank_of(a) - rank_of(b)).abs();
    df.max(dr) as i32
}
