use crate::bitboard::Bitboard;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline(always)]
    pub const fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    #[inline(always)]
    pub const fn idx(self) -> usize {
        match self {
            Color::White => 0,
            Color::Black => 1,
        }
    }
}

/// Piece types in array order. The ordering mirrors the `pieces[2][6]`
/// layout in `Position` and the generator's emission order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    King,
    Queen,
    Rook,
    Bishop,
    Knight,
    Pawn,
}

impl PieceKind {
    pub const ALL: [PieceKind; 6] = [
        PieceKind::King,
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
        PieceKind::Pawn,
    ];

    #[inline(always)]
    pub const fn idx(self) -> usize {
        self as usize
    }
}

/// Which side of the board a castle happens on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Wing {
    King,
    Queen,
}

/// What a move does beyond relocating `Move::piece` from `from` to `to`.
///
/// Each variant corresponds to one special case in make/unmake: the double
/// push arms the en-passant target, a castle drags the rook along, an
/// en-passant capture removes a pawn that is not on the destination square,
/// and a promotion lands a different piece type than the one that moved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// King/queen/rook/bishop/knight step or capture.
    Regular,
    PawnPush,
    PawnDoublePush,
    PawnCapture,
    EnPassant,
    CastleShort,
    CastleLong,
    /// Payload is the piece type the pawn becomes (queen/rook/bishop/knight).
    Promotion(PieceKind),
}

/// An immutable move. `from` and `to` are single-bit bitboards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Bitboard,
    pub to: Bitboard,
    pub piece: PieceKind,
    pub kind: MoveKind,
}

impl Move {
    #[inline(always)]
    pub const fn new(from: Bitboard, to: Bitboard, piece: PieceKind, kind: MoveKind) -> Self {
        Move {
            from,
            to,
            piece,
            kind,
        }
    }
}

// Square helpers

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
    Some((r - b'1') * 8 + (f - b'a'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        assert_eq!(coord_to_sq("a1"), Some(0));
        assert_eq!(coord_to_sq("h8"), Some(63));
        assert_eq!(coord_to_sq("e4"), Some(28));
        assert_eq!(sq_to_coord(28), "e4");
        assert_eq!(coord_to_sq("i1"), None);
        assert_eq!(coord_to_sq("a9"), None);
        assert_eq!(coord_to_sq("e"), None);
    }
}
