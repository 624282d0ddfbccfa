//! Bitboard position: piece sets, castling/en-passant state, make/unmake,
//! and square attack detection.

use std::fmt;

use crate::attacks::{self, shift, COMBINED};
use crate::bitboard::Bitboard;
use crate::errors::EngineError;
use crate::types::{coord_to_sq, Color, Move, MoveKind, PieceKind, Wing};

const A1: Bitboard = Bitboard::from_square(0);
const D1: Bitboard = Bitboard::from_square(3);
const E1: Bitboard = Bitboard::from_square(4);
const F1: Bitboard = Bitboard::from_square(5);
const H1: Bitboard = Bitboard::from_square(7);
const A8: Bitboard = Bitboard::from_square(56);
const D8: Bitboard = Bitboard::from_square(59);
const E8: Bitboard = Bitboard::from_square(60);
const F8: Bitboard = Bitboard::from_square(61);
const H8: Bitboard = Bitboard::from_square(63);

/// Everything needed to reverse one applied move. Strictly LIFO: an `Undo`
/// is consumed by the matching `unmake_move` and never outlives it.
#[derive(Clone, Debug)]
pub struct Undo {
    castling_rights: Bitboard,
    en_passant: Bitboard,
    from: Bitboard,
    to: Bitboard,
    piece: PieceKind,
    captured: Option<PieceKind>,
    kind: MoveKind,
}

/// The board state. A plain aggregate of fixed-size bitboard arrays, so
/// clones stay cheap even though the hot paths never clone.
///
/// Invariants: no two of the twelve piece sets share a square, each side
/// has exactly one king, and `en_passant` holds at most one bit (the square
/// a double push just passed over).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pieces: [[Bitboard; 6]; 2],
    side_to_move: Color,
    en_passant: Bitboard,
    /// King/rook home squares whose piece has never moved. Castling
    /// eligibility is a membership test, not a counter.
    castling_rights: Bitboard,
}

impl Default for Position {
    fn default() -> Self {
        Position::startpos()
    }
}

impl Position {
    /// The standard starting layout.
    pub fn startpos() -> Self {
        let white = [
            E1,                                       // king
            D1,                                       // queen
            A1 | H1,                                  // rooks
            Bitboard::from_square(2) | F1,            // bishops
            Bitboard::from_square(1) | Bitboard::from_square(6), // knights
            Bitboard::RANK_2,                         // pawns
        ];
        let black = [
            E8,
            D8,
            A8 | H8,
            Bitboard::from_square(58) | F8,
            Bitboard::from_square(57) | Bitboard::from_square(62),
            Bitboard::RANK_7,
        ];
        Position {
            pieces: [white, black],
            side_to_move: Color::White,
            en_passant: Bitboard::EMPTY,
            castling_rights: E1 | A1 | H1 | E8 | A8 | H8,
        }
    }

    /// Parse a FEN position description. Validates fully before returning,
    /// so a failed parse leaves no half-built position behind.
    pub fn from_fen(fen: &str) -> Result<Self, EngineError> {
        let invalid = |reason: &str| EngineError::InvalidFen(reason.to_string());

        let fields: Vec<&str> = fen.split_whitespace().collect();
        if fields.len() < 4 {
            return Err(invalid("expected at least 4 fields"));
        }

        let mut pieces = [[Bitboard::EMPTY; 6]; 2];
        let ranks: Vec<&str> = fields[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(invalid("board section must have 8 ranks"));
        }
        for (rank_idx, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - rank_idx as u8; // FEN lists rank 8 first
            let mut file = 0u8;
            for ch in rank_str.chars() {
                if let Some(d) = ch.to_digit(10) {
                    if d == 0 || d > 8 {
                        return Err(invalid("bad empty-square count"));
                    }
                    file += d as u8;
                } else {
                    if file >= 8 {
                        return Err(invalid("too many files in rank"));
                    }
                    let color = if ch.is_ascii_uppercase() {
                        Color::White
                    } else {
                        Color::Black
                    };
                    let kind = match ch.to_ascii_lowercase() {
                        'k' => PieceKind::King,
                        'q' => PieceKind::Queen,
                        'r' => PieceKind::Rook,
                        'b' => PieceKind::Bishop,
                        'n' => PieceKind::Knight,
                        'p' => PieceKind::Pawn,
                        _ => return Err(invalid("unrecognized piece letter")),
                    };
                    pieces[color.idx()][kind.idx()] |=
                        Bitboard::from_square(rank * 8 + file);
                    file += 1;
                }
                if file > 8 {
                    return Err(invalid("rank does not sum to 8 files"));
                }
            }
            if file != 8 {
                return Err(invalid("rank does not sum to 8 files"));
            }
        }

        let side_to_move = match fields[1] {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(invalid("side to move must be 'w' or 'b'")),
        };

        let mut castling_rights = Bitboard::EMPTY;
        if fields[2] != "-" {
            for c in fields[2].chars() {
                castling_rights |= match c {
                    'K' => E1 | H1,
                    'Q' => E1 | A1,
                    'k' => E8 | H8,
                    'q' => E8 | A8,
                    _ => return Err(invalid("bad castling field")),
                };
            }
        }

        let en_passant = if fields[3] == "-" {
            Bitboard::EMPTY
        } else {
            let sq = coord_to_sq(fields[3]).ok_or_else(|| invalid("bad en-passant square"))?;
            Bitboard::from_square(sq)
        };

        // Move clocks are accepted for compatibility and discarded; the
        // position model carries no draw counters.
        for field in fields.iter().skip(4).take(2) {
            field
                .parse::<u32>()
                .map_err(|_| invalid("bad move counter"))?;
        }

        for color in [Color::White, Color::Black] {
            if pieces[color.idx()][PieceKind::King.idx()].popcount() != 1 {
                return Err(invalid("each side needs exactly one king"));
            }
        }

        Ok(Position {
            pieces,
            side_to_move,
            en_passant,
            castling_rights,
        })
    }

    // Queries

    #[inline(always)]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline(always)]
    pub fn en_passant_target(&self) -> Bitboard {
        self.en_passant
    }

    #[inline(always)]
    pub fn piece_bb(&self, kind: PieceKind, color: Color) -> Bitboard {
        self.pieces[color.idx()][kind.idx()]
    }

    /// All squares occupied by `color`.
    #[inline]
    pub fn occupied(&self, color: Color) -> Bitboard {
        let side = &self.pieces[color.idx()];
        side[0] | side[1] | side[2] | side[3] | side[4] | side[5]
    }

    #[inline(always)]
    pub fn is_occupied_by(&self, square: Bitboard, color: Color) -> bool {
        self.occupied(color).intersects(square)
    }

    #[inline(always)]
    pub fn is_occupied(&self, square: Bitboard) -> bool {
        self.is_occupied_by(square, Color::White) || self.is_occupied_by(square, Color::Black)
    }

    /// Which piece of `color` sits on `square`, if any. A six-board scan;
    /// fine for inspection, not meant for hot paths.
    fn piece_kind_at(&self, square: Bitboard, color: Color) -> Option<PieceKind> {
        for kind in PieceKind::ALL {
            if self.pieces[color.idx()][kind.idx()].intersects(square) {
                return Some(kind);
            }
        }
        None
    }

    /// Occupant of a square index, for rendering and inspection.
    pub fn piece_at(&self, sq: u8) -> Option<(Color, PieceKind)> {
        let bb = Bitboard::from_square(sq);
        for color in [Color::White, Color::Black] {
            if let Some(kind) = self.piece_kind_at(bb, color) {
                return Some((color, kind));
            }
        }
        None
    }

    /// True if both the king's and the given wing rook's home squares are
    /// still marked never-moved.
    pub fn has_castling_right(&self, color: Color, wing: Wing) -> bool {
        let king = king_home(color);
        let rook = rook_home(color, wing);
        self.castling_rights.intersects(king) && self.castling_rights.intersects(rook)
    }

    // Mutation

    /// Apply `mv`, returning the record needed to reverse it.
    pub fn make_move(&mut self, mv: Move) -> Undo {
        let mover = self.side_to_move;
        let mut undo = Undo {
            castling_rights: self.castling_rights,
            en_passant: self.en_passant,
            from: mv.from,
            to: mv.to,
            piece: mv.piece,
            captured: None,
            kind: mv.kind,
        };

        // Touching either square forfeits any castling that runs through it.
        // This also covers a rook being captured on its home square.
        self.castling_rights &= !(mv.from | mv.to);

        self.pieces[mover.idx()][mv.piece.idx()].toggle(mv.from);
        self.en_passant = Bitboard::EMPTY;

        match mv.kind {
            MoveKind::PawnDoublePush => {
                // Arm the square the pawn skipped; the push lands on an
                // empty square, so no capture scan is needed.
                self.en_passant = behind(mv.to, mover);
                self.pieces[mover.idx()][PieceKind::Pawn.idx()].toggle(mv.to);
                self.side_to_move = mover.other();
                return undo;
            }
            MoveKind::CastleShort | MoveKind::CastleLong => {
                // Castling never captures. The rook relocation is implied by
                // the move kind; `to` is the king's destination.
                self.pieces[mover.idx()][PieceKind::King.idx()].toggle(mv.to);
                self.pieces[mover.idx()][PieceKind::Rook.idx()]
                    .toggle(rook_castle_squares(mover, mv.kind));
                self.side_to_move = mover.other();
                return undo;
            }
            MoveKind::EnPassant => {
                // The captured pawn is one rank behind the destination, not
                // on it.
                self.pieces[mover.idx()][PieceKind::Pawn.idx()].toggle(mv.to);
                self.pieces[mover.other().idx()][PieceKind::Pawn.idx()]
                    .toggle(behind(mv.to, mover));
                undo.captured = Some(PieceKind::Pawn);
                self.side_to_move = mover.other();
                return undo;
            }
            MoveKind::Promotion(promoted) => {
                // The pawn left `from`; the promoted piece lands on `to`.
                self.pieces[mover.idx()][promoted.idx()].toggle(mv.to);
            }
            _ => {
                self.pieces[mover.idx()][mv.piece.idx()].toggle(mv.to);
            }
        }

        let enemy = mover.other();
        for kind in PieceKind::ALL {
            if self.pieces[enemy.idx()][kind.idx()].intersects(mv.to) {
                self.pieces[enemy.idx()][kind.idx()].toggle(mv.to);
                undo.captured = Some(kind);
                break;
            }
        }

        self.side_to_move = enemy;
        undo
    }

    /// Exactly reverse the move recorded in `undo`.
    pub fn unmake_move(&mut self, undo: &Undo) {
        // Flip back first so "who moved" is known again.
        self.side_to_move = self.side_to_move.other();
        let mover = self.side_to_move;

        self.castling_rights = undo.castling_rights;
        self.en_passant = undo.en_passant;

        self.pieces[mover.idx()][undo.piece.idx()].toggle(undo.from);
        match undo.kind {
            MoveKind::Promotion(promoted) => {
                self.pieces[mover.idx()][promoted.idx()].toggle(undo.to);
            }
            MoveKind::CastleShort | MoveKind::CastleLong => {
                self.pieces[mover.idx()][PieceKind::King.idx()].toggle(undo.to);
                self.pieces[mover.idx()][PieceKind::Rook.idx()]
                    .toggle(rook_castle_squares(mover, undo.kind));
            }
            _ => {
                self.pieces[mover.idx()][undo.piece.idx()].toggle(undo.to);
            }
        }

        if let Some(captured) = undo.captured {
            let square = if undo.kind == MoveKind::EnPassant {
                behind(undo.to, mover)
            } else {
                undo.to
            };
            self.pieces[mover.other().idx()][captured.idx()].toggle(square);
        }
    }

    // Check detection

    /// Is `target` (where a king of `defender` stands or would stand)
    /// attacked by the opposing color?
    ///
    /// Walks the eight directions outward with masked shifts (a zero shift
    /// result means the board edge), stopping at the first occupied square:
    /// a defender piece blocks, an attacker piece threatens only if its
    /// type matches the direction (bishop/queen diagonally, rook/queen
    /// orthogonally, king on the first step). Pawns and knights are then
    /// checked against their precomputed reach tables.
    pub fn is_square_attacked(&self, target: Bitboard, defender: Color) -> bool {
        debug_assert_eq!(target.popcount(), 1, "attack probe wants a single square");
        let attacker = defender.other();
        let own = self.occupied(defender);

        for (i, d) in COMBINED.iter().enumerate() {
            let diagonal = i < 4;
            let mut square = shift(target, *d);
            let mut first_step = true;
            while square.any() {
                if own.intersects(square) {
                    break;
                }
                if let Some(kind) = self.piece_kind_at(square, attacker) {
                    let threatens = match kind {
                        PieceKind::Queen => true,
                        PieceKind::Bishop => diagonal,
                        PieceKind::Rook => !diagonal,
                        PieceKind::King => first_step,
                        _ => false,
                    };
                    if threatens {
                        return true;
                    }
                    break;
                }
                first_step = false;
                square = shift(square, *d);
            }
        }

        let tsq = match target.lsb() {
            Some(s) => s,
            None => return false,
        };
        if attacks::pawn_attacks(tsq, defender)
            .intersects(self.pieces[attacker.idx()][PieceKind::Pawn.idx()])
        {
            return true;
        }
        if attacks::knight_attacks(tsq)
            .intersects(self.pieces[attacker.idx()][PieceKind::Knight.idx()])
        {
            return true;
        }
        false
    }

    /// Is `color`'s king currently attacked? A missing king means the
    /// position is corrupted; that is a programmer error, not an input
    /// error.
    pub fn in_check(&self, color: Color) -> bool {
        let king = self.pieces[color.idx()][PieceKind::King.idx()];
        debug_assert!(king.any(), "no {color:?} king on the board");
        if king.is_empty() {
            return false;
        }
        self.is_square_attacked(king, color)
    }
}

/// One rank behind `square` from `color`'s point of view. For a double
/// push this is the square passed over; for an en-passant capture it is
/// where the captured pawn actually stands.
#[inline(always)]
fn behind(square: Bitboard, color: Color) -> Bitboard {
    match color {
        Color::White => Bitboard(square.0 >> 8),
        Color::Black => Bitboard(square.0 << 8),
    }
}

pub(crate) fn king_home(color: Color) -> Bitboard {
    match color {
        Color::White => E1,
        Color::Black => E8,
    }
}

pub(crate) fn rook_home(color: Color, wing: Wing) -> Bitboard {
    match (color, wing) {
        (Color::White, Wing::King) => H1,
        (Color::White, Wing::Queen) => A1,
        (Color::Black, Wing::King) => H8,
        (Color::Black, Wing::Queen) => A8,
    }
}

/// The rook's origin and destination for a castle, as one XOR mask.
fn rook_castle_squares(color: Color, kind: MoveKind) -> Bitboard {
    match (color, kind) {
        (Color::White, MoveKind::CastleShort) => H1 | F1,
        (Color::White, MoveKind::CastleLong) => A1 | D1,
        (Color::Black, MoveKind::CastleShort) => H8 | F8,
        (Color::Black, MoveKind::CastleLong) => A8 | D8,
        _ => unreachable!("not a castle"),
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let ch = match self.piece_at(rank * 8 + file) {
                    Some((color, kind)) => {
                        let c = match kind {
                            PieceKind::King => 'k',
                            PieceKind::Queen => 'q',
                            PieceKind::Rook => 'r',
                            PieceKind::Bishop => 'b',
                            PieceKind::Knight => 'n',
                            PieceKind::Pawn => 'p',
                        };
                        if color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        }
                    }
                    None => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(
            f,
            "{} to move",
            match self.side_to_move {
                Color::White => "white",
                Color::Black => "black",
            }
        )
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
