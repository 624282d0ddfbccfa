//! Attack geometry: masked directional shifts and precomputed attack tables.
//!
//! Every direction on the board is a signed bit offset plus an edge mask.
//! Shifting first clears the masked squares, so a piece standing where the
//! move would wrap around a board edge simply vanishes from the result. A
//! zero result therefore always means "walked off the board" and never a
//! phantom wrapped square.
//!
//! The tables are plain constants evaluated at compile time; nothing here
//! is ever mutated at runtime.

use crate::bitboard::Bitboard;
use crate::types::Color;

/// One board direction: a signed shift amount and the edge squares from
/// which that shift would wrap.
#[derive(Clone, Copy, Debug)]
pub struct Dir {
    pub shift: i8,
    pub mask: Bitboard,
}

/// Shift a bitboard one step along `dir`, dropping squares that would wrap.
#[inline(always)]
pub const fn shift(bb: Bitboard, dir: Dir) -> Bitboard {
    let b = bb.0 & !dir.mask.0;
    if dir.shift >= 0 {
        Bitboard(b << dir.shift as u32)
    } else {
        Bitboard(b >> (-(dir.shift as i32)) as u32)
    }
}

const fn dir(shift: i8, mask: u64) -> Dir {
    Dir {
        shift,
        mask: Bitboard(mask),
    }
}

const FILE_A: u64 = Bitboard::FILE_A.0;
const FILE_H: u64 = Bitboard::FILE_H.0;
const FILE_AB: u64 = Bitboard::FILE_AB.0;
const FILE_GH: u64 = Bitboard::FILE_GH.0;
const RANK_1: u64 = Bitboard::RANK_1.0;
const RANK_8: u64 = Bitboard::RANK_8.0;
const RANK_12: u64 = Bitboard::RANK_12.0;
const RANK_78: u64 = Bitboard::RANK_78.0;

/// The four diagonal directions (bishop rays).
pub const DIAGONAL: [Dir; 4] = [
    dir(-9, FILE_A | RANK_1),
    dir(-7, FILE_H | RANK_1),
    dir(7, FILE_A | RANK_8),
    dir(9, FILE_H | RANK_8),
];

/// The four orthogonal directions (rook rays).
pub const ORTHOGONAL: [Dir; 4] = [
    dir(-1, FILE_A),
    dir(1, FILE_H),
    dir(-8, RANK_1),
    dir(8, RANK_8),
];

/// All eight directions, diagonals first. `is_square_attacked` relies on
/// the first four entries being the diagonal ones.
pub const COMBINED: [Dir; 8] = [
    DIAGONAL[0],
    DIAGONAL[1],
    DIAGONAL[2],
    DIAGONAL[3],
    ORTHOGONAL[0],
    ORTHOGONAL[1],
    ORTHOGONAL[2],
    ORTHOGONAL[3],
];

/// The eight knight jumps. Compound masks exclude both the rank band and
/// the file band a jump would wrap across.
pub const KNIGHT: [Dir; 8] = [
    dir(-17, RANK_12 | FILE_A),
    dir(-15, RANK_12 | FILE_H),
    dir(-6, RANK_1 | FILE_GH),
    dir(10, RANK_8 | FILE_GH),
    dir(17, RANK_78 | FILE_H),
    dir(15, RANK_78 | FILE_A),
    dir(6, RANK_8 | FILE_AB),
    dir(-10, RANK_1 | FILE_AB),
];

const WHITE_PAWN_CAPTURES: [Dir; 2] = [dir(7, FILE_A | RANK_8), dir(9, FILE_H | RANK_8)];
const BLACK_PAWN_CAPTURES: [Dir; 2] = [dir(-9, FILE_A | RANK_1), dir(-7, FILE_H | RANK_1)];

const WHITE_PAWN_PUSH: Dir = dir(8, RANK_8);
const BLACK_PAWN_PUSH: Dir = dir(-8, RANK_1);

const WHITE_PAWN_DOUBLE: Dir = dir(16, RANK_78);
const BLACK_PAWN_DOUBLE: Dir = dir(-16, RANK_12);

/// Forward-diagonal capture directions for pawns of `color`.
#[inline(always)]
pub const fn pawn_captures(color: Color) -> &'static [Dir; 2] {
    match color {
        Color::White => &WHITE_PAWN_CAPTURES,
        Color::Black => &BLACK_PAWN_CAPTURES,
    }
}

/// Single-step advance direction for pawns of `color`.
#[inline(always)]
pub const fn pawn_push(color: Color) -> Dir {
    match color {
        Color::White => WHITE_PAWN_PUSH,
        Color::Black => BLACK_PAWN_PUSH,
    }
}

/// Two-step advance direction for pawns of `color`.
#[inline(always)]
pub const fn pawn_double_push(color: Color) -> Dir {
    match color {
        Color::White => WHITE_PAWN_DOUBLE,
        Color::Black => BLACK_PAWN_DOUBLE,
    }
}

/// Pre-computed king reach for each square.
pub static KING_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = Bitboard::from_square(sq);
        let mut result = Bitboard::EMPTY;
        let mut i = 0;
        while i < COMBINED.len() {
            result = Bitboard(result.0 | shift(bb, COMBINED[i]).0);
            i += 1;
        }
        attacks[sq as usize] = result;
        sq += 1;
    }
    attacks
};

/// Pre-computed knight reach for each square.
pub static KNIGHT_ATTACKS: [Bitboard; 64] = {
    let mut attacks = [Bitboard::EMPTY; 64];
    let mut sq = 0u8;
    while sq < 64 {
        let bb = Bitboard::from_square(sq);
        let mut result = Bitboard::EMPTY;
        let mut i = 0;
        while i < KNIGHT.len() {
            result = Bitboard(result.0 | shift(bb, KNIGHT[i]).0);
            i += 1;
        }
        attacks[sq as usize] = result;
        sq += 1;
    }
    attacks
};

/// Pre-computed pawn capture reach, indexed `[color][square]`.
pub static PAWN_ATTACKS: [[Bitboard; 64]; 2] = {
    let mut attacks = [[Bitboard::EMPTY; 64]; 2];
    let mut color = 0;
    while color < 2 {
        let dirs = if color == 0 {
            &WHITE_PAWN_CAPTURES
        } else {
            &BLACK_PAWN_CAPTURES
        };
        let mut sq = 0u8;
        while sq < 64 {
            let bb = Bitboard::from_square(sq);
            attacks[color][sq as usize] = Bitboard(shift(bb, dirs[0]).0 | shift(bb, dirs[1]).0);
            sq += 1;
        }
        color += 1;
    }
    attacks
};

#[inline(always)]
pub fn king_attacks(sq: u8) -> Bitboard {
    KING_ATTACKS[sq as usize]
}

#[inline(always)]
pub fn knight_attacks(sq: u8) -> Bitboard {
    KNIGHT_ATTACKS[sq as usize]
}

/// Squares a pawn of `color` standing on `sq` would attack.
#[inline(always)]
pub fn pawn_attacks(sq: u8, color: Color) -> Bitboard {
    PAWN_ATTACKS[color.idx()][sq as usize]
}

#[cfg(test)]
#[path = "attacks_tests.rs"]
mod attacks_tests;
