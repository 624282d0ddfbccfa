//! Legal move generation.
//!
//! Moves are generated pseudo-legally per piece type, then every candidate
//! is filtered by speculatively applying it, asking whether the mover's own
//! king is attacked, and unmaking. Emission order is deterministic:
//! castles, king, queen, rook, bishop, knight, pawn.

use crate::attacks::{self, shift, Dir, COMBINED, DIAGONAL, KNIGHT, ORTHOGONAL};
use crate::bitboard::Bitboard;
use crate::board::{king_home, Position};
use crate::types::{Color, Move, MoveKind, PieceKind, Wing};

/// Generate all legal moves for the side to move, freshly allocated.
/// Clones the position once; callers in hot loops should prefer
/// [`legal_moves_into`].
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut out);
    out
}

/// Generate all legal moves into `out`, reusing its allocation. The
/// position is mutated and restored during legality filtering and is left
/// exactly as it was.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    let mover = pos.side_to_move();

    gen_castles(pos, mover, out);
    gen_steps(pos, mover, PieceKind::King, &COMBINED, out);
    gen_slider(pos, mover, PieceKind::Queen, &DIAGONAL, out);
    gen_slider(pos, mover, PieceKind::Queen, &ORTHOGONAL, out);
    gen_slider(pos, mover, PieceKind::Rook, &ORTHOGONAL, out);
    gen_slider(pos, mover, PieceKind::Bishop, &DIAGONAL, out);
    gen_steps(pos, mover, PieceKind::Knight, &KNIGHT, out);
    gen_pawns(pos, mover, out);
}

/// Apply `mv`, probe the mover's king, unmake. Keep the move only if the
/// king stayed safe. This is the dominant cost of generation.
#[inline]
fn leaves_king_safe(pos: &mut Position, mv: Move, mover: Color) -> bool {
    let undo = pos.make_move(mv);
    let safe = !pos.in_check(mover);
    pos.unmake_move(&undo);
    safe
}

/// Single-step movers: king (combined directions) and knight (jump table).
fn gen_steps(
    pos: &mut Position,
    mover: Color,
    piece: PieceKind,
    dirs: &[Dir],
    out: &mut Vec<Move>,
) {
    let mut from_set = pos.piece_bb(piece, mover);
    while let Some(sq) = from_set.pop_lsb() {
        let from = Bitboard::from_square(sq);
        for d in dirs {
            let to = shift(from, *d);
            if to.is_empty() || pos.is_occupied_by(to, mover) {
                continue;
            }
            let mv = Move::new(from, to, piece, MoveKind::Regular);
            if leaves_king_safe(pos, mv, mover) {
                out.push(mv);
            }
        }
    }
}

/// Sliding movers walk each direction one masked shift at a time: stop at
/// the board edge, stop before a friendly piece, stop after capturing.
fn gen_slider(
    pos: &mut Position,
    mover: Color,
    piece: PieceKind,
    dirs: &[Dir],
    out: &mut Vec<Move>,
) {
    let mut from_set = pos.piece_bb(piece, mover);
    while let Some(sq) = from_set.pop_lsb() {
        let from = Bitboard::from_square(sq);
        for d in dirs {
            let mut to = shift(from, *d);
            while to.any() {
                if pos.is_occupied_by(to, mover) {
                    break;
                }
                let capture = pos.is_occupied_by(to, mover.other());
                let mv = Move::new(from, to, piece, MoveKind::Regular);
                if leaves_king_safe(pos, mv, mover) {
                    out.push(mv);
                }
                if capture {
                    break;
                }
                to = shift(to, *d);
            }
        }
    }
}

fn gen_pawns(pos: &mut Position, mover: Color, out: &mut Vec<Move>) {
    let push = attacks::pawn_push(mover);
    let (start_rank, back_rank) = match mover {
        Color::White => (Bitboard::RANK_2, Bitboard::RANK_8),
        Color::Black => (Bitboard::RANK_7, Bitboard::RANK_1),
    };

    let mut from_set = pos.piece_bb(PieceKind::Pawn, mover);
    while let Some(sq) = from_set.pop_lsb() {
        let from = Bitboard::from_square(sq);

        // Forward-diagonal captures, including en passant.
        for d in attacks::pawn_captures(mover) {
            let to = shift(from, *d);
            if to.is_empty() || pos.is_occupied_by(to, mover) {
                continue;
            }
            let kind = if to == pos.en_passant_target() {
                MoveKind::EnPassant
            } else if pos.is_occupied_by(to, mover.other()) {
                MoveKind::PawnCapture
            } else {
                continue;
            };
            emit_pawn_move(pos, mover, from, to, kind, back_rank, out);
        }

        // Single push needs an empty destination. The double push is
        // nested inside it because the pawn rides through the single-push
        // square, so that emptiness check doubles as the transit check.
        let to = shift(from, push);
        if to.any() && !pos.is_occupied(to) {
            emit_pawn_move(pos, mover, from, to, MoveKind::PawnPush, back_rank, out);

            if from.intersects(start_rank) {
                let two = shift(from, attacks::pawn_double_push(mover));
                if two.any() && !pos.is_occupied(two) {
                    emit_pawn_move(pos, mover, from, two, MoveKind::PawnDoublePush, back_rank, out);
                }
            }
        }
    }
}

/// Push a pawn move, fanning out into the four promotion variants when the
/// destination is the back rank. A pawn move landing there is never
/// emitted as a plain push or capture.
fn emit_pawn_move(
    pos: &mut Position,
    mover: Color,
    from: Bitboard,
    to: Bitboard,
    kind: MoveKind,
    back_rank: Bitboard,
    out: &mut Vec<Move>,
) {
    if to.intersects(back_rank) {
        for promoted in [
            PieceKind::Queen,
            PieceKind::Rook,
            PieceKind::Bishop,
            PieceKind::Knight,
        ] {
            let mv = Move::new(from, to, PieceKind::Pawn, MoveKind::Promotion(promoted));
            if leaves_king_safe(pos, mv, mover) {
                out.push(mv);
            }
        }
    } else {
        let mv = Move::new(from, to, PieceKind::Pawn, kind);
        if leaves_king_safe(pos, mv, mover) {
            out.push(mv);
        }
    }
}

/// Castling: rights still held for king and rook home squares, the squares
/// between them empty, and none of the three squares the king stands on or
/// crosses attacked. The queen-side b-file square must be empty but is not
/// check-tested; the king never passes through it.
fn gen_castles(pos: &mut Position, mover: Color, out: &mut Vec<Move>) {
    let base = match mover {
        Color::White => 0u8,
        Color::Black => 56u8,
    };
    let sq = Bitboard::from_square;

    if pos.has_castling_right(mover, Wing::King) {
        let f = sq(base + 5);
        let g = sq(base + 6);
        if !pos.is_occupied(f)
            && !pos.is_occupied(g)
            && !pos.is_square_attacked(sq(base + 4), mover)
            && !pos.is_square_attacked(f, mover)
            && !pos.is_square_attacked(g, mover)
        {
            out.push(Move::new(
                king_home(mover),
                g,
                PieceKind::King,
                MoveKind::CastleShort,
            ));
        }
    }

    if pos.has_castling_right(mover, Wing::Queen) {
        let b = sq(base + 1);
        let c = sq(base + 2);
        let d = sq(base + 3);
        if !pos.is_occupied(b)
            && !pos.is_occupied(c)
            && !pos.is_occupied(d)
            && !pos.is_square_attacked(c, mover)
            && !pos.is_square_attacked(d, mover)
            && !pos.is_square_attacked(sq(base + 4), mover)
        {
            out.push(Move::new(
                king_home(mover),
                c,
                PieceKind::King,
                MoveKind::CastleLong,
            ));
        }
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
