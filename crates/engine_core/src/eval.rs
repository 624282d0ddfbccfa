//! Static evaluation: material count in centipawns.

use crate::board::Position;
use crate::types::{Color, PieceKind};

/// Centipawn value of one piece. Kings carry no material value; losing one
/// is expressed through mate scores, not evaluation.
const fn piece_value(kind: PieceKind) -> i32 {
    match kind {
        PieceKind::King => 0,
        PieceKind::Queen => 900,
        PieceKind::Rook => 500,
        PieceKind::Bishop => 330,
        PieceKind::Knight => 320,
        PieceKind::Pawn => 100,
    }
}

/// Material balance from the side to move's point of view. Positive means
/// the mover is ahead.
pub fn evaluate(pos: &Position) -> i32 {
    let mut score = 0;
    for kind in PieceKind::ALL {
        let value = piece_value(kind);
        score += value * pos.piece_bb(kind, Color::White).popcount() as i32;
        score -= value * pos.piece_bb(kind, Color::Black).popcount() as i32;
    }
    match pos.side_to_move() {
        Color::White => score,
        Color::Black => -score,
    }
}
