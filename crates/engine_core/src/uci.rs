//! Long algebraic move notation, as used on the UCI wire: origin square,
//! destination square, and a promotion letter when there is one.

use crate::board::Position;
use crate::errors::EngineError;
use crate::movegen;
use crate::types::{Move, MoveKind, PieceKind};

/// Format a move as coordinate notation, e.g. `e2e4`, `e1g1`, `a7a8q`.
pub fn move_to_uci(mv: &Move) -> String {
    let from = mv.from.lsb().unwrap_or(0);
    let to = mv.to.lsb().unwrap_or(0);
    let mut out = format!(
        "{}{}",
        crate::types::sq_to_coord(from),
        crate::types::sq_to_coord(to)
    );
    if let MoveKind::Promotion(promoted) = mv.kind {
        out.push(match promoted {
            PieceKind::Queen => 'q',
            PieceKind::Rook => 'r',
            PieceKind::Bishop => 'b',
            PieceKind::Knight => 'n',
            _ => '?',
        });
    }
    out
}

/// Resolve coordinate notation against the position's legal moves. The
/// matched move carries the right kind (castle, en passant, promotion), so
/// the caller never has to classify the text itself. Text matching no
/// legal move is an error, never a silent no-op.
pub fn parse_uci_move(pos: &Position, text: &str) -> Result<Move, EngineError> {
    movegen::legal_moves(pos)
        .into_iter()
        .find(|mv| move_to_uci(mv) == text)
        .ok_or_else(|| EngineError::UnmatchedMove(text.to_string()))
}
