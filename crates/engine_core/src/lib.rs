pub mod attacks;
pub mod bitboard;
pub mod board;
pub mod errors;
pub mod eval;
pub mod movegen;
pub mod perft;
pub mod search;
pub mod types;
pub mod uci;

// Re-export the types a front end actually touches.
pub use bitboard::Bitboard;
pub use board::Position;
pub use errors::EngineError;
pub use eval::evaluate;
pub use movegen::{legal_moves, legal_moves_into};
pub use perft::{perft, perft_divide};
pub use search::{Searcher, MATE_SCORE};
pub use types::{Color, Move, MoveKind, PieceKind, Wing};
pub use uci::{move_to_uci, parse_uci_move};
