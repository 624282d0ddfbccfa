//! Fixed-depth negamax search with alpha-beta pruning.

use crate::board::Position;
use crate::eval;
use crate::movegen;
use crate::types::Move;

/// Score magnitude for checkmate. Mates found earlier in the tree score
/// closer to this bound, so the search prefers the shortest forced mate.
pub const MATE_SCORE: i32 = 100_000;

/// Reusable search state: one move buffer per ply, so a whole search does
/// no per-node allocation after warm-up.
pub struct Searcher {
    layers: Vec<Vec<Move>>,
    nodes: u64,
}

impl Default for Searcher {
    fn default() -> Self {
        Searcher::new()
    }
}

impl Searcher {
    pub fn new() -> Self {
        Searcher {
            layers: Vec::new(),
            nodes: 0,
        }
    }

    /// Positions visited during the last `best_move` call.
    pub fn nodes(&self) -> u64 {
        self.nodes
    }

    /// Search `depth` plies and return the best root move with its score
    /// from the mover's point of view. `None` when `depth` is zero or the
    /// mover has no legal move (checkmate or stalemate at the root).
    ///
    /// The position is mutated during the search and fully restored before
    /// returning. Ties keep the first move in generation order, so the
    /// result is deterministic for a given position and depth.
    pub fn best_move(&mut self, pos: &mut Position, depth: u8) -> Option<(Move, i32)> {
        self.nodes = 0;
        if depth == 0 {
            return None;
        }

        self.layers.resize_with(depth as usize, Vec::new);
        let (root_buf, rest) = self.layers.split_first_mut()?;
        movegen::legal_moves_into(pos, root_buf);
        self.nodes += 1;

        let mut alpha = -MATE_SCORE;
        let beta = MATE_SCORE;
        let mut best_score = -MATE_SCORE - 1;
        let mut best = None;

        for mv in root_buf.iter().copied() {
            let undo = pos.make_move(mv);
            let score = -negamax(pos, rest, -beta, -alpha, 1, &mut self.nodes);
            pos.unmake_move(&undo);

            if score > best_score {
                best_score = score;
                best = Some(mv);
            }
            if score > alpha {
                alpha = score;
            }
        }

        best.map(|mv| (mv, best_score))
    }
}

/// One ply of negamax. `layers` holds the move buffers for the remaining
/// depth; an empty slice means the horizon, where the static evaluation
/// stands in for the subtree.
fn negamax(
    pos: &mut Position,
    layers: &mut [Vec<Move>],
    mut alpha: i32,
    beta: i32,
    ply: i32,
    nodes: &mut u64,
) -> i32 {
    *nodes += 1;

    let Some((buf, rest)) = layers.split_first_mut() else {
        return eval::evaluate(pos);
    };

    movegen::legal_moves_into(pos, buf);
    if buf.is_empty() {
        // No legal moves: checkmate scores worse the longer it takes,
        // stalemate is a dead draw regardless of material.
        return if pos.in_check(pos.side_to_move()) {
            -(MATE_SCORE - ply)
        } else {
            0
        };
    }

    for mv in buf.iter().copied() {
        let undo = pos.make_move(mv);
        let score = -negamax(pos, rest, -beta, -alpha, ply + 1, nodes);
        pos.unmake_move(&undo);

        if score >= beta {
            return beta;
        }
        if score > alpha {
            alpha = score;
        }
    }

    alpha
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
