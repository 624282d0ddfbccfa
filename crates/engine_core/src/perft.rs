//! Perft: exhaustive leaf counts of the legal move tree, the ground truth
//! for move generator correctness.

use crate::board::Position;
use crate::movegen;
use crate::types::Move;

/// Count leaf nodes `depth` plies deep. Depth zero counts the position
/// itself, so `perft(pos, 0) == 1`.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut layers: Vec<Vec<Move>> = vec![Vec::new(); depth as usize];
    perft_layers(pos, &mut layers)
}

/// Leaf counts per root move, in generation order. The counts sum to
/// `perft(pos, depth)`.
pub fn perft_divide(pos: &mut Position, depth: u8) -> Vec<(Move, u64)> {
    if depth == 0 {
        return Vec::new();
    }
    let mut root = Vec::new();
    movegen::legal_moves_into(pos, &mut root);
    let mut layers: Vec<Vec<Move>> = vec![Vec::new(); depth as usize - 1];

    root.into_iter()
        .map(|mv| {
            let undo = pos.make_move(mv);
            let nodes = perft_layers(pos, &mut layers);
            pos.unmake_move(&undo);
            (mv, nodes)
        })
        .collect()
}

/// The recursion reuses one move buffer per remaining ply instead of
/// allocating per node. At the last layer the move count itself is the
/// answer; nothing below it is made or unmade.
fn perft_layers(pos: &mut Position, layers: &mut [Vec<Move>]) -> u64 {
    let Some((buf, rest)) = layers.split_first_mut() else {
        return 1;
    };

    movegen::legal_moves_into(pos, buf);
    if rest.is_empty() {
        return buf.len() as u64;
    }

    let mut nodes = 0;
    for mv in buf.iter().copied() {
        let undo = pos.make_move(mv);
        nodes += perft_layers(pos, rest);
        pos.unmake_move(&undo);
    }
    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_startpos_shallow() {
        let mut pos = Position::startpos();
        assert_eq!(perft(&mut pos, 0), 1);
        assert_eq!(perft(&mut pos, 1), 20);
        assert_eq!(perft(&mut pos, 2), 400);
        assert_eq!(perft(&mut pos, 3), 8_902);
    }

    #[test]
    fn test_divide_sums_to_perft() {
        let mut pos = Position::startpos();
        let divided = perft_divide(&mut pos, 3);
        assert_eq!(divided.len(), 20);
        let total: u64 = divided.iter().map(|(_, n)| n).sum();
        assert_eq!(total, 8_902);
    }

    #[test]
    fn test_divide_depth_one_counts_each_move_once() {
        let mut pos = Position::startpos();
        let divided = perft_divide(&mut pos, 1);
        assert_eq!(divided.len(), 20);
        assert!(divided.iter().all(|(_, n)| *n == 1));
    }

    #[test]
    fn test_perft_leaves_the_position_untouched() {
        let mut pos = Position::startpos();
        let before = pos.clone();
        perft(&mut pos, 3);
        perft_divide(&mut pos, 2);
        assert_eq!(pos, before);
    }
}
