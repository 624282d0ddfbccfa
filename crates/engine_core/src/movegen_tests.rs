use super::*;
use crate::types::coord_to_sq;

fn sq(coord: &str) -> Bitboard {
    Bitboard::from_square(coord_to_sq(coord).unwrap())
}

fn moves_from(pos: &Position, coord: &str) -> Vec<Move> {
    let from = sq(coord);
    legal_moves(pos).into_iter().filter(|m| m.from == from).collect()
}

#[test]
fn test_startpos_has_twenty_moves() {
    let moves = legal_moves(&Position::startpos());
    assert_eq!(moves.len(), 20);
    // 16 pawn moves, 4 knight moves, no castles yet.
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleShort));
    assert_eq!(
        moves.iter().filter(|m| m.piece == PieceKind::Knight).count(),
        4
    );
    assert_eq!(
        moves.iter().filter(|m| m.kind == MoveKind::PawnDoublePush).count(),
        8
    );
}

#[test]
fn test_kiwipete_has_forty_eight_moves() {
    let pos = Position::from_fen(
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq -",
    )
    .unwrap();
    let moves = legal_moves(&pos);
    assert_eq!(moves.len(), 48);
    assert!(moves
        .iter()
        .any(|m| m.kind == MoveKind::CastleShort && m.to == sq("g1")));
    assert!(moves
        .iter()
        .any(|m| m.kind == MoveKind::CastleLong && m.to == sq("c1")));
}

#[test]
fn test_endgame_position_has_fourteen_moves() {
    let pos = Position::from_fen("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1").unwrap();
    assert_eq!(legal_moves(&pos).len(), 14);
}

#[test]
fn test_generation_leaves_the_position_untouched() {
    let mut pos = Position::startpos();
    let before = pos.clone();
    let mut out = Vec::new();
    legal_moves_into(&mut pos, &mut out);
    assert_eq!(pos, before);
}

#[test]
fn test_pinned_piece_cannot_move() {
    // Knight on d2 is pinned along the file by the rook on d8.
    let pos = Position::from_fen("3r3k/8/8/8/8/8/3N4/3K4 w - - 0 1").unwrap();
    assert!(moves_from(&pos, "d2").is_empty());
}

#[test]
fn test_checks_must_be_answered() {
    // Rook gives check; only blocking, capturing, or stepping aside count.
    let pos = Position::from_fen("4r2k/8/8/8/8/8/3B4/4K3 w - - 0 1").unwrap();
    let moves = legal_moves(&pos);
    for m in &moves {
        assert!(
            m.piece == PieceKind::King || m.to == sq("e3") || m.to == sq("e8"),
            "move {m:?} does not address the check"
        );
    }
    // Bishop can interpose on e3.
    assert!(moves.iter().any(|m| m.from == sq("d2") && m.to == sq("e3")));
}

#[test]
fn test_promotion_fans_out_to_four_moves() {
    let pos = Position::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promotions = moves_from(&pos, "a7");
    assert_eq!(promotions.len(), 4);
    for promoted in [
        PieceKind::Queen,
        PieceKind::Rook,
        PieceKind::Bishop,
        PieceKind::Knight,
    ] {
        assert!(promotions
            .iter()
            .any(|m| m.kind == MoveKind::Promotion(promoted)));
    }
    // Never a bare pawn push onto the back rank.
    assert!(promotions.iter().all(|m| m.kind != MoveKind::PawnPush));
}

#[test]
fn test_capture_promotion_also_fans_out() {
    let pos = Position::from_fen("1r2k3/P7/8/8/8/8/8/4K3 w - - 0 1").unwrap();
    let promotions = moves_from(&pos, "a7");
    // Four promotions straight ahead plus four capturing on b8.
    assert_eq!(promotions.len(), 8);
    assert_eq!(promotions.iter().filter(|m| m.to == sq("b8")).count(), 4);
}

#[test]
fn test_double_push_only_from_the_start_rank() {
    // Pawn already on e3 gets a single step, nothing more.
    let pos = Position::from_fen("4k3/8/8/8/8/4P3/8/4K3 w - - 0 1").unwrap();
    let pushes = moves_from(&pos, "e3");
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].kind, MoveKind::PawnPush);
}

#[test]
fn test_blocked_transit_square_kills_both_pushes() {
    // Knight on e3 blocks the e2 pawn entirely; e4 being empty is moot.
    let pos = Position::from_fen("4k3/8/8/8/8/4n3/4P3/4K3 w - - 0 1").unwrap();
    assert!(moves_from(&pos, "e2").is_empty());

    // Blocker on e4 still allows the single step.
    let pos = Position::from_fen("4k3/8/8/8/4n3/8/4P3/4K3 w - - 0 1").unwrap();
    let pushes = moves_from(&pos, "e2");
    assert_eq!(pushes.len(), 1);
    assert_eq!(pushes[0].to, sq("e3"));
}

#[test]
fn test_en_passant_is_generated_only_while_armed() {
    let mut pos =
        Position::from_fen("rnbqkbnr/pppppppp/8/4P3/8/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1").unwrap();
    pos.make_move(Move::new(
        sq("d7"),
        sq("d5"),
        PieceKind::Pawn,
        MoveKind::PawnDoublePush,
    ));

    let armed = legal_moves(&pos);
    assert!(armed
        .iter()
        .any(|m| m.kind == MoveKind::EnPassant && m.from == sq("e5") && m.to == sq("d6")));

    // A quiet reply disarms it.
    pos.make_move(Move::new(
        sq("g1"),
        sq("f3"),
        PieceKind::Knight,
        MoveKind::Regular,
    ));
    pos.make_move(Move::new(
        sq("g8"),
        sq("f6"),
        PieceKind::Knight,
        MoveKind::Regular,
    ));
    let disarmed = legal_moves(&pos);
    assert!(disarmed.iter().all(|m| m.kind != MoveKind::EnPassant));
}

#[test]
fn test_en_passant_that_exposes_the_king_is_illegal() {
    // Capturing en passant would clear the rank and leave the king to the rook.
    let pos = Position::from_fen("8/8/8/KPp4r/8/8/8/4k3 w - c6 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| m.kind != MoveKind::EnPassant));
}

#[test]
fn test_castling_generated_when_path_is_clear() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleShort));
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleLong));
}

#[test]
fn test_no_castling_without_the_right() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w - - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleShort));
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleLong));
}

#[test]
fn test_no_castling_through_an_attacked_square() {
    // Black rook on f8 covers f1, the square the king crosses kingside.
    let pos = Position::from_fen("4kr2/8/8/8/8/8/8/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleShort));
    // Queenside path is untouched by that rook.
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleLong));
}

#[test]
fn test_no_castling_out_of_check() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/4r3/R3K2R w KQ - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleShort));
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleLong));
}

#[test]
fn test_no_castling_through_occupied_squares() {
    // Bishops still on f1/c8-style squares block the path even unattacked.
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3KB1R w KQkq - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().all(|m| m.kind != MoveKind::CastleShort));
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleLong));
}

#[test]
fn test_queenside_b_file_square_only_needs_to_be_empty() {
    // An attack on b1 does not forbid long castling; the king never
    // crosses b1.
    let pos = Position::from_fen("1r2k3/8/8/8/8/8/8/R3K3 w Q - 0 1").unwrap();
    let moves = legal_moves(&pos);
    assert!(moves.iter().any(|m| m.kind == MoveKind::CastleLong));
}
