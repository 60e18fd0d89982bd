//! Repetition detection: distance field, threefold, cuckoo probe.

use crate::board::Position;

fn play(pos: &mut Position, moves: &[&str]) {
    for uci in moves {
        let m = pos.parse_uci_move(uci).unwrap();
        pos.make_move(m);
    }
}

#[test]
fn test_no_repetition_at_start() {
    let pos = Position::startpos();
    assert!(!pos.is_repetition());
    assert!(!pos.has_upcoming_repetition());
}

#[test]
fn test_twofold_repetition_detected() {
    let mut pos = Position::startpos();
    // Knights out and back: the start position recurs after 4 plies.
    play(&mut pos, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(pos.is_repetition());
    assert!(!pos.is_threefold_repetition());
    assert_eq!(pos.state().repetition, 4);
}

#[test]
fn test_threefold_repetition_detected() {
    let mut pos = Position::startpos();
    play(
        &mut pos,
        &[
            "g1f3", "g8f6", "f3g1", "f6g8", // twofold
            "g1f3", "g8f6", "f3g1", "f6g8", // threefold
        ],
    );
    assert!(pos.is_threefold_repetition());
    assert!(pos.is_draw());
    assert_eq!(pos.state().repetition, -4);
}

#[test]
fn test_take_move_forgets_repetition() {
    let mut pos = Position::startpos();
    play(&mut pos, &["g1f3", "g8f6", "f3g1", "f6g8"]);
    assert!(pos.is_repetition());
    let m = pos.parse_uci_move("e2e4").unwrap();
    pos.make_move(m);
    assert!(!pos.is_repetition());
    pos.take_move(m);
    assert!(pos.is_repetition());
}

#[test]
fn test_pawn_move_breaks_repetition_scan() {
    let mut pos = Position::startpos();
    play(&mut pos, &["e2e4", "e7e5", "g1f3", "g8f6", "f3g1", "f6g8"]);
    // The pawn structure position after 1. e4 e5 recurs...
    assert!(pos.is_repetition());
    // ...but nothing before the pawn moves can.
    assert_eq!(pos.state().repetition, 4);
}

#[test]
fn test_upcoming_repetition_probe() {
    let mut pos = Position::startpos();
    // After Nf3 Nf6 Ng1 Black's Ng8 would repeat the start position: the
    // probe fires one ply before the repetition materializes.
    play(&mut pos, &["g1f3", "g8f6", "f3g1"]);
    assert!(!pos.is_repetition());
    assert!(pos.has_upcoming_repetition());
}

#[test]
fn test_upcoming_repetition_quiet_position() {
    let mut pos = Position::startpos();
    play(&mut pos, &["e2e4", "e7e5", "g1f3"]);
    assert!(!pos.has_upcoming_repetition());
}

#[test]
fn test_upcoming_repetition_via_slider_shuffle() {
    let mut pos = Position::from_fen("4k3/8/8/8/8/8/r7/R3K3 w - - 0 1").unwrap();
    // White's rook is back home; Black's ...Ra2 would restore the start.
    play(&mut pos, &["a1b1", "a2a3", "b1a1"]);
    assert!(!pos.is_repetition());
    assert!(pos.has_upcoming_repetition());
}

#[test]
fn test_fifty_move_clock_draw() {
    let pos = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 100 80").unwrap();
    assert!(pos.is_fifty_move_draw());
    assert!(pos.is_draw());

    let fresh = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 80").unwrap();
    assert!(!fresh.is_fifty_move_draw());
}

#[test]
fn test_mate_trumps_fifty_move_clock() {
    // Checkmated on the move the counter expires: mate wins, not a draw.
    let mated = Position::from_fen("R5k1/5ppp/8/8/8/8/8/6K1 b - - 100 90").unwrap();
    assert!(mated.in_check());
    assert!(mated.generate_moves().is_empty());
    assert!(!mated.is_fifty_move_draw());
}
