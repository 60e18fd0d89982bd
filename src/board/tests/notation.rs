//! Notation rendering tests: SAN, FAN, LAN, RAN, UCI.

use crate::board::{Move, MoveNotation, Position, Square};

fn notate(fen: &str, uci: &str, style: MoveNotation) -> String {
    let pos = Position::from_fen(fen).unwrap();
    let m = pos.parse_uci_move(uci).unwrap();
    pos.to_notation(m, style)
}

#[test]
fn test_san_file_disambiguation() {
    let fen = "8/6k1/8/8/8/8/1K1N1N2/8 w - - 0 1";
    assert_eq!(notate(fen, "d2e4", MoveNotation::San), "Nde4");
    assert_eq!(notate(fen, "f2e4", MoveNotation::San), "Nfe4");
}

#[test]
fn test_san_rank_disambiguation() {
    let fen = "8/6k1/8/8/3N4/8/1K1N4/8 w - - 0 1";
    assert_eq!(notate(fen, "d2f3", MoveNotation::San), "N2f3");
    assert_eq!(notate(fen, "d4f3", MoveNotation::San), "N4f3");
}

#[test]
fn test_san_rook_disambiguation() {
    let fen = "5r1k/p6p/4r1n1/3NPp2/8/8/PP4RP/4R1K1 w - - 3 53";
    assert_eq!(notate(fen, "e1e2", MoveNotation::San), "Ree2");
    assert_eq!(notate(fen, "g2e2", MoveNotation::San), "Rge2");
}

#[test]
fn test_san_no_disambiguation_when_unique() {
    assert_eq!(
        notate(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "g1f3",
            MoveNotation::San
        ),
        "Nf3"
    );
}

#[test]
fn test_fan_uses_white_knight_glyph() {
    let fen = "8/6k1/8/8/8/8/1K1N1N2/8 w - - 0 1";
    assert_eq!(notate(fen, "d2e4", MoveNotation::Fan), "\u{2658}de4");
}

#[test]
fn test_fan_uses_black_glyphs() {
    let fen = "r3k3/8/8/8/8/8/8/4K3 b q - 0 1";
    assert_eq!(notate(fen, "a8a4", MoveNotation::Fan), "\u{265C}a4");
}

#[test]
fn test_pawn_moves_and_captures() {
    assert_eq!(
        notate(
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            "e2e4",
            MoveNotation::San
        ),
        "e4"
    );
    // pawn captures carry the origin file
    assert_eq!(
        notate(
            "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
            "e4d5",
            MoveNotation::San
        ),
        "exd5"
    );
}

#[test]
fn test_en_passant_renders_as_plain_capture() {
    // The "e.p." suffix is deliberately omitted.
    assert_eq!(
        notate(
            "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
            "e5f6",
            MoveNotation::San
        ),
        "exf6"
    );
}

#[test]
fn test_promotion_san() {
    let fen = "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1";
    assert_eq!(notate(fen, "g2h1q", MoveNotation::San), "gxh1=Q");
    assert_eq!(notate(fen, "g2g1q", MoveNotation::San), "g1=Q");
    // an underpromotion that forks the king gets its check mark
    assert_eq!(notate(fen, "g2g1n", MoveNotation::San), "g1=N+");
}

#[test]
fn test_castling_san() {
    let fen = "r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1";
    assert_eq!(notate(fen, "e1g1", MoveNotation::San), "O-O");
    assert_eq!(notate(fen, "e1c1", MoveNotation::San), "O-O-O");
}

#[test]
fn test_check_and_mate_suffixes() {
    // Back-rank mate
    assert_eq!(
        notate("6k1/5ppp/8/8/8/8/8/R3K3 w - - 0 1", "a1a8", MoveNotation::San),
        "Ra8#"
    );
    // Plain check
    assert_eq!(
        notate("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", "a1a8", MoveNotation::San),
        "Ra8+"
    );
}

#[test]
fn test_lan_and_ran() {
    let fen = "5r1k/p6p/4r1n1/3NPp2/8/8/PP4RP/4R1K1 w - - 3 53";
    assert_eq!(notate(fen, "e1e2", MoveNotation::Lan), "Re1-e2");
    assert_eq!(notate(fen, "d5f6", MoveNotation::Lan), "Nd5-f6");
    assert_eq!(notate(fen, "d5e7", MoveNotation::Lan), "Nd5-e7");

    let capture_fen = "rnbqkbnr/ppp1pppp/8/3p4/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2";
    assert_eq!(notate(capture_fen, "e4d5", MoveNotation::Lan), "e4xd5");
    assert_eq!(notate(capture_fen, "e4d5", MoveNotation::Ran), "e4xPd5");
}

#[test]
fn test_ran_names_captured_piece() {
    let fen = "5r1k/p6p/4r1n1/3NPp2/8/8/PP4RP/4R1K1 w - - 3 53";
    assert_eq!(notate(fen, "d5e6", MoveNotation::Ran), "Nd5xRe6");
}

#[test]
fn test_uci_rendering() {
    let pos = Position::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").unwrap();
    let castle = pos.parse_uci_move("e1g1").unwrap();
    // internally king-takes-rook, externally king-from/king-to
    assert_eq!(castle.to(), Square::H1);
    assert_eq!(pos.to_uci(castle), "e1g1");

    let promo_pos = Position::from_fen("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1").unwrap();
    let promo = promo_pos.parse_uci_move("g2h1q").unwrap();
    assert_eq!(promo_pos.to_uci(promo), "g2h1q");
}

#[test]
fn test_uci_chess960_castling_targets_rook() {
    // the g7 pawn shields g1 from the g8 rook
    let pos = Position::from_fen("1r1k2r1/6p1/8/8/8/8/8/1R1K2R1 w GBgb - 0 1").unwrap();
    let m = pos
        .generate_moves()
        .iter()
        .copied()
        .find(|m| m.kind() == crate::board::MoveKind::Castling && m.to() == Square::G1)
        .expect("kingside castling is available");
    assert_eq!(pos.to_uci(m), "d1g1");
}

#[test]
fn test_parse_uci_rejects() {
    let pos = Position::startpos();
    assert!(pos.parse_uci_move("e2").is_err());
    assert!(pos.parse_uci_move("z2e4").is_err());
    assert!(pos.parse_uci_move("e2e4x").is_err());
    assert!(pos.parse_uci_move("e2e5").is_err());
    assert!(pos.parse_uci_move("e7e5").is_err());
}

#[test]
fn test_notation_move_must_match_position() {
    // A move constructed by hand renders, but only legal moves parse.
    let pos = Position::startpos();
    assert!(pos.parse_uci_move("e1g1").is_err());
    let bogus = Move::castling(Square::E1, Square::G1);
    assert!(!pos.generate_moves().contains(bogus));
}
