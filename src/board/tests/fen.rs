//! FEN parsing and emission tests.

use crate::board::{Color, FenError, Position, Square, START_FEN};

#[test]
fn test_startpos_round_trip() {
    let pos = Position::from_fen(START_FEN).unwrap();
    assert_eq!(pos.to_fen(), START_FEN);
}

#[test]
fn test_round_trip_various_positions() {
    for fen in [
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
        "5r1k/p6p/4r1n1/3NPp2/8/8/PP4RP/4R1K1 w - - 3 53",
        "8/6k1/8/8/8/8/1K1N1N2/8 w - - 0 1",
    ] {
        let pos = Position::from_fen(fen).unwrap();
        assert_eq!(pos.to_fen(), fen, "round trip failed");
        let reparsed = Position::from_fen(&pos.to_fen()).unwrap();
        assert_eq!(reparsed, pos);
        assert_eq!(reparsed.key(), pos.key());
    }
}

#[test]
fn test_counters_parsed() {
    let pos = Position::from_fen("5r1k/p6p/4r1n1/3NPp2/8/8/PP4RP/4R1K1 w - - 3 53").unwrap();
    assert_eq!(pos.halfmove_clock(), 3);
    assert_eq!(pos.fullmove_number(), 53);
    assert_eq!(pos.game_ply(), 104);
}

#[test]
fn test_counters_optional() {
    let pos = Position::from_fen("8/6k1/8/8/8/8/1K1N1N2/8 w - -").unwrap();
    assert_eq!(pos.halfmove_clock(), 0);
    assert_eq!(pos.fullmove_number(), 1);
}

#[test]
fn test_side_to_move_parsed() {
    let pos =
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
    assert_eq!(pos.side_to_move(), Color::Black);
}

#[test]
fn test_rejects_too_few_fields() {
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"),
        Err(FenError::TooFewFields { found: 2 })
    ));
}

#[test]
fn test_rejects_bad_rank_structure() {
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP w KQkq - 0 1"),
        Err(FenError::WrongRankCount { found: 7 })
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::BadRankWidth { .. })
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/ppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::BadRankWidth { .. })
    ));
}

#[test]
fn test_rejects_bad_characters() {
    assert!(matches!(
        Position::from_fen("rnbqxbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"),
        Err(FenError::InvalidPiece { char: 'x' })
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1"),
        Err(FenError::InvalidSideToMove { .. })
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w XQkq - 0 1"),
        Err(FenError::InvalidCastling { .. })
    ));
}

#[test]
fn test_rejects_impossible_material() {
    // no black king
    assert!(matches!(
        Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(FenError::KingCount {
            color: Color::Black,
            count: 0
        })
    ));
    // two white kings
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/2K1K3 w - - 0 1"),
        Err(FenError::KingCount {
            color: Color::White,
            count: 2
        })
    ));
    // pawn on rank 8
    assert!(matches!(
        Position::from_fen("P3k3/8/8/8/8/8/8/4K3 w - - 0 1"),
        Err(FenError::PawnOnBackRank)
    ));
    // nine pawns
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/P7/PPPPPPPP/4K3 w - - 0 1"),
        Err(FenError::TooManyPawns { .. })
    ));
    // seventeen pieces
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/NNNNNNNN/8/PPPPPPPP/4K3 w - - 0 1"),
        Err(FenError::TooManyPieces {
            color: Color::White,
            count: 17
        })
    ));
}

#[test]
fn test_rejects_bad_en_passant() {
    // not a square
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq z9 0 1"),
        Err(FenError::InvalidEnPassant { .. })
    ));
    // wrong rank for the side to move
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1"),
        Err(FenError::InvalidEnPassant { .. })
    ));
}

#[test]
fn test_uncapturable_en_passant_is_dropped() {
    // After 1. e4 the e3 square is unreachable for Black's pawns; the
    // library normalizes it away so keys and repetition tests agree.
    let pos = Position::from_fen("rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1")
        .unwrap();
    assert_eq!(pos.en_passant_square(), None);
    assert!(pos.to_fen().contains(" - "));
}

#[test]
fn test_rejects_bad_counters() {
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1"),
        Err(FenError::InvalidCounter { .. })
    ));
    assert!(matches!(
        Position::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - -1 1"),
        Err(FenError::InvalidCounter { .. })
    ));
}

#[test]
fn test_castling_rights_require_matching_pieces() {
    // rook missing from h1
    assert!(matches!(
        Position::from_fen("4k3/8/8/8/8/8/8/4K3 w K - 0 1"),
        Err(FenError::InvalidCastling { .. })
    ));
}

#[test]
fn test_chess960_castling_letters() {
    // Shredder-FEN: rooks named by file. King d1, rooks b1 and g1.
    let pos = Position::from_fen("1r1k2r1/8/8/8/8/8/8/1R1K2R1 w GBgb - 0 1").unwrap();
    assert!(pos.is_chess960());
    assert!(pos.castling_rights().has(Color::White, true));
    assert!(pos.castling_rights().has(Color::White, false));
    assert_eq!(pos.to_fen(), "1r1k2r1/8/8/8/8/8/8/1R1K2R1 w GBgb - 0 1");
}

#[test]
fn test_chess960_detected_from_layout() {
    // Standard letters but a non-standard royal layout still flips the
    // position into Chess960 mode.
    let pos = Position::from_fen("1r1k2r1/8/8/8/8/8/8/1R1K2R1 w KQkq - 0 1").unwrap();
    assert!(pos.is_chess960());
}

#[test]
fn test_from_str_impl() {
    let pos: Position = START_FEN.parse().unwrap();
    assert_eq!(pos, Position::startpos());
    assert!("garbage".parse::<Position>().is_err());
}

#[test]
fn test_display_is_fen() {
    let pos = Position::startpos();
    assert_eq!(pos.to_string(), START_FEN);
}

#[test]
fn test_parsed_position_is_consistent() {
    for fen in [
        START_FEN,
        "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    ] {
        Position::from_fen(fen).unwrap().assert_state_consistent();
    }
}

#[test]
fn test_ep_square_survives_round_trip_when_capturable() {
    let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
    let pos = Position::from_fen(fen).unwrap();
    assert_eq!(pos.en_passant_square(), Some(Square::F6));
    assert_eq!(pos.to_fen(), fen);
}
