//! Debug-build consistency checks.

use super::position::Position;
use super::types::{Bitboard, Color, PieceType};

impl Position {
    /// Verify that the mailbox, the bitboards, the piece lists and the
    /// incrementally-maintained keys all agree. Meant for tests and debug
    /// sessions; ordinary play never calls it.
    pub(crate) fn assert_state_consistent(&self) {
        let board = self.board();

        // Bitboards vs mailbox
        let mut union = Bitboard::EMPTY;
        for color in [Color::White, Color::Black] {
            let mut color_union = Bitboard::EMPTY;
            for piece_type in PieceType::ALL {
                let set = board.pieces(color, piece_type);
                assert!(
                    (color_union & set).is_empty(),
                    "piece sets overlap for {color}"
                );
                color_union |= set;

                let listed = board.squares(color, piece_type);
                assert_eq!(listed.len() as u32, set.popcount(), "list/count drift");
                for &sq in listed {
                    assert!(set.contains(sq), "square list drift at {sq}");
                }
            }
            assert_eq!(color_union, board.pieces_by_color(color));
            union |= color_union;
        }
        assert_eq!(union, board.occupied());

        for idx in 0..64 {
            let sq = super::types::Square::from_index(idx);
            match board.piece_on(sq) {
                Some(piece) => assert!(
                    board.pieces(piece.color(), piece.piece_type()).contains(sq),
                    "mailbox disagrees with bitboards at {sq}"
                ),
                None => assert!(!board.occupied().contains(sq)),
            }
        }

        // Structural invariants
        for color in [Color::White, Color::Black] {
            assert_eq!(board.count(color, PieceType::King), 1, "king count");
            assert!(board.count(color, PieceType::Pawn) <= 8, "pawn count");
            assert!(board.pieces_by_color(color).popcount() <= 16, "piece count");
        }
        assert!(
            (board.pieces_by_type(PieceType::Pawn) & (Bitboard::RANK_1 | Bitboard::RANK_8))
                .is_empty(),
            "pawn on back rank"
        );

        // Incremental keys vs recomputation
        let st = self.state();
        let (key, pawn_key, material_key) = self.compute_keys(st);
        assert_eq!(st.key, key, "position key drift");
        assert_eq!(st.pawn_key, pawn_key, "pawn key drift");
        assert_eq!(st.material_key, material_key, "material key drift");

        // Checkers vs attack query
        let us = self.side_to_move();
        let expected = self.attackers_to(board.king_square(us), board.occupied())
            & board.pieces_by_color(us.opponent());
        assert_eq!(st.checkers, expected, "checkers drift");
    }
}
