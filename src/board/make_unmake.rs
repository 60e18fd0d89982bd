//! Reversible state transitions: make/take move, null moves.

use crate::zobrist::ZOBRIST;

use super::attack_tables;
use super::position::{castle_destinations, Position};
use super::types::{Color, Move, MoveKind, Piece, PieceType, Square};

impl Position {
    /// Apply a legal move, pushing a fresh state onto the stack.
    ///
    /// The move must come from the generator (or have passed
    /// [`Position::is_legal`] on a pseudo-legal input); feeding an illegal
    /// move is a caller bug, caught by assertions in debug builds.
    pub fn make_move(&mut self, m: Move) {
        debug_assert!(m.is_valid(), "make_move given a null or degenerate move");
        let us = self.side_to_move;
        let them = us.opponent();
        let from = m.from();
        let to = m.to();
        debug_assert!(
            self.board.piece_on(from).is_some_and(|p| p.color() == us),
            "make_move origin does not hold a piece of the side to move"
        );

        // Carry the previous state forward, then update it field by field.
        let mut st = self.state().clone();
        st.captured = None;
        st.repetition = 0;
        st.rule50 += 1;
        st.plies_from_null += 1;

        let mut key = st.key ^ ZOBRIST.side_to_move;
        if let Some(ep) = st.en_passant.take() {
            key ^= ZOBRIST.en_passant_file(ep.file());
        }

        let piece = self
            .board
            .piece_on(from)
            .expect("checked above: origin is occupied");

        // Resolve and remove the captured piece, if any.
        let captured = match m.kind() {
            MoveKind::Castling => None,
            MoveKind::EnPassant => {
                let capsq = Square::make(to.file(), from.rank());
                Some((self.board.remove_piece(capsq), capsq))
            }
            _ => {
                if self.board.piece_on(to).is_some() {
                    Some((self.board.remove_piece(to), to))
                } else {
                    None
                }
            }
        };

        if let Some((cap, capsq)) = captured {
            debug_assert!(cap.piece_type() != PieceType::King, "king capture");
            key ^= ZOBRIST.psq(cap, capsq);
            if cap.piece_type() == PieceType::Pawn {
                st.pawn_key ^= ZOBRIST.psq(cap, capsq);
            }
            st.material_key ^=
                ZOBRIST.material(cap, self.board.count(cap.color(), cap.piece_type()));
            st.rule50 = 0;
            st.plies_from_null = 0;
            st.captured = Some(cap);
        }

        // Rights die when a move touches a king or rook home square.
        let lost = st.castling.as_u8()
            & (self.castling_masks[from.to_index()] | self.castling_masks[to.to_index()]);
        if lost != 0 {
            key ^= ZOBRIST.castling[st.castling.as_u8() as usize];
            st.castling.discard(lost);
            key ^= ZOBRIST.castling[st.castling.as_u8() as usize];
        }

        match m.kind() {
            MoveKind::Castling => {
                let (kto, rto) = self.do_castling(us, from, to);
                let king = Piece::new(us, PieceType::King);
                let rook = Piece::new(us, PieceType::Rook);
                key ^= ZOBRIST.psq(king, from)
                    ^ ZOBRIST.psq(king, kto)
                    ^ ZOBRIST.psq(rook, to)
                    ^ ZOBRIST.psq(rook, rto);
                st.plies_from_null = 0;
            }
            _ => {
                self.board.move_piece(from, to);
                key ^= ZOBRIST.psq(piece, from) ^ ZOBRIST.psq(piece, to);

                if piece.piece_type() == PieceType::Pawn {
                    st.pawn_key ^= ZOBRIST.psq(piece, from) ^ ZOBRIST.psq(piece, to);
                    st.rule50 = 0;
                    st.plies_from_null = 0;

                    if m.kind() == MoveKind::Promotion {
                        let promo = Piece::new(us, m.promotion_type());
                        self.board.remove_piece(to);
                        self.board.put_piece(promo, to);
                        key ^= ZOBRIST.psq(piece, to) ^ ZOBRIST.psq(promo, to);
                        st.pawn_key ^= ZOBRIST.psq(piece, to);
                        st.material_key ^= ZOBRIST
                            .material(piece, self.board.count(us, PieceType::Pawn))
                            ^ ZOBRIST.material(
                                promo,
                                self.board.count(us, m.promotion_type()) - 1,
                            );
                    } else if to.to_index() ^ from.to_index() == 16 {
                        // Double push: record the target square only when an
                        // enemy pawn could actually capture there.
                        let ep = Square::from_index((from.to_index() + to.to_index()) / 2);
                        let enemy_pawns = self.board.pieces(them, PieceType::Pawn);
                        if !(attack_tables::pawn_attacks(us, ep) & enemy_pawns).is_empty() {
                            st.en_passant = Some(ep);
                            key ^= ZOBRIST.en_passant_file(ep.file());
                        }
                    }
                }
            }
        }

        st.key = key;
        self.side_to_move = them;
        self.game_ply += 1;
        self.set_check_info(&mut st);

        // Walk back through the reversible tail in steps of two plies
        // looking for the same key.
        let end = st.rule50.min(st.plies_from_null) as usize;
        if end >= 4 {
            let n = self.states.len(); // slot the new state will occupy
            let mut i = 4;
            while i <= end {
                let prev = &self.states[n - i];
                if prev.key == key {
                    st.repetition = if prev.repetition != 0 {
                        -(i as i32)
                    } else {
                        i as i32
                    };
                    break;
                }
                i += 2;
            }
        }

        self.states.push(st);
    }

    /// Revert the last made move. Keys and counters are restored by popping
    /// the state record, not by recomputation.
    ///
    /// # Panics
    /// Panics if no move has been made (unbalanced undo stack).
    pub fn take_move(&mut self, m: Move) {
        assert!(
            self.states.len() > 1,
            "take_move without a matching make_move"
        );
        let st = self.states.pop().expect("checked above: stack is non-empty");
        let us = self.side_to_move.opponent();
        self.side_to_move = us;
        self.game_ply -= 1;

        let from = m.from();
        let to = m.to();

        match m.kind() {
            MoveKind::Castling => self.undo_castling(us, from, to),
            MoveKind::Promotion => {
                self.board.remove_piece(to);
                self.board
                    .put_piece(Piece::new(us, PieceType::Pawn), from);
            }
            _ => {
                self.board.move_piece(to, from);
            }
        }

        if let Some(cap) = st.captured {
            let capsq = if m.kind() == MoveKind::EnPassant {
                Square::make(to.file(), from.rank())
            } else {
                to
            };
            self.board.put_piece(cap, capsq);
        }
    }

    /// Pass the move: flip the side to move without touching the board.
    /// Illegal while in check.
    pub fn make_null_move(&mut self) {
        debug_assert!(!self.in_check(), "null move while in check");

        let mut st = self.state().clone();
        st.captured = None;
        st.repetition = 0;
        st.rule50 += 1;
        st.plies_from_null = 0;

        let mut key = st.key ^ ZOBRIST.side_to_move;
        if let Some(ep) = st.en_passant.take() {
            key ^= ZOBRIST.en_passant_file(ep.file());
        }
        st.key = key;

        self.side_to_move = self.side_to_move.opponent();
        self.game_ply += 1;
        self.set_check_info(&mut st);
        self.states.push(st);
    }

    /// Revert a null move.
    ///
    /// # Panics
    /// Panics if no move has been made (unbalanced undo stack).
    pub fn take_null_move(&mut self) {
        assert!(
            self.states.len() > 1,
            "take_null_move without a matching make_null_move"
        );
        self.states.pop();
        self.side_to_move = self.side_to_move.opponent();
        self.game_ply -= 1;
    }

    /// Move king and rook to their castled squares. Removing both pieces
    /// before placing either keeps the Chess960 overlap cases straight.
    fn do_castling(&mut self, us: Color, king_from: Square, rook_from: Square) -> (Square, Square) {
        let (king_to, rook_to) = castle_destinations(us, rook_from > king_from);
        self.board.remove_piece(king_from);
        self.board.remove_piece(rook_from);
        self.board.put_piece(Piece::new(us, PieceType::King), king_to);
        self.board.put_piece(Piece::new(us, PieceType::Rook), rook_to);
        (king_to, rook_to)
    }

    fn undo_castling(&mut self, us: Color, king_from: Square, rook_from: Square) {
        let (king_to, rook_to) = castle_destinations(us, rook_from > king_from);
        self.board.remove_piece(king_to);
        self.board.remove_piece(rook_to);
        self.board.put_piece(Piece::new(us, PieceType::King), king_from);
        self.board.put_piece(Piece::new(us, PieceType::Rook), rook_from);
    }
}
