//! Legal move generation.
//!
//! The generator produces fully legal moves directly: check evasions are
//! driven by a target mask, pinned pieces are restricted to their pin line,
//! and king moves are validated against attacks computed with the king
//! lifted off the board. No make/unmake round trip is needed.

mod kings;
mod knights;
mod pawns;
mod sliders;

use super::attack_tables;
use super::position::Position;
use super::types::{Bitboard, MoveList};

impl Position {
    /// Generate every legal move exactly once. Order is unspecified but
    /// deterministic for a given position.
    #[must_use]
    pub fn generate_moves(&self) -> MoveList {
        let mut list = MoveList::new();
        self.generate_moves_into(&mut list);
        list
    }

    /// Generate into a caller-supplied buffer, appending to its contents.
    pub fn generate_moves_into(&self, list: &mut MoveList) {
        let us = self.side_to_move();
        let king_square = self.board.king_square(us);
        let checkers = self.checkers();
        let own = self.board.pieces_by_color(us);

        // In double check only the king may move.
        if checkers.more_than_one() {
            self.generate_king_moves(list, !own);
            return;
        }

        // With a single checker, non-king moves must capture it or block
        // its ray; otherwise anything off our own pieces is a candidate.
        let target = match checkers.lsb() {
            Some(checker) => attack_tables::between(king_square, checker) | checkers,
            None => !own,
        };

        self.generate_pawn_moves(list, target);
        self.generate_knight_moves(list, target);
        self.generate_slider_moves(list, target);
        self.generate_king_moves(list, !own);
        if checkers.is_empty() {
            self.generate_castling_moves(list);
        }
    }

    /// Mask helper shared by the piece generators: empty squares.
    #[inline]
    pub(crate) fn empty_squares(&self) -> Bitboard {
        !self.board.occupied()
    }
}
