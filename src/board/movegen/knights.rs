//! Knight move generation.

use crate::board::attack_tables;
use crate::board::position::Position;
use crate::board::types::{Bitboard, Move, MoveList, PieceType};

impl Position {
    pub(super) fn generate_knight_moves(&self, list: &mut MoveList, target: Bitboard) {
        let us = self.side_to_move();
        let pinned = self.pinned(us);

        for &from in self.board.squares(us, PieceType::Knight) {
            // A pinned knight can never stay on its pin line.
            if pinned.contains(from) {
                continue;
            }
            for to in attack_tables::knight_attacks(from) & target {
                list.push(Move::new(from, to));
            }
        }
    }
}
