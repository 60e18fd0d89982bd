//! Bishop, rook and queen move generation.

use crate::board::attack_tables;
use crate::board::position::Position;
use crate::board::types::{Bitboard, Move, MoveList, PieceType};

impl Position {
    pub(super) fn generate_slider_moves(&self, list: &mut MoveList, target: Bitboard) {
        let us = self.side_to_move();
        let king_square = self.board.king_square(us);
        let pinned = self.pinned(us);
        let occupied = self.board.occupied();

        for piece_type in [PieceType::Bishop, PieceType::Rook, PieceType::Queen] {
            for &from in self.board.squares(us, piece_type) {
                let mut attacks = attack_tables::attacks(piece_type, from, occupied) & target;
                // A pinned slider may only move along the pin line.
                if pinned.contains(from) {
                    attacks &= attack_tables::line(from, king_square);
                }
                for to in attacks {
                    list.push(Move::new(from, to));
                }
            }
        }
    }
}
