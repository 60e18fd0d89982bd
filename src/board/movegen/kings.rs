//! King move and castling generation.

use crate::board::attack_tables;
use crate::board::position::Position;
use crate::board::types::{Bitboard, CastlingRights, Move, MoveList};

impl Position {
    pub(super) fn generate_king_moves(&self, list: &mut MoveList, target: Bitboard) {
        let us = self.side_to_move();
        let them = us.opponent();
        let from = self.board.king_square(us);
        let enemies = self.board.pieces_by_color(them);

        // Lift the king off the board so a checking slider's ray extends
        // through his current square.
        let occupied = self.board.occupied() ^ from.bitboard();

        for to in attack_tables::king_attacks(from) & target {
            if (self.attackers_to(to, occupied) & enemies).is_empty() {
                list.push(Move::new(from, to));
            }
        }
    }

    /// Castling, encoded as king-takes-own-rook. Never called in check.
    pub(super) fn generate_castling_moves(&self, list: &mut MoveList) {
        let us = self.side_to_move();
        let rights = self.castling_rights();
        let occupied = self.board.occupied();
        let king_from = self.board.king_square(us);

        for kingside in [true, false] {
            if !rights.has(us, kingside) {
                continue;
            }
            let right = CastlingRights::index_for(us, kingside);
            let Some(rook_from) = self.castling_rook[right] else {
                continue;
            };
            if !(self.castling_path[right] & occupied).is_empty() {
                continue;
            }
            let m = Move::castling(king_from, rook_from);
            // `is_legal` walks the king's traversal squares and rejects a
            // pinned castling rook in Chess960.
            if self.is_legal(m) {
                list.push(m);
            }
        }
    }
}
