//! Pawn move generation: pushes, captures, promotions, en passant.

use crate::board::attack_tables;
use crate::board::position::Position;
use crate::board::types::{
    Bitboard, Color, Direction, Move, MoveList, PieceType, Square, PROMOTION_PIECES,
};

impl Position {
    pub(super) fn generate_pawn_moves(&self, list: &mut MoveList, target: Bitboard) {
        let us = self.side_to_move();
        let them = us.opponent();
        let king_square = self.board.king_square(us);
        let pinned = self.pinned(us);
        let pawns = self.board.pieces(us, PieceType::Pawn);
        let enemies = self.board.pieces_by_color(them);
        let empty = self.empty_squares();

        let up = Direction::forward(us);
        let (seventh_rank, third_rank, capture_dirs) = match us {
            Color::White => (
                Bitboard::RANK_7,
                Bitboard::RANK_3,
                [Direction::NorthWest, Direction::NorthEast],
            ),
            Color::Black => (
                Bitboard::RANK_2,
                Bitboard::RANK_6,
                [Direction::SouthWest, Direction::SouthEast],
            ),
        };

        let promoting = pawns & seventh_rank;
        let quiet_pawns = pawns & !seventh_rank;

        // Pin filter shared by every pawn move.
        let push_checked = |list: &mut MoveList, from: Square, to: Square, promote: bool| {
            if !pinned.contains(from) || attack_tables::aligned(from, to, king_square) {
                if promote {
                    for piece_type in PROMOTION_PIECES {
                        list.push(Move::promotion(from, to, piece_type));
                    }
                } else {
                    list.push(Move::new(from, to));
                }
            }
        };

        // Single and double pushes (the double is derived before the target
        // mask is applied, so the intermediate square is genuinely empty).
        let single = quiet_pawns.shift(up) & empty;
        let double = (single & third_rank).shift(up) & empty & target;
        for to in single & target {
            let from = Square::from_index((to.to_index() as i8 - up.shift()) as usize);
            push_checked(list, from, to, false);
        }
        for to in double {
            let from = Square::from_index((to.to_index() as i8 - 2 * up.shift()) as usize);
            push_checked(list, from, to, false);
        }

        // Captures, plain and promoting
        for dir in capture_dirs {
            for to in quiet_pawns.shift(dir) & enemies & target {
                let from = Square::from_index((to.to_index() as i8 - dir.shift()) as usize);
                push_checked(list, from, to, false);
            }
            for to in promoting.shift(dir) & enemies & target {
                let from = Square::from_index((to.to_index() as i8 - dir.shift()) as usize);
                push_checked(list, from, to, true);
            }
        }

        // Push promotions
        for to in promoting.shift(up) & empty & target {
            let from = Square::from_index((to.to_index() as i8 - up.shift()) as usize);
            push_checked(list, from, to, true);
        }

        // En passant. The captured pawn is not on the destination square,
        // so the evasion target does not apply directly: the capture stands
        // if the destination blocks the check or the captured pawn is the
        // checker itself. The double-removal discovered check is left to
        // `is_legal`, which re-derives the occupancy.
        if let Some(ep) = self.en_passant_square() {
            let captured = Square::from_index((ep.to_index() as i8 - up.shift()) as usize);
            let checkers = self.checkers();
            if !checkers.is_empty() && !target.contains(ep) && !checkers.contains(captured) {
                return;
            }
            for from in attack_tables::pawn_attacks(them, ep) & pawns {
                let m = Move::en_passant(from, ep);
                if self.is_legal(m) {
                    list.push(m);
                }
            }
        }
    }
}
