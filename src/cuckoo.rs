//! Cuckoo table of reversible moves for upcoming-repetition detection.
//!
//! Every reversible single-piece move (a non-pawn, non-capture move between
//! two squares its piece connects on an empty board) has a key
//! `psq[c][pt][a] ^ psq[c][pt][b] ^ side`. Storing all of them in a small
//! two-slot hash lets `Position::has_upcoming_repetition` answer "can one
//! reversible move take us back to an earlier position?" without replaying
//! the game history.

use std::sync::LazyLock;

use crate::board::attack_tables;
use crate::board::{Bitboard, Color, Move, Piece, PieceType, Square};
use crate::zobrist::ZOBRIST;

const TABLE_SIZE: usize = 8192;

pub(crate) struct CuckooTable {
    keys: Box<[u64; TABLE_SIZE]>,
    moves: Box<[Move; TABLE_SIZE]>,
}

/// First hash slot of a move key.
#[inline]
const fn h1(key: u64) -> usize {
    (key >> 32) as usize & (TABLE_SIZE - 1)
}

/// Second hash slot of a move key.
#[inline]
const fn h2(key: u64) -> usize {
    (key >> 48) as usize & (TABLE_SIZE - 1)
}

impl CuckooTable {
    fn new() -> Self {
        let mut table = CuckooTable {
            keys: Box::new([0u64; TABLE_SIZE]),
            moves: Box::new([Move::NONE; TABLE_SIZE]),
        };
        let mut count = 0usize;

        for color in [Color::White, Color::Black] {
            for piece_type in [
                PieceType::Knight,
                PieceType::Bishop,
                PieceType::Rook,
                PieceType::Queen,
                PieceType::King,
            ] {
                let piece = Piece::new(color, piece_type);
                for a in 0..64 {
                    let sa = Square::from_index(a);
                    let reach = attack_tables::attacks(piece_type, sa, Bitboard::EMPTY);
                    for sb in reach {
                        if sb.to_index() <= a {
                            continue;
                        }
                        let key =
                            ZOBRIST.psq(piece, sa) ^ ZOBRIST.psq(piece, sb) ^ ZOBRIST.side_to_move;
                        table.insert(key, Move::new(sa, sb));
                        count += 1;
                    }
                }
            }
        }
        debug_assert_eq!(count, 3668);

        table
    }

    /// Cuckoo insertion: displace until an empty slot takes the orphan.
    /// The table is under half full, so a displacement chain longer than
    /// the table means the key set is degenerate.
    fn insert(&mut self, mut key: u64, mut mv: Move) {
        let mut slot = h1(key);
        for _ in 0..TABLE_SIZE {
            std::mem::swap(&mut self.keys[slot], &mut key);
            std::mem::swap(&mut self.moves[slot], &mut mv);
            if mv.is_null() {
                return;
            }
            slot = if slot == h1(key) { h2(key) } else { h1(key) };
        }
        unreachable!("cuckoo insertion cycled");
    }

    /// Look up the reversible move whose key is `key`, if any.
    #[inline]
    pub(crate) fn probe(&self, key: u64) -> Option<Move> {
        let slot = h1(key);
        if self.keys[slot] == key {
            return Some(self.moves[slot]);
        }
        let slot = h2(key);
        if self.keys[slot] == key {
            return Some(self.moves[slot]);
        }
        None
    }
}

pub(crate) static CUCKOO: LazyLock<CuckooTable> = LazyLock::new(CuckooTable::new);
