//! Zobrist hashing for chess positions.
//!
//! Provides incrementally-updatable 64-bit keys for the position, the pawn
//! structure and the material configuration. The table is generated from a
//! fixed seed, so keys are reproducible across runs and platforms.

use rand::prelude::*;
use std::sync::LazyLock;

use crate::board::{File, Piece, Square};

pub(crate) struct ZobristKeys {
    /// `[color][piece_type][square]`
    pub(crate) piece_square: [[[u64; 64]; 6]; 2],
    /// One word per 4-bit castling-rights mask.
    pub(crate) castling: [u64; 16],
    /// One word per en-passant file.
    pub(crate) en_passant: [u64; 8],
    /// XORed in when Black is to move.
    pub(crate) side_to_move: u64,
    /// Seed value of the pawn-structure key.
    pub(crate) no_pawns: u64,
}

impl ZobristKeys {
    fn new() -> Self {
        // Fixed seed for reproducibility
        let mut rng = StdRng::seed_from_u64(0x7A6B_5C4D_3E2F_1001);

        let mut piece_square = [[[0u64; 64]; 6]; 2];
        for color in &mut piece_square {
            for piece in color.iter_mut() {
                for key in piece.iter_mut() {
                    *key = rng.gen();
                }
            }
        }

        let mut castling = [0u64; 16];
        for key in &mut castling {
            *key = rng.gen();
        }

        let mut en_passant = [0u64; 8];
        for key in &mut en_passant {
            *key = rng.gen();
        }

        ZobristKeys {
            piece_square,
            castling,
            en_passant,
            side_to_move: rng.gen(),
            no_pawns: rng.gen(),
        }
    }

    /// The word for `piece` standing on `sq`.
    #[inline]
    pub(crate) fn psq(&self, piece: Piece, sq: Square) -> u64 {
        self.piece_square[piece.color().index()][piece.piece_type().index()][sq.to_index()]
    }

    /// The word folded into the material key when the `n`-th piece of a
    /// (color, type) pair enters or leaves the board (`n` counted from 0).
    ///
    /// Reuses the piece-square table indexed by count, so the material key
    /// of a position depends only on how many pieces of each kind exist.
    #[inline]
    pub(crate) fn material(&self, piece: Piece, n: usize) -> u64 {
        self.piece_square[piece.color().index()][piece.piece_type().index()][n]
    }

    #[inline]
    pub(crate) fn en_passant_file(&self, file: File) -> u64 {
        self.en_passant[file.index()]
    }
}

// Initialize Zobrist keys lazily and globally
pub(crate) static ZOBRIST: LazyLock<ZobristKeys> = LazyLock::new(ZobristKeys::new);
