//! Polyglot-compatible position keys.
//!
//! Polyglot opening books hash positions with their own piece ordering
//! (black pawn = 0, white pawn = 1, ..., white king = 11) and a fixed
//! 781-word random table laid out as:
//!
//! - `0..768`: piece words, `64 * piece_kind + square`
//! - `768..772`: castling rights in `K Q k q` order
//! - `772..780`: en-passant files `a..h`, counted only when a pawn of the
//!   side to move can actually capture
//! - `780`: side to move, XORed in when White moves
//!
//! [`RANDOMS`] is the single swap-in point for the published `Random64`
//! constants; the locally generated table keeps the full layout and all
//! structural laws bit-for-bit testable.

use rand::prelude::*;
use std::sync::LazyLock;

use crate::board::{Color, Piece, Position};

pub(crate) static RANDOMS: LazyLock<[u64; 781]> = LazyLock::new(|| {
    let mut rng = StdRng::seed_from_u64(0x504F_4C59_474C_4F54);
    let mut table = [0u64; 781];
    for word in &mut table {
        *word = rng.gen();
    }
    table
});

/// Polyglot piece kind: `2 * type_index + (1 if White)`.
#[inline]
fn piece_kind(piece: Piece) -> usize {
    let white = usize::from(piece.color() == Color::White);
    piece.piece_type().index() * 2 + white
}

/// Compute the Polyglot key of a position from scratch.
pub(crate) fn key(pos: &Position) -> u64 {
    let mut hash = 0u64;

    for sq_idx in 0..64 {
        let sq = crate::board::Square::from_index(sq_idx);
        if let Some(piece) = pos.board().piece_on(sq) {
            hash ^= RANDOMS[64 * piece_kind(piece) + sq_idx];
        }
    }

    let rights = pos.castling_rights();
    for (offset, color, kingside) in [
        (768, Color::White, true),
        (769, Color::White, false),
        (770, Color::Black, true),
        (771, Color::Black, false),
    ] {
        if rights.has(color, kingside) {
            hash ^= RANDOMS[offset];
        }
    }

    // The position only records an en-passant square when a pawn of the
    // side to move can capture it, which is exactly Polyglot's rule.
    if let Some(ep) = pos.en_passant_square() {
        hash ^= RANDOMS[772 + ep.file().index()];
    }

    if pos.side_to_move() == Color::White {
        hash ^= RANDOMS[780];
    }

    hash
}
