//! Castling rights type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::piece::Color;

pub(crate) const CASTLE_WHITE_K: u8 = 1 << 0;
pub(crate) const CASTLE_WHITE_Q: u8 = 1 << 1;
pub(crate) const CASTLE_BLACK_K: u8 = 1 << 2;
pub(crate) const CASTLE_BLACK_Q: u8 = 1 << 3;

/// All castling rights combined.
pub(crate) const ALL_CASTLING_RIGHTS: u8 =
    CASTLE_WHITE_K | CASTLE_WHITE_Q | CASTLE_BLACK_K | CASTLE_BLACK_Q;

/// Castling rights represented as a 4-bit mask
/// (White O-O, White O-O-O, Black O-O, Black O-O-O).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CastlingRights(u8);

impl CastlingRights {
    /// No castling rights.
    #[must_use]
    pub const fn none() -> Self {
        CastlingRights(0)
    }

    /// All four castling rights.
    #[must_use]
    pub const fn all() -> Self {
        CastlingRights(ALL_CASTLING_RIGHTS)
    }

    /// Check if a specific castling right is set.
    #[inline]
    #[must_use]
    pub const fn has(self, color: Color, kingside: bool) -> bool {
        self.0 & Self::bit_for(color, kingside) != 0
    }

    /// Check if either right of a color is set.
    #[inline]
    #[must_use]
    pub const fn has_any(self, color: Color) -> bool {
        let bits = match color {
            Color::White => CASTLE_WHITE_K | CASTLE_WHITE_Q,
            Color::Black => CASTLE_BLACK_K | CASTLE_BLACK_Q,
        };
        self.0 & bits != 0
    }

    /// Set a specific castling right.
    #[inline]
    pub fn set(&mut self, color: Color, kingside: bool) {
        self.0 |= Self::bit_for(color, kingside);
    }

    /// Clear all rights named in `mask`.
    #[inline]
    pub(crate) fn discard(&mut self, mask: u8) {
        self.0 &= !mask;
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Get the raw bitmask value (used for Zobrist hashing).
    #[inline]
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Create from a raw bitmask value.
    #[inline]
    #[must_use]
    pub const fn from_u8(value: u8) -> Self {
        CastlingRights(value & ALL_CASTLING_RIGHTS)
    }

    /// Get the bit for a specific castling right.
    #[inline]
    pub(crate) const fn bit_for(color: Color, kingside: bool) -> u8 {
        match (color, kingside) {
            (Color::White, true) => CASTLE_WHITE_K,
            (Color::White, false) => CASTLE_WHITE_Q,
            (Color::Black, true) => CASTLE_BLACK_K,
            (Color::Black, false) => CASTLE_BLACK_Q,
        }
    }

    /// Dense 0-3 index of a right, for the per-right rook and path tables.
    #[inline]
    pub(crate) const fn index_for(color: Color, kingside: bool) -> usize {
        Self::bit_for(color, kingside).trailing_zeros() as usize
    }
}

impl fmt::Display for CastlingRights {
    /// FEN field rendering: subset of `KQkq` or `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "-");
        }
        for (bit, c) in [
            (CASTLE_WHITE_K, 'K'),
            (CASTLE_WHITE_Q, 'Q'),
            (CASTLE_BLACK_K, 'k'),
            (CASTLE_BLACK_Q, 'q'),
        ] {
            if self.0 & bit != 0 {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rights_set_and_query() {
        let mut rights = CastlingRights::none();
        assert!(rights.is_empty());
        rights.set(Color::White, true);
        rights.set(Color::Black, false);
        assert!(rights.has(Color::White, true));
        assert!(!rights.has(Color::White, false));
        assert!(rights.has(Color::Black, false));
        assert!(rights.has_any(Color::White));
        assert!(rights.has_any(Color::Black));
    }

    #[test]
    fn test_discard() {
        let mut rights = CastlingRights::all();
        rights.discard(CASTLE_WHITE_K | CASTLE_WHITE_Q);
        assert!(!rights.has_any(Color::White));
        assert!(rights.has_any(Color::Black));
    }

    #[test]
    fn test_index_for_is_dense() {
        assert_eq!(CastlingRights::index_for(Color::White, true), 0);
        assert_eq!(CastlingRights::index_for(Color::White, false), 1);
        assert_eq!(CastlingRights::index_for(Color::Black, true), 2);
        assert_eq!(CastlingRights::index_for(Color::Black, false), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(CastlingRights::all().to_string(), "KQkq");
        assert_eq!(CastlingRights::none().to_string(), "-");
        let mut rights = CastlingRights::none();
        rights.set(Color::White, true);
        rights.set(Color::Black, false);
        assert_eq!(rights.to_string(), "Kq");
    }

    #[test]
    fn test_raw_mask_roundtrip() {
        for raw in 0..16u8 {
            assert_eq!(CastlingRights::from_u8(raw).as_u8(), raw);
        }
        // out-of-range bits are dropped
        assert_eq!(CastlingRights::from_u8(0xF0).as_u8(), 0);
    }
}
