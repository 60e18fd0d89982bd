//! Piece placement (`Board`) and the per-ply snapshot (`State`).

use super::types::{Bitboard, CastlingRights, Color, Piece, PieceType, Square};

/// Upper bound on pieces of one type and color (promotions included).
const MAX_PER_TYPE: usize = 16;

/// Pure piece placement: mailbox, per-color and per-type bitboards, and a
/// square list with count per (color, type) for fast enumeration.
///
/// Invariants (checked by the debug self-test): the twelve piece sets are
/// pairwise disjoint, their unions match the color and global occupancies,
/// the mailbox agrees with the bitboards, each side has exactly one king,
/// and no pawn stands on rank 1 or 8.
#[derive(Clone)]
pub struct Board {
    by_type: [Bitboard; 6],
    by_color: [Bitboard; 2],
    mailbox: [Piece; 64],
    piece_list: [[Square; MAX_PER_TYPE]; 12],
    index: [u8; 64],
    counts: [u8; 12],
}

impl Board {
    pub(crate) fn empty() -> Self {
        Board {
            by_type: [Bitboard::EMPTY; 6],
            by_color: [Bitboard::EMPTY; 2],
            mailbox: [Piece::NONE; 64],
            piece_list: [[Square::A1; MAX_PER_TYPE]; 12],
            index: [0; 64],
            counts: [0; 12],
        }
    }

    /// Bitboard of all pieces (both colors).
    #[inline]
    #[must_use]
    pub fn occupied(&self) -> Bitboard {
        self.by_color[0] | self.by_color[1]
    }

    /// Bitboard of all pieces of one color.
    #[inline]
    #[must_use]
    pub fn pieces_by_color(&self, color: Color) -> Bitboard {
        self.by_color[color.index()]
    }

    /// Bitboard of all pieces of one type, both colors.
    #[inline]
    #[must_use]
    pub fn pieces_by_type(&self, piece_type: PieceType) -> Bitboard {
        self.by_type[piece_type.index()]
    }

    /// Bitboard of the pieces of one color and type.
    #[inline]
    #[must_use]
    pub fn pieces(&self, color: Color, piece_type: PieceType) -> Bitboard {
        self.by_color[color.index()] & self.by_type[piece_type.index()]
    }

    /// The piece on a square, if any.
    #[inline]
    #[must_use]
    pub fn piece_on(&self, sq: Square) -> Option<Piece> {
        let piece = self.mailbox[sq.to_index()];
        if piece.is_none() {
            None
        } else {
            Some(piece)
        }
    }

    /// Number of pieces of one color and type.
    #[inline]
    #[must_use]
    pub fn count(&self, color: Color, piece_type: PieceType) -> usize {
        self.counts[Piece::new(color, piece_type).code()] as usize
    }

    /// The squares occupied by pieces of one color and type.
    #[inline]
    #[must_use]
    pub fn squares(&self, color: Color, piece_type: PieceType) -> &[Square] {
        let code = Piece::new(color, piece_type).code();
        &self.piece_list[code][..self.counts[code] as usize]
    }

    /// The square of `color`'s king.
    #[inline]
    #[must_use]
    pub fn king_square(&self, color: Color) -> Square {
        self.squares(color, PieceType::King)[0]
    }

    pub(crate) fn put_piece(&mut self, piece: Piece, sq: Square) {
        debug_assert!(self.mailbox[sq.to_index()].is_none());
        let bb = sq.bitboard();
        self.by_type[piece.piece_type().index()] |= bb;
        self.by_color[piece.color().index()] |= bb;
        self.mailbox[sq.to_index()] = piece;

        let code = piece.code();
        let n = self.counts[code] as usize;
        self.piece_list[code][n] = sq;
        self.index[sq.to_index()] = n as u8;
        self.counts[code] += 1;
    }

    pub(crate) fn remove_piece(&mut self, sq: Square) -> Piece {
        let piece = self.mailbox[sq.to_index()];
        debug_assert!(!piece.is_none());
        let bb = sq.bitboard();
        self.by_type[piece.piece_type().index()] ^= bb;
        self.by_color[piece.color().index()] ^= bb;
        self.mailbox[sq.to_index()] = Piece::NONE;

        // Swap-remove from the square list
        let code = piece.code();
        self.counts[code] -= 1;
        let last = self.piece_list[code][self.counts[code] as usize];
        let slot = self.index[sq.to_index()];
        self.piece_list[code][slot as usize] = last;
        self.index[last.to_index()] = slot;
        piece
    }

    pub(crate) fn move_piece(&mut self, from: Square, to: Square) -> Piece {
        let piece = self.mailbox[from.to_index()];
        debug_assert!(!piece.is_none() && self.mailbox[to.to_index()].is_none());
        let bb = from.bitboard() | to.bitboard();
        self.by_type[piece.piece_type().index()] ^= bb;
        self.by_color[piece.color().index()] ^= bb;
        self.mailbox[from.to_index()] = Piece::NONE;
        self.mailbox[to.to_index()] = piece;

        let code = piece.code();
        let slot = self.index[from.to_index()];
        self.piece_list[code][slot as usize] = to;
        self.index[to.to_index()] = slot;
        piece
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        // The square lists are maintained in insertion order and may differ
        // between two boards holding the same position; placement equality
        // is what matters.
        self.mailbox == other.mailbox
    }
}

impl Eq for Board {}

impl std::fmt::Debug for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                let sq = Square::from_index(rank * 8 + file);
                let c = self.piece_on(sq).map_or('.', Piece::to_fen_char);
                write!(f, "{c} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Snapshot of the non-derivable position state at one ply.
///
/// `Position` keeps these in a vector indexed by ply: the record before the
/// current one is simply the previous slot, and popping the last record
/// undoes a move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct State {
    /// Castling availability.
    pub(crate) castling: CastlingRights,
    /// En-passant target, recorded only when a pawn to move can capture it.
    pub(crate) en_passant: Option<Square>,
    /// Halfmove clock for the fifty-move rule.
    pub(crate) rule50: u32,
    /// Plies since the last irreversible move or null move.
    pub(crate) plies_from_null: u32,
    /// Piece captured by the move that produced this state.
    pub(crate) captured: Option<Piece>,
    /// Full position key.
    pub(crate) key: u64,
    /// Pawn-structure key.
    pub(crate) pawn_key: u64,
    /// Material-configuration key.
    pub(crate) material_key: u64,
    /// Enemy pieces currently giving check.
    pub(crate) checkers: Bitboard,
    /// Per color: pieces (of either color) blocking a sliding attack on
    /// that color's king.
    pub(crate) blockers: [Bitboard; 2],
    /// Per color: that color's sliders pinning an enemy piece.
    pub(crate) pinners: [Bitboard; 2],
    /// Per piece type: squares from which the side to move would check the
    /// enemy king.
    pub(crate) check_squares: [Bitboard; 6],
    /// Ply distance to the previous occurrence of this position key;
    /// 0 if none, negative if that occurrence itself was a repetition.
    pub(crate) repetition: i32,
}

impl State {
    pub(crate) fn new() -> Self {
        State {
            castling: CastlingRights::none(),
            en_passant: None,
            rule50: 0,
            plies_from_null: 0,
            captured: None,
            key: 0,
            pawn_key: 0,
            material_key: 0,
            checkers: Bitboard::EMPTY,
            blockers: [Bitboard::EMPTY; 2],
            pinners: [Bitboard::EMPTY; 2],
            check_squares: [Bitboard::EMPTY; 6],
            repetition: 0,
        }
    }
}
