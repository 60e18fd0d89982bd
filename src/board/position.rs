//! The position state machine: placement, state stack, attack and legality
//! queries.
//!
//! A `Position` is mutated only through `make_move`/`take_move` and their
//! null-move counterparts (see `make_unmake.rs`); everything else is a
//! query. It is single-threaded by design: clone it to search in parallel.

use crate::cuckoo::CUCKOO;

use super::attack_tables;
use super::state::{Board, State};
use super::types::{Bitboard, CastlingRights, Color, File, Move, MoveKind, PieceType, Rank, Square};

/// A full chess position: board, state history, side to move and the
/// castling geometry derived from the starting FEN.
#[derive(Clone)]
pub struct Position {
    pub(crate) board: Board,
    /// State per ply; the last entry is the current state. Never empty.
    pub(crate) states: Vec<State>,
    pub(crate) side_to_move: Color,
    /// Plies since the game start (not since the root FEN).
    pub(crate) game_ply: u32,
    pub(crate) chess960: bool,
    /// Rook origin square per castling right (see `CastlingRights::index_for`).
    pub(crate) castling_rook: [Option<Square>; 4],
    /// Squares that must be empty for each right, king and rook excluded.
    pub(crate) castling_path: [Bitboard; 4],
    /// Squares the king crosses (destination included) for each right.
    pub(crate) king_path: [Bitboard; 4],
    /// Per square: rights lost when a move touches the square.
    pub(crate) castling_masks: [u8; 64],
}

pub(crate) fn castle_destinations(us: Color, kingside: bool) -> (Square, Square) {
    let rank = Rank::One.relative_to(us);
    if kingside {
        (Square::make(File::G, rank), Square::make(File::F, rank))
    } else {
        (Square::make(File::C, rank), Square::make(File::D, rank))
    }
}

impl Position {
    #[inline]
    pub(crate) fn state(&self) -> &State {
        self.states.last().expect("state stack is never empty")
    }

    /// The piece placement.
    #[inline]
    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    #[must_use]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    /// Plies played since the start of the game.
    #[inline]
    #[must_use]
    pub fn game_ply(&self) -> u32 {
        self.game_ply
    }

    /// The FEN fullmove number.
    #[inline]
    #[must_use]
    pub fn fullmove_number(&self) -> u32 {
        self.game_ply / 2 + 1
    }

    #[inline]
    #[must_use]
    pub fn is_chess960(&self) -> bool {
        self.chess960
    }

    /// The position key.
    #[inline]
    #[must_use]
    pub fn key(&self) -> u64 {
        self.state().key
    }

    /// The pawn-structure key.
    #[inline]
    #[must_use]
    pub fn pawn_key(&self) -> u64 {
        self.state().pawn_key
    }

    /// The material-configuration key.
    #[inline]
    #[must_use]
    pub fn material_key(&self) -> u64 {
        self.state().material_key
    }

    /// The Polyglot book key of the current position.
    #[inline]
    #[must_use]
    pub fn polyglot_key(&self) -> u64 {
        crate::polyglot::key(self)
    }

    #[inline]
    #[must_use]
    pub fn castling_rights(&self) -> CastlingRights {
        self.state().castling
    }

    /// The en-passant target square, if a pawn to move can capture there.
    #[inline]
    #[must_use]
    pub fn en_passant_square(&self) -> Option<Square> {
        self.state().en_passant
    }

    /// Halfmove clock for the fifty-move rule.
    #[inline]
    #[must_use]
    pub fn halfmove_clock(&self) -> u32 {
        self.state().rule50
    }

    /// Enemy pieces giving check right now.
    #[inline]
    #[must_use]
    pub fn checkers(&self) -> Bitboard {
        self.state().checkers
    }

    #[inline]
    #[must_use]
    pub fn in_check(&self) -> bool {
        !self.state().checkers.is_empty()
    }

    /// The piece captured by the last made move, if any.
    #[inline]
    #[must_use]
    pub fn captured_piece(&self) -> Option<super::types::Piece> {
        self.state().captured
    }

    /// Pieces of `color` pinned to their own king.
    #[inline]
    #[must_use]
    pub fn pinned(&self, color: Color) -> Bitboard {
        self.state().blockers[color.index()] & self.board.pieces_by_color(color)
    }

    /// Sliders of `color` that pin an enemy piece to the enemy king.
    #[inline]
    #[must_use]
    pub fn pinners(&self, color: Color) -> Bitboard {
        self.state().pinners[color.index()]
    }

    // =========================================================================
    // Attack queries
    // =========================================================================

    /// All pieces of both colors attacking `sq` under the given occupancy.
    #[must_use]
    pub fn attackers_to(&self, sq: Square, occupied: Bitboard) -> Bitboard {
        let board = &self.board;
        let rooks_queens = board.pieces_by_type(PieceType::Rook) | board.pieces_by_type(PieceType::Queen);
        let bishops_queens =
            board.pieces_by_type(PieceType::Bishop) | board.pieces_by_type(PieceType::Queen);

        attack_tables::pawn_attacks(Color::White, sq) & board.pieces(Color::Black, PieceType::Pawn)
            | attack_tables::pawn_attacks(Color::Black, sq)
                & board.pieces(Color::White, PieceType::Pawn)
            | attack_tables::knight_attacks(sq) & board.pieces_by_type(PieceType::Knight)
            | attack_tables::king_attacks(sq) & board.pieces_by_type(PieceType::King)
            | attack_tables::rook_attacks(sq, occupied) & rooks_queens
            | attack_tables::bishop_attacks(sq, occupied) & bishops_queens
    }

    /// For each slider in `sliders` whose ray toward `sq` is blocked by
    /// exactly one piece, that piece goes into `blockers`; sliders blocked
    /// by a piece of the same color as the one standing on `sq` go into
    /// `pinners`.
    #[must_use]
    pub(crate) fn slider_blockers(&self, sliders: Bitboard, sq: Square) -> (Bitboard, Bitboard) {
        let board = &self.board;
        let mut blockers = Bitboard::EMPTY;
        let mut pinners = Bitboard::EMPTY;

        let rooks_queens = board.pieces_by_type(PieceType::Rook) | board.pieces_by_type(PieceType::Queen);
        let bishops_queens =
            board.pieces_by_type(PieceType::Bishop) | board.pieces_by_type(PieceType::Queen);
        let snipers = (attack_tables::rook_attacks(sq, Bitboard::EMPTY) & rooks_queens
            | attack_tables::bishop_attacks(sq, Bitboard::EMPTY) & bishops_queens)
            & sliders;
        let occupancy = board.occupied() ^ snipers;

        let shielded = board
            .piece_on(sq)
            .map_or(Bitboard::EMPTY, |p| board.pieces_by_color(p.color()));

        for sniper in snipers {
            let b = attack_tables::between(sq, sniper) & occupancy;
            if !b.is_empty() && !b.more_than_one() {
                blockers |= b;
                if !(b & shielded).is_empty() {
                    pinners |= sniper.bitboard();
                }
            }
        }
        (blockers, pinners)
    }

    /// Recompute checkers, king blockers, pinners and the check squares of
    /// the side to move. Called after every state transition.
    pub(crate) fn set_check_info(&self, st: &mut State) {
        let us = self.side_to_move;
        let them = us.opponent();
        let board = &self.board;
        let occupied = board.occupied();

        st.checkers =
            self.attackers_to(board.king_square(us), occupied) & board.pieces_by_color(them);

        for color in [Color::White, Color::Black] {
            let enemy = color.opponent();
            let (blockers, pinners) = self.slider_blockers(
                board.pieces_by_color(enemy),
                board.king_square(color),
            );
            st.blockers[color.index()] = blockers;
            st.pinners[enemy.index()] = pinners;
        }

        let enemy_king = board.king_square(them);
        st.check_squares[PieceType::Pawn.index()] = attack_tables::pawn_attacks(them, enemy_king);
        st.check_squares[PieceType::Knight.index()] = attack_tables::knight_attacks(enemy_king);
        st.check_squares[PieceType::Bishop.index()] =
            attack_tables::bishop_attacks(enemy_king, occupied);
        st.check_squares[PieceType::Rook.index()] =
            attack_tables::rook_attacks(enemy_king, occupied);
        st.check_squares[PieceType::Queen.index()] = st.check_squares[PieceType::Bishop.index()]
            | st.check_squares[PieceType::Rook.index()];
        st.check_squares[PieceType::King.index()] = Bitboard::EMPTY;
    }

    // =========================================================================
    // Legality
    // =========================================================================

    /// Whether playing the pseudo-legal `m` would leave the enemy king in
    /// check.
    #[must_use]
    pub fn gives_check(&self, m: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let from = m.from();
        let to = m.to();
        let st = self.state();
        let board = &self.board;
        let enemy_king = board.king_square(them);

        let Some(piece) = board.piece_on(from) else {
            return false;
        };

        // Direct check from the destination square
        if st.check_squares[piece.piece_type().index()].contains(to) {
            return true;
        }

        // Discovered check: the mover was shielding the enemy king
        if st.blockers[them.index()].contains(from) {
            if !attack_tables::aligned(from, to, enemy_king) || m.kind() == MoveKind::Castling {
                return true;
            }
        }

        match m.kind() {
            MoveKind::Normal => false,
            MoveKind::Promotion => attack_tables::attacks(
                m.promotion_type(),
                to,
                board.occupied() ^ from.bitboard(),
            )
            .contains(enemy_king),
            MoveKind::EnPassant => {
                // The captured pawn leaves its square as well; recompute.
                let capsq = Square::make(to.file(), from.rank());
                let occupied =
                    (board.occupied() ^ from.bitboard() ^ capsq.bitboard()) | to.bitboard();
                let rooks_queens = board.pieces(us, PieceType::Rook) | board.pieces(us, PieceType::Queen);
                let bishops_queens =
                    board.pieces(us, PieceType::Bishop) | board.pieces(us, PieceType::Queen);
                !(attack_tables::rook_attacks(enemy_king, occupied) & rooks_queens).is_empty()
                    || !(attack_tables::bishop_attacks(enemy_king, occupied) & bishops_queens)
                        .is_empty()
            }
            MoveKind::Castling => {
                let (_, rook_to) = castle_destinations(us, to > from);
                st.check_squares[PieceType::Rook.index()].contains(rook_to)
            }
        }
    }

    /// Whether the pseudo-legal `m` leaves the mover's own king safe.
    ///
    /// The move must be pseudo-legal for the current position (as produced
    /// by the generator); evasions out of check are assumed to have been
    /// filtered by the generation target already.
    #[must_use]
    pub fn is_legal(&self, m: Move) -> bool {
        let us = self.side_to_move;
        let them = us.opponent();
        let from = m.from();
        let to = m.to();
        let st = self.state();
        let board = &self.board;
        let ksq = board.king_square(us);

        match m.kind() {
            MoveKind::EnPassant => {
                // Remove both pawns and re-check the king's lines.
                let capsq = Square::make(to.file(), from.rank());
                let occupied =
                    (board.occupied() ^ from.bitboard() ^ capsq.bitboard()) | to.bitboard();
                let rooks_queens =
                    board.pieces(them, PieceType::Rook) | board.pieces(them, PieceType::Queen);
                let bishops_queens =
                    board.pieces(them, PieceType::Bishop) | board.pieces(them, PieceType::Queen);
                (attack_tables::rook_attacks(ksq, occupied) & rooks_queens).is_empty()
                    && (attack_tables::bishop_attacks(ksq, occupied) & bishops_queens).is_empty()
            }
            MoveKind::Castling => {
                if !st.checkers.is_empty() {
                    return false;
                }
                // In Chess960 the castling rook may itself shield the king.
                if self.chess960 && st.blockers[us.index()].contains(to) {
                    return false;
                }
                let right = CastlingRights::index_for(us, to > from);
                let enemies = board.pieces_by_color(them);
                self.king_path[right]
                    .iter()
                    .all(|s| (self.attackers_to(s, board.occupied()) & enemies).is_empty())
            }
            _ if board.piece_on(from).is_some_and(|p| p.piece_type() == PieceType::King) => {
                // The king must not step onto an attacked square; exclude it
                // from the occupancy so backward slider rays count.
                let occupied = board.occupied() ^ from.bitboard();
                (self.attackers_to(to, occupied) & board.pieces_by_color(them)).is_empty()
            }
            _ => {
                // A pinned piece may only move along its pin line.
                !st.blockers[us.index()].contains(from)
                    || attack_tables::aligned(from, to, ksq)
            }
        }
    }

    // =========================================================================
    // Repetition and draw queries
    // =========================================================================

    /// True if the current position repeats an earlier one in the game.
    #[inline]
    #[must_use]
    pub fn is_repetition(&self) -> bool {
        self.state().repetition != 0
    }

    /// True if the current position has occurred at least three times.
    #[inline]
    #[must_use]
    pub fn is_threefold_repetition(&self) -> bool {
        self.state().repetition < 0
    }

    /// True if the fifty-move counter has expired (and the position is not
    /// checkmate, which takes precedence).
    #[must_use]
    pub fn is_fifty_move_draw(&self) -> bool {
        self.state().rule50 >= 100 && (!self.in_check() || !self.generate_moves().is_empty())
    }

    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.is_threefold_repetition() || self.is_fifty_move_draw()
    }

    /// Probe for an upcoming repetition: is there an earlier position that
    /// one reversible move would bring back? Uses the cuckoo table instead
    /// of replaying the history.
    #[must_use]
    pub fn has_upcoming_repetition(&self) -> bool {
        let st = self.state();
        let end = st.rule50.min(st.plies_from_null) as usize;
        if end < 3 {
            return false;
        }

        let head = self.states.len() - 1;
        let occupied = self.board.occupied();
        let original = st.key;

        let mut i = 3;
        while i <= end {
            let move_key = original ^ self.states[head - i].key;
            if let Some(mv) = CUCKOO.probe(move_key) {
                if (attack_tables::between(mv.from(), mv.to()) & occupied).is_empty() {
                    return true;
                }
            }
            i += 2;
        }
        false
    }
}

/// Positions compare equal when they hold the same placement and the same
/// FEN-visible state; history-only fields (captured piece, plies from the
/// last irreversible move, repetition distance) are ignored.
impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        let (a, b) = (self.state(), other.state());
        self.board == other.board
            && self.side_to_move == other.side_to_move
            && self.game_ply == other.game_ply
            && self.chess960 == other.chess960
            && a.castling == b.castling
            && a.en_passant == b.en_passant
            && a.rule50 == b.rule50
            && a.key == b.key
            && a.pawn_key == b.pawn_key
            && a.material_key == b.material_key
    }
}

impl Eq for Position {}

impl std::fmt::Debug for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Position({})", self.to_fen())
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

impl std::str::FromStr for Position {
    type Err = super::error::FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}
