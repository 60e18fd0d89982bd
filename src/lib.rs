// Crate root - export modules
pub mod board;
mod cuckoo;
mod polyglot;
mod zobrist;

// Public API - types users need
pub use board::{
    passed_pawn_mask, pawn_attack_span, Bitboard, CastlingRights, Color, Direction, FenError,
    File, Move, MoveKind, MoveList, MoveNotation, MoveParseError, Piece, PieceType, Position,
    Rank, Square,
};
