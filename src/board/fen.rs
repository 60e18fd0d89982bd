//! FEN parsing and emission.

use crate::zobrist::ZOBRIST;

use super::attack_tables;
use super::error::FenError;
use super::position::{castle_destinations, Position};
use super::state::{Board, State};
use super::types::{
    Bitboard, CastlingRights, Color, File, Piece, PieceType, Rank, Square,
};

pub(crate) const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

impl Position {
    /// The standard chess starting position.
    #[must_use]
    pub fn startpos() -> Position {
        Position::from_fen(START_FEN).expect("start FEN is valid")
    }

    /// Parse a position from FEN notation.
    ///
    /// The six standard fields are expected; the halfmove clock and
    /// fullmove number may be omitted. Castling availability accepts both
    /// `KQkq` and Shredder-FEN rook-file letters (Chess960). Structurally
    /// impossible positions (missing kings, pawns on the back ranks,
    /// too many pieces) are rejected.
    pub fn from_fen(fen: &str) -> Result<Position, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();
        if parts.len() < 4 {
            return Err(FenError::TooFewFields { found: parts.len() });
        }

        // Field 1: piece placement
        let mut board = Board::empty();
        let ranks: Vec<&str> = parts[0].split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::WrongRankCount { found: ranks.len() });
        }
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i;
            let mut file = 0usize;
            for c in rank_str.chars() {
                if let Some(skip) = c.to_digit(10) {
                    if !(1..=8).contains(&skip) {
                        return Err(FenError::InvalidPiece { char: c });
                    }
                    file += skip as usize;
                } else {
                    let piece =
                        Piece::from_fen_char(c).ok_or(FenError::InvalidPiece { char: c })?;
                    if file >= 8 {
                        return Err(FenError::BadRankWidth {
                            rank: rank + 1,
                            files: file + 1,
                        });
                    }
                    // Guard the fixed-size piece lists before placement.
                    let placed = board.pieces_by_color(piece.color()).popcount() as usize;
                    if placed >= 16 {
                        return Err(FenError::TooManyPieces {
                            color: piece.color(),
                            count: placed + 1,
                        });
                    }
                    board.put_piece(
                        piece,
                        Square::make(File::from_index(file), Rank::from_index(rank)),
                    );
                    file += 1;
                }
            }
            if file != 8 {
                return Err(FenError::BadRankWidth {
                    rank: rank + 1,
                    files: file,
                });
            }
        }

        validate_material(&board)?;

        // Field 2: side to move
        let side_to_move = match parts[1] {
            "w" => Color::White,
            "b" => Color::Black,
            other => {
                return Err(FenError::InvalidSideToMove {
                    found: other.to_string(),
                })
            }
        };

        // Field 3: castling availability
        let mut st = State::new();
        let mut castling_rook = [None; 4];
        let mut chess960 = false;
        if parts[2] != "-" {
            for c in parts[2].chars() {
                let (color, rook) = parse_castling_char(&board, c).ok_or_else(|| {
                    FenError::InvalidCastling {
                        found: parts[2].to_string(),
                    }
                })?;
                let king = board.king_square(color);
                if king.rank() != Rank::One.relative_to(color) {
                    return Err(FenError::InvalidCastling {
                        found: parts[2].to_string(),
                    });
                }
                let kingside = rook > king;
                st.castling.set(color, kingside);
                castling_rook[CastlingRights::index_for(color, kingside)] = Some(rook);
                if c.is_ascii_alphabetic() && !matches!(c, 'K' | 'Q' | 'k' | 'q') {
                    chess960 = true;
                }
                let standard_rook = if kingside { File::H } else { File::A };
                if king.file() != File::E || rook.file() != standard_rook {
                    chess960 = true;
                }
            }
        }

        // Field 4: en passant target
        if parts[3] != "-" {
            let ep: Square = parts[3].parse().map_err(|_| FenError::InvalidEnPassant {
                found: parts[3].to_string(),
            })?;
            let expected_rank = match side_to_move {
                Color::White => Rank::Six,
                Color::Black => Rank::Three,
            };
            if ep.rank() != expected_rank {
                return Err(FenError::InvalidEnPassant {
                    found: parts[3].to_string(),
                });
            }
            // Keep the square only if the capture is actually available:
            // an own pawn attacks it and the pushed enemy pawn is there.
            let them = side_to_move.opponent();
            let capturers = attack_tables::pawn_attacks(them, ep)
                & board.pieces(side_to_move, PieceType::Pawn);
            let pushed = ep
                .offset(super::types::Direction::forward(them))
                .is_some_and(|sq| {
                    board.piece_on(sq) == Some(Piece::new(them, PieceType::Pawn))
                });
            if !capturers.is_empty() && pushed {
                st.en_passant = Some(ep);
            }
        }

        // Fields 5-6: halfmove clock and fullmove number
        st.rule50 = match parts.get(4) {
            None => 0,
            Some(s) => s.parse().map_err(|_| FenError::InvalidCounter {
                found: (*s).to_string(),
            })?,
        };
        let fullmove: u32 = match parts.get(5) {
            None => 1,
            Some(s) => s
                .parse()
                .map_err(|_| FenError::InvalidCounter {
                    found: (*s).to_string(),
                })
                .map(|n: u32| n.max(1))?,
        };

        let mut pos = Position {
            board,
            states: Vec::with_capacity(64),
            side_to_move,
            game_ply: (fullmove - 1) * 2 + u32::from(side_to_move == Color::Black),
            chess960,
            castling_rook,
            castling_path: [Bitboard::EMPTY; 4],
            king_path: [Bitboard::EMPTY; 4],
            castling_masks: [0; 64],
        };
        pos.init_castling_tables();

        let (key, pawn_key, material_key) = pos.compute_keys(&st);
        st.key = key;
        st.pawn_key = pawn_key;
        st.material_key = material_key;
        pos.set_check_info(&mut st);
        pos.states.push(st);

        #[cfg(feature = "logging")]
        log::trace!("parsed FEN '{fen}' -> key {:#018x}", pos.key());

        Ok(pos)
    }

    /// Emit the position as a FEN string (Shredder rook-file letters when
    /// the position is Chess960).
    #[must_use]
    pub fn to_fen(&self) -> String {
        let mut fen = String::with_capacity(90);

        for rank in (0..8).rev() {
            let mut empty = 0u8;
            for file in 0..8 {
                let sq = Square::make(File::from_index(file), Rank::from_index(rank));
                match self.board.piece_on(sq) {
                    Some(piece) => {
                        if empty > 0 {
                            fen.push((b'0' + empty) as char);
                            empty = 0;
                        }
                        fen.push(piece.to_fen_char());
                    }
                    None => empty += 1,
                }
            }
            if empty > 0 {
                fen.push((b'0' + empty) as char);
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(match self.side_to_move {
            Color::White => 'w',
            Color::Black => 'b',
        });

        fen.push(' ');
        let rights = self.castling_rights();
        if rights.is_empty() {
            fen.push('-');
        } else {
            for (color, kingside, standard) in [
                (Color::White, true, 'K'),
                (Color::White, false, 'Q'),
                (Color::Black, true, 'k'),
                (Color::Black, false, 'q'),
            ] {
                if rights.has(color, kingside) {
                    if self.chess960 {
                        let rook = self.castling_rook
                            [CastlingRights::index_for(color, kingside)]
                        .expect("right implies a rook square");
                        let c = rook.file().to_char();
                        fen.push(if color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        });
                    } else {
                        fen.push(standard);
                    }
                }
            }
        }

        fen.push(' ');
        match self.en_passant_square() {
            Some(ep) => fen.push_str(&ep.to_string()),
            None => fen.push('-'),
        }

        fen.push_str(&format!(
            " {} {}",
            self.halfmove_clock(),
            self.fullmove_number()
        ));
        fen
    }

    /// Derive the per-right path masks and the per-square rights masks from
    /// the configured king and rook squares.
    fn init_castling_tables(&mut self) {
        for color in [Color::White, Color::Black] {
            for kingside in [true, false] {
                let right = CastlingRights::index_for(color, kingside);
                let Some(rook_from) = self.castling_rook[right] else {
                    continue;
                };
                let king_from = self.board.king_square(color);
                let (king_to, rook_to) = castle_destinations(color, kingside);

                let span = attack_tables::between(king_from, king_to)
                    | attack_tables::between(rook_from, rook_to)
                    | king_to.bitboard()
                    | rook_to.bitboard();
                self.castling_path[right] =
                    span & !king_from.bitboard() & !rook_from.bitboard();
                self.king_path[right] =
                    attack_tables::between(king_from, king_to) | king_to.bitboard();

                let bit = CastlingRights::bit_for(color, kingside);
                self.castling_masks[king_from.to_index()] |= bit;
                self.castling_masks[rook_from.to_index()] |= bit;
            }
        }
    }

    /// Recompute all three keys from scratch. Used at construction and by
    /// the debug consistency check; play updates them incrementally.
    pub(crate) fn compute_keys(&self, st: &State) -> (u64, u64, u64) {
        let mut key = 0u64;
        let mut pawn_key = ZOBRIST.no_pawns;
        let mut material_key = 0u64;

        for idx in 0..64 {
            let sq = Square::from_index(idx);
            if let Some(piece) = self.board.piece_on(sq) {
                key ^= ZOBRIST.psq(piece, sq);
                if piece.piece_type() == PieceType::Pawn {
                    pawn_key ^= ZOBRIST.psq(piece, sq);
                }
            }
        }

        for color in [Color::White, Color::Black] {
            for piece_type in PieceType::ALL {
                let piece = Piece::new(color, piece_type);
                for n in 0..self.board.count(color, piece_type) {
                    material_key ^= ZOBRIST.material(piece, n);
                }
            }
        }

        if self.side_to_move == Color::Black {
            key ^= ZOBRIST.side_to_move;
        }
        key ^= ZOBRIST.castling[st.castling.as_u8() as usize];
        if let Some(ep) = st.en_passant {
            key ^= ZOBRIST.en_passant_file(ep.file());
        }

        (key, pawn_key, material_key)
    }
}

/// Resolve one castling character to its color and rook square.
fn parse_castling_char(board: &Board, c: char) -> Option<(Color, Square)> {
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    let back_rank = Rank::One.relative_to(color);
    let king = board.squares(color, PieceType::King).first().copied()?;
    let rooks = board.pieces(color, PieceType::Rook) & back_rank.bitboard();

    match c.to_ascii_lowercase() {
        // Outermost rook on the matching wing
        'k' => rooks.msb().filter(|&r| r > king),
        'q' => rooks.lsb().filter(|&r| r < king),
        file_char => {
            let file = File::from_char(file_char)?;
            let sq = Square::make(file, back_rank);
            rooks.contains(sq).then_some(sq)
        }
    }
    .map(|rook| (color, rook))
}

fn validate_material(board: &Board) -> Result<(), FenError> {
    for color in [Color::White, Color::Black] {
        let kings = board.count(color, PieceType::King);
        if kings != 1 {
            return Err(FenError::KingCount {
                color,
                count: kings,
            });
        }
        let pawns = board.count(color, PieceType::Pawn);
        if pawns > 8 {
            return Err(FenError::TooManyPawns {
                color,
                count: pawns,
            });
        }
        let total = board.pieces_by_color(color).popcount() as usize;
        if total > 16 {
            return Err(FenError::TooManyPieces {
                color,
                count: total,
            });
        }
    }
    let pawns = board.pieces_by_type(PieceType::Pawn);
    if !(pawns & (Bitboard::RANK_1 | Bitboard::RANK_8)).is_empty() {
        return Err(FenError::PawnOnBackRank);
    }
    Ok(())
}
