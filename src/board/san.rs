//! Move notation: SAN, FAN, LAN, RAN and UCI.
//!
//! All renderers take the position the move is played from; disambiguation
//! and check marks depend on it.

use super::error::MoveParseError;
use super::position::{castle_destinations, Position};
use super::types::{Color, File, Move, MoveKind, PieceType, Rank};

/// The notation styles the library can render.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveNotation {
    /// Standard Algebraic Notation: `Nf3`, `exd5`, `O-O`, `e8=Q#`
    San,
    /// SAN with Unicode figurines for the moving side: `♘f3`
    Fan,
    /// Long Algebraic Notation: `Ng1-f3`, `Ne5xd7`
    Lan,
    /// Reversible Algebraic Notation: LAN naming the captured piece,
    /// `Ne5xPd7`
    Ran,
    /// Engine wire format: `g1f3`, `e7e8q`
    Uci,
}

impl Position {
    /// Render a legal move in the requested notation style.
    #[must_use]
    pub fn to_notation(&self, m: Move, style: MoveNotation) -> String {
        match style {
            MoveNotation::San => self.san(m, false),
            MoveNotation::Fan => self.san(m, true),
            MoveNotation::Lan => self.long_algebraic(m, false),
            MoveNotation::Ran => self.long_algebraic(m, true),
            MoveNotation::Uci => self.to_uci(m),
        }
    }

    /// Render a legal move in UCI wire format. Castling is king-from /
    /// king-to in standard chess and king-from / rook-from in Chess960.
    #[must_use]
    pub fn to_uci(&self, m: Move) -> String {
        if m.kind() == MoveKind::Castling && !self.is_chess960() {
            let (king_to, _) = castle_destinations(self.side_to_move(), m.to() > m.from());
            return format!("{}{}", m.from(), king_to);
        }
        let mut s = format!("{}{}", m.from(), m.to());
        if m.kind() == MoveKind::Promotion {
            s.push(m.promotion_type().to_char());
        }
        s
    }

    /// Find the legal move matching a UCI string.
    pub fn parse_uci_move(&self, uci: &str) -> Result<Move, MoveParseError> {
        let chars: Vec<char> = uci.chars().collect();
        if !(4..=5).contains(&chars.len()) {
            return Err(MoveParseError::InvalidLength { len: chars.len() });
        }
        let square_ok =
            |file: char, rank: char| File::from_char(file).is_some() && Rank::from_char(rank).is_some();
        if !square_ok(chars[0], chars[1]) || !square_ok(chars[2], chars[3]) {
            return Err(MoveParseError::InvalidSquare {
                notation: uci.to_string(),
            });
        }
        if let Some(&c) = chars.get(4) {
            if !matches!(c, 'q' | 'r' | 'b' | 'n') {
                return Err(MoveParseError::InvalidPromotion { char: c });
            }
        }

        self.generate_moves()
            .iter()
            .copied()
            .find(|&m| self.to_uci(m) == uci)
            .ok_or_else(|| MoveParseError::IllegalMove {
                notation: uci.to_string(),
            })
    }

    fn san(&self, m: Move, figurine: bool) -> String {
        let us = self.side_to_move();
        let mut san = String::new();

        if m.kind() == MoveKind::Castling {
            san.push_str(if m.to() > m.from() { "O-O" } else { "O-O-O" });
        } else {
            let piece_type = self
                .board
                .piece_on(m.from())
                .map_or(PieceType::Pawn, |p| p.piece_type());
            let is_capture =
                m.kind() == MoveKind::EnPassant || self.board.piece_on(m.to()).is_some();

            if piece_type == PieceType::Pawn {
                if is_capture {
                    san.push(m.from().file().to_char());
                }
            } else {
                san.push_str(&piece_letter(piece_type, us, figurine));
                san.push_str(&self.disambiguation(m, piece_type));
            }

            if is_capture {
                san.push('x');
            }
            san.push_str(&m.to().to_string());

            if m.kind() == MoveKind::Promotion {
                san.push('=');
                san.push_str(&piece_letter(m.promotion_type(), us, figurine));
            }
        }

        san.push_str(self.check_suffix(m));
        san
    }

    fn long_algebraic(&self, m: Move, reversible: bool) -> String {
        if m.kind() == MoveKind::Castling {
            let mut s = String::from(if m.to() > m.from() { "O-O" } else { "O-O-O" });
            s.push_str(self.check_suffix(m));
            return s;
        }

        let piece_type = self
            .board
            .piece_on(m.from())
            .map_or(PieceType::Pawn, |p| p.piece_type());
        let mut s = String::new();
        if piece_type != PieceType::Pawn {
            s.push(piece_type.to_char().to_ascii_uppercase());
        }
        s.push_str(&m.from().to_string());

        let captured = if m.kind() == MoveKind::EnPassant {
            Some(PieceType::Pawn)
        } else {
            self.board.piece_on(m.to()).map(|p| p.piece_type())
        };
        match captured {
            Some(victim) => {
                s.push('x');
                if reversible {
                    s.push(victim.to_char().to_ascii_uppercase());
                }
            }
            None => s.push('-'),
        }
        s.push_str(&m.to().to_string());

        if m.kind() == MoveKind::Promotion {
            s.push('=');
            s.push(m.promotion_type().to_char().to_ascii_uppercase());
        }
        s.push_str(self.check_suffix(m));
        s
    }

    /// Minimal origin disambiguation: nothing if the move is unique, the
    /// file if no rival shares it, else the rank if no rival shares that,
    /// else both.
    fn disambiguation(&self, m: Move, piece_type: PieceType) -> String {
        let mut rival_on_file = false;
        let mut rival_on_rank = false;
        let mut any_rival = false;

        for other in self.generate_moves().iter() {
            if other.to() != m.to()
                || other.from() == m.from()
                || other.kind() == MoveKind::Castling
            {
                continue;
            }
            let same_type = self
                .board
                .piece_on(other.from())
                .is_some_and(|p| p.piece_type() == piece_type);
            if !same_type {
                continue;
            }
            any_rival = true;
            rival_on_file |= other.from().file() == m.from().file();
            rival_on_rank |= other.from().rank() == m.from().rank();
        }

        match (any_rival, rival_on_file, rival_on_rank) {
            (false, _, _) => String::new(),
            (true, false, _) => m.from().file().to_char().to_string(),
            (true, true, false) => m.from().rank().to_char().to_string(),
            (true, true, true) => format!("{}", m.from()),
        }
    }

    /// `#` for mate, `+` for check, nothing otherwise.
    fn check_suffix(&self, m: Move) -> &'static str {
        if !self.gives_check(m) {
            return "";
        }
        let mut next = self.clone();
        next.make_move(m);
        if next.generate_moves().is_empty() {
            "#"
        } else {
            "+"
        }
    }
}

fn piece_letter(piece_type: PieceType, color: Color, figurine: bool) -> String {
    if !figurine {
        return piece_type.to_char().to_ascii_uppercase().to_string();
    }
    let glyph = match (color, piece_type) {
        (Color::White, PieceType::King) => '\u{2654}',
        (Color::White, PieceType::Queen) => '\u{2655}',
        (Color::White, PieceType::Rook) => '\u{2656}',
        (Color::White, PieceType::Bishop) => '\u{2657}',
        (Color::White, PieceType::Knight) => '\u{2658}',
        (Color::White, PieceType::Pawn) => '\u{2659}',
        (Color::Black, PieceType::King) => '\u{265A}',
        (Color::Black, PieceType::Queen) => '\u{265B}',
        (Color::Black, PieceType::Rook) => '\u{265C}',
        (Color::Black, PieceType::Bishop) => '\u{265D}',
        (Color::Black, PieceType::Knight) => '\u{265E}',
        (Color::Black, PieceType::Pawn) => '\u{265F}',
    };
    glyph.to_string()
}
