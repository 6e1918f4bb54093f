//! Move text: parsing caller input and the canonical round-trip form.
//!
//! Accepted input:
//! - `e4`: a pawn to e4.
//! - `Nf3` / `nf3`: a piece letter (either case) and destination.
//! - `Ngf3`, `R1e1`, `Ng1f3`: the same with a file, a rank, or both to
//!   disambiguate the origin.
//! - `0-0`, `0-0-0` (or `O-O`, `O-O-O`): castling for the side to move.
//!
//! Capture marks (`x`) and check or mate suffixes (`+`, `#`) are ignored.
//!
//! The canonical form written by [`Move::algebraic_notation`] is the
//! fully-disambiguated `{piece}{origin}{destination}` (`pe2e4`), or the
//! castling tokens, so it always parses back to the same move.

use std::fmt;

use crate::board_state::board::Board;
use crate::board_state::chess_rules::KING_HOME_FILE;
use crate::board_state::chess_types::{Color, PieceKind};
use crate::board_state::location::Location;
use crate::errors::{MoveError, MoveResult};
use crate::moves::chess_move::Move;

const KINGSIDE_TOKEN: &str = "0-0";
const QUEENSIDE_TOKEN: &str = "0-0-0";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MovePattern {
    kind: PieceKind,
    destination: Location,
    file: Option<i8>,
    rank: Option<i8>,
}

impl MovePattern {
    fn matches(&self, mv: &Move) -> bool {
        mv.destination() == self.destination
            && mv.piece().kind() == Some(self.kind)
            && self.file.map_or(true, |x| mv.origin().x() == x)
            && self.rank.map_or(true, |y| mv.origin().y() == y)
    }
}

impl Move {
    /// Resolves `text` against the moves `color` has on `board`.
    ///
    /// The pattern is matched against pseudo-legal moves first. A single
    /// match is returned as is, so a pinned piece still parses and is
    /// rejected later by the legality check. Several matches are narrowed to
    /// the legal ones and must leave exactly one.
    pub fn parse(board: &Board, color: Color, text: &str) -> MoveResult<Move> {
        let input = text.trim();
        let pattern = parse_pattern(input, color)?;

        let candidates: Vec<&Move> = board
            .pseudo_legal_moves(color)
            .iter()
            .filter(|mv| pattern.matches(mv))
            .collect();

        match candidates.as_slice() {
            [] => Err(MoveError::invalid(
                input,
                format!("no {:?} can move to {}", pattern.kind, pattern.destination),
            )),
            [only] => Ok(**only),
            several => {
                let legal = board.legal_moves(color);
                let narrowed: Vec<&&Move> =
                    several.iter().filter(|mv| legal.contains(**mv)).collect();
                match narrowed.as_slice() {
                    [only] => Ok(***only),
                    _ => Err(MoveError::AmbiguousMove {
                        input: input.to_owned(),
                        destination: pattern.destination.to_string(),
                        candidates: several.len(),
                    }),
                }
            }
        }
    }

    /// Canonical text for this move; parses back to an equal move.
    pub fn algebraic_notation(&self) -> String {
        if self.is_kingside_castle() {
            return KINGSIDE_TOKEN.to_owned();
        }
        if self.is_queenside_castle() {
            return QUEENSIDE_TOKEN.to_owned();
        }
        let symbol = self.piece().kind().map_or('?', PieceKind::symbol);
        format!("{symbol}{}{}", self.origin(), self.destination())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.algebraic_notation())
    }
}

fn parse_pattern(input: &str, color: Color) -> MoveResult<MovePattern> {
    let stripped: String = input
        .chars()
        .filter(|ch| !matches!(ch, 'x' | 'X' | '+' | '#'))
        .collect();
    if stripped.is_empty() {
        return Err(MoveError::invalid(input, "empty move"));
    }

    let castle = stripped.replace(['O', 'o'], "0");
    if castle == KINGSIDE_TOKEN || castle == QUEENSIDE_TOKEN {
        let file = if castle == KINGSIDE_TOKEN {
            KING_HOME_FILE + 2
        } else {
            KING_HOME_FILE - 2
        };
        return Ok(MovePattern {
            kind: PieceKind::King,
            destination: Location::at(file, color.home_rank()),
            file: Some(KING_HOME_FILE),
            rank: Some(color.home_rank()),
        });
    }

    if !stripped.is_ascii() {
        return Err(MoveError::invalid(input, "unexpected characters"));
    }

    let token = if stripped.len() == 2 {
        format!("p{stripped}")
    } else {
        stripped
    };
    if !(3..=5).contains(&token.len()) {
        return Err(MoveError::invalid(input, "expected 2 to 5 characters"));
    }

    let bytes = token.as_bytes();
    let kind = PieceKind::from_symbol(bytes[0] as char)
        .ok_or_else(|| MoveError::invalid(input, format!("unknown piece '{}'", bytes[0] as char)))?;
    let destination: Location = token[token.len() - 2..]
        .parse()
        .map_err(|_| MoveError::invalid(input, "destination is not a square"))?;

    let (file, rank) = match &bytes[1..bytes.len() - 2] {
        [] => (None, None),
        [single] => match single.to_ascii_lowercase() {
            f @ b'a'..=b'h' => (Some((f - b'a') as i8), None),
            r @ b'1'..=b'8' => (None, Some((r - b'1') as i8)),
            other => {
                return Err(MoveError::invalid(
                    input,
                    format!("'{}' is neither a file nor a rank", other as char),
                ))
            }
        },
        [_, _] => {
            let origin: Location = token[1..3]
                .parse()
                .map_err(|_| MoveError::invalid(input, "origin is not a square"))?;
            (Some(origin.x()), Some(origin.y()))
        }
        _ => return Err(MoveError::invalid(input, "too many disambiguation characters")),
    };

    Ok(MovePattern {
        kind,
        destination,
        file,
        rank,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loc(name: &str) -> Location {
        name.parse().expect("test square should parse")
    }

    fn play(board: &Board, text: &str) -> Board {
        let color = board.side_to_move();
        let mv = Move::parse(board, color, text).expect("test move should parse");
        board.apply(&mv)
    }

    #[test]
    fn parses_pawn_and_piece_moves() {
        let board = Board::new();

        let pawn = Move::parse(&board, Color::White, "e4").expect("e4");
        assert_eq!((pawn.origin(), pawn.destination()), (loc("e2"), loc("e4")));

        let knight = Move::parse(&board, Color::White, "Nf3").expect("Nf3");
        assert_eq!(knight.origin(), loc("g1"));

        let lower = Move::parse(&board, Color::White, "nf3").expect("nf3");
        assert_eq!(lower, knight);

        let black = Move::parse(&board, Color::Black, "nc6").expect("nc6");
        assert_eq!(black.origin(), loc("b8"));
    }

    #[test]
    fn rejects_malformed_or_unreachable_input() {
        let board = Board::new();
        for text in ["", "x", "e9", "Ke2", "e5", "pe2e4e5", "Qz4", "é4", "Je4"] {
            assert!(
                matches!(
                    Move::parse(&board, Color::White, text),
                    Err(MoveError::InvalidMove { .. })
                ),
                "{text} should be invalid"
            );
        }
    }

    #[test]
    fn capture_and_check_marks_are_ignored() {
        let board = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let plain = Move::parse(&board, Color::White, "pd5").expect("pd5");
        let marked = Move::parse(&board, Color::White, "pxd5+").expect("pxd5+");
        assert_eq!(plain, marked);
        assert!(marked.is_capture());
    }

    #[test]
    fn ambiguity_needs_disambiguation() {
        let board = Board::from_fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1").expect("FEN should parse");

        let err = Move::parse(&board, Color::White, "Rf1").expect_err("two rooks reach f1");
        assert!(matches!(err, MoveError::AmbiguousMove { candidates: 2, .. }));

        let by_file = Move::parse(&board, Color::White, "Rhf1").expect("Rhf1");
        assert_eq!(by_file.origin(), loc("h1"));

        let by_square = Move::parse(&board, Color::White, "Ra1d1").expect("Ra1d1");
        assert_eq!(by_square.origin(), loc("a1"));
    }

    #[test]
    fn rank_disambiguation_selects_origin() {
        let board = Board::from_fen("4k3/8/8/R7/8/8/8/R3K3 w - - 0 1").expect("FEN should parse");
        assert!(Move::parse(&board, Color::White, "Ra3").is_err());

        let from_first = Move::parse(&board, Color::White, "R1a3").expect("R1a3");
        assert_eq!(from_first.origin(), loc("a1"));
    }

    #[test]
    fn legality_narrows_ambiguous_candidates() {
        // The e2 knight is pinned to its king, so only the b5 knight can legally reach d4.
        let board = Board::from_fen("4r1k1/8/8/1N6/8/8/4N3/4K3 w - - 0 1")
            .expect("FEN should parse");
        let mv = Move::parse(&board, Color::White, "Nd4").expect("only one legal knight");
        assert_eq!(mv.origin(), loc("b5"));
    }

    #[test]
    fn castling_tokens_resolve_for_either_side() {
        let board = Board::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
            .expect("FEN should parse");

        let short = Move::parse(&board, Color::White, "0-0").expect("0-0");
        assert!(short.is_kingside_castle());
        assert_eq!(short.destination(), loc("g1"));

        let long = Move::parse(&board, Color::Black, "O-O-O").expect("O-O-O");
        assert!(long.is_queenside_castle());
        assert_eq!(long.destination(), loc("c8"));
        assert_eq!(long.algebraic_notation(), "0-0-0");
    }

    #[test]
    fn canonical_notation_round_trips_every_legal_move() {
        let positions = [
            Board::new(),
            Board::from_fen("r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1")
                .expect("kiwipete"),
            Board::from_fen("rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3")
                .expect("en passant position"),
        ];
        for board in &positions {
            let color = board.side_to_move();
            for mv in board.legal_moves(color) {
                let text = mv.algebraic_notation();
                let parsed = Move::parse(board, color, &text).expect("canonical text should parse");
                assert_eq!(&parsed, mv, "{text}");
                assert_eq!(parsed.flags(), mv.flags(), "{text}");
            }
        }
    }

    #[test]
    fn notation_drives_a_short_game() {
        let mut board = Board::new();
        for text in ["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "0-0"] {
            board = play(&board, text);
        }
        assert!(board.piece_at(loc("g1")).is(Color::White, PieceKind::King));
        assert!(board.piece_at(loc("f1")).is(Color::White, PieceKind::Rook));
    }
}
