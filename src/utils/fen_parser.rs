//! FEN-to-Board parser.
//!
//! Builds a board from a Forsyth-Edwards Notation string. The castling,
//! en-passant and clock fields are mapped onto the board's own bookkeeping:
//! - A missing castling right marks that rook's home square as moved (and the
//!   king's, when the side has no rights at all).
//! - The en-passant target square is translated to the pawn standing behind it.
//! - The fullmove number and side to move become the ply counter.
//!
//! The two clock fields are optional.

use crate::board_state::board::Board;
use crate::board_state::chess_rules::{KING_HOME_FILE, KINGSIDE_ROOK_FILE, QUEENSIDE_ROOK_FILE};
use crate::board_state::chess_types::*;
use crate::board_state::location::Location;
use crate::errors::{LayoutError, LayoutResult};

pub fn parse_fen(fen: &str) -> LayoutResult<Board> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or(LayoutError::MissingField("piece placement"))?;
    let side_part = parts.next().ok_or(LayoutError::MissingField("side to move"))?;
    let castling_part = parts.next().ok_or(LayoutError::MissingField("castling"))?;
    let en_passant_part = parts.next().ok_or(LayoutError::MissingField("en passant"))?;
    let halfmove_part = parts.next();
    let fullmove_part = parts.next();

    if parts.next().is_some() {
        return Err(LayoutError::TrailingFields);
    }

    let side = parse_side_to_move(side_part)?;
    if let Some(halfmove) = halfmove_part {
        halfmove
            .parse::<u32>()
            .map_err(|_| invalid_field("halfmove clock", halfmove))?;
    }
    let iteration = match fullmove_part {
        Some(text) => text
            .parse::<u32>()
            .ok()
            .filter(|&n| n >= 1)
            .and_then(|n| (n - 1).checked_mul(2))
            .and_then(|plies| plies.checked_add(side.index() as u32))
            .ok_or_else(|| invalid_field("fullmove number", text))?,
        None => side.index() as u32,
    };

    let mut board = Board::empty(iteration);
    parse_board(board_part, &mut board)?;
    apply_castling_rights(castling_part, &mut board)?;
    board.set_en_passant(parse_en_passant_square(en_passant_part)?);
    board.recount_material();

    Ok(board)
}

fn invalid_field(field: &'static str, value: &str) -> LayoutError {
    LayoutError::InvalidField {
        field,
        value: value.to_owned(),
    }
}

fn parse_board(board_part: &str, board: &mut Board) -> LayoutResult<()> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(LayoutError::InvalidPlacement(
            "board layout must contain 8 ranks".to_owned(),
        ));
    }

    for (fen_rank_idx, rank_str) in ranks.iter().enumerate() {
        let y = 7 - fen_rank_idx as i8;
        let mut x = 0i8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(LayoutError::InvalidPlacement(format!(
                        "invalid empty-square count '{ch}'"
                    )));
                }
                x += empty_count as i8;
                if x > 8 {
                    return Err(LayoutError::InvalidPlacement(format!(
                        "rank '{rank_str}' has too many files"
                    )));
                }
                continue;
            }

            let piece = PieceCode::from_fen_char(ch).ok_or_else(|| {
                LayoutError::InvalidPlacement(format!("invalid piece character '{ch}'"))
            })?;
            let square = Location::new(x, y).ok_or_else(|| {
                LayoutError::InvalidPlacement(format!("rank '{rank_str}' has too many files"))
            })?;
            board.put(square, piece);
            x += 1;
        }

        if x != 8 {
            return Err(LayoutError::InvalidPlacement(format!(
                "rank '{rank_str}' does not sum to 8 files"
            )));
        }
    }

    Ok(())
}

fn parse_side_to_move(side_part: &str) -> LayoutResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid_field("side to move", side_part)),
    }
}

fn apply_castling_rights(castling_part: &str, board: &mut Board) -> LayoutResult<()> {
    // [color][kingside, queenside]
    let mut rights = [[false; 2]; 2];
    if castling_part != "-" {
        for ch in castling_part.chars() {
            match ch {
                'K' => rights[Color::White.index()][0] = true,
                'Q' => rights[Color::White.index()][1] = true,
                'k' => rights[Color::Black.index()][0] = true,
                'q' => rights[Color::Black.index()][1] = true,
                _ => return Err(invalid_field("castling", castling_part)),
            }
        }
    }

    for color in ALL_COLORS {
        let rank = color.home_rank();
        let [kingside, queenside] = rights[color.index()];
        if !kingside {
            board.mark_moved(Location::at(KINGSIDE_ROOK_FILE, rank));
        }
        if !queenside {
            board.mark_moved(Location::at(QUEENSIDE_ROOK_FILE, rank));
        }
        if !kingside && !queenside {
            board.mark_moved(Location::at(KING_HOME_FILE, rank));
        }
    }

    Ok(())
}

// FEN names the square passed over; the board tracks the pawn that passed it.
fn parse_en_passant_square(en_passant_part: &str) -> LayoutResult<Option<Location>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    let target: Location = en_passant_part
        .parse()
        .map_err(|_| invalid_field("en passant", en_passant_part))?;
    let pawn = match target.y() {
        5 => target.offset(0, -1),
        2 => target.offset(0, 1),
        _ => None,
    };
    pawn.map(Some)
        .ok_or_else(|| invalid_field("en passant", en_passant_part))
}
