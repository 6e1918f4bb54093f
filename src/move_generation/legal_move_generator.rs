//! Legal move generation.
//!
//! Filters the pseudo-legal list of a side by simulation: each candidate is
//! applied and rejected if the mover's king could then be captured.

use crate::board_state::board::Board;
use crate::board_state::chess_types::Color;
use crate::moves::chess_move::Move;

pub fn generate_legal_moves(board: &Board, color: Color) -> Vec<Move> {
    board
        .pseudo_legal_moves(color)
        .iter()
        .filter(|mv| leaves_king_safe(board, color, mv))
        .copied()
        .collect()
}

// The child is dropped immediately, so its move lists are never built.
fn leaves_king_safe(board: &Board, color: Color, mv: &Move) -> bool {
    !board.apply(mv).player_has_check(color)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board_state::location::Location;

    fn loc(name: &str) -> Location {
        name.parse().expect("test square should parse")
    }

    fn assert_no_move_exposes_king(board: &Board, color: Color) {
        for mv in board.legal_moves(color) {
            let child = board.apply(mv);
            assert!(!child.player_has_check(color), "{mv} leaves the king capturable");
        }
    }

    #[test]
    fn legal_moves_never_leave_the_king_capturable() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1",
        ];
        for fen in fens {
            let board = Board::from_fen(fen).expect("FEN should parse");
            assert_no_move_exposes_king(&board, Color::White);
            assert_no_move_exposes_king(&board, Color::Black);
        }
    }

    #[test]
    fn pinned_piece_has_no_legal_moves() {
        let board = Board::from_fen("4r1k1/8/8/8/8/8/4N3/4K3 w - - 0 1").expect("FEN should parse");
        assert!(board
            .legal_moves(Color::White)
            .iter()
            .all(|mv| mv.origin() != loc("e2")));
        assert!(board
            .pseudo_legal_moves(Color::White)
            .iter()
            .any(|mv| mv.origin() == loc("e2")));
    }

    #[test]
    fn repeated_queries_return_identical_lists() {
        let board = Board::new();
        let first = board.legal_moves(Color::White).to_vec();
        let second = board.legal_moves(Color::White).to_vec();
        assert_eq!(first, second);
        assert_eq!(generate_legal_moves(&board, Color::White), first);
    }

    #[test]
    fn en_passant_expires_after_one_ply() {
        let mut board = Board::from_fen("4k3/3p4/8/4P3/8/8/8/4K3 b - - 0 1")
            .expect("FEN should parse");
        for (text, expect_ep) in [("d5", true), ("Kd1", false), ("Ke7", false)] {
            let mv = Move::parse(&board, board.side_to_move(), text)
                .expect("test move should parse");
            board = board.apply(&mv);
            let has_ep = board.legal_moves(Color::White).iter().any(|mv| mv.is_en_passant());
            assert_eq!(has_ep, expect_ep, "after {text}");
        }
    }

    #[test]
    fn promotion_moves_are_legal_and_promote_to_queen() {
        let board = Board::from_fen("4k3/P7/8/8/8/8/8/4K3 w - - 0 1").expect("FEN should parse");
        let promotion = board
            .legal_moves(Color::White)
            .iter()
            .find(|mv| mv.is_promotion())
            .copied()
            .expect("a7a8 promotes");
        let child = board.apply(&promotion);
        assert!(child
            .piece_at(loc("a8"))
            .is(Color::White, crate::board_state::chess_types::PieceKind::Queen));
    }
}
