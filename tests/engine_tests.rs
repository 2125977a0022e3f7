//! Engine Module Tests
//!
//! Tests for per-piece movement rules, path clearing and destination sets.

use hotseat_chess::core::bitboard::Bitboard;
use hotseat_chess::core::board::{Board, Color, Coord, Piece, PieceType};
use hotseat_chess::engine::movegen::MoveGen;

fn at(row: i32, col: i32) -> Coord {
    Coord::new(row, col).unwrap()
}

fn board(placement: &str) -> Board {
    Board::from_placement(placement).unwrap()
}

/// A board with every cell filled at random (roughly 60% occupied)
fn random_board() -> Board {
    let mut board = Board::empty();
    for coord in Coord::all() {
        let roll = rand::random::<u8>() % 20;
        if roll < 12 {
            let piece_type = PieceType::ALL[usize::from(roll % 6)];
            let color = if roll < 6 { Color::White } else { Color::Black };
            board.put_piece(Piece::new(piece_type, color), coord);
        }
    }
    board
}

fn cells_between(from: Coord, to: Coord) -> Vec<Coord> {
    let d_row = i32::from(to.row()) - i32::from(from.row());
    let d_col = i32::from(to.col()) - i32::from(from.col());
    let steps = d_row.abs().max(d_col.abs());
    (1..steps)
        .filter_map(|i| from.offset(d_row.signum() * i, d_col.signum() * i))
        .collect()
}

// ============================================================================
// Scenario Tests
// ============================================================================

#[test]
fn test_opening_pawn_push() {
    let board = Board::startpos();
    assert!(MoveGen::is_legal(&board, at(6, 4), at(4, 4)));
    assert!(MoveGen::is_legal(&board, at(6, 4), at(5, 4)));
}

#[test]
fn test_knight_jump_over_pieces() {
    let board = Board::startpos();
    assert!(MoveGen::is_legal(&board, at(7, 1), at(5, 2)));
    assert!(MoveGen::is_legal(&board, at(7, 1), at(5, 0)));
    assert!(!MoveGen::is_legal(&board, at(7, 1), at(6, 3)));
}

#[test]
fn test_blocked_bishop() {
    let board = Board::startpos();
    assert!(!MoveGen::is_legal(&board, at(7, 2), at(5, 0)));
    assert!(MoveGen::legal_destinations(&board, at(7, 2)).is_empty());
}

#[test]
fn test_startpos_destinations() {
    let board = Board::startpos();
    let pawn: Bitboard = [at(5, 4), at(4, 4)].into_iter().collect();
    assert_eq!(MoveGen::legal_destinations(&board, at(6, 4)), pawn);
    let knight: Bitboard = [at(2, 5), at(2, 7)].into_iter().collect();
    assert_eq!(MoveGen::legal_destinations(&board, at(0, 6)), knight);
    assert!(MoveGen::legal_destinations(&board, at(7, 0)).is_empty());
    assert!(MoveGen::legal_destinations(&board, at(0, 4)).is_empty());
}

// ============================================================================
// Pawn Tests
// ============================================================================

#[test]
fn test_pawn_double_step_ignores_jumped_cell() {
    // A black knight sits right in front of the e2 pawn; e4 is empty.
    let b = board("4k3/8/8/8/8/4n3/4P3/4K3");
    assert!(MoveGen::is_legal(&b, at(6, 4), at(4, 4)));
    assert!(!MoveGen::is_legal(&b, at(6, 4), at(5, 4)));

    // Same for black, blocked by its own piece.
    let b = board("4k3/3p4/3n4/8/8/8/8/4K3");
    assert!(MoveGen::is_legal(&b, at(1, 3), at(3, 3)));
}

#[test]
fn test_pawn_double_step_needs_empty_destination() {
    let b = board("4k3/8/8/8/4p3/8/4P3/4K3");
    assert!(!MoveGen::is_legal(&b, at(6, 4), at(4, 4)));
    assert!(MoveGen::is_legal(&b, at(6, 4), at(5, 4)));
}

#[test]
fn test_pawn_double_step_only_from_start_row() {
    let b = board("4k3/8/8/8/8/4P3/8/4K3");
    assert!(MoveGen::is_legal(&b, at(5, 4), at(4, 4)));
    assert!(!MoveGen::is_legal(&b, at(5, 4), at(3, 4)));
}

#[test]
fn test_pawn_cannot_capture_forward() {
    let b = board("4k3/8/8/8/8/4p3/4P3/4K3");
    assert!(!MoveGen::is_legal(&b, at(6, 4), at(5, 4)));
}

#[test]
fn test_pawn_diagonal_capture() {
    let b = board("4k3/8/8/8/8/3p1p2/4P3/4K3");
    assert!(MoveGen::is_legal(&b, at(6, 4), at(5, 3)));
    assert!(MoveGen::is_legal(&b, at(6, 4), at(5, 5)));

    // No diagonal step onto an empty cell.
    let b = board("4k3/8/8/8/8/8/4P3/4K3");
    assert!(!MoveGen::is_legal(&b, at(6, 4), at(5, 3)));
}

#[test]
fn test_pawn_never_moves_backward_or_sideways() {
    let b = board("4k3/8/8/3p4/4P3/8/8/4K3");
    assert!(!MoveGen::is_legal(&b, at(4, 4), at(5, 4)));
    assert!(!MoveGen::is_legal(&b, at(4, 4), at(4, 3)));
    assert!(!MoveGen::is_legal(&b, at(4, 4), at(5, 3)));
    // The black pawn on d5 moves toward row 7.
    assert!(MoveGen::is_legal(&b, at(3, 3), at(4, 3)));
    assert!(MoveGen::is_legal(&b, at(3, 3), at(4, 4)));
    assert!(!MoveGen::is_legal(&b, at(3, 3), at(2, 3)));
}

#[test]
fn test_black_pawn_opening() {
    let board = Board::startpos();
    assert!(MoveGen::is_legal(&board, at(1, 3), at(2, 3)));
    assert!(MoveGen::is_legal(&board, at(1, 3), at(3, 3)));
    assert!(!MoveGen::is_legal(&board, at(1, 3), at(4, 3)));
}

// ============================================================================
// Sliding Piece Tests
// ============================================================================

#[test]
fn test_rook_lines() {
    let b = board("4k3/8/8/8/3R4/8/8/4K3");
    assert!(MoveGen::is_legal(&b, at(4, 3), at(4, 7)));
    assert!(MoveGen::is_legal(&b, at(4, 3), at(0, 3)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(5, 4)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(2, 4)));
}

#[test]
fn test_bishop_diagonals() {
    let b = board("4k3/8/8/8/3B4/8/8/4K3");
    assert!(MoveGen::is_legal(&b, at(4, 3), at(0, 7)));
    assert!(MoveGen::is_legal(&b, at(4, 3), at(7, 0)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(4, 6)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(2, 4)));
}

#[test]
fn test_queen_combines_rook_and_bishop() {
    let b = board("4k3/8/8/8/3Q4/8/8/4K3");
    assert!(MoveGen::is_legal(&b, at(4, 3), at(4, 0)));
    assert!(MoveGen::is_legal(&b, at(4, 3), at(1, 6)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(2, 4)));
}

#[test]
fn test_slider_captures_first_blocker_only() {
    let b = board("4k3/8/8/8/1p1R1p1p/8/8/4K3");
    assert!(MoveGen::is_legal(&b, at(4, 3), at(4, 5)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(4, 7)));
    assert!(MoveGen::is_legal(&b, at(4, 3), at(4, 1)));
    assert!(!MoveGen::is_legal(&b, at(4, 3), at(4, 0)));
}

#[test]
fn test_sliding_obstruction() {
    let from = at(4, 4);
    for piece_type in [PieceType::Rook, PieceType::Bishop, PieceType::Queen] {
        let mut open = Board::empty();
        open.put_piece(Piece::new(piece_type, Color::White), from);

        for to in MoveGen::legal_destinations(&open, from) {
            for blocker in cells_between(from, to) {
                for color in Color::ALL {
                    let mut blocked = open.clone();
                    blocked.put_piece(Piece::new(PieceType::Pawn, color), blocker);
                    assert!(
                        !MoveGen::is_legal(&blocked, from, to),
                        "{piece_type:?} {from:?}->{to:?} through {blocker:?}"
                    );
                }
            }
        }
    }
}

#[test]
fn test_path_clear() {
    let board = Board::startpos();
    assert!(!MoveGen::is_path_clear(&board, at(7, 0), at(4, 0)));
    assert!(MoveGen::is_path_clear(&board, at(6, 0), at(4, 0)));
    assert!(MoveGen::is_path_clear(&board, at(7, 0), at(6, 0)));
    assert!(MoveGen::is_path_clear(&board, at(5, 0), at(2, 3)));
    assert!(!MoveGen::is_path_clear(&board, at(5, 0), at(4, 2)));
}

// ============================================================================
// King and Knight Tests
// ============================================================================

#[test]
fn test_king_single_steps() {
    let b = board("8/8/8/3k4/8/8/8/4K3");
    assert!(MoveGen::is_legal(&b, at(3, 3), at(2, 2)));
    assert!(MoveGen::is_legal(&b, at(3, 3), at(4, 3)));
    assert!(!MoveGen::is_legal(&b, at(3, 3), at(1, 3)));
    assert!(!MoveGen::is_legal(&b, at(3, 3), at(5, 5)));
}

#[test]
fn test_king_may_step_next_to_enemy_king() {
    // No check detection: adjacency and capture of a king are both legal.
    let b = board("8/8/8/3k4/4K3/8/8/8");
    assert!(MoveGen::is_legal(&b, at(4, 4), at(3, 3)));
    assert!(MoveGen::is_legal(&b, at(4, 4), at(3, 4)));
}

#[test]
fn test_knight_shapes() {
    let b = board("4k3/8/8/8/3N4/8/8/4K3");
    let dests = MoveGen::legal_destinations(&b, at(4, 3));
    assert_eq!(dests.count(), 8);
    assert!(dests.contains(at(2, 2)));
    assert!(dests.contains(at(5, 5)));
    assert!(!dests.contains(at(2, 5)));
}

// ============================================================================
// Invariant Tests
// ============================================================================

#[test]
fn test_self_capture_never_legal() {
    for _ in 0..50 {
        let board = random_board();
        for (from, mover) in board.pieces() {
            for (to, target) in board.pieces() {
                if mover.color == target.color {
                    assert!(!MoveGen::is_legal(&board, from, to), "{board:?} {from:?}->{to:?}");
                }
            }
        }
    }
}

#[test]
fn test_destinations_never_hold_own_pieces() {
    for _ in 0..50 {
        let board = random_board();
        for color in Color::ALL {
            let own = board.color(color);
            for (from, piece) in board.pieces().filter(|(_, p)| p.color == color) {
                let dests = MoveGen::destinations(&board, from);
                assert!((dests.all() & own).is_empty(), "{piece:?} on {from:?}");
                assert_eq!(dests.captures & !board.color(!color), Bitboard::EMPTY);
                assert_eq!(dests.quiet & board.occupied(), Bitboard::EMPTY);
            }
        }
    }
}

#[test]
fn test_total_over_all_pairs() {
    let board = random_board();
    for from in Coord::all() {
        for to in Coord::all() {
            let legal = MoveGen::is_legal(&board, from, to);
            if board.is_empty_at(from) || from == to {
                assert!(!legal);
            }
        }
    }
}

#[test]
fn test_raw_bounds() {
    let board = Board::startpos();
    assert!(MoveGen::is_legal_raw(&board, (6, 4), (4, 4)));
    assert!(!MoveGen::is_legal_raw(&board, (6, 0), (5, -1)));
    assert!(!MoveGen::is_legal_raw(&board, (7, 1), (9, 2)));
    assert!(!MoveGen::is_legal_raw(&board, (-3, 0), (0, 0)));
}

#[test]
fn test_legal_moves_by_color() {
    let b = board("4k3/8/8/8/8/8/8/4K3");
    assert_eq!(MoveGen::legal_moves(&b, Color::White).len(), 5);
    assert_eq!(MoveGen::legal_moves(&b, Color::Black).len(), 5);
    assert!(MoveGen::legal_moves(&Board::empty(), Color::White).is_empty());
}
