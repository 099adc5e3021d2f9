//! Piece movement patterns and attack detection.
//!
//! Attacks follow how pieces capture: sliders stop at the first occupied
//! square, pawns attack their two forward diagonals whether or not anything
//! stands there, and castling never attacks anything.
//!
//! # Examples
//!
//! ```
//! use caissa::{attacks, Board, Color, Square};
//!
//! let board = Board::new();
//! assert!(attacks::is_square_attacked(&board, Square::F3, Color::White));
//! assert!(!attacks::is_square_attacked(&board, Square::E4, Color::White));
//! assert!(!attacks::is_king_in_check(&board, Color::White));
//! ```

use arrayvec::ArrayVec;

use crate::{Board, Color, Piece, Role, Square};

/// A (file, rank) step.
pub type Delta = (i32, i32);

pub const KNIGHT_DELTAS: [Delta; 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KING_DELTAS: [Delta; 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

pub const ROOK_DIRECTIONS: [Delta; 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

pub const BISHOP_DIRECTIONS: [Delta; 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Squares attacking or attacked from a square. Any square has at most 26
/// attackers on a legal board.
pub type Squares = ArrayVec<Square, 32>;

/// Iterator over the squares reached by sliding from a square in a fixed
/// direction. The first occupied square is the last one yielded.
#[derive(Clone, Debug)]
pub struct Ray<'a> {
    board: &'a Board,
    next: Option<Square>,
    delta: Delta,
}

/// Slides from `from` (exclusive) in the direction of `delta`.
///
/// # Examples
///
/// ```
/// use caissa::{attacks, Board, Square};
///
/// let board = Board::new();
/// let mut ray = attacks::ray(&board, Square::D1, (0, 1));
/// assert_eq!(ray.next(), Some(Square::D2));
/// assert_eq!(ray.next(), None);
/// ```
pub fn ray(board: &Board, from: Square, delta: Delta) -> Ray<'_> {
    Ray {
        board,
        next: from.offset(delta.0, delta.1),
        delta,
    }
}

impl Iterator for Ray<'_> {
    type Item = Square;

    fn next(&mut self) -> Option<Square> {
        let sq = self.next?;
        self.next = if self.board.is_occupied(sq) {
            None
        } else {
            sq.offset(self.delta.0, self.delta.1)
        };
        Some(sq)
    }
}

/// Squares attacked by a pawn of the given color standing on `sq`.
pub fn pawn_attacks(color: Color, sq: Square) -> impl Iterator<Item = Square> {
    [-1, 1]
        .into_iter()
        .filter_map(move |file_delta| sq.offset(file_delta, color.forward()))
}

fn is_slider(piece: Option<Piece>, by: Color, role: Role) -> bool {
    matches!(piece, Some(p) if p.color == by && (p.role == role || p.role == Role::Queen))
}

fn attacking(board: &Board, target: Square, by: Color) -> impl Iterator<Item = Square> + '_ {
    let pawns = pawn_attacks(by.other(), target)
        .filter(move |&sq| board.piece_at(sq) == Some(by.pawn()));
    let knights = KNIGHT_DELTAS
        .into_iter()
        .filter_map(move |(df, dr)| target.offset(df, dr))
        .filter(move |&sq| board.piece_at(sq) == Some(by.knight()));
    let kings = KING_DELTAS
        .into_iter()
        .filter_map(move |(df, dr)| target.offset(df, dr))
        .filter(move |&sq| board.piece_at(sq) == Some(by.king()));
    let rooks = ROOK_DIRECTIONS
        .into_iter()
        .filter_map(move |delta| ray(board, target, delta).last())
        .filter(move |&sq| is_slider(board.piece_at(sq), by, Role::Rook));
    let bishops = BISHOP_DIRECTIONS
        .into_iter()
        .filter_map(move |delta| ray(board, target, delta).last())
        .filter(move |&sq| is_slider(board.piece_at(sq), by, Role::Bishop));

    pawns.chain(knights).chain(kings).chain(rooks).chain(bishops)
}

/// Squares of all pieces of color `by` that attack `target`.
///
/// # Examples
///
/// ```
/// use caissa::{attacks, Board, Color, Square};
///
/// let attackers = attacks::attackers(&Board::new(), Square::D2, Color::White);
/// assert_eq!(attackers.len(), 4); // b1, c1, d1, e1
/// ```
pub fn attackers(board: &Board, target: Square, by: Color) -> Squares {
    let mut squares: Squares = attacking(board, target, by).collect();
    squares.sort_unstable();
    squares
}

/// Tests if any piece of color `by` attacks `target`.
pub fn is_square_attacked(board: &Board, target: Square, by: Color) -> bool {
    attacking(board, target, by).next().is_some()
}

/// Tests if the king of the given color is attacked. A board without such a
/// king is not in check.
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    board
        .king_of(color)
        .is_some_and(|king| is_square_attacked(board, king, color.other()))
}
