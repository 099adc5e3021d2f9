// This file is part of the caissa library.
// Copyright (C) 2026 Niklas Fiekas <niklas.fiekas@backscattering.de>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

//! Raw move generation.
//!
//! Raw moves follow how each piece moves, ignoring whether the mover's own
//! king is left in check. See [`legal`](crate::legal) for the filtered
//! version.

use arrayvec::ArrayVec;

use crate::{
    attacks::{self, Delta, BISHOP_DIRECTIONS, KING_DELTAS, KNIGHT_DELTAS, ROOK_DIRECTIONS},
    Board, CastlingSide, Color, File, Move, MoveList, Role, Setup, Square,
};

/// Target squares of the moves from one origin. A queen in the middle of an
/// empty board has 27, the most any single piece can have.
pub type Targets = ArrayVec<Square, 32>;

/// Whether king moves include castling.
///
/// Attack scans use [`CastlingMode::Ignore`], so that deciding whether a
/// square is attacked never depends on castling legality.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum CastlingMode {
    #[default]
    Include,
    Ignore,
}

impl CastlingMode {
    pub const fn is_include(self) -> bool {
        matches!(self, CastlingMode::Include)
    }
}

/// Generates the raw target squares of the piece on `from`, in generation
/// order. An empty square has none.
///
/// Moves are generated for the color of the piece standing on `from`,
/// regardless of the side to move.
///
/// # Examples
///
/// ```
/// use caissa::{movegen::{raw_moves, CastlingMode}, Setup, Square};
///
/// let setup = Setup::default();
/// assert_eq!(
///     raw_moves(&setup, Square::G1, CastlingMode::Include).as_slice(),
///     &[Square::H3, Square::F3]
/// );
/// assert!(raw_moves(&setup, Square::E4, CastlingMode::Include).is_empty());
/// ```
pub fn raw_moves(setup: &Setup, from: Square, mode: CastlingMode) -> Targets {
    let mut moves = MoveList::new();
    gen_moves(setup, from, mode, &mut moves);
    moves.into_iter().map(Move::to).collect()
}

/// Generates raw moves of the piece on `from` as full [`Move`] values.
/// Pawn moves onto the last rank carry no promotion role.
pub(crate) fn gen_moves(setup: &Setup, from: Square, mode: CastlingMode, moves: &mut MoveList) {
    let Some(piece) = setup.board.piece_at(from) else {
        return;
    };

    match piece.role {
        Role::Pawn => gen_pawn_moves(setup, from, piece.color, moves),
        Role::Knight => KnightTag::gen_moves(&setup.board, from, piece.color, moves),
        Role::Bishop => BishopTag::gen_moves(&setup.board, from, piece.color, moves),
        Role::Rook => RookTag::gen_moves(&setup.board, from, piece.color, moves),
        Role::Queen => QueenTag::gen_moves(&setup.board, from, piece.color, moves),
        Role::King => {
            KingTag::gen_moves(&setup.board, from, piece.color, moves);
            if mode.is_include() {
                gen_castling_moves(setup, from, piece.color, moves);
            }
        }
    }
}

fn normal(board: &Board, role: Role, from: Square, to: Square) -> Move {
    Move::Normal {
        role,
        from,
        capture: board.role_at(to),
        to,
        promotion: None,
    }
}

trait Stepper {
    const ROLE: Role;
    const DELTAS: [Delta; 8];

    fn gen_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
        for (file_delta, rank_delta) in Self::DELTAS {
            if let Some(to) = from.offset(file_delta, rank_delta) {
                if board.color_at(to) != Some(color) {
                    moves.push(normal(board, Self::ROLE, from, to));
                }
            }
        }
    }
}

trait Slider {
    const ROLE: Role;
    const DIRECTIONS: &'static [Delta];

    fn gen_moves(board: &Board, from: Square, color: Color, moves: &mut MoveList) {
        for &delta in Self::DIRECTIONS {
            for to in attacks::ray(board, from, delta) {
                if board.color_at(to) != Some(color) {
                    moves.push(normal(board, Self::ROLE, from, to));
                }
            }
        }
    }
}

enum KnightTag {}
enum BishopTag {}
enum RookTag {}
enum QueenTag {}
enum KingTag {}

impl Stepper for KnightTag {
    const ROLE: Role = Role::Knight;
    const DELTAS: [Delta; 8] = KNIGHT_DELTAS;
}

impl Stepper for KingTag {
    const ROLE: Role = Role::King;
    const DELTAS: [Delta; 8] = KING_DELTAS;
}

impl Slider for BishopTag {
    const ROLE: Role = Role::Bishop;
    const DIRECTIONS: &'static [Delta] = &BISHOP_DIRECTIONS;
}

impl Slider for RookTag {
    const ROLE: Role = Role::Rook;
    const DIRECTIONS: &'static [Delta] = &ROOK_DIRECTIONS;
}

impl Slider for QueenTag {
    const ROLE: Role = Role::Queen;
    const DIRECTIONS: &'static [Delta] = &[
        ROOK_DIRECTIONS[0],
        ROOK_DIRECTIONS[1],
        ROOK_DIRECTIONS[2],
        ROOK_DIRECTIONS[3],
        BISHOP_DIRECTIONS[0],
        BISHOP_DIRECTIONS[1],
        BISHOP_DIRECTIONS[2],
        BISHOP_DIRECTIONS[3],
    ];
}

fn gen_pawn_moves(setup: &Setup, from: Square, color: Color, moves: &mut MoveList) {
    let board = &setup.board;
    let forward = color.forward();

    if let Some(single) = from.offset(0, forward) {
        if !board.is_occupied(single) {
            moves.push(normal(board, Role::Pawn, from, single));

            if from.rank() == color.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if !board.is_occupied(double) {
                        moves.push(normal(board, Role::Pawn, from, double));
                    }
                }
            }
        }
    }

    for file_delta in [-1, 1] {
        let Some(to) = from.offset(file_delta, forward) else {
            continue;
        };
        if board.color_at(to) == Some(color.other()) {
            moves.push(normal(board, Role::Pawn, from, to));
        }
    }

    gen_en_passant(setup, from, color, moves);
}

fn gen_en_passant(setup: &Setup, from: Square, color: Color, moves: &mut MoveList) {
    let Some(ep_pawn) = setup.ep_pawn else {
        return;
    };
    if ep_pawn.rank() != from.rank()
        || ep_pawn.file().distance(from.file()) != 1
        || setup.board.piece_at(ep_pawn) != Some(color.other().pawn())
    {
        return;
    }
    if let Some(to) = setup.ep_square() {
        if !setup.board.is_occupied(to) {
            moves.push(Move::EnPassant { from, to });
        }
    }
}

fn gen_castling_moves(setup: &Setup, king: Square, color: Color, moves: &mut MoveList) {
    let board = &setup.board;
    if king != Square::from_coords(File::E, color.backrank()) {
        return;
    }

    for side in CastlingSide::ALL {
        let rook = side.rook_from(color);
        if !setup.castles.has(color, side)
            || board.piece_at(rook) != Some(color.rook())
            || side.between(color).any(|sq| board.is_occupied(sq))
            || side
                .king_path(color)
                .into_iter()
                .any(|sq| attacks::is_square_attacked(board, sq, color.other()))
        {
            continue;
        }
        moves.push(Move::Castle { king, rook });
    }
}
