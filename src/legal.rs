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

//! Legal move filtering.
//!
//! A raw move is legal if, after playing it on a scratch copy of the board,
//! the mover's king is not attacked. The simulation includes the full board
//! effect of the move, so an en passant capture that uncovers a check on
//! the mover's own king is rejected.

use arrayvec::ArrayVec;

use crate::{
    attacks,
    movegen::{self, CastlingMode, Targets},
    Board, Color, Move, MoveList, Setup, Square,
};

/// Checks that playing `m` does not leave the king of `color` attacked.
pub(crate) fn is_safe(board: &Board, color: Color, m: Move) -> bool {
    let mut after = board.clone();
    after.play_unchecked(m);
    !attacks::is_king_in_check(&after, color)
}

/// Appends the legal moves of the piece on `from` to `moves`.
pub(crate) fn gen_legal_moves(setup: &Setup, from: Square, moves: &mut MoveList) {
    let Some(color) = setup.board.color_at(from) else {
        return;
    };
    let mut raw = MoveList::new();
    movegen::gen_moves(setup, from, CastlingMode::Include, &mut raw);
    moves.extend(raw.into_iter().filter(|&m| is_safe(&setup.board, color, m)));
}

/// Legal target squares of the piece on `from`, in raw generation order.
///
/// # Examples
///
/// ```
/// use caissa::{legal::legal_targets, Setup, Square};
///
/// let setup = Setup::default();
/// assert_eq!(legal_targets(&setup, Square::B1).as_slice(), &[Square::C3, Square::A3]);
/// ```
pub fn legal_targets(setup: &Setup, from: Square) -> Targets {
    let mut moves = MoveList::new();
    gen_legal_moves(setup, from, &mut moves);
    moves.into_iter().map(Move::to).collect()
}

/// Legal targets grouped by origin square.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct LegalMoves {
    entries: ArrayVec<(Square, Targets), 64>,
}

impl LegalMoves {
    /// Iterates over origins with their non-empty target lists, in square
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (Square, &Targets)> + '_ {
        self.entries.iter().map(|(from, targets)| (*from, targets))
    }

    /// Number of origins with at least one legal target.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, from: Square) -> Option<&Targets> {
        self.entries
            .iter()
            .find(|(sq, _)| *sq == from)
            .map(|(_, targets)| targets)
    }

    pub fn contains(&self, from: Square, to: Square) -> bool {
        self.get(from).is_some_and(|targets| targets.contains(&to))
    }

    /// Total number of (origin, target) pairs.
    pub fn count(&self) -> usize {
        self.entries.iter().map(|(_, targets)| targets.len()).sum()
    }
}

/// Every origin holding a piece of `color` with at least one legal target.
///
/// # Examples
///
/// ```
/// use caissa::{legal::all_legal_targets, Color, Setup};
///
/// let moves = all_legal_targets(&Setup::default(), Color::Black);
/// assert_eq!(moves.len(), 10); // 8 pawns and 2 knights
/// assert_eq!(moves.count(), 20);
/// ```
pub fn all_legal_targets(setup: &Setup, color: Color) -> LegalMoves {
    let mut entries = ArrayVec::new();
    for from in setup.board.occupied_by(color) {
        let targets = legal_targets(setup, from);
        if !targets.is_empty() {
            entries.push((from, targets));
        }
    }
    LegalMoves { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Castles, Piece};

    fn setup_with(turn: Color, pieces: &[(Square, Piece)]) -> Setup {
        Setup {
            board: pieces.iter().copied().collect(),
            turn,
            castles: Castles::none(),
            ep_pawn: None,
        }
    }

    #[test]
    fn test_pinned_piece() {
        let setup = setup_with(
            Color::White,
            &[
                (Square::E1, Color::White.king()),
                (Square::E2, Color::White.knight()),
                (Square::E8, Color::Black.rook()),
            ],
        );
        assert!(legal_targets(&setup, Square::E2).is_empty());
        assert!(!legal_targets(&setup, Square::E1).contains(&Square::E2));
    }

    #[test]
    fn test_king_cannot_step_into_pawn_attack() {
        let setup = setup_with(
            Color::White,
            &[
                (Square::E4, Color::White.king()),
                (Square::D6, Color::Black.pawn()),
            ],
        );
        let targets = legal_targets(&setup, Square::E4);
        assert!(!targets.contains(&Square::E5));
        assert!(!targets.contains(&Square::C5));
        assert!(targets.contains(&Square::D5));
    }

    #[test]
    fn test_en_passant_discovered_check() {
        let mut setup = setup_with(
            Color::White,
            &[
                (Square::A5, Color::White.king()),
                (Square::B5, Color::White.pawn()),
                (Square::C5, Color::Black.pawn()),
                (Square::H5, Color::Black.rook()),
                (Square::E8, Color::Black.king()),
            ],
        );
        setup.ep_pawn = Some(Square::C5);
        let targets = legal_targets(&setup, Square::B5);
        assert_eq!(targets.as_slice(), &[Square::B6]);
    }

    #[test]
    fn test_must_resolve_check() {
        let setup = setup_with(
            Color::White,
            &[
                (Square::E1, Color::White.king()),
                (Square::A2, Color::White.rook()),
                (Square::E5, Color::Black.queen()),
                (Square::H8, Color::Black.king()),
            ],
        );
        assert_eq!(legal_targets(&setup, Square::A2).as_slice(), &[Square::E2]);

        let moves = all_legal_targets(&setup, Color::White);
        assert_eq!(moves.get(Square::A2).map(|t| t.len()), Some(1));
        assert!(moves.contains(Square::E1, Square::D1));
        assert!(!moves.contains(Square::E1, Square::E2));
    }

    #[test]
    fn test_empty_origin() {
        assert!(legal_targets(&Setup::default(), Square::E4).is_empty());
    }
}
