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

use bitflags::bitflags;

use crate::{Board, ByColor, CastlingSide, Color, File, Move, Role, Square};

bitflags! {
    /// Which of a side's castling pieces have left their original squares.
    #[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
    pub struct Moved: u8 {
        const KING = 1;
        const KING_SIDE_ROOK = 2;
        const QUEEN_SIDE_ROOK = 4;
    }
}

impl Moved {
    pub const fn rook(side: CastlingSide) -> Moved {
        match side {
            CastlingSide::KingSide => Moved::KING_SIDE_ROOK,
            CastlingSide::QueenSide => Moved::QUEEN_SIDE_ROOK,
        }
    }
}

/// Castling rights of both sides.
///
/// A side may castle as long as neither its king nor the rook on that side
/// has moved, and that rook has not been captured on its home corner.
///
/// # Examples
///
/// ```
/// use caissa::{Castles, CastlingSide, Color};
///
/// let mut castles = Castles::default();
/// assert!(castles.has(Color::White, CastlingSide::QueenSide));
///
/// castles.discard_side(Color::White, CastlingSide::QueenSide);
/// assert!(!castles.has(Color::White, CastlingSide::QueenSide));
/// assert!(castles.has(Color::White, CastlingSide::KingSide));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Castles {
    moved: ByColor<Moved>,
}

impl Castles {
    /// Full castling rights for both sides.
    pub fn new() -> Castles {
        Castles::default()
    }

    /// No castling rights at all.
    pub fn none() -> Castles {
        Castles {
            moved: ByColor::new_with(|_| Moved::all()),
        }
    }

    #[inline]
    pub fn moved(&self, color: Color) -> Moved {
        self.moved[color]
    }

    #[inline]
    pub fn has(&self, color: Color, side: CastlingSide) -> bool {
        !self.moved[color].intersects(Moved::KING | Moved::rook(side))
    }

    pub fn has_color(&self, color: Color) -> bool {
        CastlingSide::ALL.into_iter().any(|side| self.has(color, side))
    }

    pub fn is_empty(&self) -> bool {
        !Color::ALL.into_iter().any(|color| self.has_color(color))
    }

    pub fn discard_color(&mut self, color: Color) {
        self.moved[color].insert(Moved::KING);
    }

    pub fn discard_side(&mut self, color: Color, side: CastlingSide) {
        self.moved[color].insert(Moved::rook(side));
    }

    /// Records the effects of a move by `color` that was just committed.
    ///
    /// A king move (castling included) ends both of the mover's rights, and
    /// castling also marks the castled rook as moved. A piece leaving one of
    /// the mover's rook corners ends that side's right, and a piece arriving
    /// on one of the opponent's rook corners ends the opponent's right on
    /// that side.
    pub fn update(&mut self, color: Color, m: Move) {
        if m.role() == Role::King {
            self.discard_color(color);
        }
        if let Some(side) = m.castling_side() {
            self.discard_side(color, side);
        }

        for side in CastlingSide::ALL {
            if m.from() == side.rook_from(color) {
                self.discard_side(color, side);
            }
            if m.to() == side.rook_from(color.other()) {
                self.discard_side(color.other(), side);
            }
        }
    }

    /// Drops rights whose king or rook is not on its original square.
    pub fn retain_possible(&mut self, board: &Board) {
        for color in Color::ALL {
            let king = Square::from_coords(File::E, color.backrank());
            if board.piece_at(king) != Some(color.king()) {
                self.discard_color(color);
            }
            for side in CastlingSide::ALL {
                if board.piece_at(side.rook_from(color)) != Some(color.rook()) {
                    self.discard_side(color, side);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_king_move_discards_both_sides() {
        let mut castles = Castles::new();
        castles.update(
            Color::White,
            Move::Normal {
                role: Role::King,
                from: Square::E1,
                capture: None,
                to: Square::E2,
                promotion: None,
            },
        );
        assert!(!castles.has_color(Color::White));
        assert!(castles.has(Color::Black, CastlingSide::KingSide));
    }

    #[test]
    fn test_rook_capture_on_corner() {
        let mut castles = Castles::new();
        castles.update(
            Color::Black,
            Move::Normal {
                role: Role::Bishop,
                from: Square::B7,
                capture: Some(Role::Rook),
                to: Square::H1,
                promotion: None,
            },
        );
        assert!(!castles.has(Color::White, CastlingSide::KingSide));
        assert!(castles.has(Color::White, CastlingSide::QueenSide));
        assert!(castles.has_color(Color::Black));
    }

    #[test]
    fn test_castling_marks_king_and_rook() {
        let mut castles = Castles::new();
        castles.update(
            Color::Black,
            Move::Castle {
                king: Square::E8,
                rook: Square::H8,
            },
        );
        assert_eq!(
            castles.moved(Color::Black),
            Moved::KING | Moved::KING_SIDE_ROOK
        );
        assert!(!castles.has_color(Color::Black));
        assert_eq!(castles.moved(Color::White), Moved::empty());
    }

    #[test]
    fn test_retain_possible() {
        let mut board = Board::new();
        board.discard_piece_at(Square::A8);
        let mut castles = Castles::new();
        castles.retain_possible(&board);
        assert!(!castles.has(Color::Black, CastlingSide::QueenSide));
        assert!(castles.has(Color::Black, CastlingSide::KingSide));

        castles.retain_possible(&Board::empty());
        assert!(castles.is_empty());
        assert_eq!(castles, Castles::none());
    }
}
