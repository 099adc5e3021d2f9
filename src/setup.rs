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

use crate::{Board, Castles, Color, Square};

/// A not necessarily legal position.
///
/// [`Position`](crate::Position) validates a `Setup` and maintains its
/// invariants while playing moves.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
pub struct Setup {
    /// Piece positions on the board.
    pub board: Board,

    /// Side to move.
    pub turn: Color,

    /// Castling rights.
    pub castles: Castles,

    /// The pawn that advanced two squares on the immediately preceding ply,
    /// if any. Only this pawn may be captured en passant.
    pub ep_pawn: Option<Square>,
}

impl Setup {
    /// Plain board without pieces, white to move and no castling rights.
    pub fn empty() -> Setup {
        Setup {
            board: Board::empty(),
            turn: Color::White,
            castles: Castles::none(),
            ep_pawn: None,
        }
    }

    /// The square skipped by the last double pawn advance. An en passant
    /// capture lands here.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::{Color, Setup, Square};
    ///
    /// let mut setup = Setup::default();
    /// setup.board.remove_piece_at(Square::E2);
    /// setup.board.set_piece_at(Square::E4, Color::White.pawn());
    /// setup.turn = Color::Black;
    /// setup.ep_pawn = Some(Square::E4);
    ///
    /// assert_eq!(setup.ep_square(), Some(Square::E3));
    /// ```
    pub fn ep_square(&self) -> Option<Square> {
        self.ep_pawn
            .and_then(|pawn| pawn.offset(0, self.turn.forward()))
    }
}

impl Default for Setup {
    /// The standard starting position.
    fn default() -> Setup {
        Setup {
            board: Board::default(),
            turn: Color::White,
            castles: Castles::default(),
            ep_pawn: None,
        }
    }
}
