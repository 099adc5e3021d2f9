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

use core::{fmt, fmt::Write as _};

use crate::{CastlingSide, Color, File, Move, Piece, Rank, Role, Square};

/// [`Piece`] positions on a board.
///
/// A mailbox with one slot per square, indexed like [`Square`].
///
/// # Examples
///
/// ```
/// use caissa::{Board, Color, Square};
///
/// let board = Board::new();
/// // r n b q k b n r
/// // p p p p p p p p
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // . . . . . . . .
/// // P P P P P P P P
/// // R N B Q K B N R
///
/// assert_eq!(board.piece_at(Square::E8), Some(Color::Black.king()));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct Board {
    squares: [Option<Piece>; 64],
}

impl Board {
    /// The standard starting position.
    pub fn new() -> Board {
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, role) in File::ALL.into_iter().zip(BACKRANK) {
                board.set_piece_at(Square::from_coords(file, color.backrank()), role.of(color));
                board.set_piece_at(Square::from_coords(file, color.pawn_rank()), color.pawn());
            }
        }
        board
    }

    pub const fn empty() -> Board {
        Board {
            squares: [None; 64],
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[usize::from(sq)]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.piece_at(sq).is_some()
    }

    /// Puts a piece on a square, returning the piece it replaced.
    #[inline]
    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) -> Option<Piece> {
        self.squares[usize::from(sq)].replace(piece)
    }

    #[inline]
    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        self.squares[usize::from(sq)].take()
    }

    #[inline]
    pub fn discard_piece_at(&mut self, sq: Square) {
        self.squares[usize::from(sq)] = None;
    }

    /// Finds the king of the given color. If there is more than one, the
    /// one on the lowest square is returned.
    pub fn king_of(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|&(_, piece)| piece == color.king())
            .map(|(sq, _)| sq)
    }

    /// Iterates over all occupied squares, `a1` first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|piece| (sq, piece)))
    }

    /// Iterates over the squares holding pieces of the given color.
    pub fn occupied_by(&self, color: Color) -> impl Iterator<Item = Square> + '_ {
        self.pieces()
            .filter(move |&(_, piece)| piece.color == color)
            .map(|(sq, _)| sq)
    }

    pub fn count(&self, piece: Piece) -> usize {
        self.pieces().filter(|&(_, p)| p == piece).count()
    }

    /// Snapshot as an 8x8 grid, row 0 being the eighth rank and column 0
    /// the a-file.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::{Board, Color};
    ///
    /// let rows = Board::new().rows();
    /// assert_eq!(rows[0][4], Some(Color::Black.king()));
    /// assert_eq!(rows[7][3], Some(Color::White.queen()));
    /// assert_eq!(rows[4][4], None);
    /// ```
    pub fn rows(&self) -> [[Option<Piece>; 8]; 8] {
        let mut rows = [[None; 8]; 8];
        for (sq, piece) in self.pieces() {
            let (row, col) = sq.row_col();
            rows[row as usize][col as usize] = Some(piece);
        }
        rows
    }

    /// Relocates pieces as the given move would, without any legality
    /// checks.
    ///
    /// En passant also removes the captured pawn, which stands on the
    /// origin's rank and the target's file. Castling also moves the rook
    /// next to the king's new square.
    pub fn play_unchecked(&mut self, m: Move) {
        match m {
            Move::Normal {
                from,
                to,
                promotion,
                ..
            } => {
                if let Some(piece) = self.remove_piece_at(from) {
                    let role = promotion.unwrap_or(piece.role);
                    self.set_piece_at(to, role.of(piece.color));
                }
            }
            Move::EnPassant { from, to } => {
                self.discard_piece_at(Square::from_coords(to.file(), from.rank()));
                if let Some(pawn) = self.remove_piece_at(from) {
                    self.set_piece_at(to, pawn);
                }
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_king_side(king < rook);
                let rank = king.rank();
                let king_piece = self.remove_piece_at(king);
                let rook_piece = self.remove_piece_at(rook);
                if let Some(piece) = king_piece {
                    self.set_piece_at(Square::from_coords(side.king_to_file(), rank), piece);
                }
                if let Some(piece) = rook_piece {
                    self.set_piece_at(Square::from_coords(side.rook_to_file(), rank), piece);
                }
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromIterator<(Square, Piece)> for Board {
    fn from_iter<T>(iter: T) -> Self
    where
        T: IntoIterator<Item = (Square, Piece)>,
    {
        let mut board = Board::empty();
        board.extend(iter);
        board
    }
}

impl Extend<(Square, Piece)> for Board {
    fn extend<T: IntoIterator<Item = (Square, Piece)>>(&mut self, iter: T) {
        for (sq, piece) in iter {
            self.set_piece_at(sq, piece);
        }
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            for file in File::ALL {
                let square = Square::from_coords(file, rank);
                f.write_char(self.piece_at(square).map_or('.', Piece::char))?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}
