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

use core::{fmt, str::FromStr};

/// A file of the chessboard.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
}

impl File {
    /// Gets a `File` from an integer index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=7`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> File {
        File::ALL[index as usize]
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<File> {
        match ch {
            'a'..='h' => Some(File::new(ch as u32 - 'a' as u32)),
            _ => None,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'a' + self as u8) as char
    }

    #[must_use]
    #[inline]
    pub fn offset(self, delta: i32) -> Option<File> {
        i32::from(self)
            .checked_add(delta)
            .and_then(|index| u32::try_from(index).ok())
            .and_then(|index| File::try_from(index).ok())
    }

    #[inline]
    pub fn distance(self, other: File) -> u32 {
        u32::from(self).abs_diff(u32::from(other))
    }

    /// `A`, ..., `H`.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

from_enum_as_int_impl! { File, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }
try_from_int_impl! { File, 0, 8, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

/// A rank of the chessboard.
#[allow(missing_docs)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[repr(u8)]
pub enum Rank {
    First = 0,
    Second,
    Third,
    Fourth,
    Fifth,
    Sixth,
    Seventh,
    Eighth,
}

impl Rank {
    /// Gets a `Rank` from an integer index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=7`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Rank {
        Rank::ALL[index as usize]
    }

    #[inline]
    pub const fn from_char(ch: char) -> Option<Rank> {
        match ch {
            '1'..='8' => Some(Rank::new(ch as u32 - '1' as u32)),
            _ => None,
        }
    }

    #[inline]
    pub const fn char(self) -> char {
        (b'1' + self as u8) as char
    }

    #[must_use]
    #[inline]
    pub fn offset(self, delta: i32) -> Option<Rank> {
        i32::from(self)
            .checked_add(delta)
            .and_then(|index| u32::try_from(index).ok())
            .and_then(|index| Rank::try_from(index).ok())
    }

    #[inline]
    pub fn distance(self, other: Rank) -> u32 {
        u32::from(self).abs_diff(u32::from(other))
    }

    /// `First`, ..., `Eighth`.
    pub const ALL: [Rank; 8] = [
        Rank::First,
        Rank::Second,
        Rank::Third,
        Rank::Fourth,
        Rank::Fifth,
        Rank::Sixth,
        Rank::Seventh,
        Rank::Eighth,
    ];
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Write::write_char(f, self.char())
    }
}

from_enum_as_int_impl! { Rank, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }
try_from_int_impl! { Rank, 0, 8, u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

/// Error when parsing an invalid square name.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ParseSquareError {
    /// Square names have exactly two characters.
    InvalidLength,
    /// The first character is not a file letter `a` to `h`.
    InvalidFile,
    /// The second character is not a rank digit `1` to `8`.
    InvalidRank,
}

impl fmt::Display for ParseSquareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseSquareError::InvalidLength => "invalid square name: expected two characters",
            ParseSquareError::InvalidFile => "invalid square name: unrecognized file",
            ParseSquareError::InvalidRank => "invalid square name: unrecognized rank",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseSquareError {}

/// Error when (row, column) coordinates are outside the board.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct InvalidCoordinates {
    pub row: i32,
    pub col: i32,
}

impl fmt::Display for InvalidCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid board coordinates ({}, {})", self.row, self.col)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InvalidCoordinates {}

/// A square of the chessboard.
///
/// Squares are indexed `a1 = 0`, `b1 = 1`, ..., `h8 = 63`. Presentation
/// layers that think in rows and columns use [`Square::from_row_col()`] and
/// [`Square::row_col()`], where row 0 is the eighth rank (black's back rank)
/// and column 0 is the a-file.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Square(u8);

impl Square {
    /// Gets a `Square` from an integer index.
    ///
    /// # Panics
    ///
    /// Panics if the index is not in the range `0..=63`.
    #[track_caller]
    #[inline]
    pub const fn new(index: u32) -> Square {
        assert!(index < 64);
        Square(index as u8)
    }

    /// Gets the square at the intersection of a file and a rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::{File, Rank, Square};
    ///
    /// assert_eq!(Square::from_coords(File::A, Rank::First), Square::A1);
    /// ```
    #[inline]
    pub const fn from_coords(file: File, rank: Rank) -> Square {
        Square(file as u8 | ((rank as u8) << 3))
    }

    /// Converts zero-based (row, column) coordinates to a square.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidCoordinates`] if either coordinate is outside
    /// `0..=7`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::Square;
    ///
    /// assert_eq!(Square::from_row_col(0, 0), Ok(Square::A8));
    /// assert_eq!(Square::from_row_col(7, 4), Ok(Square::E1));
    /// assert!(Square::from_row_col(8, 0).is_err());
    /// assert!(Square::from_row_col(0, -1).is_err());
    /// ```
    pub fn from_row_col(row: i32, col: i32) -> Result<Square, InvalidCoordinates> {
        match (u32::try_from(row), u32::try_from(col)) {
            (Ok(r), Ok(c)) if r < 8 && c < 8 => {
                Ok(Square::from_coords(File::new(c), Rank::new(7 - r)))
            }
            _ => Err(InvalidCoordinates { row, col }),
        }
    }

    /// Zero-based (row, column) coordinates, row 0 being the eighth rank.
    #[inline]
    pub fn row_col(self) -> (u32, u32) {
        (7 - u32::from(self.rank()), u32::from(self.file()))
    }

    /// Parses a square name.
    ///
    /// # Errors
    ///
    /// Returns [`ParseSquareError`] if the input is not a valid square name
    /// like `e4`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::{ParseSquareError, Square};
    ///
    /// assert_eq!(Square::from_ascii(b"e4"), Ok(Square::E4));
    /// assert_eq!(Square::from_ascii(b"e"), Err(ParseSquareError::InvalidLength));
    /// assert_eq!(Square::from_ascii(b"i4"), Err(ParseSquareError::InvalidFile));
    /// assert_eq!(Square::from_ascii(b"e9"), Err(ParseSquareError::InvalidRank));
    /// ```
    pub fn from_ascii(s: &[u8]) -> Result<Square, ParseSquareError> {
        let &[file, rank] = s else {
            return Err(ParseSquareError::InvalidLength);
        };
        let file = File::from_char(char::from(file)).ok_or(ParseSquareError::InvalidFile)?;
        let rank = Rank::from_char(char::from(rank)).ok_or(ParseSquareError::InvalidRank)?;
        Ok(Square::from_coords(file, rank))
    }

    #[inline]
    pub const fn file(self) -> File {
        File::new((self.0 & 7) as u32)
    }

    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::new((self.0 >> 3) as u32)
    }

    /// Steps by the given file and rank deltas, or `None` when leaving the
    /// board.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::Square;
    ///
    /// assert_eq!(Square::B1.offset(1, 2), Some(Square::C3));
    /// assert_eq!(Square::H1.offset(1, 0), None);
    /// assert_eq!(Square::A1.offset(i32::MAX, 0), None);
    /// ```
    #[must_use]
    #[inline]
    pub fn offset(self, file_delta: i32, rank_delta: i32) -> Option<Square> {
        Some(Square::from_coords(
            self.file().offset(file_delta)?,
            self.rank().offset(rank_delta)?,
        ))
    }

    /// Chebyshev distance: the number of king steps between two squares.
    pub fn distance(self, other: Square) -> u32 {
        self.file()
            .distance(other.file())
            .max(self.rank().distance(other.rank()))
    }

    /// All 64 squares, `a1` first.
    pub fn all() -> impl DoubleEndedIterator<Item = Square> + ExactSizeIterator {
        (0..64).map(Square)
    }
}

macro_rules! square_consts {
    ($($name:ident = $index:expr,)+) => {
        #[allow(missing_docs)]
        impl Square {
            $(pub const $name: Square = Square($index);)+
        }
    }
}

square_consts! {
    A1 = 0, B1 = 1, C1 = 2, D1 = 3, E1 = 4, F1 = 5, G1 = 6, H1 = 7,
    A2 = 8, B2 = 9, C2 = 10, D2 = 11, E2 = 12, F2 = 13, G2 = 14, H2 = 15,
    A3 = 16, B3 = 17, C3 = 18, D3 = 19, E3 = 20, F3 = 21, G3 = 22, H3 = 23,
    A4 = 24, B4 = 25, C4 = 26, D4 = 27, E4 = 28, F4 = 29, G4 = 30, H4 = 31,
    A5 = 32, B5 = 33, C5 = 34, D5 = 35, E5 = 36, F5 = 37, G5 = 38, H5 = 39,
    A6 = 40, B6 = 41, C6 = 42, D6 = 43, E6 = 44, F6 = 45, G6 = 46, H6 = 47,
    A7 = 48, B7 = 49, C7 = 50, D7 = 51, E7 = 52, F7 = 53, G7 = 54, H7 = 55,
    A8 = 56, B8 = 57, C8 = 58, D8 = 59, E8 = 60, F8 = 61, G8 = 62, H8 = 63,
}

macro_rules! int_from_square_impl {
    ($($t:ty)+) => {
        $(impl From<Square> for $t {
            #[inline]
            fn from(sq: Square) -> $t {
                sq.0 as $t
            }
        })+
    }
}

int_from_square_impl! { u8 i8 u16 i16 u32 i32 u64 i64 usize isize }

impl From<Square> for (File, Rank) {
    #[inline]
    fn from(sq: Square) -> (File, Rank) {
        (sq.file(), sq.rank())
    }
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Square, ParseSquareError> {
        Square::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}",
            self.file().char().to_ascii_uppercase(),
            self.rank()
        )
    }
}

#[cfg(feature = "arbitrary")]
impl arbitrary::Arbitrary<'_> for Square {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Square> {
        Ok(Square(u.int_in_range(0..=63)?))
    }

    fn size_hint(_depth: usize) -> (usize, Option<usize>) {
        (1, Some(1))
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Square {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let name = [self.file().char() as u8, self.rank().char() as u8];
        serializer.serialize_str(core::str::from_utf8(&name).map_err(serde::ser::Error::custom)?)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Square {
    fn deserialize<D>(deserializer: D) -> Result<Square, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        struct SquareVisitor;

        impl serde::de::Visitor<'_> for SquareVisitor {
            type Value = Square;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("square name")
            }

            fn visit_str<E>(self, value: &str) -> Result<Square, E>
            where
                E: serde::de::Error,
            {
                value.parse().map_err(serde::de::Error::custom)
            }
        }

        deserializer.deserialize_str(SquareVisitor)
    }
}
