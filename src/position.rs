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

use bitflags::bitflags;

use crate::{
    attacks::{self, Squares},
    legal::{self, LegalMoves},
    movegen::Targets,
    Board, Castles, Color, Move, MoveList, Rank, Role, Setup, Square,
};

/// Whether the game goes on, derived from the position after every move.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Status {
    #[default]
    Ongoing,
    /// The side to move is in check and has no legal move.
    Checkmate,
    /// The side to move is not in check and has no legal move.
    Stalemate,
}

impl Status {
    pub const fn is_ongoing(self) -> bool {
        matches!(self, Status::Ongoing)
    }

    pub const fn is_game_over(self) -> bool {
        !self.is_ongoing()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Status::Ongoing => "ongoing",
            Status::Checkmate => "checkmate",
            Status::Stalemate => "stalemate",
        })
    }
}

/// Outcome of a finished game.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Outcome {
    Decisive { winner: Color },
    Draw,
}

impl Outcome {
    pub const fn winner(self) -> Option<Color> {
        match self {
            Outcome::Decisive { winner } => Some(winner),
            Outcome::Draw => None,
        }
    }

    pub const fn from_winner(winner: Option<Color>) -> Outcome {
        match winner {
            Some(winner) => Outcome::Decisive { winner },
            None => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Outcome::Decisive {
                winner: Color::White,
            } => "1-0",
            Outcome::Decisive {
                winner: Color::Black,
            } => "0-1",
            Outcome::Draw => "1/2-1/2",
        })
    }
}

/// Error when parsing an [`Outcome`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseOutcomeError;

impl fmt::Display for ParseOutcomeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid outcome")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseOutcomeError {}

impl FromStr for Outcome {
    type Err = ParseOutcomeError;

    fn from_str(s: &str) -> Result<Outcome, ParseOutcomeError> {
        Ok(match s {
            "1-0" => Outcome::Decisive {
                winner: Color::White,
            },
            "0-1" => Outcome::Decisive {
                winner: Color::Black,
            },
            "1/2-1/2" => Outcome::Draw,
            _ => return Err(ParseOutcomeError),
        })
    }
}

/// Error when trying to play an illegal move.
#[derive(Debug)]
pub struct PlayError {
    m: Move,
    inner: Position,
}

impl PlayError {
    /// Returns the unchanged position.
    pub fn into_inner(self) -> Position {
        self.inner
    }

    /// The rejected move.
    pub fn illegal_move(&self) -> Move {
        self.m
    }
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "illegal move {}", self.m)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PlayError {}

bitflags! {
    /// Reasons for a [`Setup`] not being a legal [`Position`].
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PositionErrorKinds: u32 {
        /// A side has no king.
        const MISSING_KING = 1 << 0;

        /// A side has more than one king.
        const TOO_MANY_KINGS = 1 << 1;

        /// There are pawns on the first or eighth rank.
        const PAWNS_ON_BACKRANK = 1 << 2;

        /// The en passant pawn is not a pawn of the side that just moved,
        /// standing where a double advance would have put it with both
        /// squares it passed now empty.
        const INVALID_EP_PAWN = 1 << 3;

        /// The side not to move is in check.
        const OPPOSITE_CHECK = 1 << 4;
    }
}

/// Error when trying to create a [`Position`] from an illegal [`Setup`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PositionError {
    errors: PositionErrorKinds,
}

impl PositionError {
    pub fn kinds(&self) -> PositionErrorKinds {
        self.errors
    }
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("illegal position: ")?;

        let mut first = true;
        let mut reason = |kind: PositionErrorKinds, text: &str| -> fmt::Result {
            if self.errors.contains(kind) {
                if !first {
                    f.write_str(", ")?;
                }
                f.write_str(text)?;
                first = false;
            }
            Ok(())
        };

        reason(PositionErrorKinds::MISSING_KING, "missing king")?;
        reason(PositionErrorKinds::TOO_MANY_KINGS, "too many kings")?;
        reason(PositionErrorKinds::PAWNS_ON_BACKRANK, "pawns on backrank")?;
        reason(PositionErrorKinds::INVALID_EP_PAWN, "invalid en passant pawn")?;
        reason(PositionErrorKinds::OPPOSITE_CHECK, "opposite check")?;
        Ok(())
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PositionError {}

/// A legal chess position: board, castling rights, en passant pawn and side
/// to move.
///
/// # Examples
///
/// ```
/// use caissa::{Move, Position, Role, Square, Status};
///
/// let pos = Position::default();
/// assert_eq!(pos.legal_moves().len(), 20);
///
/// let pos = pos.play(Move::Normal {
///     role: Role::Pawn,
///     from: Square::E2,
///     capture: None,
///     to: Square::E4,
///     promotion: None,
/// })?;
/// assert_eq!(pos.ep_pawn(), Some(Square::E4));
/// assert_eq!(pos.status(), Status::Ongoing);
/// # Ok::<_, caissa::PlayError>(())
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Position {
    setup: Setup,
}

impl Position {
    /// The standard starting position.
    pub fn new() -> Position {
        Position::default()
    }

    /// Validates a [`Setup`] and constructs a position.
    ///
    /// Castling rights whose king or rook is not on its original square are
    /// dropped silently.
    ///
    /// # Errors
    ///
    /// Returns [`PositionError`] listing every reason the setup is not a
    /// legal position.
    pub fn from_setup(mut setup: Setup) -> Result<Position, PositionError> {
        let mut errors = PositionErrorKinds::empty();

        for color in Color::ALL {
            match setup.board.count(color.king()) {
                0 => errors |= PositionErrorKinds::MISSING_KING,
                1 => (),
                _ => errors |= PositionErrorKinds::TOO_MANY_KINGS,
            }
        }

        if setup.board.pieces().any(|(sq, piece)| {
            piece.role == Role::Pawn && matches!(sq.rank(), Rank::First | Rank::Eighth)
        }) {
            errors |= PositionErrorKinds::PAWNS_ON_BACKRANK;
        }

        if let Some(ep_pawn) = setup.ep_pawn {
            if !is_valid_ep_pawn(&setup, ep_pawn) {
                errors |= PositionErrorKinds::INVALID_EP_PAWN;
            }
        }

        if attacks::is_king_in_check(&setup.board, setup.turn.other()) {
            errors |= PositionErrorKinds::OPPOSITE_CHECK;
        }

        setup.castles.retain_possible(&setup.board);

        if errors.is_empty() {
            Ok(Position { setup })
        } else {
            Err(PositionError { errors })
        }
    }

    pub fn board(&self) -> &Board {
        &self.setup.board
    }

    pub fn turn(&self) -> Color {
        self.setup.turn
    }

    pub fn castles(&self) -> &Castles {
        &self.setup.castles
    }

    /// The pawn that may be captured en passant on this ply.
    pub fn ep_pawn(&self) -> Option<Square> {
        self.setup.ep_pawn
    }

    pub fn setup(&self) -> &Setup {
        &self.setup
    }

    pub fn into_setup(self) -> Setup {
        self.setup
    }

    /// Square of the king of the side to move.
    pub fn king(&self) -> Option<Square> {
        self.board().king_of(self.turn())
    }

    /// Squares of the pieces giving check.
    pub fn checkers(&self) -> Squares {
        self.king().map_or_else(Squares::new, |king| {
            attacks::attackers(self.board(), king, self.turn().other())
        })
    }

    pub fn is_check(&self) -> bool {
        attacks::is_king_in_check(self.board(), self.turn())
    }

    /// Legal target squares of the piece on `from`. Empty unless that piece
    /// belongs to the side to move.
    pub fn legal_targets(&self, from: Square) -> Targets {
        if self.board().color_at(from) == Some(self.turn()) {
            legal::legal_targets(&self.setup, from)
        } else {
            Targets::new()
        }
    }

    /// Legal targets of the side to move, grouped by origin.
    pub fn all_legal_targets(&self) -> LegalMoves {
        legal::all_legal_targets(&self.setup, self.turn())
    }

    /// Legal moves from `from`, with pawn moves onto the last rank left
    /// without a promotion role.
    fn legal_moves_from(&self, from: Square) -> MoveList {
        let mut moves = MoveList::new();
        if self.board().color_at(from) == Some(self.turn()) {
            legal::gen_legal_moves(&self.setup, from, &mut moves);
        }
        moves
    }

    fn is_promotion_move(&self, m: Move) -> bool {
        m.role() == Role::Pawn && m.to().rank() == self.turn().promotion_rank()
    }

    /// Generates all legal moves. A pawn reaching the last rank yields one
    /// move per promotion role.
    pub fn legal_moves(&self) -> MoveList {
        let mut moves = MoveList::new();
        for from in self.board().occupied_by(self.turn()) {
            for m in self.legal_moves_from(from) {
                match m {
                    Move::Normal {
                        role,
                        from,
                        capture,
                        to,
                        promotion: None,
                    } if self.is_promotion_move(m) => {
                        moves.extend(Role::PROMOTIONS.into_iter().map(|promotion| {
                            Move::Normal {
                                role,
                                from,
                                capture,
                                to,
                                promotion: Some(promotion),
                            }
                        }));
                    }
                    _ => moves.push(m),
                }
            }
        }
        moves
    }

    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves_from(m.from()).into_iter().any(|legal| {
            if self.is_promotion_move(legal) {
                m.promotion().is_some_and(Role::is_promotion_choice)
                    && m
                        == Move::Normal {
                            role: Role::Pawn,
                            from: legal.from(),
                            capture: legal.capture(),
                            to: legal.to(),
                            promotion: m.promotion(),
                        }
            } else {
                legal == m
            }
        })
    }

    /// Finds the legal move from `from` to `to`. For castling, `to` is the
    /// square the king lands on.
    ///
    /// A pawn move onto the last rank requires a promotion role, every
    /// other move requires `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use caissa::{Move, Position, Square};
    ///
    /// let pos = Position::default();
    /// assert!(matches!(pos.move_for(Square::G1, Square::F3, None), Some(Move::Normal { .. })));
    /// assert_eq!(pos.move_for(Square::G1, Square::G3, None), None);
    /// ```
    pub fn move_for(&self, from: Square, to: Square, promotion: Option<Role>) -> Option<Move> {
        let m = self
            .legal_moves_from(from)
            .into_iter()
            .find(|m| m.to() == to)?;
        match (m, promotion) {
            (
                Move::Normal {
                    role,
                    from,
                    capture,
                    to,
                    promotion: None,
                },
                Some(promotion),
            ) if self.is_promotion_move(m) && promotion.is_promotion_choice() => {
                Some(Move::Normal {
                    role,
                    from,
                    capture,
                    to,
                    promotion: Some(promotion),
                })
            }
            (m, None) if !self.is_promotion_move(m) => Some(m),
            _ => None,
        }
    }

    /// Checks if moving the piece on `from` to `to` is a legal pawn move
    /// onto the last rank, which needs a promotion role to complete.
    pub fn is_promotion(&self, from: Square, to: Square) -> bool {
        self.legal_moves_from(from)
            .into_iter()
            .any(|m| m.to() == to && self.is_promotion_move(m))
    }

    /// Plays a move without checking legality.
    ///
    /// Relocates pieces, updates castling rights, sets or clears the en
    /// passant pawn and passes the turn.
    pub fn play_unchecked(&mut self, m: Move) {
        let turn = self.setup.turn;
        self.setup.board.play_unchecked(m);
        self.setup.castles.update(turn, m);
        self.setup.ep_pawn = if m.is_double_pawn_push() {
            Some(m.to())
        } else {
            None
        };
        self.setup.turn = turn.other();
    }

    /// Plays a legal move.
    ///
    /// # Errors
    ///
    /// Returns a [`PlayError`] holding the unchanged position if the move is
    /// not legal.
    pub fn play(mut self, m: Move) -> Result<Position, PlayError> {
        if self.is_legal(m) {
            self.play_unchecked(m);
            Ok(self)
        } else {
            Err(PlayError { m, inner: self })
        }
    }

    pub fn status(&self) -> Status {
        if !self.all_legal_targets().is_empty() {
            Status::Ongoing
        } else if self.is_check() {
            Status::Checkmate
        } else {
            Status::Stalemate
        }
    }

    pub fn is_checkmate(&self) -> bool {
        self.status() == Status::Checkmate
    }

    pub fn is_stalemate(&self) -> bool {
        self.status() == Status::Stalemate
    }

    pub fn is_game_over(&self) -> bool {
        self.status().is_game_over()
    }

    /// The outcome, if the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.status() {
            Status::Ongoing => None,
            Status::Checkmate => Some(Outcome::Decisive {
                winner: self.turn().other(),
            }),
            Status::Stalemate => Some(Outcome::Draw),
        }
    }
}

fn is_valid_ep_pawn(setup: &Setup, ep_pawn: Square) -> bool {
    let mover = setup.turn.other();
    let forward = mover.forward();
    setup.board.piece_at(ep_pawn) == Some(mover.pawn())
        && mover.pawn_rank().offset(2 * forward) == Some(ep_pawn.rank())
        && [-1, -2]
            .into_iter()
            .filter_map(|steps| ep_pawn.offset(0, steps * forward))
            .all(|sq| !setup.board.is_occupied(sq))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal(role: Role, from: Square, to: Square) -> Move {
        Move::Normal {
            role,
            from,
            capture: None,
            to,
            promotion: None,
        }
    }

    #[test]
    fn test_start_position() {
        let pos = Position::default();
        assert_eq!(pos.turn(), Color::White);
        assert_eq!(pos.legal_moves().len(), 20);
        assert_eq!(pos.all_legal_targets().count(), 20);
        assert_eq!(pos.status(), Status::Ongoing);
        assert!(!pos.is_check());
        assert_eq!(pos.outcome(), None);
    }

    #[test]
    fn test_play_illegal() {
        let pos = Position::default();
        let err = pos
            .play(normal(Role::Pawn, Square::E2, Square::E5))
            .unwrap_err();
        assert_eq!(err.illegal_move().from(), Square::E2);
        assert_eq!(err.into_inner(), Position::default());
    }

    #[test]
    fn test_ep_pawn_cleared() {
        let mut pos = Position::default();
        pos.play_unchecked(normal(Role::Pawn, Square::E2, Square::E4));
        assert_eq!(pos.ep_pawn(), Some(Square::E4));
        assert_eq!(pos.turn(), Color::Black);
        pos.play_unchecked(normal(Role::Knight, Square::G8, Square::F6));
        assert_eq!(pos.ep_pawn(), None);
    }

    #[test]
    fn test_from_setup_errors() {
        let err = Position::from_setup(Setup::empty()).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::MISSING_KING);

        let mut setup = Setup::default();
        setup.board.set_piece_at(Square::D4, Color::White.king());
        setup.board.set_piece_at(Square::A8, Color::White.pawn());
        let err = Position::from_setup(setup).unwrap_err();
        assert_eq!(
            err.kinds(),
            PositionErrorKinds::TOO_MANY_KINGS | PositionErrorKinds::PAWNS_ON_BACKRANK
        );

        let mut setup = Setup::default();
        setup.ep_pawn = Some(Square::E2);
        let err = Position::from_setup(setup).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::INVALID_EP_PAWN);
    }

    #[test]
    fn test_from_setup_opposite_check() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::E1, Color::White.king());
        setup.board.set_piece_at(Square::E8, Color::Black.king());
        setup.board.set_piece_at(Square::E4, Color::White.rook());
        let err = Position::from_setup(setup.clone()).unwrap_err();
        assert_eq!(err.kinds(), PositionErrorKinds::OPPOSITE_CHECK);

        setup.turn = Color::Black;
        let pos = Position::from_setup(setup).expect("black to move in check");
        assert!(pos.is_check());
        assert_eq!(pos.checkers().as_slice(), &[Square::E4]);
    }

    #[test]
    fn test_from_setup_drops_impossible_castling() {
        let mut setup = Setup::default();
        setup.board.discard_piece_at(Square::H1);
        let pos = Position::from_setup(setup).expect("legal setup");
        assert!(!pos
            .castles()
            .has(Color::White, crate::CastlingSide::KingSide));
        assert!(pos
            .castles()
            .has(Color::White, crate::CastlingSide::QueenSide));
    }

    #[test]
    fn test_move_for_promotion() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::A1, Color::White.king());
        setup.board.set_piece_at(Square::H1, Color::Black.king());
        setup.board.set_piece_at(Square::B7, Color::White.pawn());
        let pos = Position::from_setup(setup).expect("legal setup");

        assert!(pos.is_promotion(Square::B7, Square::B8));
        assert_eq!(pos.move_for(Square::B7, Square::B8, None), None);
        assert_eq!(pos.move_for(Square::B7, Square::B8, Some(Role::King)), None);
        let m = pos
            .move_for(Square::B7, Square::B8, Some(Role::Rook))
            .expect("promotion");
        assert!(pos.is_legal(m));
        assert!(!pos.is_legal(normal(Role::Pawn, Square::B7, Square::B8)));
        assert_eq!(pos.legal_moves().iter().filter(|m| m.is_promotion()).count(), 4);

        let pos = pos.play(m).expect("legal");
        assert_eq!(pos.board().piece_at(Square::B8), Some(Color::White.rook()));
        assert_eq!(pos.board().piece_at(Square::B7), None);
    }

    #[test]
    fn test_stalemate() {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::H8, Color::Black.king());
        setup.board.set_piece_at(Square::F7, Color::White.king());
        setup.board.set_piece_at(Square::G6, Color::White.queen());
        setup.turn = Color::Black;
        let pos = Position::from_setup(setup).expect("legal setup");
        assert_eq!(pos.status(), Status::Stalemate);
        assert_eq!(pos.outcome(), Some(Outcome::Draw));
    }

    #[cfg(feature = "alloc")]
    #[test]
    fn test_outcome_display() {
        use alloc::string::ToString;

        let outcome = Outcome::Decisive {
            winner: Color::Black,
        };
        assert_eq!(outcome.to_string(), "0-1");
        assert_eq!("0-1".parse(), Ok(outcome));
        assert_eq!("1/2-1/2".parse(), Ok(Outcome::Draw));
        assert_eq!("*".parse::<Outcome>(), Err(ParseOutcomeError));
        assert_eq!(Status::Checkmate.to_string(), "checkmate");
    }
}
