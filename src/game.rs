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

//! Interactive game driven by square selections.
//!
//! # Examples
//!
//! ```
//! use caissa::{Game, Role, Square, Transition};
//!
//! let mut game = Game::new();
//! assert!(matches!(game.select_or_move(Square::E2), Transition::Selected { from: Square::E2 }));
//! assert!(matches!(game.select_or_move(Square::E4), Transition::Played(_)));
//!
//! // Black pieces only respond on black's turn.
//! assert!(matches!(game.select_or_move(Square::E4), Transition::Ignored));
//! ```

use alloc::vec::Vec;
use core::fmt;

use log::{debug, trace};

use crate::{movegen::Targets, Board, Color, Move, Outcome, Position, Role, Square, Status};

/// A selected piece and where it may legally move.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Selection {
    pub from: Square,
    pub targets: Targets,
}

/// A pawn move onto the last rank, waiting for the promotion role.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

/// Whether the side to move is in check, and where its king stands if so.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct CheckState {
    pub in_check: bool,
    pub king: Option<Square>,
}

/// Effect of [`Game::select_or_move()`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Transition {
    /// Nothing changed: the game is over, a promotion is pending, or the
    /// square holds no piece of the side to move.
    Ignored,
    /// A piece of the side to move was selected.
    Selected { from: Square },
    /// The selection was dropped.
    Deselected,
    /// The selected piece moved.
    Played(Move),
    /// A pawn reached the last rank. Nothing moves until
    /// [`Game::choose_promotion()`].
    PromotionPending(PendingPromotion),
}

/// Error when resolving a promotion.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum PromotionError {
    /// No promotion is pending.
    NotPending,
    /// Pawns cannot promote to this role.
    InvalidRole(Role),
}

impl fmt::Display for PromotionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PromotionError::NotPending => f.write_str("no promotion pending"),
            PromotionError::InvalidRole(role) => {
                write!(f, "cannot promote to {}", role.upper_char())
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PromotionError {}

/// A game in progress: the current [`Position`] together with the selected
/// piece, a pending promotion and the moves played so far.
///
/// Move input arrives as squares, the way a board interface reports clicks.
/// Once the game is over all input is ignored until [`Game::reset()`].
#[derive(Clone, Debug)]
pub struct Game {
    initial: Position,
    pos: Position,
    status: Status,
    selection: Option<Selection>,
    pending: Option<PendingPromotion>,
    history: Vec<Move>,
}

impl Default for Game {
    fn default() -> Game {
        Game::new()
    }
}

impl Game {
    /// A game from the standard starting position.
    pub fn new() -> Game {
        Game::from_position(Position::default())
    }

    /// A game starting from the given position. [`Game::reset()`] returns
    /// here.
    pub fn from_position(pos: Position) -> Game {
        let status = pos.status();
        Game {
            initial: pos.clone(),
            pos,
            status,
            selection: None,
            pending: None,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        self.pos.board()
    }

    pub fn turn(&self) -> Color {
        self.pos.turn()
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn position(&self) -> &Position {
        &self.pos
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    /// Moves committed since the start, oldest first.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.status {
            Status::Ongoing => None,
            Status::Checkmate => Some(Outcome::Decisive {
                winner: self.turn().other(),
            }),
            Status::Stalemate => Some(Outcome::Draw),
        }
    }

    pub fn check_state(&self) -> CheckState {
        if self.pos.is_check() {
            CheckState {
                in_check: true,
                king: self.pos.king(),
            }
        } else {
            CheckState::default()
        }
    }

    /// Legal targets of the piece on `sq`, for highlighting. Empty unless it
    /// belongs to the side to move.
    pub fn legal_targets(&self, sq: Square) -> Targets {
        self.pos.legal_targets(sq)
    }

    /// Feeds a square: selects a piece, moves the selected piece there, or
    /// drops the selection.
    pub fn select_or_move(&mut self, sq: Square) -> Transition {
        if self.status.is_game_over() || self.pending.is_some() {
            trace!("ignoring {sq}: status {}, pending {:?}", self.status, self.pending);
            return Transition::Ignored;
        }

        match self.selection.take() {
            None => self.select(sq),
            Some(selection) if selection.from == sq => {
                trace!("deselected {sq}");
                Transition::Deselected
            }
            Some(selection) if selection.targets.contains(&sq) => {
                self.move_selected(selection.from, sq)
            }
            Some(_) if self.board().color_at(sq) == Some(self.turn()) => self.select(sq),
            Some(selection) => {
                trace!("deselected {} by {sq}", selection.from);
                Transition::Deselected
            }
        }
    }

    fn select(&mut self, from: Square) -> Transition {
        if self.board().color_at(from) != Some(self.turn()) {
            return Transition::Ignored;
        }
        let targets = self.pos.legal_targets(from);
        trace!("selected {from} with {} targets", targets.len());
        self.selection = Some(Selection { from, targets });
        Transition::Selected { from }
    }

    fn move_selected(&mut self, from: Square, to: Square) -> Transition {
        if self.pos.is_promotion(from, to) {
            let pending = PendingPromotion {
                from,
                to,
                color: self.turn(),
            };
            debug!("promotion pending: {from} to {to}");
            self.pending = Some(pending);
            return Transition::PromotionPending(pending);
        }

        match self.pos.move_for(from, to, None) {
            Some(m) => {
                self.commit(m);
                Transition::Played(m)
            }
            None => Transition::Deselected,
        }
    }

    fn commit(&mut self, m: Move) {
        self.pos.play_unchecked(m);
        self.history.push(m);
        self.status = self.pos.status();
        debug!("played {m}, {} to move, {}", self.turn(), self.status);
    }

    /// Completes the pending promotion with the chosen role.
    ///
    /// # Errors
    ///
    /// Returns [`PromotionError`] without changing anything if no promotion
    /// is pending or the role is not one a pawn can promote to.
    pub fn choose_promotion(&mut self, role: Role) -> Result<Move, PromotionError> {
        let pending = self.pending.ok_or(PromotionError::NotPending)?;
        if !role.is_promotion_choice() {
            return Err(PromotionError::InvalidRole(role));
        }
        let m = self
            .pos
            .move_for(pending.from, pending.to, Some(role))
            .ok_or(PromotionError::InvalidRole(role))?;
        self.pending = None;
        debug!("promoting to {}", role.upper_char());
        self.commit(m);
        Ok(m)
    }

    /// Restarts from the initial position.
    pub fn reset(&mut self) {
        debug!("reset after {} moves", self.history.len());
        self.pos = self.initial.clone();
        self.status = self.pos.status();
        self.selection = None;
        self.pending = None;
        self.history.clear();
    }

    /// Takes back the last committed move and discards any selection.
    ///
    /// While a promotion is pending, only the pending promotion is withdrawn
    /// and `None` is returned. The pawn stays on its origin square and
    /// history is untouched.
    pub fn undo(&mut self) -> Option<Move> {
        self.selection = None;
        if let Some(pending) = self.pending.take() {
            debug!("withdrew promotion {}-{}", pending.from, pending.to);
            return None;
        }
        let m = self.history.pop()?;
        let mut pos = self.initial.clone();
        for &m in &self.history {
            pos.play_unchecked(m);
        }
        self.pos = pos;
        self.status = self.pos.status();
        debug!("took back {m}");
        Some(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Setup;

    fn click(game: &mut Game, squares: &[Square]) {
        for &sq in squares {
            game.select_or_move(sq);
        }
    }

    fn promotion_game() -> Game {
        let mut setup = Setup::empty();
        setup.board.set_piece_at(Square::E1, Color::White.king());
        setup.board.set_piece_at(Square::E8, Color::Black.king());
        setup.board.set_piece_at(Square::A7, Color::White.pawn());
        Game::from_position(Position::from_setup(setup).expect("legal setup"))
    }

    #[test]
    fn test_selection_state_machine() {
        let mut game = Game::new();
        assert_eq!(game.select_or_move(Square::E4), Transition::Ignored);
        assert_eq!(game.select_or_move(Square::E7), Transition::Ignored);

        assert_eq!(
            game.select_or_move(Square::G1),
            Transition::Selected { from: Square::G1 }
        );
        assert_eq!(
            game.selection().map(|s| s.targets.as_slice()),
            Some(&[Square::H3, Square::F3][..])
        );
        assert_eq!(game.select_or_move(Square::G1), Transition::Deselected);
        assert_eq!(game.selection(), None);

        game.select_or_move(Square::G1);
        assert_eq!(
            game.select_or_move(Square::B1),
            Transition::Selected { from: Square::B1 }
        );
        assert_eq!(game.select_or_move(Square::B5), Transition::Deselected);
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_select_piece_without_moves() {
        let mut game = Game::new();
        assert_eq!(
            game.select_or_move(Square::A1),
            Transition::Selected { from: Square::A1 }
        );
        assert!(game.selection().is_some_and(|s| s.targets.is_empty()));
    }

    #[test]
    fn test_promotion_blocks_input() {
        let mut game = promotion_game();
        game.select_or_move(Square::A7);
        let transition = game.select_or_move(Square::A8);
        let pending = PendingPromotion {
            from: Square::A7,
            to: Square::A8,
            color: Color::White,
        };
        assert_eq!(transition, Transition::PromotionPending(pending));
        assert_eq!(game.pending_promotion(), Some(pending));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board().piece_at(Square::A7), Some(Color::White.pawn()));
        assert_eq!(game.select_or_move(Square::E1), Transition::Ignored);

        assert_eq!(
            game.choose_promotion(Role::Pawn),
            Err(PromotionError::InvalidRole(Role::Pawn))
        );
        assert_eq!(game.pending_promotion(), Some(pending));

        let m = game.choose_promotion(Role::Queen).expect("pending");
        assert_eq!(m.promotion(), Some(Role::Queen));
        assert_eq!(game.board().piece_at(Square::A8), Some(Color::White.queen()));
        assert_eq!(game.board().piece_at(Square::A7), None);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.check_state().king, Some(Square::E8));
        assert_eq!(
            game.choose_promotion(Role::Queen),
            Err(PromotionError::NotPending)
        );
    }

    #[test]
    fn test_undo_and_reset() {
        let mut game = Game::new();
        click(&mut game, &[Square::E2, Square::E4, Square::E7, Square::E5]);
        assert_eq!(game.history().len(), 2);

        let m = game.undo().expect("move to take back");
        assert_eq!(m.from(), Square::E7);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.position().ep_pawn(), Some(Square::E4));

        game.select_or_move(Square::D7);
        game.reset();
        assert_eq!(game.position(), &Position::default());
        assert_eq!(game.selection(), None);
        assert!(game.history().is_empty());
        assert_eq!(game.undo(), None);
    }

    #[test]
    fn test_undo_discards_pending_promotion() {
        let mut game = promotion_game();
        click(&mut game, &[Square::A7, Square::A8]);
        assert!(game.pending_promotion().is_some());
        assert_eq!(game.undo(), None);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(
            game.select_or_move(Square::A7),
            Transition::Selected { from: Square::A7 }
        );
    }

    #[test]
    fn test_undo_pending_promotion_keeps_history() {
        let mut game = promotion_game();
        click(
            &mut game,
            &[Square::E1, Square::E2, Square::E8, Square::D8],
        );
        click(&mut game, &[Square::A7, Square::A8]);
        assert!(game.pending_promotion().is_some());

        assert_eq!(game.undo(), None);
        assert_eq!(game.pending_promotion(), None);
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.board().piece_at(Square::D8), Some(Color::Black.king()));
        assert_eq!(game.board().piece_at(Square::A7), Some(Color::White.pawn()));

        let m = game.undo().expect("move to take back");
        assert_eq!(m.from(), Square::E8);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().piece_at(Square::E8), Some(Color::Black.king()));
    }
}
