//! A chess rules engine: board state, legal move generation, special moves
//! and game termination.
//!
//! # Examples
//!
//! Generate legal moves in the starting position:
//!
//! ```
//! use caissa::Position;
//!
//! let pos = Position::default();
//! let legals = pos.legal_moves();
//! assert_eq!(legals.len(), 20);
//! ```
//!
//! Play moves:
//!
//! ```
//! use caissa::{Move, Position, Role, Square};
//!
//! let pos = Position::default();
//!
//! // 1. e4
//! let pos = pos.play(Move::Normal {
//!     role: Role::Pawn,
//!     from: Square::E2,
//!     to: Square::E4,
//!     capture: None,
//!     promotion: None,
//! })?;
//! # Ok::<_, caissa::PlayError>(())
//! ```
//!
//! Drive a game the way a board interface would, one square at a time:
//!
//! ```
//! # #[cfg(feature = "alloc")] {
//! use caissa::{Color, Game, Square, Status};
//!
//! let mut game = Game::new();
//! for sq in [Square::F2, Square::F3, Square::E7, Square::E5,
//!            Square::G2, Square::G4, Square::D8, Square::H4] {
//!     game.select_or_move(sq);
//! }
//! assert_eq!(game.status(), Status::Checkmate);
//! assert!(game.check_state().in_check);
//! assert_eq!(game.outcome().and_then(|o| o.winner()), Some(Color::Black));
//! # }
//! ```
//!
//! # Feature flags
//!
//! * `alloc`: Enables APIs which require the
//!   [`alloc`](https://doc.rust-lang.org/stable/alloc/index.html) crate
//!   (the interactive [`Game`] with its move history).
//! * `std`: Implies `alloc`. Enabled by default.
//!   For `no_std` environments, this must be disabled with `default-features = false`.
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   types with unique natural representations.
//! * `arbitrary`: Implements
//!   [`arbitrary::Arbitrary`](https://docs.rs/arbitrary/1/arbitrary/trait.Arbitrary.html)
//!   for the vocabulary types, for fuzzing.
//! * `nohash-hasher`: Implements
//!   [`nohash_hasher::IsEnabled`](https://docs.rs/nohash-hasher/0.2/nohash_hasher/trait.IsEnabled.html)
//!   for sensible types.
//!
//! # Logging
//!
//! [`Game`] reports commits, promotions, resets and take-backs through the
//! [`log`](https://docs.rs/log/0.4) facade at `debug` level, and selection
//! changes at `trace` level. No logger is installed by this crate.

#![no_std]
#![doc(html_root_url = "https://docs.rs/caissa/0.1.0")]
#![forbid(unsafe_op_in_unsafe_fn)]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

#[macro_use]
mod util;
mod castles;
mod castling_side;
mod color;
#[cfg(feature = "alloc")]
mod game;
mod m;
mod perft;
mod position;
mod role;
mod setup;
mod square;
mod types;

pub mod attacks;
pub mod board;
pub mod legal;
pub mod movegen;

pub use board::Board;
pub use castles::{Castles, Moved};
pub use castling_side::CastlingSide;
pub use color::{ByColor, Color, ParseColorError};
#[cfg(feature = "alloc")]
pub use game::{CheckState, Game, PendingPromotion, PromotionError, Selection, Transition};
pub use legal::LegalMoves;
pub use m::{Move, MoveList};
pub use movegen::{CastlingMode, Targets};
pub use perft::perft;
pub use position::{
    Outcome, ParseOutcomeError, PlayError, Position, PositionError, PositionErrorKinds, Status,
};
pub use role::Role;
pub use setup::Setup;
pub use square::{File, InvalidCoordinates, ParseSquareError, Rank, Square};
pub use types::Piece;

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for File {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Rank {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Square {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Role {}

#[cfg(feature = "nohash-hasher")]
impl nohash_hasher::IsEnabled for Color {}
