#![cfg(feature = "alloc")]

use caissa::{
    attacks, Castles, CastlingSide, Color, Game, Move, Moved, Piece, Position, Role, Setup,
    Square, Status, Transition,
};

fn play(game: &mut Game, moves: &[(Square, Square)]) {
    for &(from, to) in moves {
        assert_eq!(
            game.select_or_move(from),
            Transition::Selected { from },
            "select {from}"
        );
        assert!(
            matches!(
                game.select_or_move(to),
                Transition::Played(_) | Transition::PromotionPending(_)
            ),
            "move {from} to {to}"
        );
    }
}

fn game_from(turn: Color, pieces: &[(Square, Piece)]) -> Game {
    let setup = Setup {
        board: pieces.iter().copied().collect(),
        turn,
        castles: Castles::new(),
        ep_pawn: None,
    };
    Game::from_position(Position::from_setup(setup).expect("legal setup"))
}

#[test]
fn test_legal_moves_keep_king_safe() {
    let mut positions = vec![Position::default()];
    for _ in 0..2 {
        positions = positions
            .iter()
            .flat_map(|pos| {
                pos.legal_moves().into_iter().map(move |m| {
                    let mut child = pos.clone();
                    child.play_unchecked(m);
                    assert!(
                        !attacks::is_king_in_check(child.board(), pos.turn()),
                        "{m} leaves king in check"
                    );
                    child
                })
            })
            .collect();
    }
    assert_eq!(positions.len(), 400);
}

#[test]
fn test_initial_state() {
    let game = Game::new();
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.status(), Status::Ongoing);
    assert_eq!(game.position().all_legal_targets().count(), 20);
    assert!(!game.check_state().in_check);
    assert_eq!(game.check_state().king, None);
    assert_eq!(game.board().rows()[7][4], Some(Color::White.king()));
}

#[test]
fn test_castle_king_side() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::E7, Square::E5),
            (Square::G1, Square::F3),
            (Square::B8, Square::C6),
        ],
    );
    assert!(!game.legal_targets(Square::E1).contains(&Square::G1));

    play(
        &mut game,
        &[(Square::F1, Square::C4), (Square::G8, Square::F6)],
    );
    assert!(game.legal_targets(Square::E1).contains(&Square::G1));

    play(&mut game, &[(Square::E1, Square::G1)]);
    assert_eq!(game.board().piece_at(Square::G1), Some(Color::White.king()));
    assert_eq!(game.board().piece_at(Square::F1), Some(Color::White.rook()));
    assert_eq!(game.board().piece_at(Square::H1), None);
    assert!(!game.position().castles().has(Color::White, CastlingSide::QueenSide));
    assert_eq!(
        game.position().castles().moved(Color::White),
        Moved::KING | Moved::KING_SIDE_ROOK
    );
    assert!(game.history().last().is_some_and(|m| m.is_castle()));
}

#[test]
fn test_no_castling_through_attacked_square() {
    let game = game_from(
        Color::White,
        &[
            (Square::E1, Color::White.king()),
            (Square::H1, Color::White.rook()),
            (Square::A1, Color::White.rook()),
            (Square::E8, Color::Black.king()),
            (Square::F6, Color::Black.rook()),
        ],
    );
    let targets = game.legal_targets(Square::E1);
    assert!(!targets.contains(&Square::G1));
    assert!(targets.contains(&Square::C1));
}

#[test]
fn test_no_castling_after_rook_moved_back() {
    let mut game = game_from(
        Color::White,
        &[
            (Square::E1, Color::White.king()),
            (Square::H1, Color::White.rook()),
            (Square::E8, Color::Black.king()),
            (Square::A7, Color::Black.pawn()),
        ],
    );
    play(
        &mut game,
        &[
            (Square::H1, Square::H2),
            (Square::A7, Square::A6),
            (Square::H2, Square::H1),
            (Square::A6, Square::A5),
        ],
    );
    assert!(!game.legal_targets(Square::E1).contains(&Square::G1));
}

#[test]
fn test_rook_captured_on_corner_revokes_castling() {
    let mut game = game_from(
        Color::Black,
        &[
            (Square::E1, Color::White.king()),
            (Square::H1, Color::White.rook()),
            (Square::A1, Color::White.rook()),
            (Square::E8, Color::Black.king()),
            (Square::B7, Color::Black.bishop()),
            (Square::A6, Color::Black.pawn()),
        ],
    );
    play(
        &mut game,
        &[
            (Square::B7, Square::H1),
            (Square::A1, Square::A2),
            (Square::H1, Square::B7),
        ],
    );
    assert!(!game.position().castles().has(Color::White, CastlingSide::KingSide));

    // A new rook on h1 does not restore the right.
    let mut setup = game.position().clone().into_setup();
    setup.board.set_piece_at(Square::H1, Color::White.rook());
    let pos = Position::from_setup(setup).expect("legal setup");
    assert!(!pos.legal_targets(Square::E1).contains(&Square::G1));
}

#[test]
fn test_en_passant_next_ply_only() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::E2, Square::E4),
            (Square::A7, Square::A6),
            (Square::E4, Square::E5),
            (Square::D7, Square::D5),
        ],
    );
    assert_eq!(game.position().ep_pawn(), Some(Square::D5));
    assert!(game.legal_targets(Square::E5).contains(&Square::D6));

    let mut later = game.clone();
    play(&mut later, &[(Square::H2, Square::H3), (Square::A6, Square::A5)]);
    assert!(!later.legal_targets(Square::E5).contains(&Square::D6));

    play(&mut game, &[(Square::E5, Square::D6)]);
    assert_eq!(game.board().piece_at(Square::D6), Some(Color::White.pawn()));
    assert_eq!(game.board().piece_at(Square::D5), None);
    assert_eq!(game.board().piece_at(Square::E5), None);
    assert!(game.history().last().is_some_and(|m| m.is_en_passant()));
}

#[test]
fn test_promotion() {
    let mut game = game_from(
        Color::Black,
        &[
            (Square::E1, Color::White.king()),
            (Square::H8, Color::Black.king()),
            (Square::C2, Color::Black.pawn()),
            (Square::D1, Color::White.rook()),
        ],
    );
    game.select_or_move(Square::C2);
    let transition = game.select_or_move(Square::D1);
    assert!(matches!(transition, Transition::PromotionPending(p) if p.color == Color::Black));

    assert_eq!(game.select_or_move(Square::H8), Transition::Ignored);
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.board().piece_at(Square::D1), Some(Color::White.rook()));

    let m = game.choose_promotion(Role::Queen).expect("pending promotion");
    assert_eq!(
        m,
        Move::Normal {
            role: Role::Pawn,
            from: Square::C2,
            capture: Some(Role::Rook),
            to: Square::D1,
            promotion: Some(Role::Queen),
        }
    );
    assert_eq!(game.board().piece_at(Square::D1), Some(Color::Black.queen()));
    assert_eq!(game.board().piece_at(Square::C2), None);
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.check_state().king, Some(Square::E1));
}

#[test]
fn test_fools_mate() {
    let mut game = Game::new();
    play(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ],
    );
    assert_eq!(game.status(), Status::Checkmate);
    assert!(game.position().all_legal_targets().is_empty());
    assert_eq!(game.select_or_move(Square::E1), Transition::Ignored);
    assert_eq!(game.check_state().king, Some(Square::E1));
}

#[test]
fn test_reset_restores_initial_game() {
    let mut game = Game::new();
    game.reset();
    assert_eq!(game.position(), &Position::default());

    play(&mut game, &[(Square::E2, Square::E4)]);
    game.select_or_move(Square::G8);
    game.reset();
    assert_eq!(game.position(), &Position::default());
    assert_eq!(game.selection(), None);
    assert_eq!(game.status(), Status::Ongoing);

    play(
        &mut game,
        &[
            (Square::F2, Square::F3),
            (Square::E7, Square::E5),
            (Square::G2, Square::G4),
            (Square::D8, Square::H4),
        ],
    );
    game.reset();
    assert_eq!(game.position(), &Position::default());
    assert_eq!(game.status(), Status::Ongoing);
    assert!(game.history().is_empty());
}

#[test]
fn test_en_passant_cannot_expose_king() {
    let mut game = game_from(
        Color::White,
        &[
            (Square::E1, Color::White.king()),
            (Square::B2, Color::White.pawn()),
            (Square::H4, Color::White.rook()),
            (Square::C4, Color::Black.pawn()),
            (Square::A4, Color::Black.king()),
        ],
    );
    play(&mut game, &[(Square::B2, Square::B4)]);
    assert_eq!(game.position().ep_pawn(), Some(Square::B4));
    assert_eq!(game.legal_targets(Square::C4).as_slice(), &[Square::C3]);
}
