#![no_main]

use arbitrary::Arbitrary;
use caissa::{attacks, Game, Role, Square, Transition};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Input {
    Click(Square),
    Promote(Role),
    Undo,
}

fuzz_target!(|inputs: Vec<Input>| {
    let mut game = Game::new();
    for input in inputs {
        let mover = game.turn();
        match input {
            Input::Click(sq) => match game.select_or_move(sq) {
                Transition::Played(m) => {
                    assert!(!attacks::is_king_in_check(game.board(), mover), "{m}");
                    assert_eq!(game.turn(), !mover);
                }
                Transition::PromotionPending(pending) => {
                    assert_eq!(pending.color, mover);
                    assert_eq!(game.turn(), mover);
                }
                Transition::Ignored | Transition::Selected { .. } | Transition::Deselected => {
                    assert_eq!(game.turn(), mover);
                }
            },
            Input::Promote(role) => {
                if game.choose_promotion(role).is_ok() {
                    assert!(!attacks::is_king_in_check(game.board(), mover));
                    assert_eq!(game.turn(), !mover);
                }
            }
            Input::Undo => {
                game.undo();
            }
        }
        assert_eq!(game.status(), game.position().status());
    }
});
