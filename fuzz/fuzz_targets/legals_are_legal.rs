#![no_main]

use arbitrary::Arbitrary;
use caissa::{Move, Position};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Data {
    moves: Vec<u8>,
    candidate: Move,
}

fuzz_target!(|data: Data| {
    // Walk the game tree by indexing into the legal moves.
    let mut pos = Position::default();
    for index in data.moves {
        let legals = pos.legal_moves();
        if legals.is_empty() {
            break;
        }
        pos.play_unchecked(legals[usize::from(index) % legals.len()]);
    }

    let legals = pos.legal_moves();
    assert_eq!(
        legals.contains(&data.candidate),
        pos.is_legal(data.candidate)
    );
    assert!(legals.iter().all(|&m| pos.is_legal(m)));
    assert_eq!(legals.is_empty(), pos.status().is_game_over());
});
