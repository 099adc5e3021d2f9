#![no_main]

use caissa::Square;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(square) = Square::from_ascii(data) {
        let roundtripped = Square::from_ascii(square.to_string().as_bytes()).expect("roundtrip");
        assert_eq!(square, roundtripped);

        let (row, col) = square.row_col();
        assert_eq!(Square::from_row_col(row as i32, col as i32), Ok(square));
    }
});
