#![no_main]

use libfuzzer_sys::fuzz_target;
use repolog_git::since::parse_since;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(Some(boundary)) = parse_since(text) {
            // Any accepted boundary is a midnight
            assert_eq!(boundary.timestamp().rem_euclid(86_400), 0);
        }
    }
});
