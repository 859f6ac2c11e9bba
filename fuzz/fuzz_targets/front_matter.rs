#![no_main]

use libfuzzer_sys::fuzz_target;
use waypoint_core::catalog::extract_front_matter;

fuzz_target!(|data: &[u8]| {
    let Ok(markdown) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(block) = extract_front_matter(markdown) {
        assert!(block.len() <= markdown.len());
    }
});
