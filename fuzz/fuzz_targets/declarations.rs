//! Fuzz target for the declaration parser and resolver.
//!
//! This target feeds arbitrary byte sequences through parsing and include
//! resolution to find crashes, panics and runaway recursion.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_declarations
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;
use tsprisma_resolver::generate_includes;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Errors are fine, panics are not
        let _ = generate_includes(input);
    }
});
