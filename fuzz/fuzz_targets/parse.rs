//! Fuzz target for `U4x16` hex parsing.
//!
//! Tests that:
//! - No panics on arbitrary input
//! - Anything that parses formats back to a string that parses to the same value

#![no_main]

use libfuzzer_sys::fuzz_target;
use nibble::U4x16;

fuzz_target!(|data: &str| {
  if let Ok(value) = data.parse::<U4x16>() {
    let shown = value.to_string();
    assert_eq!(shown.len(), 18);
    assert_eq!(shown.parse::<U4x16>(), Ok(value));
  }
});
