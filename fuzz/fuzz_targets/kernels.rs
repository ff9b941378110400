//! Cross-kernel fuzzing: every kernel available on this machine must agree
//! with the scalar reference.

#![no_main]

use libfuzzer_sys::fuzz_target;
use nibble::__internal::kernel_test;

fuzz_target!(|input: (u64, u64)| {
  let (src, idx) = input;
  if let Err(msg) = kernel_test::verify_kernels(src, idx) {
    panic!("{msg}");
  }
});
