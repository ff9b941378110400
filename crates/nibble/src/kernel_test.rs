//! Kernel testing utilities for the nibble shuffle.
//!
//! Runs every kernel that can execute on the current machine and returns
//! their results, for cross-kernel equivalence checks in tests and fuzz
//! targets.
//!
//! The oracle is the scalar reference kernel. Every other kernel, including
//! whatever the dispatcher selected, must match it bit for bit.

use alloc::{format, string::String, vec::Vec};

/// Result from running a kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelResult {
  /// Kernel name (e.g., "reference", "x86_64/ssse3").
  pub name: &'static str,
  /// Shuffled word.
  pub value: u64,
}

/// Run all available shuffle kernels on `(src, idx)`.
///
/// The first entry is always the reference kernel; the last is the
/// dispatched kernel under the name `"dispatch"`.
#[must_use]
pub fn run_all_kernels(src: u64, idx: u64) -> Vec<KernelResult> {
  let mut results: Vec<KernelResult> = crate::bench::available_kernels()
    .into_iter()
    .filter_map(crate::bench::get_kernel)
    .map(|kernel| KernelResult { name: kernel.name, value: (kernel.func)(src, idx) })
    .collect();

  results.push(KernelResult { name: "dispatch", value: crate::permute_simd(src, idx) });

  results
}

/// Verify all shuffle kernels produce the same result.
///
/// Returns `Ok(value)` if all agree, or `Err` describing the first mismatch.
pub fn verify_kernels(src: u64, idx: u64) -> Result<u64, String> {
  let results = run_all_kernels(src, idx);

  let first = results.first().ok_or_else(|| String::from("no kernels available"))?;
  let expected = first.value;

  for result in results.iter().skip(1) {
    if result.value != expected {
      return Err(format!(
        "kernel mismatch for src=0x{src:016X} idx=0x{idx:016X}: {} produced 0x{expected:016X}, but {} produced 0x{:016X}",
        first.name, result.name, result.value
      ));
    }
  }

  Ok(expected)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reference_first_dispatch_last() {
    let results = run_all_kernels(0, 0);
    assert_eq!(results.first().map(|r| r.name), Some(crate::kernels::REFERENCE));
    assert_eq!(results.last().map(|r| r.name), Some("dispatch"));
    assert!(results.iter().any(|r| r.name == crate::kernels::PORTABLE));
  }

  #[test]
  fn kernels_agree_on_golden_vector() {
    assert_eq!(verify_kernels(0x9E37_79B9_7F4A_7C15, 0xB74E_05C2_FD83_169A), Ok(0x77AE_547C_9397_1FB9));
  }

  #[test]
  fn kernels_agree_on_edges() {
    for (src, idx) in [
      (0, 0),
      (u64::MAX, u64::MAX),
      (u64::MAX, 0),
      (0x0123_4567_89AB_CDEF, 0xFEDC_BA98_7654_3210),
      (0xFEDC_BA98_7654_3210, 0x0123_4567_89AB_CDEF),
      (0xF0F0_F0F0_F0F0_F0F0, 0x8888_8888_8888_8888),
    ] {
      verify_kernels(src, idx).expect("kernels should agree");
    }
  }

  #[test]
  fn kernels_agree_on_every_broadcast() {
    let src = 0x0123_4567_89AB_CDEF;
    for k in 0..16u64 {
      let idx = k * 0x1111_1111_1111_1111;
      verify_kernels(src, idx).expect("kernels should agree on broadcast index");
    }
  }
}
