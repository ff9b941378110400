//! aarch64 NEON nibble shuffle.
//!
//! 1. Widen: `zip1`/`zip2` the packed bytes with a `ushr #4` copy, `and 0x0F`.
//! 2. Permute: one `tbl` (`vqtbl1q_u8`) of the widened source by the widened indices.
//! 3. Narrow: view byte pairs as 16-bit lanes `odd << 8 | even`, OR in a copy shifted right by
//!    4 so the low byte becomes `odd << 4 | even`, then `xtn` keeps the low bytes.
//!
//! NEON is baseline on AArch64, so this kernel is selected at compile time.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::aarch64::{
  uint8x16_t, vandq_u8, vcombine_u8, vcreate_u8, vdupq_n_u8, vget_lane_u64, vmovn_u16, vorrq_u16, vqtbl1q_u8,
  vreinterpret_u64_u8, vreinterpretq_u16_u8, vshr_n_u8, vshrq_n_u16, vzip1_u8, vzip2_u8,
};

#[inline]
#[target_feature(enable = "neon")]
unsafe fn widen(word: u64) -> uint8x16_t {
  let lo = vcreate_u8(word);
  let hi = vshr_n_u8::<4>(lo);
  vandq_u8(vcombine_u8(vzip1_u8(lo, hi), vzip2_u8(lo, hi)), vdupq_n_u8(0x0F))
}

#[inline]
#[target_feature(enable = "neon")]
unsafe fn narrow(wide: uint8x16_t) -> u64 {
  let pairs = vreinterpretq_u16_u8(wide);
  let packed = vorrq_u16(pairs, vshrq_n_u16::<4>(pairs));
  vget_lane_u64::<0>(vreinterpret_u64_u8(vmovn_u16(packed)))
}

/// Shuffle sixteen packed nibbles with NEON `tbl`.
///
/// # Safety
/// Caller must ensure the CPU supports the `neon` target feature.
#[target_feature(enable = "neon")]
pub(crate) unsafe fn shuffle_neon_unchecked(src: u64, idx: u64) -> u64 {
  unsafe {
    let table = widen(src);
    let lanes = widen(idx);
    narrow(vqtbl1q_u8(table, lanes))
  }
}

/// NEON kernel (NEON is always enabled on AArch64 targets).
#[cfg(target_feature = "neon")]
#[inline]
pub fn shuffle_neon(src: u64, idx: u64) -> u64 {
  // SAFETY: this function is only compiled when `target_feature = "neon"`.
  unsafe { shuffle_neon_unchecked(src, idx) }
}

#[cfg(all(test, target_feature = "neon"))]
mod tests {
  use super::*;
  use crate::reference::shuffle_reference;

  #[test]
  fn neon_golden_vector() {
    assert_eq!(shuffle_neon(0x9E37_79B9_7F4A_7C15, 0xB74E_05C2_FD83_169A), 0x77AE_547C_9397_1FB9);
  }

  #[test]
  fn neon_widen_narrow_round_trip() {
    for word in [0, u64::MAX, 0x0123_4567_89AB_CDEF, 0x9E37_79B9_7F4A_7C15] {
      // SAFETY: module is only compiled with NEON enabled.
      assert_eq!(unsafe { narrow(widen(word)) }, word);
    }
  }

  #[test]
  fn neon_matches_reference() {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for _ in 0..4096 {
      state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      let idx = state.rotate_left(17) ^ 0xB74E_05C2_FD83_169A;
      assert_eq!(shuffle_neon(state, idx), shuffle_reference(state, idx));
    }
  }
}
