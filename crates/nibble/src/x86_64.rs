//! x86_64 SSSE3 nibble shuffle.
//!
//! Three stages, all inside one XMM register:
//!
//! 1. Widen: `movq`, `psrld 4`, `punpcklbw` of original and shifted, `pand 0x0F`. Byte `i` then
//!    holds nibble `i`.
//! 2. Permute: one `pshufb` of the widened source by the widened indices.
//! 3. Narrow: `pmaddubsw` by `[1, 16]` per byte pair gives `odd * 16 + even` in each 16-bit lane,
//!    `packuswb` packs those lanes back to bytes. The low 64 bits are the result.
//!
//! Safety:
//! - This file is allowed to use `unsafe` for ISA-specific intrinsics.
//! - All unsafe is contained within this module.

#![allow(unsafe_code)]

use core::arch::x86_64::{
  __m128i, _mm_and_si128, _mm_cvtsi64_si128, _mm_cvtsi128_si64, _mm_maddubs_epi16, _mm_packus_epi16, _mm_set1_epi8,
  _mm_set1_epi16, _mm_shuffle_epi8, _mm_srli_epi32, _mm_unpacklo_epi8,
};

/// Expand 16 packed nibbles to one nibble per byte lane.
///
/// `psrld` moves each byte's high nibble into its low half (the bits shifted
/// in from the neighbouring byte land in the high half and are masked away).
#[inline]
#[target_feature(enable = "sse2")]
unsafe fn widen(word: u64) -> __m128i {
  let lo = _mm_cvtsi64_si128(word as i64);
  let hi = _mm_srli_epi32::<4>(lo);
  _mm_and_si128(_mm_unpacklo_epi8(lo, hi), _mm_set1_epi8(0x0F))
}

/// Pack byte pairs `(even, odd)` into `odd << 4 | even`.
#[inline]
#[target_feature(enable = "ssse3")]
unsafe fn narrow(wide: __m128i) -> u64 {
  // 0x1001 = bytes [0x01, 0x10]: even * 1 + odd * 16, at most 0xFF, so packus never saturates.
  let pairs = _mm_maddubs_epi16(wide, _mm_set1_epi16(0x1001));
  _mm_cvtsi128_si64(_mm_packus_epi16(pairs, pairs)) as u64
}

/// Shuffle sixteen packed nibbles with SSSE3 `pshufb`.
///
/// # Safety
/// Caller must ensure the CPU supports the `ssse3` target feature.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn shuffle_ssse3_unchecked(src: u64, idx: u64) -> u64 {
  unsafe {
    let table = widen(src);
    let lanes = widen(idx);
    // Index bytes are 0..16, so bit 7 is never set and no lane is zeroed.
    narrow(_mm_shuffle_epi8(table, lanes))
  }
}

/// SSSE3 kernel when `ssse3` is enabled at compile time.
#[cfg(target_feature = "ssse3")]
#[inline]
pub fn shuffle_ssse3_enabled(src: u64, idx: u64) -> u64 {
  // SAFETY: this function is only compiled when `target_feature = "ssse3"`.
  unsafe { shuffle_ssse3_unchecked(src, idx) }
}

#[cfg(feature = "std")]
#[inline]
pub(crate) fn shuffle_ssse3_runtime(src: u64, idx: u64) -> u64 {
  // SAFETY: selected only when `platform::caps()` reports `x86::SHUFFLE_READY`.
  unsafe { shuffle_ssse3_unchecked(src, idx) }
}

#[cfg(test)]
mod tests {
  use core::arch::x86_64::{_mm_bslli_si128, _mm_or_si128, _mm_set_epi64x, _mm_slli_epi64};

  use super::*;
  use crate::reference::shuffle_reference;

  fn has_ssse3() -> bool {
    std::arch::is_x86_feature_detected!("ssse3")
  }

  /// Shift/OR recombination: `(v << 4) | (v << 8 bits)` leaves each packed
  /// byte in an odd position, which a second `pshufb` collects.
  #[target_feature(enable = "ssse3")]
  unsafe fn narrow_shift_or(wide: __m128i) -> u64 {
    let odd = _mm_set_epi64x(-1, 0x0F0D_0B09_0705_0301);
    let hi = _mm_slli_epi64::<4>(wide);
    let shifted = _mm_bslli_si128::<1>(wide);
    _mm_cvtsi128_si64(_mm_shuffle_epi8(_mm_or_si128(shifted, hi), odd)) as u64
  }

  /// Widening with scalar masks first, so no vector shift is needed.
  #[target_feature(enable = "sse2")]
  unsafe fn widen_scalar_split(word: u64) -> __m128i {
    const SPLIT: u64 = 0x0F0F_0F0F_0F0F_0F0F;
    let lo = _mm_cvtsi64_si128((word & SPLIT) as i64);
    let hi = _mm_cvtsi64_si128(((word & !SPLIT) >> 4) as i64);
    _mm_unpacklo_epi8(lo, hi)
  }

  fn samples() -> impl Iterator<Item = (u64, u64)> {
    let mut state = 0xB74E_05C2_FD83_169Au64;
    (0..4096).map(move |_| {
      state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
      (state, state.rotate_left(32).wrapping_mul(0x9E37_79B9_7F4A_7C15))
    })
  }

  #[test]
  fn ssse3_golden_vector() {
    if !has_ssse3() {
      return;
    }
    let dst = unsafe { shuffle_ssse3_unchecked(0x9E37_79B9_7F4A_7C15, 0xB74E_05C2_FD83_169A) };
    assert_eq!(dst, 0x77AE_547C_9397_1FB9);
  }

  #[test]
  fn ssse3_matches_reference() {
    if !has_ssse3() {
      return;
    }
    for (src, idx) in samples() {
      let got = unsafe { shuffle_ssse3_unchecked(src, idx) };
      assert_eq!(got, shuffle_reference(src, idx), "src={src:#018X} idx={idx:#018X}");
    }
  }

  #[test]
  fn recombination_strategies_are_bit_identical() {
    if !has_ssse3() {
      return;
    }
    for (src, idx) in samples() {
      unsafe {
        let permuted = _mm_shuffle_epi8(widen(src), widen(idx));
        assert_eq!(narrow(permuted), narrow_shift_or(permuted), "src={src:#018X} idx={idx:#018X}");
      }
    }
  }

  #[test]
  fn widening_strategies_are_bit_identical() {
    if !has_ssse3() {
      return;
    }
    for (word, _) in samples() {
      unsafe {
        let a = widen(word);
        let b = widen_scalar_split(word);
        assert_eq!(narrow(a), narrow(b));
        assert_eq!(narrow(a), word);
      }
    }
  }
}
