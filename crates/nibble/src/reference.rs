//! Scalar reference kernel.
//!
//! One lane at a time: read index nibble `i`, read the source nibble it names,
//! OR it into position `i`. Obviously correct by inspection; every other
//! kernel must match it bit for bit.

/// Shuffle sixteen packed nibbles: `dst[i] = src[idx[i]]`.
#[inline]
#[must_use]
pub const fn shuffle_reference(src: u64, idx: u64) -> u64 {
  let mut dst = 0u64;
  let mut i = 0u32;
  while i < 16 {
    let index = ((idx >> (i * 4)) & 0xF) as u32;
    dst |= ((src >> (index * 4)) & 0xF) << (i * 4);
    i += 1;
  }
  dst
}

#[cfg(test)]
mod tests {
  use super::*;

  const IDENTITY: u64 = 0xFEDC_BA98_7654_3210;

  #[test]
  fn identity_index_is_noop() {
    for src in [0, u64::MAX, 0x9E37_79B9_7F4A_7C15, 0x0123_4567_89AB_CDEF] {
      assert_eq!(shuffle_reference(src, IDENTITY), src);
    }
  }

  #[test]
  fn reversed_index_reverses_lanes() {
    assert_eq!(shuffle_reference(0x9E37_79B9_7F4A_7C15, 0x0123_4567_89AB_CDEF), 0x51C7_A4F7_9B97_73E9);
  }

  #[test]
  fn zero_index_broadcasts_lane_zero() {
    assert_eq!(shuffle_reference(0x9E37_79B9_7F4A_7C15, 0), 0x5555_5555_5555_5555);
  }

  #[test]
  fn golden_vector() {
    assert_eq!(shuffle_reference(0x9E37_79B9_7F4A_7C15, 0xB74E_05C2_FD83_169A), 0x77AE_547C_9397_1FB9);
  }

  #[test]
  fn usable_in_const_context() {
    const DST: u64 = shuffle_reference(0xFEDC_BA98_7654_3210, 0x0000_0000_0000_000F);
    assert_eq!(DST, 0x0000_0000_0000_000F);
  }
}
