//! Portable kernel: the vector algorithm on a 16-byte stack array.
//!
//! Same three stages as the SIMD kernels (widen, byte gather, narrow), with
//! the "register" being a `[u8; 16]`. Used where no byte-permute instruction
//! is available.

/// Expand 16 packed nibbles to one nibble per byte (high nibble zero).
#[inline]
pub(crate) fn widen(word: u64) -> [u8; 16] {
  let mut wide = [0u8; 16];
  for (pair, byte) in wide.chunks_exact_mut(2).zip(word.to_le_bytes()) {
    if let [even, odd] = pair {
      *even = byte & 0x0F;
      *odd = byte >> 4;
    }
  }
  wide
}

/// Recombine adjacent byte pairs as `odd << 4 | even`.
#[inline]
pub(crate) fn narrow(wide: [u8; 16]) -> u64 {
  let mut bytes = [0u8; 8];
  for (out, pair) in bytes.iter_mut().zip(wide.chunks_exact(2)) {
    if let [even, odd] = pair {
      *out = (even & 0x0F) | (odd << 4);
    }
  }
  u64::from_le_bytes(bytes)
}

/// Shuffle sixteen packed nibbles: `dst[i] = src[idx[i]]`.
#[inline]
#[must_use]
pub fn shuffle_portable(src: u64, idx: u64) -> u64 {
  let table = widen(src);
  // Every widened index byte is in 0..16.
  #[allow(clippy::indexing_slicing)]
  let gathered = widen(idx).map(|i| table[usize::from(i & 0x0F)]);
  narrow(gathered)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn widen_places_nibble_i_in_byte_i() {
    let wide = widen(0xFEDC_BA98_7654_3210);
    let expected: [u8; 16] = core::array::from_fn(|i| i as u8);
    assert_eq!(wide, expected);
  }

  #[test]
  fn widen_clears_high_nibbles() {
    assert!(widen(u64::MAX).iter().all(|&b| b == 0x0F));
  }

  #[test]
  fn narrow_inverts_widen() {
    for word in [0, u64::MAX, 0x9E37_79B9_7F4A_7C15, 0xB74E_05C2_FD83_169A] {
      assert_eq!(narrow(widen(word)), word);
    }
  }

  #[test]
  fn matches_reference() {
    use crate::reference::shuffle_reference;

    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for _ in 0..10_000 {
      // xorshift64
      state ^= state << 13;
      state ^= state >> 7;
      state ^= state << 17;
      let src = state;
      let idx = state.rotate_left(29) ^ 0xB74E_05C2_FD83_169A;
      assert_eq!(shuffle_portable(src, idx), shuffle_reference(src, idx));
    }
  }
}
