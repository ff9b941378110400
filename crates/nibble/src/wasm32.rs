//! wasm32 SIMD128 nibble shuffle.
//!
//! WebAssembly features are fixed when the module is built, so this kernel is
//! only compiled with `-C target-feature=+simd128`.
//!
//! 1. Widen: `i8x16.shuffle` interleaves the packed bytes with a `u8x16.shr 4` copy, `v128.and 0x0F`.
//! 2. Permute: one `i8x16.swizzle`.
//! 3. Narrow: 16-bit lanes `odd << 8 | even`, OR a copy shifted right by 4, mask to the low byte,
//!    `u8x16.narrow_i16x8` packs them (never saturates: every lane is at most 0xFF).

#![cfg(all(target_arch = "wasm32", target_feature = "simd128"))]

use core::arch::wasm32::{
  i64x2_extract_lane, u8x16_narrow_i16x8, u8x16_shr, u8x16_shuffle, u8x16_splat, u8x16_swizzle, u16x8_shr,
  u16x8_splat, u64x2, v128, v128_and, v128_or,
};

#[inline]
fn widen(word: u64) -> v128 {
  let lo = u64x2(word, 0);
  let hi = u8x16_shr(lo, 4);
  let zipped = u8x16_shuffle::<0, 16, 1, 17, 2, 18, 3, 19, 4, 20, 5, 21, 6, 22, 7, 23>(lo, hi);
  v128_and(zipped, u8x16_splat(0x0F))
}

#[inline]
fn narrow(wide: v128) -> u64 {
  let packed = v128_and(v128_or(wide, u16x8_shr(wide, 4)), u16x8_splat(0x00FF));
  i64x2_extract_lane::<0>(u8x16_narrow_i16x8(packed, packed)) as u64
}

/// Shuffle sixteen packed nibbles with SIMD128 `i8x16.swizzle`.
#[inline]
pub fn shuffle_simd128(src: u64, idx: u64) -> u64 {
  narrow(u8x16_swizzle(widen(src), widen(idx)))
}
