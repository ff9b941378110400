//! Data-dependent shuffle of sixteen packed 4-bit lanes.
//!
//! A `u64` holds sixteen nibbles, lane 0 in the least significant bits. For
//! a source word and an index word, the shuffle computes
//! `dst[i] = src[idx[i]]` for every lane.
//!
//! # Kernels
//!
//! | Kernel | Tier | Where |
//! |--------|------|-------|
//! | `reference` | Reference | everywhere, `const fn`, the oracle |
//! | `portable/lanes` | Portable | fallback without a byte permute |
//! | `x86_64/ssse3` | Simd | `pshufb`, compile-time or runtime detected |
//! | `aarch64/neon` | Simd | `tbl`, always on little-endian AArch64 |
//! | `wasm32/simd128` | Simd | `i8x16.swizzle` with `+simd128` |
//!
//! The SIMD kernels widen both words to one nibble per byte, run a single
//! 16-byte permute, and pack the result back to nibbles.
//!
//! # Example
//!
//! ```
//! let src = 0x9E37_79B9_7F4A_7C15;
//! let idx = 0xB74E_05C2_FD83_169A;
//! assert_eq!(nibble::permute_simd(src, idx), nibble::permute_reference(src, idx));
//! assert_eq!(nibble::permute_simd(src, 0xFEDC_BA98_7654_3210), src);
//! ```
//!
//! # Features
//!
//! - `std` (default): runtime CPU detection and `NIBBLE_SHUFFLE_FORCE`.
//! - `alloc`: kernel lookup by name ([`bench`]) and cross-kernel test helpers.
//! - `diag`: selection diagnostics ([`diag::selection_diag`]).

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![deny(unsafe_code)]
#![no_std]

#[cfg(any(test, feature = "alloc"))]
extern crate alloc;
#[cfg(any(test, feature = "std"))]
extern crate std;

pub mod config;
#[cfg(feature = "diag")]
pub mod diag;
pub mod dispatch;
mod error;
pub mod kernels;
mod portable;
mod reference;
mod u4x16;

#[cfg(feature = "alloc")]
pub mod bench;
#[cfg(feature = "alloc")]
#[doc(hidden)]
pub mod kernel_test;

#[cfg(all(target_arch = "aarch64", target_endian = "little", target_feature = "neon"))]
mod aarch64;
#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
mod wasm32;
#[cfg(all(target_arch = "x86_64", any(feature = "std", target_feature = "ssse3")))]
mod x86_64;

#[cfg(test)]
mod proptests;

pub use backend::KernelTier;
pub use config::{ShuffleConfig, ShuffleForce};
pub use error::{NibbleRangeError, ParseU4x16Error};
pub use u4x16::U4x16;

/// Shuffle sixteen packed nibbles with the fastest kernel for this machine.
///
/// `dst[i] = src[idx[i]]` for each 4-bit lane `i`. Always equal to
/// [`permute_reference`].
///
/// The kernel is selected on first call and cached.
#[inline]
#[must_use]
pub fn permute_simd(src: u64, idx: u64) -> u64 {
  dispatch::DISPATCHER.call(src, idx)
}

/// Shuffle sixteen packed nibbles with the scalar reference loop.
#[inline]
#[must_use]
pub const fn permute_reference(src: u64, idx: u64) -> u64 {
  reference::shuffle_reference(src, idx)
}

/// Name of the kernel [`permute_simd`] uses (e.g. `"x86_64/ssse3"`).
#[inline]
#[must_use]
pub fn selected_backend() -> &'static str {
  dispatch::DISPATCHER.backend_name()
}

/// Tier of the kernel [`permute_simd`] uses.
#[inline]
#[must_use]
pub fn selected_tier() -> KernelTier {
  kernels::tier_of(selected_backend())
}

#[doc(hidden)]
#[cfg(feature = "alloc")]
pub mod __internal {
  pub use crate::kernel_test;
}
