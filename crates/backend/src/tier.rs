//! Kernel acceleration tiers.
//!
//! | Tier | Name | Description |
//! |------|------|-------------|
//! | 0 | Reference | Scalar per-nibble loop, always available, the oracle |
//! | 1 | Portable | Widen/gather/narrow on a stack array, production fallback |
//! | 2 | Simd | One 128-bit byte permute (`pshufb`, `tbl`, `swizzle`) |

use core::fmt;

/// Kernel acceleration tier.
///
/// Ordered from lowest (always available) to highest, so `tier >= KernelTier::Simd`
/// checks for vector acceleration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum KernelTier {
  /// Tier 0: scalar reference implementation.
  ///
  /// Obviously correct by inspection. Used for verification.
  #[default]
  Reference = 0,

  /// Tier 1: portable implementation without vector instructions.
  Portable = 1,

  /// Tier 2: 128-bit vector byte permute.
  ///
  /// - x86_64: SSSE3 `pshufb`
  /// - aarch64: NEON `tbl`
  /// - wasm32: SIMD128 `i8x16.swizzle`
  Simd = 2,
}

impl KernelTier {
  /// All tiers in ascending order.
  pub const ALL: [Self; 3] = [Self::Reference, Self::Portable, Self::Simd];

  /// Convert to numeric value.
  #[inline]
  #[must_use]
  pub const fn as_u8(self) -> u8 {
    self as u8
  }

  /// Human-readable tier name.
  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::Reference => "reference",
      Self::Portable => "portable",
      Self::Simd => "simd",
    }
  }
}

impl fmt::Display for KernelTier {
  #[inline]
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
