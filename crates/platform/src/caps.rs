//! CPU capability representation.
//!
//! [`Caps`] records which byte-permute instruction sets this machine can run.
//! Only features some shuffle kernel depends on get a bit.
//!
//! # Bit Layout
//!
//! | Bits | Architecture |
//! |------|--------------|
//! | 0-15 | x86 / x86_64 |
//! | 16-31 | aarch64 |
//! | 32-47 | wasm32 |
//!
//! ```
//! use platform::caps::{Caps, x86};
//!
//! let needed = x86::SHUFFLE_READY;
//! assert!(needed.has(x86::SSSE3));
//! assert!(!Caps::NONE.has(needed));
//! ```

use core::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Capability Set
// ─────────────────────────────────────────────────────────────────────────────

/// Set of detected CPU features, one bit per feature.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Caps(pub(crate) u64);

impl Caps {
  /// No features; every kernel list must end with a candidate requiring this.
  pub const NONE: Self = Self(0);

  /// Build from a raw bit pattern.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn from_raw(bits: u64) -> Self {
    Self(bits)
  }

  /// Raw bit pattern.
  #[cfg(any(test, feature = "testing"))]
  #[inline]
  #[must_use]
  pub const fn as_raw(self) -> u64 {
    self.0
  }

  /// A set holding only feature `bit` (taken modulo 64).
  #[inline]
  #[must_use]
  pub const fn bit(bit: u8) -> Self {
    Self(1 << (bit % 64))
  }

  /// `true` if every feature in `required` is present.
  #[inline(always)]
  #[must_use]
  pub const fn has(self, required: Self) -> bool {
    self.0 & required.0 == required.0
  }

  #[inline]
  #[must_use]
  pub const fn has_bit(self, bit: u8) -> bool {
    self.has(Self::bit(bit))
  }

  #[inline]
  #[must_use]
  pub const fn union(self, other: Self) -> Self {
    Self(self.0 | other.0)
  }

  #[inline]
  #[must_use]
  pub const fn intersection(self, other: Self) -> Self {
    Self(self.0 & other.0)
  }

  /// Features in `self` but not in `other`.
  #[inline]
  #[must_use]
  pub const fn difference(self, other: Self) -> Self {
    Self(self.0 & !other.0)
  }

  #[inline]
  #[must_use]
  pub const fn is_empty(self) -> bool {
    self.0 == 0
  }

  /// Number of features present.
  #[inline]
  #[must_use]
  pub const fn count(self) -> u32 {
    self.0.count_ones()
  }

  /// Names of the present features, in bit order.
  pub fn feature_names(self) -> impl Iterator<Item = &'static str> {
    FEATURE_NAMES.iter().filter(move |(bit, _)| self.has_bit(*bit)).map(|&(_, name)| name)
  }
}

impl core::ops::BitOr for Caps {
  type Output = Self;

  #[inline]
  fn bitor(self, rhs: Self) -> Self {
    self.union(rhs)
  }
}

impl core::ops::BitOrAssign for Caps {
  #[inline]
  fn bitor_assign(&mut self, rhs: Self) {
    self.0 |= rhs.0;
  }
}

impl core::ops::BitAnd for Caps {
  type Output = Self;

  #[inline]
  fn bitand(self, rhs: Self) -> Self {
    self.intersection(rhs)
  }
}

/// `Caps(x86_64, [sse2, ssse3])`, or `Caps(x86_64, none)` when empty.
impl fmt::Debug for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "Caps({}, ", Arch::current())?;
    if self.is_empty() {
      return f.write_str("none)");
    }
    f.write_str("[")?;
    for (i, name) in self.feature_names().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str(name)?;
    }
    f.write_str("])")
  }
}

impl fmt::Display for Caps {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Debug::fmt(self, f)
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Features
// ─────────────────────────────────────────────────────────────────────────────

/// x86 / x86_64.
pub mod x86 {
  use super::Caps;

  /// Baseline on x86_64. Widening uses `psrld`/`punpcklbw`.
  pub const SSE2: Caps = Caps::bit(0);
  /// `pshufb` and `pmaddubsw`.
  pub const SSSE3: Caps = Caps::bit(1);

  /// Everything the SSSE3 shuffle kernel executes.
  pub const SHUFFLE_READY: Caps = SSE2.union(SSSE3);
}

/// aarch64.
pub mod aarch64 {
  use super::Caps;

  /// Advanced SIMD, baseline on AArch64. Provides `tbl`.
  pub const NEON: Caps = Caps::bit(16);

  pub const SHUFFLE_READY: Caps = NEON;
}

/// wasm32.
pub mod wasm {
  use super::Caps;

  /// 128-bit SIMD. Provides `i8x16.swizzle`.
  pub const SIMD128: Caps = Caps::bit(32);

  pub const SHUFFLE_READY: Caps = SIMD128;
}

const FEATURE_NAMES: &[(u8, &str)] = &[(0, "sse2"), (1, "ssse3"), (16, "neon"), (32, "simd128")];

// ─────────────────────────────────────────────────────────────────────────────
// Architecture
// ─────────────────────────────────────────────────────────────────────────────

/// Architecture the capabilities belong to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Arch {
  X86_64,
  X86,
  Aarch64,
  Wasm32,
  #[default]
  Other,
}

impl Arch {
  /// Architecture of the compilation target.
  #[inline]
  #[must_use]
  pub const fn current() -> Self {
    if cfg!(target_arch = "x86_64") {
      Self::X86_64
    } else if cfg!(target_arch = "x86") {
      Self::X86
    } else if cfg!(target_arch = "aarch64") {
      Self::Aarch64
    } else if cfg!(target_arch = "wasm32") {
      Self::Wasm32
    } else {
      Self::Other
    }
  }

  #[inline]
  #[must_use]
  pub const fn name(self) -> &'static str {
    match self {
      Self::X86_64 => "x86_64",
      Self::X86 => "x86",
      Self::Aarch64 => "aarch64",
      Self::Wasm32 => "wasm32",
      Self::Other => "other",
    }
  }

  #[cfg(any(test, not(feature = "std")))]
  pub(crate) const fn as_u8(self) -> u8 {
    match self {
      Self::X86_64 => 1,
      Self::X86 => 2,
      Self::Aarch64 => 3,
      Self::Wasm32 => 4,
      Self::Other => 0,
    }
  }

  #[cfg(any(test, not(feature = "std")))]
  pub(crate) const fn from_u8(value: u8) -> Self {
    match value {
      1 => Self::X86_64,
      2 => Self::X86,
      3 => Self::Aarch64,
      4 => Self::Wasm32,
      _ => Self::Other,
    }
  }
}

impl fmt::Display for Arch {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.name())
  }
}
