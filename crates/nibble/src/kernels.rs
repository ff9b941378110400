//! Static kernel name table.
//!
//! All kernel names live here so introspection, dispatch, and the
//! cross-kernel tests share identifiers.

use backend::KernelTier;

/// Scalar per-lane reference kernel.
pub const REFERENCE: &str = "reference";
/// Widen/gather/narrow on a stack array.
pub const PORTABLE: &str = "portable/lanes";
/// SSSE3 `pshufb` + `pmaddubsw`/`packuswb`.
pub const X86_64_SSSE3: &str = "x86_64/ssse3";
/// NEON `tbl` + shift-or/`xtn`.
pub const AARCH64_NEON: &str = "aarch64/neon";
/// SIMD128 `i8x16.swizzle`.
pub const WASM32_SIMD128: &str = "wasm32/simd128";

/// Every kernel name, lowest tier first.
pub const ALL: &[&str] = &[REFERENCE, PORTABLE, X86_64_SSSE3, AARCH64_NEON, WASM32_SIMD128];

/// Acceleration tier of a named kernel.
#[inline]
#[must_use]
pub fn tier_of(name: &str) -> KernelTier {
  match name {
    REFERENCE => KernelTier::Reference,
    X86_64_SSSE3 | AARCH64_NEON | WASM32_SIMD128 => KernelTier::Simd,
    _ => KernelTier::Portable,
  }
}
