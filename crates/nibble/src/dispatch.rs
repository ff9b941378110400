//! Shuffle kernel selection.
//!
//! The selector runs once per process (first call) and is cached by the
//! dispatcher. Selection order:
//!
//! 1. `NIBBLE_SHUFFLE_FORCE` (clamped to detected caps)
//! 2. SIMD kernel known at compile time (`ssse3`, `neon`, `simd128`)
//! 3. SIMD kernel detected at runtime (x86_64 under `std`)
//! 4. Portable fallback

use backend::Selected;
#[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3"), feature = "std"))]
use backend::{candidates, select};
use platform::Caps;
#[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3"), feature = "std"))]
use platform::caps::x86;

use crate::{
  config::{self, ShuffleForce},
  kernels, portable, reference,
};

/// Kernel signature: `(src, idx) -> dst`.
pub type ShuffleFn = fn(u64, u64) -> u64;

backend::define_dispatcher!(
  /// Cached dispatcher for nibble shuffle kernels.
  pub ShuffleDispatcher, ShuffleFn, (src: u64, idx: u64) -> u64
);

pub(crate) static DISPATCHER: ShuffleDispatcher = ShuffleDispatcher::new(select_shuffle);

// ─────────────────────────────────────────────────────────────────────────────
// Availability
// ─────────────────────────────────────────────────────────────────────────────

/// Whether a SIMD shuffle kernel can run with `caps` in this build.
#[inline]
#[must_use]
#[allow(unused_variables)]
pub(crate) fn simd_available(caps: Caps) -> bool {
  #[cfg(all(target_arch = "x86_64", target_feature = "ssse3"))]
  {
    true
  }
  #[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3"), feature = "std"))]
  {
    caps.has(x86::SHUFFLE_READY)
  }
  #[cfg(all(target_arch = "aarch64", target_endian = "little", target_feature = "neon"))]
  {
    true
  }
  #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
  {
    true
  }
  #[cfg(not(any(
    all(target_arch = "x86_64", any(target_feature = "ssse3", feature = "std")),
    all(target_arch = "aarch64", target_endian = "little", target_feature = "neon"),
    all(target_arch = "wasm32", target_feature = "simd128"),
  )))]
  {
    false
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────────────────────────

fn select_shuffle() -> Selected<ShuffleFn> {
  select_for(config::get().effective_force, platform::caps())
}

/// Pick a kernel for an explicit force mode and capability set.
#[must_use]
pub(crate) fn select_for(force: ShuffleForce, caps: Caps) -> Selected<ShuffleFn> {
  match force {
    ShuffleForce::Reference => Selected::<ShuffleFn>::new(kernels::REFERENCE, reference::shuffle_reference),
    ShuffleForce::Portable => Selected::<ShuffleFn>::new(kernels::PORTABLE, portable::shuffle_portable),
    ShuffleForce::Auto | ShuffleForce::Simd => select_auto(caps),
  }
}

#[cfg(all(target_arch = "x86_64", target_feature = "ssse3"))]
fn select_auto(_caps: Caps) -> Selected<ShuffleFn> {
  Selected::<ShuffleFn>::new(kernels::X86_64_SSSE3, crate::x86_64::shuffle_ssse3_enabled)
}

#[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3"), feature = "std"))]
fn select_auto(caps: Caps) -> Selected<ShuffleFn> {
  select::<ShuffleFn>(caps, candidates![
    kernels::X86_64_SSSE3 => x86::SHUFFLE_READY => crate::x86_64::shuffle_ssse3_runtime,
    kernels::PORTABLE => Caps::NONE => portable::shuffle_portable,
  ])
}

#[cfg(all(target_arch = "aarch64", target_endian = "little", target_feature = "neon"))]
fn select_auto(_caps: Caps) -> Selected<ShuffleFn> {
  Selected::<ShuffleFn>::new(kernels::AARCH64_NEON, crate::aarch64::shuffle_neon)
}

#[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
fn select_auto(_caps: Caps) -> Selected<ShuffleFn> {
  Selected::<ShuffleFn>::new(kernels::WASM32_SIMD128, crate::wasm32::shuffle_simd128)
}

#[cfg(not(any(
  all(target_arch = "x86_64", any(target_feature = "ssse3", feature = "std")),
  all(target_arch = "aarch64", target_endian = "little", target_feature = "neon"),
  all(target_arch = "wasm32", target_feature = "simd128"),
)))]
fn select_auto(_caps: Caps) -> Selected<ShuffleFn> {
  Selected::<ShuffleFn>::new(kernels::PORTABLE, portable::shuffle_portable)
}
