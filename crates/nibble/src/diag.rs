//! Optional diagnostics for kernel selection.
//!
//! This module is behind `cfg(feature = "diag")` and is intended for
//! explainable kernel selection without affecting normal builds.

use backend::KernelTier;
use platform::{Arch, Caps};

use crate::config::ShuffleForce;

/// Snapshot of how the process-wide shuffle kernel was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleSelectionDiag {
  /// Force mode parsed from `NIBBLE_SHUFFLE_FORCE` (`Auto` when unset).
  pub requested_force: ShuffleForce,
  /// Force mode after clamping to this machine's capabilities.
  pub effective_force: ShuffleForce,
  /// Name of the kernel the dispatcher runs, e.g. `"x86_64/ssse3"`.
  pub selected_kernel: &'static str,
  /// Tier of `selected_kernel`.
  pub tier: KernelTier,
  /// Architecture the capabilities were detected on.
  pub arch: Arch,
  /// Detected (or overridden) CPU capabilities.
  pub caps: Caps,
  /// Whether a SIMD kernel can run with `caps` in this build.
  pub has_simd: bool,
  /// Whether a detection override is installed.
  pub has_override: bool,
}

/// Explain which shuffle kernel is selected, and why.
#[must_use]
pub fn selection_diag() -> ShuffleSelectionDiag {
  let cfg = crate::config::get();
  let detected = platform::get();
  let selected_kernel = crate::selected_backend();
  ShuffleSelectionDiag {
    requested_force: cfg.requested_force,
    effective_force: cfg.effective_force,
    selected_kernel,
    tier: crate::kernels::tier_of(selected_kernel),
    arch: detected.arch,
    caps: detected.caps,
    has_simd: crate::dispatch::simd_available(detected.caps),
    has_override: platform::has_override(),
  }
}
