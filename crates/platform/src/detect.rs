//! CPU detection.
//!
//! [`get()`] answers once per process which shuffle-relevant features the CPU
//! has:
//!
//! - features enabled at compile time (`cfg!(target_feature = ...)`)
//! - under `std` on x86, `is_x86_feature_detected!` at runtime
//! - an override installed before the first `get()` replaces both
//! - under Miri, always portable
//!
//! ```ignore
//! // Must run before the first `get()`.
//! platform::set_override(Some(Detected::portable()));
//! ```

use core::fmt;

use crate::caps::{Arch, Caps};

/// Detection result: what the CPU can run, and which architecture it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Detected {
  pub caps: Caps,
  pub arch: Arch,
}

impl Detected {
  /// No SIMD capabilities on the current architecture.
  #[inline]
  #[must_use]
  pub const fn portable() -> Self {
    Self::with_caps(Caps::NONE)
  }

  #[inline]
  #[must_use]
  pub const fn with_caps(caps: Caps) -> Self {
    Self { caps, arch: Arch::current() }
  }
}

/// Error returned when a detection override cannot be installed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum OverrideError {
  /// Detection already started; overrides are pre-init only.
  AlreadyInitialized,
  /// This build has no storage for overrides.
  Unsupported,
}

impl fmt::Display for OverrideError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::AlreadyInitialized => f.write_str("detection already initialized"),
      Self::Unsupported => f.write_str("overrides are unsupported on this target"),
    }
  }
}

impl core::error::Error for OverrideError {}

// ─────────────────────────────────────────────────────────────────────────────
// Detection
// ─────────────────────────────────────────────────────────────────────────────

/// Capabilities fixed at compile time (`-C target-feature`, `-C target-cpu`).
///
/// ```
/// const CAPS: platform::Caps = platform::caps_static();
///
/// #[cfg(target_arch = "x86_64")]
/// assert!(CAPS.has(platform::caps::x86::SSE2));
///
/// #[cfg(target_arch = "aarch64")]
/// assert!(CAPS.has(platform::caps::aarch64::NEON));
/// ```
#[inline(always)]
#[must_use]
pub const fn caps_static() -> Caps {
  use crate::caps::{aarch64, wasm, x86};

  let mut caps = Caps::NONE;
  // SSE2 is part of the x86_64 baseline, NEON of the AArch64 one.
  if cfg!(any(target_arch = "x86_64", all(target_arch = "x86", target_feature = "sse2"))) {
    caps = caps.union(x86::SSE2);
  }
  if cfg!(all(any(target_arch = "x86_64", target_arch = "x86"), target_feature = "ssse3")) {
    caps = caps.union(x86::SSSE3);
  }
  if cfg!(target_arch = "aarch64") {
    caps = caps.union(aarch64::NEON);
  }
  if cfg!(all(target_arch = "wasm32", target_feature = "simd128")) {
    caps = caps.union(wasm::SIMD128);
  }
  caps
}

/// Detect capabilities without caching or overrides.
///
/// NEON and SIMD128 are known at build time, so only x86 probes the CPU.
#[inline]
#[must_use]
pub fn detect_uncached() -> Detected {
  #[allow(unused_mut)]
  let mut caps = caps_static();

  #[cfg(all(feature = "std", any(target_arch = "x86_64", target_arch = "x86")))]
  {
    use crate::caps::x86;

    if std::arch::is_x86_feature_detected!("sse2") {
      caps |= x86::SSE2;
    }
    if std::arch::is_x86_feature_detected!("ssse3") {
      caps |= x86::SSSE3;
    }
  }

  Detected::with_caps(caps)
}

// ─────────────────────────────────────────────────────────────────────────────
// Cache + Override
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(feature = "std")]
use std::sync::{OnceLock, RwLock};

#[cfg(all(feature = "std", not(miri)))]
static STD_CACHE: OnceLock<Detected> = OnceLock::new();

#[cfg(feature = "std")]
static OVERRIDE: RwLock<Option<Detected>> = RwLock::new(None);

/// Set (under the `OVERRIDE` lock) once the first detection has read the
/// override. Later override writes are rejected.
#[cfg(all(feature = "std", not(miri)))]
static INIT_STARTED: core::sync::atomic::AtomicBool = core::sync::atomic::AtomicBool::new(false);

/// Get detected CPU capabilities.
///
/// The first call performs detection and caches the result; later calls read
/// the cache. An override installed before the first call takes precedence.
/// Under Miri, always returns portable-only capabilities.
#[inline]
#[must_use]
pub fn get() -> Detected {
  #[cfg(miri)]
  {
    Detected::portable()
  }

  #[cfg(all(not(miri), feature = "std"))]
  {
    *STD_CACHE.get_or_init(detect_with_override)
  }

  #[cfg(all(not(miri), not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::get_or_init(detect_with_override)
  }

  #[cfg(all(not(miri), not(feature = "std"), not(target_has_atomic = "64")))]
  {
    detect_uncached()
  }
}

/// Set detection override.
///
/// # Panics
///
/// Panics if detection has already started. Use [`try_set_override`] to
/// handle that case.
#[cold]
pub fn set_override(value: Option<Detected>) {
  if let Err(err) = try_set_override(value) {
    panic!("platform::set_override failed: {err}");
  }
}

/// Try to set detection override.
///
/// Pre-init only: once the first [`get()`] has started detection this returns
/// [`OverrideError::AlreadyInitialized`]. An `Ok` means the override is what
/// every `get()` will report.
#[cold]
pub fn try_set_override(value: Option<Detected>) -> Result<(), OverrideError> {
  #[cfg(feature = "std")]
  {
    let Ok(mut guard) = OVERRIDE.write() else {
      return Err(OverrideError::Unsupported);
    };
    #[cfg(not(miri))]
    if INIT_STARTED.load(core::sync::atomic::Ordering::Acquire) {
      return Err(OverrideError::AlreadyInitialized);
    }
    *guard = value;
    Ok(())
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::try_set_override(value)
  }

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
  {
    let _ = value;
    Err(OverrideError::Unsupported)
  }
}

/// Remove an installed override.
///
/// No-op when no override is set. Once detection has started the override
/// (if any) is already baked into the cache and stays in effect.
#[cold]
pub fn clear_override() {
  if has_override() {
    // `AlreadyInitialized` leaves the cached result untouched, which is all
    // clearing could achieve at that point.
    let _ = try_set_override(None);
  }
}

/// Check if an override is set.
#[inline]
#[must_use]
pub fn has_override() -> bool {
  #[cfg(feature = "std")]
  {
    OVERRIDE.read().map(|g| g.is_some()).unwrap_or(false)
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    atomic_cache::has_override()
  }

  #[cfg(all(not(feature = "std"), not(target_has_atomic = "64")))]
  {
    false
  }
}

#[cold]
#[cfg(not(miri))]
#[allow(dead_code)] // unused on no_std targets without 64-bit atomics
fn detect_with_override() -> Detected {
  #[cfg(feature = "std")]
  {
    if let Ok(guard) = OVERRIDE.read() {
      INIT_STARTED.store(true, core::sync::atomic::Ordering::Release);
      if let Some(det) = *guard {
        return det;
      }
    }
  }

  #[cfg(all(not(feature = "std"), target_has_atomic = "64"))]
  {
    if let Some(det) = atomic_cache::get_override() {
      return det;
    }
  }

  detect_uncached()
}

/// Lock-free cache for `no_std` targets. Detection results and the override
/// are stored as plain atomics; `STATE` orders the publication.
#[cfg(any(all(test, target_has_atomic = "64"), all(not(feature = "std"), target_has_atomic = "64")))]
mod atomic_cache {
  use core::sync::atomic::{AtomicBool, AtomicU8, AtomicU64, Ordering};

  use super::{Detected, OverrideError};
  use crate::caps::{Arch, Caps};

  const UNINIT: u8 = 0;
  const RUNNING: u8 = 1;
  const READY: u8 = 2;

  struct Slot {
    caps: AtomicU64,
    arch: AtomicU8,
  }

  impl Slot {
    const fn new() -> Self {
      Self { caps: AtomicU64::new(0), arch: AtomicU8::new(0) }
    }

    fn store(&self, det: Detected) {
      self.caps.store(det.caps.0, Ordering::Relaxed);
      self.arch.store(det.arch.as_u8(), Ordering::Relaxed);
    }

    fn load(&self) -> Detected {
      Detected { caps: Caps(self.caps.load(Ordering::Relaxed)), arch: Arch::from_u8(self.arch.load(Ordering::Relaxed)) }
    }
  }

  static STATE: AtomicU8 = AtomicU8::new(UNINIT);
  static CACHED: Slot = Slot::new();
  static OVERRIDE: Slot = Slot::new();
  static OVERRIDE_SET: AtomicBool = AtomicBool::new(false);

  pub fn get_or_init(detect: fn() -> Detected) -> Detected {
    match STATE.compare_exchange(UNINIT, RUNNING, Ordering::AcqRel, Ordering::Acquire) {
      Ok(_) => {
        let det = detect();
        CACHED.store(det);
        STATE.store(READY, Ordering::Release);
        det
      }
      Err(_) => {
        while STATE.load(Ordering::Acquire) != READY {
          core::hint::spin_loop();
        }
        CACHED.load()
      }
    }
  }

  pub fn try_set_override(value: Option<Detected>) -> Result<(), OverrideError> {
    if STATE.load(Ordering::Acquire) != UNINIT {
      return Err(OverrideError::AlreadyInitialized);
    }
    if let Some(det) = value {
      OVERRIDE.store(det);
    }
    OVERRIDE_SET.store(value.is_some(), Ordering::Release);
    Ok(())
  }

  pub fn has_override() -> bool {
    OVERRIDE_SET.load(Ordering::Acquire)
  }

  pub fn get_override() -> Option<Detected> {
    if OVERRIDE_SET.load(Ordering::Acquire) { Some(OVERRIDE.load()) } else { None }
  }

}

#[cfg(test)]
mod tests;
