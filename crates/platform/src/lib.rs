//! CPU detection and capabilities for the u4x16 workspace.
//!
//! This crate is the single source of truth for CPU feature detection.
//! Kernel crates query [`caps()`] instead of doing ad-hoc detection.
//!
//! # Core Types
//!
//! - [`Caps`]: What instructions can run on this machine
//! - [`Detected`]: Capabilities plus the architecture they were detected on
//!
//! # Example
//!
//! ```
//! use platform::caps::x86;
//!
//! if platform::caps().has(x86::SHUFFLE_READY) {
//!   // SSSE3 `pshufb` kernel
//! }
//! ```
//!
//! # Design
//!
//! 1. **One API**: Kernels query `platform::get()`.
//! 2. **Zero-cost when possible**: Compile-time features are detected via `cfg!`.
//! 3. **Cached otherwise**: Runtime detection is cached in `OnceLock` (std) or atomics (no_std).
//! 4. **Miri-safe**: Under Miri, always returns portable-only caps.

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod caps;
pub mod detect;

pub use caps::{Arch, Caps};
pub use detect::{
  Detected, OverrideError, caps_static, clear_override, detect_uncached, get, has_override, set_override,
  try_set_override,
};

/// Get just the CPU capabilities.
#[inline]
#[must_use]
pub fn caps() -> Caps {
  detect::get().caps
}

/// Get just the detected architecture.
#[inline]
#[must_use]
pub fn arch() -> Arch {
  detect::get().arch
}
