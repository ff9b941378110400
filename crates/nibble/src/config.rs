//! Shuffle kernel runtime configuration.
//!
//! The only knob is a forced backend, read once from `NIBBLE_SHUFFLE_FORCE`
//! (under `std`). Forced modes are always clamped to detected CPU
//! capabilities.

use platform::Caps;

/// Forced backend selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ShuffleForce {
  /// Use the default auto selector.
  #[default]
  Auto,
  /// Force the portable stack-array kernel.
  Portable,
  /// Force the scalar reference kernel.
  Reference,
  /// Force the vector byte-permute kernel (if available).
  Simd,
}

impl ShuffleForce {
  /// Canonical lowercase name, as accepted by [`ShuffleForce::parse`].
  #[must_use]
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::Auto => "auto",
      Self::Portable => "portable",
      Self::Reference => "reference",
      Self::Simd => "simd",
    }
  }

  /// Parse a force mode. Case-insensitive; surrounding whitespace is ignored.
  #[must_use]
  pub fn parse(value: &str) -> Option<Self> {
    let value = value.trim();
    if value.eq_ignore_ascii_case("auto") {
      return Some(Self::Auto);
    }
    if value.eq_ignore_ascii_case("portable") || value.eq_ignore_ascii_case("scalar") {
      return Some(Self::Portable);
    }
    if value.eq_ignore_ascii_case("reference") || value.eq_ignore_ascii_case("oracle") {
      return Some(Self::Reference);
    }
    if value.eq_ignore_ascii_case("simd")
      || value.eq_ignore_ascii_case("vector")
      || value.eq_ignore_ascii_case("ssse3")
      || value.eq_ignore_ascii_case("neon")
      || value.eq_ignore_ascii_case("simd128")
    {
      return Some(Self::Simd);
    }
    None
  }
}

/// Effective configuration (after applying overrides).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShuffleConfig {
  /// Requested force mode (env).
  pub requested_force: ShuffleForce,
  /// Force mode clamped to detected CPU capabilities.
  pub effective_force: ShuffleForce,
}

#[cfg(feature = "std")]
fn requested_force() -> ShuffleForce {
  use std::sync::OnceLock;
  static FORCE: OnceLock<ShuffleForce> = OnceLock::new();
  *FORCE.get_or_init(|| {
    std::env::var("NIBBLE_SHUFFLE_FORCE").ok().and_then(|v| ShuffleForce::parse(&v)).unwrap_or_default()
  })
}

#[cfg(not(feature = "std"))]
fn requested_force() -> ShuffleForce {
  ShuffleForce::Auto
}

#[inline]
#[must_use]
pub(crate) fn clamp_force_to_caps(requested: ShuffleForce, caps: Caps) -> ShuffleForce {
  match requested {
    ShuffleForce::Simd if !crate::dispatch::simd_available(caps) => ShuffleForce::Auto,
    other => other,
  }
}

/// Get the effective shuffle configuration for the current platform.
#[inline]
#[must_use]
pub fn get() -> ShuffleConfig {
  let requested_force = requested_force();
  ShuffleConfig { requested_force, effective_force: clamp_force_to_caps(requested_force, platform::caps()) }
}
