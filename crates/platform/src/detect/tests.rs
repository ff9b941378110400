use super::*;

#[test]
#[cfg(not(miri))]
fn test_get_returns_valid() {
  let det = get();

  #[cfg(target_arch = "x86_64")]
  assert_eq!(det.arch, Arch::X86_64);
  #[cfg(target_arch = "aarch64")]
  assert_eq!(det.arch, Arch::Aarch64);

  assert_eq!(det, get(), "cached detection must be stable");
}

#[test]
#[cfg(not(miri))] // CPUID
fn test_detect_uncached_consistent() {
  let d1 = detect_uncached();
  let d2 = detect_uncached();
  assert_eq!(d1, d2);
}

#[test]
#[cfg(not(miri))]
fn test_runtime_is_superset_of_static() {
  assert!(detect_uncached().caps.has(caps_static()));
}

#[test]
#[cfg(all(target_arch = "x86_64", not(miri)))]
fn test_x86_64_baseline() {
  use crate::caps::x86;
  assert!(get().caps.has(x86::SSE2));
}

#[test]
#[cfg(all(target_arch = "aarch64", not(miri)))]
fn test_aarch64_baseline() {
  use crate::caps::aarch64;
  assert!(get().caps.has(aarch64::SHUFFLE_READY));
}

#[test]
#[cfg(miri)]
fn test_miri_returns_portable() {
  assert_eq!(get().caps, Caps::NONE);
}

#[test]
fn test_caps_static_is_const() {
  const STATIC_CAPS: Caps = caps_static();
  let _ = STATIC_CAPS;
}

#[test]
#[cfg(target_arch = "x86_64")]
fn test_caps_static_x86_64_baseline() {
  use crate::caps::x86;
  assert!(caps_static().has(x86::SSE2));
}

#[test]
#[cfg(all(target_arch = "x86_64", target_feature = "ssse3"))]
fn test_caps_static_ssse3_when_enabled() {
  use crate::caps::x86;
  assert!(caps_static().has(x86::SHUFFLE_READY));
}

#[test]
fn test_detected_portable() {
  let det = Detected::portable();
  assert!(det.caps.is_empty());
  assert_eq!(det.arch, Arch::current());
}

#[test]
#[cfg(all(feature = "std", not(miri)))]
fn test_override_rejected_after_init() {
  let _ = get();
  assert_eq!(try_set_override(Some(Detected::portable())), Err(OverrideError::AlreadyInitialized));
  assert!(!has_override());
}

#[test]
fn test_clear_override_after_init_is_noop() {
  let before = get();
  clear_override();
  clear_override();
  assert!(!has_override());
  assert_eq!(get(), before);
}

#[test]
fn test_override_error_display() {
  extern crate alloc;
  use alloc::string::ToString;

  assert_eq!(OverrideError::AlreadyInitialized.to_string(), "detection already initialized");
  assert!(!OverrideError::Unsupported.to_string().is_empty());
}
