//! Kernel lookup by name.
//!
//! Exposes kernel function pointers so benchmarks and cross-kernel tests can
//! call a specific kernel without going through the cached dispatcher.

use alloc::vec::Vec;

#[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3"), feature = "std"))]
use platform::caps::x86;

use crate::{dispatch::ShuffleFn, kernels};

/// Shuffle kernel lookup result.
#[derive(Clone, Copy, Debug)]
pub struct ShuffleKernel {
  /// Kernel name.
  pub name: &'static str,
  /// Kernel function pointer.
  pub func: ShuffleFn,
}

/// Look up a kernel that can run on this machine.
///
/// Returns `None` for unknown names and for kernels the CPU (or the build)
/// does not support.
#[must_use]
pub fn get_kernel(name: &str) -> Option<ShuffleKernel> {
  let (name, func): (&'static str, ShuffleFn) = match name {
    kernels::REFERENCE => (kernels::REFERENCE, crate::reference::shuffle_reference),
    kernels::PORTABLE => (kernels::PORTABLE, crate::portable::shuffle_portable),
    #[cfg(all(target_arch = "x86_64", target_feature = "ssse3"))]
    kernels::X86_64_SSSE3 => (kernels::X86_64_SSSE3, crate::x86_64::shuffle_ssse3_enabled),
    #[cfg(all(target_arch = "x86_64", not(target_feature = "ssse3"), feature = "std"))]
    kernels::X86_64_SSSE3 if platform::caps().has(x86::SHUFFLE_READY) => {
      (kernels::X86_64_SSSE3, crate::x86_64::shuffle_ssse3_runtime)
    }
    #[cfg(all(target_arch = "aarch64", target_endian = "little", target_feature = "neon"))]
    kernels::AARCH64_NEON => (kernels::AARCH64_NEON, crate::aarch64::shuffle_neon),
    #[cfg(all(target_arch = "wasm32", target_feature = "simd128"))]
    kernels::WASM32_SIMD128 => (kernels::WASM32_SIMD128, crate::wasm32::shuffle_simd128),
    _ => return None,
  };
  Some(ShuffleKernel { name, func })
}

/// All kernel names runnable on this machine, reference first.
#[must_use]
pub fn available_kernels() -> Vec<&'static str> {
  kernels::ALL.iter().copied().filter(|name| get_kernel(name).is_some()).collect()
}
