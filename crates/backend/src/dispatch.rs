//! Kernel dispatch: selection and caching.
//!
//! - [`Candidate`]: A kernel with capability requirements
//! - [`Selected`]: The result of kernel selection
//! - [`select`]: Choose the best kernel from a candidate list
//! - [`define_dispatcher!`](crate::define_dispatcher): Cached per-signature dispatcher
//!
//! # Design
//!
//! Two paths:
//!
//! 1. **Compile-time selection** (zero-cost): When the target feature is known at compile time, the
//!    kernel crate resolves dispatch to a direct call with `cfg!` guards.
//!
//! 2. **Runtime selection** (cached): For generic binaries, the dispatcher detects CPU features
//!    once and caches the selected kernel. Later calls are a single indirect call.

use platform::Caps;

// ─────────────────────────────────────────────────────────────────────────────
// Core Types
// ─────────────────────────────────────────────────────────────────────────────

/// A candidate kernel with capability requirements.
///
/// Candidates are ordered from best to worst. The dispatcher selects the
/// first candidate whose requirements are satisfied by the detected capabilities.
#[derive(Clone, Copy, Debug)]
pub struct Candidate<F> {
  /// Human-readable name for diagnostics (e.g., "x86_64/ssse3").
  pub name: &'static str,
  /// Required CPU capabilities. Must be a subset of detected caps.
  pub requires: Caps,
  /// The kernel function pointer.
  pub func: F,
}

impl<F> Candidate<F> {
  /// Create a new candidate.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, requires: Caps, func: F) -> Self {
    Self { name, requires, func }
  }
}

/// The result of kernel selection.
#[derive(Clone, Copy, Debug)]
pub struct Selected<F> {
  /// Human-readable name of the selected kernel.
  pub name: &'static str,
  /// The selected kernel function.
  pub func: F,
}

impl<F> Selected<F> {
  /// Create a new selected result.
  #[inline]
  #[must_use]
  pub const fn new(name: &'static str, func: F) -> Self {
    Self { name, func }
  }
}

/// Select the best kernel from a candidate list.
///
/// Returns the first candidate whose `requires` is satisfied by `caps`.
///
/// # Panics
///
/// Panics if no candidate matches. The last candidate must have
/// `requires = Caps::NONE` so that this cannot happen.
#[inline]
#[must_use]
pub fn select<F: Copy>(caps: Caps, candidates: &[Candidate<F>]) -> Selected<F> {
  for candidate in candidates {
    if caps.has(candidate.requires) {
      return Selected::new(candidate.name, candidate.func);
    }
  }

  panic!("no matching kernel: candidate list must end with a Caps::NONE fallback");
}

/// Build a candidate slice: `name => requires => func`, best first.
///
/// ```
/// use backend::{candidates, select};
/// use platform::Caps;
///
/// fn portable(a: u64, b: u64) -> u64 {
///   a ^ b
/// }
///
/// let picked = select::<fn(u64, u64) -> u64>(Caps::NONE, candidates![
///   "portable" => Caps::NONE => portable,
/// ]);
/// assert_eq!(picked.name, "portable");
/// ```
#[macro_export]
macro_rules! candidates {
  ($($name:expr => $requires:expr => $func:expr),+ $(,)?) => {
    &[$($crate::dispatch::Candidate::new($name, $requires, $func)),+]
  };
}

// ─────────────────────────────────────────────────────────────────────────────
// Cached Dispatchers
// ─────────────────────────────────────────────────────────────────────────────

/// Declare a cached dispatcher for one concrete kernel signature.
///
/// Each kernel family gets its own dispatcher type so that unrelated kernel
/// signatures can never be mixed. The selector runs once on first access;
/// under `std` the result lives in a `OnceLock`, otherwise in atomics.
///
/// The `std` feature check happens in the *calling* crate, so the caller must
/// declare a `std` feature of its own.
///
/// ```ignore
/// backend::define_dispatcher!(
///   /// Dispatcher for nibble shuffle kernels.
///   pub ShuffleDispatcher, ShuffleFn, (src: u64, idx: u64) -> u64
/// );
///
/// static DISPATCHER: ShuffleDispatcher = ShuffleDispatcher::new(select_shuffle);
/// let dst = DISPATCHER.call(src, idx);
/// ```
#[macro_export]
macro_rules! define_dispatcher {
  (
    $(#[$meta:meta])*
    $vis:vis $name:ident, $fn_ty:ty, ($($arg:ident : $arg_ty:ty),* $(,)?) -> $ret:ty
  ) => {
    $(#[$meta])*
    $vis struct $name {
      #[cfg(feature = "std")]
      inner: ::std::sync::OnceLock<$crate::dispatch::Selected<$fn_ty>>,

      #[cfg(not(feature = "std"))]
      func: ::core::sync::atomic::AtomicPtr<()>,
      #[cfg(not(feature = "std"))]
      name_ptr: ::core::sync::atomic::AtomicPtr<u8>,
      #[cfg(not(feature = "std"))]
      name_len: ::core::sync::atomic::AtomicUsize,

      selector: fn() -> $crate::dispatch::Selected<$fn_ty>,
    }

    impl $name {
      /// Create a new dispatcher. The selector runs once, on first access.
      #[must_use]
      pub const fn new(selector: fn() -> $crate::dispatch::Selected<$fn_ty>) -> Self {
        Self {
          #[cfg(feature = "std")]
          inner: ::std::sync::OnceLock::new(),

          #[cfg(not(feature = "std"))]
          func: ::core::sync::atomic::AtomicPtr::new(::core::ptr::null_mut()),
          #[cfg(not(feature = "std"))]
          name_ptr: ::core::sync::atomic::AtomicPtr::new(::core::ptr::null_mut()),
          #[cfg(not(feature = "std"))]
          name_len: ::core::sync::atomic::AtomicUsize::new(0),

          selector,
        }
      }

      /// Get the selected kernel, initializing on first call.
      #[inline]
      #[must_use]
      pub fn get(&self) -> $crate::dispatch::Selected<$fn_ty> {
        #[cfg(feature = "std")]
        {
          *self.inner.get_or_init(|| (self.selector)())
        }

        #[cfg(not(feature = "std"))]
        {
          use ::core::sync::atomic::Ordering;

          let func_ptr = self.func.load(Ordering::Acquire);
          if func_ptr.is_null() {
            // Racing initializers all run the (pure) selector and store the same result.
            let selected = (self.selector)();
            self.name_ptr.store(selected.name.as_ptr().cast_mut(), Ordering::Release);
            self.name_len.store(selected.name.len(), Ordering::Release);
            self.func.store(selected.func as *mut (), Ordering::Release);
            selected
          } else {
            // SAFETY: `func_ptr` was stored from a valid `$fn_ty` above.
            #[allow(unsafe_code)]
            let func: $fn_ty = unsafe { ::core::mem::transmute::<*mut (), $fn_ty>(func_ptr) };

            let name_ptr = self.name_ptr.load(Ordering::Acquire);
            let name_len = self.name_len.load(Ordering::Acquire);
            let name = if name_ptr.is_null() {
              "unknown"
            } else {
              // SAFETY: `name_ptr`/`name_len` were stored from a `&'static str`
              // before `func` was published with Release ordering.
              #[allow(unsafe_code)]
              unsafe {
                ::core::str::from_utf8_unchecked(::core::slice::from_raw_parts(name_ptr, name_len))
              }
            };
            $crate::dispatch::Selected::new(name, func)
          }
        }
      }

      /// Name of the selected backend.
      #[inline]
      #[must_use]
      pub fn backend_name(&self) -> &'static str {
        self.get().name
      }

      /// Call the selected kernel.
      #[inline]
      #[must_use]
      pub fn call(&self, $($arg: $arg_ty),*) -> $ret {
        (self.get().func)($($arg),*)
      }
    }

    impl ::core::fmt::Debug for $name {
      fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        f.debug_struct(stringify!($name)).finish_non_exhaustive()
      }
    }
  };
}

#[cfg(test)]
mod tests {
  use platform::caps::{aarch64, x86};

  use super::*;

  fn fast(a: u64, b: u64) -> u64 {
    a.wrapping_add(b)
  }

  fn slow(a: u64, b: u64) -> u64 {
    a.wrapping_add(b)
  }

  type PairFn = fn(u64, u64) -> u64;

  #[test]
  fn select_prefers_first_match() {
    let list: &[Candidate<PairFn>] = crate::candidates![
      "fast" => x86::SHUFFLE_READY => fast,
      "slow" => Caps::NONE => slow,
    ];

    assert_eq!(select(x86::SHUFFLE_READY, list).name, "fast");
    assert_eq!(select(x86::SHUFFLE_READY | aarch64::NEON, list).name, "fast");
    assert_eq!(select(x86::SSE2, list).name, "slow");
    assert_eq!(select(aarch64::NEON, list).name, "slow");
    assert_eq!(select(Caps::NONE, list).name, "slow");
  }

  #[test]
  fn selected_func_is_callable() {
    let list: &[Candidate<PairFn>] = crate::candidates!["slow" => Caps::NONE => slow];
    let picked = select(Caps::from_raw(u64::MAX), list);
    assert_eq!((picked.func)(2, 3), 5);
  }

  #[test]
  #[should_panic(expected = "no matching kernel")]
  fn select_without_fallback_panics() {
    let list: &[Candidate<PairFn>] = crate::candidates!["fast" => x86::SSSE3 => fast];
    let _ = select(Caps::NONE, list);
  }
}
