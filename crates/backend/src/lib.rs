//! Backend crate: kernel selection and cached dispatch for u4x16.
//!
//! - **Selection**: an ordered candidate list, first match against detected
//!   [`Caps`](platform::Caps) wins.
//! - **Caching**: [`define_dispatcher!`] declares a per-signature dispatcher
//!   that selects once and then costs a single indirect call.
//! - **Tiers**: [`KernelTier`] classifies kernels for introspection.
//!
//! # Usage
//!
//! ```ignore
//! use backend::dispatch::{Selected, select};
//! use platform::caps::{Caps, x86};
//!
//! fn select_shuffle() -> Selected<fn(u64, u64) -> u64> {
//!   select(platform::caps(), backend::candidates![
//!     "x86_64/ssse3" => x86::SHUFFLE_READY => ssse3_kernel,
//!     "portable"     => Caps::NONE         => portable_kernel,
//!   ])
//! }
//! ```

#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![cfg_attr(not(test), deny(clippy::expect_used))]
#![cfg_attr(not(test), deny(clippy::indexing_slicing))]
#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod dispatch;
pub mod tier;

pub use dispatch::{Candidate, Selected, select};
// Re-exported so `define_dispatcher!` expansions resolve without the caller
// depending on `platform` directly.
pub use platform;
pub use tier::KernelTier;
