//! Differential fuzzing of the dispatched shuffle against the reference.
//!
//! Tests that:
//! - `permute_simd` matches `permute_reference`
//! - every output lane is the source lane its index names
//! - permuting by a permutation and then by its inverse restores the source

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use nibble::{U4x16, permute_reference, permute_simd};

#[derive(Arbitrary, Debug)]
struct Input {
  src: u64,
  idx: u64,
  /// Swaps applied to the identity to build a permutation.
  swaps: Vec<(u8, u8)>,
}

fuzz_target!(|input: Input| {
  let ours = permute_simd(input.src, input.idx);
  let reference = permute_reference(input.src, input.idx);
  assert_eq!(
    ours, reference,
    "shuffle mismatch: src={:#018x} idx={:#018x} ours={ours:#018x} reference={reference:#018x}",
    input.src, input.idx
  );

  let (src, idx, dst) = (U4x16::new(input.src), U4x16::new(input.idx), U4x16::new(ours));
  for i in 0..U4x16::LANES {
    assert_eq!(dst.lane(i), src.lane(usize::from(idx.lane(i))), "lane {i}");
  }

  let mut perm = U4x16::IDENTITY;
  for &(a, b) in &input.swaps {
    let (a, b) = (usize::from(a % 16), usize::from(b % 16));
    let (va, vb) = (perm.lane(a), perm.lane(b));
    perm = perm.with_lane(a, vb).with_lane(b, va);
  }
  let inv = perm.inverse().expect("swaps of the identity form a permutation");
  assert_eq!(src.shuffle(perm).shuffle(inv), src, "round trip through {perm:?}");
});
