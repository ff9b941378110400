extern crate std;

use alloc::string::ToString;

use proptest::prelude::*;

use super::*;

/// A permutation of `0..16`, packed as a `U4x16`.
fn permutation() -> impl Strategy<Value = U4x16> {
  Just((0u8..16).collect::<alloc::vec::Vec<u8>>()).prop_shuffle().prop_map(|lanes| {
    lanes.into_iter().enumerate().fold(U4x16::ZERO, |acc, (lane, value)| acc.with_lane(lane, value))
  })
}

proptest! {
  #[test]
  fn simd_matches_reference(src in any::<u64>(), idx in any::<u64>()) {
    prop_assert_eq!(permute_simd(src, idx), permute_reference(src, idx));
  }

  #[test]
  fn portable_matches_reference(src in any::<u64>(), idx in any::<u64>()) {
    prop_assert_eq!(portable::shuffle_portable(src, idx), permute_reference(src, idx));
  }

  #[test]
  #[cfg(feature = "alloc")]
  fn all_kernels_agree(src in any::<u64>(), idx in any::<u64>()) {
    prop_assert_eq!(kernel_test::verify_kernels(src, idx), Ok(permute_reference(src, idx)));
  }

  #[test]
  fn identity_index_returns_src(src in any::<u64>()) {
    prop_assert_eq!(permute_simd(src, U4x16::IDENTITY.to_bits()), src);
  }

  #[test]
  fn constant_index_broadcasts(src in any::<u64>(), k in 0u8..16) {
    let expected = U4x16::splat(U4x16::new(src).lane(usize::from(k))).to_bits();
    prop_assert_eq!(permute_simd(src, U4x16::splat(k).to_bits()), expected);
  }

  #[test]
  fn each_lane_reads_its_index(src in any::<u64>(), idx in any::<u64>()) {
    let (src, idx) = (U4x16::new(src), U4x16::new(idx));
    let dst = src.shuffle(idx);
    for i in 0..U4x16::LANES {
      prop_assert_eq!(dst.lane(i), src.lane(usize::from(idx.lane(i))));
    }
  }

  #[test]
  fn lane_change_is_local(src in any::<u64>(), idx in any::<u64>(), lane in 0usize..16, value in 0u8..16) {
    let (src, idx) = (U4x16::new(src), U4x16::new(idx));
    let before = src.shuffle(idx);
    let after = src.shuffle(idx.with_lane(lane, value));
    for i in 0..U4x16::LANES {
      if i == lane {
        prop_assert_eq!(after.lane(i), src.lane(usize::from(value)));
      } else {
        prop_assert_eq!(after.lane(i), before.lane(i));
      }
    }
  }

  #[test]
  fn inverse_round_trip(src in any::<u64>(), perm in permutation()) {
    let src = U4x16::new(src);
    prop_assert!(perm.is_permutation());
    let inv = perm.inverse();
    prop_assert!(inv.is_some());
    if let Some(inv) = inv {
      prop_assert_eq!(src.shuffle(perm).shuffle(inv), src);
      prop_assert_eq!(permute_simd(permute_simd(src.to_bits(), inv.to_bits()), perm.to_bits()), src.to_bits());
    }
  }

  #[test]
  fn display_parse_round_trip(bits in any::<u64>()) {
    let v = U4x16::new(bits);
    prop_assert_eq!(v.to_string().parse::<U4x16>(), Ok(v));
    prop_assert_eq!(std::format!("{v:x}").parse::<U4x16>(), Ok(v));
  }

  #[test]
  fn lanes_round_trip(bits in any::<u64>()) {
    let v = U4x16::new(bits);
    prop_assert_eq!(U4x16::from_lanes(v.to_lanes()), Ok(v));
  }
}
