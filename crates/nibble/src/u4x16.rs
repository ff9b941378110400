//! [`U4x16`]: sixteen packed 4-bit lanes in a `u64`.
//!
//! Lane `i` occupies bits `4*i .. 4*i+4`; lane 0 is the least significant
//! nibble.

use core::{fmt, str::FromStr};

use crate::error::{NibbleRangeError, ParseU4x16Error};

/// Sixteen 4-bit lanes packed little-endian into a `u64`.
///
/// Every `u64` is a valid `U4x16`, so construction from bits is infallible.
///
/// ```
/// use nibble::U4x16;
///
/// let src: U4x16 = "0x9E3779B97F4A7C15".parse()?;
/// let rev = U4x16::new(0x0123_4567_89AB_CDEF);
/// assert_eq!(src.shuffle(rev).to_bits(), 0x51C7_A4F7_9B97_73E9);
/// # Ok::<(), nibble::ParseU4x16Error>(())
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
pub struct U4x16(u64);

impl U4x16 {
  /// Number of lanes.
  pub const LANES: usize = 16;
  /// All lanes zero.
  pub const ZERO: Self = Self(0);
  /// Lane `i` holds `i`; shuffling by this index returns the source.
  pub const IDENTITY: Self = Self(0xFEDC_BA98_7654_3210);

  #[inline]
  #[must_use]
  pub const fn new(bits: u64) -> Self {
    Self(bits)
  }

  #[inline]
  #[must_use]
  pub const fn to_bits(self) -> u64 {
    self.0
  }

  /// Every lane set to `value & 0xF`.
  #[inline]
  #[must_use]
  pub const fn splat(value: u8) -> Self {
    Self((value & 0x0F) as u64 * 0x1111_1111_1111_1111)
  }

  /// Value of lane `index % 16`.
  #[inline]
  #[must_use]
  pub const fn lane(self, index: usize) -> u8 {
    ((self.0 >> ((index & 0x0F) * 4)) & 0x0F) as u8
  }

  /// Copy with lane `index % 16` replaced by `value & 0xF`.
  #[inline]
  #[must_use]
  pub const fn with_lane(self, index: usize, value: u8) -> Self {
    let shift = (index & 0x0F) * 4;
    Self((self.0 & !(0x0Fu64 << shift)) | (((value & 0x0F) as u64) << shift))
  }

  /// Build from one value per lane, lane 0 first.
  ///
  /// # Errors
  ///
  /// Returns [`NibbleRangeError`] for the first lane whose value exceeds 15.
  pub fn from_lanes(lanes: [u8; 16]) -> Result<Self, NibbleRangeError> {
    let mut out = Self::ZERO;
    for (lane, value) in lanes.into_iter().enumerate() {
      if value > 0x0F {
        return Err(NibbleRangeError { lane, value });
      }
      out = out.with_lane(lane, value);
    }
    Ok(out)
  }

  /// One value per lane, lane 0 first.
  #[inline]
  #[must_use]
  pub fn to_lanes(self) -> [u8; 16] {
    crate::portable::widen(self.0)
  }

  /// `out[i] = self[idx[i]]`, using the selected kernel.
  #[inline]
  #[must_use]
  pub fn shuffle(self, idx: Self) -> Self {
    Self(crate::permute_simd(self.0, idx.0))
  }

  /// `out[i] = self[idx[i]]`, using the scalar reference kernel.
  #[inline]
  #[must_use]
  pub const fn shuffle_reference(self, idx: Self) -> Self {
    Self(crate::reference::shuffle_reference(self.0, idx.0))
  }

  /// Whether every value 0..16 appears in exactly one lane.
  #[must_use]
  pub const fn is_permutation(self) -> bool {
    let mut seen = 0u16;
    let mut i = 0;
    while i < Self::LANES {
      seen |= 1u16 << self.lane(i);
      i += 1;
    }
    seen == u16::MAX
  }

  /// Index vector that undoes a shuffle by `self`.
  ///
  /// For a permutation `p`, `x.shuffle(p).shuffle(p.inverse()) == x`.
  /// Returns `None` if `self` is not a permutation.
  #[must_use]
  pub const fn inverse(self) -> Option<Self> {
    if !self.is_permutation() {
      return None;
    }
    let mut inv = Self::ZERO;
    let mut i = 0;
    while i < Self::LANES {
      inv = inv.with_lane(self.lane(i) as usize, i as u8);
      i += 1;
    }
    Some(inv)
  }
}

impl From<u64> for U4x16 {
  #[inline]
  fn from(bits: u64) -> Self {
    Self(bits)
  }
}

impl From<U4x16> for u64 {
  #[inline]
  fn from(v: U4x16) -> Self {
    v.0
  }
}

// ─────────────────────────────────────────────────────────────────────────────
// Formatting
// ─────────────────────────────────────────────────────────────────────────────

impl fmt::Debug for U4x16 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("U4x16")?;
    f.debug_list().entries(self.to_lanes()).finish()
  }
}

/// `0x` followed by 16 uppercase hex digits, lane 15 first.
impl fmt::Display for U4x16 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "0x{:016X}", self.0)
  }
}

impl fmt::LowerHex for U4x16 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::LowerHex::fmt(&self.0, f)
  }
}

impl fmt::UpperHex for U4x16 {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::UpperHex::fmt(&self.0, f)
  }
}

/// Parses up to 16 hex digits, most significant lane first. A leading `0x`
/// or `0X` is optional and `_` separators are skipped.
impl FromStr for U4x16 {
  type Err = ParseU4x16Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    let (offset, body) = match s.get(..2) {
      Some("0x" | "0X") => (2, s.get(2..).unwrap_or_default()),
      _ => (0, s),
    };

    let mut bits = 0u64;
    let mut digits = 0usize;
    for (i, byte) in body.bytes().enumerate() {
      if byte == b'_' {
        continue;
      }
      let digit = char::from(byte)
        .to_digit(16)
        .ok_or(ParseU4x16Error::InvalidDigit { index: offset + i, byte })?;
      digits += 1;
      if digits > Self::LANES {
        return Err(ParseU4x16Error::TooLong);
      }
      bits = (bits << 4) | u64::from(digit);
    }

    if digits == 0 {
      return Err(ParseU4x16Error::Empty);
    }
    Ok(Self(bits))
  }
}
