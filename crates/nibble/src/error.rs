//! Error types for building and parsing [`U4x16`](crate::U4x16) values.

use core::fmt;

/// A lane value does not fit in four bits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NibbleRangeError {
  /// Lane position (0..16).
  pub lane: usize,
  /// The offending value (always > 15).
  pub value: u8,
}

impl fmt::Display for NibbleRangeError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "lane {} value {} does not fit in 4 bits", self.lane, self.value)
  }
}

impl core::error::Error for NibbleRangeError {}

/// Failure to parse a hexadecimal [`U4x16`](crate::U4x16).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseU4x16Error {
  /// No hex digits after the optional `0x` prefix.
  Empty,
  /// More than 16 hex digits.
  TooLong,
  /// A byte that is neither a hex digit nor `_`.
  InvalidDigit {
    /// Byte offset in the input string.
    index: usize,
    /// The rejected byte.
    byte: u8,
  },
}

impl fmt::Display for ParseU4x16Error {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::Empty => f.write_str("no hex digits"),
      Self::TooLong => f.write_str("more than 16 hex digits"),
      Self::InvalidDigit { index, byte } => write!(f, "invalid hex digit {:?} at offset {index}", char::from(*byte)),
    }
  }
}

impl core::error::Error for ParseU4x16Error {}
