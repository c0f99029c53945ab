use std::{
  cmp::Ordering,
  fmt::{self, Debug},
};

use crate::error::NumError;

mod arith;
mod bits;
mod bytes;
mod radix;

/// An arbitrary-precision natural number.
///
/// The value is stored as little-endian `u32` words. The buffer never ends in
/// a zero word, so zero is the empty buffer and every value has exactly one
/// representation; `Eq` and `Hash` can therefore be derived.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Nat(Vec<u32>);

impl Nat {
  pub const ZERO: Nat = Nat(Vec::new());

  pub fn new(mut words: Vec<u32>) -> Self {
    while words.last().is_some_and(|x| *x == 0) {
      words.pop();
    }
    Self(words)
  }

  pub fn one() -> Self {
    Nat(vec![1])
  }

  pub(crate) fn trim(&mut self) {
    while self.0.last().is_some_and(|x| *x == 0) {
      self.0.pop();
    }
  }

  pub fn words(&self) -> &[u32] {
    &self.0
  }

  pub fn into_words(self) -> Vec<u32> {
    self.0
  }

  pub fn is_zero(&self) -> bool {
    self.0.is_empty()
  }

  pub fn is_even(&self) -> bool {
    self.0.first().is_none_or(|x| x & 1 == 0)
  }

  /// The number of significant bits; zero has none.
  pub fn bits(&self) -> usize {
    match self.0.last() {
      None => 0,
      Some(top) => 32 * (self.0.len() - 1) + (32 - top.leading_zeros() as usize),
    }
  }

  /// The number of set bits.
  pub fn bits_set(&self) -> usize {
    self.0.iter().map(|x| x.count_ones() as usize).sum()
  }

  /// The minimal number of bytes needed to hold the value.
  pub fn bytes(&self) -> usize {
    match self.0.last() {
      None => 0,
      Some(top) => 4 * (self.0.len() - 1) + (32 - top.leading_zeros() as usize).div_ceil(8),
    }
  }

  /// Word count decides first; equal lengths compare from the top word down.
  pub fn compare(&self, other: &Nat) -> Ordering {
    self.0.len().cmp(&other.0.len()).then_with(|| self.0.iter().rev().cmp(other.0.iter().rev()))
  }

  pub fn as_u32(&self) -> Option<u32> {
    match self.0[..] {
      [] => Some(0),
      [n] => Some(n),
      _ => None,
    }
  }

  pub fn as_u64(&self) -> Option<u64> {
    match self.0[..] {
      [] => Some(0),
      [n] => Some(n as u64),
      [n, m] => Some(n as u64 | (m as u64) << 32),
      _ => None,
    }
  }

  pub fn as_u128(&self) -> Option<u128> {
    if self.0.len() > 4 {
      return None;
    }
    Some(self.0.iter().rev().fold(0, |acc, &x| acc << 32 | x as u128))
  }

  /// Truncates `value` toward zero.
  ///
  /// The integer part is rebuilt from the float's mantissa and exponent, so
  /// large floats convert exactly.
  pub fn from_f64(value: f64) -> Result<Nat, NumError> {
    if !value.is_finite() {
      return Err(NumError::NotFinite);
    }
    let value = value.trunc();
    if value < 0.0 {
      return Err(NumError::Negative);
    }
    if value == 0.0 {
      return Ok(Nat::ZERO);
    }
    // a nonzero integral float is normal, so the implicit bit is present
    let bits = value.to_bits();
    let exponent = ((bits >> 52) & 0x7ff) as i64 - 1075;
    let mantissa = Nat::from(bits & ((1 << 52) - 1) | 1 << 52);
    Ok(if exponent >= 0 { mantissa << exponent as usize } else { mantissa >> -exponent as usize })
  }

  /// Approximates the value as a float, saturating to infinity.
  pub fn to_f64(&self) -> f64 {
    self.0.iter().rev().fold(0.0, |acc, &x| acc * 4294967296.0 + x as f64)
  }
}

impl Ord for Nat {
  fn cmp(&self, other: &Self) -> Ordering {
    self.compare(other)
  }
}

impl PartialOrd for Nat {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Debug for Nat {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    fmt::Display::fmt(self, f)
  }
}

macro_rules! from_unsigned {
  ($($ty:ty),*) => {$(
    impl From<$ty> for Nat {
      fn from(n: $ty) -> Nat {
        let n = n as u128;
        Nat::new((0..4).map(|i| (n >> (32 * i)) as u32).collect())
      }
    }
  )*};
}

from_unsigned!(u8, u16, u32, u64, u128, usize);

macro_rules! try_into_unsigned {
  ($($ty:ty => $as:ident),*) => {$(
    impl TryFrom<&Nat> for $ty {
      type Error = NumError;

      fn try_from(n: &Nat) -> Result<$ty, NumError> {
        n.$as().ok_or(NumError::Overflow)
      }
    }
  )*};
}

try_into_unsigned!(u32 => as_u32, u64 => as_u64, u128 => as_u128);

impl TryFrom<&Nat> for usize {
  type Error = NumError;

  fn try_from(n: &Nat) -> Result<usize, NumError> {
    n.as_u64().and_then(|x| usize::try_from(x).ok()).ok_or(NumError::Overflow)
  }
}
