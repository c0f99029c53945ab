use std::{
  cmp::Ordering,
  fmt::{self, Binary, Debug, Display, LowerHex, Octal, UpperHex},
  iter::{Product, Sum},
  ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign},
  str::FromStr,
};

use crate::{
  error::NumError,
  nat::Nat,
  ops::{forward_binop, forward_fold},
};

/// An arbitrary-precision integer in sign-and-magnitude form.
///
/// Zero is never negative.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Int {
  magnitude: Nat,
  negative: bool,
}

impl Int {
  pub const ZERO: Int = Int { magnitude: Nat::ZERO, negative: false };

  pub fn from_parts(magnitude: Nat, negative: bool) -> Int {
    let negative = negative && !magnitude.is_zero();
    Int { magnitude, negative }
  }

  pub fn into_parts(self) -> (Nat, bool) {
    (self.magnitude, self.negative)
  }

  pub fn magnitude(&self) -> &Nat {
    &self.magnitude
  }

  pub fn is_negative(&self) -> bool {
    self.negative
  }

  pub fn is_zero(&self) -> bool {
    self.magnitude.is_zero()
  }

  pub fn signum(&self) -> i32 {
    if self.negative {
      -1
    } else if self.magnitude.is_zero() {
      0
    } else {
      1
    }
  }

  pub fn abs(&self) -> Int {
    Int { magnitude: self.magnitude.clone(), negative: false }
  }

  fn normalize(&mut self) {
    if self.magnitude.is_zero() {
      self.negative = false;
    }
  }

  /// Adds `magnitude` carrying the sign `negative`.
  fn add_signed(&mut self, magnitude: &Nat, negative: bool) {
    if self.negative == negative {
      self.magnitude += magnitude;
    } else if self.magnitude >= *magnitude {
      self.magnitude.sub_nat(magnitude);
    } else {
      let mut out = magnitude.clone();
      out.sub_nat(&self.magnitude);
      self.magnitude = out;
      self.negative = negative;
    }
    self.normalize();
  }

  /// Floored division: the quotient rounds toward negative infinity and the
  /// remainder takes the sign of the divisor.
  pub fn checked_div_rem(&self, divisor: &Int) -> Result<(Int, Int), NumError> {
    let (mut quotient, mut remainder) = self.magnitude.checked_div_rem(&divisor.magnitude)?;
    let negative = self.negative != divisor.negative;
    if negative && !remainder.is_zero() {
      quotient.add_u32(1);
      let mut flipped = divisor.magnitude.clone();
      flipped.sub_nat(&remainder);
      remainder = flipped;
    }
    Ok((Int::from_parts(quotient, negative), Int::from_parts(remainder, divisor.negative)))
  }

  /// Panics if `divisor` is zero.
  pub fn div_rem(&self, divisor: &Int) -> (Int, Int) {
    match self.checked_div_rem(divisor) {
      Ok(out) => out,
      Err(err) => panic!("{err}"),
    }
  }

  pub fn pow(&self, exponent: &Int) -> Result<Int, NumError> {
    if exponent.negative {
      return Err(NumError::NegativeExponent);
    }
    let negative = self.negative && !exponent.magnitude.is_even();
    Ok(Int::from_parts(self.magnitude.pow(&exponent.magnitude), negative))
  }

  pub fn pow_u32(&self, exponent: u32) -> Int {
    Int::from_parts(self.magnitude.pow_u32(exponent), self.negative && exponent % 2 == 1)
  }

  pub fn from_f64(value: f64) -> Result<Int, NumError> {
    Ok(Int::from_parts(Nat::from_f64(value.abs())?, value < 0.0))
  }

  pub fn to_f64(&self) -> f64 {
    let magnitude = self.magnitude.to_f64();
    if self.negative {
      -magnitude
    } else {
      magnitude
    }
  }

  /// Parses an optionally signed number using the [`Nat::parse`] rules.
  pub fn parse(text: &str, base: u32) -> Result<(Int, usize), NumError> {
    Self::parse_signed(text, |text| Nat::parse(text, base))
  }

  /// Parses an optionally signed number using the [`Nat::parse_radix`]
  /// rules.
  pub fn parse_radix(text: &str, radix: u32) -> Result<(Int, usize), NumError> {
    Self::parse_signed(text, |text| Nat::parse_radix(text, radix))
  }

  fn parse_signed(
    text: &str,
    parse: impl FnOnce(&str) -> Result<(Nat, usize), NumError>,
  ) -> Result<(Int, usize), NumError> {
    let (negative, digits) = match text.as_bytes() {
      [b'-', ..] => (true, &text[1..]),
      [b'+', ..] => (false, &text[1..]),
      _ => (false, text),
    };
    match parse(digits)? {
      (_, 0) => Ok((Int::ZERO, 0)),
      (magnitude, consumed) => {
        Ok((Int::from_parts(magnitude, negative), consumed + text.len() - digits.len()))
      }
    }
  }

  /// Formats the value in `radix`; the sign does not count toward
  /// `min_digits`.
  pub fn to_str_radix(&self, radix: u32, min_digits: usize) -> Result<String, NumError> {
    let digits = self.magnitude.to_str_radix(radix, min_digits)?;
    Ok(if self.negative { format!("-{digits}") } else { digits })
  }
}

impl Ord for Int {
  fn cmp(&self, other: &Self) -> Ordering {
    match (self.negative, other.negative) {
      (false, false) => self.magnitude.cmp(&other.magnitude),
      (true, true) => other.magnitude.cmp(&self.magnitude),
      (true, false) => Ordering::Less,
      (false, true) => Ordering::Greater,
    }
  }
}

impl PartialOrd for Int {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl Neg for Int {
  type Output = Int;

  fn neg(mut self) -> Int {
    self.negative = !self.negative;
    self.normalize();
    self
  }
}

impl Neg for &Int {
  type Output = Int;

  fn neg(self) -> Int {
    -self.clone()
  }
}

impl AddAssign<&Int> for Int {
  fn add_assign(&mut self, rhs: &Int) {
    self.add_signed(&rhs.magnitude, rhs.negative);
  }
}

impl SubAssign<&Int> for Int {
  fn sub_assign(&mut self, rhs: &Int) {
    self.add_signed(&rhs.magnitude, !rhs.negative);
  }
}

impl MulAssign<&Int> for Int {
  fn mul_assign(&mut self, rhs: &Int) {
    self.magnitude *= &rhs.magnitude;
    self.negative ^= rhs.negative;
    self.normalize();
  }
}

impl DivAssign<&Int> for Int {
  fn div_assign(&mut self, rhs: &Int) {
    *self = self.div_rem(rhs).0;
  }
}

impl RemAssign<&Int> for Int {
  fn rem_assign(&mut self, rhs: &Int) {
    *self = self.div_rem(rhs).1;
  }
}

forward_binop!(Int, Add::add, AddAssign::add_assign);
forward_binop!(Int, Sub::sub, SubAssign::sub_assign);
forward_binop!(Int, Mul::mul, MulAssign::mul_assign);
forward_binop!(Int, Div::div, DivAssign::div_assign);
forward_binop!(Int, Rem::rem, RemAssign::rem_assign);
forward_fold!(Int, Int::ZERO, Int::from(1));

impl From<Nat> for Int {
  fn from(magnitude: Nat) -> Int {
    Int { magnitude, negative: false }
  }
}

impl TryFrom<Int> for Nat {
  type Error = NumError;

  fn try_from(n: Int) -> Result<Nat, NumError> {
    if n.negative {
      Err(NumError::Negative)
    } else {
      Ok(n.magnitude)
    }
  }
}

macro_rules! from_primitive {
  ($($ty:ty),*) => {$(
    impl From<$ty> for Int {
      fn from(n: $ty) -> Int {
        Int::from_parts(Nat::from(n.unsigned_abs()), n < 0)
      }
    }
  )*};
}

from_primitive!(i8, i16, i32, i64, i128, isize);

macro_rules! from_unsigned {
  ($($ty:ty),*) => {$(
    impl From<$ty> for Int {
      fn from(n: $ty) -> Int {
        Int::from(Nat::from(n))
      }
    }
  )*};
}

from_unsigned!(u8, u16, u32, u64, u128, usize);

impl TryFrom<&Int> for i128 {
  type Error = NumError;

  fn try_from(n: &Int) -> Result<i128, NumError> {
    let magnitude = n.magnitude.as_u128().ok_or(NumError::Overflow)?;
    if n.negative {
      0i128.checked_sub_unsigned(magnitude).ok_or(NumError::Overflow)
    } else {
      i128::try_from(magnitude).map_err(|_| NumError::Overflow)
    }
  }
}

impl TryFrom<&Int> for i64 {
  type Error = NumError;

  fn try_from(n: &Int) -> Result<i64, NumError> {
    i64::try_from(i128::try_from(n)?).map_err(|_| NumError::Overflow)
  }
}

impl FromStr for Int {
  type Err = NumError;

  fn from_str(s: &str) -> Result<Int, NumError> {
    match Int::parse(s, 0)? {
      (value, consumed) if consumed != 0 && consumed == s.len() => Ok(value),
      (_, consumed) => Err(NumError::InvalidDigits { consumed, len: s.len() }),
    }
  }
}

macro_rules! fmt_signed {
  ($($Trait:ident $prefix:literal $fmt:literal),* $(,)?) => {$(
    impl $Trait for Int {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = format!($fmt, self.magnitude);
        f.pad_integral(!self.negative, $prefix, &digits)
      }
    }
  )*};
}

fmt_signed! {
  Display "" "{}",
  LowerHex "0x" "{:x}",
  UpperHex "0x" "{:X}",
  Binary "0b" "{:b}",
  Octal "0o" "{:o}",
}

impl Debug for Int {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    Display::fmt(self, f)
  }
}

#[cfg(test)]
mod tests {
  use rand::{RngCore, SeedableRng};
  use rand_chacha::ChaCha8Rng;

  use super::*;

  fn int(s: &str) -> Int {
    s.parse().unwrap()
  }

  fn random_int(rng: &mut ChaCha8Rng) -> Int {
    let len = rng.next_u32() % 4;
    let magnitude = Nat::new((0..len).map(|_| rng.next_u32()).collect());
    Int::from_parts(magnitude, rng.next_u32() & 1 == 1)
  }

  #[test]
  fn no_negative_zero() {
    assert!(!Int::from_parts(Nat::ZERO, true).is_negative());
    assert!(!(-Int::ZERO).is_negative());
    assert!(!(Int::from(5) - Int::from(5)).is_negative());
    assert!(!(Int::from(-5) * Int::ZERO).is_negative());
    assert_eq!(int("-0"), Int::ZERO);
  }

  #[test]
  fn mixed_sign_addition() {
    assert_eq!(Int::from(-7) + Int::from(3), Int::from(-4));
    assert_eq!(Int::from(7) + Int::from(-3), Int::from(4));
    assert_eq!(Int::from(3) - Int::from(7), Int::from(-4));
    assert_eq!(Int::from(-3) - Int::from(-7), Int::from(4));
    assert_eq!(Int::from(-3) + Int::from(-7), Int::from(-10));
  }

  #[test]
  fn floored_division() {
    assert_eq!(Int::from(-6).div_rem(&Int::from(3)), (Int::from(-2), Int::ZERO));
    assert_eq!(Int::from(-5).div_rem(&Int::from(3)), (Int::from(-2), Int::from(1)));
    assert_eq!(Int::from(5).div_rem(&Int::from(-3)), (Int::from(-2), Int::from(-1)));
    assert_eq!(Int::from(-5).div_rem(&Int::from(-3)), (Int::from(1), Int::from(-2)));
    assert_eq!(Int::from(5).div_rem(&Int::from(3)), (Int::from(1), Int::from(2)));
    assert_eq!(Int::from(1).checked_div_rem(&Int::ZERO), Err(NumError::DivisionByZero));
  }

  #[test]
  fn floored_division_law() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    for _ in 0..500 {
      let a = random_int(&mut rng);
      let b = random_int(&mut rng);
      if b.is_zero() {
        continue;
      }
      let (q, r) = a.div_rem(&b);
      assert_eq!(&q * &b + &r, a);
      assert!(r.is_zero() || r.is_negative() == b.is_negative());
      assert!(r.magnitude() < b.magnitude());
    }
  }

  #[test]
  fn ordering() {
    let values = ["-100000000000000000000", "-5", "-1", "0", "1", "5", "100000000000000000000"];
    for (i, a) in values.iter().enumerate() {
      for (j, b) in values.iter().enumerate() {
        assert_eq!(int(a).cmp(&int(b)), i.cmp(&j));
      }
    }
  }

  #[test]
  fn pow_parity() {
    assert_eq!(Int::from(-2).pow(&Int::from(3)), Ok(Int::from(-8)));
    assert_eq!(Int::from(-2).pow(&Int::from(4)), Ok(Int::from(16)));
    assert_eq!(Int::from(-2).pow(&Int::from(-1)), Err(NumError::NegativeExponent));
    assert_eq!(Int::from(-3).pow_u32(0), Int::from(1));
    assert_eq!(Int::ZERO.pow_u32(3), Int::ZERO);
  }

  #[test]
  fn parses_signs() {
    assert_eq!(Int::parse("-0x10", 0), Ok((Int::from(-16), 5)));
    assert_eq!(Int::parse("+12z", 10), Ok((Int::from(12), 3)));
    assert_eq!(Int::parse("-", 0), Ok((Int::ZERO, 0)));
    assert_eq!(Int::parse("-z", 0), Ok((Int::ZERO, 0)));
    assert_eq!(Int::parse_radix("-zz", 36), Ok((Int::from(-1295), 3)));
    assert_eq!("--1".parse::<Int>(), Err(NumError::InvalidDigits { consumed: 0, len: 3 }));
  }

  #[test]
  fn formats_signs() {
    let n = Int::from(-31);
    assert_eq!(n.to_string(), "-31");
    assert_eq!(n.to_str_radix(16, 4).unwrap(), "-001f");
    assert_eq!(format!("{n:#x}"), "-0x1f");
    assert_eq!(format!("{n:>5}"), "  -31");
    assert_eq!(format!("{:+}", Int::from(31)), "+31");
    assert_eq!(format!("{:?}", Int::from(-2)), "-2");
  }

  #[test]
  fn primitive_conversions() {
    assert_eq!(Int::from(i128::MIN).to_string(), "-170141183460469231731687303715884105728");
    assert_eq!(i128::try_from(&Int::from(i128::MIN)), Ok(i128::MIN));
    assert_eq!(i128::try_from(&Int::from(u128::MAX)), Err(NumError::Overflow));
    assert_eq!(i64::try_from(&Int::from(-42)), Ok(-42));
    assert_eq!(i64::try_from(&Int::from(i64::MAX as u64 + 1)), Err(NumError::Overflow));
    assert_eq!(Nat::try_from(Int::from(-1)), Err(NumError::Negative));
    assert_eq!(Int::from_f64(-2.5), Ok(Int::from(-2)));
    assert_eq!(Int::from(-3).to_f64(), -3.0);
  }

  #[test]
  fn folds() {
    let ns = [-1, 2, -3, 4].map(Int::from);
    assert_eq!(ns.iter().sum::<Int>(), Int::from(2));
    assert_eq!(ns.into_iter().product::<Int>(), Int::from(24));
  }
}
