use std::{
  iter::{Product, Sum},
  ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Rem, RemAssign, Sub, SubAssign},
};

use log::trace;

use super::Nat;
use crate::{
  error::NumError,
  ops::{forward_binop, forward_fold},
};

impl Nat {
  pub fn add_u32(&mut self, mut n: u32) {
    for d in &mut self.0 {
      if n == 0 {
        return;
      }
      let (new, carry) = u32::overflowing_add(*d, n);
      *d = new;
      n = carry as u32;
    }
    if n != 0 {
      self.0.push(n);
    }
  }

  pub fn mul_u32(&mut self, n: u32) {
    if n == 0 {
      self.0.clear();
      return;
    }
    let mut carry = 0;
    for d in &mut self.0 {
      let total = *d as u64 * n as u64 + carry;
      *d = total as u32;
      carry = total >> 32;
    }
    if carry != 0 {
      self.0.push(carry as u32);
    }
  }

  /// Divides in place by a single word, returning the remainder.
  ///
  /// Panics if `n` is zero.
  pub fn div_rem_u32(&mut self, n: u32) -> u32 {
    if n == 0 {
      panic!("{}", NumError::DivisionByZero);
    }
    let mut rem = 0u64;
    for d in self.0.iter_mut().rev() {
      let cur = rem << 32 | *d as u64;
      *d = (cur / n as u64) as u32;
      rem = cur % n as u64;
    }
    self.trim();
    rem as u32
  }

  fn add_nat(&mut self, other: &Nat) {
    if self.0.len() < other.0.len() {
      self.0.resize(other.0.len(), 0);
    }
    let mut carry = 0;
    for (i, d) in self.0.iter_mut().enumerate() {
      if i >= other.0.len() && carry == 0 {
        break;
      }
      let total = *d as u64 + other.0.get(i).copied().unwrap_or(0) as u64 + carry;
      *d = total as u32;
      carry = total >> 32;
    }
    if carry != 0 {
      self.0.push(carry as u32);
    }
  }

  /// Requires `self >= other`.
  pub(crate) fn sub_nat(&mut self, other: &Nat) {
    let mut borrow = false;
    for (i, d) in self.0.iter_mut().enumerate() {
      if i >= other.0.len() && !borrow {
        break;
      }
      let (diff, a) = d.overflowing_sub(other.0.get(i).copied().unwrap_or(0));
      let (diff, b) = diff.overflowing_sub(borrow as u32);
      *d = diff;
      borrow = a || b;
    }
    debug_assert!(!borrow);
    self.trim();
  }

  fn mul_nat(&self, other: &Nat) -> Nat {
    if self.is_zero() || other.is_zero() {
      return Nat::ZERO;
    }
    let mut out = vec![0u32; self.0.len() + other.0.len()];
    for (i, &a) in self.0.iter().enumerate() {
      // a * b + out + carry never exceeds u64::MAX
      let mut carry = 0u64;
      for (j, &b) in other.0.iter().enumerate() {
        let total = a as u64 * b as u64 + out[i + j] as u64 + carry;
        out[i + j] = total as u32;
        carry = total >> 32;
      }
      out[i + other.0.len()] = carry as u32;
    }
    Nat::new(out)
  }

  pub fn checked_sub(&self, other: &Nat) -> Option<Nat> {
    (self >= other).then(|| {
      let mut out = self.clone();
      out.sub_nat(other);
      out
    })
  }

  /// Quotient and remainder, or `DivisionByZero`.
  ///
  /// Multi-word divisors use restoring long division: the divisor is aligned
  /// under the dividend's top bit and one quotient bit is decided per shift.
  pub fn checked_div_rem(&self, divisor: &Nat) -> Result<(Nat, Nat), NumError> {
    if divisor.is_zero() {
      return Err(NumError::DivisionByZero);
    }
    if self < divisor {
      return Ok((Nat::ZERO, self.clone()));
    }
    if let [d] = divisor.0[..] {
      let mut quotient = self.clone();
      let rem = quotient.div_rem_u32(d);
      return Ok((quotient, Nat::from(rem)));
    }

    let mut shift = self.bits() - divisor.bits();
    let mut subtrahend = divisor << shift;
    if subtrahend > *self {
      subtrahend >>= 1usize;
      shift -= 1;
    }
    trace!("dividing {} bits by {} bits", self.bits(), divisor.bits());

    let mut quotient = Nat::ZERO;
    let mut remainder = self.clone();
    loop {
      if remainder >= subtrahend {
        remainder.sub_nat(&subtrahend);
        quotient.set_bit(shift, true);
      }
      if shift == 0 {
        break;
      }
      shift -= 1;
      subtrahend >>= 1usize;
    }
    Ok((quotient, remainder))
  }

  /// Panics if `divisor` is zero.
  pub fn div_rem(&self, divisor: &Nat) -> (Nat, Nat) {
    match self.checked_div_rem(divisor) {
      Ok(out) => out,
      Err(err) => panic!("{err}"),
    }
  }

  /// Square-and-multiply over the bits of `exponent`.
  pub fn pow(&self, exponent: &Nat) -> Nat {
    let bits = exponent.bits();
    let mut base = self.clone();
    let mut out = Nat::one();
    for i in 0..bits {
      if exponent.get_bit(i) {
        out *= &base;
      }
      if i + 1 < bits {
        base = base.mul_nat(&base);
      }
    }
    out
  }

  pub fn pow_u32(&self, exponent: u32) -> Nat {
    self.pow(&Nat::from(exponent))
  }

  pub fn gcd(&self, other: &Nat) -> Nat {
    let mut a = self.clone();
    let mut b = other.clone();
    while !b.is_zero() {
      let rem = a.div_rem(&b).1;
      a = b;
      b = rem;
    }
    a
  }
}

impl AddAssign<&Nat> for Nat {
  fn add_assign(&mut self, rhs: &Nat) {
    self.add_nat(rhs);
  }
}

impl SubAssign<&Nat> for Nat {
  fn sub_assign(&mut self, rhs: &Nat) {
    if *self < *rhs {
      panic!("{}", NumError::Underflow);
    }
    self.sub_nat(rhs);
  }
}

impl MulAssign<&Nat> for Nat {
  fn mul_assign(&mut self, rhs: &Nat) {
    *self = self.mul_nat(rhs);
  }
}

impl DivAssign<&Nat> for Nat {
  fn div_assign(&mut self, rhs: &Nat) {
    *self = self.div_rem(rhs).0;
  }
}

impl RemAssign<&Nat> for Nat {
  fn rem_assign(&mut self, rhs: &Nat) {
    *self = self.div_rem(rhs).1;
  }
}

forward_binop!(Nat, Add::add, AddAssign::add_assign);
forward_binop!(Nat, Sub::sub, SubAssign::sub_assign);
forward_binop!(Nat, Mul::mul, MulAssign::mul_assign);
forward_binop!(Nat, Div::div, DivAssign::div_assign);
forward_binop!(Nat, Rem::rem, RemAssign::rem_assign);
forward_fold!(Nat, Nat::ZERO, Nat::one());
