use std::{
  iter,
  ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Shl, ShlAssign, Shr, ShrAssign},
};

use super::Nat;
use crate::ops::forward_binop;

impl Nat {
  pub fn get_bit(&self, index: usize) -> bool {
    self.0.get(index / 32).is_some_and(|x| x >> (index % 32) & 1 != 0)
  }

  pub fn set_bit(&mut self, index: usize, value: bool) {
    let word = index / 32;
    let mask = 1 << (index % 32);
    if value {
      if word >= self.0.len() {
        self.0.resize(word + 1, 0);
      }
      self.0[word] |= mask;
    } else if let Some(x) = self.0.get_mut(word) {
      *x &= !mask;
      self.trim();
    }
  }

  pub fn flip_bit(&mut self, index: usize) {
    let bit = self.get_bit(index);
    self.set_bit(index, !bit);
  }

  fn shl_bits(&mut self, shift: usize) {
    if self.is_zero() {
      return;
    }
    let bits = (shift % 32) as u32;
    if bits != 0 {
      let mut carry = 0;
      for x in &mut self.0 {
        let next = *x >> (32 - bits);
        *x = *x << bits | carry;
        carry = next;
      }
      if carry != 0 {
        self.0.push(carry);
      }
    }
    let words = shift / 32;
    if words != 0 {
      self.0.splice(0..0, iter::repeat(0).take(words));
    }
  }

  fn shr_bits(&mut self, shift: usize) {
    let words = shift / 32;
    if words >= self.0.len() {
      self.0.clear();
      return;
    }
    self.0.drain(..words);
    let bits = (shift % 32) as u32;
    if bits != 0 {
      let mut carry = 0;
      for x in self.0.iter_mut().rev() {
        let next = *x << (32 - bits);
        *x = *x >> bits | carry;
        carry = next;
      }
      self.trim();
    }
  }
}

impl BitAndAssign<&Nat> for Nat {
  fn bitand_assign(&mut self, rhs: &Nat) {
    self.0.truncate(rhs.0.len());
    for (x, y) in self.0.iter_mut().zip(&rhs.0) {
      *x &= y;
    }
    self.trim();
  }
}

impl BitOrAssign<&Nat> for Nat {
  fn bitor_assign(&mut self, rhs: &Nat) {
    if self.0.len() < rhs.0.len() {
      self.0.resize(rhs.0.len(), 0);
    }
    for (x, y) in self.0.iter_mut().zip(&rhs.0) {
      *x |= y;
    }
  }
}

impl BitXorAssign<&Nat> for Nat {
  fn bitxor_assign(&mut self, rhs: &Nat) {
    if self.0.len() < rhs.0.len() {
      self.0.resize(rhs.0.len(), 0);
    }
    for (x, y) in self.0.iter_mut().zip(&rhs.0) {
      *x ^= y;
    }
    self.trim();
  }
}

forward_binop!(Nat, BitAnd::bitand, BitAndAssign::bitand_assign);
forward_binop!(Nat, BitOr::bitor, BitOrAssign::bitor_assign);
forward_binop!(Nat, BitXor::bitxor, BitXorAssign::bitxor_assign);

macro_rules! shift_ops {
  ($($ty:ty),*) => {$(
    impl ShlAssign<$ty> for Nat {
      fn shl_assign(&mut self, rhs: $ty) {
        self.shl_bits(rhs as usize);
      }
    }

    impl ShrAssign<$ty> for Nat {
      fn shr_assign(&mut self, rhs: $ty) {
        self.shr_bits(rhs as usize);
      }
    }

    impl Shl<$ty> for Nat {
      type Output = Nat;

      fn shl(mut self, rhs: $ty) -> Nat {
        self <<= rhs;
        self
      }
    }

    impl Shr<$ty> for Nat {
      type Output = Nat;

      fn shr(mut self, rhs: $ty) -> Nat {
        self >>= rhs;
        self
      }
    }

    impl Shl<$ty> for &Nat {
      type Output = Nat;

      fn shl(self, rhs: $ty) -> Nat {
        self.clone() << rhs
      }
    }

    impl Shr<$ty> for &Nat {
      type Output = Nat;

      fn shr(self, rhs: $ty) -> Nat {
        self.clone() >> rhs
      }
    }
  )*};
}

shift_ops!(u32, usize);
