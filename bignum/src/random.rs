use log::{debug, trace};
use rand::{distributions::Distribution, Rng, RngCore};

use crate::{error::NumError, int::Int, nat::Nat};

impl Nat {
  /// A uniformly random value below `2^bits`.
  pub fn random_bits<R: RngCore + ?Sized>(rng: &mut R, bits: usize) -> Nat {
    let mut words: Vec<u32> = (0..bits.div_ceil(32)).map(|_| rng.next_u32()).collect();
    if bits % 32 != 0 {
      if let Some(top) = words.last_mut() {
        *top >>= 32 - bits % 32;
      }
    }
    Nat::new(words)
  }

  /// A uniformly random value in `low..=high`.
  pub fn random<R: Rng + ?Sized>(rng: &mut R, low: &Nat, high: &Nat) -> Result<Nat, NumError> {
    Ok(NatRange::new(low.clone(), high.clone())?.sample(rng))
  }
}

impl Int {
  /// A uniformly random value in `low..=high`.
  pub fn random<R: Rng + ?Sized>(rng: &mut R, low: &Int, high: &Int) -> Result<Int, NumError> {
    Ok(IntRange::new(low.clone(), high.clone())?.sample(rng))
  }
}

/// An inclusive range of naturals, sampled by rejection so that every value
/// is equally likely.
#[derive(Debug, Clone)]
pub struct NatRange {
  low: Nat,
  size: Nat,
  bits: usize,
}

impl NatRange {
  pub fn new(low: Nat, high: Nat) -> Result<NatRange, NumError> {
    let mut size = high.checked_sub(&low).ok_or(NumError::EmptyRange)?;
    size.add_u32(1);
    let bits = size.bits();
    debug!("sampling {size} values with {bits} random bits");
    Ok(NatRange { low, size, bits })
  }

  pub fn low(&self) -> &Nat {
    &self.low
  }

  /// The number of values in the range.
  pub fn size(&self) -> &Nat {
    &self.size
  }

  fn sample_offset<R: RngCore + ?Sized>(&self, rng: &mut R) -> Nat {
    loop {
      let offset = Nat::random_bits(rng, self.bits);
      if offset < self.size {
        return offset;
      }
      trace!("rejected draw {offset} outside of {}", self.size);
    }
  }
}

impl Distribution<Nat> for NatRange {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Nat {
    &self.low + self.sample_offset(rng)
  }
}

/// An inclusive range of integers.
#[derive(Debug, Clone)]
pub struct IntRange {
  low: Int,
  offsets: NatRange,
}

impl IntRange {
  pub fn new(low: Int, high: Int) -> Result<IntRange, NumError> {
    let span = Nat::try_from(&high - &low).map_err(|_| NumError::EmptyRange)?;
    Ok(IntRange { low, offsets: NatRange::new(Nat::ZERO, span)? })
  }

  pub fn low(&self) -> &Int {
    &self.low
  }

  pub fn size(&self) -> &Nat {
    self.offsets.size()
  }
}

impl Distribution<Int> for IntRange {
  fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Int {
    &self.low + Int::from(self.offsets.sample_offset(rng))
  }
}
