use super::Nat;
use crate::error::NumError;

impl Nat {
  pub fn read_be(bytes: &[u8]) -> Nat {
    Nat::new(bytes.rchunks(4).map(|c| c.iter().fold(0, |acc, &b| acc << 8 | b as u32)).collect())
  }

  pub fn read_le(bytes: &[u8]) -> Nat {
    Nat::new(bytes.chunks(4).map(|c| c.iter().rev().fold(0, |acc, &b| acc << 8 | b as u32)).collect())
  }

  /// Fills `buf` with the value in big-endian order, zero-padding on the
  /// left.
  ///
  /// If the value needs more than `buf.len()` bytes only the low-order bytes
  /// are written; use [`Nat::try_write_be`] to detect that.
  pub fn write_be(&self, buf: &mut [u8]) {
    for (i, b) in buf.iter_mut().rev().enumerate() {
      *b = self.byte(i);
    }
  }

  /// Fills `buf` with the value in little-endian order, zero-padding on the
  /// right. Truncates like [`Nat::write_be`].
  pub fn write_le(&self, buf: &mut [u8]) {
    for (i, b) in buf.iter_mut().enumerate() {
      *b = self.byte(i);
    }
  }

  pub fn try_write_be(&self, buf: &mut [u8]) -> Result<(), NumError> {
    self.check_fits(buf.len())?;
    self.write_be(buf);
    Ok(())
  }

  pub fn try_write_le(&self, buf: &mut [u8]) -> Result<(), NumError> {
    self.check_fits(buf.len())?;
    self.write_le(buf);
    Ok(())
  }

  pub fn to_bytes_be(&self) -> Vec<u8> {
    let mut buf = vec![0; self.bytes()];
    self.write_be(&mut buf);
    buf
  }

  pub fn to_bytes_le(&self) -> Vec<u8> {
    let mut buf = vec![0; self.bytes()];
    self.write_le(&mut buf);
    buf
  }

  fn check_fits(&self, len: usize) -> Result<(), NumError> {
    let needed = self.bytes();
    if needed > len {
      Err(NumError::Truncated { needed, len })
    } else {
      Ok(())
    }
  }

  fn byte(&self, i: usize) -> u8 {
    self.0.get(i / 4).map_or(0, |x| (x >> (8 * (i % 4))) as u8)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn reads_both_orders() {
    let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
    assert_eq!(Nat::read_be(&bytes), Nat::from(0x01_0203_0405u64));
    assert_eq!(Nat::read_le(&bytes), Nat::from(0x05_0403_0201u64));
    assert_eq!(Nat::read_be(&[0, 0, 0, 0, 0, 7]), Nat::from(7u32));
    assert_eq!(Nat::read_le(&[7, 0, 0, 0, 0, 0]), Nat::from(7u32));
    assert_eq!(Nat::read_be(&[]), Nat::ZERO);
  }

  #[test]
  fn writes_pad_on_the_right_side() {
    let n = Nat::from(0x0102u32);
    let mut buf = [0xaa; 4];
    n.write_be(&mut buf);
    assert_eq!(buf, [0, 0, 1, 2]);
    n.write_le(&mut buf);
    assert_eq!(buf, [2, 1, 0, 0]);
  }

  #[test]
  fn writes_truncate_high_bytes() {
    let n = Nat::from(0x0102_0304_0506u64);
    let mut buf = [0; 3];
    n.write_be(&mut buf);
    assert_eq!(buf, [4, 5, 6]);
    n.write_le(&mut buf);
    assert_eq!(buf, [6, 5, 4]);
    assert_eq!(n.try_write_be(&mut buf), Err(NumError::Truncated { needed: 6, len: 3 }));
    assert_eq!(n.try_write_le(&mut [0; 6]), Ok(()));
  }

  #[test]
  fn minimal_byte_vectors() {
    let n = Nat::from(0xabcdefu32);
    assert_eq!(n.to_bytes_be(), [0xab, 0xcd, 0xef]);
    assert_eq!(n.to_bytes_le(), [0xef, 0xcd, 0xab]);
    assert_eq!(Nat::read_be(&n.to_bytes_be()), n);
    assert!(Nat::ZERO.to_bytes_be().is_empty());
  }
}
