use std::{
  fmt::{self, Binary, Display, LowerHex, Octal, UpperHex, Write},
  iter,
  str::FromStr,
};

use super::Nat;
use crate::error::NumError;

/// Digit grouping characters skipped while parsing.
pub(crate) const SEPARATORS: [char; 2] = ['_', '\''];

pub(crate) fn check_radix(radix: u32) -> Result<(), NumError> {
  if (2..=36).contains(&radix) {
    Ok(())
  } else {
    Err(NumError::InvalidRadix { radix })
  }
}

impl Nat {
  /// Parses the longest valid prefix of `text`, returning the value and the
  /// number of bytes consumed.
  ///
  /// `base` is `2`, `10`, `16`, or `0` to detect a `0b`/`0x` prefix (decimal
  /// otherwise). Nothing consumed means no number was found.
  pub fn parse(text: &str, base: u32) -> Result<(Nat, usize), NumError> {
    let (radix, prefix) = match base {
      0 => match text.as_bytes() {
        [b'0', b'b' | b'B', ..] => (2, 2),
        [b'0', b'x' | b'X', ..] => (16, 2),
        _ => (10, 0),
      },
      2 | 10 | 16 => (base, 0),
      _ => return Err(NumError::InvalidRadix { radix: base }),
    };
    Ok(match Self::parse_digits(&text[prefix..], radix) {
      // a bare `0x` is the number zero followed by garbage
      (_, 0) if prefix != 0 => (Nat::ZERO, 1),
      (_, 0) => (Nat::ZERO, 0),
      (value, consumed) => (value, prefix + consumed),
    })
  }

  /// Parses the longest valid prefix of `text` as digits in `radix`
  /// (2 through 36); no prefix is recognized.
  pub fn parse_radix(text: &str, radix: u32) -> Result<(Nat, usize), NumError> {
    check_radix(radix)?;
    Ok(Self::parse_digits(text, radix))
  }

  fn parse_digits(text: &str, radix: u32) -> (Nat, usize) {
    let mut value = Nat::ZERO;
    let mut consumed = 0;
    for (i, c) in text.char_indices() {
      if SEPARATORS.contains(&c) {
        if consumed == 0 {
          break;
        }
        continue;
      }
      let Some(digit) = c.to_digit(radix) else { break };
      value.mul_u32(radix);
      value.add_u32(digit);
      consumed = i + 1;
    }
    (value, consumed)
  }

  /// Formats the value in `radix`, left-padded with zeros to `min_digits`.
  ///
  /// Zero has no digits of its own, so it formats as the empty string unless
  /// `min_digits` is at least one.
  pub fn to_str_radix(&self, radix: u32, min_digits: usize) -> Result<String, NumError> {
    check_radix(radix)?;
    let digits = self.digits(radix);
    let mut out = String::with_capacity(digits.len().max(min_digits));
    out.extend(iter::repeat('0').take(min_digits.saturating_sub(digits.len())));
    out.push_str(&digits);
    Ok(out)
  }

  fn digits(&self, radix: u32) -> String {
    let mut out = String::new();
    match radix {
      2 | 16 => {
        let mut words = self.0.iter().rev();
        if let Some(top) = words.next() {
          _ = match radix {
            2 => write!(out, "{top:b}"),
            _ => write!(out, "{top:x}"),
          };
        }
        for word in words {
          _ = match radix {
            2 => write!(out, "{word:032b}"),
            _ => write!(out, "{word:08x}"),
          };
        }
      }
      _ => {
        let mut n = self.clone();
        while !n.is_zero() {
          let digit = n.div_rem_u32(radix);
          out.extend(char::from_digit(digit, radix));
        }
        out = out.chars().rev().collect();
      }
    }
    out
  }
}

impl FromStr for Nat {
  type Err = NumError;

  /// Parses the whole string, detecting a `0b`/`0x` prefix.
  fn from_str(s: &str) -> Result<Nat, NumError> {
    match Nat::parse(s, 0)? {
      (value, consumed) if consumed != 0 && consumed == s.len() => Ok(value),
      (_, consumed) => Err(NumError::InvalidDigits { consumed, len: s.len() }),
    }
  }
}

macro_rules! fmt_radix {
  ($($Trait:ident $radix:literal $prefix:literal $upper:literal),* $(,)?) => {$(
    impl $Trait for Nat {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut digits = self.digits($radix);
        if digits.is_empty() {
          digits.push('0');
        }
        if $upper {
          digits.make_ascii_uppercase();
        }
        f.pad_integral(true, $prefix, &digits)
      }
    }
  )*};
}

fmt_radix! {
  Display 10 "" false,
  LowerHex 16 "0x" false,
  UpperHex 16 "0x" true,
  Binary 2 "0b" false,
  Octal 8 "0o" false,
}

#[cfg(test)]
mod tests {
  use rand::{RngCore, SeedableRng};
  use rand_chacha::ChaCha8Rng;

  use super::*;

  #[test]
  fn parse_detects_prefix() {
    assert_eq!(Nat::parse("0x1F", 0), Ok((Nat::from(31u32), 4)));
    assert_eq!(Nat::parse("0b101", 0), Ok((Nat::from(5u32), 5)));
    assert_eq!(Nat::parse("0101", 0), Ok((Nat::from(101u32), 4)));
    assert_eq!(Nat::parse("0x", 0), Ok((Nat::ZERO, 1)));
    assert_eq!(Nat::parse("0xg", 0), Ok((Nat::ZERO, 1)));
    assert_eq!(Nat::parse("ff", 16), Ok((Nat::from(255u32), 2)));
    assert_eq!(Nat::parse("0xff", 16), Ok((Nat::ZERO, 1)));
  }

  #[test]
  fn parse_stops_at_garbage() {
    assert_eq!(Nat::parse("123abc", 10), Ok((Nat::from(123u32), 3)));
    assert_eq!(Nat::parse("abc", 10), Ok((Nat::ZERO, 0)));
    assert_eq!(Nat::parse("", 0), Ok((Nat::ZERO, 0)));
    assert_eq!(Nat::parse("12 34", 0), Ok((Nat::from(12u32), 2)));
    assert_eq!(Nat::parse("102", 2), Ok((Nat::from(2u32), 2)));
  }

  #[test]
  fn parse_skips_separators() {
    assert_eq!(Nat::parse("1_000_000", 0), Ok((Nat::from(1_000_000u32), 9)));
    assert_eq!(Nat::parse("1'000", 10), Ok((Nat::from(1000u32), 5)));
    assert_eq!(Nat::parse("0xdead_beef", 0), Ok((Nat::from(0xdead_beefu32), 11)));
    assert_eq!(Nat::parse("12__", 0), Ok((Nat::from(12u32), 2)));
    assert_eq!(Nat::parse("_12", 0), Ok((Nat::ZERO, 0)));
  }

  #[test]
  fn invalid_radix() {
    assert_eq!(Nat::parse("1", 8), Err(NumError::InvalidRadix { radix: 8 }));
    assert_eq!(Nat::parse_radix("1", 37), Err(NumError::InvalidRadix { radix: 37 }));
    assert_eq!(Nat::parse_radix("1", 1), Err(NumError::InvalidRadix { radix: 1 }));
    assert_eq!(Nat::one().to_str_radix(0, 1), Err(NumError::InvalidRadix { radix: 0 }));
    assert_eq!(Nat::parse_radix("zz", 36), Ok((Nat::from(1295u32), 2)));
  }

  #[test]
  fn from_str_is_strict() {
    assert_eq!("42".parse::<Nat>(), Ok(Nat::from(42u32)));
    assert_eq!("42x".parse::<Nat>(), Err(NumError::InvalidDigits { consumed: 2, len: 3 }));
    assert_eq!("".parse::<Nat>(), Err(NumError::InvalidDigits { consumed: 0, len: 0 }));
  }

  #[test]
  fn formats_word_aligned_radices() {
    let n = Nat::from(0x123456789abcdef0u64);
    assert_eq!(n.to_str_radix(16, 1).unwrap(), "123456789abcdef0");
    let bin = n.to_str_radix(2, 1).unwrap();
    assert_eq!(bin.len(), 61);
    assert!(bin.starts_with('1'));
    assert_eq!(bin, format!("{:b}", 0x123456789abcdef0u64));
    assert_eq!(Nat::from(1u64 << 32).to_str_radix(16, 1).unwrap(), "100000000");
  }

  #[test]
  fn formats_padding_and_zero() {
    assert_eq!(Nat::ZERO.to_str_radix(10, 1).unwrap(), "0");
    assert_eq!(Nat::ZERO.to_str_radix(10, 0).unwrap(), "");
    assert_eq!(Nat::ZERO.to_str_radix(16, 4).unwrap(), "0000");
    assert_eq!(Nat::from(255u32).to_str_radix(16, 4).unwrap(), "00ff");
    assert_eq!(Nat::from(255u32).to_str_radix(16, 1).unwrap(), "ff");
    assert_eq!(Nat::from(35u32).to_str_radix(36, 1).unwrap(), "z");
    assert_eq!(Nat::from(8u32).to_str_radix(3, 1).unwrap(), "22");
  }

  #[test]
  fn fmt_traits() {
    let n = Nat::from(0xbeefu32);
    assert_eq!(format!("{n}"), "48879");
    assert_eq!(format!("{n:x}"), "beef");
    assert_eq!(format!("{n:#X}"), "0xBEEF");
    assert_eq!(format!("{n:#b}"), "0b1011111011101111");
    assert_eq!(format!("{n:o}"), "137357");
    assert_eq!(format!("{n:>8}"), "   48879");
    assert_eq!(format!("{:08x}", Nat::ZERO), "00000000");
    assert_eq!(format!("{:?}", Nat::from(7u32)), "7");
  }

  #[test]
  fn round_trips() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for _ in 0..100 {
      let n = Nat::new((0..rng.next_u32() % 5).map(|_| rng.next_u32()).collect());
      for radix in [2, 10, 16, 36] {
        let text = n.to_str_radix(radix, 1).unwrap();
        assert_eq!(Nat::parse_radix(&text, radix), Ok((n.clone(), text.len())));
      }
    }
  }
}
