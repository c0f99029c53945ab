use bignum::{Int, NumError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Formats `value` in `radix`, marking hexadecimal and binary output with the
/// prefix the parser accepts back.
pub fn format_int(value: &Int, radix: u32) -> Result<String, NumError> {
  let digits = value.magnitude().to_str_radix(radix, 1)?;
  let sign = if value.is_negative() { "-" } else { "" };
  let prefix = match radix {
    16 => "0x",
    2 => "0b",
    _ => "",
  };
  Ok(format!("{sign}{prefix}{digits}"))
}

pub fn parse_radix(text: &str) -> Result<u32, String> {
  match text.parse::<u32>() {
    Ok(radix) if (2..=36).contains(&radix) => Ok(radix),
    _ => Err(format!("`{text}` is not a radix between 2 and 36")),
  }
}

pub fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
  match seed {
    Some(seed) => ChaCha8Rng::seed_from_u64(seed),
    None => ChaCha8Rng::from_entropy(),
  }
}
