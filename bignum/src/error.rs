use std::{
  error::Error,
  fmt::{self, Display},
};

macro_rules! errors {
  ($(
    $name:ident $({ $($field:ident: $ty:ty),* $(,)? })?
      [$($fmt:tt)*]
  )*) => {
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum NumError {
      $( $name $({ $($field: $ty),* })?, )*
    }

    impl Display for NumError {
      fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
          $( Self::$name $({ $($field),* })? => write!(f, $($fmt)*), )*
        }
      }
    }
  };
}

errors! {
  DivisionByZero
    ["attempt to divide by zero"]
  InvalidRadix { radix: u32 }
    ["invalid radix {radix}; expected a radix between 2 and 36"]
  NegativeExponent
    ["attempt to raise to a negative power"]
  InvalidDigits { consumed: usize, len: usize }
    ["invalid digit at offset {consumed} of {len}"]
  NotFinite
    ["cannot convert a non-finite float to an integer"]
  Negative
    ["a negative value is not a natural number"]
  Underflow
    ["attempt to subtract with overflow"]
  Truncated { needed: usize, len: usize }
    ["value needs {needed} byte{}; buffer holds {len}", plural(*needed, "s", "")]
  EmptyRange
    ["empty range; the low bound exceeds the high bound"]
  Overflow
    ["value does not fit in the target type"]
}

impl Error for NumError {}

fn plural<'a>(n: usize, plural: &'a str, singular: &'a str) -> &'a str {
  if n == 1 {
    singular
  } else {
    plural
  }
}
