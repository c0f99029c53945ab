use std::{
  error::Error,
  fmt::{self, Display},
};

use bignum::{Int, IntRange, Nat, NumError};
use indexmap::IndexMap;
use log::debug;
use rand::distributions::Distribution;
use rand_chacha::ChaCha8Rng;

use crate::ast::{BinaryOp, Expr, Stmt};

/// Results wider than this many bits are refused instead of computed.
pub const MAX_BITS: usize = 1 << 18;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
  Num(NumError),
  UnboundVar(String),
  UnknownFn(String),
  BadArgCount { name: String, expected: usize, got: usize },
  NegativeOperand(BinaryOp),
  TooLarge,
}

impl Display for EvalError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      EvalError::Num(err) => write!(f, "{err}"),
      EvalError::UnboundVar(name) => write!(f, "cannot find `{name}`"),
      EvalError::UnknownFn(name) => write!(f, "unknown function `{name}`"),
      EvalError::BadArgCount { name, expected, got } => {
        let s = if *expected == 1 { "" } else { "s" };
        write!(f, "`{name}` expects {expected} argument{s}; was passed {got}")
      }
      EvalError::NegativeOperand(op) => write!(f, "`{op}` requires non-negative operands"),
      EvalError::TooLarge => write!(f, "result would exceed {MAX_BITS} bits"),
    }
  }
}

impl Error for EvalError {}

impl From<NumError> for EvalError {
  fn from(err: NumError) -> Self {
    EvalError::Num(err)
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
  Value(Int),
  Assigned(String, Int),
}

pub struct Evaluator {
  vars: IndexMap<String, Int>,
  rng: ChaCha8Rng,
}

impl Evaluator {
  pub fn new(rng: ChaCha8Rng) -> Self {
    Evaluator { vars: IndexMap::new(), rng }
  }

  pub fn vars(&self) -> &IndexMap<String, Int> {
    &self.vars
  }

  pub fn exec(&mut self, stmt: Stmt) -> Result<Output, EvalError> {
    debug!("executing {stmt:?}");
    match stmt {
      Stmt::Assign(name, expr) => {
        let value = self.eval(&expr)?;
        self.vars.insert(name.clone(), value.clone());
        Ok(Output::Assigned(name, value))
      }
      Stmt::Expr(expr) => Ok(Output::Value(self.eval(&expr)?)),
    }
  }

  pub fn eval(&mut self, expr: &Expr) -> Result<Int, EvalError> {
    match expr {
      Expr::Num(n) => Ok(Int::from(n.clone())),
      Expr::Var(name) => self.vars.get(name).cloned().ok_or_else(|| EvalError::UnboundVar(name.clone())),
      Expr::Neg(inner) => Ok(-self.eval(inner)?),
      Expr::Binary(op, lhs, rhs) => {
        let lhs = self.eval(lhs)?;
        let rhs = self.eval(rhs)?;
        binary(*op, lhs, rhs)
      }
      Expr::Call(name, args) => {
        let args = args.iter().map(|arg| self.eval(arg)).collect::<Result<Vec<_>, _>>()?;
        self.call(name, args)
      }
    }
  }

  fn call(&mut self, name: &str, args: Vec<Int>) -> Result<Int, EvalError> {
    let bad_count = |expected| EvalError::BadArgCount { name: name.to_owned(), expected, got: args.len() };
    match (name, &args[..]) {
      ("abs", [a]) => Ok(a.abs()),
      ("bits", [a]) => Ok(Int::from(a.magnitude().bits())),
      ("pow", [a, b]) => binary(BinaryOp::Pow, a.clone(), b.clone()),
      ("gcd", [a, b]) => Ok(Int::from(a.magnitude().gcd(b.magnitude()))),
      ("min", [a, b]) => Ok(a.min(b).clone()),
      ("max", [a, b]) => Ok(a.max(b).clone()),
      ("random", [a, b]) => Ok(IntRange::new(a.clone(), b.clone())?.sample(&mut self.rng)),
      ("abs" | "bits", _) => Err(bad_count(1)),
      ("pow" | "gcd" | "min" | "max" | "random", _) => Err(bad_count(2)),
      _ => Err(EvalError::UnknownFn(name.to_owned())),
    }
  }
}

fn binary(op: BinaryOp, lhs: Int, rhs: Int) -> Result<Int, EvalError> {
  Ok(match op {
    BinaryOp::Add => lhs + rhs,
    BinaryOp::Sub => lhs - rhs,
    BinaryOp::Mul => lhs * rhs,
    BinaryOp::Div => lhs.checked_div_rem(&rhs)?.0,
    BinaryOp::Rem => lhs.checked_div_rem(&rhs)?.1,
    BinaryOp::Pow => {
      // `a ** e` has `floor(e * log2(a)) + 1` bits
      if !rhs.is_negative() && lhs.magnitude().bits() > 1 {
        let exponent = u64::try_from(rhs.magnitude()).map_err(|_| EvalError::TooLarge)?;
        if exponent as f64 * log2(lhs.magnitude()) >= MAX_BITS as f64 {
          return Err(EvalError::TooLarge);
        }
      }
      lhs.pow(&rhs)?
    }
    BinaryOp::Shl => {
      let (value, shift) = (natural(op, lhs)?, natural(op, rhs)?);
      if value.is_zero() {
        return Ok(Int::ZERO);
      }
      let shift = usize::try_from(&shift)
        .ok()
        .filter(|shift| value.bits().saturating_add(*shift) <= MAX_BITS)
        .ok_or(EvalError::TooLarge)?;
      Int::from(value << shift)
    }
    BinaryOp::Shr => {
      let (value, shift) = (natural(op, lhs)?, natural(op, rhs)?);
      Int::from(usize::try_from(&shift).map_or(Nat::ZERO, |shift| value >> shift))
    }
    BinaryOp::And => Int::from(natural(op, lhs)? & natural(op, rhs)?),
    BinaryOp::Or => Int::from(natural(op, lhs)? | natural(op, rhs)?),
    BinaryOp::Xor => Int::from(natural(op, lhs)? ^ natural(op, rhs)?),
  })
}

/// Base-two logarithm of a nonzero value, to `f64` precision.
fn log2(n: &Nat) -> f64 {
  let skip = n.bits().saturating_sub(64);
  skip as f64 + (n >> skip).to_f64().log2()
}

fn natural(op: BinaryOp, n: Int) -> Result<Nat, EvalError> {
  Nat::try_from(n).map_err(|_| EvalError::NegativeOperand(op))
}

#[cfg(test)]
mod tests {
  use rand::SeedableRng;

  use super::*;
  use crate::parser::CalcParser;

  fn run(evaluator: &mut Evaluator, src: &str) -> Result<Output, EvalError> {
    let stmt = CalcParser::parse(src).unwrap().unwrap();
    evaluator.exec(stmt)
  }

  fn value(src: &str) -> Result<Int, EvalError> {
    match run(&mut Evaluator::new(ChaCha8Rng::seed_from_u64(0)), src)? {
      Output::Value(value) => Ok(value),
      Output::Assigned(_, value) => Ok(value),
    }
  }

  #[test]
  fn arithmetic() {
    assert_eq!(value("1 + 2 * 3"), Ok(Int::from(7)));
    assert_eq!(value("-5 / 3"), Ok(Int::from(-2)));
    assert_eq!(value("-5 % 3"), Ok(Int::from(1)));
    assert_eq!(value("-2 ** 3"), Ok(Int::from(-8)));
    assert_eq!(value("(1 << 64) - 1"), Ok(Int::from(u64::MAX)));
    assert_eq!(value("0xff & 0b1010 | 1"), Ok(Int::from(11)));
    assert_eq!(value("gcd(48, -180)"), Ok(Int::from(12)));
    assert_eq!(value("bits(255)"), Ok(Int::from(8)));
    assert_eq!(value("min(-1, 1)"), Ok(Int::from(-1)));
  }

  #[test]
  fn errors() {
    assert_eq!(value("1 / 0"), Err(EvalError::Num(NumError::DivisionByZero)));
    assert_eq!(value("2 ** -1"), Err(EvalError::Num(NumError::NegativeExponent)));
    assert_eq!(value("-1 & 1"), Err(EvalError::NegativeOperand(BinaryOp::And)));
    assert_eq!(value("x"), Err(EvalError::UnboundVar("x".into())));
    assert_eq!(value("sqrt(4)"), Err(EvalError::UnknownFn("sqrt".into())));
    assert_eq!(
      value("abs(1, 2)"),
      Err(EvalError::BadArgCount { name: "abs".into(), expected: 1, got: 2 })
    );
    assert_eq!(value("1 << 100000000"), Err(EvalError::TooLarge));
    assert_eq!(value("3 ** 100000000"), Err(EvalError::TooLarge));
    assert_eq!(value("1 ** 100000000000000000000"), Ok(Int::from(1)));
    assert_eq!(value("(-1) ** 100000000000000000001"), Ok(Int::from(-1)));
    assert_eq!(value("random(2, 1)"), Err(EvalError::Num(NumError::EmptyRange)));
  }

  #[test]
  fn size_limits() {
    assert_eq!(value("3 ** 12000000"), Err(EvalError::TooLarge));
    assert_eq!(value("3 ** 166000"), Err(EvalError::TooLarge));
    assert_eq!(value("bits(3 ** 165000)"), Ok(Int::from(261519)));
    assert_eq!(value("bits(2 ** 262143)"), Ok(Int::from(262144)));
    assert_eq!(value("2 ** 262144"), Err(EvalError::TooLarge));
    assert_eq!(value("bits(1 << 262143)"), Ok(Int::from(262144)));
    assert_eq!(value("1 << 262144"), Err(EvalError::TooLarge));
    assert_eq!(value("0 << 20000000"), Ok(Int::ZERO));
    assert_eq!(value("0 << 100000000000000000000"), Ok(Int::ZERO));
  }

  #[test]
  fn variables_persist() {
    let mut evaluator = Evaluator::new(ChaCha8Rng::seed_from_u64(0));
    assert_eq!(run(&mut evaluator, "x = 6"), Ok(Output::Assigned("x".into(), Int::from(6))));
    assert_eq!(run(&mut evaluator, "y = x * 7"), Ok(Output::Assigned("y".into(), Int::from(42))));
    assert_eq!(run(&mut evaluator, "y - x"), Ok(Output::Value(Int::from(36))));
    assert_eq!(evaluator.vars().keys().collect::<Vec<_>>(), ["x", "y"]);
  }

  #[test]
  fn random_calls_stay_in_range() {
    let mut evaluator = Evaluator::new(ChaCha8Rng::seed_from_u64(1));
    for _ in 0..100 {
      let Ok(Output::Value(n)) = run(&mut evaluator, "random(-10, 10)") else { panic!() };
      assert!(Int::from(-10) <= n && n <= Int::from(10));
    }
  }
}
