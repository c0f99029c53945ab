use std::fmt::{self, Display};

use bignum::Nat;

use crate::lexer::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
  Assign(String, Expr),
  Expr(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expr {
  Num(Nat),
  Var(String),
  Neg(Box<Expr>),
  Binary(BinaryOp, Box<Expr>, Box<Expr>),
  Call(String, Vec<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
  Or,
  Xor,
  And,
  Shl,
  Shr,
  Add,
  Sub,
  Mul,
  Div,
  Rem,
  Pow,
}

impl BinaryOp {
  pub const ALL: [BinaryOp; 11] = [
    BinaryOp::Or,
    BinaryOp::Xor,
    BinaryOp::And,
    BinaryOp::Shl,
    BinaryOp::Shr,
    BinaryOp::Add,
    BinaryOp::Sub,
    BinaryOp::Mul,
    BinaryOp::Div,
    BinaryOp::Rem,
    BinaryOp::Pow,
  ];

  pub fn token(self) -> Token {
    match self {
      BinaryOp::Or => Token::Or,
      BinaryOp::Xor => Token::Caret,
      BinaryOp::And => Token::And,
      BinaryOp::Shl => Token::Shl,
      BinaryOp::Shr => Token::Shr,
      BinaryOp::Add => Token::Plus,
      BinaryOp::Sub => Token::Minus,
      BinaryOp::Mul => Token::Star,
      BinaryOp::Div => Token::Slash,
      BinaryOp::Rem => Token::Percent,
      BinaryOp::Pow => Token::StarStar,
    }
  }

  /// Binding power; higher binds tighter.
  pub fn precedence(self) -> u8 {
    match self {
      BinaryOp::Or => 1,
      BinaryOp::Xor => 2,
      BinaryOp::And => 3,
      BinaryOp::Shl | BinaryOp::Shr => 4,
      BinaryOp::Add | BinaryOp::Sub => 5,
      BinaryOp::Mul | BinaryOp::Div | BinaryOp::Rem => 6,
      BinaryOp::Pow => 8,
    }
  }

  pub fn right_associative(self) -> bool {
    self == BinaryOp::Pow
  }

  pub fn as_str(self) -> &'static str {
    match self {
      BinaryOp::Or => "|",
      BinaryOp::Xor => "^",
      BinaryOp::And => "&",
      BinaryOp::Shl => "<<",
      BinaryOp::Shr => ">>",
      BinaryOp::Add => "+",
      BinaryOp::Sub => "-",
      BinaryOp::Mul => "*",
      BinaryOp::Div => "/",
      BinaryOp::Rem => "%",
      BinaryOp::Pow => "**",
    }
  }
}

impl Display for BinaryOp {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}
