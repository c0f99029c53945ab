use std::fmt::{self, Display};

use bignum::Nat;
use logos::{Lexer, Logos};

use crate::{
  ast::{BinaryOp, Expr, Stmt},
  lexer::{Token, TokenSet},
};

/// Unary minus binds looser than `**`, so `-2 ** 2` is `-4`.
const NEG_PRECEDENCE: u8 = 7;

pub struct CalcParser<'src> {
  lexer: Lexer<'src, Token>,
  token: Option<Token>,
  expected: TokenSet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<'src> {
  LexError(&'src str),
  UnexpectedToken { expected: TokenSet, found: Option<&'src str> },
  InvalidNum(&'src str),
}

impl Display for ParseError<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ParseError::LexError(found) => write!(f, "unexpected character `{found}`"),
      ParseError::UnexpectedToken { expected, found: Some(found) } => {
        write!(f, "expected one of {expected}; found `{found}`")
      }
      ParseError::UnexpectedToken { expected, found: None } => {
        write!(f, "expected one of {expected}; found end of input")
      }
      ParseError::InvalidNum(num) => write!(f, "invalid numeric literal `{num}`"),
    }
  }
}

type Parse<'src, T = ()> = Result<T, ParseError<'src>>;

pub struct Delimiters {
  pub open: Option<Token>,
  pub close: Option<Token>,
  pub separator: Option<Token>,
}

impl<'src> CalcParser<'src> {
  /// Parses one line; a line holding only whitespace and comments yields
  /// `None`.
  pub fn parse(src: &'src str) -> Parse<'src, Option<Stmt>> {
    let mut parser = CalcParser { lexer: Token::lexer(src), token: None, expected: TokenSet::default() };
    parser.bump()?;
    if parser.token.is_none() {
      return Ok(None);
    }
    let stmt = parser.parse_stmt()?;
    if parser.token.is_some() {
      return parser.unexpected();
    }
    Ok(Some(stmt))
  }

  fn bump(&mut self) -> Parse<'src> {
    self.expected.reset();
    self.token = match self.lexer.next() {
      None => None,
      Some(Ok(token)) => Some(token),
      Some(Err(())) => return Err(ParseError::LexError(self.lexer.slice())),
    };
    Ok(())
  }

  fn check(&mut self, kind: Token) -> bool {
    self.expected.add(kind);
    self.token == Some(kind)
  }

  fn eat(&mut self, kind: Token) -> Parse<'src, bool> {
    let matches = self.check(kind);
    if matches {
      self.bump()?;
    }
    Ok(matches)
  }

  fn expect(&mut self, kind: Token) -> Parse<'src, &'src str> {
    if self.check(kind) {
      let token = self.lexer.slice();
      self.bump()?;
      Ok(token)
    } else {
      self.unexpected()
    }
  }

  fn unexpected<T>(&self) -> Parse<'src, T> {
    Err(ParseError::UnexpectedToken {
      expected: self.expected,
      found: self.token.is_some().then(|| self.lexer.slice()),
    })
  }

  fn parse_delimited<T>(
    &mut self,
    delims: Delimiters,
    mut parse_el: impl FnMut(&mut Self) -> Parse<'src, T>,
  ) -> Parse<'src, Vec<T>> {
    if let Some(open) = delims.open {
      self.expect(open)?;
    }
    let mut items = Vec::new();
    loop {
      if delims.close.is_some_and(|close| self.check(close)) {
        break;
      }
      items.push(parse_el(self)?);
      if let Some(separator) = delims.separator {
        if !self.eat(separator)? {
          break;
        }
      }
      if delims.separator.is_none() && delims.close.is_none() {
        break;
      }
    }
    if let Some(close) = delims.close {
      self.expect(close)?;
    }
    Ok(items)
  }

  fn parse_stmt(&mut self) -> Parse<'src, Stmt> {
    if self.check(Token::Ident) {
      let mut peek = self.lexer.clone();
      if let Some(Ok(Token::Eq)) = peek.next() {
        let name = self.expect(Token::Ident)?.to_owned();
        self.expect(Token::Eq)?;
        return Ok(Stmt::Assign(name, self.parse_expr()?));
      }
    }
    Ok(Stmt::Expr(self.parse_expr()?))
  }

  pub fn parse_expr(&mut self) -> Parse<'src, Expr> {
    self.parse_expr_bp(0)
  }

  fn parse_expr_bp(&mut self, min_precedence: u8) -> Parse<'src, Expr> {
    let mut lhs = self.parse_prefix()?;
    while let Some(op) = self.check_binary_op() {
      let precedence = op.precedence();
      if precedence < min_precedence {
        break;
      }
      self.bump()?;
      let next = if op.right_associative() { precedence } else { precedence + 1 };
      let rhs = self.parse_expr_bp(next)?;
      lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
    }
    Ok(lhs)
  }

  fn check_binary_op(&mut self) -> Option<BinaryOp> {
    let mut found = None;
    for op in BinaryOp::ALL {
      if self.check(op.token()) {
        found = Some(op);
      }
    }
    found
  }

  fn parse_prefix(&mut self) -> Parse<'src, Expr> {
    if self.eat(Token::Minus)? {
      return Ok(Expr::Neg(Box::new(self.parse_expr_bp(NEG_PRECEDENCE)?)));
    }
    self.parse_atom()
  }

  fn parse_atom(&mut self) -> Parse<'src, Expr> {
    if self.check(Token::Num) {
      let token = self.expect(Token::Num)?;
      return Ok(Expr::Num(token.parse::<Nat>().map_err(|_| ParseError::InvalidNum(token))?));
    }

    if self.check(Token::Ident) {
      let name = self.expect(Token::Ident)?.to_owned();
      if self.check(Token::OpenParen) {
        let args = self.parse_delimited(
          Delimiters {
            open: Some(Token::OpenParen),
            close: Some(Token::CloseParen),
            separator: Some(Token::Comma),
          },
          Self::parse_expr,
        )?;
        return Ok(Expr::Call(name, args));
      }
      return Ok(Expr::Var(name));
    }

    if self.eat(Token::OpenParen)? {
      let expr = self.parse_expr()?;
      self.expect(Token::CloseParen)?;
      return Ok(expr);
    }

    self.unexpected()
  }
}
