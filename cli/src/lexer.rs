use std::fmt::{self, Debug, Display};

use logos::Logos;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[logos(skip r"[ \t\r\n\f]+|#[^\n]*")]
#[repr(u8)]
pub enum Token {
  #[token("(")]
  OpenParen,
  #[token(")")]
  CloseParen,
  #[token(",")]
  Comma,
  #[token("=")]
  Eq,

  #[token("+")]
  Plus,
  #[token("-")]
  Minus,
  #[token("*")]
  Star,
  #[token("**")]
  StarStar,
  #[token("/")]
  Slash,
  #[token("%")]
  Percent,
  #[token("&")]
  And,
  #[token("|")]
  Or,
  #[token("^")]
  Caret,
  #[token("<<")]
  Shl,
  #[token(">>")]
  Shr,

  #[regex(r"[0-9][0-9A-Za-z_']*")]
  Num,
  #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
  Ident,
}

impl Token {
  const ALL: [Token; 17] = [
    Token::OpenParen,
    Token::CloseParen,
    Token::Comma,
    Token::Eq,
    Token::Plus,
    Token::Minus,
    Token::Star,
    Token::StarStar,
    Token::Slash,
    Token::Percent,
    Token::And,
    Token::Or,
    Token::Caret,
    Token::Shl,
    Token::Shr,
    Token::Num,
    Token::Ident,
  ];
}

impl Display for Token {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(match self {
      Token::OpenParen => "`(`",
      Token::CloseParen => "`)`",
      Token::Comma => "`,`",
      Token::Eq => "`=`",
      Token::Plus => "`+`",
      Token::Minus => "`-`",
      Token::Star => "`*`",
      Token::StarStar => "`**`",
      Token::Slash => "`/`",
      Token::Percent => "`%`",
      Token::And => "`&`",
      Token::Or => "`|`",
      Token::Caret => "`^`",
      Token::Shl => "`<<`",
      Token::Shr => "`>>`",
      Token::Num => "number",
      Token::Ident => "identifier",
    })
  }
}

/// The tokens a parser was willing to accept at some position.
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct TokenSet(u32);

impl TokenSet {
  pub fn reset(&mut self) {
    self.0 = 0;
  }

  pub fn add(&mut self, kind: Token) {
    self.0 |= 1 << kind as u8;
  }
}

impl IntoIterator for TokenSet {
  type Item = Token;
  type IntoIter = TokenSetIter;

  fn into_iter(self) -> Self::IntoIter {
    TokenSetIter(self.0)
  }
}

#[derive(Clone, Copy)]
pub struct TokenSetIter(u32);

impl Iterator for TokenSetIter {
  type Item = Token;

  fn next(&mut self) -> Option<Self::Item> {
    if self.0 == 0 {
      None
    } else {
      let x = self.0.trailing_zeros();
      self.0 ^= 1 << x;
      Some(Token::ALL[x as usize])
    }
  }
}

impl Debug for TokenSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_set().entries(*self).finish()
  }
}

impl Display for TokenSet {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, token) in self.into_iter().enumerate() {
      if i != 0 {
        f.write_str(", ")?;
      }
      write!(f, "{token}")?;
    }
    Ok(())
  }
}
