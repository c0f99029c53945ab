use std::fmt::{self, Display};

use rand_chacha::ChaCha8Rng;

use crate::{
  common::{format_int, parse_radix},
  eval::{Evaluator, Output},
  parser::CalcParser,
};

/// A calculator session: variables persist from one line to the next.
pub struct Repl {
  evaluator: Evaluator,
  radix: u32,
}

impl Repl {
  pub fn new(rng: ChaCha8Rng, radix: u32) -> Self {
    Repl { evaluator: Evaluator::new(rng), radix }
  }

  /// Executes one line, returning what should be printed for it.
  pub fn exec(&mut self, line: &str) -> Option<String> {
    if let Some(command) = line.trim().strip_prefix(':') {
      return Some(self.exec_command(command));
    }
    let stmt = match CalcParser::parse(line) {
      Ok(None) => return None,
      Ok(Some(stmt)) => stmt,
      Err(err) => return Some(format!("error: {err}")),
    };
    let result = self.evaluator.exec(stmt).map_err(|err| err.to_string()).and_then(|output| {
      let (name, value) = match &output {
        Output::Value(value) => ("", value),
        Output::Assigned(name, value) => (name.as_str(), value),
      };
      let value = format_int(value, self.radix).map_err(|err| err.to_string())?;
      Ok(if name.is_empty() { format!("= {value}") } else { format!("{name} = {value}") })
    });
    Some(result.unwrap_or_else(|err| format!("error: {err}")))
  }

  fn exec_command(&mut self, command: &str) -> String {
    let mut words = command.split_whitespace();
    match (words.next(), words.next(), words.next()) {
      (Some("vars"), None, _) => self.to_string(),
      (Some("radix"), None, _) => format!("radix = {}", self.radix),
      (Some("radix"), Some(radix), None) => match parse_radix(radix) {
        Ok(radix) => {
          self.radix = radix;
          format!("radix = {radix}")
        }
        Err(err) => format!("error: {err}"),
      },
      _ => format!("error: unknown command `:{}`", command.trim()),
    }
  }
}

impl Display for Repl {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut first = true;
    for (name, value) in self.evaluator.vars() {
      if !first {
        writeln!(f)?;
      }
      first = false;
      match format_int(value, self.radix) {
        Ok(value) => write!(f, "{name} = {value}")?,
        Err(_) => write!(f, "{name} = {value}")?,
      }
    }
    Ok(())
  }
}
