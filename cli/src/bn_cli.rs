use std::io::{self, BufRead, IsTerminal};

use anyhow::{anyhow, Context, Result};
use bignum::{Int, IntRange, Nat, NumError};
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::{generate, Shell};
use log::warn;
use rand::distributions::Distribution;
use rustyline::{error::ReadlineError, DefaultEditor};

use crate::{
  common::{format_int, make_rng, parse_radix},
  eval::{Evaluator, Output},
  parser::CalcParser,
  repl::Repl,
};

#[derive(Debug, Parser)]
#[command(name = "bn", version, about = "Arbitrary-precision integer calculator", propagate_version = true)]
pub struct BnCli {
  /// Radix results are printed in
  #[arg(long, short, global = true, env = "BN_RADIX", default_value = "10", value_parser = parse_radix)]
  radix: u32,
  #[command(subcommand)]
  command: BnCommand,
}

impl BnCli {
  pub fn execute() -> Result<()> {
    let BnCli { radix, command } = Self::parse();
    match command {
      BnCommand::Eval(eval) => eval.execute(radix),
      BnCommand::Repl(repl) => repl.execute(radix),
      BnCommand::Convert(convert) => convert.execute(radix),
      BnCommand::Random(random) => random.execute(radix),
      BnCommand::Bytes(bytes) => bytes.execute(),
      BnCommand::Completion(completion) => completion.execute(),
    }
  }
}

#[derive(Debug, Subcommand)]
pub enum BnCommand {
  #[command(about = "Evaluate a single expression")]
  Eval(EvalCommand),
  #[command(about = "Start an interactive session")]
  Repl(ReplCommand),
  #[command(about = "Convert an integer between radices")]
  Convert(ConvertCommand),
  #[command(about = "Draw uniformly random integers from an inclusive range")]
  Random(RandomCommand),
  #[command(about = "Encode a natural number as a fixed-length byte buffer")]
  Bytes(BytesCommand),
  #[command(about = "Print a shell completion script")]
  Completion(CompletionCommand),
}

#[derive(Debug, Args)]
pub struct EvalCommand {
  #[arg(allow_hyphen_values = true)]
  expr: String,
  /// Seed for `random(..)` calls
  #[arg(long)]
  seed: Option<u64>,
}

impl EvalCommand {
  pub fn execute(self, radix: u32) -> Result<()> {
    let stmt = CalcParser::parse(&self.expr)
      .map_err(|err| anyhow!("{err}"))?
      .ok_or_else(|| anyhow!("nothing to evaluate"))?;
    let (Output::Value(value) | Output::Assigned(_, value)) =
      Evaluator::new(make_rng(self.seed)).exec(stmt)?;
    println!("{}", format_int(&value, radix)?);
    Ok(())
  }
}

#[derive(Debug, Args)]
pub struct ReplCommand {
  /// Read lines from stdin and print each one before its result
  #[arg(long)]
  echo: bool,
  /// Seed for `random(..)` calls
  #[arg(long)]
  seed: Option<u64>,
}

impl ReplCommand {
  pub fn execute(self, radix: u32) -> Result<()> {
    let mut repl = Repl::new(make_rng(self.seed), radix);
    if self.echo || !io::stdin().is_terminal() {
      for line in io::stdin().lock().lines() {
        let line = line?;
        if self.echo {
          println!("> {line}");
        }
        if let Some(out) = repl.exec(&line) {
          println!("{out}");
        }
      }
      return Ok(());
    }
    let mut editor = DefaultEditor::new()?;
    loop {
      match editor.readline("> ") {
        Ok(line) => {
          _ = editor.add_history_entry(line.as_str());
          if let Some(out) = repl.exec(&line) {
            println!("{out}");
          }
        }
        Err(ReadlineError::Interrupted | ReadlineError::Eof) => return Ok(()),
        Err(err) => return Err(err.into()),
      }
    }
  }
}

#[derive(Debug, Args)]
pub struct ConvertCommand {
  #[arg(allow_hyphen_values = true)]
  number: String,
  /// Radix of the input; a `0x` or `0b` prefix is detected when omitted
  #[arg(long, value_parser = parse_radix)]
  from: Option<u32>,
  /// Radix of the output; defaults to `--radix`
  #[arg(long, value_parser = parse_radix)]
  to: Option<u32>,
  /// Left-pad the digits with zeros to at least this many
  #[arg(long, default_value = "1")]
  min_digits: usize,
}

impl ConvertCommand {
  pub fn execute(self, radix: u32) -> Result<()> {
    let value = match self.from {
      None => self.number.parse::<Int>(),
      Some(from) => match Int::parse_radix(&self.number, from)? {
        (value, consumed) if consumed != 0 && consumed == self.number.len() => Ok(value),
        (_, consumed) => Err(NumError::InvalidDigits { consumed, len: self.number.len() }),
      },
    }
    .with_context(|| format!("cannot parse `{}`", self.number))?;
    println!("{}", value.to_str_radix(self.to.unwrap_or(radix), self.min_digits)?);
    Ok(())
  }
}

#[derive(Debug, Args)]
pub struct RandomCommand {
  #[arg(allow_hyphen_values = true)]
  low: String,
  #[arg(allow_hyphen_values = true)]
  high: String,
  /// How many values to draw
  #[arg(long, short = 'n', default_value = "1")]
  count: usize,
  #[arg(long)]
  seed: Option<u64>,
}

impl RandomCommand {
  pub fn execute(self, radix: u32) -> Result<()> {
    let low: Int = self.low.parse().with_context(|| format!("cannot parse `{}`", self.low))?;
    let high: Int = self.high.parse().with_context(|| format!("cannot parse `{}`", self.high))?;
    let range = IntRange::new(low, high)?;
    let mut rng = make_rng(self.seed);
    for _ in 0..self.count {
      println!("{}", format_int(&range.sample(&mut rng), radix)?);
    }
    Ok(())
  }
}

#[derive(Debug, Args)]
pub struct BytesCommand {
  number: String,
  /// Length of the buffer
  #[arg(long, short)]
  len: usize,
  /// Write the least significant byte first
  #[arg(long)]
  le: bool,
  /// Fail instead of dropping high-order bytes that do not fit
  #[arg(long)]
  strict: bool,
}

impl BytesCommand {
  pub fn execute(self) -> Result<()> {
    let value: Nat = self.number.parse().with_context(|| format!("cannot parse `{}`", self.number))?;
    let mut buf = vec![0; self.len];
    match (self.le, self.strict) {
      (false, true) => value.try_write_be(&mut buf)?,
      (true, true) => value.try_write_le(&mut buf)?,
      (le, false) => {
        if value.bytes() > self.len {
          warn!("{value} needs {} bytes; keeping the low {}", value.bytes(), self.len);
        }
        if le {
          value.write_le(&mut buf)
        } else {
          value.write_be(&mut buf)
        }
      }
    }
    println!("{}", buf.iter().map(|b| format!("{b:02x}")).collect::<Vec<_>>().join(" "));
    Ok(())
  }
}

#[derive(Debug, Args)]
pub struct CompletionCommand {
  shell: Shell,
}

impl CompletionCommand {
  pub fn execute(self) -> Result<()> {
    generate(self.shell, &mut BnCli::command(), "bn", &mut io::stdout());
    Ok(())
  }
}
