pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod repl;

mod bn_cli;
mod common;

pub use bn_cli::*;
pub use common::*;
