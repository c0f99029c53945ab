use anyhow::Result;
use bignum_cli::BnCli;

fn main() -> Result<()> {
  env_logger::init();
  BnCli::execute()
}
