//! # addheader
//!
//! A tool that ensures source code files have copyright license headers.

use std::process::ExitCode;

use addheader::cli::{Cli, run};

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse_args();

  match run(cli).await {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(e) => {
      eprintln!("Error: {:#}", e);
      ExitCode::FAILURE
    }
  }
}
