//! Stamp git revision information into a text file.
//!
//! ```text
//! gitrev <RepositoryPath> <SourceFile> <DestinationFile>
//! ```
//!
//! Exits with 0 on success and 1 on any failure. On failure the usage text
//! and a one-line error description are printed.

use std::env;
use std::io;
use std::process::ExitCode;

use anyhow::{
    Context,
    Result,
};
use gitrev::commands::{
    self,
    GenerateArgs,
    GenerateOptions,
};
use gitrev::error::ErrorType;
use gitrev::usage;

fn main() -> Result<ExitCode> {
    let mut stdout = io::stdout();
    usage::print_banner(&mut stdout)?;

    // Resolve relative repository paths before anything changes directory.
    let cwd = env::current_dir().context("Failed to read current directory")?;

    let result = GenerateArgs::try_from_args(env::args_os())
        .map(|args| args.resolve(&cwd))
        .and_then(|invocation| commands::generate(&invocation, &GenerateOptions::default()));

    match &result {
        Ok(()) => println!("Done!"),
        Err(e) => usage::print_failure(&mut stdout, &e.to_string())?,
    }

    Ok(ExitCode::from(ErrorType::of(&result).exit_code()))
}
