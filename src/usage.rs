//! Console banner and usage text.

use std::io::Write;

use anyhow::{
    Context,
    Result,
};

/// Usage block printed before the error line of a failed run.
pub const USAGE: &str = "\
Usage: gitrev <RepositoryPath> <SourceFile> <DestinationFile>

Reads SourceFile, replaces the placeholders below with information from the
git repository at RepositoryPath, and writes the result to DestinationFile.

Placeholders:
  $WCREV$      Revision number (number of commits on all refs)
  $WCREVNUM$   Revision number (same as $WCREV$)
  $WCREVID$    Abbreviated id of the current commit
  $WCBRANCH$   Current branch name (HEAD when detached)
  $WCTAG$      Tag or ref describing the current commit
  $WCDATE$     Current date and time (UTC, ISO 8601)
  $WCDATE2$    Current date (UTC, YYYY-MM-DD)
  $WCYEAR$     Current year (UTC, YYYY)";

/// `gitrev <version>`.
pub fn banner() -> String {
    format!("gitrev {}", env!("CARGO_PKG_VERSION"))
}

/// Write the banner line followed by a blank line.
pub fn print_banner(out: &mut impl Write) -> Result<()> {
    writeln!(out, "{}", banner()).context("Failed to write banner")?;
    writeln!(out).context("Failed to write banner")?;
    Ok(())
}

/// Write the usage block and the one-line error description.
pub fn print_failure(out: &mut impl Write, description: &str) -> Result<()> {
    writeln!(out, "{}", USAGE).context("Failed to write usage")?;
    writeln!(out).context("Failed to write usage")?;
    writeln!(out, "Error: {}", description).context("Failed to write error")?;
    Ok(())
}
