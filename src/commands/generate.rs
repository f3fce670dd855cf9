//! Generate a revision file from a template.
//!
//! Runs the whole pipeline: resolve the three arguments, read the four git
//! facts from the repository, substitute the placeholders in the source
//! template, and write the destination file.
//!
//! # Examples
//!
//! ```bash
//! # Stamp src/version.rs from a template in the current repository
//! gitrev . src/version.rs.in src/version.rs
//!
//! # Repository elsewhere (a trailing separator is accepted)
//! gitrev ../other-repo/ templates/rev.h.in include/rev.h
//! ```

use std::fs::{
    self,
    File,
};
use std::io::{
    self,
    Write,
};
use std::path::{
    Path,
    PathBuf,
};

use clap::Parser;
use tempfile::NamedTempFile;

use crate::error::GitRevError;
use crate::git::{
    GitQuery,
    RepositoryFacts,
};
use crate::template::{
    TimestampFacts,
    substitute,
};

/// Arguments for `gitrev`.
///
/// Exactly three positional values; there are no flags.
#[derive(Parser, Debug)]
#[command(
    name = "gitrev",
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct GenerateArgs {
    /// Path to the git working tree.
    ///
    /// Relative paths are resolved against the directory `gitrev` was started
    /// in. One trailing path separator is removed.
    #[arg(allow_hyphen_values = true)]
    repository_path: String,

    /// Template file containing the placeholders.
    #[arg(allow_hyphen_values = true)]
    source_file: PathBuf,

    /// File to write. Its directory must already exist.
    #[arg(allow_hyphen_values = true)]
    destination_file: PathBuf,
}

impl GenerateArgs {
    /// Parse a full argument list, program name first.
    ///
    /// # Errors
    ///
    /// Any argument list that is not exactly three values is reported as
    /// [`GitRevError::Argument`].
    pub fn try_from_args<I, T>(args: I) -> Result<Self, GitRevError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        // clap swallows a `--` separator, so count the raw values first.
        let args: Vec<std::ffi::OsString> = args.into_iter().map(Into::into).collect();
        if args.len() != 4 {
            return Err(GitRevError::Argument);
        }
        Self::try_parse_from(args).map_err(|_| GitRevError::Argument)
    }

    /// Resolve against the starting working directory.
    pub fn resolve(self, cwd: &Path) -> Invocation {
        Invocation::new(
            &self.repository_path,
            self.source_file,
            self.destination_file,
            cwd,
        )
    }
}

/// Fully resolved inputs of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// Absolute repository path.
    pub repository: PathBuf,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl Invocation {
    pub fn new(
        repository: &str,
        source: impl Into<PathBuf>,
        destination: impl Into<PathBuf>,
        cwd: &Path,
    ) -> Self {
        Self {
            repository: cwd.join(strip_trailing_separator(repository)),
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Remove one trailing path separator.
///
/// A path that consists of a single separator (the root) is left alone.
pub fn strip_trailing_separator(path: &str) -> &str {
    let mut chars = path.chars();
    match chars.next_back() {
        Some(c) if std::path::is_separator(c) && !chars.as_str().is_empty() => chars.as_str(),
        _ => path,
    }
}

/// Settings for [`generate`].
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    pub git: GitQuery,
}

/// Run the pipeline for one invocation.
///
/// Stages run in order and the first failure stops the run:
///
/// 1. Switch into the repository and query the short id, the revision count,
///    the branch and the describe label. The working directory is restored
///    afterwards whether or not the queries succeed.
/// 2. Read the source template.
/// 3. Substitute the placeholders (see [`crate::template`]).
/// 4. Write the destination through a temporary file in the same directory,
///    so the destination is either fully written or left untouched.
///
/// # Errors
///
/// Returns:
/// - [`GitRevError::Git`] if the repository cannot be entered or any query
///   fails
/// - [`GitRevError::SourceFile`] if the template cannot be read as UTF-8 text
/// - [`GitRevError::HandleFile`] if the destination cannot be written
///
/// # Examples
///
/// ```no_run
/// use gitrev::commands::{
///     GenerateOptions,
///     Invocation,
///     generate,
/// };
///
/// let cwd = std::env::current_dir()?;
/// let invocation = Invocation::new(".", "src/rev.rs.in", "src/rev.rs", &cwd);
/// generate(&invocation, &GenerateOptions::default())?;
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn generate(invocation: &Invocation, options: &GenerateOptions) -> Result<(), GitRevError> {
    let mut logger = cargo_plugin_utils::logger::Logger::new();

    logger.status("Querying", &invocation.repository.display().to_string());
    let facts = RepositoryFacts::query_in(&invocation.repository, &options.git);
    logger.finish();
    let facts = facts?;

    logger.status("Reading", &invocation.source.display().to_string());
    let template = fs::read_to_string(&invocation.source).map_err(GitRevError::SourceFile);
    logger.finish();
    let template = template?;

    let output = substitute(&template, &facts, &TimestampFacts::now());

    logger.status("Writing", &invocation.destination.display().to_string());
    let written =
        write_destination(&invocation.destination, &output).map_err(GitRevError::HandleFile);
    logger.finish();
    written
}

fn write_destination(destination: &Path, contents: &str) -> io::Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    match fs::metadata(destination) {
        Ok(metadata) => file.as_file().set_permissions(metadata.permissions())?,
        Err(_) => set_default_permissions(file.as_file())?,
    }
    file.persist(destination).map_err(|e| e.error)?;
    Ok(())
}

// Temporary files are created owner-only; a new destination should look like
// any other file the build writes.
#[cfg(unix)]
fn set_default_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_default_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}
