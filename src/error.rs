//! Error taxonomy for a `gitrev` run.
//!
//! A run reports exactly one [`ErrorType`]. The stages are checked in order
//! (arguments, git, source file, destination file) and the first failure
//! aborts the pipeline.

use std::io;

use thiserror::Error;

use crate::git::QueryError;

/// Outcome category of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// The run succeeded.
    None,
    /// Missing or extra command-line arguments.
    Argument,
    /// One of the four git queries failed.
    Git,
    /// The source template could not be read.
    SourceFile,
    /// The destination file could not be written.
    HandleFile,
}

impl ErrorType {
    /// Category reported for the result of a run.
    pub fn of(result: &Result<(), GitRevError>) -> Self {
        match result {
            Ok(()) => ErrorType::None,
            Err(e) => e.error_type(),
        }
    }

    /// Process exit code: 0 for success, 1 for any failure.
    pub fn exit_code(self) -> u8 {
        match self {
            ErrorType::None => 0,
            _ => 1,
        }
    }
}

/// Failure of one pipeline stage.
///
/// The `Display` text is the one-line description shown after `Error:`.
#[derive(Debug, Error)]
pub enum GitRevError {
    #[error("Invalid number of arguments")]
    Argument,

    #[error("Could not read revision information from git")]
    Git(#[source] QueryError),

    #[error("Could not read the source file")]
    SourceFile(#[source] io::Error),

    #[error("Could not write the destination file")]
    HandleFile(#[source] io::Error),
}

impl GitRevError {
    /// Category reported for this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            GitRevError::Argument => ErrorType::Argument,
            GitRevError::Git(_) => ErrorType::Git,
            GitRevError::SourceFile(_) => ErrorType::SourceFile,
            GitRevError::HandleFile(_) => ErrorType::HandleFile,
        }
    }
}

impl From<QueryError> for GitRevError {
    fn from(err: QueryError) -> Self {
        GitRevError::Git(err)
    }
}
