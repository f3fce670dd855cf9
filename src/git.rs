//! Repository queries through the `git` executable.
//!
//! The four facts are read by running `git` with the repository as the
//! process working directory. [`WorkingDirGuard`] switches into the
//! repository and switches back when dropped, so the original directory is
//! restored on every exit path.

use std::ffi::OsString;
use std::path::{
    Path,
    PathBuf,
};
use std::process::{
    Child,
    Command,
    Output,
    Stdio,
};
use std::time::{
    Duration,
    Instant,
};
use std::{
    env,
    io,
    thread,
};

use thiserror::Error;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// A git query that produced no usable output line.
///
/// Covers a missing executable, a non-zero exit, empty output and a timeout;
/// callers only need to know that the query failed.
#[derive(Debug, Error)]
#[error("git {command} failed: {reason}")]
pub struct QueryError {
    command: String,
    reason: String,
}

impl QueryError {
    fn new(args: &[&str], reason: impl Into<String>) -> Self {
        Self {
            command: args.join(" "),
            reason: reason.into(),
        }
    }
}

/// How the `git` executable is invoked.
#[derive(Debug, Clone)]
pub struct GitQuery {
    /// Executable name or path. Bare names are resolved through `PATH`.
    pub program: OsString,
    /// Upper bound for a single query. `None` waits for as long as git runs.
    pub timeout: Option<Duration>,
}

impl Default for GitQuery {
    fn default() -> Self {
        Self {
            program: OsString::from("git"),
            timeout: None,
        }
    }
}

impl GitQuery {
    /// Run `git <args>` in the current working directory and return the first
    /// line of its standard output.
    ///
    /// Anything after the first line is discarded.
    ///
    /// # Errors
    ///
    /// Returns a [`QueryError`] if the executable cannot be started, exits
    /// with a non-zero status, prints nothing, or exceeds the timeout.
    pub fn query(&self, args: &[&str]) -> Result<String, QueryError> {
        let mut command = Command::new(&self.program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let output = match self.timeout {
            None => command.output(),
            Some(limit) => command
                .spawn()
                .and_then(|child| wait_with_timeout(child, limit)),
        }
        .map_err(|e| QueryError::new(args, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.lines().next() {
                Some(line) if !line.trim().is_empty() => line.trim().to_string(),
                _ => format!("exited with {}", output.status),
            };
            return Err(QueryError::new(args, reason));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        stdout
            .lines()
            .next()
            .map(ToString::to_string)
            .ok_or_else(|| QueryError::new(args, "no output"))
    }
}

fn wait_with_timeout(mut child: Child, limit: Duration) -> io::Result<Output> {
    let started = Instant::now();
    loop {
        if child.try_wait()?.is_some() {
            return child.wait_with_output();
        }
        if started.elapsed() >= limit {
            child.kill()?;
            child.wait()?;
            return Err(io::Error::new(
                io::ErrorKind::TimedOut,
                format!("timed out after {:?}", limit),
            ));
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Revision information read from a repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFacts {
    /// Number of commits reachable from any ref.
    ///
    /// Only comparable between builds made from the same repository history;
    /// it is not a linear revision number.
    pub revision_count: String,
    /// Abbreviated id of the checked-out commit.
    pub short_id: String,
    /// Abbreviated branch name, or `HEAD` when detached.
    pub branch: String,
    /// `git describe --all --tags` label of the checked-out commit.
    pub tag: String,
}

impl RepositoryFacts {
    /// Query all four facts from the repository in the current working
    /// directory.
    ///
    /// Fails on the first query that fails; no partial facts are returned.
    pub fn query(git: &GitQuery) -> Result<Self, QueryError> {
        let short_id = git.query(&["log", "-n1", "--format=%h"])?;
        let revision_count = git.query(&["rev-list", "--count", "--all"])?;
        let branch = git.query(&["rev-parse", "--abbrev-ref", "HEAD"])?;
        let tag = git.query(&["describe", "--all", "--tags", "HEAD"])?;

        Ok(Self {
            revision_count,
            short_id,
            branch,
            tag,
        })
    }

    /// Switch into `repository`, query the facts, and switch back.
    ///
    /// A repository directory that does not exist is reported as a failed
    /// query.
    pub fn query_in(repository: &Path, git: &GitQuery) -> Result<Self, QueryError> {
        let _guard = WorkingDirGuard::enter(repository).map_err(|e| QueryError {
            command: format!("-C {}", repository.display()),
            reason: e.to_string(),
        })?;
        Self::query(git)
    }
}

/// Changes the process working directory and restores it on drop.
#[derive(Debug)]
pub struct WorkingDirGuard {
    original: PathBuf,
}

impl WorkingDirGuard {
    /// Remember the current working directory and switch to `dir`.
    ///
    /// # Errors
    ///
    /// Fails if the current directory cannot be read or `dir` cannot be
    /// entered. The working directory is unchanged in that case.
    pub fn enter(dir: &Path) -> io::Result<Self> {
        let original = env::current_dir()?;
        env::set_current_dir(dir)?;
        Ok(Self { original })
    }
}

impl Drop for WorkingDirGuard {
    fn drop(&mut self) {
        if let Err(e) = env::set_current_dir(&self.original) {
            eprintln!(
                "⚠️  Warning: Failed to restore working directory {}: {}",
                self.original.display(),
                e
            );
        }
    }
}
