//! Throwaway git repositories for unit tests.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run `git <args>` in `dir`, panicking on failure, and return trimmed stdout.
pub fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {:?} failed", args);
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Repository on branch `main` with `commits` commits.
pub fn create_test_git_repo(commits: usize) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    git(dir.path(), &["init"]);
    git(dir.path(), &["config", "user.email", "test@example.com"]);
    git(dir.path(), &["config", "user.name", "Test User"]);
    git(dir.path(), &["config", "commit.gpgsign", "false"]);
    git(dir.path(), &["config", "tag.gpgsign", "false"]);
    git(dir.path(), &["symbolic-ref", "HEAD", "refs/heads/main"]);

    for i in 0..commits {
        let file_name = format!("file_{}.txt", i);
        std::fs::write(dir.path().join(&file_name), i.to_string()).unwrap();
        git(dir.path(), &["add", &file_name]);
        git(dir.path(), &["commit", "-m", &format!("Commit {}", i)]);
    }

    dir
}
