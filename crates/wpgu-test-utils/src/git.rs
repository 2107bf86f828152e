//! Git repository fixtures.
//!
//! All helpers drive the `git` CLI so the repositories look exactly like
//! the ones the updater shells out against.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Run `git` in `path` and return trimmed stdout.
///
/// # Panics
/// Panics if git cannot be spawned or exits non-zero.
pub fn git(path: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(path)
        .output()
        .unwrap_or_else(|e| panic!("failed to run `git {args:?}`: {e}"));
    if !output.status.success() {
        panic!(
            "`git {args:?}` failed in {}:\n{}",
            path.display(),
            String::from_utf8_lossy(&output.stderr)
        );
    }
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Initialises a real git repository with an initial commit on `main`.
///
/// - Runs `git init`
/// - Configures `user.email`, `user.name`, and `commit.gpgsign = false`
/// - Commits a `README.md`
/// - Renames the default branch to `main`
///
/// # Panics
/// Panics if any git operation fails.
pub fn real_git_repo_with_commit(path: &Path) {
    git(path, &["init"]);
    git(path, &["config", "user.email", "test@test.com"]);
    git(path, &["config", "user.name", "Test User"]);
    git(path, &["config", "commit.gpgsign", "false"]);

    fs::write(path.join("README.md"), "# Test site")
        .unwrap_or_else(|e| panic!("real_git_repo_with_commit: failed to write README.md: {e}"));

    git(path, &["add", "."]);
    git(path, &["commit", "-m", "Initial commit"]);
    git(path, &["branch", "-M", "main"]);
}

/// Commit everything in the working tree.
pub fn commit_all(path: &Path, message: &str) {
    git(path, &["add", "-A", "."]);
    git(path, &["commit", "-m", message]);
}

/// Create a bare repository at `bare` and register it as `origin` of `path`,
/// pushing the current branch.
///
/// Returns the bare repository path.
pub fn attach_bare_origin(path: &Path, bare: &Path) -> PathBuf {
    fs::create_dir_all(bare)
        .unwrap_or_else(|e| panic!("attach_bare_origin: failed to create {}: {e}", bare.display()));
    git(bare, &["init", "--bare"]);
    let url = bare.to_string_lossy().to_string();
    git(path, &["remote", "add", "origin", &url]);
    git(path, &["push", "-u", "origin", "HEAD"]);
    bare.to_path_buf()
}

/// Whether `branch` exists in the bare repository at `bare`.
pub fn remote_has_branch(bare: &Path, branch: &str) -> bool {
    Command::new("git")
        .args(["show-ref", "--verify", "--quiet", &format!("refs/heads/{branch}")])
        .current_dir(bare)
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Number of commits reachable from `rev`.
pub fn commit_count(path: &Path, rev: &str) -> usize {
    git(path, &["rev-list", "--count", rev])
        .parse()
        .unwrap_or_else(|e| panic!("commit_count: unexpected rev-list output: {e}"))
}

/// Open the repository with `git2`, for assertions on refs and HEAD.
pub fn open(path: &Path) -> git2::Repository {
    git2::Repository::open(path)
        .unwrap_or_else(|e| panic!("failed to open repository at {}: {e}", path.display()))
}
