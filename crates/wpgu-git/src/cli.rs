//! [`GitWorkspace`] backed by the `git` executable

use std::process::{Command, Output};

use git2::Repository;
use wpgu_fs::{NormalizedPath, io};

use crate::remote::{redact_credentials, rewrite_origin_url};
use crate::workspace::{GitWorkspace, Identity};
use crate::{Error, Result};

const ORIGIN: &str = "origin";

/// Workspace for a regular (non-bare) checkout.
///
/// Mutations shell out to `git` so hooks, credential helpers and the user's
/// git configuration apply exactly as they would on the command line. Reads
/// of HEAD and remotes go through `git2`.
pub struct CliWorkspace {
    /// Repository root directory (where .git lives)
    root: NormalizedPath,
}

impl CliWorkspace {
    /// Create a workspace for the given repository root.
    ///
    /// Verifies that `.git` exists in the root directory.
    pub fn new(root: NormalizedPath) -> Result<Self> {
        if !root.join(".git").is_dir() {
            return Err(Error::NotARepository {
                path: root.to_native(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &NormalizedPath {
        &self.root
    }

    fn config_path(&self) -> NormalizedPath {
        self.root.join(".git/config")
    }

    fn backup_path(&self) -> NormalizedPath {
        self.root.join(".git/config.original")
    }

    fn open(&self) -> Result<Repository> {
        Ok(Repository::open(self.root.to_native())?)
    }

    fn describe(args: &[&str]) -> String {
        redact_credentials(&format!("git {}", args.join(" ")))
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        tracing::debug!(command = %Self::describe(args), "Running git");
        Command::new("git")
            .args(args)
            .current_dir(self.root.to_native())
            .output()
            .map_err(|source| Error::Spawn {
                command: Self::describe(args),
                source,
            })
    }

    /// Run a git command and return its trimmed stdout.
    fn git_command(&self, args: &[&str]) -> Result<String> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
        } else {
            Err(Self::failure(args, &output))
        }
    }

    fn failure(args: &[&str], output: &Output) -> Error {
        Error::CommandFailed {
            command: Self::describe(args),
            code: output.status.code(),
            stderr: redact_credentials(String::from_utf8_lossy(&output.stderr).trim()),
        }
    }
}

impl GitWorkspace for CliWorkspace {
    fn current_branch(&self) -> Result<String> {
        let repo = self.open()?;
        let head = repo.head()?;
        if !head.is_branch() {
            return Err(Error::DetachedHead);
        }
        head.shorthand()
            .map(str::to_string)
            .ok_or(Error::DetachedHead)
    }

    fn branch_exists(&self, name: &str) -> Result<bool> {
        let reference = format!("refs/heads/{name}");
        let args = ["ls-remote", "--exit-code", "--heads", ORIGIN, reference.as_str()];
        let output = self.run(&args)?;
        // --exit-code reports "no matching refs" as status 2
        match output.status.code() {
            Some(0) => Ok(true),
            Some(2) => Ok(false),
            _ => Err(Self::failure(&args, &output)),
        }
    }

    fn create_branch(&self, name: &str) -> Result<()> {
        self.git_command(&["checkout", "-B", name])?;
        Ok(())
    }

    fn checkout(&self, name: &str) -> Result<()> {
        self.git_command(&["checkout", name])?;
        Ok(())
    }

    fn stage_all(&self) -> Result<()> {
        self.git_command(&["add", "-A", "."])?;
        Ok(())
    }

    fn commit(&self, message: &str) -> Result<()> {
        self.git_command(&["commit", "-m", message])?;
        Ok(())
    }

    fn push(&self, branch: &str) -> Result<()> {
        self.git_command(&["push", "-u", ORIGIN, branch])?;
        Ok(())
    }

    fn remote_url(&self) -> Result<String> {
        let repo = self.open()?;
        let remote = repo.find_remote(ORIGIN).map_err(|_| Error::RemoteNotFound {
            name: ORIGIN.to_string(),
        })?;
        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| Error::RemoteNotFound {
                name: ORIGIN.to_string(),
            })
    }

    fn configure(&self, identity: &Identity, token: &str) -> Result<()> {
        let config = self.config_path();
        let backup = self.backup_path();

        if backup.exists() {
            // A leftover backup is the only copy of the untouched config
            tracing::warn!(
                path = %backup,
                "Git config backup already exists, keeping it"
            );
        } else {
            io::copy_file(&config, &backup)?;
            tracing::debug!(path = %backup, "Backed up git config");
        }

        self.git_command(&["config", "user.email", &identity.email])?;
        self.git_command(&["config", "user.name", &identity.name])?;

        let url = self.remote_url()?;
        match rewrite_origin_url(&url, token) {
            Some(rewritten) => {
                self.git_command(&["remote", "set-url", ORIGIN, &rewritten])?;
                tracing::info!("Rewrote origin url to use access token");
            }
            None => {
                tracing::debug!(url = %redact_credentials(&url), "Origin url left unchanged");
            }
        }

        Ok(())
    }

    fn restore(&self) -> Result<()> {
        let backup = self.backup_path();
        if !backup.exists() {
            return Err(Error::BackupMissing {
                path: backup.to_native(),
            });
        }
        io::rename(&backup, &self.config_path())?;
        tracing::info!("Restored git config");
        Ok(())
    }
}
