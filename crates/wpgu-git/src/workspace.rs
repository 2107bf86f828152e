//! The git operations the update pipeline depends on

use crate::Result;

/// Committer identity used for update commits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// The identity the updater commits as.
    pub fn bot() -> Self {
        Self::new("WP Git Updater Bot", "bot@wpgitupdater.dev")
    }
}

impl Default for Identity {
    fn default() -> Self {
        Self::bot()
    }
}

/// A single git checkout that the updater mutates.
///
/// All methods act on the one working tree the implementation was created
/// for. Implementations are not expected to be safe for concurrent use.
pub trait GitWorkspace {
    /// Name of the checked-out branch.
    fn current_branch(&self) -> Result<String>;

    /// Whether `name` exists as a branch on `origin`.
    ///
    /// This is the idempotency marker between runs, so it must consult the
    /// remote rather than local refs.
    fn branch_exists(&self, name: &str) -> Result<bool>;

    /// Create `name` from the current HEAD and check it out.
    fn create_branch(&self, name: &str) -> Result<()>;

    /// Check out an existing local branch.
    fn checkout(&self, name: &str) -> Result<()>;

    /// Stage every change in the working tree, including deletions.
    fn stage_all(&self) -> Result<()>;

    fn commit(&self, message: &str) -> Result<()>;

    /// Push `branch` to `origin` and set it as upstream.
    fn push(&self, branch: &str) -> Result<()>;

    /// URL of the `origin` remote.
    fn remote_url(&self) -> Result<String>;

    /// Back up the git configuration, then set the committer identity and
    /// embed `token` in the `origin` URL.
    fn configure(&self, identity: &Identity, token: &str) -> Result<()>;

    /// Put back the configuration saved by [`GitWorkspace::configure`].
    fn restore(&self) -> Result<()>;
}
