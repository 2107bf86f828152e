//! In-memory doubles for the update pipeline's collaborators.

#![allow(dead_code)]

use std::cell::{Ref, RefCell};
use std::collections::{BTreeMap, BTreeSet};

use wpgu_core::{
    ArtifactSource, Error, ExtensionKind, PullRequest, PullRequests, Registry, RemoteMetadata,
    Result, Services, UsageEvent, UsageReporter,
};
use wpgu_fs::NormalizedPath;
use wpgu_git::{GitWorkspace, Identity};
use wpgu_meta::{Environment, Settings};
use wpgu_test_utils::site::TestSite;

/// Operations that only read repository state.
const READS: &[&str] = &["current_branch", "branch_exists", "remote_url"];

#[derive(Debug, Default)]
pub struct GitState {
    pub current: String,
    pub remote_branches: BTreeSet<String>,
    pub commits: Vec<(String, String)>,
    pub configured_with: Option<(Identity, String)>,
    pub backup: bool,
    pub restores: usize,
    pub log: Vec<String>,
    pub fail_on: BTreeSet<&'static str>,
    pub origin: String,
}

/// A [`GitWorkspace`] that records every call.
pub struct FakeGit {
    state: RefCell<GitState>,
}

impl FakeGit {
    pub fn new(current: &str) -> Self {
        let state = GitState {
            current: current.to_string(),
            origin: "git@github.com:acme/site.git".to_string(),
            ..Default::default()
        };
        Self {
            state: RefCell::new(state),
        }
    }

    pub fn with_remote_branch(self, name: &str) -> Self {
        self.state.borrow_mut().remote_branches.insert(name.to_string());
        self
    }

    pub fn failing_on(self, operation: &'static str) -> Self {
        self.state.borrow_mut().fail_on.insert(operation);
        self
    }

    pub fn state(&self) -> Ref<'_, GitState> {
        self.state.borrow()
    }

    /// Logged operations that change the repository.
    pub fn mutations(&self) -> Vec<String> {
        self.state()
            .log
            .iter()
            .filter(|entry| {
                let op = entry.split(':').next().unwrap_or_default();
                !READS.contains(&op)
            })
            .cloned()
            .collect()
    }

    pub fn clear_log(&self) {
        self.state.borrow_mut().log.clear();
    }

    fn record(&self, operation: &'static str, detail: &str) -> wpgu_git::Result<()> {
        let mut state = self.state.borrow_mut();
        if detail.is_empty() {
            state.log.push(operation.to_string());
        } else {
            state.log.push(format!("{operation}:{detail}"));
        }
        if state.fail_on.contains(operation) {
            return Err(wpgu_git::Error::CommandFailed {
                command: format!("git {operation}"),
                code: Some(1),
                stderr: "simulated failure".to_string(),
            });
        }
        Ok(())
    }
}

impl GitWorkspace for FakeGit {
    fn current_branch(&self) -> wpgu_git::Result<String> {
        self.record("current_branch", "")?;
        Ok(self.state().current.clone())
    }

    fn branch_exists(&self, name: &str) -> wpgu_git::Result<bool> {
        self.record("branch_exists", name)?;
        Ok(self.state().remote_branches.contains(name))
    }

    fn create_branch(&self, name: &str) -> wpgu_git::Result<()> {
        self.record("create_branch", name)?;
        self.state.borrow_mut().current = name.to_string();
        Ok(())
    }

    fn checkout(&self, name: &str) -> wpgu_git::Result<()> {
        self.record("checkout", name)?;
        self.state.borrow_mut().current = name.to_string();
        Ok(())
    }

    fn stage_all(&self) -> wpgu_git::Result<()> {
        self.record("stage_all", "")
    }

    fn commit(&self, message: &str) -> wpgu_git::Result<()> {
        self.record("commit", message)?;
        let mut state = self.state.borrow_mut();
        let branch = state.current.clone();
        state.commits.push((branch, message.to_string()));
        Ok(())
    }

    fn push(&self, branch: &str) -> wpgu_git::Result<()> {
        self.record("push", branch)?;
        self.state.borrow_mut().remote_branches.insert(branch.to_string());
        Ok(())
    }

    fn remote_url(&self) -> wpgu_git::Result<String> {
        self.record("remote_url", "")?;
        Ok(self.state().origin.clone())
    }

    fn configure(&self, identity: &Identity, token: &str) -> wpgu_git::Result<()> {
        // The token never goes into the log
        self.record("configure", "")?;
        let mut state = self.state.borrow_mut();
        state.backup = true;
        state.configured_with = Some((identity.clone(), token.to_string()));
        Ok(())
    }

    fn restore(&self) -> wpgu_git::Result<()> {
        self.record("restore", "")?;
        let mut state = self.state.borrow_mut();
        if !state.backup {
            return Err(wpgu_git::Error::BackupMissing {
                path: ".git/config.original".into(),
            });
        }
        state.backup = false;
        state.restores += 1;
        Ok(())
    }
}

/// Registry answering from a fixed table.
#[derive(Default)]
pub struct StubRegistry {
    records: BTreeMap<(ExtensionKind, String), RemoteMetadata>,
    pub calls: RefCell<Vec<String>>,
}

impl StubRegistry {
    pub fn with(mut self, kind: ExtensionKind, slug: &str, record: RemoteMetadata) -> Self {
        self.records.insert((kind, slug.to_string()), record);
        self
    }
}

impl Registry for StubRegistry {
    fn fetch(&self, kind: ExtensionKind, slug: &str) -> Result<Option<RemoteMetadata>> {
        self.calls.borrow_mut().push(format!("{kind}:{slug}"));
        Ok(self.records.get(&(kind, slug.to_string())).cloned())
    }
}

/// Serves zip archives from memory.
#[derive(Default)]
pub struct StubArtifacts {
    archives: BTreeMap<String, Vec<u8>>,
    pub downloads: RefCell<Vec<String>>,
}

impl StubArtifacts {
    pub fn with(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.archives.insert(url.to_string(), bytes);
        self
    }
}

impl ArtifactSource for StubArtifacts {
    fn download(&self, url: &str, destination: &NormalizedPath) -> Result<()> {
        self.downloads.borrow_mut().push(url.to_string());
        let bytes = self.archives.get(url).ok_or_else(|| Error::Download {
            url: url.to_string(),
            message: "404 Not Found".to_string(),
        })?;
        std::fs::write(destination.to_native(), bytes)
            .map_err(|e| wpgu_fs::Error::io(destination.to_native(), e))?;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingPullRequests {
    pub created: RefCell<Vec<PullRequest>>,
    pub fail: bool,
}

impl PullRequests for RecordingPullRequests {
    fn create(&self, request: &PullRequest) -> Result<Option<String>> {
        if self.fail {
            return Err(Error::PullRequest {
                head: request.head.clone(),
                message: "422 Unprocessable Entity".to_string(),
            });
        }
        let mut created = self.created.borrow_mut();
        created.push(request.clone());
        Ok(Some(format!("https://github.com/acme/site/pull/{}", created.len())))
    }
}

#[derive(Default)]
pub struct RecordingUsage {
    pub events: RefCell<Vec<UsageEvent>>,
    pub fail: bool,
}

impl UsageReporter for RecordingUsage {
    fn report(&self, event: &UsageEvent) -> Result<()> {
        if self.fail {
            return Err(Error::Usage {
                message: "unexpected status 403".to_string(),
            });
        }
        self.events.borrow_mut().push(event.clone());
        Ok(())
    }
}

/// The collaborators bundled for one test.
#[derive(Default)]
pub struct Doubles {
    pub registry: StubRegistry,
    pub artifacts: StubArtifacts,
    pub pull_requests: RecordingPullRequests,
    pub usage: Option<RecordingUsage>,
}

impl Doubles {
    pub fn services(&self) -> Services<'_> {
        Services {
            registry: &self.registry,
            artifacts: &self.artifacts,
            pull_requests: &self.pull_requests,
            usage: self.usage.as_ref().map(|u| u as &dyn UsageReporter),
        }
    }
}

pub fn download_url(kind: ExtensionKind, slug: &str, version: &str) -> String {
    format!("https://downloads.wordpress.org/{kind}/{slug}.{version}.zip")
}

pub fn record(kind: ExtensionKind, slug: &str, version: &str) -> RemoteMetadata {
    RemoteMetadata {
        version: version.to_string(),
        download_url: download_url(kind, slug, version),
        last_updated: "2024-05-01 9:00am GMT".to_string(),
        homepage: format!("https://wordpress.org/{}s/{slug}/", kind),
        notes: format!("<h4>{version}</h4><ul><li>Fixes</li></ul>"),
    }
}

pub fn env_with_token() -> Environment {
    Environment {
        git_token: Some("ghs_test_token".to_string()),
        ..Default::default()
    }
}

/// Settings for `site`, loading its `.wpgitupdater.yml`.
pub fn settings(site: &TestSite, env: Environment) -> Settings {
    Settings::load(NormalizedPath::new(site.root()), env).unwrap()
}

pub const PLUGINS_ONLY: &str = "version: \"1.0\"\nplugins:\n  enabled: true\n  path: plugins\n";
