//! End-to-end update runs against a real repository
//!
//! The site repository pushes to a bare `origin` on disk, so branch
//! detection, pushes and the git config round trip are all real. Only the
//! registry, downloads and the pull request API are stubbed.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::Path;

use pretty_assertions::assert_eq;
use tempfile::TempDir;
use wpgu_core::{
    ArtifactSource, Error, ExtensionKind, Outcome, PullRequest, PullRequests, Registry,
    RemoteMetadata, Services, UpdateOptions, Updater,
};
use wpgu_fs::NormalizedPath;
use wpgu_git::CliWorkspace;
use wpgu_meta::{Environment, Settings};
use wpgu_test_utils::archive::{plugin_zip, theme_zip};
use wpgu_test_utils::git::{
    attach_bare_origin, commit_all, commit_count, git, real_git_repo_with_commit,
    remote_has_branch,
};
use wpgu_test_utils::site::TestSite;

const CONFIG: &str = "version: \"1.0\"
plugins:
  enabled: true
  path: plugins
themes:
  enabled: true
  path: themes
";

/// Registry and download server backed by in-memory zips.
#[derive(Default)]
struct Directory {
    records: BTreeMap<(ExtensionKind, String), RemoteMetadata>,
    archives: BTreeMap<String, Vec<u8>>,
}

impl Directory {
    fn publish(mut self, kind: ExtensionKind, slug: &str, version: &str, zip: Vec<u8>) -> Self {
        let url = format!("https://downloads.wordpress.org/{kind}/{slug}.{version}.zip");
        self.records.insert(
            (kind, slug.to_string()),
            RemoteMetadata {
                version: version.to_string(),
                download_url: url.clone(),
                last_updated: "2024-05-01 9:00am GMT".to_string(),
                homepage: format!("https://wordpress.org/{kind}s/{slug}/"),
                notes: format!("<h4>{version}</h4>"),
            },
        );
        self.archives.insert(url, zip);
        self
    }
}

impl Registry for Directory {
    fn fetch(&self, kind: ExtensionKind, slug: &str) -> wpgu_core::Result<Option<RemoteMetadata>> {
        Ok(self.records.get(&(kind, slug.to_string())).cloned())
    }
}

impl ArtifactSource for Directory {
    fn download(&self, url: &str, destination: &NormalizedPath) -> wpgu_core::Result<()> {
        let bytes = self.archives.get(url).ok_or_else(|| Error::Download {
            url: url.to_string(),
            message: "not published".to_string(),
        })?;
        wpgu_fs::io::write_atomic(destination, bytes)?;
        Ok(())
    }
}

#[derive(Default)]
struct PullRequestLog {
    opened: RefCell<Vec<PullRequest>>,
    reject: bool,
}

impl PullRequests for PullRequestLog {
    fn create(&self, request: &PullRequest) -> wpgu_core::Result<Option<String>> {
        if self.reject {
            return Err(Error::PullRequest {
                head: request.head.clone(),
                message: "422 Validation Failed".to_string(),
            });
        }
        self.opened.borrow_mut().push(request.clone());
        Ok(None)
    }
}

struct Fixture {
    site: TestSite,
    _origin_dir: TempDir,
    origin: std::path::PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let site = TestSite::new();
        real_git_repo_with_commit(site.root());
        site.add_plugin("akismet", "Akismet", "5.0");
        site.add_plugin("hello-dolly", "Hello Dolly", "1.7.2");
        site.add_theme("astra", "Astra", "4.0");
        site.write_config(CONFIG);
        commit_all(site.root(), "Add site");

        let origin_dir = TempDir::new().unwrap();
        let origin = attach_bare_origin(site.root(), &origin_dir.path().join("origin.git"));

        Self {
            site,
            _origin_dir: origin_dir,
            origin,
        }
    }

    fn root(&self) -> &Path {
        self.site.root()
    }

    fn settings(&self) -> Settings {
        let env = Environment {
            git_token: Some("ghs_integration".to_string()),
            ..Default::default()
        };
        Settings::load(NormalizedPath::new(self.root()), env).unwrap()
    }

    fn workspace(&self) -> CliWorkspace {
        CliWorkspace::new(NormalizedPath::new(self.root())).unwrap()
    }
}

fn directory() -> Directory {
    Directory::default()
        .publish(
            ExtensionKind::Plugin,
            "akismet",
            "5.3",
            plugin_zip("akismet", "Akismet", "5.3"),
        )
        .publish(
            ExtensionKind::Plugin,
            "hello-dolly",
            "1.7.2",
            plugin_zip("hello-dolly", "Hello Dolly", "1.7.2"),
        )
        .publish(ExtensionKind::Theme, "astra", "4.6", theme_zip("astra", "Astra", "4.6"))
}

#[test]
fn update_pushes_one_branch_per_outdated_extension() {
    let fixture = Fixture::new();
    let config_before = fixture.site.read(".git/config");
    let settings = fixture.settings();
    let git_workspace = fixture.workspace();
    let directory = directory();
    let pull_requests = PullRequestLog::default();
    let services = Services {
        registry: &directory,
        artifacts: &directory,
        pull_requests: &pull_requests,
        usage: None,
    };

    let report = Updater::new(&settings, &git_workspace, services)
        .run(&UpdateOptions::default())
        .unwrap();

    let plugin_branch = "wpgitupdates-plugin-akismet-5.0-5.3";
    let theme_branch = "wpgitupdates-theme-astra-4.0-4.6";
    assert_eq!(report.updated().count(), 2);
    assert_eq!(
        report.find(ExtensionKind::Plugin, "hello-dolly").unwrap().outcome,
        Outcome::UpToDate
    );
    assert!(remote_has_branch(&fixture.origin, plugin_branch));
    assert!(remote_has_branch(&fixture.origin, theme_branch));

    // The update lives on the branch, the source branch is untouched
    let updated = git(
        fixture.root(),
        &["show", &format!("{plugin_branch}:plugins/akismet/akismet.php")],
    );
    assert!(updated.contains("Version: 5.3"));
    assert_eq!(git(fixture.root(), &["rev-parse", "--abbrev-ref", "HEAD"]), "main");
    fixture.site.assert_file_contains("plugins/akismet/akismet.php", "Version: 5.0");
    fixture.site.assert_file_not_exists("plugins/akismet.5.3.zip");
    assert_eq!(git(fixture.root(), &["status", "--porcelain"]), "");

    assert_eq!(
        git(fixture.root(), &["log", "-1", "--format=%an <%ae>|%s", plugin_branch]),
        "WP Git Updater Bot <bot@wpgitupdater.dev>|chore(plugins): Update akismet from 5.0 to 5.3"
    );
    assert_eq!(commit_count(fixture.root(), plugin_branch), commit_count(fixture.root(), "main") + 1);

    // Git config is back to what it was
    assert_eq!(fixture.site.read(".git/config"), config_before);
    fixture.site.assert_file_not_exists(".git/config.original");

    let opened = pull_requests.opened.borrow();
    let heads: Vec<_> = opened.iter().map(|pr| pr.head.as_str()).collect();
    assert_eq!(heads, vec![plugin_branch, theme_branch]);
    assert!(opened.iter().all(|pr| pr.base == "main"));
}

#[test]
fn second_run_changes_nothing() {
    let fixture = Fixture::new();
    let settings = fixture.settings();
    let git_workspace = fixture.workspace();
    let directory = directory();
    let pull_requests = PullRequestLog::default();
    let services = Services {
        registry: &directory,
        artifacts: &directory,
        pull_requests: &pull_requests,
        usage: None,
    };
    let updater = Updater::new(&settings, &git_workspace, services);
    updater.run(&UpdateOptions::default()).unwrap();
    let branch_commits = commit_count(&fixture.origin, "wpgitupdates-plugin-akismet-5.0-5.3");

    let report = updater.run(&UpdateOptions::default()).unwrap();

    assert_eq!(report.updated().count(), 0);
    assert_eq!(
        report.find(ExtensionKind::Plugin, "akismet").unwrap().outcome,
        Outcome::BranchExists {
            branch: "wpgitupdates-plugin-akismet-5.0-5.3".to_string()
        }
    );
    assert_eq!(
        commit_count(&fixture.origin, "wpgitupdates-plugin-akismet-5.0-5.3"),
        branch_commits
    );
    assert_eq!(pull_requests.opened.borrow().len(), 2);
    assert_eq!(git(fixture.root(), &["status", "--porcelain"]), "");
}

#[test]
fn dry_run_leaves_repository_and_origin_alone() {
    let fixture = Fixture::new();
    let config_before = fixture.site.read(".git/config");
    let settings = Settings::load(NormalizedPath::new(fixture.root()), Environment::default()).unwrap();
    let git_workspace = fixture.workspace();
    let directory = directory();
    let pull_requests = PullRequestLog::default();
    let services = Services {
        registry: &directory,
        artifacts: &directory,
        pull_requests: &pull_requests,
        usage: None,
    };

    let report = Updater::new(&settings, &git_workspace, services)
        .run(&UpdateOptions {
            dry_run: true,
            ..Default::default()
        })
        .unwrap();

    assert_eq!(
        report.find(ExtensionKind::Theme, "astra").unwrap().outcome,
        Outcome::DryRun {
            branch: "wpgitupdates-theme-astra-4.0-4.6".to_string()
        }
    );
    assert!(!remote_has_branch(&fixture.origin, "wpgitupdates-theme-astra-4.0-4.6"));
    assert_eq!(fixture.site.read(".git/config"), config_before);
    assert_eq!(git(fixture.root(), &["branch", "--list", "wpgitupdates-*"]), "");
}

#[test]
fn failed_run_still_restores_git_config() {
    let fixture = Fixture::new();
    let config_before = fixture.site.read(".git/config");
    let settings = fixture.settings();
    let git_workspace = fixture.workspace();
    let directory = directory();
    let pull_requests = PullRequestLog {
        reject: true,
        ..Default::default()
    };
    let services = Services {
        registry: &directory,
        artifacts: &directory,
        pull_requests: &pull_requests,
        usage: None,
    };

    let err = Updater::new(&settings, &git_workspace, services)
        .run(&UpdateOptions::default())
        .unwrap_err();

    assert!(matches!(err, Error::PullRequest { .. }));
    assert_eq!(fixture.site.read(".git/config"), config_before);
    // The run stopped at the first extension; the theme was never branched
    assert!(remote_has_branch(&fixture.origin, "wpgitupdates-plugin-akismet-5.0-5.3"));
    assert!(!remote_has_branch(&fixture.origin, "wpgitupdates-theme-astra-4.0-4.6"));
}
