//! End-to-end workflows: clone a remote, query, edit, publish, and come back.

use gitdata_fs::NormalizedPath;
use gitdata_git::{Error as GitError, GitCli, SourceLocation};
use gitdata_store::{Error, GitData, Settings, filter};
use gitdata_test_utils::git::{self, RemoteFixture};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

const OWNER: &str = "avagarwa@redhat.com";

struct Workspace {
    temp: TempDir,
    remote: RemoteFixture,
}

impl Workspace {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let remote = RemoteFixture::new(
            temp.path(),
            "ocp-build-data",
            "openshift-3.12",
            &[
                (
                    "images/cluster-autoscaler.yml",
                    "owners:\n- avagarwa@redhat.com\nfrom:\n  stream: rhel\n",
                ),
                (
                    "images/console.yml",
                    "owners:\n- someone@example.com\nmode: disabled\n",
                ),
                (
                    "images/registry.json",
                    "{\"owners\": [\"avagarwa@redhat.com\"], \"mode\": \"wip\"}\n",
                ),
                ("rpms/openshift.yml", "owners: []\n"),
            ],
        );
        Self { temp, remote }
    }

    fn settings(&self) -> Settings {
        Settings::default()
            .with_clone_dir(self.temp.path().join("clones"))
            .with_branch("openshift-3.12")
    }

    fn source(&self) -> SourceLocation {
        SourceLocation::Remote {
            url: self.remote.url(),
            name: "ocp-build-data".into(),
        }
    }

    fn open(&self) -> gitdata_store::Result<GitData> {
        GitData::open_source(self.settings(), self.source(), GitCli::new())
    }
}

#[test]
fn test_owner_edit_commit_push_and_reopen() {
    let ws = Workspace::new();
    let data = ws.open().unwrap();
    git::configure_identity(data.root());

    let mut owned = data.load_all("images", &[&filter::owner_is(OWNER)]).unwrap();
    assert_eq!(
        owned.keys().collect::<Vec<_>>(),
        vec!["cluster-autoscaler", "registry"]
    );

    let image = owned.get_mut("cluster-autoscaler").unwrap();
    image.set("mode", "wip");
    image.save().unwrap();
    data.commit("test update").unwrap();
    data.push().unwrap();

    assert_eq!(ws.remote.tip(), git::head_id(data.root()));

    // the clone holds the remote tip, so reopening reuses it
    let head = git::head_id(data.root());
    drop(data);
    let reopened = ws.open().unwrap();
    assert_eq!(git::head_id(reopened.root()), head);

    let wip = reopened
        .load_all("images", &[&filter::mode_is("wip")])
        .unwrap();
    assert_eq!(
        wip.keys().collect::<Vec<_>>(),
        vec!["cluster-autoscaler", "registry"]
    );
    assert_eq!(
        wip["cluster-autoscaler"].data,
        json!({"owners": [OWNER], "from": {"stream": "rhel"}, "mode": "wip"})
    );
}

#[test]
fn test_unpushed_commit_blocks_refresh_until_pushed() {
    let ws = Workspace::new();
    let data = ws.open().unwrap();
    git::configure_identity(data.root());

    let mut image = data.load_key("images", "console").unwrap().unwrap();
    image.set("mode", "enabled");
    image.save().unwrap();
    data.commit("Enable console").unwrap();

    ws.remote
        .push_change(&[("images/new.yml", "owners: []\n")], "Add new image");

    let err = ws.open().unwrap_err();
    match err {
        Error::Git(GitError::UnsyncedLocalChanges { commits, .. }) => {
            assert_eq!(commits.len(), 1);
        }
        other => panic!("unexpected error: {other}"),
    }

    // the local edit survives the failed refresh
    let kept = data.load_key("images", "console").unwrap().unwrap();
    assert_eq!(kept.get("/mode"), Some(&json!("enabled")));
}

#[test]
fn test_remote_advance_recloned_with_sub_dir() {
    let ws = Workspace::new();
    let first = ws.open().unwrap();
    let old_head = git::head_id(first.root());

    ws.remote
        .push_change(&[("rpms/kernel.yml", "owners: [x]\n")], "Add kernel");

    let settings = ws.settings().with_sub_dir("rpms");
    let data = GitData::open_source(settings, ws.source(), GitCli::new()).unwrap();

    assert_ne!(git::head_id(data.root()), old_head);
    assert_eq!(git::head_id(data.root()), ws.remote.tip());
    assert_eq!(
        data.store().data_dir(),
        &NormalizedPath::new(data.root()).join("rpms")
    );
    assert_eq!(
        data.load_all("", &[]).unwrap().keys().collect::<Vec<_>>(),
        vec!["kernel", "openshift"]
    );
}

#[test]
fn test_wrong_branch_clone_is_left_alone() {
    let ws = Workspace::new();
    let data = ws.open().unwrap();
    let root = data.root().to_path_buf();
    git::git(&root, &["checkout", "-q", "-b", "local-work"]);

    let err = ws.open().unwrap_err();

    assert!(matches!(
        err,
        Error::Git(GitError::BranchMismatch { ref local, .. }) if local == "local-work"
    ));
    assert_eq!(git::current_branch(&root), "local-work");
}
