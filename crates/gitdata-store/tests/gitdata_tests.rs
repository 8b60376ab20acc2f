//! Sessions over local directories and over a clone of a bare remote.

use gitdata_git::{GitCli, SourceLocation};
use gitdata_store::{Error, GitData, Settings, filter};
use gitdata_test_utils::DataDir;
use gitdata_test_utils::git::{self, RemoteFixture};
use pretty_assertions::assert_eq;
use serde_json::json;
use tempfile::TempDir;

fn local_settings(data: &DataDir) -> Settings {
    Settings::new(data.root().to_string_lossy())
}

#[test]
fn test_local_source_is_used_in_place() {
    let data = DataDir::new().with_file("images/a.yaml", "owners: [x]\n");

    let session = GitData::open(local_settings(&data), GitCli::new()).unwrap();

    assert_eq!(session.root(), data.root());
    assert_eq!(session.remote_url(), None);
    assert_eq!(session.load_all("images", &[]).unwrap().len(), 1);
}

#[test]
fn test_missing_source_is_rejected() {
    let err = GitData::open(Settings::default(), GitCli::new()).unwrap_err();
    assert!(matches!(err, Error::MissingSource));
}

#[test]
fn test_unsupported_scheme_is_rejected() {
    let err = GitData::open(Settings::new("ftp://example.com/data.git"), GitCli::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::Git(gitdata_git::Error::InvalidSource { .. })
    ));
}

#[test]
fn test_settings_sub_dir_and_extensions_apply() {
    let data = DataDir::new()
        .with_file("images/a.yaml", "owners: [x]\n")
        .with_file("images/b.json", r#"{"owners": ["y"]}"#);
    let settings = local_settings(&data)
        .with_sub_dir("images")
        .with_extensions(["json"]);

    let session = GitData::open(settings, GitCli::new()).unwrap();

    let records = session.load_all("", &[]).unwrap();
    assert_eq!(records.keys().collect::<Vec<_>>(), vec!["b"]);
    assert!(session.load_key("", "a").unwrap().is_none());
}

#[test]
fn test_invalid_sub_dir_names_it() {
    let data = DataDir::new().with_file("images/a.yaml", "a: 1\n");
    let settings = local_settings(&data).with_sub_dir("rpms");

    let err = GitData::open(settings, GitCli::new()).unwrap_err();

    assert!(err.to_string().contains("'rpms' is not a valid sub-directory"));
}

struct Remote {
    temp: TempDir,
    fixture: RemoteFixture,
}

impl Remote {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let fixture = RemoteFixture::new(
            temp.path(),
            "data",
            "main",
            &[
                ("images/a.yaml", "owners: [x]\nmode: enabled\n"),
                ("images/b.yaml", "owners: [y]\n"),
            ],
        );
        Self { temp, fixture }
    }

    fn open(&self) -> GitData {
        let settings = Settings::default()
            .with_clone_dir(self.temp.path().join("clones"))
            .with_branch("main");
        let source = SourceLocation::Remote {
            url: self.fixture.url(),
            name: "data".into(),
        };
        GitData::open_source(settings, source, GitCli::new()).unwrap()
    }
}

#[test]
fn test_remote_source_is_cloned_under_clone_dir() {
    let remote = Remote::new();

    let session = remote.open();

    assert_eq!(session.root(), remote.temp.path().join("clones").join("data"));
    assert_eq!(session.remote_url(), Some(remote.fixture.url().as_str()));
    assert_eq!(git::head_id(session.root()), remote.fixture.tip());
}

#[test]
fn test_edit_commit_push_reaches_remote() {
    let remote = Remote::new();
    let session = remote.open();
    git::configure_identity(session.root());
    let before = remote.fixture.tip();

    let mut owned = session
        .load_all("images", &[&filter::owner_is("x")])
        .unwrap();
    let record = owned.get_mut("a").unwrap();
    record.set("mode", "wip");
    record.save().unwrap();
    session.commit("Mark a as wip").unwrap();
    session.push().unwrap();

    assert_ne!(remote.fixture.tip(), before);
    assert_eq!(remote.fixture.tip(), git::head_id(session.root()));

    // a fresh session reuses the clone and sees the change
    let reopened = remote.open();
    let record = reopened.load_key("images", "a").unwrap().unwrap();
    assert_eq!(record.data, json!({"owners": ["x"], "mode": "wip"}));
}

#[test]
fn test_resync_picks_up_remote_changes() {
    let remote = Remote::new();
    let mut session = remote.open();

    remote
        .fixture
        .push_change(&[("images/c.yaml", "owners: [z]\n")], "Add c");
    assert!(session.load_key("images", "c").unwrap().is_none());

    session.resync().unwrap();

    assert!(session.load_key("images", "c").unwrap().is_some());
    assert_eq!(git::head_id(session.root()), remote.fixture.tip());
}

#[test]
fn test_commit_with_nothing_staged_fails() {
    let remote = Remote::new();
    let session = remote.open();
    git::configure_identity(session.root());

    let err = session.commit("Nothing to see").unwrap_err();

    assert!(matches!(err, Error::Git(gitdata_git::Error::Command { .. })));
}
