use gitdata_fs::{ConfigStore, Error, NormalizedPath};
use pretty_assertions::assert_eq;
use serde::Deserialize;
use std::fs;
use tempfile::TempDir;

#[derive(Debug, Deserialize, PartialEq)]
struct TestSettings {
    branch: String,
    extensions: Vec<String>,
}

fn sample() -> TestSettings {
    TestSettings {
        branch: "openshift-4.1".into(),
        extensions: vec!["yaml".into(), "json".into()],
    }
}

#[test]
fn test_load_toml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("gitdata.toml");
    fs::write(
        &file_path,
        "branch = \"openshift-4.1\"\nextensions = [\"yaml\", \"json\"]\n",
    )
    .unwrap();

    let loaded: TestSettings = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_load_yaml() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("gitdata.yml");
    fs::write(&file_path, "branch: openshift-4.1\nextensions: [yaml, json]\n").unwrap();

    let loaded: TestSettings = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_load_json() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("gitdata.JSON");
    fs::write(
        &file_path,
        r#"{"branch": "openshift-4.1", "extensions": ["yaml", "json"]}"#,
    )
    .unwrap();

    let loaded: TestSettings = ConfigStore::new().load(&NormalizedPath::new(&file_path)).unwrap();
    assert_eq!(loaded, sample());
}

#[test]
fn test_load_invalid_content_names_format() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("gitdata.toml");
    fs::write(&file_path, "branch = ").unwrap();

    let err = ConfigStore::new()
        .load::<TestSettings>(&NormalizedPath::new(&file_path))
        .unwrap_err();
    assert!(matches!(err, Error::ConfigParse { ref format, .. } if format == "TOML"));
}

#[test]
fn test_load_unsupported_extension() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("gitdata.ini");
    fs::write(&file_path, "branch=main").unwrap();

    let err = ConfigStore::new()
        .load::<TestSettings>(&NormalizedPath::new(&file_path))
        .unwrap_err();
    assert!(matches!(err, Error::UnsupportedFormat { ref extension } if extension == "ini"));
}
