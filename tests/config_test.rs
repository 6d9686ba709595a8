// tests/config_test.rs
use git_timestamp::config::{load_config, parse_config, Config, CONFIG_FILE_NAME};
use git_timestamp::GitTimestampError;
use serial_test::serial;
use std::env;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

#[test]
fn test_load_default_config() {
    let config = Config::default();
    assert_eq!(config.release.snapshot_text, "-SNAPSHOT");
    assert_eq!(config.timestamp.snapshot_suffix, "-SNAPSHOT");
    assert!(config.timestamp.version_timestamp_snapshots);
    assert!(!config.timestamp.version_timestamp_releases);
    assert!(config.scm.prefer_developer_connection);
    assert!(config.source.is_none());
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
[project]
artifact_id = "widget"
version = "3-SNAPSHOT"

[release]
always_include_repeat_count = true
tag_name_property = ""
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), Path::new(".")).unwrap();
    assert_eq!(config.project.artifact_id, "widget");
    assert_eq!(config.project.version.as_deref(), Some("3-SNAPSHOT"));
    assert!(config.release.always_include_repeat_count);
    assert_eq!(config.release.tag_name_property.as_deref(), Some(""));
    // unspecified keys keep their defaults
    assert_eq!(
        config.release.release_property.as_deref(),
        Some("releaseVersion")
    );
    assert_eq!(config.source.as_deref(), Some(temp_file.path()));
    assert_eq!(config.descriptor(), Some(temp_file.path()));
}

#[test]
#[serial]
fn test_load_fixture() {
    let config =
        load_config(Some(Path::new("gittimestamp.toml")), Path::new("tests/fixtures"))
            .expect("fixture loads");

    let coords = config.coordinates().unwrap();
    assert_eq!(coords.key(), "com.example:widget");
    assert_eq!(coords.declared_version, "1.2-SNAPSHOT");
    assert_eq!(config.descriptor(), Some(Path::new("pom.xml")));
    assert_eq!(config.project.modules.len(), 1);

    let location = config.scm.location().unwrap().unwrap();
    assert_eq!(location.fetch_url, "git@example.com:widget.git");

    assert_eq!(config.release.tag_name_format, "v@{project.version}");
    assert!(config.release.local_tags);
    assert!(config.timestamp.version_includes_commit_count);
    assert_eq!(
        config.timestamp.version_property.as_deref(),
        Some("buildVersion")
    );
}

#[test]
fn test_invalid_toml_is_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"[release\nlocal_tags = yes").unwrap();
    temp_file.flush().unwrap();

    let err = load_config(Some(temp_file.path()), Path::new(".")).unwrap_err();
    assert!(matches!(err, GitTimestampError::Config(_)));
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    let err = load_config(Some(Path::new("does/not/exist.toml")), Path::new(".")).unwrap_err();
    assert!(err.to_string().contains("does/not/exist.toml"));
}

#[test]
fn test_unsupported_scm_provider() {
    let config = parse_config(
        r#"
[scm]
connection = "scm:svn:https://example.com/widget"
"#,
    )
    .unwrap();
    assert!(matches!(
        config.scm.location(),
        Err(GitTimestampError::UnsupportedRepository(_))
    ));
}

#[test]
#[serial]
fn test_config_discovered_in_current_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[project]\nversion = \"9-SNAPSHOT\"\n",
    )
    .unwrap();

    let original = env::current_dir().unwrap();
    env::set_current_dir(dir.path()).unwrap();
    let result = load_config(None, Path::new("."));
    env::set_current_dir(original).unwrap();

    let config = result.unwrap();
    assert_eq!(config.project.version.as_deref(), Some("9-SNAPSHOT"));
    assert_eq!(
        config.source.as_deref(),
        Some(Path::new(".").join(CONFIG_FILE_NAME).as_path())
    );
}

#[test]
fn test_config_discovered_in_run_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        "[project]\nversion = \"4-SNAPSHOT\"\n",
    )
    .unwrap();
    fs::write(dir.path().join("custom.toml"), "[project]\nversion = \"5\"\n").unwrap();

    let config = load_config(None, dir.path()).unwrap();
    assert_eq!(config.project.version.as_deref(), Some("4-SNAPSHOT"));
    assert_eq!(config.source, Some(dir.path().join(CONFIG_FILE_NAME)));

    // an explicit relative path is also taken from the run directory
    let config = load_config(Some(Path::new("custom.toml")), dir.path()).unwrap();
    assert_eq!(config.project.version.as_deref(), Some("5"));
}
