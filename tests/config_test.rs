// tests/config_test.rs
use git_release::config::{load_file_config, resolve_identity, FileConfig, Identity};
use git_release::error::ReleaseError;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[test]
fn test_default_config() {
    let config = FileConfig::default();
    assert_eq!(config.remote, None);
    assert_eq!(config.ssh_key, None);
    assert_eq!(
        config.primary_branches,
        vec!["main".to_string(), "master".to_string()]
    );
    assert!(config.always_include_number);
}

#[test]
fn test_load_from_file() {
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
remote = "upstream"
ssh_key = "/home/tagger/.ssh/deploy_key"
primary_branches = ["main", "release"]
always_include_number = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_file_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.remote, Some("upstream".to_string()));
    assert_eq!(
        config.ssh_key,
        Some(PathBuf::from("/home/tagger/.ssh/deploy_key"))
    );
    assert_eq!(
        config.primary_branches,
        vec!["main".to_string(), "release".to_string()]
    );
    assert!(!config.always_include_number);
}

#[test]
fn test_partial_file_keeps_defaults() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = \"backup\"\n").unwrap();
    temp_file.flush().unwrap();

    let config = load_file_config(Some(temp_file.path())).unwrap();
    assert_eq!(config.remote, Some("backup".to_string()));
    assert_eq!(config.ssh_key, None);
    assert_eq!(
        config.primary_branches,
        vec!["main".to_string(), "master".to_string()]
    );
    assert!(config.always_include_number);
}

#[test]
fn test_invalid_toml_is_a_config_error() {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(b"remote = [not toml").unwrap();
    temp_file.flush().unwrap();

    let err = load_file_config(Some(temp_file.path())).expect_err("parse should fail");
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_missing_explicit_path_fails() {
    let path = PathBuf::from("/nonexistent/release.toml");
    let err = load_file_config(Some(&path)).expect_err("read should fail");
    match err {
        ReleaseError::Config(msg) => assert!(msg.contains("cannot read")),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_identity_completeness() {
    let nobody = Identity::default();
    assert!(nobody.is_empty());
    assert!(!nobody.is_complete());

    let name_only = Identity {
        name: "Alice".to_string(),
        email: String::new(),
    };
    assert!(!name_only.is_empty());
    assert!(!name_only.is_complete());

    let full = Identity {
        name: "Alice".to_string(),
        email: "alice@example.com".to_string(),
    };
    assert!(!full.is_empty());
    assert!(full.is_complete());
}

#[test]
fn test_resolve_identity_prefers_flags() {
    // Explicit flags win over whatever git config the host carries.
    let identity = resolve_identity("Release Bot", "bot@example.com");
    assert_eq!(identity.name, "Release Bot");
    assert_eq!(identity.email, "bot@example.com");
}
