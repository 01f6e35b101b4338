//! Tests for config file resolution
//!
//! Tests that manipulate PASSBOARD_CONFIG are marked with #[serial] so they do
//! not race each other.

use passboard_common::config::{load_config, TomlConfig, CONFIG_ENV_VAR};
use passboard_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;

fn write_config(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write temp config");
    file
}

#[test]
#[serial]
fn test_cli_path_takes_priority_over_env() {
    let cli_file = write_config("pass_store_url = \"http://cli.example\"\n");
    let env_file = write_config("pass_store_url = \"http://env.example\"\n");
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let config = load_config(Some(cli_file.path())).unwrap();
    assert_eq!(config.pass_store_url, "http://cli.example");

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_env_path_used_without_cli_arg() {
    let env_file = write_config(
        r#"
        index_endpoint = "https://rpc.env.example"

        [enrichment]
        concurrency = 2
        timeout_ms = 500
        "#,
    );
    env::set_var(CONFIG_ENV_VAR, env_file.path());

    let config = load_config(None).unwrap();
    assert_eq!(config.index_endpoint, "https://rpc.env.example");
    assert_eq!(config.enrichment.concurrency, 2);
    assert_eq!(config.enrichment.timeout_ms, 500);

    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_missing_explicit_file_is_error() {
    env::remove_var(CONFIG_ENV_VAR);
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("does-not-exist.toml");

    let result = load_config(Some(&missing));
    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_invalid_values_in_file_rejected() {
    let file = write_config("[pagination]\npage_size = 0\n");

    let result = TomlConfig::from_file(file.path());
    assert!(matches!(result, Err(Error::Config(_))));
}
