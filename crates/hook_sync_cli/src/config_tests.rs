use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_app_config_default() {
    let config = AppConfig::default();

    assert!(config.github.owner.is_empty());
    assert_eq!(config.authentication.auth_method, "token");
    assert_eq!(config.authentication.token_env, "GITHUB_TOKEN");
    assert_eq!(config.state.path, PathBuf::from("hook-sync-state.json"));
}

#[test]
fn test_app_config_load_minimal_file_uses_defaults() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("hook-sync.toml");
    fs::write(&config_path, "[github]\nowner = \"my-org\"\n").expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(config.github.owner, "my-org");
    assert!(config.github.api_url.is_none());
    assert_eq!(config.authentication.auth_method, "token");
    assert_eq!(config.authentication.token_env, "GITHUB_TOKEN");
    assert_eq!(config.state.path, PathBuf::from("hook-sync-state.json"));
}

#[test]
fn test_app_config_load_app_authentication() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("hook-sync.toml");
    fs::write(
        &config_path,
        r#"
[github]
owner = "my-org"
api_url = "https://github.example.com/api/v3"

[authentication]
auth_method = "app"
app_id = 12345
installation_id = 678
private_key_path = "key.pem"

[state]
path = "state/webhooks.json"
"#,
    )
    .expect("Failed to write config");

    let config = AppConfig::load(&config_path).expect("Failed to load config");

    assert_eq!(
        config.github.api_url.as_deref(),
        Some("https://github.example.com/api/v3")
    );
    assert_eq!(config.authentication.auth_method, "app");
    assert_eq!(config.authentication.app_id, Some(12345));
    assert_eq!(config.authentication.installation_id, Some(678));
    assert_eq!(
        config.authentication.private_key_path,
        Some(PathBuf::from("key.pem"))
    );
    assert_eq!(config.state.path, PathBuf::from("state/webhooks.json"));
}

#[test]
fn test_app_config_load_invalid_toml() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("invalid_config.toml");

    // Write invalid TOML content
    fs::write(&config_path, "invalid = toml = syntax").expect("Failed to write invalid TOML");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Failed to parse configuration file"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_without_owner() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("hook-sync.toml");
    fs::write(&config_path, "[github]\nowner = \"\"\n").expect("Failed to write config");

    let result = AppConfig::load(&config_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("GitHub owner"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_app_config_load_nonexistent_file() {
    let nonexistent_path = PathBuf::from("nonexistent_config.toml");
    let result = AppConfig::load(&nonexistent_path);

    if let Err(Error::Config(msg)) = result {
        assert!(msg.contains("Configuration file not found"));
    } else {
        panic!("Expected Config error");
    }
}

#[test]
fn test_state_path_prefers_override() {
    let config = AppConfig::default();

    assert_eq!(
        config.state_path(None),
        PathBuf::from("hook-sync-state.json")
    );
    assert_eq!(
        config.state_path(Some(Path::new("/tmp/other.json"))),
        PathBuf::from("/tmp/other.json")
    );
}

#[test]
fn test_get_config_path() {
    assert_eq!(
        get_config_path(Some("custom.toml")),
        PathBuf::from("custom.toml")
    );
    assert!(get_config_path(None).ends_with(DEFAULT_CONFIG_FILENAME));
}
