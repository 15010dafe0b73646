use super::data::{mask_secret, path_display, ApiKeys, Config, ConfigKey, WindowConfig};
use super::io::ConfigError;
use crate::core::constants::{DEFAULT_MODEL, PLACEHOLDER_API_KEY};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_nonexistent_config() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nonexistent_config.toml");

    let config = Config::load_from_path(&config_path).expect("Failed to load config");

    assert_eq!(config, Config::default());
    assert!(!config_path.exists());
}

#[test]
fn first_run_creates_placeholder_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("nested").join("config.toml");

    let config = Config::load_or_create(&config_path).expect("Failed to create config");

    assert!(config_path.exists());
    assert_eq!(config.api_keys.openai.as_deref(), Some(PLACEHOLDER_API_KEY));
    assert_eq!(config.model(), DEFAULT_MODEL);

    let contents = fs::read_to_string(&config_path).expect("read back");
    assert!(contents.contains("[api_keys]"));
    assert!(contents.contains(PLACEHOLDER_API_KEY));
}

#[test]
fn load_or_create_keeps_existing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(
        &config_path,
        "model = \"gpt-4o\"\n\n[api_keys]\nopenai = \"sk-real\"\n",
    )
    .expect("write config");

    let config = Config::load_or_create(&config_path).expect("load");

    assert_eq!(config.model(), "gpt-4o");
    assert_eq!(config.stored_api_key(), Some("sk-real"));
    let contents = fs::read_to_string(&config_path).expect("read back");
    assert!(contents.contains("sk-real"));
}

#[test]
fn placeholder_credential_is_reported_missing() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let config = Config::load_or_create(&config_path).expect("create");

    let err = config
        .resolve_api_key_with(None, &config_path)
        .expect_err("placeholder must not be used as a key");

    match err {
        ConfigError::MissingCredential { path } => assert_eq!(path, config_path),
        other => panic!("expected MissingCredential, got {other:?}"),
    }
}

#[test]
fn environment_key_takes_precedence() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    let config = Config {
        api_keys: ApiKeys {
            openai: Some("sk-file".to_string()),
        },
        ..Default::default()
    };

    let from_env = config
        .resolve_api_key_with(Some("  sk-env  ".to_string()), &config_path)
        .expect("env key");
    assert_eq!(from_env, "sk-env");

    let blank_env = config
        .resolve_api_key_with(Some("   ".to_string()), &config_path)
        .expect("file key");
    assert_eq!(blank_env, "sk-file");
}

#[test]
fn malformed_config_is_a_parse_error() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "model = [unterminated").expect("write");

    let err = Config::load_from_path(&config_path).expect_err("should fail");
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().starts_with("Failed to parse config at"));
}

#[test]
fn test_config_persistence_lifecycle() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let config_path = temp_dir.path().join("config.toml");

    let mut config = Config::first_run();
    config.set(ConfigKey::ApiKey, "sk-test-1234".to_string());
    config.set(ConfigKey::Title, "Mini".to_string());
    config.window = WindowConfig {
        width: Some(90),
        height: Some(25),
        movable: Some(false),
        ..config.window
    };
    config.save_to_path(&config_path).expect("save");

    let loaded = Config::load_from_path(&config_path).expect("load");
    assert_eq!(loaded, config);
    assert_eq!(loaded.window_title(), "Mini");
    assert_eq!(loaded.window_size(), (90, 25));
    assert_eq!(loaded.window.movable, Some(false));

    let mut loaded = loaded;
    loaded.unset(ConfigKey::Title);
    loaded.unset(ConfigKey::Model);
    loaded.save_to_path(&config_path).expect("save again");

    let reloaded = Config::load_from_path(&config_path).expect("reload");
    assert_eq!(reloaded.window.title, None);
    assert_eq!(reloaded.model(), DEFAULT_MODEL);
    assert_eq!(reloaded.stored_api_key(), Some("sk-test-1234"));
}

#[test]
fn blank_values_fall_back_to_defaults() {
    let config = Config {
        model: Some("   ".to_string()),
        assistant_name: Some(String::new()),
        ..Default::default()
    };
    assert_eq!(config.model(), DEFAULT_MODEL);
    assert_eq!(config.assistant_name(), "ChatGPT");
    assert_eq!(config.base_url(), "https://api.openai.com/v1");
}

#[test]
fn config_keys_parse_case_insensitively() {
    assert_eq!(ConfigKey::parse("API-KEY"), Some(ConfigKey::ApiKey));
    assert_eq!(ConfigKey::parse(" base-url "), Some(ConfigKey::BaseUrl));
    assert_eq!(ConfigKey::parse("theme"), None);
    for key in ConfigKey::ALL {
        assert_eq!(ConfigKey::parse(key.as_str()), Some(key));
    }
}

#[test]
fn secrets_are_masked() {
    assert_eq!(mask_secret("sk-abcdef1234"), "*********1234");
    assert_eq!(mask_secret("abc"), "***");
}

#[test]
fn test_path_display() {
    let home = std::env::var_os("HOME").map(std::path::PathBuf::from);
    match home {
        Some(home) if home.as_os_str() != "/" => {
            let path = home.join(".config").join("minichat");
            #[cfg(unix)]
            assert_eq!(path_display(&path), "~/.config/minichat");
        }
        _ => {
            assert_eq!(
                path_display("relative/minichat.toml"),
                "relative/minichat.toml"
            );
        }
    }
}
