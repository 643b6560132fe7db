//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

/// Removes the var on creation and on drop.
struct EnvGuard(&'static str);

impl EnvGuard {
    fn new(name: &'static str) -> Self {
        env::remove_var(name);
        EnvGuard(name)
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        env::remove_var(self.0);
    }
}

fn temp_config(name: &str, contents: &str) -> PathBuf {
    let path = env::temp_dir().join(format!("crushplays_test_{name}.toml"));
    fs::write(&path, contents).expect("Failed to write test config");
    path
}

#[test]
fn default_config_path_points_into_crushplays_dir() {
    let path = default_config_path().expect("Should have default path");
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("crushplays") && path_str.ends_with("config.toml"),
        "unexpected default config path: {path_str}"
    );
}

#[test]
fn default_log_path_ends_with_crushplays_log() {
    let path = default_log_path();
    assert!(path.to_string_lossy().ends_with("crushplays.log"));
}

#[test]
fn resolved_defaults() {
    let config = ResolvedConfig::default();
    assert_eq!(config.volume, 0.5);
    assert!(config.muted);
    assert!(!config.autoplay);
    assert_eq!(config.compliment_interval, Duration::from_secs(10));
    assert_eq!(config.audio_base_url, "http://localhost:3000");
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(result, Ok(None));
}

#[test]
fn load_config_file_parses_valid_toml() {
    let path = temp_config(
        "valid",
        r#"
volume = 0.8
muted = false
autoplay = true
compliment_interval_secs = 4
audio_base_url = "http://cards.local:8080"
log_file_path = "/tmp/crushplays-test.log"
"#,
    );

    let config = load_config_file(&path).unwrap().unwrap();
    assert_eq!(config.volume, Some(0.8));
    assert_eq!(config.muted, Some(false));
    assert_eq!(config.autoplay, Some(true));
    assert_eq!(config.compliment_interval_secs, Some(4));
    assert_eq!(
        config.audio_base_url.as_deref(),
        Some("http://cards.local:8080")
    );
    assert_eq!(
        config.log_file_path,
        Some(PathBuf::from("/tmp/crushplays-test.log"))
    );

    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_handles_partial_config() {
    let path = temp_config("partial", "volume = 0.2\n");
    let config = load_config_file(&path).unwrap().unwrap();
    assert_eq!(config.volume, Some(0.2));
    assert_eq!(config.muted, None);
    fs::remove_file(path).ok();
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let path = temp_config("invalid", "this is not valid TOML ][}{");
    match load_config_file(&path) {
        Err(ConfigError::ParseError { path: err_path, .. }) => assert_eq!(err_path, path),
        other => panic!("Expected ParseError, got {other:?}"),
    }
    fs::remove_file(path).ok();
}

#[test]
fn config_file_rejects_unknown_fields() {
    let result: Result<ConfigFile, _> = toml::from_str("theme = \"dark\"\n");
    assert!(result.is_err(), "unknown keys should be rejected");
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_only_given_fields() {
    let file = ConfigFile {
        volume: Some(0.3),
        compliment_interval_secs: Some(5),
        ..ConfigFile::default()
    };
    let resolved = merge_config(Some(file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.volume, 0.3);
    assert_eq!(resolved.compliment_interval, Duration::from_secs(5));
    assert_eq!(resolved.muted, defaults.muted);
    assert_eq!(resolved.audio_base_url, defaults.audio_base_url);
}

#[test]
fn merge_config_ignores_zero_interval() {
    let file = ConfigFile {
        compliment_interval_secs: Some(0),
        ..ConfigFile::default()
    };
    assert_eq!(
        merge_config(Some(file)).compliment_interval,
        Duration::from_secs(10)
    );
}

#[test]
#[serial(crushplays_audio_url)]
fn apply_env_overrides_respects_audio_url() {
    let _guard = EnvGuard::new(AUDIO_URL_ENV);
    env::set_var(AUDIO_URL_ENV, "http://10.0.0.2:3000");

    let result = apply_env_overrides(ResolvedConfig::default());
    assert_eq!(result.audio_base_url, "http://10.0.0.2:3000");
}

#[test]
#[serial(crushplays_audio_url)]
fn apply_env_overrides_no_change_when_env_var_not_set() {
    let _guard = EnvGuard::new(AUDIO_URL_ENV);
    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(crushplays_audio_url)]
fn apply_env_overrides_ignores_blank_value() {
    let _guard = EnvGuard::new(AUDIO_URL_ENV);
    env::set_var(AUDIO_URL_ENV, "  ");
    let base = ResolvedConfig::default();
    assert_eq!(apply_env_overrides(base.clone()), base);
}

#[test]
#[serial(crushplays_config)]
fn load_config_with_precedence_prefers_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let explicit = temp_config("explicit", "volume = 0.1\n");
    let from_env = temp_config("from_env", "volume = 0.9\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(Some(explicit.clone()))
        .unwrap()
        .unwrap();
    assert_eq!(config.volume, Some(0.1));

    fs::remove_file(explicit).ok();
    fs::remove_file(from_env).ok();
}

#[test]
#[serial(crushplays_config)]
fn load_config_with_precedence_uses_env_var_when_no_explicit_path() {
    let _guard = EnvGuard::new(CONFIG_ENV);
    let from_env = temp_config("env_only", "autoplay = true\n");
    env::set_var(CONFIG_ENV, &from_env);

    let config = load_config_with_precedence(None).unwrap().unwrap();
    assert_eq!(config.autoplay, Some(true));

    fs::remove_file(from_env).ok();
}

#[test]
fn apply_cli_overrides_no_overrides() {
    let base = ResolvedConfig::default();
    assert_eq!(apply_cli_overrides(base.clone(), &CliOverrides::default()), base);
}

#[test]
fn apply_cli_overrides_all_flags() {
    let cli = CliOverrides {
        volume: Some(0.9),
        unmuted: true,
        autoplay: true,
        interval_secs: Some(3),
    };
    let resolved = apply_cli_overrides(ResolvedConfig::default(), &cli);
    assert_eq!(resolved.volume, 0.9);
    assert!(!resolved.muted);
    assert!(resolved.autoplay);
    assert_eq!(resolved.compliment_interval, Duration::from_secs(3));
}

#[test]
#[serial(crushplays_audio_url)]
fn precedence_chain_defaults_file_env_cli() {
    let _guard = EnvGuard::new(AUDIO_URL_ENV);
    let path = temp_config(
        "chain",
        "volume = 0.2\naudio_base_url = \"http://file.local\"\nmuted = true\n",
    );
    env::set_var(AUDIO_URL_ENV, "http://env.local");

    let file = load_config_file(&path).unwrap();
    let config = apply_env_overrides(merge_config(file));
    let config = apply_cli_overrides(
        config,
        &CliOverrides {
            volume: Some(0.7),
            ..CliOverrides::default()
        },
    );

    assert_eq!(config.volume, 0.7);
    assert_eq!(config.audio_base_url, "http://env.local");
    assert!(config.muted);
    assert!(!config.autoplay);

    fs::remove_file(path).ok();
}
