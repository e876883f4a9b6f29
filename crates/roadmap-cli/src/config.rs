//! Configuration file management for roadmap.
//!
//! Provides a TOML-based config file at `~/.config/roadmap/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use roadmap_core::completion::{ApiSettings, DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Default chat-completion service.
pub const DEFAULT_BASE_URL: &str = "https://api.deepseek.com";

/// Default model name.
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Default per-request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

const APP_TITLE: &str = "roadmap";

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub base_url: String,
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    pub timeout_secs: u64,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the roadmap config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/roadmap` or `~/.config/roadmap`,
/// never the platform-specific `dirs::config_dir()`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("roadmap");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("roadmap")
}

/// Return the path to the roadmap config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
/// Sets file permissions to 0600 on Unix, since the file may hold an API key.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let perms = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(&path, perms)
            .with_context(|| format!("failed to set permissions on {}", path.display()))?;
    }

    Ok(path)
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Values given on the command line; each one beats every other source.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub base_url: Option<String>,
    pub model: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct RoadmapConfig {
    pub base_url: String,
    pub model: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
    pub temperature: f32,
    pub max_tokens: u32,
}

impl RoadmapConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Base URL: `--base-url` > `ROADMAP_BASE_URL` > `api.base_url` > [`DEFAULT_BASE_URL`]
    /// - Model: `--model` > `ROADMAP_MODEL` > `api.model` > [`DEFAULT_MODEL`]
    /// - API key: `--api-key` > `ROADMAP_API_KEY` > `api.api_key` > none
    /// - Timeout: `--timeout-secs` > `ROADMAP_TIMEOUT_SECS` > `api.timeout_secs` > 60
    /// - Temperature and max tokens come from the file only.
    pub fn resolve(cli: &CliOverrides) -> Result<Self> {
        let file_config = load_config().ok();
        Self::resolve_with(cli, file_config.map(|c| c.api))
    }

    fn resolve_with(cli: &CliOverrides, file: Option<ApiSection>) -> Result<Self> {
        let file = file.unwrap_or_default();

        let base_url = pick(cli.base_url.clone(), "ROADMAP_BASE_URL", file.base_url);
        let model = pick(cli.model.clone(), "ROADMAP_MODEL", file.model);

        let api_key = cli
            .api_key
            .clone()
            .or_else(|| env_var("ROADMAP_API_KEY"))
            .or(file.api_key)
            .filter(|key| !key.trim().is_empty());

        let timeout_secs = match cli.timeout_secs {
            Some(secs) => secs,
            None => match env_var("ROADMAP_TIMEOUT_SECS") {
                Some(raw) => raw
                    .trim()
                    .parse()
                    .with_context(|| format!("ROADMAP_TIMEOUT_SECS is not a number: {raw:?}"))?,
                None => file.timeout_secs,
            },
        };

        Ok(Self {
            base_url,
            model,
            api_key,
            timeout: Duration::from_secs(timeout_secs.max(1)),
            temperature: file.temperature,
            max_tokens: file.max_tokens,
        })
    }

    /// Connection settings for the HTTP client, if an API key is available.
    pub fn api_settings(&self) -> Option<ApiSettings> {
        let api_key = self.api_key.clone()?;
        Some(ApiSettings {
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            api_key,
            app_title: APP_TITLE.to_string(),
            referer: String::new(),
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn pick(cli: Option<String>, env: &str, file: String) -> String {
    cli.or_else(|| env_var(env)).unwrap_or(file)
}

/// Show the first and last four characters of a secret.
pub fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}...{tail}")
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const ENV_VARS: [&str; 5] = [
        "ROADMAP_API_KEY",
        "ROADMAP_BASE_URL",
        "ROADMAP_MODEL",
        "ROADMAP_TIMEOUT_SECS",
        "XDG_CONFIG_HOME",
    ];

    fn lock_env() -> std::sync::MutexGuard<'static, ()> {
        crate::test_util::lock_env()
    }

    fn clear_env() {
        for name in ENV_VARS {
            unsafe { std::env::remove_var(name) };
        }
    }

    #[test]
    fn defaults_when_nothing_set() {
        let _lock = lock_env();
        clear_env();

        let config = RoadmapConfig::resolve_with(&CliOverrides::default(), None).unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_key, None);
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.max_tokens, 2000);
        assert!(config.api_settings().is_none());
    }

    #[test]
    fn env_var_overrides_config_file() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var("ROADMAP_MODEL", "env-model") };
        unsafe { std::env::set_var("ROADMAP_API_KEY", "sk-env") };
        unsafe { std::env::set_var("ROADMAP_TIMEOUT_SECS", "15") };

        let file = ApiSection {
            model: "file-model".to_string(),
            api_key: Some("sk-file".to_string()),
            base_url: "https://file.test".to_string(),
            ..ApiSection::default()
        };
        let config = RoadmapConfig::resolve_with(&CliOverrides::default(), Some(file)).unwrap();

        clear_env();

        assert_eq!(config.model, "env-model");
        assert_eq!(config.api_key.as_deref(), Some("sk-env"));
        assert_eq!(config.timeout, Duration::from_secs(15));
        assert_eq!(config.base_url, "https://file.test");
    }

    #[test]
    fn cli_flag_overrides_all() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var("ROADMAP_BASE_URL", "https://env.test") };
        unsafe { std::env::set_var("ROADMAP_API_KEY", "sk-env") };

        let cli = CliOverrides {
            base_url: Some("https://cli.test".to_string()),
            api_key: Some("sk-cli".to_string()),
            timeout_secs: Some(5),
            ..CliOverrides::default()
        };
        let config = RoadmapConfig::resolve_with(&cli, None).unwrap();

        clear_env();

        assert_eq!(config.base_url, "https://cli.test");
        assert_eq!(config.api_key.as_deref(), Some("sk-cli"));
        assert_eq!(config.timeout, Duration::from_secs(5));

        let settings = config.api_settings().unwrap();
        assert_eq!(settings.api_key, "sk-cli");
        assert_eq!(settings.app_title, "roadmap");
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let _lock = lock_env();
        clear_env();

        let file = ApiSection {
            api_key: Some("   ".to_string()),
            ..ApiSection::default()
        };
        let config = RoadmapConfig::resolve_with(&CliOverrides::default(), Some(file)).unwrap();
        assert_eq!(config.api_key, None);
    }

    #[test]
    fn invalid_timeout_env_is_an_error() {
        let _lock = lock_env();
        clear_env();
        unsafe { std::env::set_var("ROADMAP_TIMEOUT_SECS", "soon") };

        let result = RoadmapConfig::resolve_with(&CliOverrides::default(), None);
        clear_env();

        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("ROADMAP_TIMEOUT_SECS"), "unexpected error: {msg}");
    }

    #[test]
    fn partial_config_file_fills_defaults() {
        let parsed: ConfigFile = toml::from_str("[api]\nmodel = \"other\"\n").unwrap();
        assert_eq!(parsed.api.model, "other");
        assert_eq!(parsed.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(parsed.api.timeout_secs, DEFAULT_TIMEOUT_SECS);

        let empty: ConfigFile = toml::from_str("").unwrap();
        assert_eq!(empty.api, ApiSection::default());
    }

    #[cfg(unix)]
    #[test]
    fn save_and_load_config_roundtrip() {
        use std::os::unix::fs::PermissionsExt;

        let _lock = lock_env();
        clear_env();
        let tmp = tempfile::TempDir::new().unwrap();
        unsafe { std::env::set_var("XDG_CONFIG_HOME", tmp.path()) };

        let original = ConfigFile {
            api: ApiSection {
                api_key: Some("sk-roundtrip".to_string()),
                timeout_secs: 30,
                ..ApiSection::default()
            },
        };
        let saved = save_config(&original);
        let loaded = load_config();
        clear_env();

        let path = saved.unwrap();
        assert_eq!(path, tmp.path().join("roadmap").join("config.toml"));
        assert_eq!(loaded.unwrap().api, original.api);

        let meta = std::fs::metadata(&path).unwrap();
        assert_eq!(meta.permissions().mode() & 0o777, 0o600);
    }

    #[test]
    fn config_path_ends_with_expected_filename() {
        let _lock = lock_env();
        let path = config_path();
        assert!(
            path.ends_with("roadmap/config.toml"),
            "unexpected config path: {}",
            path.display()
        );
    }

    #[test]
    fn mask_secret_hides_middle() {
        assert_eq!(mask_secret("sk-1234567890abcd"), "sk-1...abcd");
        assert_eq!(mask_secret("short"), "*****");
    }
}
