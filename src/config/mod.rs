//! Configuration management for jtk.
//!
//! Credentials come from a JSON file in the user's config directory, with
//! `JIRA_DOMAIN`, `JIRA_EMAIL` and `JIRA_API_TOKEN` overriding it field by
//! field. The resolved [`Config`] is built once at start-up and passed down.

mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use store::{clear, config_path, load_file, save_file};

/// Environment variable overriding the site name.
pub const ENV_DOMAIN: &str = "JIRA_DOMAIN";
/// Environment variable overriding the account email.
pub const ENV_EMAIL: &str = "JIRA_EMAIL";
/// Environment variable overriding the API token.
pub const ENV_API_TOKEN: &str = "JIRA_API_TOKEN";

/// Errors reading or writing the configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine the user configuration directory")]
    NoConfigDir,

    #[error("failed to create config directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    #[error("failed to read config file: {0}")]
    ReadError(#[source] std::io::Error),

    #[error("failed to write config file: {0}")]
    WriteError(#[source] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[source] serde_json::Error),

    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] serde_json::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Jira Cloud credentials.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Site name: the `company` in `company.atlassian.net`.
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub api_token: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("domain", &self.domain)
            .field("email", &self.email)
            .field("api_token", &mask_token(&self.api_token))
            .finish()
    }
}

impl Config {
    /// Resolve credentials from the environment and the config file.
    ///
    /// A missing file yields empty values rather than an error.
    pub fn load() -> Result<Self> {
        Self::resolve(
            |name| std::env::var(name).ok(),
            || load_file(&config_path()?),
        )
    }

    /// Environment values win field by field. The file is only read when
    /// the environment leaves a field unset, so a broken file cannot block
    /// env-only credentials.
    fn resolve<E, F>(lookup: E, read_file: F) -> Result<Self>
    where
        E: Fn(&str) -> Option<String>,
        F: FnOnce() -> Result<Config>,
    {
        let from_env = Config::default().with_overrides(&lookup);
        if from_env.is_configured() {
            return Ok(from_env);
        }
        Ok(read_file()?.with_overrides(lookup))
    }

    /// Replace fields with non-empty values from `lookup`.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (ENV_DOMAIN, &mut self.domain),
            (ENV_EMAIL, &mut self.email),
            (ENV_API_TOKEN, &mut self.api_token),
        ];
        for (name, field) in fields {
            if let Some(value) = lookup(name).filter(|v| !v.is_empty()) {
                *field = value;
            }
        }
        self
    }

    /// True when domain, email and token are all set.
    pub fn is_configured(&self) -> bool {
        !self.domain.is_empty() && !self.email.is_empty() && !self.api_token.is_empty()
    }

    /// The token with all but its last four characters hidden.
    pub fn masked_token(&self) -> String {
        mask_token(&self.api_token)
    }
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let visible: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), visible)
}

/// Reduce user input to the bare site name.
///
/// Accepts `company`, `company.atlassian.net` or
/// `https://company.atlassian.net/`.
pub fn normalize_domain(input: &str) -> String {
    let domain = input.trim();
    let domain = domain
        .strip_prefix("https://")
        .or_else(|| domain.strip_prefix("http://"))
        .unwrap_or(domain);
    let domain = domain.trim_end_matches('/');
    domain
        .strip_suffix(".atlassian.net")
        .unwrap_or(domain)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_empty_config_is_not_configured() {
        let config = Config::default().with_overrides(|_| None);
        assert_eq!(config.domain, "");
        assert_eq!(config.email, "");
        assert_eq!(config.api_token, "");
        assert!(!config.is_configured());
    }

    #[test]
    fn test_env_overrides_per_field() {
        let file = Config {
            domain: "filedomain".to_string(),
            email: "file@example.com".to_string(),
            api_token: "filetoken".to_string(),
        };
        let vars = env(&[(ENV_EMAIL, "env@example.com")]);
        let config = file.with_overrides(|name| vars.get(name).cloned());

        assert_eq!(config.domain, "filedomain");
        assert_eq!(config.email, "env@example.com");
        assert_eq!(config.api_token, "filetoken");
        assert!(config.is_configured());
    }

    #[test]
    fn test_empty_env_values_do_not_override() {
        let file = Config {
            domain: "filedomain".to_string(),
            ..Default::default()
        };
        let vars = env(&[(ENV_DOMAIN, "")]);
        let config = file.with_overrides(|name| vars.get(name).cloned());
        assert_eq!(config.domain, "filedomain");
    }

    fn broken_file() -> Result<Config> {
        Err(ConfigError::ParseError(
            serde_json::from_str::<Config>("not json").unwrap_err(),
        ))
    }

    #[test]
    fn test_full_env_skips_broken_file() {
        let vars = env(&[
            (ENV_DOMAIN, "envsite"),
            (ENV_EMAIL, "env@example.com"),
            (ENV_API_TOKEN, "envtoken"),
        ]);
        let config = Config::resolve(|name| vars.get(name).cloned(), broken_file).unwrap();
        assert_eq!(config.domain, "envsite");
        assert!(config.is_configured());
    }

    #[test]
    fn test_partial_env_reports_broken_file() {
        let vars = env(&[(ENV_DOMAIN, "envsite")]);
        assert!(matches!(
            Config::resolve(|name| vars.get(name).cloned(), broken_file),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_partial_env_fills_from_file() {
        let vars = env(&[(ENV_API_TOKEN, "envtoken")]);
        let file = || {
            Ok(Config {
                domain: "filedomain".to_string(),
                email: "file@example.com".to_string(),
                api_token: "filetoken".to_string(),
            })
        };
        let config = Config::resolve(|name| vars.get(name).cloned(), file).unwrap();
        assert_eq!(config.domain, "filedomain");
        assert_eq!(config.api_token, "envtoken");
    }

    #[cfg(target_os = "linux")]
    #[test]
    #[serial]
    fn test_load_uses_process_environment_over_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("jira-ticket-cli").join("config.json");
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, "not json").unwrap();

        let previous_home = std::env::var_os("XDG_CONFIG_HOME");
        std::env::set_var("XDG_CONFIG_HOME", dir.path());
        std::env::set_var(ENV_DOMAIN, "envsite");
        std::env::set_var(ENV_EMAIL, "env@example.com");
        std::env::set_var(ENV_API_TOKEN, "envtoken");

        let loaded = Config::load();

        std::env::remove_var(ENV_DOMAIN);
        std::env::remove_var(ENV_EMAIL);
        std::env::remove_var(ENV_API_TOKEN);
        match previous_home {
            Some(home) => std::env::set_var("XDG_CONFIG_HOME", home),
            None => std::env::remove_var("XDG_CONFIG_HOME"),
        }

        let config = loaded.unwrap();
        assert_eq!(config.domain, "envsite");
        assert!(config.is_configured());
    }

    #[test]
    #[serial]
    fn test_missing_file_and_env_yield_empty_values() {
        std::env::remove_var(ENV_DOMAIN);
        std::env::remove_var(ENV_EMAIL);
        std::env::remove_var(ENV_API_TOKEN);

        let dir = tempfile::tempdir().unwrap();
        let config = load_file(&dir.path().join("config.json"))
            .unwrap()
            .with_overrides(|name| std::env::var(name).ok());

        assert_eq!(config, Config::default());
        assert!(!config.is_configured());
    }

    #[test]
    fn test_masked_token() {
        let config = Config {
            api_token: "ATATT3xFfGF0abcd".to_string(),
            ..Default::default()
        };
        assert_eq!(config.masked_token(), "************abcd");
        assert_eq!(mask_token("abc"), "***");
        assert_eq!(mask_token(""), "");
    }

    #[test]
    fn test_debug_hides_token() {
        let config = Config {
            domain: "d".to_string(),
            email: "e".to_string(),
            api_token: "supersecrettoken".to_string(),
        };
        assert!(!format!("{:?}", config).contains("supersecrettoken"));
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(normalize_domain("company"), "company");
        assert_eq!(normalize_domain("company.atlassian.net"), "company");
        assert_eq!(normalize_domain("https://company.atlassian.net/"), "company");
        assert_eq!(normalize_domain("  http://company.atlassian.net "), "company");
    }
}
