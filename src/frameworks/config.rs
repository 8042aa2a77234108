use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::entities::{ManagerAccount, ManagerId, ManagerIdentity};

const DEFAULT_CONFIG_PATH: &str = "time_off.toml";

// Seed account for the in-memory manager directory.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct ManagerSeed {
    pub id: ManagerId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl From<ManagerSeed> for ManagerAccount {
    fn from(seed: ManagerSeed) -> Self {
        ManagerAccount {
            identity: ManagerIdentity {
                id: seed.id,
                name: seed.name,
                email: seed.email,
            },
            password_hash: seed.password_hash,
        }
    }
}

// Runtime settings: defaults, then the TOML file, then environment.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub session_ttl_seconds: u64,
    pub session_sweep_interval_seconds: u64,
    pub session_cookie_secure: bool,
    pub managers: Vec<ManagerSeed>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            database_url: None,
            session_ttl_seconds: 8 * 60 * 60,
            session_sweep_interval_seconds: 30 * 60,
            session_cookie_secure: false,
            managers: Vec::new(),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read(path, err) => {
                write!(f, "failed to read {}: {err}", path.display())
            }
            ConfigError::Parse(path, err) => {
                write!(f, "failed to parse {}: {err}", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Settings {
    // Resolve settings from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        let lookup = |key: &str| std::env::var(key).ok();
        let settings = match lookup("TIME_OFF_CONFIG") {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::from_file(path)?
                } else {
                    Self::default()
                }
            }
        };
        Ok(settings.with_env(lookup))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|err| ConfigError::Read(path.to_path_buf(), err))?;
        toml::from_str(&raw).map_err(|err| ConfigError::Parse(path.to_path_buf(), err))
    }

    // Apply environment overrides; unparsable values keep the current setting.
    pub fn with_env(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(host) = lookup("TIME_OFF_HOST").filter(|v| !v.trim().is_empty()) {
            self.host = host;
        }
        override_parsed(&lookup, "TIME_OFF_PORT", &mut self.port);
        if let Some(url) = lookup("DATABASE_URL") {
            self.database_url = Some(url).filter(|v| !v.trim().is_empty());
        }
        override_parsed(&lookup, "SESSION_TTL_SECONDS", &mut self.session_ttl_seconds);
        override_parsed(
            &lookup,
            "SESSION_SWEEP_INTERVAL_SECONDS",
            &mut self.session_sweep_interval_seconds,
        );
        override_parsed(&lookup, "SESSION_COOKIE_SECURE", &mut self.session_cookie_secure);
        self
    }

    pub fn session_ttl(&self) -> Duration {
        Duration::from_secs(self.session_ttl_seconds.max(1))
    }

    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.session_sweep_interval_seconds.max(1))
    }
}

fn override_parsed<T: std::str::FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    slot: &mut T,
) {
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *slot = value,
        Err(_) => tracing::warn!(key, value = %raw, "ignoring unparsable setting"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn when_nothing_is_configured_then_defaults_apply() {
        let settings = Settings::default().with_env(env(&[]));

        assert_eq!(settings.port, 3000);
        assert_eq!(settings.database_url, None);
        assert_eq!(settings.session_ttl(), Duration::from_secs(28_800));
        assert_eq!(settings.sweep_interval(), Duration::from_secs(1_800));
        assert!(!settings.session_cookie_secure);
    }

    #[test]
    fn when_toml_lists_managers_then_they_are_parsed() {
        let settings: Settings = toml::from_str(
            r#"
            port = 8080
            session_ttl_seconds = 600

            [[managers]]
            id = 1
            name = "Sarah Johnson"
            email = "sarah@example.com"
            password_hash = "$argon2id$v=19$m=19456,t=2,p=1$abc$def"
            "#,
        )
        .expect("expected config to parse");

        assert_eq!(settings.port, 8080);
        assert_eq!(settings.session_ttl_seconds, 600);
        assert_eq!(settings.host, "127.0.0.1");
        assert_eq!(settings.managers.len(), 1);
        let account = ManagerAccount::from(settings.managers[0].clone());
        assert_eq!(account.identity.name, "Sarah Johnson");
    }

    #[test]
    fn when_env_overrides_file_values_then_env_wins() {
        let settings = Settings {
            port: 8080,
            ..Settings::default()
        }
        .with_env(env(&[
            ("TIME_OFF_PORT", "9090"),
            ("DATABASE_URL", "postgres://localhost/time_off"),
            ("SESSION_COOKIE_SECURE", "true"),
            ("SESSION_TTL_SECONDS", "not-a-number"),
        ]));

        assert_eq!(settings.port, 9090);
        assert_eq!(
            settings.database_url.as_deref(),
            Some("postgres://localhost/time_off")
        );
        assert!(settings.session_cookie_secure);
        assert_eq!(settings.session_ttl_seconds, 28_800);
    }

    #[test]
    fn when_database_url_is_blank_then_in_memory_storage_is_used() {
        let settings = Settings {
            database_url: Some("postgres://file".to_string()),
            ..Settings::default()
        }
        .with_env(env(&[("DATABASE_URL", "  ")]));

        assert_eq!(settings.database_url, None);
    }

    #[test]
    fn when_config_file_is_missing_then_read_error_names_path() {
        let err = Settings::from_file(Path::new("/nonexistent/time_off.toml"))
            .expect_err("expected missing file to fail");

        assert!(err.to_string().contains("/nonexistent/time_off.toml"));
    }
}
