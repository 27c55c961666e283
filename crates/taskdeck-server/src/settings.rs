//! Layered server configuration.
//!
//! Settings are loaded from three layers (in priority order):
//!
//! 1. **Compiled defaults** — [`Settings::default()`]
//! 2. **JSON file** — optional, partial files are fine (missing sections
//!    keep their defaults)
//! 3. **Environment variables** — `TASKDECK_*` overrides (highest priority)

use std::path::Path;

use serde::{Deserialize, Serialize};
use taskdeck_notify::SmtpConfig;
use thiserror::Error;

/// Development-only token secret used when none is configured.
pub const DEV_SECRET: &str = "taskdeck-dev-secret";

/// Errors from loading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// Settings file could not be read.
    #[error("failed to read settings at {path}: {reason}")]
    Read {
        /// File path.
        path: String,
        /// Error description.
        reason: String,
    },
    /// Settings file is not valid JSON for the expected shape.
    #[error("failed to parse settings at {path}: {reason}")]
    Parse {
        /// File path.
        path: String,
        /// Error description.
        reason: String,
    },
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerSettings {
    /// Host to bind.
    pub host: String,
    /// Port to bind (0 for auto-assign).
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Database settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatabaseSettings {
    /// Path to the SQLite database file.
    pub path: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: "taskdeck.db".to_string(),
        }
    }
}

/// Auth settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AuthSettings {
    /// Secret used to sign session tokens.
    pub secret: String,
}

impl Default for AuthSettings {
    fn default() -> Self {
        Self {
            secret: DEV_SECRET.to_string(),
        }
    }
}

/// SMTP settings. Absent entirely when mail is disabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SmtpSettings {
    /// SMTP host.
    pub host: String,
    /// SMTP port.
    #[serde(default = "default_smtp_port")]
    pub port: u16,
    /// Optional username.
    #[serde(default)]
    pub username: Option<String>,
    /// Optional password.
    #[serde(default)]
    pub password: Option<String>,
    /// Sender address.
    pub from: String,
}

fn default_smtp_port() -> u16 {
    587
}

impl SmtpSettings {
    /// Convert into the notifier's transport config.
    #[must_use]
    pub fn to_config(&self) -> SmtpConfig {
        SmtpConfig {
            host: self.host.clone(),
            port: self.port,
            username: self.username.clone(),
            password: self.password.clone(),
            from: self.from.clone(),
        }
    }
}

/// Full server settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    /// HTTP server section.
    pub server: ServerSettings,
    /// Database section.
    pub database: DatabaseSettings,
    /// Auth section.
    pub auth: AuthSettings,
    /// SMTP section; `None` disables email notifications.
    pub smtp: Option<SmtpSettings>,
}

impl Settings {
    /// Load settings from an optional JSON file, then apply env overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut settings = match path {
            Some(path) if path.exists() => {
                let raw = std::fs::read_to_string(path).map_err(|e| SettingsError::Read {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
                serde_json::from_str(&raw).map_err(|e| SettingsError::Parse {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?
            }
            _ => Self::default(),
        };
        settings.apply_env(|key| std::env::var(key).ok());
        Ok(settings)
    }

    /// Apply `TASKDECK_*` overrides from an environment lookup.
    ///
    /// Takes the lookup as a closure so tests can inject values without
    /// mutating the process environment.
    pub fn apply_env(&mut self, get: impl Fn(&str) -> Option<String>) {
        if let Some(host) = get("TASKDECK_HOST") {
            self.server.host = host;
        }
        if let Some(port) = get("TASKDECK_PORT").and_then(|p| p.parse().ok()) {
            self.server.port = port;
        }
        if let Some(path) = get("TASKDECK_DB_PATH") {
            self.database.path = path;
        }
        if let Some(secret) = get("TASKDECK_AUTH_SECRET") {
            self.auth.secret = secret;
        }
        if let Some(host) = get("TASKDECK_SMTP_HOST") {
            let smtp = self.smtp.get_or_insert_with(|| SmtpSettings {
                host: String::new(),
                port: default_smtp_port(),
                username: None,
                password: None,
                from: String::new(),
            });
            smtp.host = host;
        }
        if let Some(smtp) = self.smtp.as_mut() {
            if let Some(port) = get("TASKDECK_SMTP_PORT").and_then(|p| p.parse().ok()) {
                smtp.port = port;
            }
            if let Some(username) = get("TASKDECK_SMTP_USERNAME") {
                smtp.username = Some(username);
            }
            if let Some(password) = get("TASKDECK_SMTP_PASSWORD") {
                smtp.password = Some(password);
            }
            if let Some(from) = get("TASKDECK_SMTP_FROM") {
                smtp.from = from;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.auth.secret, DEV_SECRET);
        assert!(settings.smtp.is_none());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let settings = Settings::load(Some(Path::new("/nonexistent/settings.json"))).unwrap();
        assert_eq!(settings.server.port, 8080);
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"server": {"port": 9000}}"#).unwrap();

        let settings = Settings::load(Some(&path)).unwrap();
        assert_eq!(settings.server.port, 9000);
        // Untouched sections keep their defaults
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.database.path, "taskdeck.db");
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let result = Settings::load(Some(&path));
        assert!(matches!(result, Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn env_overrides_win() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TASKDECK_PORT", "4242"),
            ("TASKDECK_AUTH_SECRET", "prod-secret"),
        ]);
        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(ToString::to_string));
        assert_eq!(settings.server.port, 4242);
        assert_eq!(settings.auth.secret, "prod-secret");
    }

    #[test]
    fn smtp_from_env_alone() {
        let env: HashMap<&str, &str> = HashMap::from([
            ("TASKDECK_SMTP_HOST", "smtp.example.com"),
            ("TASKDECK_SMTP_FROM", "noreply@example.com"),
        ]);
        let mut settings = Settings::default();
        settings.apply_env(|key| env.get(key).map(ToString::to_string));
        let smtp = settings.smtp.expect("smtp section created from env");
        assert_eq!(smtp.host, "smtp.example.com");
        assert_eq!(smtp.port, 587);
        assert_eq!(smtp.from, "noreply@example.com");
    }

    #[test]
    fn smtp_settings_convert_to_config() {
        let smtp = SmtpSettings {
            host: "smtp.example.com".into(),
            port: 2525,
            username: Some("mailer".into()),
            password: Some("secret".into()),
            from: "noreply@example.com".into(),
        };
        let config = smtp.to_config();
        assert_eq!(config.host, "smtp.example.com");
        assert_eq!(config.port, 2525);
        assert_eq!(config.username.as_deref(), Some("mailer"));
    }
}
