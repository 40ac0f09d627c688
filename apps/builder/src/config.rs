use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Default quiescence window before an edit is autosaved.
pub const DEFAULT_AUTOSAVE_MS: u64 = 2000;

/// Browser local storage allows roughly 5 MiB per origin; the file store keeps the same budget.
pub const DEFAULT_STORE_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub store_path: PathBuf,
    pub autosave_delay: Duration,
    pub store_quota_bytes: usize,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            store_path: std::env::var("RESUME_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("resume-builder.json")),
            autosave_delay: Duration::from_millis(parse_env(
                "RESUME_AUTOSAVE_MS",
                DEFAULT_AUTOSAVE_MS,
            )?),
            store_quota_bytes: parse_env("RESUME_STORE_QUOTA_BYTES", DEFAULT_STORE_QUOTA_BYTES)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings {
            autosave_delay: self.autosave_delay,
        }
    }
}

/// The subset of configuration the session layer needs.
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    pub autosave_delay: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        SessionSettings {
            autosave_delay: Duration::from_millis(DEFAULT_AUTOSAVE_MS),
        }
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_session_settings_use_two_seconds() {
        assert_eq!(
            SessionSettings::default().autosave_delay,
            Duration::from_millis(2000)
        );
    }

    #[test]
    fn test_parse_env_falls_back_when_unset() {
        let v: u64 = parse_env("RESUME_TEST_SURELY_UNSET_KEY", 42).unwrap();
        assert_eq!(v, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("RESUME_TEST_BAD_NUMBER", "soon");
        let r: Result<u64> = parse_env("RESUME_TEST_BAD_NUMBER", 1);
        assert!(r.is_err());
        std::env::remove_var("RESUME_TEST_BAD_NUMBER");
    }
}
