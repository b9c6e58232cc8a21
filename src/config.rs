use std::fs;
use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{PadError, Result};
use crate::session::Session;

pub const CONFIG_FILE: &str = "config.json";

/// Settings stored in `.ghostpad/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PadConfig {
    /// Days before a new note expires.
    pub note_lifetime_days: i64,
    /// Reserved notes one user may hold at a time.
    pub max_reserved: usize,
    /// Language given to snippets added from the editor.
    pub default_language: String,
    /// Local identity used when reserving and editing notes.
    pub user_id: Option<Uuid>,
}

impl Default for PadConfig {
    fn default() -> Self {
        Self {
            note_lifetime_days: 30,
            max_reserved: 3,
            default_language: "javascript".to_string(),
            user_id: None,
        }
    }
}

impl PadConfig {
    /// Load the config from `pad_dir`, falling back to defaults if the file is missing.
    pub fn load(pad_dir: &Path) -> Result<Self> {
        let path = pad_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(&path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.note_lifetime_days <= 0 {
            return Err(PadError::InvalidInput(format!(
                "note_lifetime_days must be positive, got {}",
                self.note_lifetime_days
            )));
        }
        Ok(())
    }

    /// Expiry of a note created at `now`.
    pub fn expires_at(&self, now: DateTime<Utc>) -> Result<DateTime<Utc>> {
        Duration::try_days(self.note_lifetime_days)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                PadError::InvalidInput(format!(
                    "note_lifetime_days out of range: {}",
                    self.note_lifetime_days
                ))
            })
    }

    pub fn save(&self, pad_dir: &Path) -> Result<()> {
        let raw = serde_json::to_string_pretty(self)?;
        fs::write(pad_dir.join(CONFIG_FILE), raw)?;
        Ok(())
    }

    pub fn session(&self) -> Session {
        match self.user_id {
            Some(id) => Session::signed_in(id),
            None => Session::anonymous(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = PadConfig::default();
        assert_eq!(config.note_lifetime_days, 30);
        assert_eq!(config.max_reserved, 3);
        assert_eq!(config.default_language, "javascript");
        assert!(!config.session().is_signed_in());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = PadConfig::load(tmp.path()).unwrap();
        assert_eq!(config, PadConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let tmp = TempDir::new().unwrap();
        let config = PadConfig {
            max_reserved: 5,
            user_id: Some(Uuid::new_v4()),
            ..PadConfig::default()
        };
        config.save(tmp.path()).unwrap();

        let loaded = PadConfig::load(tmp.path()).unwrap();
        assert_eq!(loaded, config);
        assert!(loaded.session().is_signed_in());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(CONFIG_FILE), r#"{"max_reserved": 1}"#).unwrap();
        let config = PadConfig::load(tmp.path()).unwrap();
        assert_eq!(config.max_reserved, 1);
        assert_eq!(config.note_lifetime_days, 30);
    }

    #[test]
    fn test_non_positive_lifetime_is_rejected() {
        let tmp = TempDir::new().unwrap();
        for raw in [r#"{"note_lifetime_days": 0}"#, r#"{"note_lifetime_days": -5}"#] {
            fs::write(tmp.path().join(CONFIG_FILE), raw).unwrap();
            assert!(matches!(
                PadConfig::load(tmp.path()),
                Err(PadError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn test_expires_at() {
        let now = Utc::now();
        let config = PadConfig::default();
        assert_eq!(config.expires_at(now).unwrap(), now + Duration::days(30));

        let huge = PadConfig {
            note_lifetime_days: 10_000_000_000,
            ..PadConfig::default()
        };
        assert!(matches!(huge.expires_at(now), Err(PadError::InvalidInput(_))));

        let beyond_duration = PadConfig {
            note_lifetime_days: i64::MAX,
            ..PadConfig::default()
        };
        assert!(matches!(
            beyond_duration.expires_at(now),
            Err(PadError::InvalidInput(_))
        ));
    }
}
