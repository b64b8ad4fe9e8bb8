//! Preference flags store.
//!
//! # Responsibility
//! - Hold named boolean preferences with defaults.
//! - Answer the text-to-speech "should speak" decision.
//!
//! # Invariants
//! - Flag names match `^[a-z][a-z0-9_]*$`.
//! - Unknown flags read as `false` until set or toggled.
//! - Memory state is authoritative; persistence failures are only logged.

use crate::repo::setting_repo::SettingRepository;
use log::{error, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Quote read-aloud is allowed.
pub const SPEECH_ENABLED: &str = "speech_enabled";
/// Daily reminder should be scheduled on foreground.
pub const DAILY_NOTIFICATIONS: &str = "daily_notifications";
/// Dark theme selected.
pub const DARK_THEME: &str = "dark_theme";
/// Quote backgrounds rotate on each new quote.
pub const DYNAMIC_THEMES: &str = "dynamic_themes";

const DEFAULT_FLAGS: &[(&str, bool)] = &[
    (SPEECH_ENABLED, true),
    (DAILY_NOTIFICATIONS, true),
    (DARK_THEME, false),
    (DYNAMIC_THEMES, true),
];

static FLAG_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("valid flag name regex"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    InvalidFlagName(String),
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidFlagName(name) => write!(f, "invalid setting flag name `{name}`"),
        }
    }
}

impl Error for SettingsError {}

/// Named boolean preferences with optional write-through persistence.
pub struct SettingsStore {
    flags: BTreeMap<String, bool>,
    repo: Option<Box<dyn SettingRepository>>,
}

impl SettingsStore {
    /// Creates a store populated with defaults and no persistence.
    pub fn in_memory() -> Self {
        Self {
            flags: default_flags(),
            repo: None,
        }
    }

    /// Creates a store from defaults overlaid with persisted values.
    ///
    /// Rows with invalid names are skipped; a failed read keeps defaults.
    pub fn load(repo: Box<dyn SettingRepository>) -> Self {
        let mut flags = default_flags();
        match repo.load_settings() {
            Ok(stored) => {
                info!(
                    "event=settings_load module=settings status=ok count={}",
                    stored.len()
                );
                for (key, value) in stored {
                    if is_valid_flag_name(&key) {
                        flags.insert(key, value);
                    } else {
                        warn!("event=settings_load module=settings status=skip reason=invalid_key");
                    }
                }
            }
            Err(err) => {
                error!("event=settings_load module=settings status=error error={err}");
            }
        }

        Self {
            flags,
            repo: Some(repo),
        }
    }

    /// Current value of `flag`; unknown flags read as `false`.
    pub fn get(&self, flag: &str) -> bool {
        self.flags.get(flag).copied().unwrap_or(false)
    }

    /// Flips `flag` and returns the new value.
    ///
    /// # Errors
    /// - [`SettingsError::InvalidFlagName`] when `flag` is not a valid name.
    pub fn toggle(&mut self, flag: &str) -> Result<bool, SettingsError> {
        let next = !self.get(flag);
        self.set(flag, next)?;
        Ok(next)
    }

    /// Sets `flag` to `value`.
    ///
    /// # Errors
    /// - [`SettingsError::InvalidFlagName`] when `flag` is not a valid name.
    pub fn set(&mut self, flag: &str, value: bool) -> Result<(), SettingsError> {
        if !is_valid_flag_name(flag) {
            return Err(SettingsError::InvalidFlagName(flag.to_string()));
        }

        self.flags.insert(flag.to_string(), value);
        if let Some(repo) = &self.repo {
            if let Err(err) = repo.save_setting(flag, value) {
                warn!(
                    "event=setting_persist module=settings status=error flag={flag} error={err}"
                );
            }
        }
        Ok(())
    }

    /// Whether the speak action is enabled.
    pub fn should_speak(&self) -> bool {
        self.get(SPEECH_ENABLED)
    }

    /// Snapshot of every known flag, sorted by name.
    pub fn snapshot(&self) -> Vec<(String, bool)> {
        self.flags
            .iter()
            .map(|(key, value)| (key.clone(), *value))
            .collect()
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn default_flags() -> BTreeMap<String, bool> {
    DEFAULT_FLAGS
        .iter()
        .map(|(key, value)| ((*key).to_string(), *value))
        .collect()
}

fn is_valid_flag_name(value: &str) -> bool {
    FLAG_NAME_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::{SettingsError, SettingsStore, DAILY_NOTIFICATIONS, DARK_THEME, SPEECH_ENABLED};

    #[test]
    fn defaults_enable_speech_and_reminders() {
        let store = SettingsStore::in_memory();
        assert!(store.should_speak());
        assert!(store.get(DAILY_NOTIFICATIONS));
        assert!(!store.get(DARK_THEME));
    }

    #[test]
    fn toggle_returns_new_value() {
        let mut store = SettingsStore::in_memory();
        assert_eq!(store.toggle(SPEECH_ENABLED), Ok(false));
        assert!(!store.should_speak());
        assert_eq!(store.toggle(SPEECH_ENABLED), Ok(true));
        assert!(store.should_speak());
    }

    #[test]
    fn unknown_flags_start_false_and_can_be_added() {
        let mut store = SettingsStore::in_memory();
        assert!(!store.get("haptics"));
        assert_eq!(store.toggle("haptics"), Ok(true));
        assert!(store.get("haptics"));
        assert!(store.snapshot().contains(&("haptics".to_string(), true)));
    }

    #[test]
    fn rejects_invalid_flag_names() {
        let mut store = SettingsStore::in_memory();
        for name in ["", "Speech", "9lives", "has space", "dash-name"] {
            assert_eq!(
                store.toggle(name),
                Err(SettingsError::InvalidFlagName(name.to_string()))
            );
        }
    }
}
