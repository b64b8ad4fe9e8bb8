//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose quote selection, favorites and preference flags to Dart via FRB.
//! - Hand Dart a ready-made daily reminder plan; the Dart side owns the
//!   notification plugin, always cancels every app reminder first and then
//!   schedules the plan only when one is returned.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One `AppHandle` owns one `AppContext`; there is no process-global state.

use log::{debug, warn};
use quoteday_core::db::{open_db, share};
use quoteday_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    AppContext, Catalog, Category, Quote, UnsupportedPlatform, DAILY_NOTIFICATIONS,
};
use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

const DB_PATH_ENV: &str = "QUOTEDAY_DB_PATH";

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Quote row rendered by Dart list and card widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteItem {
    pub id: String,
    pub text: String,
    pub author: String,
    /// Category id (`motivation|success|wisdom|leadership|life`).
    pub category: String,
    pub category_name: String,
    pub category_icon: String,
}

/// Category tile with its quote count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryItem {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub quote_count: u32,
}

/// Outcome of a preference flag toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingResponse {
    pub ok: bool,
    /// New flag value; meaningful only when `ok`.
    pub value: bool,
    pub message: String,
}

/// Daily reminder the Dart side registers after cancelling prior ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderPlan {
    pub title: String,
    pub body: String,
    pub hour: u8,
    pub minute: u8,
    pub repeats: bool,
    pub quote_id: String,
}

/// Opaque per-app state handle held by Dart.
#[flutter_rust_bridge::frb(opaque)]
pub struct AppHandle {
    context: Mutex<AppContext>,
}

/// Opens app state, loading favorites/settings from `db_path`.
///
/// Falls back to `QUOTEDAY_DB_PATH`, then to memory-only state when no path
/// is given or the database cannot be opened.
#[flutter_rust_bridge::frb(sync)]
pub fn app_open(db_path: Option<String>) -> AppHandle {
    let catalog = Arc::new(Catalog::builtin());
    let platform = Arc::new(UnsupportedPlatform);

    let context = match resolve_db_path(db_path) {
        Some(path) => match open_db(&path) {
            Ok(conn) => AppContext::with_storage(catalog, platform, share(conn)),
            Err(err) => {
                warn!("event=app_open module=ffi status=degraded storage=memory error={err}");
                AppContext::new(catalog, platform)
            }
        },
        None => AppContext::new(catalog, platform),
    };

    AppHandle {
        context: Mutex::new(context),
    }
}

impl AppHandle {
    /// Random quote, avoiding `exclude_text` when possible.
    #[flutter_rust_bridge::frb(sync)]
    pub fn random_quote(&self, exclude_text: Option<String>) -> QuoteItem {
        self.with_context(|context| to_quote_item(context.next_quote(exclude_text.as_deref())))
    }

    /// Quotes in `category`; unknown ids yield an empty list.
    #[flutter_rust_bridge::frb(sync)]
    pub fn quotes_by_category(&self, category: String) -> Vec<QuoteItem> {
        let Some(category) = Category::parse(&category) else {
            return Vec::new();
        };
        self.with_context(|context| {
            context
                .quotes_in_category(category)
                .into_iter()
                .map(to_quote_item)
                .collect()
        })
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn categories(&self) -> Vec<CategoryItem> {
        self.with_context(|context| {
            Category::ALL
                .iter()
                .map(|category| CategoryItem {
                    id: category.as_str().to_string(),
                    name: category.display_name().to_string(),
                    icon: category.icon().to_string(),
                    quote_count: u32::try_from(context.catalog().count_in(*category))
                        .unwrap_or(u32::MAX),
                })
                .collect()
        })
    }

    /// Flips favorite membership; `None` for ids outside the catalog.
    #[flutter_rust_bridge::frb(sync)]
    pub fn favorite_toggle(&self, quote_id: String) -> Option<bool> {
        self.with_context(|context| context.toggle_favorite(quote_id.trim()))
    }

    /// Returns `true` when the quote was newly added.
    #[flutter_rust_bridge::frb(sync)]
    pub fn favorite_add(&self, quote_id: String) -> bool {
        self.with_context(|context| {
            let Some(quote) = context.catalog().get(quote_id.trim()).cloned() else {
                return false;
            };
            context.favorites_mut().add(quote)
        })
    }

    /// Returns `true` when a favorite was removed.
    #[flutter_rust_bridge::frb(sync)]
    pub fn favorite_remove(&self, quote_id: String) -> bool {
        self.with_context(|context| context.favorites_mut().remove(quote_id.trim()))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn is_favorite(&self, quote_id: String) -> bool {
        self.with_context(|context| context.favorites().is_favorite(quote_id.trim()))
    }

    /// Favorites in the order they were added.
    #[flutter_rust_bridge::frb(sync)]
    pub fn favorites(&self) -> Vec<QuoteItem> {
        self.with_context(|context| context.favorites().list().iter().map(to_quote_item).collect())
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn setting_get(&self, flag: String) -> bool {
        self.with_context(|context| context.settings().get(flag.trim()))
    }

    #[flutter_rust_bridge::frb(sync)]
    pub fn setting_toggle(&self, flag: String) -> SettingResponse {
        self.with_context(|context| match context.settings_mut().toggle(flag.trim()) {
            Ok(value) => SettingResponse {
                ok: true,
                value,
                message: String::new(),
            },
            Err(err) => SettingResponse {
                ok: false,
                value: false,
                message: format!("setting_toggle failed: {err}"),
            },
        })
    }

    /// Whether the speak button is enabled.
    #[flutter_rust_bridge::frb(sync)]
    pub fn should_speak(&self) -> bool {
        self.with_context(|context| context.settings().should_speak())
    }

    /// Share-sheet text for a catalog quote.
    #[flutter_rust_bridge::frb(sync)]
    pub fn share_text(&self, quote_id: String) -> Option<String> {
        self.with_context(|context| {
            let quote = context.catalog().get(quote_id.trim())?;
            Some(context.share_text(quote))
        })
    }

    /// Text to read aloud; `None` when speech is off or the id is unknown.
    #[flutter_rust_bridge::frb(sync)]
    pub fn speech_text(&self, quote_id: String) -> Option<String> {
        self.with_context(|context| {
            let quote = context.catalog().get(quote_id.trim())?;
            context.speech_text(quote)
        })
    }

    /// Picks the next reminder quote and renders its payload.
    ///
    /// Dart must cancel all scheduled app reminders before acting on the
    /// result. `None` means `daily_notifications` is off and nothing is
    /// scheduled again.
    #[flutter_rust_bridge::frb(sync)]
    pub fn reminder_plan(&self) -> Option<ReminderPlan> {
        self.with_context(|context| {
            if !context.settings().get(DAILY_NOTIFICATIONS) {
                debug!("event=reminder_plan module=ffi status=skip reason=disabled");
                return None;
            }
            let schedule = context.scheduler().schedule();
            let quote = context.next_quote(None);
            let content = schedule.content_for(quote);
            let trigger = schedule.trigger();
            Some(ReminderPlan {
                title: content.title,
                body: content.body,
                hour: trigger.hour,
                minute: trigger.minute,
                repeats: trigger.repeats,
                quote_id: quote.id.clone(),
            })
        })
    }

    fn with_context<T>(&self, f: impl FnOnce(&mut AppContext) -> T) -> T {
        let mut guard = self.context.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

fn resolve_db_path(explicit: Option<String>) -> Option<PathBuf> {
    explicit
        .or_else(|| std::env::var(DB_PATH_ENV).ok())
        .map(|raw| raw.trim().to_string())
        .filter(|trimmed| !trimmed.is_empty())
        .map(PathBuf::from)
}

fn to_quote_item(quote: &Quote) -> QuoteItem {
    QuoteItem {
        id: quote.id.clone(),
        text: quote.text.clone(),
        author: quote.author.clone(),
        category: quote.category.as_str().to_string(),
        category_name: quote.category.display_name().to_string(),
        category_icon: quote.category.icon().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{app_open, core_version, init_logging, ping};

    fn memory_handle() -> super::AppHandle {
        app_open(Some("   ".to_string()))
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn random_quote_avoids_excluded_text() {
        let handle = memory_handle();
        let first = handle.random_quote(None);
        for _ in 0..50 {
            let next = handle.random_quote(Some(first.text.clone()));
            assert_ne!(next.text, first.text);
        }
    }

    #[test]
    fn categories_cover_catalog() {
        let handle = memory_handle();
        let categories = handle.categories();
        assert_eq!(categories.len(), 5);
        assert_eq!(categories.iter().map(|c| c.quote_count).sum::<u32>(), 20);
        let wisdom = categories
            .iter()
            .find(|c| c.id == "wisdom")
            .expect("wisdom tile");
        assert_eq!(
            handle.quotes_by_category("wisdom".to_string()).len(),
            wisdom.quote_count as usize
        );
        assert!(handle.quotes_by_category("humor".to_string()).is_empty());
    }

    #[test]
    fn favorites_flow_through_handle() {
        let handle = memory_handle();
        assert!(handle.favorite_add("5".to_string()));
        assert!(!handle.favorite_add("5".to_string()));
        assert!(!handle.favorite_add("missing".to_string()));
        assert_eq!(handle.favorite_toggle("9".to_string()), Some(true));
        assert_eq!(handle.favorite_toggle("missing".to_string()), None);

        let ids = handle
            .favorites()
            .into_iter()
            .map(|item| item.id)
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["5".to_string(), "9".to_string()]);

        assert!(handle.favorite_remove("5".to_string()));
        assert!(!handle.is_favorite("5".to_string()));
    }

    #[test]
    fn setting_toggle_reports_new_value_and_errors() {
        let handle = memory_handle();
        assert!(handle.should_speak());
        let response = handle.setting_toggle("speech_enabled".to_string());
        assert!(response.ok);
        assert!(!response.value);
        assert!(!handle.should_speak());

        let response = handle.setting_toggle("Bad Flag".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("invalid setting flag name"));
    }

    #[test]
    fn reminder_plan_targets_nine_am() {
        let plan = memory_handle()
            .reminder_plan()
            .expect("reminders are on by default");
        assert_eq!((plan.hour, plan.minute, plan.repeats), (9, 0, true));
        assert_eq!(plan.title, "Daily Quote");
        assert!(plan.body.starts_with('"'));
        assert!(!plan.quote_id.is_empty());
    }

    #[test]
    fn reminder_plan_is_withheld_when_reminders_are_off() {
        let handle = memory_handle();
        let response = handle.setting_toggle("daily_notifications".to_string());
        assert!(response.ok);
        assert!(!response.value);
        assert_eq!(handle.reminder_plan(), None);

        handle.setting_toggle("daily_notifications".to_string());
        assert!(handle.reminder_plan().is_some());
    }

    #[test]
    fn share_and_speech_text_follow_catalog_and_speech_flag() {
        let handle = memory_handle();
        let share = handle.share_text("5".to_string()).expect("catalog quote");
        assert_eq!(
            share,
            "\"In the middle of difficulty lies opportunity.\" - Albert Einstein"
        );
        assert_eq!(
            handle.speech_text("5".to_string()).as_deref(),
            Some("In the middle of difficulty lies opportunity. by Albert Einstein")
        );
        assert_eq!(handle.share_text("missing".to_string()), None);

        handle.setting_toggle("speech_enabled".to_string());
        assert_eq!(handle.speech_text("5".to_string()), None);
    }

    #[test]
    fn app_open_persists_favorites_to_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("favorites.sqlite3");
        let path_str = path.to_str().expect("utf-8 path").to_string();

        {
            let handle = app_open(Some(path_str.clone()));
            assert!(!handle.is_favorite("11".to_string()));
            assert!(handle.favorite_add("11".to_string()));
        }
        let reopened = app_open(Some(path_str));
        assert!(reopened.is_favorite("11".to_string()));
    }
}
