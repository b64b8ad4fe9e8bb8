//! Core domain logic for QuoteDay.
//! This crate is the single source of truth for quote, favorite, preference
//! and reminder invariants.

pub mod context;
pub mod db;
pub mod logging;
pub mod model;
pub mod notify;
pub mod repo;
pub mod select;
pub mod service;

pub use context::AppContext;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::catalog::{Catalog, CatalogError};
pub use model::quote::{Category, Quote, QuoteId, QuoteValidationError};
pub use notify::listeners::{ListenerKind, ListenerRegistry, Subscription, SubscriptionId};
pub use notify::memory::{
    InMemoryNotificationPlatform, PlatformCall, ScheduledNotification, UnsupportedPlatform,
};
pub use notify::platform::{
    DailyTrigger, NotificationContent, NotificationEvent, NotificationPlatform,
    NotificationResponse, PermissionStatus, PlatformError, PlatformResult, DEFAULT_ACTION_ID,
};
pub use notify::scheduler::{
    ReminderConfigError, ReminderSchedule, ReminderScheduler, ScheduleOutcome, SchedulerState,
};
pub use notify::session::ReminderSession;
pub use repo::favorite_repo::{FavoriteRepository, SqliteFavoriteRepository};
pub use repo::setting_repo::{SettingRepository, SqliteSettingRepository};
pub use repo::{RepoError, RepoResult};
pub use select::random::{
    pick_random, pick_random_by_category, pick_random_by_category_name, random_quote,
};
pub use service::favorites::FavoritesStore;
pub use service::settings::{
    SettingsError, SettingsStore, DAILY_NOTIFICATIONS, DARK_THEME, DYNAMIC_THEMES, SPEECH_ENABLED,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
