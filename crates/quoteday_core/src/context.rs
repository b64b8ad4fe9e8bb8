//! Application context.
//!
//! # Responsibility
//! - Construct the catalog, stores and scheduler once per process.
//! - Hand them to the presentation layer by reference instead of globals.
//!
//! # Invariants
//! - Favorites and settings are independent; neither reads the scheduler.
//! - The reminder flow honours the `daily_notifications` flag.

use crate::db::SharedConnection;
use crate::model::catalog::Catalog;
use crate::model::quote::{Category, Quote};
use crate::notify::platform::NotificationPlatform;
use crate::notify::scheduler::{ReminderSchedule, ReminderScheduler, ScheduleOutcome};
use crate::repo::favorite_repo::SqliteFavoriteRepository;
use crate::repo::setting_repo::SqliteSettingRepository;
use crate::select::random::{pick_random_by_category, random_quote};
use crate::service::favorites::FavoritesStore;
use crate::service::settings::{SettingsStore, DAILY_NOTIFICATIONS};
use std::sync::Arc;

/// Everything one running app instance needs.
pub struct AppContext {
    catalog: Arc<Catalog>,
    favorites: FavoritesStore,
    settings: SettingsStore,
    scheduler: ReminderScheduler,
}

impl AppContext {
    /// Context whose favorites and settings live only in memory.
    pub fn new(catalog: Arc<Catalog>, platform: Arc<dyn NotificationPlatform>) -> Self {
        Self {
            catalog,
            favorites: FavoritesStore::in_memory(),
            settings: SettingsStore::in_memory(),
            scheduler: ReminderScheduler::new(platform),
        }
    }

    /// Context whose favorites and settings are loaded from and written to
    /// `conn`.
    pub fn with_storage(
        catalog: Arc<Catalog>,
        platform: Arc<dyn NotificationPlatform>,
        conn: SharedConnection,
    ) -> Self {
        Self {
            catalog,
            favorites: FavoritesStore::load(Box::new(SqliteFavoriteRepository::new(Arc::clone(
                &conn,
            )))),
            settings: SettingsStore::load(Box::new(SqliteSettingRepository::new(conn))),
            scheduler: ReminderScheduler::new(platform),
        }
    }

    /// Replaces the reminder time/title.
    pub fn with_reminder_schedule(mut self, schedule: ReminderSchedule) -> Self {
        self.scheduler.set_schedule(schedule);
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn favorites_mut(&mut self) -> &mut FavoritesStore {
        &mut self.favorites
    }

    pub fn settings(&self) -> &SettingsStore {
        &self.settings
    }

    pub fn settings_mut(&mut self) -> &mut SettingsStore {
        &mut self.settings
    }

    pub fn scheduler(&self) -> &ReminderScheduler {
        &self.scheduler
    }

    /// Next quote for the home screen, never repeating `current_text`.
    pub fn next_quote(&self, current_text: Option<&str>) -> &Quote {
        random_quote(&self.catalog, current_text)
    }

    pub fn quotes_in_category(&self, category: Category) -> Vec<&Quote> {
        pick_random_by_category(&self.catalog, category)
    }

    /// Flips favorite membership for a catalog quote.
    ///
    /// Returns the new membership, or `None` when `quote_id` is not in the
    /// catalog.
    pub fn toggle_favorite(&mut self, quote_id: &str) -> Option<bool> {
        let quote = self.catalog.get(quote_id)?;
        Some(self.favorites.toggle(quote))
    }

    /// Text for the platform share sheet.
    pub fn share_text(&self, quote: &Quote) -> String {
        quote.attributed()
    }

    /// Text to read aloud, or `None` when speech is turned off.
    pub fn speech_text(&self, quote: &Quote) -> Option<String> {
        self.settings.should_speak().then(|| quote.spoken())
    }

    /// Foreground/startup hook: refreshes or cancels the daily reminder.
    pub async fn on_foreground(&mut self) -> ScheduleOutcome {
        if self.settings.get(DAILY_NOTIFICATIONS) {
            self.scheduler.run(&self.catalog).await
        } else {
            self.scheduler.disable().await
        }
    }
}
