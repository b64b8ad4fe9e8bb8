//! Daily reminder scheduler.
//!
//! # Responsibility
//! - Drive the permission → cancel → pick → register flow.
//! - Expose the current state for diagnostics and host UI.
//!
//! # Invariants
//! - `cancel_all_scheduled` completes before `schedule` is issued, so repeated
//!   runs leave exactly one active reminder.
//! - `schedule` is called at most once per run, and only with permission.
//! - No run returns an error; failures degrade to [`ScheduleOutcome::Failed`].

use crate::model::catalog::Catalog;
use crate::model::quote::{Quote, QuoteId};
use crate::notify::platform::{
    DailyTrigger, NotificationContent, NotificationPlatform, PermissionStatus, PlatformError,
    PlatformResult,
};
use crate::notify::session::ReminderSession;
use crate::select::random::{pick_random, random_quote};
use log::{debug, info, warn};
use rand::Rng;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

pub const DEFAULT_REMINDER_HOUR: u8 = 9;
pub const DEFAULT_REMINDER_MINUTE: u8 = 0;
pub const DEFAULT_REMINDER_TITLE: &str = "Daily Quote";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReminderConfigError {
    HourOutOfRange(u8),
    MinuteOutOfRange(u8),
    BlankTitle,
}

impl Display for ReminderConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HourOutOfRange(hour) => write!(f, "reminder hour {hour} is outside 0..=23"),
            Self::MinuteOutOfRange(minute) => {
                write!(f, "reminder minute {minute} is outside 0..=59")
            }
            Self::BlankTitle => write!(f, "reminder title must not be blank"),
        }
    }
}

impl Error for ReminderConfigError {}

/// When the reminder fires and how it is titled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderSchedule {
    hour: u8,
    minute: u8,
    title: String,
}

impl ReminderSchedule {
    pub fn new(hour: u8, minute: u8, title: impl Into<String>) -> Result<Self, ReminderConfigError> {
        let title = title.into();
        if hour > 23 {
            return Err(ReminderConfigError::HourOutOfRange(hour));
        }
        if minute > 59 {
            return Err(ReminderConfigError::MinuteOutOfRange(minute));
        }
        if title.trim().is_empty() {
            return Err(ReminderConfigError::BlankTitle);
        }
        Ok(Self {
            hour,
            minute,
            title,
        })
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn minute(&self) -> u8 {
        self.minute
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Repeating daily trigger at the configured wall-clock time.
    pub fn trigger(&self) -> DailyTrigger {
        DailyTrigger {
            hour: self.hour,
            minute: self.minute,
            repeats: true,
        }
    }

    /// Notification payload carrying `quote`.
    pub fn content_for(&self, quote: &Quote) -> NotificationContent {
        NotificationContent {
            title: self.title.clone(),
            body: quote.attributed(),
        }
    }
}

impl Default for ReminderSchedule {
    fn default() -> Self {
        Self {
            hour: DEFAULT_REMINDER_HOUR,
            minute: DEFAULT_REMINDER_MINUTE,
            title: DEFAULT_REMINDER_TITLE.to_string(),
        }
    }
}

/// Scheduler lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchedulerState {
    Unregistered,
    PermissionPending,
    PermissionDenied,
    PermissionGranted,
    Scheduled,
    /// The platform has no notification support; every call is a no-op.
    Unsupported,
}

/// Result of one scheduler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    Scheduled {
        notification_id: String,
        quote_id: QuoteId,
    },
    PermissionDenied,
    Unsupported,
    /// Reminders were cancelled because the user turned them off.
    Disabled,
    /// A platform call failed; details were logged.
    Failed,
}

/// Owns the reminder flow against one notification platform.
pub struct ReminderScheduler {
    platform: Arc<dyn NotificationPlatform>,
    schedule: ReminderSchedule,
    state: SchedulerState,
}

impl ReminderScheduler {
    pub fn new(platform: Arc<dyn NotificationPlatform>) -> Self {
        Self::with_schedule(platform, ReminderSchedule::default())
    }

    pub fn with_schedule(
        platform: Arc<dyn NotificationPlatform>,
        schedule: ReminderSchedule,
    ) -> Self {
        Self {
            platform,
            schedule,
            state: SchedulerState::Unregistered,
        }
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn schedule(&self) -> &ReminderSchedule {
        &self.schedule
    }

    /// Takes effect on the next run.
    pub fn set_schedule(&mut self, schedule: ReminderSchedule) {
        self.schedule = schedule;
    }

    /// Registers a fresh daily reminder with a random catalog quote.
    ///
    /// Safe to call on every app launch or foreground event.
    pub async fn run(&mut self, catalog: &Catalog) -> ScheduleOutcome {
        self.run_flow(catalog, |catalog| random_quote(catalog, None).clone())
            .await
    }

    /// [`Self::run`] with a caller-supplied random source.
    pub async fn run_with_rng<R: Rng + ?Sized>(
        &mut self,
        catalog: &Catalog,
        rng: &mut R,
    ) -> ScheduleOutcome {
        self.run_flow(catalog, |catalog| pick_random(catalog, None, rng).clone())
            .await
    }

    /// Cancels every reminder owned by the app.
    pub async fn disable(&mut self) -> ScheduleOutcome {
        if !self.platform.is_supported() {
            self.state = SchedulerState::Unsupported;
            return ScheduleOutcome::Unsupported;
        }

        match self.platform.cancel_all_scheduled().await {
            Ok(()) => {
                self.state = SchedulerState::Unregistered;
                info!("event=reminder_disable module=notify status=ok");
                ScheduleOutcome::Disabled
            }
            Err(err) => self.degrade("cancel", err),
        }
    }

    /// Attaches the logging listeners for incoming notifications.
    ///
    /// Returns `None` when the platform has no event source.
    pub fn attach_session(&self) -> Option<ReminderSession> {
        if !self.platform.is_supported() {
            return None;
        }
        self.platform.listeners().map(ReminderSession::attach)
    }

    async fn run_flow(
        &mut self,
        catalog: &Catalog,
        pick: impl FnOnce(&Catalog) -> Quote,
    ) -> ScheduleOutcome {
        if !self.platform.is_supported() {
            self.state = SchedulerState::Unsupported;
            debug!("event=reminder_schedule module=notify status=skip reason=unsupported");
            return ScheduleOutcome::Unsupported;
        }

        self.state = SchedulerState::PermissionPending;
        let permission = match self.negotiate_permission().await {
            Ok(status) => status,
            Err(err) => return self.degrade("permission", err),
        };
        if permission != PermissionStatus::Granted {
            self.state = SchedulerState::PermissionDenied;
            info!("event=reminder_schedule module=notify status=skip reason=permission_denied");
            return ScheduleOutcome::PermissionDenied;
        }
        self.state = SchedulerState::PermissionGranted;

        if let Err(err) = self.platform.cancel_all_scheduled().await {
            return self.degrade("cancel", err);
        }

        let quote = pick(catalog);
        let content = self.schedule.content_for(&quote);
        let trigger = self.schedule.trigger();
        let registered = self.platform.schedule(&content, &trigger).await;
        match registered {
            Ok(notification_id) => {
                self.state = SchedulerState::Scheduled;
                info!(
                    "event=reminder_schedule module=notify status=ok quote_id={} notification_id={} at={:02}:{:02}",
                    quote.id, notification_id, self.schedule.hour, self.schedule.minute
                );
                ScheduleOutcome::Scheduled {
                    notification_id,
                    quote_id: quote.id,
                }
            }
            Err(err) => self.degrade("register", err),
        }
    }

    async fn negotiate_permission(&self) -> PlatformResult<PermissionStatus> {
        let existing = self.platform.permission_status().await?;
        if existing == PermissionStatus::Granted {
            return Ok(existing);
        }
        self.platform.request_permission().await
    }

    fn degrade(&mut self, stage: &'static str, err: PlatformError) -> ScheduleOutcome {
        if err == PlatformError::Unsupported {
            self.state = SchedulerState::Unsupported;
            return ScheduleOutcome::Unsupported;
        }
        self.state = SchedulerState::Unregistered;
        warn!("event=reminder_schedule module=notify status=error stage={stage} error={err}");
        ScheduleOutcome::Failed
    }
}

#[cfg(test)]
mod tests {
    use super::{ReminderConfigError, ReminderSchedule};
    use crate::model::quote::{Category, Quote};

    #[test]
    fn default_schedule_is_nine_am_daily() {
        let schedule = ReminderSchedule::default();
        let trigger = schedule.trigger();
        assert_eq!((trigger.hour, trigger.minute), (9, 0));
        assert!(trigger.repeats);
        assert_eq!(schedule.title(), "Daily Quote");
    }

    #[test]
    fn rejects_out_of_range_time_and_blank_title() {
        assert_eq!(
            ReminderSchedule::new(24, 0, "t").unwrap_err(),
            ReminderConfigError::HourOutOfRange(24)
        );
        assert_eq!(
            ReminderSchedule::new(23, 60, "t").unwrap_err(),
            ReminderConfigError::MinuteOutOfRange(60)
        );
        assert_eq!(
            ReminderSchedule::new(7, 30, "  ").unwrap_err(),
            ReminderConfigError::BlankTitle
        );
        assert!(ReminderSchedule::new(23, 59, "Evening").is_ok());
    }

    #[test]
    fn content_carries_text_and_author() {
        let quote = Quote::new(
            "5",
            "In the middle of difficulty lies opportunity.",
            "Albert Einstein",
            Category::Wisdom,
        )
        .unwrap();
        let content = ReminderSchedule::default().content_for(&quote);
        assert_eq!(content.title, "Daily Quote");
        assert_eq!(
            content.body,
            "\"In the middle of difficulty lies opportunity.\" - Albert Einstein"
        );
    }
}
