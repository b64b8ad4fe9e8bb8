//! Host notification platform port.
//!
//! Implemented by native adapters; the core only sees this trait.

use crate::notify::listeners::ListenerRegistry;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type PlatformResult<T> = Result<T, PlatformError>;

/// Tri-state OS notification permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionStatus {
    Granted,
    Denied,
    Undetermined,
}

/// Wall-clock trigger in the device's local time zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTrigger {
    /// 0..=23.
    pub hour: u8,
    /// 0..=59.
    pub minute: u8,
    pub repeats: bool,
}

/// Visible notification payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationContent {
    pub title: String,
    pub body: String,
}

/// A notification arrived while the app was running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationEvent {
    pub notification_id: String,
    pub content: NotificationContent,
}

/// The user interacted with a delivered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationResponse {
    pub notification_id: String,
    /// Platform action identifier; plain taps use [`DEFAULT_ACTION_ID`].
    pub action_id: String,
}

pub const DEFAULT_ACTION_ID: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformError {
    /// The runtime has no notification capability.
    Unsupported,
    /// The platform API call failed.
    Backend(String),
}

impl Display for PlatformError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unsupported => write!(f, "notifications are not supported on this platform"),
            Self::Backend(message) => write!(f, "notification platform error: {message}"),
        }
    }
}

impl Error for PlatformError {}

/// Host notification backend.
///
/// Calls are awaited one at a time by the scheduler; adapters need not
/// handle overlapping requests.
#[async_trait::async_trait]
pub trait NotificationPlatform: Send + Sync {
    /// `false` for runtimes without notifications (for example web builds).
    fn is_supported(&self) -> bool {
        true
    }

    /// Registry the adapter dispatches incoming events to, if any.
    fn listeners(&self) -> Option<&ListenerRegistry> {
        None
    }

    /// Reads the current permission without prompting.
    async fn permission_status(&self) -> PlatformResult<PermissionStatus>;

    /// Prompts for permission and returns the resulting status.
    async fn request_permission(&self) -> PlatformResult<PermissionStatus>;

    /// Cancels every scheduled notification owned by this app.
    async fn cancel_all_scheduled(&self) -> PlatformResult<()>;

    /// Registers one notification and returns its platform identifier.
    async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &DailyTrigger,
    ) -> PlatformResult<String>;
}
