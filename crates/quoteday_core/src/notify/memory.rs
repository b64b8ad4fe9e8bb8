//! Built-in notification platform adapters.
//!
//! # Responsibility
//! - [`InMemoryNotificationPlatform`]: process-local backend for headless
//!   hosts, the CLI and tests. Records every call for inspection.
//! - [`UnsupportedPlatform`]: backend for runtimes without notifications.

use crate::notify::listeners::ListenerRegistry;
use crate::notify::platform::{
    DailyTrigger, NotificationContent, NotificationEvent, NotificationPlatform,
    NotificationResponse, PermissionStatus, PlatformError, PlatformResult,
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// One platform call, in the order it was received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    PermissionStatus,
    RequestPermission,
    CancelAll,
    Schedule { notification_id: String },
}

/// A registered notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledNotification {
    pub id: String,
    pub content: NotificationContent,
    pub trigger: DailyTrigger,
}

struct MemoryState {
    permission: PermissionStatus,
    grant_on_request: bool,
    scheduled: Vec<ScheduledNotification>,
    history: Vec<PlatformCall>,
}

/// Process-local notification backend.
pub struct InMemoryNotificationPlatform {
    state: Mutex<MemoryState>,
    listeners: ListenerRegistry,
}

impl InMemoryNotificationPlatform {
    /// `permission` is the initial status; `grant_on_request` decides what a
    /// prompt resolves to when permission is not already granted.
    pub fn new(permission: PermissionStatus, grant_on_request: bool) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                permission,
                grant_on_request,
                scheduled: Vec::new(),
                history: Vec::new(),
            }),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Backend whose permission is already granted.
    pub fn granted() -> Self {
        Self::new(PermissionStatus::Granted, true)
    }

    pub fn permission(&self) -> PermissionStatus {
        self.lock().permission
    }

    /// Currently registered notifications.
    pub fn scheduled(&self) -> Vec<ScheduledNotification> {
        self.lock().scheduled.clone()
    }

    /// Every call received so far.
    pub fn history(&self) -> Vec<PlatformCall> {
        self.lock().history.clone()
    }

    pub fn registry(&self) -> &ListenerRegistry {
        &self.listeners
    }

    /// Fires a registered notification to "received" listeners.
    ///
    /// Returns `false` when `notification_id` is not registered.
    pub fn deliver(&self, notification_id: &str) -> bool {
        let found = self
            .lock()
            .scheduled
            .iter()
            .find(|notification| notification.id == notification_id)
            .cloned();
        let Some(notification) = found else {
            return false;
        };

        self.listeners.emit_received(&NotificationEvent {
            notification_id: notification.id,
            content: notification.content,
        });
        true
    }

    /// Simulates a user tap on a registered notification.
    pub fn respond(&self, notification_id: &str, action_id: &str) -> bool {
        let known = self
            .lock()
            .scheduled
            .iter()
            .any(|notification| notification.id == notification_id);
        if !known {
            return false;
        }

        self.listeners.emit_response(&NotificationResponse {
            notification_id: notification_id.to_string(),
            action_id: action_id.to_string(),
        });
        true
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for InMemoryNotificationPlatform {
    fn default() -> Self {
        Self::new(PermissionStatus::Undetermined, true)
    }
}

#[async_trait::async_trait]
impl NotificationPlatform for InMemoryNotificationPlatform {
    fn listeners(&self) -> Option<&ListenerRegistry> {
        Some(&self.listeners)
    }

    async fn permission_status(&self) -> PlatformResult<PermissionStatus> {
        let mut state = self.lock();
        state.history.push(PlatformCall::PermissionStatus);
        Ok(state.permission)
    }

    async fn request_permission(&self) -> PlatformResult<PermissionStatus> {
        let mut state = self.lock();
        state.history.push(PlatformCall::RequestPermission);
        if state.permission != PermissionStatus::Granted {
            state.permission = if state.grant_on_request {
                PermissionStatus::Granted
            } else {
                PermissionStatus::Denied
            };
        }
        Ok(state.permission)
    }

    async fn cancel_all_scheduled(&self) -> PlatformResult<()> {
        let mut state = self.lock();
        state.history.push(PlatformCall::CancelAll);
        state.scheduled.clear();
        Ok(())
    }

    async fn schedule(
        &self,
        content: &NotificationContent,
        trigger: &DailyTrigger,
    ) -> PlatformResult<String> {
        let notification_id = Uuid::new_v4().to_string();
        let mut state = self.lock();
        state.history.push(PlatformCall::Schedule {
            notification_id: notification_id.clone(),
        });
        state.scheduled.push(ScheduledNotification {
            id: notification_id.clone(),
            content: content.clone(),
            trigger: *trigger,
        });
        Ok(notification_id)
    }
}

/// Backend for runtimes with no notification capability.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnsupportedPlatform;

#[async_trait::async_trait]
impl NotificationPlatform for UnsupportedPlatform {
    fn is_supported(&self) -> bool {
        false
    }

    async fn permission_status(&self) -> PlatformResult<PermissionStatus> {
        Err(PlatformError::Unsupported)
    }

    async fn request_permission(&self) -> PlatformResult<PermissionStatus> {
        Err(PlatformError::Unsupported)
    }

    async fn cancel_all_scheduled(&self) -> PlatformResult<()> {
        Err(PlatformError::Unsupported)
    }

    async fn schedule(
        &self,
        _content: &NotificationContent,
        _trigger: &DailyTrigger,
    ) -> PlatformResult<String> {
        Err(PlatformError::Unsupported)
    }
}
