//! Screen-scoped notification listeners.

use crate::notify::listeners::{ListenerRegistry, Subscription};
use log::info;

/// Logging listeners a screen holds while mounted.
///
/// Both callbacks are released on [`ReminderSession::teardown`] or drop.
pub struct ReminderSession {
    received: Subscription,
    response: Subscription,
}

impl ReminderSession {
    pub fn attach(listeners: &ListenerRegistry) -> Self {
        let received = listeners.subscribe_received(|event| {
            info!(
                "event=notification_received module=notify status=ok notification_id={}",
                event.notification_id
            );
        });
        let response = listeners.subscribe_response(|response| {
            info!(
                "event=notification_response module=notify status=ok notification_id={} action={}",
                response.notification_id, response.action_id
            );
        });

        Self { received, response }
    }

    /// Releases both subscriptions.
    pub fn teardown(self) {
        self.received.unsubscribe();
        self.response.unsubscribe();
    }
}
