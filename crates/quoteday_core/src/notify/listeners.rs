//! Notification listener registry with scoped subscriptions.
//!
//! # Invariants
//! - Every registration returns a [`Subscription`] that owns the callback slot.
//! - Dropping or unsubscribing a handle removes its callback; emits that start
//!   afterwards never reach it.
//! - Callbacks run outside the registry lock, so they may subscribe or
//!   unsubscribe re-entrantly.

use crate::notify::platform::{NotificationEvent, NotificationResponse};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use uuid::Uuid;

pub type SubscriptionId = Uuid;

type ReceivedCallback = Arc<dyn Fn(&NotificationEvent) + Send + Sync>;
type ResponseCallback = Arc<dyn Fn(&NotificationResponse) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerKind {
    Received,
    Response,
}

#[derive(Default)]
struct Slots {
    received: BTreeMap<SubscriptionId, ReceivedCallback>,
    responses: BTreeMap<SubscriptionId, ResponseCallback>,
}

/// Shared registry of notification callbacks.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone, Default)]
pub struct ListenerRegistry {
    slots: Arc<Mutex<Slots>>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a "notification received" callback.
    pub fn subscribe_received(
        &self,
        callback: impl Fn(&NotificationEvent) + Send + Sync + 'static,
    ) -> Subscription {
        let id = Uuid::new_v4();
        lock(&self.slots).received.insert(id, Arc::new(callback));
        Subscription::new(id, ListenerKind::Received, &self.slots)
    }

    /// Registers a "notification response" callback.
    pub fn subscribe_response(
        &self,
        callback: impl Fn(&NotificationResponse) + Send + Sync + 'static,
    ) -> Subscription {
        let id = Uuid::new_v4();
        lock(&self.slots).responses.insert(id, Arc::new(callback));
        Subscription::new(id, ListenerKind::Response, &self.slots)
    }

    /// Dispatches `event` and returns how many callbacks ran.
    pub fn emit_received(&self, event: &NotificationEvent) -> usize {
        let callbacks = lock(&self.slots)
            .received
            .values()
            .cloned()
            .collect::<Vec<_>>();
        for callback in &callbacks {
            callback(event);
        }
        callbacks.len()
    }

    /// Dispatches `response` and returns how many callbacks ran.
    pub fn emit_response(&self, response: &NotificationResponse) -> usize {
        let callbacks = lock(&self.slots)
            .responses
            .values()
            .cloned()
            .collect::<Vec<_>>();
        for callback in &callbacks {
            callback(response);
        }
        callbacks.len()
    }

    /// Number of live callbacks of `kind`.
    pub fn listener_count(&self, kind: ListenerKind) -> usize {
        let slots = lock(&self.slots);
        match kind {
            ListenerKind::Received => slots.received.len(),
            ListenerKind::Response => slots.responses.len(),
        }
    }
}

/// Handle returned at registration; releases the callback on drop.
#[must_use = "dropping a Subscription immediately unsubscribes it"]
pub struct Subscription {
    id: SubscriptionId,
    kind: ListenerKind,
    slots: Option<Weak<Mutex<Slots>>>,
}

impl Subscription {
    fn new(id: SubscriptionId, kind: ListenerKind, slots: &Arc<Mutex<Slots>>) -> Self {
        Self {
            id,
            kind,
            slots: Some(Arc::downgrade(slots)),
        }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    pub fn kind(&self) -> ListenerKind {
        self.kind
    }

    /// Removes the callback now.
    pub fn unsubscribe(mut self) {
        self.release();
    }

    fn release(&mut self) {
        let Some(shared) = self.slots.take().and_then(|weak| weak.upgrade()) else {
            return;
        };
        let mut slots = lock(&shared);
        match self.kind {
            ListenerKind::Received => {
                slots.received.remove(&self.id);
            }
            ListenerKind::Response => {
                slots.responses.remove(&self.id);
            }
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.release();
    }
}

fn lock(slots: &Mutex<Slots>) -> MutexGuard<'_, Slots> {
    slots.lock().unwrap_or_else(PoisonError::into_inner)
}
