//! # Change-Notification Bus
//!
//! Inbound plumbing from the host to the tick thread.
//!
//! ```text
//! ┌──────────────┐  notify()   ┌──────────────┐
//! │ Host mutation│────────────>│ Change       │── subscribed? ──┐
//! │ hook (any    │             │ Publisher    │                 │
//! │ thread)      │             └──────────────┘                 v
//! └──────────────┘                                      ┌──────────────┐
//! ┌──────────────┐  send()                              │   Inbox      │
//! │ Lifecycle /  │─────────────────────────────────────>│  (channel)   │
//! │ config hooks │                                      └──────┬───────┘
//! └──────────────┘                                             │ drained at
//!                                                              v tick start
//!                                                       ┌──────────────┐
//!                                                       │ OverlayEngine│
//!                                                       └──────────────┘
//! ```
//!
//! Notifications never repaint anything; they only mark records dirty once
//! the engine drains them, so the content pass stays the single writer of
//! widget content.

use std::collections::HashMap;
use std::sync::Arc;

use crossbeam_channel::{unbounded, Receiver, Sender};
use dropsight_shared::{EntityKey, HostEvent, MutationOrigin};
use parking_lot::Mutex;

/// Entity -> live subscription count.
type SubscriberSet = Arc<Mutex<HashMap<EntityKey, usize>>>;

/// Handle for sending events to the engine from any thread.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<HostEvent>,
}

impl EventSender {
    /// Queues an event for the next tick.
    ///
    /// Returns `false` if the engine has been dropped.
    #[inline]
    pub fn send(&self, event: HostEvent) -> bool {
        self.sender.send(event).is_ok()
    }

    /// Queues an object-appeared event.
    #[inline]
    pub fn object_appeared(&self, entity: EntityKey) -> bool {
        self.send(HostEvent::ObjectAppeared(entity))
    }

    /// Queues an object-removed event.
    #[inline]
    pub fn object_removed(&self, entity: EntityKey) -> bool {
        self.send(HostEvent::ObjectRemoved(entity))
    }
}

/// Receiving side, owned by the engine.
pub(crate) struct EventInbox {
    sender: Sender<HostEvent>,
    receiver: Receiver<HostEvent>,
}

impl EventInbox {
    /// Creates an unbounded inbox.
    ///
    /// Lifecycle events must never be dropped, so there is no capacity.
    pub(crate) fn new() -> Self {
        let (sender, receiver) = unbounded();
        Self { sender, receiver }
    }

    /// Creates a sender handle (clone for multiple producers).
    pub(crate) fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Moves every pending event into `buffer`.
    pub(crate) fn drain_into(&self, buffer: &mut Vec<HostEvent>) {
        buffer.extend(self.receiver.try_iter());
    }

    /// Number of events waiting.
    pub(crate) fn pending(&self) -> usize {
        self.receiver.len()
    }
}

/// Subscription registry for attribute-change notifications.
pub struct ChangeBus {
    subscribers: SubscriberSet,
    sender: EventSender,
}

impl ChangeBus {
    pub(crate) fn new(sender: EventSender) -> Self {
        Self {
            subscribers: Arc::new(Mutex::new(HashMap::with_capacity(256))),
            sender,
        }
    }

    /// Creates a publisher handle for host mutation hooks.
    #[must_use]
    pub fn publisher(&self) -> ChangePublisher {
        ChangePublisher {
            subscribers: Arc::clone(&self.subscribers),
            sender: self.sender.clone(),
        }
    }

    /// Subscribes an entity; the guard unsubscribes when dropped.
    pub(crate) fn subscribe(&self, entity: EntityKey) -> Subscription {
        *self.subscribers.lock().entry(entity).or_insert(0) += 1;
        Subscription {
            entity,
            subscribers: Arc::clone(&self.subscribers),
        }
    }

    /// Number of subscribed entities.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

/// Publish point for attribute mutations. Cheap to clone, `Send + Sync`.
#[derive(Clone)]
pub struct ChangePublisher {
    subscribers: SubscriberSet,
    sender: EventSender,
}

impl ChangePublisher {
    /// Reports that a tracked attribute of `entity` changed.
    ///
    /// Remote-origin mutations and entities without a display record are
    /// dropped here. Returns true if the notification was forwarded.
    pub fn notify(&self, entity: EntityKey, origin: MutationOrigin) -> bool {
        if origin == MutationOrigin::Remote {
            return false;
        }
        if !self.subscribers.lock().contains_key(&entity) {
            tracing::trace!(%entity, "change notification for untracked entity ignored");
            return false;
        }
        self.sender.send(HostEvent::AttributeChanged(entity))
    }
}

/// Scoped registration owned by a display record.
pub struct Subscription {
    entity: EntityKey,
    subscribers: SubscriberSet,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let mut subscribers = self.subscribers.lock();
        if let Some(count) = subscribers.get_mut(&self.entity) {
            *count -= 1;
            if *count == 0 {
                subscribers.remove(&self.entity);
            }
        }
    }
}
