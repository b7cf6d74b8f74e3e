//! Change notification
//!
//! The reconciler takes an explicit notifier instead of reaching for a
//! process-wide event bus; callers that don't observe changes pass
//! [`NullNotifier`]. Delivery is fire-and-forget — a notification
//! failure is never allowed to fail a reconciliation.

use shared::event::ScheduleEvent;
use tokio::sync::broadcast;

/// Boundary contract for schedule-change fan-out
pub trait ScheduleNotifier {
    /// Publish an event; fired only after the corresponding save
    fn notify(&self, event: &ScheduleEvent);
}

/// Broadcast-channel notifier
///
/// Cloning shares the underlying channel: hand one clone to the
/// reconciler and keep another to subscribe receivers.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    tx: broadcast::Sender<ScheduleEvent>,
}

impl ChannelNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe a new receiver to schedule events
    pub fn subscribe(&self) -> broadcast::Receiver<ScheduleEvent> {
        self.tx.subscribe()
    }
}

impl Default for ChannelNotifier {
    fn default() -> Self {
        Self::new(16)
    }
}

impl ScheduleNotifier for ChannelNotifier {
    fn notify(&self, event: &ScheduleEvent) {
        if self.tx.send(event.clone()).is_err() {
            // No live subscribers; normal for headless runs
            tracing::debug!(event = %event.name, "Schedule event had no subscribers");
        }
    }
}

/// Notifier that drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct NullNotifier;

impl ScheduleNotifier for NullNotifier {
    fn notify(&self, _event: &ScheduleEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::event::SCHEDULES_UPDATED;
    use shared::models::ScheduleStore;

    #[test]
    fn test_subscriber_receives_event() {
        let notifier = ChannelNotifier::new(4);
        let mut rx = notifier.subscribe();

        notifier.notify(&ScheduleEvent::schedules_updated(ScheduleStore::new()));

        let event = rx.try_recv().unwrap();
        assert_eq!(event.name, SCHEDULES_UPDATED);
    }

    #[test]
    fn test_notify_without_subscribers_is_silent() {
        let notifier = ChannelNotifier::new(4);
        // Must not panic or error
        notifier.notify(&ScheduleEvent::schedules_updated(ScheduleStore::new()));
    }
}
