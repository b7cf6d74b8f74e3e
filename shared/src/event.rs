//! Change-notification event types
//!
//! Subscribers (dashboard views, out of scope here) re-render when a
//! schedules_updated event arrives. The event carries the full updated
//! store so receivers never need a follow-up read.

use crate::models::ScheduleStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event name fired after a reconciliation run has been persisted
pub const SCHEDULES_UPDATED: &str = "schedules_updated";

/// Schedule change notification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEvent {
    /// Event name (see [`SCHEDULES_UPDATED`])
    pub name: String,
    /// Tracking ID for tracing a mutation through the system
    pub request_id: Uuid,
    /// Full updated store snapshot
    pub store: ScheduleStore,
}

impl ScheduleEvent {
    /// Create a schedules_updated event for a freshly persisted store
    pub fn schedules_updated(store: ScheduleStore) -> Self {
        Self {
            name: SCHEDULES_UPDATED.to_string(),
            request_id: Uuid::new_v4(),
            store,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_creation() {
        let event = ScheduleEvent::schedules_updated(ScheduleStore::new());
        assert_eq!(event.name, SCHEDULES_UPDATED);
        assert!(!event.request_id.is_nil());
        assert!(event.store.is_empty());
    }

    #[test]
    fn test_event_round_trip() {
        let mut store = ScheduleStore::new();
        store.insert("A1_2024-06-03", vec![]);
        let event = ScheduleEvent::schedules_updated(store);

        let bytes = serde_json::to_vec(&event).unwrap();
        let back: ScheduleEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back.name, SCHEDULES_UPDATED);
        assert!(back.store.contains_key("A1_2024-06-03"));
    }
}
