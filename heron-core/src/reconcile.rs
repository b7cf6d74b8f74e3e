//! Leave reconciler
//!
//! Deterministically mutates a [`ScheduleStore`] snapshot to reflect an
//! approved leave request, and reverses that effect on cancellation.
//! The pure functions take and return full snapshots; the [`Reconciler`]
//! wires them to a repository and a notifier supplied by the caller.

use crate::error::CoreError;
use crate::notify::ScheduleNotifier;
use crate::store::ScheduleRepository;
use crate::template::default_schedule;
use crate::week::{day_name, parse_date, ScheduleKey};
use chrono::NaiveDate;
use shared::event::ScheduleEvent;
use shared::models::{LeaveRequest, ScheduleStore, SlotStatus};
use thiserror::Error;

/// Error type for reconciliation runs
///
/// A persistence failure after a successful in-memory computation keeps
/// the computed store so the caller can retry the save without
/// recomputing.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// Could not load the current store snapshot
    #[error("Failed to load schedules: {source}")]
    Load { source: CoreError },

    /// The in-memory computation itself failed (nothing was applied)
    #[error(transparent)]
    Compute(#[from] CoreError),

    /// Computation succeeded but the result could not be persisted
    #[error("Failed to persist reconciled schedules: {source}")]
    Persist {
        source: CoreError,
        /// The fully computed store, safe to retry saving
        store: ScheduleStore,
    },
}

enum Mark {
    /// Mark matching weekday slots off, materializing missing weeks
    Off,
    /// Revert matching off slots to working; absent weeks are skipped
    Restore,
}

/// Apply an approved leave request to a store snapshot
///
/// Every day of the inclusive range has its matching weekday slots set
/// to `off`. Sundays are never touched. A week with no stored schedule
/// is materialized from the default template first, so marking one day
/// off never loses the rest of that week.
///
/// Applying a non-approved request is a caller-contract violation
/// reported as a warning, not an error: the store is returned unchanged.
pub fn apply_leave(
    agent_id: &str,
    leave: &LeaveRequest,
    store: ScheduleStore,
) -> Result<ScheduleStore, CoreError> {
    if !leave.is_approved() {
        tracing::warn!(
            leave_id = %leave.id,
            status = ?leave.status,
            "Refusing to apply non-approved leave request"
        );
        return Ok(store);
    }
    let (start, end) = parse_range(leave)?;
    Ok(mutate_range(agent_id, start, end, store, Mark::Off))
}

/// Cancel a previously applied leave request on a store snapshot
///
/// Only slots currently `off` on matching weekdays revert to `working`;
/// `break` slots and manually edited `working` slots are left alone.
/// Weeks with no stored schedule are skipped — absence means there is
/// nothing to cancel.
pub fn cancel_leave(
    agent_id: &str,
    leave: &LeaveRequest,
    store: ScheduleStore,
) -> Result<ScheduleStore, CoreError> {
    let (start, end) = parse_range(leave)?;
    Ok(mutate_range(agent_id, start, end, store, Mark::Restore))
}

fn parse_range(leave: &LeaveRequest) -> Result<(NaiveDate, NaiveDate), CoreError> {
    let start = parse_date(&leave.start_date)?;
    let end = parse_date(&leave.end_date)?;
    Ok((start, end))
}

fn mutate_range(
    agent_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    mut store: ScheduleStore,
    mark: Mark,
) -> ScheduleStore {
    if start > end {
        // Inverted range: zero iterations, never a loop
        tracing::warn!(%agent_id, %start, %end, "Ignoring leave with inverted date range");
        return store;
    }

    let mut current = start;
    while current <= end {
        let day = day_name(current);
        if !day.is_sunday() {
            let key = ScheduleKey::for_date(agent_id, current);
            match mark {
                Mark::Off => {
                    let week = store.0.entry(key).or_insert_with(default_schedule);
                    for slot in week.iter_mut().filter(|s| s.day == day) {
                        slot.status = SlotStatus::Off;
                    }
                }
                Mark::Restore => {
                    if let Some(week) = store.get_mut(&key) {
                        for slot in week
                            .iter_mut()
                            .filter(|s| s.day == day && s.status == SlotStatus::Off)
                        {
                            slot.status = SlotStatus::Working;
                        }
                    } else {
                        tracing::debug!(%agent_id, date = %current, "No stored week to cancel");
                    }
                }
            }
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    store
}

/// Orchestrates reconciliation against a repository and a notifier
///
/// Load → pure compute → save → notify, in that order. The notifier is
/// injected by the caller rather than reached through any global bus,
/// and fires only after the save has succeeded.
pub struct Reconciler<R, N> {
    repo: R,
    notifier: N,
}

impl<R: ScheduleRepository, N: ScheduleNotifier> Reconciler<R, N> {
    pub fn new(repo: R, notifier: N) -> Self {
        Self { repo, notifier }
    }

    /// Apply an approved leave and persist the result
    pub fn apply(
        &self,
        agent_id: &str,
        leave: &LeaveRequest,
    ) -> Result<ScheduleStore, ReconcileError> {
        self.run(leave, |store| apply_leave(agent_id, leave, store))
    }

    /// Cancel a leave and persist the result
    pub fn cancel(
        &self,
        agent_id: &str,
        leave: &LeaveRequest,
    ) -> Result<ScheduleStore, ReconcileError> {
        self.run(leave, |store| cancel_leave(agent_id, leave, store))
    }

    fn run(
        &self,
        leave: &LeaveRequest,
        compute: impl FnOnce(ScheduleStore) -> Result<ScheduleStore, CoreError>,
    ) -> Result<ScheduleStore, ReconcileError> {
        let snapshot = self
            .repo
            .load()
            .map_err(|source| ReconcileError::Load { source })?;

        let updated = compute(snapshot)?;

        if let Err(source) = self.repo.save(&updated) {
            return Err(ReconcileError::Persist {
                source,
                store: updated,
            });
        }

        tracing::debug!(leave_id = %leave.id, weeks = updated.len(), "Reconciliation persisted");
        self.notifier
            .notify(&ScheduleEvent::schedules_updated(updated.clone()));
        Ok(updated)
    }

    /// Access the injected repository
    pub fn repository(&self) -> &R {
        &self.repo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{LeaveStatus, LeaveType, Weekday};

    fn leave(start: &str, end: &str, status: LeaveStatus) -> LeaveRequest {
        LeaveRequest {
            id: "L1".to_string(),
            agent_id: "A1".to_string(),
            leave_type: LeaveType::CongesPayes,
            start_date: start.to_string(),
            end_date: end.to_string(),
            days_count: 1.0,
            status,
            created_at: None,
            reason: None,
        }
    }

    fn slot_status(store: &ScheduleStore, key: &str, day: Weekday) -> Vec<SlotStatus> {
        store
            .get(key)
            .unwrap()
            .iter()
            .filter(|s| s.day == day)
            .map(|s| s.status)
            .collect()
    }

    #[test]
    fn test_apply_materializes_week_and_marks_off() {
        let req = leave("2024-06-03", "2024-06-04", LeaveStatus::Approved);
        let store = apply_leave("A1", &req, ScheduleStore::new()).unwrap();

        // One touched week, fully materialized
        assert_eq!(store.len(), 1);
        let week = store.get("A1_2024-06-03").unwrap();
        assert_eq!(week.len(), 16);

        // Monday and Tuesday fully off (including the midday slot),
        // Wednesday untouched
        assert!(slot_status(&store, "A1_2024-06-03", Weekday::Monday)
            .iter()
            .all(|s| *s == SlotStatus::Off));
        assert!(slot_status(&store, "A1_2024-06-03", Weekday::Tuesday)
            .iter()
            .all(|s| *s == SlotStatus::Off));
        assert_eq!(
            slot_status(&store, "A1_2024-06-03", Weekday::Wednesday),
            vec![SlotStatus::Working, SlotStatus::Break, SlotStatus::Working]
        );
    }

    #[test]
    fn test_apply_non_approved_is_noop() {
        let req = leave("2024-06-03", "2024-06-04", LeaveStatus::Pending);
        let store = apply_leave("A1", &req, ScheduleStore::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_apply_malformed_date_is_atomic_error() {
        let req = leave("2024-06-XX", "2024-06-04", LeaveStatus::Approved);
        let err = apply_leave("A1", &req, ScheduleStore::new()).unwrap_err();
        assert!(matches!(err, CoreError::InvalidDate { .. }));
    }

    #[test]
    fn test_apply_inverted_range_is_zero_iterations() {
        let req = leave("2024-06-10", "2024-06-03", LeaveStatus::Approved);
        let store = apply_leave("A1", &req, ScheduleStore::new()).unwrap();
        assert!(store.is_empty());
    }

    #[test]
    fn test_sunday_never_mutated() {
        // Saturday 2024-01-06 through Sunday 2024-01-07
        let req = leave("2024-01-06", "2024-01-07", LeaveStatus::Approved);
        let store = apply_leave("A2", &req, ScheduleStore::new()).unwrap();

        // Only the Saturday week materialized; Sunday contributed nothing
        assert_eq!(store.len(), 1);
        let week = store.get("A2_2024-01-01").unwrap();
        assert!(week.iter().all(|s| s.day != Weekday::Sunday));
        assert_eq!(
            slot_status(&store, "A2_2024-01-01", Weekday::Saturday),
            vec![SlotStatus::Off]
        );
        // The rest of the materialized week stays on the template
        assert!(slot_status(&store, "A2_2024-01-01", Weekday::Monday)
            .iter()
            .any(|s| *s == SlotStatus::Working));
    }

    #[test]
    fn test_leave_spanning_two_weeks() {
        // Friday 2024-06-07 through Monday 2024-06-10
        let req = leave("2024-06-07", "2024-06-10", LeaveStatus::Approved);
        let store = apply_leave("A1", &req, ScheduleStore::new()).unwrap();
        assert_eq!(store.len(), 2);
        assert!(slot_status(&store, "A1_2024-06-03", Weekday::Friday)
            .iter()
            .all(|s| *s == SlotStatus::Off));
        assert_eq!(
            slot_status(&store, "A1_2024-06-03", Weekday::Saturday),
            vec![SlotStatus::Off]
        );
        assert!(slot_status(&store, "A1_2024-06-10", Weekday::Monday)
            .iter()
            .all(|s| *s == SlotStatus::Off));
    }

    #[test]
    fn test_apply_then_cancel_restores_working_slots() {
        let req = leave("2024-06-03", "2024-06-05", LeaveStatus::Approved);
        let before = apply_leave("A1", &req, ScheduleStore::new()).unwrap();
        let after = cancel_leave("A1", &req, before).unwrap();

        // Previously-working slots are back to working; the midday break
        // was set off by apply and now reads working, the documented
        // limitation of not tracking pre-apply status per slot.
        let week = after.get("A1_2024-06-03").unwrap();
        assert!(week
            .iter()
            .filter(|s| s.day == Weekday::Monday)
            .all(|s| s.status == SlotStatus::Working));
    }

    #[test]
    fn test_cancel_leaves_breaks_untouched() {
        // Build a stored week where Tuesday has its normal break
        let mut store = ScheduleStore::new();
        store.insert("A1_2024-06-03", default_schedule());

        let req = leave("2024-06-04", "2024-06-04", LeaveStatus::Approved);
        let after = cancel_leave("A1", &req, store).unwrap();
        assert_eq!(
            slot_status(&after, "A1_2024-06-03", Weekday::Tuesday),
            vec![SlotStatus::Working, SlotStatus::Break, SlotStatus::Working]
        );
    }

    #[test]
    fn test_cancel_missing_week_is_skipped() {
        let req = leave("2024-06-03", "2024-06-04", LeaveStatus::Approved);
        let after = cancel_leave("A1", &req, ScheduleStore::new()).unwrap();
        // No default schedule synthesized on cancellation
        assert!(after.is_empty());
    }

    #[test]
    fn test_apply_preserves_unrelated_agent_weeks() {
        let mut store = ScheduleStore::new();
        store.insert("B9_2024-06-03", default_schedule());

        let req = leave("2024-06-03", "2024-06-03", LeaveStatus::Approved);
        let after = apply_leave("A1", &req, store).unwrap();
        assert_eq!(after.len(), 2);
        assert!(slot_status(&after, "B9_2024-06-03", Weekday::Monday)
            .iter()
            .any(|s| *s == SlotStatus::Working));
    }
}
