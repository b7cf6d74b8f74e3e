//! Heron reconciliation core
//!
//! Converts approved leave requests into weekly-schedule mutations and
//! derives entitlement balances. Everything here operates on plain data
//! snapshots: persistence and change notification are boundary traits
//! implemented by collaborators and injected into the [`Reconciler`].

pub mod balance;
pub mod error;
pub mod notify;
pub mod reconcile;
pub mod store;
pub mod template;
pub mod week;

pub use balance::{
    annual_leave_summary, formation_hours, rtt_summary, sick_child_days, working_hours_in_range,
    BalanceSummary, HOURS_PER_RTT_DAY,
};
pub use error::{CoreError, CoreResult};
pub use notify::{ChannelNotifier, NullNotifier, ScheduleNotifier};
pub use reconcile::{apply_leave, cancel_leave, ReconcileError, Reconciler};
pub use store::{JsonFileStore, MemoryStore, ScheduleRepository, SCHEDULES_FILE};
pub use template::default_schedule;
pub use week::{day_name, parse_date, week_start_monday, ScheduleKey};
