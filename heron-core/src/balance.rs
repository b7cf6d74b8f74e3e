//! Balance calculator
//!
//! Pure functions over an agent's entitlement fields and a
//! caller-supplied list of that agent's leave requests. Identity
//! filtering happens at the caller: these functions trust the subset
//! they are handed.

use crate::week::parse_date;
use chrono::{Datelike, NaiveDate, Weekday as ChronoWeekday};
use serde::Serialize;
use shared::models::{Agent, LeaveRequest, LeaveType};

/// One RTT day converts to 7.5 hours
pub const HOURS_PER_RTT_DAY: f64 = 7.5;

/// Total/used/remaining triple, in days or hours depending on the call
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BalanceSummary {
    pub total: f64,
    pub used: f64,
    pub remaining: f64,
}

/// Annual paid-leave balance, in days
pub fn annual_leave_summary(agent: &Agent, requests: &[LeaveRequest]) -> BalanceSummary {
    let used: f64 = requests
        .iter()
        .filter(|r| r.is_approved() && r.leave_type == LeaveType::CongesPayes)
        .map(|r| r.days_count)
        .sum();
    let total = agent.annual_leave_days;
    BalanceSummary {
        total,
        used,
        remaining: (total - used).max(0.0),
    }
}

/// Contracted working hours over an inclusive date range
///
/// Saturday and Sunday count zero; any other day counts a fifth of the
/// weekly contracted hours. An inverted range sums to zero.
pub fn working_hours_in_range(start: NaiveDate, end: NaiveDate, weekly_hours: f64) -> f64 {
    let daily = weekly_hours / 5.0;
    let mut hours = 0.0;
    let mut current = start;
    while current <= end {
        match current.weekday() {
            ChronoWeekday::Sat | ChronoWeekday::Sun => {}
            _ => hours += daily,
        }
        current = match current.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    hours
}

/// RTT balance, in hours, rounded to one decimal for display
///
/// A request with a malformed date contributes zero and is reported as
/// a data-quality warning rather than failing the whole summary.
pub fn rtt_summary(agent: &Agent, requests: &[LeaveRequest]) -> BalanceSummary {
    let total = agent.rtt_days * HOURS_PER_RTT_DAY;
    let mut used = 0.0;
    for req in requests
        .iter()
        .filter(|r| r.is_approved() && r.leave_type == LeaveType::Rtt)
    {
        match (parse_date(&req.start_date), parse_date(&req.end_date)) {
            (Ok(start), Ok(end)) => {
                used += working_hours_in_range(start, end, agent.weekly_hours);
            }
            _ => {
                tracing::warn!(
                    leave_id = %req.id,
                    start = %req.start_date,
                    end = %req.end_date,
                    "Skipping RTT request with malformed dates"
                );
            }
        }
    }
    BalanceSummary {
        total: round1(total),
        used: round1(used),
        remaining: round1((total - used).max(0.0)),
    }
}

/// Formation-hour entitlement
///
/// Only department heads and doctors accrue formation hours:
/// 3/8 of the weekly contracted hours, rounded to the nearest integer.
pub fn formation_hours(agent: &Agent) -> u32 {
    if agent.role.has_formation_entitlement() {
        (agent.weekly_hours * 3.0 / 8.0).round() as u32
    } else {
        0
    }
}

/// Sick-child day allotment (passthrough, not derived from requests)
pub fn sick_child_days(agent: &Agent) -> u32 {
    agent.sick_child_days
}

/// Round half-up at 0.1 granularity
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
