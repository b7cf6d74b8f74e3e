//! Schedule key codec — week-start derivation and key formatting
//!
//! A schedule key addresses one agent's schedule for one ISO week:
//! `{agent_id}_{YYYY-MM-DD}` where the date component is always the
//! Monday of that week.

use crate::error::{CoreError, CoreResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday as ChronoWeekday};
use shared::models::Weekday;
use std::fmt;
use std::str::FromStr;

/// Parse a date string (YYYY-MM-DD)
///
/// Plain calendar parse, no timezone involved, so a date can never
/// drift by a day between systems.
pub fn parse_date(date: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| CoreError::invalid_date(date))
}

/// Monday on or before the given date
///
/// Sunday rolls back 6 days; any other weekday rolls back `dow - 1`
/// days in the Sunday=0..Saturday=6 encoding (Monday maps to itself).
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    let dow = date.weekday().num_days_from_sunday() as i64;
    let offset = if dow == 0 { -6 } else { 1 - dow };
    date + Duration::days(offset)
}

/// Weekday name for a date, in the slot `day` encoding
pub fn day_name(date: NaiveDate) -> Weekday {
    date.weekday().into()
}

/// Canonical address of one agent-week schedule
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleKey {
    pub agent_id: String,
    /// Always a Monday
    pub week_start: NaiveDate,
}

impl ScheduleKey {
    /// Key for the week containing `date` (normalized to its Monday)
    pub fn new(agent_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            agent_id: agent_id.into(),
            week_start: week_start_monday(date),
        }
    }

    /// Rendered key for the week containing `date`
    pub fn for_date(agent_id: &str, date: NaiveDate) -> String {
        Self::new(agent_id, date).to_string()
    }
}

impl fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.agent_id, self.week_start.format("%Y-%m-%d"))
    }
}

impl FromStr for ScheduleKey {
    type Err = CoreError;

    /// Split on the last underscore: agent ids may themselves contain `_`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (agent_id, date_part) = s
            .rsplit_once('_')
            .ok_or_else(|| CoreError::invalid_key(s, "missing '_' separator"))?;
        if agent_id.is_empty() {
            return Err(CoreError::invalid_key(s, "empty agent id"));
        }
        let week_start = parse_date(date_part)
            .map_err(|_| CoreError::invalid_key(s, "date component is not YYYY-MM-DD"))?;
        if week_start.weekday() != ChronoWeekday::Mon {
            return Err(CoreError::invalid_key(s, "date component is not a Monday"));
        }
        Ok(Self {
            agent_id: agent_id.to_string(),
            week_start,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_week_start_is_always_monday() {
        // Sweep across a year boundary including both 53-week edges
        let mut date = d("2023-12-25");
        let end = d("2024-01-20");
        while date <= end {
            let monday = week_start_monday(date);
            assert_eq!(monday.weekday(), ChronoWeekday::Mon, "for {date}");
            assert!(monday <= date);
            // idempotent
            assert_eq!(week_start_monday(monday), monday);
            date = date.succ_opt().unwrap();
        }
    }

    #[test]
    fn test_week_start_edges() {
        // Monday maps to itself
        assert_eq!(week_start_monday(d("2024-06-03")), d("2024-06-03"));
        // Sunday rolls back 6 days, not forward
        assert_eq!(week_start_monday(d("2024-06-09")), d("2024-06-03"));
        // Saturday
        assert_eq!(week_start_monday(d("2024-01-06")), d("2024-01-01"));
    }

    #[test]
    fn test_key_round_trip() {
        let key = ScheduleKey::new("A1", d("2024-06-05"));
        assert_eq!(key.to_string(), "A1_2024-06-03");

        let parsed: ScheduleKey = "A1_2024-06-03".parse().unwrap();
        assert_eq!(parsed, key);
    }

    #[test]
    fn test_key_agent_id_with_underscores() {
        let key = ScheduleKey::new("agent_7_b", d("2024-06-04"));
        let rendered = key.to_string();
        assert_eq!(rendered, "agent_7_b_2024-06-03");
        let parsed: ScheduleKey = rendered.parse().unwrap();
        assert_eq!(parsed.agent_id, "agent_7_b");
        assert_eq!(parsed.week_start, d("2024-06-03"));
    }

    #[test]
    fn test_key_rejects_non_monday() {
        let err = "A1_2024-06-04".parse::<ScheduleKey>().unwrap_err();
        assert!(matches!(err, CoreError::InvalidKey { .. }));
    }

    #[test]
    fn test_key_rejects_garbage() {
        assert!("A1".parse::<ScheduleKey>().is_err());
        assert!("A1_notadate".parse::<ScheduleKey>().is_err());
        assert!("_2024-06-03".parse::<ScheduleKey>().is_err());
    }

    #[test]
    fn test_day_name_mapping() {
        assert_eq!(day_name(d("2024-06-03")).name(), "Monday");
        assert_eq!(day_name(d("2024-06-09")).name(), "Sunday");
    }
}
