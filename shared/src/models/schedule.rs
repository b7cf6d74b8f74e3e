//! Schedule Model
//!
//! A weekly schedule is a flat list of slots addressed by a schedule key
//! (`{agent_id}_{monday}`). The persisted slot shape is
//! `{ day, time, status, startTime?, endTime? }`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Day-of-week name as stored in schedule slots
///
/// Sunday is representable (dates map to it) but no schedule ever
/// contains a Sunday slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Monday => "Monday",
            Self::Tuesday => "Tuesday",
            Self::Wednesday => "Wednesday",
            Self::Thursday => "Thursday",
            Self::Friday => "Friday",
            Self::Saturday => "Saturday",
            Self::Sunday => "Sunday",
        }
    }

    pub fn is_sunday(&self) -> bool {
        matches!(self, Self::Sunday)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(value: chrono::Weekday) -> Self {
        match value {
            chrono::Weekday::Mon => Self::Monday,
            chrono::Weekday::Tue => Self::Tuesday,
            chrono::Weekday::Wed => Self::Wednesday,
            chrono::Weekday::Thu => Self::Thursday,
            chrono::Weekday::Fri => Self::Friday,
            chrono::Weekday::Sat => Self::Saturday,
            chrono::Weekday::Sun => Self::Sunday,
        }
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Slot label within a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPeriod {
    Morning,
    Midday,
    Afternoon,
}

/// Slot status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotStatus {
    Working,
    Break,
    Off,
}

/// One schedulable unit within a day
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSlot {
    pub day: Weekday,
    pub time: SlotPeriod,
    pub status: SlotStatus,
    #[serde(rename = "startTime", default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "endTime", default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
}

impl ScheduleSlot {
    pub fn new(
        day: Weekday,
        time: SlotPeriod,
        status: SlotStatus,
        start_time: &str,
        end_time: &str,
    ) -> Self {
        Self {
            day,
            time,
            status,
            start_time: Some(start_time.to_string()),
            end_time: Some(end_time.to_string()),
        }
    }
}

/// A full weekly schedule for one agent-week
pub type WeeklySchedule = Vec<ScheduleSlot>;

/// Mapping from schedule key to weekly schedule
///
/// Treated as a value everywhere: reconciliation takes a snapshot and
/// returns a new one. BTreeMap keeps key iteration deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleStore(pub BTreeMap<String, WeeklySchedule>);

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&WeeklySchedule> {
        self.0.get(key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut WeeklySchedule> {
        self.0.get_mut(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, week: WeeklySchedule) {
        self.0.insert(key.into(), week);
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &WeeklySchedule)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_wire_shape() {
        let slot = ScheduleSlot::new(
            Weekday::Monday,
            SlotPeriod::Morning,
            SlotStatus::Working,
            "08:00",
            "12:00",
        );
        let json = serde_json::to_string(&slot).unwrap();
        assert!(json.contains("\"day\":\"Monday\""));
        assert!(json.contains("\"time\":\"Morning\""));
        assert!(json.contains("\"status\":\"working\""));
        assert!(json.contains("\"startTime\":\"08:00\""));
        assert!(json.contains("\"endTime\":\"12:00\""));
    }

    #[test]
    fn test_slot_optional_times_absent() {
        let json = r#"{"day":"Saturday","time":"Morning","status":"off"}"#;
        let slot: ScheduleSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.status, SlotStatus::Off);
        assert!(slot.start_time.is_none());
        let back = serde_json::to_string(&slot).unwrap();
        assert!(!back.contains("startTime"));
    }

    #[test]
    fn test_store_serializes_as_plain_object() {
        let mut store = ScheduleStore::new();
        store.insert("A1_2024-06-03", vec![]);
        let json = serde_json::to_string(&store).unwrap();
        assert_eq!(json, r#"{"A1_2024-06-03":[]}"#);
    }
}
