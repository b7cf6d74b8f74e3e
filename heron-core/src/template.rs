//! Default weekly schedule template
//!
//! The canonical "never configured yet" week: full days Monday through
//! Friday, Saturday morning only, never a Sunday entry.

use shared::models::{ScheduleSlot, SlotPeriod, SlotStatus, Weekday, WeeklySchedule};

const WORKDAYS: [Weekday; 5] = [
    Weekday::Monday,
    Weekday::Tuesday,
    Weekday::Wednesday,
    Weekday::Thursday,
    Weekday::Friday,
];

/// Build the default weekly schedule (16 slots)
pub fn default_schedule() -> WeeklySchedule {
    let mut slots = Vec::with_capacity(16);
    for day in WORKDAYS {
        slots.push(ScheduleSlot::new(
            day,
            SlotPeriod::Morning,
            SlotStatus::Working,
            "08:00",
            "12:00",
        ));
        slots.push(ScheduleSlot::new(
            day,
            SlotPeriod::Midday,
            SlotStatus::Break,
            "12:00",
            "13:00",
        ));
        slots.push(ScheduleSlot::new(
            day,
            SlotPeriod::Afternoon,
            SlotStatus::Working,
            "13:00",
            "17:00",
        ));
    }
    slots.push(ScheduleSlot::new(
        Weekday::Saturday,
        SlotPeriod::Morning,
        SlotStatus::Working,
        "08:00",
        "13:00",
    ));
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_has_sixteen_slots() {
        let week = default_schedule();
        assert_eq!(week.len(), 16);
        for day in WORKDAYS {
            assert_eq!(week.iter().filter(|s| s.day == day).count(), 3);
        }
        assert_eq!(
            week.iter().filter(|s| s.day == Weekday::Saturday).count(),
            1
        );
        assert!(week.iter().all(|s| s.day != Weekday::Sunday));
    }

    #[test]
    fn test_template_slot_details() {
        let week = default_schedule();
        let midday_breaks: Vec<_> = week
            .iter()
            .filter(|s| s.time == SlotPeriod::Midday)
            .collect();
        assert_eq!(midday_breaks.len(), 5);
        assert!(midday_breaks.iter().all(|s| s.status == SlotStatus::Break));

        let saturday = week.iter().find(|s| s.day == Weekday::Saturday).unwrap();
        assert_eq!(saturday.time, SlotPeriod::Morning);
        assert_eq!(saturday.status, SlotStatus::Working);
        assert_eq!(saturday.start_time.as_deref(), Some("08:00"));
        assert_eq!(saturday.end_time.as_deref(), Some("13:00"));
    }
}
