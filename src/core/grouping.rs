/// Consecutive-period grouping and display labels
///
/// This module turns a class's flat schedule entries back into display
/// form: periods are bucketed per day, sorted, and consecutive runs are
/// merged into a single labeled range for the export spreadsheet.

use std::collections::BTreeMap;

use crate::core::model::ScheduleEntry;

/// One grouped display slot: a day label, a period (or period range) label,
/// and the room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedSlot {
    pub day: String,
    pub period: String,
    pub room: String,
}

/// Display label for a 0-based day index ("Thứ 2" for Monday).
///
/// Out-of-range days fall back to a generic "Ngày N" label instead of
/// being dropped.
pub fn day_label(day: u8) -> String {
    match day {
        0 => "Thứ 2".to_string(),
        1 => "Thứ 3".to_string(),
        2 => "Thứ 4".to_string(),
        3 => "Thứ 5".to_string(),
        4 => "Thứ 6".to_string(),
        other => format!("Ngày {}", other),
    }
}

/// Display label for a 0-based period index ("Tiết 1" for period 0).
pub fn period_label(period: u8) -> String {
    format!("Tiết {}", period + 1)
}

/// Group a class's schedule entries into display slots.
///
/// Periods are bucketed by day (the last room seen for a day wins), days
/// are iterated in ascending order, each day's periods are sorted, and
/// runs where every next period equals the previous plus one merge into a
/// single range label ("Tiết 1 - Tiết 3").
///
/// # Arguments
///
/// * `schedule` - The class's flat schedule entries
///
/// # Returns
///
/// Display slots ordered by day, then by period within the day.
pub fn group_schedule(schedule: &[ScheduleEntry]) -> Vec<GroupedSlot> {
    let mut day_periods: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
    let mut day_rooms: BTreeMap<u8, String> = BTreeMap::new();

    for entry in schedule {
        day_periods.entry(entry.day).or_default().push(entry.period);
        day_rooms.insert(entry.day, entry.room.clone());
    }

    let mut slots = Vec::new();

    for (day, mut periods) in day_periods {
        periods.sort_unstable();
        let room = day_rooms.get(&day).cloned().unwrap_or_default();
        let day_text = day_label(day);

        for run in consecutive_runs(&periods) {
            let period_text = if run.len() == 1 {
                period_label(run[0])
            } else {
                format!("{} - {}", period_label(run[0]), period_label(run[run.len() - 1]))
            };

            slots.push(GroupedSlot {
                day: day_text.clone(),
                period: period_text,
                room: room.clone(),
            });
        }
    }

    slots
}

/// Split a sorted period list into runs of consecutive values.
fn consecutive_runs(periods: &[u8]) -> Vec<Vec<u8>> {
    let mut runs = Vec::new();
    let mut current: Vec<u8> = Vec::new();

    for &period in periods {
        match current.last() {
            Some(&last) if period == last + 1 => current.push(period),
            Some(_) => {
                runs.push(std::mem::take(&mut current));
                current.push(period);
            }
            None => current.push(period),
        }
    }

    if !current.is_empty() {
        runs.push(current);
    }

    runs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::ScheduleEntry;

    fn entries(day: u8, periods: &[u8], room: &str) -> Vec<ScheduleEntry> {
        periods
            .iter()
            .map(|&period| ScheduleEntry::new(room, day, period))
            .collect()
    }

    #[test]
    fn test_day_label_known_and_fallback() {
        assert_eq!(day_label(0), "Thứ 2");
        assert_eq!(day_label(4), "Thứ 6");
        assert_eq!(day_label(9), "Ngày 9");
    }

    #[test]
    fn test_period_label_is_one_based() {
        assert_eq!(period_label(0), "Tiết 1");
        assert_eq!(period_label(6), "Tiết 7");
    }

    #[test]
    fn test_group_schedule_merges_consecutive_runs() {
        let schedule = entries(0, &[0, 1, 2, 4, 5], "A703");
        let slots = group_schedule(&schedule);

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].day, "Thứ 2");
        assert_eq!(slots[0].period, "Tiết 1 - Tiết 3");
        assert_eq!(slots[0].room, "A703");
        assert_eq!(slots[1].period, "Tiết 5 - Tiết 6");
    }

    #[test]
    fn test_group_schedule_single_period_has_no_range() {
        let schedule = entries(1, &[6], "B505");
        let slots = group_schedule(&schedule);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].day, "Thứ 3");
        assert_eq!(slots[0].period, "Tiết 7");
    }

    #[test]
    fn test_group_schedule_sorts_unordered_periods() {
        let schedule = entries(2, &[4, 2, 3], "C101");
        let slots = group_schedule(&schedule);

        assert_eq!(slots.len(), 1);
        assert_eq!(slots[0].period, "Tiết 3 - Tiết 5");
    }

    #[test]
    fn test_group_schedule_orders_days_ascending() {
        let mut schedule = entries(3, &[0], "A1");
        schedule.extend(entries(0, &[0], "A2"));
        let slots = group_schedule(&schedule);

        assert_eq!(slots[0].day, "Thứ 2");
        assert_eq!(slots[1].day, "Thứ 5");
    }

    #[test]
    fn test_group_schedule_empty() {
        assert!(group_schedule(&[]).is_empty());
    }
}
