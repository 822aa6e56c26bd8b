use chrono::NaiveDate;

use super::{Habit, Recurrence};
use crate::date::{from_date_key, weekday_index};

/// Sort position of habits without a usable time.
pub const END_OF_DAY_MINUTES: u32 = 24 * 60;

impl Recurrence {
    pub fn occurs_on(&self, date: NaiveDate) -> bool {
        match self {
            Self::Once { date: scheduled } => *scheduled == Some(date),
            Self::Custom { days } => !days.is_empty() && days.contains(&weekday_index(date)),
            Self::Everyday { skip_days } => !skip_days.contains(&weekday_index(date)),
            Self::Unrecognized => false,
        }
    }
}

pub fn is_active_on(habit: &Habit, date: NaiveDate) -> bool {
    habit.recurrence.occurs_on(date)
}

/// Like [`is_active_on`], for a date key. Keys that do not parse match nothing.
pub fn is_active_on_key(habit: &Habit, key: &str) -> bool {
    from_date_key(key)
        .map(|date| is_active_on(habit, date))
        .unwrap_or(false)
}

pub fn select_active_habits(habits: &[Habit], date: NaiveDate) -> Vec<Habit> {
    habits
        .iter()
        .filter(|habit| is_active_on(habit, date))
        .cloned()
        .collect()
}

/// Parses `H:MM` or `HH:MM` into minutes since midnight.
pub fn minutes_since_midnight(text: &str) -> Option<u32> {
    let (hours, minutes) = text.trim().split_once(':')?;
    let numeric = |part: &str, max_len: usize| {
        !part.is_empty() && part.len() <= max_len && part.chars().all(|c| c.is_ascii_digit())
    };
    if !numeric(hours, 2) || minutes.len() != 2 || !numeric(minutes, 2) {
        return None;
    }
    let hours: u32 = hours.parse().ok()?;
    let minutes: u32 = minutes.parse().ok()?;
    (hours < 24 && minutes < 60).then_some(hours * 60 + minutes)
}

fn sort_minutes(habit: &Habit) -> u32 {
    habit
        .time
        .as_deref()
        .and_then(minutes_since_midnight)
        .unwrap_or(END_OF_DAY_MINUTES)
}

/// Stable sort by time of day; untimed habits go last in input order.
pub fn sort_by_time(habits: &[Habit]) -> Vec<Habit> {
    let mut sorted = habits.to_vec();
    sorted.sort_by_key(sort_minutes);
    sorted
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;

    fn habit(id: &str, time: Option<&str>, recurrence: Recurrence) -> Habit {
        Habit {
            id: id.to_string(),
            title: id.to_string(),
            notes: None,
            category_id: "tarefa".to_string(),
            time: time.map(str::to_string),
            recurrence,
        }
    }

    fn date(key: &str) -> NaiveDate {
        from_date_key(key).unwrap()
    }

    #[test]
    fn everyday_is_active_unless_weekday_skipped() {
        let skip_days = BTreeSet::from([0, 6]);
        let weekend_off = habit("w", None, Recurrence::Everyday { skip_days: skip_days.clone() });
        // 2024-05-05 (Sunday) through 2024-05-11 (Saturday).
        for day in date("2024-05-05").iter_days().take(7) {
            let expected = !skip_days.contains(&weekday_index(day));
            assert_eq!(is_active_on(&weekend_off, day), expected, "{day}");
        }
    }

    #[test]
    fn custom_without_days_never_shows() {
        let empty = habit("c", None, Recurrence::Custom { days: BTreeSet::new() });
        assert!(date("2024-05-05")
            .iter_days()
            .take(14)
            .all(|day| !is_active_on(&empty, day)));

        let tuesdays = habit("t", None, Recurrence::Custom { days: BTreeSet::from([2]) });
        assert!(is_active_on(&tuesdays, date("2024-05-07")));
        assert!(!is_active_on(&tuesdays, date("2024-05-08")));
    }

    #[test]
    fn once_matches_only_its_date() {
        let once = habit("o", None, Recurrence::Once { date: Some(date("2024-05-01")) });
        assert!(is_active_on_key(&once, "2024-05-01"));
        assert!(!is_active_on_key(&once, "2024-05-02"));
        assert!(!is_active_on_key(&once, "not-a-date"));

        let cleared = habit("x", None, Recurrence::Once { date: None });
        assert!(!is_active_on_key(&cleared, "2024-05-01"));
        assert!(!is_active_on_key(&habit("u", None, Recurrence::Unrecognized), "2024-05-01"));
    }

    #[test]
    fn selection_preserves_input_order() {
        let habits = vec![
            habit("a", None, Recurrence::Everyday { skip_days: BTreeSet::new() }),
            habit("b", None, Recurrence::Custom { days: BTreeSet::from([3]) }),
            habit("c", None, Recurrence::Custom { days: BTreeSet::from([2]) }),
            habit("d", None, Recurrence::Unrecognized),
        ];
        let ids: Vec<_> = select_active_habits(&habits, date("2024-05-07"))
            .into_iter()
            .map(|h| h.id)
            .collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn parses_times() {
        assert_eq!(minutes_since_midnight("07:00"), Some(420));
        assert_eq!(minutes_since_midnight("7:05"), Some(425));
        assert_eq!(minutes_since_midnight("23:59"), Some(1439));
        for bad in ["", "24:00", "12:60", "noon", "12:5", "7:5", "1:2:3", ":30"] {
            assert_eq!(minutes_since_midnight(bad), None, "{bad}");
        }
    }

    #[test]
    fn sorts_untimed_last_and_keeps_ties_stable() {
        let any = || Recurrence::Everyday { skip_days: BTreeSet::new() };
        let habits = vec![
            habit("late", Some("21:00"), any()),
            habit("untimed", None, any()),
            habit("garbled", Some("soon"), any()),
            habit("early-1", Some("06:00"), any()),
            habit("early-2", Some("06:00"), any()),
        ];
        let sorted = sort_by_time(&habits);
        let ids: Vec<_> = sorted.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["early-1", "early-2", "late", "untimed", "garbled"]);
        assert_eq!(sort_by_time(&sorted), sorted);
    }
}
