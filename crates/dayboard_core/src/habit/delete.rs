use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Habit, Recurrence};
use crate::date::weekday_index;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DeleteScope {
    /// Only the occurrence on the selected day.
    Today,
    /// Every habit sharing the target's title and time.
    All,
}

impl DeleteScope {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "today" => Some(Self::Today),
            "all" => Some(Self::All),
            _ => None,
        }
    }
}

/// Deletes using a scope as received from the presenter. Unknown scopes
/// leave the collection unchanged.
pub fn delete_occurrence(
    habits: &[Habit],
    habit_id: &str,
    selected: NaiveDate,
    scope: &str,
) -> Vec<Habit> {
    match DeleteScope::parse(scope) {
        Some(scope) => apply_delete(habits, habit_id, selected, scope),
        None => {
            debug!(scope, "ignoring unknown delete scope");
            habits.to_vec()
        }
    }
}

pub fn apply_delete(
    habits: &[Habit],
    habit_id: &str,
    selected: NaiveDate,
    scope: DeleteScope,
) -> Vec<Habit> {
    let Some(target) = habits.iter().find(|habit| habit.id == habit_id) else {
        debug!(habit_id, "delete target not found");
        return habits.to_vec();
    };

    match scope {
        DeleteScope::Today => habits
            .iter()
            .map(|habit| {
                if habit.id == habit_id {
                    skip_occurrence(habit, selected)
                } else {
                    habit.clone()
                }
            })
            .collect(),
        DeleteScope::All => {
            let title = target.title.as_str();
            let time = target.schedule_text();
            habits
                .iter()
                .filter(|habit| !(habit.title == title && habit.schedule_text() == time))
                .cloned()
                .collect()
        }
    }
}

/// Suppresses one day's occurrence while keeping the habit's policy.
fn skip_occurrence(habit: &Habit, selected: NaiveDate) -> Habit {
    let weekday = weekday_index(selected);
    let mut updated = habit.clone();
    match &mut updated.recurrence {
        Recurrence::Once { date } => {
            if *date == Some(selected) {
                *date = None;
            }
        }
        Recurrence::Custom { days } => {
            days.remove(&weekday);
        }
        Recurrence::Everyday { skip_days } => {
            skip_days.insert(weekday);
        }
        Recurrence::Unrecognized => {}
    }
    updated
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use crate::date::from_date_key;
    use crate::habit::is_active_on;

    fn habit(id: &str, title: &str, time: Option<&str>, recurrence: Recurrence) -> Habit {
        Habit {
            id: id.to_string(),
            title: title.to_string(),
            notes: None,
            category_id: "esporte".to_string(),
            time: time.map(str::to_string),
            recurrence,
        }
    }

    fn date(key: &str) -> NaiveDate {
        from_date_key(key).unwrap()
    }

    fn everyday() -> Recurrence {
        Recurrence::Everyday {
            skip_days: BTreeSet::new(),
        }
    }

    #[test]
    fn today_on_everyday_skips_that_weekday() {
        let tuesday = date("2024-05-07");
        let habits = vec![habit("a", "Stretch", Some("07:00"), everyday())];

        let updated = delete_occurrence(&habits, "a", tuesday, "today");
        assert_eq!(
            updated[0].recurrence,
            Recurrence::Everyday {
                skip_days: BTreeSet::from([2])
            }
        );
        assert!(!is_active_on(&updated[0], tuesday));
        assert!(is_active_on(&updated[0], date("2024-05-08")));

        let again = delete_occurrence(&updated, "a", date("2024-05-14"), "today");
        assert_eq!(again, updated, "skip set must not accumulate duplicates");
    }

    #[test]
    fn today_on_custom_removes_only_that_weekday() {
        let habits = vec![habit(
            "c",
            "Swim",
            None,
            Recurrence::Custom {
                days: BTreeSet::from([1, 3]),
            },
        )];
        let updated = apply_delete(&habits, "c", date("2024-05-06"), DeleteScope::Today);
        assert_eq!(
            updated[0].recurrence,
            Recurrence::Custom {
                days: BTreeSet::from([3])
            }
        );
        assert!(is_active_on(&updated[0], date("2024-05-08")));
    }

    #[test]
    fn today_on_once_clears_date_but_keeps_record() {
        let first = date("2024-05-01");
        let habits = vec![habit("o", "Dentist", Some("10:00"), Recurrence::Once { date: Some(first) })];

        let elsewhere = apply_delete(&habits, "o", date("2024-05-02"), DeleteScope::Today);
        assert_eq!(elsewhere, habits);

        let updated = apply_delete(&habits, "o", first, DeleteScope::Today);
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].recurrence, Recurrence::Once { date: None });
        assert!(first
            .iter_days()
            .take(30)
            .chain(date("2020-01-01").iter_days().take(30))
            .all(|day| !is_active_on(&updated[0], day)));
    }

    #[test]
    fn all_removes_every_habit_with_same_title_and_time() {
        let habits = vec![
            habit("r1", "Run", Some("06:00"), everyday()),
            habit("r2", "Run", Some("06:00"), Recurrence::Custom { days: BTreeSet::from([4]) }),
            habit("r3", "Run", Some("18:00"), everyday()),
            habit("s1", "Read", Some("06:00"), everyday()),
        ];
        let updated = delete_occurrence(&habits, "r1", date("2024-05-07"), "all");
        let ids: Vec<_> = updated.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, ["r3", "s1"]);
    }

    #[test]
    fn all_treats_missing_and_blank_time_alike() {
        let habits = vec![
            habit("a", "Journal", None, everyday()),
            habit("b", "Journal", Some(""), everyday()),
        ];
        assert!(apply_delete(&habits, "b", date("2024-05-07"), DeleteScope::All).is_empty());
    }

    #[test]
    fn unknown_scope_or_id_is_a_no_op() {
        let habits = vec![
            habit("a", "Run", Some("06:00"), everyday()),
            habit("b", "Read", None, Recurrence::Unrecognized),
        ];
        let day = date("2024-05-07");
        assert_eq!(delete_occurrence(&habits, "a", day, "tomorrow"), habits);
        assert_eq!(delete_occurrence(&habits, "a", day, "ALL"), habits);
        assert_eq!(delete_occurrence(&habits, "zzz", day, "today"), habits);
        assert_eq!(delete_occurrence(&habits, "zzz", day, "all"), habits);
        assert_eq!(delete_occurrence(&habits, "b", day, "today"), habits);
    }
}
