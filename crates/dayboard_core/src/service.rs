use std::collections::HashSet;

use anyhow::{anyhow, ensure, Context, Result};
use chrono::NaiveDate;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::{
    category::{CategoryCatalog, CategoryView},
    date::{self, from_date_key, to_date_key},
    days::{self, DayItem, DayLocale},
    goals::{GoalBoard, GoalGroup},
    habit::{self, Habit, HabitDraft},
};

/// A habit as shown in the list for the selected day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HabitCard {
    pub id: String,
    pub title: String,
    pub category: CategoryView,
    pub schedule_text: String,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardSnapshot {
    pub selected_day: String,
    pub habits: Vec<Habit>,
    pub cards: Vec<HabitCard>,
    pub goal_groups: Vec<GoalGroup>,
}

/// Owns the habit collection, the selected day and the goal board.
pub struct HabitBoard {
    catalog: CategoryCatalog,
    locale: DayLocale,
    habits: RwLock<Vec<Habit>>,
    selected_day: RwLock<NaiveDate>,
    goals: RwLock<GoalBoard>,
    next_habit_number: Mutex<u64>,
}

pub struct HabitBoardBuilder {
    catalog: CategoryCatalog,
    locale: DayLocale,
    today: Option<NaiveDate>,
    habits: Vec<Habit>,
    goals: GoalBoard,
}

impl HabitBoardBuilder {
    pub fn new() -> Self {
        Self {
            catalog: CategoryCatalog::standard(),
            locale: DayLocale::default(),
            today: None,
            habits: Vec::new(),
            goals: GoalBoard::new(),
        }
    }

    pub fn with_catalog(mut self, catalog: CategoryCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_locale(mut self, locale: DayLocale) -> Self {
        self.locale = locale;
        self
    }

    /// Day the cursor starts on. Defaults to the local date at build time.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_habit(mut self, habit: Habit) -> Self {
        self.habits.push(habit);
        self
    }

    pub fn with_goals(mut self, goals: GoalBoard) -> Self {
        self.goals = goals;
        self
    }

    pub fn build(self) -> Result<HabitBoard> {
        let mut seen = HashSet::new();
        for habit in &self.habits {
            ensure!(
                seen.insert(habit.id.as_str()),
                "duplicate habit id `{}`",
                habit.id
            );
        }
        let today = self.today.unwrap_or_else(date::today);
        info!(
            habit_count = self.habits.len(),
            category_count = self.catalog.len(),
            today = %today,
            "habit board ready"
        );
        Ok(HabitBoard {
            catalog: self.catalog,
            locale: self.locale,
            next_habit_number: Mutex::new(self.habits.len() as u64),
            habits: RwLock::new(self.habits),
            selected_day: RwLock::new(today),
            goals: RwLock::new(self.goals),
        })
    }
}

impl Default for HabitBoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HabitBoard {
    pub fn builder() -> HabitBoardBuilder {
        HabitBoardBuilder::new()
    }

    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    pub fn locale(&self) -> DayLocale {
        self.locale
    }

    pub fn habits(&self) -> Vec<Habit> {
        self.habits.read().clone()
    }

    pub fn habit(&self, habit_id: &str) -> Option<Habit> {
        self.habits
            .read()
            .iter()
            .find(|habit| habit.id == habit_id)
            .cloned()
    }

    /// Validates a creation payload and places the new habit first.
    pub fn create_habit(&self, draft: HabitDraft) -> Result<Habit> {
        let mut habit = self.admit(draft)?;
        let mut habits = self.habits.write();
        habit.id = self.allocate_id(&habits);
        debug!(id = %habit.id, title = %habit.title, "habit created");
        habits.insert(0, habit.clone());
        Ok(habit)
    }

    /// Validates a payload and places the habit after the existing ones, so a
    /// batch loaded in order keeps that order.
    pub fn append_habit(&self, draft: HabitDraft) -> Result<Habit> {
        let mut habit = self.admit(draft)?;
        let mut habits = self.habits.write();
        habit.id = self.allocate_id(&habits);
        debug!(id = %habit.id, title = %habit.title, "habit appended");
        habits.push(habit.clone());
        Ok(habit)
    }

    pub fn selected_day(&self) -> NaiveDate {
        *self.selected_day.read()
    }

    pub fn select_day(&self, day: NaiveDate) {
        *self.selected_day.write() = day;
    }

    pub fn select_day_key(&self, key: &str) -> Result<()> {
        let day = from_date_key(key).with_context(|| format!("cannot select day `{key}`"))?;
        self.select_day(day);
        Ok(())
    }

    /// Day strip of `count` days starting `days_before` before `today`.
    pub fn day_strip(&self, today: NaiveDate, count: usize, days_before: usize) -> Vec<DayItem> {
        days::generate_days_from(today, count, days_before, self.locale)
    }

    pub fn header_text(&self, today: NaiveDate) -> String {
        days::header_text(self.selected_day(), today, self.locale)
    }

    /// Habits occurring on the selected day, ordered by time.
    pub fn active_habits(&self) -> Vec<Habit> {
        let selected = self.selected_day();
        let habits = self.habits.read();
        habit::sort_by_time(&habit::select_active_habits(&habits, selected))
    }

    pub fn cards(&self) -> Vec<HabitCard> {
        self.active_habits()
            .into_iter()
            .map(|habit| HabitCard {
                category: self.catalog.resolve(&habit.category_id),
                schedule_text: habit.schedule_text().to_string(),
                id: habit.id,
                title: habit.title,
                notes: habit.notes,
            })
            .collect()
    }

    /// Deletes on the selected day. Unknown scopes and ids change nothing.
    #[instrument(skip(self))]
    pub fn delete(&self, habit_id: &str, scope: &str) {
        let selected = self.selected_day();
        let mut habits = self.habits.write();
        let updated = habit::delete_occurrence(&habits, habit_id, selected, scope);
        debug!(before = habits.len(), after = updated.len(), "delete applied");
        *habits = updated;
    }

    /// Drops records that can never be shown again: once-habits whose day was
    /// deleted and habits without a recognised policy.
    pub fn prune_inert(&self) -> usize {
        let mut habits = self.habits.write();
        let before = habits.len();
        habits.retain(|habit| !habit.recurrence.is_inert());
        let removed = before - habits.len();
        if removed > 0 {
            info!(removed, "pruned inert habits");
        }
        removed
    }

    pub fn goal_groups(&self) -> Vec<GoalGroup> {
        self.goals.read().groups().to_vec()
    }

    pub fn add_goal_group(&self, title: &str, color: &str) -> Option<u64> {
        self.goals.write().add_group(title, color)
    }

    pub fn add_goal(&self, group_id: u64, title: &str) -> Option<u64> {
        self.goals.write().add_goal(group_id, title)
    }

    pub fn toggle_goal(&self, group_id: u64, goal_id: u64) -> Result<()> {
        if self.goals.write().toggle_goal(group_id, goal_id) {
            Ok(())
        } else {
            Err(anyhow!("no goal {} in group {}", goal_id, group_id))
        }
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            selected_day: to_date_key(self.selected_day()),
            habits: self.habits(),
            cards: self.cards(),
            goal_groups: self.goal_groups(),
        }
    }

    pub fn snapshot_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.snapshot()).context("failed to encode board snapshot")
    }
}

impl HabitBoard {
    /// Checks a payload against the catalog and the draft rules. The returned
    /// habit has no id yet.
    fn admit(&self, draft: HabitDraft) -> Result<Habit> {
        if let Some(category_id) = draft.category_id.as_deref().map(str::trim) {
            ensure!(
                category_id.is_empty() || self.catalog.contains(category_id),
                "unknown category `{}`",
                category_id
            );
        }
        draft
            .validate(String::new())
            .context("habit creation payload rejected")
    }

    fn allocate_id(&self, habits: &[Habit]) -> String {
        let mut counter = self.next_habit_number.lock();
        loop {
            *counter += 1;
            let candidate = format!("habit-{:04}", *counter);
            if !habits.iter().any(|habit| habit.id == candidate) {
                return candidate;
            }
        }
    }
}
