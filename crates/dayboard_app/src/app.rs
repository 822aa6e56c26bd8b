use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use dayboard_core::{
    date::{self, from_date_key, to_date_key},
    days::DayLocale,
    habit::HabitDraft,
    HabitBoard,
};
use serde::Deserialize;
use tracing::{debug, info, warn};

const DEFAULT_GROUP_COLOR: &str = "#3498db";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub(crate) seed_path: Option<PathBuf>,
    pub(crate) span_days: usize,
    pub(crate) days_before: usize,
    pub(crate) locale: DayLocale,
    pub(crate) selected_day: Option<NaiveDate>,
    pub(crate) output: OutputFormat,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_lookup(|name| std::env::var(name).ok()))
    }

    /// Builds a config from named variables. Values that do not parse are
    /// reported and left at their defaults.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(path) = lookup("DAYBOARD_SEED") {
            if !path.trim().is_empty() {
                config.seed_path = Some(PathBuf::from(path.trim()));
            }
        }
        if let Some(span) = lookup("DAYBOARD_SPAN_DAYS") {
            match span.trim().parse::<usize>() {
                Ok(value) if value > 0 => config.span_days = value,
                _ => warn!(%span, "ignoring invalid DAYBOARD_SPAN_DAYS"),
            }
        }
        if let Some(before) = lookup("DAYBOARD_DAYS_BEFORE") {
            match before.trim().parse::<usize>() {
                Ok(value) => config.days_before = value,
                Err(_) => warn!(%before, "ignoring invalid DAYBOARD_DAYS_BEFORE"),
            }
        }
        if let Some(tag) = lookup("DAYBOARD_LOCALE") {
            match DayLocale::parse(&tag) {
                Some(locale) => config.locale = locale,
                None => warn!(%tag, "ignoring unsupported DAYBOARD_LOCALE"),
            }
        }
        if let Some(key) = lookup("DAYBOARD_SELECTED_DAY") {
            match from_date_key(key.trim()) {
                Ok(day) => config.selected_day = Some(day),
                Err(err) => warn!(%err, "ignoring DAYBOARD_SELECTED_DAY"),
            }
        }
        if let Some(format) = lookup("DAYBOARD_FORMAT") {
            match format.trim().to_ascii_lowercase().as_str() {
                "text" => config.output = OutputFormat::Text,
                "json" => config.output = OutputFormat::Json,
                _ => warn!(%format, "ignoring unknown DAYBOARD_FORMAT"),
            }
        }
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed_path: None,
            span_days: 30,
            days_before: 3,
            locale: DayLocale::default(),
            selected_day: None,
            output: OutputFormat::default(),
        }
    }
}

/// Habits and goal groups to start the session with.
#[derive(Debug, Default, Deserialize)]
pub struct BoardSeed {
    #[serde(default)]
    pub habits: Vec<HabitDraft>,
    #[serde(default)]
    pub goal_groups: Vec<GoalGroupSeed>,
}

#[derive(Debug, Deserialize)]
pub struct GoalGroupSeed {
    pub title: String,
    #[serde(default = "default_group_color")]
    pub color: String,
    #[serde(default)]
    pub goals: Vec<GoalSeed>,
}

#[derive(Debug, Deserialize)]
pub struct GoalSeed {
    pub title: String,
    #[serde(default)]
    pub done: bool,
}

fn default_group_color() -> String {
    DEFAULT_GROUP_COLOR.to_string()
}

pub fn load_seed(path: &Path) -> Result<BoardSeed> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read seed file {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("failed to parse seed file {}", path.display()))
}

/// Feeds a seed into the board in file order. Entries the board rejects are
/// skipped.
pub fn apply_seed(board: &HabitBoard, seed: BoardSeed) -> usize {
    let mut skipped = 0;
    for draft in seed.habits {
        let title = draft.title.clone();
        if let Err(err) = board.append_habit(draft) {
            warn!(%title, error = %format!("{err:#}"), "skipping seeded habit");
            skipped += 1;
        }
    }
    for group in seed.goal_groups {
        let Some(group_id) = board.add_goal_group(&group.title, &group.color) else {
            warn!(title = %group.title, "skipping untitled goal group");
            skipped += 1;
            continue;
        };
        for goal in group.goals {
            match board.add_goal(group_id, &goal.title) {
                Some(goal_id) if goal.done => {
                    if let Err(err) = board.toggle_goal(group_id, goal_id) {
                        warn!(%err, "unable to mark seeded goal done");
                    }
                }
                Some(_) => {}
                None => skipped += 1,
            }
        }
    }
    skipped
}

pub fn run(config: AppConfig) -> Result<()> {
    let today = date::today();
    let board = HabitBoard::builder()
        .with_today(today)
        .with_locale(config.locale)
        .build()
        .context("failed to initialize habit board")?;

    if let Some(path) = &config.seed_path {
        let seed = load_seed(path)?;
        let skipped = apply_seed(&board, seed);
        info!(path = %path.display(), skipped, "seed applied");
    }
    if let Some(day) = config.selected_day {
        board.select_day(day);
    }
    debug!(selected = %board.selected_day(), "rendering board");

    let output = match config.output {
        OutputFormat::Text => render_page(&board, today, &config),
        OutputFormat::Json => board.snapshot_json()?,
    };
    println!("{output}");
    Ok(())
}

/// Renders the header, day strip, habit list and goal board as plain text.
pub fn render_page(board: &HabitBoard, today: NaiveDate, config: &AppConfig) -> String {
    let mut out = String::new();
    let selected_key = to_date_key(board.selected_day());

    let _ = writeln!(out, "{}", board.header_text(today));
    let strip: Vec<String> = board
        .day_strip(today, config.span_days, config.days_before)
        .into_iter()
        .map(|day| {
            let cell = format!("{} {}", day.label, day.day_of_month);
            if day.date_key == selected_key {
                format!("[{cell}]")
            } else {
                cell
            }
        })
        .collect();
    let _ = writeln!(out, "{}", strip.join("  "));
    out.push('\n');

    let cards = board.cards();
    if cards.is_empty() {
        let _ = writeln!(out, "{}", empty_list_message(config.locale));
    }
    for card in cards {
        let time = if card.schedule_text.is_empty() {
            "--:--".to_string()
        } else {
            card.schedule_text
        };
        let _ = writeln!(
            out,
            "{time:>5}  {}  [{} {}]",
            card.title, card.category.label, card.category.color
        );
        if let Some(notes) = card.notes {
            let _ = writeln!(out, "       {notes}");
        }
    }

    let groups = board.goal_groups();
    if !groups.is_empty() {
        out.push('\n');
    }
    for group in groups {
        let (done, total) = group.progress();
        let _ = writeln!(out, "{} ({done}/{total})", group.title);
        for goal in group.goals {
            let mark = if goal.done { 'x' } else { ' ' };
            let _ = writeln!(out, "  [{mark}] {}", goal.title);
        }
    }
    out
}

fn empty_list_message(locale: DayLocale) -> &'static str {
    match locale {
        DayLocale::PtBr => "Nenhum hábito encontrado",
        DayLocale::En => "No habits found",
    }
}
