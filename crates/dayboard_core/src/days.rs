use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::date::{self, to_date_key, weekday_index};

/// Language used for weekday labels and the day header.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayLocale {
    #[default]
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en")]
    En,
}

impl DayLocale {
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "pt-br" | "pt_br" | "pt" => Some(Self::PtBr),
            "en" | "en-us" | "en_us" | "en-gb" => Some(Self::En),
            _ => None,
        }
    }

    fn weekday_names(self) -> [&'static str; 7] {
        match self {
            Self::PtBr => ["dom.", "seg.", "ter.", "qua.", "qui.", "sex.", "sáb."],
            Self::En => ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"],
        }
    }

    fn today_word(self) -> &'static str {
        match self {
            Self::PtBr => "Hoje",
            Self::En => "Today",
        }
    }

    fn tomorrow_word(self) -> &'static str {
        match self {
            Self::PtBr => "Amanhã",
            Self::En => "Tomorrow",
        }
    }
}

/// One entry of the visible day strip.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DayItem {
    pub label: String,
    pub day_of_month: String,
    pub date_key: String,
}

/// Generates the day strip around the current local date.
pub fn generate_days(count: usize, days_before: usize) -> Vec<DayItem> {
    generate_days_from(date::today(), count, days_before, DayLocale::default())
}

/// Generates `count` consecutive days starting `days_before` days before `today`.
/// Empty when the start would fall outside the supported calendar range.
pub fn generate_days_from(
    today: NaiveDate,
    count: usize,
    days_before: usize,
    locale: DayLocale,
) -> Vec<DayItem> {
    let Some(start) = u64::try_from(days_before)
        .ok()
        .and_then(|before| today.checked_sub_days(Days::new(before)))
    else {
        return Vec::new();
    };
    start
        .iter_days()
        .take(count)
        .map(|day| DayItem {
            label: weekday_label(day, locale),
            day_of_month: format!("{:02}", day.day()),
            date_key: to_date_key(day),
        })
        .collect()
}

/// Abbreviated weekday name: first letter uppercased plus the next two characters.
pub fn weekday_label(date: NaiveDate, locale: DayLocale) -> String {
    let name = locale.weekday_names()[weekday_index(date) as usize];
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return String::new();
    };
    first.to_uppercase().chain(chars.take(2)).collect()
}

/// Title shown above the habit list for the selected day.
pub fn header_text(selected: NaiveDate, today: NaiveDate, locale: DayLocale) -> String {
    match selected.signed_duration_since(today).num_days() {
        0 => locale.today_word().to_string(),
        1 => locale.tomorrow_word().to_string(),
        _ => selected.format("%d/%m").to_string(),
    }
}
