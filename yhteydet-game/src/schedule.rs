//! Weekly scheduler: maps a calendar date to the active puzzle.
//!
//! Rotation is a pure function of the date and catalog length; nothing is
//! stored about which puzzle is currently active.

use chrono::{Datelike, Days, NaiveDate};

use crate::data::{Catalog, PuzzleDefinition};

/// First Monday of week 1.
const EPOCH_YMD: (i32, u32, u32) = (2025, 8, 18);

/// Key namespace for persisted weekly records.
const WEEK_KEY_PREFIX: &str = "connections-weekly-week";

fn epoch() -> NaiveDate {
    let (y, m, d) = EPOCH_YMD;
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

/// Week number for `date`, starting at 1 on the epoch Monday and advancing
/// every seven days. Dates at or before the epoch collapse to week 1.
#[must_use]
pub fn week_index_for(date: NaiveDate) -> u32 {
    let days = date.signed_duration_since(epoch()).num_days();
    let week = days.div_euclid(7) + 1;
    u32::try_from(week.max(1)).unwrap_or(1)
}

/// Storage key for one week's completion record.
#[must_use]
pub fn week_key(week_index: u32) -> String {
    format!("{WEEK_KEY_PREFIX}-{week_index}")
}

/// The puzzle active during `week_index`, rotating through the catalog.
#[must_use]
pub fn resolve_weekly_puzzle(catalog: &Catalog, week_index: u32) -> &PuzzleDefinition {
    let slot = (week_index.max(1) - 1) as usize % catalog.len();
    // A catalog is non-empty by construction, so the slot always resolves.
    catalog
        .get(slot)
        .unwrap_or_else(|| &catalog.puzzles()[0])
}

/// Date the next weekly puzzle unlocks. Always strictly after `date`, so a
/// Monday maps to the following Monday.
#[must_use]
pub fn next_monday(date: NaiveDate) -> NaiveDate {
    let dow = u64::from(date.weekday().num_days_from_sunday());
    let mut ahead = (8 - dow) % 7;
    if ahead == 0 {
        ahead = 7;
    }
    date.checked_add_days(Days::new(ahead)).unwrap_or(date)
}
