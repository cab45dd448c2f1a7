//! Summary statistics over the generation log.

use crate::model::GenerationLogEntry;
use chrono::{DateTime, Datelike, Duration, Utc};
use std::collections::HashMap;

/// Shown when there is no favorite ingredient
pub const NO_FAVORITE: &str = "N/A";

/// Fixed window the per-day average is spread over
const AVERAGE_WINDOW_DAYS: usize = 30;

/// Weekday labels for [`weekly_histogram`], in bucket order
pub const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsSummary {
    pub total: usize,
    pub favorite: String,
    pub average_per_day: usize,
}

/// Total count, most frequent ingredient and a rough per-day average.
///
/// Ingredients are the comma-separated, trimmed tokens of each entry's input,
/// compared case-sensitively. Entries without an input add no tokens but still
/// count towards the total. Empty tokens are counted; if one wins, the favorite
/// is [`NO_FAVORITE`]. On a tie the token seen first wins. The average is
/// `total / 30` rounded half up, whatever dates the entries carry.
pub fn aggregate(records: &[GenerationLogEntry]) -> AnalyticsSummary {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut first_seen: Vec<&str> = Vec::new();

    for input in records.iter().filter_map(|r| r.ingredients_input.as_deref()) {
        for token in input.split(',').map(str::trim) {
            let count = counts.entry(token).or_insert_with(|| {
                first_seen.push(token);
                0
            });
            *count += 1;
        }
    }

    // max_by_key keeps the last maximum, so walk in reverse to keep the first
    let favorite = first_seen
        .iter()
        .rev()
        .max_by_key(|token| counts[*token])
        .filter(|token| !token.is_empty())
        .map(|token| token.to_string())
        .unwrap_or_else(|| NO_FAVORITE.to_string());

    let total = records.len();
    AnalyticsSummary {
        total,
        favorite,
        average_per_day: (total + AVERAGE_WINDOW_DAYS / 2) / AVERAGE_WINDOW_DAYS,
    }
}

/// Generations per weekday. Buckets are Monday first to line up with
/// [`WEEKDAY_LABELS`], not indexed by a Sunday-first day number. Unparseable
/// timestamps are skipped.
pub fn weekly_histogram(records: &[GenerationLogEntry]) -> [usize; 7] {
    let mut buckets = [0; 7];
    for at in records.iter().filter_map(GenerationLogEntry::timestamp) {
        buckets[at.weekday().num_days_from_monday() as usize] += 1;
    }
    buckets
}

/// Generations per day of month for days 1 to 30; the 31st is not counted.
pub fn monthly_histogram(records: &[GenerationLogEntry]) -> [usize; 30] {
    let mut buckets = [0; 30];
    for at in records.iter().filter_map(GenerationLogEntry::timestamp) {
        let day = at.day0() as usize;
        if day < buckets.len() {
            buckets[day] += 1;
        }
    }
    buckets
}

/// Generations strictly newer than seven days before `now`
pub fn count_this_week(records: &[GenerationLogEntry], now: DateTime<Utc>) -> usize {
    let week_ago = now - Duration::days(7);
    records
        .iter()
        .filter_map(GenerationLogEntry::timestamp)
        .filter(|at| *at > week_ago)
        .count()
}
