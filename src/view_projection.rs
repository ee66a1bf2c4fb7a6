//! Month → day → entries grouping of the log, newest first.
//!
//! The projection is a pure function of the entry slice and a [`TypeFilter`].
//! Months are ordered by the most recent date they contain, days by date,
//! and entries within one day keep the order they have in the collection.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::entry_model::{Entry, MediaType};

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Which entries the log view shows.
///
/// Serialized as `"all"` or a media type name such as `"short_story"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeFilter {
    #[default]
    All,
    Only(MediaType),
}

impl TypeFilter {
    pub fn matches(self, entry: &Entry) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(media_type) => entry.media_type == media_type,
        }
    }
}

impl Display for TypeFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all"),
            TypeFilter::Only(media_type) => write!(f, "{media_type}"),
        }
    }
}

impl FromStr for TypeFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(TypeFilter::All),
            other => other.parse().map(TypeFilter::Only),
        }
    }
}

impl TryFrom<String> for TypeFilter {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TypeFilter> for String {
    fn from(filter: TypeFilter) -> Self {
        filter.to_string()
    }
}

impl From<MediaType> for TypeFilter {
    fn from(media_type: MediaType) -> Self {
        TypeFilter::Only(media_type)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayGroup {
    pub date: NaiveDate,
    /// `MM/DD` label shown beside each row.
    pub label: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthGroup {
    /// Month key such as `FEB 2026`.
    pub month: String,
    pub days: Vec<DayGroup>,
}

impl MonthGroup {
    /// Most recent date in the bucket.
    pub fn latest_date(&self) -> Option<NaiveDate> {
        self.days.iter().map(|d| d.date).max()
    }

    pub fn entry_count(&self) -> usize {
        self.days.iter().map(|d| d.entries.len()).sum()
    }
}

/// `2026-02-13` → `FEB 2026`.
pub fn format_month_key(date: NaiveDate) -> String {
    format!("{} {:04}", MONTHS[date.month0() as usize], date.year())
}

/// `2026-02-13` → `02/13`.
pub fn format_day_date(date: NaiveDate) -> String {
    format!("{:02}/{:02}", date.month(), date.day())
}

pub fn filter_entries(entries: &[Entry], filter: TypeFilter) -> Vec<&Entry> {
    entries.iter().filter(|e| filter.matches(e)).collect()
}

/// Groups the filtered entries by month and day for display.
pub fn group_by_month(entries: &[Entry], filter: TypeFilter) -> Vec<MonthGroup> {
    let mut months: BTreeMap<String, BTreeMap<NaiveDate, Vec<Entry>>> = BTreeMap::new();

    for entry in filter_entries(entries, filter) {
        months
            .entry(format_month_key(entry.date))
            .or_default()
            .entry(entry.date)
            .or_default()
            .push(entry.clone());
    }

    let mut grouped: Vec<MonthGroup> = months
        .into_iter()
        .map(|(month, days)| MonthGroup {
            month,
            days: days
                .into_iter()
                .rev()
                .map(|(date, entries)| DayGroup {
                    date,
                    label: format_day_date(date),
                    entries,
                })
                .collect(),
        })
        .collect();

    // Days are already newest-first, so the first day holds each bucket's max date.
    grouped.sort_by(|a, b| {
        let latest_a = a.days.first().map(|d| d.date);
        let latest_b = b.days.first().map(|d| d.date);
        latest_b.cmp(&latest_a)
    });

    grouped
}
