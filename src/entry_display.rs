//! Text formatting shared by every renderer of the log.

use serde::Serialize;

use crate::entry_model::{Entry, MediaType, Rating};
use crate::view_projection::TypeFilter;

const META_SEPARATOR: &str = " · ";

/// Present enrichments joined by ` · `, in year/author/episode/teams/result order.
pub fn meta_line(entry: &Entry) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(year) = entry.year {
        parts.push(year.to_string());
    }
    parts.extend(
        [&entry.author, &entry.episode, &entry.teams, &entry.result]
            .into_iter()
            .flatten()
            .cloned(),
    );

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(META_SEPARATOR))
    }
}

/// Filled stars for the rating, hollow stars for the rest: `★★★☆☆`.
pub fn stars(rating: Rating) -> String {
    let filled = usize::from(rating.stars());
    let hollow = usize::from(Rating::MAX) - filled;
    format!("{}{}", "★".repeat(filled), "☆".repeat(hollow))
}

/// Title with the sports result appended, e.g. `Super Bowl LIX — 40–22`.
pub fn display_title(entry: &Entry) -> String {
    match &entry.result {
        Some(result) => format!("{} — {}", entry.title, result),
        None => entry.title.clone(),
    }
}

/// Toolbar counter: `1 entry`, `12 entries`, `3 entries · Book`.
pub fn entry_count_label(count: usize, filter: TypeFilter) -> String {
    let noun = if count == 1 { "entry" } else { "entries" };
    match filter {
        TypeFilter::All => format!("{count} {noun}"),
        TypeFilter::Only(media_type) => format!("{count} {noun}{META_SEPARATOR}{}", media_type.label()),
    }
}

/// One row of the style key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LegendItem {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub label: &'static str,
    pub css_class: &'static str,
}

/// Key explaining how each type is styled, in canonical order.
pub fn legend() -> Vec<LegendItem> {
    MediaType::ALL
        .into_iter()
        .map(|media_type| LegendItem {
            media_type,
            label: match media_type {
                MediaType::Movie => "MOVIE",
                MediaType::Short => "SHORT",
                MediaType::Series => "TV SERIES",
                MediaType::Book => "Book",
                MediaType::Play => "Play",
                MediaType::ShortStory => "Short Story",
                MediaType::Sports => "SPORTS — Result",
            },
            css_class: media_type.css_class(),
        })
        .collect()
}
