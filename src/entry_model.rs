//! Data model for logged media entries.
//!
//! This module defines [`Entry`], the single record type persisted by the
//! log, together with the closed set of [`MediaType`] categories, the
//! validated [`Rating`] newtype and the [`EntryField`] lookup table that
//! decides which optional enrichments make sense for each type.
//!
//! # Serialization
//!
//! Entries serialize to the flat JSON shape the log has always stored:
//!
//! ```json
//! {
//!   "id": "seed-1",
//!   "date": "2026-02-13",
//!   "type": "movie",
//!   "title": "Is This Thing On?",
//!   "rating": 3
//! }
//! ```
//!
//! Optional fields are omitted when absent and default to absent when a
//! stored record lacks them, so records written by older builds keep loading.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Date layout used on disk, in forms and across FFI.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Category of consumed media.
///
/// The set is closed. Serialized names are the snake_case variant names
/// (`"short_story"` for [`MediaType::ShortStory`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Movie,
    Short,
    Series,
    Book,
    Play,
    ShortStory,
    Sports,
}

impl MediaType {
    /// Every media type in canonical display order.
    pub const ALL: [MediaType; 7] = [
        MediaType::Movie,
        MediaType::Short,
        MediaType::Series,
        MediaType::Book,
        MediaType::Play,
        MediaType::ShortStory,
        MediaType::Sports,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Short => "short",
            MediaType::Series => "series",
            MediaType::Book => "book",
            MediaType::Play => "play",
            MediaType::ShortStory => "short_story",
            MediaType::Sports => "sports",
        }
    }

    /// Human label used on filter controls and the type selector.
    pub fn label(self) -> &'static str {
        match self {
            MediaType::Movie => "Movie",
            MediaType::Short => "Short Film",
            MediaType::Series => "TV Series",
            MediaType::Book => "Book",
            MediaType::Play => "Play",
            MediaType::ShortStory => "Short Story",
            MediaType::Sports => "Sports",
        }
    }

    /// Style class a renderer attaches to titles of this type.
    pub fn css_class(self) -> &'static str {
        match self {
            MediaType::Movie => "movies",
            MediaType::Short => "shorts",
            MediaType::Series => "series",
            MediaType::Book => "books",
            MediaType::Play => "plays",
            MediaType::ShortStory => "short-stories",
            MediaType::Sports => "sports",
        }
    }

    /// Optional enrichments that apply to this type.
    ///
    /// This is the one table both the form and entry construction consult;
    /// `rating` and `notes` are not listed because every type accepts them.
    pub fn applicable_fields(self) -> &'static [EntryField] {
        match self {
            MediaType::Movie | MediaType::Short => &[EntryField::Year],
            MediaType::Series => &[EntryField::Episode],
            MediaType::Book | MediaType::Play | MediaType::ShortStory => &[EntryField::Author],
            MediaType::Sports => &[EntryField::Teams, EntryField::Result],
        }
    }

    pub fn accepts(self, field: EntryField) -> bool {
        self.applicable_fields().contains(&field)
    }
}

impl Display for MediaType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MediaType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MediaType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("Unknown media type: {s}"))
    }
}

/// Type-conditional optional field of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryField {
    Year,
    Author,
    Episode,
    Teams,
    Result,
}

/// A 1 to 5 star rating.
///
/// Construction through [`Rating::new`] or deserialization rejects anything
/// outside that range, so a stored `"rating": 7` makes the record malformed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const MAX: u8 = 5;

    pub fn new(stars: u8) -> Option<Self> {
        (1..=Self::MAX).contains(&stars).then_some(Rating(stars))
    }

    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value).ok_or_else(|| format!("Rating must be between 1 and 5, got {value}"))
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// One logged consumption event.
///
/// Entries are immutable once created; the only mutation the log supports is
/// removing a whole record by [`Entry::id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    /// Opaque identifier, unique across the collection.
    pub id: String,

    /// Day the media was consumed; the primary ordering key.
    pub date: NaiveDate,

    #[serde(rename = "type")]
    pub media_type: MediaType,

    /// Never blank after trimming.
    pub title: String,

    /// Release year, for movies and shorts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,

    /// Author or playwright, for books, plays and short stories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Episode range for series, e.g. `S1E1–4`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub episode: Option<String>,

    /// Participants for sports, e.g. `Eagles vs Chiefs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<String>,

    /// Final score for sports, e.g. `40–22`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Entry {
    /// Creates an entry with only the required fields set.
    pub fn new(id: impl Into<String>, date: NaiveDate, media_type: MediaType, title: impl Into<String>) -> Self {
        Entry {
            id: id.into(),
            date,
            media_type,
            title: title.into(),
            year: None,
            author: None,
            episode: None,
            teams: None,
            result: None,
            rating: None,
            notes: None,
        }
    }

    /// The `"YYYY-MM-DD"` form of [`Entry::date`].
    pub fn date_key(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Parses a `"YYYY-MM-DD"` calendar date.
pub fn parse_date(value: &str) -> Result<NaiveDate, chrono::ParseError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
}
