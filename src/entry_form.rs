//! Add-entry form state and its conversion into an [`Entry`].
//!
//! The form holds raw user input as strings. Which optional inputs are shown
//! and which survive submission both come from
//! [`MediaType::applicable_fields`], so switching the type after typing an
//! author does not leak that author into a movie entry.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::app_response::AppResponse;
use crate::entry_display::{display_title, meta_line, stars};
use crate::entry_model::{parse_date, Entry, EntryField, MediaType, Rating, DATE_FORMAT};
use crate::view_projection::format_day_date;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EntryForm {
    pub date: String,
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title: String,
    pub year: String,
    pub author: String,
    pub episode: String,
    pub teams: String,
    pub result: String,
    /// 0 means unrated.
    pub rating: u8,
    pub notes: String,
}

impl Default for EntryForm {
    fn default() -> Self {
        EntryForm {
            date: Local::now().date_naive().format(DATE_FORMAT).to_string(),
            media_type: MediaType::Movie,
            title: String::new(),
            year: String::new(),
            author: String::new(),
            episode: String::new(),
            teams: String::new(),
            result: String::new(),
            rating: 0,
            notes: String::new(),
        }
    }
}

/// Live rendering data for the form's preview line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryPreview {
    /// `MM/DD` of the form's date.
    pub day: String,
    pub title: String,
    pub css_class: &'static str,
    pub stars: Option<String>,
    pub meta: Option<String>,
}

/// Per-type form layout: which optional inputs to show and how to label them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormHints {
    #[serde(rename = "type")]
    pub media_type: MediaType,
    pub title_placeholder: &'static str,
    pub fields: Vec<FieldHint>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldHint {
    pub field: EntryField,
    pub label: &'static str,
}

impl FormHints {
    pub fn for_type(media_type: MediaType) -> Self {
        let form = EntryForm { media_type, ..EntryForm::default() };
        form.hints()
    }
}

impl EntryForm {
    pub fn hints(&self) -> FormHints {
        FormHints {
            media_type: self.media_type,
            title_placeholder: self.title_placeholder(),
            fields: self
                .visible_fields()
                .iter()
                .map(|&field| FieldHint { field, label: self.field_label(field) })
                .collect(),
        }
    }

    pub fn set_type(&mut self, media_type: MediaType) {
        self.media_type = media_type;
    }

    /// Star-button behaviour: picking the current rating clears it.
    pub fn toggle_rating(&mut self, stars: u8) {
        self.rating = if self.rating == stars { 0 } else { stars.min(Rating::MAX) };
    }

    pub fn visible_fields(&self) -> &'static [EntryField] {
        self.media_type.applicable_fields()
    }

    /// Label shown above an optional input for the current type.
    pub fn field_label(&self, field: EntryField) -> &'static str {
        match field {
            EntryField::Year => "Year",
            EntryField::Author if self.media_type == MediaType::Play => "Playwright",
            EntryField::Author => "Author",
            EntryField::Episode => "Episode(s)",
            EntryField::Teams => "Teams / Event",
            EntryField::Result => "Result",
        }
    }

    pub fn title_placeholder(&self) -> &'static str {
        match self.media_type {
            MediaType::Movie => "e.g. Chinatown",
            MediaType::Short => "e.g. Un Chien Andalou",
            MediaType::Series => "e.g. The Wire",
            MediaType::Book => "e.g. The Maltese Falcon",
            MediaType::Play => "e.g. Death of a Salesman",
            MediaType::ShortStory => "e.g. The Dead",
            MediaType::Sports => "e.g. NBA Finals",
        }
    }

    /// Whether the commit action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.title.trim().is_empty()
    }

    /// Builds the entry this form describes, under the given id.
    ///
    /// # Errors
    ///
    /// [`AppResponse::ValidationError`] when the title is blank or the date
    /// is not a valid `YYYY-MM-DD` calendar date. Every other field is
    /// optional and falls back to absent.
    pub fn to_entry(&self, id: impl Into<String>) -> Result<Entry, AppResponse> {
        if !self.can_submit() {
            return Err(AppResponse::ValidationError("Title is required".to_string()));
        }

        let date = parse_date(&self.date).map_err(|e| {
            AppResponse::ValidationError(format!("Invalid date '{}': {e}", self.date))
        })?;

        let mut entry = Entry::new(id, date, self.media_type, self.title.trim());
        self.apply_optional_fields(&mut entry);
        entry.rating = Rating::new(self.rating);
        entry.notes = non_blank(&self.notes);

        Ok(entry)
    }

    /// Preview data, or `None` until a title has been typed.
    pub fn preview(&self) -> Option<EntryPreview> {
        if self.title.is_empty() {
            return None;
        }

        let date = parse_date(&self.date).unwrap_or_else(|_| Local::now().date_naive());
        let mut entry = Entry::new("preview", date, self.media_type, self.title.as_str());
        self.apply_optional_fields(&mut entry);

        Some(EntryPreview {
            day: format_day_date(entry.date),
            title: display_title(&entry),
            css_class: self.media_type.css_class(),
            stars: Rating::new(self.rating).map(stars),
            meta: meta_line(&entry),
        })
    }

    fn apply_optional_fields(&self, entry: &mut Entry) {
        for field in self.visible_fields() {
            match field {
                EntryField::Year => entry.year = self.year.trim().parse::<i32>().ok(),
                EntryField::Author => entry.author = non_blank(&self.author),
                EntryField::Episode => entry.episode = non_blank(&self.episode),
                EntryField::Teams => entry.teams = non_blank(&self.teams),
                EntryField::Result => entry.result = non_blank(&self.result),
            }
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
