//! # Seen/Read Core
//!
//! Local-first core of a personal log of watched, read and attended media:
//! movies, shorts, series, books, plays, short stories and sports events.
//! Entries live in memory and are mirrored as one JSON array into LMDB under
//! a fixed key; the log view groups them by month and day, newest first.
//!
//! ## Features
//!
//! - **Best-effort persistence**: an unreadable store falls back to the seed
//!   collection and failed writes never interrupt the session
//! - **Deterministic projection**: month → day → entries grouping with stable
//!   ordering for any input order
//! - **FFI-ready**: every operation returns a serialized [`AppResponse`] so a
//!   Flutter or webview front-end can drive the log through a C ABI
//! - **Explicit configuration**: database name, storage key and seed come from
//!   a [`LogConfig`] rather than globals
//!
//! ## Quick Start
//!
//! ```no_run
//! use seen_read_core::{create_log, add_entry, get_grouped};
//! use std::ffi::CString;
//!
//! let name = CString::new("my_log").unwrap();
//! let log = create_log(name.as_ptr());
//!
//! let form = CString::new(r#"{"date":"2026-02-20","type":"book","title":"The Long Goodbye"}"#).unwrap();
//! let created = add_entry(log, form.as_ptr());
//! let view = get_grouped(log);
//! ```
//!
//! ## FFI Functions
//!
//! - [`create_log`] / [`create_log_with_config`] - Open a log instance
//! - [`new_entry_form`] - Blank add-entry form with today's date
//! - [`add_entry`] - Log a new entry from form JSON
//! - [`remove_entry`] - Delete an entry by id
//! - [`get_entries`] - The whole collection
//! - [`get_grouped`] - Month/day grouping for the active filter
//! - [`get_view_state`] / [`apply_view_action`] - Dialog, legend and filter state
//! - [`get_entry_fields`] - Optional fields that apply to a media type
//! - [`get_form_hints`] - Field labels and title placeholder for a media type
//! - [`preview_entry`] - Preview line for a form that has not been submitted
//! - [`close_log`] - Flush and release a log instance
//! - [`free_response`] - Release a string returned by any of the above

pub mod app_response;
pub mod entry_display;
pub mod entry_form;
pub mod entry_model;
pub mod entry_store;
pub mod local_log_state;
pub mod local_storage;
pub mod log_config;
pub mod view_projection;
pub mod view_state;

pub use crate::app_response::AppResponse;
pub use crate::entry_form::{EntryForm, FormHints};
pub use crate::entry_model::{Entry, EntryField, MediaType, Rating};
pub use crate::entry_store::EntryStore;
pub use crate::local_log_state::{AppLogState, LogView};
pub use crate::local_storage::{KeyValueStorage, LmdbStorage, MemoryStorage};
pub use crate::log_config::LogConfig;
pub use crate::view_projection::{group_by_month, DayGroup, MonthGroup, TypeFilter};
pub use crate::view_state::{ViewAction, ViewState};

use std::ffi::{CStr, CString};
use std::os::raw::c_char;

use log::{info, warn};
use serde::Serialize;

/// Opens (or creates) a log backed by `{name}.lmdb` with the default storage
/// key and seed collection.
///
/// # Returns
///
/// A pointer to the [`AppLogState`] on success, or a null pointer when the
/// name is null, not UTF-8, or the LMDB environment cannot be opened. Release
/// the handle with [`close_log`].
///
/// # Examples
///
/// ```no_run
/// use std::ffi::CString;
/// use seen_read_core::create_log;
///
/// let name = CString::new("seen_read").unwrap();
/// let log = create_log(name.as_ptr());
/// assert!(!log.is_null());
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_log(name: *const c_char) -> *mut AppLogState {
    if name.is_null() {
        warn!("Null name pointer passed to create_log");
        return std::ptr::null_mut();
    }

    let name_str = match unsafe { CStr::from_ptr(name).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in name parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    open_log(LogConfig::with_db_name(name_str))
}

/// Opens a log from a JSON-encoded [`LogConfig`].
///
/// Missing keys take their defaults, so `{"db_name":"books"}` is a complete
/// configuration. Returns null on a null pointer, malformed JSON or an LMDB
/// failure.
///
/// # JSON Format
///
/// ```json
/// {
///   "db_name": "seen_read",
///   "storage_key": "seen-read-entries",
///   "seed": [{"id":"seed-1","date":"2026-02-13","type":"movie","title":"Is This Thing On?"}]
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn create_log_with_config(config_json: *const c_char) -> *mut AppLogState {
    if config_json.is_null() {
        warn!("Null config pointer passed to create_log_with_config");
        return std::ptr::null_mut();
    }

    let json = match unsafe { CStr::from_ptr(config_json).to_str() } {
        Ok(s) => s,
        Err(e) => {
            warn!("Invalid UTF-8 in config parameter: {e}");
            return std::ptr::null_mut();
        }
    };

    match serde_json::from_str::<LogConfig>(json) {
        Ok(config) => open_log(config),
        Err(e) => {
            warn!("Invalid log configuration: {e}");
            std::ptr::null_mut()
        }
    }
}

fn open_log(config: LogConfig) -> *mut AppLogState {
    info!("Opening log at: {}", config.lmdb_dir());

    match AppLogState::<LmdbStorage>::init(config) {
        Ok(state) => {
            info!("✅ Log opened with {} entries", state.store.len());
            Box::into_raw(Box::new(state))
        }
        Err(e) => {
            warn!("❌ Failed to open log: {e}");
            std::ptr::null_mut()
        }
    }
}

/// Returns a blank add-entry form, dated today, as JSON.
#[no_mangle]
pub extern "C" fn new_entry_form() -> *const c_char {
    ok_json(&EntryForm::default())
}

/// Logs a new entry built from an [`EntryForm`] JSON payload.
///
/// On success the entry is prepended to the collection, persisted, the add
/// dialog is closed, and the response carries the created entry. A blank
/// title or an invalid date yields `ValidationError` and changes nothing.
///
/// # JSON Format
///
/// ```json
/// {
///   "date": "2026-02-20",
///   "type": "sports",
///   "title": "Super Bowl LIX",
///   "teams": "Eagles vs Chiefs",
///   "result": "40–22",
///   "rating": 4
/// }
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn add_entry(state: *mut AppLogState, form_json: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => return response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to add_entry".to_string())),
    };

    let json = match c_ptr_to_string(form_json, "form") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    let form: EntryForm = match serde_json::from_str(&json) {
        Ok(form) => form,
        Err(e) => {
            let error = AppResponse::SerializationError(format!("Invalid form JSON: {e}"));
            return response_to_c_string(&error);
        }
    };

    match state.add(&form) {
        Ok(entry) => ok_json(&entry),
        Err(rejection) => response_to_c_string(&rejection),
    }
}

/// Deletes the entry with the given id.
///
/// Returns `NotFound` when no entry has that id; the collection is unchanged
/// in that case.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn remove_entry(state: *mut AppLogState, id: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => return response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to remove_entry".to_string())),
    };

    let id_str = match c_ptr_to_string(id, "id") {
        Ok(id) => id,
        Err(error_ptr) => return error_ptr,
    };

    if state.remove(&id_str) {
        response_to_c_string(&AppResponse::success("Entry removed successfully"))
    } else {
        response_to_c_string(&AppResponse::NotFound(format!("No entry found with id: {id_str}")))
    }
}

/// Returns the whole collection, most recently added first.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_entries(state: *mut AppLogState) -> *const c_char {
    match unsafe { state.as_ref() } {
        Some(state) => ok_json(&state.store.entries()),
        None => response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to get_entries".to_string())),
    }
}

/// Returns the rendered [`LogView`]: view state, entry count label and the
/// month/day grouping for the active filter.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_grouped(state: *mut AppLogState) -> *const c_char {
    match unsafe { state.as_ref() } {
        Some(state) => ok_json(&state.render_view()),
        None => response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to get_grouped".to_string())),
    }
}

/// Returns the current [`ViewState`]: dialog visibility, legend visibility
/// and the active type filter.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_view_state(state: *mut AppLogState) -> *const c_char {
    match unsafe { state.as_ref() } {
        Some(state) => ok_json(&state.view),
        None => response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to get_view_state".to_string())),
    }
}

/// Applies a [`ViewAction`] and returns the resulting [`ViewState`].
///
/// # JSON Format
///
/// ```json
/// {"action": "toggle_legend"}
/// {"action": "set_filter", "filter": "book"}
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn apply_view_action(state: *mut AppLogState, action_json: *const c_char) -> *const c_char {
    let state = match unsafe { state.as_mut() } {
        Some(s) => s,
        None => return response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to apply_view_action".to_string())),
    };

    let json = match c_ptr_to_string(action_json, "action") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    match serde_json::from_str::<ViewAction>(&json) {
        Ok(action) => ok_json(&state.apply(action)),
        Err(e) => response_to_c_string(&AppResponse::SerializationError(format!("Invalid view action: {e}"))),
    }
}

/// Lists the optional fields a media type accepts, e.g. `["teams","result"]`
/// for `sports`.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_entry_fields(media_type: *const c_char) -> *const c_char {
    let type_str = match c_ptr_to_string(media_type, "media type") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match type_str.parse::<MediaType>() {
        Ok(media_type) => ok_json(&media_type.applicable_fields()),
        Err(e) => response_to_c_string(&AppResponse::BadRequest(e)),
    }
}

/// Layout of the add-entry form for a media type: title placeholder plus
/// each visible optional field with its label.
///
/// ```json
/// {"type":"play","title_placeholder":"e.g. Death of a Salesman",
///  "fields":[{"field":"author","label":"Playwright"}]}
/// ```
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn get_form_hints(media_type: *const c_char) -> *const c_char {
    let type_str = match c_ptr_to_string(media_type, "media type") {
        Ok(s) => s,
        Err(error_ptr) => return error_ptr,
    };

    match type_str.parse::<MediaType>() {
        Ok(media_type) => ok_json(&FormHints::for_type(media_type)),
        Err(e) => response_to_c_string(&AppResponse::BadRequest(e)),
    }
}

/// Live preview line for a partially filled form.
///
/// The payload is `null` until the form has a title. Nothing is stored and
/// the date falls back to today while it does not parse.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn preview_entry(form_json: *const c_char) -> *const c_char {
    let json = match c_ptr_to_string(form_json, "form") {
        Ok(json) => json,
        Err(error_ptr) => return error_ptr,
    };

    match serde_json::from_str::<EntryForm>(&json) {
        Ok(form) => ok_json(&form.preview()),
        Err(e) => response_to_c_string(&AppResponse::SerializationError(format!("Invalid form JSON: {e}"))),
    }
}

/// Flushes the log to disk and releases the handle.
///
/// The pointer must not be used after this call.
#[no_mangle]
#[allow(clippy::not_unsafe_ptr_arg_deref)]
pub extern "C" fn close_log(state: *mut AppLogState) -> *const c_char {
    if state.is_null() {
        return response_to_c_string(&AppResponse::BadRequest("Null state pointer passed to close_log".to_string()));
    }

    let state = unsafe { Box::from_raw(state) };

    match state.close_database() {
        Ok(()) => response_to_c_string(&AppResponse::success("Log closed successfully")),
        Err(e) => response_to_c_string(&e),
    }
}

/// Releases a string previously returned by this library.
#[no_mangle]
pub extern "C" fn free_response(ptr: *const c_char) {
    if ptr.is_null() {
        return;
    }
    drop(unsafe { CString::from_raw(ptr as *mut c_char) });
}

fn ok_json<T: Serialize + ?Sized>(value: &T) -> *const c_char {
    match serde_json::to_string(value) {
        Ok(json) => response_to_c_string(&AppResponse::Ok(json)),
        Err(e) => response_to_c_string(&AppResponse::from(e)),
    }
}

/// Serializes an [`AppResponse`] into a C string owned by the caller.
///
/// Returns null only if serialization itself fails.
fn response_to_c_string(response: &AppResponse) -> *const c_char {
    let json = match serde_json::to_string(response) {
        Ok(j) => j,
        Err(e) => {
            warn!("Error serializing response: {e}");
            return std::ptr::null();
        }
    };

    match CString::new(json) {
        Ok(c_str) => c_str.into_raw(),
        Err(e) => {
            warn!("Error creating CString: {e}");
            std::ptr::null()
        }
    }
}

/// Converts a C string pointer to an owned `String`, or to a ready-made
/// `BadRequest` response when the pointer is null or not UTF-8.
fn c_ptr_to_string(ptr: *const c_char, field_name: &str) -> Result<String, *const c_char> {
    if ptr.is_null() {
        let error = AppResponse::BadRequest(format!("Null {field_name} pointer"));
        return Err(response_to_c_string(&error));
    }

    match unsafe { CStr::from_ptr(ptr).to_str() } {
        Ok(s) => Ok(s.to_string()),
        Err(e) => {
            let error = AppResponse::BadRequest(format!("Invalid UTF-8 in {field_name}: {e}"));
            Err(response_to_c_string(&error))
        }
    }
}
