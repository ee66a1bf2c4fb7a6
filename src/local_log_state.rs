use log::debug;
use serde::Serialize;

use crate::app_response::AppResponse;
use crate::entry_display::{entry_count_label, legend, LegendItem};
use crate::entry_form::EntryForm;
use crate::entry_model::Entry;
use crate::entry_store::EntryStore;
use crate::local_storage::{KeyValueStorage, LmdbStorage};
use crate::log_config::LogConfig;
use crate::view_projection::{filter_entries, MonthGroup};
use crate::view_state::{ViewAction, ViewState};

/// Everything one open log page needs: the entry store plus its view state.
///
/// FFI handles returned by [`crate::create_log`] point at an
/// `AppLogState<LmdbStorage>`.
pub struct AppLogState<S: KeyValueStorage = LmdbStorage> {
    pub store: EntryStore<S>,
    pub view: ViewState,
}

impl AppLogState<LmdbStorage> {
    /// Opens the LMDB environment named by `config` and loads the log.
    pub fn init(config: LogConfig) -> Result<Self, AppResponse> {
        let storage = LmdbStorage::init(&config.db_name)?;
        Ok(Self::with_storage(&config, storage))
    }

    pub fn close_database(self) -> Result<(), AppResponse> {
        self.store.into_storage().close()
    }
}

impl<S: KeyValueStorage> AppLogState<S> {
    pub fn with_storage(config: &LogConfig, storage: S) -> Self {
        Self {
            store: EntryStore::initialize(config, storage),
            view: ViewState::default(),
        }
    }

    /// Submits the add-entry form; on success the dialog closes.
    pub fn add(&mut self, form: &EntryForm) -> Result<Entry, AppResponse> {
        let entry = self.store.add(form)?;
        self.view = self.view.apply(ViewAction::EntryLogged);
        Ok(entry)
    }

    pub fn remove(&mut self, id: &str) -> bool {
        self.store.remove(id)
    }

    pub fn apply(&mut self, action: ViewAction) -> ViewState {
        self.view = self.view.apply(action);
        debug!("View state is now {:?}", self.view);
        self.view
    }

    /// Grouping for the active filter.
    pub fn grouped(&self) -> Vec<MonthGroup> {
        self.store.grouped(self.view.active_filter)
    }

    pub fn count_label(&self) -> String {
        let visible = filter_entries(self.store.entries(), self.view.active_filter).len();
        entry_count_label(visible, self.view.active_filter)
    }

    /// Everything a renderer needs to draw the page in its current state.
    pub fn render_view(&self) -> LogView {
        LogView {
            view: self.view,
            count_label: self.count_label(),
            legend_button_label: self.view.legend_button_label(),
            legend: legend(),
            months: self.grouped(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogView {
    pub view: ViewState,
    pub count_label: String,
    pub legend_button_label: &'static str,
    /// Always present; renderers show it only while `view.legend_visible`.
    pub legend: Vec<LegendItem>,
    /// Empty when nothing matches; renderers show their placeholder.
    pub months: Vec<MonthGroup>,
}
