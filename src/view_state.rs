//! UI state of the log page as an explicit record with pure transitions.

use serde::{Deserialize, Serialize};

use crate::view_projection::TypeFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewState {
    pub dialog_open: bool,
    pub legend_visible: bool,
    pub active_filter: TypeFilter,
}

/// Something the user did that changes what the page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", content = "filter", rename_all = "snake_case")]
pub enum ViewAction {
    OpenDialog,
    CloseDialog,
    ToggleLegend,
    SetFilter(TypeFilter),
    /// A submission was accepted; the dialog closes.
    EntryLogged,
}

impl ViewState {
    pub fn apply(self, action: ViewAction) -> ViewState {
        match action {
            ViewAction::OpenDialog => ViewState { dialog_open: true, ..self },
            ViewAction::CloseDialog | ViewAction::EntryLogged => ViewState { dialog_open: false, ..self },
            ViewAction::ToggleLegend => ViewState { legend_visible: !self.legend_visible, ..self },
            ViewAction::SetFilter(active_filter) => ViewState { active_filter, ..self },
        }
    }

    /// Caption of the legend toggle button.
    pub fn legend_button_label(&self) -> &'static str {
        if self.legend_visible { "Hide Key" } else { "Key" }
    }
}
