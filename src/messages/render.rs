//! Render state - data structure sent from App layer to UI for rendering

use crate::errors::SubmitError;
use crate::messages::ui_events::{InputMode, Panel};
use crate::models::{ResponseMeta, ResponsePayload, SelectedFields};

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    // Form
    pub input: String,
    pub cursor_position: usize,
    pub error: String,
    pub last_failure: Option<SubmitError>,

    // Response
    pub response: Option<ResponsePayload>,
    pub response_meta: Option<ResponseMeta>,
    pub response_visible: bool,
    pub response_scroll: u16,
    pub is_loading: bool,

    // Field selection
    pub selected: SelectedFields,
    pub highlighted_field: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,
    pub endpoint: String,

    // Popups
    pub show_help: bool,
}
