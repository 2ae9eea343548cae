//! App state - pure data structure with no I/O logic

use crate::config::Config;
use crate::constants::DEFAULT_ENDPOINT_URL;
use crate::errors::SubmitError;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::models::{ResponseMeta, ResponsePayload, SelectedFields};

/// Main application state - pure data, no I/O
pub struct AppState {
    // Where submissions go
    pub endpoint: String,

    // Form
    pub input: String,
    pub cursor_position: usize,
    pub error: String,
    pub last_failure: Option<SubmitError>,

    // Response
    pub response: Option<ResponsePayload>,
    pub response_meta: Option<ResponseMeta>,
    // Latch: set on the first success, never cleared
    pub response_visible: bool,
    pub response_scroll: u16,

    // In-flight tracking
    pub is_loading: bool,
    pub next_request_id: u64,
    pub pending_request_id: Option<u64>,

    // Field selection
    pub selected: SelectedFields,
    pub highlighted_field: usize,

    // UI state
    pub active_panel: Panel,
    pub input_mode: InputMode,

    // Popups
    pub show_help: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT_URL)
    }
}

impl AppState {
    pub fn new(endpoint: impl Into<String>) -> Self {
        AppState {
            endpoint: endpoint.into(),
            input: String::new(),
            cursor_position: 0,
            error: String::new(),
            last_failure: None,
            response: None,
            response_meta: None,
            response_visible: false,
            response_scroll: 0,
            is_loading: false,
            next_request_id: 1,
            pending_request_id: None,
            selected: SelectedFields::new(),
            highlighted_field: 0,
            active_panel: Panel::Input,
            input_mode: InputMode::Normal,
            show_help: false,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        let mut state = Self::new(config.endpoint.clone());
        state.selected = config.default_fields.iter().copied().collect();
        state
    }

    /// Generate a unique request ID
    pub fn next_id(&mut self) -> u64 {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        RenderState {
            input: self.input.clone(),
            cursor_position: self.cursor_position,
            error: self.error.clone(),
            last_failure: self.last_failure.clone(),
            response: self.response.clone(),
            response_meta: self.response_meta.clone(),
            response_visible: self.response_visible,
            response_scroll: self.response_scroll,
            is_loading: self.is_loading,
            selected: self.selected.clone(),
            highlighted_field: self.highlighted_field,
            active_panel: self.active_panel,
            input_mode: self.input_mode,
            endpoint: self.endpoint.clone(),
            show_help: self.show_help,
        }
    }
}
