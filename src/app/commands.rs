//! Command handlers - business logic for processing UI events

use serde_json::Value;

use crate::app::AppState;
use crate::errors::SubmitError;
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::{NetworkCommand, NetworkResponse};
use crate::models::{Field, ResponseMeta, ResponsePayload};

impl AppState {
    // ========================
    // Navigation
    // ========================

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.next();
    }

    pub fn prev_panel(&mut self) {
        self.active_panel = self.active_panel.prev();
    }

    pub fn scroll_up(&mut self) {
        self.response_scroll = self.response_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.response_scroll = self.response_scroll.saturating_add(1);
    }

    // ========================
    // Input editing
    // ========================

    /// Replace the input text wholesale. No validation happens here.
    pub fn update_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
        self.cursor_position = self.input.len();
    }

    pub fn start_editing(&mut self) {
        self.active_panel = Panel::Input;
        self.input_mode = InputMode::Editing;
        self.cursor_position = self.input.len();
    }

    pub fn stop_editing(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position = self.input[..self.cursor_position]
                .char_indices()
                .last()
                .map(|(i, _)| i)
                .unwrap_or(0);
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.len() {
            self.cursor_position = self.input[self.cursor_position..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| self.cursor_position + i)
                .unwrap_or(self.input.len());
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.input.len();
    }

    pub fn enter_char(&mut self, c: char) {
        let mut text = self.input.clone();
        let cursor = self.cursor_position.min(text.len());
        text.insert(cursor, c);
        self.update_input(text);
        self.cursor_position = cursor + c.len_utf8();
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let prev = self.input[..self.cursor_position]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut text = self.input.clone();
        text.remove(prev);
        self.update_input(text);
        self.cursor_position = prev;
    }

    pub fn clear_input(&mut self) {
        self.update_input(String::new());
    }

    /// Insert pasted text at the cursor. Line breaks become spaces since the
    /// input is a single line.
    pub fn paste(&mut self, pasted: &str) {
        let flat = pasted.replace("\r\n", " ").replace(['\r', '\n'], " ");
        let cursor = self.cursor_position.min(self.input.len());
        let mut text = self.input.clone();
        text.insert_str(cursor, &flat);
        self.update_input(text);
        self.cursor_position = cursor + flat.len();
    }

    // ========================
    // Field selection
    // ========================

    /// Add the field to the selection, or remove it if already selected
    pub fn toggle_field(&mut self, field: Field) {
        self.selected.toggle(field);
        self.highlighted_field = field.index();
    }

    pub fn toggle_highlighted(&mut self) {
        if let Some(field) = Field::ALL.get(self.highlighted_field).copied() {
            self.toggle_field(field);
        }
    }

    pub fn next_field(&mut self) {
        self.highlighted_field = (self.highlighted_field + 1) % Field::ALL.len();
    }

    pub fn prev_field(&mut self) {
        self.highlighted_field = self
            .highlighted_field
            .checked_sub(1)
            .unwrap_or(Field::ALL.len() - 1);
    }

    // ========================
    // Submission
    // ========================

    /// Parse the input and, if no submission is in flight, produce the
    /// command that POSTs it. Parse failures settle immediately.
    pub fn submit(&mut self) -> Option<NetworkCommand> {
        let payload = match serde_json::from_str::<Value>(&self.input) {
            Ok(payload) => payload,
            Err(e) => {
                self.fail(SubmitError::from(e));
                return None;
            }
        };

        if self.is_loading {
            tracing::debug!(pending = ?self.pending_request_id, "Submission already in flight, ignoring");
            return None;
        }

        let id = self.next_id();
        self.is_loading = true;
        self.pending_request_id = Some(id);
        tracing::info!(id, endpoint = %self.endpoint, "Submitting payload");

        Some(NetworkCommand::Submit {
            id,
            endpoint: self.endpoint.clone(),
            payload,
        })
    }

    /// Cancel the current pending submission
    pub fn cancel_submission(&mut self) -> Option<NetworkCommand> {
        self.pending_request_id.map(NetworkCommand::Cancel)
    }

    // ========================
    // Response handling
    // ========================

    pub fn handle_response(&mut self, response: NetworkResponse) {
        let response_id = response.id();
        if self.pending_request_id != Some(response_id) {
            tracing::debug!(id = response_id, "Ignoring response for stale submission");
            return;
        }

        self.is_loading = false;
        self.pending_request_id = None;

        match response {
            NetworkResponse::Success { status, body, time_ms, .. } => {
                tracing::info!(id = response_id, status, time_ms, "Submission succeeded");
                self.response = Some(ResponsePayload::new(body));
                self.response_meta = Some(ResponseMeta {
                    status,
                    time_ms,
                    received_at: chrono::Utc::now(),
                });
                self.error.clear();
                self.last_failure = None;
                self.response_visible = true;
                self.response_scroll = 0;
            }
            NetworkResponse::Failed { error, .. } => self.fail(error),
            NetworkResponse::Cancelled { .. } => {
                tracing::info!(id = response_id, "Submission cancelled");
            }
        }
    }

    /// Settle a submission as failed: one fixed message, no payload
    fn fail(&mut self, error: SubmitError) {
        tracing::warn!(kind = error.kind(), %error, "Submission failed");
        self.error = error.user_message().to_string();
        self.last_failure = Some(error);
        self.response = None;
        self.response_meta = None;
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SelectedFields;
    use serde_json::json;

    const FIXED_MESSAGE: &str = "Invalid JSON input or API error";

    fn sample_body() -> Value {
        json!({
            "numbers": [2, 4],
            "alphabets": ["a", "b"],
            "highest_lowercase_alphabet": "b"
        })
    }

    /// Submit the current input and answer it with `reply(id)`
    fn submit_and_answer(state: &mut AppState, reply: impl FnOnce(u64) -> NetworkResponse) {
        let cmd = state.submit().expect("submission should be sent");
        let id = match cmd {
            NetworkCommand::Submit { id, .. } => id,
            other => panic!("unexpected command {:?}", other),
        };
        state.handle_response(reply(id));
    }

    fn success(id: u64) -> NetworkResponse {
        NetworkResponse::Success { id, status: 200, body: sample_body(), time_ms: 12 }
    }

    #[test]
    fn test_update_input_replaces_text() {
        let mut state = AppState::default();
        state.update_input("abc");
        state.update_input(r#"{"data": []}"#);
        assert_eq!(state.input, r#"{"data": []}"#);
        assert_eq!(state.cursor_position, state.input.len());
        assert!(state.error.is_empty());
    }

    #[test]
    fn test_invalid_json_sets_error_from_any_state() {
        let mut state = AppState::default();
        state.update_input(r#"{"data": ["A"]}"#);
        submit_and_answer(&mut state, success);
        assert!(state.response.is_some());

        for bad in ["", "{", "data: [1]", r#"{"data": [1,]}"#, "nul"] {
            state.update_input(bad);
            assert!(state.submit().is_none());
            assert_eq!(state.error, FIXED_MESSAGE);
            assert!(state.response.is_none());
            assert!(matches!(state.last_failure, Some(SubmitError::Parse(_))));
        }
        // latch is not touched by failures
        assert!(state.response_visible);
    }

    #[test]
    fn test_success_stores_body_verbatim() {
        let mut state = AppState::default();
        state.update_input(r#"{"data": ["A", "C", "z"]}"#);
        state.error = String::from("stale");

        let cmd = state.submit().unwrap();
        match &cmd {
            NetworkCommand::Submit { payload, endpoint, .. } => {
                assert_eq!(payload, &json!({"data": ["A", "C", "z"]}));
                assert_eq!(endpoint, "https://surya-back.praki.tech/bfhl");
            }
            other => panic!("unexpected command {:?}", other),
        }
        assert!(state.is_loading);

        let id = state.pending_request_id.unwrap();
        state.handle_response(success(id));

        assert_eq!(state.response.as_ref().unwrap().as_value(), &sample_body());
        assert!(state.error.is_empty());
        assert!(state.last_failure.is_none());
        assert!(state.response_visible);
        assert!(!state.is_loading);
        assert_eq!(state.response_meta.as_ref().unwrap().status, 200);
    }

    #[test]
    fn test_toggle_field_twice_is_identity() {
        let mut state = AppState::default();
        state.toggle_field(Field::Alphabets);
        let before = state.selected.clone();
        for field in Field::ALL {
            state.toggle_field(field);
            state.toggle_field(field);
            assert_eq!(state.selected, before);
        }
    }

    #[test]
    fn test_network_failure_keeps_selection() {
        let mut state = AppState::default();
        state.toggle_field(Field::Numbers);
        state.toggle_field(Field::HighestLowercaseAlphabet);
        state.update_input(r#"{"data": ["1"]}"#);
        submit_and_answer(&mut state, success);
        let selected_before: SelectedFields = state.selected.clone();

        submit_and_answer(&mut state, |id| NetworkResponse::Failed {
            id,
            error: SubmitError::Network("connection refused".into()),
            time_ms: 3,
        });

        assert!(state.response.is_none());
        assert!(state.response_meta.is_none());
        assert_eq!(state.error, FIXED_MESSAGE);
        assert_eq!(state.selected, selected_before);
        assert!(matches!(state.last_failure, Some(SubmitError::Network(_))));
    }

    #[test]
    fn test_remote_error_uses_same_message() {
        let mut state = AppState::default();
        state.update_input("[]");
        submit_and_answer(&mut state, |id| NetworkResponse::Failed {
            id,
            error: SubmitError::Remote { status: 500 },
            time_ms: 3,
        });
        assert_eq!(state.error, FIXED_MESSAGE);
        assert_eq!(state.last_failure, Some(SubmitError::Remote { status: 500 }));
        assert!(!state.response_visible);
    }

    #[test]
    fn test_overlapping_submit_is_rejected() {
        let mut state = AppState::default();
        state.update_input(r#"{"data": ["A"]}"#);
        assert!(state.submit().is_some());
        let first = state.pending_request_id;

        assert!(state.submit().is_none());
        assert_eq!(state.pending_request_id, first);
        assert!(state.error.is_empty());
    }

    #[test]
    fn test_stale_response_ignored() {
        let mut state = AppState::default();
        state.update_input("{}");
        state.submit().unwrap();
        let id = state.pending_request_id.unwrap();

        state.handle_response(success(id + 41));
        assert!(state.response.is_none());
        assert!(state.is_loading);

        state.handle_response(success(id));
        assert!(state.response.is_some());
    }

    #[test]
    fn test_cancel_clears_loading_only() {
        let mut state = AppState::default();
        state.update_input("{}");
        submit_and_answer(&mut state, success);

        state.submit().unwrap();
        let cmd = state.cancel_submission().unwrap();
        let id = match cmd {
            NetworkCommand::Cancel(id) => id,
            other => panic!("unexpected command {:?}", other),
        };
        state.handle_response(NetworkResponse::Cancelled { id });

        assert!(!state.is_loading);
        assert!(state.response.is_some());
        assert!(state.cancel_submission().is_none());
    }

    #[test]
    fn test_latch_survives_failures() {
        let mut state = AppState::default();
        state.update_input("{}");
        submit_and_answer(&mut state, success);
        assert!(state.response_visible);

        state.update_input("{");
        state.submit();
        assert!(state.response_visible);

        state.update_input("[]");
        submit_and_answer(&mut state, |id| NetworkResponse::Failed {
            id,
            error: SubmitError::Network("reset".into()),
            time_ms: 1,
        });
        assert!(state.response.is_none());
        assert!(state.response_visible);
    }

    #[test]
    fn test_editing_is_char_boundary_safe() {
        let mut state = AppState::default();
        state.start_editing();
        for c in "é{}".chars() {
            state.enter_char(c);
        }
        state.move_cursor_left();
        state.move_cursor_left();
        state.move_cursor_left();
        assert_eq!(state.cursor_position, 0);
        state.move_cursor_right();
        assert_eq!(state.cursor_position, 'é'.len_utf8());
        state.delete_char();
        assert_eq!(state.input, "{}");
        assert_eq!(state.cursor_position, 0);
    }

    #[test]
    fn test_paste_flattens_lines() {
        let mut state = AppState::default();
        state.paste("{\r\n  \"data\": [\"A\"]\n}");
        assert_eq!(state.input, "{   \"data\": [\"A\"] }");
        assert!(state.submit().is_some());
    }

    #[test]
    fn test_field_cursor_wraps() {
        let mut state = AppState::default();
        state.prev_field();
        assert_eq!(state.highlighted_field, 2);
        state.toggle_highlighted();
        assert!(state.selected.contains(Field::HighestLowercaseAlphabet));
        state.next_field();
        assert_eq!(state.highlighted_field, 0);
    }
}
