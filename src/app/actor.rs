//! App actor - message loop processing UI events and network responses

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::errors::SubmitError;
use crate::messages::ui_events::InputMode;
use crate::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};

/// App actor that processes UI events and network responses
pub struct AppActor {
    state: AppState,
    network_tx: mpsc::UnboundedSender<NetworkCommand>,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(
        state: AppState,
        network_tx: mpsc::UnboundedSender<NetworkCommand>,
        render_tx: mpsc::UnboundedSender<RenderState>,
    ) -> Self {
        AppActor {
            state,
            network_tx,
            render_tx,
        }
    }

    /// Run the actor message loop
    pub async fn run(
        mut self,
        mut ui_rx: mpsc::UnboundedReceiver<UiEvent>,
        mut net_rx: mpsc::UnboundedReceiver<NetworkResponse>,
    ) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        loop {
            tokio::select! {
                Some(event) = ui_rx.recv() => {
                    if self.handle_ui_event(event) {
                        // Quit signal received
                        let _ = self.network_tx.send(NetworkCommand::Shutdown);
                        break;
                    }
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                Some(response) = net_rx.recv() => {
                    self.state.handle_response(response);
                    let _ = self.render_tx.send(self.state.to_render_state());
                }
                else => break,
            }
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        match event {
            // Panel navigation
            UiEvent::NextPanel => self.state.next_panel(),
            UiEvent::PrevPanel => self.state.prev_panel(),
            UiEvent::ScrollUp => self.state.scroll_up(),
            UiEvent::ScrollDown => self.state.scroll_down(),

            // Field checklist
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::ToggleHighlighted => self.state.toggle_highlighted(),
            UiEvent::ToggleField(field) => self.state.toggle_field(field),

            // Input editing
            UiEvent::StartEditing => self.state.start_editing(),
            UiEvent::StopEditing => self.state.stop_editing(),
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::CursorHome => self.state.move_cursor_home(),
            UiEvent::CursorEnd => self.state.move_cursor_end(),
            UiEvent::ClearInput => self.state.clear_input(),
            UiEvent::Paste(text) => self.state.paste(&text),

            // Submission
            UiEvent::Submit => {
                if self.state.input_mode == InputMode::Editing {
                    self.state.stop_editing();
                }
                if let Some(cmd) = self.state.submit() {
                    self.dispatch(cmd);
                }
            }
            UiEvent::CancelSubmit => {
                if let Some(cmd) = self.state.cancel_submission() {
                    self.dispatch(cmd);
                }
            }

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }

    /// Send a command to the network actor. If it is gone, settle the
    /// pending submission here so the loading flag does not stick.
    fn dispatch(&mut self, cmd: NetworkCommand) {
        let Err(mpsc::error::SendError(cmd)) = self.network_tx.send(cmd) else {
            return;
        };
        tracing::error!(?cmd, "Network actor unavailable");
        let response = match cmd {
            NetworkCommand::Submit { id, .. } => NetworkResponse::Failed {
                id,
                error: SubmitError::Network(String::from("network actor unavailable")),
                time_ms: 0,
            },
            NetworkCommand::Cancel(id) => NetworkResponse::Cancelled { id },
            NetworkCommand::Shutdown => return,
        };
        self.state.handle_response(response);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor_without_network() -> AppActor {
        let (network_tx, network_rx) = mpsc::unbounded_channel();
        let (render_tx, _render_rx) = mpsc::unbounded_channel();
        drop(network_rx);
        let mut state = AppState::new(String::from("http://127.0.0.1:9/bfhl"));
        state.update_input(r#"{"data": ["A"]}"#);
        AppActor::new(state, network_tx, render_tx)
    }

    #[test]
    fn test_submit_without_network_actor_settles() {
        let mut actor = actor_without_network();

        assert!(!actor.handle_ui_event(UiEvent::Submit));
        assert!(!actor.state.is_loading);
        assert_eq!(actor.state.error, "Invalid JSON input or API error");
        assert_eq!(actor.state.last_failure.as_ref().map(|e| e.kind()), Some("network"));

        // A later submit is not blocked by a stuck in-flight flag
        actor.state.error.clear();
        actor.handle_ui_event(UiEvent::Submit);
        assert!(!actor.state.is_loading);
        assert!(!actor.state.error.is_empty());
    }
}
