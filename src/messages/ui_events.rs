//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::models::Field;

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Panel navigation
    NextPanel,
    PrevPanel,
    ScrollUp,
    ScrollDown,

    // Field checklist
    NextField,
    PrevField,
    ToggleHighlighted,
    ToggleField(Field),

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    ClearInput,
    Paste(String),

    // Submission
    Submit,
    CancelSubmit,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focused panel
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Input,
    Fields,
    Response,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Input => Panel::Fields,
            Panel::Fields => Panel::Response,
            Panel::Response => Panel::Input,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Input => Panel::Response,
            Panel::Fields => Panel::Input,
            Panel::Response => Panel::Fields,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    // Global Ctrl shortcuts
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Some(UiEvent::Quit),
            KeyCode::Char('x') => return Some(UiEvent::CancelSubmit),
            KeyCode::Char('u') if input_mode == InputMode::Editing => {
                return Some(UiEvent::ClearInput)
            }
            _ => {}
        }
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Normal => normal_mode_keys(key, active_panel),
        InputMode::Editing => editing_mode_keys(key),
    }
}

fn normal_mode_keys(key: KeyEvent, active_panel: Panel) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('1') => Some(UiEvent::ToggleField(Field::Numbers)),
        KeyCode::Char('2') => Some(UiEvent::ToggleField(Field::Alphabets)),
        KeyCode::Char('3') => Some(UiEvent::ToggleField(Field::HighestLowercaseAlphabet)),
        KeyCode::Char('e') if active_panel == Panel::Input => Some(UiEvent::StartEditing),
        KeyCode::Enter | KeyCode::Char(' ') => match active_panel {
            Panel::Input => Some(UiEvent::StartEditing),
            Panel::Fields => Some(UiEvent::ToggleHighlighted),
            Panel::Response => None,
        },
        KeyCode::Up => match active_panel {
            Panel::Fields => Some(UiEvent::PrevField),
            Panel::Response => Some(UiEvent::ScrollUp),
            Panel::Input => None,
        },
        KeyCode::Down => match active_panel {
            Panel::Fields => Some(UiEvent::NextField),
            Panel::Response => Some(UiEvent::ScrollDown),
            Panel::Input => None,
        },
        _ => None,
    }
}

fn editing_mode_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Enter => Some(UiEvent::Submit),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Home => Some(UiEvent::CursorHome),
        KeyCode::End => Some(UiEvent::CursorEnd),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}
