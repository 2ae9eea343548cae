//! Terminal drawing for the page described by [`crate::view::PageView`]

use ratatui::{prelude::*, widgets::*};

use crate::constants::{APP_NAME, APP_VERSION};
use crate::messages::ui_events::{InputMode, Panel};
use crate::messages::RenderState;
use crate::view::{self, Badge, ChecklistItem, PageView};

/// Draw the whole page for the given state
pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let page = view::render(state);
    let area = f.area();

    let checklist_height = if page.checklist.is_some() { 5 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                // Title
            Constraint::Length(3),                // Input
            Constraint::Length(1),                // Error
            Constraint::Length(3),                // Badges
            Constraint::Length(checklist_height), // Checklist
            Constraint::Min(3),                   // Filtered response
            Constraint::Length(1),                // Status bar
        ])
        .split(area);

    draw_title(f, state, chunks[0]);
    draw_input(f, state, &page, chunks[1]);
    draw_error(f, &page, chunks[2]);
    draw_badges(f, &page.badges, chunks[3]);
    if let Some(items) = &page.checklist {
        draw_checklist(f, state, items, chunks[4]);
    }
    draw_response(f, state, &page, chunks[5]);
    draw_status_bar(f, state, chunks[6]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, state: &RenderState, area: Rect) {
    let line = Line::from(vec![
        Span::styled(" Input JSON Data ", Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" POST {}", state.endpoint), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_input(f: &mut Frame, state: &RenderState, page: &PageView, area: Rect) {
    let is_focused = state.active_panel == Panel::Input;
    let editing = is_focused && state.input_mode == InputMode::Editing;
    let loading = if state.is_loading { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, editing))
        .title(format!(" JSON{} ", loading));

    // Keep the cursor in view on long single-line input. The visible window
    // is cut here since Paragraph::scroll offsets are limited to u16.
    let inner_width = area.width.saturating_sub(2) as usize;
    let cursor_col = state.input[..state.cursor_position.min(state.input.len())].chars().count();
    let offset = cursor_col.saturating_sub(inner_width.saturating_sub(1));

    let content = if page.input.is_empty() && !editing {
        Line::from(Span::styled(page.placeholder, Style::default().fg(Color::DarkGray)))
    } else {
        let visible: String = page.input.chars().skip(offset).take(inner_width).collect();
        Line::from(visible)
    };

    f.render_widget(Paragraph::new(content).block(block), area);

    if editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let col = u16::try_from(cursor_col - offset).unwrap_or(u16::MAX);
        let cursor_x = area.x.saturating_add(col).saturating_add(1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_error(f: &mut Frame, page: &PageView, area: Rect) {
    if let Some(error) = &page.error {
        let line = Paragraph::new(format!(" {}", error)).style(Style::default().fg(Color::Red));
        f.render_widget(line, area);
    }
}

fn draw_badges(f: &mut Frame, badges: &[Badge], area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(badges.iter().map(|b| Constraint::Length(b.field.badge().len() as u16 + 4)))
        .split(area);

    for (badge, chunk) in badges.iter().zip(chunks.iter()) {
        let style = if badge.active {
            Style::default().fg(Color::White).bg(Color::Magenta)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let widget = Paragraph::new(badge.caption())
            .style(style)
            .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Magenta)));
        f.render_widget(widget, *chunk);
    }
}

fn draw_checklist(f: &mut Frame, state: &RenderState, items: &[ChecklistItem], area: Rect) {
    let is_focused = state.active_panel == Panel::Fields;

    let rows: Vec<ListItem> = items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let mark = if item.checked { "[x]" } else { "[ ]" };
            let style = if is_focused && i == state.highlighted_field {
                Style::default().fg(Color::Yellow).bold()
            } else {
                Style::default()
            };
            ListItem::new(format!("{} {} {}", i + 1, mark, item.field.as_str())).style(style)
        })
        .collect();

    let list = List::new(rows).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_style(is_focused, false))
            .title(" Fields (1-3 / Space:toggle) "),
    );
    f.render_widget(list, area);
}

fn draw_response(f: &mut Frame, state: &RenderState, page: &PageView, area: Rect) {
    let is_focused = state.active_panel == Panel::Response;

    let title = match &state.response_meta {
        Some(meta) => Span::styled(
            format!(" Response {} ", meta.status),
            Style::default().fg(status_color(meta.status)).bold(),
        ),
        None => Span::raw(" Response "),
    };
    let footer = state
        .response_meta
        .as_ref()
        .map(|meta| format!(" {}ms @ {} ", meta.time_ms, meta.received_at.format("%H:%M:%S")))
        .unwrap_or_default();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, false))
        .title(title)
        .title_bottom(Line::from(footer).right_aligned());

    let lines: Vec<Line> = page
        .filtered
        .iter()
        .map(|entry| {
            Line::from(vec![
                Span::styled(format!("{}:", entry.field.label()), Style::default().bold()),
                Span::raw(format!(" {}", entry.value)),
            ])
        })
        .collect();

    let response = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((state.response_scroll, 0));
    f.render_widget(response, area);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        String::from(" Submitting... (Ctrl+X cancel) ")
    } else if state.input_mode == InputMode::Editing {
        String::from(" ESC:stop editing | Enter:submit | Ctrl+U:clear ")
    } else if let Some(failure) = &state.last_failure {
        format!(" last failure: {} | s:submit | ?:help | q:quit ", failure.kind())
    } else {
        String::from(" Tab:panel | e:edit | s:submit | 1-3:fields | ?:help | q:quit ")
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = format!(
        r#"
 {} v{} - Keyboard Shortcuts

 INPUT
   e / Enter          Edit the JSON input
   Enter (editing)    Submit
   Ctrl+U             Clear input
   Esc                Stop editing
   paste              Inserted at the cursor

 SUBMIT
   s                  Submit
   Ctrl+X             Cancel pending submission

 FIELDS
   1 / 2 / 3          Toggle numbers / alphabets / highest
   ↑ / ↓ + Space      Move and toggle in the checklist

 GENERAL
   Tab / Shift+Tab    Switch panels
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#,
        APP_NAME, APP_VERSION
    );

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn focus_style(is_focused: bool, editing: bool) -> Style {
    if editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
