//! Shared UI components (status bar, modal helpers).
//!
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::keymap::KeyAction;
use crate::app::{AppState, InputMode, LoadState};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let load = match app.load_state {
        LoadState::Loading => "  loading…",
        LoadState::Ready => "",
        LoadState::Failed => "  load failed",
    };
    let msg = format!(
        "mode: {mode}  shown:{}/{}  selected:{}  page:{}/{}{load}",
        app.members.len(),
        app.store.len(),
        app.selection.len(),
        app.current_page,
        app.total_pages().max(1),
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render a generic informational modal dialog.
pub fn render_info_modal(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let width = 48u16.min(area.width.saturating_sub(4)).max(20);
    let per_line = width.saturating_sub(4).max(10) as usize;
    let lines = (message.chars().count() / per_line + 1) as u16;
    let height = (lines + 4).min(area.height.saturating_sub(2)).max(5);
    let rect = centered_rect(width, height, area);
    let p = Paragraph::new(message.to_string())
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Info")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

const HELP_SECTIONS: [(&str, &[(&str, KeyAction)]); 3] = [
    (
        "Table",
        &[
            ("Move up", KeyAction::MoveUp),
            ("Move down", KeyAction::MoveDown),
            ("Select row", KeyAction::ToggleRow),
            ("Select all (filtered)", KeyAction::ToggleAll),
            ("Edit row", KeyAction::EditRow),
            ("Delete row", KeyAction::DeleteRow),
            ("Delete selected", KeyAction::DeleteSelected),
        ],
    ),
    (
        "Pages",
        &[
            ("First page", KeyAction::FirstPage),
            ("Previous page", KeyAction::PreviousPage),
            ("Next page", KeyAction::NextPage),
            ("Last page", KeyAction::LastPage),
        ],
    ),
    (
        "General",
        &[
            ("Search", KeyAction::StartSearch),
            ("Help", KeyAction::OpenHelp),
            ("Quit", KeyAction::Quit),
        ],
    ),
];

/// Render the help modal, listing the keys currently bound to each command.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState, scroll: u16) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(40);
    let height = 26u16.min(area.height.saturating_sub(2)).max(10);
    let rect = centered_rect(width, height, area);

    let label_w = HELP_SECTIONS
        .iter()
        .flat_map(|(_, rows)| rows.iter().map(|(label, _)| label.len()))
        .max()
        .unwrap_or(0);
    let bold = Style::default().add_modifier(Modifier::BOLD);
    let italic = Style::default().add_modifier(Modifier::ITALIC);

    let mut lines: Vec<Line> = Vec::new();
    for (title, rows) in HELP_SECTIONS {
        lines.push(Line::from(Span::styled(format!("{title}:"), bold)));
        for (label, action) in rows {
            let keys = app.keymap.keys_for(*action).join(", ");
            lines.push(Line::from(vec![
                Span::raw(format!("  {label:>label_w$} │ ")),
                Span::styled(keys, italic),
            ]));
        }
        lines.push(Line::raw(""));
    }
    lines.push(Line::from(vec![
        Span::raw("Page number: "),
        Span::styled("type the digits, e.g. 1 then 2 for page 12", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Search input: "),
        Span::styled("type to filter, Enter to keep, Esc to clear", italic),
    ]));
    lines.push(Line::from(vec![
        Span::raw("Edit form: "),
        Span::styled("Tab/Up/Down move, Enter update, Esc close", italic),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 20, 10);
        let r = centered_rect(30, 4, area);
        assert_eq!(r.width, 20);
        assert_eq!(r.y, 3);
    }
}
