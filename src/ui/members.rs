use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::edit::{EditField, EditSession};
use crate::app::{AppState, LoadState};

fn checkbox(checked: bool) -> &'static str {
    if checked { "[x]" } else { "[ ]" }
}

/// Text of the single placeholder row shown when the page has nothing to list.
pub fn empty_message(app: &AppState) -> &'static str {
    match app.load_state {
        LoadState::Loading => "Loading members…",
        LoadState::Failed if app.store.is_empty() => "Failed to load members (see log)",
        _ => "No User Found",
    }
}

pub fn render_members_table(f: &mut Frame, area: Rect, app: &AppState) {
    let page = app.current_members();
    let header = Row::new(vec![
        Cell::from(checkbox(app.selection.all_checked())),
        Cell::from("Name"),
        Cell::from("Email"),
        Cell::from("Role"),
    ])
    .style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = if page.is_empty() {
        vec![Row::new(vec![
            Cell::from(""),
            Cell::from(empty_message(app)),
        ])
        .style(Style::default().fg(app.theme.muted))]
    } else {
        page.iter()
            .enumerate()
            .map(|(i, m)| {
                let selected = app.selection.is_selected(&m.id);
                let mut style = Style::default().fg(app.theme.text);
                if selected {
                    style = style.bg(app.theme.selected_bg);
                }
                if i == app.cursor {
                    style = style
                        .fg(app.theme.highlight_fg)
                        .add_modifier(Modifier::BOLD);
                }
                Row::new(vec![
                    Cell::from(checkbox(selected)),
                    Cell::from(m.name.clone()),
                    Cell::from(m.email.clone()),
                    Cell::from(m.role.clone()),
                ])
                .style(style)
            })
            .collect()
    };

    let widths = [
        Constraint::Length(4),
        Constraint::Percentage(30),
        Constraint::Percentage(45),
        Constraint::Percentage(20),
    ];
    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title("Members")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);
    f.render_widget(table, area);
}

/// Labels of the pagination bar: first, previous, each page, next, last.
/// Each entry carries whether it is the active page and whether it is disabled.
pub fn pager_items(current: usize, total: usize) -> Vec<(String, bool, bool)> {
    let at_start = current <= 1;
    let at_end = current >= total;
    let mut items = vec![("«".to_string(), false, at_start), ("‹".to_string(), false, at_start)];
    items.extend((1..=total).map(|n| (n.to_string(), n == current, false)));
    items.push(("›".to_string(), false, at_end));
    items.push(("»".to_string(), false, at_end));
    items
}

/// Bulk-delete hint on the left, pagination on the right. Hidden when the page is empty.
pub fn render_footer(f: &mut Frame, area: Rect, app: &AppState) {
    if app.current_members().is_empty() {
        return;
    }
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)].as_ref())
        .split(area);

    let n = app.selection.len();
    let delete_style = if n > 0 {
        Style::default().fg(app.theme.danger).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.muted)
    };
    let delete = Paragraph::new(Line::from(Span::styled(
        format!(" Delete Selected ({n})"),
        delete_style,
    )));
    f.render_widget(delete, cols[0]);

    let mut spans = Vec::new();
    for (label, active, disabled) in pager_items(app.current_page, app.total_pages()) {
        let style = if active {
            Style::default()
                .fg(app.theme.highlight_fg)
                .add_modifier(Modifier::REVERSED)
        } else if disabled {
            Style::default().fg(app.theme.muted)
        } else {
            Style::default().fg(app.theme.text)
        };
        spans.push(Span::styled(format!(" {label} "), style));
    }
    let pager = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    f.render_widget(pager, cols[1]);
}

pub fn render_edit_modal(f: &mut Frame, area: Rect, app: &AppState, session: &EditSession) {
    let rect = crate::ui::components::centered_rect(56, 10, area);
    let mut lines: Vec<Line> = Vec::with_capacity(6);
    for field in EditField::ALL {
        let focused = field == session.focus();
        let marker = if focused { "▶" } else { " " };
        let caret = if focused { "_" } else { "" };
        let style = if focused {
            Style::default().fg(app.theme.highlight_fg)
        } else {
            Style::default().fg(app.theme.text)
        };
        lines.push(Line::from(vec![
            Span::raw(format!("{marker} {:<14}", field.label())),
            Span::styled(format!("{}{caret}", session.draft().get(field)), style),
        ]));
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Enter: Update   Esc: Close   Tab: next field",
        Style::default().fg(app.theme.muted),
    )));
    let p = Paragraph::new(lines).block(
        Block::default()
            .title(format!("Edit member {}", session.target()))
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
    fn pager_disables_edges() {
        let items = pager_items(1, 3);
        assert_eq!(items.len(), 7);
        assert!(items[0].2 && items[1].2);
        assert!(items[2].1);
        assert!(!items[5].2 && !items[6].2);

        let items = pager_items(3, 3);
        assert!(items[4].1);
        assert!(items[5].2 && items[6].2);
    }

    #[test]
    fn empty_message_tracks_load_state() {
        let mut app = AppState::default();
        assert_eq!(empty_message(&app), "Loading members…");
        app.load_state = LoadState::Failed;
        assert_eq!(empty_message(&app), "Failed to load members (see log)");
        app.load_state = LoadState::Ready;
        assert_eq!(empty_message(&app), "No User Found");
    }
}
