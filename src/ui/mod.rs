//! Rendering. Everything here is a read-only view over `AppState`.
//!
pub mod components;
pub mod members;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.area();
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_search_bar(f, root[0], app);
    members::render_members_table(f, root[1], app);
    members::render_footer(f, root[2], app);
    components::render_status_bar(f, root[3], app);

    if let Some(state) = &app.modal {
        render_modal(f, area, app, state);
    }
}

fn render_search_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let searching = app.input_mode == InputMode::Search;
    let text = if app.search_query.is_empty() && !searching {
        "Search by name, email or role  (/)".to_string()
    } else if searching {
        format!("{}_", app.search_query)
    } else {
        app.search_query.clone()
    };
    let border = if searching {
        app.theme.highlight_fg
    } else {
        app.theme.border
    };
    let p = Paragraph::new(text)
        .block(
            Block::default()
                .title("member-admin")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        )
        .style(Style::default().fg(app.theme.header_fg).bg(app.theme.header_bg));
    f.render_widget(p, area);
}

fn render_modal(f: &mut Frame, area: Rect, app: &AppState, state: &ModalState) {
    match state {
        ModalState::Edit(session) => members::render_edit_modal(f, area, app, session),
        ModalState::Help { scroll } => components::render_help_modal(f, area, app, *scroll),
        ModalState::Info { message } => components::render_info_modal(f, area, app, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Action;
    use crate::app::update::dispatch;
    use crate::source::{MemberId, MemberRecord};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &AppState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 24)).unwrap();
        terminal.draw(|f| render(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn empty_view_shows_placeholder_and_no_footer() {
        let app = AppState::with_members(vec![]);
        let s = screen(&app);
        assert!(s.contains("No User Found"));
        assert!(!s.contains("Delete Selected"));
    }

    #[test]
    fn rows_and_edit_modal_render() {
        let mut app = AppState::with_members(vec![
            MemberRecord::new("1", "Aaron Miles", "aaron@mailinator.com", "member"),
            MemberRecord::new("2", "Arvind Kumar", "arvind@mailinator.com", "admin"),
        ]);
        dispatch(&mut app, Action::ToggleOne(MemberId::from("2")));
        let s = screen(&app);
        assert!(s.contains("Aaron Miles"));
        assert!(s.contains("Delete Selected (1)"));

        dispatch(&mut app, Action::OpenEdit(MemberId::from("1")));
        assert!(screen(&app).contains("Edit member 1"));
    }

    #[test]
    fn bulk_delete_summary_renders_over_table() {
        let mut app = AppState::with_members(vec![
            MemberRecord::new("1", "Aaron Miles", "aaron@mailinator.com", "member"),
            MemberRecord::new("2", "Arvind Kumar", "arvind@mailinator.com", "admin"),
        ]);
        dispatch(&mut app, Action::ToggleOne(MemberId::from("1")));
        dispatch(&mut app, Action::DeleteSelected);
        let s = screen(&app);
        assert!(s.contains("Info"));
        assert!(s.contains("Deleted 1 selected member(s)"));
    }
}
