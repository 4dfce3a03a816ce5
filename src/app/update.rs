use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::app::edit::EditSession;
use crate::app::keymap::{KeyAction, Keymap};
use crate::app::pagination::{PageTarget, resolve_target};
use crate::app::{Action, AppState, InputMode, LoadState, ModalState, Theme};
use crate::config::Config;
use crate::search::apply_search;
use crate::source::{self, MemberId, MemberRecord};
use crate::ui;

/// Apply one domain action to completion. Derived state (filtered view, page
/// bounds, cursor) is refreshed before returning.
pub fn dispatch(app: &mut AppState, action: Action) {
    debug!(?action, "dispatch");
    match action {
        Action::Loaded(records) => {
            app.store.load(records);
            app.selection.clear();
            app.current_page = 1;
            app.cursor = 0;
            app.load_state = LoadState::Ready;
            info!(count = app.store.len(), "members loaded");
        }
        Action::Search(query) => {
            app.search_query = query;
        }
        Action::ToggleOne(id) => {
            app.selection.toggle_one(&id);
        }
        Action::ToggleAll(checked) => {
            let visible = app.members.iter().map(|m| m.id.clone());
            app.selection.toggle_all(checked, visible);
        }
        Action::Delete(id) => {
            if app.store.delete_one(&id) {
                app.selection.remove(&id);
                close_edit_if_target_gone(app);
            } else {
                warn!(%id, "delete of unknown member ignored");
            }
        }
        Action::DeleteSelected => {
            if app.selection.is_empty() {
                debug!("bulk delete with empty selection ignored");
                return;
            }
            let removed = app.store.delete_many(app.selection.ids());
            app.selection.clear();
            close_edit_if_target_gone(app);
            info!(removed, "deleted selected members");
            if app.modal.is_none() {
                show_info(app, format!("Deleted {removed} selected member(s)"));
            }
        }
        Action::OpenEdit(id) => open_edit(app, &id),
        Action::SetField(field, value) => {
            if let Some(ModalState::Edit(session)) = &mut app.modal {
                session.set_field(field, value);
            }
        }
        Action::Commit => match app.modal.take() {
            Some(ModalState::Edit(session)) => {
                session.commit(&mut app.store);
                app.input_mode = InputMode::Normal;
            }
            other => app.modal = other,
        },
        Action::Cancel => match app.modal.take() {
            Some(ModalState::Edit(_)) => app.input_mode = InputMode::Normal,
            other => app.modal = other,
        },
        Action::ChangePage(target) => {
            app.current_page = resolve_target(target, app.current_page, app.total_pages());
            app.cursor = 0;
        }
    }
    apply_search(app);
}

fn open_edit(app: &mut AppState, id: &MemberId) {
    if app.edit_session().is_some() {
        debug!(%id, "edit already open; ignoring");
        return;
    }
    match EditSession::open(&app.store, id) {
        Some(session) => {
            app.modal = Some(ModalState::Edit(session));
            app.input_mode = InputMode::Modal;
        }
        None => warn!(%id, "cannot edit unknown member"),
    }
}

fn show_info(app: &mut AppState, message: String) {
    app.modal = Some(ModalState::Info { message });
    app.input_mode = InputMode::Modal;
}

fn close_edit_if_target_gone(app: &mut AppState) {
    let gone = app
        .edit_session()
        .is_some_and(|s| !app.store.contains(s.target()));
    if gone {
        app.modal = None;
        app.input_mode = InputMode::Normal;
    }
}

/// Route a key press. Returns `true` when the user asked to quit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            false
        }
        InputMode::Search => {
            handle_search_key(app, key.code);
            false
        }
        InputMode::Normal => handle_normal_key(app, key),
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> bool {
    let Some(action) = app.keymap.resolve(&key) else {
        match key.code {
            KeyCode::Char(c) if c.is_ascii_digit() => push_page_digit(app, c),
            _ => app.page_input.clear(),
        }
        return false;
    };
    app.page_input.clear();
    let cursor_id = app.cursor_member().map(|m| m.id.clone());
    match action {
        KeyAction::Quit => return true,
        KeyAction::Ignore => {}
        KeyAction::StartSearch => app.input_mode = InputMode::Search,
        KeyAction::OpenHelp => {
            app.modal = Some(ModalState::Help { scroll: 0 });
            app.input_mode = InputMode::Modal;
        }
        KeyAction::MoveUp => app.cursor = app.cursor.saturating_sub(1),
        KeyAction::MoveDown => {
            if app.cursor + 1 < app.current_members().len() {
                app.cursor += 1;
            }
        }
        KeyAction::FirstPage => dispatch(app, Action::ChangePage(PageTarget::First)),
        KeyAction::PreviousPage => dispatch(app, Action::ChangePage(PageTarget::Previous)),
        KeyAction::NextPage => dispatch(app, Action::ChangePage(PageTarget::Next)),
        KeyAction::LastPage => dispatch(app, Action::ChangePage(PageTarget::Last)),
        KeyAction::ToggleAll => {
            let checked = !app.selection.all_checked();
            dispatch(app, Action::ToggleAll(checked));
        }
        KeyAction::ToggleRow => {
            if let Some(id) = cursor_id {
                dispatch(app, Action::ToggleOne(id));
            }
        }
        KeyAction::EditRow => {
            if let Some(id) = cursor_id {
                dispatch(app, Action::OpenEdit(id));
            }
        }
        KeyAction::DeleteRow => {
            if let Some(id) = cursor_id {
                dispatch(app, Action::Delete(id));
            }
        }
        KeyAction::DeleteSelected => dispatch(app, Action::DeleteSelected),
    }
    false
}

/// Digits typed in a row build up a page number. A digit that would push the
/// number past the last page starts a new one instead.
fn push_page_digit(app: &mut AppState, c: char) {
    if app.page_input.is_empty() && c == '0' {
        return;
    }
    app.page_input.push(c);
    let total = app.total_pages().max(1);
    let within = app.page_input.parse::<usize>().is_ok_and(|n| n <= total);
    if !within {
        app.page_input.clear();
        if c != '0' {
            app.page_input.push(c);
        }
    }
    if let Ok(n) = app.page_input.parse::<usize>() {
        dispatch(app, Action::ChangePage(PageTarget::Number(n)));
    }
}

fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Down => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            dispatch(app, Action::Search(String::new()));
        }
        KeyCode::Backspace => {
            let mut query = app.search_query.clone();
            query.pop();
            dispatch(app, Action::Search(query));
        }
        KeyCode::Char(c) => {
            let query = format!("{}{c}", app.search_query);
            dispatch(app, Action::Search(query));
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::Edit(session)) => match code {
            KeyCode::Esc => dispatch(app, Action::Cancel),
            KeyCode::Enter => dispatch(app, Action::Commit),
            KeyCode::Tab | KeyCode::Down => session.set_focus(session.focus().next()),
            KeyCode::BackTab | KeyCode::Up => session.set_focus(session.focus().prev()),
            KeyCode::Backspace => {
                let field = session.focus();
                let mut value = session.draft().get(field).to_string();
                value.pop();
                dispatch(app, Action::SetField(field, value));
            }
            KeyCode::Char(c) => {
                let field = session.focus();
                let value = format!("{}{c}", session.draft().get(field));
                dispatch(app, Action::SetField(field, value));
            }
            _ => {}
        },
        Some(ModalState::Help { scroll }) => match code {
            KeyCode::Up | KeyCode::Char('k') => *scroll = scroll.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => *scroll = scroll.saturating_add(1),
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('?') => close_modal(app),
            _ => {}
        },
        Some(ModalState::Info { .. }) => {
            if matches!(code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q')) {
                close_modal(app);
            }
        }
        None => app.input_mode = InputMode::Normal,
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}

/// Check the fetch channel without blocking. Returns `true` once the fetch has
/// finished, successfully or not, and the receiver can be dropped.
pub fn poll_fetch(app: &mut AppState, rx: &Receiver<crate::Result<Vec<MemberRecord>>>) -> bool {
    match rx.try_recv() {
        Ok(Ok(records)) => {
            dispatch(app, Action::Loaded(records));
            true
        }
        Ok(Err(err)) => {
            error!(error = %err, "failed to load members");
            fetch_failed(app);
            true
        }
        Err(TryRecvError::Empty) => false,
        Err(TryRecvError::Disconnected) => {
            error!("member fetch ended without a result");
            fetch_failed(app);
            true
        }
    }
}

fn fetch_failed(app: &mut AppState) {
    app.load_state = LoadState::Failed;
    if app.modal.is_none() {
        show_info(app, "Failed to load members. See the log file for details.".to_string());
    }
}

pub fn run_app(terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>, config: &Config) -> Result<()> {
    let mut app = AppState::new(
        Theme::load_or_init(&config.theme_file),
        Keymap::load_or_init(&config.keybinds_file),
    );
    let mut pending = Some(source::spawn_fetch(config.source_url.clone()));

    loop {
        if let Some(rx) = &pending
            && poll_fetch(&mut app, rx)
        {
            pending = None;
        }

        terminal.draw(|f| ui::render(f, &app))?;

        if event::poll(Duration::from_millis(100))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && handle_key(&mut app, key)
        {
            break;
        }
    }

    info!(uptime = ?app.started_at.elapsed(), "exiting");
    Ok(())
}
