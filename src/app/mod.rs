//! Application state types and entry glue.
//!
//! `AppState` owns the member store and everything derived from it. Domain changes
//! go through [`update::dispatch`]; the event loop is re-exported as `run`.
//!
pub mod edit;
pub mod keymap;
pub mod pagination;
pub mod selection;
pub mod store;
pub mod theme;
pub mod update;

use std::time::Instant;

use crate::search::apply_search;
use crate::source::{MemberId, MemberRecord};
use edit::{EditField, EditSession};
use keymap::Keymap;
use pagination::PageTarget;
use selection::Selection;
use store::MemberStore;
pub use theme::Theme;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Progress of the one-shot member fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready,
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModalState {
    Edit(EditSession),
    Help { scroll: u16 },
    Info { message: String },
}

/// Every domain transition the UI can request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Loaded(Vec<MemberRecord>),
    Search(String),
    ToggleOne(MemberId),
    ToggleAll(bool),
    Delete(MemberId),
    DeleteSelected,
    OpenEdit(MemberId),
    SetField(EditField, String),
    Commit,
    Cancel,
    ChangePage(PageTarget),
}

pub struct AppState {
    pub started_at: Instant,
    /// Every loaded record, in source order.
    pub store: MemberStore,
    /// Filtered view, recomputed by `apply_search` after every change.
    pub members: Vec<MemberRecord>,
    pub search_query: String,
    /// 1-based page into `members`. Clamped whenever the view is rebuilt.
    pub current_page: usize,
    /// Row index within the current page.
    pub cursor: usize,
    /// Digits typed so far for a page jump.
    pub page_input: String,
    /// Checked ids. May include rows hidden by the current query.
    pub selection: Selection,
    pub load_state: LoadState,
    /// Which handler gets the next key.
    pub input_mode: InputMode,
    /// Open overlay, if any. `input_mode` is `Modal` while this is set.
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
}

impl AppState {
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            store: MemberStore::new(),
            members: Vec::new(),
            search_query: String::new(),
            current_page: 1,
            cursor: 0,
            page_input: String::new(),
            selection: Selection::new(),
            load_state: LoadState::Loading,
            input_mode: InputMode::Normal,
            modal: None,
            theme,
            keymap,
        }
    }

    /// State with `members` already loaded and default theme/keys; no files touched.
    pub fn with_members(members: Vec<MemberRecord>) -> Self {
        let mut app = Self::default();
        app.store.load(members);
        app.load_state = LoadState::Ready;
        apply_search(&mut app);
        app
    }

    /// Rows shown on the current page.
    pub fn current_members(&self) -> &[MemberRecord] {
        pagination::page_slice(&self.members, self.current_page)
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.members.len())
    }

    /// Record under the cursor, if the page has any rows.
    pub fn cursor_member(&self) -> Option<&MemberRecord> {
        self.current_members().get(self.cursor)
    }

    pub fn edit_session(&self) -> Option<&EditSession> {
        match &self.modal {
            Some(ModalState::Edit(session)) => Some(session),
            _ => None,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Theme::mocha(), Keymap::default())
    }
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
