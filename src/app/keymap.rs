//! Keybinding configuration: parse `keybinds.conf`, provide defaults, and map keys to actions.
//!
//! Only the member table (normal mode) goes through the keymap. Search input and the
//! edit form read keys directly since they consume free text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::Path;
use tracing::warn;

/// Commands the member table understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Focus the search input.
    StartSearch,
    /// Show the help modal.
    OpenHelp,
    /// Move the row cursor up.
    MoveUp,
    /// Move the row cursor down.
    MoveDown,
    /// Jump to page 1.
    FirstPage,
    /// Go back one page; stays put on page 1.
    PreviousPage,
    /// Go forward one page; stays put on the last page.
    NextPage,
    /// Jump to the last page of the filtered view.
    LastPage,
    /// Select or deselect the row under the cursor.
    ToggleRow,
    /// Flip the select-all checkbox.
    ToggleAll,
    /// Open the edit modal for the row under the cursor.
    EditRow,
    /// Delete the row under the cursor.
    DeleteRow,
    /// Delete every selected row, visible or not.
    DeleteSelected,
    /// Swallow the key.
    Ignore,
}

const ACTION_NAMES: [(KeyAction, &str); 15] = [
    (KeyAction::Quit, "Quit"),
    (KeyAction::StartSearch, "StartSearch"),
    (KeyAction::OpenHelp, "OpenHelp"),
    (KeyAction::MoveUp, "MoveUp"),
    (KeyAction::MoveDown, "MoveDown"),
    (KeyAction::FirstPage, "FirstPage"),
    (KeyAction::PreviousPage, "PreviousPage"),
    (KeyAction::NextPage, "NextPage"),
    (KeyAction::LastPage, "LastPage"),
    (KeyAction::ToggleRow, "ToggleRow"),
    (KeyAction::ToggleAll, "ToggleAll"),
    (KeyAction::EditRow, "EditRow"),
    (KeyAction::DeleteRow, "DeleteRow"),
    (KeyAction::DeleteSelected, "DeleteSelected"),
    (KeyAction::Ignore, "Ignore"),
];

/// Mapping from `(KeyModifiers, KeyCode)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    /// Arrow keys plus vim-style letters, Space/`a` for selection, `e`/Enter to edit.
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);
        bindings.insert((M::NONE, Char('/')), KeyAction::StartSearch);
        bindings.insert((M::NONE, Char('?')), KeyAction::OpenHelp);
        bindings.insert((M::SHIFT, Char('?')), KeyAction::OpenHelp);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);

        bindings.insert((M::NONE, Left), KeyAction::PreviousPage);
        bindings.insert((M::NONE, Right), KeyAction::NextPage);
        bindings.insert((M::NONE, Char('h')), KeyAction::PreviousPage);
        bindings.insert((M::NONE, Char('l')), KeyAction::NextPage);
        bindings.insert((M::NONE, PageUp), KeyAction::PreviousPage);
        bindings.insert((M::NONE, PageDown), KeyAction::NextPage);
        bindings.insert((M::NONE, Home), KeyAction::FirstPage);
        bindings.insert((M::NONE, End), KeyAction::LastPage);
        bindings.insert((M::NONE, Char('g')), KeyAction::FirstPage);
        // Terminals disagree on whether uppercase letters carry SHIFT.
        bindings.insert((M::NONE, Char('G')), KeyAction::LastPage);
        bindings.insert((M::SHIFT, Char('G')), KeyAction::LastPage);

        bindings.insert((M::NONE, Char(' ')), KeyAction::ToggleRow);
        bindings.insert((M::NONE, Char('a')), KeyAction::ToggleAll);
        bindings.insert((M::NONE, Enter), KeyAction::EditRow);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditRow);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteRow);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteRow);
        bindings.insert((M::NONE, Char('D')), KeyAction::DeleteSelected);
        bindings.insert((M::SHIFT, Char('D')), KeyAction::DeleteSelected);
        bindings.insert((M::SHIFT, Delete), KeyAction::DeleteSelected);

        Self { bindings }
    }

    /// Load `path`, or write the defaults there and return them.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_default();
        }
        let km = Self::default();
        if let Err(e) = km.write_file(path) {
            warn!(path = %path.display(), error = %e, "could not write default keybindings");
        }
        km
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Parse `<Action> = <KeySpec>` lines on top of the defaults.
    /// The reversed `<KeySpec> = <Action>` form is accepted too.
    pub fn parse(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            let (lhs, rhs) = (lhs.trim(), rhs.trim());
            if let (Some(action), Some(key)) = (parse_action(lhs), parse_key(rhs)) {
                map.bindings.insert(key, action);
            } else if let (Some(key), Some(action)) = (parse_key(lhs), parse_action(rhs)) {
                map.bindings.insert(key, action);
            } else {
                warn!(line, "ignoring unrecognised keybinding");
            }
        }
        map
    }

    /// Dump every binding, sorted by action then key, in `Action = KeySpec` form.
    pub fn to_config(&self) -> String {
        let mut buf = String::new();
        buf.push_str("# member-admin keybindings\n");
        buf.push_str("# Format: <Action> = <KeySpec>\n");
        buf.push_str("# KeySpec examples: q, Ctrl+q, Shift+D, Enter, Esc, Space, Up, Down, Left, Right, Home, End, PageUp, PageDown, Delete\n");
        let names: Vec<&str> = ACTION_NAMES.iter().map(|(_, n)| *n).collect();
        let _ = writeln!(&mut buf, "# Actions: {}\n", names.join(", "));

        let mut lines: Vec<(usize, String)> = self
            .bindings
            .iter()
            .map(|((mods, code), action)| {
                let rank = ACTION_NAMES
                    .iter()
                    .position(|(a, _)| a == action)
                    .unwrap_or(usize::MAX);
                (rank, format!("{} = {}", format_action(*action), Self::format_key(*mods, *code)))
            })
            .collect();
        lines.sort();
        for (_, line) in lines {
            buf.push_str(&line);
            buf.push('\n');
        }
        buf
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_config())
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// Keys bound to `action`, formatted and sorted, for the help screen.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys.dedup();
        keys
    }

    /// Format a key like "Ctrl+q", "Shift+D" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Char(' ') => "Space".to_string(),
            Char(c) => c.to_string(),
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            BackTab => "BackTab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            Left => "Left".to_string(),
            Right => "Right".to_string(),
            Home => "Home".to_string(),
            End => "End".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            other => format!("{other:?}"),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{base}")
        } else if mods.contains(KeyModifiers::SHIFT) {
            format!("Shift+{base}")
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let mut rest = spec.trim();
    let mut mods = KeyModifiers::NONE;
    loop {
        if let Some(after) = rest.strip_prefix("Ctrl+") {
            mods |= KeyModifiers::CONTROL;
            rest = after;
        } else if let Some(after) = rest.strip_prefix("Shift+") {
            mods |= KeyModifiers::SHIFT;
            rest = after;
        } else {
            break;
        }
    }
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Space" => Char(' '),
        "Tab" => Tab,
        "BackTab" => BackTab,
        "Up" => Up,
        "Down" => Down,
        "Left" => Left,
        "Right" => Right,
        "Home" => Home,
        "End" => End,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    let s = s.trim();
    ACTION_NAMES.iter().find(|(_, n)| *n == s).map(|(a, _)| *a)
}

pub fn format_action(a: KeyAction) -> &'static str {
    ACTION_NAMES
        .iter()
        .find(|(action, _)| *action == a)
        .map(|(_, n)| *n)
        .unwrap_or("Ignore")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(mods: KeyModifiers, code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, mods)
    }

    #[test]
    fn defaults_cover_core_commands() {
        let km = Keymap::default();
        assert_eq!(km.resolve(&press(KeyModifiers::NONE, KeyCode::Char(' '))), Some(KeyAction::ToggleRow));
        assert_eq!(km.resolve(&press(KeyModifiers::SHIFT, KeyCode::Char('D'))), Some(KeyAction::DeleteSelected));
        assert_eq!(km.resolve(&press(KeyModifiers::NONE, KeyCode::Right)), Some(KeyAction::NextPage));
        assert_eq!(km.resolve(&press(KeyModifiers::NONE, KeyCode::F(5))), None);
    }

    #[test]
    fn parse_accepts_both_orders_and_modifiers() {
        let km = Keymap::parse("Quit = Ctrl+x\nz = ToggleAll\nnonsense line\nEditRow = NotAKey\n");
        assert_eq!(km.resolve(&press(KeyModifiers::CONTROL, KeyCode::Char('x'))), Some(KeyAction::Quit));
        assert_eq!(km.resolve(&press(KeyModifiers::NONE, KeyCode::Char('z'))), Some(KeyAction::ToggleAll));
        // defaults survive
        assert_eq!(km.resolve(&press(KeyModifiers::NONE, KeyCode::Char('q'))), Some(KeyAction::Quit));
    }

    #[test]
    fn config_dump_parses_back_to_same_bindings() {
        let km = Keymap::default();
        let again = Keymap::parse(&km.to_config());
        let mut a = km.all_sorted();
        let mut b = again.all_sorted();
        a.sort();
        b.sort();
        assert_eq!(a, b);
    }

    #[test]
    fn keys_for_lists_every_binding() {
        let keys = Keymap::default().keys_for(KeyAction::EditRow);
        assert_eq!(keys, ["Enter", "e"]);
    }

    impl Keymap {
        fn all_sorted(&self) -> Vec<String> {
            self.bindings
                .iter()
                .map(|((m, c), a)| format!("{} {}", format_action(*a), Keymap::format_key(*m, *c)))
                .collect()
        }
    }
}
