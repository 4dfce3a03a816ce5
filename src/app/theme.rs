//! Colour palette and its `key = colour` config file.

use ratatui::style::Color;
use std::fmt::Write as _;
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, warn};

/// Color palette for theming the TUI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub text: Color,
    pub muted: Color,
    pub title: Color,
    pub border: Color,
    pub header_bg: Color,
    pub header_fg: Color,
    pub status_bg: Color,
    pub status_fg: Color,
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub selected_bg: Color,
    pub danger: Color,
}

impl Theme {
    /// Catppuccin Mocha. Used whenever the config file is missing or unreadable.
    pub fn mocha() -> Self {
        Self {
            text: Color::Rgb(0xcd, 0xd6, 0xf4),
            muted: Color::Rgb(0x7f, 0x84, 0x9c),
            title: Color::Rgb(0xcb, 0xa6, 0xf7),
            border: Color::Rgb(0x58, 0x5b, 0x70),
            header_bg: Color::Rgb(0x31, 0x32, 0x44),
            header_fg: Color::Rgb(0xb4, 0xbe, 0xfe),
            status_bg: Color::Rgb(0x45, 0x47, 0x5a),
            status_fg: Color::Rgb(0xcd, 0xd6, 0xf4),
            highlight_fg: Color::Rgb(0xf9, 0xe2, 0xaf),
            highlight_bg: Color::Rgb(0x45, 0x47, 0x5a),
            selected_bg: Color::Rgb(0x31, 0x32, 0x44),
            danger: Color::Rgb(0xf3, 0x8b, 0xa8),
        }
    }

    fn slots(&mut self) -> [(&'static str, &mut Color); 12] {
        [
            ("text", &mut self.text),
            ("muted", &mut self.muted),
            ("title", &mut self.title),
            ("border", &mut self.border),
            ("header_bg", &mut self.header_bg),
            ("header_fg", &mut self.header_fg),
            ("status_bg", &mut self.status_bg),
            ("status_fg", &mut self.status_fg),
            ("highlight_fg", &mut self.highlight_fg),
            ("highlight_bg", &mut self.highlight_bg),
            ("selected_bg", &mut self.selected_bg),
            ("danger", &mut self.danger),
        ]
    }

    /// Parse theme file contents on top of `mocha`. Unknown keys and bad colours are skipped.
    pub fn parse(contents: &str) -> Self {
        let mut theme = Self::mocha();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((key, val)) = line.split_once('=') else {
                continue;
            };
            let (key, val) = (key.trim(), val.trim());
            let Ok(color) = Color::from_str(val) else {
                debug!(key, val, "ignoring unparsable theme colour");
                continue;
            };
            if let Some((_, slot)) = theme.slots().into_iter().find(|(k, _)| *k == key) {
                *slot = color;
            }
        }
        theme
    }

    pub fn from_file(path: &Path) -> Option<Self> {
        let contents = std::fs::read_to_string(path).ok()?;
        Some(Self::parse(&contents))
    }

    /// Render as config file contents.
    pub fn to_config(&self) -> String {
        let mut copy = *self;
        let mut buf = String::new();
        buf.push_str("# member-admin theme\n");
        buf.push_str("# Colours: #RRGGBB, a terminal colour name, or 'reset'\n\n");
        for (key, color) in copy.slots() {
            let _ = writeln!(&mut buf, "{key} = {color}");
        }
        buf
    }

    pub fn write_file(&self, path: &Path) -> std::io::Result<()> {
        std::fs::write(path, self.to_config())
    }

    /// Load `path`, or write the default theme there and return it.
    pub fn load_or_init(path: &Path) -> Self {
        if path.exists() {
            return Self::from_file(path).unwrap_or_else(Self::mocha);
        }
        let theme = Self::mocha();
        if let Err(e) = theme.write_file(path) {
            warn!(path = %path.display(), error = %e, "could not write default theme");
        }
        theme
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::mocha()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_overrides_known_keys_only() {
        let t = Theme::parse("# c\ntext = #010203\nbogus = red\nborder = not-a-colour\ntitle=reset\n");
        assert_eq!(t.text, Color::Rgb(1, 2, 3));
        assert_eq!(t.title, Color::Reset);
        assert_eq!(t.border, Theme::mocha().border);
    }

    #[test]
    fn config_output_parses_back() {
        let mut t = Theme::mocha();
        t.border = Color::DarkGray;
        t.highlight_bg = Color::Reset;
        assert_eq!(Theme::parse(&t.to_config()), t);
    }
}
