//! Command-line and environment configuration.

use clap::Parser;
use std::path::PathBuf;

use crate::error::{Result, simple_error};
use crate::source::DEFAULT_SOURCE_URL;

#[derive(Parser, Debug, Clone)]
#[command(name = "member-admin", version, about = "Search, select, edit and delete members in the terminal")]
pub struct Config {
    /// JSON endpoint returning the member list.
    #[arg(long, env = "MEMBER_ADMIN_SOURCE_URL", default_value = DEFAULT_SOURCE_URL)]
    pub source_url: String,

    /// Theme file; created with defaults when missing.
    #[arg(long, env = "MEMBER_ADMIN_THEME", default_value = "theme.conf")]
    pub theme_file: PathBuf,

    /// Keybinding file; created with defaults when missing.
    #[arg(long, env = "MEMBER_ADMIN_KEYBINDS", default_value = "keybinds.conf")]
    pub keybinds_file: PathBuf,

    /// Log output. The terminal belongs to the UI, so logs go to a file.
    #[arg(long, env = "MEMBER_ADMIN_LOG_FILE", default_value = "member-admin.log")]
    pub log_file: PathBuf,

    /// Default log filter; `RUST_LOG` wins when set.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        let url = self.source_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(simple_error(format!(
                "source url must be http(s), got {:?}",
                self.source_url
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_fixed_source() {
        let cfg = Config::parse_from(["member-admin"]);
        assert_eq!(cfg.source_url, DEFAULT_SOURCE_URL);
        assert_eq!(cfg.theme_file, PathBuf::from("theme.conf"));
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn rejects_non_http_source() {
        let cfg = Config::parse_from(["member-admin", "--source-url", "file:///tmp/members.json"]);
        assert!(cfg.validate().is_err());
    }
}
