//! Where the user snippet file lives.
//!
//! Resolution order:
//! - `VSCODE_USER_DATA_DIR` (non-empty, `~` expanded) -> `<it>/User/snippets`
//! - platform config dir -> `<config>/Code/User/snippets`
//!   (macOS `~/Library/Application Support`, Linux `~/.config`, Windows `%APPDATA%`)
//!
//! The target file is `<snippets dir>/<language>.json`. Environment and platform
//! lookups are injected through `from_lookup`, so tests never read the real ones.

use std::path::{Path, PathBuf};

use anyhow::{anyhow, Result};

/// Env var naming an alternate editor data root.
pub const USER_DATA_DIR_ENV: &str = "VSCODE_USER_DATA_DIR";

/// Snippet language used when none is given.
pub const DEFAULT_LANGUAGE: &str = "cpp";

#[derive(Clone, Debug)]
pub struct SnippetsConfig {
    /// Editor data root override (from `VSCODE_USER_DATA_DIR`).
    pub user_data_dir: Option<PathBuf>,
    /// Platform config directory (`dirs::config_dir()`).
    pub config_dir: Option<PathBuf>,
    /// Snippet file name without `.json`.
    pub language: String,
}

impl Default for SnippetsConfig {
    fn default() -> Self {
        Self {
            user_data_dir: None,
            config_dir: None,
            language: DEFAULT_LANGUAGE.to_string(),
        }
    }
}

impl SnippetsConfig {
    /// Reads the real environment and platform directories.
    pub fn from_env() -> Self {
        Self::from_lookup(
            |k| std::env::var(k).ok(),
            dirs::home_dir(),
            dirs::config_dir(),
        )
    }

    /// Same as `from_env` with every outside lookup supplied by the caller.
    pub fn from_lookup<F>(env: F, home: Option<PathBuf>, config_dir: Option<PathBuf>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self {
            config_dir,
            ..Self::default()
        };

        if let Some(v) = env(USER_DATA_DIR_ENV) {
            let s = v.trim();
            if !s.is_empty() {
                cfg.user_data_dir = Some(expand_tilde(s, home.as_deref()));
            }
        }

        cfg
    }

    pub fn with_user_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.user_data_dir = Some(dir.into());
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// `.../User/snippets` for the editor.
    pub fn snippets_dir(&self) -> Result<PathBuf> {
        if let Some(root) = &self.user_data_dir {
            return Ok(root.join("User").join("snippets"));
        }
        let base = self
            .config_dir
            .as_ref()
            .ok_or_else(|| anyhow!("cannot locate the user config directory; set {}", USER_DATA_DIR_ENV))?;
        Ok(base.join("Code").join("User").join("snippets"))
    }

    /// Full path of the target snippet file.
    pub fn target_path(&self) -> Result<PathBuf> {
        let lang = self.language.trim();
        if lang.is_empty() {
            return Err(anyhow!("snippet language must not be empty"));
        }
        Ok(self.snippets_dir()?.join(format!("{lang}.json")))
    }
}

/// `~` and `~/rest` become `<home>` and `<home>/rest`; anything else is left alone.
fn expand_tilde(s: &str, home: Option<&Path>) -> PathBuf {
    match (s, home) {
        ("~", Some(h)) => h.to_path_buf(),
        (_, Some(h)) if s.starts_with("~/") || s.starts_with("~\\") => h.join(&s[2..]),
        _ => PathBuf::from(s),
    }
}
