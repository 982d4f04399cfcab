//! Snippet file I/O.
//!
//! Reads are whole-file; writes go to `<file>.tmp` and are renamed over the
//! destination, so the target is either the old bytes or the new bytes.

use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::debug;
use serde_json::Value;

use crate::snippet::SnippetCollection;

/// Fatal problems with a snippet file. Entry-level problems are not errors.
#[derive(Debug)]
pub enum SnippetFileError {
    /// Path is absent or not a regular file.
    NotFound(PathBuf),
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    /// Parsed fine but the top level is not an object.
    NotAnObject(PathBuf),
}

impl fmt::Display for SnippetFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnippetFileError::NotFound(path) => {
                write!(f, "snippet file not found: {}", path.display())
            }
            SnippetFileError::InvalidJson { path, source } => {
                write!(f, "invalid JSON in {}: {}", path.display(), source)
            }
            SnippetFileError::NotAnObject(path) => {
                write!(f, "top-level JSON must be an object in {}", path.display())
            }
        }
    }
}

impl std::error::Error for SnippetFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SnippetFileError::InvalidJson { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Fails with `NotFound` unless `path` is an existing regular file.
pub fn require_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(SnippetFileError::NotFound(path.to_path_buf()).into());
    }
    Ok(())
}

/// Parses snippet JSON text; `path` only labels errors.
pub fn parse_collection(text: &str, path: &Path) -> Result<SnippetCollection> {
    let value: Value = serde_json::from_str(text).map_err(|source| SnippetFileError::InvalidJson {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(SnippetFileError::NotAnObject(path.to_path_buf()).into()),
    }
}

/// Loads an incoming snippet file. The file must exist.
pub fn load_collection(path: &Path) -> Result<SnippetCollection> {
    require_file(path)?;
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let map = parse_collection(&text, path)?;
    debug!("loaded {} entries from {}", map.len(), path.display());
    Ok(map)
}

/// Loads the target snippet file, or an empty collection if it does not exist yet.
pub fn load_or_empty(path: &Path) -> Result<SnippetCollection> {
    if !path.exists() {
        debug!("target {} absent, starting empty", path.display());
        return Ok(SnippetCollection::new());
    }
    let text = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_collection(&text, path)
}

/// Pretty JSON (two-space indent, UTF-8 kept as-is) with a trailing newline.
pub fn render_collection(map: &SnippetCollection) -> Result<String> {
    let mut out = serde_json::to_string_pretty(map).context("serialize snippets")?;
    out.push('\n');
    Ok(out)
}

/// Writes `map` to `path` atomically, creating parent directories.
///
/// An existing `path` is resolved first, so a symlinked snippet file is updated
/// behind the link and keeps its permissions.
pub fn write_collection(path: &Path, map: &SnippetCollection) -> Result<()> {
    let text = render_collection(map)?;

    let dest = resolve_dest(path);
    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }

    let tmp = tmp_path(&dest);
    let _ = fs::remove_file(&tmp);

    let written = write_tmp(&tmp, &dest, text.as_bytes()).and_then(|()| {
        fs::rename(&tmp, &dest)
            .with_context(|| format!("rename {} -> {}", tmp.display(), dest.display()))
    });
    if let Err(e) = written {
        let _ = fs::remove_file(&tmp);
        return Err(e);
    }
    debug!("wrote {} entries to {}", map.len(), dest.display());
    Ok(())
}

/// Real file behind `path` when it exists; `path` itself otherwise.
fn resolve_dest(path: &Path) -> PathBuf {
    if fs::symlink_metadata(path).is_err() {
        return path.to_path_buf();
    }
    // a dangling link has nothing to write through; replace the link itself
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn write_tmp(tmp: &Path, dest: &Path, bytes: &[u8]) -> Result<()> {
    let mut f = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(tmp)
        .with_context(|| format!("open tmp {}", tmp.display()))?;
    f.write_all(bytes)
        .with_context(|| format!("write {}", tmp.display()))?;
    f.sync_all()
        .with_context(|| format!("sync {}", tmp.display()))?;

    if let Ok(meta) = fs::metadata(dest) {
        fs::set_permissions(tmp, meta.permissions())
            .with_context(|| format!("copy permissions of {}", dest.display()))?;
    }
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
