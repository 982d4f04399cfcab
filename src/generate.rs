//! Snippet generator: wraps a file's text, line by line, as a snippet body.
//!
//! Content is literal. No `$` escaping, no placeholder handling, blank lines kept.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use log::debug;

use crate::snippet::{single_entry, Snippet, SnippetCollection};
use crate::store::{require_file, write_collection};

/// Extension used for generated files when no output path is given.
pub const SNIPPETS_EXT: &str = "code-snippets";

/// Optional overrides. `None` (or an empty string) means "use the default".
#[derive(Clone, Debug, Default)]
pub struct GenerateOptions {
    pub name: Option<String>,
    pub prefix: Option<String>,
    pub description: Option<String>,
    pub output: Option<PathBuf>,
}

impl GenerateOptions {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Splits text into body lines. `\r\n`, `\n` and a lone `\r` all end a line
/// and are dropped; a final line without terminator is kept.
pub fn build_snippet_body(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut rest = text;
    while !rest.is_empty() {
        match rest.find(|c: char| c == '\r' || c == '\n') {
            Some(i) => {
                lines.push(rest[..i].to_string());
                let eol = if rest[i..].starts_with("\r\n") { 2 } else { 1 };
                rest = &rest[i + eol..];
            }
            None => {
                lines.push(rest.to_string());
                break;
            }
        }
    }
    lines
}

fn non_empty(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn file_stem(path: &Path) -> Result<String> {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("cannot derive a snippet name from {}", path.display()))
}

/// `<dir>/<stem>.code-snippets` next to the input.
pub fn default_output_path(input: &Path) -> Result<PathBuf> {
    let stem = file_stem(input)?;
    Ok(input.with_file_name(format!("{stem}.{SNIPPETS_EXT}")))
}

/// Builds `(name, snippet)` for `text` read from `input`.
pub fn build_snippet(input: &Path, text: &str, opts: &GenerateOptions) -> Result<(String, Snippet)> {
    let name = match non_empty(&opts.name) {
        Some(n) => n.to_string(),
        None => file_stem(input)?,
    };
    let prefix = non_empty(&opts.prefix).unwrap_or(name.as_str()).to_string();
    let description = match non_empty(&opts.description) {
        Some(d) => d.to_string(),
        None => {
            let file_name = input
                .file_name()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            format!("Auto-generated from {file_name}")
        }
    };

    let snippet = Snippet::new(prefix, build_snippet_body(text)).with_description(description);
    Ok((name, snippet))
}

/// Result of a generator run.
#[derive(Clone, Debug)]
pub struct Generated {
    pub name: String,
    pub output: PathBuf,
    pub collection: SnippetCollection,
}

/// Reads `input`, writes the one-entry snippet file, returns where it went.
pub fn generate_file(input: &Path, opts: &GenerateOptions) -> Result<Generated> {
    require_file(input)?;

    let text = fs::read_to_string(input).with_context(|| format!("read {}", input.display()))?;
    let (name, snippet) = build_snippet(input, &text, opts)?;
    let collection = single_entry(&name, &snippet).context("serialize snippet")?;

    let output = match &opts.output {
        Some(p) => p.clone(),
        None => default_output_path(input)?,
    };
    write_collection(&output, &collection)?;
    debug!(
        "generated '{}' ({} lines) from {}",
        name,
        snippet.body.len(),
        input.display()
    );

    Ok(Generated {
        name,
        output,
        collection,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snippet::Prefix;

    #[test]
    fn body_strips_terminators_and_keeps_blank_lines() {
        assert_eq!(build_snippet_body("foo\nbar"), vec!["foo", "bar"]);
        assert_eq!(build_snippet_body("foo\r\n\r\nbar\n"), vec!["foo", "", "bar"]);
        assert_eq!(build_snippet_body("a\n\n"), vec!["a", ""]);
        assert!(build_snippet_body("").is_empty());
    }

    #[test]
    fn body_treats_lone_cr_as_line_end() {
        assert_eq!(build_snippet_body("a\rb\r"), vec!["a", "b"]);
        assert_eq!(build_snippet_body("a\r\rb"), vec!["a", "", "b"]);
        assert_eq!(build_snippet_body("x\ry\r\nz\n"), vec!["x", "y", "z"]);
    }

    #[test]
    fn body_is_literal() {
        let text = "for (int ${i} = 0; i < n; ++i) {\n\t$0 \"quoted\" \\\n}";
        assert_eq!(
            build_snippet_body(text),
            vec!["for (int ${i} = 0; i < n; ++i) {", "\t$0 \"quoted\" \\", "}"]
        );
    }

    #[test]
    fn defaults_come_from_the_file_name() {
        let (name, s) =
            build_snippet(Path::new("lib/fenwick_tree.hpp"), "x\n", &GenerateOptions::default()).unwrap();
        assert_eq!(name, "fenwick_tree");
        assert_eq!(s.prefix, Prefix::One("fenwick_tree".into()));
        assert_eq!(s.description.as_deref(), Some("Auto-generated from fenwick_tree.hpp"));
    }

    #[test]
    fn prefix_follows_overridden_name() {
        let opts = GenerateOptions::default().with_name("bit");
        let (name, s) = build_snippet(Path::new("fenwick.hpp"), "", &opts).unwrap();
        assert_eq!(name, "bit");
        assert_eq!(s.prefix, Prefix::One("bit".into()));
    }

    #[test]
    fn each_override_is_independent() {
        let opts = GenerateOptions::default()
            .with_prefix("fw")
            .with_description("Fenwick tree");
        let (name, s) = build_snippet(Path::new("fenwick.hpp"), "", &opts).unwrap();
        assert_eq!(name, "fenwick");
        assert_eq!(s.prefix, Prefix::One("fw".into()));
        assert_eq!(s.description.as_deref(), Some("Fenwick tree"));
    }

    #[test]
    fn empty_overrides_fall_back() {
        let opts = GenerateOptions::default().with_name("").with_prefix("");
        let (name, s) = build_snippet(Path::new("dsu.cpp"), "", &opts).unwrap();
        assert_eq!(name, "dsu");
        assert_eq!(s.prefix, Prefix::One("dsu".into()));
    }

    #[test]
    fn default_output_sits_next_to_input() {
        assert_eq!(
            default_output_path(Path::new("/tmp/src/treap.hpp")).unwrap(),
            PathBuf::from("/tmp/src/treap.code-snippets")
        );
        assert_eq!(
            default_output_path(Path::new("notes")).unwrap(),
            PathBuf::from("notes.code-snippets")
        );
    }
}
