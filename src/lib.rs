//! Tools for editor code-snippet files: merge snippet sets into the user's
//! snippet file, and turn any text file into a snippet.

pub mod snippet;
pub mod store;
pub mod merge;
pub mod generate;
pub mod config;
pub mod cli;

pub use config::SnippetsConfig;
pub use generate::{generate_file, GenerateOptions, Generated};
pub use merge::{merge_all, merge_collection, MergeOutcome, MergeStats};
pub use snippet::{Prefix, Snippet, SnippetCollection};
pub use store::{load_collection, load_or_empty, write_collection, SnippetFileError};
