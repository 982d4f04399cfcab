use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::generate::{generate_file, GenerateOptions};

/// Create a snippet file from the literal contents of a text/source file.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "snippet_from_file",
    version,
    about = "Create snippet JSON from a file"
)]
pub struct GenerateArgs {
    /// Source/text file to wrap
    pub input: PathBuf,

    /// Snippet name (defaults to the file stem)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Snippet prefix (defaults to the name)
    #[arg(long, short = 'p')]
    pub prefix: Option<String>,

    /// Snippet description (defaults to 'Auto-generated from <file>')
    #[arg(long, short = 'd')]
    pub description: Option<String>,

    /// Output .code-snippets path (defaults next to the input)
    #[arg(long, short = 'o')]
    pub output: Option<PathBuf>,
}

impl From<GenerateArgs> for GenerateOptions {
    fn from(a: GenerateArgs) -> Self {
        GenerateOptions {
            name: a.name,
            prefix: a.prefix,
            description: a.description,
            output: a.output,
        }
    }
}

/// Generates the snippet file and prints its path.
pub fn cmd_generate(args: GenerateArgs) -> Result<PathBuf> {
    let input = args.input.clone();
    let generated = generate_file(&input, &args.into())?;
    println!("{}", generated.output.display());
    Ok(generated.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_flags_map_to_options() {
        let a = GenerateArgs::try_parse_from([
            "snippet_from_file", "dsu.hpp", "-n", "DSU", "-p", "dsu", "-d", "union-find", "-o", "x.json",
        ])
        .unwrap();
        let opts: GenerateOptions = a.into();
        assert_eq!(opts.name.as_deref(), Some("DSU"));
        assert_eq!(opts.prefix.as_deref(), Some("dsu"));
        assert_eq!(opts.description.as_deref(), Some("union-find"));
        assert_eq!(opts.output, Some(PathBuf::from("x.json")));
    }
}
