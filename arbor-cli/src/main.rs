//! Arbor CLI
//!
//! Runs a structural pseudo-class query against a JSON document.

mod report;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use arbor_common::warning::clear_warnings;
use arbor_json::{DEFAULT_ROOT_NAME, JsonTree};
use arbor_query::Query;
use clap::{Parser, ValueEnum};

use crate::report::MatchReport;

/// Query JSON documents with structural CSS pseudo-classes.
#[derive(Debug, Parser)]
#[command(name = "arbor", version, about)]
struct Cli {
    /// Compound query, e.g. `items:last-of-type` or `:empty`
    query: String,

    /// JSON file to query
    #[arg(short, long, required_unless_present = "json", conflicts_with = "json")]
    file: Option<PathBuf>,

    /// Inline JSON document
    #[arg(long)]
    json: Option<String>,

    /// Name of the document's root node
    #[arg(long, default_value = DEFAULT_ROOT_NAME)]
    root_name: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let query =
        Query::parse(&cli.query).with_context(|| format!("invalid query '{}'", cli.query))?;

    let text = match (&cli.file, &cli.json) {
        (Some(path), _) => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display()))?,
        (None, Some(inline)) => inline.clone(),
        (None, None) => anyhow::bail!("either --file or --json is required"),
    };

    clear_warnings();
    let tree = JsonTree::parse(&cli.root_name, &text)?;
    let matches = query.select(&tree, &tree.root_node())?;

    let reports = matches
        .iter()
        .map(|&id| MatchReport::describe(&tree, id))
        .collect::<Result<Vec<_>, _>>()?;

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&reports)?),
        OutputFormat::Text => {
            if reports.is_empty() {
                eprintln!("no matches for '{query}'");
            }
            for report in &reports {
                println!("{}", report.to_line(!cli.no_color));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_inline_json_args() {
        let cli = Cli::try_parse_from(["arbor", ":empty", "--json", "{}", "--format", "json"])
            .unwrap();
        assert_eq!(cli.query, ":empty");
        assert_eq!(cli.json.as_deref(), Some("{}"));
        assert_eq!(cli.format, OutputFormat::Json);
        assert_eq!(cli.root_name, "root");
    }

    #[test]
    fn test_file_and_json_conflict() {
        assert!(
            Cli::try_parse_from(["arbor", ":root", "--file", "a.json", "--json", "{}"]).is_err()
        );
        assert!(Cli::try_parse_from(["arbor", ":root"]).is_err());
    }
}
