//! CLI module - Command-line interface definitions and handlers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::backends::records::InputFormat;
use crate::core::model::Project;
use crate::core::paginate::PageSize;
use crate::core::render::{OutputFormat, RenderConfig, View};
use crate::flows::shell::ShellOptions;
use crate::flows::view::ViewOptions;

/// grepdeck - browse a code-search result list as a path tree, filtered and paged.
#[derive(Parser, Debug)]
#[command(name = "grepdeck")]
#[command(
    author,
    version,
    about,
    long_about = r#"grepdeck organizes an already-fetched list of search matches
(records of {path, line, content, start, end}) into a path tree, narrows it
with path filters, and splits it into fixed-size pages.

It never runs a search itself: feed it the backend's JSON result list or the
output of `rg --json`.

Output formats:
- jsonl: one JSON object per line (default)
- json: a single JSON document
- md: human-friendly Markdown
- raw: plain text (ASCII tree, path:line:content)

Examples:
    grepdeck view results.json --show tree --format raw
    rg --json TODO | grepdeck view --input-format rg --filter /src --page 1
    grepdeck shell results.json --script session.txt
"#
)]
pub struct Cli {
    /// Output format (jsonl/json/md/raw).
    #[arg(long, global = true, default_value = "jsonl", value_name = "FORMAT")]
    pub format: OutputFormat,

    /// Disable colored output (when applicable).
    #[arg(
        long,
        global = true,
        long_help = "Disable colored output. Colors are only used by the raw format\n\
(matched spans and result nodes in the ASCII tree)."
    )]
    pub no_color: bool,

    /// Quiet mode (errors only on stderr).
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode (debug diagnostics on stderr).
    #[arg(
        short,
        long,
        global = true,
        long_help = "Log store transitions and recomputations at debug level on stderr.\n\
RUST_LOG, when set, takes precedence."
    )]
    pub verbose: bool,

    /// Pretty-print JSON/JSONL output with indentation.
    #[arg(long, global = true)]
    pub pretty: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Load a result list, apply filters, and print one view.
    #[command(
        long_about = r#"Load a result list, apply the given filters in order, select a page and
print one view of the resulting session.

Examples:
    grepdeck view results.json
    grepdeck view results.json --filter /src/core --show filtered-tree
    grepdeck view results.json --page 2 --page-size 20
    grepdeck view results.json --show links --project https://github.com/owner/repo
"#
    )]
    View {
        /// Result list file, or '-' for stdin.
        #[arg(value_name = "INPUT", default_value = "-")]
        input: PathBuf,

        /// Input encoding (records/rg).
        #[arg(
            long,
            default_value = "records",
            value_name = "FORMAT",
            long_help = "Input encoding.\n\n\
Supported values:\n\
- records (default): JSON array of records, or JSON Lines\n\
- rg: the event stream printed by `rg --json`"
        )]
        input_format: InputFormat,

        /// Pattern the results were produced for (informational).
        #[arg(long, value_name = "PATTERN")]
        pattern: Option<String>,

        /// Path filter entry; repeat for OR.
        #[arg(
            long = "filter",
            value_name = "ENTRY",
            long_help = "Keep records whose path contains ENTRY (one leading '/' is ignored).\n\
Repeat the flag to keep records matching any of the entries."
        )]
        filters: Vec<String>,

        /// Page to show (0-based, clamped to the last page).
        #[arg(long, default_value = "0", value_name = "N")]
        page: usize,

        /// Records per page.
        #[arg(
            long,
            env = "GREPDECK_PAGE_SIZE",
            default_value = "50",
            value_name = "N"
        )]
        page_size: PageSize,

        /// View to print (page/tree/filtered-tree/filters/summary/links).
        #[arg(long, default_value = "page", value_name = "VIEW")]
        show: View,

        /// Hosted repository URL used for links; repeatable.
        #[arg(long = "project", value_name = "URL")]
        projects: Vec<String>,
    },

    /// Run a scripted browsing session against one store.
    #[command(
        long_about = r#"Run browsing commands line by line against a single session, the way an
interactive front end would drive it.

Commands:
    search <pattern>       start a new search (clears filters and results)
    load [FILE]            submit results from FILE (default: INPUT)
    filter add <entry>     add a path filter
    filter rm <entry>      remove the first matching filter
    filter clear           remove all filters
    page <n>               select a page (0-based, clamped)
    show <view>            print page/tree/filtered-tree/filters/summary/links

Blank lines and lines starting with '#' are skipped. Invalid commands are
reported as error items and the script continues.

If INPUT is given it is loaded before the script runs. The script is read
from --script, or from stdin.

Example:
    grepdeck shell results.json --script session.txt --format md
"#
    )]
    Shell {
        /// Result list loaded before the script runs.
        #[arg(value_name = "INPUT")]
        input: Option<PathBuf>,

        /// Script file (defaults to stdin).
        #[arg(long, value_name = "FILE")]
        script: Option<PathBuf>,

        /// Input encoding (records/rg).
        #[arg(long, default_value = "records", value_name = "FORMAT")]
        input_format: InputFormat,

        /// Records per page.
        #[arg(
            long,
            env = "GREPDECK_PAGE_SIZE",
            default_value = "50",
            value_name = "N"
        )]
        page_size: PageSize,

        /// Hosted repository URL used for links; repeatable.
        #[arg(long = "project", value_name = "URL")]
        projects: Vec<String>,
    },
}

/// Parse `--project` values
fn parse_projects(urls: &[String]) -> Result<Vec<Project>> {
    urls.iter()
        .map(|url| {
            Project::parse(url).with_context(|| format!("invalid project URL: {}", url))
        })
        .collect()
}

/// Run the CLI with parsed arguments
pub fn run(cli: Cli) -> Result<()> {
    if cli.no_color {
        colored::control::set_override(false);
    }
    let render_config = RenderConfig::with_pretty(cli.format, cli.pretty).with_color(!cli.no_color);

    match cli.command {
        Commands::View {
            input,
            input_format,
            pattern,
            filters,
            page,
            page_size,
            show,
            projects,
        } => crate::flows::view::run_view(
            ViewOptions {
                input,
                input_format,
                pattern,
                filters,
                page,
                page_size,
                show,
                projects: parse_projects(&projects)?,
            },
            render_config,
        ),

        Commands::Shell {
            input,
            script,
            input_format,
            page_size,
            projects,
        } => crate::flows::shell::run_shell(
            ShellOptions {
                input,
                script,
                input_format,
                page_size,
                projects: parse_projects(&projects)?,
            },
            render_config,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_view_defaults() {
        let cli = Cli::try_parse_from(["grepdeck", "view", "results.json"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Jsonl);
        match cli.command {
            Commands::View {
                input,
                page,
                page_size,
                show,
                filters,
                ..
            } => {
                assert_eq!(input, PathBuf::from("results.json"));
                assert_eq!(page, 0);
                assert_eq!(page_size.get(), 50);
                assert_eq!(show, View::Page);
                assert!(filters.is_empty());
            }
            _ => panic!("expected view"),
        }
    }

    #[test]
    fn test_parse_repeated_filters() {
        let cli = Cli::try_parse_from([
            "grepdeck", "view", "--filter", "/a", "--filter", "/b", "--format", "md",
        ])
        .unwrap();
        assert_eq!(cli.format, OutputFormat::Markdown);
        match cli.command {
            Commands::View { filters, input, .. } => {
                assert_eq!(filters, vec!["/a", "/b"]);
                assert_eq!(input, PathBuf::from("-"));
            }
            _ => panic!("expected view"),
        }
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let result = Cli::try_parse_from(["grepdeck", "view", "--page-size", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_view_rejected() {
        let result = Cli::try_parse_from(["grepdeck", "view", "--show", "graph"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_projects() {
        let projects = parse_projects(&["https://github.com/a/b".to_string()]).unwrap();
        assert_eq!(projects[0].name, "b");
        assert!(parse_projects(&["ftp://nowhere".to_string()]).is_err());
    }
}
