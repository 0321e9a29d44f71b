//! Scripted browsing session
//!
//! Drives a single store through a sequence of commands, one per line, the
//! same way a front end would: searches, result loads, filter edits and page
//! selection, printing views on `show`.

use anyhow::{Context, Result};
use std::io::{Read, Write};
use std::path::PathBuf;
use tracing::{debug, warn};

use crate::backends::records::{load, InputFormat};
use crate::core::model::Project;
use crate::core::paginate::PageSize;
use crate::core::render::{ErrorItem, RenderConfig, Renderer, View};
use crate::core::store::{SearchResultStore, StoreConfig};

#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub input: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub input_format: InputFormat,
    pub page_size: PageSize,
    pub projects: Vec<Project>,
}

/// One script line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Search(String),
    Load(Option<PathBuf>),
    FilterAdd(String),
    FilterRemove(String),
    FilterClear,
    Page(usize),
    Show(View),
}

/// Parse a script line. `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, ErrorItem> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word {
        "search" => ShellCommand::Search(rest.to_string()),
        "load" if rest.is_empty() => ShellCommand::Load(None),
        "load" => ShellCommand::Load(Some(PathBuf::from(rest))),
        "filter" => {
            let (action, entry) = match rest.split_once(char::is_whitespace) {
                Some((action, entry)) => (action, entry.trim()),
                None => (rest, ""),
            };
            match (action, entry) {
                ("clear", "") => ShellCommand::FilterClear,
                ("add", entry) if !entry.is_empty() => ShellCommand::FilterAdd(entry.to_string()),
                ("rm" | "remove", entry) if !entry.is_empty() => {
                    ShellCommand::FilterRemove(entry.to_string())
                }
                _ => {
                    return Err(ErrorItem::new(
                        "INVALID_FILTER_COMMAND",
                        format!("expected 'filter add|rm <entry>' or 'filter clear': {}", line),
                    ))
                }
            }
        }
        "page" => {
            let index = rest.parse::<usize>().map_err(|_| {
                ErrorItem::new("INVALID_PAGE", format!("not a page index: '{}'", rest))
            })?;
            ShellCommand::Page(index)
        }
        "show" => {
            let view = if rest.is_empty() {
                View::Page
            } else {
                rest.parse::<View>()
                    .map_err(|e| ErrorItem::new("UNKNOWN_VIEW", e))?
            };
            ShellCommand::Show(view)
        }
        other => {
            return Err(ErrorItem::new(
                "UNKNOWN_COMMAND",
                format!("unknown command: {}", other),
            ))
        }
    };
    Ok(Some(command))
}

/// A store plus the context needed to execute script commands
pub struct Session {
    pub store: SearchResultStore,
    input: Option<PathBuf>,
    input_format: InputFormat,
    projects: Vec<Project>,
    renderer: Renderer,
}

impl Session {
    pub fn new(options: &ShellOptions, render_config: RenderConfig) -> Self {
        Self {
            store: SearchResultStore::new(StoreConfig {
                page_size: options.page_size,
            }),
            input: options.input.clone(),
            input_format: options.input_format,
            projects: options.projects.clone(),
            renderer: Renderer::with_config(render_config),
        }
    }

    /// Execute one command, returning text to print (if any)
    pub fn execute(&mut self, command: ShellCommand) -> Result<Option<String>, ErrorItem> {
        debug!(?command, "executing");
        match command {
            ShellCommand::Search(pattern) => self.store.begin_search(pattern),
            ShellCommand::Load(path) => {
                let path = path.or_else(|| self.input.clone()).ok_or_else(|| {
                    ErrorItem::new("NO_INPUT", "load without a file needs an INPUT argument")
                })?;
                let records = load(&path, self.input_format).map_err(|e| {
                    ErrorItem::new(e.code(), format!("{}: {}", path.display(), e))
                })?;
                self.store.submit_results(records);
            }
            ShellCommand::FilterAdd(entry) => self.store.add_filter(entry),
            ShellCommand::FilterRemove(entry) => self.store.remove_filter(&entry),
            ShellCommand::FilterClear => self.store.clear_filters(),
            ShellCommand::Page(index) => self.store.set_active_page(index),
            ShellCommand::Show(view) => {
                let output = self.renderer.render_view(&self.store, view, &self.projects);
                return Ok(Some(output));
            }
        }
        Ok(None)
    }

    /// Run every line of `script`, writing views and error items to `out`
    pub fn run_script<W: Write>(&mut self, script: &str, mut out: W) -> std::io::Result<usize> {
        let mut failures = 0;
        for (index, line) in script.lines().enumerate() {
            let result = parse_line(line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(None),
            });
            match result {
                Ok(Some(output)) if !output.is_empty() => writeln!(out, "{}", output)?,
                Ok(_) => {}
                Err(error) => {
                    warn!(line = index + 1, code = %error.code, "script command failed");
                    failures += 1;
                    writeln!(out, "{}", self.renderer.render_error(&error))?;
                }
            }
        }
        Ok(failures)
    }
}

/// Run the shell command
pub fn run_shell(options: ShellOptions, render_config: RenderConfig) -> Result<()> {
    let script = match &options.script {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read script {}", path.display()))?,
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("failed to read script from stdin")?;
            text
        }
    };

    let mut session = Session::new(&options, render_config);
    if let Some(input) = &options.input {
        let records = load(input, options.input_format)
            .with_context(|| format!("failed to load {}", input.display()))?;
        session.store.submit_results(records);
    }

    let stdout = std::io::stdout();
    let failures = session.run_script(&script, stdout.lock())?;
    if failures > 0 {
        debug!(failures, "script finished with errors");
    }
    Ok(())
}
