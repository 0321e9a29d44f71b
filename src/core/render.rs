//! Renderer module
//!
//! Renders the store's views (pages, trees, filters, summaries) to the
//! output formats: jsonl, json, md, raw

use colored::{Color, Colorize};
use serde::Serialize;
use std::io::Write;

use crate::core::model::{Project, ResultRecord};
use crate::core::store::{SearchResultStore, SessionSummary};
use crate::core::tree::TreeNode;

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jsonl,
    Json,
    Markdown,
    Raw,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jsonl" => Ok(OutputFormat::Jsonl),
            "json" => Ok(OutputFormat::Json),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "raw" => Ok(OutputFormat::Raw),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

/// Which view of the session to print
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    /// Records on the active page
    #[default]
    Page,
    /// Tree of all result paths
    Tree,
    /// Tree of the filtered result paths
    FilteredTree,
    /// Active filter entries
    Filters,
    /// Session counts
    Summary,
    /// Hosted-viewer links for the active page
    Links,
}

impl std::str::FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "page" => Ok(View::Page),
            "tree" => Ok(View::Tree),
            "filtered-tree" | "filtered_tree" => Ok(View::FilteredTree),
            "filters" => Ok(View::Filters),
            "summary" => Ok(View::Summary),
            "links" => Ok(View::Links),
            _ => Err(format!("Unknown view: {}", s)),
        }
    }
}

/// Render configuration combining format and options
#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub format: OutputFormat,
    pub pretty: bool,
    pub color: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: false,
            color: true,
        }
    }
}

impl RenderConfig {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_pretty(format: OutputFormat, pretty: bool) -> Self {
        Self {
            format,
            pretty,
            ..Default::default()
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Error entry emitted in place of a view
#[derive(Debug, Clone, Serialize)]
pub struct ErrorItem {
    pub code: String,
    pub message: String,
}

impl ErrorItem {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Flattened tree node for line-oriented output
#[derive(Debug, Serialize)]
struct TreeLine<'a> {
    depth: usize,
    path: &'a str,
    segment: &'a str,
    leaf: bool,
    result: bool,
}

/// Record paired with its hosted-viewer link
#[derive(Debug, Serialize)]
struct LinkLine<'a> {
    path: &'a str,
    line: u64,
    url: Option<String>,
}

const DEPTH_COLORS: [Color; 6] = [
    Color::BrightBlue,
    Color::BrightGreen,
    Color::BrightYellow,
    Color::BrightMagenta,
    Color::BrightCyan,
    Color::BrightRed,
];

/// Renderer for store views
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            config: RenderConfig::new(format),
        }
    }

    pub fn with_config(config: RenderConfig) -> Self {
        Self { config }
    }

    /// Render one view of the store
    pub fn render_view(
        &self,
        store: &SearchResultStore,
        view: View,
        projects: &[Project],
    ) -> String {
        match view {
            View::Page => {
                if let Some(empty) = store.empty_state() {
                    if self.config.format == OutputFormat::Markdown {
                        return format!("# {}\n", empty.message());
                    }
                }
                self.render_records(store.active_page_records(), store)
            }
            View::Tree => self.render_tree(store.full_tree()),
            View::FilteredTree => self.render_tree(store.filtered_tree()),
            View::Filters => self.render_filters(store.filters()),
            View::Summary => self.render_summary(&store.summary()),
            View::Links => self.render_links(store.active_page_records(), projects),
        }
    }

    /// Render to a writer
    pub fn render_to<W: Write>(
        &self,
        store: &SearchResultStore,
        view: View,
        projects: &[Project],
        mut writer: W,
    ) -> std::io::Result<()> {
        let output = self.render_view(store, view, projects);
        if output.is_empty() {
            return Ok(());
        }
        writeln!(writer, "{}", output)
    }

    fn to_json<T: Serialize + ?Sized>(&self, value: &T) -> String {
        let encoded = if self.config.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        encoded.unwrap_or_default()
    }

    fn jsonl<T: Serialize>(&self, items: impl IntoIterator<Item = T>) -> String {
        items
            .into_iter()
            .map(|item| self.to_json(&item))
            .collect::<Vec<_>>()
            .join(if self.config.pretty { "\n\n" } else { "\n" })
    }

    pub fn render_records(&self, records: &[ResultRecord], store: &SearchResultStore) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(records),
            OutputFormat::Json => self.to_json(records),
            OutputFormat::Markdown => {
                let mut output = format!(
                    "## Page {} of {}\n\n",
                    store.active_page_index() + 1,
                    store.page_count().max(1)
                );
                for record in records {
                    output.push_str(&format!("### `{}` (line {})\n\n", record.path, record.line));
                    output.push_str("```\n");
                    output.push_str(&record.content);
                    output.push_str("\n```\n\n");
                }
                output
            }
            OutputFormat::Raw => records
                .iter()
                .map(|r| format!("{}:{}:{}", r.path, r.line, self.highlight(r)))
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    // Offsets that split a char are shown without emphasis
    fn highlight(&self, record: &ResultRecord) -> String {
        let start = record.start as usize;
        let end = record.end as usize;
        match (
            record.content.get(..start),
            record.content.get(start..end),
            record.content.get(end..),
        ) {
            (Some(pre), Some(hit), Some(post)) if self.config.color && !hit.is_empty() => {
                format!("{}{}{}", pre, hit.red().bold(), post)
            }
            _ => record.content.clone(),
        }
    }

    pub fn render_tree(&self, tree: &TreeNode) -> String {
        match self.config.format {
            OutputFormat::Json => self.to_json(tree),
            OutputFormat::Jsonl => {
                let entries = tree.walk();
                self.jsonl(entries.iter().map(|e| TreeLine {
                    depth: e.depth,
                    path: &e.filter_path,
                    segment: e.segment,
                    leaf: e.node.is_leaf(),
                    result: e.node.is_result,
                }))
            }
            OutputFormat::Markdown => {
                let mut output = String::new();
                for entry in tree.walk() {
                    let indent = "  ".repeat(entry.depth);
                    if entry.node.is_result {
                        output.push_str(&format!("{}- **{}**\n", indent, entry.segment));
                    } else {
                        output.push_str(&format!("{}- {}/\n", indent, entry.segment));
                    }
                }
                output
            }
            OutputFormat::Raw => {
                let mut lines = Vec::new();
                render_ascii(tree, "", &mut lines, 0, self.config.color);
                lines.join("\n")
            }
        }
    }

    pub fn render_filters(&self, filters: &[String]) -> String {
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(filters),
            OutputFormat::Json => self.to_json(filters),
            OutputFormat::Markdown => {
                if filters.is_empty() {
                    return "_No filters_\n".to_string();
                }
                let mut output = String::from("## Filters\n\n");
                for filter in filters {
                    output.push_str(&format!("- `{}`\n", filter));
                }
                output
            }
            OutputFormat::Raw => filters.join("\n"),
        }
    }

    pub fn render_summary(&self, summary: &SessionSummary) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.to_json(summary),
            OutputFormat::Markdown => {
                let mut output = String::from("## Session\n\n");
                if let Some(pattern) = &summary.pattern {
                    output.push_str(&format!("- Pattern: `{}`\n", pattern));
                }
                output.push_str(&format!(
                    "- Results: {} in {} files ({} after filters)\n",
                    summary.total, summary.distinct_paths, summary.filtered
                ));
                output.push_str(&format!("- Filters: {}\n", summary.filters.len()));
                output.push_str(&format!(
                    "- Page: {} of {} (size {})\n",
                    summary.active_page + 1,
                    summary.page_count.max(1),
                    summary.page_size
                ));
                output
            }
            OutputFormat::Raw => format!(
                "{} results, {} filtered, page {}/{}",
                summary.total,
                summary.filtered,
                summary.active_page + 1,
                summary.page_count.max(1)
            ),
        }
    }

    pub fn render_links(&self, records: &[ResultRecord], projects: &[Project]) -> String {
        let links: Vec<LinkLine> = records
            .iter()
            .map(|r| LinkLine {
                path: &r.path,
                line: r.line,
                url: crate::core::links::source_url(r, projects),
            })
            .collect();
        match self.config.format {
            OutputFormat::Jsonl => self.jsonl(&links),
            OutputFormat::Json => self.to_json(&links),
            OutputFormat::Markdown => {
                let mut output = String::new();
                for link in &links {
                    match &link.url {
                        Some(url) => output
                            .push_str(&format!("- [{}:{}]({})\n", link.path, link.line, url)),
                        None => output.push_str(&format!("- {}:{}\n", link.path, link.line)),
                    }
                }
                output
            }
            OutputFormat::Raw => links
                .iter()
                .filter_map(|l| l.url.clone())
                .collect::<Vec<_>>()
                .join("\n"),
        }
    }

    pub fn render_error(&self, error: &ErrorItem) -> String {
        match self.config.format {
            OutputFormat::Jsonl | OutputFormat::Json => self.to_json(&serde_json::json!({
                "kind": "error",
                "code": error.code,
                "message": error.message,
            })),
            OutputFormat::Markdown => format!("- **{}**: {}\n", error.code, error.message),
            OutputFormat::Raw => format!("error[{}]: {}", error.code, error.message),
        }
    }
}

fn render_ascii(node: &TreeNode, prefix: &str, lines: &mut Vec<String>, depth: usize, color: bool) {
    let count = node.children.len();
    for (i, (segment, child)) in node.children.iter().enumerate() {
        let last = i + 1 == count;
        let branch = if last { "└── " } else { "├── " };
        let label = if color && child.is_result {
            segment
                .color(DEPTH_COLORS[depth % DEPTH_COLORS.len()])
                .to_string()
        } else {
            segment.clone()
        };
        lines.push(format!("{}{}{}", prefix, branch, label));
        let next = format!("{}{}", prefix, if last { "    " } else { "│   " });
        render_ascii(child, &next, lines, depth + 1, color);
    }
}
