//! One-shot view of a session
//!
//! Loads a result list, replays the requested filters and page selection
//! through the store, and prints a single view.

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::backends::records::{load, InputFormat};
use crate::core::model::Project;
use crate::core::paginate::PageSize;
use crate::core::render::{RenderConfig, Renderer, View};
use crate::core::store::{SearchResultStore, StoreConfig};

#[derive(Debug, Clone)]
pub struct ViewOptions {
    pub input: PathBuf,
    pub input_format: InputFormat,
    pub pattern: Option<String>,
    pub filters: Vec<String>,
    pub page: usize,
    pub page_size: PageSize,
    pub show: View,
    pub projects: Vec<Project>,
}

/// Build the session described by `options`
pub fn build_session(options: &ViewOptions) -> Result<SearchResultStore> {
    let records = load(&options.input, options.input_format)
        .with_context(|| format!("failed to load {}", options.input.display()))?;
    info!(records = records.len(), input = %options.input.display(), "loaded result list");

    let mut store = SearchResultStore::new(StoreConfig {
        page_size: options.page_size,
    });
    store.begin_search(options.pattern.clone().unwrap_or_default());
    store.submit_results(records);
    for filter in &options.filters {
        store.add_filter(filter.as_str());
    }
    store.set_active_page(options.page);
    Ok(store)
}

/// Run the view command
pub fn run_view(options: ViewOptions, render_config: RenderConfig) -> Result<()> {
    let store = build_session(&options)?;
    let renderer = Renderer::with_config(render_config);
    let stdout = std::io::stdout();
    renderer.render_to(&store, options.show, &options.projects, stdout.lock())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write as _;

    fn write_results(dir: &std::path::Path, n: usize) -> PathBuf {
        let mut text = String::new();
        for i in 0..n {
            let _ = writeln!(
                text,
                r#"{{"path":"pkg{}/file{}.go","line":{},"content":"match here","start":0,"end":5}}"#,
                i % 2,
                i,
                i + 1
            );
        }
        let path = dir.join("results.jsonl");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn options(input: PathBuf) -> ViewOptions {
        ViewOptions {
            input,
            input_format: InputFormat::Records,
            pattern: Some("match".to_string()),
            filters: Vec::new(),
            page: 0,
            page_size: PageSize::default(),
            show: View::Page,
            projects: Vec::new(),
        }
    }

    #[test]
    fn test_build_session_pages() {
        let temp = tempfile::tempdir().unwrap();
        let mut opts = options(write_results(temp.path(), 120));
        opts.page = 9;
        let store = build_session(&opts).unwrap();
        assert_eq!(store.page_count(), 3);
        assert_eq!(store.active_page_index(), 2);
        assert_eq!(store.pattern(), Some("match"));
    }

    #[test]
    fn test_build_session_filters_then_page() {
        let temp = tempfile::tempdir().unwrap();
        let mut opts = options(write_results(temp.path(), 120));
        opts.filters = vec!["/pkg1".to_string()];
        opts.page = 1;
        let store = build_session(&opts).unwrap();
        assert_eq!(store.filtered().len(), 60);
        assert_eq!(store.active_page_index(), 1);
        assert_eq!(store.active_page_records().len(), 10);
    }

    #[test]
    fn test_build_session_missing_input() {
        let opts = options(PathBuf::from("/no/such/results.json"));
        let err = build_session(&opts).unwrap_err();
        assert!(err.to_string().contains("failed to load"));
    }
}
