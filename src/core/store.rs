//! Search result store
//!
//! Owns the result list of the current search and keeps the derived views
//! (full tree, filtered subset, filtered tree, pages) in step with it.
//! Every mutating entry point recomputes what it invalidates before
//! returning, so readers always see a consistent snapshot.

use serde::Serialize;
use std::ops::Range;
use tracing::{debug, info};

use crate::core::filter::FilterSet;
use crate::core::model::ResultRecord;
use crate::core::paginate::{paginate, PageSize};
use crate::core::tree::{build_tree, TreeNode};

/// Lifecycle of a search session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    #[default]
    Idle,
    Loading,
    Ready,
}

/// Why there is nothing to show, if that is the case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyState {
    /// No search has been submitted yet
    Fresh,
    /// A search ran and returned zero records
    NoResults,
}

impl EmptyState {
    pub fn message(self) -> &'static str {
        match self {
            EmptyState::Fresh => "Search away!",
            EmptyState::NoResults => "Couldn't find anything... Sorry!",
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StoreConfig {
    pub page_size: PageSize,
}

/// Counts describing the current session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    pub state: SessionState,
    pub pattern: Option<String>,
    pub fresh: bool,
    pub total: usize,
    pub distinct_paths: usize,
    pub filtered: usize,
    pub filters: Vec<String>,
    pub page_size: usize,
    pub page_count: usize,
    pub active_page: usize,
    pub active_page_len: usize,
}

#[derive(Debug)]
pub struct SearchResultStore {
    config: StoreConfig,
    state: SessionState,
    pattern: Option<String>,
    fresh: bool,
    results: Vec<ResultRecord>,
    filters: FilterSet,
    full_tree: TreeNode,
    filtered: Vec<ResultRecord>,
    filtered_tree: TreeNode,
    page_ranges: Vec<Range<usize>>,
    active_page: usize,
}

impl Default for SearchResultStore {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

impl SearchResultStore {
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            state: SessionState::Idle,
            pattern: None,
            fresh: true,
            results: Vec::new(),
            filters: FilterSet::new(),
            full_tree: TreeNode::new(),
            filtered: Vec::new(),
            filtered_tree: TreeNode::new(),
            page_ranges: Vec::new(),
            active_page: 0,
        }
    }

    /// Start a new search: `Idle/Ready -> Loading`
    ///
    /// Drops the previous session's results, filters and derived views.
    pub fn begin_search(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        info!(pattern = %pattern, from = ?self.state, "search submitted");
        self.reset();
        self.pattern = Some(pattern);
        self.state = SessionState::Loading;
    }

    /// Results arrived: `Loading -> Ready`
    ///
    /// From `Idle` or `Ready` this first discards the prior session.
    pub fn submit_results(&mut self, records: Vec<ResultRecord>) {
        if self.state != SessionState::Loading {
            let pattern = self.pattern.take().unwrap_or_default();
            self.begin_search(pattern);
        }
        info!(records = records.len(), "results submitted");
        self.results = records;
        self.full_tree = build_tree(&self.results);
        self.state = SessionState::Ready;
        self.recompute_filtered();
    }

    pub fn add_filter(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!(entry = %entry, "filter added");
        self.filters.add(entry);
        self.on_filters_changed();
    }

    pub fn remove_filter(&mut self, entry: &str) {
        if self.filters.remove(entry) {
            debug!(entry, "filter removed");
            self.on_filters_changed();
        }
    }

    pub fn clear_filters(&mut self) {
        if self.filters.clear() {
            debug!("filters cleared");
            self.on_filters_changed();
        }
    }

    /// Select a page, clamping to the valid range
    pub fn set_active_page(&mut self, index: usize) {
        let last = self.page_ranges.len().saturating_sub(1);
        self.active_page = index.min(last);
        if self.active_page != index {
            debug!(requested = index, active = self.active_page, "page clamped");
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> StoreConfig {
        self.config
    }

    pub fn pattern(&self) -> Option<&str> {
        self.pattern.as_deref()
    }

    /// True until the first search is submitted
    pub fn is_fresh(&self) -> bool {
        self.fresh
    }

    pub fn results(&self) -> &[ResultRecord] {
        &self.results
    }

    pub fn full_tree(&self) -> &TreeNode {
        &self.full_tree
    }

    pub fn filtered_tree(&self) -> &TreeNode {
        &self.filtered_tree
    }

    pub fn filters(&self) -> &[String] {
        self.filters.entries()
    }

    pub fn filtered(&self) -> &[ResultRecord] {
        &self.filtered
    }

    pub fn pages(&self) -> Vec<&[ResultRecord]> {
        self.page_ranges
            .iter()
            .map(|range| &self.filtered[range.clone()])
            .collect()
    }

    pub fn page(&self, index: usize) -> Option<&[ResultRecord]> {
        self.page_ranges
            .get(index)
            .map(|range| &self.filtered[range.clone()])
    }

    pub fn page_count(&self) -> usize {
        self.page_ranges.len()
    }

    pub fn active_page_index(&self) -> usize {
        self.active_page
    }

    /// Records on the active page, empty when there are no pages
    pub fn active_page_records(&self) -> &[ResultRecord] {
        self.page(self.active_page).unwrap_or(&[])
    }

    pub fn empty_state(&self) -> Option<EmptyState> {
        if self.fresh {
            Some(EmptyState::Fresh)
        } else if self.state == SessionState::Ready && self.results.is_empty() {
            Some(EmptyState::NoResults)
        } else {
            None
        }
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            state: self.state,
            pattern: self.pattern.clone(),
            fresh: self.fresh,
            total: self.results.len(),
            distinct_paths: self.full_tree.result_count(),
            filtered: self.filtered.len(),
            filters: self.filters.entries().to_vec(),
            page_size: self.config.page_size.get(),
            page_count: self.page_count(),
            active_page: self.active_page,
            active_page_len: self.active_page_records().len(),
        }
    }

    fn reset(&mut self) {
        self.fresh = false;
        self.results.clear();
        self.filters.clear();
        self.full_tree = TreeNode::default();
        self.filtered.clear();
        self.filtered_tree = TreeNode::default();
        self.page_ranges.clear();
        self.active_page = 0;
    }

    fn on_filters_changed(&mut self) {
        if self.state == SessionState::Ready {
            self.recompute_filtered();
        }
    }

    // filters -> filtered subset -> filtered tree + pages; active page back to 0
    fn recompute_filtered(&mut self) {
        self.filtered = self.filters.apply(&self.results);
        self.filtered_tree = build_tree(&self.filtered);

        let page_size = self.config.page_size.get();
        let mut offset = 0;
        self.page_ranges = paginate(&self.filtered, self.config.page_size)
            .into_iter()
            .map(|page| {
                let range = offset..offset + page.len();
                offset += page_size;
                range
            })
            .collect();
        self.active_page = 0;

        debug!(
            total = self.results.len(),
            filtered = self.filtered.len(),
            filters = self.filters.len(),
            pages = self.page_ranges.len(),
            "derived views recomputed"
        );
    }
}
