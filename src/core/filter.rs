//! Path filters
//!
//! An ordered list of user-chosen path fragments. A record passes when any
//! entry occurs in its path; an empty set passes everything.

use serde::Serialize;

use crate::core::model::ResultRecord;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FilterSet {
    entries: Vec<String>,
}

/// Strip one leading '/' (tree clicks produce "/" + segment path)
fn needle(entry: &str) -> &str {
    entry.strip_prefix('/').unwrap_or(entry)
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry. Duplicates are kept.
    pub fn add(&mut self, entry: impl Into<String>) {
        self.entries.push(entry.into());
    }

    /// Remove the first exact match. Returns whether anything was removed.
    pub fn remove(&mut self, entry: &str) -> bool {
        match self.entries.iter().position(|e| e == entry) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    /// Remove all entries. Returns whether the set was non-empty.
    pub fn clear(&mut self) -> bool {
        let had_entries = !self.entries.is_empty();
        self.entries.clear();
        had_entries
    }

    pub fn matches(&self, record: &ResultRecord) -> bool {
        self.entries.is_empty()
            || self
                .entries
                .iter()
                .any(|entry| record.path.contains(needle(entry)))
    }

    /// The matching records, in their original order
    pub fn apply(&self, records: &[ResultRecord]) -> Vec<ResultRecord> {
        records
            .iter()
            .filter(|record| self.matches(record))
            .cloned()
            .collect()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn contains(&self, entry: &str) -> bool {
        self.entries.iter().any(|e| e == entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(path: &str) -> ResultRecord {
        ResultRecord::new(path, 1, "x", 0, 1)
    }

    #[test]
    fn test_empty_set_passes_all() {
        let records = vec![rec("a/b.go"), rec("x/y.go")];
        let filters = FilterSet::new();
        assert_eq!(filters.apply(&records), records);
    }

    #[test]
    fn test_leading_slash_stripped() {
        let mut filters = FilterSet::new();
        filters.add("/a/");
        assert!(filters.matches(&rec("a/b.go")));
        assert!(!filters.matches(&rec("x/y.go")));
    }

    #[test]
    fn test_only_one_leading_slash_stripped() {
        let mut filters = FilterSet::new();
        filters.add("//a");
        assert!(!filters.matches(&rec("a/b.go")));
        assert!(filters.matches(&rec("x//a/b.go")));
    }

    #[test]
    fn test_or_semantics() {
        let mut filters = FilterSet::new();
        filters.add("/src/core");
        filters.add("/docs");
        let records = vec![rec("src/core/tree.rs"), rec("src/cli.rs"), rec("tests/cli.rs")];
        let kept = filters.apply(&records);
        assert_eq!(kept, vec![rec("src/core/tree.rs")]);
    }

    #[test]
    fn test_substring_anywhere_in_path() {
        let mut filters = FilterSet::new();
        filters.add("/core/tree.rs");
        assert!(filters.matches(&rec("mise/src/core/tree.rs")));
    }

    #[test]
    fn test_unprefixed_entry() {
        let mut filters = FilterSet::new();
        filters.add("main");
        assert!(filters.matches(&rec("src/main.rs")));
    }

    #[test]
    fn test_duplicates_and_remove_first() {
        let mut filters = FilterSet::new();
        filters.add("/a");
        filters.add("/b");
        filters.add("/a");
        assert_eq!(filters.len(), 3);
        assert!(filters.remove("/a"));
        assert_eq!(filters.entries(), &["/b".to_string(), "/a".to_string()]);
        assert!(filters.matches(&rec("a/x")));
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut filters = FilterSet::new();
        filters.add("/a");
        let before = filters.clone();
        assert!(!filters.remove("/zzz"));
        assert_eq!(filters, before);
    }

    #[test]
    fn test_clear_twice() {
        let mut filters = FilterSet::new();
        filters.add("/a");
        assert!(filters.clear());
        assert!(!filters.clear());
        assert!(filters.is_empty());
    }

    #[test]
    fn test_apply_preserves_order() {
        let mut filters = FilterSet::new();
        filters.add("/keep");
        let records = vec![rec("keep/3"), rec("drop/1"), rec("keep/1"), rec("keep/2")];
        let paths: Vec<_> = filters
            .apply(&records)
            .into_iter()
            .map(|r| r.path)
            .collect();
        assert_eq!(paths, vec!["keep/3", "keep/1", "keep/2"]);
    }
}
