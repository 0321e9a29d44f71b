//! Result Model
//!
//! The record shape exchanged with the search backend, plus the repository
//! descriptor used to build source links.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::error::LoadError;

/// One matched line returned by a search
///
/// Field names are the JSON contract with the backend and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Project-relative path, '/' separated
    pub path: String,
    /// 1-indexed line number
    pub line: u64,
    /// The full line of source text
    pub content: String,
    /// Start of the matched span (byte offset into `content`)
    pub start: u64,
    /// End of the matched span, exclusive
    pub end: u64,
}

impl ResultRecord {
    pub fn new(
        path: impl Into<String>,
        line: u64,
        content: impl Into<String>,
        start: u64,
        end: u64,
    ) -> Self {
        Self {
            path: path.into(),
            line,
            content: content.into(),
            start,
            end,
        }
    }

    /// Check `line >= 1` and `0 <= start <= end <= len(content)`
    pub fn validate(&self) -> Result<(), LoadError> {
        if self.line == 0 {
            return Err(LoadError::InvalidLine {
                path: self.path.clone(),
            });
        }
        let len = self.content.len() as u64;
        if self.start > self.end || self.end > len {
            return Err(LoadError::InvalidSpan {
                path: self.path.clone(),
                line: self.line,
                start: self.start,
                end: self.end,
                len,
            });
        }
        Ok(())
    }

    /// The matched text, if the span falls on char boundaries
    pub fn matched_text(&self) -> Option<&str> {
        self.content.get(self.start as usize..self.end as usize)
    }

    /// First path segment (the project name for multi-project searches)
    pub fn project_name(&self) -> Option<&str> {
        self.path.split('/').find(|s| !s.is_empty())
    }
}

static HTTPS_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https?://(?P<company>github)\.com/(?P<owner>[\w.-]+)/(?P<name>[^\s/]+?)/?$")
        .expect("Invalid HTTPS_RE regex")
});

static SSH_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^git@(?P<company>github)\.com:(?P<owner>[\w.-]+)/(?P<name>[^\s/]+?)/?$")
        .expect("Invalid SSH_RE regex")
});

/// A registered hosted repository
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub url: String,
    pub company: String,
    pub owner: String,
    pub name: String,
}

impl Project {
    /// Parse an https or ssh GitHub remote URL
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim();
        let caps = HTTPS_RE.captures(url).or_else(|| SSH_RE.captures(url))?;
        let name = caps["name"].trim_end_matches(".git");
        if name.is_empty() {
            return None;
        }
        Some(Self {
            url: url.to_string(),
            company: caps["company"].to_string(),
            owner: caps["owner"].to_string(),
            name: name.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_deserialize_contract() {
        let json = r#"{"path":"a/b.go","line":3,"content":"let x = 1;","start":4,"end":5}"#;
        let record: ResultRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.path, "a/b.go");
        assert_eq!(record.line, 3);
        assert_eq!(record.matched_text(), Some("x"));
    }

    #[test]
    fn test_record_serialize_field_names() {
        let record = ResultRecord::new("src/main.rs", 1, "fn main() {}", 3, 7);
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"path":"src/main.rs","line":1,"content":"fn main() {}","start":3,"end":7}"#
        );
    }

    #[test]
    fn test_validate_accepts_empty_span_at_end() {
        let record = ResultRecord::new("a.rs", 1, "abc", 3, 3);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_span_past_content() {
        let record = ResultRecord::new("a.rs", 1, "abc", 1, 4);
        assert!(matches!(
            record.validate(),
            Err(LoadError::InvalidSpan { len: 3, .. })
        ));
    }

    #[test]
    fn test_validate_rejects_inverted_span() {
        let record = ResultRecord::new("a.rs", 1, "abc", 2, 1);
        assert!(record.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_line_zero() {
        let record = ResultRecord::new("a.rs", 0, "abc", 0, 1);
        assert!(matches!(record.validate(), Err(LoadError::InvalidLine { .. })));
    }

    #[test]
    fn test_project_name() {
        let record = ResultRecord::new("/mise/src/main.rs", 1, "x", 0, 1);
        assert_eq!(record.project_name(), Some("mise"));
    }

    #[test]
    fn test_project_parse_https() {
        let project = Project::parse("https://github.com/rust-lang/cargo.git").unwrap();
        assert_eq!(project.company, "github");
        assert_eq!(project.owner, "rust-lang");
        assert_eq!(project.name, "cargo");
    }

    #[test]
    fn test_project_parse_ssh() {
        let project = Project::parse("git@github.com:BurntSushi/ripgrep").unwrap();
        assert_eq!(project.owner, "BurntSushi");
        assert_eq!(project.name, "ripgrep");
    }

    #[test]
    fn test_project_parse_rejects_other_hosts() {
        assert!(Project::parse("https://example.com/a/b").is_none());
        assert!(Project::parse("not a url").is_none());
    }
}
