//! Pagination
//!
//! Splits an ordered sequence into contiguous fixed-size pages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::core::error::ConfigError;

pub const DEFAULT_PAGE_SIZE: usize = 50;

/// A page size, always greater than zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct PageSize(NonZeroUsize);

impl PageSize {
    pub fn new(size: usize) -> Result<Self, ConfigError> {
        NonZeroUsize::new(size)
            .map(PageSize)
            .ok_or(ConfigError::ZeroPageSize)
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl Default for PageSize {
    fn default() -> Self {
        PageSize(NonZeroUsize::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for PageSize {
    type Error = ConfigError;

    fn try_from(size: usize) -> Result<Self, Self::Error> {
        PageSize::new(size)
    }
}

impl From<PageSize> for usize {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

impl FromStr for PageSize {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let size: usize = s
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPageSize(s.to_string()))?;
        PageSize::new(size)
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of pages needed for `len` items
pub fn page_count(len: usize, page_size: PageSize) -> usize {
    len.div_ceil(page_size.get())
}

/// Split `items` into pages. Empty input gives zero pages.
pub fn paginate<T>(items: &[T], page_size: PageSize) -> Vec<&[T]> {
    items.chunks(page_size.get()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(n: usize) -> PageSize {
        PageSize::new(n).unwrap()
    }

    #[test]
    fn test_default_page_size() {
        assert_eq!(PageSize::default().get(), 50);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert_eq!(PageSize::new(0), Err(ConfigError::ZeroPageSize));
        assert_eq!("0".parse::<PageSize>(), Err(ConfigError::ZeroPageSize));
        assert!(matches!(
            "ten".parse::<PageSize>(),
            Err(ConfigError::InvalidPageSize(_))
        ));
    }

    #[test]
    fn test_empty_input_zero_pages() {
        let items: Vec<u32> = Vec::new();
        assert!(paginate(&items, size(50)).is_empty());
        assert_eq!(page_count(0, size(50)), 0);
    }

    #[test]
    fn test_sizes_120_by_50() {
        let items: Vec<u32> = (0..120).collect();
        let pages = paginate(&items, size(50));
        let lens: Vec<_> = pages.iter().map(|p| p.len()).collect();
        assert_eq!(lens, vec![50, 50, 20]);
        assert_eq!(page_count(items.len(), size(50)), 3);
    }

    #[test]
    fn test_exact_multiple_has_no_empty_tail() {
        let items: Vec<u32> = (0..100).collect();
        let pages = paginate(&items, size(50));
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.len() == 50));
    }

    #[test]
    fn test_concatenation_preserves_order() {
        let items: Vec<u32> = (0..17).collect();
        let joined: Vec<u32> = paginate(&items, size(4)).concat();
        assert_eq!(joined, items);
    }

    #[test]
    fn test_page_size_serde() {
        let parsed: PageSize = serde_json::from_str("25").unwrap();
        assert_eq!(parsed.get(), 25);
        assert!(serde_json::from_str::<PageSize>("0").is_err());
    }
}
