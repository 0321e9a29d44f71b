//! grepdeck - organize, filter and paginate code-search results
//!
//! grepdeck provides:
//! - A path tree index built from a flat result list
//! - An ordered filter set narrowing results by path fragment
//! - Fixed-size pagination over the filtered results
//! - A store that keeps all derived views consistent across searches,
//!   filter changes and page selection

pub mod backends;
pub mod cli;
pub mod core;
pub mod flows;

pub use crate::core::filter::FilterSet;
pub use crate::core::model::{Project, ResultRecord};
pub use crate::core::paginate::{paginate, PageSize, DEFAULT_PAGE_SIZE};
pub use crate::core::store::{EmptyState, SearchResultStore, SessionState, StoreConfig};
pub use crate::core::tree::{build_tree, TreeNode};
