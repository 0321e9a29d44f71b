//! Core module - The result-indexing engine and its data model
//!
//! This module provides:
//! - Result model (ResultRecord, Project)
//! - Path tree index
//! - Filter set
//! - Pagination
//! - Search result store tying the above together
//! - Source links and rendering of store views

pub mod error;
pub mod filter;
pub mod links;
pub mod model;
pub mod paginate;
pub mod render;
pub mod store;
pub mod tree;
