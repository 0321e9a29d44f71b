//! Flows module - Command handlers driving a search session
//!
//! Provides:
//! - view: load, filter, page and print one view
//! - shell: run a script of browsing commands against one store

pub mod shell;
pub mod view;
