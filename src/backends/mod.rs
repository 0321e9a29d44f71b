//! Backends module - Result list sources
//!
//! Provides:
//! - records: JSON / JSON Lines result lists
//! - rg: `rg --json` event streams

pub mod records;
pub mod rg;
