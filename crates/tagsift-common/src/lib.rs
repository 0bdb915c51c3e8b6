//! Common utilities for the tagsift scanner.
//!
//! This crate provides shared infrastructure used by the scanner and the CLI:
//! - **Warning System** - colored, deduplicated terminal output for recoveries
//! - **Text Positions** - line and column tracking for diagnostics

pub mod position;
pub mod warning;
