//! Lenient markup scanner.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** - a single-pass lexical state machine for HTML and SGML-like
//!   markup that accepts any input and recovers from every malformation
//!   - start tags, end tags, quoted, unquoted and valueless attributes
//!   - comments, declarations, CDATA sections, processing instructions
//!   - entity and numeric character references
//!   - raw text elements such as `script`, when configured
//! - **`ScanHandler`** - the callback trait that receives the events
//! - **Entity table** - HTML 4 named entities and numeric references
//!
//! # Not Implemented
//!
//! - Tree construction, implied end tags and nesting repair
//! - Byte decoding and encoding detection
//! - DTD processing and custom entity definitions
//!
//! # Example
//!
//! ```
//! use tagsift_scan::{EventCollector, EventKind, ScanOptions, Scanner};
//!
//! let scanner = Scanner::with_options(ScanOptions::default());
//! let mut collector = EventCollector::new();
//! let Ok(report) = scanner.scan("<p class=x>Hi</p>", &mut collector);
//! assert!(report.is_clean());
//! assert_eq!(collector.events()[0].kind, EventKind::Gi);
//! ```

pub mod entities;
pub mod event;
pub mod handler;
pub mod options;
pub mod report;
pub mod scanner;

pub use entities::{lookup_entity, resolve_entity};
pub use event::{Event, EventCollector, EventKind};
pub use handler::ScanHandler;
pub use options::ScanOptions;
pub use report::{Recovery, RecoveryKind, ScanReport};
pub use scanner::{ScanState, Scanner};

/// Scan `input` and return every event it produces.
#[must_use]
pub fn collect_events(input: &str, options: ScanOptions) -> Vec<Event> {
    let mut collector = EventCollector::new();
    match Scanner::with_options(options).scan(input, &mut collector) {
        Ok(_) => collector.into_events(),
        Err(never) => match never {},
    }
}
