//! Integration tests for recovery warnings.

use tagsift_common::warning::has_warned;
use tagsift_scan::{EventCollector, ScanOptions, Scanner};

#[test]
fn test_repeated_recoveries_warn_once_per_kind() {
    let scanner = Scanner::with_options(ScanOptions::default().with_log_recoveries(true));
    for prefix in 0..50 {
        let input = format!("{}<foo", "x".repeat(prefix));
        let mut collector = EventCollector::new();
        let Ok(report) = scanner.scan(&input, &mut collector);
        assert_eq!(report.recoveries.len(), 1);
    }
    assert!(has_warned("Scanner", "unterminated-tag"));
    assert!(!has_warned("Scanner", "unterminated-tag at line 1, column 2"));
}

#[test]
fn test_default_options_do_not_warn() {
    let scanner = Scanner::new();
    let mut collector = EventCollector::new();
    let Ok(report) = scanner.scan("&#0;", &mut collector);
    assert_eq!(report.recoveries.len(), 1);
    assert!(!has_warned("Scanner", "invalid-character-reference"));
}
