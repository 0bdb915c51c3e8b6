//! Helper functions for the scanner.
//!
//! This module contains utility functions used throughout the state machine:
//! - State transitions (switch, reconsume)
//! - Input handling (consume, lookahead)
//! - Event delivery and pending character data
//! - Closing or abandoning a staged tag
//! - Recording recoveries

use std::mem;

use tagsift_common::position::TextPosition;
use tagsift_common::warning::warn_once;

use super::machine::{ScanRun, ScanState};
use crate::event::EventKind;
use crate::handler::ScanHandler;
use crate::report::{Recovery, RecoveryKind};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl<H: ScanHandler> ScanRun<'_, H> {
    /// Transition to a new state. The next character is consumed on the next
    /// iteration of the main loop.
    pub(super) const fn switch_to(&mut self, new_state: ScanState) {
        self.state = new_state;
    }

    /// Transition to a new state without consuming the current character.
    /// The same character is processed again in the new state.
    pub(super) const fn reconsume_in(&mut self, new_state: ScanState) {
        self.reconsume = true;
        self.state = new_state;
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl<H: ScanHandler> ScanRun<'_, H> {
    /// Return the character at the current position and advance past it.
    /// Returns None at end of input.
    pub(super) fn consume(&mut self) -> Option<char> {
        self.current_char_pos = self.current_pos;
        let c = self.input[self.current_pos..].chars().next()?;
        self.current_pos += c.len_utf8();
        Some(c)
    }

    /// Peek at the character `offset` places after the current one.
    pub(super) fn peek_codepoint(&self, offset: usize) -> Option<char> {
        self.input[self.current_pos..].chars().nth(offset)
    }

    /// Check if the next few characters match `target` exactly.
    pub(super) fn next_few_characters_are(&self, target: &str) -> bool {
        self.input[self.current_pos..].starts_with(target)
    }

    /// Advance past `target`, which the caller has just matched.
    pub(super) const fn consume_string(&mut self, target: &str) {
        self.current_pos += target.len();
    }

    /// Move the input position back to `offset`. Scanning resumes there on
    /// the next iteration.
    pub(super) const fn rewind_to(&mut self, offset: usize) {
        self.current_pos = offset;
        self.reconsume = false;
    }

    /// Whether the input at the current position is `/` followed by the end
    /// tag of the open raw text element.
    pub(super) fn at_raw_text_end_tag(&self) -> bool {
        let Some(name) = self.raw_text_end.as_deref() else {
            return false;
        };
        let Some(rest) = self.input[self.current_pos..].strip_prefix('/') else {
            return false;
        };
        let name_matches = rest
            .get(..name.len())
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name));
        name_matches
            && rest[name.len()..]
                .chars()
                .next()
                .is_none_or(|c| Self::is_whitespace_char(c) || c == '/' || c == '>')
    }

    pub(super) const fn is_whitespace_char(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r' | '\x0C')
    }

    /// Whether `c` can begin a tag name.
    pub(super) const fn is_name_start_char(c: char) -> bool {
        c.is_ascii_alphabetic() || c == '_' || c == ':'
    }
}

// =============================================================================
// Event Delivery Helpers
// =============================================================================

impl<H: ScanHandler> ScanRun<'_, H> {
    /// Hand one event to the handler.
    pub(super) fn deliver(&mut self, kind: EventKind, text: &str) -> Result<(), H::Error> {
        kind.dispatch(text, &mut *self.handler)?;
        self.report.events += 1;
        Ok(())
    }

    /// Report pending character data, if there is any.
    pub(super) fn flush_text(&mut self) -> Result<(), H::Error> {
        if self.text.is_empty() {
            return Ok(());
        }
        let text = mem::take(&mut self.text);
        let result = self.deliver(EventKind::Pcdata, &text);
        self.text = text;
        self.text.clear();
        result
    }

    /// Report a construct that follows any pending character data.
    pub(super) fn emit(&mut self, kind: EventKind, text: &str) -> Result<(), H::Error> {
        self.flush_text()?;
        self.deliver(kind, text)
    }

    /// Report the construct accumulated in the buffer, then clear it.
    pub(super) fn emit_buffer(&mut self, kind: EventKind) -> Result<(), H::Error> {
        self.flush_text()?;
        let buffer = mem::take(&mut self.buffer);
        let result = self.deliver(kind, &buffer);
        self.buffer = buffer;
        self.buffer.clear();
        result
    }
}

// =============================================================================
// Tag Helpers
// =============================================================================

impl<H: ScanHandler> ScanRun<'_, H> {
    /// A `<` at the current character may open a tag. Remember where, in
    /// case it has to be handed back as text.
    pub(super) fn begin_tag(&mut self) {
        let offset = self.current_char_pos;
        let origin = self.position_at(offset);
        self.tag.begin(origin, self.report.recoveries.len());
    }

    /// Stage the buffer as part of the open tag, then clear it.
    pub(super) fn stage_buffer(&mut self, kind: EventKind) {
        self.tag.stage(kind, &self.buffer);
        self.buffer.clear();
    }

    /// The open tag is closed: deliver its staged events, then `close`
    /// (`stagc` or `stage`; end tags have none).
    pub(super) fn commit_tag(&mut self, close: Option<EventKind>) -> Result<(), H::Error> {
        self.flush_text()?;
        let staged = mem::take(&mut self.tag.staged);
        for event in &staged {
            self.deliver(event.kind, &event.text)?;
        }
        if let Some(kind) = close {
            let text = if kind == EventKind::Stage { "/>" } else { ">" };
            self.deliver(kind, text)?;
        }
        self.tag.staged = staged;

        let next = if self.tag.is_end {
            self.raw_text_end = None;
            ScanState::Data
        } else if close == Some(EventKind::Stagc)
            && self.options.is_raw_text_element(&self.tag.name)
        {
            self.raw_text_end = Some(self.tag.name.clone());
            ScanState::RawText
        } else {
            ScanState::Data
        };
        self.tag.clear();
        self.switch_to(next);
        Ok(())
    }

    /// The open tag never closed. Its `<` becomes character data, and
    /// scanning resumes right after it, so the rest of the would-be tag is
    /// read again as content.
    pub(super) fn abandon_tag(&mut self) {
        let start = self.tag.start;
        self.report.recoveries.truncate(self.tag.recovery_mark);
        self.record_recovery(RecoveryKind::UnterminatedTag, start);
        self.text.push('<');
        self.tag.clear();
        self.buffer.clear();
        self.rewind_to(start + 1);
        let resume = if self.raw_text_end.is_some() {
            ScanState::RawText
        } else {
            ScanState::Data
        };
        self.switch_to(resume);
    }
}

// =============================================================================
// Recovery Helpers
// =============================================================================

impl<H: ScanHandler> ScanRun<'_, H> {
    /// Line and column of byte `offset`.
    ///
    /// Walks forward from the last position computed. An offset behind it
    /// is at or after the open tag's `<` (recoveries never point earlier),
    /// so the walk restarts from the tag rather than from the beginning.
    pub(super) fn position_at(&mut self, offset: usize) -> TextPosition {
        if offset < self.position.offset {
            self.position = if self.tag.origin.offset <= offset {
                self.tag.origin
            } else {
                TextPosition::locate(self.input, offset)
            };
        }
        self.position.advance_to(self.input, offset);
        self.position
    }

    /// Note a recovery from malformed input at byte `offset`.
    pub(super) fn record_recovery(&mut self, kind: RecoveryKind, offset: usize) {
        let recovery = Recovery {
            kind,
            position: self.position_at(offset),
        };
        if self.options.log_recoveries {
            warn_once("Scanner", &kind.to_string(), &recovery.position);
        }
        self.report.recoveries.push(recovery);
    }
}

#[cfg(test)]
mod tests {
    use crate::event::EventCollector;
    use crate::options::ScanOptions;

    use super::*;

    fn run_at<'a>(
        input: &'a str,
        options: &'a ScanOptions,
        collector: &'a mut EventCollector,
        pos: usize,
    ) -> ScanRun<'a, EventCollector> {
        let mut run = ScanRun::new(input, options, collector);
        run.current_pos = pos;
        run
    }

    #[test]
    fn test_consume_tracks_character_offsets() {
        let options = ScanOptions::default();
        let mut collector = EventCollector::new();
        let mut run = run_at("é<", &options, &mut collector, 0);
        assert_eq!(run.consume(), Some('é'));
        assert_eq!(run.consume(), Some('<'));
        assert_eq!(run.current_char_pos, 2);
        assert_eq!(run.consume(), None);
        assert_eq!(run.current_char_pos, 3);
    }

    #[test]
    fn test_raw_text_end_tag_needs_delimiter() {
        let options = ScanOptions::default();
        let mut collector = EventCollector::new();
        let mut run = run_at("</scriptx></SCRIPT >", &options, &mut collector, 1);
        run.raw_text_end = Some("script".to_string());
        assert!(!run.at_raw_text_end_tag());
        run.current_pos = 11;
        assert!(run.at_raw_text_end_tag());
    }

    #[test]
    fn test_raw_text_end_tag_at_end_of_input() {
        let options = ScanOptions::default();
        let mut collector = EventCollector::new();
        let mut run = run_at("</style", &options, &mut collector, 1);
        run.raw_text_end = Some("style".to_string());
        assert!(run.at_raw_text_end_tag());
    }
}
