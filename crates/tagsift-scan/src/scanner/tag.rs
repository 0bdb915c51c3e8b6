//! Staging area for a tag that has not been closed yet.

use tagsift_common::position::TextPosition;

use crate::event::{Event, EventKind};

/// A start or end tag under construction.
#[derive(Debug, Default)]
pub(super) struct PendingTag {
    /// Byte offset of the `<` that opened the tag.
    pub(super) start: usize,
    /// Line and column of that `<`.
    pub(super) origin: TextPosition,
    /// Number of recoveries recorded before the tag opened.
    pub(super) recovery_mark: usize,
    pub(super) is_end: bool,
    /// Element name, once staged.
    pub(super) name: String,
    /// Events held back until the tag is known to be closed.
    pub(super) staged: Vec<Event>,
    /// Attribute name waiting to learn whether a value follows.
    pub(super) attribute: Option<String>,
    /// Byte offset just past the opening quote of the current value.
    pub(super) value_start: usize,
    /// Staged events and recoveries recorded before the current value.
    pub(super) value_marks: (usize, usize),
    /// Offset of the `>` that ends an unterminated quoted value.
    pub(super) quote_limit: Option<usize>,
}

impl PendingTag {
    /// Start a new tag at the `<` found at `origin`.
    pub(super) fn begin(&mut self, origin: TextPosition, recovery_mark: usize) {
        self.clear();
        self.start = origin.offset;
        self.origin = origin;
        self.recovery_mark = recovery_mark;
    }

    pub(super) fn clear(&mut self) {
        self.is_end = false;
        self.name.clear();
        self.staged.clear();
        self.attribute = None;
        self.quote_limit = None;
    }

    pub(super) fn stage(&mut self, kind: EventKind, text: &str) {
        if matches!(kind, EventKind::Gi | EventKind::Etag) {
            self.name.clear();
            self.name.push_str(text);
        }
        self.staged.push(Event::new(kind, text));
    }

    /// Stage the waiting attribute name as `kind`: `aname` when a value
    /// follows, `adup` when it does not.
    pub(super) fn settle_attribute(&mut self, kind: EventKind) {
        if let Some(name) = self.attribute.take() {
            self.stage(kind, &name);
        }
    }

    /// Remember where a quoted value begins, so an unterminated one can be
    /// scanned again up to its recovered end.
    pub(super) fn mark_value(&mut self, value_start: usize, recoveries: usize) {
        self.value_start = value_start;
        self.value_marks = (self.staged.len(), recoveries);
        self.quote_limit = None;
    }

    /// Drop everything staged since the current value began.
    pub(super) fn rewind_value(&mut self) {
        self.staged.truncate(self.value_marks.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_tracks_element_name() {
        let mut tag = PendingTag::default();
        tag.begin(TextPosition::locate("abc <div", 4), 0);
        tag.stage(EventKind::Gi, "div");
        tag.stage(EventKind::Aname, "id");
        assert_eq!(tag.name, "div");
        assert_eq!(tag.staged.len(), 2);
    }

    #[test]
    fn test_begin_remembers_origin() {
        let mut tag = PendingTag::default();
        tag.begin(TextPosition::locate("a\n  <b", 4), 3);
        assert_eq!(tag.start, 4);
        assert_eq!(tag.origin.line, 2);
        assert_eq!(tag.origin.column, 3);
        assert_eq!(tag.recovery_mark, 3);
    }

    #[test]
    fn test_settle_attribute_stages_once() {
        let mut tag = PendingTag::default();
        tag.attribute = Some("checked".to_string());
        tag.settle_attribute(EventKind::Adup);
        tag.settle_attribute(EventKind::Adup);
        assert_eq!(tag.staged, vec![Event::new(EventKind::Adup, "checked")]);
    }

    #[test]
    fn test_rewind_value_drops_value_entities() {
        let mut tag = PendingTag::default();
        tag.stage(EventKind::Gi, "a");
        tag.stage(EventKind::Aname, "title");
        tag.mark_value(10, 0);
        tag.stage(EventKind::Entity, "amp");
        tag.rewind_value();
        assert_eq!(tag.staged.len(), 2);
    }
}
