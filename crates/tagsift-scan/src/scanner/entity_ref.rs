//! References in character data and attribute values.
//!
//! A reference must end with `;`. Anything that is not a complete,
//! resolvable reference leaves its `&` as a literal character, and scanning
//! continues with the character after it.

use super::machine::{ScanRun, ScanState};
use crate::entities::resolve_entity;
use crate::event::EventKind;
use crate::handler::ScanHandler;
use crate::report::RecoveryKind;

/// What follows an `&`.
#[derive(Debug, PartialEq, Eq)]
pub(super) enum Reference<'a> {
    /// A complete reference. `text` is what lies between `&` and `;`, and
    /// `consumed` counts its bytes including the `;`.
    Resolved {
        text: &'a str,
        consumed: usize,
        value: char,
    },
    /// Looked like a reference but can't be used.
    Unresolved(RecoveryKind),
    /// A lone ampersand, as in `fish & chips`.
    Bare,
}

/// Match the reference that starts right after an `&`.
pub(super) fn match_reference(rest: &str, max_length: usize) -> Reference<'_> {
    let bytes = rest.as_bytes();
    let (prefix, numeric, hex) = match bytes {
        [b'#', b'x' | b'X', ..] => (2, true, true),
        [b'#', ..] => (1, true, false),
        _ => (0, false, false),
    };

    let body = bytes[prefix..]
        .iter()
        .take(max_length + 1)
        .take_while(|b| match (numeric, hex) {
            (true, true) => b.is_ascii_hexdigit(),
            (true, false) => b.is_ascii_digit(),
            _ => b.is_ascii_alphanumeric(),
        })
        .count();

    if body == 0 {
        return if numeric {
            Reference::Unresolved(RecoveryKind::InvalidCharacterReference)
        } else {
            Reference::Bare
        };
    }

    let end = prefix + body;
    if body > max_length || bytes.get(end) != Some(&b';') {
        return Reference::Unresolved(RecoveryKind::UnterminatedEntity);
    }

    let text = &rest[..end];
    match resolve_entity(text) {
        Some(value) => Reference::Resolved {
            text,
            consumed: end + 1,
            value,
        },
        None if numeric => Reference::Unresolved(RecoveryKind::InvalidCharacterReference),
        None => Reference::Unresolved(RecoveryKind::UnknownEntity),
    }
}

impl<H: ScanHandler> ScanRun<'_, H> {
    /// Entered by reconsuming the `&`.
    ///
    /// In character data the text before the `&` is reported first, then
    /// `entity`, and the decoded character starts the next `pcdata`. In an
    /// attribute value the event is staged with the rest of the tag.
    pub(super) fn handle_entity_ref_state(&mut self) -> Result<(), H::Error> {
        let return_state = self.return_state.take().unwrap_or(ScanState::Data);
        let in_data = return_state == ScanState::Data;
        let input = self.input;
        let start = self.current_pos;

        match match_reference(&input[start..], self.options.max_entity_length) {
            Reference::Resolved {
                text,
                consumed,
                value,
            } => {
                if in_data {
                    self.flush_text()?;
                    self.deliver(EventKind::Entity, text)?;
                    self.text.push(value);
                } else {
                    self.tag.stage(EventKind::Entity, text);
                    self.buffer.push(value);
                }
                self.current_pos = start + consumed;
            }
            Reference::Unresolved(kind) => {
                self.record_recovery(kind, self.current_char_pos);
                self.push_ampersand(in_data);
            }
            Reference::Bare => self.push_ampersand(in_data),
        }

        self.switch_to(return_state);
        Ok(())
    }

    fn push_ampersand(&mut self, in_data: bool) {
        if in_data {
            self.text.push('&');
        } else {
            self.buffer.push('&');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_reference() {
        assert_eq!(
            match_reference("amp; rest", 32),
            Reference::Resolved {
                text: "amp",
                consumed: 4,
                value: '&'
            }
        );
    }

    #[test]
    fn test_hex_reference() {
        assert_eq!(
            match_reference("#X41;", 32),
            Reference::Resolved {
                text: "#X41",
                consumed: 5,
                value: 'A'
            }
        );
    }

    #[test]
    fn test_missing_semicolon() {
        assert_eq!(
            match_reference("amp rest", 32),
            Reference::Unresolved(RecoveryKind::UnterminatedEntity)
        );
    }

    #[test]
    fn test_lone_ampersand() {
        assert_eq!(match_reference(" chips", 32), Reference::Bare);
        assert_eq!(match_reference("", 32), Reference::Bare);
        assert_eq!(match_reference(";", 32), Reference::Bare);
    }

    #[test]
    fn test_empty_digits() {
        assert_eq!(
            match_reference("#;", 32),
            Reference::Unresolved(RecoveryKind::InvalidCharacterReference)
        );
        assert_eq!(
            match_reference("#x;", 32),
            Reference::Unresolved(RecoveryKind::InvalidCharacterReference)
        );
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(
            match_reference("bogus;", 32),
            Reference::Unresolved(RecoveryKind::UnknownEntity)
        );
    }

    #[test]
    fn test_name_longer_than_limit() {
        assert_eq!(
            match_reference("abcdef;", 4),
            Reference::Unresolved(RecoveryKind::UnterminatedEntity)
        );
    }
}
