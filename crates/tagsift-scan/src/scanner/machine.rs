//! Scanner states, the main loop, and the tag states.
//!
//! Markup declarations, comments, CDATA sections and processing instructions
//! live in `markup.rs`; references in `entity_ref.rs`.

use strum_macros::Display;
use tagsift_common::position::TextPosition;

use super::tag::PendingTag;
use crate::event::EventKind;
use crate::handler::ScanHandler;
use crate::options::ScanOptions;
use crate::report::{RecoveryKind, ScanReport};

/// Lexical mode of the scanner. Exactly one is active at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum ScanState {
    /// Character content between markup.
    Data,
    /// Content of a raw text element, up to its matching end tag.
    RawText,
    /// After `<`.
    TagOpen,
    /// After `</`.
    EndTagOpen,
    /// Inside a start tag name.
    TagName,
    /// Inside an end tag name.
    EndTagName,
    /// After an end tag name, skipping to `>`.
    AfterEndTagName,
    /// Between the attributes of a start tag.
    InTag,
    /// Inside an attribute name.
    AttributeName,
    /// After an attribute name, waiting for `=` or the next attribute.
    AfterAttributeName,
    /// After `=`, before the value.
    BeforeAttributeValue,
    /// Inside a `"`-quoted value.
    AttributeValueDoubleQuoted,
    /// Inside a `'`-quoted value.
    AttributeValueSingleQuoted,
    /// Inside an unquoted value.
    AttributeValueUnquoted,
    /// After `/` in a start tag.
    SelfClosingStartTag,
    /// After `<!`.
    MarkupDeclarationOpen,
    /// After `<!--`.
    CommentStart,
    /// After `<!---`.
    CommentStartDash,
    /// Inside a comment.
    Comment,
    /// After `-` inside a comment.
    CommentEndDash,
    /// After `--` inside a comment.
    CommentEnd,
    /// After `--!` inside a comment.
    CommentEndBang,
    /// Inside a `<! ... >` declaration.
    Declaration,
    /// Inside a CDATA section.
    CDATASection,
    /// After `]` inside a CDATA section.
    CDATASectionBracket,
    /// After `]]` inside a CDATA section.
    CDATASectionEnd,
    /// Inside a processing instruction target.
    ProcessingInstructionTarget,
    /// Whitespace between a processing instruction's target and body.
    BeforeProcessingInstructionBody,
    /// Inside a processing instruction body.
    ProcessingInstruction,
    /// After `&`.
    EntityRef,
    /// Input exhausted.
    Eof,
}

/// Lenient markup scanner.
///
/// Holds only configuration. Every [`Scanner::scan`] starts from a fresh
/// state, so one scanner can serve any number of documents, and can be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Scanner {
    options: ScanOptions,
}

impl Scanner {
    /// A scanner with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A scanner with the given options.
    #[must_use]
    pub const fn with_options(options: ScanOptions) -> Self {
        Self { options }
    }

    /// The options this scanner was built with.
    #[must_use]
    pub const fn options(&self) -> &ScanOptions {
        &self.options
    }

    /// Scan `input` to its end, reporting every construct to `handler`.
    ///
    /// Malformed markup is never an error: it is recovered from and listed
    /// in the returned report. The only error is one returned by a handler
    /// method, which stops the scan at once and is passed back unchanged.
    pub fn scan<H: ScanHandler>(
        &self,
        input: &str,
        handler: &mut H,
    ) -> Result<ScanReport, H::Error> {
        ScanRun::new(input, &self.options, handler).run()
    }
}

/// The state of one scan in progress.
pub(super) struct ScanRun<'a, H: ScanHandler> {
    pub(super) input: &'a str,
    pub(super) options: &'a ScanOptions,
    pub(super) handler: &'a mut H,

    pub(super) state: ScanState,
    /// State to go back to after a reference.
    pub(super) return_state: Option<ScanState>,

    /// Byte offset of the next character to consume.
    pub(super) current_pos: usize,
    /// Byte offset of `current_input_character`.
    pub(super) current_char_pos: usize,
    pub(super) current_input_character: Option<char>,
    pub(super) reconsume: bool,
    pub(super) at_eof: bool,

    /// Character data not yet reported.
    pub(super) text: String,
    /// Name, value or body of the construct being scanned.
    pub(super) buffer: String,
    pub(super) tag: PendingTag,
    /// Element whose end tag closes the current raw text.
    pub(super) raw_text_end: Option<String>,

    pub(super) report: ScanReport,
    /// Last position computed, for a recovery or a tag start.
    pub(super) position: TextPosition,
}

impl<'a, H: ScanHandler> ScanRun<'a, H> {
    pub(super) fn new(input: &'a str, options: &'a ScanOptions, handler: &'a mut H) -> Self {
        Self {
            input,
            options,
            handler,
            state: ScanState::Data,
            return_state: None,
            current_pos: 0,
            current_char_pos: 0,
            current_input_character: None,
            reconsume: false,
            at_eof: false,
            text: String::new(),
            buffer: String::new(),
            tag: PendingTag::default(),
            raw_text_end: None,
            report: ScanReport::default(),
            position: TextPosition::start(),
        }
    }

    /// Main loop. Each iteration consumes one character (unless the last
    /// state asked to reconsume) and hands it to the current state.
    pub(super) fn run(mut self) -> Result<ScanReport, H::Error> {
        loop {
            if self.reconsume {
                self.reconsume = false;
            } else {
                self.current_input_character = self.consume();
            }

            match self.state {
                ScanState::Data => self.handle_data_state(),
                ScanState::RawText => self.handle_raw_text_state(),
                ScanState::TagOpen => self.handle_tag_open_state(),
                ScanState::EndTagOpen => self.handle_end_tag_open_state(),
                ScanState::TagName => self.handle_tag_name_state()?,
                ScanState::EndTagName => self.handle_end_tag_name_state()?,
                ScanState::AfterEndTagName => self.handle_after_end_tag_name_state()?,
                ScanState::InTag => self.handle_in_tag_state()?,
                ScanState::AttributeName => self.handle_attribute_name_state()?,
                ScanState::AfterAttributeName => self.handle_after_attribute_name_state()?,
                ScanState::BeforeAttributeValue => self.handle_before_attribute_value_state()?,
                ScanState::AttributeValueDoubleQuoted => {
                    self.handle_attribute_value_quoted_state('"')?;
                }
                ScanState::AttributeValueSingleQuoted => {
                    self.handle_attribute_value_quoted_state('\'')?;
                }
                ScanState::AttributeValueUnquoted => self.handle_attribute_value_unquoted_state()?,
                ScanState::SelfClosingStartTag => self.handle_self_closing_start_tag_state()?,
                ScanState::MarkupDeclarationOpen => self.handle_markup_declaration_open_state(),
                ScanState::CommentStart => self.handle_comment_start_state()?,
                ScanState::CommentStartDash => self.handle_comment_start_dash_state()?,
                ScanState::Comment => self.handle_comment_state()?,
                ScanState::CommentEndDash => self.handle_comment_end_dash_state()?,
                ScanState::CommentEnd => self.handle_comment_end_state()?,
                ScanState::CommentEndBang => self.handle_comment_end_bang_state()?,
                ScanState::Declaration => self.handle_declaration_state()?,
                ScanState::CDATASection => self.handle_cdata_section_state()?,
                ScanState::CDATASectionBracket => self.handle_cdata_section_bracket_state()?,
                ScanState::CDATASectionEnd => self.handle_cdata_section_end_state()?,
                ScanState::ProcessingInstructionTarget => {
                    self.handle_processing_instruction_target_state()?;
                }
                ScanState::BeforeProcessingInstructionBody => {
                    self.handle_before_processing_instruction_body_state()?;
                }
                ScanState::ProcessingInstruction => {
                    self.handle_processing_instruction_state()?;
                }
                ScanState::EntityRef => self.handle_entity_ref_state()?,
                ScanState::Eof => self.handle_eof_state()?,
            }

            if self.at_eof {
                return Ok(self.report);
            }
        }
    }

    fn handle_data_state(&mut self) {
        match self.current_input_character {
            // "<" - Possible markup. Remember where it starts, in case it
            // has to be handed back as text.
            Some('<') => {
                self.begin_tag();
                self.switch_to(ScanState::TagOpen);
            }
            // "&" - Possible reference.
            Some('&') => {
                self.return_state = Some(ScanState::Data);
                self.reconsume_in(ScanState::EntityRef);
            }
            None => self.reconsume_in(ScanState::Eof),
            Some(c) => self.text.push(c),
        }
    }

    /// Everything up to the end tag of the open raw text element is text.
    /// References are not recognized.
    fn handle_raw_text_state(&mut self) {
        match self.current_input_character {
            Some('<') if self.at_raw_text_end_tag() => {
                self.begin_tag();
                self.switch_to(ScanState::TagOpen);
            }
            None => {
                self.record_recovery(RecoveryKind::UnterminatedRawText, self.current_char_pos);
                self.reconsume_in(ScanState::Eof);
            }
            Some(c) => self.text.push(c),
        }
    }

    fn handle_tag_open_state(&mut self) {
        match self.current_input_character {
            // "!" - Comment, CDATA section or declaration. Decided by
            // looking ahead, so reconsume.
            Some('!') => self.reconsume_in(ScanState::MarkupDeclarationOpen),
            // "?" - Processing instruction, unless the input ends here.
            Some('?') => {
                if self.peek_codepoint(0).is_none() {
                    self.record_recovery(RecoveryKind::InvalidTagOpen, self.tag.start);
                    self.text.push_str("<?");
                    self.switch_to(ScanState::Data);
                } else {
                    self.buffer.clear();
                    self.switch_to(ScanState::ProcessingInstructionTarget);
                }
            }
            Some('/') => self.switch_to(ScanState::EndTagOpen),
            Some(c) if Self::is_name_start_char(c) => {
                self.buffer.clear();
                self.buffer.push(c);
                self.switch_to(ScanState::TagName);
            }
            // Anything else, including another "<" and end of input: the
            // "<" was literal. Reconsume so a second "<" can still open a tag.
            _ => {
                self.record_recovery(RecoveryKind::InvalidTagOpen, self.tag.start);
                self.text.push('<');
                self.reconsume_in(ScanState::Data);
            }
        }
    }

    fn handle_end_tag_open_state(&mut self) {
        match self.current_input_character {
            Some(c) if Self::is_name_start_char(c) => {
                self.tag.is_end = true;
                self.buffer.clear();
                self.buffer.push(c);
                self.switch_to(ScanState::EndTagName);
            }
            _ => {
                self.record_recovery(RecoveryKind::InvalidTagOpen, self.tag.start);
                self.text.push_str("</");
                let resume = if self.raw_text_end.is_some() {
                    ScanState::RawText
                } else {
                    ScanState::Data
                };
                self.reconsume_in(resume);
            }
        }
    }

    fn handle_tag_name_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            // Whitespace - The name is complete. Attributes may follow.
            Some(c) if Self::is_whitespace_char(c) => {
                self.stage_buffer(EventKind::Gi);
                self.switch_to(ScanState::InTag);
            }
            Some('/') => {
                self.stage_buffer(EventKind::Gi);
                self.switch_to(ScanState::SelfClosingStartTag);
            }
            Some('>') => {
                self.stage_buffer(EventKind::Gi);
                self.commit_tag(Some(EventKind::Stagc))?;
            }
            Some('<') | None => self.abandon_tag(),
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    fn handle_end_tag_name_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) || c == '/' => {
                self.stage_buffer(EventKind::Etag);
                self.switch_to(ScanState::AfterEndTagName);
            }
            Some('>') => {
                self.stage_buffer(EventKind::Etag);
                self.commit_tag(None)?;
            }
            Some('<') | None => self.abandon_tag(),
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    /// Anything between an end tag's name and its `>` is ignored.
    fn handle_after_end_tag_name_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('>') => self.commit_tag(None)?,
            Some('<') | None => self.abandon_tag(),
            Some(_) => {}
        }
        Ok(())
    }

    fn handle_in_tag_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('/') => self.switch_to(ScanState::SelfClosingStartTag),
            Some('>') => self.commit_tag(Some(EventKind::Stagc))?,
            Some('<') | None => self.abandon_tag(),
            // Anything else starts an attribute name, even "=" or a quote.
            Some(c) => {
                self.buffer.clear();
                self.buffer.push(c);
                self.switch_to(ScanState::AttributeName);
            }
        }
        Ok(())
    }

    fn handle_attribute_name_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            // Whitespace - Whether this attribute has a value is not known yet.
            Some(c) if Self::is_whitespace_char(c) => {
                self.tag.attribute = Some(self.buffer.clone());
                self.buffer.clear();
                self.switch_to(ScanState::AfterAttributeName);
            }
            Some('=') => {
                self.stage_buffer(EventKind::Aname);
                self.switch_to(ScanState::BeforeAttributeValue);
            }
            Some('>') => {
                self.stage_buffer(EventKind::Adup);
                self.commit_tag(Some(EventKind::Stagc))?;
            }
            Some('/') => {
                self.stage_buffer(EventKind::Adup);
                self.switch_to(ScanState::SelfClosingStartTag);
            }
            Some('<') | None => self.abandon_tag(),
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    fn handle_after_attribute_name_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('=') => {
                self.tag.settle_attribute(EventKind::Aname);
                self.switch_to(ScanState::BeforeAttributeValue);
            }
            Some('>') => {
                self.tag.settle_attribute(EventKind::Adup);
                self.commit_tag(Some(EventKind::Stagc))?;
            }
            Some('/') => {
                self.tag.settle_attribute(EventKind::Adup);
                self.switch_to(ScanState::SelfClosingStartTag);
            }
            Some('<') | None => self.abandon_tag(),
            // The waiting attribute had no value. This character starts the next one.
            Some(c) => {
                self.tag.settle_attribute(EventKind::Adup);
                self.buffer.clear();
                self.buffer.push(c);
                self.switch_to(ScanState::AttributeName);
            }
        }
        Ok(())
    }

    fn handle_before_attribute_value_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('"') => {
                self.begin_quoted_value();
                self.switch_to(ScanState::AttributeValueDoubleQuoted);
            }
            Some('\'') => {
                self.begin_quoted_value();
                self.switch_to(ScanState::AttributeValueSingleQuoted);
            }
            // ">" - `name=>`: the value is empty.
            Some('>') => {
                self.buffer.clear();
                self.stage_buffer(EventKind::Aval);
                self.commit_tag(Some(EventKind::Stagc))?;
            }
            Some('<') | None => self.abandon_tag(),
            Some(_) => {
                self.buffer.clear();
                self.reconsume_in(ScanState::AttributeValueUnquoted);
            }
        }
        Ok(())
    }

    fn begin_quoted_value(&mut self) {
        self.buffer.clear();
        self.tag
            .mark_value(self.current_pos, self.report.recoveries.len());
    }

    /// Inside a quoted value, `<` and `>` are ordinary characters. Only the
    /// matching quote ends the value.
    fn handle_attribute_value_quoted_state(&mut self, quote: char) -> Result<(), H::Error> {
        // The recovered end of an unterminated value: the ">" closes the tag.
        if self.tag.quote_limit == Some(self.current_char_pos) {
            self.stage_buffer(EventKind::Aval);
            return self.commit_tag(Some(EventKind::Stagc));
        }

        match self.current_input_character {
            Some(c) if c == quote => {
                self.stage_buffer(EventKind::Aval);
                self.switch_to(ScanState::InTag);
            }
            Some('&') => {
                self.return_state = Some(self.state);
                self.reconsume_in(ScanState::EntityRef);
            }
            None => self.recover_unterminated_quote()?,
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    /// The closing quote never came. If a `>` follows the opening quote, the
    /// value is scanned again and ends there; otherwise it runs to the end
    /// of input. Either way the tag is closed.
    fn recover_unterminated_quote(&mut self) -> Result<(), H::Error> {
        let value_start = self.tag.value_start;
        let (_, recovery_mark) = self.tag.value_marks;

        match self.input[value_start..].find('>') {
            Some(index) => {
                self.tag.rewind_value();
                self.report.recoveries.truncate(recovery_mark);
                self.record_recovery(RecoveryKind::UnterminatedQuote, value_start - 1);
                self.buffer.clear();
                self.tag.quote_limit = Some(value_start + index);
                self.rewind_to(value_start);
            }
            None => {
                self.record_recovery(RecoveryKind::UnterminatedQuote, value_start - 1);
                self.stage_buffer(EventKind::Aval);
                self.commit_tag(Some(EventKind::Stagc))?;
            }
        }
        Ok(())
    }

    fn handle_attribute_value_unquoted_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.stage_buffer(EventKind::Aval);
                self.switch_to(ScanState::InTag);
            }
            Some('>') => {
                self.stage_buffer(EventKind::Aval);
                self.commit_tag(Some(EventKind::Stagc))?;
            }
            Some('&') => {
                self.return_state = Some(ScanState::AttributeValueUnquoted);
                self.reconsume_in(ScanState::EntityRef);
            }
            Some('<') | None => self.abandon_tag(),
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    fn handle_self_closing_start_tag_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('>') => self.commit_tag(Some(EventKind::Stage))?,
            Some('<') | None => self.abandon_tag(),
            // A stray "/" inside a tag is ignored.
            Some(_) => self.reconsume_in(ScanState::InTag),
        }
        Ok(())
    }

    fn handle_eof_state(&mut self) -> Result<(), H::Error> {
        self.flush_text()?;
        self.deliver(EventKind::Eof, "")?;
        self.at_eof = true;
        Ok(())
    }
}
