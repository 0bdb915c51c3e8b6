//! Comments, declarations, CDATA sections and processing instructions.
//!
//! None of these can be reclassified once recognized, so pending character
//! data is reported before them. Each one still open at end of input is
//! closed with whatever content it had collected.

use super::machine::{ScanRun, ScanState};
use crate::event::EventKind;
use crate::handler::ScanHandler;
use crate::report::RecoveryKind;

impl<H: ScanHandler> ScanRun<'_, H> {
    /// Entered by reconsuming the `!` of `<!`. Decides by lookahead.
    pub(super) fn handle_markup_declaration_open_state(&mut self) {
        self.buffer.clear();
        if self.next_few_characters_are("--") {
            self.consume_string("--");
            self.switch_to(ScanState::CommentStart);
        } else if self.next_few_characters_are("[CDATA[") {
            self.consume_string("[CDATA[");
            self.switch_to(ScanState::CDATASection);
        } else if self.peek_codepoint(0).is_none() {
            // A bare "<!" at the end of input is text.
            self.record_recovery(RecoveryKind::InvalidTagOpen, self.tag.start);
            self.text.push_str("<!");
            self.switch_to(ScanState::Data);
        } else {
            self.switch_to(ScanState::Declaration);
        }
    }

    /// Reports a comment at end of input.
    fn close_comment_at_eof(&mut self) -> Result<(), H::Error> {
        self.record_recovery(RecoveryKind::UnterminatedComment, self.tag.start);
        self.emit_buffer(EventKind::Cmnt)?;
        self.reconsume_in(ScanState::Eof);
        Ok(())
    }

    pub(super) fn handle_comment_start_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('-') => self.switch_to(ScanState::CommentStartDash),
            // "<!-->" - An empty comment.
            Some('>') => {
                self.record_recovery(RecoveryKind::MalformedCommentClose, self.tag.start);
                self.emit_buffer(EventKind::Cmnt)?;
                self.switch_to(ScanState::Data);
            }
            None => self.close_comment_at_eof()?,
            Some(_) => self.reconsume_in(ScanState::Comment),
        }
        Ok(())
    }

    pub(super) fn handle_comment_start_dash_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('-') => self.switch_to(ScanState::CommentEnd),
            // "<!--->" - Also an empty comment.
            Some('>') => {
                self.record_recovery(RecoveryKind::MalformedCommentClose, self.tag.start);
                self.emit_buffer(EventKind::Cmnt)?;
                self.switch_to(ScanState::Data);
            }
            None => {
                self.buffer.push('-');
                self.close_comment_at_eof()?;
            }
            Some(_) => {
                self.buffer.push('-');
                self.reconsume_in(ScanState::Comment);
            }
        }
        Ok(())
    }

    pub(super) fn handle_comment_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('-') => self.switch_to(ScanState::CommentEndDash),
            None => self.close_comment_at_eof()?,
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    pub(super) fn handle_comment_end_dash_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('-') => self.switch_to(ScanState::CommentEnd),
            None => {
                self.buffer.push('-');
                self.close_comment_at_eof()?;
            }
            Some(_) => {
                self.buffer.push('-');
                self.reconsume_in(ScanState::Comment);
            }
        }
        Ok(())
    }

    pub(super) fn handle_comment_end_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('>') => {
                self.emit_buffer(EventKind::Cmnt)?;
                self.switch_to(ScanState::Data);
            }
            Some('!') => self.switch_to(ScanState::CommentEndBang),
            // "---" - Only the last two dashes can close the comment.
            Some('-') => self.buffer.push('-'),
            None => {
                self.buffer.push_str("--");
                self.close_comment_at_eof()?;
            }
            Some(_) => {
                self.buffer.push_str("--");
                self.reconsume_in(ScanState::Comment);
            }
        }
        Ok(())
    }

    pub(super) fn handle_comment_end_bang_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('-') => {
                self.buffer.push_str("--!");
                self.switch_to(ScanState::CommentEndDash);
            }
            Some('>') => {
                self.record_recovery(RecoveryKind::MalformedCommentClose, self.tag.start);
                self.emit_buffer(EventKind::Cmnt)?;
                self.switch_to(ScanState::Data);
            }
            None => {
                self.buffer.push_str("--!");
                self.close_comment_at_eof()?;
            }
            Some(_) => {
                self.buffer.push_str("--!");
                self.reconsume_in(ScanState::Comment);
            }
        }
        Ok(())
    }

    /// `<!DOCTYPE html>` and any other `<!` construct. Runs to the first `>`.
    pub(super) fn handle_declaration_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('>') => {
                self.emit_buffer(EventKind::Decl)?;
                self.switch_to(ScanState::Data);
            }
            None => {
                self.record_recovery(RecoveryKind::UnterminatedDeclaration, self.tag.start);
                self.emit_buffer(EventKind::Decl)?;
                self.reconsume_in(ScanState::Eof);
            }
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    pub(super) fn handle_cdata_section_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(']') => self.switch_to(ScanState::CDATASectionBracket),
            None => self.close_cdata_at_eof()?,
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    pub(super) fn handle_cdata_section_bracket_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(']') => self.switch_to(ScanState::CDATASectionEnd),
            None => {
                self.buffer.push(']');
                self.close_cdata_at_eof()?;
            }
            Some(_) => {
                self.buffer.push(']');
                self.reconsume_in(ScanState::CDATASection);
            }
        }
        Ok(())
    }

    pub(super) fn handle_cdata_section_end_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('>') => {
                self.emit_buffer(EventKind::Cdsect)?;
                self.switch_to(ScanState::Data);
            }
            Some(']') => self.buffer.push(']'),
            None => {
                self.buffer.push_str("]]");
                self.close_cdata_at_eof()?;
            }
            Some(_) => {
                self.buffer.push_str("]]");
                self.reconsume_in(ScanState::CDATASection);
            }
        }
        Ok(())
    }

    fn close_cdata_at_eof(&mut self) -> Result<(), H::Error> {
        self.record_recovery(RecoveryKind::UnterminatedCdata, self.tag.start);
        self.emit_buffer(EventKind::Cdsect)?;
        self.reconsume_in(ScanState::Eof);
        Ok(())
    }

    /// `<?target body?>`. The target runs to the first whitespace or `>`.
    pub(super) fn handle_processing_instruction_target_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {
                self.emit_buffer(EventKind::Pitarget)?;
                self.switch_to(ScanState::BeforeProcessingInstructionBody);
            }
            // "<?target?>" - No body.
            Some('>') => {
                strip_question_mark(&mut self.buffer);
                self.emit_buffer(EventKind::Pitarget)?;
                self.emit(EventKind::Pi, "")?;
                self.switch_to(ScanState::Data);
            }
            None => {
                self.record_recovery(
                    RecoveryKind::UnterminatedProcessingInstruction,
                    self.tag.start,
                );
                self.emit_buffer(EventKind::Pitarget)?;
                self.emit(EventKind::Pi, "")?;
                self.reconsume_in(ScanState::Eof);
            }
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }

    pub(super) fn handle_before_processing_instruction_body_state(
        &mut self,
    ) -> Result<(), H::Error> {
        match self.current_input_character {
            Some(c) if Self::is_whitespace_char(c) => {}
            Some('>') => {
                self.emit(EventKind::Pi, "")?;
                self.switch_to(ScanState::Data);
            }
            None => {
                self.record_recovery(
                    RecoveryKind::UnterminatedProcessingInstruction,
                    self.tag.start,
                );
                self.emit(EventKind::Pi, "")?;
                self.reconsume_in(ScanState::Eof);
            }
            Some(_) => self.reconsume_in(ScanState::ProcessingInstruction),
        }
        Ok(())
    }

    pub(super) fn handle_processing_instruction_state(&mut self) -> Result<(), H::Error> {
        match self.current_input_character {
            Some('>') => {
                strip_question_mark(&mut self.buffer);
                self.emit_buffer(EventKind::Pi)?;
                self.switch_to(ScanState::Data);
            }
            None => {
                self.record_recovery(
                    RecoveryKind::UnterminatedProcessingInstruction,
                    self.tag.start,
                );
                self.emit_buffer(EventKind::Pi)?;
                self.reconsume_in(ScanState::Eof);
            }
            Some(c) => self.buffer.push(c),
        }
        Ok(())
    }
}

/// Drop the `?` of an XML-style `?>` closer.
fn strip_question_mark(body: &mut String) {
    if body.ends_with('?') {
        let _ = body.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::strip_question_mark;

    #[test]
    fn test_strip_question_mark_removes_one() {
        let mut body = String::from("version=\"1.0\"??");
        strip_question_mark(&mut body);
        assert_eq!(body, "version=\"1.0\"?");
    }
}
