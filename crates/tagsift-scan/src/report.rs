//! What a scan found besides its events.

use strum_macros::{Display, EnumIter};
use tagsift_common::position::TextPosition;

/// A kind of malformed input the scanner recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum RecoveryKind {
    /// A tag reached end of input, or another `<`, before its `>`.
    /// Its text was reported as character data.
    UnterminatedTag,
    /// `<` or `</` not followed by a name, kept as literal text.
    InvalidTagOpen,
    /// A quoted attribute value never closed. It was cut at the next `>`.
    UnterminatedQuote,
    /// A comment reached end of input.
    UnterminatedComment,
    /// A CDATA section reached end of input.
    UnterminatedCdata,
    /// A declaration reached end of input.
    UnterminatedDeclaration,
    /// A processing instruction reached end of input.
    UnterminatedProcessingInstruction,
    /// `&name;` with a name not in the entity table.
    UnknownEntity,
    /// `&#...;` that does not denote a usable character.
    InvalidCharacterReference,
    /// A reference without its closing `;`.
    UnterminatedEntity,
    /// A comment closed by `--!>` or opened and closed by `<!-->`.
    MalformedCommentClose,
    /// A raw text element reached end of input without its end tag.
    UnterminatedRawText,
}

/// One recovery, and where the malformed construct began.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Recovery {
    /// What was wrong.
    pub kind: RecoveryKind,
    /// Where the construct started.
    pub position: TextPosition,
}

/// Summary of a completed scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Number of events delivered, including `eof`.
    pub events: usize,
    /// Recoveries in the order they were made.
    pub recoveries: Vec<Recovery>,
}

impl ScanReport {
    /// Whether the input scanned without any recovery.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.recoveries.is_empty()
    }

    /// How many recoveries of `kind` were made.
    #[must_use]
    pub fn count(&self, kind: RecoveryKind) -> usize {
        self.recoveries
            .iter()
            .filter(|recovery| recovery.kind == kind)
            .count()
    }
}
