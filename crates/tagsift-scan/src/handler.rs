//! The callback boundary between the scanner and its consumer.

/// Receives the lexical events of a scan, in document order.
///
/// Each method gets a view of the construct's text that lives only for the
/// duration of the call; copy it to keep it. Any method may fail. The
/// scanner stops at the first failure and hands that error back from
/// [`Scanner::scan`] unchanged, without making any further calls.
///
/// Every method defaults to accepting the event and doing nothing, so a
/// handler only implements the events it cares about.
///
/// [`Scanner::scan`]: crate::Scanner::scan
pub trait ScanHandler {
    /// Error a handler returns to abort the scan.
    type Error;

    /// Name of a start tag (its generic identifier), before its attributes.
    fn gi(&mut self, name: &str) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// Name of an attribute that is followed by `=` and a value.
    fn aname(&mut self, name: &str) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// Name of an attribute written without a value, as in `<input disabled>`.
    fn adup(&mut self, name: &str) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// Decoded value of the attribute named by the preceding `aname`.
    fn aval(&mut self, value: &str) -> Result<(), Self::Error> {
        let _ = value;
        Ok(())
    }

    /// End of a start tag closed by `>`. The text is always `">"`.
    fn stagc(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// End of an empty-element tag closed by `/>`. The text is always `"/>"`.
    fn stage(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// Name of an end tag.
    fn etag(&mut self, name: &str) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// Character data, with references already decoded.
    fn pcdata(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// Content of a `<![CDATA[ ... ]]>` section.
    fn cdsect(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// Content of a comment, without its delimiters.
    fn cmnt(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// Content of a `<! ... >` declaration, such as `DOCTYPE html`.
    fn decl(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }

    /// Target of a processing instruction, as in `<?xml ...?>`.
    fn pitarget(&mut self, target: &str) -> Result<(), Self::Error> {
        let _ = target;
        Ok(())
    }

    /// Body of a processing instruction, following its target.
    fn pi(&mut self, body: &str) -> Result<(), Self::Error> {
        let _ = body;
        Ok(())
    }

    /// A reference that was resolved, named as written (`amp`, `#38`,
    /// `#x26`). The decoded character is part of the enclosing `pcdata` or
    /// `aval`, which is reported after this event.
    fn entity(&mut self, name: &str) -> Result<(), Self::Error> {
        let _ = name;
        Ok(())
    }

    /// End of input. Reported exactly once, last. The text is empty.
    fn eof(&mut self, text: &str) -> Result<(), Self::Error> {
        let _ = text;
        Ok(())
    }
}
