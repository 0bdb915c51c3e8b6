//! Event writers for the CLI.
//!
//! Each writer is a [`ScanHandler`] that prints every event as it arrives,
//! either as aligned text or as one JSON object per line.

use std::io::{self, Write};

use clap::ValueEnum;
use owo_colors::OwoColorize;
use serde::Serialize;
use tagsift_scan::{EventKind, ScanHandler};
use thiserror::Error;

/// Why writing an event failed. Any of these aborts the scan.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to write event: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode event as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("event limit of {limit} exceeded")]
    EventLimit { limit: usize },
}

/// How events are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// One event per line: kind, then the text as a quoted string
    Text,
    /// One JSON object per line
    Json,
}

#[derive(Serialize)]
struct JsonEvent<'a> {
    kind: EventKind,
    text: &'a str,
}

/// Prints events to `out` as they arrive.
pub struct EventWriter<W: Write> {
    out: W,
    format: Format,
    color: bool,
    limit: Option<usize>,
    written: usize,
}

impl<W: Write> EventWriter<W> {
    pub const fn new(out: W, format: Format) -> Self {
        Self {
            out,
            format,
            color: false,
            limit: None,
            written: 0,
        }
    }

    /// Color the event kinds in text output.
    pub const fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    /// Abort the scan once more than `limit` events have arrived.
    pub const fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Give back the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, kind: EventKind, text: &str) -> Result<(), OutputError> {
        if let Some(limit) = self.limit.filter(|&limit| self.written >= limit) {
            return Err(OutputError::EventLimit { limit });
        }
        self.written += 1;

        match self.format {
            Format::Text => {
                let name: &'static str = kind.into();
                let label = format!("{name:<8}");
                if self.color {
                    writeln!(self.out, "{} {text:?}", paint(kind, &label))?;
                } else {
                    writeln!(self.out, "{label} {text:?}")?;
                }
            }
            Format::Json => {
                serde_json::to_writer(&mut self.out, &JsonEvent { kind, text })?;
                writeln!(self.out)?;
            }
        }
        Ok(())
    }
}

/// Color a kind label by what sort of construct it belongs to.
fn paint(kind: EventKind, label: &str) -> String {
    match kind {
        _ if kind.is_tag_part() => label.cyan().to_string(),
        EventKind::Entity => label.magenta().to_string(),
        EventKind::Cmnt | EventKind::Decl | EventKind::Pitarget | EventKind::Pi => {
            label.dimmed().to_string()
        }
        EventKind::Cdsect => label.yellow().to_string(),
        EventKind::Eof => label.green().to_string(),
        _ => label.to_string(),
    }
}

impl<W: Write> ScanHandler for EventWriter<W> {
    type Error = OutputError;

    fn gi(&mut self, name: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Gi, name)
    }

    fn aname(&mut self, name: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Aname, name)
    }

    fn adup(&mut self, name: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Adup, name)
    }

    fn aval(&mut self, value: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Aval, value)
    }

    fn stagc(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Stagc, text)
    }

    fn stage(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Stage, text)
    }

    fn etag(&mut self, name: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Etag, name)
    }

    fn pcdata(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Pcdata, text)
    }

    fn cdsect(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Cdsect, text)
    }

    fn cmnt(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Cmnt, text)
    }

    fn decl(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Decl, text)
    }

    fn pitarget(&mut self, target: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Pitarget, target)
    }

    fn pi(&mut self, body: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Pi, body)
    }

    fn entity(&mut self, name: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Entity, name)
    }

    fn eof(&mut self, text: &str) -> Result<(), Self::Error> {
        self.write_event(EventKind::Eof, text)
    }
}

#[cfg(test)]
mod tests {
    use tagsift_scan::{ScanOptions, Scanner};

    use super::*;

    fn quiet_scanner() -> Scanner {
        Scanner::with_options(ScanOptions::default().with_log_recoveries(false))
    }

    fn render(input: &str, format: Format) -> String {
        let mut writer = EventWriter::new(Vec::new(), format);
        let _ = quiet_scanner().scan(input, &mut writer).unwrap();
        String::from_utf8(writer.into_inner()).unwrap()
    }

    #[test]
    fn test_text_output() {
        let output = render("<p id=\"a\">x</p>", Format::Text);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                "gi       \"p\"",
                "aname    \"id\"",
                "aval     \"a\"",
                "stagc    \">\"",
                "pcdata   \"x\"",
                "etag     \"p\"",
                "eof      \"\"",
            ]
        );
    }

    #[test]
    fn test_text_output_escapes_newlines() {
        let output = render("a\nb", Format::Text);
        assert_eq!(output.lines().next(), Some("pcdata   \"a\\nb\""));
    }

    #[test]
    fn test_json_output() {
        let output = render("<br/>", Format::Json);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            [
                r#"{"kind":"gi","text":"br"}"#,
                r#"{"kind":"stage","text":"/>"}"#,
                r#"{"kind":"eof","text":""}"#,
            ]
        );
    }

    #[test]
    fn test_event_limit_aborts_scan() {
        let mut writer = EventWriter::new(Vec::new(), Format::Text).with_limit(Some(2));
        let result = quiet_scanner().scan("<a>text</a>", &mut writer);
        assert!(matches!(result, Err(OutputError::EventLimit { limit: 2 })));
        assert_eq!(String::from_utf8(writer.into_inner()).unwrap().lines().count(), 2);
    }
}
