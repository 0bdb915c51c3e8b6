//! Owned lexical events, and a handler that records them.

use std::convert::Infallible;
use std::fmt;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

use crate::handler::ScanHandler;

/// The kind of a lexical event. One variant per [`ScanHandler`] method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// Start tag name.
    Gi,
    /// Attribute name followed by a value.
    Aname,
    /// Attribute name without a value.
    Adup,
    /// Attribute value.
    Aval,
    /// Start tag closed by `>`.
    Stagc,
    /// Empty-element tag closed by `/>`.
    Stage,
    /// End tag name.
    Etag,
    /// Character data.
    Pcdata,
    /// CDATA section content.
    Cdsect,
    /// Comment content.
    Cmnt,
    /// Declaration content.
    Decl,
    /// Processing instruction target.
    Pitarget,
    /// Processing instruction body.
    Pi,
    /// Resolved reference.
    Entity,
    /// End of input.
    Eof,
}

impl EventKind {
    /// Deliver `text` to the handler method this kind names.
    pub fn dispatch<H: ScanHandler + ?Sized>(
        self,
        text: &str,
        handler: &mut H,
    ) -> Result<(), H::Error> {
        match self {
            Self::Gi => handler.gi(text),
            Self::Aname => handler.aname(text),
            Self::Adup => handler.adup(text),
            Self::Aval => handler.aval(text),
            Self::Stagc => handler.stagc(text),
            Self::Stage => handler.stage(text),
            Self::Etag => handler.etag(text),
            Self::Pcdata => handler.pcdata(text),
            Self::Cdsect => handler.cdsect(text),
            Self::Cmnt => handler.cmnt(text),
            Self::Decl => handler.decl(text),
            Self::Pitarget => handler.pitarget(text),
            Self::Pi => handler.pi(text),
            Self::Entity => handler.entity(text),
            Self::Eof => handler.eof(text),
        }
    }

    /// Whether this event is part of a start or end tag.
    #[must_use]
    pub const fn is_tag_part(self) -> bool {
        matches!(
            self,
            Self::Gi | Self::Aname | Self::Adup | Self::Aval | Self::Stagc | Self::Stage | Self::Etag
        )
    }
}

/// A lexical event with its own copy of the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Event {
    /// Which handler method the event corresponds to.
    pub kind: EventKind,
    /// The text the handler received.
    pub text: String,
}

impl Event {
    /// Create an event.
    pub fn new(kind: EventKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Replay this event into `handler`.
    pub fn dispatch<H: ScanHandler + ?Sized>(&self, handler: &mut H) -> Result<(), H::Error> {
        self.kind.dispatch(&self.text, handler)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({:?})", self.kind, self.text)
    }
}

/// A handler that keeps every event it receives.
#[derive(Debug, Clone, Default)]
pub struct EventCollector {
    events: Vec<Event>,
}

impl EventCollector {
    /// Create an empty collector.
    #[must_use]
    pub const fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Events received so far, in order.
    #[must_use]
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Take the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    fn record(&mut self, kind: EventKind, text: &str) {
        self.events.push(Event::new(kind, text));
    }
}

impl ScanHandler for EventCollector {
    type Error = Infallible;

    fn gi(&mut self, name: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Gi, name);
        Ok(())
    }

    fn aname(&mut self, name: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Aname, name);
        Ok(())
    }

    fn adup(&mut self, name: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Adup, name);
        Ok(())
    }

    fn aval(&mut self, value: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Aval, value);
        Ok(())
    }

    fn stagc(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Stagc, text);
        Ok(())
    }

    fn stage(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Stage, text);
        Ok(())
    }

    fn etag(&mut self, name: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Etag, name);
        Ok(())
    }

    fn pcdata(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Pcdata, text);
        Ok(())
    }

    fn cdsect(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Cdsect, text);
        Ok(())
    }

    fn cmnt(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Cmnt, text);
        Ok(())
    }

    fn decl(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Decl, text);
        Ok(())
    }

    fn pitarget(&mut self, target: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Pitarget, target);
        Ok(())
    }

    fn pi(&mut self, body: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Pi, body);
        Ok(())
    }

    fn entity(&mut self, name: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Entity, name);
        Ok(())
    }

    fn eof(&mut self, text: &str) -> Result<(), Self::Error> {
        self.record(EventKind::Eof, text);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_handler_methods() {
        assert_eq!(EventKind::Pitarget.to_string(), "pitarget");
        let name: &'static str = EventKind::Stagc.into();
        assert_eq!(name, "stagc");
    }

    #[test]
    fn test_event_display() {
        let event = Event::new(EventKind::Aval, "a \"b\"");
        assert_eq!(event.to_string(), r#"aval("a \"b\"")"#);
    }

    #[test]
    fn test_replay_into_collector() {
        let mut collector = EventCollector::new();
        let events = [Event::new(EventKind::Gi, "p"), Event::new(EventKind::Stagc, ">")];
        for event in &events {
            let Ok(()) = event.dispatch(&mut collector);
        }
        assert_eq!(collector.events(), &events);
    }
}
