//! Property tests for the scanner over generated markup.

use quickcheck::{Arbitrary, Gen};
use quickcheck_macros::quickcheck;
use tagsift_scan::{Event, EventKind, ScanHandler, ScanOptions, Scanner, collect_events};

/// Fragments that exercise every scanner state when glued together.
const PIECES: &[&str] = &[
    "<", ">", "/", "</", "<!", "<?", "?>", "!", "-", "--", "-->", "[CDATA[", "]]>", "]", "&",
    ";", "#", "#x", "amp", "lt", "41", "=", "\"", "'", " ", "\n", "a", "b", "p", "script",
    "é", "日",
];

#[derive(Debug, Clone)]
struct Markup(String);

impl Arbitrary for Markup {
    fn arbitrary(g: &mut Gen) -> Self {
        let len = usize::arbitrary(g) % (g.size() + 1);
        let mut text = String::new();
        for _ in 0..len {
            if let Some(piece) = g.choose(PIECES) {
                text.push_str(piece);
            }
        }
        Self(text)
    }
}

fn scan(input: &str, options: ScanOptions) -> Vec<Event> {
    collect_events(input, options.with_log_recoveries(false))
}

/// Fails once it has accepted `limit` events.
struct FailAfter {
    limit: usize,
    seen: Vec<Event>,
}

impl FailAfter {
    fn accept(&mut self, kind: EventKind, text: &str) -> Result<(), ()> {
        if self.seen.len() == self.limit {
            return Err(());
        }
        self.seen.push(Event::new(kind, text));
        Ok(())
    }
}

impl ScanHandler for FailAfter {
    type Error = ();

    fn gi(&mut self, name: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Gi, name)
    }

    fn aval(&mut self, value: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Aval, value)
    }

    fn stagc(&mut self, text: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Stagc, text)
    }

    fn etag(&mut self, name: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Etag, name)
    }

    fn pcdata(&mut self, text: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Pcdata, text)
    }

    fn cmnt(&mut self, text: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Cmnt, text)
    }

    fn entity(&mut self, name: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Entity, name)
    }

    fn eof(&mut self, text: &str) -> Result<(), Self::Error> {
        self.accept(EventKind::Eof, text)
    }
}

#[quickcheck]
fn prop_eof_exactly_once_and_last(markup: Markup) -> bool {
    let events = scan(&markup.0, ScanOptions::default());
    let eofs = events.iter().filter(|e| e.kind == EventKind::Eof).count();
    eofs == 1 && events.last().is_some_and(|e| e.kind == EventKind::Eof && e.text.is_empty())
}

#[quickcheck]
fn prop_eof_exactly_once_with_raw_text(markup: Markup) -> bool {
    let events = scan(&markup.0, ScanOptions::html());
    events.iter().filter(|e| e.kind == EventKind::Eof).count() == 1
}

#[quickcheck]
fn prop_scanning_is_deterministic(markup: Markup) -> bool {
    scan(&markup.0, ScanOptions::html()) == scan(&markup.0, ScanOptions::html())
}

#[quickcheck]
fn prop_character_data_is_never_empty_or_split(markup: Markup) -> bool {
    let events = scan(&markup.0, ScanOptions::default());
    let no_empty = events
        .iter()
        .all(|e| e.kind != EventKind::Pcdata || !e.text.is_empty());
    let no_adjacent = events
        .windows(2)
        .all(|w| !(w[0].kind == EventKind::Pcdata && w[1].kind == EventKind::Pcdata));
    no_empty && no_adjacent
}

#[quickcheck]
fn prop_start_tags_are_closed(markup: Markup) -> bool {
    // Every gi is followed by its stagc or stage before any non-tag event.
    let events = scan(&markup.0, ScanOptions::default());
    let mut open = false;
    for event in &events {
        match event.kind {
            EventKind::Gi => {
                if open {
                    return false;
                }
                open = true;
            }
            EventKind::Stagc | EventKind::Stage => open = false,
            EventKind::Entity | EventKind::Aname | EventKind::Adup | EventKind::Aval => {}
            _ if open => return false,
            _ => {}
        }
    }
    !open
}

#[quickcheck]
fn prop_text_without_markup_is_one_event(text: String) -> bool {
    let text: String = text.chars().filter(|c| *c != '<' && *c != '&').collect();
    let events = scan(&text, ScanOptions::default());
    if text.is_empty() {
        events == [Event::new(EventKind::Eof, "")]
    } else {
        events == [Event::new(EventKind::Pcdata, text), Event::new(EventKind::Eof, "")]
    }
}

#[quickcheck]
fn prop_failure_stops_delivery(markup: Markup, limit: u8) -> bool {
    let scanner = Scanner::with_options(ScanOptions::default().with_log_recoveries(false));
    let mut full = FailAfter {
        limit: usize::MAX,
        seen: Vec::new(),
    };
    let Ok(_) = scanner.scan(&markup.0, &mut full) else {
        return false;
    };

    let limit = usize::from(limit);
    let mut failing = FailAfter {
        limit,
        seen: Vec::new(),
    };
    let result = scanner.scan(&markup.0, &mut failing);
    if limit >= full.seen.len() {
        result.is_ok() && failing.seen == full.seen
    } else {
        result.is_err() && failing.seen[..] == full.seen[..limit]
    }
}
