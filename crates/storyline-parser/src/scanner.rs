//! XML scanning.
//!
//! Walks the document once and extracts the corpus elements (`TA`, `TL`,
//! `TS`, `TREL`) with their attributes and source spans. Nesting and any
//! other elements are ignored; resolution happens later in the loader.

use std::fmt;

use indexmap::IndexMap;
use log::trace;
use quick_xml::{
    Reader,
    events::{BytesStart, Event},
};

use crate::{
    error::{Diagnostic, ErrorCode},
    span::Span,
};

/// The corpus element kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Tag {
    Actor,
    Location,
    Speech,
    Relation,
}

impl Tag {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"TA" => Some(Tag::Actor),
            b"TL" => Some(Tag::Location),
            b"TS" => Some(Tag::Speech),
            b"TREL" => Some(Tag::Relation),
            _ => None,
        }
    }

    /// The XML element name, e.g. `TREL`.
    pub(crate) fn element_name(self) -> &'static str {
        match self {
            Tag::Actor => "TA",
            Tag::Location => "TL",
            Tag::Speech => "TS",
            Tag::Relation => "TREL",
        }
    }
}

/// A corpus element as written in the source, before resolution.
#[derive(Debug, Clone)]
pub(crate) struct RawElement {
    tag: Tag,
    attributes: IndexMap<String, String>,
    span: Span,
}

impl RawElement {
    pub(crate) fn tag(&self) -> Tag {
        self.tag
    }

    pub(crate) fn span(&self) -> Span {
        self.span
    }

    /// Returns the attribute value, treating empty values as absent.
    pub(crate) fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Scans `source` and returns its corpus elements in document order.
///
/// # Errors
///
/// Returns an [`ErrorCode::E100`] diagnostic at the first syntax error.
pub(crate) fn scan(source: &str) -> Result<Vec<RawElement>, Diagnostic> {
    let mut reader = Reader::from_str(source);
    reader.config_mut().trim_text(true);

    let mut elements = Vec::new();
    loop {
        let before = reader.buffer_position() as usize;
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(err) => {
                let at = reader.buffer_position() as usize;
                return Err(malformed(point_span(source, at), err));
            }
        };
        let after = reader.buffer_position() as usize;

        match event {
            Event::Start(start) | Event::Empty(start) => {
                let Some(tag) = Tag::from_name(start.local_name().as_ref()) else {
                    continue;
                };
                let span = element_span(source, before, after);
                let attributes = read_attributes(&start, span)?;
                trace!(tag = tag.element_name(), start = span.start(); "Scanned element");
                elements.push(RawElement {
                    tag,
                    attributes,
                    span,
                });
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(elements)
}

fn read_attributes(start: &BytesStart, span: Span) -> Result<IndexMap<String, String>, Diagnostic> {
    let mut attributes = IndexMap::new();
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|err| malformed(span, err))?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
        let value = attribute
            .unescape_value()
            .map_err(|err| malformed(span, err))?;
        attributes.insert(key, value.into_owned());
    }
    Ok(attributes)
}

/// Narrows `before..after` to start at the element's `<`, skipping the
/// whitespace the reader consumed ahead of it.
fn element_span(source: &str, before: usize, after: usize) -> Span {
    let offset = source
        .get(before..after)
        .and_then(|text| text.find('<'))
        .unwrap_or(0);
    Span::new(before + offset..after)
}

/// A one-byte span at `at`, clamped to the source.
fn point_span(source: &str, at: usize) -> Span {
    let start = at.min(source.len().saturating_sub(1));
    Span::new(start..(start + 1).min(source.len()))
}

fn malformed(span: Span, err: impl fmt::Display) -> Diagnostic {
    Diagnostic::error(format!("malformed XML: {err}"))
        .with_code(ErrorCode::E100)
        .with_label(span, "syntax error here")
}
