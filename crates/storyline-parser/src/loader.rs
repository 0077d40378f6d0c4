//! Resolution of scanned elements into a [`Corpus`].
//!
//! Elements are resolved kind by kind (actors, locations, speeches,
//! relations) so references may point forward in the document.

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, warn};

use storyline_core::{
    entity::{Actor, Corpus, Location, Relation, RelationKind, Speech},
    error::{EntityError, EntityKind},
    identifier::Id,
};

use crate::{
    error::{Diagnostic, DiagnosticCollector, ErrorCode},
    scanner::{RawElement, Tag},
    span::Span,
};

pub(crate) struct Loader<'a> {
    elements: &'a [RawElement],
    corpus: Corpus,
    collector: DiagnosticCollector,
    first_spans: IndexMap<(EntityKind, Id), Span>,
}

impl<'a> Loader<'a> {
    pub(crate) fn new(elements: &'a [RawElement]) -> Self {
        Self {
            elements,
            corpus: Corpus::new(),
            collector: DiagnosticCollector::new(),
            first_spans: IndexMap::new(),
        }
    }

    /// Resolves every element and returns the corpus with its warnings.
    pub(crate) fn load(mut self) -> (Corpus, DiagnosticCollector) {
        let elements = self.elements;
        for element in of_tag(elements, Tag::Actor) {
            self.load_actor(element);
        }
        for element in of_tag(elements, Tag::Location) {
            self.load_location(element);
        }
        for element in of_tag(elements, Tag::Speech) {
            self.load_speech(element);
        }
        for element in of_tag(elements, Tag::Relation) {
            self.load_relation(element);
        }

        debug!(
            actors = self.corpus.actors().count(),
            locations = self.corpus.locations().count(),
            speeches = self.corpus.speeches().count(),
            relations = self.corpus.relations().len();
            "Corpus resolved"
        );
        (self.corpus, self.collector)
    }

    fn load_actor(&mut self, element: &RawElement) {
        let Some(id) = self.required(element, "ID") else {
            return;
        };
        let name = element.attribute("NAME").unwrap_or(id);
        let is_main = element.attribute("MAIN").is_some_and(parse_flag);

        let actor = Actor::new(Id::new(id), name, is_main);
        let result = self.corpus.add_actor(actor).map(|_| ());
        self.record(EntityKind::Actor, Id::new(id), element.span(), result);
    }

    fn load_location(&mut self, element: &RawElement) {
        let Some(id) = self.required(element, "ID") else {
            return;
        };
        let name = element.attribute("NAME").unwrap_or_default();
        let parent = element.attribute("PARENTID").map(Id::new);

        let location = Location::new(Id::new(id), name, parent);
        let result = self.corpus.add_location(location).map(|_| ());
        self.record(EntityKind::Location, Id::new(id), element.span(), result);
    }

    fn load_speech(&mut self, element: &RawElement) {
        let Some(id) = self.required(element, "ID") else {
            return;
        };
        let mut speech = Speech::new(
            Id::new(id),
            element.attribute("NAME").unwrap_or_default(),
            element.attribute("TEXT").unwrap_or_default(),
        );

        if let Some(location_id) = element.attribute("LOCATION") {
            match self.corpus.location(Id::new(location_id)) {
                Some(location) => speech = speech.with_location(Rc::clone(location)),
                None => self.emit_warning(
                    Diagnostic::warning(format!(
                        "speech `{id}` refers to unknown location `{location_id}`"
                    ))
                    .with_code(ErrorCode::E305)
                    .with_label(element.span(), "location referenced here")
                    .with_help("the speech is loaded without a location"),
                ),
            }
        }

        for token in tokens(element.attribute("ACTORS")) {
            match self.corpus.resolve_actor(token) {
                Some(actor) => speech = speech.with_actor(Rc::clone(actor)),
                None => self.emit_warning(
                    Diagnostic::warning(format!(
                        "actor token `{token}` of speech `{id}` matches no actor id or name"
                    ))
                    .with_code(ErrorCode::E304)
                    .with_label(element.span(), "token listed here")
                    .with_help("the token is ignored"),
                ),
            }
        }

        for token in tokens(element.attribute("PER")) {
            match self.corpus.actor(Id::new(token)) {
                Some(person) => speech = speech.with_person(Rc::clone(person)),
                None => self.emit_warning(
                    Diagnostic::warning(format!(
                        "person token `{token}` of speech `{id}` matches no actor id"
                    ))
                    .with_code(ErrorCode::E306)
                    .with_label(element.span(), "token listed here")
                    .with_help("the token is ignored"),
                ),
            }
        }

        let result = self.corpus.add_speech(speech).map(|_| ());
        self.record(EntityKind::Speech, Id::new(id), element.span(), result);
    }

    fn load_relation(&mut self, element: &RawElement) {
        let id = self.required(element, "ID");
        let from = self.required(element, "FROM");
        let to = self.required(element, "TO");
        let kind = self.required(element, "REL");
        let (Some(id), Some(from), Some(to), Some(kind)) = (id, from, to, kind) else {
            return;
        };

        let kind = match kind.parse::<RelationKind>() {
            Ok(kind) => Some(kind),
            Err(err) => {
                self.collector.emit(
                    Diagnostic::error(err.to_string())
                        .with_code(ErrorCode::E302)
                        .with_label(element.span(), format!("relation `{id}` declared here"))
                        .with_help(format!(
                            "expected one of {}",
                            RelationKind::ALL.map(RelationKind::as_str).join(", ")
                        )),
                );
                None
            }
        };
        let from = self.speech_endpoint(element, id, from, "FROM");
        let to = self.speech_endpoint(element, id, to, "TO");
        let (Some(kind), Some(from), Some(to)) = (kind, from, to) else {
            return;
        };

        let trigger = element.attribute("TRIGGER").unwrap_or_default();
        let relation = Relation::new(Id::new(id), from, to, kind, trigger);
        let result = self.corpus.add_relation(relation);
        self.record(EntityKind::Relation, Id::new(id), element.span(), result);
    }

    fn speech_endpoint(
        &mut self,
        element: &RawElement,
        relation_id: &str,
        speech_id: &str,
        attribute: &str,
    ) -> Option<Rc<Speech>> {
        let speech = self.corpus.speech(Id::new(speech_id)).map(Rc::clone);
        if speech.is_none() {
            self.collector.emit(
                Diagnostic::error(format!(
                    "relation `{relation_id}` refers to unknown speech `{speech_id}`"
                ))
                .with_code(ErrorCode::E303)
                .with_label(element.span(), "referenced here")
                .with_help(format!(
                    "declare a <TS ID=\"{speech_id}\"> element or fix the {attribute} attribute"
                )),
            );
        }
        speech
    }

    /// Returns a required attribute, emitting [`ErrorCode::E300`] when absent.
    fn required<'e>(&mut self, element: &'e RawElement, name: &str) -> Option<&'e str> {
        let value = element.attribute(name);
        if value.is_none() {
            let element_name = element.tag().element_name();
            self.collector.emit(
                Diagnostic::error(format!(
                    "<{element_name}> element is missing required attribute `{name}`"
                ))
                .with_code(ErrorCode::E300)
                .with_label(element.span(), "element declared here")
                .with_help(format!("add a non-empty {name}=\"...\" attribute")),
            );
        }
        value
    }

    /// Remembers where an entity was first defined, or reports a duplicate.
    fn record(&mut self, kind: EntityKind, id: Id, span: Span, result: Result<(), EntityError>) {
        match result {
            Ok(()) => {
                self.first_spans.insert((kind, id), span);
            }
            Err(err) => {
                let mut diag = Diagnostic::error(err.to_string())
                    .with_code(ErrorCode::E301)
                    .with_label(span, "duplicate definition");
                if let Some(first) = self.first_spans.get(&(kind, id)) {
                    diag = diag.with_secondary_label(*first, "first defined here");
                }
                self.collector
                    .emit(diag.with_help(format!("{kind} ids must be unique within a corpus")));
            }
        }
    }

    fn emit_warning(&mut self, diagnostic: Diagnostic) {
        warn!(message = diagnostic.message(); "Corpus warning");
        self.collector.emit(diagnostic);
    }
}

fn of_tag(elements: &[RawElement], tag: Tag) -> impl Iterator<Item = &RawElement> {
    elements.iter().filter(move |element| element.tag() == tag)
}

/// Splits a comma-separated token list, dropping blank entries.
fn tokens(list: Option<&str>) -> impl Iterator<Item = &str> {
    list.into_iter()
        .flat_map(|list| list.split(','))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn parse_flag(value: &str) -> bool {
    matches!(value.to_ascii_lowercase().as_str(), "true" | "1" | "yes")
}
