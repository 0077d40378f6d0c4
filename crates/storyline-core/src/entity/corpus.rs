//! By-id lookup over a loaded corpus.
//!
//! A [`Corpus`] owns every entity of a document. It is filled once by the
//! loader and then only read. All lookups are pure and iteration follows
//! document order.

use std::rc::Rc;

use indexmap::{IndexMap, map::Entry};

use crate::{
    entity::{Actor, Location, Relation, Speech},
    error::{EntityError, EntityKind},
    identifier::Id,
};

/// Every entity of one narrative corpus.
#[derive(Debug, Default, Clone)]
pub struct Corpus {
    actors: IndexMap<Id, Rc<Actor>>,
    locations: IndexMap<Id, Rc<Location>>,
    speeches: IndexMap<Id, Rc<Speech>>,
    relations: Vec<Relation>,
}

/// Inserts `value` under `id`, refusing to overwrite an existing entry.
fn insert_unique<T>(
    map: &mut IndexMap<Id, Rc<T>>,
    kind: EntityKind,
    id: Id,
    value: T,
) -> Result<Rc<T>, EntityError> {
    match map.entry(id) {
        Entry::Occupied(_) => Err(EntityError::DuplicateId { kind, id }),
        Entry::Vacant(entry) => Ok(Rc::clone(entry.insert(Rc::new(value)))),
    }
}

impl Corpus {
    /// Creates an empty corpus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an actor.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::DuplicateId`] if an actor with the same id exists.
    pub fn add_actor(&mut self, actor: Actor) -> Result<Rc<Actor>, EntityError> {
        insert_unique(&mut self.actors, EntityKind::Actor, actor.id(), actor)
    }

    /// Adds a location.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::DuplicateId`] if a location with the same id exists.
    pub fn add_location(&mut self, location: Location) -> Result<Rc<Location>, EntityError> {
        insert_unique(
            &mut self.locations,
            EntityKind::Location,
            location.id(),
            location,
        )
    }

    /// Adds a speech.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::DuplicateId`] if a speech with the same id exists.
    pub fn add_speech(&mut self, speech: Speech) -> Result<Rc<Speech>, EntityError> {
        insert_unique(&mut self.speeches, EntityKind::Speech, speech.id(), speech)
    }

    /// Appends a relation.
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::DuplicateId`] if a relation with the same id exists.
    pub fn add_relation(&mut self, relation: Relation) -> Result<(), EntityError> {
        if self.relations.iter().any(|r| r.id() == relation.id()) {
            return Err(EntityError::DuplicateId {
                kind: EntityKind::Relation,
                id: relation.id(),
            });
        }
        self.relations.push(relation);
        Ok(())
    }

    pub fn actor(&self, id: Id) -> Option<&Rc<Actor>> {
        self.actors.get(&id)
    }

    /// Finds the first actor, in document order, whose name is exactly `name`.
    pub fn actor_by_name(&self, name: &str) -> Option<&Rc<Actor>> {
        self.actors.values().find(|actor| actor.name() == name)
    }

    /// Resolves an actor token: first as an id, then as a name.
    ///
    /// # Examples
    ///
    /// ```
    /// use storyline_core::{
    ///     entity::{Actor, Corpus},
    ///     identifier::Id,
    /// };
    ///
    /// let mut corpus = Corpus::new();
    /// corpus.add_actor(Actor::new(Id::new("TA1"), "Ariadne", true)).unwrap();
    ///
    /// assert!(corpus.resolve_actor("TA1").is_some());
    /// assert!(corpus.resolve_actor("Ariadne").is_some());
    /// assert!(corpus.resolve_actor("Theseus").is_none());
    /// ```
    pub fn resolve_actor(&self, token: &str) -> Option<&Rc<Actor>> {
        self.actor(Id::new(token))
            .or_else(|| self.actor_by_name(token))
    }

    pub fn location(&self, id: Id) -> Option<&Rc<Location>> {
        self.locations.get(&id)
    }

    /// Resolves the parent of `location`. Unknown parent ids resolve to `None`.
    pub fn location_parent(&self, location: &Location) -> Option<&Rc<Location>> {
        location.parent_id().and_then(|id| self.location(id))
    }

    pub fn speech(&self, id: Id) -> Option<&Rc<Speech>> {
        self.speeches.get(&id)
    }

    pub fn actors(&self) -> impl Iterator<Item = &Rc<Actor>> {
        self.actors.values()
    }

    pub fn locations(&self) -> impl Iterator<Item = &Rc<Location>> {
        self.locations.values()
    }

    pub fn speeches(&self) -> impl Iterator<Item = &Rc<Speech>> {
        self.speeches.values()
    }

    /// Relations in document order.
    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    /// Id and name of every actor, in document order.
    pub fn actor_names(&self) -> Vec<(Id, &str)> {
        self.actors
            .values()
            .map(|actor| (actor.id(), actor.name()))
            .collect()
    }
}
