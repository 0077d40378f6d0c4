//! Speeches, the event nodes of a timeline.

use std::{
    hash::{Hash, Hasher},
    rc::Rc,
};

use crate::{
    entity::{Actor, Location},
    identifier::Id,
};

/// A narrative event: a stretch of text spoken or performed by actors at a
/// location.
///
/// Equality and hashing consider the id only. Two `Speech` values built
/// separately from the same corpus element compare equal.
///
/// # Examples
///
/// ```
/// use std::rc::Rc;
///
/// use storyline_core::{
///     entity::{Actor, Speech},
///     identifier::Id,
/// };
///
/// let hero = Rc::new(Actor::new(Id::new("TA1"), "Hero", true));
/// let speech = Speech::new(Id::new("TS1"), "Arrival", "The hero arrives.")
///     .with_actor(Rc::clone(&hero))
///     .with_actor(hero);
///
/// assert_eq!(speech.actors().len(), 1);
/// assert!(speech.has_actor(Id::new("TA1")));
/// ```
#[derive(Debug, Clone)]
pub struct Speech {
    id: Id,
    name: String,
    text: String,
    location: Option<Rc<Location>>,
    actors: Vec<Rc<Actor>>,
    persons: Vec<Rc<Actor>>,
}

impl Speech {
    pub fn new(id: Id, name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            text: text.into(),
            location: None,
            actors: Vec::new(),
            persons: Vec::new(),
        }
    }

    /// Sets the location of this speech.
    pub fn with_location(mut self, location: Rc<Location>) -> Self {
        self.location = Some(location);
        self
    }

    /// Appends an actor unless one with the same id is already present.
    pub fn with_actor(mut self, actor: Rc<Actor>) -> Self {
        if !self.has_actor(actor.id()) {
            self.actors.push(actor);
        }
        self
    }

    /// Appends a mentioned person.
    pub fn with_person(mut self, person: Rc<Actor>) -> Self {
        self.persons.push(person);
        self
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn location(&self) -> Option<&Location> {
        self.location.as_deref()
    }

    /// Actors of this speech in document order.
    pub fn actors(&self) -> &[Rc<Actor>] {
        &self.actors
    }

    /// Persons mentioned by this speech in document order.
    pub fn persons(&self) -> &[Rc<Actor>] {
        &self.persons
    }

    /// Returns `true` if `actor_id` is among the actors.
    pub fn has_actor(&self, actor_id: Id) -> bool {
        self.actors.iter().any(|actor| actor.id() == actor_id)
    }

    /// Returns `true` if at least one of `actor_ids` is among the actors.
    pub fn has_any_of_actors(&self, actor_ids: &[Id]) -> bool {
        self.actors
            .iter()
            .any(|actor| actor_ids.contains(&actor.id()))
    }

    /// Returns `true` if every one of `actor_ids` is among the actors.
    ///
    /// Vacuously `true` for an empty id list.
    pub fn has_all_of_actors(&self, actor_ids: &[Id]) -> bool {
        actor_ids.iter().all(|&actor_id| self.has_actor(actor_id))
    }
}

impl PartialEq for Speech {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Speech {}

impl Hash for Speech {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: &str) -> Rc<Actor> {
        Rc::new(Actor::new(Id::new(id), id, false))
    }

    #[test]
    fn test_equality_is_by_id() {
        let first = Speech::new(Id::new("TS1"), "one", "text");
        let second = Speech::new(Id::new("TS1"), "other name", "other text");
        let third = Speech::new(Id::new("TS2"), "one", "text");

        assert_eq!(first, second);
        assert_ne!(first, third);
    }

    #[test]
    fn test_actors_are_unique_and_ordered() {
        let speech = Speech::new(Id::new("TS1"), "s", "t")
            .with_actor(actor("B"))
            .with_actor(actor("A"))
            .with_actor(actor("B"));

        let ids: Vec<_> = speech.actors().iter().map(|a| a.id()).collect();
        assert_eq!(ids, vec![Id::new("B"), Id::new("A")]);
    }

    #[test]
    fn test_membership_predicates() {
        let speech = Speech::new(Id::new("TS1"), "s", "t")
            .with_actor(actor("A"))
            .with_actor(actor("B"));
        let a = Id::new("A");
        let b = Id::new("B");
        let c = Id::new("C");

        assert!(speech.has_actor(a));
        assert!(!speech.has_actor(c));
        assert!(speech.has_any_of_actors(&[c, b]));
        assert!(!speech.has_any_of_actors(&[c]));
        assert!(!speech.has_any_of_actors(&[]));
        assert!(speech.has_all_of_actors(&[a, b]));
        assert!(!speech.has_all_of_actors(&[a, c]));
        assert!(speech.has_all_of_actors(&[]));
    }

    #[test]
    fn test_empty_actor_list() {
        let speech = Speech::new(Id::new("TS1"), "s", "t");

        assert!(speech.actors().is_empty());
        assert!(!speech.has_actor(Id::new("A")));
        assert!(!speech.has_any_of_actors(&[Id::new("A")]));
        assert!(speech.location().is_none());
    }
}
