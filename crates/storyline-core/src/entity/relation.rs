//! Typed temporal relations between speeches.

use std::{fmt, rc::Rc, str::FromStr};

use crate::{entity::Speech, error::EntityError, identifier::Id};

/// The temporal ordering a [`Relation`] asserts between its endpoints.
///
/// Read as "`from` happens *kind* `to`".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `from` directly precedes `to`.
    ImmediatelyBefore,
    /// `from` directly follows `to`.
    ImmediatelyAfter,
    /// `from` precedes `to` with unspecified narrative distance.
    Before,
    /// `from` follows `to` with unspecified narrative distance.
    After,
    /// `from` happens at the same time as `to`.
    Simultaneous,
}

impl RelationKind {
    /// All kinds, in declaration order.
    pub const ALL: [RelationKind; 5] = [
        RelationKind::ImmediatelyBefore,
        RelationKind::ImmediatelyAfter,
        RelationKind::Before,
        RelationKind::After,
        RelationKind::Simultaneous,
    ];

    /// Returns the corpus spelling of this kind, e.g. `IMMEDIATELY_BEFORE`.
    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::ImmediatelyBefore => "IMMEDIATELY_BEFORE",
            RelationKind::ImmediatelyAfter => "IMMEDIATELY_AFTER",
            RelationKind::Before => "BEFORE",
            RelationKind::After => "AFTER",
            RelationKind::Simultaneous => "SIMULTANEOUS",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationKind {
    type Err = EntityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RelationKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| EntityError::UnknownRelationKind(s.to_string()))
    }
}

/// A directed edge between two speeches.
#[derive(Debug, Clone)]
pub struct Relation {
    id: Id,
    from: Rc<Speech>,
    to: Rc<Speech>,
    kind: RelationKind,
    trigger: String,
}

impl Relation {
    /// Creates a new relation stating that `from` happens `kind` `to`.
    pub fn new(
        id: Id,
        from: Rc<Speech>,
        to: Rc<Speech>,
        kind: RelationKind,
        trigger: impl Into<String>,
    ) -> Self {
        Self {
            id,
            from,
            to,
            kind,
            trigger: trigger.into(),
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    /// The speech being positioned by this relation.
    pub fn from(&self) -> &Rc<Speech> {
        &self.from
    }

    /// The reference speech `from` is positioned against.
    pub fn to(&self) -> &Rc<Speech> {
        &self.to
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    /// Text span of the corpus that triggered this relation.
    pub fn trigger(&self) -> &str {
        &self.trigger
    }

    /// Returns `true` if either endpoint has `actor_id` among its actors.
    pub fn has_actor(&self, actor_id: Id) -> bool {
        self.from.has_actor(actor_id) || self.to.has_actor(actor_id)
    }

    /// Returns `true` if either endpoint has at least one of `actor_ids`.
    pub fn has_any_of_actors(&self, actor_ids: &[Id]) -> bool {
        self.from.has_any_of_actors(actor_ids) || self.to.has_any_of_actors(actor_ids)
    }

    /// Returns `true` if every one of `actor_ids` appears on at least one
    /// endpoint.
    pub fn has_all_of_actors(&self, actor_ids: &[Id]) -> bool {
        actor_ids
            .iter()
            .all(|&actor_id| self.has_actor(actor_id))
    }
}
