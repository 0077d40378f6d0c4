//! Errors raised while assembling the entity model.

use std::fmt;

use thiserror::Error;

use crate::identifier::Id;

/// The kinds of entity a corpus declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Actor,
    Location,
    Speech,
    Relation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Actor => write!(f, "actor"),
            EntityKind::Location => write!(f, "location"),
            EntityKind::Speech => write!(f, "speech"),
            EntityKind::Relation => write!(f, "relation"),
        }
    }
}

/// Contract violations detected while building a [`Corpus`](crate::entity::Corpus).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntityError {
    #[error("unknown relation kind `{0}`")]
    UnknownRelationKind(String),

    #[error("{kind} `{id}` is defined multiple times")]
    DuplicateId { kind: EntityKind, id: Id },
}
