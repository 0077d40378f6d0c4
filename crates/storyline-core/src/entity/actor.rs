//! Actors taking part in speeches.

use crate::identifier::Id;

/// A character or speaker of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    id: Id,
    name: String,
    is_main: bool,
}

impl Actor {
    /// Creates a new actor.
    ///
    /// # Arguments
    ///
    /// * `id` - Corpus-wide unique identifier
    /// * `name` - Display name, also usable as a lookup key
    /// * `is_main` - Whether this is one of the main characters
    pub fn new(id: Id, name: impl Into<String>, is_main: bool) -> Self {
        Self {
            id,
            name: name.into(),
            is_main,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_main(&self) -> bool {
        self.is_main
    }
}
