//! Places where speeches happen.

use crate::identifier::Id;

/// A named place, optionally nested inside a parent location.
///
/// The parent is stored by id only. Resolve it through
/// [`Corpus::location_parent`](crate::entity::Corpus::location_parent), which
/// returns `None` for ids that do not exist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    id: Id,
    name: String,
    parent: Option<Id>,
}

impl Location {
    pub fn new(id: Id, name: impl Into<String>, parent: Option<Id>) -> Self {
        Self {
            id,
            name: name.into(),
            parent,
        }
    }

    pub fn id(&self) -> Id {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the id of the parent location, if one was declared.
    pub fn parent_id(&self) -> Option<Id> {
        self.parent
    }
}
