//! The ordered position sequence built by the layout engine.

use std::rc::Rc;

use storyline_core::{entity::Speech, identifier::Id};

/// One entry of a [`PositionSequence`].
///
/// A `Gap` is a spacer introduced by a distant relation (`BEFORE` or
/// `AFTER`). It carries the speech that caused it so projection can filter
/// it with the same actor rules as the speech itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot {
    Placed(Rc<Speech>),
    Gap(Rc<Speech>),
}

impl Slot {
    /// The speech this slot holds or was introduced by.
    pub fn speech(&self) -> &Rc<Speech> {
        match self {
            Slot::Placed(speech) | Slot::Gap(speech) => speech,
        }
    }

    pub fn is_placed(&self) -> bool {
        matches!(self, Slot::Placed(_))
    }

    pub fn is_gap(&self) -> bool {
        matches!(self, Slot::Gap(_))
    }

    /// Returns the id of the held speech if this is a placed slot.
    pub fn placed_id(&self) -> Option<Id> {
        match self {
            Slot::Placed(speech) => Some(speech.id()),
            Slot::Gap(_) => None,
        }
    }
}

/// Ordered list of slots.
///
/// A speech appears in at most one placed slot. Gap slots may repeat a
/// speech, since each one only marks spacing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionSequence {
    slots: Vec<Slot>,
}

impl PositionSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter()
    }

    /// Index of the placed slot holding `speech_id`.
    pub fn position_of(&self, speech_id: Id) -> Option<usize> {
        self.slots
            .iter()
            .position(|slot| slot.placed_id() == Some(speech_id))
    }

    /// Whether a placed slot holds `speech_id`.
    pub fn contains(&self, speech_id: Id) -> bool {
        self.position_of(speech_id).is_some()
    }

    pub fn placed_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_placed()).count()
    }

    pub fn gap_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_gap()).count()
    }

    /// Inserts `slot` before the slot currently at `index` and returns the
    /// grown sequence.
    ///
    /// Slots at `index` and after shift right by one. An `index` past the end
    /// appends.
    ///
    /// # Examples
    ///
    /// ```
    /// # use std::rc::Rc;
    /// # use storyline::layout::{PositionSequence, Slot};
    /// # use storyline_core::{entity::Speech, identifier::Id};
    /// let first = Rc::new(Speech::new(Id::new("TS1"), "First", ""));
    /// let second = Rc::new(Speech::new(Id::new("TS2"), "Second", ""));
    ///
    /// let sequence = PositionSequence::new()
    ///     .insert_at(0, Slot::Placed(second))
    ///     .insert_at(0, Slot::Placed(first));
    ///
    /// assert_eq!(sequence.position_of(Id::new("TS1")), Some(0));
    /// assert_eq!(sequence.position_of(Id::new("TS2")), Some(1));
    /// ```
    pub fn insert_at(mut self, index: usize, slot: Slot) -> Self {
        debug_assert!(
            slot.placed_id().is_none_or(|id| !self.contains(id)),
            "speech is already placed"
        );
        let index = index.min(self.slots.len());
        self.slots.insert(index, slot);
        self
    }
}

impl<'a> IntoIterator for &'a PositionSequence {
    type Item = &'a Slot;
    type IntoIter = std::slice::Iter<'a, Slot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.iter()
    }
}
