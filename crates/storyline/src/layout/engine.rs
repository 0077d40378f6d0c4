//! Multi-pass placement of speeches on a single timeline track.
//!
//! Each pass walks the relations in document order and inserts the `from`
//! speech relative to the already placed `to` speech. Relations whose `to`
//! is not yet placed are retried on the next pass, until every relation is
//! resolved, a pass makes no progress, or the pass ceiling is reached.

use std::rc::Rc;

use log::{debug, info, trace, warn};

use storyline_core::{
    entity::{Relation, RelationKind, Speech},
    identifier::Id,
};

use crate::{
    error::StorylineError,
    layout::{PositionSequence, Slot},
    structure::RelationGraph,
};

/// Pass ceiling used when none is configured.
pub const DEFAULT_MAX_PASSES: usize = 10;

/// Why a relation could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrphanReason {
    /// No chain of relations links the speech to the anchor.
    Unreachable,
    /// The speech is reachable but the pass ceiling stopped the run first.
    PassLimit,
}

/// A relation left unresolved after the final pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orphan {
    relation: Id,
    from: Id,
    to: Id,
    reason: OrphanReason,
}

impl Orphan {
    pub fn relation(&self) -> Id {
        self.relation
    }

    /// The speech that could not be placed.
    pub fn from(&self) -> Id {
        self.from
    }

    pub fn to(&self) -> Id {
        self.to
    }

    pub fn reason(&self) -> OrphanReason {
        self.reason
    }
}

/// Result of a layout run.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    sequence: PositionSequence,
    orphans: Vec<Orphan>,
    passes: usize,
}

impl Layout {
    pub fn sequence(&self) -> &PositionSequence {
        &self.sequence
    }

    /// Unresolved relations, in relation order.
    pub fn orphans(&self) -> &[Orphan] {
        &self.orphans
    }

    /// Ids of the speeches that could not be placed, in relation order and
    /// without duplicates.
    pub fn orphan_ids(&self) -> Vec<Id> {
        let mut ids: Vec<Id> = Vec::with_capacity(self.orphans.len());
        for orphan in &self.orphans {
            if !ids.contains(&orphan.from) {
                ids.push(orphan.from);
            }
        }
        ids
    }

    /// Number of passes executed.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Whether every relation was resolved.
    pub fn is_complete(&self) -> bool {
        self.orphans.is_empty()
    }
}

/// Places speeches according to their relations.
///
/// # Examples
///
/// ```
/// # use std::rc::Rc;
/// # use storyline::layout::LayoutEngine;
/// # use storyline_core::{entity::{Relation, RelationKind, Speech}, identifier::Id};
/// let dawn = Rc::new(Speech::new(Id::new("TS1"), "Dawn", ""));
/// let noon = Rc::new(Speech::new(Id::new("TS2"), "Noon", ""));
/// let relations = vec![Relation::new(
///     Id::new("R1"),
///     Rc::clone(&noon),
///     Rc::clone(&dawn),
///     RelationKind::ImmediatelyAfter,
///     "",
/// )];
///
/// let layout = LayoutEngine::new().calculate(&relations).unwrap();
/// assert_eq!(layout.sequence().position_of(Id::new("TS2")), Some(1));
/// assert!(layout.is_complete());
/// ```
#[derive(Debug, Clone)]
pub struct LayoutEngine {
    max_passes: usize,
    anchor: Option<Id>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl LayoutEngine {
    pub fn new() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            anchor: None,
        }
    }

    /// Set the pass ceiling. At least one pass always runs.
    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    /// Seed the timeline with this speech instead of the first relation's
    /// `to` endpoint.
    pub fn with_anchor(mut self, anchor: Option<Id>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    /// Runs placement passes over `relations`.
    ///
    /// # Errors
    ///
    /// Returns [`StorylineError::Layout`] when a configured anchor is not an
    /// endpoint of any relation.
    pub fn calculate(&self, relations: &[Relation]) -> Result<Layout, StorylineError> {
        let Some(anchor) = self.resolve_anchor(relations)? else {
            debug!("No relations to lay out");
            return Ok(Layout::default());
        };
        debug!(anchor = anchor.id().to_string(), relations = relations.len(); "Starting layout");

        let mut sequence = PositionSequence::new();
        let mut passes = 0;
        let mut previous_count = None;
        let unresolved = loop {
            let (next, unresolved) = process_pass(sequence, relations, &anchor);
            sequence = next;
            passes += 1;
            debug!(pass = passes, unresolved = unresolved.len(); "Layout pass finished");

            let stalled = previous_count == Some(unresolved.len());
            if unresolved.is_empty() || stalled || passes >= self.max_passes {
                break unresolved;
            }
            previous_count = Some(unresolved.len());
        };

        let orphans = classify(relations, anchor.id(), &unresolved);
        if !orphans.is_empty() {
            warn!(
                orphans = orphans.len();
                "{} speeches couldn't be placed on the timeline",
                orphans.len()
            );
        }
        info!(
            passes,
            placed = sequence.placed_count(),
            gaps = sequence.gap_count();
            "Layout calculated"
        );

        Ok(Layout {
            sequence,
            orphans,
            passes,
        })
    }

    /// Finds the seed speech, or `None` when there are no relations.
    fn resolve_anchor(&self, relations: &[Relation]) -> Result<Option<Rc<Speech>>, StorylineError> {
        let Some(first) = relations.first() else {
            return match self.anchor {
                Some(anchor) => Err(StorylineError::unknown_anchor(anchor)),
                None => Ok(None),
            };
        };
        let Some(anchor) = self.anchor else {
            return Ok(Some(Rc::clone(first.to())));
        };

        relations
            .iter()
            .flat_map(|relation| [relation.to(), relation.from()])
            .find(|speech| speech.id() == anchor)
            .map(|speech| Some(Rc::clone(speech)))
            .ok_or_else(|| StorylineError::unknown_anchor(anchor))
    }
}

/// Runs one pass over `relations`, returning the grown sequence and the
/// relations that could not be resolved in this pass.
fn process_pass<'r>(
    mut sequence: PositionSequence,
    relations: &'r [Relation],
    anchor: &Rc<Speech>,
) -> (PositionSequence, Vec<&'r Relation>) {
    if sequence.is_empty() {
        sequence = sequence.insert_at(0, Slot::Placed(Rc::clone(anchor)));
    }

    let mut unresolved = Vec::new();
    for relation in relations {
        let from = relation.from();
        if sequence.contains(from.id()) {
            continue;
        }
        let Some(index) = sequence.position_of(relation.to().id()) else {
            trace!(relation = relation.id().to_string(); "Target not placed yet");
            unresolved.push(relation);
            continue;
        };

        trace!(
            relation = relation.id().to_string(),
            kind = relation.kind().as_str(),
            index;
            "Placing speech"
        );
        sequence = place(sequence, index, relation.kind(), from);
    }

    (sequence, unresolved)
}

/// Inserts `from` relative to the placed target at `index`.
fn place(
    sequence: PositionSequence,
    index: usize,
    kind: RelationKind,
    from: &Rc<Speech>,
) -> PositionSequence {
    let placed = Slot::Placed(Rc::clone(from));
    let gap = || Slot::Gap(Rc::clone(from));

    match kind {
        RelationKind::ImmediatelyBefore => sequence.insert_at(index, placed),
        RelationKind::ImmediatelyAfter | RelationKind::Simultaneous => {
            sequence.insert_at(index + 1, placed)
        }
        RelationKind::Before => sequence
            .insert_at(index, placed)
            .insert_at(index + 1, gap()),
        RelationKind::After => sequence
            .insert_at(index + 1, gap())
            .insert_at(index + 2, placed),
    }
}

fn classify(relations: &[Relation], anchor: Id, unresolved: &[&Relation]) -> Vec<Orphan> {
    if unresolved.is_empty() {
        return Vec::new();
    }

    let graph = RelationGraph::new(relations);
    let unreachable: Vec<Id> = graph
        .unreachable_relations(anchor)
        .iter()
        .map(|relation| relation.id())
        .collect();
    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        unreachable = unreachable.len();
        "Classifying orphans"
    );

    unresolved
        .iter()
        .map(|relation| {
            let reason = if unreachable.contains(&relation.id()) {
                OrphanReason::Unreachable
            } else {
                OrphanReason::PassLimit
            };
            Orphan {
                relation: relation.id(),
                from: relation.from().id(),
                to: relation.to().id(),
                reason,
            }
        })
        .collect()
}
