//! Projection of a layout onto the visible x axis.
//!
//! Projection filters slots by actor and assigns consecutive visible indices
//! to the survivors. Whether gap markers take up an index is decided by the
//! [`GapPolicy`].

use std::rc::Rc;

use log::debug;
use serde::Deserialize;

use storyline_core::{entity::Speech, identifier::Id};

use crate::layout::{Layout, Slot};

/// Which speeches a projection keeps.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ActorFilter {
    /// Keep every speech.
    #[default]
    Everyone,
    /// Keep speeches featuring at least one of the actors.
    AnyOf(Vec<Id>),
    /// Keep speeches featuring all of the actors.
    AllOf(Vec<Id>),
}

impl ActorFilter {
    pub fn accepts(&self, speech: &Speech) -> bool {
        match self {
            ActorFilter::Everyone => true,
            ActorFilter::AnyOf(actors) => speech.has_any_of_actors(actors),
            ActorFilter::AllOf(actors) => speech.has_all_of_actors(actors),
        }
    }
}

/// How gap markers are projected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapPolicy {
    /// Gaps never take a visible index.
    #[default]
    Collapse,
    /// A gap that passes the filter takes a visible index and is emitted as
    /// an empty position.
    Reserve,
}

/// Builds [`Projection`]s from layouts.
#[derive(Debug, Clone, Default)]
pub struct Projector {
    filter: ActorFilter,
    gaps: GapPolicy,
    step_limit: Option<usize>,
}

impl Projector {
    pub fn new(filter: ActorFilter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn with_gap_policy(mut self, gaps: GapPolicy) -> Self {
        self.gaps = gaps;
        self
    }

    /// Emit at most `step_limit` visible positions.
    pub fn with_step_limit(mut self, step_limit: Option<usize>) -> Self {
        self.step_limit = step_limit;
        self
    }

    pub fn project(&self, layout: &Layout) -> Projection {
        let mut positions: Vec<Option<Rc<Speech>>> = layout
            .sequence()
            .iter()
            .filter(|slot| self.filter.accepts(slot.speech()))
            .filter_map(|slot| match slot {
                Slot::Placed(speech) => Some(Some(Rc::clone(speech))),
                Slot::Gap(_) => match self.gaps {
                    GapPolicy::Collapse => None,
                    GapPolicy::Reserve => Some(None),
                },
            })
            .collect();

        if let Some(limit) = self.step_limit {
            positions.truncate(limit);
        }
        let max_visible_index = positions.iter().rposition(Option::is_some);

        debug!(
            positions = positions.len(),
            gaps:? = self.gaps;
            "Layout projected"
        );
        Projection {
            positions,
            max_visible_index,
            orphans: layout.orphan_ids(),
            passes: layout.passes(),
        }
    }
}

/// The visible timeline: one entry per x axis index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Projection {
    positions: Vec<Option<Rc<Speech>>>,
    max_visible_index: Option<usize>,
    orphans: Vec<Id>,
    passes: usize,
}

impl Projection {
    /// Visible positions. `None` marks a reserved gap.
    pub fn positions(&self) -> &[Option<Rc<Speech>>] {
        &self.positions
    }

    /// Highest index holding a speech, or `None` when nothing is visible.
    pub fn max_visible_index(&self) -> Option<usize> {
        self.max_visible_index
    }

    /// Speeches that could not be placed, carried over from the layout.
    pub fn orphans(&self) -> &[Id] {
        &self.orphans
    }

    /// Layout passes behind this projection.
    pub fn passes(&self) -> usize {
        self.passes
    }

    /// Visible speeches with their indices.
    pub fn speeches(&self) -> impl Iterator<Item = (usize, &Rc<Speech>)> {
        self.positions
            .iter()
            .enumerate()
            .filter_map(|(index, speech)| speech.as_ref().map(|speech| (index, speech)))
    }

    pub fn is_empty(&self) -> bool {
        self.max_visible_index.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use storyline_core::entity::{Actor, Relation, RelationKind};

    use crate::layout::LayoutEngine;

    /// Timeline `S1 _ S2 S3 _ S4` where S1 and S3 feature the hero, S2 the
    /// villain and S4 both.
    fn relations() -> Vec<Relation> {
        let hero = Rc::new(Actor::new(Id::new("TA1"), "Hero", true));
        let villain = Rc::new(Actor::new(Id::new("TA2"), "Villain", false));
        let speech = |id: &str, actors: &[&Rc<Actor>]| {
            let speech = actors.iter().fold(Speech::new(Id::new(id), id, ""), |s, a| {
                s.with_actor(Rc::clone(*a))
            });
            Rc::new(speech)
        };
        let s1 = speech("S1", &[&hero]);
        let s2 = speech("S2", &[&villain]);
        let s3 = speech("S3", &[&hero]);
        let s4 = speech("S4", &[&hero, &villain]);
        let relation = |id: &str, from: &Rc<Speech>, to: &Rc<Speech>, kind: RelationKind| {
            Relation::new(Id::new(id), Rc::clone(from), Rc::clone(to), kind, "")
        };

        vec![
            relation("R1", &s2, &s1, RelationKind::After),
            relation("R2", &s3, &s2, RelationKind::ImmediatelyAfter),
            relation("R3", &s4, &s3, RelationKind::After),
        ]
    }

    fn ids(projection: &Projection) -> Vec<Option<String>> {
        projection
            .positions()
            .iter()
            .map(|speech| speech.as_ref().map(|s| s.id().to_string()))
            .collect()
    }

    fn layout() -> Layout {
        LayoutEngine::new().calculate(&relations()).unwrap()
    }

    #[test]
    fn test_collapse_skips_gaps() {
        let projection = Projector::new(ActorFilter::Everyone).project(&layout());

        assert_eq!(
            ids(&projection),
            vec![
                Some("S1".into()),
                Some("S2".into()),
                Some("S3".into()),
                Some("S4".into())
            ]
        );
        assert_eq!(projection.max_visible_index(), Some(3));
        assert!(projection.orphans().is_empty());
    }

    #[test]
    fn test_reserve_keeps_gap_positions() {
        let projection = Projector::new(ActorFilter::Everyone)
            .with_gap_policy(GapPolicy::Reserve)
            .project(&layout());

        assert_eq!(
            ids(&projection),
            vec![
                Some("S1".into()),
                None,
                Some("S2".into()),
                Some("S3".into()),
                None,
                Some("S4".into())
            ]
        );
        assert_eq!(projection.max_visible_index(), Some(5));
    }

    #[test]
    fn test_any_of_filter() {
        let filter = ActorFilter::AnyOf(vec![Id::new("TA2")]);
        let projection = Projector::new(filter)
            .with_gap_policy(GapPolicy::Reserve)
            .project(&layout());

        // The gap before S2 is S2's, so it survives with it
        assert_eq!(
            ids(&projection),
            vec![None, Some("S2".into()), None, Some("S4".into())]
        );
        assert_eq!(projection.speeches().count(), 2);
    }

    #[test]
    fn test_all_of_filter() {
        let filter = ActorFilter::AllOf(vec![Id::new("TA1"), Id::new("TA2")]);
        let projection = Projector::new(filter).project(&layout());

        assert_eq!(ids(&projection), vec![Some("S4".into())]);
        assert_eq!(projection.max_visible_index(), Some(0));
    }

    #[test]
    fn test_filter_matching_nothing_is_empty() {
        let filter = ActorFilter::AnyOf(vec![Id::new("TA404")]);
        let projection = Projector::new(filter).project(&layout());

        assert!(projection.positions().is_empty());
        assert!(projection.is_empty());
        assert_eq!(projection.max_visible_index(), None);
    }

    #[test]
    fn test_step_limit_truncates() {
        let projection = Projector::new(ActorFilter::Everyone)
            .with_gap_policy(GapPolicy::Reserve)
            .with_step_limit(Some(2))
            .project(&layout());

        assert_eq!(ids(&projection), vec![Some("S1".into()), None]);
        assert_eq!(projection.max_visible_index(), Some(0));
    }

    #[test]
    fn test_empty_layout_projects_to_nothing() {
        let projection = Projector::default().project(&Layout::default());

        assert!(projection.is_empty());
        assert!(projection.orphans().is_empty());
    }
}
