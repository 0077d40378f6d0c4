//! Speech dependency graph built with petgraph.
//!
//! Nodes are speech ids. Each relation adds an edge from its `to` speech to
//! its `from` speech, since placing `to` is what lets `from` be placed.
//! Reachability from the anchor is therefore exactly the set of speeches a
//! layout run can place given enough passes.

use indexmap::IndexMap;
use petgraph::{
    graph::{DiGraph, NodeIndex},
    visit::Bfs,
};

use storyline_core::{entity::Relation, identifier::Id};

#[derive(Debug)]
pub struct RelationGraph<'r> {
    graph: DiGraph<Id, &'r Relation>,
    nodes: IndexMap<Id, NodeIndex>,
}

impl<'r> RelationGraph<'r> {
    /// Builds the graph. Nodes are added in relation order.
    pub fn new(relations: &'r [Relation]) -> Self {
        let mut graph = DiGraph::new();
        let mut nodes = IndexMap::new();

        for relation in relations {
            let to = *nodes
                .entry(relation.to().id())
                .or_insert_with_key(|id| graph.add_node(*id));
            let from = *nodes
                .entry(relation.from().id())
                .or_insert_with_key(|id| graph.add_node(*id));
            graph.add_edge(to, from, relation);
        }

        Self { graph, nodes }
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Speech ids reachable from `anchor`, in breadth-first order starting
    /// with `anchor` itself. Empty when `anchor` is not in the graph.
    pub fn reachable_from(&self, anchor: Id) -> Vec<Id> {
        let Some(&start) = self.nodes.get(&anchor) else {
            return Vec::new();
        };

        let mut bfs = Bfs::new(&self.graph, start);
        let mut reachable = Vec::new();
        while let Some(node) = bfs.next(&self.graph) {
            reachable.push(self.graph[node]);
        }
        reachable
    }

    /// Relations whose `from` speech can never be placed from `anchor`, in
    /// relation order.
    pub fn unreachable_relations(&self, anchor: Id) -> Vec<&'r Relation> {
        let reachable = self.reachable_from(anchor);
        self.graph
            .edge_weights()
            .filter(|relation| !reachable.contains(&relation.from().id()))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use storyline_core::entity::{RelationKind, Speech};

    use super::*;

    fn relations(pairs: &[(&str, &str)]) -> Vec<Relation> {
        pairs
            .iter()
            .enumerate()
            .map(|(i, (from, to))| {
                Relation::new(
                    Id::new(&format!("R{i}")),
                    Rc::new(Speech::new(Id::new(from), *from, "")),
                    Rc::new(Speech::new(Id::new(to), *to, "")),
                    RelationKind::After,
                    "",
                )
            })
            .collect()
    }

    #[test]
    fn test_counts() {
        let relations = relations(&[("S2", "S1"), ("S3", "S1"), ("S3", "S2")]);
        let graph = RelationGraph::new(&relations);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_reachability_follows_to_from_direction() {
        let relations = relations(&[("S2", "S1"), ("S3", "S2"), ("S5", "S4")]);
        let graph = RelationGraph::new(&relations);

        let reachable = graph.reachable_from(Id::new("S1"));
        assert_eq!(reachable, vec![Id::new("S1"), Id::new("S2"), Id::new("S3")]);

        // Edges point from target to source, so S3 reaches nothing
        assert_eq!(graph.reachable_from(Id::new("S3")), vec![Id::new("S3")]);
        assert!(graph.reachable_from(Id::new("S9")).is_empty());
    }

    #[test]
    fn test_unreachable_relations() {
        let relations = relations(&[("S2", "S1"), ("S5", "S4"), ("S6", "S5")]);
        let graph = RelationGraph::new(&relations);

        let unreachable: Vec<_> = graph
            .unreachable_relations(Id::new("S1"))
            .iter()
            .map(|relation| relation.id())
            .collect();
        assert_eq!(unreachable, vec![Id::new("R1"), Id::new("R2")]);
    }
}
