//! Graph view of a corpus' relations.

mod relation_graph;

pub use relation_graph::RelationGraph;
