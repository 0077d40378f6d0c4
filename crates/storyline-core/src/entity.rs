//! Entity model for narrative corpora.
//!
//! These types are the resolved representation of a corpus after loading.
//! They are immutable once built and compared by id throughout.
//!
//! # Pipeline Position
//!
//! ```text
//! Corpus XML
//!     ↓ storyline-parser
//! Entity Model (these types)
//!     ↓ relation graph + layout
//! Position Sequence
//!     ↓ projection
//! Visible Timeline
//!     ↓ export
//! SVG / JSON
//! ```
//!
//! # Organization
//!
//! - [`actor`] - [`Actor`]
//! - [`location`] - [`Location`]
//! - [`speech`] - [`Speech`], the event node
//! - [`relation`] - [`Relation`] and [`RelationKind`], the typed edge
//! - [`corpus`] - [`Corpus`], the by-id lookup surface

pub mod actor;
pub mod corpus;
pub mod location;
pub mod relation;
pub mod speech;

pub use actor::*;
pub use corpus::*;
pub use location::*;
pub use relation::*;
pub use speech::*;
