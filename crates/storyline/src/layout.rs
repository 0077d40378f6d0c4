//! Timeline layout.
//!
//! - [`sequence`] - [`PositionSequence`] and its [`Slot`]s
//! - [`engine`] - [`LayoutEngine`], the multi-pass placement run
//! - [`projection`] - actor filtering and visible index assignment

pub mod engine;
pub mod projection;
pub mod sequence;

pub use engine::{DEFAULT_MAX_PASSES, Layout, LayoutEngine, Orphan, OrphanReason};
pub use projection::{ActorFilter, GapPolicy, Projection, Projector};
pub use sequence::{PositionSequence, Slot};
