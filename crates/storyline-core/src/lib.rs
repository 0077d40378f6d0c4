//! Storyline Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Storyline
//! crates:
//!
//! - **Identifiers**: String-interned corpus ids ([`identifier::Id`])
//! - **Colors**: CSS colors and track palettes ([`color`] module)
//! - **Entity Model**: Actors, locations, speeches, relations and the corpus
//!   lookup surface ([`entity`] module)
//! - **Errors**: Contract violations while building a corpus ([`error`] module)

pub mod color;
pub mod entity;
pub mod error;
pub mod identifier;
