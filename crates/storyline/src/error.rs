//! Error types for Storyline operations.
//!
//! This module provides the main error type [`StorylineError`] which wraps
//! the error conditions that can occur while turning a corpus into a
//! timeline.

use std::io;

use thiserror::Error;

use storyline_core::identifier::Id;
use storyline_parser::LoadError;

/// The main error type for Storyline operations.
///
/// # Diagnostic Variants
///
/// The `Load` variant carries every load diagnostic together with the XML
/// source, so callers can render source snippets for each of them.
#[derive(Debug, Error)]
pub enum StorylineError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("{err}")]
    Load { err: LoadError, src: String },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for StorylineError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}

impl StorylineError {
    /// Create a new `Load` error with the associated XML source.
    pub fn new_load_error(err: LoadError, src: impl Into<String>) -> Self {
        Self::Load {
            err,
            src: src.into(),
        }
    }

    pub(crate) fn unknown_anchor(anchor: Id) -> Self {
        Self::Layout(format!(
            "anchor speech `{anchor}` is not an endpoint of any relation"
        ))
    }
}
