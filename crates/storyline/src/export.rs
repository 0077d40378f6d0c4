//! Rendering of projected timelines.
//!
//! - [`svg`] - the interactive timeline chart
//! - [`json`] - a machine-readable report

pub mod json;
pub mod svg;

use thiserror::Error;

use crate::layout::Projection;

/// A single Exporter trait that renders a projection to text.
pub trait Exporter {
    fn export(&self, projection: &Projection) -> Result<String, Error>;
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Render error: {0}")]
    Render(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
