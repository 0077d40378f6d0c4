//! # Storyline Parser
//!
//! Loads an annotated XML narrative corpus into the Storyline entity model.
//!
//! The corpus format uses four element kinds, anywhere in the document:
//!
//! | Element | Attributes |
//! |---|---|
//! | `TA` (actor) | `ID`, `NAME`, `MAIN`? |
//! | `TL` (location) | `ID`, `NAME`, `PARENTID`? |
//! | `TS` (speech) | `ID`, `NAME`, `TEXT`, `LOCATION`, `ACTORS`, `PER` |
//! | `TREL` (relation) | `ID`, `FROM`, `TO`, `REL`, `TRIGGER` |
//!
//! ## Usage
//!
//! ```
//! # use storyline_parser::{load, LoadError};
//!
//! fn main() -> Result<(), LoadError> {
//!     let source = r#"
//!         <CORPUS>
//!           <TA ID="TA1" NAME="Hero"/>
//!           <TS ID="TS1" NAME="Arrival" TEXT="The hero arrives." ACTORS="TA1"/>
//!           <TS ID="TS2" NAME="Departure" TEXT="The hero leaves." ACTORS="Hero"/>
//!           <TREL ID="R1" FROM="TS2" TO="TS1" REL="AFTER" TRIGGER="then"/>
//!         </CORPUS>
//!     "#;
//!
//!     let loaded = load(source)?;
//!     assert_eq!(loaded.corpus().relations().len(), 1);
//!     Ok(())
//! }
//! ```

pub mod error;

mod loader;
mod scanner;
mod span;

pub use error::LoadError;
pub use span::Span;

use log::{debug, info};

use storyline_core::entity::Corpus;

use error::Diagnostic;
use loader::Loader;

/// A successfully loaded corpus and the warnings raised while loading it.
#[derive(Debug)]
pub struct LoadedCorpus {
    corpus: Corpus,
    warnings: Vec<Diagnostic>,
}

impl LoadedCorpus {
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Warning diagnostics, e.g. dropped actor tokens.
    pub fn warnings(&self) -> &[Diagnostic] {
        &self.warnings
    }

    pub fn into_corpus(self) -> Corpus {
        self.corpus
    }
}

/// Loads a corpus from XML source text.
///
/// Loading runs in two stages:
///
/// 1. **Scan** - Read the XML and extract `TA`, `TL`, `TS` and `TREL` elements
/// 2. **Resolve** - Build actors, locations, speeches and relations in that
///    order, resolving references by id (and actor tokens by name as a
///    fallback)
///
/// Unresolvable actor, person and location references are dropped with a
/// warning. Everything else that prevents building an entity is an error.
///
/// # Errors
///
/// Returns a [`LoadError`] holding every diagnostic when the XML is malformed
/// or at least one element cannot be resolved.
pub fn load(source: &str) -> Result<LoadedCorpus, LoadError> {
    info!(bytes = source.len(); "Loading corpus");

    let elements = scanner::scan(source)?;
    debug!(elements = elements.len(); "Corpus scanned");

    let (corpus, collector) = Loader::new(&elements).load();
    if collector.has_errors() {
        debug!("Corpus has errors");
    }
    let warnings = collector.finish()?;

    info!(
        speeches = corpus.speeches().count(),
        relations = corpus.relations().len(),
        warnings = warnings.len();
        "Corpus loaded"
    );
    Ok(LoadedCorpus { corpus, warnings })
}
