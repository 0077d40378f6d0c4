//! Storyline - temporal relation layout for narrative speech timelines.
//!
//! Loads an annotated narrative corpus, places its speeches on a single
//! ordered timeline from their pairwise temporal relations, filters the
//! result by actor, and renders it as an SVG chart or a JSON report.

pub mod config;
pub mod export;
pub mod layout;
pub mod structure;

mod error;

pub use storyline_core::{color, entity, identifier};
pub use storyline_parser::{LoadError, LoadedCorpus, error as diagnostics};

pub use error::StorylineError;

use log::{debug, info, trace};

use config::AppConfig;
use entity::Corpus;
use export::Exporter;
use identifier::Id;
use layout::{ActorFilter, Layout, LayoutEngine, Projection, Projector};

/// Builder for loading, laying out and rendering Storyline timelines.
///
/// # Examples
///
/// ```rust
/// use storyline::{TimelineBuilder, config::AppConfig, layout::ActorFilter};
///
/// let source = r#"
///     <CORPUS>
///       <TS ID="TS1" NAME="Dawn" TEXT="The sun rises."/>
///       <TS ID="TS2" NAME="Dusk" TEXT="The sun sets."/>
///       <TREL ID="R1" FROM="TS2" TO="TS1" REL="AFTER"/>
///     </CORPUS>
/// "#;
///
/// let builder = TimelineBuilder::new(AppConfig::default());
/// let loaded = builder.load(source).expect("Failed to load");
/// let layout = builder.layout(loaded.corpus()).expect("Failed to lay out");
/// let projection = builder.project(&layout, &ActorFilter::Everyone);
///
/// assert_eq!(projection.max_visible_index(), Some(1));
/// let svg = builder.render_svg(&projection).expect("Failed to render");
/// assert!(svg.contains("<svg"));
/// ```
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    config: AppConfig,
    anchor: Option<Id>,
}

impl TimelineBuilder {
    /// Create a new timeline builder with the given configuration.
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            anchor: None,
        }
    }

    /// Seed layouts with `anchor` instead of the first relation's target.
    pub fn with_anchor(mut self, anchor: Option<Id>) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load an XML corpus.
    ///
    /// # Errors
    ///
    /// Returns `StorylineError::Load` holding every load diagnostic and the
    /// source text.
    pub fn load(&self, source: &str) -> Result<LoadedCorpus, StorylineError> {
        info!("Loading corpus");
        let loaded = storyline_parser::load(source)
            .map_err(|err| StorylineError::new_load_error(err, source))?;

        debug!(warnings = loaded.warnings().len(); "Corpus loaded successfully");
        Ok(loaded)
    }

    /// Place the corpus' speeches on the timeline.
    ///
    /// # Errors
    ///
    /// Returns `StorylineError::Layout` when the configured anchor is not an
    /// endpoint of any relation.
    pub fn layout(&self, corpus: &Corpus) -> Result<Layout, StorylineError> {
        info!(relations = corpus.relations().len(); "Calculating layout");
        let engine = LayoutEngine::new()
            .with_max_passes(self.config.layout().max_passes())
            .with_anchor(self.anchor);

        let layout = engine.calculate(corpus.relations())?;
        trace!(layout:?; "Calculated layout");
        Ok(layout)
    }

    /// Filter a layout by actor and assign visible indices.
    pub fn project(&self, layout: &Layout, filter: &ActorFilter) -> Projection {
        Projector::new(filter.clone())
            .with_gap_policy(self.config.layout().gaps())
            .with_step_limit(self.config.layout().step_limit())
            .project(layout)
    }

    /// Render a projection to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns `StorylineError::Export` when the style configuration holds an
    /// invalid color.
    pub fn render_svg(&self, projection: &Projection) -> Result<String, StorylineError> {
        let exporter = export::svg::SvgBuilder::new()
            .with_style(self.config.style())
            .build()?;
        Ok(exporter.export(projection)?)
    }

    /// Render a projection and its run metadata to a JSON report.
    ///
    /// # Errors
    ///
    /// Returns `StorylineError::Export` if serialization fails.
    pub fn render_json(&self, projection: &Projection) -> Result<String, StorylineError> {
        Ok(export::json::Json.export(projection)?)
    }
}
