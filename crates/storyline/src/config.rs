//! Configuration types for Storyline layout and rendering.
//!
//! This module provides configuration structures that control how timelines
//! are laid out and styled. All types implement [`serde::Deserialize`] for
//! loading from external sources such as a TOML file.
//!
//! # Overview
//!
//! - [`AppConfig`] - Top-level configuration combining layout and style settings.
//! - [`LayoutConfig`] - Pass ceiling, gap policy and step limit.
//! - [`StyleConfig`] - Background, track palette and tooltip wrapping.
//!
//! # Example
//!
//! ```
//! # use storyline::config::AppConfig;
//! let config = AppConfig::default();
//! assert_eq!(config.layout().max_passes(), 10);
//! assert!(config.style().palette().is_ok());
//! ```

use serde::Deserialize;

use storyline_core::color::{Color, Palette};

use crate::layout::{DEFAULT_MAX_PASSES, GapPolicy};

/// Words per tooltip line when not configured.
pub const DEFAULT_WORDS_PER_LINE: usize = 25;

/// Top-level application configuration combining layout and style settings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Layout configuration section.
    #[serde(default)]
    layout: LayoutConfig,

    /// Style configuration section.
    #[serde(default)]
    style: StyleConfig,
}

impl AppConfig {
    /// Creates a new [`AppConfig`] with the specified layout and style configurations.
    pub fn new(layout: LayoutConfig, style: StyleConfig) -> Self {
        Self { layout, style }
    }

    /// Returns the layout configuration.
    pub fn layout(&self) -> &LayoutConfig {
        &self.layout
    }

    /// Returns the style configuration.
    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// Returns a mutable reference to the layout configuration, for
    /// command-line overrides.
    pub fn layout_mut(&mut self) -> &mut LayoutConfig {
        &mut self.layout
    }
}

/// Layout and projection settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Maximum number of placement passes.
    max_passes: usize,

    /// Whether gap markers take a visible index.
    gaps: GapPolicy,

    /// Maximum number of visible positions to emit.
    step_limit: Option<usize>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_passes: DEFAULT_MAX_PASSES,
            gaps: GapPolicy::default(),
            step_limit: None,
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_passes` - Pass ceiling for the layout engine.
    /// * `gaps` - How gap markers are projected.
    /// * `step_limit` - Optional cap on visible positions.
    pub fn new(max_passes: usize, gaps: GapPolicy, step_limit: Option<usize>) -> Self {
        Self {
            max_passes,
            gaps,
            step_limit,
        }
    }

    pub fn max_passes(&self) -> usize {
        self.max_passes
    }

    pub fn gaps(&self) -> GapPolicy {
        self.gaps
    }

    pub fn step_limit(&self) -> Option<usize> {
        self.step_limit
    }

    pub fn set_gaps(&mut self, gaps: GapPolicy) {
        self.gaps = gaps;
    }

    pub fn set_step_limit(&mut self, step_limit: Option<usize>) {
        self.step_limit = step_limit;
    }
}

/// Visual styling configuration for rendered timelines.
///
/// Fields that are not set fall back to renderer defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Background color, as a CSS color string.
    background_color: Option<String>,

    /// Track colors, as CSS color strings.
    palette: Option<Vec<String>>,

    /// Words per line in event tooltips.
    words_per_line: usize,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            background_color: None,
            palette: None,
            words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }
}

impl StyleConfig {
    /// Returns the parsed background [`Color`], or `None` if no color is configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured color string cannot be parsed
    /// into a valid [`Color`].
    pub fn background_color(&self) -> Result<Option<Color>, String> {
        self.background_color
            .as_ref()
            .map(|color| Color::new(color))
            .transpose()
            .map_err(|err| format!("Invalid background color in config: {err}"))
    }

    /// Returns the track [`Palette`], or the default palette when none is
    /// configured.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured list is empty or holds an invalid
    /// color.
    pub fn palette(&self) -> Result<Palette, String> {
        match &self.palette {
            Some(colors) => Palette::from_strings(colors)
                .map_err(|err| format!("Invalid palette in config: {err}")),
            None => Ok(Palette::default()),
        }
    }

    /// Words per tooltip line, never less than one.
    pub fn words_per_line(&self) -> usize {
        self.words_per_line.max(1)
    }
}
