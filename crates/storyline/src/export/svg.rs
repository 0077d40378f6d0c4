//! SVG timeline chart.
//!
//! The chart is a single horizontal track. Each visible speech gets a marker
//! at its index on the x axis, with a `<title>` tooltip holding its id, name,
//! actors and text. Markers are colored by their first actor, in order of
//! first appearance, cycling through the palette.

use std::rc::Rc;

use indexmap::IndexMap;
use log::{debug, info};
use svg::{
    Document,
    node::{
        Text as SvgText,
        element::{Circle, Group, Line, Polyline, Rectangle, Text, Title},
    },
};

use storyline_core::{
    color::{Color, Palette},
    entity::Speech,
    identifier::Id,
};

use crate::{
    config::{DEFAULT_WORDS_PER_LINE, StyleConfig},
    export::{self, Exporter},
    layout::Projection,
};

const MARGIN: f32 = 50.0;
const STEP: f32 = 60.0;
const TRACK_Y: f32 = 60.0;
const AXIS_Y: f32 = 120.0;
const LEGEND_Y: f32 = 160.0;
const LEGEND_ROW: f32 = 20.0;
const MARKER_RADIUS: f32 = 6.0;
const MARKER_ALPHA: f32 = 0.5;

/// Builder for the [`Svg`] exporter.
#[derive(Debug, Default)]
pub struct SvgBuilder<'a> {
    style: Option<&'a StyleConfig>,
}

impl<'a> SvgBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_style(mut self, style: &'a StyleConfig) -> Self {
        self.style = Some(style);
        self
    }

    /// Resolves the style into an exporter.
    ///
    /// # Errors
    ///
    /// Returns [`export::Error::Render`] when a configured color is invalid.
    pub fn build(self) -> Result<Svg, export::Error> {
        let Some(style) = self.style else {
            return Ok(Svg::default());
        };
        Ok(Svg {
            background: style.background_color().map_err(export::Error::Render)?,
            palette: style.palette().map_err(export::Error::Render)?,
            words_per_line: style.words_per_line(),
        })
    }
}

/// SVG exporter.
#[derive(Debug)]
pub struct Svg {
    background: Option<Color>,
    palette: Palette,
    words_per_line: usize,
}

impl Default for Svg {
    fn default() -> Self {
        Self {
            background: None,
            palette: Palette::default(),
            words_per_line: DEFAULT_WORDS_PER_LINE,
        }
    }
}

impl Svg {
    /// Renders the chart document.
    pub fn render(&self, projection: &Projection) -> Document {
        // Axis labels run 1..=max_visible_index + 2
        let columns = projection.max_visible_index().map_or(1, |max| max + 2);
        let actor_colors = self.actor_colors(projection);
        let legend_rows = actor_colors.len() as f32;

        let width = MARGIN.mul_add(2.0, STEP * (columns - 1) as f32);
        let height = LEGEND_Y + LEGEND_ROW * legend_rows + MARGIN / 2.0;
        debug!(width, height, columns; "SVG dimensions");

        let mut doc = Document::new()
            .set("viewBox", format!("0 0 {width} {height}"))
            .set("width", width)
            .set("height", height);

        // Add background
        if let Some(background) = &self.background {
            doc = doc.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background),
            );
        }

        doc = doc.add(self.render_axis(columns));

        let track_color = self.palette.color(0);
        let points: Vec<String> = projection
            .speeches()
            .map(|(index, _)| format!("{},{TRACK_Y}", x_of(index)))
            .collect();
        doc = doc.add(
            Polyline::new()
                .set("points", points.join(" "))
                .set("fill", "none")
                .set("stroke", &track_color)
                .set("stroke-width", 2),
        );

        for (index, speech) in projection.speeches() {
            let color = speech
                .actors()
                .first()
                .and_then(|actor| actor_colors.get(&actor.id()))
                .map_or(track_color, |(_, color)| *color);
            doc = doc.add(self.render_marker(index, speech, color));
        }

        doc.add(render_legend(&actor_colors))
    }

    fn render_axis(&self, columns: usize) -> Group {
        let mut axis = Group::new().set("class", "axis").add(
            Line::new()
                .set("x1", x_of(0))
                .set("y1", AXIS_Y)
                .set("x2", x_of(columns - 1))
                .set("y2", AXIS_Y)
                .set("stroke", "#666666")
                .set("stroke-width", 1),
        );
        for column in 0..columns {
            axis = axis.add(
                Text::new((column + 1).to_string())
                    .set("x", x_of(column))
                    .set("y", AXIS_Y + 20.0)
                    .set("text-anchor", "middle")
                    .set("font-family", "sans-serif")
                    .set("font-size", 12),
            );
        }
        axis
    }

    fn render_marker(&self, index: usize, speech: &Rc<Speech>, color: Color) -> Group {
        let tooltip = tooltip(speech, self.words_per_line);
        Group::new()
            .set("class", "event")
            .set("data-speech", speech.id().to_string())
            .add(Title::new(tooltip))
            .add(
                Circle::new()
                    .set("cx", x_of(index))
                    .set("cy", TRACK_Y)
                    .set("r", MARKER_RADIUS)
                    .set("fill", &color.with_alpha(MARKER_ALPHA))
                    .set("stroke", &color)
                    .set("stroke-width", 2),
            )
    }

    /// Assigns palette colors to actors in order of first appearance.
    fn actor_colors(&self, projection: &Projection) -> IndexMap<Id, (String, Color)> {
        let mut colors = IndexMap::new();
        for (_, speech) in projection.speeches() {
            for actor in speech.actors() {
                let next = colors.len();
                colors
                    .entry(actor.id())
                    .or_insert_with(|| (actor.name().to_string(), self.palette.color(next)));
            }
        }
        colors
    }
}

impl Exporter for Svg {
    fn export(&self, projection: &Projection) -> Result<String, export::Error> {
        let doc = self.render(projection);
        let svg = doc.to_string();
        info!(bytes = svg.len(); "SVG rendered");
        Ok(svg)
    }
}

fn render_legend(actor_colors: &IndexMap<Id, (String, Color)>) -> Group {
    let mut legend = Group::new().set("class", "legend");
    for (row, (name, color)) in actor_colors.values().enumerate() {
        let y = LEGEND_Y + LEGEND_ROW * row as f32;
        legend = legend
            .add(
                Rectangle::new()
                    .set("x", MARGIN)
                    .set("y", y - 10.0)
                    .set("width", 12)
                    .set("height", 12)
                    .set("fill", color),
            )
            .add(
                Text::new("")
                    .set("x", MARGIN + 20.0)
                    .set("y", y)
                    .set("font-family", "sans-serif")
                    .set("font-size", 12)
                    .add(SvgText::new(name.as_str())),
            );
    }
    legend
}

fn x_of(index: usize) -> f32 {
    STEP.mul_add(index as f32, MARGIN)
}

/// Tooltip lines: `"{id}: {name}"`, the actor names, then the text wrapped
/// at `words_per_line` words.
fn tooltip(speech: &Speech, words_per_line: usize) -> String {
    let mut lines = vec![format!("{}: {}", speech.id(), speech.name())];
    if !speech.actors().is_empty() {
        let names: Vec<&str> = speech.actors().iter().map(|actor| actor.name()).collect();
        lines.push(names.join(", "));
    }
    lines.extend(wrap_words(speech.text(), words_per_line));
    lines.join("\n")
}

fn wrap_words(text: &str, words_per_line: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    words
        .chunks(words_per_line.max(1))
        .map(|line| line.join(" "))
        .collect()
}

#[cfg(test)]
mod tests {
    use storyline_core::entity::{Actor, Relation, RelationKind};

    use super::*;
    use crate::layout::{ActorFilter, LayoutEngine, Projector};

    fn projection() -> Projection {
        let hero = Rc::new(Actor::new(Id::new("VA1"), "Hero", true));
        let first = Rc::new(
            Speech::new(Id::new("V1"), "Call", "The call to adventure").with_actor(Rc::clone(&hero)),
        );
        let second = Rc::new(Speech::new(Id::new("V2"), "Return", "Home again"));
        let relations = vec![Relation::new(
            Id::new("VR1"),
            second,
            first,
            RelationKind::After,
            "",
        )];
        let layout = LayoutEngine::new().calculate(&relations).unwrap();
        Projector::new(ActorFilter::Everyone).project(&layout)
    }

    #[test]
    fn test_wrap_words() {
        let text = "one two three four five";
        assert_eq!(wrap_words(text, 2), vec!["one two", "three four", "five"]);
        assert_eq!(wrap_words(text, 25), vec![text]);
        assert!(wrap_words("   ", 25).is_empty());
    }

    #[test]
    fn test_tooltip_lines() {
        let hero = Rc::new(Actor::new(Id::new("VA2"), "Hero", false));
        let ally = Rc::new(Actor::new(Id::new("VA3"), "Ally", false));
        let speech = Speech::new(Id::new("V9"), "Meeting", "a b c")
            .with_actor(hero)
            .with_actor(ally);

        assert_eq!(tooltip(&speech, 2), "V9: Meeting\nHero, Ally\na b\nc");
    }

    #[test]
    fn test_render_contains_markers_axis_and_legend() {
        let svg = Svg::default().export(&projection()).unwrap();

        assert!(svg.contains("<svg"));
        assert_eq!(svg.matches("<circle").count(), 2);
        assert!(svg.contains("<polyline"));
        assert!(svg.contains("V1: Call"));
        assert!(svg.contains("The call to adventure"));
        assert!(svg.contains("class=\"legend\""));
        // Three axis labels (two positions, so 1..=3) and one legend entry
        assert_eq!(svg.matches("<text").count(), 4);
    }

    #[test]
    fn test_builder_rejects_invalid_style() {
        let style: StyleConfig = toml::from_str("background_color = \"nope\"").unwrap();
        let result = SvgBuilder::new().with_style(&style).build();

        assert!(matches!(result, Err(export::Error::Render(_))));
    }

    #[test]
    fn test_background_is_drawn_when_configured() {
        let style: StyleConfig = toml::from_str("background_color = \"white\"").unwrap();
        let svg = SvgBuilder::new()
            .with_style(&style)
            .build()
            .unwrap()
            .render(&Projection::default())
            .to_string();

        assert!(svg.contains("<rect"));
        assert!(!svg.contains("<circle"));
    }
}
