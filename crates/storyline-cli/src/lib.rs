//! CLI logic for the Storyline timeline tool.

pub mod error_adapter;

mod args;
mod config;

pub use args::{Args, MatchMode, OutputFormat};

use std::fs;

use log::{info, warn};

use storyline::{
    StorylineError, TimelineBuilder,
    entity::Corpus,
    identifier::Id,
    layout::ActorFilter,
};
use storyline_parser::error::Diagnostic;

use error_adapter::DiagnosticAdapter;

/// Run the Storyline CLI application
///
/// This function loads the input corpus, lays out and filters its timeline,
/// and writes the rendered SVG or JSON to the output file.
///
/// # Errors
///
/// Returns `StorylineError` for:
/// - File I/O errors
/// - Configuration loading errors and unknown `--actors` entries
/// - Corpus load errors
/// - Layout errors (unknown `--anchor`)
/// - Rendering errors
pub fn run(args: &Args) -> Result<(), StorylineError> {
    info!(
        input_path = args.input,
        output_path = args.output;
        "Processing corpus"
    );

    let mut app_config = config::load_config(args.config.as_ref())?;
    if args.steps.is_some() {
        app_config.layout_mut().set_step_limit(args.steps);
    }

    let source = fs::read_to_string(&args.input)?;

    let builder =
        TimelineBuilder::new(app_config).with_anchor(args.anchor.as_deref().map(Id::new));
    let loaded = builder.load(&source)?;
    report_warnings(loaded.warnings(), &source);

    let corpus = loaded.corpus();
    let filter = actor_filter(args, corpus)?;
    let layout = builder.layout(corpus)?;
    let projection = builder.project(&layout, &filter);

    let output = match args.format {
        OutputFormat::Svg => builder.render_svg(&projection)?,
        OutputFormat::Json => builder.render_json(&projection)?,
    };
    fs::write(&args.output, output)?;

    info!(output_file = args.output, format:? = args.format; "Timeline exported successfully");

    Ok(())
}

/// Resolves `--actors` tokens by id, then by name.
fn actor_filter(args: &Args, corpus: &Corpus) -> Result<ActorFilter, StorylineError> {
    if args.actors.is_empty() {
        return Ok(ActorFilter::Everyone);
    }

    let ids = args
        .actors
        .iter()
        .map(|token| {
            corpus
                .resolve_actor(token.trim())
                .map(|actor| actor.id())
                .ok_or_else(|| unknown_actor(token, corpus))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(match args.match_mode {
        MatchMode::Any => ActorFilter::AnyOf(ids),
        MatchMode::All => ActorFilter::AllOf(ids),
    })
}

fn unknown_actor(token: &str, corpus: &Corpus) -> StorylineError {
    let known = corpus
        .actor_names()
        .into_iter()
        .map(|(id, name)| format!("{id} ({name})"))
        .collect::<Vec<_>>()
        .join(", ");
    StorylineError::Config(format!("unknown actor `{token}`, expected one of: {known}"))
}

fn report_warnings(warnings: &[Diagnostic], source: &str) {
    for warning in warnings {
        let adapter = DiagnosticAdapter::new(warning, source);
        warn!("{}", error_adapter::render(&adapter));
    }
}
