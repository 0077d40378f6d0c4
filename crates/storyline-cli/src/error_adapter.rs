//! miette reporting for load diagnostics and [`StorylineError`].
//!
//! Every problem becomes a [`Reportable`], a boxed miette diagnostic. A
//! [`storyline_parser::LoadError`] yields one reportable per diagnostic, and
//! load warnings go through the same adapter with warning severity.

use std::fmt;

use miette::{
    Diagnostic as MietteDiagnostic, GraphicalReportHandler, LabeledSpan, Severity, SourceCode,
    SourceSpan,
};
use thiserror::Error;

use storyline::StorylineError;
use storyline_parser::{Span, error::Diagnostic};

/// A problem ready for miette rendering.
pub type Reportable<'a> = Box<dyn MietteDiagnostic + 'a>;

/// A load diagnostic over its corpus source.
#[derive(Debug, Error)]
#[error("{}", .diag.message())]
pub struct DiagnosticAdapter<'a> {
    diag: &'a Diagnostic,
    src: &'a str,
}

impl<'a> DiagnosticAdapter<'a> {
    pub fn new(diag: &'a Diagnostic, src: &'a str) -> Self {
        Self { diag, src }
    }
}

impl MietteDiagnostic for DiagnosticAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = self.diag.code()?;
        Some(Box::new(code))
    }

    fn severity(&self) -> Option<Severity> {
        let severity = self.diag.severity();
        Some(if severity.is_warning() {
            Severity::Warning
        } else {
            Severity::Error
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = self.diag.help()?;
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        Some(&self.src)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = self.diag.labels();
        if labels.is_empty() {
            return None;
        }

        Some(Box::new(labels.iter().map(|label| {
            let message = Some(label.message().to_owned());
            let span = source_span(label.span());
            if label.is_primary() {
                LabeledSpan::new_primary_with_span(message, span)
            } else {
                LabeledSpan::new_with_span(message, span)
            }
        })))
    }
}

/// A [`StorylineError`] without a source location.
#[derive(Debug, Error)]
#[error("{0}")]
pub struct ErrorAdapter<'a>(pub &'a StorylineError);

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match self.0 {
            StorylineError::Io(_) => "storyline::io",
            StorylineError::Load { .. } => return None,
            StorylineError::Layout(_) => "storyline::layout",
            StorylineError::Config(_) => "storyline::config",
            StorylineError::Export(_) => "storyline::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self.0 {
            StorylineError::Layout(_) => Some(Box::new(
                "pass the id of a speech that appears in a TREL element",
            )),
            _ => None,
        }
    }
}

fn source_span(span: Span) -> SourceSpan {
    SourceSpan::new(span.start().into(), span.len())
}

/// Splits `err` into reportables, one per load diagnostic.
pub fn to_reportables(err: &StorylineError) -> Vec<Reportable<'_>> {
    match err {
        StorylineError::Load { err: load_err, src } => load_err
            .diagnostics()
            .iter()
            .map(|diag| Box::new(DiagnosticAdapter::new(diag, src)) as Reportable<'_>)
            .collect(),
        _ => vec![Box::new(ErrorAdapter(err)) as Reportable<'_>],
    }
}

/// Renders a diagnostic with miette's graphical handler.
pub fn render(diagnostic: &dyn MietteDiagnostic) -> String {
    let mut writer = String::new();
    if GraphicalReportHandler::new()
        .render_report(&mut writer, diagnostic)
        .is_err()
    {
        // Rendering into a String only fails inside miette itself
        return diagnostic.to_string();
    }
    writer
}
