//! Accumulates diagnostics across a loading stage.

use crate::error::{Diagnostic, LoadError};

/// Gathers every diagnostic of a load so the user sees all problems at once.
#[derive(Debug, Default)]
pub struct DiagnosticCollector {
    diagnostics: Vec<Diagnostic>,
    has_errors: bool,
}

impl DiagnosticCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, diagnostic: Diagnostic) {
        if diagnostic.severity().is_error() {
            self.has_errors = true;
        }
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        self.has_errors
    }

    /// Finishes collection.
    ///
    /// Returns the warnings when no error was emitted, otherwise a
    /// [`LoadError`] holding every diagnostic.
    pub fn finish(self) -> Result<Vec<Diagnostic>, LoadError> {
        if self.has_errors {
            Err(LoadError::new(self.diagnostics))
        } else {
            Ok(self.diagnostics)
        }
    }
}
