//! The error returned when a corpus cannot be loaded.

use std::fmt;

use crate::error::Diagnostic;

/// One or more diagnostics, at least one of them an error.
#[derive(Debug)]
pub struct LoadError {
    diagnostics: Vec<Diagnostic>,
}

impl LoadError {
    pub fn new(diagnostics: Vec<Diagnostic>) -> Self {
        Self { diagnostics }
    }

    /// All diagnostics, errors and warnings, in the order they were found.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Number of error-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|diag| diag.severity().is_error())
            .count()
    }
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut errors = self.diagnostics.iter().filter(|d| d.severity().is_error());
        if let Some(first) = errors.next() {
            write!(f, "{first}")?;
            let rest = errors.count();
            if rest > 0 {
                write!(f, " (+{rest} more)")?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for LoadError {}

impl From<Diagnostic> for LoadError {
    fn from(diagnostic: Diagnostic) -> Self {
        Self::new(vec![diagnostic])
    }
}

impl From<Vec<Diagnostic>> for LoadError {
    fn from(diagnostics: Vec<Diagnostic>) -> Self {
        Self::new(diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    #[test]
    fn test_display_single() {
        let err: LoadError = Diagnostic::error("malformed XML").with_code(ErrorCode::E100).into();

        assert_eq!(err.to_string(), "error[E100]: malformed XML");
        assert_eq!(err.error_count(), 1);
    }

    #[test]
    fn test_display_counts_errors_only() {
        let err: LoadError = vec![
            Diagnostic::warning("dropped actor token"),
            Diagnostic::error("first error"),
            Diagnostic::error("second error"),
            Diagnostic::warning("dropped person token"),
        ]
        .into();

        assert_eq!(err.to_string(), "error: first error (+1 more)");
        assert_eq!(err.diagnostics().len(), 4);
        assert_eq!(err.error_count(), 2);
    }
}
