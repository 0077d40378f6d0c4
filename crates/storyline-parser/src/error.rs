//! Diagnostics reported while loading a corpus.
//!
//! Loading never stops at the first problem. Every issue becomes a
//! [`Diagnostic`] with a severity, an optional [`ErrorCode`], labels pointing
//! at the offending XML element and optional help. Errors are gathered by a
//! collector and returned together as a [`LoadError`]; warnings travel with
//! the successfully loaded corpus.
//!
//! # Example
//!
//! ```
//! # use storyline_parser::error::{Diagnostic, ErrorCode};
//! # use storyline_parser::Span;
//!
//! let diag = Diagnostic::error("speech `TS4` is defined multiple times")
//!     .with_code(ErrorCode::E301)
//!     .with_label(Span::new(120..160), "duplicate definition")
//!     .with_secondary_label(Span::new(40..80), "first defined here")
//!     .with_help("speech ids must be unique within a corpus");
//!
//! assert_eq!(diag.labels().len(), 2);
//! ```

mod collector;
mod diagnostic;
mod error_code;
mod label;
mod load_error;
mod severity;

pub(crate) use collector::DiagnosticCollector;

pub use diagnostic::Diagnostic;
pub use error_code::ErrorCode;
pub use label::Label;
pub use load_error::LoadError;
pub use severity::Severity;
