//! Error codes for corpus diagnostics.
//!
//! - `E1xx` - XML syntax
//! - `E3xx` - Element resolution (missing attributes, duplicates, references)

use std::fmt;

/// Stable codes identifying each kind of corpus problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // XML Syntax (E1xx)
    // =========================================================================
    /// Malformed XML.
    ///
    /// The document is not well-formed: unclosed or mismatched tags, broken
    /// attribute syntax, invalid escapes.
    E100,

    // =========================================================================
    // Element Resolution (E3xx)
    // =========================================================================
    /// Missing required attribute.
    ///
    /// A corpus element lacks an attribute it cannot be built without, such
    /// as `ID` on any element or `FROM`/`TO`/`REL` on a relation.
    E300,

    /// Duplicate id.
    ///
    /// Two elements of the same kind declare the same `ID`.
    E301,

    /// Unknown relation kind.
    ///
    /// `REL` is not one of `IMMEDIATELY_BEFORE`, `IMMEDIATELY_AFTER`,
    /// `BEFORE`, `AFTER` or `SIMULTANEOUS`.
    E302,

    /// Unknown speech reference.
    ///
    /// A relation's `FROM` or `TO` does not name a declared speech.
    E303,

    /// Unresolved actor token.
    ///
    /// An entry of a speech's `ACTORS` list matches neither an actor id nor
    /// an actor name. The token is dropped.
    E304,

    /// Unknown location.
    ///
    /// A speech's `LOCATION` does not name a declared location. The speech
    /// is loaded without a location.
    E305,

    /// Unresolved person token.
    ///
    /// An entry of a speech's `PER` list does not name a declared actor. The
    /// token is dropped.
    E306,
}

impl ErrorCode {
    /// Returns a short human description of the code.
    pub fn description(self) -> &'static str {
        match self {
            ErrorCode::E100 => "malformed XML",
            ErrorCode::E300 => "missing required attribute",
            ErrorCode::E301 => "duplicate id",
            ErrorCode::E302 => "unknown relation kind",
            ErrorCode::E303 => "unknown speech reference",
            ErrorCode::E304 => "unresolved actor token",
            ErrorCode::E305 => "unknown location",
            ErrorCode::E306 => "unresolved person token",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
