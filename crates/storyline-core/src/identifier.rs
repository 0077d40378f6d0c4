//! Identifier management using string interning
//!
//! Corpus ids (actor, location, speech and relation ids) are compared
//! constantly during layout. The [`Id`] type interns them once so that
//! equality and hashing are integer operations.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Process-wide identifier table.
///
/// Append-only: symbols are never removed, so an [`Id`] stays valid for the
/// lifetime of the process.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Interned corpus identifier.
///
/// Two ids are equal exactly when their source strings are equal, which is
/// what makes by-id comparison of re-materialized entities cheap.
///
/// # Examples
///
/// ```
/// use storyline_core::identifier::Id;
///
/// let speech = Id::new("TS12");
/// assert_eq!(speech, Id::new("TS12"));
/// assert_eq!(speech, "TS12");
/// assert_ne!(speech, Id::new("TS13"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from its string form, interning it if needed.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Runs `f` with the string form of this id.
    ///
    /// Avoids allocating when only a comparison or a write is needed.
    pub fn with_str<R>(&self, f: impl FnOnce(&str) -> R) -> R {
        with_interner(|interner| {
            let value = interner
                .resolve(self.0)
                .expect("Symbol should exist in interner");
            f(value)
        })
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.with_str(str::to_owned);
        f.write_str(&value)
    }
}

impl std::str::FromStr for Id {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        self.with_str(|value| value == other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}
