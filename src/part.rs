//! A single named segment of a version.

use crate::error::BumpError;
use crate::incrementer::Incrementer;
use core::fmt::{self, Display};
use std::sync::Arc;

/// One part of a version (e.g. major, minor, patch, pre), pairing an
/// optional raw value with the shared [`Incrementer`] that governs it.
///
/// Parts are immutable: [`bump`](Self::bump) and [`reset`](Self::reset)
/// return new instances. The incrementer is reference-counted because one
/// strategy instance serves every part of that name across all parsed
/// versions.
///
/// Equality and display both use the *effective* value: the raw value when
/// present and non-empty, otherwise the incrementer's optional value. Two
/// parts with equal effective values are equal even when their incrementers
/// differ.
#[derive(Debug, Clone)]
pub struct VersionPart {
    raw: Option<String>,
    incrementer: Arc<Incrementer>,
}

impl VersionPart {
    /// Returns a part holding `raw` (which may be absent, deferring to the
    /// incrementer's optional value).
    pub fn new(raw: Option<&str>, incrementer: Arc<Incrementer>) -> Self {
        Self {
            raw: raw.map(str::to_owned),
            incrementer,
        }
    }

    /// The effective value: the raw value when non-empty, else the
    /// incrementer's optional value.
    pub fn value(&self) -> &str {
        match self.raw.as_deref() {
            Some(raw) if !raw.is_empty() => raw,
            _ => self.incrementer.optional_value(),
        }
    }

    /// Returns a new part with the effective value advanced by the
    /// incrementer.
    ///
    /// # Errors
    ///
    /// Propagates the incrementer's [`BumpError`]. Callers must not swallow
    /// this and substitute a default.
    pub fn bump(&self) -> Result<Self, BumpError> {
        let bumped = self.incrementer.bump(self.value())?;
        Ok(Self {
            raw: Some(bumped),
            incrementer: Arc::clone(&self.incrementer),
        })
    }

    /// Returns a new part holding the incrementer's first value.
    pub fn reset(&self) -> Self {
        Self {
            raw: Some(self.incrementer.first_value().to_owned()),
            incrementer: Arc::clone(&self.incrementer),
        }
    }

    /// Whether the effective value equals the incrementer's optional value,
    /// i.e. the part is not meaningfully present.
    pub fn is_optional(&self) -> bool {
        self.value() == self.incrementer.optional_value()
    }

    /// The incrementer governing this part.
    pub fn incrementer(&self) -> &Incrementer {
        &self.incrementer
    }
}

impl PartialEq for VersionPart {
    fn eq(&self, other: &Self) -> bool {
        self.value() == other.value()
    }
}

impl Eq for VersionPart {}

impl Display for VersionPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}
