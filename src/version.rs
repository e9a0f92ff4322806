//! The version aggregate: named parts in significance order.

use crate::error::BumpError;
use crate::part::VersionPart;
use core::fmt::{self, Display};

/// A parsed version: an ordered collection of named [`VersionPart`]s plus
/// the original input string (kept for diagnostics only, never re-derived).
///
/// The part order is the order of the named capture groups in the parse
/// pattern. Versions are immutable; [`bump`](Self::bump) returns a new
/// instance, so a caller can keep the prior snapshot around for diffing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    parts: Vec<(String, VersionPart)>,
    original: Option<String>,
}

impl Version {
    /// Returns a version from `(name, part)` pairs in significance order.
    pub fn new(parts: Vec<(String, VersionPart)>, original: Option<String>) -> Self {
        Self { parts, original }
    }

    /// Returns the part named `name`, if present.
    pub fn get(&self, name: &str) -> Option<&VersionPart> {
        self.parts
            .iter()
            .find(|(label, _)| label == name)
            .map(|(_, part)| part)
    }

    /// Iterates `(name, part)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &VersionPart)> {
        self.parts.iter().map(|(name, part)| (name.as_str(), part))
    }

    /// The number of parts.
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Whether the version has no parts.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// The string this version was parsed from, if any.
    pub fn original(&self) -> Option<&str> {
        self.original.as_deref()
    }

    /// Returns a new version with the part named `part_name` bumped and
    /// every less significant part reset to its first value.
    ///
    /// `order` is the canonical most-to-least-significant part ordering of
    /// the scheme (typically [`VersionConfig::order`](crate::VersionConfig::order)).
    /// It is an explicit argument so the cascade never depends on any
    /// container's iteration order. For each label in `order` that this
    /// version carries: before the target it is copied unchanged, the target
    /// is bumped, and after the target it is reset. Labels this version
    /// carries that are absent from `order` are dropped from the result;
    /// serialization fallback relies on this when a bump makes optional
    /// parts disappear.
    ///
    /// # Examples
    ///
    /// ```
    /// use partbump::{Incrementer, Version, VersionPart};
    /// use std::sync::Arc;
    ///
    /// let numeric = Arc::new(Incrementer::default());
    /// let version = Version::new(
    ///     vec![
    ///         ("major".into(), VersionPart::new(Some("2"), Arc::clone(&numeric))),
    ///         ("minor".into(), VersionPart::new(Some("7"), Arc::clone(&numeric))),
    ///         ("patch".into(), VersionPart::new(Some("1"), numeric)),
    ///     ],
    ///     None,
    /// );
    /// let bumped = version.bump("minor", &["major", "minor", "patch"]).unwrap();
    /// assert_eq!("8", bumped.get("minor").unwrap().value());
    /// assert_eq!("0", bumped.get("patch").unwrap().value());
    /// assert_eq!("2", bumped.get("major").unwrap().value());
    /// ```
    ///
    /// # Errors
    ///
    /// - [`BumpError::UnknownPart`] if `part_name` matches no label in both
    ///   `order` and this version, so nothing was bumped.
    /// - Any incrementer error from bumping the target part.
    pub fn bump<S>(&self, part_name: &str, order: &[S]) -> Result<Self, BumpError>
    where
        S: AsRef<str>,
    {
        let mut bumped = false;
        let mut new_parts = Vec::with_capacity(self.parts.len());

        for label in order {
            let label = label.as_ref();
            let Some(part) = self.get(label) else {
                continue;
            };

            let new_part = if label == part_name {
                bumped = true;
                part.bump()?
            } else if bumped {
                part.reset()
            } else {
                part.clone()
            };
            new_parts.push((label.to_owned(), new_part));
        }

        if !bumped {
            return Err(BumpError::UnknownPart {
                name: part_name.to_owned(),
            });
        }

        Ok(Self {
            parts: new_parts,
            original: self.original.clone(),
        })
    }
}

impl Display for Version {
    /// Renders the parts as `name=value` pairs for diagnostics. Use
    /// [`VersionConfig::serialize`](crate::VersionConfig::serialize) for the
    /// scheme's output string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, part)) in self.parts.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{name}={part}")?;
        }
        Ok(())
    }
}
