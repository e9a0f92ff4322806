//! Error types, separated by the operation that can produce them.

/// Errors from building a [`VersionConfig`](crate::VersionConfig), an
/// [`Incrementer`](crate::Incrementer), or a [`Template`](crate::Template).
///
/// These are construction-time failures: once a configuration exists, none of
/// these can occur again.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum ConfigError {
    /// The parse pattern is not a valid regular expression.
    #[error("invalid parse pattern `{pattern}`: {reason}")]
    InvalidParsePattern {
        /// The offending pattern source.
        pattern: String,
        /// The regex engine's diagnostic.
        reason: String,
    },

    /// A configuration needs at least one serialize format.
    #[error("at least one serialize format is required")]
    NoSerializeFormats,

    /// A numeric incrementer's first value must contain a digit to increment.
    #[error("invalid first value `{value}`: must contain at least one digit")]
    NonNumericFirstValue {
        /// The offending first value.
        value: String,
    },

    /// A cycle incrementer's value list must not be empty.
    #[error("cycle values cannot be empty")]
    EmptyCycleValues,

    /// A cycle incrementer's first/optional value must be a member of its list.
    #[error("{field} `{value}` must be included in {values:?}")]
    ValueNotInCycle {
        /// Which field referenced the value (`first_value` or `optional_value`).
        field: &'static str,
        /// The offending value.
        value: String,
        /// The configured value list.
        values: Vec<String>,
    },

    /// A placeholder opened with `{` but never closed.
    #[error("unterminated placeholder in template `{template}`")]
    UnterminatedPlaceholder {
        /// The offending template source.
        template: String,
    },

    /// A `}` appeared with no matching `{` (write `}}` for a literal brace).
    #[error("unmatched `}}` in template `{template}`")]
    UnmatchedBrace {
        /// The offending template source.
        template: String,
    },

    /// A placeholder had no name, like `{}` or `{:02}`.
    #[error("empty placeholder name in template `{template}`")]
    EmptyPlaceholderName {
        /// The offending template source.
        template: String,
    },

    /// A placeholder used a format spec this grammar does not support.
    #[error("unsupported format spec `{spec}` for placeholder `{name}`")]
    UnsupportedFormatSpec {
        /// The placeholder name.
        name: String,
        /// The unsupported spec text.
        spec: String,
    },

    /// A calendar template referenced a placeholder with no date/time meaning.
    #[error("unknown calendar placeholder `{name}`, expected one of {known:?}")]
    UnknownCalendarPlaceholder {
        /// The offending placeholder name.
        name: String,
        /// The recognized placeholder names.
        known: &'static [&'static str],
    },
}

/// Errors from bumping a part or a version.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BumpError {
    /// A numeric incrementer found no digit run to increment.
    #[error("cannot bump `{value}`: no numeric portion found")]
    NoNumericPortion {
        /// The value that was bumped.
        value: String,
    },

    /// A numeric incrementer will not move a value backward past its floor.
    #[error("value `{value}` is lower than the first value `{first_value}` and cannot be bumped")]
    BelowFirstValue {
        /// The value that was bumped.
        value: String,
        /// The configured floor.
        first_value: String,
    },

    /// A digit run too large to represent. Incrementing it would require
    /// arbitrary-precision arithmetic.
    #[error("numeric portion of `{value}` is too large to bump")]
    NumberOverflow {
        /// The value that was bumped.
        value: String,
    },

    /// A cycle incrementer saw a value outside its configured list.
    #[error("value `{value}` is not among the allowed values {values:?}")]
    ValueNotInCycle {
        /// The value that was bumped.
        value: String,
        /// The configured value list.
        values: Vec<String>,
    },

    /// A cycle incrementer is already at its last value. Cycles do not wrap
    /// around.
    #[error("value `{value}` is already the maximum among {values:?} and cannot be bumped")]
    CycleExhausted {
        /// The value that was bumped.
        value: String,
        /// The configured value list.
        values: Vec<String>,
    },

    /// The requested part name matched nothing in the version/order
    /// intersection, so no part was bumped.
    #[error("unknown part `{name}`: nothing was bumped")]
    UnknownPart {
        /// The requested part name.
        name: String,
    },
}

/// Errors from serializing a [`Version`](crate::Version) back to a string.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum SerializeError {
    /// A format referenced a placeholder absent from both the context and the
    /// version's parts. This is not recoverable by fallback: no data exists
    /// for it anywhere.
    #[error("missing key `{key}` while serializing with format `{format}`")]
    MissingKey {
        /// The unresolvable placeholder name.
        key: String,
        /// The format being rendered.
        format: String,
    },

    /// Every configured format referenced at least one part the version does
    /// not carry.
    #[error("no serialize format is complete for this version, tried {formats:?}")]
    NoMatchingFormat {
        /// The formats that were probed, in priority order.
        formats: Vec<String>,
    },
}

/// Any error this crate can produce, for callers that don't care which
/// operation failed.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    /// See [`ConfigError`].
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// See [`BumpError`].
    #[error(transparent)]
    Bump(#[from] BumpError),

    /// See [`SerializeError`].
    #[error(transparent)]
    Serialize(#[from] SerializeError),
}
