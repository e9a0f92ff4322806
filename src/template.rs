//! Named-placeholder templates.
//!
//! A [`Template`] is the serialization half of a version scheme: literal text
//! interspersed with `{name}` placeholders, tokenized once at construction so
//! that rendering is a straight walk over the tokens.

use crate::error::{ConfigError, SerializeError};
use core::fmt::{self, Display, Write};

/// How a placeholder's value is padded when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pad {
    /// Substitute the value as-is.
    None,
    /// Pad left with spaces to the given width.
    Space(usize),
    /// Pad left with zeros to the given width.
    Zero(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TemplateToken {
    /// Literal text, with brace escapes already collapsed.
    Literal(String),
    Placeholder { name: String, pad: Pad },
}

/// A parsed format string with `{name}` placeholders.
///
/// The grammar is the named subset of Python's `str.format`:
///
/// - `{name}` substitutes the value bound to `name`.
/// - `{name:N}` additionally pads left with spaces to width `N`, and
///   `{name:0N}` pads left with zeros. No other format specs are supported.
/// - `{{` and `}}` are literal braces.
///
/// # Examples
///
/// ```
/// use partbump::Template;
///
/// let template = Template::parse("{major}.{minor}.{patch}").unwrap();
/// assert_eq!(vec!["major", "minor", "patch"], template.labels());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    tokens: Vec<TemplateToken>,
}

impl Template {
    /// Parses a format string into a template.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnterminatedPlaceholder`] if a `{` is never closed.
    /// - [`ConfigError::UnmatchedBrace`] if a `}` has no opening `{`.
    /// - [`ConfigError::EmptyPlaceholderName`] for `{}` or `{:02}`.
    /// - [`ConfigError::UnsupportedFormatSpec`] for any format spec other
    ///   than a width or a zero-padded width.
    pub fn parse(source: &str) -> Result<Self, ConfigError> {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '}' => {
                    return Err(ConfigError::UnmatchedBrace {
                        template: source.to_owned(),
                    })
                }
                '{' => {
                    let mut field = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => field.push(c),
                            None => {
                                return Err(ConfigError::UnterminatedPlaceholder {
                                    template: source.to_owned(),
                                })
                            }
                        }
                    }

                    let (name, spec) = match field.split_once(':') {
                        Some((name, spec)) => (name, spec),
                        None => (field.as_str(), ""),
                    };
                    if name.is_empty() {
                        return Err(ConfigError::EmptyPlaceholderName {
                            template: source.to_owned(),
                        });
                    }
                    let pad = parse_pad(name, spec)?;

                    if !literal.is_empty() {
                        tokens.push(TemplateToken::Literal(core::mem::take(&mut literal)));
                    }
                    tokens.push(TemplateToken::Placeholder {
                        name: name.to_owned(),
                        pad,
                    });
                }
                c => literal.push(c),
            }
        }

        if !literal.is_empty() {
            tokens.push(TemplateToken::Literal(literal));
        }

        Ok(Self {
            source: source.to_owned(),
            tokens,
        })
    }

    /// Returns the original format string this template was parsed from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the placeholder names in left-to-right occurrence order.
    /// Duplicates are kept.
    pub fn labels(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .filter_map(|token| match token {
                TemplateToken::Placeholder { name, .. } => Some(name.as_str()),
                TemplateToken::Literal(_) => None,
            })
            .collect()
    }

    /// Renders the template, resolving each placeholder through `resolve`.
    ///
    /// # Errors
    ///
    /// - [`SerializeError::MissingKey`] if `resolve` returns `None` for any
    ///   placeholder.
    pub fn render<F>(&self, mut resolve: F) -> Result<String, SerializeError>
    where
        F: FnMut(&str) -> Option<String>,
    {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                TemplateToken::Literal(text) => out.push_str(text),
                TemplateToken::Placeholder { name, pad } => {
                    let value = resolve(name).ok_or_else(|| SerializeError::MissingKey {
                        key: name.clone(),
                        format: self.source.clone(),
                    })?;
                    match *pad {
                        Pad::None => out.push_str(&value),
                        // writing to a String cannot fail
                        Pad::Space(width) => {
                            let _ = write!(out, "{value:>width$}");
                        }
                        Pad::Zero(width) => {
                            let _ = write!(out, "{value:0>width$}");
                        }
                    }
                }
            }
        }
        Ok(out)
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_pad(name: &str, spec: &str) -> Result<Pad, ConfigError> {
    if spec.is_empty() {
        return Ok(Pad::None);
    }
    let (zero, width_str) = match spec.strip_prefix('0') {
        Some(rest) if !rest.is_empty() => (true, rest),
        _ => (false, spec),
    };
    match width_str.parse::<usize>() {
        Ok(width) if width_str.bytes().all(|b| b.is_ascii_digit()) => Ok(if zero {
            Pad::Zero(width)
        } else {
            Pad::Space(width)
        }),
        _ => Err(ConfigError::UnsupportedFormatSpec {
            name: name.to_owned(),
            spec: spec.to_owned(),
        }),
    }
}
