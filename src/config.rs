//! A standing parser/serializer bound to one version scheme.

use crate::error::{ConfigError, SerializeError};
use crate::incrementer::Incrementer;
use crate::part::VersionPart;
use crate::template::Template;
use crate::version::Version;
use log::{debug, warn};
use regex::{Regex, RegexBuilder};
use std::collections::HashMap;
use std::sync::Arc;

/// A complete description of a version scheme: how to parse a version string
/// into parts, which strategy advances each part, and how to serialize the
/// parts back out.
///
/// A configuration is immutable once built and safe to share across threads
/// as a read-only value. Build one per scheme and reuse it for every parse
/// and serialize.
///
/// # Examples
///
/// ```
/// use partbump::VersionConfig;
/// use std::collections::HashMap;
///
/// let config = VersionConfig::new(
///     r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
///     ["{major}.{minor}.{patch}"],
///     "{current_version}",
///     "{new_version}",
///     HashMap::new(),
/// )
/// .unwrap();
///
/// let version = config.parse("2.7.1").unwrap();
/// let bumped = version.bump("minor", &config.order()).unwrap();
/// assert_eq!("2.8.0", config.serialize(&bumped, &HashMap::new()).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct VersionConfig {
    parse_regex: Regex,
    serialize_formats: Vec<Template>,
    search: Template,
    replace: Template,
    part_incrementers: HashMap<String, Arc<Incrementer>>,
    default_incrementer: Arc<Incrementer>,
}

impl VersionConfig {
    /// Builds a configuration.
    ///
    /// `parse` is a regular expression with one named capture group per
    /// part, compiled in verbose mode (whitespace and `#` comments in the
    /// pattern are ignored; escape them to match literally). `serialize` is
    /// a non-empty list of format templates tried in priority order.
    /// `search` and `replace` are templates for the file-rewriting layer;
    /// the core only validates and stores them. `parts` maps part names to
    /// their incrementers; unmapped parts get a shared zero-argument numeric
    /// incrementer.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidParsePattern`] for bad regex syntax.
    /// - [`ConfigError::NoSerializeFormats`] if `serialize` is empty.
    /// - Template syntax errors from any format, `search`, or `replace`.
    pub fn new(
        parse: &str,
        serialize: impl IntoIterator<Item = impl AsRef<str>>,
        search: &str,
        replace: &str,
        parts: HashMap<String, Incrementer>,
    ) -> Result<Self, ConfigError> {
        let parse_regex = RegexBuilder::new(parse)
            .ignore_whitespace(true)
            .build()
            .map_err(|e| ConfigError::InvalidParsePattern {
                pattern: parse.to_owned(),
                reason: e.to_string(),
            })?;

        let serialize_formats = serialize
            .into_iter()
            .map(|format| Template::parse(format.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if serialize_formats.is_empty() {
            return Err(ConfigError::NoSerializeFormats);
        }

        let search = Template::parse(search)?;
        let replace = Template::parse(replace)?;

        let part_incrementers = parts
            .into_iter()
            .map(|(name, incrementer)| (name, Arc::new(incrementer)))
            .collect();

        Ok(Self {
            parse_regex,
            serialize_formats,
            search,
            replace,
            part_incrementers,
            default_incrementer: Arc::new(Incrementer::default()),
        })
    }

    /// The canonical most-to-least-significant part ordering: the
    /// placeholder names of the first serialize format, left to right.
    pub fn order(&self) -> Vec<String> {
        self.serialize_formats[0]
            .labels()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// The search template, for locating the current version in a file.
    pub fn search(&self) -> &Template {
        &self.search
    }

    /// The replace template, for writing the new version into a file.
    pub fn replace(&self) -> &Template {
        &self.replace
    }

    /// Parses a version string into a [`Version`].
    ///
    /// Returns `None` for empty input, and `None` with a warning-level log
    /// line when the pattern does not match anywhere in `text`. The miss is
    /// not an error because callers routinely probe lines that carry no
    /// version at all.
    ///
    /// The match need not start at the beginning of `text`. Every named
    /// capture group becomes a part, including groups that did not
    /// participate in the match; those carry no raw value and defer to their
    /// incrementer's optional value.
    pub fn parse(&self, text: &str) -> Option<Version> {
        if text.is_empty() {
            return None;
        }

        let Some(captures) = self.parse_regex.captures(text) else {
            warn!("failed to parse version: '{text}'");
            return None;
        };

        let parts = self
            .parse_regex
            .capture_names()
            .flatten()
            .map(|name| {
                let raw = captures.name(name).map(|m| m.as_str());
                let incrementer = self
                    .part_incrementers
                    .get(name)
                    .map_or_else(|| Arc::clone(&self.default_incrementer), Arc::clone);
                (name.to_owned(), VersionPart::new(raw, incrementer))
            })
            .collect();

        let version = Version::new(parts, Some(text.to_owned()));
        debug!("parsed version: {version}");
        Some(version)
    }

    /// Serializes a version using the first *complete* format.
    ///
    /// Formats are tried in priority order. A format is complete only when
    /// every placeholder it references names an actual part of the version;
    /// context entries never make a format complete, they only fill
    /// placeholders parts cannot. Parts shadow context on name collisions.
    /// This is what lets `{major}.{minor}.{patch}.{prekind}{pre}` fall back
    /// to `{major}.{minor}.{patch}` when the pre-release parts are gone,
    /// without the caller branching.
    ///
    /// # Errors
    ///
    /// - [`SerializeError::MissingKey`] if a probed format references a
    ///   placeholder absent from both the version and `context`. This
    ///   propagates immediately rather than falling through: no data exists
    ///   for it anywhere, which is a caller bug.
    /// - [`SerializeError::NoMatchingFormat`] if every format is incomplete.
    pub fn serialize(
        &self,
        version: &Version,
        context: &HashMap<String, String>,
    ) -> Result<String, SerializeError> {
        for format in &self.serialize_formats {
            let labels = format.labels();

            if let Some(missing) = labels
                .iter()
                .find(|label| version.get(label).is_none() && !context.contains_key(**label))
            {
                return Err(SerializeError::MissingKey {
                    key: (*missing).to_owned(),
                    format: format.source().to_owned(),
                });
            }

            if labels.iter().all(|label| version.get(label).is_some()) {
                let rendered = format.render(|name| {
                    version
                        .get(name)
                        .map(|part| part.value().to_owned())
                        .or_else(|| context.get(name).cloned())
                })?;
                debug!("serialized version to '{rendered}'");
                return Ok(rendered);
            }
        }

        Err(SerializeError::NoMatchingFormat {
            formats: self
                .serialize_formats
                .iter()
                .map(|format| format.source().to_owned())
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    fn no_context() -> HashMap<String, String> {
        HashMap::new()
    }

    #[fixture]
    fn semver_config() -> VersionConfig {
        VersionConfig::new(
            r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
            ["{major}.{minor}.{patch}"],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        )
        .unwrap()
    }

    #[fixture]
    fn pre_config() -> VersionConfig {
        let mut parts = HashMap::new();
        parts.insert(
            "prekind".to_owned(),
            Incrementer::cycle(["a", "b", "rc"], None, None).unwrap(),
        );
        VersionConfig::new(
            r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:\.(?P<prekind>a|b|rc)(?P<pre>\d+))?",
            [
                "{major}.{minor}.{patch}.{prekind}{pre}",
                "{major}.{minor}.{patch}",
            ],
            "{current_version}",
            "{new_version}",
            parts,
        )
        .unwrap()
    }

    #[rstest]
    fn test_round_trip(semver_config: VersionConfig) {
        let version = semver_config.parse("2.7.1").unwrap();
        assert_eq!(
            "2.7.1",
            semver_config.serialize(&version, &no_context()).unwrap()
        );
    }

    #[rstest]
    fn test_parse_bump_serialize(semver_config: VersionConfig) {
        let version = semver_config.parse("2.7.1").unwrap();
        let bumped = version.bump("minor", &semver_config.order()).unwrap();
        assert_eq!(
            "2.8.0",
            semver_config.serialize(&bumped, &no_context()).unwrap()
        );
    }

    #[rstest]
    fn test_order_from_first_format(pre_config: VersionConfig) {
        assert_eq!(
            vec!["major", "minor", "patch", "prekind", "pre"],
            pre_config.order()
        );
    }

    #[rstest]
    fn test_parse_empty_input(semver_config: VersionConfig) {
        assert!(semver_config.parse("").is_none());
    }

    #[rstest]
    fn test_parse_no_match(semver_config: VersionConfig) {
        assert!(semver_config.parse("not a version").is_none());
    }

    #[rstest]
    fn test_parse_unanchored(semver_config: VersionConfig) {
        let version = semver_config.parse("version = 2.7.1").unwrap();
        assert_eq!("2", version.get("major").unwrap().value());
        assert_eq!(Some("version = 2.7.1"), version.original());
    }

    #[test]
    fn test_parse_verbose_pattern() {
        let config = VersionConfig::new(
            "(?P<major>\\d+)\\.   # the major part\n(?P<minor>\\d+)",
            ["{major}.{minor}"],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        )
        .unwrap();
        let version = config.parse("3.14").unwrap();
        assert_eq!("3.14", config.serialize(&version, &no_context()).unwrap());
    }

    #[rstest]
    fn test_parse_keeps_unmatched_groups_as_optional_parts(pre_config: VersionConfig) {
        let version = pre_config.parse("1.2.3").unwrap();
        let prekind = version.get("prekind").unwrap();
        assert_eq!("a", prekind.value());
        assert!(prekind.is_optional());
    }

    #[rstest]
    fn test_parse_uses_configured_incrementer(pre_config: VersionConfig) {
        let version = pre_config.parse("1.2.3.b2").unwrap();
        let bumped = version.bump("prekind", &pre_config.order()).unwrap();
        assert_eq!("rc", bumped.get("prekind").unwrap().value());
        // pre is less significant than prekind and resets
        assert_eq!("0", bumped.get("pre").unwrap().value());
    }

    #[test]
    fn test_serialize_format_fallback() {
        // the formats reference parts the pattern never captures, so only
        // the plain format is complete
        let config = VersionConfig::new(
            r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
            [
                "{major}.{minor}.{patch}.{prekind}{pre}",
                "{major}.{minor}.{patch}",
            ],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        )
        .unwrap();

        let version = config.parse("1.2.3").unwrap();
        let mut context = no_context();
        context.insert("prekind".to_owned(), "a".to_owned());
        context.insert("pre".to_owned(), "0".to_owned());
        assert_eq!("1.2.3", config.serialize(&version, &context).unwrap());
    }

    #[rstest]
    fn test_serialize_missing_key_propagates(semver_config: VersionConfig) {
        let config = VersionConfig::new(
            r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
            ["{major}.{minor}.{patch}+{build}", "{major}.{minor}.{patch}"],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        )
        .unwrap();

        let version = semver_config.parse("1.2.3").unwrap();
        // `build` is in neither the version nor the context: a caller bug,
        // surfaced instead of silently falling back
        assert_eq!(
            Err(SerializeError::MissingKey {
                key: "build".to_owned(),
                format: "{major}.{minor}.{patch}+{build}".to_owned(),
            }),
            config.serialize(&version, &no_context())
        );
    }

    #[rstest]
    fn test_serialize_no_matching_format(semver_config: VersionConfig) {
        let version = semver_config.parse("1.2.3").unwrap();
        let config = VersionConfig::new(
            r"(?P<major>\d+)",
            ["{major}.{epoch}"],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        )
        .unwrap();

        let mut context = no_context();
        context.insert("epoch".to_owned(), "1".to_owned());
        // `epoch` resolves through the context, so probing passes, but a
        // context entry is not a part and the format is never complete
        assert_eq!(
            Err(SerializeError::NoMatchingFormat {
                formats: vec!["{major}.{epoch}".to_owned()],
            }),
            config.serialize(&version, &context)
        );
    }

    #[test]
    fn test_new_invalid_pattern() {
        let result = VersionConfig::new(
            r"(?P<major>\d+",
            ["{major}"],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::InvalidParsePattern { .. })
        ));
    }

    #[test]
    fn test_new_requires_serialize_format() {
        let empty: [&str; 0] = [];
        let result = VersionConfig::new(
            r"(?P<major>\d+)",
            empty,
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        );
        assert_eq!(Err(ConfigError::NoSerializeFormats), result.map(|_| ()));
    }

    #[test]
    fn test_new_invalid_serialize_template() {
        let result = VersionConfig::new(
            r"(?P<major>\d+)",
            ["{major"],
            "{current_version}",
            "{new_version}",
            HashMap::new(),
        );
        assert!(matches!(
            result,
            Err(ConfigError::UnterminatedPlaceholder { .. })
        ));
    }

    #[rstest]
    fn test_search_replace_templates(semver_config: VersionConfig) {
        let mut context = no_context();
        context.insert("current_version".to_owned(), "2.7.1".to_owned());
        context.insert("new_version".to_owned(), "2.8.0".to_owned());

        let search = semver_config
            .search()
            .render(|name| context.get(name).cloned())
            .unwrap();
        let replace = semver_config
            .replace()
            .render(|name| context.get(name).cloned())
            .unwrap();
        assert_eq!("2.7.1", search);
        assert_eq!("2.8.0", replace);
    }
}
