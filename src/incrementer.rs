//! Bump strategies for version parts.
//!
//! Every part of a version advances according to one [`Incrementer`]. The
//! set of strategies is closed: independent (fixed value), numeric
//! (increment the first digit run), cycle (walk an ordered value list), and
//! calendar (re-render from a clock).

use crate::error::{BumpError, ConfigError};
use crate::template::Template;
use chrono::{Datelike, NaiveDateTime, Timelike};
use core::fmt::{self, Display};
use regex::Regex;
use std::sync::LazyLock;

/// Splits a value into non-digit prefix, first digit run, and the rest.
static FIRST_NUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\D*)(\d+)(.*)").expect("pattern is valid"));

/// Placeholder names a calendar format may reference.
///
/// Values render unpadded; use a zero-pad spec (e.g. `{month:02}`) in the
/// format for fixed widths.
pub const DATE_KEYS: &[&str] = &[
    "year",
    "short_year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
];

/// Where a calendar strategy reads the current date and time from.
///
/// Modeled as data rather than a trait so configurations stay plain values.
/// Use [`Clock::Fixed`] in tests for deterministic output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Clock {
    /// The system clock in the local timezone.
    Local,
    /// The system clock in UTC.
    Utc,
    /// A frozen point in time.
    Fixed(NaiveDateTime),
}

impl Clock {
    /// Returns the current date and time according to this clock.
    pub fn now(&self) -> NaiveDateTime {
        match self {
            Clock::Local => chrono::Local::now().naive_local(),
            Clock::Utc => chrono::Utc::now().naive_utc(),
            Clock::Fixed(datetime) => *datetime,
        }
    }
}

fn datetime_value(now: &NaiveDateTime, key: &str) -> Option<String> {
    let value = match key {
        "year" => now.year().to_string(),
        "short_year" => (now.year().rem_euclid(100)).to_string(),
        "month" => now.month().to_string(),
        "day" => now.day().to_string(),
        "hour" => now.hour().to_string(),
        "minute" => now.minute().to_string(),
        "second" => now.second().to_string(),
        _ => return None,
    };
    Some(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Kind {
    Independent {
        value: String,
    },
    Numeric {
        first_value: String,
    },
    Cycle {
        values: Vec<String>,
        first_value: String,
        optional_value: String,
    },
    Calendar {
        template: Template,
        clock: Clock,
        first_value: String,
    },
}

/// A rule for advancing one part's textual value.
///
/// Incrementers are built once per configured part name and shared read-only
/// across every [`VersionPart`](crate::VersionPart) parsed with them. All
/// variants carry the same metadata: a first value (assigned on reset), an
/// optional value (the value that means "absent"), an independence flag, and
/// an always-increment flag.
///
/// # Examples
///
/// ```
/// use partbump::Incrementer;
///
/// let numeric = Incrementer::numeric(None).unwrap();
/// assert_eq!("r4", numeric.bump("r3").unwrap());
/// assert_eq!("2", numeric.bump("1").unwrap());
/// assert_eq!("r4-001", numeric.bump("r3-001").unwrap());
///
/// let cycle = Incrementer::cycle(["alpha", "beta", "rc", "final"], None, None).unwrap();
/// assert_eq!("rc", cycle.bump("beta").unwrap());
/// assert!(cycle.bump("final").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Incrementer(Kind);

impl Incrementer {
    /// Returns an independent incrementer that holds a single fixed value
    /// (empty if `value` is `None`).
    ///
    /// Bumping passes the current value through, falling back to the fixed
    /// value when the current value is empty.
    pub fn independent(value: Option<&str>) -> Self {
        Self(Kind::Independent {
            value: value.unwrap_or_default().to_owned(),
        })
    }

    /// Returns a numeric incrementer starting at `first_value` (default
    /// `"0"`).
    ///
    /// # Errors
    ///
    /// - [`ConfigError::NonNumericFirstValue`] if `first_value` contains no
    ///   digit.
    pub fn numeric(first_value: Option<&str>) -> Result<Self, ConfigError> {
        let first_value = first_value.unwrap_or("0");
        if !FIRST_NUMERIC.is_match(first_value) {
            return Err(ConfigError::NonNumericFirstValue {
                value: first_value.to_owned(),
            });
        }
        Ok(Self(Kind::Numeric {
            first_value: first_value.to_owned(),
        }))
    }

    /// Returns a cycle incrementer over an ordered list of allowed values.
    ///
    /// `optional_value` and `first_value` both default to the list's first
    /// element.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::EmptyCycleValues`] if `values` is empty.
    /// - [`ConfigError::ValueNotInCycle`] if `optional_value` or
    ///   `first_value` is not a member of `values`.
    pub fn cycle<S>(
        values: impl IntoIterator<Item = S>,
        optional_value: Option<&str>,
        first_value: Option<&str>,
    ) -> Result<Self, ConfigError>
    where
        S: Into<String>,
    {
        let values: Vec<String> = values.into_iter().map(Into::into).collect();
        if values.is_empty() {
            return Err(ConfigError::EmptyCycleValues);
        }

        let membership = |field: &'static str, value: Option<&str>| -> Result<String, ConfigError> {
            let value = value.unwrap_or(&values[0]).to_owned();
            if values.contains(&value) {
                Ok(value)
            } else {
                Err(ConfigError::ValueNotInCycle {
                    field,
                    value,
                    values: values.clone(),
                })
            }
        };
        let optional_value = membership("optional_value", optional_value)?;
        let first_value = membership("first_value", first_value)?;

        Ok(Self(Kind::Cycle {
            values,
            first_value,
            optional_value,
        }))
    }

    /// Returns a calendar incrementer that renders `format` from `clock`.
    ///
    /// The first value is rendered immediately; every bump re-renders from
    /// the clock, ignoring the current value.
    ///
    /// # Errors
    ///
    /// - Template syntax errors, as for [`Template::parse`].
    /// - [`ConfigError::UnknownCalendarPlaceholder`] if the format references
    ///   a name outside [`DATE_KEYS`].
    pub fn calendar(format: &str, clock: Clock) -> Result<Self, ConfigError> {
        let template = Template::parse(format)?;
        for label in template.labels() {
            if !DATE_KEYS.contains(&label) {
                return Err(ConfigError::UnknownCalendarPlaceholder {
                    name: label.to_owned(),
                    known: DATE_KEYS,
                });
            }
        }
        let first_value = render_clock(&template, &clock);
        Ok(Self(Kind::Calendar {
            template,
            clock,
            first_value,
        }))
    }

    /// The value assigned when a part is reset.
    pub fn first_value(&self) -> &str {
        match &self.0 {
            Kind::Independent { value } => value,
            Kind::Numeric { first_value }
            | Kind::Cycle { first_value, .. }
            | Kind::Calendar { first_value, .. } => first_value,
        }
    }

    /// The value that represents "absent" for a part using this incrementer.
    pub fn optional_value(&self) -> &str {
        match &self.0 {
            Kind::Independent { value } => value,
            Kind::Numeric { first_value } => first_value,
            Kind::Cycle { optional_value, .. } => optional_value,
            // calendar parts are never meaningfully absent, so the freshly
            // rendered first value stands in
            Kind::Calendar { first_value, .. } => first_value,
        }
    }

    /// Whether this part stands apart from bump cascades. Metadata only.
    pub fn is_independent(&self) -> bool {
        matches!(self.0, Kind::Independent { .. })
    }

    /// Whether every bump recomputes from external state rather than from
    /// the previous value.
    pub fn always_increments(&self) -> bool {
        matches!(self.0, Kind::Calendar { .. })
    }

    /// Advances `value` according to this strategy and returns the new value.
    ///
    /// # Errors
    ///
    /// - [`BumpError::NoNumericPortion`] if a numeric strategy finds no digit
    ///   run in `value`.
    /// - [`BumpError::BelowFirstValue`] if the digit run is below the
    ///   strategy's floor.
    /// - [`BumpError::ValueNotInCycle`] if a cycle strategy sees a value
    ///   outside its list.
    /// - [`BumpError::CycleExhausted`] if the value is the list's last
    ///   element. There is no wraparound: past the end is a hard stop.
    pub fn bump(&self, value: &str) -> Result<String, BumpError> {
        match &self.0 {
            Kind::Independent { value: fixed } => Ok(if value.is_empty() {
                fixed.clone()
            } else {
                value.to_owned()
            }),
            Kind::Numeric { first_value } => bump_numeric(value, first_value),
            Kind::Cycle { values, .. } => bump_cycle(value, values),
            Kind::Calendar {
                template, clock, ..
            } => Ok(render_clock(template, clock)),
        }
    }
}

impl Default for Incrementer {
    /// The zero-argument numeric incrementer, the default strategy for parts
    /// with no explicit configuration.
    fn default() -> Self {
        Self(Kind::Numeric {
            first_value: "0".to_owned(),
        })
    }
}

impl Display for Incrementer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Kind::Independent { .. } => f.write_str("independent"),
            Kind::Numeric { .. } => f.write_str("numeric"),
            Kind::Cycle { .. } => f.write_str("cycle"),
            Kind::Calendar { .. } => f.write_str("calendar"),
        }
    }
}

fn render_clock(template: &Template, clock: &Clock) -> String {
    let now = clock.now();
    match template.render(|key| datetime_value(&now, key)) {
        Ok(rendered) => rendered,
        // labels were validated against DATE_KEYS at construction
        Err(_) => unreachable!(),
    }
}

fn bump_numeric(value: &str, first_value: &str) -> Result<String, BumpError> {
    let caps = FIRST_NUMERIC
        .captures(value)
        .ok_or_else(|| BumpError::NoNumericPortion {
            value: value.to_owned(),
        })?;
    let prefix = &caps[1];
    let numeric = &caps[2];
    let suffix = &caps[3];

    let current: u128 = numeric.parse().map_err(|_| BumpError::NumberOverflow {
        value: value.to_owned(),
    })?;
    let floor = first_numeric_portion(first_value)?;
    if current < floor {
        return Err(BumpError::BelowFirstValue {
            value: value.to_owned(),
            first_value: first_value.to_owned(),
        });
    }

    let bumped = current.checked_add(1).ok_or_else(|| BumpError::NumberOverflow {
        value: value.to_owned(),
    })?;
    Ok(format!("{prefix}{bumped}{suffix}"))
}

fn first_numeric_portion(first_value: &str) -> Result<u128, BumpError> {
    let caps = match FIRST_NUMERIC.captures(first_value) {
        Some(caps) => caps,
        // construction guarantees the first value contains a digit
        None => unreachable!(),
    };
    caps[2].parse().map_err(|_| BumpError::NumberOverflow {
        value: first_value.to_owned(),
    })
}

fn bump_cycle(value: &str, values: &[String]) -> Result<String, BumpError> {
    let index =
        values
            .iter()
            .position(|v| v == value)
            .ok_or_else(|| BumpError::ValueNotInCycle {
                value: value.to_owned(),
                values: values.to_vec(),
            })?;
    values
        .get(index + 1)
        .cloned()
        .ok_or_else(|| BumpError::CycleExhausted {
            value: value.to_owned(),
            values: values.to_vec(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn fixed_clock() -> Clock {
        let datetime = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        Clock::Fixed(datetime)
    }

    #[test]
    fn test_numeric_bump() {
        let args = [
            ("r3", "r4"),
            ("1", "2"),
            ("r3-001", "r4-001"),
            ("0", "1"),
            ("v10-rc2", "v11-rc2"),
        ];

        let incrementer = Incrementer::numeric(None).unwrap();
        for (value, expected) in args {
            assert_eq!(Ok(expected.to_owned()), incrementer.bump(value));
        }
    }

    #[test]
    fn test_numeric_bump_no_digits() {
        let incrementer = Incrementer::numeric(None).unwrap();
        assert_eq!(
            Err(BumpError::NoNumericPortion {
                value: "alpha".to_owned(),
            }),
            incrementer.bump("alpha")
        );
    }

    #[test]
    fn test_numeric_bump_below_first_value() {
        let incrementer = Incrementer::numeric(Some("5")).unwrap();
        assert_eq!(
            Err(BumpError::BelowFirstValue {
                value: "3".to_owned(),
                first_value: "5".to_owned(),
            }),
            incrementer.bump("3")
        );
        // at the floor is fine
        assert_eq!(Ok("6".to_owned()), incrementer.bump("5"));
    }

    #[test]
    fn test_numeric_floor_uses_numeric_portion() {
        // the floor is the digit run of the first value, not the whole string
        let incrementer = Incrementer::numeric(Some("r5")).unwrap();
        assert_eq!(Ok("8".to_owned()), incrementer.bump("7"));
        assert!(matches!(
            incrementer.bump("4"),
            Err(BumpError::BelowFirstValue { .. })
        ));
    }

    #[test]
    fn test_numeric_first_value_needs_digit() {
        assert_eq!(
            Err(ConfigError::NonNumericFirstValue {
                value: "abc".to_owned(),
            }),
            Incrementer::numeric(Some("abc")).map(|_| ())
        );
    }

    #[test]
    fn test_cycle_bump() {
        let incrementer =
            Incrementer::cycle(["alpha", "beta", "rc", "final"], None, None).unwrap();
        assert_eq!(Ok("beta".to_owned()), incrementer.bump("alpha"));
        assert_eq!(Ok("rc".to_owned()), incrementer.bump("beta"));
        assert_eq!(Ok("final".to_owned()), incrementer.bump("rc"));
    }

    #[test]
    fn test_cycle_bump_exhausted() {
        let incrementer =
            Incrementer::cycle(["alpha", "beta", "rc", "final"], None, None).unwrap();
        assert!(matches!(
            incrementer.bump("final"),
            Err(BumpError::CycleExhausted { .. })
        ));
    }

    #[test]
    fn test_cycle_bump_unknown_value() {
        let incrementer = Incrementer::cycle(["alpha", "beta"], None, None).unwrap();
        assert!(matches!(
            incrementer.bump("gamma"),
            Err(BumpError::ValueNotInCycle { .. })
        ));
    }

    #[test]
    fn test_cycle_construction_errors() {
        let empty: [&str; 0] = [];
        assert_eq!(
            Err(ConfigError::EmptyCycleValues),
            Incrementer::cycle(empty, None, None).map(|_| ())
        );
        assert!(matches!(
            Incrementer::cycle(["a", "b"], Some("c"), None),
            Err(ConfigError::ValueNotInCycle {
                field: "optional_value",
                ..
            })
        ));
        assert!(matches!(
            Incrementer::cycle(["a", "b"], None, Some("c")),
            Err(ConfigError::ValueNotInCycle {
                field: "first_value",
                ..
            })
        ));
    }

    #[test]
    fn test_cycle_defaults() {
        let incrementer = Incrementer::cycle(["alpha", "beta"], None, None).unwrap();
        assert_eq!("alpha", incrementer.first_value());
        assert_eq!("alpha", incrementer.optional_value());
    }

    #[test]
    fn test_independent_bump_passthrough() {
        let incrementer = Incrementer::independent(Some("fixed"));
        assert_eq!(Ok("whatever".to_owned()), incrementer.bump("whatever"));
        assert_eq!(Ok("fixed".to_owned()), incrementer.bump(""));
        assert_eq!("fixed", incrementer.first_value());
        assert_eq!("fixed", incrementer.optional_value());
        assert!(incrementer.is_independent());
    }

    #[test]
    fn test_calendar_bump_ignores_value() {
        let incrementer =
            Incrementer::calendar("{year}.{month:02}.{day:02}", fixed_clock()).unwrap();
        assert_eq!("2024.01.02", incrementer.first_value());
        assert_eq!(Ok("2024.01.02".to_owned()), incrementer.bump("1999.12.31"));
        assert_eq!(Ok("2024.01.02".to_owned()), incrementer.bump(""));
        assert!(incrementer.always_increments());
    }

    #[test]
    fn test_calendar_all_keys() {
        let incrementer = Incrementer::calendar(
            "{year}-{short_year}-{month}-{day}-{hour}-{minute}-{second}",
            fixed_clock(),
        )
        .unwrap();
        assert_eq!("2024-24-1-2-3-4-5", incrementer.first_value());
    }

    #[test]
    fn test_calendar_unknown_placeholder() {
        assert!(matches!(
            Incrementer::calendar("{year}.{quarter}", fixed_clock()),
            Err(ConfigError::UnknownCalendarPlaceholder { .. })
        ));
    }

    #[test]
    fn test_metadata_defaults() {
        let numeric = Incrementer::default();
        assert_eq!("0", numeric.first_value());
        assert_eq!("0", numeric.optional_value());
        assert!(!numeric.is_independent());
        assert!(!numeric.always_increments());
    }
}
