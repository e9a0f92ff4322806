//! # partbump
//!
//! A library for parsing, bumping, and serializing versions made of
//! configurable parts.
//!
//! Instead of hard-coding one versioning scheme, this library lets you
//! describe a scheme declaratively: a regular expression with one named
//! capture group per part, a strategy for how each part advances, and a
//! priority-ordered list of output formats. From there, parse a version
//! string into parts, bump one part (resetting everything less
//! significant), and serialize the result.
//!
//! ## Examples
//!
//! A plain semantic scheme:
//!
//! ```
//! use partbump::prelude::*;
//! use std::collections::HashMap;
//!
//! let config = VersionConfig::new(
//!     r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)",
//!     ["{major}.{minor}.{patch}"],
//!     "{current_version}",
//!     "{new_version}",
//!     HashMap::new(),
//! ).unwrap();
//!
//! let version = config.parse("2.7.1").unwrap();
//! let bumped = version.bump("minor", &config.order()).unwrap();
//! assert_eq!("2.8.0", config.serialize(&bumped, &HashMap::new()).unwrap());
//! ```
//!
//! A scheme with a pre-release cycle and serialization fallback:
//!
//! ```
//! use partbump::prelude::*;
//! use std::collections::HashMap;
//!
//! let mut parts = HashMap::new();
//! parts.insert(
//!     "prekind".to_owned(),
//!     Incrementer::cycle(["a", "b", "rc"], None, None).unwrap(),
//! );
//! let config = VersionConfig::new(
//!     r"(?P<major>\d+)\.(?P<minor>\d+)\.(?P<patch>\d+)(?:\.(?P<prekind>a|b|rc)(?P<pre>\d+))?",
//!     ["{major}.{minor}.{patch}.{prekind}{pre}", "{major}.{minor}.{patch}"],
//!     "{current_version}",
//!     "{new_version}",
//!     parts,
//! ).unwrap();
//!
//! let version = config.parse("1.2.3.b0").unwrap();
//! let bumped = version.bump("prekind", &config.order()).unwrap();
//! assert_eq!("1.2.3.rc0", config.serialize(&bumped, &HashMap::new()).unwrap());
//! ```
//!
//! ## Important Terms
//!
//! - **Part**: one named segment of a version string (e.g. major, prekind),
//!   modeled by [`VersionPart`].
//! - **Incrementer**: the rule governing how a part's value advances,
//!   modeled by [`Incrementer`]. Four strategies exist: independent,
//!   numeric, cycle, and calendar.
//! - **Version**: an ordered collection of named parts, modeled by
//!   [`Version`]. Bumping one part resets all less significant parts.
//! - **Configuration**: the scheme itself, modeled by [`VersionConfig`]: a
//!   parse pattern, per-part incrementers, and serialize formats tried in
//!   priority order until one is complete for the parts at hand.
//!
//! ## Concurrency
//!
//! Everything here is an immutable value. Incrementers are shared read-only
//! across parts, and every bump or reset builds new instances, so a
//! [`VersionConfig`] can be used from many threads at once. The only
//! external state is the clock behind calendar parts; inject
//! [`Clock::Fixed`] for deterministic tests.
#![warn(missing_docs)]

mod config;
mod error;
mod incrementer;
mod part;
mod template;
mod version;

pub use crate::config::VersionConfig;
pub use crate::error::{BumpError, ConfigError, Error, SerializeError};
pub use crate::incrementer::{Clock, Incrementer, DATE_KEYS};
pub use crate::part::VersionPart;
pub use crate::template::Template;
pub use crate::version::Version;

/// A convenience module appropriate for glob imports (`use partbump::prelude::*;`).
pub mod prelude {
    #[doc(no_inline)]
    pub use crate::BumpError;
    #[doc(no_inline)]
    pub use crate::Clock;
    #[doc(no_inline)]
    pub use crate::ConfigError;
    #[doc(no_inline)]
    pub use crate::Error;
    #[doc(no_inline)]
    pub use crate::Incrementer;
    #[doc(no_inline)]
    pub use crate::SerializeError;
    #[doc(no_inline)]
    pub use crate::Template;
    #[doc(no_inline)]
    pub use crate::Version;
    #[doc(no_inline)]
    pub use crate::VersionConfig;
    #[doc(no_inline)]
    pub use crate::VersionPart;
}
