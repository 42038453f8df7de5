//! Registry of custom matchers that run after the base detector.
//!
//! A custom matcher is a pattern plus a constructor for its match record.
//! Adding a new kind of link only needs a new [`MatcherDefinition`]; the
//! weaving engine iterates the registry and never names a matcher itself.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use tracing::warn;

use crate::matching::MatchRecord;

/// Builds a match record from the matched text and its byte offset.
pub type BuildMatch = fn(&str, usize) -> MatchRecord;

pub const LATLNG_MATCHER_ID: &str = "latlng";

/// Latitude in [-90, 90] and longitude in [-180, 180], comma separated.
const LATLNG_PATTERN: &str = r"[-+]?([1-8]?\d(\.\d+)?|90(\.0+)?),\s*[-+]?(180(\.0+)?|((1[0-7]\d)|([1-9]?\d))(\.\d+)?)";

#[derive(Clone)]
pub struct MatcherDefinition {
    id: &'static str,
    pattern: Regex,
    build: BuildMatch,
}

impl MatcherDefinition {
    pub fn new(id: &'static str, pattern: Regex, build: BuildMatch) -> Self {
        Self { id, pattern, build }
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn pattern(&self) -> &Regex {
        &self.pattern
    }

    pub fn build(&self, matched_text: &str, offset: usize) -> MatchRecord {
        (self.build)(matched_text, offset)
    }
}

impl fmt::Debug for MatcherDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatcherDefinition")
            .field("id", &self.id)
            .field("pattern", &self.pattern.as_str())
            .finish_non_exhaustive()
    }
}

/// Geographic coordinate matcher.
pub fn latlng_matcher() -> MatcherDefinition {
    MatcherDefinition::new(
        LATLNG_MATCHER_ID,
        Regex::new(LATLNG_PATTERN).unwrap(),
        MatchRecord::latlng,
    )
}

/// Ordered, immutable list of custom matchers.
#[derive(Debug, Clone, Default)]
pub struct MatcherRegistry {
    matchers: Vec<MatcherDefinition>,
}

impl MatcherRegistry {
    /// The process-wide registry of built-in matchers.
    pub fn builtin() -> &'static MatcherRegistry {
        static REGISTRY: OnceLock<MatcherRegistry> = OnceLock::new();
        REGISTRY.get_or_init(|| MatcherRegistry::new(vec![latlng_matcher()]))
    }

    pub fn new(matchers: Vec<MatcherDefinition>) -> Self {
        Self::default().extended(matchers)
    }

    /// Appends `more` after the existing matchers. A definition whose id is
    /// already registered is skipped.
    pub fn extended(mut self, more: impl IntoIterator<Item = MatcherDefinition>) -> Self {
        for matcher in more {
            if self.get(matcher.id()).is_some() {
                warn!(matcher = matcher.id(), "duplicate custom matcher id skipped");
                continue;
            }
            self.matchers.push(matcher);
        }
        self
    }

    pub fn get(&self, id: &str) -> Option<&MatcherDefinition> {
        self.matchers.iter().find(|m| m.id == id)
    }

    /// Matchers in registry order.
    pub fn iter(&self) -> std::slice::Iter<'_, MatcherDefinition> {
        self.matchers.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.matchers.iter().map(|m| m.id)
    }

    pub fn len(&self) -> usize {
        self.matchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matchers.is_empty()
    }
}

impl<'a> IntoIterator for &'a MatcherRegistry {
    type Item = &'a MatcherDefinition;
    type IntoIter = std::slice::Iter<'a, MatcherDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
