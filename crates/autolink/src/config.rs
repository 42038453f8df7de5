use std::env;

use autolink_core::TruncateLocation;
use autolink_core::TruncateOptions;
use autolink_core::truncate::DEFAULT_ELLIPSIS;
use autolink_core::truncate::DEFAULT_TRUNCATE_LENGTH;
use autolink_detect::DEFAULT_MAX_INPUT_LEN;
use tracing::warn;

/// Defaults for the command line, read from `AUTOLINK_*` variables.
/// Command line flags override every field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutolinkConfig {
    /// Longest link display text in characters; 0 disables truncation.
    pub truncate: usize,
    pub truncate_chars: String,
    pub truncate_location: TruncateLocation,
    /// Largest input handed to the detector, in bytes.
    pub max_input_len: usize,
}

impl Default for AutolinkConfig {
    fn default() -> Self {
        Self {
            truncate: DEFAULT_TRUNCATE_LENGTH,
            truncate_chars: DEFAULT_ELLIPSIS.to_string(),
            truncate_location: TruncateLocation::default(),
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl AutolinkConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from `lookup`, falling back to defaults for missing or
    /// unparsable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            truncate: parsed(&lookup, "AUTOLINK_TRUNCATE").unwrap_or(defaults.truncate),
            truncate_chars: lookup("AUTOLINK_TRUNCATE_CHARS").unwrap_or(defaults.truncate_chars),
            truncate_location: parsed(&lookup, "AUTOLINK_TRUNCATE_LOCATION")
                .unwrap_or(defaults.truncate_location),
            max_input_len: parsed(&lookup, "AUTOLINK_MAX_INPUT")
                .unwrap_or(defaults.max_input_len),
        }
    }

    pub fn with_truncate(mut self, length: usize) -> Self {
        self.truncate = length;
        self
    }

    pub fn with_truncate_chars(mut self, chars: impl Into<String>) -> Self {
        self.truncate_chars = chars.into();
        self
    }

    pub fn with_truncate_location(mut self, location: TruncateLocation) -> Self {
        self.truncate_location = location;
        self
    }

    pub fn with_max_input_len(mut self, max: usize) -> Self {
        self.max_input_len = max;
        self
    }

    /// Truncation applied to link display text, or `None` when disabled.
    pub fn truncate_options(&self) -> Option<TruncateOptions> {
        (self.truncate > 0).then(|| {
            TruncateOptions::new(self.truncate)
                .with_ellipsis(self.truncate_chars.clone())
                .with_location(self.truncate_location)
        })
    }
}

fn parsed<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(key, value = %raw, "ignoring unparsable environment value");
            None
        }
    }
}
