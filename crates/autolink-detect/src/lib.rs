//! Regex base detector for autolink.
//!
//! [`PatternDetector`] recognises emails, URLs, hashtags, mentions and phone
//! numbers in plain text and plugs into the weaving engine through the
//! [`BaseDetector`] port.

#![deny(clippy::all)]

mod pattern;

use autolink_core::BaseDetector;
use autolink_core::DetectionError;
use autolink_core::DetectorOptions;
use autolink_core::MatchRecord;
use autolink_core::ReplaceFn;
use tracing::debug;

pub use pattern::trim_url;

/// Largest input accepted by default, in bytes.
pub const DEFAULT_MAX_INPUT_LEN: usize = 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatternDetector {
    max_input_len: usize,
}

impl Default for PatternDetector {
    fn default() -> Self {
        Self {
            max_input_len: DEFAULT_MAX_INPUT_LEN,
        }
    }
}

impl PatternDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects inputs longer than `max_input_len` bytes.
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    pub fn max_input_len(&self) -> usize {
        self.max_input_len
    }

    /// Every span `options` allows, left to right, without overlaps.
    pub fn detect(
        &self,
        text: &str,
        options: &DetectorOptions,
    ) -> Result<Vec<MatchRecord>, DetectionError> {
        if text.len() > self.max_input_len {
            return Err(DetectionError::InputTooLarge {
                len: text.len(),
                max: self.max_input_len,
            });
        }

        let candidates = pattern::resolve_overlaps(pattern::scan(text, options));
        debug!(count = candidates.len(), "base spans detected");

        Ok(candidates
            .into_iter()
            .map(|c| MatchRecord::new(&text[c.start..c.end], c.start, c.payload))
            .collect())
    }
}

impl BaseDetector for PatternDetector {
    fn link(
        &self,
        text: &str,
        options: &DetectorOptions,
        replace: &mut ReplaceFn<'_>,
    ) -> Result<String, DetectionError> {
        let records = self.detect(text, options)?;

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for record in records {
            let start = record.offset();
            let end = start + record.matched_text().len();
            out.push_str(&text[cursor..start]);
            out.push_str(&replace(record));
            cursor = end;
        }
        out.push_str(&text[cursor..]);
        Ok(out)
    }
}
