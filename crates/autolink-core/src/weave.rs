//! The weaving engine.
//!
//! One pass turns raw text into an ordered sequence of [`Segment`]s:
//!
//! 1. seed a [`TokenGenerator`] for the pass,
//! 2. let the base detector replace every span it finds with a fresh token,
//! 3. run each enabled custom matcher, in registry order, over the already
//!    tokenized text and replace its spans with fresh tokens,
//! 4. split the text on this pass's tokens and map every fragment to a link
//!    (known token) or a text segment (anything else).
//!
//! A pass keeps no state once it returns. Detection failures abort the pass;
//! partial output is never produced.

use std::collections::BTreeSet;
use std::collections::HashMap;

use rand::Rng;
use regex::Captures;
use regex::Regex;
use tracing::debug;
use tracing::warn;

use crate::detector::BaseDetector;
use crate::error::WeaveError;
use crate::matchers::MatcherRegistry;
use crate::matching::MatchRecord;
use crate::options::DetectorOptions;
use crate::segment::Segment;
use crate::token::TokenGenerator;

/// Options for one weave pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeaveOptions {
    pub detector: DetectorOptions,
    /// Ids of the custom matchers to run. Ids missing from the registry are
    /// ignored.
    pub custom: BTreeSet<String>,
}

impl WeaveOptions {
    pub fn new(detector: DetectorOptions) -> Self {
        Self {
            detector,
            custom: BTreeSet::new(),
        }
    }

    pub fn with_custom(mut self, id: impl Into<String>) -> Self {
        self.custom.insert(id.into());
        self
    }

    pub fn is_custom_enabled(&self, id: &str) -> bool {
        self.custom.contains(id)
    }
}

type TokenMap = HashMap<String, MatchRecord>;

#[derive(Debug)]
pub struct Weaver<'a, D: ?Sized> {
    detector: &'a D,
    registry: &'a MatcherRegistry,
}

impl<'a, D: BaseDetector + ?Sized> Weaver<'a, D> {
    /// Weaver using the built-in custom matchers.
    pub fn new(detector: &'a D) -> Self {
        Self::with_registry(detector, MatcherRegistry::builtin())
    }

    pub fn with_registry(detector: &'a D, registry: &'a MatcherRegistry) -> Self {
        Self { detector, registry }
    }

    /// Runs one pass with a salt drawn from the thread-local random source.
    pub fn weave(&self, text: &str, options: &WeaveOptions) -> Result<Vec<Segment>, WeaveError> {
        self.weave_with_rng(text, options, &mut rand::thread_rng())
    }

    /// Runs one pass with a salt drawn from `rng`. The same seed and input
    /// always produce the same segments.
    #[tracing::instrument(level = "debug", skip(self, text, options, rng), fields(len = text.len()))]
    pub fn weave_with_rng<R: Rng>(
        &self,
        text: &str,
        options: &WeaveOptions,
        rng: &mut R,
    ) -> Result<Vec<Segment>, WeaveError> {
        if text.is_empty() {
            return Ok(Vec::new());
        }

        let mut tokens = TokenGenerator::new(rng, text);
        let mut matches = TokenMap::new();

        let linked = {
            let mut replace = |record: MatchRecord| {
                let token = tokens.next_token();
                matches.insert(token.clone(), record);
                token
            };
            self.detector.link(text, &options.detector, &mut replace)?
        };
        let base_count = matches.len();

        let linked = self.apply_custom_matchers(linked, options, &mut tokens, &mut matches);
        debug!(
            salt = tokens.salt(),
            base = base_count,
            custom = matches.len() - base_count,
            "spans tokenized"
        );

        Ok(split_tokens(&linked, &tokens.pattern(), matches))
    }

    /// Runs one pass and logs a failure instead of returning it. `None` means
    /// nothing should be rendered for this input.
    pub fn weave_or_warn(&self, text: &str, options: &WeaveOptions) -> Option<Vec<Segment>> {
        match self.weave(text, options) {
            Ok(segments) => Some(segments),
            Err(err) => {
                warn!(error = %err, "link detection failed, rendering nothing");
                None
            }
        }
    }

    fn apply_custom_matchers(
        &self,
        mut text: String,
        options: &WeaveOptions,
        tokens: &mut TokenGenerator,
        matches: &mut TokenMap,
    ) -> String {
        for id in &options.custom {
            if self.registry.get(id).is_none() {
                debug!(matcher = %id, "ignoring unknown custom matcher");
            }
        }

        for matcher in self
            .registry
            .iter()
            .filter(|m| options.is_custom_enabled(m.id()))
        {
            let replaced = matcher.pattern().replace_all(&text, |caps: &Captures<'_>| {
                let (matched, offset) = caps
                    .get(0)
                    .map_or(("", 0), |m| (m.as_str(), m.start()));
                let token = tokens.next_token();
                matches.insert(token.clone(), matcher.build(matched, offset));
                token
            });
            text = replaced.into_owned();
        }

        text
    }
}

/// Splits `text` around every token of this pass and maps the fragments to
/// segments. Only tokens present in `matches` become links, so look-alike
/// literals stay text. Record offsets are re-based onto the original input
/// as the fragments are walked.
fn split_tokens(text: &str, pattern: &Regex, mut matches: TokenMap) -> Vec<Segment> {
    let mut fragments = Vec::new();
    let mut last = 0;
    for token in pattern.find_iter(text) {
        fragments.push(&text[last..token.start()]);
        fragments.push(token.as_str());
        last = token.end();
    }
    fragments.push(&text[last..]);

    let mut segments = Vec::with_capacity(fragments.len());
    let mut original_offset = 0;
    for fragment in fragments.into_iter().filter(|f| !f.is_empty()) {
        let index = segments.len();
        match matches.remove(fragment) {
            Some(mut record) => {
                record.rebase(original_offset);
                original_offset += record.matched_text().len();
                segments.push(Segment::Link {
                    display_text: record.anchor_text(),
                    record,
                    index,
                });
            }
            None => {
                original_offset += fragment.len();
                segments.push(Segment::Text {
                    content: fragment.to_string(),
                    index,
                });
            }
        }
    }
    segments
}
