//! Test-only base detectors.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

use super::BaseDetector;
use super::ReplaceFn;
use crate::error::DetectionError;
use crate::matching::MatchPayload;
use crate::matching::MatchRecord;
use crate::options::DetectorOptions;

/// Detector that links every occurrence of a set of scripted literals.
///
/// Spans whose kind is switched off in the options are left alone. When
/// scripted spans overlap, the leftmost one wins and ties go to the longer
/// span.
#[derive(Debug, Default)]
pub struct ScriptedDetector {
    spans: Vec<(String, MatchPayload)>,
    link_calls: AtomicUsize,
}

impl ScriptedDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_span(mut self, literal: impl Into<String>, payload: MatchPayload) -> Self {
        self.spans.push((literal.into(), payload));
        self
    }

    pub fn with_email(self, email: &str) -> Self {
        self.with_span(
            email,
            MatchPayload::Email {
                email: email.to_string(),
            },
        )
    }

    pub fn with_phone(self, phone: &str) -> Self {
        let number = phone.chars().filter(char::is_ascii_digit).collect();
        self.with_span(
            phone,
            MatchPayload::Phone {
                number,
                plus_sign: phone.starts_with('+'),
            },
        )
    }

    pub fn link_call_count(&self) -> usize {
        self.link_calls.load(Ordering::SeqCst)
    }
}

impl BaseDetector for ScriptedDetector {
    fn link(
        &self,
        text: &str,
        options: &DetectorOptions,
        replace: &mut ReplaceFn<'_>,
    ) -> Result<String, DetectionError> {
        self.link_calls.fetch_add(1, Ordering::SeqCst);

        let mut found: Vec<(usize, &str, &MatchPayload)> = self
            .spans
            .iter()
            .filter(|(literal, payload)| !literal.is_empty() && options.allows(payload.kind()))
            .flat_map(|(literal, payload)| {
                text.match_indices(literal.as_str())
                    .map(move |(start, matched)| (start, matched, payload))
            })
            .collect();
        found.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.len().cmp(&a.1.len())));

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, matched, payload) in found {
            if start < cursor {
                continue;
            }
            out.push_str(&text[cursor..start]);
            out.push_str(&replace(MatchRecord::new(matched, start, payload.clone())));
            cursor = start + matched.len();
        }
        out.push_str(&text[cursor..]);
        Ok(out)
    }
}

/// Detector that always fails with the configured error.
#[derive(Debug)]
pub struct FailingDetector {
    error: DetectionError,
}

impl FailingDetector {
    pub fn new(error: DetectionError) -> Self {
        Self { error }
    }
}

impl Default for FailingDetector {
    fn default() -> Self {
        Self::new(DetectionError::Internal("scripted failure".to_string()))
    }
}

impl BaseDetector for FailingDetector {
    fn link(
        &self,
        _text: &str,
        _options: &DetectorOptions,
        _replace: &mut ReplaceFn<'_>,
    ) -> Result<String, DetectionError> {
        Err(self.error.clone())
    }
}
