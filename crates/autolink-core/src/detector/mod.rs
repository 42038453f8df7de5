//! Port to the base detector that recognises emails, URLs, hashtags,
//! mentions and phone numbers.

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use crate::error::DetectionError;
use crate::matching::MatchRecord;
use crate::options::DetectorOptions;

/// Callback through which the weaving engine substitutes a token for each
/// detected span.
pub type ReplaceFn<'a> = dyn FnMut(MatchRecord) -> String + 'a;

/// Multi-pattern span recognizer.
///
/// Implementations scan `text`, call `replace` once per detected span in
/// left-to-right order, and return `text` with every detected span replaced
/// by the string `replace` returned for it. Kinds switched off in `options`
/// must not be reported.
pub trait BaseDetector {
    fn link(
        &self,
        text: &str,
        options: &DetectorOptions,
        replace: &mut ReplaceFn<'_>,
    ) -> Result<String, DetectionError>;
}

impl<T: BaseDetector + ?Sized> BaseDetector for &T {
    fn link(
        &self,
        text: &str,
        options: &DetectorOptions,
        replace: &mut ReplaceFn<'_>,
    ) -> Result<String, DetectionError> {
        (**self).link(text, options, replace)
    }
}

impl<T: BaseDetector + ?Sized> BaseDetector for Box<T> {
    fn link(
        &self,
        text: &str,
        options: &DetectorOptions,
        replace: &mut ReplaceFn<'_>,
    ) -> Result<String, DetectionError> {
        (**self).link(text, options, replace)
    }
}
