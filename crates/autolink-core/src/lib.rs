//! Token-safe link weaving for autolink.
//!
//! A base detector finds emails, URLs, hashtags, mentions and phone numbers;
//! registered custom matchers (geographic coordinates out of the box) run
//! over what is left. The [`Weaver`] turns both into an ordered list of
//! [`Segment`]s that a renderer maps to plain text and links.

#![deny(clippy::all)]

pub mod detector;
mod error;
pub mod matchers;
pub mod matching;
mod options;
mod segment;
mod token;
pub mod truncate;
mod weave;

pub use detector::BaseDetector;
pub use detector::ReplaceFn;
pub use error::DetectionError;
pub use error::WeaveError;
pub use matchers::LATLNG_MATCHER_ID;
pub use matchers::MatcherDefinition;
pub use matchers::MatcherRegistry;
pub use matching::MatchKind;
pub use matching::MatchPayload;
pub use matching::MatchRecord;
pub use matching::UrlMatchType;
pub use options::DetectorOptions;
pub use options::HashtagService;
pub use options::MentionService;
pub use options::StripPrefix;
pub use options::UnknownServiceError;
pub use options::UrlOptions;
pub use segment::Segment;
pub use segment::reconstruct;
pub use token::TokenGenerator;
pub use truncate::TruncateLocation;
pub use truncate::TruncateOptions;
pub use truncate::truncate;
pub use weave::WeaveOptions;
pub use weave::Weaver;
