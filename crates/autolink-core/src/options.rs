//! Options understood by base detectors.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::matching::MatchKind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {what} service '{value}'")]
pub struct UnknownServiceError {
    what: &'static str,
    value: String,
}

/// Service whose hashtag pages a hashtag links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashtagService {
    Facebook,
    Instagram,
    Twitter,
}

impl HashtagService {
    pub fn as_str(&self) -> &'static str {
        match self {
            HashtagService::Facebook => "facebook",
            HashtagService::Instagram => "instagram",
            HashtagService::Twitter => "twitter",
        }
    }
}

impl fmt::Display for HashtagService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HashtagService {
    type Err = UnknownServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "facebook" => Ok(HashtagService::Facebook),
            "instagram" => Ok(HashtagService::Instagram),
            "twitter" => Ok(HashtagService::Twitter),
            _ => Err(UnknownServiceError {
                what: "hashtag",
                value: s.to_string(),
            }),
        }
    }
}

/// Service whose profiles a mention links to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MentionService {
    Instagram,
    Soundcloud,
    Twitter,
}

impl MentionService {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentionService::Instagram => "instagram",
            MentionService::Soundcloud => "soundcloud",
            MentionService::Twitter => "twitter",
        }
    }
}

impl fmt::Display for MentionService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MentionService {
    type Err = UnknownServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "instagram" => Ok(MentionService::Instagram),
            "soundcloud" => Ok(MentionService::Soundcloud),
            "twitter" => Ok(MentionService::Twitter),
            _ => Err(UnknownServiceError {
                what: "mention",
                value: s.to_string(),
            }),
        }
    }
}

/// Which shapes of URL are linked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlOptions {
    /// `http://example.com`
    pub scheme_matches: bool,
    /// `www.example.com`
    pub www_matches: bool,
    /// `example.com`
    pub tld_matches: bool,
}

impl UrlOptions {
    pub fn is_enabled(&self) -> bool {
        self.scheme_matches || self.www_matches || self.tld_matches
    }
}

impl Default for UrlOptions {
    fn default() -> Self {
        Self::from(true)
    }
}

impl From<bool> for UrlOptions {
    fn from(enabled: bool) -> Self {
        Self {
            scheme_matches: enabled,
            www_matches: enabled,
            tld_matches: enabled,
        }
    }
}

/// Prefixes removed from URL display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StripPrefix {
    pub scheme: bool,
    pub www: bool,
}

impl Default for StripPrefix {
    fn default() -> Self {
        Self::from(true)
    }
}

impl From<bool> for StripPrefix {
    fn from(strip: bool) -> Self {
        Self {
            scheme: strip,
            www: strip,
        }
    }
}

/// Per-kind switches handed to the base detector.
///
/// Kinds that are switched off must never be matched by the detector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorOptions {
    pub email: bool,
    pub hashtag: Option<HashtagService>,
    pub mention: Option<MentionService>,
    pub phone: bool,
    pub urls: UrlOptions,
    pub strip_prefix: StripPrefix,
    pub strip_trailing_slash: bool,
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            email: true,
            hashtag: None,
            mention: None,
            phone: true,
            urls: UrlOptions::default(),
            strip_prefix: StripPrefix::default(),
            strip_trailing_slash: true,
        }
    }
}

impl DetectorOptions {
    /// Options with every kind switched off.
    pub fn disabled() -> Self {
        Self {
            email: false,
            hashtag: None,
            mention: None,
            phone: false,
            urls: UrlOptions::from(false),
            ..Self::default()
        }
    }

    /// Whether the base detector may report matches of `kind`.
    ///
    /// Custom kinds are never reported by a base detector.
    pub fn allows(&self, kind: MatchKind) -> bool {
        match kind {
            MatchKind::Email => self.email,
            MatchKind::Url => self.urls.is_enabled(),
            MatchKind::Hashtag => self.hashtag.is_some(),
            MatchKind::Mention => self.mention.is_some(),
            MatchKind::Phone => self.phone,
            MatchKind::LatLng => false,
        }
    }
}
