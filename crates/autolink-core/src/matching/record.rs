use serde::Deserialize;
use serde::Serialize;

use super::MatchKind;
use crate::options::HashtagService;
use crate::options::MentionService;
use crate::options::StripPrefix;

/// How a URL match was recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlMatchType {
    /// Starts with a scheme such as `https://`.
    Scheme,
    /// Starts with `www.`.
    Www,
    /// Bare domain recognised by its top-level domain.
    Tld,
}

/// Kind-specific data carried by a [`MatchRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MatchPayload {
    Email {
        email: String,
    },
    Url {
        url: String,
        url_type: UrlMatchType,
        protocol_relative: bool,
        strip_prefix: StripPrefix,
        strip_trailing_slash: bool,
    },
    Hashtag {
        service: HashtagService,
        hashtag: String,
    },
    Mention {
        service: MentionService,
        mention: String,
    },
    Phone {
        /// Digits only.
        number: String,
        plus_sign: bool,
    },
    LatLng {
        latlng: String,
    },
}

impl MatchPayload {
    pub fn kind(&self) -> MatchKind {
        match self {
            MatchPayload::Email { .. } => MatchKind::Email,
            MatchPayload::Url { .. } => MatchKind::Url,
            MatchPayload::Hashtag { .. } => MatchKind::Hashtag,
            MatchPayload::Mention { .. } => MatchKind::Mention,
            MatchPayload::Phone { .. } => MatchKind::Phone,
            MatchPayload::LatLng { .. } => MatchKind::LatLng,
        }
    }
}

/// One detected span of the input text.
///
/// `offset` is a byte offset into the text the record was built from. The
/// weaving engine re-bases it onto the original input before handing the
/// record out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    matched_text: String,
    offset: usize,
    #[serde(flatten)]
    payload: MatchPayload,
}

impl MatchRecord {
    pub fn new(matched_text: impl Into<String>, offset: usize, payload: MatchPayload) -> Self {
        Self {
            matched_text: matched_text.into(),
            offset,
            payload,
        }
    }

    pub fn email(matched_text: impl Into<String>, offset: usize, email: impl Into<String>) -> Self {
        Self::new(
            matched_text,
            offset,
            MatchPayload::Email {
                email: email.into(),
            },
        )
    }

    pub fn latlng(matched_text: &str, offset: usize) -> Self {
        Self::new(
            matched_text,
            offset,
            MatchPayload::LatLng {
                latlng: matched_text.to_string(),
            },
        )
    }

    pub fn kind(&self) -> MatchKind {
        self.payload.kind()
    }

    pub fn matched_text(&self) -> &str {
        &self.matched_text
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn payload(&self) -> &MatchPayload {
        &self.payload
    }

    pub(crate) fn rebase(&mut self, offset: usize) {
        self.offset = offset;
    }

    /// Text to show for the link.
    pub fn anchor_text(&self) -> String {
        match &self.payload {
            MatchPayload::Email { email } => email.clone(),
            MatchPayload::Url {
                url,
                protocol_relative,
                strip_prefix,
                strip_trailing_slash,
                ..
            } => url_anchor_text(url, *protocol_relative, *strip_prefix, *strip_trailing_slash),
            MatchPayload::Hashtag { hashtag, .. } => format!("#{hashtag}"),
            MatchPayload::Mention { mention, .. } => format!("@{mention}"),
            MatchPayload::Phone { .. } => self.matched_text.clone(),
            MatchPayload::LatLng { latlng } => latlng.clone(),
        }
    }

    /// Target the link points to, before any platform-specific rewriting.
    pub fn anchor_href(&self) -> String {
        match &self.payload {
            MatchPayload::Email { email } => format!("mailto:{email}"),
            MatchPayload::Url { url, .. } => {
                if scheme_len(url).is_some() || url.starts_with("//") {
                    url.clone()
                } else {
                    format!("http://{url}")
                }
            }
            MatchPayload::Hashtag { service, hashtag } => match service {
                HashtagService::Facebook => format!("https://www.facebook.com/hashtag/{hashtag}"),
                HashtagService::Instagram => {
                    format!("https://www.instagram.com/explore/tags/{hashtag}")
                }
                HashtagService::Twitter => format!("https://twitter.com/hashtag/{hashtag}"),
            },
            MatchPayload::Mention { service, mention } => match service {
                MentionService::Instagram => format!("https://instagram.com/{mention}"),
                MentionService::Soundcloud => format!("https://soundcloud.com/{mention}"),
                MentionService::Twitter => format!("https://twitter.com/{mention}"),
            },
            MatchPayload::Phone { number, plus_sign } => {
                format!("tel:{}{}", if *plus_sign { "+" } else { "" }, number)
            }
            MatchPayload::LatLng { latlng } => latlng.split_whitespace().collect(),
        }
    }

    pub fn email_address(&self) -> Option<&str> {
        match &self.payload {
            MatchPayload::Email { email } => Some(email),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match &self.payload {
            MatchPayload::Url { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn hashtag(&self) -> Option<&str> {
        match &self.payload {
            MatchPayload::Hashtag { hashtag, .. } => Some(hashtag),
            _ => None,
        }
    }

    pub fn mention(&self) -> Option<&str> {
        match &self.payload {
            MatchPayload::Mention { mention, .. } => Some(mention),
            _ => None,
        }
    }

    /// Phone number digits, with a leading `+` when one was written.
    pub fn phone_number(&self) -> Option<String> {
        match &self.payload {
            MatchPayload::Phone { number, plus_sign } => Some(if *plus_sign {
                format!("+{number}")
            } else {
                number.clone()
            }),
            _ => None,
        }
    }

    pub fn latlng_text(&self) -> Option<&str> {
        match &self.payload {
            MatchPayload::LatLng { latlng } => Some(latlng),
            _ => None,
        }
    }

    /// Parsed `(latitude, longitude)` of a coordinate match.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        let (lat, lng) = self.latlng_text()?.split_once(',')?;
        Some((lat.trim().parse().ok()?, lng.trim().parse().ok()?))
    }
}

/// Length of a leading `scheme://`, if any.
fn scheme_len(url: &str) -> Option<usize> {
    let idx = url.find("://")?;
    let scheme = &url[..idx];
    let mut chars = scheme.chars();
    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let valid = starts_with_letter
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '.' | '-'));
    valid.then_some(idx + 3)
}

fn url_anchor_text(
    url: &str,
    protocol_relative: bool,
    strip_prefix: StripPrefix,
    strip_trailing_slash: bool,
) -> String {
    let mut text = url;
    if protocol_relative {
        text = text.strip_prefix("//").unwrap_or(text);
    }

    let (scheme, mut rest) = match scheme_len(text) {
        Some(len) => text.split_at(len),
        None => ("", text),
    };

    if strip_prefix.www && rest.len() >= 4 && rest[..4].eq_ignore_ascii_case("www.") {
        rest = &rest[4..];
    }
    if strip_trailing_slash {
        rest = rest.strip_suffix('/').unwrap_or(rest);
    }

    if strip_prefix.scheme {
        rest.to_string()
    } else {
        format!("{scheme}{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_record(url: &str, url_type: UrlMatchType, strip: bool) -> MatchRecord {
        MatchRecord::new(
            url,
            0,
            MatchPayload::Url {
                url: url.to_string(),
                url_type,
                protocol_relative: url.starts_with("//"),
                strip_prefix: StripPrefix::from(strip),
                strip_trailing_slash: strip,
            },
        )
    }

    #[test]
    fn test_email_anchor() {
        let record = MatchRecord::email("test@x.com", 4, "test@x.com");
        assert_eq!(record.kind(), MatchKind::Email);
        assert_eq!(record.anchor_text(), "test@x.com");
        assert_eq!(record.anchor_href(), "mailto:test@x.com");
        assert_eq!(record.email_address(), Some("test@x.com"));
    }

    #[test]
    fn test_url_anchor_strips_prefix_and_slash() {
        let record = url_record("https://www.example.com/", UrlMatchType::Scheme, true);
        assert_eq!(record.anchor_text(), "example.com");
        assert_eq!(record.anchor_href(), "https://www.example.com/");
    }

    #[test]
    fn test_url_anchor_keeps_prefix_when_disabled() {
        let record = url_record("https://www.example.com/", UrlMatchType::Scheme, false);
        assert_eq!(record.anchor_text(), "https://www.example.com/");
    }

    #[test]
    fn test_url_href_adds_scheme_for_bare_domains() {
        let www = url_record("www.example.com", UrlMatchType::Www, true);
        assert_eq!(www.anchor_href(), "http://www.example.com");
        assert_eq!(www.anchor_text(), "example.com");

        let tld = url_record("example.org/docs", UrlMatchType::Tld, true);
        assert_eq!(tld.anchor_href(), "http://example.org/docs");
    }

    #[test]
    fn test_protocol_relative_url() {
        let record = url_record("//cdn.example.com/lib.js", UrlMatchType::Scheme, true);
        assert_eq!(record.anchor_href(), "//cdn.example.com/lib.js");
        assert_eq!(record.anchor_text(), "cdn.example.com/lib.js");
    }

    #[test]
    fn test_hashtag_and_mention_hrefs() {
        let tag = MatchRecord::new(
            "#rust",
            0,
            MatchPayload::Hashtag {
                service: HashtagService::Twitter,
                hashtag: "rust".to_string(),
            },
        );
        assert_eq!(tag.anchor_text(), "#rust");
        assert_eq!(tag.anchor_href(), "https://twitter.com/hashtag/rust");

        let mention = MatchRecord::new(
            "@ferris",
            0,
            MatchPayload::Mention {
                service: MentionService::Soundcloud,
                mention: "ferris".to_string(),
            },
        );
        assert_eq!(mention.anchor_text(), "@ferris");
        assert_eq!(mention.anchor_href(), "https://soundcloud.com/ferris");
    }

    #[test]
    fn test_phone_anchor() {
        let record = MatchRecord::new(
            "+1 (555) 123-4567",
            0,
            MatchPayload::Phone {
                number: "15551234567".to_string(),
                plus_sign: true,
            },
        );
        assert_eq!(record.anchor_text(), "+1 (555) 123-4567");
        assert_eq!(record.anchor_href(), "tel:+15551234567");
        assert_eq!(record.phone_number().as_deref(), Some("+15551234567"));
    }

    #[test]
    fn test_latlng_anchor() {
        let record = MatchRecord::latlng("40.7128, -74.0060", 11);
        assert_eq!(record.kind(), MatchKind::LatLng);
        assert_eq!(record.matched_text(), "40.7128, -74.0060");
        assert_eq!(record.anchor_text(), "40.7128, -74.0060");
        assert_eq!(record.anchor_href(), "40.7128,-74.0060");
        assert_eq!(record.coordinates(), Some((40.7128, -74.006)));
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let record = MatchRecord::latlng("1.5,2.5", 3);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["kind"], "latlng");
        assert_eq!(json["matched_text"], "1.5,2.5");
        assert_eq!(json["offset"], 3);
        assert_eq!(json["latlng"], "1.5,2.5");
    }
}
