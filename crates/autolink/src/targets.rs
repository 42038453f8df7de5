//! Where a detected link leads when it is opened.
//!
//! Social services get an app deep link plus a web fallback. Coordinates turn
//! into a map search on the configured provider.

use autolink_core::HashtagService;
use autolink_core::MatchPayload;
use autolink_core::MatchRecord;
use autolink_core::MentionService;
use clap::ValueEnum;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PhoneAction {
    /// Do not link phone numbers
    Off,
    /// Link with `tel:`
    #[default]
    Call,
    /// Link with `sms:`
    #[value(alias = "text")]
    Sms,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum MapProvider {
    Apple,
    #[default]
    Google,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TargetOptions {
    pub phone: PhoneAction,
    pub map_provider: MapProvider,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkTarget {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback: Option<String>,
}

impl LinkTarget {
    fn direct(url: String) -> Self {
        Self { url, fallback: None }
    }

    fn with_fallback(url: String, fallback: String) -> Self {
        Self {
            url,
            fallback: Some(fallback),
        }
    }

    /// The URL to open. With `web_fallback` set, a web fallback is preferred
    /// over an app deep link.
    pub fn preferred(&self, web_fallback: bool) -> &str {
        match &self.fallback {
            Some(fallback) if web_fallback => fallback,
            _ => &self.url,
        }
    }
}

pub fn link_target(record: &MatchRecord, options: &TargetOptions) -> LinkTarget {
    match record.payload() {
        MatchPayload::Email { email } => {
            LinkTarget::direct(format!("mailto:{}", encode_uri_component(email)))
        }
        MatchPayload::Url { .. } => LinkTarget::direct(record.anchor_href()),
        MatchPayload::Hashtag { service, hashtag } => {
            let tag = encode_uri_component(hashtag);
            match service {
                HashtagService::Facebook => LinkTarget::with_fallback(
                    format!("fb://hashtag/{tag}"),
                    format!("https://www.facebook.com/hashtag/{tag}"),
                ),
                HashtagService::Instagram => LinkTarget::with_fallback(
                    format!("instagram://tag?name={tag}"),
                    format!("https://www.instagram.com/explore/tags/{tag}/"),
                ),
                HashtagService::Twitter => LinkTarget::with_fallback(
                    format!("twitter://search?query=%23{tag}"),
                    format!("https://twitter.com/hashtag/{tag}"),
                ),
            }
        }
        MatchPayload::Mention { service, mention } => match service {
            MentionService::Instagram => LinkTarget::with_fallback(
                format!("instagram://user?username={mention}"),
                format!("https://www.instagram.com/{mention}/"),
            ),
            MentionService::Soundcloud => {
                LinkTarget::direct(format!("https://soundcloud.com/{mention}"))
            }
            MentionService::Twitter => LinkTarget::with_fallback(
                format!("twitter://user?screen_name={mention}"),
                format!("https://twitter.com/{mention}"),
            ),
        },
        MatchPayload::Phone { .. } => {
            let number = record.phone_number().unwrap_or_default();
            match options.phone {
                PhoneAction::Sms => LinkTarget::direct(format!("sms:{number}")),
                PhoneAction::Call | PhoneAction::Off => LinkTarget::direct(format!("tel:{number}")),
            }
        }
        MatchPayload::LatLng { latlng } => {
            let query = record.anchor_href();
            LinkTarget::direct(match options.map_provider {
                MapProvider::Apple => format!(
                    "http://maps.apple.com/?q={}&ll={query}",
                    encode_uri_component(latlng)
                ),
                MapProvider::Google => {
                    format!("https://www.google.com/maps/search/?api=1&query={query}")
                }
            })
        }
    }
}

/// Percent-encodes everything except ASCII alphanumerics and `-_.!~*'()`.
pub fn encode_uri_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(char::from(byte)),
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
