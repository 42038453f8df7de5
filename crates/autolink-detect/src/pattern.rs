//! Regex scanners for each base kind and overlap resolution.

use std::sync::OnceLock;

use autolink_core::DetectorOptions;
use autolink_core::HashtagService;
use autolink_core::MatchPayload;
use autolink_core::MentionService;
use autolink_core::UrlMatchType;
use regex::Regex;

/// Top-level domains that make a bare `name.tld` linkable.
const KNOWN_TLDS: &[&str] = &[
    "com", "org", "net", "edu", "gov", "mil", "int", "io", "dev", "app", "ai", "co", "me", "info",
    "biz", "xyz", "tech", "us", "uk", "ca", "au", "de", "fr", "es", "it", "nl", "se", "no", "pt",
    "br", "jp", "cn", "in", "ru", "ch",
];

/// Characters trimmed from the end of a URL match.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', '\'', '"'];

struct PatternRegexes {
    email: Regex,
    scheme_url: Regex,
    www_url: Regex,
    tld_url: Regex,
    hashtag: Regex,
    phone: Regex,
}

fn get_patterns() -> &'static PatternRegexes {
    static PATTERNS: OnceLock<PatternRegexes> = OnceLock::new();
    PATTERNS.get_or_init(|| PatternRegexes {
        email: Regex::new(
            r"(?i)(?:mailto:)?(?P<address>[\p{L}\p{N}][\p{L}\p{N}._%+-]*@[a-z0-9](?:[a-z0-9-]*[a-z0-9])?(?:\.[a-z0-9](?:[a-z0-9-]*[a-z0-9])?)*\.[a-z]{2,})",
        )
        .unwrap(),
        scheme_url: Regex::new(r#"(?i)\b(?:https?|ftp)://[^\s<>"]+"#).unwrap(),
        www_url: Regex::new(r#"(?i)\bwww\.[^\s<>"]+"#).unwrap(),
        tld_url: Regex::new(&format!(
            r#"(?i)\b(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+(?:{})\b(?::\d{{1,5}})?(?:[/?#][^\s<>"]*)?"#,
            KNOWN_TLDS.join("|")
        ))
        .unwrap(),
        hashtag: Regex::new(r"#(\w{1,139})").unwrap(),
        phone: Regex::new(
            r"(?:(?P<plus>\+)?1[-.\s]?)?(?:\(\d{3}\)\s?\d{3}[-.\s]?\d{4}|\d{3}[-.\s]?\d{3}[-.\s]?\d{4}|\d{3}[-.]\d{4})",
        )
        .unwrap(),
    })
}

fn mention_regex(service: MentionService) -> &'static Regex {
    static TWITTER: OnceLock<Regex> = OnceLock::new();
    static INSTAGRAM: OnceLock<Regex> = OnceLock::new();
    static SOUNDCLOUD: OnceLock<Regex> = OnceLock::new();
    match service {
        MentionService::Twitter => {
            TWITTER.get_or_init(|| Regex::new(r"@([A-Za-z0-9_]{1,50})").unwrap())
        }
        MentionService::Instagram => {
            INSTAGRAM.get_or_init(|| Regex::new(r"@([A-Za-z0-9_.]{1,30})").unwrap())
        }
        MentionService::Soundcloud => {
            SOUNDCLOUD.get_or_init(|| Regex::new(r"@([A-Za-z0-9_.-]{1,50})").unwrap())
        }
    }
}

/// A detected span before overlap resolution. `start..end` is a byte range
/// of the scanned text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub start: usize,
    pub end: usize,
    pub payload: MatchPayload,
}

impl Candidate {
    fn len(&self) -> usize {
        self.end - self.start
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn char_before(text: &str, idx: usize) -> Option<char> {
    text[..idx].chars().next_back()
}

fn char_after(text: &str, idx: usize) -> Option<char> {
    text[idx..].chars().next()
}

/// Scans `text` for every kind switched on in `options`.
pub fn scan(text: &str, options: &DetectorOptions) -> Vec<Candidate> {
    let mut candidates = Vec::new();

    if options.email {
        candidates.extend(scan_emails(text));
    }
    if options.urls.is_enabled() {
        candidates.extend(scan_urls(text, options));
    }
    if let Some(service) = options.hashtag {
        candidates.extend(scan_hashtags(text, service));
    }
    if let Some(service) = options.mention {
        candidates.extend(scan_mentions(text, service));
    }
    if options.phone {
        candidates.extend(scan_phones(text));
    }

    candidates
}

fn scan_emails(text: &str) -> Vec<Candidate> {
    get_patterns()
        .email
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            if char_before(text, full.start()).is_some_and(is_word_char) {
                return None;
            }
            let address = caps.name("address")?;
            Some(Candidate {
                start: full.start(),
                end: full.end(),
                payload: MatchPayload::Email {
                    email: address.as_str().to_string(),
                },
            })
        })
        .collect()
}

fn scan_urls(text: &str, options: &DetectorOptions) -> Vec<Candidate> {
    let patterns = get_patterns();
    let shapes = [
        (options.urls.scheme_matches, &patterns.scheme_url, UrlMatchType::Scheme),
        (options.urls.www_matches, &patterns.www_url, UrlMatchType::Www),
        (options.urls.tld_matches, &patterns.tld_url, UrlMatchType::Tld),
    ];

    let mut candidates = Vec::new();
    for (enabled, regex, url_type) in shapes {
        if !enabled {
            continue;
        }
        for m in regex.find_iter(text) {
            if url_type != UrlMatchType::Scheme
                && matches!(char_before(text, m.start()), Some('@' | '.' | '/'))
            {
                continue;
            }
            // `www.` hosts belong to the www switch.
            if url_type == UrlMatchType::Tld && starts_with_www(m.as_str()) {
                continue;
            }
            let url = trim_url(m.as_str());
            if !has_host(url, url_type) {
                continue;
            }
            candidates.push(Candidate {
                start: m.start(),
                end: m.start() + url.len(),
                payload: MatchPayload::Url {
                    url: url.to_string(),
                    url_type,
                    protocol_relative: false,
                    strip_prefix: options.strip_prefix,
                    strip_trailing_slash: options.strip_trailing_slash,
                },
            });
        }
    }
    candidates
}

/// Drops trailing punctuation and closing parentheses that have no opening
/// partner inside the URL.
pub fn trim_url(url: &str) -> &str {
    let mut url = url;
    loop {
        let trimmed = url.trim_end_matches(TRAILING_PUNCTUATION);
        let trimmed = match trimmed.strip_suffix(')') {
            Some(rest) if trimmed.matches('(').count() < trimmed.matches(')').count() => rest,
            _ => trimmed,
        };
        if trimmed.len() == url.len() {
            return url;
        }
        url = trimmed;
    }
}

fn starts_with_www(url: &str) -> bool {
    url.get(..4).is_some_and(|prefix| prefix.eq_ignore_ascii_case("www."))
}

fn has_host(url: &str, url_type: UrlMatchType) -> bool {
    let rest = match url_type {
        UrlMatchType::Scheme => url.split_once("://").map_or("", |(_, rest)| rest),
        UrlMatchType::Www => &url[4.min(url.len())..],
        UrlMatchType::Tld => url,
    };
    rest.chars().next().is_some_and(|c| c.is_alphanumeric())
}

fn scan_hashtags(text: &str, service: HashtagService) -> Vec<Candidate> {
    get_patterns()
        .hashtag
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            if char_before(text, full.start()).is_some_and(is_word_char) {
                return None;
            }
            Some(Candidate {
                start: full.start(),
                end: full.end(),
                payload: MatchPayload::Hashtag {
                    service,
                    hashtag: caps.get(1)?.as_str().to_string(),
                },
            })
        })
        .collect()
}

fn scan_mentions(text: &str, service: MentionService) -> Vec<Candidate> {
    mention_regex(service)
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            if char_before(text, full.start()).is_some_and(is_word_char) {
                return None;
            }
            let name = caps.get(1)?.as_str().trim_end_matches(['.', '-']);
            if name.is_empty() {
                return None;
            }
            Some(Candidate {
                start: full.start(),
                end: full.start() + 1 + name.len(),
                payload: MatchPayload::Mention {
                    service,
                    mention: name.to_string(),
                },
            })
        })
        .collect()
}

fn scan_phones(text: &str) -> Vec<Candidate> {
    get_patterns()
        .phone
        .captures_iter(text)
        .filter_map(|caps| {
            let full = caps.get(0)?;
            // Digits and numeric punctuation on the left mean the span is the
            // tail of a longer number, such as a coordinate.
            let numeric_before = char_before(text, full.start())
                .is_some_and(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+'));
            let digit_after = char_after(text, full.end()).is_some_and(|c| c.is_ascii_digit());
            if numeric_before || digit_after {
                return None;
            }
            Some(Candidate {
                start: full.start(),
                end: full.end(),
                payload: MatchPayload::Phone {
                    number: full.as_str().chars().filter(char::is_ascii_digit).collect(),
                    plus_sign: caps.name("plus").is_some(),
                },
            })
        })
        .collect()
}

/// Keeps the leftmost candidate of every overlapping group, preferring the
/// longest when several start at the same byte. Result is sorted by start.
pub fn resolve_overlaps(mut candidates: Vec<Candidate>) -> Vec<Candidate> {
    candidates.sort_by(|a, b| a.start.cmp(&b.start).then(b.len().cmp(&a.len())));

    let mut result: Vec<Candidate> = Vec::with_capacity(candidates.len());
    let mut cursor = 0;
    for candidate in candidates {
        if candidate.start < cursor || candidate.start == candidate.end {
            continue;
        }
        cursor = candidate.end;
        result.push(candidate);
    }
    result
}
