use std::fmt;

use serde::Deserialize;
use serde::Serialize;

/// Kind of a detected span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Email,
    Url,
    Hashtag,
    LatLng,
    Mention,
    Phone,
}

impl MatchKind {
    pub const ALL: [MatchKind; 6] = [
        MatchKind::Email,
        MatchKind::Url,
        MatchKind::Hashtag,
        MatchKind::LatLng,
        MatchKind::Mention,
        MatchKind::Phone,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MatchKind::Email => "email",
            MatchKind::Url => "url",
            MatchKind::Hashtag => "hashtag",
            MatchKind::LatLng => "latlng",
            MatchKind::Mention => "mention",
            MatchKind::Phone => "phone",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
