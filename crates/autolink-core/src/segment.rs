use serde::Serialize;

use crate::matching::MatchRecord;

/// One ordered unit of woven output.
///
/// `index` is the position of the segment in its sequence and is meant to be
/// used as a stable rendering key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Segment {
    Text {
        content: String,
        index: usize,
    },
    Link {
        display_text: String,
        record: MatchRecord,
        index: usize,
    },
}

impl Segment {
    pub fn index(&self) -> usize {
        match self {
            Segment::Text { index, .. } | Segment::Link { index, .. } => *index,
        }
    }

    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link { .. })
    }

    pub fn record(&self) -> Option<&MatchRecord> {
        match self {
            Segment::Link { record, .. } => Some(record),
            Segment::Text { .. } => None,
        }
    }

    /// What a renderer shows for this segment.
    pub fn display_text(&self) -> &str {
        match self {
            Segment::Text { content, .. } => content,
            Segment::Link { display_text, .. } => display_text,
        }
    }

    /// The slice of the original input this segment stands for.
    pub fn source_text(&self) -> &str {
        match self {
            Segment::Text { content, .. } => content,
            Segment::Link { record, .. } => record.matched_text(),
        }
    }
}

/// Rebuilds the input text a segment sequence was woven from.
pub fn reconstruct(segments: &[Segment]) -> String {
    segments.iter().map(Segment::source_text).collect()
}
