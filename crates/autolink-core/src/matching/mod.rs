//! Match records: one typed value per detected span.

mod kind;
mod record;

pub use kind::MatchKind;
pub use record::MatchPayload;
pub use record::MatchRecord;
pub use record::UrlMatchType;
