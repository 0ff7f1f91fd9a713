//! Types used by the link database.

/// Row identifier; the codec input for short codes. Ids start at 1.
pub type LinkId = i64;

/// A stored URL or text value and its click counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub id: LinkId,
    pub value: String,
    pub clicks: i64,
}

/// Row view used by `snip list`.
#[derive(Debug, Clone)]
pub struct LinkSummary {
    pub id: LinkId,
    pub value: String,
    pub clicks: i64,
    pub created_at: i64,
}
