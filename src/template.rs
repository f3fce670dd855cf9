//! Placeholder substitution.
//!
//! Tokens are replaced with plain whole-text `replace` calls, one token at a
//! time, in the order of [`substitution_table`]. Two details of that order
//! are observable and must not change:
//!
//! - `$WCREVNUM$` is replaced before `$WCREV$`, which shares its prefix.
//! - The tag token is `$WCTAG` with no closing `$`. A template that writes
//!   `$WCTAG$` therefore keeps a literal `$` after the tag value
//!   (`v1.2$`). Existing templates depend on this, so it is kept as is.

use chrono::{
    DateTime,
    SecondsFormat,
    Utc,
};

use crate::git::RepositoryFacts;

/// Revision count (same value as `$WCREV$`).
pub const WCREVNUM: &str = "$WCREVNUM$";
/// Abbreviated commit id.
pub const WCREVID: &str = "$WCREVID$";
/// Branch name.
pub const WCBRANCH: &str = "$WCBRANCH$";
/// Describe label. No closing `$`.
pub const WCTAG: &str = "$WCTAG";
/// Revision count.
pub const WCREV: &str = "$WCREV$";
/// UTC instant, RFC 3339.
pub const WCDATE: &str = "$WCDATE$";
/// UTC date, `YYYY-MM-DD`.
pub const WCDATE2: &str = "$WCDATE2$";
/// UTC year, `YYYY`.
pub const WCYEAR: &str = "$WCYEAR$";

/// Date strings derived from a single instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampFacts {
    /// e.g. `2024-05-06T07:08:09Z`
    pub instant: String,
    /// e.g. `2024-05-06`
    pub date: String,
    /// e.g. `2024`
    pub year: String,
}

impl TimestampFacts {
    pub fn now() -> Self {
        Self::from_datetime(Utc::now())
    }

    pub fn from_datetime(at: DateTime<Utc>) -> Self {
        Self {
            instant: at.to_rfc3339_opts(SecondsFormat::Secs, true),
            date: at.format("%Y-%m-%d").to_string(),
            year: at.format("%Y").to_string(),
        }
    }
}

/// Token/value pairs in the order they are applied.
pub fn substitution_table<'a>(
    facts: &'a RepositoryFacts,
    timestamps: &'a TimestampFacts,
) -> [(&'static str, &'a str); 8] {
    [
        (WCREVNUM, facts.revision_count.as_str()),
        (WCREVID, facts.short_id.as_str()),
        (WCBRANCH, facts.branch.as_str()),
        (WCTAG, facts.tag.as_str()),
        (WCREV, facts.revision_count.as_str()),
        (WCDATE, timestamps.instant.as_str()),
        (WCDATE2, timestamps.date.as_str()),
        (WCYEAR, timestamps.year.as_str()),
    ]
}

/// Replace every placeholder in `template`.
///
/// Each step scans the text produced by the previous one, so a value that
/// itself contains a later token is substituted again.
pub fn substitute(template: &str, facts: &RepositoryFacts, timestamps: &TimestampFacts) -> String {
    substitution_table(facts, timestamps)
        .into_iter()
        .fold(template.to_string(), |text, (token, value)| {
            text.replace(token, value)
        })
}
