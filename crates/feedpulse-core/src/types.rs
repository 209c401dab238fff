use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Derive the stable article id from its canonical URL.
///
/// UUID v5 in the URL namespace, so the same URL always maps to the
/// same id regardless of when or where the article was collected.
#[must_use]
pub fn article_id_for_url(url: &str) -> Uuid {
    Uuid::new_v5(&Uuid::NAMESPACE_URL, url.as_bytes())
}

/// A collected article. Immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: Uuid,
    pub title: String,
    /// Identifier of the account/source the article belongs to.
    pub account_id: String,
    pub category: String,
    pub url: String,
    pub publish_time: DateTime<Utc>,
}

/// One dated engagement observation for an article.
///
/// Snapshots are append-only and at most one exists per calendar day.
/// Counters absent from the source payload default to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngagementSnapshot {
    #[serde(default)]
    pub read: u64,
    #[serde(default)]
    pub like: u64,
    #[serde(default)]
    pub looking: u64,
    #[serde(default)]
    pub comment: u64,
    #[serde(default)]
    pub share: u64,
    #[serde(default)]
    pub collect: u64,
    pub fetched_date: NaiveDate,
}

impl EngagementSnapshot {
    /// looking / read. 0.0 when the article has no reads.
    #[must_use]
    pub fn looking_rate(&self) -> f64 {
        ratio(self.looking, self.read)
    }

    /// share / read. 0.0 when the article has no reads.
    #[must_use]
    pub fn share_rate(&self) -> f64 {
        ratio(self.share, self.read)
    }

    /// (like + looking + comment) / read, as a percentage.
    /// 0.0 when the article has no reads.
    #[must_use]
    pub fn engagement_rate(&self) -> f64 {
        ratio(self.like + self.looking + self.comment, self.read) * 100.0
    }

    /// like / read, as a percentage. 0.0 when the article has no reads.
    #[must_use]
    pub fn like_rate(&self) -> f64 {
        ratio(self.like, self.read) * 100.0
    }

    /// comment / read, as a percentage. 0.0 when the article has no reads.
    #[must_use]
    pub fn comment_rate(&self) -> f64 {
        ratio(self.comment, self.read) * 100.0
    }
}

#[allow(clippy::cast_precision_loss)]
fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
